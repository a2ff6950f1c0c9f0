// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::source::SourceKind;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the source and print power, temperature and frequency on every tick. (default)
    Watch(WatchArgs),
    /// Resolve the metrics once and exit.
    Once,
    /// List the indexed readings to explore a source's labels.
    List(ListArgs),
}

#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Where readings come from. `auto` picks hwmon on Linux, LibreHardwareMonitor on Windows and sysinfo elsewhere.
    #[arg(short, long, value_enum, default_value_t = SourceKind::Auto, global = true)]
    pub source: SourceKind,
    /// Snapshot or log file for the json and csv sources, sysfs root for hwmon.
    #[arg(short, long, global = true)]
    pub path: Option<PathBuf>,
    /// JSON file overriding the keyword sets used to find each metric.
    #[arg(short, long, global = true)]
    pub keywords: Option<PathBuf>,
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    /// Log matching decisions (same as RUST_LOG=sensor_smi=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Clone, Debug, Default)]
pub struct WatchArgs {
    /// The interval in seconds between two polls.
    #[arg(short, long)]
    pub interval: Option<u64>,
    /// Stop after this many polls.
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,
}

#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Maximum number of readings to print.
    #[arg(short, long, default_value_t = crate::common::config::AppConfig::DEFAULT_LIST_LIMIT)]
    pub limit: usize,
    /// Only show labels matching this regular expression (case-insensitive).
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, colored when writing to a terminal.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["sensor-smi"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.source.source, SourceKind::Auto);
        assert_eq!(cli.source.format, OutputFormat::Text);
    }

    #[test]
    fn test_global_source_args_after_subcommand() {
        let cli = Cli::parse_from([
            "sensor-smi",
            "watch",
            "--interval",
            "5",
            "--source",
            "csv",
            "--path",
            "hwinfo.csv",
        ]);
        assert_eq!(cli.source.source, SourceKind::Csv);
        assert_eq!(cli.source.path, Some(PathBuf::from("hwinfo.csv")));
        match cli.command {
            Some(Commands::Watch(args)) => assert_eq!(args.interval, Some(5)),
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn test_zero_count_is_rejected() {
        assert!(Cli::try_parse_from(["sensor-smi", "watch", "--count", "0"]).is_err());

        let cli = Cli::parse_from(["sensor-smi", "watch", "-n", "2"]);
        match cli.command {
            Some(Commands::Watch(args)) => assert_eq!(args.count, Some(2)),
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn test_list_args() {
        let cli = Cli::parse_from(["sensor-smi", "list", "--filter", "package", "-l", "10"]);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.limit, 10);
                assert_eq!(args.filter.as_deref(), Some("package"));
            }
            _ => panic!("expected list"),
        }
    }
}
