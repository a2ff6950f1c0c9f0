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

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sensor_smi::cli::{Cli, Commands, WatchArgs};
use sensor_smi::common::config::{EnvConfig, KeywordConfig};
use sensor_smi::error::Result;
use sensor_smi::resolve::MetricResolver;
use sensor_smi::source::create_provider;
use sensor_smi::view::{
    create_stdout_sink, run_list_mode, run_once_mode, run_watch_mode, DataCollector,
};

fn init_tracing(verbose: bool) {
    // Logs go to stderr so JSON output on stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvConfig::default_log_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let keywords = match &cli.source.keywords {
        Some(path) => KeywordConfig::load(path)?,
        None => KeywordConfig::default(),
    };
    let provider = create_provider(cli.source.source, cli.source.path.as_deref())?;
    let collector = DataCollector::new(provider, MetricResolver::new(keywords));

    match cli.command {
        Some(Commands::Once) => {
            let mut sink = create_stdout_sink(cli.source.format);
            run_once_mode(&collector, sink.as_mut()).await
        }
        Some(Commands::List(args)) => {
            let mut stdout = std::io::stdout().lock();
            run_list_mode(&collector, &args, cli.source.format, &mut stdout).await
        }
        Some(Commands::Watch(args)) => {
            let mut sink = create_stdout_sink(cli.source.format);
            run_watch_mode(&collector, &args, sink.as_mut()).await
        }
        None => {
            // Default to watch mode when no command is specified
            let mut sink = create_stdout_sink(cli.source.format);
            run_watch_mode(&collector, &WatchArgs::default(), sink.as_mut()).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.source.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
