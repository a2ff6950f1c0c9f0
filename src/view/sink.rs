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

//! Presentation sinks for resolved metrics.

use std::io::{self, Write};

use crossterm::style::Stylize;
use regex::Regex;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::common::config::AppConfig;
use crate::error::Error;
use crate::resolve::{MetricKind, MetricValue, ReadingIndex};
use crate::view::data_collector::MetricsSnapshot;

/// Consumer of one snapshot per poll.
pub trait MetricSink: Send {
    fn publish(&mut self, snapshot: &MetricsSnapshot) -> io::Result<()>;

    /// Called instead of [`MetricSink::publish`] when acquisition failed.
    fn report_failure(&mut self, source: &str, error: &Error) -> io::Result<()>;
}

/// Decimal places used for each metric in text output.
fn precision(kind: MetricKind) -> usize {
    match kind {
        MetricKind::Power => 2,
        MetricKind::Temperature => 1,
        MetricKind::Frequency => 0,
    }
}

fn metric_title(kind: MetricKind) -> String {
    match kind {
        MetricKind::Frequency => format!("{} (approx)", kind.display_name()),
        _ => kind.display_name().to_string(),
    }
}

/// One uncolored line of text output.
pub fn format_metric_line(kind: MetricKind, value: &MetricValue) -> String {
    let title = metric_title(kind);
    match value {
        MetricValue::Normalized { value, unit } => {
            format!("{title}: {value:.prec$} {unit}", prec = precision(kind))
        }
        MetricValue::Raw { raw } => format!("{title} (raw): {raw}"),
        MetricValue::NotFound => format!("{title}: NOT FOUND"),
    }
}

pub struct TextSink<W: Write + Send> {
    out: W,
    color: bool,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    fn write_metric(&mut self, kind: MetricKind, value: &MetricValue) -> io::Result<()> {
        let line = format_metric_line(kind, value);
        if !self.color {
            return writeln!(self.out, "{line}");
        }
        match value {
            MetricValue::Normalized { .. } => writeln!(self.out, "{}", line.green()),
            MetricValue::Raw { .. } => writeln!(self.out, "{}", line.yellow()),
            MetricValue::NotFound => writeln!(self.out, "{}", line.red()),
        }
    }
}

impl<W: Write + Send> MetricSink for TextSink<W> {
    fn publish(&mut self, snapshot: &MetricsSnapshot) -> io::Result<()> {
        writeln!(
            self.out,
            "--- {} | {} ({} readings, {} indexed) ---",
            snapshot.timestamp.format("%Y-%m-%d %H:%M:%S"),
            snapshot.source,
            snapshot.readings,
            snapshot.indexed
        )?;
        for kind in MetricKind::ALL {
            self.write_metric(kind, snapshot.metrics.get(kind))?;
        }
        self.out.flush()
    }

    fn report_failure(&mut self, source: &str, error: &Error) -> io::Result<()> {
        let line = format!("Error reading {source}: {error}");
        if self.color {
            writeln!(self.out, "{}", line.red())?;
        } else {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}

pub struct JsonSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

#[derive(Serialize)]
struct FailureRecord<'a> {
    timestamp: chrono::DateTime<chrono::Utc>,
    source: &'a str,
    error: String,
}

impl<W: Write + Send> MetricSink for JsonSink<W> {
    fn publish(&mut self, snapshot: &MetricsSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn report_failure(&mut self, source: &str, error: &Error) -> io::Result<()> {
        let record = FailureRecord {
            timestamp: chrono::Utc::now(),
            source,
            error: error.to_string(),
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Sink writing to stdout in the requested format.
pub fn create_stdout_sink(format: OutputFormat) -> Box<dyn MetricSink> {
    use std::io::IsTerminal;

    match format {
        OutputFormat::Text => {
            let color = io::stdout().is_terminal();
            Box::new(TextSink::new(io::stdout(), color))
        }
        OutputFormat::Json => Box::new(JsonSink::new(io::stdout())),
    }
}

#[derive(Serialize)]
struct ListedReading<'a> {
    label: &'a str,
    value: &'a str,
}

/// Print the entries of a reading index, optionally filtered by a regex.
///
/// Returns the number of entries written.
pub fn write_index<W: Write>(
    out: &mut W,
    index: &ReadingIndex,
    format: OutputFormat,
    limit: usize,
    filter: Option<&Regex>,
) -> io::Result<usize> {
    let entries: Vec<ListedReading> = index
        .iter()
        .filter(|entry| filter.map(|re| re.is_match(entry.label())).unwrap_or(true))
        .take(limit)
        .map(|entry| ListedReading {
            label: entry.label(),
            value: entry.value(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for entry in &entries {
                writeln!(
                    out,
                    "{:<width$} {}",
                    entry.label,
                    entry.value,
                    width = AppConfig::LIST_LABEL_WIDTH
                )?;
            }
            if index.len() > entries.len() {
                writeln!(out, "... ({} of {} readings shown)", entries.len(), index.len())?;
            }
        }
    }
    Ok(entries.len())
}
