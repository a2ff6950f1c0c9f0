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

//! HWiNFO-style CSV sensor log source.
//!
//! HWiNFO (and several other tools) can log every sensor to a CSV file: the
//! first row holds the sensor labels, each following row one sample. The
//! provider pairs the header with the most recent non-empty row and turns
//! every column into a `{Label, Value}` reading.
//!
//! Logs are commonly written in a Windows code page, so cells are decoded
//! lossily instead of failing on the first `°`.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::reading::Reading;
use crate::source::ReadingProvider;

/// Parse a whole sensor log and return the readings of its last sample.
///
/// A log with fewer than two rows has no sample yet and yields an empty batch.
pub fn parse_log<R: io::Read>(reader: R) -> Result<Vec<Reading>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut header: Option<csv::ByteRecord> = None;
    let mut last: Option<csv::ByteRecord> = None;
    for record in csv_reader.byte_records() {
        let record = record?;
        if record.iter().all(|cell| cell.iter().all(u8::is_ascii_whitespace)) {
            continue;
        }
        if header.is_none() {
            header = Some(record);
        } else {
            last = Some(record);
        }
    }

    let (Some(header), Some(last)) = (header, last) else {
        return Ok(Vec::new());
    };

    Ok(header
        .iter()
        .zip(last.iter())
        .map(|(label, value)| {
            Reading::new()
                .with_field("Label", String::from_utf8_lossy(label).trim().to_string())
                .with_field("Value", String::from_utf8_lossy(value).trim().to_string())
        })
        .collect())
}

pub struct CsvLogProvider {
    path: PathBuf,
}

impl CsvLogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadingProvider for CsvLogProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn read_readings(&self) -> Result<Vec<Reading>> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            Error::SourceUnavailable(format!("cannot open {}: {e}", self.path.display()))
        })?;
        let readings = parse_log(io::BufReader::new(file))?;
        if readings.is_empty() {
            tracing::debug!("{} has no samples yet", self.path.display());
        }
        Ok(readings)
    }
}
