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

//! Linux hwmon sysfs source.
//!
//! Every `/sys/class/hwmon/hwmonN` directory belongs to one chip driver
//! (`coretemp`, `k10temp`, `amdgpu`, `nct6775`, ...) and exposes channels as
//! `<type><n>_input` files with an optional `<type><n>_label`. Values are
//! converted from sysfs milli/micro units and emitted with their unit, e.g.
//! `{Label: "coretemp Package id 0", Value: "61 °C"}`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::reading::Reading;
use crate::source::ReadingProvider;

const HWMON_ROOT: &str = "/sys/class/hwmon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ChannelType {
    Temp,
    Power,
    Freq,
    In,
    Curr,
    Fan,
}

impl ChannelType {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "temp" => Some(ChannelType::Temp),
            "power" => Some(ChannelType::Power),
            "freq" => Some(ChannelType::Freq),
            "in" => Some(ChannelType::In),
            "curr" => Some(ChannelType::Curr),
            "fan" => Some(ChannelType::Fan),
            _ => None,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            ChannelType::Temp => "temp",
            ChannelType::Power => "power",
            ChannelType::Freq => "freq",
            ChannelType::In => "in",
            ChannelType::Curr => "curr",
            ChannelType::Fan => "fan",
        }
    }

    /// Divisor from the sysfs unit to `unit()`.
    fn divisor(self) -> f64 {
        match self {
            ChannelType::Temp | ChannelType::In | ChannelType::Curr => 1_000.0,
            ChannelType::Power | ChannelType::Freq => 1_000_000.0,
            ChannelType::Fan => 1.0,
        }
    }

    fn unit(self) -> &'static str {
        match self {
            ChannelType::Temp => "°C",
            ChannelType::Power => "W",
            ChannelType::Freq => "MHz",
            ChannelType::In => "V",
            ChannelType::Curr => "A",
            ChannelType::Fan => "RPM",
        }
    }

    fn type_name(self) -> &'static str {
        match self {
            ChannelType::Temp => "Temperature",
            ChannelType::Power => "Power",
            ChannelType::Freq => "Clock",
            ChannelType::In => "Voltage",
            ChannelType::Curr => "Current",
            ChannelType::Fan => "Fan",
        }
    }
}

/// A value file such as `temp1_input` or `power1_average`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Channel {
    kind: ChannelType,
    number: u32,
    attribute: String,
}

impl Channel {
    fn parse(file_name: &str) -> Option<Self> {
        let (stem, attribute) = file_name.split_once('_')?;
        if attribute != "input" && attribute != "average" {
            return None;
        }
        let digits_at = stem.find(|c: char| c.is_ascii_digit())?;
        let (prefix, number) = stem.split_at(digits_at);
        Some(Self {
            kind: ChannelType::from_prefix(prefix)?,
            number: number.parse().ok()?,
            attribute: attribute.to_string(),
        })
    }

    fn stem(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.number)
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Numeric suffix of `hwmonN`, used to keep chips in kernel order.
fn hwmon_number(path: &Path) -> u32 {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_prefix("hwmon"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}

pub struct HwmonProvider {
    root: PathBuf,
}

impl Default for HwmonProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HwmonProvider {
    pub fn new() -> Self {
        Self::with_root(HWMON_ROOT)
    }

    /// Read from a different hwmon tree (useful for tests and chroots).
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read_chip(&self, dir: &Path) -> Vec<Reading> {
        let chip = read_trimmed(&dir.join("name")).unwrap_or_else(|| {
            dir.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        });

        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut channels: Vec<Channel> = entries
            .flatten()
            .filter_map(|entry| Channel::parse(&entry.file_name().to_string_lossy()))
            .collect();
        channels.sort();
        // power1_average and power1_input describe the same channel
        channels.dedup_by(|a, b| a.kind == b.kind && a.number == b.number);

        channels
            .into_iter()
            .filter_map(|channel| {
                let stem = channel.stem();
                let raw = read_trimmed(&dir.join(format!("{stem}_{}", channel.attribute)))?;
                let raw: f64 = raw.parse().ok()?;
                let value = raw / channel.kind.divisor();
                let label = read_trimmed(&dir.join(format!("{stem}_label"))).unwrap_or(stem);

                Some(
                    Reading::new()
                        .with_field("Label", format!("{chip} {label}"))
                        .with_field("Value", format!("{value} {}", channel.kind.unit()))
                        .with_field("SensorType", channel.kind.type_name())
                        .with_field("Chip", chip.clone()),
                )
            })
            .collect()
    }
}

impl ReadingProvider for HwmonProvider {
    fn name(&self) -> &str {
        "hwmon"
    }

    fn read_readings(&self) -> Result<Vec<Reading>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            Error::SourceUnavailable(format!("cannot list {}: {e}", self.root.display()))
        })?;

        let mut chips: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        chips.sort_by_key(|path| hwmon_number(path));

        Ok(chips.iter().flat_map(|dir| self.read_chip(dir)).collect())
    }
}
