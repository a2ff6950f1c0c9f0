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

//! Cross-platform source backed by `sysinfo`.
//!
//! Emits one temperature reading per hardware component and CPU clock
//! readings (average and per core). sysinfo does not expose power, so the
//! power metric usually stays unresolved with this source.

use std::sync::Mutex;

use sysinfo::{Components, CpuRefreshKind, System};

use crate::error::Result;
use crate::reading::Reading;
use crate::source::ReadingProvider;

pub struct SysinfoProvider {
    system: Mutex<System>,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_specifics(CpuRefreshKind::everything());
        Self {
            system: Mutex::new(system),
        }
    }

    fn component_readings() -> Vec<Reading> {
        let components = Components::new_with_refreshed_list();
        components
            .iter()
            .map(|component| {
                Reading::new()
                    .with_field("Label", component.label())
                    .with_field("Value", component.temperature())
                    .with_field("SensorType", "Temperature")
                    .with_field("Critical", component.critical())
            })
            .collect()
    }

    fn clock_readings(&self) -> Vec<Reading> {
        // Recover the guard if a previous holder panicked
        let mut system = self
            .system
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        system.refresh_cpu_specifics(CpuRefreshKind::everything());

        let frequencies: Vec<u64> = system
            .cpus()
            .iter()
            .map(|cpu| cpu.frequency())
            .filter(|mhz| *mhz > 0)
            .collect();
        if frequencies.is_empty() {
            return Vec::new();
        }

        let average = frequencies.iter().sum::<u64>() / frequencies.len() as u64;
        let mut readings = vec![Reading::new()
            .with_field("Label", "CPU Clock")
            .with_field("Value", format!("{average} MHz"))
            .with_field("SensorType", "Clock")];
        readings.extend(frequencies.iter().enumerate().map(|(core, mhz)| {
            Reading::new()
                .with_field("Label", format!("Core #{core} Clock"))
                .with_field("Value", format!("{mhz} MHz"))
                .with_field("SensorType", "Clock")
        }));
        readings
    }
}

impl ReadingProvider for SysinfoProvider {
    fn name(&self) -> &str {
        "sysinfo"
    }

    fn read_readings(&self) -> Result<Vec<Reading>> {
        let mut readings = Self::component_readings();
        readings.extend(self.clock_readings());
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::FieldAccess;

    #[test]
    fn test_sysinfo_provider_does_not_panic() {
        let provider = SysinfoProvider::new();
        let readings = provider.read_readings().unwrap();
        // Nothing can be assumed about CI hardware, only the shape
        for reading in &readings {
            assert!(reading.field("Label").is_some());
            assert!(reading.field("SensorType").is_some());
        }
    }

    #[test]
    fn test_sysinfo_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SysinfoProvider>();
    }
}
