//! Carrier frequency and deviation

use serde::{Deserialize, Serialize};

use crate::settings::{merge_field, Settings};
use crate::{ProfileError, RadioDevice};

/// Default carrier frequency (433.92 MHz ISM)
pub const DEFAULT_FREQ_HZ: u32 = 433_920_000;

/// Default FSK deviation
pub const DEFAULT_DEVIATION_HZ: u32 = 5_200;

/// `radio` section of a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioSection {
    /// Carrier frequency in Hz
    pub freq: Option<u32>,
    /// Frequency deviation in Hz
    pub deviation: Option<u32>,
}

/// Radio-level settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioSettings {
    freq: u32,
    deviation: u32,
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self {
            freq: DEFAULT_FREQ_HZ,
            deviation: DEFAULT_DEVIATION_HZ,
        }
    }
}

impl Settings for RadioSettings {
    type Section = RadioSection;

    fn merge(&mut self, section: RadioSection) -> Result<(), ProfileError> {
        merge_field(&mut self.freq, section.freq);
        merge_field(&mut self.deviation, section.deviation);
        Ok(())
    }
}

impl RadioSettings {
    /// Carrier frequency in Hz
    pub fn freq(&self) -> u32 {
        self.freq
    }

    /// Frequency deviation in Hz
    pub fn deviation(&self) -> u32 {
        self.deviation
    }

    /// Program frequency, then deviation
    pub fn setup<D: RadioDevice + ?Sized>(&self, device: &mut D) -> Result<(), D::Error> {
        device.set_frequency(self.freq)?;
        device.set_deviation(self.deviation)?;
        Ok(())
    }

    /// Format frequency for display
    pub fn frequency_display(&self) -> String {
        let mhz = self.freq as f64 / 1_000_000.0;
        format!("{:.3} MHz", mhz)
    }
}
