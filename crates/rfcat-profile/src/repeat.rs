//! Repeat/timing policy for command transmission

use serde::{Deserialize, Serialize};

use crate::settings::{merge_field, Settings};
use crate::ProfileError;

/// Default number of transmissions per command
pub const DEFAULT_REPEAT_COUNT: u32 = 3;

/// Default pause between transmissions, in milliseconds
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 100;

/// `repeat` section of a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatSection {
    /// Number of transmissions
    pub count: Option<u32>,
    /// Pause between transmissions in milliseconds
    pub delay: Option<u32>,
    /// Keep the radio on between transmissions
    pub radio_on: Option<bool>,
}

/// How often a command is sent and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatSettings {
    count: u32,
    delay: u32,
    radio_on: bool,
}

impl Default for RepeatSettings {
    fn default() -> Self {
        Self {
            count: DEFAULT_REPEAT_COUNT,
            delay: DEFAULT_REPEAT_DELAY_MS,
            radio_on: false,
        }
    }
}

impl Settings for RepeatSettings {
    type Section = RepeatSection;

    fn merge(&mut self, section: RepeatSection) -> Result<(), ProfileError> {
        merge_field(&mut self.count, section.count);
        merge_field(&mut self.delay, section.delay);
        merge_field(&mut self.radio_on, section.radio_on);
        Ok(())
    }
}

impl RepeatSettings {
    /// Number of transmissions per command (0 sends nothing)
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Pause between consecutive transmissions in milliseconds
    pub fn delay(&self) -> u32 {
        self.delay
    }

    /// Stored as configured; transmission does not consult it.
    pub fn radio_on(&self) -> bool {
        self.radio_on
    }
}
