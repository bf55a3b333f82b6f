//! Profile document
//!
//! Serde form of a manufacturer profile. Every section is optional and
//! unknown keys are ignored, so partial profiles are valid.

use serde::{Deserialize, Serialize};

use crate::{CommandSpec, ModemSection, ProfileError, RadioSection, RepeatSection};

/// A complete manufacturer profile as written by users
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Carrier settings
    pub radio: Option<RadioSection>,
    /// Modem settings
    pub modem: Option<ModemSection>,
    /// Repeat/timing policy
    pub repeat: Option<RepeatSection>,
    /// Named commands; later entries override earlier ones with the same name
    pub commands: Option<Vec<CommandSpec>>,
}

impl Profile {
    /// Parse a profile from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already-parsed JSON value into a profile
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProfileError> {
        Ok(serde_json::from_value(value)?)
    }
}
