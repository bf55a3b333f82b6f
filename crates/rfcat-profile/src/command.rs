//! Named transmit commands
//!
//! A command's `code` is written in the profile as a string in which every
//! character stands for exactly one byte (U+0000..=U+00FF). No text
//! encoding is involved; characters above U+00FF are rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProfileError;

/// One entry of the `commands` list in a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Unique command name
    pub name: String,
    /// Human-readable description, defaults to the name
    #[serde(default)]
    pub desc: Option<String>,
    /// Raw payload, one character per byte
    pub code: String,
}

/// A named, immutable byte payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    desc: String,
    code: Box<[u8]>,
}

impl Command {
    /// Create a command from a name, description and raw bytes
    pub fn new(
        name: impl Into<String>,
        desc: impl Into<String>,
        code: impl Into<Box<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            code: code.into(),
        }
    }

    /// Decode a command from its profile entry
    pub fn from_spec(spec: CommandSpec) -> Result<Self, ProfileError> {
        let code = decode_code(&spec.name, &spec.code)?;
        let desc = spec.desc.unwrap_or_else(|| spec.name.clone());
        Ok(Self {
            name: spec.name,
            desc,
            code,
        })
    }

    /// Command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Command description
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Payload bytes
    pub fn code(&self) -> &[u8] {
        &self.code
    }
}

impl TryFrom<CommandSpec> for Command {
    type Error = ProfileError;

    fn try_from(spec: CommandSpec) -> Result<Self, Self::Error> {
        Self::from_spec(spec)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {:02X?}", self.name, self.desc, self.code)
    }
}

/// Map each character of `code` to one byte
///
/// `command` is only used to label the error.
pub fn decode_code(command: &str, code: &str) -> Result<Box<[u8]>, ProfileError> {
    code.chars()
        .enumerate()
        .map(|(position, ch)| {
            u8::try_from(ch).map_err(|_| ProfileError::CodeOutOfRange {
                command: command.to_string(),
                position,
                ch,
            })
        })
        .collect()
}
