//! Partial-section merging shared by every settings type
//!
//! A profile may omit whole sections or individual keys. Each settings
//! type therefore pairs a fully-defaulted value with a *section* type
//! whose fields are all optional; merging copies only the keys that are
//! present, so every field always ends up with a defined value.

use serde::de::DeserializeOwned;

use crate::ProfileError;

/// A settings object that can be built from an optional profile section
pub trait Settings: Default {
    /// The partial, all-optional form of this settings object
    type Section: DeserializeOwned + Default;

    /// Copy every field present in `section` over the current values
    fn merge(&mut self, section: Self::Section) -> Result<(), ProfileError>;

    /// Build settings from defaults, merging `section` when present
    fn from_section(section: Option<Self::Section>) -> Result<Self, ProfileError> {
        let mut settings = Self::default();
        if let Some(section) = section {
            settings.merge(section)?;
        }
        Ok(settings)
    }
}

/// Overwrite `field` only when the section supplied a value
pub(crate) fn merge_field<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}
