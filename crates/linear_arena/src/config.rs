//! # Arena Configuration
//!
//! The alignment policy of an arena. Every request is rounded up to a multiple
//! of `alignment` before it is carved from the region.
//!
//! ```toml
//! # arena.toml
//! alignment = 16
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ArenaError, ArenaResult};

/// Platform pointer width, the default alignment width.
pub const DEFAULT_ALIGNMENT: usize = std::mem::size_of::<usize>();

/// Configuration for an [`Arena`](crate::Arena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Allocation size granularity in bytes. Must be a non-zero power of two.
    pub alignment: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            alignment: DEFAULT_ALIGNMENT,
        }
    }
}

impl ArenaConfig {
    /// Creates a config with the given alignment width.
    #[must_use]
    pub const fn with_alignment(alignment: usize) -> Self {
        Self { alignment }
    }

    /// Checks that the alignment is a non-zero power of two.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidArgument`] otherwise.
    pub fn validate(&self) -> ArenaResult<()> {
        if self.alignment.is_power_of_two() {
            Ok(())
        } else {
            Err(ArenaError::InvalidArgument(
                "alignment must be a non-zero power of two",
            ))
        }
    }

    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Config`] on malformed TOML and
    /// [`ArenaError::InvalidArgument`] on a bad alignment.
    pub fn from_toml_str(text: &str) -> ArenaResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ArenaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Config`] if the file cannot be read or parsed.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> ArenaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ArenaError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Serializes the config back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> ArenaResult<String> {
        toml::to_string(self).map_err(|e| ArenaError::Config(e.to_string()))
    }
}
