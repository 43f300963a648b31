//! Session configuration
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MAP_BORDER, TOMB_ANNOUNCE_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Seed for the session RNG; `None` seeds from entropy
    pub rng_seed: Option<u64>,
    /// Tomb depth whose loss of teleport restriction is announced
    pub tomb_message_depth: i8,
    /// Edge cells skipped when scanning the map for altars
    pub altar_border: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            rng_seed: None,
            tomb_message_depth: TOMB_ANNOUNCE_DEPTH,
            altar_border: MAP_BORDER,
        }
    }
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("could not read options: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SessionOptions {
    pub fn from_json_str(contents: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = SessionOptions::default();
        assert_eq!(opts.rng_seed, None);
        assert_eq!(opts.tomb_message_depth, 3);
        assert_eq!(opts.altar_border, 1);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let opts = SessionOptions::from_json_str(r#"{ "rng_seed": 42 }"#).unwrap();
        assert_eq!(opts.rng_seed, Some(42));
        assert_eq!(opts.tomb_message_depth, 3);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SessionOptions::from_json_str("{ rng_seed"),
            Err(OptionsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("da_options_does_not_exist.json");
        assert!(matches!(
            SessionOptions::load_from_file(&path),
            Err(OptionsError::Io(_))
        ));
    }
}
