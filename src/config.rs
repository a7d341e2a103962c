//! Configuration for the codec and its command-line front end.
//!
//! Every field has a default, so an empty or missing configuration file is
//! valid. Values are read from an explicitly passed TOML file only; command
//! line flags override them afterwards.
//!
//! ```toml
//! iterations = 50
//! engine = "unrolled"
//! strict = false
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HexCipherError, Result};
use crate::hash::EngineKind;
use crate::hexcipher::DEFAULT_ITERATIONS;
use crate::logging::LoggingConfig;

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CipherConfig {
    /// Hardening rounds and swap-network rounds (default: 1).
    pub iterations: u32,

    /// Round implementation used for seed generation (default: canonical).
    pub engine: EngineKind,

    /// Reject foreign glyphs instead of decoding them as zero (default: false).
    pub strict: bool,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            engine: EngineKind::default(),
            strict: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl CipherConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    /// Returns [`HexCipherError::Config`] for malformed TOML, unknown keys or
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CipherConfig =
            toml::from_str(text).map_err(|e| HexCipherError::Config(e.to_string()))?;
        config.logging.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns [`HexCipherError::Input`] if the file cannot be read and
    /// [`HexCipherError::Config`] if its content is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| HexCipherError::Input {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
