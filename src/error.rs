//! Error types for the hexcipher library.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HexCipherError>;

/// Errors produced by the hexcipher library.
///
/// Foreign glyphs in encoded text are deliberately *not* an error in the
/// default lenient mode; they are counted and substituted by code 0.
/// [`HexCipherError::UnknownGlyph`] is only raised when strict parsing is
/// requested.
#[derive(Debug, Error)]
pub enum HexCipherError {
    /// An input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoded input was expected to be UTF-8 glyph text but was not.
    #[error("content of {} is not valid UTF-8 glyph text", path.display())]
    NotUtf8 { path: PathBuf },

    /// Strict parsing met a character outside the hexagram alphabet.
    #[error("unknown glyph {glyph:?} at position {position}")]
    UnknownGlyph { position: usize, glyph: char },

    /// Passphrase is empty. Use no passphrase instead of an empty one.
    #[error("Passphrase must be at least 1 byte long")]
    EmptyPassphrase,

    /// Configuration file could not be loaded or holds invalid values.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Logging subscriber could not be installed.
    #[error("logging initialization failed: {0}")]
    Logging(String),

    /// The payload executor could not run the decoded content.
    #[error("payload execution failed: {0}")]
    Payload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_empty_passphrase() {
        let err = HexCipherError::EmptyPassphrase;
        assert_eq!(format!("{}", err), "Passphrase must be at least 1 byte long");
    }

    #[test]
    fn test_display_unknown_glyph() {
        let err = HexCipherError::UnknownGlyph {
            position: 3,
            glyph: 'x',
        };
        assert_eq!(format!("{}", err), "unknown glyph 'x' at position 3");
    }

    #[test]
    fn test_display_input_includes_path_and_cause() {
        let err = HexCipherError::Input {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(format!("{}", err), "failed to read missing.txt: no such file");
    }

    #[test]
    fn test_display_not_utf8() {
        let err = HexCipherError::NotUtf8 {
            path: PathBuf::from("blob.bin"),
        };
        assert_eq!(
            format!("{}", err),
            "content of blob.bin is not valid UTF-8 glyph text"
        );
    }

    #[test]
    fn test_display_config() {
        let err = HexCipherError::Config("iterations must be at least 1".to_string());
        assert_eq!(
            format!("{}", err),
            "invalid configuration: iterations must be at least 1"
        );
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error;
        let err = HexCipherError::Output {
            path: PathBuf::from("out.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}
