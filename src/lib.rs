//! HexCipher: I Ching hexagram text encoding with passphrase scrambling.
//!
//! Arbitrary bytes are turned into text made of the 64 hexagram glyphs
//! (U+4DC0..U+4DFF), six bits per glyph. With a passphrase, the content bits
//! are first scrambled by a seed-driven adjacent-swap network whose seed is
//! stretched from the passphrase by a small ARX hash. Decoding with the same
//! passphrase and round count restores the bytes exactly.
//!
//! The scrambling is obfuscation, not authenticated encryption: there is no
//! integrity check and a wrong passphrase silently yields garbage.
//!
//! # Architecture
//!
//! ```text
//! alphabet      (trigram / hexagram glyph tables)
//!     ↑
//! bit_codec     (bytes ↔ bits, padding, 3-bit ↔ 6-bit grouping, glyph text)
//!     ↑
//! hash          (ARX round → SeedGenerator: absorb → harden → expand)
//!     ↑
//! permutation   (seed-driven swap network, forward / reverse)
//!     ↑
//! HexCipher     (single-item pipeline)
//!     ↑
//! mass / cli    (directory batches, command-line front end, payload runner)
//! ```
//!
//! # Examples
//!
//! Plain glyph coding:
//!
//! ```
//! use hexcipher::HexCipher;
//!
//! let cipher = HexCipher::new();
//! let glyphs = cipher.encode(b"A");
//! assert_eq!(glyphs, "䷐䷘");
//! assert_eq!(cipher.decode(&glyphs).unwrap().bytes, b"A");
//! ```
//!
//! Keyed coding with extra rounds:
//!
//! ```
//! use hexcipher::HexCipher;
//!
//! let mut encoder = HexCipher::new();
//! encoder.passphrase("my_secret_password").unwrap();
//! encoder.set_iterations(10);
//!
//! let mut decoder = HexCipher::new();
//! decoder.passphrase("my_secret_password").unwrap();
//! decoder.set_iterations(10);
//!
//! let glyphs = encoder.encode("Grüße ☯".as_bytes());
//! assert_eq!(decoder.decode(&glyphs).unwrap().text(), "Grüße ☯");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod bit_codec;
pub mod cli;
pub mod config;
pub mod error;
pub mod hash;
pub mod logging;
pub mod mass;
pub mod payload;
pub mod permutation;
pub mod utils;

mod hexcipher;

pub use hexcipher::{Decoded, HexCipher, DEFAULT_ITERATIONS};
