//! BitCodec: conversion between byte content and hexagram glyph text.
//!
//! Encoding expands bytes to an MSB-first bit stream, terminates it with a
//! self-describing pad, groups it into trigrams, pairs trigrams into
//! hexagrams and renders each hexagram as one glyph. Decoding mirrors each
//! step. The encoded text carries no header or length field; the content
//! length is recovered from the pad terminator alone.
//!
//! ```text
//! bytes ─to_bits─▶ bits ─pad─▶ ─to_trigrams─▶ ─to_hexagrams─▶ ─render─▶ glyphs
//! glyphs ─parse─▶ codes ─expand_to_bits─▶ ─unpad─▶ bits ─to_bytes─▶ bytes
//! ```

use tracing::trace;

use crate::alphabet;
use crate::error::{HexCipherError, Result};
use crate::utils::bits::{self, BitSequence};

/// A 3-bit value (0..=7).
pub type TrigramCode = u8;

/// A 6-bit value (0..=63): high trigram × 8 + low trigram.
pub type HexagramCode = u8;

/// How [`parse`] treats characters outside the hexagram alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Foreign glyphs decode as code 0 and are counted.
    #[default]
    Lenient,
    /// The first foreign glyph is reported as [`HexCipherError::UnknownGlyph`].
    Strict,
}

/// Hexagram codes recovered from glyph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGlyphs {
    /// One code per input glyph.
    pub codes: Vec<HexagramCode>,
    /// Number of foreign glyphs replaced by code 0.
    pub substitutions: usize,
}

/// Expands bytes into bits, most significant bit first.
pub fn to_bits(bytes: &[u8]) -> BitSequence {
    bits::from_bytes(bytes)
}

/// Appends the self-describing terminator that aligns the stream to trigrams.
///
/// Appends a `1` followed by `r - 1` zeros, where `r = 3 - len % 3`. A
/// stream that is already trigram-aligned still receives a full `100`
/// terminator, so the last `1` of any padded stream marks the end of the
/// real content.
///
/// # Parameters
/// - `bits`: Content bits, modified in place.
///
/// # Examples
///
/// ```
/// use hexcipher::bit_codec::{pad, to_bits};
///
/// let mut bits = to_bits(b"A");
/// pad(&mut bits);
/// assert_eq!(bits.len(), 9);
/// assert!(bits[8]);
/// ```
pub fn pad(bits: &mut BitSequence) {
    let fill = 3 - bits.len() % 3;
    bits.push(true);
    for _ in 1..fill {
        bits.push(false);
    }
}

/// Removes the terminator written by [`pad`] and any trailing filler.
///
/// Truncates at the last `1` bit, dropping it and everything after it. A
/// stream without any `1` bit is left unchanged: an all-zero payload cannot
/// be told apart from filler.
///
/// # Parameters
/// - `bits`: Padded bits, modified in place.
pub fn unpad(bits: &mut BitSequence) {
    if let Some(terminator) = bits.iter().by_vals().rposition(|bit| bit) {
        bits.truncate(terminator);
    }
}

/// Groups trigram-aligned bits into 3-bit big-endian codes.
///
/// A trailing run shorter than 3 bits is ignored; call [`pad`] first.
pub fn to_trigrams(bits: &BitSequence) -> Vec<TrigramCode> {
    bits.chunks_exact(3).map(bits::value_of).collect()
}

/// Pairs trigrams into hexagrams, high trigram first.
///
/// An odd trigram count is completed with one zero trigram.
pub fn to_hexagrams(trigrams: &[TrigramCode]) -> Vec<HexagramCode> {
    trigrams
        .chunks(2)
        .map(|pair| {
            let high = pair[0] & 0x07;
            let low = pair.get(1).copied().unwrap_or(0) & 0x07;
            (high << 3) | low
        })
        .collect()
}

/// Renders hexagram codes as glyph text.
pub fn render(hexagrams: &[HexagramCode]) -> String {
    hexagrams.iter().map(|&code| alphabet::hexagram_glyph(code)).collect()
}

/// Renders trigram codes as trigram glyph text, for diagnostics.
pub fn render_trigrams(trigrams: &[TrigramCode]) -> String {
    trigrams.iter().map(|&code| alphabet::trigram_glyph(code)).collect()
}

/// Reads glyph text back into hexagram codes.
///
/// Leading and trailing whitespace is ignored. In lenient mode every other
/// character outside the hexagram alphabet decodes as code 0 and is counted
/// in [`ParsedGlyphs::substitutions`].
///
/// # Parameters
/// - `text`: Encoded glyph text.
/// - `strictness`: Treatment of foreign glyphs.
///
/// # Errors
/// Returns [`HexCipherError::UnknownGlyph`] in strict mode when a foreign
/// glyph is found. Lenient parsing never fails.
pub fn parse(text: &str, strictness: Strictness) -> Result<ParsedGlyphs> {
    let mut codes = Vec::with_capacity(text.len() / 3);
    let mut substitutions = 0;
    for (position, glyph) in text.trim().chars().enumerate() {
        match alphabet::hexagram_code(glyph) {
            Some(code) => codes.push(code),
            None if strictness == Strictness::Strict => {
                return Err(HexCipherError::UnknownGlyph { position, glyph });
            }
            None => {
                substitutions += 1;
                codes.push(0);
            }
        }
    }
    Ok(ParsedGlyphs {
        codes,
        substitutions,
    })
}

/// Splits each hexagram back into its two trigrams, as 6 bits.
pub fn expand_to_bits(hexagrams: &[HexagramCode]) -> BitSequence {
    let mut bits = BitSequence::with_capacity(hexagrams.len() * 6);
    for &code in hexagrams {
        bits::push_value(&mut bits, code, 6);
    }
    bits
}

/// Groups bits into bytes, discarding a trailing partial byte.
pub fn to_bytes(bits: &BitSequence) -> Vec<u8> {
    bits::to_bytes(bits)
}

/// Runs the glyph half of the encode pipeline on (possibly permuted) bits.
///
/// # Parameters
/// - `bits`: Content bits; consumed and padded.
///
/// # Returns
/// The glyph text.
pub fn encode_bits(mut bits: BitSequence) -> String {
    pad(&mut bits);
    let trigrams = to_trigrams(&bits);
    trace!(trigrams = %render_trigrams(&trigrams), "trigram stream");
    render(&to_hexagrams(&trigrams))
}

/// Runs the glyph half of the decode pipeline, stopping before byte grouping.
///
/// # Returns
/// The unpadded content bits and the number of substituted glyphs.
///
/// # Errors
/// Propagates [`HexCipherError::UnknownGlyph`] from strict parsing.
pub fn decode_glyphs(text: &str, strictness: Strictness) -> Result<(BitSequence, usize)> {
    let parsed = parse(text, strictness)?;
    let mut bits = expand_to_bits(&parsed.codes);
    unpad(&mut bits);
    Ok((bits, parsed.substitutions))
}
