//! Byte and word conversion utilities.
//!
//! Provides the little-endian byte-to-word packing used by passphrase
//! absorption, the MSB-first word-to-bit expansion used by seed expansion,
//! and the lenient UTF-8 decoding applied to recovered content.

use bitvec::prelude::*;

/// Packs bytes into `u32` words, four bytes per word, little-endian.
///
/// The final chunk is zero-padded on the right before packing, so an input
/// of `n` bytes always yields `ceil(n / 4)` words.
///
/// # Parameters
/// - `input`: Byte slice of any length.
///
/// # Returns
/// A `Vec<u32>` with one word per 4-byte chunk.
pub fn bytes_to_words_le(input: &[u8]) -> Vec<u32> {
    input
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(word)
        })
        .collect()
}

/// Appends each word as 32 bits, most significant bit first.
///
/// # Parameters
/// - `words`: Words to expand, in order.
/// - `output`: Destination bit buffer.
pub fn extend_with_words(words: &[u32], output: &mut BitVec<u32, Msb0>) {
    for word in words {
        output.extend_from_bitslice(word.view_bits::<Msb0>());
    }
}

/// Decodes bytes as UTF-8, dropping invalid sequences instead of failing.
///
/// Invalid byte runs are removed rather than replaced with U+FFFD, so the
/// result only ever contains characters that were genuinely present.
///
/// # Parameters
/// - `bytes`: Arbitrary bytes.
///
/// # Returns
/// The valid UTF-8 content of `bytes`.
pub fn lossy_utf8(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
