//! HexCipher: the single-item encode/decode pipeline.
//!
//! Orchestrates BitCodec, SeedGenerator and PermutationCipher for one piece
//! of content. Without a passphrase the pipeline is a plain glyph codec; with
//! one, the content bits are scrambled by the seed-driven swap network
//! before glyph mapping.
//!
//! ```text
//! encode: bytes → bits → [permute Forward] → pad → trigrams → hexagrams → glyphs
//! decode: glyphs → codes → bits → unpad → [permute Reverse] → bytes
//! ```
//!
//! The seed length always equals the number of content bits, so the decode
//! side strips the pad before it regenerates the seed.

use tracing::{debug, warn};

use crate::bit_codec::{self, Strictness};
use crate::config::CipherConfig;
use crate::error::{HexCipherError, Result};
use crate::hash::{CanonicalRound, MixingRound, SeedGenerator};
use crate::permutation::{self, Direction};
use crate::utils::bits::BitSequence;
use crate::utils::converter;

/// Default number of hardening rounds and swap-network rounds.
pub const DEFAULT_ITERATIONS: u32 = 1;

/// Content recovered by [`HexCipher::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded bytes.
    pub bytes: Vec<u8>,
    /// Number of foreign glyphs that were read as code 0.
    pub substitutions: usize,
}

impl Decoded {
    /// Returns the bytes as text, dropping invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        converter::lossy_utf8(&self.bytes)
    }

    /// Returns `true` if no glyph had to be substituted.
    pub fn is_clean(&self) -> bool {
        self.substitutions == 0
    }

    /// Consumes the result, returning the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Passphrase-keyed hexagram codec.
///
/// # Examples
///
/// ```
/// use hexcipher::HexCipher;
///
/// let mut cipher = HexCipher::new();
/// cipher.passphrase("my secret").unwrap();
/// cipher.set_iterations(3);
///
/// let glyphs = cipher.encode(b"attack at dawn");
/// let decoded = cipher.decode(&glyphs).unwrap();
/// assert_eq!(decoded.bytes, b"attack at dawn");
/// ```
pub struct HexCipher {
    passphrase: Option<Vec<u8>>,
    iterations: u32,
    strictness: Strictness,
    round: Box<dyn MixingRound + Send + Sync>,
}

impl Default for HexCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl HexCipher {
    /// Creates an unkeyed, lenient codec using the canonical round.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexcipher::HexCipher;
    ///
    /// let cipher = HexCipher::new();
    /// assert_eq!(cipher.encode(b"A"), "䷐䷘");
    /// ```
    pub fn new() -> Self {
        Self::with_round(Box::new(CanonicalRound))
    }

    /// Creates an unkeyed codec with an explicit round implementation.
    ///
    /// Every round implementation yields the same output; this only changes
    /// how the seed is computed.
    pub fn with_round(round: Box<dyn MixingRound + Send + Sync>) -> Self {
        HexCipher {
            passphrase: None,
            iterations: DEFAULT_ITERATIONS,
            strictness: Strictness::Lenient,
            round,
        }
    }

    /// Creates a codec from configuration values.
    ///
    /// The passphrase is not part of the configuration; set it with
    /// [`passphrase`](Self::passphrase).
    pub fn from_config(config: &CipherConfig) -> Self {
        let mut cipher = Self::with_round(config.engine.build());
        cipher.iterations = config.iterations;
        cipher.strictness = if config.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        };
        cipher
    }

    /// Keys the codec with a passphrase.
    ///
    /// # Errors
    /// Returns [`HexCipherError::EmptyPassphrase`] if `passphrase` is empty.
    ///
    /// ```
    /// use hexcipher::HexCipher;
    ///
    /// let mut cipher = HexCipher::new();
    /// assert!(cipher.passphrase("").is_err());
    /// assert!(!cipher.is_keyed());
    /// ```
    pub fn passphrase(&mut self, passphrase: &str) -> Result<()> {
        if passphrase.is_empty() {
            return Err(HexCipherError::EmptyPassphrase);
        }
        self.passphrase = Some(passphrase.as_bytes().to_vec());
        Ok(())
    }

    /// Removes the passphrase, returning to plain glyph coding.
    pub fn clear_passphrase(&mut self) {
        self.passphrase = None;
    }

    /// Returns `true` if a passphrase is set.
    pub fn is_keyed(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Sets the hardening and swap-network round count.
    pub fn set_iterations(&mut self, iterations: u32) {
        self.iterations = iterations;
    }

    /// Returns the hardening and swap-network round count.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Sets how foreign glyphs are handled when decoding.
    pub fn set_strictness(&mut self, strictness: Strictness) {
        self.strictness = strictness;
    }

    /// Returns how foreign glyphs are handled when decoding.
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Name of the round implementation in use.
    pub fn engine_name(&self) -> &'static str {
        self.round.name()
    }

    /// Encodes bytes as hexagram glyph text.
    ///
    /// # Parameters
    /// - `content`: Raw bytes.
    ///
    /// # Returns
    /// Glyph text containing only hexagram alphabet characters.
    pub fn encode(&self, content: &[u8]) -> String {
        let mut bits = bit_codec::to_bits(content);
        self.permute(&mut bits, Direction::Forward);
        let glyphs = bit_codec::encode_bits(bits);
        debug!(
            bytes = content.len(),
            glyphs = glyphs.chars().count(),
            keyed = self.is_keyed(),
            "encoded content"
        );
        glyphs
    }

    /// Decodes hexagram glyph text back into bytes.
    ///
    /// # Parameters
    /// - `text`: Glyph text produced by [`encode`](Self::encode) with the same
    ///   passphrase and iteration count.
    ///
    /// # Errors
    /// In strict mode, returns [`HexCipherError::UnknownGlyph`] for the first
    /// character outside the hexagram alphabet. Lenient decoding never fails.
    pub fn decode(&self, text: &str) -> Result<Decoded> {
        let (mut bits, substitutions) = bit_codec::decode_glyphs(text, self.strictness)?;
        if substitutions > 0 {
            warn!(substitutions, "foreign glyphs decoded as zero trigrams");
        }
        self.permute(&mut bits, Direction::Reverse);
        let bytes = bit_codec::to_bytes(&bits);
        debug!(
            bytes = bytes.len(),
            keyed = self.is_keyed(),
            "decoded content"
        );
        Ok(Decoded {
            bytes,
            substitutions,
        })
    }

    fn permute(&self, bits: &mut BitSequence, direction: Direction) {
        let Some(passphrase) = self.passphrase.as_deref() else {
            return;
        };
        if bits.is_empty() {
            return;
        }
        let seed = SeedGenerator::new(self.round.as_ref()).generate(
            passphrase,
            bits.len(),
            self.iterations,
        );
        permutation::apply(bits, &seed, self.iterations, direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::UnrolledRound;

    fn keyed(passphrase: &str, iterations: u32) -> HexCipher {
        let mut cipher = HexCipher::new();
        cipher.passphrase(passphrase).unwrap();
        cipher.set_iterations(iterations);
        cipher
    }

    #[test]
    fn test_encode_letter_a_unkeyed() {
        assert_eq!(HexCipher::new().encode(b"A"), "䷐䷘");
    }

    #[test]
    fn test_decode_letter_a_unkeyed() {
        let decoded = HexCipher::new().decode("䷐䷘").unwrap();
        assert_eq!(decoded.bytes, b"A");
        assert!(decoded.is_clean());
    }

    #[test]
    fn test_encode_letter_a_keyed() {
        assert_eq!(keyed("secret", 1).encode(b"A"), "䷰䷈");
    }

    #[test]
    fn test_keyed_known_vector() {
        let cipher = keyed("secret", 3);
        let glyphs = cipher.encode(b"Hello, World!");
        assert_eq!(glyphs, "䷸䷊䷕䷴䷜䷦䷶䷴䷈䷅䷝䷷䷜䷧䷑䷢䷐䷈");
        assert_eq!(cipher.decode(&glyphs).unwrap().bytes, b"Hello, World!");
    }

    #[test]
    fn test_keyed_differs_from_unkeyed() {
        let plain = HexCipher::new().encode(b"Hello, World!");
        let scrambled = keyed("secret", 1).encode(b"Hello, World!");
        assert_ne!(plain, scrambled);
        assert_eq!(plain.chars().count(), scrambled.chars().count());
    }

    #[test]
    fn test_wrong_passphrase_does_not_restore() {
        let glyphs = keyed("right", 2).encode(b"confidential");
        let decoded = keyed("wrong", 2).decode(&glyphs).unwrap();
        assert_ne!(decoded.bytes, b"confidential");
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let mut cipher = HexCipher::new();
        assert!(matches!(
            cipher.passphrase(""),
            Err(HexCipherError::EmptyPassphrase)
        ));
    }

    #[test]
    fn test_clear_passphrase() {
        let mut cipher = keyed("secret", 1);
        cipher.clear_passphrase();
        assert!(!cipher.is_keyed());
        assert_eq!(cipher.encode(b"A"), "䷐䷘");
    }

    #[test]
    fn test_empty_content_roundtrip() {
        let cipher = keyed("secret", 4);
        let glyphs = cipher.encode(b"");
        assert_eq!(cipher.decode(&glyphs).unwrap().bytes, b"");
    }

    #[test]
    fn test_lenient_decode_counts_substitutions() {
        let decoded = HexCipher::new().decode("䷐?䷘").unwrap();
        assert_eq!(decoded.substitutions, 1);
        assert!(!decoded.is_clean());
    }

    #[test]
    fn test_strict_decode_rejects_foreign_glyph() {
        let mut cipher = HexCipher::new();
        cipher.set_strictness(Strictness::Strict);
        assert!(matches!(
            cipher.decode("䷐?䷘"),
            Err(HexCipherError::UnknownGlyph { position: 1, .. })
        ));
    }

    #[test]
    fn test_unrolled_engine_is_interchangeable() {
        let mut fast = HexCipher::with_round(Box::new(UnrolledRound));
        fast.passphrase("passphrase").unwrap();
        fast.set_iterations(2);
        let reference = keyed("passphrase", 2);
        let content = "héllo ☯".as_bytes();
        assert_eq!(fast.encode(content), reference.encode(content));
        assert_eq!(fast.encode(content), "䷚䷌䷗䷉䷱䷦䷴䷯䷈䷋䷣䷈䷭䷸");
    }

    #[test]
    fn test_from_config() {
        let config = CipherConfig {
            iterations: 7,
            strict: true,
            ..CipherConfig::default()
        };
        let cipher = HexCipher::from_config(&config);
        assert_eq!(cipher.iterations(), 7);
        assert_eq!(cipher.strictness(), Strictness::Strict);
        assert_eq!(cipher.engine_name(), "canonical");
        assert!(!cipher.is_keyed());
    }

    #[test]
    fn test_decoded_text_is_lossy() {
        let decoded = Decoded {
            bytes: vec![b'o', 0xFF, b'k'],
            substitutions: 0,
        };
        assert_eq!(decoded.text(), "ok");
    }
}
