//! Passphrase-to-seed expansion for the permutation cipher.
//!
//! The process:
//! 1. The passphrase bytes are packed into little-endian words (last word
//!    zero-padded) and XORed into a fresh [`HashState`], word `k` into state
//!    word `k mod 8`.
//! 2. The state is hardened by `iterations` compression rounds.
//! 3. The state is expanded: all eight words are emitted MSB first, one round
//!    is applied, and this repeats until enough bits exist.
//!
//! The result is a pure function of passphrase, length and iteration count.

use bitvec::prelude::*;
use tracing::debug;

use super::engine::HashState;
use super::round::{CanonicalRound, MixingRound};
use crate::utils::converter;

/// Pseudorandom bit stream consumed periodically by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    bits: BitVec<u32, Msb0>,
}

impl Seed {
    /// Number of bits in the seed.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` when the seed holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit at `index mod len`.
    ///
    /// An empty seed reads as all zeros.
    pub fn bit(&self, index: usize) -> bool {
        if self.bits.is_empty() {
            return false;
        }
        self.bits[index % self.bits.len()]
    }

    /// Borrows the underlying bits.
    pub fn as_bitslice(&self) -> &BitSlice<u32, Msb0> {
        &self.bits
    }
}

impl FromIterator<bool> for Seed {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Seed {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Derives seeds from passphrases with an injected round implementation.
pub struct SeedGenerator<'a> {
    round: &'a dyn MixingRound,
}

impl Default for SeedGenerator<'static> {
    fn default() -> Self {
        SeedGenerator {
            round: &CanonicalRound,
        }
    }
}

impl<'a> SeedGenerator<'a> {
    /// Creates a generator that mixes with `round`.
    pub fn new(round: &'a dyn MixingRound) -> Self {
        SeedGenerator { round }
    }

    /// Folds passphrase bytes into a fresh initial state.
    ///
    /// # Parameters
    /// - `passphrase`: Raw passphrase bytes.
    ///
    /// # Returns
    /// The initial state with every passphrase word XORed in.
    pub fn absorb(&self, passphrase: &[u8]) -> HashState {
        let mut state = HashState::new();
        for (index, word) in converter::bytes_to_words_le(passphrase)
            .into_iter()
            .enumerate()
        {
            state.absorb_word(index, word);
        }
        state
    }

    /// Applies `iterations` compression rounds in place.
    pub fn harden(&self, state: &mut HashState, iterations: u32) {
        self.round.compress_rounds(state, iterations);
    }

    /// Expands a state into exactly `length` seed bits.
    ///
    /// # Parameters
    /// - `state`: Starting state; consumed.
    /// - `length`: Number of bits to produce.
    ///
    /// # Returns
    /// A [`Seed`] of `length` bits.
    pub fn expand(&self, mut state: HashState, length: usize) -> Seed {
        let mut bits = BitVec::<u32, Msb0>::with_capacity(length + 256);
        while bits.len() < length {
            converter::extend_with_words(&state.words(), &mut bits);
            self.round.compress(&mut state);
        }
        bits.truncate(length);
        Seed { bits }
    }

    /// Absorbs, hardens and expands in one step.
    ///
    /// # Parameters
    /// - `passphrase`: Raw passphrase bytes.
    /// - `length`: Number of seed bits to produce.
    /// - `iterations`: Hardening rounds.
    pub fn generate(&self, passphrase: &[u8], length: usize, iterations: u32) -> Seed {
        let mut state = self.absorb(passphrase);
        self.harden(&mut state, iterations);
        let seed = self.expand(state, length);
        debug!(
            engine = self.round.name(),
            bits = seed.len(),
            iterations,
            "seed generated"
        );
        seed
    }
}

/// Generates a seed with the canonical round.
///
/// # Examples
///
/// ```
/// use hexcipher::hash::generate_seed;
///
/// let a = generate_seed(b"secret", 100, 3);
/// let b = generate_seed(b"secret", 100, 3);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 100);
/// ```
pub fn generate_seed(passphrase: &[u8], length: usize, iterations: u32) -> Seed {
    SeedGenerator::default().generate(passphrase, length, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::round::UnrolledRound;

    fn bit_string(seed: &Seed) -> String {
        seed.as_bitslice()
            .iter()
            .by_vals()
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_absorb_short_passphrase() {
        let state = SeedGenerator::default().absorb(b"secret");
        assert_eq!(
            state.words(),
            [
                0x186a_8314,
                0xbb67_dae0,
                0x3c6e_f372,
                0xa54f_f53a,
                0x510e_527f,
                0x9b05_688c,
                0x1f83_d9ab,
                0x5be0_cd19,
            ]
        );
    }

    #[test]
    fn test_absorb_wraps_after_eight_words() {
        let state = SeedGenerator::default().absorb(b"abcdefghijklmnopqrstuvwxyz0123456789");
        assert_eq!(
            state.words(),
            [
                0x3752_b330,
                0xd300_c8e0,
                0x5005_991b,
                0xd520_9b57,
                0x257d_200e,
                0xe372_1ef9,
                0x2eb3_a3d2,
                0x6ed4_fe2b,
            ]
        );
    }

    #[test]
    fn test_absorb_empty_is_iv() {
        assert_eq!(SeedGenerator::default().absorb(b""), HashState::new());
    }

    #[test]
    fn test_zero_iterations_emits_absorbed_state() {
        let seed = generate_seed(b"secret", 32, 0);
        assert_eq!(bit_string(&seed), "00011000011010101000001100010100");
    }

    #[test]
    fn test_known_seed_one_iteration() {
        let seed = generate_seed(b"secret", 64, 1);
        assert_eq!(
            bit_string(&seed),
            "0001110111111001011101100001000001000000100010001101111101111111"
        );
    }

    #[test]
    fn test_expand_exact_length() {
        for length in [0usize, 1, 255, 256, 257, 1000] {
            assert_eq!(generate_seed(b"k", length, 1).len(), length);
        }
    }

    #[test]
    fn test_longer_seed_extends_shorter_one() {
        let short = generate_seed(b"prefix", 300, 2);
        let long = generate_seed(b"prefix", 900, 2);
        assert_eq!(short.as_bitslice(), &long.as_bitslice()[..300]);
    }

    #[test]
    fn test_iterations_change_seed() {
        assert_ne!(generate_seed(b"secret", 256, 1), generate_seed(b"secret", 256, 2));
    }

    #[test]
    fn test_unrolled_generator_matches_canonical() {
        let fast = SeedGenerator::new(&UnrolledRound).generate(b"passphrase", 777, 50);
        assert_eq!(fast, generate_seed(b"passphrase", 777, 50));
    }

    #[test]
    fn test_bit_wraps_modulo_length() {
        let seed: Seed = [true, false, false].into_iter().collect();
        assert!(seed.bit(0));
        assert!(seed.bit(3));
        assert!(!seed.bit(4));
    }

    #[test]
    fn test_empty_seed_reads_zero() {
        let seed: Seed = std::iter::empty().collect();
        assert!(seed.is_empty());
        assert!(!seed.bit(5));
    }
}
