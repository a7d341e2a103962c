//! PermutationCipher: seed-driven adjacent-bit swap network.
//!
//! One round walks every index `i` of the bit sequence and, when the seed
//! bit at `i` is set, swaps `bits[i]` with `bits[(i + 1) mod L]` on the live
//! buffer. Whether a swap happens depends only on `i`, never on the data, so
//! replaying the same transpositions in the opposite order undoes a round
//! exactly. [`Direction::Reverse`] does that, running the rounds backwards
//! over descending indices.

use crate::hash::Seed;
use crate::utils::bits::BitSequence;

/// Traversal order of the swap network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending indices; used when encoding.
    Forward,
    /// Descending indices; inverts [`Direction::Forward`].
    Reverse,
}

/// Applies the swap network in place.
///
/// # Parameters
/// - `bits`: Bit sequence to permute.
/// - `seed`: Swap decisions, read at `i mod seed.len()`.
/// - `iterations`: Number of full rounds.
/// - `direction`: [`Direction::Forward`] to scramble, [`Direction::Reverse`] to restore.
///
/// An empty sequence or an empty seed leaves `bits` unchanged. A single-bit
/// sequence swaps its only bit with itself.
///
/// # Examples
///
/// ```
/// use hexcipher::bit_codec::to_bits;
/// use hexcipher::hash::generate_seed;
/// use hexcipher::permutation::{apply, Direction};
///
/// let original = to_bits(b"swap me");
/// let seed = generate_seed(b"key", original.len(), 2);
///
/// let mut bits = original.clone();
/// apply(&mut bits, &seed, 2, Direction::Forward);
/// apply(&mut bits, &seed, 2, Direction::Reverse);
/// assert_eq!(bits, original);
/// ```
pub fn apply(bits: &mut BitSequence, seed: &Seed, iterations: u32, direction: Direction) {
    let len = bits.len();
    if len == 0 || seed.is_empty() {
        return;
    }
    for _ in 0..iterations {
        match direction {
            Direction::Forward => {
                for i in 0..len {
                    swap_if_set(bits, seed, i, len);
                }
            }
            Direction::Reverse => {
                for i in (0..len).rev() {
                    swap_if_set(bits, seed, i, len);
                }
            }
        }
    }
}

#[inline]
fn swap_if_set(bits: &mut BitSequence, seed: &Seed, i: usize, len: usize) {
    if seed.bit(i) {
        bits.swap(i, (i + 1) % len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::bits::to_binary_string;
    use proptest::prelude::*;

    fn bits_of(pattern: &str) -> BitSequence {
        pattern.chars().map(|c| c == '1').collect()
    }

    fn seed_of(pattern: &str) -> Seed {
        pattern.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_forward_single_swap() {
        let mut bits = bits_of("1000");
        apply(&mut bits, &seed_of("1000"), 1, Direction::Forward);
        assert_eq!(to_binary_string(&bits), "0100");
    }

    #[test]
    fn test_forward_uses_mutated_state() {
        // Swaps at 0 and 1 move the leading bit two places to the right.
        let mut bits = bits_of("1000");
        apply(&mut bits, &seed_of("1100"), 1, Direction::Forward);
        assert_eq!(to_binary_string(&bits), "0010");
    }

    #[test]
    fn test_last_index_wraps_to_first() {
        let mut bits = bits_of("0001");
        apply(&mut bits, &seed_of("0001"), 1, Direction::Forward);
        assert_eq!(to_binary_string(&bits), "1000");
    }

    #[test]
    fn test_reverse_undoes_forward() {
        let original = bits_of("1100101000");
        let seed = seed_of("0110");
        let mut bits = original.clone();
        apply(&mut bits, &seed, 3, Direction::Forward);
        assert_eq!(to_binary_string(&bits), "0100101001");
        apply(&mut bits, &seed, 3, Direction::Reverse);
        assert_eq!(bits, original);
    }

    #[test]
    fn test_single_bit_is_noop() {
        let mut bits = bits_of("1");
        apply(&mut bits, &seed_of("1"), 5, Direction::Forward);
        assert_eq!(to_binary_string(&bits), "1");
    }

    #[test]
    fn test_empty_inputs_are_noop() {
        let mut bits = BitSequence::new();
        apply(&mut bits, &seed_of("1"), 1, Direction::Forward);
        assert!(bits.is_empty());

        let mut bits = bits_of("10");
        apply(&mut bits, &seed_of(""), 1, Direction::Forward);
        assert_eq!(to_binary_string(&bits), "10");
    }

    #[test]
    fn test_zero_iterations_is_noop() {
        let mut bits = bits_of("1010");
        apply(&mut bits, &seed_of("1111"), 0, Direction::Forward);
        assert_eq!(to_binary_string(&bits), "1010");
    }

    #[test]
    fn test_preserves_population_count() {
        let original = bits_of("111000101");
        let mut bits = original.clone();
        apply(&mut bits, &seed_of("10110"), 4, Direction::Forward);
        assert_eq!(bits.count_ones(), original.count_ones());
    }

    proptest! {
        #[test]
        fn reverse_inverts_forward(
            data in proptest::collection::vec(any::<bool>(), 0..300),
            seed in proptest::collection::vec(any::<bool>(), 1..80),
            iterations in 0u32..5,
        ) {
            let original: BitSequence = data.into_iter().collect();
            let seed: Seed = seed.into_iter().collect();
            let mut bits = original.clone();
            apply(&mut bits, &seed, iterations, Direction::Forward);
            apply(&mut bits, &seed, iterations, Direction::Reverse);
            prop_assert_eq!(bits, original);
        }

        #[test]
        fn forward_inverts_reverse(
            data in proptest::collection::vec(any::<bool>(), 1..200),
            seed in proptest::collection::vec(any::<bool>(), 1..300),
            iterations in 1u32..4,
        ) {
            let original: BitSequence = data.into_iter().collect();
            let seed: Seed = seed.into_iter().collect();
            let mut bits = original.clone();
            apply(&mut bits, &seed, iterations, Direction::Reverse);
            apply(&mut bits, &seed, iterations, Direction::Forward);
            prop_assert_eq!(bits, original);
        }
    }
}
