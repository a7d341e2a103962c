//! Bit sequence helpers shared by the codec, seed and permutation layers.
//!
//! All sequences are MSB-first: bit index 0 of a byte-derived sequence is the
//! most significant bit of the first byte.

use bitvec::prelude::*;

/// Ordered, mutable sequence of bits.
pub type BitSequence = BitVec<u8, Msb0>;

/// Expands bytes into bits, most significant bit first, in input order.
///
/// # Parameters
/// - `bytes`: Raw content.
///
/// # Returns
/// A sequence of `bytes.len() * 8` bits.
pub fn from_bytes(bytes: &[u8]) -> BitSequence {
    BitSequence::from_slice(bytes)
}

/// Reads a bit slice as an unsigned big-endian number.
///
/// The first bit of the slice becomes the most significant bit of the
/// result. Slices longer than 8 bits keep only their low 8 bits.
///
/// # Parameters
/// - `bits`: Up to 8 bits.
///
/// # Returns
/// The numeric value of the bits.
pub fn value_of(bits: &BitSlice<u8, Msb0>) -> u8 {
    bits.iter()
        .by_vals()
        .fold(0u8, |acc, bit| (acc << 1) | u8::from(bit))
}

/// Appends the low `width` bits of `value`, most significant first.
///
/// # Parameters
/// - `bits`: Destination sequence.
/// - `value`: Source value.
/// - `width`: Number of low-order bits to append (0..=8).
pub fn push_value(bits: &mut BitSequence, value: u8, width: u32) {
    for shift in (0..width).rev() {
        bits.push((value >> shift) & 1 == 1);
    }
}

/// Groups bits into whole bytes, discarding a trailing partial byte.
///
/// # Parameters
/// - `bits`: Bit sequence of any length.
///
/// # Returns
/// `bits.len() / 8` bytes.
pub fn to_bytes(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let whole = bits.len() - bits.len() % 8;
    bits[..whole].chunks_exact(8).map(value_of).collect()
}

/// Renders a bit sequence as a string of `0` and `1` characters.
pub fn to_binary_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_msb_first() {
        let bits = from_bytes(&[0x41]);
        assert_eq!(to_binary_string(&bits), "01000001");
    }

    #[test]
    fn test_from_bytes_preserves_order() {
        let bits = from_bytes(&[0x80, 0x01]);
        assert_eq!(to_binary_string(&bits), "1000000000000001");
    }

    #[test]
    fn test_value_of_three_bits() {
        let bits = bits![u8, Msb0; 0, 1, 1];
        assert_eq!(value_of(bits), 3);
        let bits = bits![u8, Msb0; 1, 0, 0];
        assert_eq!(value_of(bits), 4);
    }

    #[test]
    fn test_push_value_width() {
        let mut bits = BitSequence::new();
        push_value(&mut bits, 0b101, 3);
        push_value(&mut bits, 0b000001, 6);
        assert_eq!(to_binary_string(&bits), "101000001");
    }

    #[test]
    fn test_to_bytes_discards_partial_byte() {
        let mut bits = from_bytes(&[0xAB, 0xCD]);
        bits.push(true);
        bits.push(false);
        assert_eq!(to_bytes(&bits), vec![0xAB, 0xCD]);
    }

    #[test]
    fn test_to_bytes_empty() {
        assert!(to_bytes(&BitSequence::new()).is_empty());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let original: [u8; 16] = [
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ];
        assert_eq!(to_bytes(&from_bytes(&original)), original);
    }
}
