//! Trigram and hexagram glyph alphabets.
//!
//! Both alphabets occupy consecutive Unicode codepoints, so the forward map
//! is `base + code` and the reverse map is a range-checked codepoint offset.

/// First codepoint of the trigram block (☰ U+2630).
pub const TRIGRAM_BASE: u32 = 0x2630;

/// First codepoint of the hexagram block (䷀ U+4DC0).
pub const HEXAGRAM_BASE: u32 = 0x4DC0;

/// Number of trigram glyphs.
pub const TRIGRAM_COUNT: u8 = 8;

/// Number of hexagram glyphs.
pub const HEXAGRAM_COUNT: u8 = 64;

/// Returns the trigram glyph for a 3-bit code.
///
/// Only the low 3 bits of `code` are used.
pub fn trigram_glyph(code: u8) -> char {
    glyph_at(TRIGRAM_BASE, code & 0x07)
}

/// Returns the hexagram glyph for a 6-bit code.
///
/// Only the low 6 bits of `code` are used.
pub fn hexagram_glyph(code: u8) -> char {
    glyph_at(HEXAGRAM_BASE, code & 0x3F)
}

/// Returns the 3-bit code of a trigram glyph, or `None` for foreign glyphs.
pub fn trigram_code(glyph: char) -> Option<u8> {
    code_at(TRIGRAM_BASE, TRIGRAM_COUNT, glyph)
}

/// Returns the 6-bit code of a hexagram glyph, or `None` for foreign glyphs.
pub fn hexagram_code(glyph: char) -> Option<u8> {
    code_at(HEXAGRAM_BASE, HEXAGRAM_COUNT, glyph)
}

fn glyph_at(base: u32, code: u8) -> char {
    // Both blocks lie well inside the BMP and outside the surrogate range.
    char::from_u32(base + u32::from(code)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn code_at(base: u32, count: u8, glyph: char) -> Option<u8> {
    let offset = u32::from(glyph).checked_sub(base)?;
    if offset < u32::from(count) {
        Some(offset as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_trigram_endpoints() {
        assert_eq!(trigram_glyph(0), '☰');
        assert_eq!(trigram_glyph(7), '☷');
    }

    #[test]
    fn test_hexagram_endpoints() {
        assert_eq!(hexagram_glyph(0), '䷀');
        assert_eq!(hexagram_glyph(63), '䷿');
    }

    #[test]
    fn test_trigram_bijection() {
        let glyphs: HashSet<char> = (0..TRIGRAM_COUNT).map(trigram_glyph).collect();
        assert_eq!(glyphs.len(), TRIGRAM_COUNT as usize);
        for code in 0..TRIGRAM_COUNT {
            assert_eq!(trigram_code(trigram_glyph(code)), Some(code));
        }
    }

    #[test]
    fn test_hexagram_bijection() {
        let glyphs: HashSet<char> = (0..HEXAGRAM_COUNT).map(hexagram_glyph).collect();
        assert_eq!(glyphs.len(), HEXAGRAM_COUNT as usize);
        for code in 0..HEXAGRAM_COUNT {
            assert_eq!(hexagram_code(hexagram_glyph(code)), Some(code));
        }
    }

    #[test]
    fn test_foreign_glyphs_have_no_code() {
        assert_eq!(hexagram_code('A'), None);
        assert_eq!(hexagram_code('\u{4DBF}'), None);
        assert_eq!(hexagram_code('\u{4E00}'), None);
        assert_eq!(trigram_code('\u{2638}'), None);
        assert_eq!(trigram_code('䷀'), None);
    }
}
