//! HashEngine: the 8×32-bit ARX mixing state and its canonical round.
//!
//! The state is initialised with the SHA-2 initial hash values, used here
//! only as arbitrary-looking constants; no SHA-2 computation takes place.
//!
//! One compression round splits the state into two quadrants of four words,
//! mixes each with its own add-rotate-xor ladder, writes both back and then
//! cross-mixes four words between the quadrants.

/// Initialisation vector shared by every fresh [`HashState`].
pub const INITIAL_STATE: [u32; 8] = [
    0x6a09_e667,
    0xbb67_ae85,
    0x3c6e_f372,
    0xa54f_f53a,
    0x510e_527f,
    0x9b05_688c,
    0x1f83_d9ab,
    0x5be0_cd19,
];

/// Eight-word mixing state.
///
/// Only mutated by whole compression rounds or by passphrase absorption, so
/// callers never observe a half-applied round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashState {
    words: [u32; 8],
}

impl Default for HashState {
    fn default() -> Self {
        Self::new()
    }
}

impl HashState {
    /// Creates a state holding [`INITIAL_STATE`].
    pub fn new() -> Self {
        HashState {
            words: INITIAL_STATE,
        }
    }

    /// Creates a state from explicit words.
    ///
    /// Used to compare round implementations on arbitrary inputs.
    pub fn from_words(words: [u32; 8]) -> Self {
        HashState { words }
    }

    /// Returns a copy of the eight state words.
    pub fn words(&self) -> [u32; 8] {
        self.words
    }

    /// XORs `word` into the state word at `index mod 8`.
    pub(crate) fn absorb_word(&mut self, index: usize, word: u32) {
        self.words[index % 8] ^= word;
    }

    pub(crate) fn words_mut(&mut self) -> &mut [u32; 8] {
        &mut self.words
    }
}

/// Applies one canonical compression round in place.
///
/// This is the reference definition; every other round implementation must
/// produce identical output for every input state.
///
/// # Parameters
/// - `state`: The state to mix.
pub fn compress(state: &mut HashState) {
    let s = state.words_mut();
    let [mut a0, mut b0, mut c0, mut d0, mut a1, mut b1, mut c1, mut d1] = *s;

    // Quadrant 0: two ARX ladders.
    a0 = a0.wrapping_add(b0);
    c0 ^= a0;
    c0 = c0.rotate_left(7);
    d0 = d0.wrapping_add(c0);
    b0 ^= d0;
    b0 = b0.rotate_right(11);
    a0 = a0.wrapping_add(b0);
    c0 ^= a0;
    c0 = c0.rotate_left(13);
    d0 = d0.wrapping_add(c0);
    b0 ^= d0;
    b0 = b0.rotate_right(17);

    // Quadrant 1
    let mut t = a1.wrapping_add(b1);
    t ^= c1;
    t = t.rotate_left(5);
    d1 = d1.wrapping_add(t);
    a1 ^= d1;
    b1 = b1.swap_bytes();
    c1 = c1.wrapping_add(b1);
    d1 ^= c1;
    d1 = d1.rotate_right(9);

    *s = [a0, b0, c0, d0, a1, b1, c1, d1];

    // Cross-mix with the post-round quadrant 1 words.
    s[3] ^= a1;
    s[7] ^= b1;
    s[1] = s[1].wrapping_add(c1);
    s[5] = s[5].wrapping_sub(d1);
}
