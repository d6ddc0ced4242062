//! Seedable randomness for the "random color" and "randomize" operations.
//!
//! The editor never reaches for ambient entropy: every random draw comes from
//! an [`Xorshift64`] owned by the session, so a given seed replays the same
//! colors, angles and positions.

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is replaced by a fixed non-zero fallback, since zero is a
/// fixed point of the algorithm.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a value in `[0, bound)`. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "next_below requires a non-zero bound");
        (self.next_u64() % u64::from(bound)) as u32
    }

    /// Returns a random CSS angle in whole degrees, `[0, 360)`.
    pub fn angle(&mut self) -> i32 {
        self.next_below(360) as i32
    }

    /// Returns a random stop position in `[0, 100)`.
    pub fn position(&mut self) -> u8 {
        self.next_below(100) as u8
    }

    /// Returns a random hex digit value in `[0, 16)`.
    pub fn hex_digit(&mut self) -> u8 {
        self.next_below(16) as u8
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::new(0)
    }
}
