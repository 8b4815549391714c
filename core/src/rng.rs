//! Deterministic RNG for battle resolution
//!
//! Every random draw the engine makes flows through [`BattleRng`], so a
//! battle replays bit-for-bit from its seed and tests can script exact
//! outcomes by injecting their own implementation.

use rand::RngCore;

/// Trait for random number generation in battles
pub trait BattleRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Uniform fraction in [0, 1)
    ///
    /// Uses 24 random bits so the result is exact in f32 and never rounds
    /// up to 1.0.
    fn fraction(&mut self) -> f32 {
        ((self.next_u32() >> 8) as f32) / ((1u32 << 24) as f32)
    }

    /// Bernoulli draw against a probability in [0, 1]
    ///
    /// A probability of 1.0 always succeeds, 0.0 never does.
    fn chance(&mut self, probability: f32) -> bool {
        self.fraction() < probability
    }
}

/// XorShift32 RNG - simple, fast, deterministic
///
/// This is suitable for game logic where cryptographic security is not
/// needed. The same seed will always produce the same sequence.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a new RNG from a u64 seed
    ///
    /// The seed is combined into a u32, ensuring state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    /// Create a new RNG from a u32 seed
    pub fn seed_from_u32(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }
}

impl BattleRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Callers already on the `rand` ecosystem can drive battles with a
/// seeded [`rand::rngs::StdRng`] instead of [`XorShiftRng`].
impl BattleRng for rand::rngs::StdRng {
    fn next_u32(&mut self) -> u32 {
        RngCore::next_u32(self)
    }
}
