//! Random source for placement searches.
//!
//! All implementations must be deterministic: given the same seed they
//! produce the same sequence, so a level built from a seed is reproducible.

/// Random number stream consumed by [`Chunk::scatter`](crate::state::Chunk::scatter).
pub trait RngOracle {
    /// Next raw 32-bit value of the stream.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `0..bound`; 0 when `bound` is 0.
    fn randint0(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }

    /// Uniform value in `center - spread ..= center + spread`.
    fn spread(&mut self, center: i32, spread: i32) -> i32 {
        let spread = spread.max(0);
        let width = (2 * spread + 1) as u32;
        center + self.randint0(width) as i32 - spread
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit output through an xorshift and a
/// state-dependent rotation.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

/// Derives the seed of one level from the session seed and the dungeon depth.
pub fn level_seed(game_seed: u64, depth: u32) -> u64 {
    // SplitMix64-style avalanche
    let mut hash = game_seed ^ (depth as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
