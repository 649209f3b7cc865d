//! Seeded linear-congruential generators.
//!
//! [`Lcg`] implements [`rand::RngCore`], so anything that shuffles or draws through the
//! trait (the deck, the AI dealer) can be handed a different generator in tests.

use rand::RngCore;

const NR_MULTIPLIER: u32 = 1_664_525;
const NR_INCREMENT: u32 = 1_013_904_223;

const ANSI_MULTIPLIER: u32 = 1_103_515_245;
const ANSI_INCREMENT: u32 = 12_345;
const ANSI_MASK: u32 = 0x7fff_ffff;

/// Folds the high half of a 64-bit seed into the 32-bit state. Seeds below 2^32 map to
/// themselves.
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// `state' = (a * state + c) mod 2^32`, optionally masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
    multiplier: u32,
    increment: u32,
    mask: u32,
}

impl Lcg {
    /// Numerical Recipes constants; drives deck shuffling.
    pub fn new(seed: u64) -> Self {
        Self {
            state: fold_seed(seed),
            multiplier: NR_MULTIPLIER,
            increment: NR_INCREMENT,
            mask: u32::MAX,
        }
    }

    /// ANSI C `rand()` constants with a 31-bit state; drives AI jitter.
    pub fn ansi(seed: u64) -> Self {
        Self {
            state: fold_seed(seed) & ANSI_MASK,
            multiplier: ANSI_MULTIPLIER,
            increment: ANSI_INCREMENT,
            mask: ANSI_MASK,
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(self.multiplier)
            .wrapping_add(self.increment)
            & self.mask;
        self.state
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Uniform index in `0..bound`, computed as `floor(u * bound)` with `u = x / 2^32`.
pub fn index_below<R: RngCore + ?Sized>(rng: &mut R, bound: usize) -> usize {
    ((rng.next_u32() as u64 * bound as u64) >> 32) as usize
}
