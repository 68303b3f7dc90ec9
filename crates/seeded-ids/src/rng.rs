//! Deterministic 32-bit pseudo-random engine.
//!
//! [`Mulberry32`] owns a single `u32` state word that advances by a Weyl
//! increment on every draw and is then passed through an avalanche mix. The
//! engine is non-cryptographic: it exists so that every identifier produced
//! by this crate can be reproduced from a seed.
//!
//! All sampling in the crate goes through the [`EntropySource`] trait rather
//! than the concrete engine, which lets tests replay scripted streams.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u32 = 0xDEAD_BEEF;

/// Odd Weyl increment added to the state before mixing.
const WEYL_INCREMENT: u32 = 0x6D2B_79F5;

/// `2^32` as a float, the divisor that maps a draw into `[0, 1)`.
const UINT32_RANGE: f64 = 4_294_967_296.0;

/// A source of uniformly distributed 32-bit words.
///
/// The bounded sampler and every identifier encoder consume entropy through
/// this trait. The order of calls determines the output, so implementations
/// must be deterministic for a given starting state.
pub trait EntropySource {
    /// Returns the next uniformly distributed 32-bit word.
    fn next_u32(&mut self) -> u32;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Mulberry32 generator: a Weyl sequence followed by an avalanche mix.
///
/// The state is a plain value owned by the caller. Two engines built from the
/// same seed and driven through the same calls yield identical sequences on
/// every platform, because all arithmetic wraps at 32 bits.
///
/// # Example
///
/// ```
/// use seeded_ids::Mulberry32;
///
/// let mut first = Mulberry32::new(42);
/// let mut second = Mulberry32::new(42);
///
/// assert_eq!(first.next_u32(), second.next_u32());
/// assert!((0.0..1.0).contains(&first.next_f64()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates an engine whose state is `seed`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Resets the state to `seed`.
    ///
    /// Future draws restart from the new seed; values already returned are
    /// unaffected.
    pub const fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Returns the current state word.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns the mixed 32-bit output.
    pub const fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_INCREMENT);
        let mut mixed = self.state;
        mixed = (mixed ^ (mixed >> 15)).wrapping_mul(mixed | 1);
        mixed ^= mixed.wrapping_add((mixed ^ (mixed >> 7)).wrapping_mul(mixed | 61));
        mixed ^ (mixed >> 14)
    }

    /// Returns a float in `[0, 1)` built from one 32-bit draw.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / UINT32_RANGE
    }
}

impl Default for Mulberry32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl EntropySource for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        Self::next_u32(self)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        Self::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_be_bytes(seed))
    }
}

#[cfg(test)]
mod tests {
    //! Reference outputs were taken from the canonical mulberry32 routine.

    use rand::seq::SliceRandom;
    use rstest::rstest;

    use super::*;

    fn take(engine: &mut Mulberry32, count: usize) -> Vec<u32> {
        (0..count).map(|_| engine.next_u32()).collect()
    }

    #[rstest]
    #[case(1, [2_693_262_067, 11_749_833, 2_265_367_787])]
    #[case(42, [2_581_720_956, 1_925_393_290, 3_661_312_704])]
    #[case(DEFAULT_SEED, [4_043_151_706, 1_147_597_007, 3_315_858_022])]
    fn matches_reference_sequence(#[case] seed: u32, #[case] expected: [u32; 3]) {
        let mut engine = Mulberry32::new(seed);
        assert_eq!(take(&mut engine, 3), expected);
    }

    #[test]
    fn default_uses_default_seed() {
        assert_eq!(Mulberry32::default(), Mulberry32::new(DEFAULT_SEED));
    }

    #[test]
    fn state_advances_by_weyl_increment() {
        let mut engine = Mulberry32::new(0);
        engine.next_u32();
        assert_eq!(engine.state(), WEYL_INCREMENT);
        engine.next_u32();
        assert_eq!(engine.state(), WEYL_INCREMENT.wrapping_mul(2));
    }

    #[test]
    fn reseeding_restarts_the_sequence() {
        let mut engine = Mulberry32::new(7);
        let first = take(&mut engine, 4);

        engine.seed(7);

        assert_eq!(take(&mut engine, 4), first);
    }

    #[test]
    fn reseeding_does_not_change_returned_values() {
        let mut engine = Mulberry32::new(7);
        let before = take(&mut engine, 2);
        engine.seed(99);
        let after = take(&mut engine, 2);

        assert_eq!(before, take(&mut Mulberry32::new(7), 2));
        assert_eq!(after, take(&mut Mulberry32::new(99), 2));
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut engine = Mulberry32::new(123);
        for _ in 0..10_000 {
            let value = engine.next_f64();
            assert!((0.0..1.0).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn from_seed_reads_big_endian_bytes() {
        let mut seeded = Mulberry32::from_seed(42_u32.to_be_bytes());
        let mut direct = Mulberry32::new(42);
        assert_eq!(take(&mut seeded, 8), take(&mut direct, 8));
    }

    #[test]
    fn drives_rand_shuffle_deterministically() {
        let mut first: Vec<u32> = (0..32).collect();
        let mut second = first.clone();

        first.shuffle(&mut Mulberry32::new(5));
        second.shuffle(&mut Mulberry32::new(5));

        assert_eq!(first, second);
    }

    #[test]
    fn mutable_reference_is_an_entropy_source() {
        fn draw<S: EntropySource>(mut source: S) -> u32 {
            source.next_u32()
        }

        let mut engine = Mulberry32::new(1);
        assert_eq!(draw(&mut engine), 2_693_262_067);
        assert_eq!(engine.next_u32(), 11_749_833);
    }
}
