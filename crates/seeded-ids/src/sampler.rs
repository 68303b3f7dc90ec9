//! Bounded integer sampling over an [`EntropySource`].
//!
//! The 32-bit path is exactly uniform: draws falling in the biased tail of the
//! 32-bit space are rejected before the modulo reduction. The wide path
//! assembles a 64-bit value from eight byte draws and reduces it directly,
//! which leaves a bias of at most `span / 2^64`.
//!
//! Ranges whose 32-bit span wraps to zero (exactly `2^32` values, or any
//! multiple of it) short-circuit to `min` without consuming entropy. Callers
//! needing those domains should use [`int_wide`] or [`int_in_range`].

use std::num::NonZeroU32;

use crate::error::SamplerError;
use crate::rng::EntropySource;

/// `2^32`, the size of the raw draw space.
const UINT32_RANGE: u64 = 1 << 32;

/// Smallest `f64` outside the `i64` domain on the positive side (`2^63`).
const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;

/// Returns an integer uniformly distributed over `[min, max]`.
///
/// The span `max - min + 1` is taken modulo `2^32`. When that is zero the
/// function returns `min` immediately without drawing; this keeps the
/// arithmetic representable but means such ranges are not sampled
/// uniformly. Spans wider than `2^32` are reduced modulo `2^32`, so the
/// result stays in range but only covers the low part of it.
///
/// # Errors
///
/// Returns [`SamplerError::InvertedRange`] when `max < min`.
///
/// # Example
///
/// ```
/// use seeded_ids::{Mulberry32, sampler};
///
/// let mut rng = Mulberry32::new(9);
/// let roll = sampler::int_inclusive(&mut rng, 1, 6).expect("valid range");
/// assert!((1..=6).contains(&roll));
/// ```
pub fn int_inclusive<S>(source: &mut S, min: i64, max: i64) -> Result<i64, SamplerError>
where
    S: EntropySource + ?Sized,
{
    if max < min {
        return Err(SamplerError::InvertedRange { min, max });
    }
    let Some(span) = NonZeroU32::new(span_mod_2_32(min, max)) else {
        return Ok(min);
    };
    Ok(min.wrapping_add_unsigned(u64::from(sample_below(source, span))))
}

/// Validates floating-point bounds and samples `[min, max]`.
///
/// This is the entry point for callers that carry bounds as `f64`, where
/// non-finite and fractional values can occur.
///
/// # Errors
///
/// Returns [`SamplerError`] when either bound is non-finite, non-integral or
/// outside the `i64` domain, or when `max < min`.
pub fn int_from_f64<S>(source: &mut S, min: f64, max: f64) -> Result<i64, SamplerError>
where
    S: EntropySource + ?Sized,
{
    let lower = integral_bound(min)?;
    let upper = integral_bound(max)?;
    int_inclusive(source, lower, upper)
}

/// Returns a value uniformly distributed over `[0, span)`.
///
/// Draws at or above `2^32 - (2^32 mod span)` are rejected and redrawn. The
/// expected number of draws is below two for every span.
pub fn sample_below<S>(source: &mut S, span: NonZeroU32) -> u32
where
    S: EntropySource + ?Sized,
{
    let span = span.get();
    let limit = UINT32_RANGE - UINT32_RANGE % u64::from(span);
    loop {
        let draw = source.next_u32();
        if u64::from(draw) < limit {
            return draw % span;
        }
    }
}

/// Returns a float uniformly distributed over `[0, 1)`.
pub fn next_f64<S>(source: &mut S) -> f64
where
    S: EntropySource + ?Sized,
{
    f64::from(source.next_u32()) / 4_294_967_296.0
}

/// Returns one raw 32-bit draw covering the whole `u32` domain.
pub fn uint32<S>(source: &mut S) -> u32
where
    S: EntropySource + ?Sized,
{
    source.next_u32()
}

/// Draws `N` bytes, each sampled from `[0, 255]`.
///
/// # Example
///
/// ```
/// use seeded_ids::{Mulberry32, sampler};
///
/// let bytes: [u8; 4] = sampler::draw_bytes(&mut Mulberry32::new(3));
/// assert_eq!(bytes, sampler::draw_bytes::<_, 4>(&mut Mulberry32::new(3)));
/// ```
pub fn draw_bytes<S, const N: usize>(source: &mut S) -> [u8; N]
where
    S: EntropySource + ?Sized,
{
    let mut bytes = [0_u8; N];
    for byte in &mut bytes {
        *byte = draw_byte(source);
    }
    bytes
}

/// Returns an integer in `[min, max]` from a 64-bit draw.
///
/// Eight bytes are drawn and read big-endian, then reduced modulo the span.
/// There is no rejection step, so the result carries a bias of at most
/// `span / 2^64`; negligible for the wide ranges this path is meant for.
///
/// # Errors
///
/// Returns [`SamplerError::InvertedRange`] when `max < min`.
pub fn int_wide<S>(source: &mut S, min: i64, max: i64) -> Result<i64, SamplerError>
where
    S: EntropySource + ?Sized,
{
    if max < min {
        return Err(SamplerError::InvertedRange { min, max });
    }
    Ok(wide_unchecked(source, min, max))
}

/// Samples `[min, max]` on whichever path represents the span.
///
/// Spans of at most `2^32 - 1` values use the rejection-sampled 32-bit path;
/// anything wider uses [`int_wide`].
///
/// # Errors
///
/// Returns [`SamplerError::InvertedRange`] when `max < min`.
pub fn int_in_range<S>(source: &mut S, min: i64, max: i64) -> Result<i64, SamplerError>
where
    S: EntropySource + ?Sized,
{
    if max.abs_diff(min) < u64::from(u32::MAX) {
        int_inclusive(source, min, max)
    } else {
        int_wide(source, min, max)
    }
}

/// Wide-path draw for bounds already known to be ordered.
pub(crate) fn wide_unchecked<S>(source: &mut S, min: i64, max: i64) -> i64
where
    S: EntropySource + ?Sized,
{
    let value = u64::from_be_bytes(draw_bytes(source));
    let offset = match max.abs_diff(min).checked_add(1) {
        Some(span) => value % span,
        // The full i64 domain: every 64-bit value is already in range.
        None => value,
    };
    min.wrapping_add_unsigned(offset)
}

/// Samples `[0, span)` for a span fixed at compile time.
///
/// # Panics
///
/// Panics if `span` is zero; every caller passes a non-zero constant.
pub(crate) const fn const_span(span: u32) -> NonZeroU32 {
    match NonZeroU32::new(span) {
        Some(value) => value,
        None => panic!("span must be non-zero"),
    }
}

/// Draws a single byte as `int_inclusive(0, 255)` would.
pub(crate) fn draw_byte<S>(source: &mut S) -> u8
where
    S: EntropySource + ?Sized,
{
    const BYTE_SPAN: NonZeroU32 = const_span(256);
    u8::try_from(sample_below(source, BYTE_SPAN)).unwrap_or(u8::MAX)
}

/// Inclusive span of `[min, max]` reduced modulo `2^32`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the span is reduced modulo 2^32 by truncation"
)]
const fn span_mod_2_32(min: i64, max: i64) -> u32 {
    max.abs_diff(min).wrapping_add(1) as u32
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "bound is integral and checked against the i64 domain first"
)]
fn integral_bound(bound: f64) -> Result<i64, SamplerError> {
    if !bound.is_finite() {
        return Err(SamplerError::NonFiniteBound { bound });
    }
    if bound.fract() != 0.0 {
        return Err(SamplerError::NonIntegralBound { bound });
    }
    if !(-I64_UPPER_EXCLUSIVE..I64_UPPER_EXCLUSIVE).contains(&bound) {
        return Err(SamplerError::OutOfDomain { bound });
    }
    Ok(bound as i64)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rstest::rstest;

    use super::*;
    use crate::rng::Mulberry32;

    /// Replays a fixed list of draws and counts how many were consumed.
    struct Scripted {
        draws: VecDeque<u32>,
        consumed: usize,
    }

    impl Scripted {
        fn new(draws: &[u32]) -> Self {
            Self {
                draws: draws.iter().copied().collect(),
                consumed: 0,
            }
        }
    }

    impl EntropySource for Scripted {
        fn next_u32(&mut self) -> u32 {
            self.consumed += 1;
            self.draws.pop_front().expect("script exhausted")
        }
    }

    #[rstest]
    #[case(0, 9)]
    #[case(-5, 5)]
    #[case(1, 1)]
    #[case(i64::from(i32::MIN), i64::from(i32::MAX) - 1)]
    #[case(i64::MAX - 3, i64::MAX)]
    #[case(i64::MIN, i64::MIN + 100)]
    fn results_stay_in_range(#[case] min: i64, #[case] max: i64) {
        let mut rng = Mulberry32::new(17);
        for _ in 0..1_000 {
            let value = int_inclusive(&mut rng, min, max).expect("valid range");
            assert!((min..=max).contains(&value), "{value} outside [{min}, {max}]");
        }
    }

    #[test]
    fn rejects_inverted_range() {
        let mut rng = Mulberry32::new(1);
        assert_eq!(
            int_inclusive(&mut rng, 3, 2),
            Err(SamplerError::InvertedRange { min: 3, max: 2 })
        );
    }

    #[rstest]
    #[case(0, i64::from(u32::MAX))]
    #[case(i64::from(i32::MIN), i64::from(i32::MAX))]
    #[case(10, 10 + (1 << 33) - 1)]
    fn wrapped_span_returns_min_without_drawing(#[case] min: i64, #[case] max: i64) {
        let mut source = Scripted::new(&[]);
        for _ in 0..5 {
            assert_eq!(int_inclusive(&mut source, min, max), Ok(min));
        }
        assert_eq!(source.consumed, 0);
    }

    #[test]
    fn rejection_discards_biased_tail() {
        // span 10: limit = 2^32 - 6, so the top six words are rejected.
        let mut source = Scripted::new(&[u32::MAX, u32::MAX - 5, 4_294_967_289]);
        let value = int_inclusive(&mut source, 0, 9).expect("valid range");

        assert_eq!(source.consumed, 3);
        assert_eq!(value, i64::from(4_294_967_289_u32 % 10));
    }

    #[test]
    fn accepted_draw_is_offset_by_min() {
        let mut source = Scripted::new(&[23]);
        assert_eq!(int_inclusive(&mut source, 100, 109), Ok(103));
    }

    #[test]
    fn power_of_two_span_never_rejects() {
        let mut source = Scripted::new(&[u32::MAX]);
        assert_eq!(int_inclusive(&mut source, 0, 255), Ok(255));
        assert_eq!(source.consumed, 1);
    }

    #[test]
    fn uniform_over_ten_values() {
        let mut rng = Mulberry32::new(2024);
        let mut counts = [0_u32; 10];
        let draws = 100_000;
        for _ in 0..draws {
            let value = int_inclusive(&mut rng, 0, 9).expect("valid range");
            let slot = usize::try_from(value).expect("non-negative");
            counts[slot] += 1;
        }
        let expected = draws / 10;
        for (digit, count) in counts.iter().enumerate() {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 20,
                "digit {digit} appeared {count} times, expected about {expected}"
            );
        }
    }

    #[rstest]
    #[case::nan(f64::NAN, 1.0)]
    #[case::infinite_max(0.0, f64::INFINITY)]
    #[case::infinite_min(f64::NEG_INFINITY, 0.0)]
    fn float_bounds_reject_non_finite(#[case] min: f64, #[case] max: f64) {
        let mut rng = Mulberry32::new(1);
        assert!(matches!(
            int_from_f64(&mut rng, min, max),
            Err(SamplerError::NonFiniteBound { .. })
        ));
    }

    #[test]
    fn float_bounds_reject_fractions() {
        let mut rng = Mulberry32::new(1);
        assert_eq!(
            int_from_f64(&mut rng, 0.0, 2.5),
            Err(SamplerError::NonIntegralBound { bound: 2.5 })
        );
    }

    #[test]
    fn float_bounds_reject_values_beyond_i64() {
        let mut rng = Mulberry32::new(1);
        assert_eq!(
            int_from_f64(&mut rng, 0.0, 1e19),
            Err(SamplerError::OutOfDomain { bound: 1e19 })
        );
    }

    #[test]
    fn float_bounds_match_integer_path() {
        let mut float_rng = Mulberry32::new(8);
        let mut int_rng = Mulberry32::new(8);
        for _ in 0..100 {
            assert_eq!(
                int_from_f64(&mut float_rng, -3.0, 30.0),
                int_inclusive(&mut int_rng, -3, 30)
            );
        }
    }

    #[test]
    fn float_bounds_reject_inverted_range() {
        let mut rng = Mulberry32::new(1);
        assert_eq!(
            int_from_f64(&mut rng, 4.0, -4.0),
            Err(SamplerError::InvertedRange { min: 4, max: -4 })
        );
    }

    #[test]
    fn bytes_consume_one_draw_each() {
        let mut source = Scripted::new(&[0x1FF, 0x100, 0xAB, 7]);
        let bytes: [u8; 4] = draw_bytes(&mut source);
        assert_eq!(bytes, [0xFF, 0x00, 0xAB, 0x07]);
        assert_eq!(source.consumed, 4);
    }

    #[test]
    fn wide_path_reads_bytes_big_endian() {
        let mut source = Scripted::new(&[0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(int_wide(&mut source, 0, i64::MAX), Ok(0x0102));
    }

    #[test]
    fn wide_path_covers_full_domain() {
        let mut source = Scripted::new(&[0xFF; 8]);
        assert_eq!(int_wide(&mut source, i64::MIN, i64::MAX), Ok(i64::MAX));
    }

    #[rstest]
    #[case(0, 1000)]
    #[case(1, i64::MAX)]
    #[case(i64::MIN, i64::MAX)]
    #[case(-10, -10)]
    fn wide_path_stays_in_range(#[case] min: i64, #[case] max: i64) {
        let mut rng = Mulberry32::new(77);
        for _ in 0..500 {
            let value = int_wide(&mut rng, min, max).expect("valid range");
            assert!((min..=max).contains(&value));
        }
    }

    #[test]
    fn wide_path_rejects_inverted_range() {
        let mut rng = Mulberry32::new(1);
        assert_eq!(
            int_wide(&mut rng, 0, -1),
            Err(SamplerError::InvertedRange { min: 0, max: -1 })
        );
    }

    #[test]
    fn in_range_uses_wide_path_for_full_32_bit_domain() {
        let mut rng = Mulberry32::new(3);
        let min = i64::from(i32::MIN);
        let max = i64::from(i32::MAX);
        let draws: Vec<i64> = (0..16)
            .map(|_| int_in_range(&mut rng, min, max).expect("valid range"))
            .collect();
        assert!(draws.iter().all(|value| (min..=max).contains(value)));
        assert!(draws.iter().any(|value| *value != min));
    }

    #[test]
    fn in_range_uses_rejection_path_for_narrow_spans() {
        let mut narrow = Mulberry32::new(3);
        let mut direct = Mulberry32::new(3);
        assert_eq!(
            int_in_range(&mut narrow, 0, 99),
            int_inclusive(&mut direct, 0, 99)
        );
        assert_eq!(narrow, direct);
    }

    #[test]
    fn next_f64_scales_raw_draw() {
        let mut source = Scripted::new(&[0, 1 << 31, u32::MAX]);
        assert!(next_f64(&mut source).abs() < f64::EPSILON);
        assert!((next_f64(&mut source) - 0.5).abs() < f64::EPSILON);
        assert!(next_f64(&mut source) < 1.0);
    }
}
