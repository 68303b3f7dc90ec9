//! Numeric identifiers shaped like SQL integer columns.
//!
//! The `*_serial` and [`identity`] helpers model auto-increment keys but are
//! independent uniform draws; assigning sequential values is left to the
//! caller.

use std::num::NonZeroU32;

use crate::error::SamplerError;
use crate::rng::EntropySource;
use crate::sampler::{const_span, int_in_range, int_wide, sample_below, wide_unchecked};

/// Bounds of a signed or unsigned integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Domain {
    min: i64,
    max: i64,
}

const SMALLINT: Domain = Domain {
    min: i16::MIN as i64,
    max: i16::MAX as i64,
};
const SMALLINT_UNSIGNED: Domain = Domain {
    min: 0,
    max: u16::MAX as i64,
};
const INTEGER: Domain = Domain {
    min: i32::MIN as i64,
    max: i32::MAX as i64,
};
const INTEGER_UNSIGNED: Domain = Domain {
    min: 0,
    max: u32::MAX as i64,
};

const SMALL_SERIAL_SPAN: NonZeroU32 = const_span(0x7FFF);
const SERIAL_SPAN: NonZeroU32 = const_span(0x7FFF_FFFF);

/// Options for [`small_int`] and [`integer`].
///
/// `min` and `max` override the column domain and are clamped into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntOptions {
    /// Use the unsigned domain instead of the signed one.
    pub unsigned: bool,
    /// Lower bound override.
    pub min: Option<i64>,
    /// Upper bound override.
    pub max: Option<i64>,
}

impl IntOptions {
    fn bounds(self, signed: Domain, unsigned: Domain) -> (i64, i64) {
        let domain = if self.unsigned { unsigned } else { signed };
        let clamp = |value: i64| value.clamp(domain.min, domain.max);
        (
            self.min.map_or(domain.min, clamp),
            self.max.map_or(domain.max, clamp),
        )
    }
}

/// Identity column types accepted by [`identity`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IdentityType {
    /// `smallint`: `1..=32767`.
    SmallInt,
    /// `integer`: `1..=2^31 - 1`.
    #[default]
    Integer,
    /// `bigint`: `1..=2^63 - 1`.
    BigInt,
}

/// Draws from the 16-bit domain (`-32768..=32767`, or `0..=65535`).
///
/// # Errors
///
/// Returns [`SamplerError::InvertedRange`] when overrides cross.
pub fn small_int<S>(source: &mut S, options: IntOptions) -> Result<i64, SamplerError>
where
    S: EntropySource + ?Sized,
{
    let (min, max) = options.bounds(SMALLINT, SMALLINT_UNSIGNED);
    int_in_range(source, min, max)
}

/// Draws from the 32-bit domain (`i32`, or `u32` when unsigned).
///
/// Full-width domains exceed the 32-bit sampler's span and are drawn on the
/// wide path, so every value in the column remains reachable.
///
/// # Errors
///
/// Returns [`SamplerError::InvertedRange`] when overrides cross.
///
/// # Example
///
/// ```
/// use seeded_ids::{Mulberry32, ids::numeric::{self, IntOptions}};
///
/// let options = IntOptions { min: Some(10), max: Some(20), ..IntOptions::default() };
/// let value = numeric::integer(&mut Mulberry32::new(1), options).expect("ordered bounds");
/// assert!((10..=20).contains(&value));
/// ```
pub fn integer<S>(source: &mut S, options: IntOptions) -> Result<i64, SamplerError>
where
    S: EntropySource + ?Sized,
{
    let (min, max) = options.bounds(INTEGER, INTEGER_UNSIGNED);
    int_in_range(source, min, max)
}

/// Draws a 64-bit integer on the wide path; defaults to `0..=i64::MAX`.
///
/// # Errors
///
/// Returns [`SamplerError::InvertedRange`] when `max < min`.
pub fn big_integer<S>(
    source: &mut S,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<i64, SamplerError>
where
    S: EntropySource + ?Sized,
{
    int_wide(source, min.unwrap_or(0), max.unwrap_or(i64::MAX))
}

/// Returns a `smallserial`-style key in `1..=32767`.
pub fn small_serial<S>(source: &mut S) -> i64
where
    S: EntropySource + ?Sized,
{
    1 + i64::from(sample_below(source, SMALL_SERIAL_SPAN))
}

/// Returns a `serial`-style key in `1..=2^31 - 1`.
pub fn serial<S>(source: &mut S) -> i64
where
    S: EntropySource + ?Sized,
{
    1 + i64::from(sample_below(source, SERIAL_SPAN))
}

/// Returns a `bigserial`-style key in `1..=2^63 - 1`.
pub fn big_serial<S>(source: &mut S) -> i64
where
    S: EntropySource + ?Sized,
{
    wide_unchecked(source, 1, i64::MAX)
}

/// Returns an identity-column key for the given column type.
pub fn identity<S>(source: &mut S, column: IdentityType) -> i64
where
    S: EntropySource + ?Sized,
{
    match column {
        IdentityType::SmallInt => small_serial(source),
        IdentityType::Integer => serial(source),
        IdentityType::BigInt => big_serial(source),
    }
}
