//! UPC-A and EAN-13 check digits.
//!
//! Both schemes weight alternate digits by 1 and 3 and pick the digit that
//! brings the weighted sum up to a multiple of ten. They differ only in which
//! positions carry the weight of 3.

use std::num::NonZeroU32;

use crate::rng::EntropySource;
use crate::sampler::{const_span, sample_below};

const DIGIT_SPAN: NonZeroU32 = const_span(10);

/// Computes the UPC-A check digit for an 11-digit payload.
///
/// Digits at odd 1-indexed positions are weighted by 3.
///
/// # Example
///
/// ```
/// use seeded_ids::checksum::upc_a_check_digit;
///
/// assert_eq!(upc_a_check_digit(&[0, 3, 6, 0, 0, 0, 2, 9, 1, 4, 5]), 2);
/// ```
#[must_use]
pub fn upc_a_check_digit(digits: &[u8; 11]) -> u8 {
    check_digit(digits, 3, 1)
}

/// Computes the EAN-13 check digit for a 12-digit payload.
///
/// Digits at even 1-indexed positions are weighted by 3.
///
/// # Example
///
/// ```
/// use seeded_ids::checksum::ean13_check_digit;
///
/// assert_eq!(ean13_check_digit(&[4, 0, 0, 6, 3, 8, 1, 3, 3, 3, 9, 3]), 1);
/// ```
#[must_use]
pub fn ean13_check_digit(digits: &[u8; 12]) -> u8 {
    check_digit(digits, 1, 3)
}

/// Draws an 11-digit payload and returns the 12-digit UPC-A code.
pub fn upc_a<S>(source: &mut S) -> String
where
    S: EntropySource + ?Sized,
{
    let payload: [u8; 11] = draw_digits(source);
    render(&payload, upc_a_check_digit(&payload))
}

/// Draws a 12-digit payload and returns the 13-digit EAN-13 code.
pub fn ean13<S>(source: &mut S) -> String
where
    S: EntropySource + ?Sized,
{
    let payload: [u8; 12] = draw_digits(source);
    render(&payload, ean13_check_digit(&payload))
}

/// Returns `true` if `code` is twelve digits with a correct UPC-A check digit.
#[must_use]
pub fn is_valid_upc_a(code: &str) -> bool {
    split_code::<11>(code).is_some_and(|(payload, check)| upc_a_check_digit(&payload) == check)
}

/// Returns `true` if `code` is thirteen digits with a correct EAN-13 check digit.
#[must_use]
pub fn is_valid_ean13(code: &str) -> bool {
    split_code::<12>(code).is_some_and(|(payload, check)| ean13_check_digit(&payload) == check)
}

fn check_digit(digits: &[u8], odd_weight: u32, even_weight: u32) -> u8 {
    let total: u32 = digits
        .iter()
        .zip([odd_weight, even_weight].into_iter().cycle())
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum();
    u8::try_from((10 - total % 10) % 10).unwrap_or_default()
}

fn draw_digits<S, const N: usize>(source: &mut S) -> [u8; N]
where
    S: EntropySource + ?Sized,
{
    let mut digits = [0_u8; N];
    for digit in &mut digits {
        *digit = u8::try_from(sample_below(source, DIGIT_SPAN)).unwrap_or_default();
    }
    digits
}

fn render(payload: &[u8], check: u8) -> String {
    payload
        .iter()
        .chain(std::iter::once(&check))
        .map(|digit| char::from(b'0' + digit))
        .collect()
}

fn split_code<const N: usize>(code: &str) -> Option<([u8; N], u8)> {
    let mut digits = code.chars().map(|c| c.to_digit(10));
    let mut payload = [0_u8; N];
    for slot in &mut payload {
        *slot = u8::try_from(digits.next()??).ok()?;
    }
    let check = u8::try_from(digits.next()??).ok()?;
    digits.next().is_none().then_some((payload, check))
}
