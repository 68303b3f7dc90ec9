//! Lowercase hexadecimal identifiers.

use crate::rng::EntropySource;
use crate::sampler::{const_span, draw_bytes, sample_below, uint32};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Default transaction id length in hex digits.
const DEFAULT_TRANSACTION_LEN: usize = 16;

/// Returns a MongoDB-style `ObjectId` as 24 lowercase hex characters.
///
/// The first four bytes are the big-endian `time` (seconds), or a full 32-bit
/// draw when no time is given; the remaining eight bytes are drawn.
///
/// # Example
///
/// ```
/// use seeded_ids::{Mulberry32, ids};
///
/// let id = ids::object_id(&mut Mulberry32::new(4), Some(0x6512_0A0B));
/// assert_eq!(id.len(), 24);
/// assert!(id.starts_with("65120a0b"));
/// ```
pub fn object_id<S>(source: &mut S, time: Option<u32>) -> String
where
    S: EntropySource + ?Sized,
{
    let timestamp = time.unwrap_or_else(|| uint32(source));
    let random: [u8; 8] = draw_bytes(source);

    let mut bytes = Vec::with_capacity(12);
    bytes.extend_from_slice(&timestamp.to_be_bytes());
    bytes.extend_from_slice(&random);
    hex::encode(bytes)
}

/// Returns a lowercase hex transaction id.
///
/// `length` defaults to 16 digits and is raised to at least one.
pub fn transaction_id<S>(source: &mut S, length: Option<usize>) -> String
where
    S: EntropySource + ?Sized,
{
    let length = length.unwrap_or(DEFAULT_TRANSACTION_LEN).max(1);
    (0..length)
        .map(|_| hex_digit(sample_below(source, const_span(16))))
        .collect()
}

#[expect(
    clippy::indexing_slicing,
    reason = "digit is sampled below sixteen"
)]
fn hex_digit(digit: u32) -> char {
    char::from(HEX_DIGITS[usize::try_from(digit).unwrap_or_default()])
}
