//! ULIDs rendered in Crockford base32.

use crate::rng::EntropySource;
use crate::sampler::{const_span, draw_bytes, sample_below, uint32};

/// Crockford base32 alphabet, excluding `I`, `L`, `O` and `U`.
pub const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of every encoded ULID.
pub const ULID_LEN: usize = 26;

const GROUP_BITS: usize = 5;
const VALUE_BITS: usize = 128;
const TIMESTAMP_MASK: u64 = (1 << 48) - 1;

/// Returns a ULID: a 48-bit timestamp followed by 80 random bits.
///
/// A supplied `time` (milliseconds since the epoch) is reduced to 48 bits.
/// Without one, the timestamp is synthesised from a 16-bit draw for the high
/// part and a full 32-bit draw for the low part, so output stays a function
/// of the seed alone.
///
/// # Example
///
/// ```
/// use seeded_ids::{Mulberry32, ids};
///
/// let id = ids::ulid(&mut Mulberry32::new(2), Some(1_469_918_176_385));
/// assert_eq!(id, "05B3VWV4G6RYD2Z0YCYT3GF5VG");
/// ```
pub fn ulid<S>(source: &mut S, time: Option<u64>) -> String
where
    S: EntropySource + ?Sized,
{
    let timestamp = match time {
        Some(millis) => millis & TIMESTAMP_MASK,
        None => synthesize_timestamp(source),
    };
    let random: [u8; 10] = draw_bytes(source);
    let random_bits = random
        .iter()
        .fold(0_u128, |bits, byte| (bits << 8) | u128::from(*byte));

    encode_crockford((u128::from(timestamp) << 80) | random_bits)
}

/// Encodes a 128-bit value as twenty-six Crockford base32 symbols.
///
/// The value is read as a bit string from the most significant bit, split
/// into 5-bit groups left to right, and the final group (three bits) is
/// padded with two zero bits on the right.
///
/// # Example
///
/// ```
/// use seeded_ids::ids::encode_crockford;
///
/// assert_eq!(encode_crockford(0), "00000000000000000000000000");
/// assert_eq!(encode_crockford(1), "00000000000000000000000004");
/// ```
#[must_use]
pub fn encode_crockford(value: u128) -> String {
    (1..=ULID_LEN)
        .map(|group| {
            let end = group * GROUP_BITS;
            let bits = match VALUE_BITS.checked_sub(end) {
                Some(shift) => value >> shift,
                None => value << (end - VALUE_BITS),
            };
            symbol(bits & 0x1F)
        })
        .collect()
}

fn synthesize_timestamp<S>(source: &mut S) -> u64
where
    S: EntropySource + ?Sized,
{
    let high = u64::from(sample_below(source, const_span(1 << 16)));
    let low = u64::from(uint32(source));
    (high << 32) | low
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::indexing_slicing,
    reason = "group is masked to five bits"
)]
const fn symbol(group: u128) -> char {
    CROCKFORD_ALPHABET[group as usize] as char
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::rng::Mulberry32;

    fn is_crockford(id: &str) -> bool {
        id.bytes().all(|byte| CROCKFORD_ALPHABET.contains(&byte))
    }

    #[rstest]
    #[case(0, "00000000000000000000000000")]
    #[case(u128::MAX, "ZZZZZZZZZZZZZZZZZZZZZZZZZW")]
    #[case(1 << 127, "G0000000000000000000000000")]
    fn encodes_reference_values(#[case] value: u128, #[case] expected: &str) {
        assert_eq!(encode_crockford(value), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(0))]
    #[case(Some(u64::MAX))]
    fn ulid_is_always_twenty_six_crockford_symbols(#[case] time: Option<u64>) {
        let mut rng = Mulberry32::new(31);
        for _ in 0..200 {
            let id = ulid(&mut rng, time);
            assert_eq!(id.len(), ULID_LEN);
            assert!(is_crockford(&id), "unexpected symbol in {id}");
        }
    }

    #[test]
    fn supplied_time_is_clamped_to_48_bits() {
        let wide = ulid(&mut Mulberry32::new(3), Some((1 << 48) + 5));
        let narrow = ulid(&mut Mulberry32::new(3), Some(5));
        assert_eq!(wide, narrow);
    }

    #[test]
    fn supplied_time_leads_the_encoding() {
        let id = ulid(&mut Mulberry32::new(2), Some(1_469_918_176_385));
        assert!(id.starts_with("05B3VWV4G6"), "{id}");
    }

    #[test]
    fn synthesised_time_is_deterministic() {
        assert_eq!(
            ulid(&mut Mulberry32::new(12), None),
            ulid(&mut Mulberry32::new(12), None)
        );
    }

    #[test]
    fn alphabet_excludes_ambiguous_letters() {
        assert!(!CROCKFORD_ALPHABET.iter().any(|c| b"ILOU".contains(c)));
    }
}
