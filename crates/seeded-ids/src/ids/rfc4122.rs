//! RFC 4122 version 4 identifiers.

use uuid::{Builder, Uuid};

use super::base58::encode_base58;
use crate::rng::EntropySource;
use crate::sampler::draw_bytes;

/// Draws sixteen bytes and stamps the version 4 and RFC 4122 variant bits.
///
/// Byte 6 gets the high nibble `0100` and byte 8 the top bits `10`.
pub fn uuid_v4_bytes<S>(source: &mut S) -> [u8; 16]
where
    S: EntropySource + ?Sized,
{
    Builder::from_random_bytes(draw_bytes(source))
        .into_uuid()
        .into_bytes()
}

/// Returns a lowercase, hyphenated version 4 UUID.
///
/// # Example
///
/// ```
/// use seeded_ids::{Mulberry32, ids};
///
/// let id = ids::uuid_v4(&mut Mulberry32::new(1));
/// assert_eq!(id, "f3c9ebfd-2b30-405c-b071-0a2ebd22e0b2");
/// ```
pub fn uuid_v4<S>(source: &mut S) -> String
where
    S: EntropySource + ?Sized,
{
    Uuid::from_bytes(uuid_v4_bytes(source))
        .hyphenated()
        .to_string()
}

/// Returns a version 4 UUID encoded in base58, typically 22 characters.
pub fn short_uuid<S>(source: &mut S) -> String
where
    S: EntropySource + ?Sized,
{
    encode_base58(&uuid_v4_bytes(source))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::rng::Mulberry32;

    fn is_lower_hex(text: &str) -> bool {
        text.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(0xC0FFEE)]
    fn uuid_has_version_and_variant(#[case] seed: u32) {
        let mut rng = Mulberry32::new(seed);
        for _ in 0..200 {
            let id = uuid_v4(&mut rng);
            let groups: Vec<&str> = id.split('-').collect();
            let lengths: Vec<usize> = groups.iter().map(|group| group.len()).collect();

            assert_eq!(lengths, [8, 4, 4, 4, 12], "bad grouping: {id}");
            assert!(groups.iter().all(|group| is_lower_hex(group)), "{id}");
            assert!(groups[2].starts_with('4'), "missing version: {id}");
            assert!(
                groups[3].starts_with(['8', '9', 'a', 'b']),
                "missing variant: {id}"
            );
        }
    }

    #[test]
    fn uuid_is_reproducible() {
        assert_eq!(
            uuid_v4(&mut Mulberry32::new(1)),
            "f3c9ebfd-2b30-405c-b071-0a2ebd22e0b2"
        );
    }

    #[test]
    fn uuid_consumes_sixteen_draws() {
        let mut rng = Mulberry32::new(4);
        uuid_v4(&mut rng);

        let mut expected = Mulberry32::new(4);
        let _: [u8; 16] = draw_bytes(&mut expected);
        assert_eq!(rng, expected);
    }

    #[test]
    fn short_uuid_is_reproducible() {
        assert_eq!(short_uuid(&mut Mulberry32::new(5)), "NLggEUjtXLWTmrevXiSSKK");
    }

    #[test]
    fn short_uuid_length_stays_within_bounds() {
        let mut rng = Mulberry32::new(6);
        for _ in 0..500 {
            let id = short_uuid(&mut rng);
            assert!((20..=24).contains(&id.len()), "unexpected length: {id}");
        }
    }
}
