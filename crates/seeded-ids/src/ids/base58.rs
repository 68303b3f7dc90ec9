//! Base58 encoding of 128-bit values.
//!
//! Conversion uses `u128` arithmetic only, so the full 16-byte magnitude is
//! preserved exactly.

/// Base58 alphabet without `0`, `O`, `I` and `l`.
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const RADIX: u128 = 58;

/// Encodes sixteen big-endian bytes as base58.
///
/// Digits are emitted most significant first, then one `'1'` is prepended
/// per leading zero byte. An all-zero input therefore becomes sixteen `'1'`
/// characters, and the result is never empty.
///
/// # Example
///
/// ```
/// use seeded_ids::ids::encode_base58;
///
/// assert_eq!(encode_base58(&[0; 16]), "1111111111111111");
///
/// let mut one = [0; 16];
/// one[15] = 1;
/// assert_eq!(encode_base58(&one), "1111111111111112");
/// ```
#[must_use]
pub fn encode_base58(bytes: &[u8; 16]) -> String {
    let mut value = u128::from_be_bytes(*bytes);
    let mut digits = Vec::with_capacity(22);
    while value > 0 {
        digits.push(symbol(value % RADIX));
        value /= RADIX;
    }

    let leading_zeros = bytes.iter().take_while(|byte| **byte == 0).count();
    let mut encoded = String::with_capacity(leading_zeros + digits.len());
    encoded.extend(std::iter::repeat_n('1', leading_zeros));
    encoded.extend(digits.iter().rev());
    if encoded.is_empty() {
        encoded.push('1');
    }
    encoded
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::indexing_slicing,
    reason = "digit is a remainder modulo 58"
)]
const fn symbol(digit: u128) -> char {
    BASE58_ALPHABET[digit as usize] as char
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn zero_bytes_encode_as_ones() {
        assert_eq!(encode_base58(&[0; 16]), "1111111111111111");
    }

    #[test]
    fn leading_zero_bytes_are_preserved() {
        let mut bytes = [0; 16];
        bytes[2] = 0xFF;
        assert_eq!(encode_base58(&bytes), "112ckJo5ktRyFpuMpkmBjd");
    }

    #[rstest]
    #[case(1, "2")]
    #[case(57, "z")]
    #[case(58, "21")]
    fn small_values_use_expected_digits(#[case] value: u128, #[case] expected: &str) {
        let encoded = encode_base58(&value.to_be_bytes());
        let prefix = "1".repeat(15);
        assert_eq!(encoded, format!("{prefix}{expected}"));
    }

    #[test]
    fn alphabet_excludes_ambiguous_symbols() {
        assert!(!BASE58_ALPHABET.iter().any(|c| b"0OIl".contains(c)));
    }
}
