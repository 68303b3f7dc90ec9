//! Alphabet-driven identifiers: nanoid and CUID-style ids.

use std::num::NonZeroU32;

use crate::error::IdError;
use crate::rng::EntropySource;
use crate::sampler::{const_span, sample_below};

/// URL-safe nanoid alphabet.
const URL_SAFE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Lowercase base-36 symbols used after the CUID prefix.
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Default nanoid length.
const DEFAULT_NANOID_LEN: usize = 21;

/// Default CUID length, including the leading `c`.
const DEFAULT_CUID_LEN: usize = 25;

/// Shortest CUID produced.
const MIN_CUID_LEN: usize = 10;

/// A non-empty set of symbols sampled uniformly by [`nanoid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    span: NonZeroU32,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `symbols`.
    ///
    /// Repeated characters are kept, which weights them accordingly.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::EmptyAlphabet`] for an empty string and
    /// [`IdError::AlphabetTooLarge`] when the symbol count exceeds `u32::MAX`.
    pub fn new(symbols: &str) -> Result<Self, IdError> {
        let symbols: Vec<char> = symbols.chars().collect();
        let len = u32::try_from(symbols.len()).map_err(|_| IdError::AlphabetTooLarge {
            len: symbols.len(),
            max: u32::MAX,
        })?;
        let span = NonZeroU32::new(len).ok_or(IdError::EmptyAlphabet)?;
        Ok(Self { symbols, span })
    }

    /// The 64-symbol URL-safe alphabet `A-Z a-z 0-9 - _`.
    #[must_use]
    pub fn url_safe() -> Self {
        Self {
            symbols: URL_SAFE.chars().collect(),
            span: const_span(64),
        }
    }

    /// Number of symbols.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.span.get()
    }

    /// Always `false`; alphabets are non-empty by construction.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    fn pick<S>(&self, source: &mut S) -> char
    where
        S: EntropySource + ?Sized,
    {
        let index = sample_below(source, self.span);
        usize::try_from(index)
            .ok()
            .and_then(|index| self.symbols.get(index))
            .copied()
            .unwrap_or_default()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::url_safe()
    }
}

/// Options for [`nanoid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NanoidOptions {
    /// Number of symbols; values below one are raised to one.
    pub length: usize,
    /// Symbols to draw from.
    pub alphabet: Alphabet,
}

impl Default for NanoidOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_NANOID_LEN,
            alphabet: Alphabet::url_safe(),
        }
    }
}

/// Returns a nanoid-style identifier.
///
/// Each symbol is an independent uniform draw from the alphabet.
///
/// # Example
///
/// ```
/// use seeded_ids::{Mulberry32, ids::{self, Alphabet, NanoidOptions}};
///
/// let mut rng = Mulberry32::new(3);
/// assert_eq!(ids::nanoid(&mut rng, &NanoidOptions::default()).len(), 21);
///
/// let hex = NanoidOptions {
///     length: 8,
///     alphabet: Alphabet::new("0123456789abcdef").expect("non-empty"),
/// };
/// assert_eq!(ids::nanoid(&mut rng, &hex).len(), 8);
/// ```
pub fn nanoid<S>(source: &mut S, options: &NanoidOptions) -> String
where
    S: EntropySource + ?Sized,
{
    let length = options.length.max(1);
    (0..length)
        .map(|_| options.alphabet.pick(source))
        .collect()
}

/// Returns a CUID-style identifier: `c` followed by lowercase base-36.
///
/// `length` counts the prefix, defaults to 25 and is raised to at least 10.
pub fn cuid<S>(source: &mut S, length: Option<usize>) -> String
where
    S: EntropySource + ?Sized,
{
    let length = length.unwrap_or(DEFAULT_CUID_LEN).max(MIN_CUID_LEN);
    let mut id = String::with_capacity(length);
    id.push('c');
    id.extend((1..length).map(|_| base36_symbol(sample_below(source, const_span(36)))));
    id
}

#[expect(
    clippy::indexing_slicing,
    reason = "index is sampled below the alphabet length"
)]
fn base36_symbol(index: u32) -> char {
    char::from(BASE36[usize::try_from(index).unwrap_or_default()])
}
