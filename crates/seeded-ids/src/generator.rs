//! Deterministic batch generation from registry definitions.
//!
//! Every batch seeds a fresh [`Mulberry32`] engine, so a definition always
//! yields the same identifiers regardless of what was generated before it.

use camino::Utf8Path;
use cap_std::fs::Dir;
use serde::Serialize;
use tracing::debug;

use crate::atomic_io::write_atomic;
use crate::error::GenerationError;
use crate::ids::{self, Alphabet, NanoidOptions};
use crate::registry::{BatchDefinition, IdKind};
use crate::rng::{EntropySource, Mulberry32};

/// Identifiers produced for one batch definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBatch {
    /// Batch name from the definition.
    pub name: String,
    /// Engine seed the batch was drawn from.
    pub seed: u32,
    /// Identifier kind.
    pub kind: IdKind,
    /// Identifiers in draw order.
    pub ids: Vec<String>,
}

impl GeneratedBatch {
    /// Serialises the batch as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::SerializeError`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, GenerationError> {
        serde_json::to_string_pretty(self).map_err(|e| GenerationError::SerializeError {
            name: self.name.clone(),
            message: e.to_string(),
        })
    }

    /// Atomically replaces `path` inside `dir` with the batch as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::WriteError`] if the file cannot be written.
    pub fn write_to_file(&self, dir: &Dir, path: &Utf8Path) -> Result<(), GenerationError> {
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        write_atomic(dir, path, &json).map_err(|err| GenerationError::WriteError {
            path: err.path,
            message: err.message,
        })?;
        debug!(batch = %self.name, %path, "wrote generated batch");
        Ok(())
    }
}

/// Generates the identifiers described by `batch`.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidOptions`] if the batch alphabet is
/// empty.
///
/// # Example
///
/// ```
/// use seeded_ids::{BatchDefinition, IdKind, generate_batch};
///
/// let batch = BatchDefinition::new("orders".to_owned(), 2026, IdKind::Ulid, 3);
/// let first = generate_batch(&batch).expect("generated");
/// let second = generate_batch(&batch).expect("generated");
///
/// assert_eq!(first.ids.len(), 3);
/// assert_eq!(first, second);
/// ```
pub fn generate_batch(batch: &BatchDefinition) -> Result<GeneratedBatch, GenerationError> {
    let encoder = Encoder::for_batch(batch)?;
    let mut rng = Mulberry32::new(batch.seed());

    debug!(
        batch = batch.name(),
        kind = %batch.kind(),
        count = batch.count(),
        "generating identifier batch"
    );
    let ids = generate_many(&mut rng, batch.count(), |source, _| encoder.encode(source));

    Ok(GeneratedBatch {
        name: batch.name().to_owned(),
        seed: batch.seed(),
        kind: batch.kind(),
        ids,
    })
}

/// Calls `f` `count` times against one shared source and collects the
/// results.
///
/// `f` also receives the zero-based call index.
///
/// # Example
///
/// ```
/// use seeded_ids::{Mulberry32, generate_many, ids};
///
/// let mut rng = Mulberry32::new(4);
/// let labelled = generate_many(&mut rng, 3, |src, index| {
///     format!("{index}:{}", ids::cuid(src, Some(10)))
/// });
///
/// assert_eq!(labelled.len(), 3);
/// assert!(labelled[2].starts_with("2:c"));
/// ```
pub fn generate_many<S, T, F>(source: &mut S, count: usize, mut f: F) -> Vec<T>
where
    S: EntropySource + ?Sized,
    F: FnMut(&mut S, usize) -> T,
{
    (0..count).map(|index| f(source, index)).collect()
}

/// Resolved encoder configuration for one batch.
enum Encoder {
    Nanoid(NanoidOptions),
    Cuid(Option<usize>),
    TransactionId(Option<usize>),
    Plain(IdKind),
}

impl Encoder {
    fn for_batch(batch: &BatchDefinition) -> Result<Self, GenerationError> {
        Ok(match batch.kind() {
            IdKind::Nanoid => {
                let mut options = NanoidOptions::default();
                if let Some(length) = batch.length() {
                    options.length = length;
                }
                if let Some(symbols) = batch.alphabet() {
                    options.alphabet =
                        Alphabet::new(symbols).map_err(|source| GenerationError::InvalidOptions {
                            name: batch.name().to_owned(),
                            source,
                        })?;
                }
                Self::Nanoid(options)
            }
            IdKind::Cuid => Self::Cuid(batch.length()),
            IdKind::TransactionId => Self::TransactionId(batch.length()),
            kind => Self::Plain(kind),
        })
    }

    fn encode<S>(&self, source: &mut S) -> String
    where
        S: EntropySource + ?Sized,
    {
        match self {
            Self::Nanoid(options) => ids::nanoid(source, options),
            Self::Cuid(length) => ids::cuid(source, *length),
            Self::TransactionId(length) => ids::transaction_id(source, *length),
            Self::Plain(kind) => kind.generate(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::checksum::is_valid_ean13;
    use crate::error::IdError;

    fn batch(kind: IdKind, count: usize) -> BatchDefinition {
        BatchDefinition::new("batch".to_owned(), 2026, kind, count)
    }

    #[rstest]
    #[case(IdKind::UuidV4)]
    #[case(IdKind::Ulid)]
    #[case(IdKind::ObjectId)]
    #[case(IdKind::BigSerial)]
    fn same_definition_yields_same_ids(#[case] kind: IdKind) {
        let definition = batch(kind, 8);

        let first = generate_batch(&definition).expect("first generation");
        let second = generate_batch(&definition).expect("second generation");

        assert_eq!(first, second);
        assert_eq!(first.ids.len(), 8);
    }

    #[test]
    fn batch_matches_manual_draws() {
        let generated = generate_batch(&batch(IdKind::UuidV4, 2)).expect("generated");

        let mut rng = Mulberry32::new(2026);
        let expected = vec![ids::uuid_v4(&mut rng), ids::uuid_v4(&mut rng)];

        assert_eq!(generated.ids, expected);
    }

    #[test]
    fn different_seeds_diverge() {
        let first = generate_batch(&batch(IdKind::Nanoid, 4)).expect("generated");
        let other = BatchDefinition::new("batch".to_owned(), 2027, IdKind::Nanoid, 4);
        let second = generate_batch(&other).expect("generated");

        assert_ne!(first.ids, second.ids);
    }

    #[test]
    fn zero_count_yields_empty_batch() {
        let generated = generate_batch(&batch(IdKind::Cuid, 0)).expect("generated");
        assert!(generated.ids.is_empty());
    }

    #[test]
    fn nanoid_options_are_applied() {
        let definition = batch(IdKind::Nanoid, 20)
            .with_length(6)
            .with_alphabet("xy");

        let generated = generate_batch(&definition).expect("generated");

        for id in &generated.ids {
            assert_eq!(id.len(), 6);
            assert!(id.chars().all(|c| c == 'x' || c == 'y'), "{id}");
        }
    }

    #[test]
    fn length_applies_to_transaction_ids() {
        let definition = batch(IdKind::TransactionId, 5).with_length(40);

        let generated = generate_batch(&definition).expect("generated");

        assert!(generated.ids.iter().all(|id| id.len() == 40));
    }

    #[test]
    fn empty_alphabet_is_reported() {
        let definition = batch(IdKind::Nanoid, 1).with_alphabet("");

        assert_eq!(
            generate_batch(&definition),
            Err(GenerationError::InvalidOptions {
                name: "batch".to_owned(),
                source: IdError::EmptyAlphabet,
            })
        );
    }

    #[test]
    fn barcodes_carry_valid_check_digits() {
        let generated = generate_batch(&batch(IdKind::Ean13, 50)).expect("generated");
        assert!(generated.ids.iter().all(|code| is_valid_ean13(code)));
    }

    #[test]
    fn generate_many_passes_call_index() {
        let mut rng = Mulberry32::new(1);
        let indices = generate_many(&mut rng, 4, |_, index| index);
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn generate_many_shares_one_engine() {
        let mut shared = Mulberry32::new(9);
        let drawn = generate_many(&mut shared, 3, |src, _| src.next_u32());

        let mut fresh = Mulberry32::new(9);
        let expected: Vec<u32> = (0..3).map(|_| fresh.next_u32()).collect();

        assert_eq!(drawn, expected);
    }

    #[test]
    fn batch_serialises_in_camel_case() {
        let generated = GeneratedBatch {
            name: "orders".to_owned(),
            seed: 1,
            kind: IdKind::Serial,
            ids: vec!["42".to_owned()],
        };

        let json = serde_json::to_string(&generated).expect("serialise");

        assert_eq!(
            json,
            r#"{"name":"orders","seed":1,"kind":"serial","ids":["42"]}"#
        );
    }
}
