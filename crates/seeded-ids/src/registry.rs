//! Batch registry types and JSON parsing.
//!
//! A registry names reproducible identifier batches. Each batch pairs a
//! 32-bit engine seed with an identifier kind and a count, so the same entry
//! always regenerates the same identifiers.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use cap_std::fs::Dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::atomic_io::write_atomic;
use crate::checksum;
use crate::error::{ParseIdKindError, RegistryError};
use crate::ids::{self, NanoidOptions, numeric};
use crate::rng::EntropySource;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Identifier formats a batch can produce.
///
/// Kinds are written in kebab-case in registry files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdKind {
    /// Hyphenated RFC 4122 version 4 UUID.
    UuidV4,
    /// 26-character Crockford base32 ULID.
    Ulid,
    /// URL-safe nanoid.
    Nanoid,
    /// 24-character hex ObjectId.
    ObjectId,
    /// Base58 encoding of a version 4 UUID.
    ShortUuid,
    /// `c`-prefixed base-36 id.
    Cuid,
    /// 12-digit UPC-A barcode.
    UpcA,
    /// 13-digit EAN-13 barcode.
    Ean13,
    /// Integer in `1..=32767`.
    SmallSerial,
    /// Integer in `1..=2^31 - 1`.
    Serial,
    /// Integer in `1..=2^63 - 1`.
    BigSerial,
    /// Lowercase hex transaction reference.
    TransactionId,
}

impl IdKind {
    /// Every kind, in registry order.
    pub const ALL: [Self; 12] = [
        Self::UuidV4,
        Self::Ulid,
        Self::Nanoid,
        Self::ObjectId,
        Self::ShortUuid,
        Self::Cuid,
        Self::UpcA,
        Self::Ean13,
        Self::SmallSerial,
        Self::Serial,
        Self::BigSerial,
        Self::TransactionId,
    ];

    /// Returns the kebab-case name used in registry files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UuidV4 => "uuid-v4",
            Self::Ulid => "ulid",
            Self::Nanoid => "nanoid",
            Self::ObjectId => "object-id",
            Self::ShortUuid => "short-uuid",
            Self::Cuid => "cuid",
            Self::UpcA => "upc-a",
            Self::Ean13 => "ean13",
            Self::SmallSerial => "small-serial",
            Self::Serial => "serial",
            Self::BigSerial => "big-serial",
            Self::TransactionId => "transaction-id",
        }
    }

    /// Whether batches of this kind read the `length` option.
    #[must_use]
    pub const fn accepts_length(self) -> bool {
        matches!(self, Self::Nanoid | Self::Cuid | Self::TransactionId)
    }

    /// Whether batches of this kind read the `alphabet` option.
    #[must_use]
    pub const fn accepts_alphabet(self) -> bool {
        matches!(self, Self::Nanoid)
    }

    /// Draws one identifier of this kind with default options.
    ///
    /// Timestamped kinds synthesise their time fields from the source, so the
    /// output depends only on the engine state.
    ///
    /// # Example
    ///
    /// ```
    /// use seeded_ids::{IdKind, Mulberry32};
    ///
    /// let mut rng = Mulberry32::new(1);
    /// assert_eq!(
    ///     IdKind::UuidV4.generate(&mut rng),
    ///     "f3c9ebfd-2b30-405c-b071-0a2ebd22e0b2"
    /// );
    /// ```
    pub fn generate<S>(self, source: &mut S) -> String
    where
        S: EntropySource + ?Sized,
    {
        match self {
            Self::UuidV4 => ids::uuid_v4(source),
            Self::Ulid => ids::ulid(source, None),
            Self::Nanoid => ids::nanoid(source, &NanoidOptions::default()),
            Self::ObjectId => ids::object_id(source, None),
            Self::ShortUuid => ids::short_uuid(source),
            Self::Cuid => ids::cuid(source, None),
            Self::UpcA => checksum::upc_a(source),
            Self::Ean13 => checksum::ean13(source),
            Self::SmallSerial => numeric::small_serial(source).to_string(),
            Self::Serial => numeric::serial(source).to_string(),
            Self::BigSerial => numeric::big_serial(source).to_string(),
            Self::TransactionId => ids::transaction_id(source, None),
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdKind {
    type Err = ParseIdKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ParseIdKindError {
                value: value.to_owned(),
            })
    }
}

/// A registry of named identifier batches.
///
/// # Example
///
/// ```
/// use seeded_ids::{BatchRegistry, IdKind};
///
/// let json = r#"{
///     "version": 1,
///     "batches": [{"name": "orders", "seed": 2026, "kind": "ulid", "count": 10}]
/// }"#;
///
/// let registry = BatchRegistry::from_json(json).expect("valid registry");
/// let batch = registry.find_batch("orders").expect("batch exists");
/// assert_eq!(batch.kind(), IdKind::Ulid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRegistry {
    version: u32,
    batches: Vec<BatchDefinition>,
}

impl BatchRegistry {
    /// Parses a batch registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or missing required fields
    /// - The version is unsupported
    /// - The batches array is empty
    /// - A batch names an unknown kind or sets an option its kind ignores
    /// - Two batches share a name
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawBatchRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a batch registry from `path` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, RegistryError> {
        let contents = dir
            .read_to_string(path)
            .map_err(|e| RegistryError::IoError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawBatchRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.batches.is_empty() {
            return Err(RegistryError::EmptyBatches);
        }

        let mut registry = Self {
            version: raw.version,
            batches: Vec::with_capacity(raw.batches.len()),
        };
        for (index, batch) in raw.batches.into_iter().enumerate() {
            let kind = batch
                .kind
                .parse::<IdKind>()
                .map_err(|err| RegistryError::UnknownKind {
                    index,
                    value: err.value,
                })?;
            let definition = BatchDefinition {
                name: batch.name,
                seed: batch.seed,
                kind,
                count: batch.count,
                length: batch.length,
                alphabet: batch.alphabet,
            };
            definition.check_options()?;
            registry.push_unique(definition)?;
        }

        Ok(registry)
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all batch definitions.
    #[must_use]
    pub fn batches(&self) -> &[BatchDefinition] {
        &self.batches
    }

    /// Finds a batch definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BatchNotFound`] if no batch has that name.
    pub fn find_batch(&self, name: &str) -> Result<&BatchDefinition, RegistryError> {
        self.batches
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| RegistryError::BatchNotFound {
                name: name.to_owned(),
            })
    }

    /// Returns a copy of the registry with `batch` appended.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateBatchName`] if the name is taken, or
    /// [`RegistryError::UnsupportedOption`] if the batch sets an option its
    /// kind ignores.
    pub fn append_batch(&self, batch: BatchDefinition) -> Result<Self, RegistryError> {
        batch.check_options()?;
        let mut updated = self.clone();
        updated.push_unique(batch)?;
        Ok(updated)
    }

    /// Serialises the registry as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SerializeError`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, RegistryError> {
        serde_json::to_string_pretty(self).map_err(|e| RegistryError::SerializeError {
            message: e.to_string(),
        })
    }

    /// Atomically replaces `path` inside `dir` with this registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WriteError`] if the file cannot be written.
    pub fn write_to_file(&self, dir: &Dir, path: &Utf8Path) -> Result<(), RegistryError> {
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        write_atomic(dir, path, &json).map_err(|err| RegistryError::WriteError {
            path: err.path,
            message: err.message,
        })?;
        debug!(%path, batches = self.batches.len(), "wrote batch registry");
        Ok(())
    }

    fn push_unique(&mut self, batch: BatchDefinition) -> Result<(), RegistryError> {
        if self.batches.iter().any(|b| b.name == batch.name) {
            return Err(RegistryError::DuplicateBatchName { name: batch.name });
        }
        self.batches.push(batch);
        Ok(())
    }
}

/// A named, reproducible batch of identifiers.
///
/// `length` applies to nanoid, CUID and transaction-id batches; `alphabet`
/// applies to nanoid batches only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDefinition {
    name: String,
    seed: u32,
    kind: IdKind,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alphabet: Option<String>,
}

impl BatchDefinition {
    /// Creates a batch definition with default encoder options.
    #[must_use]
    pub const fn new(name: String, seed: u32, kind: IdKind, count: usize) -> Self {
        Self {
            name,
            seed,
            kind,
            count,
            length: None,
            alphabet: None,
        }
    }

    /// Sets the identifier length.
    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the nanoid alphabet.
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = Some(alphabet.into());
        self
    }

    /// Returns the batch name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the engine seed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns the identifier kind.
    #[must_use]
    pub const fn kind(&self) -> IdKind {
        self.kind
    }

    /// Returns the number of identifiers to generate.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns the identifier length override, if any.
    #[must_use]
    pub const fn length(&self) -> Option<usize> {
        self.length
    }

    /// Returns the nanoid alphabet override, if any.
    #[must_use]
    pub fn alphabet(&self) -> Option<&str> {
        self.alphabet.as_deref()
    }

    fn check_options(&self) -> Result<(), RegistryError> {
        let unsupported = if self.length.is_some() && !self.kind.accepts_length() {
            Some("length")
        } else if self.alphabet.is_some() && !self.kind.accepts_alphabet() {
            Some("alphabet")
        } else {
            None
        };
        match unsupported {
            Some(option) => Err(RegistryError::UnsupportedOption {
                name: self.name.clone(),
                option,
                kind: self.kind.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBatchRegistry {
    version: u32,
    batches: Vec<RawBatchDefinition>,
}

/// Raw JSON representation of a batch definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBatchDefinition {
    name: String,
    seed: u32,
    kind: String,
    count: usize,
    #[serde(default)]
    length: Option<usize>,
    #[serde(default)]
    alphabet: Option<String>,
}
