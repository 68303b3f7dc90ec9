//! Error types for the seeded-ids crate.
//!
//! Sampling has a single failure family, an invalid range, which always
//! propagates to the caller. The remaining enums cover identifier options,
//! the batch registry and batch generation, all built with `thiserror`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Invalid bounds passed to the bounded integer sampler.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SamplerError {
    /// The upper bound is below the lower bound.
    #[error("invalid range: max {max} is less than min {min}")]
    InvertedRange {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },

    /// A bound is NaN or infinite.
    #[error("invalid range: bound {bound} is not finite")]
    NonFiniteBound {
        /// The offending bound.
        bound: f64,
    },

    /// A bound has a fractional part.
    #[error("invalid range: bound {bound} is not an integer")]
    NonIntegralBound {
        /// The offending bound.
        bound: f64,
    },

    /// A bound cannot be represented as a 64-bit signed integer.
    #[error("invalid range: bound {bound} is outside the 64-bit integer domain")]
    OutOfDomain {
        /// The offending bound.
        bound: f64,
    },
}

/// Errors raised while configuring identifier encoders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdError {
    /// A custom alphabet contained no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// A custom alphabet has more symbols than a 32-bit draw can address.
    #[error("alphabet has {len} symbols; at most {max} are supported")]
    AlphabetTooLarge {
        /// Number of symbols supplied.
        len: usize,
        /// Largest supported alphabet.
        max: u32,
    },

    /// Numeric identifier bounds were rejected by the sampler.
    #[error(transparent)]
    Sampler(#[from] SamplerError),
}

/// Errors that can occur when parsing, querying or writing a batch registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// A batch names an identifier kind this crate does not produce.
    #[error("unknown identifier kind at batch {index}: {value}")]
    UnknownKind {
        /// Index of the batch in the array.
        index: usize,
        /// The unrecognised kind.
        value: String,
    },

    /// The registry contains no batch definitions.
    #[error("registry contains no batch definitions")]
    EmptyBatches,

    /// A batch sets an option its identifier kind does not read.
    #[error("batch '{name}' sets {option}, which {kind} batches do not accept")]
    UnsupportedOption {
        /// Name of the offending batch.
        name: String,
        /// The option that was set.
        option: &'static str,
        /// Identifier kind of the batch.
        kind: String,
    },

    /// Two batches share a name.
    #[error("batch name '{name}' already exists in registry")]
    DuplicateBatchName {
        /// The repeated batch name.
        name: String,
    },

    /// The requested batch name was not found in the registry.
    #[error("batch '{name}' not found in registry")]
    BatchNotFound {
        /// The batch name that was not found.
        name: String,
    },

    /// The registry could not be serialised.
    #[error("failed to serialise registry: {message}")]
    SerializeError {
        /// Description of the serialisation error.
        message: String,
    },

    /// The registry file could not be written.
    #[error("failed to write registry file at '{path}': {message}")]
    WriteError {
        /// Path that failed to write.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}

/// An identifier kind name that this crate does not produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown identifier kind: {value}")]
pub struct ParseIdKindError {
    /// The unrecognised kind.
    pub value: String,
}

/// Errors that can occur while generating or writing a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// The batch options do not describe a usable encoder.
    #[error("invalid options for batch '{name}': {source}")]
    InvalidOptions {
        /// Name of the batch.
        name: String,
        /// Underlying encoder error.
        #[source]
        source: IdError,
    },

    /// The generated batch could not be serialised.
    #[error("failed to serialise batch '{name}': {message}")]
    SerializeError {
        /// Name of the batch.
        name: String,
        /// Description of the serialisation error.
        message: String,
    },

    /// The generated batch could not be written.
    #[error("failed to write batch file at '{path}': {message}")]
    WriteError {
        /// Path that failed to write.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
