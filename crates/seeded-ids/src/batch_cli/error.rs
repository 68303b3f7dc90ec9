//! Error types for the batch CLI.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::error::{GenerationError, ParseIdKindError, RegistryError};

/// Errors surfaced by CLI parsing, generation and registry updates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    /// No subcommand was supplied.
    #[error("missing command: expected 'generate' or 'add'")]
    MissingCommand,
    /// The first argument is not a known subcommand.
    #[error("unknown command: {value}")]
    UnknownCommand {
        /// Command that was not recognised.
        value: String,
    },
    /// Registry path was not supplied.
    #[error("missing required flag: --registry")]
    MissingRegistryPath,
    /// Another required flag was not supplied.
    #[error("missing required flag: {flag}")]
    MissingFlag {
        /// Flag that must be present.
        flag: &'static str,
    },
    /// Two flags that select different batch sources were combined.
    #[error("{first} cannot be combined with {second}")]
    ConflictingFlags {
        /// Flag seen first.
        first: &'static str,
        /// Flag that conflicts with it.
        second: &'static str,
    },
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognised.
        value: String,
    },
    /// A numeric value failed to parse.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag associated with the invalid number.
        flag: &'static str,
        /// Raw value supplied for the flag.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The `--kind` value is not a known identifier kind.
    #[error("invalid value for --kind: {source}")]
    InvalidKind {
        /// Underlying parse error.
        #[from]
        #[source]
        source: ParseIdKindError,
    },
    /// A directory could not be opened for reading or writing.
    #[error("failed to open directory '{path}': {message}")]
    OpenDirectory {
        /// Directory that could not be opened.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
    /// The EFF word list could not be built.
    #[error("word list error: {message}")]
    WordListError {
        /// Error message describing the failure.
        message: String,
    },
    /// The generated name already exists in the registry.
    #[error("generated batch name '{name}' already exists; supply --name")]
    DuplicateGeneratedName {
        /// Generated name that collided.
        name: String,
    },
    /// Name generation ran out of retries.
    #[error("failed to generate a unique batch name after {attempts} attempts")]
    NameGenerationExhausted {
        /// Number of attempts made.
        attempts: usize,
    },
    /// An error occurred while reading or writing the registry.
    #[error("registry error: {source}")]
    Registry {
        /// Underlying registry error.
        #[from]
        #[source]
        source: RegistryError,
    },
    /// An error occurred while generating or writing a batch.
    #[error("generation error: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },
}
