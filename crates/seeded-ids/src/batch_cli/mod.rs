//! CLI support for generating identifier batches and editing registries.
//!
//! The binary delegates to these functions so parsing, generation and
//! registry updates can be exercised in tests without spawning a process.

mod error;

use std::fmt;

use base_d::{WordDictionary, word, wordlists};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use rand::Rng;

pub use self::error::CliError;
use crate::generator::{GeneratedBatch, generate_batch};
use crate::registry::{BatchDefinition, BatchRegistry, IdKind};

const DEFAULT_COUNT: usize = 10;
const MAX_NAME_ATTEMPTS: usize = 5;

/// Where `generate` takes its batch definition from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSource {
    /// A named batch in a registry file.
    Registry {
        /// Path to the registry JSON file.
        path: Utf8PathBuf,
        /// Name of the batch to generate.
        batch: String,
    },
    /// A batch described entirely on the command line.
    Inline {
        /// Engine seed.
        seed: u32,
        /// Identifier kind.
        kind: IdKind,
        /// Number of identifiers.
        count: usize,
    },
}

/// Parsed options for the `generate` command.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    source: BatchSource,
    output: Option<Utf8PathBuf>,
}

impl GenerateOptions {
    /// Returns the batch source.
    #[must_use]
    pub const fn source(&self) -> &BatchSource {
        &self.source
    }

    /// Returns the JSON output path, if identifiers go to a file.
    ///
    /// # Example
    ///
    /// ```
    /// use seeded_ids::batch_cli::{ParseOutcome, parse_args};
    ///
    /// let args = ["generate", "--seed", "7", "--kind", "ulid", "--output", "ids.json"];
    /// let ParseOutcome::Generate(options) =
    ///     parse_args(args.into_iter().map(str::to_owned)).expect("parse")
    /// else {
    ///     panic!("expected generate options");
    /// };
    ///
    /// assert_eq!(options.output().map(|path| path.as_str()), Some("ids.json"));
    /// ```
    #[must_use]
    pub fn output(&self) -> Option<&Utf8Path> {
        self.output.as_deref()
    }
}

/// Parsed options for the `add` command.
#[derive(Debug, Clone)]
pub struct AddOptions {
    registry_path: Utf8PathBuf,
    kind: IdKind,
    name: Option<String>,
    seed: Option<u32>,
    count: Option<usize>,
}

impl AddOptions {
    /// Returns the registry path supplied for the update.
    #[must_use]
    pub fn registry_path(&self) -> &Utf8Path {
        &self.registry_path
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Generate a batch.
    Generate(GenerateOptions),
    /// Append a batch to a registry.
    Add(AddOptions),
}

/// Result of adding a batch to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addition {
    /// Name of the batch that was added.
    pub name: String,
    /// Engine seed stored in the registry.
    pub seed: u32,
    /// Identifier kind stored in the registry.
    pub kind: IdKind,
    /// Identifier count stored in the registry.
    pub count: usize,
}

/// Parses CLI arguments, excluding the program name.
///
/// # Errors
///
/// Returns [`CliError`] when the command is missing or unknown, required
/// flags are missing or conflict, or values cannot be parsed.
///
/// # Example
///
/// ```
/// use seeded_ids::batch_cli::{ParseOutcome, parse_args};
///
/// let args = ["add", "--registry", "batches.json", "--kind", "cuid"];
/// let outcome = parse_args(args.into_iter().map(str::to_owned)).expect("parse args");
///
/// assert!(matches!(outcome, ParseOutcome::Add(_)));
/// ```
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let Some(command) = args.next() else {
        return Err(CliError::MissingCommand);
    };
    match command.as_str() {
        "-h" | "--help" => Ok(ParseOutcome::Help),
        "generate" => parse_generate(args),
        "add" => parse_add(args),
        _ => Err(CliError::UnknownCommand { value: command }),
    }
}

fn parse_generate<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut registry_path: Option<Utf8PathBuf> = None;
    let mut batch: Option<String> = None;
    let mut seed: Option<u32> = None;
    let mut kind: Option<IdKind> = None;
    let mut count: Option<usize> = None;
    let mut output: Option<Utf8PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--registry" => {
                let value = next_value(&mut args, "--registry")?;
                registry_path = Some(Utf8PathBuf::from(value));
            }
            "--batch" => batch = Some(next_value(&mut args, "--batch")?),
            "--seed" => {
                let value = next_value(&mut args, "--seed")?;
                seed = Some(parse_number(&value, "--seed")?);
            }
            "--kind" => kind = Some(next_value(&mut args, "--kind")?.parse()?),
            "--count" => {
                let value = next_value(&mut args, "--count")?;
                count = Some(parse_number(&value, "--count")?);
            }
            "--output" => {
                let value = next_value(&mut args, "--output")?;
                output = Some(Utf8PathBuf::from(value));
            }
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    let source = match (registry_path, batch) {
        (Some(path), Some(batch_name)) => {
            let inline_flag = [
                ("--seed", seed.is_some()),
                ("--kind", kind.is_some()),
                ("--count", count.is_some()),
            ]
            .into_iter()
            .find_map(|(flag, is_set)| is_set.then_some(flag));
            if let Some(second) = inline_flag {
                return Err(CliError::ConflictingFlags {
                    first: "--registry",
                    second,
                });
            }
            BatchSource::Registry {
                path,
                batch: batch_name,
            }
        }
        (Some(_), None) => return Err(CliError::MissingFlag { flag: "--batch" }),
        (None, Some(_)) => return Err(CliError::MissingRegistryPath),
        (None, None) => BatchSource::Inline {
            seed: seed.ok_or(CliError::MissingFlag { flag: "--seed" })?,
            kind: kind.ok_or(CliError::MissingFlag { flag: "--kind" })?,
            count: count.unwrap_or(DEFAULT_COUNT),
        },
    };

    Ok(ParseOutcome::Generate(GenerateOptions { source, output }))
}

fn parse_add<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut registry_path: Option<Utf8PathBuf> = None;
    let mut kind: Option<IdKind> = None;
    let mut name: Option<String> = None;
    let mut seed: Option<u32> = None;
    let mut count: Option<usize> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--registry" => {
                let value = next_value(&mut args, "--registry")?;
                registry_path = Some(Utf8PathBuf::from(value));
            }
            "--kind" => kind = Some(next_value(&mut args, "--kind")?.parse()?),
            "--name" => name = Some(next_value(&mut args, "--name")?),
            "--seed" => {
                let value = next_value(&mut args, "--seed")?;
                seed = Some(parse_number(&value, "--seed")?);
            }
            "--count" => {
                let value = next_value(&mut args, "--count")?;
                count = Some(parse_number(&value, "--count")?);
            }
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    let resolved_registry_path = registry_path.ok_or(CliError::MissingRegistryPath)?;
    let resolved_kind = kind.ok_or(CliError::MissingFlag { flag: "--kind" })?;
    Ok(ParseOutcome::Add(AddOptions {
        registry_path: resolved_registry_path,
        kind: resolved_kind,
        name,
        seed,
        count,
    }))
}

/// Generates the requested batch, writing it to `--output` when set.
///
/// # Errors
///
/// Returns [`CliError`] when the registry cannot be read, the batch is
/// missing or invalid, or the output file cannot be written.
///
/// # Example
///
/// ```
/// use seeded_ids::batch_cli::{ParseOutcome, parse_args, run_generate};
///
/// let args = ["generate", "--seed", "2026", "--kind", "upc-a", "--count", "3"];
/// let ParseOutcome::Generate(options) =
///     parse_args(args.into_iter().map(str::to_owned)).expect("parse")
/// else {
///     panic!("expected generate options");
/// };
///
/// let batch = run_generate(&options).expect("generate");
/// assert_eq!(batch.ids.len(), 3);
/// ```
pub fn run_generate(options: &GenerateOptions) -> Result<GeneratedBatch, CliError> {
    let definition = resolve_batch(&options.source)?;
    let batch = generate_batch(&definition)?;

    if let Some(output) = options.output() {
        let (dir, file_name) = open_parent_dir(output)?;
        batch.write_to_file(&dir, file_name)?;
    }

    Ok(batch)
}

/// Appends a batch to the registry and returns the stored details.
///
/// # Errors
///
/// Returns [`CliError`] when the registry cannot be read or updated, or a
/// unique batch name cannot be chosen.
pub fn apply_add(options: &AddOptions) -> Result<Addition, CliError> {
    let (dir, file_name) = open_parent_dir(&options.registry_path)?;
    let registry = BatchRegistry::from_file(&dir, file_name)?;
    let selection = select_seed_and_name(&registry, options)?;
    let count = options.count.unwrap_or(DEFAULT_COUNT);
    let definition =
        BatchDefinition::new(selection.name.clone(), selection.seed, options.kind, count);
    let updated = registry.append_batch(definition)?;

    updated.write_to_file(&dir, file_name)?;

    Ok(Addition {
        name: selection.name,
        seed: selection.seed,
        kind: options.kind,
        count,
    })
}

/// Generates a batch name for the supplied seed value.
///
/// # Errors
///
/// Returns [`CliError`] if the word list cannot be loaded.
///
/// # Example
///
/// ```
/// use seeded_ids::batch_cli::batch_name_for_seed;
///
/// let name = batch_name_for_seed(2026).expect("name should generate");
/// assert_eq!(name, batch_name_for_seed(2026).expect("name should generate"));
/// ```
pub fn batch_name_for_seed(seed: u32) -> Result<String, CliError> {
    let dictionary = eff_long_dictionary()?;
    Ok(batch_name_from_value(seed, &dictionary))
}

/// Formats the message printed after `add` succeeds.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use seeded_ids::IdKind;
/// use seeded_ids::batch_cli::{Addition, success_message};
///
/// let addition = Addition {
///     name: "orders".to_owned(),
///     seed: 2026,
///     kind: IdKind::Ulid,
///     count: 10,
/// };
/// let message = success_message(&addition, Utf8Path::new("batches.json"));
///
/// assert!(message.contains("orders"));
/// ```
#[must_use]
pub fn success_message(addition: &Addition, registry_path: &Utf8Path) -> String {
    format!(
        "Added batch \"{}\" (kind={}, seed={}, count={}) to {}",
        addition.name, addition.kind, addition.seed, addition.count, registry_path
    )
}

/// Formats the message printed after `generate` writes a file.
#[must_use]
pub fn generated_message(batch: &GeneratedBatch, output: &Utf8Path) -> String {
    format!(
        "Wrote {} {} ids for batch \"{}\" to {}",
        batch.ids.len(),
        batch.kind,
        batch.name,
        output
    )
}

fn resolve_batch(source: &BatchSource) -> Result<BatchDefinition, CliError> {
    match source {
        BatchSource::Registry { path, batch } => {
            let (dir, file_name) = open_parent_dir(path)?;
            let registry = BatchRegistry::from_file(&dir, file_name)?;
            Ok(registry.find_batch(batch)?.clone())
        }
        BatchSource::Inline { seed, kind, count } => Ok(BatchDefinition::new(
            format!("{kind}-{seed}"),
            *seed,
            *kind,
            *count,
        )),
    }
}

fn open_parent_dir(path: &Utf8Path) -> Result<(Dir, &Utf8Path), CliError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().map_or(path, Utf8Path::new);
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
        CliError::OpenDirectory {
            path: parent.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    Ok((dir, file_name))
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn parse_number<T>(value: &str, flag: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|err| CliError::InvalidNumber {
        flag,
        value: value.to_owned(),
        message: err.to_string(),
    })
}

#[derive(Debug, Clone)]
struct Selection {
    name: String,
    seed: u32,
}

fn select_seed_and_name(
    registry: &BatchRegistry,
    options: &AddOptions,
) -> Result<Selection, CliError> {
    if let Some(name) = options.name.clone() {
        let seed = options.seed.unwrap_or_else(random_seed);
        return Ok(Selection { name, seed });
    }

    let dictionary = eff_long_dictionary()?;
    let supplied_seed = options.seed;
    let mut seed = supplied_seed.unwrap_or_else(random_seed);

    for _ in 0..MAX_NAME_ATTEMPTS {
        let name = batch_name_from_value(seed, &dictionary);
        if registry.find_batch(&name).is_err() {
            return Ok(Selection { name, seed });
        }
        if supplied_seed.is_some() {
            return Err(CliError::DuplicateGeneratedName { name });
        }
        seed = random_seed();
    }

    Err(CliError::NameGenerationExhausted {
        attempts: MAX_NAME_ATTEMPTS,
    })
}

fn batch_name_from_value(seed: u32, dictionary: &WordDictionary) -> String {
    word::encode(seed.to_string().as_bytes(), dictionary)
}

fn random_seed() -> u32 {
    rand::rng().random()
}

fn eff_long_dictionary() -> Result<WordDictionary, CliError> {
    WordDictionary::builder()
        .words_from_str(wordlists::EFF_LONG)
        .delimiter("-")
        .case_sensitive(false)
        .build()
        .map_err(|err| CliError::WordListError { message: err })
}
