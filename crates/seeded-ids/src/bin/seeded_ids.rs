//! Command-line front end for reproducible identifier batches.
//!
//! This binary delegates to `seeded_ids::batch_cli` for parsing, generation
//! and registry updates, keeping the CLI behaviour testable without spawning
//! a process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use seeded_ids::batch_cli::{
    CliError, ParseOutcome, apply_add, generated_message, parse_args, run_generate,
    success_message,
};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            print_usage(io::stdout().lock());
            Ok(())
        }
        ParseOutcome::Generate(options) => {
            let batch = run_generate(&options)?;
            match options.output() {
                Some(output) => write_lines(&[generated_message(&batch, output)]),
                None => write_lines(&batch.ids),
            }
            Ok(())
        }
        ParseOutcome::Add(options) => {
            let addition = apply_add(&options)?;
            write_lines(&[success_message(&addition, options.registry_path())]);
            Ok(())
        }
    }
}

fn print_usage(mut out: impl Write) {
    let usage = concat!(
        "Usage:\n",
        "  seeded-ids generate --registry <path> --batch <name> [--output <path>]\n",
        "  seeded-ids generate --seed <u32> --kind <kind> [--count <n>] [--output <path>]\n",
        "  seeded-ids add --registry <path> --kind <kind> [options]\n",
        "\n",
        "Generate options:\n",
        "  --registry <path>    Batch registry JSON file\n",
        "  --batch <name>       Registry batch to generate\n",
        "  --seed <u32>         Engine seed for an inline batch\n",
        "  --kind <kind>        Identifier kind for an inline batch\n",
        "  --count <n>          Identifiers to generate (defaults to 10)\n",
        "  --output <path>      Write the batch as JSON instead of printing ids\n",
        "\n",
        "Add options:\n",
        "  --registry <path>    Batch registry JSON file to update\n",
        "  --kind <kind>        Identifier kind for the new batch\n",
        "  --name <name>        Batch name (defaults to words derived from the seed)\n",
        "  --seed <u32>         Engine seed (defaults to random)\n",
        "  --count <n>          Identifier count (defaults to 10)\n",
        "\n",
        "Kinds: uuid-v4, ulid, nanoid, object-id, short-uuid, cuid, upc-a, ean13,\n",
        "       small-serial, serial, big-serial, transaction-id\n",
        "\n",
        "  -h, --help           Print this help output\n",
    );
    if let Err(err) = out.write_all(usage.as_bytes()) {
        drop(err);
    }
}

fn write_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        if let Err(err) = writeln!(out, "{line}") {
            drop(err);
            return;
        }
    }
}
