//! `rtc` CLI — transcode JSON-lines records against an Avro schema.
//!
//! ## Usage
//!
//! ```sh
//! # Convert records (stdin → stdout), one JSON object per line
//! cat records.jsonl | rtc convert --schema user.avsc
//!
//! # From file to file, stop at the first bad record
//! rtc convert --schema user.avsc -i records.jsonl -o out.jsonl --fail-fast
//!
//! # Reject ambiguous unions and disable the null fallback
//! rtc convert --schema user.avsc --strict -i records.jsonl
//!
//! # Show the descriptor the schema imports as
//! rtc describe --schema user.avsc
//! rtc describe --schema user.avsc --json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` (default `info`) to change verbosity.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use record_transcode::{
    descriptor_from_avro_str, input_from_json_str, TypeDescriptor, Transcoder, UnionPolicy,
};
use std::io::{self, IsTerminal, Read, Write};
use std::process;

#[derive(Parser)]
#[command(
    name = "rtc",
    version,
    about = "Schema-directed record transcoder CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert JSON-lines records to the schema's shape
    Convert {
        /// Avro schema file (.avsc) describing the target record
        #[arg(long, env = "RTC_SCHEMA")]
        schema: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Reject values matching several union branches; no null fallback
        #[arg(long)]
        strict: bool,
        /// Abort on the first record that fails to convert
        #[arg(long)]
        fail_fast: bool,
    },
    /// Print the descriptor imported from a schema
    Describe {
        /// Avro schema file (.avsc)
        #[arg(long, env = "RTC_SCHEMA")]
        schema: String,
        /// Print descriptor JSON instead of a type expression
        #[arg(long)]
        json: bool,
    },
}

/// Per-batch totals.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    converted: usize,
    failed: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            schema,
            input,
            output,
            strict,
            fail_fast,
        } => {
            let descriptor = load_descriptor(&schema)?;
            let policy = if strict {
                UnionPolicy::STRICT
            } else {
                UnionPolicy::FIRST_MATCH
            };
            let records = read_input(input.as_deref())?;

            let mut converted = String::new();
            let summary = convert_lines(
                &descriptor,
                Transcoder::with_policy(policy),
                &records,
                fail_fast,
                &mut converted,
            )?;
            write_output(output.as_deref(), &converted)?;

            tracing::info!(
                converted = summary.converted,
                failed = summary.failed,
                "batch finished"
            );
            if summary.failed > 0 {
                process::exit(1);
            }
        }
        Commands::Describe { schema, json } => {
            let descriptor = load_descriptor(&schema)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&descriptor)?);
            } else {
                println!("{descriptor}");
            }
        }
    }

    Ok(())
}

fn load_descriptor(path: &str) -> Result<TypeDescriptor> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path))?;
    let descriptor = descriptor_from_avro_str(&text)
        .with_context(|| format!("Failed to import schema: {}", path))?;
    descriptor
        .validate()
        .with_context(|| format!("Invalid schema: {}", path))?;
    if !matches!(descriptor, TypeDescriptor::Record { .. }) {
        anyhow::bail!(
            "Schema {} must describe a record, found {}",
            path,
            descriptor.kind()
        );
    }
    tracing::debug!(schema = %path, %descriptor, "schema loaded");
    Ok(descriptor)
}

/// Convert each non-blank line of `records`, appending one JSON line per
/// success to `out`. Failures are logged with their 1-based line number and
/// skipped, or abort the batch when `fail_fast` is set.
fn convert_lines(
    descriptor: &TypeDescriptor,
    transcoder: Transcoder,
    records: &str,
    fail_fast: bool,
    out: &mut String,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for (idx, line) in records.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let result = input_from_json_str(line)
            .and_then(|record| transcoder.transcode(descriptor, &record));
        match result {
            Ok(value) => {
                out.push_str(&value.to_json().to_string());
                out.push('\n');
                summary.converted += 1;
            }
            Err(err) if fail_fast => {
                return Err(err).with_context(|| format!("Failed to convert record at line {}", line_no));
            }
            Err(err) => {
                tracing::warn!(line = line_no, error = %err, "record failed to convert, skipping");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            io::stdout()
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
