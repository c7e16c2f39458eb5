// crates/products-contract/src/main.rs
// ============================================================================
// Module: Contract CLI
// Description: CLI entrypoint for the Products contract bundle.
// Purpose: Generate, verify, and apply the contract schemas from the shell.
// Dependencies: clap, products-contract, serde_json
// ============================================================================

//! ## Overview
//! `generate` writes the deterministic artifact bundle, `verify` checks an
//! on-disk bundle against a fresh build, and `check` validates one JSON file
//! against a named schema, listing every violation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use products_contract::ArtifactBuilder;
use products_contract::ContractError;
use products_contract::SchemaName;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Contract CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "products-contract", about = "Products API contract schemas and artifacts.")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the contract artifacts.
    Generate {
        /// Output directory for generated artifacts.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Verify generated artifacts match the canonical contract.
    Verify {
        /// Directory containing generated artifacts.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Validate a JSON document against a named schema.
    Check {
        /// Schema name (for example `product` or `products-response`).
        #[arg(long, value_name = "NAME")]
        schema: String,
        /// JSON file to validate.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// ============================================================================
// SECTION: CLI Execution
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Executes the CLI command.
fn run() -> Result<(), ContractError> {
    let cli = Cli::parse();
    let builder = ArtifactBuilder::new();
    match cli.command {
        Command::Generate {
            out,
        } => {
            let output_dir = out.unwrap_or_else(ArtifactBuilder::default_output_dir);
            let manifest = builder.write_to(&output_dir)?;
            write_line(&format!(
                "wrote {} artifacts to {}",
                manifest.artifacts.len(),
                output_dir.display()
            ))
        }
        Command::Verify {
            out,
        } => {
            let output_dir = out.unwrap_or_else(ArtifactBuilder::default_output_dir);
            builder.verify_output(&output_dir)
        }
        Command::Check {
            schema,
            file,
        } => check_file(&schema, &file),
    }
}

/// Validates `file` against the schema called `schema`.
fn check_file(schema: &str, file: &Path) -> Result<(), ContractError> {
    let name = SchemaName::parse(schema).ok_or_else(|| {
        let known: Vec<&str> = SchemaName::ALL.iter().map(|name| name.as_str()).collect();
        ContractError::Generation(format!(
            "unknown schema `{schema}` (expected one of: {})",
            known.join(", ")
        ))
    })?;
    let bytes =
        fs::read(file).map_err(|err| ContractError::Io(format!("{}: {err}", file.display())))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|err| ContractError::Serialization(format!("{}: {err}", file.display())))?;
    let violations = name.shape().violations(&value);
    if violations.is_empty() {
        return write_line(&format!("{}: valid {name}", file.display()));
    }
    for violation in &violations {
        write_line(&violation.to_string())?;
    }
    Err(ContractError::Generation(format!(
        "{}: {} violation(s) against {name}",
        file.display(),
        violations.len()
    )))
}

/// Writes one line to stdout.
fn write_line(line: &str) -> Result<(), ContractError> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{line}").map_err(|err| ContractError::Io(err.to_string()))
}

/// Reports CLI errors to stderr and returns a failure exit code.
fn report_error(err: &ContractError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{err}");
    ExitCode::FAILURE
}
