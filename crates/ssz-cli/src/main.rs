/// `ssz-verify`: validate canonical encodings and print their hash-tree
/// roots.
///
/// # Command overview
///
/// ```text
/// ssz-verify <COMMAND> [OPTIONS]
/// ssz-verify --file <BIN> --type <SCHEMA>      (same as `root`)
///
/// Commands:
///   root       Print the hex root of a value
///   validate   Check a value for canonical encoding and report each step
///   inspect    Print the parsed layout, chunk count, and length mixin
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log pipeline details to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                       |
/// |------|-----------------------------------------------|
/// | 0    | Success                                       |
/// | 1    | Decode failure, unreadable input, bad schema  |
///
/// Decode failures are reported on stderr as `Error <code>: <message>`,
/// with `<code>` the numeric error kind (1-7). Other failures print
/// `error: <message>`. Stdout only ever carries results.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use ssz_decoder::DecodeError;
use ssz_driver::Root;
use tracing_subscriber::EnvFilter;

mod cmd_inspect;
mod cmd_root;
mod cmd_validate;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Canonical decoder and hash-tree-root calculator.
#[derive(Parser)]
#[command(
    name = "ssz-verify",
    version,
    about = "Verify canonical encodings and compute roots",
    args_conflicts_with_subcommands = true,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the encoded value; without a command, prints its root.
    #[arg(long, requires = "schema")]
    file: Option<PathBuf>,

    /// Path to the JSON schema descriptor; without a command, prints the root.
    #[arg(long = "type", value_name = "SCHEMA", requires = "file")]
    schema: Option<PathBuf>,

    /// Log parser, streamer, and merkleizer details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Cli {
    /// The command to run. Bare `--file`/`--type` means `root`.
    fn into_command(self) -> Option<Commands> {
        match (self.command, self.file, self.schema) {
            (Some(command), _, _) => Some(command),
            (None, Some(file), Some(schema)) => Some(Commands::Root(RootArgs {
                input: InputArgs { file, schema },
                streaming: false,
                staging_bytes: None,
            })),
            _ => None,
        }
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the lowercase hex root of a value.
    Root(RootArgs),
    /// Check a value for canonical encoding and report each step.
    Validate(ValidateArgs),
    /// Print the parsed byte ranges, chunk count, and length mixin.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Value file and schema file, shared by every command.
#[derive(clap::Args)]
pub struct InputArgs {
    /// Path to the encoded value.
    #[arg(long)]
    pub file: PathBuf,

    /// Path to the JSON schema descriptor.
    #[arg(long = "type", value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Arguments for `ssz-verify root`.
///
/// ```text
/// ┌─────────────────────┬────────────────────────────────────────────────┐
/// │ Flag                │ Effect                                         │
/// ├─────────────────────┼────────────────────────────────────────────────┤
/// │ --streaming         │ Stream statically laid-out values from disk    │
/// │                     │ instead of reading the whole file first        │
/// │ --staging-bytes N   │ Staging buffer size for --streaming (min 32)   │
/// └─────────────────────┴────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct RootArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Read the file through a bounded staging buffer when possible.
    #[arg(long)]
    pub streaming: bool,

    /// Staging buffer size in bytes for `--streaming`.
    #[arg(long, value_name = "N")]
    pub staging_bytes: Option<usize>,
}

/// Arguments for `ssz-verify validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Fail unless the computed root equals this hex value.
    #[arg(long, value_name = "HEX")]
    pub expect: Option<Root>,
}

/// Arguments for `ssz-verify inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also print every chunk in hex, one per line.
    #[arg(long)]
    pub chunks: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.into_command() {
        Some(Commands::Root(args)) => cmd_root::run(&args),
        Some(Commands::Validate(args)) => cmd_validate::run(&args),
        Some(Commands::Inspect(args)) => cmd_inspect::run(&args),
        None => Err(anyhow::anyhow!("--file and --type are both required")),
    };

    if let Err(e) = result {
        eprintln!("{}", failure_line(&e));
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Render a command failure for stderr.
///
/// Decode failures keep their numeric kind so scripts can branch on it.
fn failure_line(e: &anyhow::Error) -> String {
    match e.downcast_ref::<DecodeError>() {
        Some(decode) => format!("Error {}: {decode}", decode.code()),
        None => format!("error: {e:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn decode_failure_carries_code() {
        let e = anyhow::Error::from(DecodeError::LengthMismatch {
            expected: 8,
            actual: 9,
        });
        insta::assert_snapshot!(failure_line(&e), @"Error 2: expected exactly 8 bytes, got 9");
    }

    #[test]
    fn schema_failure_is_unsupported_type() {
        let schema_err = ssz_types::Schema::from_json(r#"{"kind": 9}"#).unwrap_err();
        let e = anyhow::Error::from(DecodeError::from(schema_err));
        insta::assert_snapshot!(failure_line(&e), @"Error 4: unsupported schema: unknown schema kind 9 at $");
    }

    #[test]
    fn other_failures_keep_context_chain() {
        let e = Err::<(), _>(std::io::Error::from(std::io::ErrorKind::NotFound))
            .context("cannot read value.bin")
            .unwrap_err();
        assert!(failure_line(&e).starts_with("error: cannot read value.bin: "));
    }

    #[test]
    fn cli_parses_root_flags() {
        let cli = Cli::try_parse_from([
            "ssz-verify",
            "root",
            "--file",
            "v.bin",
            "--type",
            "t.json",
            "--streaming",
            "--staging-bytes",
            "64",
        ])
        .unwrap();
        match cli.into_command() {
            Some(Commands::Root(args)) => {
                assert_eq!(args.input.file, PathBuf::from("v.bin"));
                assert_eq!(args.input.schema, PathBuf::from("t.json"));
                assert!(args.streaming);
                assert_eq!(args.staging_bytes, Some(64));
            }
            _ => panic!("expected root command"),
        }
    }

    #[test]
    fn bare_file_and_type_run_root() {
        let cli = Cli::try_parse_from(["ssz-verify", "--file", "v.bin", "--type", "t.json"]).unwrap();
        match cli.into_command() {
            Some(Commands::Root(args)) => {
                assert_eq!(args.input.file, PathBuf::from("v.bin"));
                assert_eq!(args.input.schema, PathBuf::from("t.json"));
                assert!(!args.streaming);
            }
            _ => panic!("expected root command"),
        }
    }

    #[test]
    fn bare_file_without_type_is_rejected() {
        assert!(Cli::try_parse_from(["ssz-verify", "--file", "v.bin"]).is_err());
    }

    #[test]
    fn top_level_input_conflicts_with_command() {
        let parsed = Cli::try_parse_from([
            "ssz-verify",
            "--file",
            "a.bin",
            "--type",
            "a.json",
            "inspect",
            "--file",
            "v.bin",
            "--type",
            "t.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn cli_rejects_bad_expected_root() {
        let parsed = Cli::try_parse_from([
            "ssz-verify",
            "validate",
            "--file",
            "v.bin",
            "--type",
            "t.json",
            "--expect",
            "xyz",
        ]);
        assert!(parsed.is_err());
    }
}
