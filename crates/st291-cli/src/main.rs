use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glob::glob;
use log::{debug, info};
use st291_core::bits::hex;
use st291_core::{AncCodec, AncPacket, View};

#[derive(Parser, Debug)]
#[command(name = "st291")]
#[command(version)]
#[command(
    about = "Decode and re-encode SMPTE ST 291 ancillary data packets.",
    long_about = None,
    after_help = "Examples:\n  st291 decode packet.bin -o packet.json\n  st291 decode packet.hex --hex --display --stdout\n  st291 reencode packet.bin -o packet.out.bin"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one packet and write its view as JSON.
    Decode {
        #[command(flatten)]
        input: InputArgs,

        /// Output path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Human-readable view (hex identifiers, annotated values)
        #[arg(long)]
        display: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Decode one packet and encode it again with unspecified position.
    Reencode {
        #[command(flatten)]
        input: InputArgs,

        /// Output path (raw bytes)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write hex to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Path to a packet file (glob patterns must match exactly one file)
    input: PathBuf,

    /// Input file holds hex text instead of raw bytes
    #[arg(long)]
    hex: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            input,
            report,
            stdout,
            display,
            pretty,
            compact,
            quiet,
        } => cmd_decode(input, report, stdout, display, pretty, compact, quiet),
        Commands::Reencode {
            input,
            output,
            stdout,
            quiet,
        } => cmd_reencode(input, output, stdout, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_decode(
    input: InputArgs,
    report: Option<PathBuf>,
    stdout: bool,
    display: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input.input)?;
    validate_input_file(&resolved_input)?;
    let report = output_target(report, stdout, &resolved_input)?;

    let codec = AncCodec::new();
    let packet = decode_input(&codec, &resolved_input, input.hex)?;
    let view = if display {
        codec.display_view(&packet)
    } else {
        codec.plain_view(&packet)
    };
    let json = serialize_view(view, pretty, compact)?;

    let Some(report) = report else {
        println!("{}", json);
        return Ok(());
    };
    write_output(&report, json.as_bytes())?;
    if !quiet {
        eprintln!("OK: view written -> {}", report.display());
    }
    Ok(())
}

fn cmd_reencode(
    input: InputArgs,
    output: Option<PathBuf>,
    stdout: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input.input)?;
    validate_input_file(&resolved_input)?;
    let output = output_target(output, stdout, &resolved_input)?;

    let codec = AncCodec::new();
    let packet = decode_input(&codec, &resolved_input, input.hex)?;
    let encoded = codec
        .encode(&packet)
        .context("ANC packet encoding failed")?;
    info!(
        "re-encoded {} bits (word count {})",
        encoded.bit_len, encoded.word_count
    );

    let Some(output) = output else {
        println!("{}", encoded.to_hex());
        return Ok(());
    };
    write_output(&output, &encoded.bytes)?;
    if !quiet {
        eprintln!(
            "OK: {} bits written -> {}",
            encoded.bit_len,
            output.display()
        );
    }
    Ok(())
}

fn decode_input(codec: &AncCodec, input: &Path, is_hex: bool) -> Result<AncPacket, CliError> {
    let data = if is_hex {
        let text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))?;
        hex::decode(&text).map_err(|err| {
            CliError::new(
                format!("invalid hex input '{}': {}", input.display(), err),
                Some("drop --hex for binary files".to_string()),
            )
        })?
    } else {
        fs::read(input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))?
    };
    debug!("read {} bytes from {}", data.len(), input.display());

    codec.decode_bytes(&data).map_err(|err| {
        CliError::new(
            format!("ANC packet decoding failed: {}", err),
            Some("input must start at the C bit of a single packet".to_string()),
        )
    })
}

/// `None` means stdout. Refuses to overwrite the input.
fn output_target(
    output: Option<PathBuf>,
    stdout: bool,
    input: &Path,
) -> Result<Option<PathBuf>, CliError> {
    if stdout {
        return Ok(None);
    }
    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o or --stdout".to_string()),
        )
    })?;

    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = output
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if let Ok(output_dir) = fs::canonicalize(output_dir) {
        let file_name = output
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid output path"))?;
        if output_dir.join(file_name) == input_abs {
            return Err(CliError::new(
                format!("output path must differ from input: {}", output.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(Some(output))
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(output, bytes)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    Ok(())
}

fn serialize_view(view: View, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let value = serde_json::Value::Object(view);
    if pretty {
        serde_json::to_string_pretty(&value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(&value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a file holding one ANC packet".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a file holding one ANC packet".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single packet file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
