//! sheetpress CLI - turn spreadsheet bios into a WordPress import file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use sheetpress::{FileConfig, OutputFormat, SheetPressError, WorkbookSource, WriteMode};

/// sheetpress - spreadsheet rows to WordPress WXR.
#[derive(Parser)]
#[command(
    name = "sheetpress",
    version,
    about = "Generate a WordPress WXR import file from participant-bio spreadsheet rows.",
    long_about = None,
)]
struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Read the configured sheet range and write the import file.
    Run {
        /// TOML config file (all settings fall back to defaults when omitted).
        #[arg(short, long, env = "SHEETPRESS_CONFIG")]
        config: Option<PathBuf>,

        /// Spreadsheet file (overrides [source].path).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// A1 range such as "Bios!A2:R35" (overrides [source].range).
        #[arg(short, long)]
        range: Option<String>,

        /// Output file (overrides [output].path).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to do when the output file exists (overrides [output].write_mode).
        #[arg(long)]
        write_mode: Option<WriteModeArg>,

        /// Output format (overrides [output].format).
        #[arg(long)]
        format: Option<FormatArg>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WriteModeArg {
    Truncate,
    FailIfExists,
    Append,
}

impl From<WriteModeArg> for WriteMode {
    fn from(arg: WriteModeArg) -> Self {
        match arg {
            WriteModeArg::Truncate => WriteMode::Truncate,
            WriteModeArg::FailIfExists => WriteMode::FailIfExists,
            WriteModeArg::Append => WriteMode::Append,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Wxr,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Wxr => OutputFormat::Wxr,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let result = match cli.command {
        Command::Run {
            config,
            input,
            range,
            output,
            write_mode,
            format,
        } => run(config, input, range, output, write_mode, format),
    };

    if let Err(e) = result {
        handle_error(e);
        process::exit(1);
    }
}

/// Initialize tracing based on CLI flags.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "sheetpress=info",
        1 => "sheetpress=debug",
        _ => "sheetpress=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn run(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    range: Option<String>,
    output: Option<PathBuf>,
    write_mode: Option<WriteModeArg>,
    format: Option<FormatArg>,
) -> Result<(), SheetPressError> {
    let mut config = match &config_path {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    // CLIフラグ > 設定ファイル > デフォルト
    if let Some(input) = input {
        config.source.path = input;
    }
    if let Some(range) = range {
        config.source.range = range;
    }
    if let Some(output) = output {
        config.output.path = output;
    }
    if let Some(mode) = write_mode {
        config.output.write_mode = mode.into();
    }
    if let Some(format) = format {
        config.output.format = format.into();
    }

    let exporter = config.to_builder().build()?;
    let source: WorkbookSource = config.workbook_source();

    info!(
        input = %config.source.path.display(),
        range = %config.source.range,
        "starting export"
    );
    let summary = exporter.run(&source, &config.output.path)?;

    if summary.written {
        info!(
            output = %config.output.path.display(),
            entries = summary.entries,
            skipped = summary.skipped,
            first_id = summary.first_id,
            "export finished"
        );
    }

    Ok(())
}

fn handle_error(error: SheetPressError) {
    let hint = match &error {
        SheetPressError::Io(_) => "Check that the file exists and you have permission to access it.",
        SheetPressError::Parse(_) => "The file may not be a valid xlsx, xls or ods file.",
        SheetPressError::ConfigFile(_) | SheetPressError::Config(_) => {
            "Check the config file against sheetpress.example.toml."
        }
        SheetPressError::Source(_) => "Check the sheet name and the A1 range, e.g. \"Bios!A2:R35\".",
        SheetPressError::ShortRow { .. }
        | SheetPressError::OddTrailingColumns { .. }
        | SheetPressError::InvalidEmail { .. } => {
            "Fix the row, or set [entries] row_errors = \"skip\" to leave it out."
        }
        SheetPressError::OutputExists(_) => "Remove the file or pass --write-mode truncate.",
        SheetPressError::Xml(_) | SheetPressError::Json(_) => "The output could not be written.",
    };

    error!(error = %error, "export failed");
    eprintln!("Error: {}", error);
    eprintln!("{}", hint);
}
