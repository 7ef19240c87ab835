use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hexops::applier::OperatorApplier;
use hexops::config::SystemConfig;
use hexops::document::Document;
use hexops::hexdump;
use hexops::operation::{ByteRange, Endianness, OperandWidth, OperatorKind};
use hexops::parse::parse_operand;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hexops", version, about = "Bitwise and arithmetic operations on binary files")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply an operator to a byte range of a file
    Apply {
        file: PathBuf,
        /// OR, XOR, AND, SHL, SHR, ADD, SUB, MUL or DIV
        #[arg(long)]
        op: OperatorKind,
        /// Operand text: hex by default, #decimal, %binary
        #[arg(long, allow_hyphen_values = true)]
        operand: String,
        #[arg(long, default_value = "0", value_parser = parse_number)]
        offset: u64,
        /// Defaults to the rest of the file
        #[arg(long, value_parser = parse_number)]
        length: Option<u64>,
        /// Chunk width in bytes: 1, 2, 4 or 8
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        signed: bool,
        #[arg(long)]
        big_endian: bool,
        /// Write the result here instead of overwriting FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change the stored defaults
    Config {
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        signed: Option<bool>,
        #[arg(long)]
        big_endian: Option<bool>,
        #[arg(long)]
        log_level: Option<LevelFilter>,
    },
    /// Print a hexdump of a file
    Dump {
        file: PathBuf,
        #[arg(long, default_value = "0", value_parser = parse_number)]
        offset: u64,
        #[arg(long, value_parser = parse_number)]
        length: Option<u64>,
    },
}

fn parse_number(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number {:?}: {}", s, e))
}

fn init_logging(verbose: u8, config: &SystemConfig) {
    let level = match verbose {
        0 => config.log_level_filter(),
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let log_config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    // A logger may already be installed when embedded; keep going without ours.
    let _ = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn rest_of_file(document: &Document, offset: u64, length: Option<u64>) -> ByteRange {
    let length =
        length.unwrap_or_else(|| (document.raw_data.len() as u64).saturating_sub(offset));
    ByteRange::new(offset, length)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SystemConfig::load();
    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Apply {
            file,
            op,
            operand,
            offset,
            length,
            width,
            signed,
            big_endian,
            output,
        } => {
            let width = match width {
                Some(bytes) => OperandWidth::from_bytes(bytes)
                    .with_context(|| format!("Unsupported width {}", bytes))?,
                None => config.default_width,
            };
            let signed = signed || config.default_signed;
            let operand = parse_operand(&operand, width, signed)
                .with_context(|| format!("Cannot use {:?} as a {} operand", operand, width))?;

            let mut document = Document::open(&file)?;
            document.applier = OperatorApplier::new(if big_endian {
                Endianness::Big
            } else {
                config.endianness
            });

            let range = rest_of_file(&document, offset, length);
            let count = document
                .apply_operation(range, op, operand)
                .with_context(|| format!("{} {} failed", op, operand))?;

            match output {
                Some(path) => document.save_as(path)?,
                None => document.save()?,
            }
            println!("{} element(s) modified", count);
        }
        Commands::Config {
            width,
            signed,
            big_endian,
            log_level,
        } => {
            let mut config = config;
            let changed =
                width.is_some() || signed.is_some() || big_endian.is_some() || log_level.is_some();
            if let Some(bytes) = width {
                config.default_width = OperandWidth::from_bytes(bytes)
                    .with_context(|| format!("Unsupported width {}", bytes))?;
            }
            if let Some(signed) = signed {
                config.default_signed = signed;
            }
            if let Some(big_endian) = big_endian {
                config.endianness = if big_endian {
                    Endianness::Big
                } else {
                    Endianness::Little
                };
            }
            if let Some(level) = log_level {
                config.log_level = level.to_string();
            }
            if changed {
                config.save().context("Failed to save config")?;
            }
            if let Some(path) = SystemConfig::config_path() {
                println!("{:?}", path);
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Dump {
            file,
            offset,
            length,
        } => {
            let document = Document::open(&file)?;
            if document.raw_data.is_empty() {
                return Ok(());
            }
            let range = rest_of_file(&document, offset, length)
                .to_index_range(document.raw_data.len())
                .context("Dump range lies outside the file")?;
            let base = range.start;
            for row in hexdump::format_rows(&document.raw_data[range], base) {
                println!("{}", row);
            }
        }
    }

    Ok(())
}
