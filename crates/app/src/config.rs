//! Configuration for the huffpack command line tool.
//!
//! Arguments are parsed with clap and then resolved into a [`Config`], which
//! checks that the chosen mode has the paths it needs.
//!
//! ```text
//! huffpack -c input.txt output.huf      # compress
//! huffpack -d output.huf restored.txt   # decompress
//! huffpack --verify input.txt           # round trip in memory
//! huffpack --verify --seed 42           # round trip a generated sample
//! ```

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::Level;

/// Default size of the generated sample in verify mode.
///
/// Kept below the 16-bit frequency limit so no symbol can overflow.
pub const DEFAULT_SAMPLE_BYTES: usize = 32 * 1024;

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Huffman file compressor", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["compress", "decompress", "verify"])
))]
pub struct Args {
    /// Compress INPUT into OUTPUT
    #[arg(short, long)]
    pub compress: bool,

    /// Decompress INPUT into OUTPUT
    #[arg(short, long)]
    pub decompress: bool,

    /// Compress and decompress in memory and check the result
    #[arg(long)]
    pub verify: bool,

    /// Input file (optional with --verify)
    pub input: Option<PathBuf>,

    /// Output file (optional with --verify: receives the compressed buffer)
    pub output: Option<PathBuf>,

    /// Seed for the generated sample
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size of the generated sample in bytes
    #[arg(long, default_value_t = DEFAULT_SAMPLE_BYTES)]
    pub sample_bytes: usize,

    /// Print the code table, shortest codes first
    #[arg(long)]
    pub show_codes: bool,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print the run summary
    #[arg(long)]
    pub no_stats: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    Verify,
}

/// Where the bytes to process come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    /// Generated data, reproducible from the seed
    Sample { seed: u64, size: usize },
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub input: InputSource,
    /// Required for compress/decompress, optional for verify
    pub output: Option<PathBuf>,
    pub show_codes: bool,
    pub print_config: bool,
    pub print_stats: bool,
    pub log_level: Level,
}

impl Config {
    /// Resolve parsed arguments.
    ///
    /// Without `--seed`, verify mode derives a seed from the clock; the seed is
    /// part of the printed configuration so the run can be repeated.
    pub fn from_args(args: Args) -> Result<Self, String> {
        let mode = match (args.compress, args.decompress, args.verify) {
            (true, false, false) => Mode::Compress,
            (false, true, false) => Mode::Decompress,
            (false, false, true) => Mode::Verify,
            _ => {
                return Err(
                    "exactly one of --compress, --decompress, --verify is required".to_string(),
                )
            }
        };

        let log_level = parse_level(&args.log_level)?;

        let input = match (mode, args.input) {
            (_, Some(path)) => InputSource::File(path),
            (Mode::Verify, None) => {
                if args.sample_bytes == 0 {
                    return Err("--sample-bytes must be greater than 0".to_string());
                }
                InputSource::Sample {
                    seed: args.seed.unwrap_or_else(clock_seed),
                    size: args.sample_bytes,
                }
            }
            (_, None) => return Err("an input path is required".to_string()),
        };

        if mode != Mode::Verify && args.output.is_none() {
            return Err("an output path is required".to_string());
        }

        Ok(Config {
            mode,
            input,
            output: args.output,
            show_codes: args.show_codes,
            print_config: args.print_config,
            print_stats: !args.no_stats,
            log_level,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode:   {:?}", self.mode);
        match &self.input {
            InputSource::File(path) => println!("Input:  {}", path.display()),
            InputSource::Sample { seed, size } => {
                println!("Input:  generated sample ({} bytes, seed {})", size, seed)
            }
        }
        match &self.output {
            Some(path) => println!("Output: {}", path.display()),
            None => println!("Output: (none)"),
        }
        println!("Log level: {}", self.log_level);
        println!();
    }
}

fn parse_level(value: &str) -> Result<Level, String> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(format!("invalid log level: {}", other)),
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
