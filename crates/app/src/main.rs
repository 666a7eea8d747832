//! huffpack: command line front end for huffpack-core.
//!
//! Reads a whole file, compresses or decompresses it in memory and writes the
//! result through a temporary file that is renamed into place, so a failed
//! run never leaves a partial output behind. Errors go to stderr and the
//! process exits with a non-zero status.

mod config;
mod error;
mod input_gen;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use huffpack_core::format::parse_header;
use huffpack_core::{CodeStats, Encoded, RunMetrics};

use crate::config::{Args, Config, InputSource, Mode};
use crate::error::{AppError, Result};
use crate::input_gen::generate_sample;

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::from(2);
        }
    };

    init_tracing(config.log_level);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {}", e);
    }
}

fn run(config: &Config) -> Result<()> {
    match config.mode {
        Mode::Compress => run_compress(config),
        Mode::Decompress => run_decompress(config),
        Mode::Verify => run_verify(config),
    }
}

fn run_compress(config: &Config) -> Result<()> {
    let input = load_input(&config.input)?;

    let mut metrics = RunMetrics::new();
    let encoded = huffpack_core::encode(&input)?;
    metrics.complete();
    record_encoded(&mut metrics, input.len(), &encoded);

    if let Some(path) = &config.output {
        write_atomic(path, &encoded.bytes)?;
        info!(path = %path.display(), bytes = encoded.bytes.len(), "wrote compressed file");
    }

    if config.show_codes {
        print_codes(&encoded);
    }
    if config.print_stats {
        CodeStats::compute(&encoded.table, &encoded.codes).print();
        metrics.print_summary();
    }
    Ok(())
}

fn run_decompress(config: &Config) -> Result<()> {
    let input = load_input(&config.input)?;

    let mut metrics = RunMetrics::new();
    let output = huffpack_core::decompress(&input)?;
    metrics.complete();

    metrics.original_bytes = output.len() as u64;
    metrics.compressed_bytes = input.len() as u64;
    if !input.is_empty() {
        let (header, payload) = parse_header(&input)?;
        metrics.unique_symbols = header.table.len() as u64;
        metrics.header_bytes = header.encoded_len() as u64;
        metrics.padding_bits = header.padding_bits as u64;
        metrics.payload_bits = payload.len() as u64 * 8 - header.padding_bits as u64;
    }

    if let Some(path) = &config.output {
        write_atomic(path, &output)?;
        info!(path = %path.display(), bytes = output.len(), "wrote decompressed file");
    }

    if config.print_stats {
        metrics.print_summary();
    }
    Ok(())
}

fn run_verify(config: &Config) -> Result<()> {
    let input = load_input(&config.input)?;

    let mut metrics = RunMetrics::new();
    let encoded = huffpack_core::encode(&input)?;
    let restored = huffpack_core::decompress(&encoded.bytes)?;
    metrics.complete();
    record_encoded(&mut metrics, input.len(), &encoded);

    let expected = crc32fast::hash(&input);
    let actual = crc32fast::hash(&restored);
    if expected != actual || input != restored {
        return Err(AppError::RoundTripMismatch { expected, actual });
    }

    if let Some(path) = &config.output {
        write_atomic(path, &encoded.bytes)?;
        info!(path = %path.display(), "wrote compressed file");
    }

    if config.show_codes {
        print_codes(&encoded);
    }
    if config.print_stats {
        CodeStats::compute(&encoded.table, &encoded.codes).print();
        metrics.print_summary();
    }
    println!("Verification: PASSED (crc32 {:#010x}, {} bytes)", expected, input.len());
    Ok(())
}

fn load_input(source: &InputSource) -> Result<Vec<u8>> {
    match source {
        InputSource::File(path) => {
            let data = fs::read(path).map_err(|source| AppError::Read {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), bytes = data.len(), "read input");
            Ok(data)
        }
        InputSource::Sample { seed, size } => {
            info!(seed, size, "generating sample input");
            Ok(generate_sample(*seed, *size))
        }
    }
}

fn record_encoded(metrics: &mut RunMetrics, original_len: usize, encoded: &Encoded) {
    metrics.original_bytes = original_len as u64;
    metrics.compressed_bytes = encoded.bytes.len() as u64;
    metrics.unique_symbols = encoded.table.len() as u64;
    metrics.header_bytes = encoded.header_len() as u64;
    metrics.payload_bits = encoded.payload_bits;
    metrics.padding_bits = encoded.padding_bits as u64;
}

fn print_codes(encoded: &Encoded) {
    println!("=== Codes ===");
    for (symbol, code) in encoded.codes.sorted_by_length() {
        let count = encoded.table.get(symbol).unwrap_or(0);
        println!(
            "{:>6} {:#04x}  count {:>6}  len {:>2}  {}",
            std::ascii::escape_default(symbol).to_string(),
            symbol,
            count,
            code.len,
            code
        );
    }
    println!();
}

/// Write `bytes` to a sibling temporary file, then rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);
    let write_err = |source| AppError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = fs::write(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(e));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
