//! camscan - CLI frontend for the ESP32-CAM scanning toolkit.
//!
//! # Usage
//!
//! ```bash
//! # Scan the camera stream, appending new payloads to the decoded log
//! camscan scan http://192.168.1.100:81/stream --save-log
//!
//! # Scan a local video file, keeping annotated copies of decoded frames
//! camscan scan clips/pantry.mp4 --annotate scan_output/annotated
//!
//! # Export the food-group dataset to a spreadsheet
//! camscan export-groups
//!
//! # Pack an HTML page into a gzip byte array for the firmware
//! camscan pack-asset index_ov2640_simple.html
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use camscan_core::assets;
use camscan_core::config::ConfigManager;
use camscan_core::groups;
use camscan_core::logging::{self, LogLevel};
use camscan_core::scanner::{DecodedLog, ScanOptions, ScanSession};
use camscan_core::source::{open_source, SourceSpec};

/// camscan - barcode/QR scanning toolkit for ESP32-CAM setups
#[derive(Parser)]
#[command(name = "camscan")]
#[command(author, version)]
#[command(about = "Scan barcodes from camera streams, export datasets, pack firmware assets")]
struct Args {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the config file
    #[arg(long, default_value = "camscan.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a video source for barcodes and QR codes
    Scan {
        /// Source: a stream URL, a video file path, or a device index.
        /// Defaults to the configured camera URL.
        source: Option<String>,

        /// Treat an HTTP source as a still-capture endpoint (one GET
        /// per frame) instead of an MJPEG stream
        #[arg(long)]
        snapshot: bool,

        /// Append newly decoded payloads to the decoded-objects log
        #[arg(long)]
        save_log: bool,

        /// Save every captured frame into this directory
        #[arg(long, value_name = "DIR")]
        save_frames: Option<PathBuf>,

        /// Write outlined copies of decoded frames into this directory
        #[arg(long, value_name = "DIR")]
        annotate: Option<PathBuf>,

        /// Stop after this many frames
        #[arg(long, value_name = "N")]
        max_frames: Option<u64>,

        /// Disable the blur/sharpen/threshold preprocess ladder
        #[arg(long)]
        no_ladder: bool,
    },

    /// Export the food-group dataset to a spreadsheet
    ExportGroups {
        /// Output file (default: grupos_alimentos.xlsx in the output folder)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Gzip an HTML asset into a C byte-array listing for the firmware
    PackAsset {
        /// Input HTML file
        input: PathBuf,

        /// Output listing file (default: <input stem>_gzip.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConfigManager::new(&args.config);
    config
        .load_or_create()
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    config.ensure_dirs_exist().context("creating directories")?;

    // -v flags win over the configured level
    let level = match args.verbose {
        0 => config.settings().logging.level,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };
    if config.settings().logging.log_to_file {
        logging::init_tracing_with_file(level, &config.logs_dir());
    } else {
        logging::init_tracing(level);
    }

    match args.command {
        Command::Scan {
            source,
            snapshot,
            save_log,
            save_frames,
            annotate,
            max_frames,
            no_ladder,
        } => run_scan(
            &config, source, snapshot, save_log, save_frames, annotate, max_frames, no_ladder,
        ),
        Command::ExportGroups { output } => run_export(&config, output),
        Command::PackAsset { input, output } => run_pack(&input, output),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    config: &ConfigManager,
    source: Option<String>,
    snapshot: bool,
    save_log: bool,
    save_frames: Option<PathBuf>,
    annotate: Option<PathBuf>,
    max_frames: Option<u64>,
    no_ladder: bool,
) -> Result<()> {
    let settings = config.settings();

    let source_arg = source.unwrap_or_else(|| settings.stream.camera_url.clone());
    let spec = SourceSpec::parse(&source_arg, snapshot);

    for dir in [&save_frames, &annotate].into_iter().flatten() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating directory {}", dir.display()))?;
    }

    let source = open_source(&spec, &settings.stream)
        .with_context(|| format!("opening source '{source_arg}'"))?;

    let log = if save_log {
        Some(DecodedLog::open(config.decoded_log_path()).context("opening decoded-objects log")?)
    } else {
        None
    };

    let mut decode = settings.decode.clone();
    if no_ladder {
        decode.preprocess_ladder = false;
    }

    let options = ScanOptions {
        max_frames,
        save_frames,
        annotate,
        dedupe: decode.dedupe,
        decode,
    };

    let mut session = ScanSession::new(source, log, options);
    let report = session.run().context("scan session failed")?;

    println!(
        "{} frames read, {} objects decoded, {} saved",
        report.frames_read, report.objects_decoded, report.unique_saved
    );
    Ok(())
}

fn run_export(config: &ConfigManager, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| config.output_dir().join(groups::DEFAULT_OUTPUT));

    let records = groups::parse_calls(groups::GROUP_CALLS);
    groups::write_xlsx(&records, &path)
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Exported {} groups to {}", records.len(), path.display());
    Ok(())
}

fn run_pack(input: &std::path::Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| assets::default_output_path(input));

    let size = assets::pack_asset(input, &output)
        .with_context(|| format!("packing {}", input.display()))?;

    println!("Wrote {} ({} bytes gzipped)", output.display(), size);
    Ok(())
}
