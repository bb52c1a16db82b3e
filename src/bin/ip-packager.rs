//! IP core packager
//!
//! Packs a design snapshot (JSON) and its HDL sources into an IP core
//! directory usable by Vivado (`component.xml`) and Quartus
//! (`component_hw.tcl`).

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use ip_packager::backend::SnapshotBackend;
use ip_packager::constants::{DEFAULT_LIBRARY, DEFAULT_VENDOR};
use ip_packager::{IpCorePackager, PackagerConfig};

#[derive(Parser)]
#[command(name = "ip-packager")]
#[command(about = "Package a hardware design as an IP-XACT / Quartus IP core")]
#[command(version)]
struct Args {
    /// Design snapshot (JSON)
    #[arg(long)]
    design: PathBuf,

    /// Repository directory the package is created in
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    #[arg(long, default_value = DEFAULT_VENDOR)]
    vendor: String,

    #[arg(long, default_value = DEFAULT_LIBRARY)]
    library: String,

    /// Defaults to <name>_v<version>
    #[arg(long)]
    description: Option<String>,

    /// Packager configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra HDL or constraint files to ship
    #[arg(long = "extra")]
    extra_files: Vec<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = match &args.config {
        Some(path) => PackagerConfig::from_file(path)?,
        None => PackagerConfig::default(),
    };

    let (backend, design) = SnapshotBackend::load(&args.design)?;
    let packager = IpCorePackager::new(backend, design)
        .with_config(config)
        .with_extra_files(args.extra_files);

    let ip_dir = packager.package(
        &args.output,
        &args.vendor,
        &args.library,
        args.description.as_deref(),
    )?;

    println!("{}", ip_dir.display());
    Ok(())
}
