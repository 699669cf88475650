use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wildtrack_core::layout::{self, parse_profile_name};
use wildtrack_core::{Config, Detector, FileSink, MemoryAdapter, MemoryReader, ProcessHandle};

/// Approximation of the host's per-frame callback cadence (~60 fps).
const FRAME_INTERVAL_MS: u64 = 16;

#[derive(Parser)]
#[command(name = "wildtrack")]
#[command(about = "Wild encounter and party event detector", version)]
struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "wildtrack.json")]
    config: PathBuf,

    /// Override the configured output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the configured memory profile (e.g. "emerald-us")
    #[arg(short, long)]
    profile: Option<String>,

    /// Attach to a specific emulator PID instead of searching
    #[arg(long)]
    pid: Option<u32>,

    /// Emit a test event at startup to verify the output pipeline
    #[arg(long)]
    test_event: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load config before logging init so the debug flag can raise verbosity.
    let config = match Config::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "Failed to load config from {:?}: {}, using defaults",
                args.config, e
            );
            Config::default()
        }
    };

    let default_level = if config.debug {
        "wildtrack=debug,wildtrack_core=debug"
    } else {
        "wildtrack=info,wildtrack_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .init();

    info!("wildtrack starting...");
    config.validate();

    let profile_name = args
        .profile
        .clone()
        .or_else(|| config.memory_profile.clone());
    let profile = match profile_name.as_deref() {
        Some(name) => match parse_profile_name(name) {
            Some((title, region)) => layout::resolve(title, region),
            None => {
                warn!("Unrecognized memory profile '{}', using default", name);
                layout::default_profile()
            }
        },
        None => layout::default_profile(),
    };
    info!("Using layout profile {}-{}", profile.title, profile.region);

    let process = match args.pid {
        Some(pid) => ProcessHandle::open(pid)?,
        None => ProcessHandle::find_and_open()?,
    };
    info!("Attached to emulator process (pid {})", process.pid);

    // Bind one working read primitive for the rest of the run.
    let adapter = MemoryAdapter::negotiate(
        vec![Box::new(MemoryReader::new(&process))],
        profile.battle_flag,
    )?;

    let output_dir = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));
    info!("Writing events to {:?}", output_dir);

    let mut detector = Detector::new(&config, profile, adapter, FileSink::new(&output_dir));

    if args.test_event {
        detector.emit_test("startup pipeline check");
    }

    info!("Detection running (poll every {} frames)", config.poll_interval);
    while !detector.is_stopped() {
        detector.on_frame();
        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }

    info!("Detection stopped");
    Ok(())
}
