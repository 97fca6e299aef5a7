//! piano-daemon: tone synthesis to 16-bit stereo WAV.
//!
//! This binary can run in two modes:
//! - CLI mode: Render one clip to a file
//! - Daemon mode: JSON-RPC server over stdio

use std::time::Instant;

use tracing::{error, info};

use piano_daemon::audio::{decode, write_wav};
use piano_daemon::cli::Cli;
use piano_daemon::config::DaemonConfig;
use piano_daemon::error::{DaemonError, ErrorCode, Result};
use piano_daemon::generation::AudioService;
use piano_daemon::rpc::{run_server, ServerState};
use piano_daemon::types::AudioRequest;

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout is reserved for JSON-RPC responses.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = cli.apply_overrides(DaemonConfig::from_env());

    if cli.is_daemon_mode() {
        run_daemon_mode(config)
    } else if cli.is_cli_mode() {
        run_cli_mode(&cli, config)
    } else {
        print_usage();
        Ok(())
    }
}

/// Renders one clip and writes it to disk.
fn run_cli_mode(cli: &Cli, config: DaemonConfig) -> Result<()> {
    let service = AudioService::from_config(&config)?;
    let request = AudioRequest::new(cli.frequencies.clone(), cli.duration_sec());

    info!(
        frequencies = ?request.frequencies,
        duration_sec = request.duration_sec,
        sample_rate = config.sample_rate,
        "rendering clip"
    );

    let start_time = Instant::now();
    let clip = service.generate_audio_file(&request)?;
    let elapsed = start_time.elapsed().as_secs_f32();

    let output_path = cli.output_path(&config, &clip.clip_id);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| DaemonError::output_write_failed(parent.display().to_string(), e))?;
    }
    write_wav(&clip.image, &output_path)?;

    info!(
        clip_id = %clip.clip_id,
        frames = clip.frames,
        bytes = clip.image.len(),
        audio_sec = clip.duration_sec,
        render_sec = elapsed,
        path = %output_path.display(),
        "clip written"
    );

    if cli.verify {
        let written = std::fs::read(&output_path)
            .map_err(|e| DaemonError::output_write_failed(output_path.display().to_string(), e))?;
        let decoded = decode(&written)?;
        if written != clip.image.as_bytes() || decoded.samples.len() != clip.frames * 2 {
            return Err(DaemonError::new(
                ErrorCode::EncodingConsistencyError,
                format!("{} does not match the rendered clip", output_path.display()),
            ));
        }
        info!(samples = decoded.samples.len(), "verified");
    }

    println!("{}", output_path.display());
    Ok(())
}

/// Runs the daemon mode (JSON-RPC server).
fn run_daemon_mode(config: DaemonConfig) -> Result<()> {
    let state = ServerState::new(config)?;

    info!(
        sample_rate = state.config.sample_rate,
        max_duration_sec = state.config.max_duration_sec,
        source = state.service.source_name(),
        "starting JSON-RPC server on stdio"
    );

    run_server(state)
}

/// Prints usage information.
fn print_usage() {
    eprintln!("piano-daemon: render tone frequencies into WAV files");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  Single clip:");
    eprintln!("    piano-daemon -f 261.63 -f 329.63 -f 392.0 --duration 1.5 --output chord.wav");
    eprintln!();
    eprintln!("  Daemon mode (JSON-RPC server):");
    eprintln!("    piano-daemon --daemon");
    eprintln!();
    eprintln!("Run 'piano-daemon --help' for full options.");
}
