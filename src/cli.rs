//! CLI argument parser.
//!
//! Renders a single clip to disk, or starts the JSON-RPC daemon.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DaemonConfig;

/// Clip length used when only frequencies are given.
pub const DEFAULT_DURATION_SEC: f64 = 1.0;

/// piano-daemon: render tone frequencies into 16-bit stereo WAV files
#[derive(Parser, Debug)]
#[command(name = "piano-daemon")]
#[command(about = "Render tone frequencies into 16-bit stereo PCM WAV files")]
#[command(version)]
pub struct Cli {
    /// Tone frequency in Hz (repeat for chords)
    #[arg(short = 'f', long = "freq")]
    pub frequencies: Vec<f64>,

    /// Clip length in seconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Output WAV file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output sample rate in Hz (overrides PIANO_SAMPLE_RATE)
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Read the written file back and check it matches
    #[arg(long)]
    pub verify: bool,

    /// Run in daemon mode (JSON-RPC over stdio)
    #[arg(long)]
    pub daemon: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns true if running in CLI mode (not daemon mode).
    pub fn is_cli_mode(&self) -> bool {
        !self.daemon && (!self.frequencies.is_empty() || self.duration.is_some())
    }

    /// Returns true if running in daemon mode.
    pub fn is_daemon_mode(&self) -> bool {
        self.daemon
    }

    /// Returns the requested duration, defaulting to one second.
    pub fn duration_sec(&self) -> f64 {
        self.duration.unwrap_or(DEFAULT_DURATION_SEC)
    }

    /// Applies command-line overrides on top of a base configuration.
    pub fn apply_overrides(&self, mut config: DaemonConfig) -> DaemonConfig {
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        config
    }

    /// Returns the effective output path.
    ///
    /// Defaults to `clip-<clip_id>.wav` in the configured output directory.
    pub fn output_path(&self, config: &DaemonConfig, clip_id: &str) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            config
                .effective_output_dir()
                .join(format!("clip-{}.wav", clip_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(frequencies: Vec<f64>, duration: Option<f64>, daemon: bool) -> Cli {
        Cli {
            frequencies,
            duration,
            output: None,
            sample_rate: None,
            verify: false,
            daemon,
        }
    }

    #[test]
    fn parses_repeated_frequencies() {
        let cli = Cli::try_parse_from([
            "piano-daemon",
            "-f",
            "440",
            "--freq",
            "554.37",
            "-d",
            "1.5",
            "--verify",
        ])
        .unwrap();
        assert_eq!(cli.frequencies, vec![440.0, 554.37]);
        assert_eq!(cli.duration, Some(1.5));
        assert!(cli.verify);
        assert!(cli.is_cli_mode());
    }

    #[test]
    fn cli_mode_detection() {
        assert!(cli(vec![440.0], None, false).is_cli_mode());
        assert!(cli(vec![], Some(2.0), false).is_cli_mode());
        assert!(!cli(vec![], None, false).is_cli_mode());

        let daemon = cli(vec![], None, true);
        assert!(!daemon.is_cli_mode());
        assert!(daemon.is_daemon_mode());
    }

    #[test]
    fn duration_default() {
        assert_eq!(cli(vec![440.0], None, false).duration_sec(), 1.0);
        assert_eq!(cli(vec![440.0], Some(0.25), false).duration_sec(), 0.25);
    }

    #[test]
    fn sample_rate_override() {
        let mut args = cli(vec![440.0], None, false);
        args.sample_rate = Some(48000);
        let config = args.apply_overrides(DaemonConfig::default());
        assert_eq!(config.sample_rate, 48000);
    }

    #[test]
    fn output_path_default_uses_clip_id() {
        let config = DaemonConfig {
            output_dir: Some(PathBuf::from("/tmp/clips")),
            ..DaemonConfig::default()
        };
        let path = cli(vec![440.0], None, false).output_path(&config, "0123456789abcdef");
        assert_eq!(path, PathBuf::from("/tmp/clips/clip-0123456789abcdef.wav"));
    }

    #[test]
    fn output_path_explicit() {
        let mut args = cli(vec![440.0], None, false);
        args.output = Some(PathBuf::from("chord.wav"));
        let path = args.output_path(&DaemonConfig::default(), "ignored");
        assert_eq!(path, PathBuf::from("chord.wav"));
    }
}
