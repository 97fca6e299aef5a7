//! Daemon configuration module.
//!
//! Contains the runtime configuration for the piano-daemon: the output
//! sample rate, the longest clip a request may ask for, and where the CLI
//! stores rendered files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::audio::max_encodable_duration;
use crate::synth::DEFAULT_MAX_DURATION_SEC;
use crate::types::{AudioFormatParams, SAMPLE_RATE};

/// Highest sample rate accepted from configuration.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Runtime configuration for the daemon.
///
/// This configuration is typically loaded from environment variables at
/// startup and then overridden by command-line arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,

    /// Longest clip a single request may render, in seconds.
    pub max_duration_sec: f64,

    /// Directory for WAV files written by the CLI.
    /// If None, uses the platform-specific default location.
    pub output_dir: Option<PathBuf>,
}

impl DaemonConfig {
    /// Creates a new DaemonConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DaemonConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `PIANO_SAMPLE_RATE` - Output sample rate in Hz
    /// - `PIANO_MAX_DURATION` - Maximum clip length in seconds, bounded by
    ///   the longest clip a WAV file can hold at the configured sample rate
    /// - `PIANO_OUTPUT_DIR` - Directory for rendered files
    ///
    /// Falls back to defaults for unset or unparsable variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(rate_str) = std::env::var("PIANO_SAMPLE_RATE") {
            if let Ok(rate) = rate_str.parse::<u32>() {
                if rate > 0 && rate <= MAX_SAMPLE_RATE {
                    config.sample_rate = rate;
                }
            }
        }

        if let Ok(max_str) = std::env::var("PIANO_MAX_DURATION") {
            if let Ok(max) = max_str.parse::<f64>() {
                if max.is_finite() && max > 0.0 && max <= max_encodable_duration(config.sample_rate)
                {
                    config.max_duration_sec = max;
                }
            }
        }

        if let Ok(path) = std::env::var("PIANO_OUTPUT_DIR") {
            config.output_dir = Some(PathBuf::from(path));
        }

        config
    }

    /// Returns the format parameters written into every header.
    pub fn format(&self) -> AudioFormatParams {
        AudioFormatParams::new(self.sample_rate)
    }

    /// Returns the effective output directory, using platform defaults if not specified.
    pub fn effective_output_dir(&self) -> PathBuf {
        if let Some(ref path) = self.output_dir {
            path.clone()
        } else {
            default_output_dir()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.sample_rate == 0 {
            return Some("sample_rate must be > 0".to_string());
        }
        if self.sample_rate > MAX_SAMPLE_RATE {
            return Some(format!(
                "sample_rate too high: {} (max {})",
                self.sample_rate, MAX_SAMPLE_RATE
            ));
        }

        if !self.max_duration_sec.is_finite() || self.max_duration_sec <= 0.0 {
            return Some(format!(
                "max_duration_sec must be positive, got {}",
                self.max_duration_sec
            ));
        }

        let limit = max_encodable_duration(self.sample_rate);
        if self.max_duration_sec > limit {
            return Some(format!(
                "max_duration_sec too high: {} (max {:.0} at {} Hz)",
                self.max_duration_sec, limit, self.sample_rate
            ));
        }

        None
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            max_duration_sec: DEFAULT_MAX_DURATION_SEC,
            output_dir: None,
        }
    }
}

/// Returns the platform-specific default output path.
///
/// Uses the `directories` crate to find appropriate locations:
/// - macOS: ~/Library/Caches/piano-daemon/clips
/// - Linux: ~/.cache/piano-daemon/clips
/// - Windows: C:\Users\<user>\AppData\Local\piano-daemon\cache\clips
fn default_output_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "piano-daemon") {
        proj_dirs.cache_dir().join("clips")
    } else {
        // Fallback to current directory
        PathBuf::from(".")
    }
}
