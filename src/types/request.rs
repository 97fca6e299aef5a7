//! AudioRequest and GeneratedClip, the dispatcher's request/response pair.
//!
//! Clips are identified by a deterministic clip_id computed from the request
//! and sample rate, so identical requests always map to the same identifier.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{DaemonError, Result};

use super::buffer::ContainerImage;

/// Maximum number of simultaneous tones in one request (one per piano key).
pub const MAX_FREQUENCIES: usize = 88;

/// A request to render a set of tones into a WAV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioRequest {
    /// Tone frequencies in Hz. Empty renders silence.
    pub frequencies: Vec<f64>,

    /// Clip length in seconds.
    #[serde(alias = "duration")]
    pub duration_sec: f64,
}

impl AudioRequest {
    /// Creates a new request.
    pub fn new(frequencies: Vec<f64>, duration_sec: f64) -> Self {
        Self {
            frequencies,
            duration_sec,
        }
    }

    /// Checks the request shape before it reaches the sample source.
    ///
    /// Range checks that depend on the sample rate belong to the source.
    pub fn validate(&self) -> Result<()> {
        if self.frequencies.len() > MAX_FREQUENCIES {
            return Err(DaemonError::synthesis(format!(
                "too many frequencies: {} (maximum {})",
                self.frequencies.len(),
                MAX_FREQUENCIES
            )));
        }

        if let Some(f) = self.frequencies.iter().find(|f| !f.is_finite()) {
            return Err(DaemonError::synthesis(format!(
                "frequency must be a finite number, got {}",
                f
            )));
        }

        if !self.duration_sec.is_finite() || self.duration_sec <= 0.0 {
            return Err(DaemonError::synthesis(format!(
                "duration must be a positive number of seconds, got {}",
                self.duration_sec
            )));
        }

        Ok(())
    }
}

/// A successfully rendered clip.
#[derive(Debug, Clone)]
pub struct GeneratedClip {
    /// 16 hex characters derived from the request and sample rate.
    pub clip_id: String,

    /// The complete WAV file.
    pub image: ContainerImage,

    /// Number of stereo frames in the payload.
    pub frames: usize,

    /// Actual audio length in seconds.
    pub duration_sec: f32,

    /// Sample rate written into the header.
    pub sample_rate: u32,

    /// Channel count written into the header.
    pub channels: u16,
}

/// Computes a deterministic clip ID from request parameters.
///
/// The clip ID is the first 16 hex characters of the SHA256 hash of:
/// `{f1,f2,...}:{duration_sec}:{sample_rate}`
pub fn compute_clip_id(frequencies: &[f64], duration_sec: f64, sample_rate: u32) -> String {
    let freqs = frequencies
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let input = format!("{}:{}:{}", freqs, duration_sec, sample_rate);
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..8])
}
