//! Sample sources.
//!
//! A [`SampleSource`] turns a set of tone frequencies and a duration into
//! interleaved stereo 16-bit samples. The dispatcher only sees the trait, so
//! sources can be swapped without touching the encoder.

pub mod harmonic;
pub mod silence;

pub use harmonic::HarmonicSynth;
pub use silence::SilenceSource;

use crate::audio::MAX_DATA_LEN;
use crate::error::{DaemonError, Result};
use crate::types::{SampleBuffer, BYTES_PER_SAMPLE, CHANNELS};

/// Default upper bound on clip length in seconds.
pub const DEFAULT_MAX_DURATION_SEC: f64 = 60.0;

/// Produces interleaved stereo samples for a set of tones.
///
/// Implementations report every failure as `SYNTHESIS_ERROR` and must be
/// shareable across threads.
pub trait SampleSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Renders `frequencies` (Hz) for `duration_sec` seconds.
    fn synthesize(&self, frequencies: &[f64], duration_sec: f64) -> Result<SampleBuffer>;
}

/// Validates a synthesis request and returns the number of frames to render.
///
/// Frequencies must be positive and below Nyquist; the duration must be
/// positive, at most `max_duration_sec`, and short enough for the stereo
/// payload to fit in a WAV file.
pub fn frame_count(
    frequencies: &[f64],
    duration_sec: f64,
    sample_rate: u32,
    max_duration_sec: f64,
) -> Result<usize> {
    if sample_rate == 0 {
        return Err(DaemonError::synthesis("sample rate must be positive"));
    }

    if !duration_sec.is_finite() || duration_sec <= 0.0 {
        return Err(DaemonError::synthesis(format!(
            "duration must be positive, got {}",
            duration_sec
        )));
    }

    if duration_sec > max_duration_sec {
        return Err(DaemonError::synthesis(format!(
            "duration {}s exceeds maximum of {}s",
            duration_sec, max_duration_sec
        )));
    }

    let nyquist = f64::from(sample_rate) / 2.0;
    for &freq in frequencies {
        if !freq.is_finite() || freq <= 0.0 || freq >= nyquist {
            return Err(DaemonError::synthesis(format!(
                "frequency {} Hz is outside (0, {}) Hz",
                freq, nyquist
            )));
        }
    }

    let frames = (f64::from(sample_rate) * duration_sec) as usize;
    frames
        .checked_mul(CHANNELS as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_SAMPLE as usize))
        .filter(|&n| n <= MAX_DATA_LEN)
        .ok_or_else(|| {
            DaemonError::synthesis(format!(
                "duration {}s at {} Hz exceeds the 4 GiB WAV limit",
                duration_sec, sample_rate
            ))
        })?;

    Ok(frames)
}
