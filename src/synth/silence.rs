//! Silent sample source.

use crate::error::Result;
use crate::types::{SampleBuffer, CHANNELS, SAMPLE_RATE};

use super::{frame_count, SampleSource, DEFAULT_MAX_DURATION_SEC};

/// Renders zero-valued stereo frames for the requested duration.
///
/// Frequencies are validated but otherwise ignored.
#[derive(Debug, Clone)]
pub struct SilenceSource {
    sample_rate: u32,
    max_duration_sec: f64,
}

impl SilenceSource {
    /// Creates a silent source rendering at `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            max_duration_sec: DEFAULT_MAX_DURATION_SEC,
        }
    }
}

impl Default for SilenceSource {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}

impl SampleSource for SilenceSource {
    fn name(&self) -> &'static str {
        "silence"
    }

    fn synthesize(&self, frequencies: &[f64], duration_sec: f64) -> Result<SampleBuffer> {
        let frames = frame_count(
            frequencies,
            duration_sec,
            self.sample_rate,
            self.max_duration_sec,
        )?;
        Ok(SampleBuffer::new(vec![0; frames * CHANNELS as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_zeroed_frames() {
        let buffer = SilenceSource::new(1000).synthesize(&[440.0], 0.5).unwrap();
        assert_eq!(buffer.len(), 1000);
        assert!(buffer.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn still_validates_duration() {
        assert!(SilenceSource::default().synthesize(&[], -1.0).is_err());
    }
}
