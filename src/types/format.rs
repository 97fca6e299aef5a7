//! AudioFormatParams type describing the fixed PCM layout.
//!
//! Every clip is written as interleaved stereo, 16-bit signed linear PCM.
//! Only the sample rate is configurable.

use serde::{Deserialize, Serialize};

/// Default output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Number of interleaved audio channels (stereo).
pub const CHANNELS: u16 = 2;

/// Bits per sample for signed 16-bit PCM.
pub const BITS_PER_SAMPLE: u16 = 16;

/// WAVE format tag for uncompressed linear PCM.
pub const PCM_FORMAT_TAG: u16 = 1;

/// Bytes occupied by one sample in the payload.
pub const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;

/// Format parameters written into every WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormatParams {
    /// Samples per second, per channel.
    pub sample_rate: u32,

    /// Interleaved channel count. Always 2.
    pub channels: u16,

    /// Bits per sample. Always 16.
    pub bits_per_sample: u16,

    /// Encoding tag. Always 1 (linear PCM).
    pub format_tag: u16,
}

impl AudioFormatParams {
    /// Creates format parameters for the given sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: CHANNELS,
            bits_per_sample: BITS_PER_SAMPLE,
            format_tag: PCM_FORMAT_TAG,
        }
    }

    /// Bytes per frame (one sample for every channel).
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio, or None if it does not fit in a u32.
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate.checked_mul(u32::from(self.block_align()))
    }
}

impl Default for AudioFormatParams {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cd_quality_stereo() {
        let format = AudioFormatParams::default();
        assert_eq!(format.sample_rate, 44100);
        assert_eq!(format.channels, 2);
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.format_tag, 1);
    }

    #[test]
    fn derived_rates() {
        let format = AudioFormatParams::new(44100);
        assert_eq!(format.block_align(), 4);
        assert_eq!(format.byte_rate(), Some(176_400));
    }

    #[test]
    fn byte_rate_overflow_is_none() {
        let format = AudioFormatParams::new(u32::MAX);
        assert_eq!(format.byte_rate(), None);
    }
}
