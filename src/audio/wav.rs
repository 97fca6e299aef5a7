//! WAV container encoder.
//!
//! Serializes interleaved 16-bit samples into a canonical RIFF/WAVE image:
//! a 44-byte header (`RIFF`, `fmt ` and `data` chunk headers) followed by
//! the raw little-endian payload. Reading back goes through the hound crate.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::{DaemonError, ErrorCode, Result};
use crate::types::{
    AudioFormatParams, ContainerImage, SampleBuffer, BITS_PER_SAMPLE, BYTES_PER_SAMPLE, CHANNELS,
    PCM_FORMAT_TAG,
};

/// Length of the canonical WAV header in bytes.
pub const HEADER_LEN: usize = 44;

/// Size of the PCM `fmt ` chunk body.
const FMT_CHUNK_LEN: u32 = 16;

/// Header bytes counted by the RIFF size field (everything after offset 8).
const RIFF_OVERHEAD: u32 = (HEADER_LEN - 8) as u32;

/// Largest payload the 32-bit RIFF size field can describe.
pub const MAX_DATA_LEN: usize = (u32::MAX - RIFF_OVERHEAD) as usize;

/// Longest clip, in seconds, whose stereo payload still fits in a WAV file.
pub fn max_encodable_duration(sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    let frame_len = CHANNELS as usize * BYTES_PER_SAMPLE as usize;
    (MAX_DATA_LEN / frame_len) as f64 / f64::from(sample_rate)
}

/// Encodes interleaved stereo samples into a complete WAV file image.
///
/// Channels, bit depth and format tag are fixed (2, 16, PCM). All header
/// integers are little-endian regardless of host byte order.
///
/// # Errors
///
/// * `INVALID_FORMAT_PARAMS` if `sample_rate` is zero or the image would
///   not fit the 32-bit RIFF size fields.
/// * `ENCODING_CONSISTENCY_ERROR` if the buffer's declared length differs
///   from the samples it holds.
///
/// # Example
///
/// ```ignore
/// use piano_daemon::audio::encode;
/// use piano_daemon::types::SampleBuffer;
///
/// let image = encode(&SampleBuffer::new(vec![0, 32767, -32768, 100]), 44100)?;
/// assert_eq!(image.len(), 52);
/// ```
pub fn encode(samples: &SampleBuffer, sample_rate: u32) -> Result<ContainerImage> {
    if sample_rate == 0 {
        return Err(DaemonError::invalid_format(
            "sample rate must be positive, got 0",
        ));
    }

    let format = AudioFormatParams::new(sample_rate);
    let byte_rate = format.byte_rate().ok_or_else(|| {
        DaemonError::invalid_format(format!(
            "byte rate for sample rate {} overflows 32 bits",
            sample_rate
        ))
    })?;

    if samples.declared_len() != samples.len() {
        return Err(DaemonError::encoding_consistency(
            samples.declared_len(),
            samples.len(),
            "sample count",
        ));
    }

    let data_size = samples
        .len()
        .checked_mul(BYTES_PER_SAMPLE as usize)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n as usize <= MAX_DATA_LEN)
        .ok_or_else(|| {
            DaemonError::invalid_format(format!(
                "{} samples exceed the 4 GiB RIFF limit",
                samples.len()
            ))
        })?;

    let expected_len = HEADER_LEN + data_size as usize;
    let mut out = Vec::with_capacity(expected_len);

    // RIFF chunk
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(RIFF_OVERHEAD + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&format.block_align().to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    for sample in samples.samples() {
        out.extend_from_slice(&sample.to_le_bytes());
    }

    if out.len() != expected_len {
        return Err(DaemonError::encoding_consistency(
            expected_len,
            out.len(),
            "encoded byte count",
        ));
    }

    Ok(ContainerImage::from_bytes(out))
}

/// A WAV image read back into its format and samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWav {
    /// Format parameters parsed from the `fmt ` chunk.
    pub format: AudioFormatParams,
    /// Interleaved samples from the `data` chunk, in file order.
    pub samples: Vec<i16>,
}

/// Decodes a 16-bit PCM WAV image.
///
/// Used to verify freshly written files. Anything that is not 16-bit
/// integer PCM is reported as an encoding consistency error.
pub fn decode(bytes: &[u8]) -> Result<DecodedWav> {
    let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| {
        DaemonError::with_source(
            ErrorCode::EncodingConsistencyError,
            format!("Failed to read WAV image: {}", e),
            e,
        )
    })?;

    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(DaemonError::new(
            ErrorCode::EncodingConsistencyError,
            format!(
                "Expected 16-bit integer PCM, found {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            ),
        ));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| {
            DaemonError::with_source(
                ErrorCode::EncodingConsistencyError,
                format!("Failed to read sample: {}", e),
                e,
            )
        })?;

    Ok(DecodedWav {
        format: AudioFormatParams {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            format_tag: PCM_FORMAT_TAG,
        },
        samples,
    })
}

/// Writes a finished WAV image to disk.
pub fn write_wav(image: &ContainerImage, path: &Path) -> Result<()> {
    std::fs::write(path, image.as_bytes())
        .map_err(|e| DaemonError::output_write_failed(path.display().to_string(), e))
}

/// Calculates the duration in seconds of interleaved samples.
pub fn samples_to_duration(sample_count: usize, channels: u16, sample_rate: u32) -> f32 {
    if sample_rate == 0 || channels == 0 {
        return 0.0;
    }
    sample_count as f32 / channels as f32 / sample_rate as f32
}
