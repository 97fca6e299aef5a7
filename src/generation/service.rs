//! Request dispatcher.
//!
//! Validates a request, runs the injected sample source, and hands its
//! output to the WAV encoder. Either a complete clip or an error comes
//! back, never a partial image.

use tracing::{debug, info};

use crate::audio::{encode, samples_to_duration};
use crate::config::DaemonConfig;
use crate::error::{DaemonError, ErrorCode, Result};
use crate::synth::{HarmonicSynth, SampleSource};
use crate::types::{compute_clip_id, AudioFormatParams, AudioRequest, GeneratedClip};

/// Renders audio requests into WAV images.
///
/// Holds no per-request state, so one instance can serve concurrent
/// callers behind an `Arc`.
pub struct AudioService {
    source: Box<dyn SampleSource>,
    format: AudioFormatParams,
}

impl AudioService {
    /// Creates a service around an explicit sample source.
    pub fn new(source: Box<dyn SampleSource>, format: AudioFormatParams) -> Self {
        Self { source, format }
    }

    /// Creates a service with the default harmonic synthesizer.
    pub fn from_config(config: &DaemonConfig) -> Result<Self> {
        if let Some(reason) = config.validate() {
            return Err(DaemonError::invalid_config(reason));
        }

        let synth =
            HarmonicSynth::new(config.sample_rate).with_max_duration(config.max_duration_sec);
        Ok(Self::new(Box::new(synth), config.format()))
    }

    /// Returns the format written into every header.
    pub fn format(&self) -> &AudioFormatParams {
        &self.format
    }

    /// Returns the name of the configured sample source.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Synthesizes and encodes one clip.
    ///
    /// Source failures are surfaced as `SYNTHESIS_ERROR`; encoder failures
    /// keep their own code.
    pub fn generate_audio_file(&self, request: &AudioRequest) -> Result<GeneratedClip> {
        request.validate()?;

        let clip_id = compute_clip_id(
            &request.frequencies,
            request.duration_sec,
            self.format.sample_rate,
        );
        debug!(
            %clip_id,
            source = self.source.name(),
            tones = request.frequencies.len(),
            duration_sec = request.duration_sec,
            "synthesizing clip"
        );

        let samples = self
            .source
            .synthesize(&request.frequencies, request.duration_sec)
            .map_err(into_synthesis_error)?;

        let frames = samples.frames(self.format.channels);
        let sample_count = samples.len();
        let image = encode(&samples, self.format.sample_rate)?;

        info!(%clip_id, frames, bytes = image.len(), "clip encoded");

        Ok(GeneratedClip {
            clip_id,
            image,
            frames,
            duration_sec: samples_to_duration(
                sample_count,
                self.format.channels,
                self.format.sample_rate,
            ),
            sample_rate: self.format.sample_rate,
            channels: self.format.channels,
        })
    }
}

/// Wraps any non-synthesis error coming out of a source.
fn into_synthesis_error(err: DaemonError) -> DaemonError {
    if err.code == ErrorCode::SynthesisError {
        err
    } else {
        let message = format!("Sample source failed: {}", err.message);
        DaemonError::with_source(ErrorCode::SynthesisError, message, err)
    }
}
