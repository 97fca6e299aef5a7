//! piano-daemon: renders tone frequencies into playable WAV files.
//!
//! A [`synth::SampleSource`] turns a frequency set and duration into
//! interleaved stereo 16-bit samples; [`audio::encode`] wraps them in a
//! canonical 44-byte RIFF/WAVE header. [`generation::AudioService`] composes
//! the two behind one request/response operation, served over JSON-RPC by
//! the [`rpc`] module.
//!
//! # Modules
//!
//! - [`audio`]: WAV container encoding and read-back
//! - [`synth`]: Sample sources (harmonic synthesizer, silence)
//! - [`generation`]: Request dispatcher
//! - [`types`]: Core data types (SampleBuffer, ContainerImage, AudioRequest)
//! - [`config`]: Runtime configuration (DaemonConfig)
//! - [`error`]: Error types and codes (DaemonError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use piano_daemon::{AudioRequest, AudioService, DaemonConfig};
//!
//! let service = AudioService::from_config(&DaemonConfig::default())?;
//! let clip = service.generate_audio_file(&AudioRequest::new(vec![440.0, 554.37], 1.5))?;
//! std::fs::write("chord.wav", clip.image.as_bytes())?;
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod rpc;
pub mod synth;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use audio::encode;
pub use config::DaemonConfig;
pub use error::{DaemonError, ErrorCode, Result};
pub use generation::AudioService;
pub use synth::{HarmonicSynth, SampleSource};
pub use types::{AudioFormatParams, AudioRequest, ContainerImage, GeneratedClip, SampleBuffer};
