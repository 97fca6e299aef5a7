//! Generation module.
//!
//! Composes a sample source with the WAV encoder behind a single
//! `generate_audio_file` operation.

pub mod service;

pub use service::AudioService;
