//! Core types for the piano-daemon.
//!
//! This module re-exports all the core data types used throughout the daemon:
//! - [`SampleBuffer`]: Interleaved 16-bit samples handed to the encoder
//! - [`ContainerImage`]: A finished WAV file image
//! - [`AudioFormatParams`]: The fixed PCM layout plus sample rate
//! - [`AudioRequest`] / [`GeneratedClip`]: Dispatcher request and response

mod buffer;
mod format;
mod request;

// Re-export all types at the module level
pub use buffer::{ContainerImage, SampleBuffer};
pub use format::{
    AudioFormatParams, BITS_PER_SAMPLE, BYTES_PER_SAMPLE, CHANNELS, PCM_FORMAT_TAG, SAMPLE_RATE,
};
pub use request::{compute_clip_id, AudioRequest, GeneratedClip, MAX_FREQUENCIES};
