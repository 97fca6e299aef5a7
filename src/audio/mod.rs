//! Audio output module.
//!
//! Provides WAV encoding of synthesized PCM samples.

pub mod wav;

// Re-export commonly used items
pub use wav::{
    decode, encode, max_encodable_duration, samples_to_duration, write_wav, DecodedWav,
    HEADER_LEN, MAX_DATA_LEN,
};
