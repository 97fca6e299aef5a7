//! SampleBuffer and ContainerImage, the input and output of the encoder.

/// Interleaved signed 16-bit samples produced by a sample source.
///
/// Alongside the samples the buffer keeps the sample count its producer
/// *declared*. The encoder refuses buffers where the two disagree, which
/// lets untrusted sources be detected instead of silently truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    declared_len: usize,
}

impl SampleBuffer {
    /// Wraps samples whose declared length is their actual length.
    pub fn new(samples: Vec<i16>) -> Self {
        let declared_len = samples.len();
        Self {
            samples,
            declared_len,
        }
    }

    /// Wraps samples together with the length reported by their producer.
    pub fn with_declared_len(samples: Vec<i16>, declared_len: usize) -> Self {
        Self {
            samples,
            declared_len,
        }
    }

    /// Returns the samples in interleaved order.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of samples actually held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples the producer claimed to deliver.
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Number of complete frames for the given channel count.
    pub fn frames(&self, channels: u16) -> usize {
        if channels == 0 {
            0
        } else {
            self.samples.len() / channels as usize
        }
    }

    /// Consumes the buffer, returning the raw samples.
    pub fn into_inner(self) -> Vec<i16> {
        self.samples
    }
}

impl From<Vec<i16>> for SampleBuffer {
    fn from(samples: Vec<i16>) -> Self {
        Self::new(samples)
    }
}

/// A complete WAV file image: 44-byte header followed by the PCM payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerImage {
    bytes: Vec<u8>,
}

impl ContainerImage {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the file bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total file length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for images produced by the encoder.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the image, handing ownership of the bytes to the caller.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for ContainerImage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_declares_actual_length() {
        let buffer = SampleBuffer::new(vec![1, 2, 3, 4]);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.declared_len(), 4);
        assert_eq!(buffer.frames(2), 2);
    }

    #[test]
    fn declared_length_is_kept_verbatim() {
        let buffer = SampleBuffer::with_declared_len(vec![1, 2], 6);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.declared_len(), 6);
    }

    #[test]
    fn frames_ignores_trailing_partial_frame() {
        let buffer = SampleBuffer::from(vec![0i16; 5]);
        assert_eq!(buffer.frames(2), 2);
        assert_eq!(buffer.frames(0), 0);
    }

    #[test]
    fn empty_buffer() {
        let buffer = SampleBuffer::from(Vec::new());
        assert!(buffer.is_empty());
        assert_eq!(buffer.into_inner(), Vec::<i16>::new());
    }
}
