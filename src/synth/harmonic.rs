//! Additive piano-like synthesizer.
//!
//! Each tone is a fundamental plus four overtones, shaped by an ADSR
//! envelope and a soft clipper, then quantized to 16 bits. The mono mix is
//! written to both channels.

use std::f64::consts::PI;

use tracing::debug;

use crate::error::Result;
use crate::types::{SampleBuffer, CHANNELS, SAMPLE_RATE};

use super::{frame_count, SampleSource, DEFAULT_MAX_DURATION_SEC};

/// Relative amplitudes of harmonics 1 through 5.
const HARMONICS: [f64; 5] = [0.6, 0.2, 0.12, 0.06, 0.03];

const SUSTAIN_LEVEL: f64 = 0.85;

/// Clips longer than this many seconds get a volume boost.
const LONG_NOTE_SEC: f64 = 2.0;
const LONG_NOTE_BOOST: f64 = 1.2;

const SOFT_CLIP_KNEE: f64 = 0.8;
const SOFT_CLIP_SLOPE: f64 = 0.3;
const OUTPUT_GAIN: f64 = 0.9;

const FULL_SCALE: f64 = 32767.0;

/// Attack/decay/sustain/release envelope scaled to the clip length.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Envelope {
    attack: f64,
    decay: f64,
    release: f64,
    duration: f64,
}

impl Envelope {
    fn for_duration(duration: f64) -> Self {
        Self {
            attack: (duration * 0.02).min(0.03),
            decay: (duration * 0.06).min(0.10),
            release: (duration * 0.15).min(0.3),
            duration,
        }
    }

    fn level(&self, t: f64) -> f64 {
        let sustain_start = self.attack + self.decay;
        let release_start = self.duration - self.release;

        let level = if t < self.attack {
            t / self.attack
        } else if t < sustain_start {
            1.0 - (t - self.attack) / self.decay * (1.0 - SUSTAIN_LEVEL)
        } else if t < release_start {
            SUSTAIN_LEVEL
        } else {
            SUSTAIN_LEVEL * (1.0 - (t - release_start) / self.release)
        };

        if self.duration > LONG_NOTE_SEC {
            level * LONG_NOTE_BOOST
        } else {
            level
        }
    }
}

/// Compresses everything beyond the knee, then applies output gain.
fn soft_clip(x: f64) -> f64 {
    let clipped = if x > SOFT_CLIP_KNEE {
        SOFT_CLIP_KNEE + (x - SOFT_CLIP_KNEE) * SOFT_CLIP_SLOPE
    } else if x < -SOFT_CLIP_KNEE {
        -SOFT_CLIP_KNEE + (x + SOFT_CLIP_KNEE) * SOFT_CLIP_SLOPE
    } else {
        x
    };
    clipped * OUTPUT_GAIN
}

/// Scales to 16-bit range, clamping symmetrically and truncating toward zero.
fn quantize(x: f64) -> i16 {
    let scaled = x * FULL_SCALE;
    if scaled > FULL_SCALE {
        i16::MAX
    } else if scaled < -FULL_SCALE {
        -i16::MAX
    } else {
        scaled as i16
    }
}

/// Default sample source: harmonic tones under an ADSR envelope.
#[derive(Debug, Clone)]
pub struct HarmonicSynth {
    sample_rate: u32,
    max_duration_sec: f64,
}

impl HarmonicSynth {
    /// Creates a synthesizer rendering at `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            max_duration_sec: DEFAULT_MAX_DURATION_SEC,
        }
    }

    /// Overrides the maximum accepted clip length.
    pub fn with_max_duration(mut self, max_duration_sec: f64) -> Self {
        self.max_duration_sec = max_duration_sec;
        self
    }

    fn mix(&self, frequencies: &[f64], t: f64) -> f64 {
        if frequencies.is_empty() {
            return 0.0;
        }

        let sum: f64 = frequencies
            .iter()
            .map(|&freq| {
                let phase = 2.0 * PI * freq * t;
                HARMONICS
                    .iter()
                    .enumerate()
                    .map(|(i, amp)| (phase * (i + 1) as f64).sin() * amp)
                    .sum::<f64>()
            })
            .sum();

        sum / (frequencies.len() as f64).sqrt()
    }
}

impl Default for HarmonicSynth {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}

impl SampleSource for HarmonicSynth {
    fn name(&self) -> &'static str {
        "harmonic"
    }

    fn synthesize(&self, frequencies: &[f64], duration_sec: f64) -> Result<SampleBuffer> {
        let frames = frame_count(
            frequencies,
            duration_sec,
            self.sample_rate,
            self.max_duration_sec,
        )?;

        debug!(
            frames,
            tones = frequencies.len(),
            sample_rate = self.sample_rate,
            "rendering harmonic tones"
        );

        let envelope = Envelope::for_duration(duration_sec);
        let dt = 1.0 / f64::from(self.sample_rate);
        let mut samples = Vec::with_capacity(frames * CHANNELS as usize);

        for i in 0..frames {
            let t = i as f64 * dt;
            let value = quantize(soft_clip(self.mix(frequencies, t) * envelope.level(t)));
            // Same value on left and right
            samples.push(value);
            samples.push(value);
        }

        Ok(SampleBuffer::new(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn output_is_interleaved_stereo() {
        let synth = HarmonicSynth::new(8000);
        let buffer = synth.synthesize(&[440.0], 0.5).unwrap();
        assert_eq!(buffer.len(), 4000 * 2);
        assert_eq!(buffer.declared_len(), buffer.len());
        for frame in buffer.samples().chunks_exact(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn empty_frequency_set_is_silence() {
        let synth = HarmonicSynth::new(8000);
        let buffer = synth.synthesize(&[], 0.25).unwrap();
        assert_eq!(buffer.len(), 2000 * 2);
        assert!(buffer.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn tone_is_audible_and_bounded() {
        let synth = HarmonicSynth::default();
        let buffer = synth.synthesize(&[261.63, 329.63, 392.0], 1.0).unwrap();
        let peak = buffer.samples().iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak > 1000);
        assert!(buffer.samples().iter().all(|&s| s >= -32767));
    }

    #[test]
    fn first_sample_starts_at_zero() {
        let synth = HarmonicSynth::default();
        let buffer = synth.synthesize(&[440.0], 0.5).unwrap();
        assert_eq!(buffer.samples()[0], 0);
        assert_eq!(buffer.samples()[1], 0);
    }

    #[test]
    fn synthesis_is_deterministic() {
        let synth = HarmonicSynth::new(22050);
        let a = synth.synthesize(&[440.0, 880.0], 0.3).unwrap();
        let b = synth.synthesize(&[440.0, 880.0], 0.3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_long_durations() {
        let synth = HarmonicSynth::new(8000).with_max_duration(1.0);
        let err = synth.synthesize(&[440.0], 1.5).unwrap_err();
        assert_eq!(err.code, ErrorCode::SynthesisError);
    }

    #[test]
    fn rejects_duration_beyond_wav_limit_without_panicking() {
        let synth = HarmonicSynth::new(44100).with_max_duration(1e30);
        let err = synth.synthesize(&[440.0], 1e20).unwrap_err();
        assert_eq!(err.code, ErrorCode::SynthesisError);
    }

    #[test]
    fn rejects_frequency_above_nyquist() {
        let synth = HarmonicSynth::new(8000);
        let err = synth.synthesize(&[5000.0], 0.1).unwrap_err();
        assert_eq!(err.code, ErrorCode::SynthesisError);
    }

    #[test]
    fn envelope_shape() {
        let env = Envelope::for_duration(1.0);
        assert_eq!(env.level(0.0), 0.0);
        assert!((env.level(0.02) - 1.0).abs() < 1e-9);
        assert!((env.level(0.5) - SUSTAIN_LEVEL).abs() < 1e-9);
        assert!(env.level(0.999) < 0.01);
    }

    #[test]
    fn envelope_boosts_long_notes() {
        let env = Envelope::for_duration(3.0);
        assert!((env.level(1.5) - SUSTAIN_LEVEL * LONG_NOTE_BOOST).abs() < 1e-9);
    }

    #[test]
    fn soft_clip_compresses_peaks() {
        assert!((soft_clip(0.5) - 0.45).abs() < 1e-9);
        assert!((soft_clip(1.0) - (0.8 + 0.2 * 0.3) * 0.9).abs() < 1e-9);
        assert!((soft_clip(-1.0) + (0.8 + 0.2 * 0.3) * 0.9).abs() < 1e-9);
    }

    #[test]
    fn quantize_clamps_symmetrically() {
        assert_eq!(quantize(2.0), 32767);
        assert_eq!(quantize(-2.0), -32767);
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(0.5), 16383);
        assert_eq!(quantize(-0.5), -16383);
    }
}
