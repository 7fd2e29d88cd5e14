//! Encoded render result.

use std::path::Path;

use super::format::WavFormat;
use super::pcm::hash_pcm;
use super::writer::{write_atomic, write_wav_to_vec};
use crate::error::SynthResult;

/// An encoded 8-bit mono render.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes 8-bit unsigned mono samples.
    pub fn from_pcm8(pcm: &[u8], sample_rate: u32) -> SynthResult<Self> {
        let format = WavFormat::pcm8_mono(sample_rate);
        let wav_data = write_wav_to_vec(&format, pcm)?;

        Ok(Self {
            wav_data,
            pcm_hash: hash_pcm(pcm),
            sample_rate,
            num_samples: pcm.len(),
        })
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Writes the encoded bytes to `path` all-or-nothing.
    pub fn write_to(&self, path: &Path) -> SynthResult<()> {
        write_atomic(path, &self.wav_data)
    }
}
