//! WAV format parameters.

use crate::waveform::SAMPLE_RATE;

/// Format fields of a `fmt ` chunk that the codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (8 or 16).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// 8-bit unsigned mono, the format every render is encoded in.
    pub fn pcm8_mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 8,
        }
    }

    /// 16-bit signed format with the given channel count.
    pub fn pcm16(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Bytes per sample per channel.
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::pcm8_mono(SAMPLE_RATE)
    }
}
