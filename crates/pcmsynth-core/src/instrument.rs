//! Instruments: anything that can render one note to PCM.

use rand_pcg::Pcg32;

use crate::sampler::SampledInstrument;
use crate::waveform::{render_waveform, WaveShape};

/// Common capability of every instrument.
pub trait NoteRenderer {
    /// Renders one note.
    ///
    /// # Arguments
    /// * `frequency_hz` - Pitch; 0 renders silence
    /// * `duration_ms` - Duration in milliseconds
    /// * `volume` - Linear volume, clamped to [0, 1]
    /// * `rng` - Deterministic RNG for any randomness
    ///
    /// # Returns
    /// `sample_count(duration_ms)` 8-bit unsigned samples
    fn render_note(&self, frequency_hz: f64, duration_ms: f64, volume: f64, rng: &mut Pcg32) -> Vec<u8>;
}

impl NoteRenderer for WaveShape {
    fn render_note(&self, frequency_hz: f64, duration_ms: f64, volume: f64, rng: &mut Pcg32) -> Vec<u8> {
        render_waveform(frequency_hz, duration_ms, *self, volume, rng)
    }
}

impl NoteRenderer for SampledInstrument {
    fn render_note(&self, frequency_hz: f64, duration_ms: f64, volume: f64, _rng: &mut Pcg32) -> Vec<u8> {
        self.render(frequency_hz, duration_ms, volume)
    }
}

/// A parametric waveform or a pitch-shifted recording.
#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    /// Formula-generated tone.
    Parametric(WaveShape),
    /// Resampled recording.
    Sampled(SampledInstrument),
}

impl Instrument {
    /// Short description for status output.
    pub fn describe(&self) -> String {
        match self {
            Instrument::Parametric(shape) => shape.to_string(),
            Instrument::Sampled(sample) => format!(
                "sample ({} samples @ {:.2} Hz)",
                sample.pcm().len(),
                sample.base_frequency()
            ),
        }
    }
}

impl NoteRenderer for Instrument {
    fn render_note(&self, frequency_hz: f64, duration_ms: f64, volume: f64, rng: &mut Pcg32) -> Vec<u8> {
        match self {
            Instrument::Parametric(shape) => shape.render_note(frequency_hz, duration_ms, volume, rng),
            Instrument::Sampled(sample) => sample.render_note(frequency_hz, duration_ms, volume, rng),
        }
    }
}

impl From<WaveShape> for Instrument {
    fn from(shape: WaveShape) -> Self {
        Instrument::Parametric(shape)
    }
}

impl From<SampledInstrument> for Instrument {
    fn from(sample: SampledInstrument) -> Self {
        Instrument::Sampled(sample)
    }
}
