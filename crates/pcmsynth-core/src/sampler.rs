//! Recorded-sample instrument and nearest-neighbor resampler.
//!
//! A recording is normalized to 8-bit unsigned mono on load and pitch-shifted
//! by re-reading it at `target / base` speed with zero-order hold. There is no
//! interpolation between source samples, so pitches far above the base note
//! alias and skip audibly. That is an accepted trade-off of this renderer.

use std::path::Path;

use log::{debug, warn};

use crate::error::{SynthError, SynthResult};
use crate::note::{NoteFrequencyTable, DEFAULT_SAMPLE_BASE_FREQUENCY};
use crate::waveform::{clamp_volume, sample_count, ZERO_CROSSING};
use crate::wav::read_wav_file;

/// Length of the near-silent buffer substituted for a recording that failed to load.
pub const FALLBACK_SAMPLE_LEN: usize = 1000;

/// A recording plus the pitch it was captured at.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledInstrument {
    pcm: Vec<u8>,
    base_frequency: f64,
}

impl SampledInstrument {
    /// Wraps already normalized 8-bit mono samples.
    ///
    /// # Errors
    /// Returns [`SynthError::InvalidParameter`] if `pcm` is empty or the base
    /// frequency is not a positive finite number.
    pub fn new(pcm: Vec<u8>, base_frequency: f64) -> SynthResult<Self> {
        if pcm.is_empty() {
            return Err(SynthError::invalid_param("pcm", "sample data is empty"));
        }
        if !(base_frequency.is_finite() && base_frequency > 0.0) {
            return Err(SynthError::invalid_param(
                "base_frequency",
                format!("must be a positive frequency, got {}", base_frequency),
            ));
        }
        Ok(Self {
            pcm,
            base_frequency,
        })
    }

    /// The near-silent stand-in used when a recording cannot be loaded.
    pub fn fallback(base_frequency: f64) -> Self {
        Self {
            pcm: vec![ZERO_CROSSING; FALLBACK_SAMPLE_LEN],
            base_frequency: sanitize_base(base_frequency),
        }
    }

    /// Loads a recording, substituting [`SampledInstrument::fallback`] on failure.
    ///
    /// The failure is logged as a warning and never propagated.
    pub fn load(path: &Path, base_note: &str, table: &NoteFrequencyTable) -> Self {
        match Self::try_load(path, base_note, table) {
            Ok(instrument) => instrument,
            Err(e) => {
                warn!("{}; using {} samples of silence instead", e, FALLBACK_SAMPLE_LEN);
                Self::fallback(base_frequency_for(base_note, table))
            }
        }
    }

    /// Loads a recording, reporting failures as [`SynthError::SampleLoad`].
    ///
    /// # Arguments
    /// * `path` - WAV file with 8- or 16-bit PCM, mono or stereo
    /// * `base_note` - Note the recording was captured at; unknown names
    ///   fall back to C3 (130.81 Hz)
    /// * `table` - Note lookup table
    pub fn try_load(path: &Path, base_note: &str, table: &NoteFrequencyTable) -> SynthResult<Self> {
        let decoded = read_wav_file(path).map_err(|e| SynthError::sample_load(path, e.to_string()))?;
        let pcm = decoded.to_pcm8_mono();
        if pcm.is_empty() {
            return Err(SynthError::sample_load(path, "recording contains no samples"));
        }

        let base_frequency = base_frequency_for(base_note, table);
        debug!(
            "loaded {} ({} samples, {}-bit, {} channel(s), base {:.2} Hz)",
            path.display(),
            pcm.len(),
            decoded.format.bits_per_sample,
            decoded.format.channels,
            base_frequency
        );

        Ok(Self {
            pcm,
            base_frequency,
        })
    }

    /// Normalized 8-bit mono samples.
    pub fn pcm(&self) -> &[u8] {
        &self.pcm
    }

    /// Pitch the recording was captured at, in Hz.
    pub fn base_frequency(&self) -> f64 {
        self.base_frequency
    }

    /// Pitch-shifts the recording to `target_frequency_hz`.
    ///
    /// The source loops when the requested duration outlasts it. Volume is
    /// clamped to [0, 1] and applied around the zero crossing; scaled values
    /// are truncated, not rounded.
    pub fn render(&self, target_frequency_hz: f64, duration_ms: f64, volume: f64) -> Vec<u8> {
        let num_samples = sample_count(duration_ms);
        if target_frequency_hz == 0.0 {
            return vec![ZERO_CROSSING; num_samples];
        }

        let volume = clamp_volume(volume);
        let step = target_frequency_hz / self.base_frequency;
        let len = self.pcm.len();
        let mut cursor = 0.0_f64;
        let mut out = Vec::with_capacity(num_samples);

        for _ in 0..num_samples {
            let index = (cursor.floor() as usize) % len;
            let centered = self.pcm[index] as f64 - ZERO_CROSSING as f64;
            out.push((centered * volume + ZERO_CROSSING as f64).floor().clamp(0.0, 255.0) as u8);
            cursor += step;
        }

        out
    }
}

fn sanitize_base(base_frequency: f64) -> f64 {
    if base_frequency.is_finite() && base_frequency > 0.0 {
        base_frequency
    } else {
        DEFAULT_SAMPLE_BASE_FREQUENCY
    }
}

/// Resolves a base note, treating unknown names and the rest token as C3.
fn base_frequency_for(base_note: &str, table: &NoteFrequencyTable) -> f64 {
    sanitize_base(table.frequency_or(base_note, DEFAULT_SAMPLE_BASE_FREQUENCY))
}
