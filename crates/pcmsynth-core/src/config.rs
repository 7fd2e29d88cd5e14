//! JSON song descriptions.
//!
//! ```json
//! {
//!   "name": "DarkIsTheNight",
//!   "bpm": 144,
//!   "notes": "(A4_1/2, C5_1/4, B4_1/4)",
//!   "instrument": { "sample": "my_instrument.wav", "base_note": "C3" },
//!   "volume": 0.2,
//!   "gate": 0.95,
//!   "loop": true
//! }
//! ```
//!
//! `instrument` may also be a wave shape name such as `"square"`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::MelodyPlayback;
use crate::error::{SynthError, SynthResult};
use crate::instrument::Instrument;
use crate::melody::{validate_gate, Melody, MelodyParser};
use crate::note::NoteFrequencyTable;
use crate::sampler::SampledInstrument;
use crate::waveform::WaveShape;

fn default_base_note() -> String {
    "C3".to_string()
}

fn default_volume() -> f64 {
    1.0
}

fn default_gate() -> f64 {
    0.9
}

/// Instrument selection: a wave shape name or a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstrumentConfig {
    /// Parametric waveform.
    Shape(WaveShape),
    /// Recorded sample, pitch-shifted from `base_note`.
    Sample {
        sample: PathBuf,
        #[serde(default = "default_base_note")]
        base_note: String,
    },
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        InstrumentConfig::Shape(WaveShape::Sine)
    }
}

impl InstrumentConfig {
    /// Builds the instrument. A recording that fails to load becomes near silence.
    pub fn build(&self, table: &NoteFrequencyTable) -> Instrument {
        match self {
            InstrumentConfig::Shape(shape) => Instrument::Parametric(*shape),
            InstrumentConfig::Sample { sample, base_note } => {
                Instrument::Sampled(SampledInstrument::load(sample, base_note, table))
            }
        }
    }
}

/// A melody plus everything needed to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SongConfig {
    pub name: String,
    pub bpm: f64,
    pub notes: String,
    #[serde(default)]
    pub instrument: InstrumentConfig,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_gate")]
    pub gate: f64,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub seed: u32,
    /// Reject unknown note names instead of resting.
    #[serde(default)]
    pub strict: bool,
}

impl SongConfig {
    /// Parses and validates a song from JSON.
    pub fn from_json(json: &str) -> SynthResult<Self> {
        let song: SongConfig = serde_json::from_str(json)
            .map_err(|e| SynthError::invalid_param("song", e.to_string()))?;
        song.validate()?;
        Ok(song)
    }

    /// Reads a song file. Relative sample paths resolve against its directory.
    pub fn from_file(path: &Path) -> SynthResult<Self> {
        let json = fs::read_to_string(path)?;
        let mut song = Self::from_json(&json)?;
        if let Some(base) = path.parent() {
            song.resolve_paths(base);
        }
        Ok(song)
    }

    /// Makes a relative sample path relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if let InstrumentConfig::Sample { sample, .. } = &mut self.instrument {
            if sample.is_relative() {
                *sample = base.join(&*sample);
            }
        }
    }

    pub fn to_json_pretty(&self) -> SynthResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SynthError::invalid_param("song", e.to_string()))
    }

    /// Checks tempo, gate and volume.
    pub fn validate(&self) -> SynthResult<()> {
        if self.name.trim().is_empty() {
            return Err(SynthError::invalid_param("name", "must not be empty"));
        }
        if !(self.bpm.is_finite() && self.bpm > 0.0) {
            return Err(SynthError::invalid_param(
                "bpm",
                format!("must be a positive number, got {}", self.bpm),
            ));
        }
        if !self.volume.is_finite() {
            return Err(SynthError::invalid_param("volume", "must be a finite number"));
        }
        validate_gate(self.gate)
    }

    /// Parses the notes, strictly if the song asks for it.
    pub fn melody(&self, table: &NoteFrequencyTable) -> SynthResult<Melody> {
        let parser = MelodyParser::new(table).strict(self.strict);
        Melody::parse_with(self.name.clone(), &self.notes, self.bpm, &parser)
    }

    pub fn playback(&self) -> MelodyPlayback {
        MelodyPlayback {
            looping: self.looping,
            volume: self.volume,
            gate: self.gate,
        }
    }
}
