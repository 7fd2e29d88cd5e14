//! Melodies: parsing the note grammar and sequencing events into PCM.
//!
//! A melody is written as `(NOTE_NUM/DEN, NOTE_NUM/DEN, ...)`, where each
//! duration is a fraction of a whole note. At tempo `bpm` one quarter note
//! lasts `60000 / bpm` milliseconds.
//!
//! ```
//! use pcmsynth_core::melody::Melody;
//! use pcmsynth_core::note::NoteFrequencyTable;
//!
//! let table = NoteFrequencyTable::new();
//! let melody = Melody::parse("intro", "(A4_1/2, p_1/4)", 60.0, &table).unwrap();
//! assert_eq!(melody.events().len(), 2);
//! assert_eq!(melody.events()[0].duration_ms, 2000.0);
//! assert_eq!(melody.events()[1].frequency_hz, 0.0);
//! ```

mod parser;
mod sequencer;


pub use parser::{duration_ms, MelodyParser};
pub use sequencer::{sequence, validate_gate};

use crate::error::SynthResult;
use crate::note::NoteFrequencyTable;

/// One note or rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyEvent {
    /// Pitch in Hz; 0 is a rest.
    pub frequency_hz: f64,
    /// Nominal duration in milliseconds.
    pub duration_ms: f64,
}

impl MelodyEvent {
    /// Returns true for a rest.
    pub fn is_rest(&self) -> bool {
        self.frequency_hz == 0.0
    }
}

/// A named, parsed note sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Melody {
    name: String,
    tempo_bpm: f64,
    events: Vec<MelodyEvent>,
}

impl Melody {
    /// Creates a melody from already parsed events.
    pub fn new(name: impl Into<String>, tempo_bpm: f64, events: Vec<MelodyEvent>) -> Self {
        Self {
            name: name.into(),
            tempo_bpm,
            events,
        }
    }

    /// Parses `notes` leniently: unknown note names become rests.
    pub fn parse(
        name: impl Into<String>,
        notes: &str,
        tempo_bpm: f64,
        table: &NoteFrequencyTable,
    ) -> SynthResult<Self> {
        Self::parse_with(name, notes, tempo_bpm, &MelodyParser::new(table))
    }

    /// Parses `notes` with a configured parser.
    pub fn parse_with(
        name: impl Into<String>,
        notes: &str,
        tempo_bpm: f64,
        parser: &MelodyParser<'_>,
    ) -> SynthResult<Self> {
        let events = parser.parse(notes, tempo_bpm)?;
        Ok(Self::new(name, tempo_bpm, events))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tempo_bpm(&self) -> f64 {
        self.tempo_bpm
    }

    pub fn events(&self) -> &[MelodyEvent] {
        &self.events
    }

    /// Sum of all nominal event durations.
    pub fn total_duration_ms(&self) -> f64 {
        self.events.iter().map(|e| e.duration_ms).sum()
    }
}
