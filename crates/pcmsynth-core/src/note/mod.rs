//! Note name to frequency lookup.
//!
//! The table is built once with equal-tempered tuning anchored at A1 = 55 Hz,
//! which puts A4 at exactly 440 Hz. It is immutable after construction and is
//! meant to be shared (e.g. behind an `Arc`) by every component that resolves
//! note names.

use std::collections::HashMap;

use crate::error::{SynthError, SynthResult};


/// Semitone names within one octave, starting at C.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Reserved token for a pause. Resolves to 0 Hz.
pub const REST: &str = "p";

/// Frequency of the anchor note (A in octave 1).
pub const ANCHOR_FREQUENCY: f64 = 55.0;

/// Absolute semitone index of the anchor note (`octave * 12 + semitone`).
pub const ANCHOR_SEMITONE: i32 = 12 + 9;

/// Lowest octave in the table.
pub const MIN_OCTAVE: i32 = 1;

/// Highest octave in the table.
pub const MAX_OCTAVE: i32 = 7;

/// Base frequency assumed for a recording whose base note is not recognized (C3).
pub const DEFAULT_SAMPLE_BASE_FREQUENCY: f64 = 130.81;

/// Computes the equal-tempered frequency of a semitone in an octave.
///
/// # Arguments
/// * `octave` - Octave number
/// * `semitone` - Index into [`NOTE_NAMES`] (0 = C, 9 = A)
///
/// # Examples
/// ```
/// use pcmsynth_core::note::equal_tempered;
///
/// assert_eq!(equal_tempered(4, 9), 440.0);
/// assert_eq!(equal_tempered(1, 9), 55.0);
/// ```
pub fn equal_tempered(octave: i32, semitone: usize) -> f64 {
    let distance = (octave * 12 + semitone as i32) - ANCHOR_SEMITONE;
    ANCHOR_FREQUENCY * 2.0_f64.powf(distance as f64 / 12.0)
}

/// Immutable mapping from note names ("A4", "C#3", "p") to frequencies in Hz.
#[derive(Debug, Clone)]
pub struct NoteFrequencyTable {
    /// Entries in ascending pitch order, rest token last.
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl NoteFrequencyTable {
    /// Builds the table for octaves 1 through 7 plus the rest token.
    pub fn new() -> Self {
        let capacity = (MAX_OCTAVE - MIN_OCTAVE + 1) as usize * NOTE_NAMES.len() + 1;
        let mut entries = Vec::with_capacity(capacity);

        for octave in MIN_OCTAVE..=MAX_OCTAVE {
            for (semitone, name) in NOTE_NAMES.iter().enumerate() {
                entries.push((format!("{}{}", name, octave), equal_tempered(octave, semitone)));
            }
        }
        entries.push((REST.to_string(), 0.0));

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();

        Self { entries, index }
    }

    /// Strict lookup.
    ///
    /// # Errors
    /// Returns [`SynthError::UnknownNote`] if the name is not in the table.
    pub fn frequency(&self, name: &str) -> SynthResult<f64> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].1)
            .ok_or_else(|| SynthError::unknown_note(name))
    }

    /// Lookup that resolves unknown names to `default`.
    pub fn frequency_or(&self, name: &str, default: f64) -> f64 {
        self.frequency(name).unwrap_or(default)
    }

    /// Returns true if the name resolves.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of entries, including the rest token.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in ascending pitch order; the rest token comes last.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, freq)| (name.as_str(), *freq))
    }
}

impl Default for NoteFrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
