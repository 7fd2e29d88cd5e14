//! Melody grammar parser.

use log::trace;

use super::MelodyEvent;
use crate::error::{SynthError, SynthResult};
use crate::note::NoteFrequencyTable;

/// Converts a whole-note fraction to milliseconds at `tempo_bpm`.
///
/// ```
/// use pcmsynth_core::melody::duration_ms;
///
/// // A quarter note at 120 BPM
/// assert_eq!(duration_ms(1.0, 4.0, 120.0), 500.0);
/// ```
pub fn duration_ms(num: f64, den: f64, tempo_bpm: f64) -> f64 {
    (num / den) * (60_000.0 / tempo_bpm) * 4.0
}

/// Compiles melody text into events.
#[derive(Debug, Clone, Copy)]
pub struct MelodyParser<'a> {
    table: &'a NoteFrequencyTable,
    strict: bool,
}

impl<'a> MelodyParser<'a> {
    /// Creates a lenient parser that maps unknown note names to rests.
    pub fn new(table: &'a NoteFrequencyTable) -> Self {
        Self {
            table,
            strict: false,
        }
    }

    /// With `strict`, unknown note names fail with [`SynthError::UnknownNote`].
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parses `text` at `tempo_bpm`.
    ///
    /// All whitespace and parentheses are ignored. Tokens without a `_` are
    /// skipped.
    ///
    /// # Errors
    /// * [`SynthError::InvalidParameter`] if the tempo is not positive
    /// * [`SynthError::MalformedDuration`] for an unparsable fraction, a zero
    ///   denominator, a negative duration or one that overflows to infinity
    /// * [`SynthError::UnknownNote`] in strict mode
    pub fn parse(&self, text: &str, tempo_bpm: f64) -> SynthResult<Vec<MelodyEvent>> {
        if !(tempo_bpm.is_finite() && tempo_bpm > 0.0) {
            return Err(SynthError::invalid_param(
                "tempo_bpm",
                format!("must be a positive number, got {}", tempo_bpm),
            ));
        }

        let cleaned: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
            .collect();

        let mut events = Vec::new();
        for token in cleaned.split(',') {
            let Some((note, fraction)) = token.split_once('_') else {
                if !token.is_empty() {
                    trace!("skipping melody token '{}'", token);
                }
                continue;
            };

            let (num, den) = parse_fraction(token, fraction)?;
            let duration_ms = duration_ms(num, den, tempo_bpm);
            if !duration_ms.is_finite() {
                return Err(SynthError::malformed_duration(token, "duration is not finite"));
            }
            let frequency_hz = self.resolve(note)?;
            events.push(MelodyEvent {
                frequency_hz,
                duration_ms,
            });
        }

        Ok(events)
    }

    fn resolve(&self, note: &str) -> SynthResult<f64> {
        match self.table.frequency(note) {
            Ok(freq) => Ok(freq),
            Err(e) if self.strict => Err(e),
            Err(_) => {
                trace!("unknown note '{}' treated as a rest", note);
                Ok(0.0)
            }
        }
    }
}

fn parse_fraction(token: &str, fraction: &str) -> SynthResult<(f64, f64)> {
    let (num, den) = fraction
        .split_once('/')
        .ok_or_else(|| SynthError::malformed_duration(token, "expected NUM/DEN"))?;

    let parse = |part: &str, what: &str| -> SynthResult<f64> {
        part.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SynthError::malformed_duration(token, format!("invalid {} '{}'", what, part)))
    };
    let num = parse(num, "numerator")?;
    let den = parse(den, "denominator")?;

    if den == 0.0 {
        return Err(SynthError::malformed_duration(token, "zero denominator"));
    }
    if num / den < 0.0 {
        return Err(SynthError::malformed_duration(token, "negative duration"));
    }

    Ok((num, den))
}
