//! Renders a melody through an instrument into one buffer.

use rand_pcg::Pcg32;

use super::Melody;
use crate::error::{SynthError, SynthResult};
use crate::instrument::NoteRenderer;
use crate::waveform::silence;

/// Checks that a gate lies in (0, 1].
pub fn validate_gate(gate: f64) -> SynthResult<()> {
    if gate > 0.0 && gate <= 1.0 {
        Ok(())
    } else {
        Err(SynthError::invalid_param(
            "gate",
            format!("must be in (0, 1], got {}", gate),
        ))
    }
}

/// Sequences every event of `melody` into one contiguous PCM buffer.
///
/// Each event sounds for `duration * gate` and is followed by
/// `duration * (1 - gate)` of silence.
///
/// # Arguments
/// * `melody` - Parsed melody
/// * `instrument` - Renderer for the sounding part of each event
/// * `volume` - Linear volume, clamped to [0, 1]
/// * `gate` - Sounding fraction of each event, in (0, 1]
/// * `rng` - Deterministic RNG passed to the instrument
pub fn sequence<I: NoteRenderer + ?Sized>(
    melody: &Melody,
    instrument: &I,
    volume: f64,
    gate: f64,
    rng: &mut Pcg32,
) -> SynthResult<Vec<u8>> {
    validate_gate(gate)?;

    let mut pcm = Vec::new();
    for event in melody.events() {
        let active_ms = event.duration_ms * gate;
        let gap_ms = event.duration_ms * (1.0 - gate);

        pcm.extend(instrument.render_note(event.frequency_hz, active_ms, volume, rng));
        pcm.extend(silence(gap_ms));
    }

    Ok(pcm)
}
