//! Note command implementation
//!
//! Renders a single tone to a WAV file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use log::warn;
use pcmsynth_core::WaveShape;

use super::{deliver, synth_for, OutputTarget};

/// Run the note command
///
/// # Arguments
/// * `note` - Note name such as `A4` or `C#3`
/// * `duration_ms` - Tone length in milliseconds
/// * `shape` - Wave shape
/// * `volume` - Linear volume, clamped to [0, 1]
/// * `seed` - Seed for the noise shape
/// * `target` - Output file and playback options
///
/// # Returns
/// Path of the written file
pub fn render(
    note: &str,
    duration_ms: f64,
    shape: WaveShape,
    volume: f64,
    seed: u32,
    target: &OutputTarget,
) -> Result<PathBuf> {
    println!(
        "{} {} ({} ms, {}, volume {})",
        "Rendering note:".cyan().bold(),
        note,
        duration_ms,
        shape,
        volume
    );

    let synth = synth_for(target, seed)?;
    if !synth.table().contains(note) {
        warn!("unknown note '{}' renders as silence", note);
    }

    let wav = synth
        .render_note(note, duration_ms, shape, volume)
        .with_context(|| format!("Failed to render note: {}", note))?;
    deliver(&synth, &wav, note, target, false)
}

/// Run the note command
///
/// # Returns
/// Exit code: 0 success, 1 invalid input, 2 write or playback failure
pub fn run(
    note: &str,
    duration_ms: f64,
    shape: WaveShape,
    volume: f64,
    seed: u32,
    target: &OutputTarget,
) -> Result<ExitCode> {
    render(note, duration_ms, shape, volume, seed, target)?;
    Ok(ExitCode::SUCCESS)
}
