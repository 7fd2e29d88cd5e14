//! Song command implementation
//!
//! Renders a JSON song description to a WAV file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use pcmsynth_core::SongConfig;

use super::{deliver, synth_for, OutputTarget};

/// Renders a song and writes it according to `target`.
///
/// # Returns
/// Path of the written file
pub fn render(song: &SongConfig, target: &OutputTarget) -> Result<PathBuf> {
    song.validate()
        .with_context(|| format!("Invalid song: {}", song.name))?;

    let synth = synth_for(target, song.seed)?;
    let melody = song
        .melody(synth.table())
        .with_context(|| format!("Failed to parse notes of: {}", song.name))?;
    let instrument = song.instrument.build(synth.table());

    println!(
        "{} {} ({} events, {} BPM, {})",
        "Synthesizing:".cyan().bold(),
        melody.name(),
        melody.events().len(),
        melody.tempo_bpm(),
        instrument.describe()
    );

    let wav = synth
        .render_melody(&melody, &instrument, song.volume, song.gate)
        .with_context(|| format!("Failed to render: {}", song.name))?;
    deliver(&synth, &wav, &song.name, target, song.looping)
}

/// Run the song command
///
/// # Arguments
/// * `song_path` - Path to the song JSON file
/// * `target` - Output file and playback options
///
/// # Returns
/// Exit code: 0 success, 1 invalid input, 2 write or playback failure
pub fn run(song_path: &Path, target: &OutputTarget) -> Result<ExitCode> {
    println!("{} {}", "Loading song:".cyan().bold(), song_path.display());

    let song = SongConfig::from_file(song_path)
        .with_context(|| format!("Failed to load song: {}", song_path.display()))?;
    render(&song, target)?;

    Ok(ExitCode::SUCCESS)
}
