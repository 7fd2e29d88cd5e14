//! Demo command implementation
//!
//! Writes a reference instrument recording, a song file that uses it, and
//! the rendered arrangement of "Dark is the Night".

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use pcmsynth_core::{write_reference_tone, InstrumentConfig, SongConfig};

use super::{song, OutputTarget};

/// Melody name, also used for output file names.
pub const DEMO_NAME: &str = "DarkIsTheNight";

/// File name of the generated instrument recording.
pub const DEMO_INSTRUMENT: &str = "my_instrument.wav";

/// Arrangement of "Dark is the Night".
pub const DARK_IS_THE_NIGHT: &str = "(A4_1/2, C5_1/4, B4_1/4, A4_1/1, p_1/4, \
     F4_1/4, G4_1/4, A4_1/3, G4_1/3, F4_1/3, F4_1/4, E4_1/3, D#4_1/3, E4_1/2, p_1/2, \
     D4_1/4, E4_1/4, F4_1/3, E4_1/3, D4_1/3, A4_1/2, E4_1/4, D4_1/4, C4_1/2, p_1/2, \
     B3_1/4, C4_1/4, D4_1/2, C4_1/4, B3_1/4, B3_1/2, A3_1/1, p_1/2)";

/// The demo song: the recording pitched from C3, quiet, nearly legato, looping.
pub fn demo_song() -> SongConfig {
    SongConfig {
        name: DEMO_NAME.to_string(),
        bpm: 144.0,
        notes: DARK_IS_THE_NIGHT.to_string(),
        instrument: InstrumentConfig::Sample {
            sample: PathBuf::from(DEMO_INSTRUMENT),
            base_note: "C3".to_string(),
        },
        volume: 0.2,
        gate: 0.95,
        looping: true,
        seed: 0,
        strict: true,
    }
}

/// Writes the demo files into `dir` and renders the song.
///
/// # Returns
/// Path of the rendered song
pub fn render(dir: &Path, play: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let instrument_path = dir.join(DEMO_INSTRUMENT);
    write_reference_tone(&instrument_path)
        .with_context(|| format!("Failed to write: {}", instrument_path.display()))?;
    println!("{} {}", "Instrument:".cyan().bold(), instrument_path.display());

    let song_path = dir.join(format!("{}.json", DEMO_NAME));
    let mut song = demo_song();
    fs::write(&song_path, song.to_json_pretty()?)
        .with_context(|| format!("Failed to write: {}", song_path.display()))?;
    println!("{} {}", "Song:".cyan().bold(), song_path.display());

    song.resolve_paths(dir);
    let target = OutputTarget {
        output: Some(dir.join(format!("{}.wav", DEMO_NAME))),
        out_dir: dir.to_path_buf(),
        play,
    };
    song::render(&song, &target)
}

/// Run the demo command
///
/// # Arguments
/// * `dir` - Directory for the generated files
/// * `play` - Loop the rendered song until interrupted
pub fn run(dir: &Path, play: bool) -> Result<ExitCode> {
    render(dir, play)?;
    Ok(ExitCode::SUCCESS)
}
