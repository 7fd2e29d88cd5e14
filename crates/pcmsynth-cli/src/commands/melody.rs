//! Melody command implementation
//!
//! Renders melody text given on the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use pcmsynth_core::{InstrumentConfig, SongConfig};

use super::{song, OutputTarget};

/// Melody options gathered from the command line.
#[derive(Debug, Clone)]
pub struct MelodyArgs {
    pub notes: String,
    pub name: String,
    pub bpm: f64,
    pub instrument: InstrumentConfig,
    pub volume: f64,
    pub gate: f64,
    pub looping: bool,
    pub strict: bool,
    pub seed: u32,
}

impl MelodyArgs {
    /// The equivalent song description.
    pub fn to_song(&self) -> SongConfig {
        SongConfig {
            name: self.name.clone(),
            bpm: self.bpm,
            notes: self.notes.clone(),
            instrument: self.instrument.clone(),
            volume: self.volume,
            gate: self.gate,
            looping: self.looping,
            seed: self.seed,
            strict: self.strict,
        }
    }
}

/// Renders the melody and returns the written path.
pub fn render(args: &MelodyArgs, target: &OutputTarget) -> Result<PathBuf> {
    song::render(&args.to_song(), target)
}

/// Run the melody command
///
/// # Returns
/// Exit code: 0 success, 1 invalid input, 2 write or playback failure
pub fn run(args: &MelodyArgs, target: &OutputTarget) -> Result<ExitCode> {
    render(args, target)?;
    Ok(ExitCode::SUCCESS)
}
