//! Command implementations for the pcmsynth CLI.

pub mod demo;
pub mod inspect;
pub mod melody;
pub mod note;
pub mod song;
pub mod table;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use pcmsynth_core::playback::{CommandPlayer, PlaybackOptions, PlaybackService};
use pcmsynth_core::wav::WavResult;
use pcmsynth_core::{Synth, SynthError, SynthOptions};

/// Where a rendered file goes.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    /// Explicit output file. When unset a uniquely named file is created in `out_dir`.
    pub output: Option<PathBuf>,
    /// Directory for uniquely named files.
    pub out_dir: PathBuf,
    /// Play the file after writing it.
    pub play: bool,
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self {
            output: None,
            out_dir: PathBuf::from("."),
            play: false,
        }
    }
}

impl OutputTarget {
    /// Writes to an explicit path without playing.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(path.into()),
            ..Self::default()
        }
    }
}

/// Builds an engine whose hand-off directory is the target's output directory.
///
/// `--play` goes through this engine's [`CommandPlayer`].
pub(crate) fn synth_for(target: &OutputTarget, seed: u32) -> Result<Synth> {
    synth_with_player(target, seed, Arc::new(CommandPlayer::new()))
}

pub(crate) fn synth_with_player(
    target: &OutputTarget,
    seed: u32,
    player: Arc<dyn PlaybackService>,
) -> Result<Synth> {
    let options = SynthOptions {
        handoff_dir: Some(target.out_dir.clone()),
        seed,
    };
    Synth::new(options, player)
        .with_context(|| format!("Failed to prepare output directory: {}", target.out_dir.display()))
}

/// Writes an encoded render and optionally plays it to completion.
///
/// # Returns
/// Path of the written file
pub(crate) fn deliver(
    synth: &Synth,
    wav: &WavResult,
    stem: &str,
    target: &OutputTarget,
    looping: bool,
) -> Result<PathBuf> {
    let path = match &target.output {
        Some(path) => {
            wav.write_to(path)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            path.clone()
        }
        None => synth
            .handoff()
            .write(stem, &wav.wav_data)
            .context("Failed to write render")?,
    };

    println!(
        "{} {} ({:.2} s, {} samples)",
        "Wrote".green().bold(),
        path.display(),
        wav.duration_seconds(),
        wav.num_samples
    );

    if target.play {
        play_blocking(synth, &path, looping)?;
    }

    Ok(path)
}

/// Plays a file and waits; a looping file plays until the player is interrupted.
pub(crate) fn play_blocking(synth: &Synth, path: &Path, looping: bool) -> Result<()> {
    println!(
        "{} {}{}",
        "Playing:".cyan().bold(),
        path.display(),
        if looping { " (looping, Ctrl-C to stop)" } else { "" }
    );
    let options = PlaybackOptions {
        asynchronous: false,
        looping,
    };
    synth
        .play_file_with(path, options)
        .with_context(|| format!("Failed to play: {}", path.display()))
}

/// Maps a command failure to a process exit status.
///
/// Invalid input exits with 1; failures while writing or playing exit with 2.
pub fn exit_status_for(err: &anyhow::Error) -> u8 {
    let synth_error = err.chain().find_map(|cause| cause.downcast_ref::<SynthError>());
    match synth_error {
        Some(SynthError::Io(_)) | Some(SynthError::Playback { .. }) => 2,
        _ => 1,
    }
}

/// [`exit_status_for`] as an [`ExitCode`].
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status_for(err))
}
