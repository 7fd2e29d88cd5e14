//! CLI argument definitions for the pcmsynth command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pcmsynth_cli::commands::OutputTarget;
use pcmsynth_core::WaveShape;

/// pcmsynth - 8-bit melody synthesizer
#[derive(Parser)]
#[command(name = "pcmsynth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output options shared by the render commands.
#[derive(Args, Debug, Clone)]
pub(crate) struct OutputArgs {
    /// Output WAV file (default: a uniquely named file in --out-dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for uniquely named output files
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Play the result with SoX `play` after writing it
    #[arg(long)]
    pub play: bool,
}

impl OutputArgs {
    pub fn target(&self) -> OutputTarget {
        OutputTarget {
            output: self.output.clone(),
            out_dir: self.out_dir.clone(),
            play: self.play,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a single tone
    Note {
        /// Note name, e.g. A4 or C#3
        note: String,

        /// Duration in milliseconds
        #[arg(short, long, default_value_t = 500.0)]
        duration: f64,

        /// Wave shape (sine, square, triangle, sawtooth, noise)
        #[arg(short, long, default_value = "sine")]
        shape: WaveShape,

        /// Volume in [0, 1]
        #[arg(long, default_value_t = 1.0)]
        volume: f64,

        /// Seed for the noise shape
        #[arg(long, default_value_t = 0)]
        seed: u32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render melody text such as "(C4_1/4, E4_1/4, G4_1/2)"
    Melody {
        /// Melody text
        notes: String,

        /// Tempo in beats per minute
        #[arg(short, long, default_value_t = 120.0)]
        bpm: f64,

        /// Melody name, used for output file names
        #[arg(short, long, default_value = "melody")]
        name: String,

        /// Wave shape (ignored with --sample)
        #[arg(short, long, default_value = "sine")]
        shape: WaveShape,

        /// Recorded WAV file to pitch-shift instead of a wave shape
        #[arg(long)]
        sample: Option<PathBuf>,

        /// Note the recording was captured at
        #[arg(long, default_value = "C3", requires = "sample")]
        base_note: String,

        /// Volume in [0, 1]
        #[arg(long, default_value_t = 1.0)]
        volume: f64,

        /// Sounding fraction of each note, in (0, 1]
        #[arg(short, long, default_value_t = 0.9)]
        gate: f64,

        /// Loop playback until interrupted (with --play)
        #[arg(long = "loop")]
        looping: bool,

        /// Reject unknown note names instead of resting
        #[arg(long)]
        strict: bool,

        /// Seed for the noise shape
        #[arg(long, default_value_t = 0)]
        seed: u32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render a JSON song file
    Song {
        /// Path to the song JSON file
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the format and levels of a WAV file
    Inspect {
        /// Path to the WAV file
        file: PathBuf,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the note frequency table
    Table {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Write and render the "Dark is the Night" demo
    Demo {
        /// Directory for the generated files
        #[arg(long, default_value = "pcmsynth-demo")]
        dir: PathBuf,

        /// Loop the song until interrupted
        #[arg(long)]
        play: bool,
    },
}
