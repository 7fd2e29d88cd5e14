//! pcmsynth CLI - render and play 8-bit melodies
//!
//! This binary provides commands for rendering tones, melodies and song
//! files to WAV, and for inspecting the results.

mod cli_args;

use std::process::ExitCode;

use clap::Parser;
use cli_args::{Cli, Commands};
use pcmsynth_cli::commands::{self, melody::MelodyArgs};
use pcmsynth_cli::logging;
use pcmsynth_core::InstrumentConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", colored::Colorize::yellow("warning"), e);
    }

    let result = match cli.command {
        Commands::Note {
            note,
            duration,
            shape,
            volume,
            seed,
            output,
        } => commands::note::run(&note, duration, shape, volume, seed, &output.target()),
        Commands::Melody {
            notes,
            bpm,
            name,
            shape,
            sample,
            base_note,
            volume,
            gate,
            looping,
            strict,
            seed,
            output,
        } => {
            let instrument = match sample {
                Some(sample) => InstrumentConfig::Sample { sample, base_note },
                None => InstrumentConfig::Shape(shape),
            };
            let args = MelodyArgs {
                notes,
                name,
                bpm,
                instrument,
                volume,
                gate,
                looping,
                strict,
                seed,
            };
            commands::melody::run(&args, &output.target())
        }
        Commands::Song { file, output } => commands::song::run(&file, &output.target()),
        Commands::Inspect { file, json } => commands::inspect::run(&file, json),
        Commands::Table { json } => commands::table::run(json),
        Commands::Demo { dir, play } => commands::demo::run(&dir, play),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            commands::exit_code_for(&e)
        }
    }
}
