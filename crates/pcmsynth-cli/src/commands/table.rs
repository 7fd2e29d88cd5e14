//! Table command implementation
//!
//! Prints the note frequency table.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use pcmsynth_core::note::REST;
use pcmsynth_core::NoteFrequencyTable;
use serde_json::{Map, Value};

/// Builds the JSON form of the table, in ascending pitch order.
pub fn table_json(table: &NoteFrequencyTable) -> Value {
    let entries = table
        .iter()
        .map(|(name, frequency)| {
            let mut entry = Map::new();
            entry.insert("note".to_string(), Value::from(name));
            entry.insert("frequency_hz".to_string(), Value::from(frequency));
            Value::Object(entry)
        })
        .collect();
    Value::Array(entries)
}

/// Run the table command
///
/// # Arguments
/// * `json` - Print machine-readable JSON instead of a text table
pub fn run(json: bool) -> Result<ExitCode> {
    let table = NoteFrequencyTable::new();

    if json {
        let text = serde_json::to_string_pretty(&table_json(&table))
            .context("Failed to serialize note table")?;
        println!("{}", text);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Note frequencies (A4 = 440 Hz)".cyan().bold());
    for (name, frequency) in table.iter() {
        if name == REST {
            println!("  {:<4} {}", name.bold(), "rest".dimmed());
        } else {
            println!("  {:<4} {:>9.3} Hz", name.bold(), frequency);
        }
    }

    Ok(ExitCode::SUCCESS)
}
