//! Inspect command implementation
//!
//! Decodes a WAV file and reports its format and sample statistics.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use pcmsynth_core::wav::{hash_pcm, read_wav_file, DecodedWav};
use pcmsynth_core::waveform::ZERO_CROSSING;
use serde_json::json;

/// Summary of a decoded file, after normalization to 8-bit mono.
#[derive(Debug, Clone, PartialEq)]
pub struct WavSummary {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub frames: usize,
    pub duration_seconds: f64,
    pub min: u8,
    pub max: u8,
    /// Largest distance from the zero crossing.
    pub peak: u8,
    /// BLAKE3 of the raw data chunk.
    pub pcm_hash: String,
}

/// Summarizes a decoded file.
pub fn summarize(decoded: &DecodedWav) -> WavSummary {
    let mono = decoded.to_pcm8_mono();
    let min = mono.iter().copied().min().unwrap_or(ZERO_CROSSING);
    let max = mono.iter().copied().max().unwrap_or(ZERO_CROSSING);
    let peak = mono
        .iter()
        .map(|&s| s.abs_diff(ZERO_CROSSING))
        .max()
        .unwrap_or(0);
    let frames = decoded.num_frames();
    let duration_seconds = if decoded.format.sample_rate == 0 {
        0.0
    } else {
        frames as f64 / decoded.format.sample_rate as f64
    };

    WavSummary {
        channels: decoded.format.channels,
        sample_rate: decoded.format.sample_rate,
        bits_per_sample: decoded.format.bits_per_sample,
        frames,
        duration_seconds,
        min,
        max,
        peak,
        pcm_hash: hash_pcm(&decoded.data),
    }
}

/// Run the inspect command
///
/// # Arguments
/// * `path` - WAV file to inspect
/// * `json` - Print machine-readable JSON
pub fn run(path: &Path, json: bool) -> Result<ExitCode> {
    let decoded = read_wav_file(path)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let summary = summarize(&decoded);

    if json {
        let value = json!({
            "path": path.display().to_string(),
            "channels": summary.channels,
            "sample_rate": summary.sample_rate,
            "bits_per_sample": summary.bits_per_sample,
            "frames": summary.frames,
            "duration_seconds": summary.duration_seconds,
            "min": summary.min,
            "max": summary.max,
            "peak": summary.peak,
            "pcm_hash": summary.pcm_hash,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Inspecting:".cyan().bold(), path.display());
    println!(
        "  {} {} Hz, {}-bit, {} channel(s)",
        "format".bold(),
        summary.sample_rate,
        summary.bits_per_sample,
        summary.channels
    );
    println!(
        "  {} {} frames ({:.3} s)",
        "length".bold(),
        summary.frames,
        summary.duration_seconds
    );
    println!(
        "  {} min {} / max {} / peak {} (8-bit mono)",
        "levels".bold(),
        summary.min,
        summary.max,
        summary.peak
    );
    println!("  {} {}", "hash".bold(), summary.pcm_hash.dimmed());

    Ok(ExitCode::SUCCESS)
}
