//! RIFF chunk walker and decoder.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use super::format::WavFormat;
use crate::error::{SynthError, SynthResult};
use crate::waveform::ZERO_CROSSING;

/// Audio format tag for uncompressed PCM.
const FORMAT_PCM: u16 = 1;

/// Minimum size of a PCM `fmt ` chunk body.
const FMT_CHUNK_LEN: usize = 16;

/// A decoded WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWav {
    /// Format declared by the `fmt ` chunk.
    pub format: WavFormat,
    /// Raw sample bytes from the `data` chunk, interleaved if stereo.
    pub data: Vec<u8>,
}

impl DecodedWav {
    /// Number of sample frames.
    pub fn num_frames(&self) -> usize {
        let align = self.format.block_align() as usize;
        if align == 0 {
            0
        } else {
            self.data.len() / align
        }
    }

    /// Converts the samples to 8-bit unsigned mono.
    ///
    /// 8-bit data is passed through, 16-bit signed samples are rescaled with
    /// `(s / 32768) * 127 + 128` truncated, and stereo frames are averaged.
    pub fn to_pcm8_mono(&self) -> Vec<u8> {
        match (self.format.bits_per_sample, self.format.channels) {
            (8, 1) => self.data.clone(),
            (8, _) => self
                .data
                .chunks_exact(2)
                .map(|frame| ((frame[0] as u16 + frame[1] as u16 + 1) / 2) as u8)
                .collect(),
            (_, 1) => self
                .data
                .chunks_exact(2)
                .map(|s| pcm16_to_pcm8(i16::from_le_bytes([s[0], s[1]]) as f64))
                .collect(),
            _ => self
                .data
                .chunks_exact(4)
                .map(|frame| {
                    let left = i16::from_le_bytes([frame[0], frame[1]]) as f64;
                    let right = i16::from_le_bytes([frame[2], frame[3]]) as f64;
                    pcm16_to_pcm8((left + right) / 2.0)
                })
                .collect(),
        }
    }
}

/// Truncates rather than rounds, so full scale 32767 lands on 254.
fn pcm16_to_pcm8(sample: f64) -> u8 {
    ((sample / 32768.0) * 127.0 + ZERO_CROSSING as f64)
        .floor()
        .clamp(0.0, 255.0) as u8
}

/// Borrowed views of the chunks the decoder cares about.
pub(crate) struct Chunks<'a> {
    pub(crate) fmt: Option<&'a [u8]>,
    pub(crate) data: Option<&'a [u8]>,
}

fn truncated(what: &str) -> SynthError {
    SynthError::malformed_wav(format!("truncated {}", what))
}

/// Walks the RIFF chunk list and returns the `fmt ` and `data` bodies.
///
/// Unknown chunks (`LIST`, `fact`, ...) are skipped. A chunk whose declared
/// size runs past the end of the buffer is rejected.
pub(crate) fn locate_chunks(bytes: &[u8]) -> SynthResult<Chunks<'_>> {
    if bytes.len() < 12 {
        return Err(truncated("RIFF header"));
    }
    if &bytes[0..4] != b"RIFF" {
        return Err(SynthError::malformed_wav("missing RIFF magic"));
    }
    if &bytes[8..12] != b"WAVE" {
        return Err(SynthError::malformed_wav("missing WAVE form type"));
    }

    let mut chunks = Chunks {
        fmt: None,
        data: None,
    };
    let mut pos = 12;

    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let mut size_field = &bytes[pos + 4..pos + 8];
        let size = size_field.read_u32::<LittleEndian>()? as usize;

        let body_start = pos + 8;
        let remaining = bytes.len() - body_start;
        if size > remaining {
            return Err(SynthError::malformed_wav(format!(
                "chunk '{}' declares {} bytes but only {} remain",
                String::from_utf8_lossy(id),
                size,
                remaining
            )));
        }
        let body = &bytes[body_start..body_start + size];

        match id {
            b"fmt " if chunks.fmt.is_none() => chunks.fmt = Some(body),
            b"data" if chunks.data.is_none() => chunks.data = Some(body),
            _ => {}
        }

        // Chunks are word aligned
        pos = body_start + size + (size % 2);
    }

    Ok(chunks)
}

fn parse_format(body: &[u8]) -> SynthResult<WavFormat> {
    if body.len() < FMT_CHUNK_LEN {
        return Err(truncated("fmt chunk"));
    }

    let mut cursor = Cursor::new(body);
    let audio_format = cursor.read_u16::<LittleEndian>()?;
    let channels = cursor.read_u16::<LittleEndian>()?;
    let sample_rate = cursor.read_u32::<LittleEndian>()?;
    let _byte_rate = cursor.read_u32::<LittleEndian>()?;
    let _block_align = cursor.read_u16::<LittleEndian>()?;
    let bits_per_sample = cursor.read_u16::<LittleEndian>()?;

    if audio_format != FORMAT_PCM {
        return Err(SynthError::unsupported(format!(
            "audio format {} (only uncompressed PCM is supported)",
            audio_format
        )));
    }
    if bits_per_sample != 8 && bits_per_sample != 16 {
        return Err(SynthError::unsupported(format!(
            "{} bits per sample (expected 8 or 16)",
            bits_per_sample
        )));
    }
    if channels != 1 && channels != 2 {
        return Err(SynthError::unsupported(format!(
            "{} channels (expected 1 or 2)",
            channels
        )));
    }

    Ok(WavFormat {
        channels,
        sample_rate,
        bits_per_sample,
    })
}

/// Decodes a WAV file from memory.
///
/// # Errors
/// * [`SynthError::MalformedWav`] for bad magic, truncated headers, missing
///   chunks or a data chunk that overruns the file.
/// * [`SynthError::UnsupportedFormat`] for anything other than 8/16-bit PCM
///   with one or two channels.
pub fn read_wav(bytes: &[u8]) -> SynthResult<DecodedWav> {
    let chunks = locate_chunks(bytes)?;
    let fmt = chunks
        .fmt
        .ok_or_else(|| SynthError::malformed_wav("no fmt chunk"))?;
    let format = parse_format(fmt)?;
    let data = chunks
        .data
        .ok_or_else(|| SynthError::malformed_wav("no data chunk"))?;

    let align = format.block_align() as usize;
    if data.len() % align != 0 {
        return Err(SynthError::malformed_wav(format!(
            "data size {} is not a multiple of the {}-byte frame",
            data.len(),
            align
        )));
    }

    Ok(DecodedWav {
        format,
        data: data.to_vec(),
    })
}

/// Reads and decodes a WAV file from disk.
pub fn read_wav_file(path: &Path) -> SynthResult<DecodedWav> {
    let bytes = fs::read(path)?;
    read_wav(&bytes)
}
