//! Canonical 44-byte header writer.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::format::WavFormat;
use crate::error::{SynthError, SynthResult};

/// Length of the canonical header preceding the sample bytes.
pub const HEADER_LEN: usize = 44;

/// Builds the canonical RIFF/WAVE header for `data_len` bytes of samples.
///
/// # Errors
/// Returns [`SynthError::InvalidParameter`] if the data does not fit the
/// 32-bit size fields.
pub fn wav_header(format: &WavFormat, data_len: usize) -> SynthResult<[u8; HEADER_LEN]> {
    let data_size = u32::try_from(data_len)
        .ok()
        .filter(|size| *size <= u32::MAX - 36)
        .ok_or_else(|| {
            SynthError::invalid_param("pcm_data", format!("{} bytes exceed the WAV size limit", data_len))
        })?;
    let riff_size = 36 + data_size; // File size minus the RIFF id and size fields

    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    Ok(header)
}

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw sample bytes
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> SynthResult<()> {
    let header = wav_header(format, pcm_data.len())?;
    writer.write_all(&header)?;
    writer.write_all(pcm_data)?;
    Ok(())
}

/// Encodes a WAV file into a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> SynthResult<Vec<u8>> {
    let header = wav_header(format, pcm_data.len())?;
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    buffer.extend_from_slice(&header);
    buffer.extend_from_slice(pcm_data);
    Ok(buffer)
}

/// Writes a WAV file to `path` atomically.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `path`, so a failed write never leaves a partial file.
pub fn write_wav_file(path: &Path, format: &WavFormat, pcm_data: &[u8]) -> SynthResult<()> {
    let bytes = write_wav_to_vec(format, pcm_data)?;
    write_atomic(path, &bytes)
}

/// Writes `bytes` to `path` through a persisted temporary file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> SynthResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| SynthError::Io(e.error))?;
    Ok(())
}
