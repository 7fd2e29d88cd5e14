//! PCM data extraction and hashing utilities.

use super::reader::locate_chunks;

/// Extracts the `data` chunk body from a WAV file buffer.
///
/// Used for comparing WAV files by their audio content only.
///
/// # Returns
/// PCM data if found, or None if the container is invalid
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    locate_chunks(wav_data).ok().and_then(|chunks| chunks.data)
}

/// BLAKE3 hex digest of raw PCM bytes.
pub fn hash_pcm(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// Computes the PCM hash of a WAV file.
///
/// # Returns
/// BLAKE3 hash of the PCM data, or None if the container is invalid
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(hash_pcm)
}
