//! 8-bit PCM WAV codec.
//!
//! Encoding always produces the canonical 44-byte header followed by the raw
//! samples, with no metadata chunks, so identical PCM yields identical files.
//! Decoding walks the RIFF chunk list and accepts 8- or 16-bit PCM with one or
//! two channels, which covers recordings made by other tools.

mod format;
mod pcm;
mod reader;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data, hash_pcm};
pub use reader::{read_wav, read_wav_file, DecodedWav};
pub use result::WavResult;
pub use writer::{wav_header, write_wav, write_wav_file, write_wav_to_vec, HEADER_LEN};
