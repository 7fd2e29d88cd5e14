//! Tests for the WAV codec.

use pretty_assertions::assert_eq;

use super::format::WavFormat;
use super::pcm::{compute_pcm_hash, extract_pcm_data, hash_pcm};
use super::reader::read_wav;
use super::result::WavResult;
use super::writer::{wav_header, write_wav, write_wav_file, write_wav_to_vec, HEADER_LEN};
use crate::error::SynthError;

/// Assembles a RIFF file from raw chunks, padding odd bodies.
fn riff(chunks: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut body = b"WAVE".to_vec();
    for (id, data) in chunks {
        body.extend_from_slice(*id);
        body.extend_from_slice(&(data.len() as u32).to_le_bytes());
        body.extend_from_slice(data);
        if data.len() % 2 == 1 {
            body.push(0);
        }
    }
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

fn fmt_body(format_tag: u16, channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
    let block_align = channels * bits / 8;
    let mut body = Vec::new();
    body.extend_from_slice(&format_tag.to_le_bytes());
    body.extend_from_slice(&channels.to_le_bytes());
    body.extend_from_slice(&sample_rate.to_le_bytes());
    body.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    body.extend_from_slice(&block_align.to_le_bytes());
    body.extend_from_slice(&bits.to_le_bytes());
    body
}

fn pcm16_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

// =========================================================================
// WavFormat tests
// =========================================================================

#[test]
fn test_pcm8_mono_format() {
    let format = WavFormat::pcm8_mono(44100);
    assert_eq!(format.channels, 1);
    assert_eq!(format.bits_per_sample, 8);
    assert_eq!(format.block_align(), 1);
    assert_eq!(format.byte_rate(), 44100);
    assert_eq!(WavFormat::default(), format);
}

#[test]
fn test_pcm16_stereo_format() {
    let format = WavFormat::pcm16(2, 48000);
    assert_eq!(format.bytes_per_sample(), 2);
    assert_eq!(format.block_align(), 4);
    assert_eq!(format.byte_rate(), 192000);
}

// =========================================================================
// Encoder tests
// =========================================================================

#[test]
fn test_header_layout_is_byte_exact() {
    let wav = write_wav_to_vec(&WavFormat::pcm8_mono(44100), &[128, 200, 50]).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(b"RIFF");
    expected.extend_from_slice(&39u32.to_le_bytes());
    expected.extend_from_slice(b"WAVE");
    expected.extend_from_slice(b"fmt ");
    expected.extend_from_slice(&16u32.to_le_bytes());
    expected.extend_from_slice(&1u16.to_le_bytes());
    expected.extend_from_slice(&1u16.to_le_bytes());
    expected.extend_from_slice(&44100u32.to_le_bytes());
    expected.extend_from_slice(&44100u32.to_le_bytes());
    expected.extend_from_slice(&1u16.to_le_bytes());
    expected.extend_from_slice(&8u16.to_le_bytes());
    expected.extend_from_slice(b"data");
    expected.extend_from_slice(&3u32.to_le_bytes());
    expected.extend_from_slice(&[128, 200, 50]);

    assert_eq!(wav, expected);
}

#[test]
fn test_header_sizes_track_data_length() {
    let header = wav_header(&WavFormat::pcm8_mono(44100), 1000).unwrap();
    assert_eq!(header.len(), HEADER_LEN);
    assert_eq!(u32::from_le_bytes([header[4], header[5], header[6], header[7]]), 1036);
    assert_eq!(u32::from_le_bytes([header[40], header[41], header[42], header[43]]), 1000);
}

#[test]
fn test_oversized_data_is_rejected() {
    let err = wav_header(&WavFormat::pcm8_mono(44100), u32::MAX as usize).unwrap_err();
    assert!(matches!(err, SynthError::InvalidParameter { .. }));
}

#[test]
fn test_write_wav_matches_write_wav_to_vec() {
    let pcm: Vec<u8> = (0..=255).collect();
    let format = WavFormat::pcm8_mono(44100);
    let mut streamed = Vec::new();
    write_wav(&mut streamed, &format, &pcm).unwrap();
    assert_eq!(streamed, write_wav_to_vec(&format, &pcm).unwrap());
}

#[test]
fn test_empty_pcm_encodes_header_only() {
    let wav = write_wav_to_vec(&WavFormat::pcm8_mono(44100), &[]).unwrap();
    assert_eq!(wav.len(), HEADER_LEN);
    assert_eq!(read_wav(&wav).unwrap().data, Vec::<u8>::new());
}

// =========================================================================
// Decoder tests
// =========================================================================

#[test]
fn test_round_trip_preserves_pcm() {
    let pcm: Vec<u8> = (0..5000).map(|i| (i * 7 % 256) as u8).collect();
    let wav = write_wav_to_vec(&WavFormat::pcm8_mono(44100), &pcm).unwrap();
    let decoded = read_wav(&wav).unwrap();
    assert_eq!(decoded.format, WavFormat::pcm8_mono(44100));
    assert_eq!(decoded.num_frames(), 5000);
    assert_eq!(decoded.data, pcm);
    assert_eq!(decoded.to_pcm8_mono(), pcm);
}

#[test]
fn test_extra_chunks_are_skipped() {
    let wav = riff(&[
        (b"fmt ", fmt_body(1, 1, 22050, 8)),
        (b"LIST", b"INFOISFT".to_vec()),
        (b"junk", vec![1, 2, 3]),
        (b"data", vec![10, 20, 30]),
    ]);
    let decoded = read_wav(&wav).unwrap();
    assert_eq!(decoded.format.sample_rate, 22050);
    assert_eq!(decoded.data, vec![10, 20, 30]);
}

#[test]
fn test_bad_magic_is_malformed() {
    let mut wav = write_wav_to_vec(&WavFormat::pcm8_mono(44100), &[1, 2]).unwrap();
    wav[0..4].copy_from_slice(b"RIFX");
    assert!(matches!(read_wav(&wav), Err(SynthError::MalformedWav { .. })));

    let mut wav = write_wav_to_vec(&WavFormat::pcm8_mono(44100), &[1, 2]).unwrap();
    wav[8..12].copy_from_slice(b"AVI ");
    assert!(matches!(read_wav(&wav), Err(SynthError::MalformedWav { .. })));
}

#[test]
fn test_truncated_input_is_malformed() {
    assert!(matches!(read_wav(b"RIFF"), Err(SynthError::MalformedWav { .. })));
    assert!(matches!(read_wav(&[]), Err(SynthError::MalformedWav { .. })));

    let wav = riff(&[(b"fmt ", vec![1, 0, 1, 0])]);
    assert!(matches!(read_wav(&wav), Err(SynthError::MalformedWav { .. })));
}

#[test]
fn test_data_size_overrun_is_malformed() {
    let mut wav = write_wav_to_vec(&WavFormat::pcm8_mono(44100), &[1, 2, 3, 4]).unwrap();
    wav[40..44].copy_from_slice(&100u32.to_le_bytes());
    let err = read_wav(&wav).unwrap_err();
    assert!(matches!(err, SynthError::MalformedWav { .. }));
    assert!(err.to_string().contains("100"));
}

#[test]
fn test_missing_chunks_are_malformed() {
    let no_data = riff(&[(b"fmt ", fmt_body(1, 1, 44100, 8))]);
    assert!(matches!(read_wav(&no_data), Err(SynthError::MalformedWav { .. })));

    let no_fmt = riff(&[(b"data", vec![128; 4])]);
    assert!(matches!(read_wav(&no_fmt), Err(SynthError::MalformedWav { .. })));
}

#[test]
fn test_partial_frame_is_malformed() {
    let wav = riff(&[(b"fmt ", fmt_body(1, 1, 44100, 16)), (b"data", vec![0, 0, 0])]);
    assert!(matches!(read_wav(&wav), Err(SynthError::MalformedWav { .. })));
}

#[test]
fn test_unsupported_layouts() {
    let cases = [
        fmt_body(1, 1, 44100, 24),
        fmt_body(1, 1, 44100, 32),
        fmt_body(1, 3, 44100, 8),
        fmt_body(3, 1, 44100, 32),
        fmt_body(0xFFFE, 2, 44100, 16),
    ];
    for fmt in cases {
        let wav = riff(&[(b"fmt ", fmt), (b"data", vec![0; 24])]);
        assert!(
            matches!(read_wav(&wav), Err(SynthError::UnsupportedFormat { .. })),
            "expected unsupported format"
        );
    }
}

// =========================================================================
// Normalization tests
// =========================================================================

#[test]
fn test_pcm16_mono_is_rescaled() {
    let wav = riff(&[
        (b"fmt ", fmt_body(1, 1, 44100, 16)),
        (b"data", pcm16_bytes(&[0, 32767, -32768, 16384])),
    ]);
    let decoded = read_wav(&wav).unwrap();
    assert_eq!(decoded.num_frames(), 4);
    assert_eq!(decoded.to_pcm8_mono(), vec![128, 254, 1, 191]);
}

#[test]
fn test_pcm8_stereo_is_downmixed() {
    let wav = riff(&[
        (b"fmt ", fmt_body(1, 2, 44100, 8)),
        (b"data", vec![100, 200, 0, 255]),
    ]);
    assert_eq!(read_wav(&wav).unwrap().to_pcm8_mono(), vec![150, 128]);
}

#[test]
fn test_pcm16_stereo_is_downmixed() {
    let wav = riff(&[
        (b"fmt ", fmt_body(1, 2, 44100, 16)),
        (b"data", pcm16_bytes(&[32767, -32767, 16384, 16384])),
    ]);
    assert_eq!(read_wav(&wav).unwrap().to_pcm8_mono(), vec![128, 191]);
}

// =========================================================================
// PCM extraction and result tests
// =========================================================================

#[test]
fn test_extract_and_hash_pcm() {
    let pcm = vec![1, 2, 3, 4, 5];
    let wav = write_wav_to_vec(&WavFormat::pcm8_mono(44100), &pcm).unwrap();
    assert_eq!(extract_pcm_data(&wav), Some(&pcm[..]));
    assert_eq!(compute_pcm_hash(&wav), Some(hash_pcm(&pcm)));
    assert_eq!(hash_pcm(&pcm).len(), 64);

    assert_eq!(extract_pcm_data(b"not a wav file at all"), None);
    assert_eq!(compute_pcm_hash(&[]), None);
}

#[test]
fn test_wav_result_from_pcm8() {
    let pcm = vec![128u8; 44100];
    let result = WavResult::from_pcm8(&pcm, 44100).unwrap();
    assert_eq!(result.num_samples, 44100);
    assert_eq!(result.duration_seconds(), 1.0);
    assert_eq!(result.wav_data.len(), HEADER_LEN + 44100);
    assert_eq!(compute_pcm_hash(&result.wav_data), Some(result.pcm_hash.clone()));
}

#[test]
fn test_write_wav_file_is_complete_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tone.wav");
    let pcm: Vec<u8> = (0..100).collect();

    write_wav_file(&path, &WavFormat::pcm8_mono(44100), &pcm).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(read_wav(&bytes).unwrap().data, pcm);
    let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_write_wav_file_overwrites_existing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.wav");
    std::fs::write(&path, b"stale").unwrap();

    write_wav_file(&path, &WavFormat::pcm8_mono(44100), &[9, 9]).unwrap();
    assert_eq!(read_wav(&std::fs::read(&path).unwrap()).unwrap().data, vec![9, 9]);
}
