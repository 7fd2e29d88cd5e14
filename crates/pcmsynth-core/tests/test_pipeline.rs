//! End-to-end rendering tests: parse, sequence, encode, decode, resample.

use std::sync::Arc;

use pcmsynth_core::melody::{sequence, Melody, MelodyEvent, MelodyParser};
use pcmsynth_core::note::NoteFrequencyTable;
use pcmsynth_core::rng::create_rng;
use pcmsynth_core::waveform::{render_waveform, sample_count, WaveShape, SAMPLE_RATE, ZERO_CROSSING};
use pcmsynth_core::wav::{read_wav, read_wav_file, write_wav_to_vec, WavFormat, WavResult};
use pcmsynth_core::{
    write_reference_tone, Instrument, MelodyPlayback, NullPlayer, SampledInstrument, SongConfig,
    Synth, SynthError, SynthOptions,
};
use pretty_assertions::assert_eq;

const DARK_IS_THE_NIGHT: &str = "(A4_1/2, C5_1/4, B4_1/4, A4_1/1, p_1/4, \
    F4_1/4, G4_1/4, A4_1/3, G4_1/3, F4_1/3, F4_1/4, E4_1/3, D#4_1/3, E4_1/2, p_1/2, \
    D4_1/4, E4_1/4, F4_1/3, E4_1/3, D4_1/3, A4_1/2, E4_1/4, D4_1/4, C4_1/2, p_1/2, \
    B3_1/4, C4_1/4, D4_1/2, C4_1/4, B3_1/4, B3_1/2, A3_1/1, p_1/2)";

#[test]
fn test_every_table_entry_matches_formula() {
    let table = NoteFrequencyTable::new();
    let names = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
    for octave in 1..=7 {
        for (i, name) in names.iter().enumerate() {
            let n = (octave * 12 + i as i32) - 21;
            let expected = 55.0 * 2.0_f64.powf(n as f64 / 12.0);
            assert_eq!(table.frequency(&format!("{}{}", name, octave)).unwrap(), expected);
        }
    }
    assert_eq!(table.frequency("A4").unwrap(), 440.0);
    assert!((table.frequency("C4").unwrap() - 261.63).abs() < 0.01);
}

#[test]
fn test_rendered_melody_survives_encoding() {
    let table = NoteFrequencyTable::new();
    let melody = Melody::parse("mix", "(C4_1/8, p_1/8, G4_1/4)", 150.0, &table).unwrap();
    let pcm = sequence(&melody, &WaveShape::Square, 0.6, 0.8, &mut create_rng(1)).unwrap();

    let wav = write_wav_to_vec(&WavFormat::pcm8_mono(SAMPLE_RATE), &pcm).unwrap();
    assert_eq!(read_wav(&wav).unwrap().data, pcm);
}

#[test]
fn test_recording_round_trip_through_resampler() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inst.wav");
    let tone = render_waveform(130.81, 50.0, WaveShape::Triangle, 1.0, &mut create_rng(0));
    WavResult::from_pcm8(&tone, SAMPLE_RATE).unwrap().write_to(&path).unwrap();

    let table = NoteFrequencyTable::new();
    let sample = SampledInstrument::try_load(&path, "C3", &table).unwrap();
    assert_eq!(sample.pcm(), &tone[..]);

    // Unity step replays the recording, wrapping at the end
    let base = sample.base_frequency();
    let out = sample.render(base, 2.0 * 50.0, 1.0);
    assert_eq!(out.len(), 2 * tone.len());
    assert_eq!(&out[..tone.len()], &tone[..]);
    assert_eq!(&out[tone.len()..], &tone[..]);
}

#[test]
fn test_sequencer_total_length_matches_events() {
    let table = NoteFrequencyTable::new();
    let melody = Melody::parse("dark", DARK_IS_THE_NIGHT, 144.0, &table).unwrap();
    assert_eq!(melody.events().len(), 33);

    let instrument = Instrument::from(SampledInstrument::fallback(130.81));
    let pcm = sequence(&melody, &instrument, 0.2, 0.95, &mut create_rng(0)).unwrap();
    let expected: usize = melody
        .events()
        .iter()
        .map(|e| sample_count(e.duration_ms * 0.95) + sample_count(e.duration_ms * (1.0 - 0.95)))
        .sum();
    assert_eq!(pcm.len(), expected);
    // Fallback recording is flat, so the whole song is silent
    assert!(pcm.iter().all(|&s| s == ZERO_CROSSING));
}

#[test]
fn test_single_event_gate_split() {
    let melody = Melody::new(
        "one",
        60.0,
        vec![MelodyEvent {
            frequency_hz: 440.0,
            duration_ms: 1000.0,
        }],
    );
    let pcm = sequence(&melody, &WaveShape::Sine, 1.0, 0.9, &mut create_rng(0)).unwrap();
    assert_eq!(pcm.len(), sample_count(1000.0));
    assert!(pcm[sample_count(900.0)..].iter().all(|&s| s == ZERO_CROSSING));
}

#[test]
fn test_grammar_examples() {
    let table = NoteFrequencyTable::new();
    let parser = MelodyParser::new(&table);

    let c4 = parser.parse("(C4_1/4)", 120.0).unwrap();
    assert_eq!(c4, vec![MelodyEvent { frequency_hz: table.frequency("C4").unwrap(), duration_ms: 500.0 }]);

    let two = parser.parse("(A4_1/2, p_1/4)", 60.0).unwrap();
    assert_eq!(two[0], MelodyEvent { frequency_hz: 440.0, duration_ms: 2000.0 });
    assert_eq!(two[1], MelodyEvent { frequency_hz: 0.0, duration_ms: 1000.0 });

    assert!(matches!(parser.parse("C4_1/0", 120.0), Err(SynthError::MalformedDuration { .. })));
}

#[test]
fn test_demo_song_through_engine() {
    let dir = tempfile::tempdir().unwrap();
    let instrument_path = dir.path().join("my_instrument.wav");
    write_reference_tone(&instrument_path).unwrap();

    let song_path = dir.path().join("dark.json");
    let song_json = serde_json::json!({
        "name": "DarkIsTheNight",
        "bpm": 144,
        "notes": DARK_IS_THE_NIGHT,
        "instrument": { "sample": "my_instrument.wav", "base_note": "C3" },
        "volume": 0.2,
        "gate": 0.95,
        "loop": true
    });
    std::fs::write(&song_path, song_json.to_string()).unwrap();

    let song = SongConfig::from_file(&song_path).unwrap();
    let player = Arc::new(NullPlayer::new());
    let synth = Synth::new(
        SynthOptions {
            handoff_dir: Some(dir.path().join("out")),
            seed: song.seed,
        },
        player.clone(),
    )
    .unwrap();

    let instrument = song.instrument.build(synth.table());
    assert!(matches!(&instrument, Instrument::Sampled(s) if s.pcm().len() == 44100));

    let melody = song.melody(synth.table()).unwrap();
    let path = synth.play_melody(&melody, &instrument, song.playback()).unwrap();
    assert!(path.starts_with(dir.path().join("out")));

    let decoded = read_wav_file(&path).unwrap();
    let expected_len: usize = melody
        .events()
        .iter()
        .map(|e| sample_count(e.duration_ms * 0.95) + sample_count(e.duration_ms * (1.0 - 0.95)))
        .sum();
    assert_eq!(decoded.data.len(), expected_len);
    // Volume 0.2 keeps every sample within 26 steps of the zero crossing
    assert!(decoded.data.iter().all(|&s| (102..=154).contains(&s)));

    let requests = player.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].1.looping);
    assert_eq!(song.playback(), MelodyPlayback { looping: true, volume: 0.2, gate: 0.95 });
}
