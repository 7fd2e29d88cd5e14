//! pcmsynth core
//!
//! 8-bit PCM synthesis: formula waveforms, pitch-shifted recordings, a compact
//! melody grammar and a byte-exact WAV codec.
//!
//! # Overview
//!
//! Data flows one way:
//!
//! note names → frequencies → per-event PCM → one buffer → WAV file → player
//!
//! Everything is rendered to a complete buffer before it is played. Output is
//! mono, unsigned 8-bit at 44100 Hz, with 128 as the zero crossing.
//!
//! # Determinism
//!
//! The noise shape draws from PCG32 generators seeded through BLAKE3, so equal
//! inputs and seeds give byte-identical files.
//!
//! # Example
//!
//! ```
//! use pcmsynth_core::instrument::Instrument;
//! use pcmsynth_core::melody::{sequence, Melody};
//! use pcmsynth_core::note::NoteFrequencyTable;
//! use pcmsynth_core::rng::create_rng;
//! use pcmsynth_core::waveform::{WaveShape, SAMPLE_RATE};
//! use pcmsynth_core::wav::WavResult;
//!
//! let table = NoteFrequencyTable::new();
//! let melody = Melody::parse("scale", "(C4_1/4, E4_1/4, G4_1/2)", 120.0, &table).unwrap();
//! let instrument = Instrument::from(WaveShape::Triangle);
//!
//! let pcm = sequence(&melody, &instrument, 0.8, 0.9, &mut create_rng(0)).unwrap();
//! let wav = WavResult::from_pcm8(&pcm, SAMPLE_RATE).unwrap();
//! assert_eq!(wav.duration_seconds(), 2.0);
//! ```
//!
//! # Crate Structure
//!
//! - [`note`] - Note name to frequency table
//! - [`waveform`] - Parametric waveform generator
//! - [`sampler`] - Recorded-sample instrument and resampler
//! - [`instrument`] - Instrument variants and the rendering trait
//! - [`melody`] - Melody parser and sequencer
//! - [`wav`] - WAV encoder and decoder
//! - [`playback`] - Player hand-off
//! - [`engine`] - High-level [`Synth`]
//! - [`config`] - JSON song descriptions

pub mod config;
pub mod engine;
pub mod error;
pub mod instrument;
pub mod melody;
pub mod note;
pub mod playback;
pub mod rng;
pub mod sampler;
pub mod wav;
pub mod waveform;

pub use config::{InstrumentConfig, SongConfig};
pub use engine::{write_reference_tone, MelodyPlayback, Synth, SynthOptions};
pub use error::{SynthError, SynthResult};
pub use instrument::{Instrument, NoteRenderer};
pub use melody::{Melody, MelodyEvent, MelodyParser};
pub use note::NoteFrequencyTable;
pub use playback::{CommandPlayer, HandoffDir, NullPlayer, PlaybackOptions, PlaybackService};
pub use sampler::SampledInstrument;
pub use wav::{WavFormat, WavResult};
pub use waveform::WaveShape;
