//! High-level synthesizer that renders, hands off and plays audio.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::error::{SynthError, SynthResult};
use crate::instrument::Instrument;
use crate::melody::{sequence, Melody, MelodyParser};
use crate::note::{NoteFrequencyTable, DEFAULT_SAMPLE_BASE_FREQUENCY};
use crate::playback::{HandoffDir, PlaybackOptions, PlaybackService};
use crate::rng::{create_component_rng, create_rng};
use crate::sampler::SampledInstrument;
use crate::waveform::{render_waveform, WaveShape, SAMPLE_RATE};
use crate::wav::WavResult;

/// Duration of the reference tone written by [`write_reference_tone`].
pub const REFERENCE_TONE_MS: f64 = 1000.0;

/// Engine construction options.
#[derive(Debug, Clone, Default)]
pub struct SynthOptions {
    /// Directory for rendered files. A temporary directory is used when unset.
    pub handoff_dir: Option<PathBuf>,
    /// Base seed for noise.
    pub seed: u32,
}

/// How a melody is rendered and played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyPlayback {
    /// Repeat until stopped.
    pub looping: bool,
    /// Linear volume, clamped to [0, 1].
    pub volume: f64,
    /// Sounding fraction of each note, in (0, 1].
    pub gate: f64,
}

impl Default for MelodyPlayback {
    fn default() -> Self {
        Self {
            looping: false,
            volume: 1.0,
            gate: 0.9,
        }
    }
}

/// Renders notes and melodies and hands them to a playback service.
pub struct Synth {
    table: Arc<NoteFrequencyTable>,
    handoff: HandoffDir,
    player: Arc<dyn PlaybackService>,
    seed: u32,
}

impl Synth {
    /// Creates an engine with a freshly built note table.
    pub fn new(options: SynthOptions, player: Arc<dyn PlaybackService>) -> SynthResult<Self> {
        Self::with_table(Arc::new(NoteFrequencyTable::new()), options, player)
    }

    /// Creates an engine sharing an existing note table.
    pub fn with_table(
        table: Arc<NoteFrequencyTable>,
        options: SynthOptions,
        player: Arc<dyn PlaybackService>,
    ) -> SynthResult<Self> {
        let handoff = match options.handoff_dir {
            Some(dir) => HandoffDir::new(dir)?,
            None => HandoffDir::temporary()?,
        };
        debug!("handoff directory {}", handoff.path().display());

        Ok(Self {
            table,
            handoff,
            player,
            seed: options.seed,
        })
    }

    pub fn table(&self) -> &Arc<NoteFrequencyTable> {
        &self.table
    }

    pub fn handoff(&self) -> &HandoffDir {
        &self.handoff
    }

    /// Lenient melody parser over this engine's table.
    pub fn parser(&self) -> MelodyParser<'_> {
        MelodyParser::new(&self.table)
    }

    /// Loads a recording as an instrument, falling back to near silence.
    pub fn load_sample(&self, path: &Path, base_note: &str) -> SampledInstrument {
        SampledInstrument::load(path, base_note, &self.table)
    }

    /// Renders a single tone. Unknown note names render silence.
    pub fn render_note(
        &self,
        note: &str,
        duration_ms: f64,
        shape: WaveShape,
        volume: f64,
    ) -> SynthResult<WavResult> {
        let frequency = self.table.frequency_or(note, 0.0);
        let mut rng = create_component_rng(self.seed, note);
        let pcm = render_waveform(frequency, duration_ms, shape, volume, &mut rng);
        WavResult::from_pcm8(&pcm, SAMPLE_RATE)
    }

    /// Sequences a melody through an instrument into one encoded file.
    pub fn render_melody(
        &self,
        melody: &Melody,
        instrument: &Instrument,
        volume: f64,
        gate: f64,
    ) -> SynthResult<WavResult> {
        info!("synthesizing {}", melody.name());
        let mut rng = create_component_rng(self.seed, melody.name());
        let pcm = sequence(melody, instrument, volume, gate, &mut rng)?;
        WavResult::from_pcm8(&pcm, SAMPLE_RATE)
    }

    /// Renders a tone and starts playing it in the background.
    ///
    /// Returns the path of the hand-off file.
    pub fn play_note(
        &self,
        note: &str,
        duration_ms: f64,
        shape: WaveShape,
        volume: f64,
    ) -> SynthResult<PathBuf> {
        let wav = self.render_note(note, duration_ms, shape, volume)?;
        let path = self.handoff.write(note, &wav.wav_data)?;
        self.player.play(&path, PlaybackOptions::background())?;
        Ok(path)
    }

    /// Renders a melody and starts playing it in the background.
    ///
    /// Returns the path of the hand-off file.
    pub fn play_melody(
        &self,
        melody: &Melody,
        instrument: &Instrument,
        playback: MelodyPlayback,
    ) -> SynthResult<PathBuf> {
        let wav = self.render_melody(melody, instrument, playback.volume, playback.gate)?;
        let path = self.handoff.write(melody.name(), &wav.wav_data)?;
        let options = PlaybackOptions {
            asynchronous: true,
            looping: playback.looping,
        };
        self.player.play(&path, options)?;
        Ok(path)
    }

    /// Plays an existing audio file in the background.
    pub fn play_file(&self, path: &Path) -> SynthResult<()> {
        self.play_file_with(path, PlaybackOptions::background())
    }

    /// Plays an existing audio file with explicit options.
    ///
    /// With `asynchronous` unset this returns once the player exits.
    pub fn play_file_with(&self, path: &Path, options: PlaybackOptions) -> SynthResult<()> {
        if !path.is_file() {
            return Err(SynthError::playback(format!(
                "{} is not a file",
                path.display()
            )));
        }
        self.player.play(path, options)
    }

    /// Stops everything started through this engine's player.
    pub fn stop_all(&self) -> SynthResult<()> {
        self.player.stop_all()
    }
}

/// Writes a one second full-volume C3 sine, usable as a demo recording.
pub fn write_reference_tone(path: &Path) -> SynthResult<WavResult> {
    let mut rng = create_rng(0);
    let pcm = render_waveform(
        DEFAULT_SAMPLE_BASE_FREQUENCY,
        REFERENCE_TONE_MS,
        WaveShape::Sine,
        1.0,
        &mut rng,
    );
    let wav = WavResult::from_pcm8(&pcm, SAMPLE_RATE)?;
    wav.write_to(path)?;
    Ok(wav)
}
