//! Hand-off of finished WAV files to an audio player.
//!
//! Rendering never talks to an audio device. A finished file is written to a
//! unique path inside a [`HandoffDir`] and passed to a [`PlaybackService`],
//! which plays it in the background (optionally looping) and can stop every
//! sound it started.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};
use tempfile::{Builder, TempDir};

use crate::error::{SynthError, SynthResult};

/// How a file should be played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Return immediately instead of waiting for playback to finish.
    pub asynchronous: bool,
    /// Repeat until stopped.
    pub looping: bool,
}

impl PlaybackOptions {
    /// Play once in the background.
    pub fn background() -> Self {
        Self {
            asynchronous: true,
            looping: false,
        }
    }

    /// Loop in the background until stopped.
    pub fn looped() -> Self {
        Self {
            asynchronous: true,
            looping: true,
        }
    }
}

/// Something that can play WAV files.
pub trait PlaybackService: Send + Sync {
    /// Starts playing `path`.
    fn play(&self, path: &Path, options: PlaybackOptions) -> SynthResult<()>;

    /// Stops every sound started by this service.
    fn stop_all(&self) -> SynthResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Plays files by spawning an external program, SoX `play` by default.
#[derive(Debug)]
pub struct CommandPlayer {
    program: OsString,
    args: Vec<OsString>,
    children: Mutex<Vec<Child>>,
}

impl CommandPlayer {
    /// `play -q <file>`, with `repeat -` appended when looping.
    pub fn new() -> Self {
        Self::with_program("play", ["-q"])
    }

    /// Uses a custom program. The file path is appended after `args`.
    pub fn with_program<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            children: Mutex::new(Vec::new()),
        }
    }

    /// Number of background players that are still running.
    pub fn active(&self) -> usize {
        let mut children = lock(&self.children);
        reap(&mut children);
        children.len()
    }

    fn command(&self, path: &Path, looping: bool) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(path);
        if looping {
            command.args(["repeat", "-"]);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Default for CommandPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops handles of players that have exited.
fn reap(children: &mut Vec<Child>) {
    children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
}

impl PlaybackService for CommandPlayer {
    fn play(&self, path: &Path, options: PlaybackOptions) -> SynthResult<()> {
        let program = self.program.to_string_lossy();
        debug!("starting '{}' for {} ({:?})", program, path.display(), options);

        let mut child = self.command(path, options.looping).spawn().map_err(|e| {
            SynthError::playback(format!("failed to start '{}': {}", program, e))
        })?;

        if options.asynchronous {
            let mut children = lock(&self.children);
            reap(&mut children);
            children.push(child);
            return Ok(());
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(SynthError::playback(format!(
                "'{}' exited with {} while playing {}",
                program,
                status,
                path.display()
            )))
        }
    }

    fn stop_all(&self) -> SynthResult<()> {
        let mut children = lock(&self.children);
        for mut child in children.drain(..) {
            if let Err(e) = child.kill() {
                // Already exited
                debug!("player {} not killed: {}", child.id(), e);
            }
            if let Err(e) = child.wait() {
                warn!("failed to reap player {}: {}", child.id(), e);
            }
        }
        Ok(())
    }
}

/// A service that plays nothing and remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct NullPlayer {
    requests: Mutex<Vec<(PathBuf, PlaybackOptions)>>,
    stops: Mutex<usize>,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `play` request so far, in order.
    pub fn requests(&self) -> Vec<(PathBuf, PlaybackOptions)> {
        lock(&self.requests).clone()
    }

    /// Number of `stop_all` calls so far.
    pub fn stop_count(&self) -> usize {
        *lock(&self.stops)
    }
}

impl PlaybackService for NullPlayer {
    fn play(&self, path: &Path, options: PlaybackOptions) -> SynthResult<()> {
        debug!("null player: {} ({:?})", path.display(), options);
        lock(&self.requests).push((path.to_path_buf(), options));
        Ok(())
    }

    fn stop_all(&self) -> SynthResult<()> {
        *lock(&self.stops) += 1;
        Ok(())
    }
}

/// Directory of rendered files waiting to be played.
///
/// Every write gets a fresh file name, so concurrent renders never share a path.
#[derive(Debug)]
pub struct HandoffDir {
    path: PathBuf,
    _owned: Option<TempDir>,
}

impl HandoffDir {
    /// Uses (and creates if needed) an existing directory. Files are kept.
    pub fn new(path: impl Into<PathBuf>) -> SynthResult<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path)?;
        Ok(Self { path, _owned: None })
    }

    /// Uses a fresh temporary directory that is removed on drop.
    pub fn temporary() -> SynthResult<Self> {
        let dir = Builder::new().prefix("pcmsynth-").tempdir()?;
        Ok(Self {
            path: dir.path().to_path_buf(),
            _owned: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `bytes` to a new uniquely named `.wav` file and returns its path.
    ///
    /// The name starts with a sanitized `stem`. If writing fails the file is
    /// removed, so a returned path always holds the complete data.
    pub fn write(&self, stem: &str, bytes: &[u8]) -> SynthResult<PathBuf> {
        let prefix = format!("{}-", sanitize_stem(stem));
        let mut file = Builder::new()
            .prefix(&prefix)
            .suffix(".wav")
            .rand_bytes(8)
            .tempfile_in(&self.path)?;

        file.write_all(bytes)?;
        file.as_file().sync_all()?;

        let (_, path) = file.keep().map_err(|e| SynthError::Io(e.error))?;
        debug!("handoff file {}", path.display());
        Ok(path)
    }
}

fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "render".to_string()
    } else {
        cleaned
    }
}
