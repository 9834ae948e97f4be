//! Background music state.
//!
//! [`Soundtrack`] owns the volume and the play/pause state; the device side
//! sits behind [`MusicOutput`]. [`LogOutput`] only logs; the `audio` feature
//! adds a speaker output.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Loudest music volume.
pub const MAX_VOLUME: i32 = 128;

/// Volume change per key press.
pub const VOLUME_STEP: i32 = 5;

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("failed to load music '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },
    #[error("no music loaded")]
    NotLoaded,
    #[error("playback failed: {0}")]
    Playback(String),
}

/// A device that plays one looping track.
pub trait MusicOutput {
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;
    fn play_looping(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn halt(&mut self);
    /// 0..=[`MAX_VOLUME`].
    fn set_volume(&mut self, volume: i32);
}

/// Output that only checks the file exists and logs what would play.
#[derive(Debug, Default)]
pub struct LogOutput {
    track: Option<PathBuf>,
}

impl MusicOutput for LogOutput {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        std::fs::metadata(path).map_err(|e| AudioError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.track = Some(path.to_path_buf());
        Ok(())
    }

    fn play_looping(&mut self) -> Result<(), AudioError> {
        let track = self.track.as_ref().ok_or(AudioError::NotLoaded)?;
        info!("Looping {}", track.display());
        Ok(())
    }

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn halt(&mut self) {}

    fn set_volume(&mut self, _volume: i32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

pub struct Soundtrack {
    output: Box<dyn MusicOutput>,
    volume: i32,
    state: PlayState,
    loaded: bool,
}

impl Soundtrack {
    pub fn new(mut output: Box<dyn MusicOutput>, volume: i32) -> Self {
        let volume = volume.clamp(0, MAX_VOLUME);
        output.set_volume(volume);
        Self {
            output,
            volume,
            state: PlayState::Stopped,
            loaded: false,
        }
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), AudioError> {
        let path = path.as_ref();
        info!("Loading background music: {}", path.display());
        self.output.load(path).inspect_err(|e| warn!("{}", e))?;
        self.output.set_volume(self.volume);
        self.loaded = true;
        info!("Background music loaded (volume: {}/{})", self.volume, MAX_VOLUME);
        Ok(())
    }

    /// Start looping from the top. Does nothing without a loaded track.
    pub fn play(&mut self) {
        if !self.loaded {
            return;
        }
        match self.output.play_looping() {
            Ok(()) => {
                self.state = PlayState::Playing;
                info!("Background music started (looping)");
            }
            Err(e) => warn!("{}", e),
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.output.pause();
            self.state = PlayState::Paused;
            info!("Background music paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlayState::Paused {
            self.output.resume();
            self.state = PlayState::Playing;
            info!("Background music resumed");
        }
    }

    pub fn stop(&mut self) {
        if self.state != PlayState::Stopped {
            self.output.halt();
            self.state = PlayState::Stopped;
            info!("Background music stopped");
        }
    }

    /// Set the volume, clamped to 0..=[`MAX_VOLUME`].
    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, MAX_VOLUME);
        self.output.set_volume(self.volume);
        info!(
            "Background music volume set to: {}/{} ({}%)",
            self.volume,
            MAX_VOLUME,
            self.volume * 100 / MAX_VOLUME
        );
    }

    pub fn change_volume(&mut self, delta: i32) {
        self.set_volume(self.volume.saturating_add(delta));
    }

    #[inline]
    pub fn volume(&self) -> i32 {
        self.volume
    }

    #[inline]
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Playing or paused, the way a mixer reports an active track.
    pub fn is_playing(&self) -> bool {
        self.state != PlayState::Stopped
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    /// Halt playback and drop the track.
    pub fn teardown(&mut self) {
        self.stop();
        if self.loaded {
            self.loaded = false;
            info!("Background music freed");
        }
    }
}

impl std::fmt::Debug for Soundtrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Soundtrack")
            .field("volume", &self.volume)
            .field("state", &self.state)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}
