//! Speaker output through rodio. Built with the `audio` feature.

use std::fmt::{self, Debug, Formatter};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use super::soundtrack::{AudioError, MusicOutput, MAX_VOLUME};

/// Read a track into memory and check that it decodes.
pub fn read_track(path: &Path) -> Result<Arc<[u8]>, AudioError> {
    let load_error = |reason: String| AudioError::Load {
        path: path.to_path_buf(),
        reason,
    };
    let bytes: Arc<[u8]> = std::fs::read(path).map_err(|e| load_error(e.to_string()))?.into();
    Decoder::new(Cursor::new(bytes.clone())).map_err(|e| load_error(e.to_string()))?;
    Ok(bytes)
}

/// Sink gain for a 0..=[`MAX_VOLUME`] volume.
pub fn gain(volume: i32) -> f32 {
    volume.clamp(0, MAX_VOLUME) as f32 / MAX_VOLUME as f32
}

/// Plays one looping track on the default output device.
///
/// Each `play_looping` starts a fresh [`Sink`]; halting drops it.
pub struct SpeakerOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    track: Option<Arc<[u8]>>,
    gain: f32,
}

impl SpeakerOutput {
    /// Open the default output device.
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Playback(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            track: None,
            gain: 1.0,
        })
    }
}

impl MusicOutput for SpeakerOutput {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        let track = read_track(path)?;
        self.halt();
        self.track = Some(track);
        Ok(())
    }

    fn play_looping(&mut self) -> Result<(), AudioError> {
        let track = self.track.clone().ok_or(AudioError::NotLoaded)?;
        let source =
            Decoder::new_looped(Cursor::new(track)).map_err(|e| AudioError::Playback(e.to_string()))?;
        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Playback(e.to_string()))?;
        sink.set_volume(self.gain);
        sink.append(source);
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn halt(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: i32) {
        self.gain = gain(volume);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.gain);
        }
        debug!("Sink gain {:.2}", self.gain);
    }
}

impl Debug for SpeakerOutput {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("SpeakerOutput(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 8 kHz mono 16-bit PCM with `samples` zero samples.
    fn wav(samples: u32) -> Vec<u8> {
        let data_len = samples * 2;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8000u32.to_le_bytes());
        out.extend_from_slice(&16000u32.to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        out.resize(out.len() + data_len as usize, 0);
        out
    }

    #[test]
    fn test_gain_follows_volume() {
        assert_eq!(gain(MAX_VOLUME), 1.0);
        assert_eq!(gain(64), 0.5);
        assert_eq!(gain(0), 0.0);
        assert_eq!(gain(-10), 0.0);
        assert_eq!(gain(500), 1.0);
    }

    #[test]
    fn test_read_track_checks_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.wav");
        assert!(matches!(read_track(&missing), Err(AudioError::Load { .. })));

        let garbage = dir.path().join("garbage.wav");
        std::fs::write(&garbage, b"not audio at all").unwrap();
        assert!(matches!(read_track(&garbage), Err(AudioError::Load { .. })));

        let track = dir.path().join("track.wav");
        std::fs::write(&track, wav(800)).unwrap();
        assert_eq!(read_track(&track).unwrap().len(), 44 + 1600);
    }
}
