//! Audio backend for headless runs
//!
//! Tracks what would be playing and logs every request instead of driving a
//! mixer.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use amius_core::{AudioBackend, ServiceError};

#[derive(Debug, Default)]
struct Mixer {
    track: Option<String>,
    paused: bool,
    volume: u8,
    effects: usize,
    loading_screen: bool,
}

/// Audio backend that logs instead of playing
#[derive(Debug, Default)]
pub struct LogAudio {
    mixer: Mutex<Mixer>,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    fn mixer(&self) -> MutexGuard<'_, Mixer> {
        self.mixer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Path of the current background track
    pub fn current_track(&self) -> Option<String> {
        self.mixer().track.clone()
    }

    pub fn volume(&self) -> u8 {
        self.mixer().volume
    }

    pub fn is_loading_screen_shown(&self) -> bool {
        self.mixer().loading_screen
    }

    fn require_file(path: &str) -> Result<(), ServiceError> {
        if Path::new(path).is_file() {
            Ok(())
        } else {
            Err(ServiceError::NotFound(path.to_string()))
        }
    }
}

impl AudioBackend for LogAudio {
    fn bgm_play(&self, fade_in_ms: u16, volume: u8, path: &str) -> Result<(), ServiceError> {
        Self::require_file(path)?;
        let mut mixer = self.mixer();
        if let Some(previous) = mixer.track.replace(path.to_string()) {
            log::debug!("Stopping {} to play {}", previous, path);
        }
        mixer.paused = false;
        mixer.volume = volume.min(100);
        log::info!("BGM play {} (volume {}, fade in {}ms)", path, mixer.volume, fade_in_ms);
        Ok(())
    }

    fn bgm_stop(&self, fade_out_ms: u16) -> Result<(), ServiceError> {
        if let Some(track) = self.mixer().track.take() {
            log::info!("BGM stop {} (fade out {}ms)", track, fade_out_ms);
        }
        Ok(())
    }

    fn bgm_pause(&self, fade_out_ms: u16) -> Result<(), ServiceError> {
        let mut mixer = self.mixer();
        if mixer.track.is_some() {
            mixer.paused = true;
            log::info!("BGM pause (fade out {}ms)", fade_out_ms);
        }
        Ok(())
    }

    fn bgm_resume(&self, fade_in_ms: u16) -> Result<(), ServiceError> {
        let mut mixer = self.mixer();
        if mixer.track.is_some() {
            mixer.paused = false;
            log::info!("BGM resume (fade in {}ms)", fade_in_ms);
        }
        Ok(())
    }

    fn bgm_fade_to(&self, volume: u8, fade_ms: u16) -> Result<(), ServiceError> {
        let mut mixer = self.mixer();
        mixer.volume = volume.min(100);
        log::info!("BGM fade to {} over {}ms", mixer.volume, fade_ms);
        Ok(())
    }

    fn bgm_set_volume(&self, volume: u8) -> Result<(), ServiceError> {
        self.mixer().volume = volume.min(100);
        Ok(())
    }

    fn bgm_is_playing(&self) -> bool {
        let mixer = self.mixer();
        mixer.track.is_some() && !mixer.paused
    }

    fn se_play(&self, path: &str) -> Result<(), ServiceError> {
        Self::require_file(path)?;
        self.mixer().effects += 1;
        log::info!("SE play {}", path);
        Ok(())
    }

    fn se_reset(&self) -> Result<(), ServiceError> {
        self.mixer().effects = 0;
        Ok(())
    }

    fn se_playing(&self) -> usize {
        self.mixer().effects
    }

    fn loading_screen_show(&self) {
        self.mixer().loading_screen = true;
        log::info!("Loading screen shown");
    }

    fn loading_screen_stop(&self) {
        self.mixer().loading_screen = false;
        log::info!("Loading screen hidden");
    }
}
