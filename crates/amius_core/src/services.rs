//! Platform services a scene talks to
//!
//! The engine never touches files, decoders or audio hardware directly. The
//! host supplies an [`AssetProvider`] and an [`AudioBackend`], and callbacks
//! reach them through the scene context.

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::render::Material;

/// Kind of asset a logical path refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetType {
    Texture,
    Model,
    Shader,
    Music,
    SoundEffect,
}

impl AssetType {
    /// Subdirectory the asset kind lives in, relative to the asset root
    pub fn directory(self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
            AssetType::Model => "models",
            AssetType::Shader => "shaders",
            AssetType::Music => "music",
            AssetType::SoundEffect => "sfx",
        }
    }
}

/// Error reported by a platform service
#[derive(Debug)]
pub enum ServiceError {
    /// The requested asset does not exist
    NotFound(String),
    /// Reading the asset failed
    Io(io::Error),
    /// The backend refused or failed the request
    Backend(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(path) => write!(f, "Asset not found: {}", path),
            ServiceError::Io(e) => write!(f, "IO error: {}", e),
            ServiceError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ServiceError {
    fn from(e: io::Error) -> Self {
        ServiceError::Io(e)
    }
}

/// Resolves and preloads assets for the current platform
pub trait AssetProvider: Send + Sync {
    /// Map a logical path to a platform location
    fn resolve_location(&self, path: &str, kind: AssetType) -> String;

    /// Load the shader and textures a material needs
    fn load_material(&self, material: &Material) -> Result<(), ServiceError>;

    /// Load a model by logical path
    fn load_model(&self, path: &str) -> Result<(), ServiceError>;

    /// Load a music track by logical path
    fn load_music(&self, path: &str) -> Result<(), ServiceError>;

    /// Load a sound effect by logical path
    fn load_sound_effect(&self, path: &str) -> Result<(), ServiceError>;
}

/// Music and sound effect playback
///
/// `path` arguments are platform locations, usually obtained from
/// [`AssetProvider::resolve_location`].
pub trait AudioBackend: Send + Sync {
    /// Start background music, fading in over `fade_in_ms`
    ///
    /// `volume` ranges over 0..=100.
    fn bgm_play(&self, fade_in_ms: u16, volume: u8, path: &str) -> Result<(), ServiceError>;

    /// Stop background music, fading out over `fade_out_ms`
    fn bgm_stop(&self, fade_out_ms: u16) -> Result<(), ServiceError>;

    fn bgm_pause(&self, fade_out_ms: u16) -> Result<(), ServiceError>;

    fn bgm_resume(&self, fade_in_ms: u16) -> Result<(), ServiceError>;

    /// Fade the current track to `volume` over `fade_ms`
    fn bgm_fade_to(&self, volume: u8, fade_ms: u16) -> Result<(), ServiceError>;

    fn bgm_set_volume(&self, volume: u8) -> Result<(), ServiceError>;

    fn bgm_is_playing(&self) -> bool;

    /// Play a sound effect once
    fn se_play(&self, path: &str) -> Result<(), ServiceError>;

    /// Stop every sound effect
    fn se_reset(&self) -> Result<(), ServiceError>;

    /// Number of sound effects currently playing
    fn se_playing(&self) -> usize;

    fn loading_screen_show(&self);

    fn loading_screen_stop(&self);
}

/// Host routine invoked on a recoverable fatal condition
pub type PanicHook = Arc<dyn Fn(&str) + Send + Sync>;
