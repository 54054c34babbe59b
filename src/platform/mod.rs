//! Desktop implementations of the platform services

mod assets;
mod audio;

pub use assets::DirectoryAssets;
pub use audio::LogAudio;
