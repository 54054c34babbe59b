//! Amius desktop host
//!
//! Configuration, desktop platform services, input mapping and the systems
//! the `amius` binary runs.

pub mod config;
pub mod input;
pub mod loader;
pub mod platform;
pub mod scene;
pub mod systems;
