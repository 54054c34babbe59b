//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod render;
mod simulation;

pub use render::{DrawCommand, FrameList, RenderSystem};
pub use simulation::SimulationSystem;
