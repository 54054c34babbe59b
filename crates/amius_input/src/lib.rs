//! Input snapshots
//!
//! The engine never polls devices itself. Each frame the host hands it an
//! [`InputState`] made of three [`Keys`] masks: keys pressed this frame,
//! keys held, and keys released this frame.

mod keys;
mod state;

pub use keys::Keys;
pub use state::InputState;
