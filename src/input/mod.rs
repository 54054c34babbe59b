//! Input handling module
//!
//! Maps desktop key names to handheld buttons and plays back scripted input.

mod input_mapper;
mod script;

pub use input_mapper::{BindingError, InputMapper};
pub use script::InputScript;
