//! Transform math for the Amius engine
//!
//! Pure functions and small value types, no state.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector used for positions, Euler rotations and scales
//! - [`Vec2`] - 2D vector used by UI elements
//! - [`Mat4`] - column-major 4x4 matrix, manipulated through [`mat4`] functions
//!
//! ## Culling
//!
//! - [`Plane`] - a plane in point/normal form
//! - [`Frustum`] - six planes bounding a camera's visible volume

mod vec3;
pub mod mat4;
pub mod frustum;

pub use vec3::{Vec2, Vec3};
pub use mat4::Mat4;
pub use frustum::{forward_from_rotation, Frustum, Plane};
