//! Core types for the Amius engine
//!
//! This crate provides the scene-level building blocks:
//!
//! - [`SceneGraph`] - Arena of [`Object`]s forming a tree with lazily cached world transforms
//! - [`ObjectKey`] - Generational key to an object
//! - [`Camera`] - Perspective camera with a cached view transform and [`Frustum`]
//! - [`UiElement`] - Screen-space element stored in a scene's UI slots
//! - [`RenderData`] / [`Material`] / [`Model`] - What the renderer draws
//! - [`Scene`] - Object tree, UI slots, camera, registries and the per-tick context
//! - [`Engine`] - Routes input to the top and bottom scenes
//! - [`AssetProvider`] / [`AudioBackend`] - Platform services supplied by the host

mod render;
mod object;
mod graph;
mod camera;
mod ui;
mod context;
mod scene;
mod engine;
pub mod services;
pub mod message;

pub use render::{Material, ShaderInput, Model, RenderData};
pub use object::{Object, ObjectDesc, ObjectKey, ObjectTick};
pub use graph::{SceneGraph, ObjectMut, AttachError};
pub use camera::{Camera, CameraTick};
pub use ui::{UiElement, UiRenderData, UiHandle, UiTick, TextAlign};
pub use context::SceneCtx;
pub use scene::{Scene, SceneError, MaterialLibrary, UI_SLOTS};
pub use engine::{Engine, EngineFlow};
pub use services::{AssetProvider, AssetType, AudioBackend, PanicHook, ServiceError};
pub use message::{GameBoundMessage, MessageType, RenderBoundMessage};

// Re-export commonly used types from the leaf crates for convenience
pub use amius_math::{Vec2, Vec3, Mat4, Frustum, Plane};
pub use amius_input::{InputState, Keys};
