//! Render descriptors
//!
//! Objects do not draw themselves. They carry a [`RenderData`] describing what
//! the renderer should draw at their world transform, optionally referencing a
//! [`Material`] or [`Model`] registered with the scene.

use std::sync::{Arc, Weak};
use serde::{Serialize, Deserialize};

/// One input bound to a material's shader
///
/// Inputs are bound in order, starting after the camera matrices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShaderInput {
    /// Path of a 2D texture
    Texture2d(String),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

/// A shader plus the inputs it is fed with
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Shader asset path
    pub shader_path: String,
    /// Shader inputs, in binding order
    #[serde(default)]
    pub shader_inputs: Vec<ShaderInput>,
}

impl Material {
    /// Create a material with no inputs
    pub fn new(shader_path: impl Into<String>) -> Self {
        Self {
            shader_path: shader_path.into(),
            shader_inputs: Vec::new(),
        }
    }

    /// Append a shader input
    pub fn with_input(mut self, input: ShaderInput) -> Self {
        self.shader_inputs.push(input);
        self
    }

    /// Texture paths referenced by this material
    pub fn textures(&self) -> impl Iterator<Item = &str> {
        self.shader_inputs.iter().filter_map(|input| match input {
            ShaderInput::Texture2d(path) => Some(path.as_str()),
            _ => None,
        })
    }
}

/// A model asset reference
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Model asset path
    pub path: String,
}

impl Model {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// What the renderer should draw for an object
///
/// A `None` material means the renderer's default material.
#[derive(Clone, Debug, Default)]
pub enum RenderData {
    /// Nothing is drawn; the object only groups or animates children
    #[default]
    Empty,
    /// A unit plane
    Plane { material: Option<Arc<Material>> },
    /// A unit cube
    Cube { material: Option<Arc<Material>> },
    /// A loaded model
    Model {
        model: Arc<Model>,
        material: Option<Arc<Material>>,
    },
}

impl RenderData {
    /// A plane drawn with `material` (default material if it was unregistered)
    pub fn plane(material: &Weak<Material>) -> Self {
        RenderData::Plane { material: material.upgrade() }
    }

    /// A cube drawn with `material` (default material if it was unregistered)
    pub fn cube(material: &Weak<Material>) -> Self {
        RenderData::Cube { material: material.upgrade() }
    }

    /// A model drawn with `material`
    ///
    /// Returns `None` if the model is no longer registered.
    pub fn model(model: &Weak<Model>, material: &Weak<Material>) -> Option<Self> {
        Some(RenderData::Model {
            model: model.upgrade()?,
            material: material.upgrade(),
        })
    }

    /// Current material, if any
    pub fn material(&self) -> Option<&Arc<Material>> {
        match self {
            RenderData::Empty => None,
            RenderData::Plane { material }
            | RenderData::Cube { material }
            | RenderData::Model { material, .. } => material.as_ref(),
        }
    }

    /// Swap the material; has no effect on [`RenderData::Empty`]
    pub fn change_material(&mut self, new_material: &Weak<Material>) {
        match self {
            RenderData::Empty => {}
            RenderData::Plane { material }
            | RenderData::Cube { material }
            | RenderData::Model { material, .. } => *material = new_material.upgrade(),
        }
    }

    /// Whether anything is drawn
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderData::Empty)
    }
}
