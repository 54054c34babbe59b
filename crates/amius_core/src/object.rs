//! Scene graph nodes
//!
//! An [`Object`] is one node of a scene's tree: a local transform, what to draw,
//! an optional per-tick behavior and links to its parent and children. Nodes
//! live in a [`SceneGraph`](crate::SceneGraph) arena and refer to each other by
//! [`ObjectKey`].

use std::fmt;

use amius_input::InputState;
use amius_math::{mat4, Frustum, Mat4, Vec3};
use slotmap::new_key_type;

use crate::context::SceneCtx;
use crate::graph::ObjectMut;
use crate::render::RenderData;

new_key_type! {
    /// Key to an object in a scene graph
    ///
    /// Keys are generational: once the object is removed, the key stops
    /// resolving, even if its slot is reused by a new object.
    pub struct ObjectKey;
}

/// Per-tick behavior of an object
pub type ObjectTick = Box<dyn FnMut(&mut ObjectMut<'_>, &SceneCtx, &InputState)>;

/// Everything needed to create an object
///
/// # Example
///
/// ```
/// use amius_core::{ObjectDesc, RenderData, Vec3};
///
/// let desc = ObjectDesc::new(RenderData::Empty)
///     .with_position(Vec3::new(0.0, 1.0, 0.0))
///     .with_tick(|obj, ctx, _input| {
///         let mut rotation = obj.rotation();
///         rotation.y += ctx.delta_seconds();
///         obj.set_rotation(rotation);
///     });
/// assert_eq!(desc.position, Vec3::new(0.0, 1.0, 0.0));
/// ```
pub struct ObjectDesc {
    pub data: RenderData,
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    pub scale: Vec3,
    pub tick: Option<ObjectTick>,
}

impl Default for ObjectDesc {
    fn default() -> Self {
        Self::new(RenderData::Empty)
    }
}

impl ObjectDesc {
    /// Object at the origin with unit scale
    pub fn new(data: RenderData) -> Self {
        Self {
            data,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            tick: None,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Attach a per-tick behavior
    pub fn with_tick<F>(mut self, tick: F) -> Self
    where
        F: FnMut(&mut ObjectMut<'_>, &SceneCtx, &InputState) + 'static,
    {
        self.tick = Some(Box::new(tick));
        self
    }
}

/// A node of the scene tree
pub struct Object {
    pub(crate) key: ObjectKey,
    pub(crate) data: RenderData,
    pub(crate) position: Vec3,
    pub(crate) rotation: Vec3,
    pub(crate) scale: Vec3,
    pub(crate) tick: Option<ObjectTick>,
    /// Set when the tick is replaced while it runs
    pub(crate) tick_replaced: bool,
    pub(crate) parent: Option<ObjectKey>,
    pub(crate) children: Vec<ObjectKey>,
    /// Cached world transform, valid while `dirty` is false
    pub(crate) transform: Mat4,
    pub(crate) dirty: bool,
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("key", &self.key)
            .field("data", &self.data)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("has_tick", &self.tick.is_some())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Object {
    pub(crate) fn from_desc(key: ObjectKey, desc: ObjectDesc) -> Self {
        Self {
            key,
            data: desc.data,
            position: desc.position,
            rotation: desc.rotation,
            scale: desc.scale,
            tick: desc.tick,
            tick_replaced: false,
            parent: None,
            children: Vec::new(),
            transform: mat4::IDENTITY,
            dirty: true,
        }
    }

    /// This object's own key
    #[inline]
    pub fn key(&self) -> ObjectKey {
        self.key
    }

    #[inline]
    pub fn data(&self) -> &RenderData {
        &self.data
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    pub fn parent(&self) -> Option<ObjectKey> {
        self.parent
    }

    /// Child keys in insertion order
    #[inline]
    pub fn children(&self) -> &[ObjectKey] {
        &self.children
    }

    /// Whether the cached world transform must be recomputed
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn has_tick(&self) -> bool {
        self.tick.is_some()
    }

    /// Transform relative to the parent: `T * Rx * Ry * Rz * S`
    pub fn local_transform(&self) -> Mat4 {
        mat4::translate_rotate_scale(mat4::IDENTITY, self.position, self.rotation, self.scale)
    }

    /// Visibility gate for the renderer
    ///
    /// Culling is not implemented yet; every object is visible.
    pub fn is_visible(&self, _frustum: &Frustum) -> bool {
        true
    }
}
