//! Object arena and tree operations
//!
//! A [`SceneGraph`] owns every object of a scene. The tree is encoded with
//! generational keys: each node stores its parent key and an ordered list of
//! child keys. Removing a node removes its whole subtree, and any key that
//! pointed into it stops resolving.

use std::fmt;

use amius_input::InputState;
use amius_math::{mat4, Mat4, Vec3};
use slotmap::SlotMap;

use crate::context::SceneCtx;
use crate::object::{Object, ObjectDesc, ObjectKey, ObjectTick};
use crate::render::RenderData;

/// Reason an attach request was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachError {
    /// The parent key does not resolve
    MissingParent,
    /// The child key does not resolve
    MissingChild,
    /// The child already has a parent
    AlreadyParented,
    /// Parent and child are the same object
    SelfAttach,
    /// The child is an ancestor of the parent
    WouldCycle,
    /// The graph root cannot become a child
    RootAsChild,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::MissingParent => write!(f, "Parent object does not exist"),
            AttachError::MissingChild => write!(f, "Child object does not exist"),
            AttachError::AlreadyParented => write!(f, "Child object already has a parent"),
            AttachError::SelfAttach => write!(f, "Cannot attach an object to itself"),
            AttachError::WouldCycle => write!(f, "Child object is an ancestor of the parent"),
            AttachError::RootAsChild => write!(f, "The root object cannot be attached"),
        }
    }
}

impl std::error::Error for AttachError {}

/// Arena of objects forming one tree under a root
pub struct SceneGraph {
    objects: SlotMap<ObjectKey, Object>,
    root: ObjectKey,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneGraph")
            .field("root", &self.root)
            .field("len", &self.objects.len())
            .finish()
    }
}

impl SceneGraph {
    /// Create a graph holding only an empty root object
    pub fn new() -> Self {
        let mut objects = SlotMap::with_key();
        let root = objects.insert_with_key(|key| Object::from_desc(key, ObjectDesc::default()));
        Self { objects, root }
    }

    /// The root object; it is never removed
    #[inline]
    pub fn root(&self) -> ObjectKey {
        self.root
    }

    /// Number of objects, including the root and unattached objects
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always false: the root is always present
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Create an unattached object
    ///
    /// The object stays in the arena until it is attached somewhere or removed.
    pub fn create(&mut self, desc: ObjectDesc) -> ObjectKey {
        self.objects.insert_with_key(|key| Object::from_desc(key, desc))
    }

    /// Create an object directly under `parent`
    pub fn create_child(&mut self, parent: ObjectKey, desc: ObjectDesc) -> Result<ObjectKey, AttachError> {
        if !self.objects.contains_key(parent) {
            return Err(AttachError::MissingParent);
        }
        let key = self.objects.insert_with_key(|key| {
            let mut obj = Object::from_desc(key, desc);
            obj.parent = Some(parent);
            obj
        });
        if let Some(parent_obj) = self.objects.get_mut(parent) {
            parent_obj.children.push(key);
        }
        Ok(key)
    }

    pub fn get(&self, key: ObjectKey) -> Option<&Object> {
        self.objects.get(key)
    }

    /// Mutable view of an object
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<ObjectMut<'_>> {
        if self.objects.contains_key(key) {
            Some(ObjectMut { graph: self, key })
        } else {
            None
        }
    }

    /// Iterate over every object in arena order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &Object)> {
        self.objects.iter()
    }

    /// Attach `child` as the last child of `parent`
    ///
    /// On error nothing changes. The attached subtree is marked dirty so its
    /// cached transforms pick up the new parent.
    pub fn add_child(&mut self, parent: ObjectKey, child: ObjectKey) -> Result<(), AttachError> {
        if !self.objects.contains_key(parent) {
            return Err(AttachError::MissingParent);
        }
        let Some(child_obj) = self.objects.get(child) else {
            return Err(AttachError::MissingChild);
        };
        if parent == child {
            return Err(AttachError::SelfAttach);
        }
        if child == self.root {
            return Err(AttachError::RootAsChild);
        }
        if child_obj.parent.is_some() {
            return Err(AttachError::AlreadyParented);
        }
        if self.is_ancestor(child, parent) {
            return Err(AttachError::WouldCycle);
        }

        if let Some(child_obj) = self.objects.get_mut(child) {
            child_obj.parent = Some(parent);
        }
        if let Some(parent_obj) = self.objects.get_mut(parent) {
            parent_obj.children.push(child);
        }
        self.mark_dirty(child);
        log::debug!("Attached {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Whether `ancestor` appears on the parent chain of `key`
    pub fn is_ancestor(&self, ancestor: ObjectKey, key: ObjectKey) -> bool {
        let mut current = self.objects.get(key).and_then(|obj| obj.parent);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.objects.get(k).and_then(|obj| obj.parent);
        }
        false
    }

    /// Remove an object and its whole subtree
    ///
    /// Returns the number of objects removed, or `None` if the key does not
    /// resolve or is the root.
    pub fn remove(&mut self, key: ObjectKey) -> Option<usize> {
        if key == self.root {
            log::warn!("Refusing to remove the scene root");
            return None;
        }
        let parent = self.objects.get(key)?.parent;
        if let Some(parent_obj) = parent.and_then(|p| self.objects.get_mut(p)) {
            parent_obj.children.retain(|&c| c != key);
        }

        let mut removed = 0;
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(obj) = self.objects.remove(k) {
                stack.extend(obj.children);
                removed += 1;
            }
        }
        log::debug!("Removed {:?} and {} descendant(s)", key, removed - 1);
        Some(removed)
    }

    /// Mark an object and every descendant dirty
    pub fn mark_dirty(&mut self, key: ObjectKey) {
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(obj) = self.objects.get_mut(k) {
                obj.dirty = true;
                stack.extend_from_slice(&obj.children);
            }
        }
    }

    /// World transform of an object, recomputed if dirty
    ///
    /// The dirty part of the parent chain is resolved first, top down; a
    /// missing parent composes as identity.
    pub fn world_transform(&mut self, key: ObjectKey) -> Option<Mat4> {
        let obj = self.objects.get(key)?;
        if !obj.dirty {
            return Some(obj.transform);
        }

        // Dirty chain from `key` up to the first clean ancestor
        let mut chain = vec![key];
        let mut base = mat4::IDENTITY;
        let mut current = obj.parent;
        while let Some(k) = current {
            match self.objects.get(k) {
                Some(ancestor) if ancestor.dirty => {
                    chain.push(k);
                    current = ancestor.parent;
                }
                Some(ancestor) => {
                    base = ancestor.transform;
                    break;
                }
                None => break,
            }
        }

        for &k in chain.iter().rev() {
            if let Some(obj) = self.objects.get_mut(k) {
                obj.transform = mat4::translate_rotate_scale(base, obj.position, obj.rotation, obj.scale);
                obj.dirty = false;
                base = obj.transform;
            }
        }
        log::trace!("Recomputed {} world transform(s) for {:?}", chain.len(), key);
        Some(base)
    }

    /// Keys of a subtree in pre-order, children in insertion order
    pub fn walk(&self, key: ObjectKey) -> Vec<ObjectKey> {
        let mut order = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(obj) = self.objects.get(k) {
                order.push(k);
                stack.extend(obj.children.iter().rev());
            }
        }
        order
    }

    /// Run the tick of `key` and then of every descendant, pre-order
    ///
    /// The running callback is taken out of its object for the duration of
    /// the call. If the callback replaces or clears its tick, that change is kept.
    /// Children are read after their parent's callback ran.
    pub fn tick_all(&mut self, key: ObjectKey, ctx: &SceneCtx, input: &InputState) {
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            let tick = match self.objects.get_mut(k) {
                Some(obj) => {
                    obj.tick_replaced = false;
                    obj.tick.take()
                }
                None => continue,
            };
            if let Some(mut tick) = tick {
                tick(&mut ObjectMut { graph: self, key: k }, ctx, input);
                if let Some(obj) = self.objects.get_mut(k) {
                    if !obj.tick_replaced {
                        obj.tick = Some(tick);
                    }
                }
            }
            if let Some(obj) = self.objects.get(k) {
                stack.extend(obj.children.iter().rev());
            }
        }
    }
}

/// Mutable access to one object of a graph
///
/// Transform setters keep the dirty invariant for the whole subtree. This is
/// also the view tick callbacks receive.
pub struct ObjectMut<'a> {
    graph: &'a mut SceneGraph,
    key: ObjectKey,
}

impl ObjectMut<'_> {
    // The key is checked on construction and the view cannot remove objects
    fn obj(&self) -> &Object {
        &self.graph.objects[self.key]
    }

    fn obj_mut(&mut self) -> &mut Object {
        &mut self.graph.objects[self.key]
    }

    #[inline]
    pub fn key(&self) -> ObjectKey {
        self.key
    }

    pub fn parent(&self) -> Option<ObjectKey> {
        self.obj().parent
    }

    pub fn children(&self) -> &[ObjectKey] {
        &self.obj().children
    }

    pub fn position(&self) -> Vec3 {
        self.obj().position
    }

    pub fn rotation(&self) -> Vec3 {
        self.obj().rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.obj().scale
    }

    pub fn is_dirty(&self) -> bool {
        self.obj().dirty
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.obj_mut().position = position;
        self.mark_dirty();
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.obj_mut().rotation = rotation;
        self.mark_dirty();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.obj_mut().scale = scale;
        self.mark_dirty();
    }

    /// Mark this object and its descendants dirty
    pub fn mark_dirty(&mut self) {
        self.graph.mark_dirty(self.key);
    }

    pub fn data(&self) -> &RenderData {
        &self.obj().data
    }

    /// Render data does not affect transforms, so no dirty marking happens
    pub fn data_mut(&mut self) -> &mut RenderData {
        &mut self.obj_mut().data
    }

    /// Replace the per-tick behavior; `None` stops ticking
    pub fn set_tick(&mut self, tick: Option<ObjectTick>) {
        let obj = self.obj_mut();
        obj.tick = tick;
        obj.tick_replaced = true;
    }

    pub fn world_transform(&mut self) -> Mat4 {
        self.graph.world_transform(self.key).unwrap_or(mat4::IDENTITY)
    }

    pub fn local_transform(&self) -> Mat4 {
        self.obj().local_transform()
    }
}
