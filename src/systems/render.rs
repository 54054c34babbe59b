//! Headless rendering system
//!
//! Walks a scene the way a renderer would: refreshes the camera, resolves the
//! world transform of every visible object and collects draw commands. The
//! desktop build without a GPU uses the commands for frame statistics.

use amius_core::{Mat4, ObjectKey, RenderData, Scene};

/// One object to draw
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub key: ObjectKey,
    pub world: Mat4,
    pub data: RenderData,
}

/// Everything needed to draw one frame of a scene
#[derive(Debug, Clone)]
pub struct FrameList {
    pub view: Mat4,
    pub projection: Mat4,
    pub objects: Vec<DrawCommand>,
    /// UI slots with an element, in slot order
    pub ui_slots: Vec<usize>,
}

/// Collects draw commands for scenes
#[derive(Debug, Default)]
pub struct RenderSystem {
    frames_rendered: u64,
}

impl RenderSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Build the draw list for one scene
    ///
    /// Objects are visited in pre-order; empty objects only contribute
    /// their transform to their children.
    pub fn render(&mut self, scene: &mut Scene) -> FrameList {
        let camera = scene.camera_mut();
        let view = camera.view_transform();
        let frustum = camera.frustum();
        let projection = camera.projection();

        let root = scene.root();
        let order = scene.graph().walk(root);
        let graph = scene.graph_mut();
        let mut objects = Vec::new();
        for key in order {
            let Some(obj) = graph.get(key) else { continue };
            if obj.data().is_empty() || !obj.is_visible(&frustum) {
                continue;
            }
            let data = obj.data().clone();
            if let Some(world) = graph.world_transform(key) {
                objects.push(DrawCommand { key, world, data });
            }
        }

        let ui_slots = scene.ui_elements().map(|(slot, _)| slot).collect();
        self.frames_rendered += 1;

        FrameList {
            view,
            projection,
            objects,
            ui_slots,
        }
    }
}
