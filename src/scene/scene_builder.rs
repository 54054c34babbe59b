//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for assembling the demo scenes: objects with
//! behaviors, UI widgets and camera controls.

use std::path::Path;
use std::sync::{Arc, Weak};

use amius_core::{
    AssetType, AudioBackend, Camera, InputState, Keys, Material, ObjectDesc, RenderData, Scene,
    SceneCtx, TextAlign, UiElement, Vec3,
};

/// Frame time above which the frame counter turns red
const SLOW_FRAME_MS: u128 = 34;
const WHITE: u32 = 0xFFFF_FFFF;
const RED: u32 = 0xFF00_00FF;

/// Builder for constructing scenes with demo behaviors
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new(config.camera.to_camera())
///     .with_audio(audio)
///     .add_spinning_cube(Vec3::new(0.0, 0.0, 5.0))
///     .add_frame_counter(0)
///     .with_camera_movement(0.5)
///     .build();
/// ```
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Create a new scene builder around a camera
    pub fn new(camera: Camera) -> Self {
        Self {
            scene: Scene::new(camera),
        }
    }

    /// Attach an audio backend to the scene
    pub fn with_audio(mut self, audio: Arc<dyn AudioBackend>) -> Self {
        self.scene.ctx_mut().set_audio(audio);
        self
    }

    /// Register the materials of a RON material library
    ///
    /// A missing or broken library is logged and skipped; objects then use
    /// the renderer's default material.
    pub fn with_materials<P: AsRef<Path>>(mut self, path: P) -> Self {
        match self.scene.load_materials(path.as_ref()) {
            Ok(materials) => log::debug!("Registered {} material(s)", materials.len()),
            Err(e) => log::warn!(
                "Failed to load materials from {}: {}",
                path.as_ref().display(),
                e
            ),
        }
        self
    }

    /// Register a single material
    pub fn with_material(mut self, material: Material) -> Self {
        self.scene.register_material(material);
        self
    }

    fn first_material(&self) -> Weak<Material> {
        self.scene
            .materials()
            .first()
            .map(Arc::downgrade)
            .unwrap_or_default()
    }

    /// Add a cube that spins around X and Y at half a radian per second
    ///
    /// Uses the first registered material, if any.
    pub fn add_spinning_cube(self, position: Vec3) -> Self {
        let data = RenderData::cube(&self.first_material());
        let desc = ObjectDesc::new(data)
            .with_position(position)
            .with_tick(|obj, ctx, _| {
                let step = 0.5 * ctx.delta_seconds();
                let mut rotation = obj.rotation();
                rotation.x += step;
                rotation.y += step;
                obj.set_rotation(rotation);
            });
        self.add_object(desc)
    }

    /// Add a flat plane, e.g. a floor
    pub fn add_plane(self, position: Vec3, scale: Vec3) -> Self {
        let data = RenderData::plane(&self.first_material());
        self.add_object(ObjectDesc::new(data).with_position(position).with_scale(scale))
    }

    /// Add an invisible object that starts the background music on its first tick
    ///
    /// Playback failures are reported through the scene's soft panic. An
    /// empty path adds nothing.
    pub fn with_music(self, path: impl Into<String>, volume: u8) -> Self {
        let path = path.into();
        if path.is_empty() {
            log::debug!("No background music configured");
            return self;
        }
        let desc = ObjectDesc::default().with_tick(move |obj, ctx, _| {
            obj.set_tick(None);
            let Some(audio) = ctx.audio() else {
                log::warn!("No audio backend, not playing {}", path);
                return;
            };
            let location = match ctx.assets() {
                Some(assets) => assets.resolve_location(&path, AssetType::Music),
                None => path.clone(),
            };
            if let Err(e) = audio.bgm_play(0, volume, &location) {
                ctx.soft_panic(&e.to_string());
            }
        });
        self.add_object(desc)
    }

    /// Add a text element showing the last frame time
    ///
    /// The text turns red when a frame takes longer than 34ms.
    pub fn add_frame_counter(mut self, slot: usize) -> Self {
        let element = UiElement::text("", 200.0, WHITE, TextAlign::Left)
            .with_position(Vec3::new(4.0, 4.0, 0.0))
            .with_tick(|el, ctx, _| {
                let ms = ctx.delta_time().as_millis();
                if let Some(text) = el.text_mut() {
                    *text = format!("Delta Time: {}ms", ms);
                }
                el.set_color(if ms > SLOW_FRAME_MS { RED } else { WHITE });
            });
        if let Err(e) = self.scene.set_ui(slot, element) {
            log::warn!("Frame counter not added: {}", e);
        }
        self
    }

    /// Move the camera while a direction is held
    ///
    /// Up/down move along Y, left/right along X, `speed` units per second.
    pub fn with_camera_movement(mut self, speed: f32) -> Self {
        self.scene.camera_mut().set_tick(Some(Box::new(move |camera: &mut Camera, ctx: &SceneCtx, input: &InputState| {
            let mut delta = Vec3::ZERO;
            if input.holding(Keys::UP) {
                delta.y += 1.0;
            }
            if input.holding(Keys::DOWN) {
                delta.y -= 1.0;
            }
            if input.holding(Keys::RIGHT) {
                delta.x += 1.0;
            }
            if input.holding(Keys::LEFT) {
                delta.x -= 1.0;
            }
            if delta != Vec3::ZERO {
                let p = camera.position();
                camera.set_position(p + delta * (speed * ctx.delta_seconds()));
            }
        })));
        self
    }

    /// Add a custom object under the root
    ///
    /// For objects that don't fit the standard patterns.
    pub fn add_object(mut self, desc: ObjectDesc) -> Self {
        let root = self.scene.root();
        if let Err(e) = self.scene.graph_mut().create_child(root, desc) {
            log::warn!("Object not added: {}", e);
        }
        self
    }

    /// Build the scene
    pub fn build(self) -> Scene {
        self.scene
    }
}
