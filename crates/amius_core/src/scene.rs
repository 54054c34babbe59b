//! Scenes
//!
//! A [`Scene`] owns one object tree, a fixed table of UI slots, a camera, the
//! material and model registries, and the context its callbacks see. One call
//! to [`Scene::tick`] advances everything by one frame.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Weak};

use amius_input::InputState;
use serde::{Serialize, Deserialize};

use crate::camera::Camera;
use crate::context::SceneCtx;
use crate::graph::{AttachError, SceneGraph};
use crate::object::ObjectKey;
use crate::render::{Material, Model};
use crate::services::{AudioBackend, ServiceError};
use crate::ui::{UiElement, UiHandle};

/// Number of UI slots in every scene
pub const UI_SLOTS: usize = 256;

/// On-disk material library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialLibrary {
    pub materials: Vec<Material>,
}

/// Error from a scene operation
#[derive(Debug)]
pub enum SceneError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// UI slot index past [`UI_SLOTS`]
    SlotOutOfRange(usize),
    /// An operation needed an asset provider and none was set
    NoAssetProvider,
    /// The asset provider failed
    Service(ServiceError),
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::Parse(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::Serialize(e)
    }
}

impl From<ServiceError> for SceneError {
    fn from(e: ServiceError) -> Self {
        SceneError::Service(e)
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneError::Serialize(e) => write!(f, "Serialize error: {}", e),
            SceneError::SlotOutOfRange(slot) => {
                write!(f, "UI slot {} out of range (max {})", slot, UI_SLOTS - 1)
            }
            SceneError::NoAssetProvider => write!(f, "No asset provider attached"),
            SceneError::Service(e) => write!(f, "Service error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

/// A world, its UI and its camera
pub struct Scene {
    graph: SceneGraph,
    ui: Vec<Option<UiElement>>,
    materials: Vec<Arc<Material>>,
    models: Vec<Arc<Model>>,
    camera: Camera,
    ctx: SceneCtx,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("graph", &self.graph)
            .field("ui_elements", &self.ui.iter().flatten().count())
            .field("materials", &self.materials.len())
            .field("models", &self.models.len())
            .field("camera", &self.camera)
            .field("ctx", &self.ctx)
            .finish()
    }
}

impl Scene {
    /// Create a scene with an empty root and no UI
    pub fn new(camera: Camera) -> Self {
        Self {
            graph: SceneGraph::new(),
            ui: (0..UI_SLOTS).map(|_| None).collect(),
            materials: Vec::new(),
            models: Vec::new(),
            camera,
            ctx: SceneCtx::new(),
        }
    }

    /// Attach an audio backend
    pub fn with_audio(mut self, audio: Arc<dyn AudioBackend>) -> Self {
        self.ctx.set_audio(audio);
        self
    }

    #[inline]
    pub fn root(&self) -> ObjectKey {
        self.graph.root()
    }

    #[inline]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    #[inline]
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    pub fn ctx(&self) -> &SceneCtx {
        &self.ctx
    }

    #[inline]
    pub fn ctx_mut(&mut self) -> &mut SceneCtx {
        &mut self.ctx
    }

    /// Attach an object directly under the root
    pub fn attach(&mut self, child: ObjectKey) -> Result<(), AttachError> {
        let root = self.graph.root();
        self.graph.add_child(root, child)
    }

    /// Place a UI element in a slot, dropping any element already there
    pub fn set_ui(&mut self, slot: usize, element: UiElement) -> Result<UiHandle, SceneError> {
        let entry = self.ui.get_mut(slot).ok_or(SceneError::SlotOutOfRange(slot))?;
        let handle = element.handle(slot);
        if entry.replace(element).is_some() {
            log::debug!("Replaced UI element in slot {}", slot);
        }
        Ok(handle)
    }

    pub fn ui(&self, slot: usize) -> Option<&UiElement> {
        self.ui.get(slot)?.as_ref()
    }

    pub fn ui_mut(&mut self, slot: usize) -> Option<&mut UiElement> {
        self.ui.get_mut(slot)?.as_mut()
    }

    /// Handle to the element in a slot
    pub fn ui_handle(&self, slot: usize) -> Option<UiHandle> {
        self.ui(slot).map(|el| el.handle(slot))
    }

    /// Resolve a handle, if its element is still in its slot
    pub fn ui_by_handle(&mut self, handle: &UiHandle) -> Option<&mut UiElement> {
        self.ui_mut(handle.slot()).filter(|el| el.is_named_by(handle))
    }

    /// Take the element out of a slot
    pub fn remove_ui(&mut self, slot: usize) -> Option<UiElement> {
        self.ui.get_mut(slot)?.take()
    }

    pub fn first_free_ui_slot(&self) -> Option<usize> {
        self.ui.iter().position(Option::is_none)
    }

    /// Elements in slot order with their slot index
    pub fn ui_elements(&self) -> impl Iterator<Item = (usize, &UiElement)> {
        self.ui.iter().enumerate().filter_map(|(i, el)| Some((i, el.as_ref()?)))
    }

    /// Add a material to the registry
    pub fn register_material(&mut self, material: Material) -> Weak<Material> {
        let material = Arc::new(material);
        let weak = Arc::downgrade(&material);
        self.materials.push(material);
        weak
    }

    /// Add a model to the registry
    pub fn register_model(&mut self, path: impl Into<String>) -> Weak<Model> {
        let model = Arc::new(Model::new(path));
        let weak = Arc::downgrade(&model);
        self.models.push(model);
        weak
    }

    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    pub fn models(&self) -> &[Arc<Model>] {
        &self.models
    }

    /// Register every material of a RON material library
    pub fn load_materials<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<Weak<Material>>, SceneError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let library: MaterialLibrary = ron::from_str(&contents)?;
        log::info!(
            "Loaded {} material(s) from {}",
            library.materials.len(),
            path.as_ref().display()
        );
        Ok(library
            .materials
            .into_iter()
            .map(|m| self.register_material(m))
            .collect())
    }

    /// Write the material registry as a RON material library
    pub fn save_materials<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let library = MaterialLibrary {
            materials: self.materials.iter().map(|m| Material::clone(m)).collect(),
        };
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(&library, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Ask the asset provider to load every registered material and model
    ///
    /// Stops at the first failure.
    pub fn preload_assets(&self) -> Result<(), SceneError> {
        let assets = self.ctx.assets().ok_or(SceneError::NoAssetProvider)?;
        for material in &self.materials {
            assets.load_material(material)?;
        }
        for model in &self.models {
            assets.load_model(&model.path)?;
        }
        log::debug!(
            "Preloaded {} material(s) and {} model(s)",
            self.materials.len(),
            self.models.len()
        );
        Ok(())
    }

    /// Advance the scene by one frame
    ///
    /// Objects tick first (pre-order), then UI elements in slot order, then
    /// the camera. The camera callback therefore sees this frame's objects,
    /// and objects see last frame's camera.
    pub fn tick(&mut self, input: &InputState) {
        self.ctx.begin_tick();

        let root = self.graph.root();
        self.graph.tick_all(root, &self.ctx, input);

        for element in self.ui.iter_mut().flatten() {
            if let Some(mut tick) = element.tick.take() {
                element.tick_replaced = false;
                tick(element, &self.ctx, input);
                if !element.tick_replaced {
                    element.tick = Some(tick);
                }
            }
        }

        if let Some(mut tick) = self.camera.tick.take() {
            self.camera.tick_replaced = false;
            tick(&mut self.camera, &self.ctx, input);
            if !self.camera.tick_replaced {
                self.camera.tick = Some(tick);
            }
        }

        self.ctx.advance_animation();
    }
}
