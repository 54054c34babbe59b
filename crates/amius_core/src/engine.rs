//! Frame driver for one or two scenes

use std::fmt;
use std::sync::Arc;

use amius_input::{InputState, Keys};

use crate::scene::Scene;
use crate::services::{AssetProvider, PanicHook};

/// What the host loop should do after an update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineFlow {
    Continue,
    Exit,
}

/// Routes input to the top and bottom scenes once per frame
///
/// START requests exit; SELECT triggers a test soft panic.
pub struct Engine {
    platform: String,
    panic_hook: PanicHook,
    assets: Arc<dyn AssetProvider>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(platform: impl Into<String>, panic_hook: PanicHook, assets: Arc<dyn AssetProvider>) -> Self {
        Self {
            platform: platform.into(),
            panic_hook,
            assets,
        }
    }

    /// Platform name reported by the host
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn assets(&self) -> &Arc<dyn AssetProvider> {
        &self.assets
    }

    /// Wire the panic hook and asset provider into a scene
    pub fn attach(&self, scene: &mut Scene) {
        let ctx = scene.ctx_mut();
        ctx.set_panic_hook(Arc::clone(&self.panic_hook));
        ctx.set_asset_provider(Arc::clone(&self.assets));
    }

    /// Handle engine keys, then tick the top scene and the bottom scene
    pub fn update(&self, input: &InputState, top: &mut Scene, bottom: Option<&mut Scene>) -> EngineFlow {
        if input.pressed(Keys::START) {
            log::info!("Exit requested");
            return EngineFlow::Exit;
        }
        if input.pressed(Keys::SELECT) {
            (self.panic_hook)("User initiated test");
        }

        top.tick(input);
        if let Some(bottom) = bottom {
            bottom.tick(input);
        }
        EngineFlow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::object::ObjectDesc;
    use crate::render::Material;
    use crate::services::{AssetType, ServiceError};
    use amius_math::Vec3;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Mutex;

    struct NoAssets;

    impl AssetProvider for NoAssets {
        fn resolve_location(&self, path: &str, _kind: AssetType) -> String {
            path.to_string()
        }
        fn load_material(&self, _material: &Material) -> Result<(), ServiceError> {
            Ok(())
        }
        fn load_model(&self, _path: &str) -> Result<(), ServiceError> {
            Ok(())
        }
        fn load_music(&self, _path: &str) -> Result<(), ServiceError> {
            Ok(())
        }
        fn load_sound_effect(&self, _path: &str) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    fn recording_engine() -> (Engine, Arc<Mutex<Vec<String>>>) {
        let panics = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&panics);
        let hook: PanicHook = Arc::new(move |reason: &str| sink.lock().unwrap().push(reason.to_string()));
        (Engine::new("test", hook, Arc::new(NoAssets)), panics)
    }

    fn counting_scene(counter: &Rc<Cell<u32>>) -> Scene {
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, Vec3::ZERO, 0.01, 1000.0, 0.7, 1.0));
        let counter = Rc::clone(counter);
        let root = scene.root();
        scene
            .graph_mut()
            .create_child(
                root,
                ObjectDesc::default().with_tick(move |_, _, _| counter.set(counter.get() + 1)),
            )
            .unwrap();
        scene
    }

    #[test]
    fn test_update_ticks_both_scenes() {
        let (engine, panics) = recording_engine();
        let top_count = Rc::new(Cell::new(0));
        let bottom_count = Rc::new(Cell::new(0));
        let mut top = counting_scene(&top_count);
        let mut bottom = counting_scene(&bottom_count);

        let flow = engine.update(&InputState::default(), &mut top, Some(&mut bottom));
        assert_eq!(flow, EngineFlow::Continue);
        assert_eq!(top_count.get(), 1);
        assert_eq!(bottom_count.get(), 1);

        engine.update(&InputState::default(), &mut top, None);
        assert_eq!(top_count.get(), 2);
        assert_eq!(bottom_count.get(), 1);
        assert!(panics.lock().unwrap().is_empty());
    }

    #[test]
    fn test_start_exits_without_ticking() {
        let (engine, _) = recording_engine();
        let count = Rc::new(Cell::new(0));
        let mut top = counting_scene(&count);

        let input = InputState::from_transition(Keys::empty(), Keys::START);
        assert_eq!(engine.update(&input, &mut top, None), EngineFlow::Exit);
        assert_eq!(count.get(), 0);

        // Holding START without a new press does not exit
        let held = InputState::from_transition(Keys::START, Keys::START);
        assert_eq!(engine.update(&held, &mut top, None), EngineFlow::Continue);
    }

    #[test]
    fn test_select_soft_panics_and_continues() {
        let (engine, panics) = recording_engine();
        let count = Rc::new(Cell::new(0));
        let mut top = counting_scene(&count);

        let input = InputState::from_transition(Keys::empty(), Keys::SELECT);
        assert_eq!(engine.update(&input, &mut top, None), EngineFlow::Continue);
        assert_eq!(*panics.lock().unwrap(), vec!["User initiated test".to_string()]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_attach_wires_context() {
        let (engine, panics) = recording_engine();
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, Vec3::ZERO, 0.01, 1000.0, 0.7, 1.0));
        assert!(!scene.ctx().has_panic_hook());

        engine.attach(&mut scene);
        assert!(scene.ctx().has_panic_hook());
        assert!(scene.ctx().assets().is_some());

        scene.ctx().soft_panic("from scene");
        assert_eq!(*panics.lock().unwrap(), vec!["from scene".to_string()]);
        assert_eq!(engine.platform(), "test");
    }
}
