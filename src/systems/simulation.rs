//! Game simulation system
//!
//! Manages the frame loop around the engine:
//! - Frame pacing to the configured frame time
//! - Frame counting and the optional frame limit
//! - Engine update of the top and bottom scenes

use std::thread;
use std::time::{Duration, Instant};

use amius_core::{Engine, EngineFlow, InputState, Scene};

/// Drives the engine once per frame
pub struct SimulationSystem {
    engine: Engine,
    frame_time: Duration,
    max_frames: u32,
    frames: u32,
    last_frame: Instant,
}

impl SimulationSystem {
    /// `max_frames` of 0 means no limit
    pub fn new(engine: Engine, frame_time: Duration, max_frames: u32) -> Self {
        Self {
            engine,
            frame_time,
            max_frames,
            frames: 0,
            last_frame: Instant::now(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Frames run so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Run one frame
    ///
    /// Returns [`EngineFlow::Exit`] when the engine asks for it or the frame
    /// limit is reached.
    pub fn update(&mut self, input: &InputState, top: &mut Scene, bottom: &mut Scene) -> EngineFlow {
        if self.max_frames != 0 && self.frames >= self.max_frames {
            log::info!("Frame limit of {} reached", self.max_frames);
            return EngineFlow::Exit;
        }
        self.frames += 1;
        self.engine.update(input, top, Some(bottom))
    }

    /// Sleep out the rest of the frame
    pub fn pace(&mut self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame_time {
            thread::sleep(self.frame_time - elapsed);
        }
        self.last_frame = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amius_core::{AssetProvider, AssetType, Camera, Keys, Material, ServiceError, Vec3};
    use std::sync::Arc;

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

    fn system(max_frames: u32) -> SimulationSystem {
        let engine = Engine::new("test", Arc::new(|_: &str| {}), Arc::new(NoAssets));
        SimulationSystem::new(engine, Duration::from_millis(5), max_frames)
    }

    fn scene() -> Scene {
        Scene::new(Camera::new(Vec3::ZERO, Vec3::ZERO, 0.01, 1000.0, 0.7, 1.0))
    }

    #[test]
    fn test_frame_limit() {
        let mut sim = system(2);
        let (mut top, mut bottom) = (scene(), scene());
        let input = InputState::default();

        assert_eq!(sim.update(&input, &mut top, &mut bottom), EngineFlow::Continue);
        assert_eq!(sim.update(&input, &mut top, &mut bottom), EngineFlow::Continue);
        assert_eq!(sim.update(&input, &mut top, &mut bottom), EngineFlow::Exit);
        assert_eq!(sim.frames(), 2);
    }

    #[test]
    fn test_no_limit() {
        let mut sim = system(0);
        let (mut top, mut bottom) = (scene(), scene());
        for _ in 0..10 {
            assert_eq!(sim.update(&InputState::default(), &mut top, &mut bottom), EngineFlow::Continue);
        }
    }

    #[test]
    fn test_start_exits() {
        let mut sim = system(0);
        let (mut top, mut bottom) = (scene(), scene());
        let input = InputState::from_transition(Keys::empty(), Keys::START);
        assert_eq!(sim.update(&input, &mut top, &mut bottom), EngineFlow::Exit);
    }

    #[test]
    fn test_pace_waits_for_frame_time() {
        let mut sim = system(0);
        let start = Instant::now();
        sim.pace();
        sim.pace();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
