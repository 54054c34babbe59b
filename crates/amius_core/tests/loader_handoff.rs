//! A loader thread preloading assets and signaling the game thread

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use amius_channel::{channel_with_order, ChannelOrder, TryRecvError};
use amius_core::{
    AssetProvider, AssetType, Camera, GameBoundMessage, Material, MessageType, Scene, ServiceError, Vec3,
};

#[derive(Default)]
struct SlowAssets {
    loaded: Mutex<Vec<String>>,
}

impl AssetProvider for SlowAssets {
    fn resolve_location(&self, path: &str, _kind: AssetType) -> String {
        format!("romfs:/{}", path.trim_start_matches('/'))
    }

    fn load_material(&self, material: &Material) -> Result<(), ServiceError> {
        thread::sleep(Duration::from_millis(5));
        self.loaded.lock().unwrap().push(material.shader_path.clone());
        Ok(())
    }

    fn load_model(&self, path: &str) -> Result<(), ServiceError> {
        self.loaded.lock().unwrap().push(path.to_string());
        Ok(())
    }

    fn load_music(&self, path: &str) -> Result<(), ServiceError> {
        self.load_model(path)
    }

    fn load_sound_effect(&self, path: &str) -> Result<(), ServiceError> {
        self.load_model(path)
    }
}

#[test]
fn test_loader_signals_ready_after_preload() {
    let assets = Arc::new(SlowAssets::default());
    let (tx, rx) = channel_with_order::<GameBoundMessage>(ChannelOrder::Fifo);

    let materials = vec![Material::new("shaders/basic"), Material::new("shaders/lit")];
    let loader_assets = Arc::clone(&assets);
    let loader = thread::spawn(move || {
        for material in &materials {
            if loader_assets.load_material(material).is_err() {
                let _ = tx.send(GameBoundMessage::new(MessageType::Panic));
                return;
            }
        }
        let _ = tx.send(GameBoundMessage::new(MessageType::Ready));
        let _ = tx.send(GameBoundMessage::new(MessageType::End));
        // Keep the channel open until the game thread has drained it
        while !tx.is_empty() {
            thread::sleep(Duration::from_millis(1));
        }
    });

    let first = rx.recv_block().unwrap();
    assert_eq!(first.kind, MessageType::Ready);
    let second = rx.recv_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(second.kind, MessageType::End);

    loader.join().unwrap();
    assert_eq!(rx.try_recv(), Err(TryRecvError::HungUp));
    assert_eq!(*assets.loaded.lock().unwrap(), vec!["shaders/basic", "shaders/lit"]);
}

#[test]
fn test_scene_preload_through_shared_provider() {
    let assets = Arc::new(SlowAssets::default());
    let mut scene = Scene::new(Camera::new(Vec3::ZERO, Vec3::ZERO, 0.01, 1000.0, 0.7, 1.0));
    scene.ctx_mut().set_asset_provider(assets.clone());
    scene.register_material(Material::new("shaders/basic"));
    scene.register_model("models/amius");

    scene.preload_assets().unwrap();
    assert_eq!(*assets.loaded.lock().unwrap(), vec!["shaders/basic", "models/amius"]);
    assert_eq!(
        scene.ctx().assets().unwrap().resolve_location("/music/Rest", AssetType::Music),
        "romfs:/music/Rest"
    );
}
