//! Background asset preloading
//!
//! The loader thread checks every material and model with the asset provider
//! and reports the outcome to the game thread over an [`amius_channel`]
//! channel. Scenes never leave the game thread; the loader only sees plain
//! asset data.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use amius_channel::{channel_with_order, ChannelOrder, Receiver, Sender, TryRecvError, POLL_INTERVAL};
use amius_core::{AssetProvider, GameBoundMessage, Material, MessageType, Scene};

/// What the game thread learned from the loader
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadReport {
    /// Every asset was found
    Ready,
    /// An asset failed to load
    Failed,
    /// The loader did not report in time
    TimedOut,
    /// The loader went away without reporting success or failure
    Abandoned,
}

impl LoadReport {
    /// Interpret the result of waiting on the loader channel
    pub fn from_recv(result: Result<GameBoundMessage, TryRecvError>) -> Self {
        match result {
            Ok(GameBoundMessage { kind: MessageType::Ready }) => LoadReport::Ready,
            Ok(GameBoundMessage { kind: MessageType::Panic }) => LoadReport::Failed,
            Ok(GameBoundMessage { kind: MessageType::End }) => LoadReport::Abandoned,
            Err(TryRecvError::Empty) => LoadReport::TimedOut,
            Err(TryRecvError::HungUp) => LoadReport::Abandoned,
        }
    }
}

/// A running loader thread
pub struct Loader {
    rx: Receiver<GameBoundMessage>,
    handle: JoinHandle<()>,
}

impl Loader {
    /// Start preloading the registered assets of a scene
    pub fn for_scene(scene: &Scene, assets: Arc<dyn AssetProvider>, order: ChannelOrder) -> Self {
        let materials = scene.materials().iter().map(|m| Material::clone(m)).collect();
        let models = scene.models().iter().map(|m| m.path.clone()).collect();
        Self::spawn(assets, materials, models, order)
    }

    /// Start preloading the given materials and model paths
    pub fn spawn(
        assets: Arc<dyn AssetProvider>,
        materials: Vec<Material>,
        models: Vec<String>,
        order: ChannelOrder,
    ) -> Self {
        let (tx, rx) = channel_with_order::<GameBoundMessage>(order);
        let handle = thread::spawn(move || {
            let result = materials
                .iter()
                .try_for_each(|m| assets.load_material(m))
                .and_then(|()| models.iter().try_for_each(|m| assets.load_model(m)));
            let kind = match result {
                Ok(()) => MessageType::Ready,
                Err(e) => {
                    log::warn!("Asset preload failed: {}", e);
                    MessageType::Panic
                }
            };
            report(&tx, kind);
        });
        Self { rx, handle }
    }

    /// Wait up to `timeout` for the loader's report
    ///
    /// On timeout the thread is left to finish on its own; its late report
    /// fails against the closed channel.
    pub fn wait(self, timeout: Duration) -> LoadReport {
        let report = LoadReport::from_recv(self.rx.recv_timeout(timeout));
        drop(self.rx);
        if report == LoadReport::TimedOut {
            log::debug!("Detaching loader thread");
        } else if self.handle.join().is_err() {
            log::error!("Loader thread panicked");
            return LoadReport::Abandoned;
        }
        report
    }
}

// Dropping the sender discards unread items, so it stays alive until the
// game thread has taken the report or hung up.
fn report(tx: &Sender<GameBoundMessage>, kind: MessageType) {
    if let Err(e) = tx.send(GameBoundMessage::new(kind)) {
        log::warn!("Loader could not report: {}", e);
        return;
    }
    while !tx.is_empty() {
        thread::sleep(POLL_INTERVAL);
    }
}
