//! Per-scene context handed to every callback

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::services::{AssetProvider, AudioBackend, PanicHook};

/// Timing and service access for one scene
///
/// The scene refreshes the timing at the start of every tick, so callbacks
/// see the delta between the previous tick and the current one.
pub struct SceneCtx {
    pub(crate) delta_time: Duration,
    pub(crate) tick_start: Instant,
    pub(crate) animation: Duration,
    audio: Option<Arc<dyn AudioBackend>>,
    assets: Option<Arc<dyn AssetProvider>>,
    panic_hook: Option<PanicHook>,
}

impl Default for SceneCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneCtx")
            .field("delta_time", &self.delta_time)
            .field("animation_timer", &self.animation_timer())
            .field("has_audio", &self.audio.is_some())
            .field("has_assets", &self.assets.is_some())
            .field("has_panic_hook", &self.panic_hook.is_some())
            .finish()
    }
}

impl SceneCtx {
    /// Context with no services attached
    pub fn new() -> Self {
        Self {
            delta_time: Duration::ZERO,
            tick_start: Instant::now(),
            animation: Duration::ZERO,
            audio: None,
            assets: None,
            panic_hook: None,
        }
    }

    /// Time between the previous tick start and the current one
    #[inline]
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    /// Delta time in seconds
    #[inline]
    pub fn delta_seconds(&self) -> f32 {
        self.delta_time.as_secs_f32()
    }

    /// When the current tick started
    #[inline]
    pub fn tick_start(&self) -> Instant {
        self.tick_start
    }

    /// Milliseconds of accumulated tick time, wrapping at `u32::MAX`
    pub fn animation_timer(&self) -> u32 {
        (self.animation.as_millis() % (u32::MAX as u128 + 1)) as u32
    }

    pub fn audio(&self) -> Option<&dyn AudioBackend> {
        self.audio.as_deref()
    }

    pub fn assets(&self) -> Option<&dyn AssetProvider> {
        self.assets.as_deref()
    }

    pub fn set_audio(&mut self, audio: Arc<dyn AudioBackend>) {
        self.audio = Some(audio);
    }

    pub fn set_asset_provider(&mut self, assets: Arc<dyn AssetProvider>) {
        self.assets = Some(assets);
    }

    pub fn set_panic_hook(&mut self, hook: PanicHook) {
        self.panic_hook = Some(hook);
    }

    pub fn has_panic_hook(&self) -> bool {
        self.panic_hook.is_some()
    }

    /// Report a recoverable fatal condition to the host
    ///
    /// Without a hook the reason is only logged.
    pub fn soft_panic(&self, reason: &str) {
        match &self.panic_hook {
            Some(hook) => hook(reason),
            None => log::error!("Soft panic with no hook installed: {}", reason),
        }
    }

    /// Start a new tick: delta is measured from the previous tick start
    pub(crate) fn begin_tick(&mut self) {
        let now = Instant::now();
        self.delta_time = now.saturating_duration_since(self.tick_start);
        self.tick_start = now;
    }

    /// Fold the current delta into the animation timer
    pub(crate) fn advance_animation(&mut self) {
        self.animation += self.delta_time;
    }
}
