//! Amius - headless desktop driver
//!
//! Builds the top and bottom screen scenes, preloads assets on a loader
//! thread, then runs the engine frame loop with scripted input.

use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use amius::config::AppConfig;
use amius::input::{InputMapper, InputScript};
use amius::loader::{LoadReport, Loader};
use amius::platform::{DirectoryAssets, LogAudio};
use amius::scene::SceneBuilder;
use amius::systems::{RenderSystem, SimulationSystem};
use amius_channel::ChannelOrder;
use amius_core::{AudioBackend, Engine, EngineFlow, PanicHook, Vec3};

fn main() -> ExitCode {
    let config = AppConfig::load();
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Amius");

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mapper = InputMapper::with_overrides(&config.input.bindings).unwrap_or_else(|e| {
        log::warn!("{}. Using default key bindings.", e);
        InputMapper::new()
    });

    let audio = Arc::new(LogAudio::new());
    let assets = Arc::new(DirectoryAssets::new(&config.engine.assets_dir));

    // A soft panic ends the run after the current frame
    let fatal = Arc::new(AtomicBool::new(false));
    let fatal_flag = Arc::clone(&fatal);
    let panic_hook: PanicHook = Arc::new(move |reason: &str| {
        log::error!("Fatal error: {}", reason);
        fatal_flag.store(true, Ordering::SeqCst);
    });
    let engine = Engine::new(config.engine.platform.clone(), panic_hook, assets.clone());
    log::info!("Engine running on platform '{}'", engine.platform());

    let materials_path = Path::new(&config.engine.assets_dir).join(&config.engine.materials);
    let mut top = SceneBuilder::new(config.camera.to_camera())
        .with_audio(audio.clone())
        .with_materials(&materials_path)
        .add_plane(Vec3::new(0.0, -1.0, 5.0), Vec3::new(10.0, 1.0, 10.0))
        .add_spinning_cube(Vec3::new(0.0, 0.0, 5.0))
        .with_music(config.engine.music.clone(), config.engine.music_volume)
        .with_camera_movement(config.camera.move_speed)
        .build();
    let mut bottom = SceneBuilder::new(config.camera.to_camera())
        .with_audio(audio.clone())
        .add_frame_counter(0)
        .build();
    engine.attach(&mut top);
    engine.attach(&mut bottom);

    let order = if config.channel.fifo { ChannelOrder::Fifo } else { ChannelOrder::Lifo };
    audio.loading_screen_show();
    let loader = Loader::for_scene(&top, assets.clone(), order);
    match loader.wait(config.channel.loader_timeout()) {
        LoadReport::Ready => log::info!("Assets ready"),
        LoadReport::Failed => log::warn!("Asset preload failed, continuing with default assets"),
        LoadReport::TimedOut => log::warn!("Loader timed out, continuing"),
        LoadReport::Abandoned => log::warn!("Loader exited without reporting"),
    }
    audio.loading_screen_stop();

    let mut script = InputScript::new(&config.engine.script, &mapper);
    let mut renderer = RenderSystem::new();
    let mut simulation = SimulationSystem::new(engine, config.engine.frame_time(), config.engine.max_frames);
    let stats_interval = config.debug.stats_interval;

    loop {
        let input = script.next_frame();
        if simulation.update(&input, &mut top, &mut bottom) == EngineFlow::Exit {
            break;
        }
        if fatal.load(Ordering::SeqCst) {
            break;
        }

        let top_frame = renderer.render(&mut top);
        let bottom_frame = renderer.render(&mut bottom);
        if stats_interval != 0 && simulation.frames() % stats_interval == 0 {
            log::debug!(
                "Frame {}: top {} object(s) / {} UI, bottom {} object(s) / {} UI, {}ms",
                simulation.frames(),
                top_frame.objects.len(),
                top_frame.ui_slots.len(),
                bottom_frame.objects.len(),
                bottom_frame.ui_slots.len(),
                top.ctx().delta_time().as_millis()
            );
        }

        simulation.pace();
    }

    if let Err(e) = audio.bgm_stop(0) {
        log::warn!("Failed to stop music: {}", e);
    }
    log::info!(
        "Stopped after {} frame(s), {} rendered",
        simulation.frames(),
        renderer.frames_rendered()
    );

    if fatal.load(Ordering::SeqCst) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
