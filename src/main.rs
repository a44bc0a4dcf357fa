//! Pollo Loco entry point
//!
//! Runs a headless session: the simulation and render tick are driven at
//! the configured frame rate with logging sinks standing in for the canvas
//! and the speakers.

use pollo_loco::audio::LogAudio;
use pollo_loco::renderer::CountingSink;
use pollo_loco::sim::{GamePhase, Level};
use pollo_loco::{Game, Settings, Tuning, autopilot};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pollo Loco (headless) starting...");

    let settings_path = std::env::args().nth(1);
    let settings = Settings::load(settings_path.as_deref()).unwrap_or_else(|e| {
        log::error!("{}; using default settings", e);
        Settings::default()
    });

    let tuning = match settings.tuning_path.as_deref() {
        Some(path) => Tuning::load(path).unwrap_or_else(|e| {
            log::error!("{}; using default tuning", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let level = match settings.level_path.as_deref() {
        Some(path) => Level::load(path).unwrap_or_else(|e| {
            log::error!("{}; using level one", e);
            Level::level_one()
        }),
        None => Level::level_one(),
    };

    let mut game = Game::new(
        settings.seed,
        level,
        tuning,
        CountingSink::default(),
        LogAudio::default(),
    );

    let frame_ms = settings.frame_ms();
    let max_frames = (settings.max_seconds as f64 * 1000.0 / frame_ms).ceil() as u64;
    let mut frames = 0;
    while frames < max_frames {
        if settings.autopilot {
            game.set_input(autopilot::drive(game.world()));
        }
        frames += 1;
        if !game.frame(frame_ms) {
            break;
        }
    }

    let world = game.world();
    let outcome = match world.phase {
        GamePhase::Won => "won",
        GamePhase::Lost => "lost",
        GamePhase::Playing => "timed out",
    };
    log::info!(
        "Session {} after {:.1}s ({} frames, {} sprites): energy={} coins={} boss={:?}",
        outcome,
        world.time_ms as f64 / 1000.0,
        game.renderer().frames,
        game.renderer().sprites,
        world.character.body.energy,
        world.collected_coins(),
        world.boss().map(|b| b.body.energy)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosted builds drive `Game` from the page's frame callback instead
}
