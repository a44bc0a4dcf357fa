//! Pollo Loco - a side-scrolling action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, actors, spawning, world tick)
//! - `renderer`: Render sink seam and the per-frame render tick
//! - `audio`: Named audio cues and the audio sink seam
//! - `game`: Fixed-timestep driver that owns one World at a time
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod autopilot;
pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::Error;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default logic tick period in milliseconds (25 Hz)
    pub const LOGIC_PERIOD_MS: u64 = 40;
    /// Maximum logic ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will simulate (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Canvas dimensions (world units are canvas pixels)
    pub const CANVAS_WIDTH: f32 = 720.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Health ceiling for every damageable entity
    pub const MAX_ENERGY: u8 = 100;

    /// Character is kept this far from the left edge of the view
    pub const CAMERA_LEAD: f32 = 100.0;

    /// Anything airborne below this line has left the world
    pub const WORLD_FLOOR_Y: f32 = 1000.0;

    /// Minimum overlap (both axes) before two hit boxes count as touching
    pub const COLLISION_TOLERANCE: f32 = 1.0;
}

/// Convert a millisecond duration to seconds
#[inline]
pub fn ms_to_secs(ms: u64) -> f32 {
    ms as f32 / 1000.0
}
