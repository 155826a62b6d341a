//! Retro Rush - a neon lane-dodging arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, scoring, power-ups)
//! - `vehicles`: Fixed vehicle catalog with stats and unlock rules
//! - `profile`: Persisted high score / unlock state
//! - `renderer`: Canvas2D rendering (wasm only)
//! - `messages`: Flavor message ticker for the top banner

pub mod messages;
pub mod profile;
pub mod settings;
pub mod sim;
pub mod vehicles;

#[cfg(target_arch = "wasm32")]
pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use profile::Profile;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Assumed simulation rate: one tick per display refresh (~60 Hz).
    /// All durations below are tick counts at this rate.
    pub const TICK_HZ: u32 = 60;

    /// Drawing surface dimensions
    pub const SURFACE_W: f32 = 500.0;
    pub const SURFACE_H: f32 = 800.0;

    /// Road geometry: asphalt spans x in [50, 450]
    pub const ROAD_LEFT: f32 = 50.0;
    pub const ROAD_RIGHT: f32 = 450.0;
    /// The five fixed lane x-coordinates enemies spawn on
    pub const LANES: [f32; 5] = [85.0, 165.0, 245.0, 325.0, 405.0];
    /// Spacing of the scrolling center stripes / shoulder markers
    pub const STRIPE_SPACING: f32 = 80.0;

    /// Car bounding box (player and enemies share it)
    pub const CAR_W: f32 = 50.0;
    pub const CAR_H: f32 = 90.0;
    /// Player y is fixed; only x moves
    pub const PLAYER_Y: f32 = SURFACE_H - 150.0;
    /// Playable interval for the player's left edge
    pub const PLAYER_MIN_X: f32 = 60.0;
    pub const PLAYER_MAX_X: f32 = 440.0 - CAR_W;
    /// Base lateral movement per tick before the handling bonus
    pub const LATERAL_SPEED: f32 = 7.0;

    /// Enemies spawn just above the visible area
    pub const ENEMY_SPAWN_Y: f32 = -120.0;
    /// Enemies are culled once past the bottom edge by this margin
    pub const CULL_MARGIN: f32 = 120.0;
    /// Shield absorption ejects the enemy to here (culled the same step)
    pub const EJECT_Y: f32 = SURFACE_H + 200.0;

    /// Difficulty curve: speed = min(MAX, BASE + level*STEP + distance/DIV)
    pub const BASE_SPEED: f32 = 4.0;
    pub const MAX_SPEED: f32 = 10.0;
    pub const LEVEL_SPEED_STEP: f32 = 0.6;
    pub const DISTANCE_SPEED_DIV: f32 = 600.0;
    /// One difficulty level per this many points
    pub const POINTS_PER_LEVEL: u32 = 1000;
    /// Distance gained per tick is speed / this
    pub const SPEED_TO_DISTANCE: f32 = 12.0;

    /// Enemy spawn interval in ticks: max(MIN, BASE - distance/DIV)
    pub const SPAWN_INTERVAL_MIN: f32 = 80.0;
    pub const SPAWN_INTERVAL_BASE: f32 = 140.0;
    pub const SPAWN_INTERVAL_DIV: f32 = 10.0;
    /// Chance a spawn burst carries a second enemy
    pub const DOUBLE_SPAWN_CHANCE: f64 = 0.25;

    /// Power-up tuning
    pub const POWER_DURATION_TICKS: u32 = 300;
    pub const POWER_COOLDOWN_TICKS: u32 = 900;
    /// Score that grants the first power-up
    pub const FIRST_POWER_SCORE: u32 = 500;
    /// Threshold advance after each grant
    pub const POWER_SCORE_STEP: u32 = 400;
    /// Duration penalty when the shield absorbs a hit
    pub const SHIELD_HIT_PENALTY: u32 = 50;
    /// Speed multiplier while SLOW is active
    pub const SLOW_FACTOR: f32 = 0.6;
    /// Fade-out window of the "X POWER!" announcement
    pub const ANNOUNCE_TICKS: u32 = 60;
}
