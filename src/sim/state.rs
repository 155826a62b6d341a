//! Game state and core simulation types
//!
//! The whole session lives in one owned `GameState` aggregate so the
//! simulation step is a function of (state, input) with no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::power::PowerUpState;
use crate::consts::*;
use crate::vehicles::{self, VehicleSpec};

/// Session phase. Only `Running` advances the simulation; every other
/// phase leaves entity and score state frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start / vehicle-select screens, no session in progress
    Menu,
    /// 3-2-1-GO gate before entering Running (wall-clock, shell-driven)
    Countdown,
    /// Active gameplay
    Running,
    /// Frozen mid-session. `auto` marks a pause forced by lost visibility
    /// so the UI can show a distinct indicator; resuming still goes
    /// through the countdown either way.
    Paused { auto: bool },
    /// Session ended by a collision
    GameOver,
}

/// The player's car. x is continuous within the road bounds, y is fixed.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// One-hit shield granted by the SHIELD power-up
    pub shield: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(230.0, PLAYER_Y),
            shield: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CAR_W, CAR_H)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// An oncoming car. x is snapped to one of the five lanes at spawn and
/// never changes; y scrolls down by the current speed each tick.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Index into the enemy art variants (stable across the session)
    pub asset: usize,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CAR_W, CAR_H)
    }

    /// Past the visible area plus the cull margin
    pub fn off_screen(&self) -> bool {
        self.pos.y >= SURFACE_H + CULL_MARGIN
    }
}

/// Complete per-session state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for lane choice and power-up variants
    pub rng: Pcg32,
    /// Index into `vehicles::CATALOG`; always valid and unlocked
    /// (enforced at the UI boundary)
    pub vehicle: usize,
    pub phase: GamePhase,
    pub player: Player,
    /// Oncoming cars in spawn order
    pub enemies: Vec<Enemy>,
    /// Monotonic distance accumulator (continuous)
    pub distance: f32,
    /// Derived integer score, never decreases within a session
    pub score: u32,
    /// Current scroll speed after vehicle and power-up modifiers
    pub speed: f32,
    /// Ticks since the last spawn burst
    pub spawn_timer: u32,
    pub power: PowerUpState,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create state for the menu screen; `start()` begins a session.
    pub fn new(seed: u64, vehicle: usize) -> Self {
        debug_assert!(vehicle < vehicles::CATALOG.len());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            vehicle,
            phase: GamePhase::Menu,
            player: Player::new(),
            enemies: Vec::new(),
            distance: 0.0,
            score: 0,
            speed: BASE_SPEED,
            spawn_timer: 0,
            power: PowerUpState::new(),
            time_ticks: 0,
        }
    }

    pub fn vehicle_spec(&self) -> &'static VehicleSpec {
        &vehicles::CATALOG[self.vehicle]
    }

    /// Current difficulty level (one per `POINTS_PER_LEVEL` points)
    pub fn level(&self) -> u32 {
        self.score / POINTS_PER_LEVEL
    }

    /// Reset session fields and enter the countdown gate. The RNG keeps
    /// advancing across sessions so restarts aren't identical.
    pub fn start(&mut self) {
        self.player = Player::new();
        self.enemies.clear();
        self.distance = 0.0;
        self.score = 0;
        self.speed = BASE_SPEED;
        self.spawn_timer = 0;
        self.power = PowerUpState::new();
        self.time_ticks = 0;
        self.phase = GamePhase::Countdown;
        log::info!(
            "session start: vehicle '{}', seed {}",
            self.vehicle_spec().name,
            self.seed
        );
    }

    /// Countdown finished; begin ticking.
    pub fn begin_running(&mut self) {
        if self.phase == GamePhase::Countdown {
            self.phase = GamePhase::Running;
        }
    }

    /// Freeze the session. Auto-pause (tab hidden / focus lost) is kept
    /// distinct from a manual pause.
    pub fn pause(&mut self, auto: bool) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused { auto };
            log::info!("paused (auto: {auto})");
        }
    }

    /// Leave pause via the countdown gate; never resumes directly.
    pub fn resume(&mut self) {
        if matches!(self.phase, GamePhase::Paused { .. }) {
            self.phase = GamePhase::Countdown;
        }
    }

    /// Abandon the session and return to the menus.
    pub fn quit_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
    }
}
