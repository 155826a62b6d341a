//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per display refresh, no delta-time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod power;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use power::{PowerUpKind, PowerUpState};
pub use state::{Enemy, GamePhase, GameState, Player};
pub use tick::{StepOutcome, TickInput, spawn_enemies, tick};
