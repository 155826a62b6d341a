//! Timed power-up state machine
//!
//! Exactly one power-up is active at a time. Activation is gated on a
//! running score threshold and a cooldown that starts when the previous
//! power-up expires. Durations are tick counts (see `consts::TICK_HZ`).

use rand::Rng;

use super::state::Player;
use crate::consts::*;

/// The three mutually-exclusive power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Absorbs one collision instead of ending the session
    Shield,
    /// Scales the scroll speed by `SLOW_FACTOR`
    Slow,
    /// Doubles score accrual for progress made while active
    DoubleScore,
}

impl PowerUpKind {
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "SHIELD",
            PowerUpKind::Slow => "SLOW",
            PowerUpKind::DoubleScore => "2X",
        }
    }

    /// Uniformly pick one of the three variants
    pub fn pick(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..3) {
            0 => PowerUpKind::Shield,
            1 => PowerUpKind::Slow,
            _ => PowerUpKind::DoubleScore,
        }
    }
}

/// Power-up overlay state: active variant, timers, and the rebasing
/// anchor used by the DOUBLE_SCORE score formula.
#[derive(Debug, Clone)]
pub struct PowerUpState {
    pub active: Option<PowerUpKind>,
    /// Remaining duration of the active power-up
    pub timer: u32,
    /// Reactivation block after expiry; only counts down while inactive
    pub cooldown: u32,
    /// Score at which the next power-up is granted
    pub next_score: u32,
    /// Fade-out counter for the "X POWER!" announcement
    pub announce_ticks: u32,
    /// Distance at DOUBLE_SCORE activation (score formula anchor)
    base_distance: f32,
}

impl Default for PowerUpState {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerUpState {
    pub fn new() -> Self {
        Self {
            active: None,
            timer: 0,
            cooldown: 0,
            next_score: FIRST_POWER_SCORE,
            announce_ticks: 0,
            base_distance: 0.0,
        }
    }

    /// Activation gate: threshold reached, nothing active, cooldown spent
    pub fn can_activate(&self, score: u32) -> bool {
        score >= self.next_score && self.active.is_none() && self.cooldown == 0
    }

    pub fn activate(&mut self, kind: PowerUpKind, player: &mut Player, distance: f32, score: u32) {
        debug_assert!(self.active.is_none() && self.cooldown == 0);
        self.active = Some(kind);
        self.timer = POWER_DURATION_TICKS;
        self.announce_ticks = ANNOUNCE_TICKS;
        self.next_score = score + POWER_SCORE_STEP;
        match kind {
            PowerUpKind::Shield => player.shield = true,
            PowerUpKind::Slow => {}
            PowerUpKind::DoubleScore => self.base_distance = distance,
        }
    }

    /// Speed multiplier contributed by the active power-up
    pub fn speed_factor(&self) -> f32 {
        if matches!(self.active, Some(PowerUpKind::Slow)) && self.timer > 0 {
            SLOW_FACTOR
        } else {
            1.0
        }
    }

    /// Current scoring multiplier (1 or 2)
    pub fn score_multiplier(&self) -> u32 {
        if matches!(self.active, Some(PowerUpKind::DoubleScore)) && self.timer > 0 {
            2
        } else {
            1
        }
    }

    /// Derive the score for the current tick. While DOUBLE_SCORE is active
    /// the score accrues at double rate for progress made since activation,
    /// anchored so there is no retroactive jump; otherwise it is the
    /// monotonic floor of distance.
    pub fn score_for(&self, distance: f32, prev_score: u32) -> u32 {
        if self.score_multiplier() == 2 {
            (self.base_distance + 2.0 * (distance - self.base_distance)).floor() as u32
        } else {
            prev_score.max(distance.floor() as u32)
        }
    }

    /// True when an overlapping enemy should be absorbed instead of
    /// ending the session
    pub fn shield_ready(&self, player: &Player) -> bool {
        matches!(self.active, Some(PowerUpKind::Shield)) && player.shield && self.timer > 0
    }

    /// Shield absorption: shortens the power-up rather than ending it,
    /// and spends the one-hit shield flag.
    pub fn absorb_hit(&mut self, player: &mut Player) {
        self.timer = self.timer.saturating_sub(SHIELD_HIT_PENALTY);
        player.shield = false;
    }

    /// Expiry transition. No-op when nothing is active, so a double
    /// invocation cannot double-arm the cooldown.
    pub fn expire(&mut self, player: &mut Player, distance: &mut f32, score: u32) {
        let Some(kind) = self.active else {
            return;
        };
        match kind {
            PowerUpKind::Shield => player.shield = false,
            PowerUpKind::Slow => {}
            PowerUpKind::DoubleScore => {
                // Rebase so the flat-rate formula can't undercount progress
                // that accrued under the 2x regime
                if score as f32 > *distance {
                    *distance = score as f32;
                }
            }
        }
        self.active = None;
        self.timer = 0;
        self.cooldown = POWER_COOLDOWN_TICKS;
    }

    /// Per-tick timer bookkeeping: drain the active duration (expiring at
    /// zero) or, while idle, drain the cooldown.
    pub fn tick_timers(&mut self, player: &mut Player, distance: &mut f32, score: u32) {
        if self.announce_ticks > 0 {
            self.announce_ticks -= 1;
        }
        if self.active.is_some() {
            self.timer = self.timer.saturating_sub(1);
            if self.timer == 0 {
                self.expire(player, distance, score);
            }
        } else if self.cooldown > 0 {
            self.cooldown -= 1;
        }
    }

    /// HUD gauge fill: `(fraction, charging)`. While active the bar drains
    /// with the remaining duration; while cooling down it refills.
    pub fn gauge(&self) -> Option<(f32, bool)> {
        if self.active.is_some() {
            Some((self.timer as f32 / POWER_DURATION_TICKS as f32, false))
        } else if self.cooldown > 0 {
            let refill = (POWER_COOLDOWN_TICKS - self.cooldown) as f32 / POWER_COOLDOWN_TICKS as f32;
            Some((refill, true))
        } else {
            None
        }
    }
}
