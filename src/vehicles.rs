//! Fixed vehicle catalog
//!
//! Nine vehicles with speed/handling/acceleration stats and an unlock
//! rule each. The simulation only reads the stat modifiers; unlock
//! checks happen at the UI boundary against the persisted profile.

use crate::consts::LATERAL_SPEED;
use crate::profile::Profile;

/// Predicate deciding when a vehicle becomes available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockRule {
    /// Always available
    Starter,
    /// Stored high score reaches this value
    HighScore(u32),
    /// Beat the stored record at least once
    BeatRecord,
    /// Total sessions played reaches this value
    Plays(u32),
    /// Every other vehicle already unlocked
    AllOthers,
}

impl UnlockRule {
    pub fn satisfied(&self, profile: &Profile) -> bool {
        match self {
            UnlockRule::Starter => true,
            UnlockRule::HighScore(points) => profile.high_score >= *points,
            UnlockRule::BeatRecord => profile.records_broken > 0,
            UnlockRule::Plays(count) => profile.plays >= *count,
            UnlockRule::AllOthers => CATALOG
                .iter()
                .enumerate()
                .filter(|(_, v)| v.unlock != UnlockRule::AllOthers)
                .all(|(i, _)| profile.is_unlocked(i)),
        }
    }

    /// Requirement text for the selection menu
    pub fn describe(&self) -> String {
        match self {
            UnlockRule::Starter => "Starting Car".into(),
            UnlockRule::HighScore(points) => format!("Reach {points} points"),
            UnlockRule::BeatRecord => "Beat your record".into(),
            UnlockRule::Plays(count) => format!("Play {count} games"),
            UnlockRule::AllOthers => "Unlock all other cars".into(),
        }
    }
}

/// One catalog entry. Stats are on a 1-10 scale; 7 speed / 8 handling is
/// the neutral point where the modifiers vanish.
#[derive(Debug, Clone, Copy)]
pub struct VehicleSpec {
    pub name: &'static str,
    /// Art path, resolved by the asset layer
    pub image: &'static str,
    pub speed: u8,
    pub handling: u8,
    pub acceleration: u8,
    pub description: &'static str,
    pub unlock: UnlockRule,
}

impl VehicleSpec {
    /// Multiplier bonus applied to the difficulty-curve speed
    pub fn speed_bonus(&self) -> f32 {
        (self.speed as f32 - 7.0) * 0.1
    }

    /// Additive tweak folded into the lateral movement constant
    pub fn handling_bonus(&self) -> f32 {
        (self.handling as f32 - 8.0) * 0.05
    }

    /// Lateral movement per tick for this vehicle
    pub fn lateral_speed(&self) -> f32 {
        LATERAL_SPEED + self.handling_bonus() * 2.0
    }
}

/// The fixed catalog. Index 0 is the starter; the remaining eight double
/// as the enemy art variants.
pub const CATALOG: [VehicleSpec; 9] = [
    VehicleSpec {
        name: "Street Racer",
        image: "img/car0.png",
        speed: 7,
        handling: 8,
        acceleration: 9,
        description: "Balanced performance",
        unlock: UnlockRule::Starter,
    },
    VehicleSpec {
        name: "Speed Demon",
        image: "img/car1.png",
        speed: 9,
        handling: 6,
        acceleration: 8,
        description: "Extreme top speed",
        unlock: UnlockRule::HighScore(2000),
    },
    VehicleSpec {
        name: "Drift King",
        image: "img/car2.png",
        speed: 6,
        handling: 10,
        acceleration: 7,
        description: "Perfect control",
        unlock: UnlockRule::HighScore(3000),
    },
    VehicleSpec {
        name: "Muscle Car",
        image: "img/car3.png",
        speed: 8,
        handling: 5,
        acceleration: 10,
        description: "Rapid acceleration",
        unlock: UnlockRule::HighScore(4000),
    },
    VehicleSpec {
        name: "Sports Classic",
        image: "img/car4.png",
        speed: 7,
        handling: 9,
        acceleration: 6,
        description: "Vintage style",
        unlock: UnlockRule::HighScore(5000),
    },
    VehicleSpec {
        name: "Hyper Car",
        image: "img/car5.png",
        speed: 10,
        handling: 7,
        acceleration: 9,
        description: "Ultimate performance",
        unlock: UnlockRule::HighScore(10_000),
    },
    VehicleSpec {
        name: "Cyber Racer",
        image: "img/car6.png",
        speed: 8,
        handling: 8,
        acceleration: 8,
        description: "Futuristic tech",
        unlock: UnlockRule::BeatRecord,
    },
    VehicleSpec {
        name: "Neon Cruiser",
        image: "img/car7.png",
        speed: 6,
        handling: 9,
        acceleration: 7,
        description: "Glow in the dark",
        unlock: UnlockRule::Plays(10),
    },
    VehicleSpec {
        name: "Monster Truck",
        image: "img/car8.png",
        speed: 5,
        handling: 4,
        acceleration: 5,
        description: "Crush everything",
        unlock: UnlockRule::AllOthers,
    },
];

/// Enemy art variants (every catalog entry except the starter)
pub const ENEMY_VARIANTS: usize = CATALOG.len() - 1;

/// Catalog index of an enemy variant's art
pub fn enemy_image(variant: usize) -> &'static str {
    CATALOG[variant + 1].image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_stats_have_no_modifiers() {
        let starter = &CATALOG[0];
        assert_eq!(starter.speed_bonus(), 0.0);
        assert_eq!(starter.handling_bonus(), 0.0);
        assert_eq!(starter.lateral_speed(), LATERAL_SPEED);
    }

    #[test]
    fn test_stat_modifiers_signed() {
        let demon = &CATALOG[1]; // speed 9, handling 6
        assert!((demon.speed_bonus() - 0.2).abs() < 1e-6);
        assert!(demon.handling_bonus() < 0.0);
        assert!(demon.lateral_speed() < LATERAL_SPEED);

        let drift = &CATALOG[2]; // handling 10
        assert!(drift.lateral_speed() > LATERAL_SPEED);
    }

    #[test]
    fn test_unlock_rules() {
        let mut profile = Profile::new();
        assert!(CATALOG[0].unlock.satisfied(&profile));
        assert!(!CATALOG[1].unlock.satisfied(&profile));

        profile.high_score = 2000;
        assert!(CATALOG[1].unlock.satisfied(&profile));
        assert!(!CATALOG[2].unlock.satisfied(&profile));

        profile.plays = 10;
        assert!(CATALOG[7].unlock.satisfied(&profile));

        profile.records_broken = 1;
        assert!(CATALOG[6].unlock.satisfied(&profile));
    }

    #[test]
    fn test_all_others_rule_ignores_itself() {
        let mut profile = Profile::new();
        profile.unlocked = (0..CATALOG.len() - 1).collect();
        assert!(CATALOG[8].unlock.satisfied(&profile));

        profile.unlocked = vec![0];
        assert!(!CATALOG[8].unlock.satisfied(&profile));
    }
}
