//! Persisted player profile
//!
//! High score, play count, and unlocked vehicles, stored in LocalStorage.
//! A missing or unreadable profile falls back to defaults (score 0, only
//! the starter unlocked) and the game keeps working.

use serde::{Deserialize, Serialize};

use crate::vehicles::{self, CATALOG};

/// Everything that outlives a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Best score across all sessions
    pub high_score: u32,
    /// Total sessions played
    pub plays: u32,
    /// How many times the stored record was beaten
    pub records_broken: u32,
    /// Catalog indices of unlocked vehicles, sorted
    pub unlocked: Vec<usize>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "retro_rush_profile";

    pub fn new() -> Self {
        Self {
            high_score: 0,
            plays: 0,
            records_broken: 0,
            unlocked: vec![0],
        }
    }

    pub fn is_unlocked(&self, vehicle: usize) -> bool {
        self.unlocked.contains(&vehicle)
    }

    /// Fold a finished session in: bump the play counter, take the high
    /// score if beaten, and refresh unlocks. Returns true on a new record.
    pub fn record_session(&mut self, score: u32) -> bool {
        self.plays += 1;
        let record = score > self.high_score;
        if record {
            log::info!("new record: {} (was {})", score, self.high_score);
            self.high_score = score;
            self.records_broken += 1;
        }
        self.refresh_unlocks();
        record
    }

    /// Re-evaluate every unlock rule. Iterates to a fixpoint because the
    /// "unlock all others" rule depends on unlocks made in the same pass.
    pub fn refresh_unlocks(&mut self) {
        loop {
            let newly: Vec<usize> = CATALOG
                .iter()
                .enumerate()
                .filter(|(i, v)| !self.is_unlocked(*i) && v.unlock.satisfied(self))
                .map(|(i, _)| i)
                .collect();
            if newly.is_empty() {
                break;
            }
            for i in newly {
                log::info!("unlocked vehicle '{}'", vehicles::CATALOG[i].name);
                self.unlocked.push(i);
            }
            self.unlocked.sort_unstable();
        }
    }

    /// Load the profile from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(profile) = serde_json::from_str::<Profile>(&json) {
                    log::info!(
                        "Loaded profile: high score {}, {} plays",
                        profile.high_score,
                        profile.plays
                    );
                    return profile;
                }
            }
        }

        log::info!("No profile found, starting fresh");
        Self::new()
    }

    /// Save the profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Profile saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
