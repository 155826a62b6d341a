//! Flavor message ticker for the top banner
//!
//! Picks an occasional line while the session runs: random encouragement,
//! score milestones, and a nudge when the stored record is close. One
//! message at a time; a visible message blocks new picks until it fades.

use rand::Rng;

/// Random encouragement lines
pub const FLAVOR_LINES: [&str; 8] = [
    "Don't give up!",
    "Eyes on the road!",
    "Stay in your lane... or don't",
    "Overtake like you mean it",
    "Smooth driving!",
    "The road goes on forever",
    "Half throttle is no throttle",
    "Records are made to be broken",
];

/// Ticks a message stays up
const DISPLAY_TICKS: u32 = 120;
/// Fade window at the end of the display time
const FADE_TICKS: u32 = 40;
/// Per-tick chance of a random line once eligible
const RANDOM_CHANCE: f64 = 0.002;

/// Banner state, advanced once per running tick
#[derive(Debug, Clone, Default)]
pub struct MessageTicker {
    current: Option<String>,
    ticks_left: u32,
    /// Score when the last message fired (rate-limits picks)
    last_score: u32,
}

impl MessageTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message now unless one is already visible
    pub fn trigger(&mut self, text: impl Into<String>, score: u32) {
        if self.ticks_left > 0 {
            return;
        }
        self.current = Some(text.into());
        self.ticks_left = DISPLAY_TICKS;
        self.last_score = score;
    }

    /// Advance the fade and, when idle, maybe pick a new line
    pub fn update(&mut self, score: u32, high_score: u32, rng: &mut impl Rng) {
        if self.ticks_left > 0 {
            self.ticks_left -= 1;
            if self.ticks_left == 0 {
                self.current = None;
            }
            return;
        }

        let since_last = score.saturating_sub(self.last_score);

        if since_last > 500 && rng.random_bool(RANDOM_CHANCE) {
            let line = FLAVOR_LINES[rng.random_range(0..FLAVOR_LINES.len())];
            self.trigger(line, score);
            return;
        }

        if score > 0 && score.is_multiple_of(1000) && since_last > 300 {
            self.trigger(format!("{score} points! Awesome!"), score);
            return;
        }

        if high_score > 0 && score + 200 > high_score && score < high_score && since_last > 400 {
            self.trigger("Almost beat your record!", score);
        }
    }

    /// Current text and alpha, if anything is visible
    pub fn visible(&self) -> Option<(&str, f32)> {
        let text = self.current.as_deref()?;
        let alpha = if self.ticks_left >= FADE_TICKS {
            1.0
        } else {
            self.ticks_left as f32 / FADE_TICKS as f32
        };
        Some((text, alpha))
    }

    /// Drop whatever is showing (pause/game-over hides the banner)
    pub fn clear(&mut self) {
        self.current = None;
        self.ticks_left = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_trigger_and_fade() {
        let mut ticker = MessageTicker::new();
        let mut rng = Pcg32::seed_from_u64(1);

        ticker.trigger("hello", 0);
        let (text, alpha) = ticker.visible().unwrap();
        assert_eq!(text, "hello");
        assert_eq!(alpha, 1.0);

        for _ in 0..(DISPLAY_TICKS - FADE_TICKS / 2) {
            ticker.update(0, 0, &mut rng);
        }
        let (_, alpha) = ticker.visible().unwrap();
        assert!(alpha < 1.0 && alpha > 0.0);

        for _ in 0..FADE_TICKS {
            ticker.update(0, 0, &mut rng);
        }
        assert!(ticker.visible().is_none());
    }

    #[test]
    fn test_visible_message_blocks_new_picks() {
        let mut ticker = MessageTicker::new();
        ticker.trigger("first", 0);
        ticker.trigger("second", 0);
        assert_eq!(ticker.visible().unwrap().0, "first");
    }

    #[test]
    fn test_milestone_message() {
        let mut ticker = MessageTicker::new();
        let mut rng = Pcg32::seed_from_u64(2);
        // last_score close enough that the random-line branch can't fire
        ticker.last_score = 600;
        ticker.update(1000, 0, &mut rng);
        assert_eq!(ticker.visible().unwrap().0, "1000 points! Awesome!");
    }

    #[test]
    fn test_near_record_nudge() {
        let mut ticker = MessageTicker::new();
        let mut rng = Pcg32::seed_from_u64(3);
        // Within 200 of the record but not past it
        ticker.last_score = 1400;
        ticker.update(1850, 2000, &mut rng);
        assert_eq!(ticker.visible().unwrap().0, "Almost beat your record!");

        // Matching the record exactly is not "almost"
        let mut ticker = MessageTicker::new();
        ticker.last_score = 1900;
        ticker.update(2000, 2000, &mut rng);
        assert!(ticker.visible().is_none());
    }

    #[test]
    fn test_random_line_rate_limited_by_score() {
        let mut ticker = MessageTicker::new();
        let mut rng = Pcg32::seed_from_u64(4);
        // Not eligible until 500 points since the last message
        for _ in 0..5000 {
            ticker.update(400, 0, &mut rng);
            assert!(ticker.visible().is_none());
        }
    }
}
