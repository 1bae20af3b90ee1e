use serde::{Deserialize, Serialize};

/// Default boost length in movement ticks
pub const DEFAULT_POWER_UP_TICKS: u32 = 120;

/// Score at which the boost intensity saturates
const FULL_INTENSITY_SCORE: f32 = 50.0;

/// Timed boost granted by eating food.
///
/// Purely observable today; gameplay rules can key off `active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub active: bool,
    pub ticks_remaining: u32,
}

impl PowerUp {
    /// (Re)arms the boost for `duration` ticks
    pub fn activate(&mut self, duration: u32) {
        self.active = duration > 0;
        self.ticks_remaining = duration;
    }

    /// Counts one movement tick down; switches off on reaching zero
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        if self.ticks_remaining == 0 {
            self.active = false;
        }
    }

    /// 0.0 when inactive, otherwise grows with score up to 1.0
    pub fn intensity(&self, score: u32) -> f32 {
        if !self.active {
            return 0.0;
        }
        (score as f32 / FULL_INTENSITY_SCORE).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_sets_full_duration() {
        let mut power_up = PowerUp::default();
        power_up.activate(DEFAULT_POWER_UP_TICKS);
        assert!(power_up.active);
        assert_eq!(power_up.ticks_remaining, 120);
    }

    #[test]
    fn test_expires_after_duration() {
        let mut power_up = PowerUp::default();
        power_up.activate(DEFAULT_POWER_UP_TICKS);

        for _ in 0..119 {
            power_up.tick();
        }
        assert!(power_up.active);
        assert_eq!(power_up.ticks_remaining, 1);

        power_up.tick();
        assert!(!power_up.active);
        assert_eq!(power_up.ticks_remaining, 0);

        // Stays off
        power_up.tick();
        assert!(!power_up.active);
    }

    #[test]
    fn test_reactivation_restarts_countdown() {
        let mut power_up = PowerUp::default();
        power_up.activate(10);
        power_up.tick();
        power_up.tick();
        power_up.activate(10);
        assert_eq!(power_up.ticks_remaining, 10);
    }

    #[test]
    fn test_intensity() {
        let mut power_up = PowerUp::default();
        assert_eq!(power_up.intensity(25), 0.0);

        power_up.activate(5);
        assert_eq!(power_up.intensity(0), 0.0);
        assert_eq!(power_up.intensity(25), 0.5);
        assert_eq!(power_up.intensity(500), 1.0);
    }
}
