//! Colonist components: Colonist, Hunger, Diet

use replimat_logic::eligibility::ConsumerPolicy;
use serde::{Deserialize, Serialize};

/// Hunger above this sends a colonist to a terminal
pub const HUNGRY_THRESHOLD: f32 = 0.6;

/// Hunger gained per simulation tick (empty to starving in ~1.5 in-game hours)
pub const HUNGER_PER_TICK: f32 = 1.0 / 3000.0;

/// Marker + name for a colonist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colonist {
    pub name: String,
}

/// 0.0 (satisfied) to 1.0 (starving)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hunger {
    pub level: f32,
}

impl Hunger {
    pub fn is_hungry(&self) -> bool {
        self.level >= HUNGRY_THRESHOLD
    }

    /// Hunger increases over time
    pub fn grow(&mut self, ticks: u32) {
        self.level = (self.level + ticks as f32 * HUNGER_PER_TICK).clamp(0.0, 1.0);
    }

    /// Eating reduces hunger by the meal's nutrition
    pub fn eat(&mut self, nutrition: f64) {
        self.level = (self.level - nutrition as f32).clamp(0.0, 1.0);
    }
}

/// A colonist's food restriction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diet {
    pub policy: ConsumerPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hunger_grows_and_clamps() {
        let mut hunger = Hunger::default();
        hunger.grow(1500);
        assert!((hunger.level - 0.5).abs() < 0.001);
        assert!(!hunger.is_hungry());
        hunger.grow(10_000);
        assert_eq!(hunger.level, 1.0);
        assert!(hunger.is_hungry());
    }

    #[test]
    fn test_eating() {
        let mut hunger = Hunger { level: 0.8 };
        hunger.eat(0.9);
        assert_eq!(hunger.level, 0.0);
    }
}
