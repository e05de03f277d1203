//! Production cycle — per-terminal countdown and power draw.

use serde::{Deserialize, Serialize};

/// Terminal production phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionPhase {
    Idle,
    Producing(u32),
}

/// Ticks left in the current replication cycle. Zero means idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionState {
    pub ticks_remaining: u32,
}

impl ProductionState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_producing(&self) -> bool {
        self.ticks_remaining > 0
    }

    pub fn phase(&self) -> ProductionPhase {
        match self.ticks_remaining {
            0 => ProductionPhase::Idle,
            t => ProductionPhase::Producing(t),
        }
    }

    /// Begin (or restart) a cycle lasting `duration` ticks.
    pub fn start(&mut self, duration: u32) {
        self.ticks_remaining = duration;
    }

    /// Advance one scheduler tick.
    pub fn tick(&mut self) {
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
    }

    /// Current draw in watts.
    pub fn power_draw(&self, idle_draw: f32, active_draw: f32) -> f32 {
        if self.is_producing() {
            active_draw
        } else {
            idle_draw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let state = ProductionState::idle();
        assert!(!state.is_producing());
        assert_eq!(state.phase(), ProductionPhase::Idle);
    }

    #[test]
    fn test_countdown() {
        let mut state = ProductionState::idle();
        state.start(3);
        assert_eq!(state.phase(), ProductionPhase::Producing(3));
        state.tick();
        assert_eq!(state.phase(), ProductionPhase::Producing(2));
        state.tick();
        state.tick();
        assert_eq!(state.phase(), ProductionPhase::Idle);
    }

    #[test]
    fn test_last_tick_goes_idle() {
        let mut state = ProductionState { ticks_remaining: 1 };
        state.tick();
        assert_eq!(state.phase(), ProductionPhase::Idle);
    }

    #[test]
    fn test_idle_tick_stays_idle() {
        let mut state = ProductionState::idle();
        state.tick();
        assert_eq!(state.ticks_remaining, 0);
    }

    #[test]
    fn test_power_draw() {
        let mut state = ProductionState::idle();
        assert_eq!(state.power_draw(125.0, 1500.0), 125.0);
        state.start(120);
        assert_eq!(state.power_draw(125.0, 1500.0), 1500.0);
    }
}
