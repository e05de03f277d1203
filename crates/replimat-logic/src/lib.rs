//! Pure replicator logic for Replimat.
//!
//! This crate contains all decision logic that is independent of any
//! engine or runtime. Functions take plain data and collaborators passed
//! in explicitly, making them unit-testable and portable across the ECS
//! engine, the native simtest, and any host game.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Replicable item kinds and preferability tiers |
//! | [`constants`] | Tick timing, power draw, meal def names, limits |
//! | [`eligibility`] | Consumer food policy and meal eligibility filter |
//! | [`error`] | Soft dispense/batch failures |
//! | [`feedstock`] | Shared feedstock pool, stock gate, batch sizing |
//! | [`production`] | Per-terminal production countdown and power draw |
//! | [`selection`] | Quality-first / balanced meal selection |
//! | [`settings`] | Replicator options, TOML loading and validation |
//! | [`terminal`] | Terminal composing the above behind collaborator traits |

pub mod catalog;
pub mod constants;
pub mod eligibility;
pub mod error;
pub mod feedstock;
pub mod production;
pub mod selection;
pub mod settings;
pub mod terminal;
