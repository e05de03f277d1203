//! Replimat Core - Colony Replicator Simulation Engine
//!
//! An ECS-based simulation of a colony fed by replicator terminals that
//! draw on shared feedstock networks.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Terminals, replicator computers, colonists
//! - **Components**: Pure data attached to entities (NetworkMember, Hunger, Diet, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! All replication decisions are delegated to `replimat_logic`; this crate
//! only schedules them and owns the world.
//!
//! # Example
//!
//! ```rust,no_run
//! use replimat_core::prelude::*;
//! use replimat_core::generation::ColonyConfig;
//! use replimat_logic::catalog::Catalog;
//! use replimat_logic::settings::ReplicatorSettings;
//!
//! let mut engine = ColonyEngine::new(Catalog::vanilla(), ReplicatorSettings::default(), 42);
//!
//! // Generate networks, terminals and colonists
//! engine.generate(&ColonyConfig::default());
//!
//! // Run simulation
//! loop {
//!     engine.update(1); // one tick
//! }
//! ```

pub mod components;
pub mod engine;
pub mod error;
pub mod generation;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::ColonyEngine;
    pub use crate::error::EngineError;
    pub use crate::systems::FeedingEvent;
}
