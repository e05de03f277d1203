//! Save/Load functionality for persisting colony state
//!
//! Uses bincode for efficient binary serialization of the whole colony.
//! Components are serialized individually then reconstructed on load.
//! The item catalog is not saved; it is supplied again on load.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use hecs::World;
use replimat_logic::feedstock::FeedstockTank;
use replimat_logic::settings::ReplicatorSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::*;
use crate::systems::FeedstockNetworks;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the colony
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Ticks simulated so far
    pub tick: u64,
    /// Seed the engine's generator was created from
    pub seed: u64,
    /// Default settings for newly built terminals
    pub settings: ReplicatorSettings,
    /// Batch-produced items waiting in storage
    pub stockpile: BTreeMap<String, u32>,
    /// Feedstock networks and their tanks
    pub networks: Vec<SavedNetwork>,
    /// All entities with their components
    pub entities: Vec<SerializableEntity>,
}

/// A network's id and tank contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedNetwork {
    pub id: NetworkId,
    pub tanks: Vec<FeedstockTank>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    // Buildings
    pub terminal: Option<ReplicatorTerminal>,
    pub computer: Option<Computer>,
    pub blocked: bool,
    pub member: Option<NetworkMember>,

    // Colonists
    pub colonist: Option<Colonist>,
    pub hunger: Option<Hunger>,
    pub diet: Option<Diet>,
}

/// Extract all entities from a world into serializable form
fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    let mut entities = Vec::new();

    for entity_ref in world.iter() {
        let mut se = SerializableEntity::default();

        if let Some(c) = entity_ref.get::<&ReplicatorTerminal>() {
            se.terminal = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&Computer>() {
            se.computer = Some(*c);
        }
        se.blocked = entity_ref.has::<Blocked>();
        if let Some(c) = entity_ref.get::<&NetworkMember>() {
            se.member = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Colonist>() {
            se.colonist = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&Hunger>() {
            se.hunger = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Diet>() {
            se.diet = Some((*c).clone());
        }

        entities.push(se);
    }

    entities
}

/// Spawn an entity with all its components
fn spawn_entity(world: &mut World, se: SerializableEntity) {
    let mut builder = hecs::EntityBuilder::new();

    if let Some(c) = se.terminal {
        builder.add(c);
    }
    if let Some(c) = se.computer {
        builder.add(c);
    }
    if se.blocked {
        builder.add(Blocked);
    }
    if let Some(c) = se.member {
        builder.add(c);
    }
    if let Some(c) = se.colonist {
        builder.add(c);
    }
    if let Some(c) = se.hunger {
        builder.add(c);
    }
    if let Some(c) = se.diet {
        builder.add(c);
    }

    world.spawn(builder.build());
}

/// Borrowed engine state handed to [`save_colony`]
pub struct ColonyState<'a> {
    pub world: &'a World,
    pub networks: &'a FeedstockNetworks,
    pub settings: &'a ReplicatorSettings,
    pub stockpile: &'a BTreeMap<String, u32>,
    pub tick: u64,
    pub seed: u64,
}

/// Save the complete colony to a writer
pub fn save_colony<W: Write>(writer: W, state: ColonyState<'_>) -> Result<(), SaveError> {
    let networks = state
        .networks
        .iter()
        .map(|network| SavedNetwork {
            id: network.id,
            tanks: network.pool.tanks(),
        })
        .collect();

    let save_data = SaveData {
        version: SAVE_VERSION,
        tick: state.tick,
        seed: state.seed,
        settings: state.settings.clone(),
        stockpile: state.stockpile.clone(),
        networks,
        entities: serialize_entities(state.world),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Result of loading a colony
pub struct LoadedColony {
    pub world: World,
    pub networks: FeedstockNetworks,
    pub settings: ReplicatorSettings,
    pub stockpile: BTreeMap<String, u32>,
    pub tick: u64,
    pub seed: u64,
}

/// Load a colony from a reader
pub fn load_colony<R: Read>(reader: R) -> Result<LoadedColony, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut networks = FeedstockNetworks::new();
    for saved in save_data.networks {
        networks.insert(saved.id, saved.tanks);
    }

    let mut world = World::new();
    for se in save_data.entities {
        spawn_entity(&mut world, se);
    }

    Ok(LoadedColony {
        world,
        networks,
        settings: save_data.settings,
        stockpile: save_data.stockpile,
        tick: save_data.tick,
        seed: save_data.seed,
    })
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ColonyEngine;
    use crate::generation::ColonyConfig;
    use replimat_logic::catalog::Catalog;

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = ColonyEngine::new(Catalog::vanilla(), ReplicatorSettings::default(), 42);
        let layout = engine.generate(&ColonyConfig::default());
        engine.set_blocked(layout.terminals[0], true).expect("terminal exists");

        engine.update(500);

        let original_tick = engine.tick();
        let original_litres: Vec<f64> = engine
            .networks
            .iter()
            .map(|network| network.pool.quantity())
            .collect();

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let mut loaded = ColonyEngine::new(Catalog::vanilla(), ReplicatorSettings::default(), 0);
        loaded.load(&save_buffer[..]).expect("Load failed");

        assert_eq!(loaded.tick(), original_tick);
        assert_eq!(loaded.seed(), 42);
        assert_eq!(loaded.colonist_count(), engine.colonist_count());
        assert_eq!(loaded.terminal_count(), engine.terminal_count());
        assert_eq!(loaded.blocked_count(), 1);
        let loaded_litres: Vec<f64> = loaded
            .networks
            .iter()
            .map(|network| network.pool.quantity())
            .collect();
        assert_eq!(loaded_litres, original_litres);
    }

    #[test]
    fn test_version_mismatch() {
        let save_data = SaveData {
            version: SAVE_VERSION + 1,
            tick: 0,
            seed: 0,
            settings: ReplicatorSettings::default(),
            stockpile: BTreeMap::new(),
            networks: Vec::new(),
            entities: Vec::new(),
        };
        let bytes = bincode::serialize(&save_data).unwrap();

        assert!(matches!(
            load_colony(&bytes[..]),
            Err(SaveError::VersionMismatch { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_truncated_save() {
        assert!(matches!(
            load_colony(&[1u8, 0, 0][..]),
            Err(SaveError::Bincode(_))
        ));
    }
}
