//! Hunger system - colonists get hungrier every tick

use crate::components::{Colonist, Hunger};
use hecs::World;

/// Grow hunger for all colonists
pub fn hunger_system(world: &mut World, ticks: u32) {
    for (_, (_, hunger)) in world.query_mut::<(&Colonist, &mut Hunger)>() {
        hunger.grow(ticks);
    }
}

/// Colonists at or above the hungry threshold
pub fn find_hungry(world: &World) -> Vec<hecs::Entity> {
    let mut hungry: Vec<hecs::Entity> = world
        .query::<(&Colonist, &Hunger)>()
        .iter()
        .filter(|(_, (_, hunger))| hunger.is_hungry())
        .map(|(entity, _)| entity)
        .collect();
    hungry.sort_by_key(|entity| entity.id());
    hungry
}
