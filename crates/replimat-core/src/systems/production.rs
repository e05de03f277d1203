//! Production system - advances terminal replication cycles, tallies power draw

use std::collections::BTreeMap;

use hecs::World;

use crate::components::{NetworkId, NetworkMember, ReplicatorTerminal};

/// Advance every terminal by one tick
pub fn production_system(world: &mut World) {
    for (_, building) in world.query_mut::<&mut ReplicatorTerminal>() {
        building.terminal.on_tick();
    }
}

/// Total terminal draw in watts, per network
pub fn network_power_draw(world: &World) -> BTreeMap<NetworkId, f32> {
    let mut draw = BTreeMap::new();
    for (_, (building, member)) in world
        .query::<(&ReplicatorTerminal, &NetworkMember)>()
        .iter()
    {
        *draw.entry(member.network).or_insert(0.0) += building.terminal.power_draw();
    }
    draw
}

#[cfg(test)]
mod tests {
    use super::*;
    use replimat_logic::settings::ReplicatorSettings;

    #[test]
    fn test_production_counts_down() {
        let mut world = World::new();
        let mut building = ReplicatorTerminal::new("T1", ReplicatorSettings::default());
        building.terminal.state.start(2);
        let entity = world.spawn((building,));

        production_system(&mut world);
        assert!(world.get::<&ReplicatorTerminal>(entity).unwrap().terminal.is_producing());
        production_system(&mut world);
        assert!(!world.get::<&ReplicatorTerminal>(entity).unwrap().terminal.is_producing());
    }

    #[test]
    fn test_power_draw_per_network() {
        let mut world = World::new();
        let settings = ReplicatorSettings::default();
        let mut busy = ReplicatorTerminal::new("T1", settings.clone());
        busy.terminal.state.start(10);
        let idle = ReplicatorTerminal::new("T2", settings.clone());
        let other = ReplicatorTerminal::new("T3", settings);

        world.spawn((busy, NetworkMember { network: NetworkId(0) }));
        world.spawn((idle, NetworkMember { network: NetworkId(0) }));
        world.spawn((other, NetworkMember { network: NetworkId(1) }));

        let draw = network_power_draw(&world);
        assert_eq!(draw[&NetworkId(0)], 1625.0);
        assert_eq!(draw[&NetworkId(1)], 125.0);
    }
}
