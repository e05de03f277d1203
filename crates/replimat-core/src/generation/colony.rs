//! Colony generation - feedstock networks with terminals, computers and colonists

use hecs::{Entity, World};
use rand::Rng;
use replimat_logic::catalog::Catalog;
use replimat_logic::constants::meals;
use replimat_logic::eligibility::ConsumerPolicy;
use replimat_logic::feedstock::FeedstockTank;
use replimat_logic::settings::ReplicatorSettings;

use super::names::generate_name;
use crate::components::*;
use crate::systems::FeedstockNetworks;

/// Colony generation configuration
#[derive(Debug, Clone)]
pub struct ColonyConfig {
    pub network_count: u32,
    pub tanks_per_network: u32,
    /// Litres per tank
    pub tank_capacity: f64,
    /// Fraction of each tank filled at start (0-1)
    pub initial_fill: f64,
    pub terminals_per_network: u32,
    pub colonists_per_network: u32,
    /// Whether each network gets a working replicator computer
    pub with_computers: bool,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            network_count: 2,
            tanks_per_network: 2,
            tank_capacity: 200.0,
            initial_fill: 0.75,
            terminals_per_network: 2,
            colonists_per_network: 6,
            with_computers: true,
        }
    }
}

/// Entities created by [`generate_colony`]
#[derive(Debug, Clone, Default)]
pub struct ColonyLayout {
    pub networks: Vec<NetworkId>,
    pub terminals: Vec<Entity>,
    pub computers: Vec<Entity>,
    pub colonists: Vec<Entity>,
}

/// Food restriction presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietKind {
    Unrestricted,
    Vegetarian,
    Carnivore,
    PasteOnly,
}

impl DietKind {
    pub fn policy(self, catalog: &Catalog) -> ConsumerPolicy {
        match self {
            DietKind::Unrestricted => ConsumerPolicy::unrestricted(catalog),
            DietKind::Vegetarian => ConsumerPolicy::allowing(
                catalog.def_names().into_iter().filter(|n| !n.ends_with("_Meat")),
            ),
            DietKind::Carnivore => ConsumerPolicy::allowing(
                catalog.def_names().into_iter().filter(|n| !n.ends_with("_Veg")),
            ),
            DietKind::PasteOnly => ConsumerPolicy::allowing([meals::NUTRIENT_PASTE]),
        }
    }

    /// Mostly unrestricted, with a few picky eaters
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..10) {
            0..=5 => DietKind::Unrestricted,
            6 | 7 => DietKind::Vegetarian,
            8 => DietKind::Carnivore,
            _ => DietKind::PasteOnly,
        }
    }
}

/// Generate networks and populate them
pub fn generate_colony(
    world: &mut World,
    networks: &mut FeedstockNetworks,
    config: &ColonyConfig,
    catalog: &Catalog,
    settings: &ReplicatorSettings,
    rng: &mut impl Rng,
) -> ColonyLayout {
    let mut layout = ColonyLayout::default();
    let fill = config.initial_fill.clamp(0.0, 1.0);

    for _ in 0..config.network_count {
        let tanks = (0..config.tanks_per_network)
            .map(|_| FeedstockTank::new(config.tank_capacity * fill, config.tank_capacity))
            .collect();
        let network = networks.create(tanks);
        layout.networks.push(network);
        let member = NetworkMember { network };

        if config.with_computers {
            layout
                .computers
                .push(world.spawn((Computer { working: true }, member)));
        }

        for i in 0..config.terminals_per_network {
            let label = format!("Terminal {}-{}", network.0, i + 1);
            let terminal = ReplicatorTerminal::new(label, settings.clone());
            layout.terminals.push(world.spawn((terminal, member)));
        }

        for _ in 0..config.colonists_per_network {
            let colonist = Colonist {
                name: generate_name(rng),
            };
            let hunger = Hunger {
                level: rng.gen_range(0.0..0.5),
            };
            let diet = Diet {
                policy: DietKind::random(rng).policy(catalog),
            };
            layout
                .colonists
                .push(world.spawn((colonist, hunger, diet, member)));
        }
    }

    tracing::info!(
        networks = layout.networks.len(),
        terminals = layout.terminals.len(),
        colonists = layout.colonists.len(),
        "generated colony"
    );

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_default_colony() {
        let mut world = World::new();
        let mut networks = FeedstockNetworks::new();
        let catalog = Catalog::vanilla();
        let mut rng = StdRng::seed_from_u64(42);

        let layout = generate_colony(
            &mut world,
            &mut networks,
            &ColonyConfig::default(),
            &catalog,
            &ReplicatorSettings::default(),
            &mut rng,
        );

        assert_eq!(layout.networks.len(), 2);
        assert_eq!(layout.terminals.len(), 4);
        assert_eq!(layout.computers.len(), 2);
        assert_eq!(layout.colonists.len(), 12);
        for network in networks.iter() {
            assert!((network.pool.quantity() - 300.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_diet_policies() {
        let catalog = Catalog::vanilla();
        let veg = DietKind::Vegetarian.policy(&catalog);
        assert!(veg.allows(meals::FINE_VEG));
        assert!(!veg.allows(meals::LAVISH_MEAT));

        let carnivore = DietKind::Carnivore.policy(&catalog);
        assert!(carnivore.allows(meals::LAVISH_MEAT));
        assert!(!carnivore.allows(meals::LAVISH_VEG));

        let paste = DietKind::PasteOnly.policy(&catalog);
        assert!(paste.allows(meals::NUTRIENT_PASTE));
        assert!(!paste.allows(meals::SIMPLE));
    }
}
