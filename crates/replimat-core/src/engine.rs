//! Colony engine - main entry point for running the simulation

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use replimat_logic::catalog::Catalog;
use replimat_logic::eligibility::ConsumerPolicy;
use replimat_logic::feedstock::{BatchPlan, FeedstockTank};
use replimat_logic::settings::ReplicatorSettings;
use replimat_logic::terminal::{BatchOutput, TerminalStatus};

use crate::components::*;
use crate::error::EngineError;
use crate::generation::{generate_colony, ColonyConfig, ColonyLayout};
use crate::persistence::{ColonyState, SaveError};
use crate::systems::*;

/// Hungry colonists look for a terminal every half second
pub const FEEDING_INTERVAL_TICKS: u64 = 30;

/// Main colony engine
pub struct ColonyEngine {
    /// ECS world containing all entities
    pub world: World,
    /// Feedstock networks by id
    pub networks: FeedstockNetworks,
    /// Everything a terminal can replicate
    pub catalog: Catalog,
    /// Settings given to newly built terminals
    pub settings: ReplicatorSettings,
    /// Batch-produced items in storage, by def name
    pub stockpile: BTreeMap<String, u32>,

    tick: u64,
    last_feeding_tick: u64,
    seed: u64,
    rng: StdRng,
}

impl ColonyEngine {
    /// Create an empty colony. `seed` drives every random choice.
    pub fn new(catalog: Catalog, settings: ReplicatorSettings, seed: u64) -> Self {
        Self {
            world: World::new(),
            networks: FeedstockNetworks::new(),
            catalog,
            settings,
            stockpile: BTreeMap::new(),
            tick: 0,
            last_feeding_tick: 0,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate networks, buildings and colonists
    pub fn generate(&mut self, config: &ColonyConfig) -> ColonyLayout {
        let layout = generate_colony(
            &mut self.world,
            &mut self.networks,
            config,
            &self.catalog,
            &self.settings,
            &mut self.rng,
        );
        refresh_computer_links(&self.world, &mut self.networks);
        layout
    }

    pub fn add_network(&mut self, tanks: Vec<FeedstockTank>) -> NetworkId {
        self.networks.create(tanks)
    }

    fn member_of(&self, network: NetworkId) -> Result<NetworkMember, EngineError> {
        self.networks
            .get(network)
            .map(|_| NetworkMember { network })
            .ok_or(EngineError::UnknownNetwork(network))
    }

    pub fn spawn_terminal(
        &mut self,
        network: NetworkId,
        label: impl Into<String>,
    ) -> Result<Entity, EngineError> {
        let member = self.member_of(network)?;
        let terminal = ReplicatorTerminal::new(label, self.settings.clone());
        Ok(self.world.spawn((terminal, member)))
    }

    pub fn spawn_computer(&mut self, network: NetworkId, working: bool) -> Result<Entity, EngineError> {
        let member = self.member_of(network)?;
        let entity = self.world.spawn((Computer { working }, member));
        refresh_computer_links(&self.world, &mut self.networks);
        Ok(entity)
    }

    pub fn spawn_colonist(
        &mut self,
        name: impl Into<String>,
        network: NetworkId,
        policy: ConsumerPolicy,
        hunger: f32,
    ) -> Result<Entity, EngineError> {
        let member = self.member_of(network)?;
        Ok(self.world.spawn((
            Colonist { name: name.into() },
            Hunger {
                level: hunger.clamp(0.0, 1.0),
            },
            Diet { policy },
            member,
        )))
    }

    /// Obstruct or clear a terminal
    pub fn set_blocked(&mut self, terminal: Entity, blocked: bool) -> Result<(), EngineError> {
        if self.world.get::<&ReplicatorTerminal>(terminal).is_err() {
            return Err(EngineError::NotATerminal(terminal));
        }
        if blocked {
            self.world
                .insert_one(terminal, Blocked)
                .map_err(|_| EngineError::NotATerminal(terminal))?;
        } else {
            match self.world.remove_one::<Blocked>(terminal) {
                // Clearing a terminal that was never blocked is fine
                Ok(_) | Err(hecs::ComponentError::MissingComponent(_)) => {}
                Err(hecs::ComponentError::NoSuchEntity) => {
                    return Err(EngineError::NotATerminal(terminal))
                }
            }
        }
        Ok(())
    }

    /// Switch a computer on or off
    pub fn set_computer_working(&mut self, computer: Entity, working: bool) -> Result<(), EngineError> {
        match self.world.get::<&mut Computer>(computer) {
            Ok(mut c) => c.working = working,
            Err(_) => return Err(EngineError::NotAComputer(computer)),
        }
        refresh_computer_links(&self.world, &mut self.networks);
        Ok(())
    }

    /// Pump feedstock into a network's tanks. Returns litres accepted.
    pub fn refill(&mut self, network: NetworkId, litres: f64) -> Result<f64, EngineError> {
        let network = self
            .networks
            .get(network)
            .ok_or(EngineError::UnknownNetwork(network))?;
        Ok(network.pool.refill(litres))
    }

    /// Advance the simulation by `ticks`, returning every feeding outcome
    pub fn update(&mut self, ticks: u32) -> Vec<FeedingEvent> {
        let mut events = Vec::new();

        for _ in 0..ticks {
            self.tick += 1;

            refresh_computer_links(&self.world, &mut self.networks);
            production_system(&mut self.world);
            hunger_system(&mut self.world, 1);

            if self.tick - self.last_feeding_tick >= FEEDING_INTERVAL_TICKS {
                events.extend(feeding_system(
                    &mut self.world,
                    &self.networks,
                    &self.catalog,
                    &mut self.rng,
                ));
                self.last_feeding_tick = self.tick;
            }
        }

        events
    }

    fn terminal_link(&self, terminal: Entity) -> Result<(&FeedstockNetwork, bool), EngineError> {
        let member = self
            .world
            .get::<&NetworkMember>(terminal)
            .map(|m| *m)
            .map_err(|_| EngineError::Detached(terminal))?;
        let network = self
            .networks
            .get(member.network)
            .ok_or(EngineError::UnknownNetwork(member.network))?;
        let ready = self.world.get::<&Blocked>(terminal).is_err();
        Ok((network, ready))
    }

    /// Size a batch of the terminal's batch item
    pub fn request_batch(&self, terminal: Entity) -> Result<BatchPlan, EngineError> {
        let building = self
            .world
            .get::<&ReplicatorTerminal>(terminal)
            .map_err(|_| EngineError::NotATerminal(terminal))?;
        let (network, ready) = self.terminal_link(terminal)?;
        Ok(building.terminal.plan_batch(&self.catalog, network, &ready)?)
    }

    /// Produce `count` items of a planned batch into the stockpile
    pub fn confirm_batch(
        &mut self,
        terminal: Entity,
        plan: &BatchPlan,
        count: u32,
    ) -> Result<BatchOutput, EngineError> {
        let (network, _) = self.terminal_link(terminal)?;
        let output = {
            let mut building = self
                .world
                .get::<&mut ReplicatorTerminal>(terminal)
                .map_err(|_| EngineError::NotATerminal(terminal))?;
            building.terminal.confirm_batch(&self.catalog, plan, count, network)?
        };
        *self.stockpile.entry(output.def_name.clone()).or_insert(0) += output.count;
        Ok(output)
    }

    /// Inspection snapshot for one terminal
    pub fn terminal_status(&self, terminal: Entity) -> Result<TerminalStatus, EngineError> {
        let building = self
            .world
            .get::<&ReplicatorTerminal>(terminal)
            .map_err(|_| EngineError::NotATerminal(terminal))?;
        let (network, _) = self.terminal_link(terminal)?;
        Ok(building.terminal.status(network))
    }

    /// Total terminal draw per network, in watts
    pub fn power_draw(&self) -> BTreeMap<NetworkId, f32> {
        network_power_draw(&self.world)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn colonist_count(&self) -> usize {
        self.world.query::<&Colonist>().iter().count()
    }

    pub fn terminal_count(&self) -> usize {
        self.world.query::<&ReplicatorTerminal>().iter().count()
    }

    pub fn blocked_count(&self) -> usize {
        self.world.query::<&Blocked>().iter().count()
    }

    /// Meals replicated by all terminals so far
    pub fn meals_served(&self) -> u32 {
        self.world
            .query::<&ReplicatorTerminal>()
            .iter()
            .map(|(_, building)| building.meals_served)
            .sum()
    }

    /// Save colony state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        crate::persistence::save_colony(
            writer,
            ColonyState {
                world: &self.world,
                networks: &self.networks,
                settings: &self.settings,
                stockpile: &self.stockpile,
                tick: self.tick,
                seed: self.seed,
            },
        )
    }

    /// Load colony state from a reader. The catalog is kept.
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = crate::persistence::load_colony(reader)?;

        self.world = loaded.world;
        self.networks = loaded.networks;
        self.settings = loaded.settings;
        self.stockpile = loaded.stockpile;
        self.tick = loaded.tick;
        self.seed = loaded.seed;

        // Continue a fresh stream rather than replaying the start of the run
        self.rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.tick));
        self.last_feeding_tick = self.tick;
        refresh_computer_links(&self.world, &mut self.networks);

        Ok(())
    }
}
