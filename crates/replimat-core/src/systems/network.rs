//! Feedstock networks - shared pools and computer links

use std::collections::BTreeMap;
use std::sync::Arc;

use hecs::World;
use replimat_logic::feedstock::{FeedstockPool, FeedstockTank};
use replimat_logic::terminal::NetworkLink;

use crate::components::{Computer, NetworkId, NetworkMember};

/// One network: the feedstock pool every attached terminal shares
#[derive(Debug, Clone)]
pub struct FeedstockNetwork {
    pub id: NetworkId,
    pub pool: Arc<FeedstockPool>,
    /// Refreshed from computer entities each tick
    pub computer_working: bool,
}

impl NetworkLink for FeedstockNetwork {
    fn pool(&self) -> &FeedstockPool {
        &self.pool
    }

    fn has_working_computer(&self) -> bool {
        self.computer_working
    }
}

/// All networks in the colony (singleton, stored in engine)
#[derive(Debug, Clone, Default)]
pub struct FeedstockNetworks {
    networks: BTreeMap<NetworkId, FeedstockNetwork>,
    next_id: u32,
}

impl FeedstockNetworks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a network backed by the given tanks
    pub fn create(&mut self, tanks: Vec<FeedstockTank>) -> NetworkId {
        let id = NetworkId(self.next_id);
        self.next_id += 1;
        self.insert(id, tanks);
        id
    }

    /// Insert a network with a known id (used when loading)
    pub fn insert(&mut self, id: NetworkId, tanks: Vec<FeedstockTank>) {
        self.next_id = self.next_id.max(id.0 + 1);
        self.networks.insert(
            id,
            FeedstockNetwork {
                id,
                pool: Arc::new(FeedstockPool::new(tanks)),
                computer_working: false,
            },
        );
    }

    pub fn get(&self, id: NetworkId) -> Option<&FeedstockNetwork> {
        self.networks.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedstockNetwork> {
        self.networks.values()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

/// Mark each network as having a working computer or not
pub fn refresh_computer_links(world: &World, networks: &mut FeedstockNetworks) {
    for network in networks.networks.values_mut() {
        network.computer_working = false;
    }

    for (_, (computer, member)) in world.query::<(&Computer, &NetworkMember)>().iter() {
        if !computer.working {
            continue;
        }
        if let Some(network) = networks.networks.get_mut(&member.network) {
            network.computer_working = true;
        }
    }
}
