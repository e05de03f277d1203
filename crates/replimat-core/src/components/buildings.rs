//! Building components: replicator terminals, computers, network membership

use replimat_logic::settings::ReplicatorSettings;
use replimat_logic::terminal::Terminal;
use serde::{Deserialize, Serialize};

/// Identifies a feedstock/power network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetworkId(pub u32);

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "net#{}", self.0)
    }
}

/// Attaches a building or colonist to a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkMember {
    pub network: NetworkId,
}

/// Replicator terminal building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicatorTerminal {
    pub label: String,
    pub terminal: Terminal,
    /// Meals replicated over the building's lifetime
    pub meals_served: u32,
}

impl ReplicatorTerminal {
    pub fn new(label: impl Into<String>, settings: ReplicatorSettings) -> Self {
        Self {
            label: label.into(),
            terminal: Terminal::new(settings),
            meals_served: 0,
        }
    }
}

/// Replicator computer - terminals on its network only dispense while one works
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Computer {
    pub working: bool,
}

/// Marker: building is obstructed or unpowered and cannot dispense
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Blocked;
