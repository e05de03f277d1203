//! Systems - logic that operates on components

mod feeding;
mod hunger;
mod network;
mod production;

pub use feeding::*;
pub use hunger::*;
pub use network::*;
pub use production::*;
