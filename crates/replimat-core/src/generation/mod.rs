//! Generation - procedural creation of colonies, networks, colonists

mod colony;
mod names;

pub use colony::*;
pub use names::*;
