//! Feeding system - hungry colonists replicate a meal at a terminal on their network

use hecs::{Entity, World};
use rand::Rng;
use replimat_logic::catalog::Catalog;
use replimat_logic::error::DispenseError;

use super::hunger::find_hungry;
use super::network::FeedstockNetworks;
use crate::components::{Blocked, Diet, Hunger, NetworkId, NetworkMember, ReplicatorTerminal};

/// What happened when a colonist tried to eat
#[derive(Debug, Clone, PartialEq)]
pub enum FeedingEvent {
    Served {
        colonist: Entity,
        terminal: Entity,
        meal: String,
    },
    Refused {
        colonist: Entity,
        terminal: Entity,
        error: DispenseError,
    },
}

/// Pick the terminal a colonist on `network` should use: idle terminals
/// only, unblocked ones first, then lowest entity id.
fn choose_terminal(world: &World, network: NetworkId) -> Option<(Entity, bool)> {
    world
        .query::<(&ReplicatorTerminal, &NetworkMember)>()
        .iter()
        .filter(|(_, (building, member))| {
            member.network == network && !building.terminal.is_producing()
        })
        .map(|(entity, _)| (entity, world.get::<&Blocked>(entity).is_err()))
        .min_by_key(|(entity, ready)| (!*ready, entity.id()))
}

/// Serve every hungry colonist that has an idle terminal on its network
pub fn feeding_system<R: Rng + ?Sized>(
    world: &mut World,
    networks: &FeedstockNetworks,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<FeedingEvent> {
    let mut events = Vec::new();

    for colonist in find_hungry(world) {
        let Ok(member) = world.get::<&NetworkMember>(colonist).map(|m| *m) else {
            continue;
        };
        let Some(network) = networks.get(member.network) else {
            continue;
        };
        let policy = world
            .get::<&Diet>(colonist)
            .map(|diet| diet.policy.clone())
            .unwrap_or_default();
        let Some((terminal, ready)) = choose_terminal(world, member.network) else {
            // Every terminal is busy; try again next pass
            continue;
        };

        let result = match world.get::<&mut ReplicatorTerminal>(terminal) {
            Ok(mut building) => {
                let result = building
                    .terminal
                    .request_dispense(&policy, catalog, network, &ready, rng);
                if result.is_ok() {
                    building.meals_served += 1;
                }
                result
            }
            Err(_) => continue,
        };

        match result {
            Ok(item) => {
                if let Ok(mut hunger) = world.get::<&mut Hunger>(colonist) {
                    hunger.eat(item.nutrition);
                }
                tracing::debug!(
                    ?colonist,
                    ?terminal,
                    meal = %item.def_name,
                    litres = item.feedstock_used,
                    "colonist served"
                );
                events.push(FeedingEvent::Served {
                    colonist,
                    terminal,
                    meal: item.def_name,
                });
            }
            Err(error) => {
                tracing::warn!(?colonist, ?terminal, %error, "dispense refused");
                events.push(FeedingEvent::Refused {
                    colonist,
                    terminal,
                    error,
                });
            }
        }
    }

    events
}
