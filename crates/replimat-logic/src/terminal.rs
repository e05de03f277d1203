//! Replicator terminal — dispense decisions gated by readiness, a
//! replicator computer, and the network's feedstock.
//!
//! The terminal never reaches for global state. Everything it depends on
//! is handed in per call:
//!
//! - [`Readiness`]: is the building itself able to dispense (powered,
//!   not obstructed)?
//! - [`NetworkLink`]: the feedstock pool and computer status of the
//!   network the terminal is attached to.
//! - a `rand::Rng` for meal selection.
//!
//! A normal dispense runs: readiness → computer → eligibility → selection
//! → atomic debit → production cycle. Any failure returns a
//! [`DispenseError`] and changes nothing. The batch path (survival meals)
//! checks readiness but does not require a computer.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ItemKind};
use crate::eligibility::{eligible, ConsumerPolicy};
use crate::error::{DispenseError, NotReadyReason};
use crate::feedstock::{self, BatchPlan, FeedstockConversion, FeedstockPool};
use crate::production::ProductionState;
use crate::selection::{select, SelectionMode};
use crate::settings::ReplicatorSettings;

/// Building-level readiness signal.
pub trait Readiness {
    fn can_dispense_now(&self) -> bool;
}

impl Readiness for bool {
    fn can_dispense_now(&self) -> bool {
        *self
    }
}

/// The distribution network a terminal is attached to.
pub trait NetworkLink {
    fn pool(&self) -> &FeedstockPool;
    fn has_working_computer(&self) -> bool;
}

/// Minimal network: a shared pool plus a computer flag.
#[derive(Debug, Clone)]
pub struct NetworkHandle {
    pub pool: Arc<FeedstockPool>,
    pub computer_working: bool,
}

impl NetworkHandle {
    pub fn new(pool: Arc<FeedstockPool>, computer_working: bool) -> Self {
        Self {
            pool,
            computer_working,
        }
    }
}

impl NetworkLink for NetworkHandle {
    fn pool(&self) -> &FeedstockPool {
        &self.pool
    }

    fn has_working_computer(&self) -> bool {
        self.computer_working
    }
}

/// A replicated meal handed to a consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispensedItem {
    pub def_name: String,
    pub nutrition: f64,
    pub mass: f64,
    /// Litres debited from the network.
    pub feedstock_used: f64,
}

/// Output of a confirmed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutput {
    pub def_name: String,
    pub count: u32,
}

/// Snapshot for inspection views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalStatus {
    pub producing: bool,
    pub ticks_remaining: u32,
    pub power_draw: f32,
    pub computer_connected: bool,
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.producing {
            write!(
                f,
                "Replicating ({} ticks left), drawing {:.0} W",
                self.ticks_remaining, self.power_draw
            )?;
        } else {
            write!(f, "Idle, drawing {:.0} W", self.power_draw)?;
        }
        if !self.computer_connected {
            write!(f, "\nNot connected to a replicator computer.")?;
        }
        Ok(())
    }
}

/// A replicator terminal's own state and options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terminal {
    pub settings: ReplicatorSettings,
    pub state: ProductionState,
}

impl Terminal {
    pub fn new(settings: ReplicatorSettings) -> Self {
        Self {
            settings,
            state: ProductionState::idle(),
        }
    }

    pub fn conversion(&self) -> FeedstockConversion {
        FeedstockConversion::new(self.settings.feedstock_volume_per_kg)
    }

    pub fn selection_mode(&self) -> SelectionMode {
        SelectionMode::from_settings(&self.settings)
    }

    /// Pick the meal this consumer would get, without touching feedstock.
    pub fn pick_meal<'a, R: Rng + ?Sized>(
        &self,
        policy: &ConsumerPolicy,
        catalog: &'a Catalog,
        rng: &mut R,
    ) -> Option<&'a ItemKind> {
        let candidates = eligible(policy, catalog, &self.settings);
        select(&candidates, self.selection_mode(), rng)
    }

    /// Whether the network could replicate one `kind`.
    pub fn has_stock_for(&self, kind: &ItemKind, link: &impl NetworkLink) -> bool {
        feedstock::has_stock(link.pool(), kind, &self.conversion())
    }

    /// Whether the network could replicate the terminal's advertised meal.
    pub fn has_enough_feedstock(
        &self,
        catalog: &Catalog,
        link: &impl NetworkLink,
    ) -> Result<bool, DispenseError> {
        let kind = lookup(catalog, &self.settings.default_item)?;
        Ok(self.has_stock_for(kind, link))
    }

    /// Replicate a meal for a consumer.
    pub fn request_dispense<R: Rng + ?Sized>(
        &mut self,
        policy: &ConsumerPolicy,
        catalog: &Catalog,
        link: &impl NetworkLink,
        readiness: &impl Readiness,
        rng: &mut R,
    ) -> Result<DispensedItem, DispenseError> {
        if !readiness.can_dispense_now() {
            return Err(NotReadyReason::Unavailable.into());
        }
        if !link.has_working_computer() {
            return Err(NotReadyReason::NoComputer.into());
        }

        let meal = self
            .pick_meal(policy, catalog, rng)
            .ok_or(DispenseError::NoEligibleItem)?;

        let needed = self.conversion().mass_to_volume(meal.mass);
        if !link.pool().try_consume(needed) {
            let available = link.pool().quantity();
            tracing::error!(
                meal = %meal.def_name,
                needed,
                available,
                "not enough feedstock in tanks to replicate"
            );
            return Err(DispenseError::InsufficientStock { needed, available });
        }

        self.state.start(self.settings.collect_duration_ticks);

        Ok(DispensedItem {
            def_name: meal.def_name.clone(),
            nutrition: meal.nutrition,
            mass: meal.mass,
            feedstock_used: needed,
        })
    }

    /// Offer a batch of the configured batch item, sized by feedstock and cap.
    pub fn plan_batch(
        &self,
        catalog: &Catalog,
        link: &impl NetworkLink,
        readiness: &impl Readiness,
    ) -> Result<BatchPlan, DispenseError> {
        tracing::info!(item = %self.settings.batch_item, "batch requested");

        if !readiness.can_dispense_now() {
            return Err(NotReadyReason::Unavailable.into());
        }
        let kind = lookup(catalog, &self.settings.batch_item)?;
        feedstock::plan_batch(link.pool(), kind, self.settings.batch_cap, &self.conversion())
    }

    /// Produce `count` items of a planned batch.
    ///
    /// The plan must still price this terminal's batch item, and `count`
    /// may not exceed the terminal's own cap.
    pub fn confirm_batch(
        &mut self,
        catalog: &Catalog,
        plan: &BatchPlan,
        count: u32,
        link: &impl NetworkLink,
    ) -> Result<BatchOutput, DispenseError> {
        let kind = lookup(catalog, &self.settings.batch_item)?;
        let unit_volume = self.conversion().mass_to_volume(kind.mass);
        if plan.def_name() != kind.def_name || plan.unit_volume() != unit_volume {
            tracing::warn!(
                planned = %plan.def_name(),
                batch_item = %kind.def_name,
                "refusing stale batch plan"
            );
            return Err(DispenseError::PlanMismatch);
        }
        let max = plan.max_count().min(self.settings.batch_cap);
        if count > max {
            return Err(DispenseError::InvalidBatchCount {
                requested: count,
                max,
            });
        }

        feedstock::confirm_batch(link.pool(), plan, count)?;
        self.state.start(self.settings.collect_duration_ticks);

        tracing::info!(item = %kind.def_name, count, "batch produced");
        Ok(BatchOutput {
            def_name: kind.def_name.clone(),
            count,
        })
    }

    /// Advance one scheduler tick.
    pub fn on_tick(&mut self) {
        self.state.tick();
    }

    pub fn is_producing(&self) -> bool {
        self.state.is_producing()
    }

    pub fn power_draw(&self) -> f32 {
        self.state
            .power_draw(self.settings.idle_power_draw, self.settings.active_power_draw)
    }

    pub fn status(&self, link: &impl NetworkLink) -> TerminalStatus {
        TerminalStatus {
            producing: self.is_producing(),
            ticks_remaining: self.state.ticks_remaining,
            power_draw: self.power_draw(),
            computer_connected: link.has_working_computer(),
        }
    }
}

fn lookup<'a>(catalog: &'a Catalog, def_name: &str) -> Result<&'a ItemKind, DispenseError> {
    catalog
        .get(def_name)
        .ok_or_else(|| DispenseError::UnknownItem(def_name.to_string()))
}
