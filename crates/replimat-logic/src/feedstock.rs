//! Feedstock ledger — network-wide pooled feedstock and its gate.
//!
//! A network's feedstock lives in one or more tanks. All terminals on the
//! network share one [`FeedstockPool`] through an `Arc`; every read and
//! every check-and-debit takes the pool's lock exactly once, so two
//! terminals can never both pass a stock check for the same litres.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::catalog::ItemKind;
use crate::error::DispenseError;

/// Slack for comparing litres, so a pool holding exactly the price of an
/// item (or of `n` items) can pay for it despite decimal rounding.
pub const LITRE_TOLERANCE: f64 = 1e-9;

/// Linear conversion between item mass (kg) and feedstock volume (L).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedstockConversion {
    pub volume_per_kg: f64,
}

impl FeedstockConversion {
    pub fn new(volume_per_kg: f64) -> Self {
        Self { volume_per_kg }
    }

    pub fn mass_to_volume(&self, mass: f64) -> f64 {
        mass * self.volume_per_kg
    }

    pub fn volume_to_mass(&self, volume: f64) -> f64 {
        volume / self.volume_per_kg
    }
}

/// A single storage tank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedstockTank {
    pub stored: f64,
    pub capacity: f64,
}

impl FeedstockTank {
    pub fn new(stored: f64, capacity: f64) -> Self {
        let capacity = capacity.max(0.0);
        Self {
            stored: stored.clamp(0.0, capacity),
            capacity,
        }
    }
}

/// Feedstock shared by every terminal on one network.
#[derive(Debug, Default)]
pub struct FeedstockPool {
    tanks: Mutex<Vec<FeedstockTank>>,
}

impl FeedstockPool {
    pub fn new(tanks: Vec<FeedstockTank>) -> Self {
        Self {
            tanks: Mutex::new(tanks),
        }
    }

    /// A pool backed by one tank holding exactly `quantity`.
    pub fn with_quantity(quantity: f64) -> Self {
        Self::new(vec![FeedstockTank::new(quantity, quantity)])
    }

    // Tank data is plain numbers updated in place, so a poisoned lock
    // never guards a half-written value.
    fn lock(&self) -> MutexGuard<'_, Vec<FeedstockTank>> {
        self.tanks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Total litres across all tanks.
    pub fn quantity(&self) -> f64 {
        total(&self.lock())
    }

    pub fn capacity(&self) -> f64 {
        self.lock().iter().map(|tank| tank.capacity).sum()
    }

    pub fn tanks(&self) -> Vec<FeedstockTank> {
        self.lock().clone()
    }

    pub fn add_tank(&self, tank: FeedstockTank) {
        self.lock().push(tank);
    }

    /// Whether the pool could cover `amount` litres right now.
    pub fn has_at_least(&self, amount: f64) -> bool {
        total(&self.lock()) + LITRE_TOLERANCE >= amount
    }

    /// Debit `amount` litres if available. On failure the pool is unchanged.
    pub fn try_consume(&self, amount: f64) -> bool {
        if !(amount >= 0.0) {
            return false;
        }
        let mut tanks = self.lock();
        if total(&tanks) + LITRE_TOLERANCE < amount {
            return false;
        }
        drain(&mut tanks, amount);
        true
    }

    /// Fill tanks in order up to capacity. Returns the litres accepted.
    pub fn refill(&self, amount: f64) -> f64 {
        if !(amount > 0.0) {
            return 0.0;
        }
        let mut remaining = amount;
        for tank in self.lock().iter_mut() {
            let room = tank.capacity - tank.stored;
            let added = room.min(remaining).max(0.0);
            tank.stored += added;
            remaining -= added;
            if remaining <= 0.0 {
                break;
            }
        }
        amount - remaining
    }
}

fn total(tanks: &[FeedstockTank]) -> f64 {
    tanks.iter().map(|tank| tank.stored).sum()
}

fn drain(tanks: &mut [FeedstockTank], amount: f64) {
    let mut remaining = amount;
    for tank in tanks.iter_mut() {
        let taken = tank.stored.min(remaining);
        tank.stored -= taken;
        remaining -= taken;
        if remaining <= 0.0 {
            break;
        }
    }
    // Rounding can leave a sliver owed; never go below zero for it.
    if remaining > 0.0 {
        if let Some(tank) = tanks.iter_mut().find(|tank| tank.stored > 0.0) {
            tank.stored = (tank.stored - remaining).max(0.0);
        }
    }
}

/// Whether the pool holds enough feedstock to replicate one `kind`.
pub fn has_stock(pool: &FeedstockPool, kind: &ItemKind, conversion: &FeedstockConversion) -> bool {
    pool.has_at_least(conversion.mass_to_volume(kind.mass))
}

/// A batch the requester may confirm with any count in `1..=max_count`.
///
/// Only [`plan_batch`] builds plans; callers read them through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchPlan {
    def_name: String,
    max_count: u32,
    unit_volume: f64,
    max_affordable: u32,
}

impl BatchPlan {
    pub fn def_name(&self) -> &str {
        &self.def_name
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Litres debited per item.
    pub fn unit_volume(&self) -> f64 {
        self.unit_volume
    }

    /// Most items the pool could cover, before the administrative cap.
    pub fn max_affordable(&self) -> u32 {
        self.max_affordable
    }

    pub fn volume_for(&self, count: u32) -> f64 {
        count as f64 * self.unit_volume
    }
}

/// Size a batch of `kind`: the smaller of what the pool can afford and
/// `administrative_cap`. Refused when not even one item fits.
pub fn plan_batch(
    pool: &FeedstockPool,
    kind: &ItemKind,
    administrative_cap: u32,
    conversion: &FeedstockConversion,
) -> Result<BatchPlan, DispenseError> {
    let available_mass = conversion.volume_to_mass(pool.quantity());
    let affordable = (available_mass / kind.mass + LITRE_TOLERANCE).floor();
    let max_affordable = if affordable.is_finite() && affordable > 0.0 {
        affordable.min(u32::MAX as f64) as u32
    } else {
        0
    };
    let max_count = max_affordable.min(administrative_cap);

    tracing::info!(
        item = %kind.def_name,
        available_litres = pool.quantity(),
        max_affordable,
        administrative_cap,
        max_count,
        "planned batch"
    );

    if max_count < 1 {
        return Err(DispenseError::BatchCapacityZero);
    }

    Ok(BatchPlan {
        def_name: kind.def_name.clone(),
        max_count,
        unit_volume: conversion.mass_to_volume(kind.mass),
        max_affordable,
    })
}

/// Debit the feedstock for `count` items of a previously planned batch.
pub fn confirm_batch(
    pool: &FeedstockPool,
    plan: &BatchPlan,
    count: u32,
) -> Result<(), DispenseError> {
    if count < 1 || count > plan.max_count {
        return Err(DispenseError::InvalidBatchCount {
            requested: count,
            max: plan.max_count(),
        });
    }
    let needed = plan.volume_for(count);
    if !pool.try_consume(needed) {
        return Err(DispenseError::InsufficientStock {
            needed,
            available: pool.quantity(),
        });
    }
    Ok(())
}
