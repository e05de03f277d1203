//! Meal selection — pick one eligible meal by quality preference.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{ItemKind, Preferability};
use crate::settings::ReplicatorSettings;

/// How a terminal chooses among eligible meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Random among the best tier available.
    QualityFirst,
    /// Random among anything better than the lowest meal tier, falling back
    /// to the full set when nothing better exists.
    Balanced,
}

impl SelectionMode {
    pub fn from_settings(settings: &ReplicatorSettings) -> Self {
        if settings.prioritize_food_quality {
            SelectionMode::QualityFirst
        } else {
            SelectionMode::Balanced
        }
    }
}

/// Select a meal. Returns `None` only when `eligible` is empty.
pub fn select<'a, R: Rng + ?Sized>(
    eligible: &[&'a ItemKind],
    mode: SelectionMode,
    rng: &mut R,
) -> Option<&'a ItemKind> {
    let best = eligible.iter().map(|item| item.preferability).max()?;

    let pool: Vec<&'a ItemKind> = match mode {
        SelectionMode::QualityFirst => eligible
            .iter()
            .copied()
            .filter(|item| item.preferability == best)
            .collect(),
        SelectionMode::Balanced => {
            let better: Vec<&'a ItemKind> = eligible
                .iter()
                .copied()
                .filter(|item| item.preferability > Preferability::LOWEST_MEAL)
                .collect();
            if better.is_empty() {
                eligible.to_vec()
            } else {
                better
            }
        }
    };

    let choice = pool.choose(rng).copied();
    if let Some(item) = choice {
        tracing::debug!(
            meal = %item.def_name,
            ?mode,
            candidates = pool.len(),
            "selected meal"
        );
    }
    choice
}
