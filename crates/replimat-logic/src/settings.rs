//! Replicator settings — the mod options screen, independent of any UI.
//!
//! Settings are plain data with sensible defaults. Hosts can load them
//! from a TOML document; any field left out keeps its default.
//!
//! ```
//! use replimat_logic::settings::{ReplicatorSettings, validate_settings};
//!
//! let settings = ReplicatorSettings::from_toml_str("prioritize_food_quality = false").unwrap();
//! assert!(!settings.prioritize_food_quality);
//! assert!(validate_settings(&settings).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{limits, meals, power, timing};

/// Player-editable replicator options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicatorSettings {
    /// Always replicate the best meal a colonist may eat (otherwise pick
    /// randomly among decent meals).
    pub prioritize_food_quality: bool,
    /// Meals must exceed this nutrition to be replicated.
    pub min_meal_nutrition: f64,
    /// Most meals one batch request may produce.
    pub batch_cap: u32,
    /// Ticks a replication cycle keeps the terminal busy.
    pub collect_duration_ticks: u32,
    /// Watts drawn while idle.
    pub idle_power_draw: f32,
    /// Watts drawn while replicating.
    pub active_power_draw: f32,
    /// Litres of feedstock per kilogram of output.
    pub feedstock_volume_per_kg: f64,
    /// Item produced by the batch path.
    pub batch_item: String,
    /// Item the terminal advertises when the host asks what it dispenses.
    pub default_item: String,
    /// Items never replicated on a normal dispense request.
    pub excluded_items: Vec<String>,
}

impl Default for ReplicatorSettings {
    fn default() -> Self {
        Self {
            prioritize_food_quality: true,
            min_meal_nutrition: limits::MIN_MEAL_NUTRITION,
            batch_cap: limits::BATCH_CAP,
            collect_duration_ticks: timing::COLLECT_DURATION_TICKS,
            idle_power_draw: power::IDLE_DRAW,
            active_power_draw: power::ACTIVE_DRAW,
            feedstock_volume_per_kg: limits::FEEDSTOCK_VOLUME_PER_KG,
            batch_item: meals::SURVIVAL_PACK.to_string(),
            default_item: meals::LAVISH.to_string(),
            excluded_items: vec![meals::SURVIVAL_PACK.to_string()],
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("minimum meal nutrition {0} must be within [0, 1)")]
    NutritionThresholdOutOfRange(f64),
    #[error("batch cap must be at least 1")]
    ZeroBatchCap,
    #[error("collect duration must be at least 1 tick")]
    ZeroCollectDuration,
    #[error("power draw {0} must not be negative")]
    NegativePowerDraw(f32),
    #[error("feedstock volume per kg {0} must be positive")]
    InvalidConversion(f64),
    #[error("batch item name is empty")]
    EmptyBatchItem,
}

/// Failure loading settings from TOML.
#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("settings parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {}", format_errors(.0))]
    Invalid(Vec<SettingsError>),
}

fn format_errors(errors: &[SettingsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ReplicatorSettings {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsLoadError> {
        let settings: ReplicatorSettings = toml::from_str(source)?;
        let errors = validate_settings(&settings);
        if !errors.is_empty() {
            return Err(SettingsLoadError::Invalid(errors));
        }
        Ok(settings)
    }

    /// Whether a def name is excluded from normal dispensing.
    pub fn is_excluded(&self, def_name: &str) -> bool {
        self.excluded_items.iter().any(|name| name == def_name)
    }
}

/// Validate settings, returning every problem found.
pub fn validate_settings(settings: &ReplicatorSettings) -> Vec<SettingsError> {
    let mut errors = Vec::new();

    if !(0.0..1.0).contains(&settings.min_meal_nutrition) {
        errors.push(SettingsError::NutritionThresholdOutOfRange(
            settings.min_meal_nutrition,
        ));
    }
    if settings.batch_cap == 0 {
        errors.push(SettingsError::ZeroBatchCap);
    }
    if settings.collect_duration_ticks == 0 {
        errors.push(SettingsError::ZeroCollectDuration);
    }
    for draw in [settings.idle_power_draw, settings.active_power_draw] {
        if draw < 0.0 {
            errors.push(SettingsError::NegativePowerDraw(draw));
        }
    }
    if !(settings.feedstock_volume_per_kg > 0.0) {
        errors.push(SettingsError::InvalidConversion(
            settings.feedstock_volume_per_kg,
        ));
    }
    if settings.batch_item.trim().is_empty() {
        errors.push(SettingsError::EmptyBatchItem);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_settings(&ReplicatorSettings::default()).is_empty());
    }

    #[test]
    fn test_default_excludes_survival_pack() {
        let settings = ReplicatorSettings::default();
        assert!(settings.is_excluded(meals::SURVIVAL_PACK));
        assert!(!settings.is_excluded(meals::LAVISH));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = ReplicatorSettings::from_toml_str(
            "prioritize_food_quality = false\nbatch_cap = 10\n",
        )
        .unwrap();
        assert!(!settings.prioritize_food_quality);
        assert_eq!(settings.batch_cap, 10);
        assert_eq!(settings.collect_duration_ticks, 120);
        assert_eq!(settings.batch_item, meals::SURVIVAL_PACK);
    }

    #[test]
    fn test_invalid_toml_values() {
        let err = ReplicatorSettings::from_toml_str("batch_cap = 0\nidle_power_draw = -5.0\n")
            .unwrap_err();
        match err {
            SettingsLoadError::Invalid(errors) => {
                assert!(errors.contains(&SettingsError::ZeroBatchCap));
                assert!(errors.contains(&SettingsError::NegativePowerDraw(-5.0)));
            }
            other => panic!("expected validation failure, got {other}"),
        }
    }

    #[test]
    fn test_toml_syntax_error() {
        assert!(matches!(
            ReplicatorSettings::from_toml_str("batch_cap = ="),
            Err(SettingsLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_threshold_range() {
        let mut settings = ReplicatorSettings::default();
        settings.min_meal_nutrition = 1.5;
        assert_eq!(
            validate_settings(&settings),
            vec![SettingsError::NutritionThresholdOutOfRange(1.5)]
        );
    }

    #[test]
    fn test_zero_conversion() {
        let mut settings = ReplicatorSettings::default();
        settings.feedstock_volume_per_kg = 0.0;
        assert!(validate_settings(&settings).contains(&SettingsError::InvalidConversion(0.0)));
    }
}
