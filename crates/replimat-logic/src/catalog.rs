//! Replicable item catalog — meal definitions, preferability tiers.
//!
//! The catalog is immutable once built and is shared by every terminal.
//! It can be loaded from JSON (same shape the simtest ships in `data/`)
//! or taken from the bundled vanilla meal list.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::meals;

/// How much a colonist wants to eat something. Ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Preferability {
    Undefined,
    NeverForNutrition,
    DesperateOnly,
    RawBad,
    RawTasty,
    MealAwful,
    MealSimple,
    MealFine,
    MealLavish,
}

impl Preferability {
    /// The lowest tier that still counts as a meal.
    pub const LOWEST_MEAL: Preferability = Preferability::MealAwful;

    pub fn is_meal(self) -> bool {
        self >= Preferability::MealAwful
    }
}

/// A producible item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemKind {
    pub def_name: String,
    pub label: String,
    /// Normalized nutrition (1.0 = one full meal).
    pub nutrition: f64,
    /// Mass in kilograms.
    pub mass: f64,
    pub preferability: Preferability,
}

impl ItemKind {
    pub fn new(
        def_name: impl Into<String>,
        label: impl Into<String>,
        nutrition: f64,
        mass: f64,
        preferability: Preferability,
    ) -> Self {
        Self {
            def_name: def_name.into(),
            label: label.into(),
            nutrition,
            mass,
            preferability,
        }
    }

    /// Derived from the tier rather than stored: anything ranked
    /// `MealAwful` or better counts as a meal.
    pub fn is_meal(&self) -> bool {
        self.preferability.is_meal()
    }
}

/// Catalog loading error.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate item def name: {0}")]
    DuplicateDefName(String),
    #[error("item {def_name} has non-positive mass {mass}")]
    InvalidMass { def_name: String, mass: f64 },
}

/// Immutable list of item kinds, in definition order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<ItemKind>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names and massless items.
    pub fn new(items: Vec<ItemKind>) -> Result<Self, CatalogError> {
        for (i, item) in items.iter().enumerate() {
            if !(item.mass > 0.0) {
                return Err(CatalogError::InvalidMass {
                    def_name: item.def_name.clone(),
                    mass: item.mass,
                });
            }
            if items[..i].iter().any(|other| other.def_name == item.def_name) {
                return Err(CatalogError::DuplicateDefName(item.def_name.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Parse a JSON array of item kinds.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<ItemKind> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Vanilla meals plus a few non-meal foods that the filter must reject.
    pub fn vanilla() -> Self {
        use Preferability::*;
        Self {
            items: vec![
                ItemKind::new(meals::NUTRIENT_PASTE, "nutrient paste meal", 0.9, 0.44, MealAwful),
                ItemKind::new(meals::SIMPLE, "simple meal", 0.9, 0.44, MealSimple),
                ItemKind::new(meals::FINE, "fine meal", 0.9, 0.44, MealFine),
                ItemKind::new(meals::FINE_VEG, "vegetarian fine meal", 0.9, 0.44, MealFine),
                ItemKind::new(meals::FINE_MEAT, "carnivore fine meal", 0.9, 0.44, MealFine),
                ItemKind::new(meals::LAVISH, "lavish meal", 1.0, 0.44, MealLavish),
                ItemKind::new(meals::LAVISH_VEG, "vegetarian lavish meal", 1.0, 0.44, MealLavish),
                ItemKind::new(meals::LAVISH_MEAT, "carnivore lavish meal", 1.0, 0.44, MealLavish),
                ItemKind::new(meals::SURVIVAL_PACK, "packaged survival meal", 0.9, 0.3, MealSimple),
                ItemKind::new(meals::PEMMICAN, "pemmican", 0.05, 0.018, MealSimple),
                ItemKind::new(meals::CHOCOLATE, "chocolate", 0.1, 0.05, DesperateOnly),
                ItemKind::new(meals::RAW_POTATOES, "potatoes", 0.05, 0.03, RawBad),
            ],
        }
    }

    pub fn get(&self, def_name: &str) -> Option<&ItemKind> {
        self.items.iter().find(|item| item.def_name == def_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemKind> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Def names of every entry.
    pub fn def_names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.def_name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferability_order() {
        assert!(Preferability::MealLavish > Preferability::MealFine);
        assert!(Preferability::MealFine > Preferability::MealSimple);
        assert!(Preferability::MealSimple > Preferability::MealAwful);
        assert!(Preferability::MealAwful > Preferability::RawTasty);
    }

    #[test]
    fn test_is_meal() {
        assert!(Preferability::MealAwful.is_meal());
        assert!(Preferability::MealLavish.is_meal());
        assert!(!Preferability::RawTasty.is_meal());
        assert!(!Preferability::DesperateOnly.is_meal());
    }

    #[test]
    fn test_vanilla_catalog_lookup() {
        let catalog = Catalog::vanilla();
        let lavish = catalog.get(meals::LAVISH).unwrap();
        assert_eq!(lavish.preferability, Preferability::MealLavish);
        assert!(catalog.get("MealImaginary").is_none());
        assert!(!catalog.get(meals::CHOCOLATE).unwrap().is_meal());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"def_name": "MealSimple", "label": "simple meal", "nutrition": 0.9, "mass": 0.44, "preferability": "MealSimple"},
            {"def_name": "MealLavish", "label": "lavish meal", "nutrition": 1.0, "mass": 0.44, "preferability": "MealLavish"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.def_names(), vec!["MealSimple", "MealLavish"]);
    }

    #[test]
    fn test_rejects_duplicates() {
        let item = ItemKind::new("MealSimple", "simple meal", 0.9, 0.44, Preferability::MealSimple);
        let err = Catalog::new(vec![item.clone(), item]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateDefName(name) if name == "MealSimple"));
    }

    #[test]
    fn test_rejects_massless_item() {
        let item = ItemKind::new("Air", "air", 0.9, 0.0, Preferability::MealSimple);
        assert!(matches!(
            Catalog::new(vec![item]),
            Err(CatalogError::InvalidMass { .. })
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
