//! Meal eligibility — which catalog entries a consumer may be served.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ItemKind};
use crate::settings::ReplicatorSettings;

/// A consumer's food restriction. `allowed == None` means the consumer has
/// no usable policy and cannot be served at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerPolicy {
    pub allowed: Option<Vec<String>>,
}

impl ConsumerPolicy {
    /// Policy permitting exactly the given def names.
    pub fn allowing<I, S>(def_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Some(def_names.into_iter().map(Into::into).collect()),
        }
    }

    /// Policy permitting everything in the catalog.
    pub fn unrestricted(catalog: &Catalog) -> Self {
        Self {
            allowed: Some(catalog.def_names()),
        }
    }

    /// No policy at all.
    pub fn none() -> Self {
        Self { allowed: None }
    }

    pub fn allows(&self, def_name: &str) -> bool {
        self.allowed
            .as_ref()
            .is_some_and(|allowed| allowed.iter().any(|name| name == def_name))
    }
}

/// Meals a consumer may be served, in catalog order.
///
/// An entry passes when it is a meal, carries more nutrition than
/// `settings.min_meal_nutrition`, is not excluded by settings, and is
/// allowed by the consumer's policy.
pub fn eligible<'a>(
    policy: &ConsumerPolicy,
    catalog: &'a Catalog,
    settings: &ReplicatorSettings,
) -> Vec<&'a ItemKind> {
    if policy.allowed.is_none() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|item| item.is_meal())
        .filter(|item| item.nutrition > settings.min_meal_nutrition)
        .filter(|item| !settings.is_excluded(&item.def_name))
        .filter(|item| policy.allows(&item.def_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::meals;

    fn names(items: &[&ItemKind]) -> Vec<String> {
        items.iter().map(|item| item.def_name.clone()).collect()
    }

    #[test]
    fn test_unrestricted_policy() {
        let catalog = Catalog::vanilla();
        let settings = ReplicatorSettings::default();
        let result = eligible(&ConsumerPolicy::unrestricted(&catalog), &catalog, &settings);
        let result = names(&result);

        assert!(result.contains(&meals::LAVISH.to_string()));
        assert!(result.contains(&meals::NUTRIENT_PASTE.to_string()));
        // Too little nutrition
        assert!(!result.contains(&meals::PEMMICAN.to_string()));
        // Not a meal
        assert!(!result.contains(&meals::CHOCOLATE.to_string()));
        assert!(!result.contains(&meals::RAW_POTATOES.to_string()));
        // Reserved for batch production
        assert!(!result.contains(&meals::SURVIVAL_PACK.to_string()));
    }

    #[test]
    fn test_no_policy_is_empty() {
        let catalog = Catalog::vanilla();
        let settings = ReplicatorSettings::default();
        assert!(eligible(&ConsumerPolicy::none(), &catalog, &settings).is_empty());
    }

    #[test]
    fn test_policy_restricts() {
        let catalog = Catalog::vanilla();
        let settings = ReplicatorSettings::default();
        let policy = ConsumerPolicy::allowing([meals::SIMPLE, meals::FINE_VEG]);
        assert_eq!(
            names(&eligible(&policy, &catalog, &settings)),
            vec![meals::SIMPLE, meals::FINE_VEG]
        );
    }

    #[test]
    fn test_survival_pack_excluded_even_if_allowed() {
        let catalog = Catalog::vanilla();
        let settings = ReplicatorSettings::default();
        let policy = ConsumerPolicy::allowing([meals::SURVIVAL_PACK]);
        assert!(eligible(&policy, &catalog, &settings).is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let catalog = Catalog::new(vec![ItemKind::new(
            "MealThin",
            "thin gruel",
            0.4,
            0.4,
            crate::catalog::Preferability::MealAwful,
        )])
        .unwrap();
        let settings = ReplicatorSettings::default();
        let policy = ConsumerPolicy::unrestricted(&catalog);
        assert!(eligible(&policy, &catalog, &settings).is_empty());
    }

    #[test]
    fn test_empty_allowed_list() {
        let catalog = Catalog::vanilla();
        let settings = ReplicatorSettings::default();
        let policy = ConsumerPolicy::allowing(Vec::<String>::new());
        assert!(eligible(&policy, &catalog, &settings).is_empty());
    }
}
