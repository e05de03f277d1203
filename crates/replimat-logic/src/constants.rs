//! Game constants — tick timing, power draw, meal def names, thresholds.
//!
//! These are plain constants with no engine dependency. Both the ECS
//! engine and the native simtest use these.

pub mod timing {
    /// Simulation ticks per real-time second.
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Length of one replication cycle (2 seconds).
    pub const COLLECT_DURATION_TICKS: u32 = 2 * TICKS_PER_SECOND;
}

pub mod power {
    /// Baseline draw of an idle terminal, in watts.
    pub const IDLE_DRAW: f32 = 125.0;
    /// Draw while a replication cycle is running, in watts.
    pub const ACTIVE_DRAW: f32 = 1500.0;
}

pub mod meals {
    pub const NUTRIENT_PASTE: &str = "MealNutrientPaste";
    pub const SIMPLE: &str = "MealSimple";
    pub const FINE: &str = "MealFine";
    pub const FINE_VEG: &str = "MealFine_Veg";
    pub const FINE_MEAT: &str = "MealFine_Meat";
    pub const LAVISH: &str = "MealLavish";
    pub const LAVISH_VEG: &str = "MealLavish_Veg";
    pub const LAVISH_MEAT: &str = "MealLavish_Meat";
    pub const SURVIVAL_PACK: &str = "MealSurvivalPack";
    pub const PEMMICAN: &str = "Pemmican";
    pub const CHOCOLATE: &str = "Chocolate";
    pub const RAW_POTATOES: &str = "RawPotatoes";
}

pub mod limits {
    /// Meals must carry strictly more nutrition than this to be replicated.
    pub const MIN_MEAL_NUTRITION: f64 = 0.4;
    /// Most survival meals a single batch request may produce.
    pub const BATCH_CAP: u32 = 30;
    /// Litres of feedstock per kilogram of replicated mass.
    pub const FEEDSTOCK_VOLUME_PER_KG: f64 = 8.0;
}
