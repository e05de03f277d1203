//! Name generation utilities

use rand::Rng;

/// Generate a random colonist name ("Given Family")
pub fn generate_name(rng: &mut impl Rng) -> String {
    let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
    let family = FAMILY_NAMES[rng.gen_range(0..FAMILY_NAMES.len())];

    format!("{} {}", given, family)
}

// Sample name lists - would be loaded from data files in production
static GIVEN_NAMES: &[&str] = &[
    "Ada", "Bruno", "Cass", "Dara", "Engie", "Fern", "Gideon", "Hana", "Ivo", "Juno", "Kai",
    "Lena", "Milo", "Nadia", "Oskar", "Pia", "Quinn", "Rosa", "Sven", "Tamsin", "Udo", "Vera",
    "Wren", "Xia", "Yusuf", "Zora",
];

static FAMILY_NAMES: &[&str] = &[
    "Abara", "Brandt", "Castillo", "Dubois", "Eriksen", "Fujita", "Garcia", "Holloway", "Ivanova",
    "Jansen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Petrov", "Quint", "Rossi",
    "Sato", "Tanaka", "Umarov", "Vargas", "Whitlock", "Yilmaz", "Zeller",
];
