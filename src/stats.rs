//! Creature stats and their short codes

use std::fmt;

/// Number of stats tracked per creature
pub const STAT_COUNT: usize = 12;

/// A tracked stat, in declaration order
///
/// The order is significant: stat vectors on a creature are indexed by
/// [`Stat::index`], and ranking ties are broken by this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Health,
    Stamina,
    Torpidity,
    Oxygen,
    Food,
    Water,
    Temperature,
    Weight,
    MeleeDamage,
    Speed,
    TemperatureFortitude,
    CraftingSpeed,
}

impl Stat {
    pub const ALL: [Stat; STAT_COUNT] = [
        Stat::Health,
        Stat::Stamina,
        Stat::Torpidity,
        Stat::Oxygen,
        Stat::Food,
        Stat::Water,
        Stat::Temperature,
        Stat::Weight,
        Stat::MeleeDamage,
        Stat::Speed,
        Stat::TemperatureFortitude,
        Stat::CraftingSpeed,
    ];

    /// Position in a creature's stat vectors
    pub fn index(self) -> usize {
        self as usize
    }

    /// Two-letter code used in token names (`hp`, `isTophp`, `hp_vb`)
    pub fn code(self) -> &'static str {
        match self {
            Stat::Health => "hp",
            Stat::Stamina => "st",
            Stat::Torpidity => "to",
            Stat::Oxygen => "ox",
            Stat::Food => "fo",
            Stat::Water => "wa",
            Stat::Temperature => "te",
            Stat::Weight => "we",
            Stat::MeleeDamage => "dm",
            Stat::Speed => "sp",
            Stat::TemperatureFortitude => "fr",
            Stat::CraftingSpeed => "cr",
        }
    }

    /// Look up a stat by its code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Stat> {
        Stat::ALL
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code))
    }

    /// Full display name
    pub fn name(self) -> &'static str {
        match self {
            Stat::Health => "Health",
            Stat::Stamina => "Stamina",
            Stat::Torpidity => "Torpidity",
            Stat::Oxygen => "Oxygen",
            Stat::Food => "Food",
            Stat::Water => "Water",
            Stat::Temperature => "Temperature",
            Stat::Weight => "Weight",
            Stat::MeleeDamage => "Melee Damage",
            Stat::Speed => "Speed",
            Stat::TemperatureFortitude => "Temperature Fortitude",
            Stat::CraftingSpeed => "Crafting Speed",
        }
    }

    /// Short display name, as shown by the `highestNs` tokens
    pub fn abbreviation(self) -> &'static str {
        match self {
            Stat::Health => "HP",
            Stat::Stamina => "St",
            Stat::Torpidity => "To",
            Stat::Oxygen => "Ox",
            Stat::Food => "Fo",
            Stat::Water => "Wa",
            Stat::Temperature => "Te",
            Stat::Weight => "We",
            Stat::MeleeDamage => "Dm",
            Stat::Speed => "Sp",
            Stat::TemperatureFortitude => "Fr",
            Stat::CraftingSpeed => "Cr",
        }
    }

    /// Stats whose breeding values are multipliers shown as percentages
    pub fn is_percentage(self) -> bool {
        matches!(
            self,
            Stat::MeleeDamage | Stat::Speed | Stat::CraftingSpeed
        )
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, stat) in Stat::ALL.iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
    }

    #[test]
    fn test_from_code_case_insensitive() {
        assert_eq!(Stat::from_code("HP"), Some(Stat::Health));
        assert_eq!(Stat::from_code("cr"), Some(Stat::CraftingSpeed));
        assert_eq!(Stat::from_code("xx"), None);
    }
}
