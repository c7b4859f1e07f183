//! Records being named: creatures with stats, lineage and ownership metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::Stat;

/// Internal identifier of a creature within a collection
pub type CreatureId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    pub fn name(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Unknown => "Unknown",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "U",
        }
    }
}

/// How the creature came under the owner's control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Domestication {
    Wild,
    #[default]
    Tamed,
    Bred,
}

impl Domestication {
    /// Marker used by the `dom` token
    pub fn marker(self) -> &'static str {
        match self {
            Domestication::Wild => "W",
            Domestication::Tamed => "T",
            Domestication::Bred => "B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CreatureStatus {
    #[default]
    Available,
    Dead,
    Unavailable,
    Obelisk,
    Cryopod,
}

/// A creature record
///
/// Stat vectors are indexed by [`Stat::index`]; they may be shorter than the
/// full stat list, and a negative level means the level is unknown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Creature {
    pub id: CreatureId,
    /// External identifier as seen in game
    pub ark_id: Option<u64>,
    pub name: String,
    pub species: String,
    pub sex: Sex,
    pub owner: String,
    pub tribe: String,
    pub server: String,
    pub levels_wild: Vec<i32>,
    pub values_breeding: Vec<f64>,
    pub domestication: Domestication,
    /// Fraction 0..1, for tamed creatures
    pub taming_effectiveness: Option<f64>,
    /// Fraction 0..1, for bred creatures
    pub imprinting_bonus: Option<f64>,
    pub mutations: u32,
    pub generation: u32,
    /// When the creature was added to the collection; `None` if not yet added
    pub added_to_library: Option<DateTime<Utc>>,
    /// Color id per color region
    pub colors: Vec<u8>,
    pub status: CreatureStatus,
    pub is_placeholder: bool,
}

impl Creature {
    pub fn new(id: CreatureId, species: impl Into<String>) -> Self {
        Self {
            id,
            species: species.into(),
            ..Default::default()
        }
    }

    /// Wild level of a stat, `None` if out of range or unknown
    pub fn level(&self, stat: Stat) -> Option<i32> {
        self.levels_wild
            .get(stat.index())
            .copied()
            .filter(|&l| l >= 0)
    }

    pub fn breeding_value(&self, stat: Stat) -> Option<f64> {
        self.values_breeding.get(stat.index()).copied()
    }

    pub fn is_added(&self) -> bool {
        self.added_to_library.is_some()
    }

    /// Whether this creature's levels take part in species top/lowest stats
    pub fn counts_for_top_stats(&self) -> bool {
        !self.is_placeholder
            && matches!(
                self.status,
                CreatureStatus::Available | CreatureStatus::Cryopod
            )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    pub fn with_levels(mut self, levels: impl Into<Vec<i32>>) -> Self {
        self.levels_wild = levels.into();
        self
    }

    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_added(mut self, added: DateTime<Utc>) -> Self {
        self.added_to_library = Some(added);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_out_of_range_and_unknown() {
        let c = Creature::new(1, "Rex").with_levels(vec![10, -1]);
        assert_eq!(c.level(Stat::Health), Some(10));
        assert_eq!(c.level(Stat::Stamina), None);
        assert_eq!(c.level(Stat::Oxygen), None);
    }

    #[test]
    fn test_counts_for_top_stats() {
        let mut c = Creature::new(1, "Rex");
        assert!(c.counts_for_top_stats());
        c.status = CreatureStatus::Dead;
        assert!(!c.counts_for_top_stats());
        c.status = CreatureStatus::Cryopod;
        c.is_placeholder = true;
        assert!(!c.counts_for_top_stats());
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{"id": 7, "species": "Rex", "levelsWild": [1, 2], "sex": "Female"}"#;
        let c: Creature = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(c.id, 7);
        assert_eq!(c.sex, Sex::Female);
        assert_eq!(c.levels_wild, vec![1, 2]);
        assert_eq!(c.domestication, Domestication::Tamed);
        assert!(!c.is_added());
    }
}
