//! Species definitions and the color name table

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::stats::Stat;

/// Per-species data consulted by tokens and the `color` function
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Species {
    pub name: String,
    /// Custom stat names keyed by stat code, e.g. `"ox": "Charge Capacity"`
    pub stat_names: HashMap<String, String>,
    /// Stat codes this species uses; all stats when absent
    pub used_stats: Option<Vec<String>>,
    /// Name per color region; `None` marks an unused region
    pub color_regions: Vec<Option<String>>,
}

impl Species {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Display name of a stat, honouring species overrides
    pub fn stat_name(&self, stat: Stat) -> &str {
        self.stat_names
            .get(stat.code())
            .map(String::as_str)
            .unwrap_or_else(|| stat.name())
    }

    pub fn uses_stat(&self, stat: Stat) -> bool {
        match &self.used_stats {
            Some(codes) => codes.iter().any(|c| c.eq_ignore_ascii_case(stat.code())),
            None => true,
        }
    }

    /// Whether a color region exists and is in use
    pub fn region_used(&self, region: usize) -> bool {
        matches!(self.color_regions.get(region), Some(Some(_)))
    }

    pub fn with_color_regions(mut self, regions: Vec<Option<String>>) -> Self {
        self.color_regions = regions;
        self
    }
}

/// Built-in dye names, starting at color id 1
const DYE_NAMES: &[&str] = &[
    "Red",
    "Blue",
    "Green",
    "Yellow",
    "Cyan",
    "Magenta",
    "Light Green",
    "Light Grey",
    "Light Brown",
    "Light Orange",
    "Light Yellow",
    "Light Red",
    "Dark Grey",
    "Black",
    "Brown",
    "Dark Green",
    "Dark Red",
    "White",
    "Dino Light Red",
    "Dino Dark Red",
    "Dino Light Orange",
    "Dino Dark Orange",
    "Dino Light Yellow",
    "Dino Dark Yellow",
    "Dino Light Green",
    "Dino Medium Green",
    "Dino Dark Green",
    "Dino Light Blue",
    "Dino Dark Blue",
    "Dino Light Purple",
    "Dino Dark Purple",
    "Dino Light Brown",
    "Dino Medium Brown",
    "Dino Dark Brown",
    "Dino Darker Grey",
    "Dino Albino",
    "BigFoot0",
    "BigFoot4",
    "BigFoot5",
    "WolfFur",
    "DarkWolfFur",
    "DragonBase0",
    "DragonBase1",
    "DragonFire",
    "DragonGreen0",
    "DragonGreen1",
    "DragonGreen2",
    "DragonGreen3",
    "WyvernPurple0",
    "WyvernPurple1",
    "WyvernBlue0",
    "WyvernBlue1",
    "Dino Medium Blue",
    "Dino Deep Blue",
    "NearWhite",
    "NearBlack",
];

/// Color id to name mapping
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    names: HashMap<u8, String>,
}

impl Default for ColorTable {
    fn default() -> Self {
        let names = DYE_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| ((i + 1) as u8, name.to_string()))
            .collect();
        Self { names }
    }
}

impl ColorTable {
    /// Shared instance of the built-in dye table
    pub fn builtin() -> &'static ColorTable {
        static BUILTIN: OnceLock<ColorTable> = OnceLock::new();
        BUILTIN.get_or_init(ColorTable::default)
    }

    /// Add or replace entries, keeping the rest of the table
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (u8, String)>) -> Self {
        self.names.extend(overrides);
        self
    }

    /// Name of a color, `None` for ids not in the table
    pub fn name(&self, id: u8) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
