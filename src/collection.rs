//! Collection files: creatures plus the species and color data to name them
//!
//! ```json
//! {
//!   "creatures": [{ "id": 1, "species": "Rex", "levelsWild": [30, 25] }],
//!   "species": [{ "name": "Rex", "colorRegions": ["Body", null] }],
//!   "colors": { "1": "Red" }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::creature::{Creature, CreatureId};
use crate::species::{ColorTable, Species};

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Failed to read collection file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse collection JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collection {
    pub creatures: Vec<Creature>,
    pub species: Vec<Species>,
    /// Overrides for the built-in color names
    pub colors: HashMap<u8, String>,
}

impl Collection {
    pub fn from_file(path: &Path) -> Result<Self, CollectionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, CollectionError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), CollectionError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn find(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn species(&self, name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.name == name)
    }

    /// Creatures of one species, in collection order
    pub fn siblings(&self, species: &str) -> Vec<Creature> {
        self.creatures
            .iter()
            .filter(|c| c.species == species)
            .cloned()
            .collect()
    }

    /// Built-in color names with this collection's overrides applied
    pub fn color_table(&self) -> ColorTable {
        ColorTable::default().with_overrides(self.colors.clone())
    }

    /// Set names by creature id; ids not in the collection are ignored
    pub fn apply_names<'n>(&mut self, names: impl IntoIterator<Item = (CreatureId, &'n str)>) {
        let names: HashMap<CreatureId, &str> = names.into_iter().collect();
        for creature in &mut self.creatures {
            if let Some(name) = names.get(&creature.id) {
                creature.name = name.to_string();
            }
        }
    }
}
