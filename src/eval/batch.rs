//! Renaming whole collections
//!
//! Creatures are grouped by species. Within a group they are named in
//! collection order and each new name is written into the group's working
//! copy before the next creature is named, so later creatures see earlier
//! results. Groups are independent and run on the rayon pool.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use rayon::prelude::*;

use crate::config::NamingConfig;
use crate::creature::{Creature, CreatureId};
use crate::replacements::CustomReplacements;
use crate::species::{ColorTable, Species};
use crate::tokens::SpeciesLevels;

use super::{NameOutcome, NamePattern, NamingContext, RenderMode};

/// Name assigned to one creature by a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct Rename {
    pub id: CreatureId,
    pub old_name: String,
    pub outcome: NameOutcome,
}

impl Rename {
    pub fn changed(&self) -> bool {
        self.old_name != self.outcome.name
    }
}

pub struct BatchRenamer<'a> {
    pattern: &'a NamePattern,
    config: &'a NamingConfig,
    species: HashMap<&'a str, &'a Species>,
    colors: Option<&'a ColorTable>,
    replacements: Option<&'a CustomReplacements>,
    now: DateTime<Local>,
}

impl<'a> BatchRenamer<'a> {
    pub fn new(pattern: &'a NamePattern, config: &'a NamingConfig) -> Self {
        Self {
            pattern,
            config,
            species: HashMap::new(),
            colors: None,
            replacements: None,
            now: Local::now(),
        }
    }

    pub fn with_species(mut self, species: &'a [Species]) -> Self {
        self.species = species.iter().map(|s| (s.name.as_str(), s)).collect();
        self
    }

    pub fn with_colors(mut self, colors: &'a ColorTable) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_replacements(mut self, replacements: &'a CustomReplacements) -> Self {
        self.replacements = Some(replacements);
        self
    }

    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Name every creature; results come back in collection order
    pub fn rename_all(&self, creatures: &[Creature]) -> Vec<Rename> {
        let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
        let mut group_of: HashMap<&str, usize> = HashMap::new();
        for (index, creature) in creatures.iter().enumerate() {
            let group = *group_of.entry(creature.species.as_str()).or_insert_with(|| {
                groups.push((creature.species.as_str(), Vec::new()));
                groups.len() - 1
            });
            groups[group].1.push(index);
        }
        log::debug!(
            "renaming {} creatures in {} species groups",
            creatures.len(),
            groups.len()
        );

        let mut renamed: Vec<(usize, Rename)> = groups
            .par_iter()
            .flat_map_iter(|(species, indices)| self.rename_group(species, indices, creatures))
            .collect();
        renamed.sort_by_key(|(index, _)| *index);
        renamed.into_iter().map(|(_, rename)| rename).collect()
    }

    fn rename_group(
        &self,
        species: &str,
        indices: &[usize],
        creatures: &[Creature],
    ) -> Vec<(usize, Rename)> {
        let mut view: Vec<Creature> = indices.iter().map(|&i| creatures[i].clone()).collect();
        // Renaming never changes levels, so one computation serves the group
        let levels = SpeciesLevels::compute(&view);
        let mut results = Vec::with_capacity(view.len());

        for (position, &index) in indices.iter().enumerate() {
            let outcome = {
                let ctx = self.context(&view[position], &view, species, &levels);
                self.pattern.generate(&ctx)
            };
            let creature = &mut view[position];
            results.push((
                index,
                Rename {
                    id: creature.id,
                    old_name: std::mem::replace(&mut creature.name, outcome.name.clone()),
                    outcome,
                },
            ));
        }
        results
    }

    fn context<'c>(
        &'c self,
        creature: &'c Creature,
        view: &'c [Creature],
        species: &str,
        levels: &'c SpeciesLevels,
    ) -> NamingContext<'c> {
        let mut ctx = NamingContext::new(creature, view)
            .with_config(self.config)
            .with_mode(RenderMode::Commit)
            .with_now(self.now)
            .with_levels(levels);
        if let Some(definition) = self.species.get(species) {
            ctx = ctx.with_species(definition);
        }
        if let Some(colors) = self.colors {
            ctx = ctx.with_colors(colors);
        }
        if let Some(replacements) = self.replacements {
            ctx = ctx.with_replacements(replacements);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_committed_before_next_creature() {
        let creatures = vec![
            Creature::new(1, "Rex"),
            Creature::new(2, "Rex"),
            Creature::new(3, "Rex"),
        ];
        let pattern = NamePattern::new("{species}_{n}");
        let config = NamingConfig::default();
        let renames = BatchRenamer::new(&pattern, &config).rename_all(&creatures);
        let names: Vec<&str> = renames.iter().map(|r| r.outcome.name.as_str()).collect();
        assert_eq!(names, vec!["Rex_1", "Rex_2", "Rex_3"]);
    }

    #[test]
    fn test_species_groups_are_independent_and_order_is_kept() {
        let creatures = vec![
            Creature::new(1, "Rex"),
            Creature::new(2, "Raptor"),
            Creature::new(3, "Rex"),
            Creature::new(4, "Raptor"),
        ];
        let pattern = NamePattern::new("{species}_{n}");
        let config = NamingConfig::default();
        let renames = BatchRenamer::new(&pattern, &config).rename_all(&creatures);
        let names: Vec<(u64, &str)> = renames
            .iter()
            .map(|r| (r.id, r.outcome.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![(1, "Rex_1"), (2, "Raptor_1"), (3, "Rex_2"), (4, "Raptor_2")]
        );
    }

    #[test]
    fn test_old_name_reported() {
        let creatures = vec![Creature::new(1, "Rex").with_name("Chomper")];
        let pattern = NamePattern::new("{species}");
        let config = NamingConfig::default();
        let renames = BatchRenamer::new(&pattern, &config).rename_all(&creatures);
        assert_eq!(renames[0].old_name, "Chomper");
        assert!(renames[0].changed());
    }
}
