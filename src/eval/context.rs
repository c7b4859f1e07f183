//! Everything a pattern is evaluated against

use std::borrow::Cow;
use std::cell::OnceCell;

use chrono::{DateTime, Local};

use crate::config::NamingConfig;
use crate::creature::Creature;
use crate::replacements::CustomReplacements;
use crate::species::{ColorTable, Species};
use crate::stats::Stat;
use crate::tokens::SpeciesLevels;

/// Whether a name is being previewed or assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Interactive preview: short uniqueness search, placeholder allowed
    Preview,
    #[default]
    Commit,
}

/// Evaluation context for one creature
///
/// `siblings` holds the creatures of the same species; the creature itself
/// may or may not be among them and is excluded by id wherever "other
/// creatures" are meant.
#[derive(Debug)]
pub struct NamingContext<'a> {
    pub creature: &'a Creature,
    pub siblings: &'a [Creature],
    pub species: Option<&'a Species>,
    pub colors: Option<&'a ColorTable>,
    pub replacements: Option<&'a CustomReplacements>,
    pub config: Cow<'a, NamingConfig>,
    pub mode: RenderMode,
    pub now: DateTime<Local>,
    shared_levels: Option<&'a SpeciesLevels>,
    levels: OnceCell<SpeciesLevels>,
}

impl<'a> NamingContext<'a> {
    pub fn new(creature: &'a Creature, siblings: &'a [Creature]) -> Self {
        Self {
            creature,
            siblings,
            species: None,
            colors: None,
            replacements: None,
            config: Cow::Owned(NamingConfig::default()),
            mode: RenderMode::default(),
            now: Local::now(),
            shared_levels: None,
            levels: OnceCell::new(),
        }
    }

    pub fn with_species(mut self, species: &'a Species) -> Self {
        self.species = Some(species);
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

    pub fn with_config(mut self, config: &'a NamingConfig) -> Self {
        self.config = Cow::Borrowed(config);
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fix the instant used by the `time` function
    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Reuse species levels computed for the same sibling set
    pub fn with_levels(mut self, levels: &'a SpeciesLevels) -> Self {
        self.shared_levels = Some(levels);
        self
    }

    /// Species top/lowest levels, computed on first use unless shared
    pub fn levels(&self) -> &SpeciesLevels {
        match self.shared_levels {
            Some(levels) => levels,
            None => self
                .levels
                .get_or_init(|| SpeciesLevels::compute(self.siblings)),
        }
    }

    /// Whether the creature's species uses a stat; all stats without a species
    pub fn uses_stat(&self, stat: Stat) -> bool {
        self.species.map_or(true, |s| s.uses_stat(stat))
    }

    /// The creature's known level in a stat its species uses
    pub fn level(&self, stat: Stat) -> Option<i32> {
        if !self.uses_stat(stat) {
            return None;
        }
        self.creature.level(stat)
    }

    /// Siblings other than the creature being named
    pub fn others(&self) -> impl Iterator<Item = &'a Creature> + '_ {
        let id = self.creature.id;
        self.siblings.iter().filter(move |c| c.id != id)
    }

    pub fn color_table(&self) -> &ColorTable {
        self.colors.unwrap_or(ColorTable::builtin())
    }

    pub fn is_preview(&self) -> bool {
        self.mode == RenderMode::Preview
    }
}
