//! Species-wide top and lowest levels

use crate::creature::{Creature, CreatureId};
use crate::stats::{Stat, STAT_COUNT};

/// Best and runner-up value of one stat across a species
///
/// Keeping the runner-up lets "best among everyone except X" be answered
/// without rescanning: if X holds the best, the runner-up is the answer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Extreme {
    best: Option<(i32, CreatureId)>,
    runner_up: Option<i32>,
}

impl Extreme {
    fn offer(&mut self, level: i32, id: CreatureId, better: fn(i32, i32) -> bool) {
        match self.best {
            Some((best, _)) if !better(level, best) => {
                if self.runner_up.map_or(true, |r| better(level, r) || level == r) {
                    self.runner_up = Some(level);
                }
            }
            previous => {
                self.runner_up = previous.map(|(best, _)| best);
                self.best = Some((level, id));
            }
        }
    }

    fn excluding(&self, id: CreatureId) -> Option<i32> {
        match self.best {
            Some((_, holder)) if holder == id => self.runner_up,
            Some((best, _)) => Some(best),
            None => None,
        }
    }

    fn value(&self) -> Option<i32> {
        self.best.map(|(best, _)| best)
    }
}

/// Top and lowest wild levels per stat for one species
///
/// Only creatures that count for top stats (available or in a cryopod, not
/// placeholders) contribute, and unknown levels are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesLevels {
    top: [Extreme; STAT_COUNT],
    lowest: [Extreme; STAT_COUNT],
}

impl SpeciesLevels {
    pub fn compute(creatures: &[Creature]) -> Self {
        let mut levels = Self::default();
        for creature in creatures.iter().filter(|c| c.counts_for_top_stats()) {
            for stat in Stat::ALL {
                if let Some(level) = creature.level(stat) {
                    levels.top[stat.index()].offer(level, creature.id, |a, b| a > b);
                    levels.lowest[stat.index()].offer(level, creature.id, |a, b| a < b);
                }
            }
        }
        log::debug!("computed species levels over {} creatures", creatures.len());
        levels
    }

    /// Highest level of the stat in the species
    pub fn top(&self, stat: Stat) -> Option<i32> {
        self.top[stat.index()].value()
    }

    /// Highest level of the stat among creatures other than `id`
    pub fn top_excluding(&self, stat: Stat, id: CreatureId) -> Option<i32> {
        self.top[stat.index()].excluding(id)
    }

    pub fn lowest(&self, stat: Stat) -> Option<i32> {
        self.lowest[stat.index()].value()
    }

    pub fn lowest_excluding(&self, stat: Stat, id: CreatureId) -> Option<i32> {
        self.lowest[stat.index()].excluding(id)
    }
}
