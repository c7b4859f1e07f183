//! Token values for a creature in its naming context

use rand::Rng;
use serde::Serialize;

use super::TokenKey;
use crate::creature::{Creature, Domestication};
use crate::eval::NamingContext;
use crate::functions::numfmt::fixed_trimmed;
use crate::stats::Stat;

const MAX_DISPLAYED_MUTATIONS: u32 = 99;

/// One line of the token dictionary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenEntry {
    pub name: String,
    pub value: String,
    pub description: String,
}

/// Resolve a token for the context's creature
///
/// `n` is resolved by the evaluator during the uniqueness search; asked here
/// it yields the preview placeholder.
pub fn resolve(key: TokenKey, ctx: &NamingContext) -> String {
    let creature = ctx.creature;
    match key {
        TokenKey::Species => creature.species.clone(),
        TokenKey::SpeciesNoVowels => without_vowels(&creature.species),
        TokenKey::FirstWordOfOldest => first_word_of_oldest(ctx),
        TokenKey::Owner => creature.owner.clone(),
        TokenKey::Tribe => creature.tribe.clone(),
        TokenKey::Server => creature.server.clone(),
        TokenKey::Sex | TokenKey::SexLang | TokenKey::SexLangGen => creature.sex.name().into(),
        TokenKey::SexShort | TokenKey::SexLangShort | TokenKey::SexLangShortGen => {
            creature.sex.short().into()
        }
        TokenKey::UniqueNumber => ctx.config.preview_placeholder.clone(),
        TokenKey::Level(stat) => ctx.level(stat).map(|l| l.to_string()).unwrap_or_default(),
        TokenKey::BreedingValue(stat) => breeding_value(ctx, stat),
        TokenKey::IsTop(stat) => flag(level_vs(ctx, stat, Rank::Top, false)),
        TokenKey::IsNewTop(stat) => flag(level_vs(ctx, stat, Rank::Top, true)),
        TokenKey::IsLowest(stat) => flag(level_vs(ctx, stat, Rank::Lowest, false)),
        TokenKey::IsNewLowest(stat) => flag(level_vs(ctx, stat, Rank::Lowest, true)),
        TokenKey::Domestication => creature.domestication.marker().into(),
        TokenKey::EffImp => eff_imp(creature, 1),
        TokenKey::EffImpShort => eff_imp(creature, 0),
        TokenKey::Index => index(ctx).to_string(),
        TokenKey::OldName => creature.name.clone(),
        TokenKey::TopPercent => top_percent(ctx),
        TokenKey::BaseLevel => base_level(ctx).to_string(),
        TokenKey::Mutations => creature.mutations.min(MAX_DISPLAYED_MUTATIONS).to_string(),
        TokenKey::Generation => creature.generation.to_string(),
        TokenKey::GenerationLetters => generation_letters(creature.generation),
        TokenKey::GenerationCount => {
            count_plus_one(ctx.others().filter(|c| c.generation == creature.generation))
        }
        TokenKey::NrInGeneration => count_plus_one(
            ctx.others()
                .filter(|c| c.generation == creature.generation)
                .filter(|c| added_before(c, creature)),
        ),
        TokenKey::NrInGenerationSex => count_plus_one(
            ctx.others()
                .filter(|c| c.generation == creature.generation && c.sex == creature.sex)
                .filter(|c| added_before(c, creature)),
        ),
        TokenKey::Random => format!("{:06}", rand::thread_rng().gen_range(0..1_000_000)),
        TokenKey::TotalCount => count_plus_one(ctx.others()),
        TokenKey::SexCount => count_plus_one(ctx.others().filter(|c| c.sex == creature.sex)),
        TokenKey::ArkId => creature.ark_id.map(|id| id.to_string()).unwrap_or_default(),
        TokenKey::AlreadyExists => flag(creature.is_added()),
        TokenKey::HighestLevel(rank) => highest(ctx, rank)
            .map(|(_, level)| level.to_string())
            .unwrap_or_default(),
        TokenKey::HighestStat(rank) => highest(ctx, rank)
            .map(|(stat, _)| stat.abbreviation().to_string())
            .unwrap_or_default(),
    }
}

/// All catalog tokens with their current values
pub fn token_dictionary(ctx: &NamingContext) -> Vec<TokenEntry> {
    TokenKey::catalog()
        .into_iter()
        .map(|key| TokenEntry {
            name: key.name(),
            value: resolve(key, ctx),
            description: key.description_for(ctx.species),
        })
        .collect()
}

fn flag(value: bool) -> String {
    if value {
        "1".into()
    } else {
        String::new()
    }
}

fn count_plus_one<'a>(creatures: impl Iterator<Item = &'a Creature>) -> String {
    (creatures.count() + 1).to_string()
}

/// A creature not yet added sorts after every added one
fn added_before(other: &Creature, creature: &Creature) -> bool {
    match (other.added_to_library, creature.added_to_library) {
        (Some(theirs), Some(ours)) => theirs < ours,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn without_vowels(species: &str) -> String {
    let mut chars = species.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    std::iter::once(first)
        .chain(chars.filter(|c| !"aeiouAEIOU".contains(*c)))
        .collect()
}

fn first_word_of_oldest(ctx: &NamingContext) -> String {
    std::iter::once(ctx.creature)
        .chain(ctx.others())
        .filter(|c| !c.name.is_empty())
        .filter_map(|c| c.added_to_library.map(|added| (added, c)))
        .min_by_key(|(added, _)| *added)
        .and_then(|(_, c)| c.name.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}

fn breeding_value(ctx: &NamingContext, stat: Stat) -> String {
    if !ctx.uses_stat(stat) {
        return String::new();
    }
    match ctx.creature.breeding_value(stat) {
        Some(value) if stat.is_percentage() => fixed_trimmed(value * 100.0, 2),
        Some(value) => fixed_trimmed(value, 2),
        None => String::new(),
    }
}

#[derive(Clone, Copy)]
enum Rank {
    Top,
    Lowest,
}

/// Compare the creature's level with the species extreme
///
/// The extreme is taken over the other creatures, so comparing with ties
/// allowed is the same as comparing with the extreme including the creature.
/// With `strict` ties do not count. A creature with nothing to compare to
/// is its own extreme.
fn level_vs(ctx: &NamingContext, stat: Stat, rank: Rank, strict: bool) -> bool {
    let Some(level) = ctx.level(stat) else {
        return false;
    };
    let levels = ctx.levels();
    let id = ctx.creature.id;
    let extreme = match rank {
        Rank::Top => levels.top_excluding(stat, id),
        Rank::Lowest => levels.lowest_excluding(stat, id),
    };
    match (extreme, rank, strict) {
        (None, _, _) => true,
        (Some(e), Rank::Top, false) => level >= e,
        (Some(e), Rank::Top, true) => level > e,
        (Some(e), Rank::Lowest, false) => level <= e,
        (Some(e), Rank::Lowest, true) => level < e,
    }
}

fn eff_imp(creature: &Creature, decimals: usize) -> String {
    let (prefix, value) = match creature.domestication {
        Domestication::Bred => ("I", creature.imprinting_bonus),
        Domestication::Tamed | Domestication::Wild => ("E", creature.taming_effectiveness),
    };
    match value {
        Some(v) if v >= 0.0 => format!("{}{}", prefix, fixed_trimmed(v * 100.0, decimals)),
        _ => "Z".into(),
    }
}

fn index(ctx: &NamingContext) -> usize {
    ctx.siblings
        .iter()
        .position(|c| c.id == ctx.creature.id)
        .unwrap_or_else(|| ctx.others().count())
        + 1
}

fn top_percent(ctx: &NamingContext) -> String {
    let creature = ctx.creature;
    let levels = ctx.levels();
    let mut own = 0i64;
    let mut top = 0i64;
    for &stat in &ctx.config.considered_stats {
        let Some(level) = ctx.level(stat) else {
            continue;
        };
        let best = levels
            .top_excluding(stat, creature.id)
            .map_or(level, |t| t.max(level));
        own += i64::from(level);
        top += i64::from(best);
    }
    if top <= 0 {
        return String::new();
    }
    fixed_trimmed(own as f64 / top as f64 * 100.0, 1)
}

fn base_level(ctx: &NamingContext) -> i32 {
    match ctx.level(Stat::Torpidity) {
        Some(torpidity) => torpidity + 1,
        None => {
            Stat::ALL
                .into_iter()
                .filter_map(|s| ctx.level(s))
                .sum::<i32>()
                + 1
        }
    }
}

/// 0 = A, 25 = Z, 26 = AA, 27 = AB
fn generation_letters(generation: u32) -> String {
    let mut n = generation;
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Nth highest known level among the species' stats, excluding torpidity;
/// ties keep stat order
fn highest(ctx: &NamingContext, rank: u8) -> Option<(Stat, i32)> {
    let mut ranked: Vec<(Stat, i32)> = Stat::ALL
        .into_iter()
        .filter(|&s| s != Stat::Torpidity)
        .filter_map(|s| ctx.level(s).map(|l| (s, l)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.get(usize::from(rank).checked_sub(1)?).copied()
}
