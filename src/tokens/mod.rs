//! Token catalog: the names usable as `{name}` in a pattern
//!
//! Token names are matched case-insensitively. Stat-parametric tokens
//! (`hp`, `hp_vb`, `isTophp`, ...) exist once per [`Stat`].

mod aggregate;
mod resolver;

pub use aggregate::SpeciesLevels;
pub use resolver::{resolve, token_dictionary, TokenEntry};

use crate::species::Species;
use crate::stats::Stat;

/// Highest rank addressable by `highestNl` / `highestNs`
pub const MAX_HIGHEST_RANK: u8 = 6;

/// A known token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    Species,
    SpeciesNoVowels,
    FirstWordOfOldest,
    Owner,
    Tribe,
    Server,
    Sex,
    SexShort,
    UniqueNumber,
    Level(Stat),
    BreedingValue(Stat),
    IsTop(Stat),
    IsNewTop(Stat),
    IsLowest(Stat),
    IsNewLowest(Stat),
    Domestication,
    EffImp,
    EffImpShort,
    Index,
    OldName,
    SexLang,
    SexLangShort,
    SexLangGen,
    SexLangShortGen,
    TopPercent,
    BaseLevel,
    Mutations,
    Generation,
    GenerationLetters,
    GenerationCount,
    NrInGeneration,
    NrInGenerationSex,
    Random,
    TotalCount,
    SexCount,
    ArkId,
    AlreadyExists,
    /// Nth highest own level, 1-based
    HighestLevel(u8),
    /// Stat of the Nth highest own level, 1-based
    HighestStat(u8),
}

/// Tokens without a stat or rank parameter, keyed by lowercase name
const FIXED: &[(&str, TokenKey)] = &[
    ("species", TokenKey::Species),
    ("spcsnm", TokenKey::SpeciesNoVowels),
    ("firstwordofoldest", TokenKey::FirstWordOfOldest),
    ("owner", TokenKey::Owner),
    ("tribe", TokenKey::Tribe),
    ("server", TokenKey::Server),
    ("sex", TokenKey::Sex),
    ("sex_short", TokenKey::SexShort),
    ("n", TokenKey::UniqueNumber),
    ("dom", TokenKey::Domestication),
    ("effimp", TokenKey::EffImp),
    ("effimp_short", TokenKey::EffImpShort),
    ("index", TokenKey::Index),
    ("oldname", TokenKey::OldName),
    ("sex_lang", TokenKey::SexLang),
    ("sex_lang_short", TokenKey::SexLangShort),
    ("sex_lang_gen", TokenKey::SexLangGen),
    ("sex_lang_short_gen", TokenKey::SexLangShortGen),
    ("toppercent", TokenKey::TopPercent),
    ("baselvl", TokenKey::BaseLevel),
    ("muta", TokenKey::Mutations),
    ("gen", TokenKey::Generation),
    ("gena", TokenKey::GenerationLetters),
    ("genn", TokenKey::GenerationCount),
    ("nr_in_gen", TokenKey::NrInGeneration),
    ("nr_in_gen_sex", TokenKey::NrInGenerationSex),
    ("rnd", TokenKey::Random),
    ("tn", TokenKey::TotalCount),
    ("sn", TokenKey::SexCount),
    ("arkid", TokenKey::ArkId),
    ("alreadyexists", TokenKey::AlreadyExists),
];

impl TokenKey {
    /// Look up a token by name, ignoring case
    pub fn parse(name: &str) -> Option<TokenKey> {
        let lower = name.to_ascii_lowercase();

        if let Some((_, key)) = FIXED.iter().find(|(n, _)| *n == lower) {
            return Some(*key);
        }
        if let Some(stat) = Stat::from_code(&lower) {
            return Some(TokenKey::Level(stat));
        }
        if let Some(code) = lower.strip_suffix("_vb") {
            return Stat::from_code(code).map(TokenKey::BreedingValue);
        }

        // Longer prefixes first: "isnewtop" must not be read as "is" + "newtop"
        let prefixed: [(&str, fn(Stat) -> TokenKey); 4] = [
            ("isnewtop", TokenKey::IsNewTop),
            ("isnewlowest", TokenKey::IsNewLowest),
            ("istop", TokenKey::IsTop),
            ("islowest", TokenKey::IsLowest),
        ];
        for (prefix, make) in prefixed {
            if let Some(code) = lower.strip_prefix(prefix) {
                return Stat::from_code(code).map(make);
            }
        }

        let rest = lower.strip_prefix("highest")?;
        let mut chars = rest.chars();
        let rank = chars.next()?.to_digit(10)? as u8;
        if !(1..=MAX_HIGHEST_RANK).contains(&rank) {
            return None;
        }
        match chars.as_str() {
            "l" => Some(TokenKey::HighestLevel(rank)),
            "s" => Some(TokenKey::HighestStat(rank)),
            _ => None,
        }
    }

    /// Canonical spelling of the token name
    pub fn name(self) -> String {
        match self {
            TokenKey::Species => "species".into(),
            TokenKey::SpeciesNoVowels => "spcsNm".into(),
            TokenKey::FirstWordOfOldest => "firstWordOfOldest".into(),
            TokenKey::Owner => "owner".into(),
            TokenKey::Tribe => "tribe".into(),
            TokenKey::Server => "server".into(),
            TokenKey::Sex => "sex".into(),
            TokenKey::SexShort => "sex_short".into(),
            TokenKey::UniqueNumber => "n".into(),
            TokenKey::Level(stat) => stat.code().into(),
            TokenKey::BreedingValue(stat) => format!("{}_vb", stat.code()),
            TokenKey::IsTop(stat) => format!("isTop{}", stat.code()),
            TokenKey::IsNewTop(stat) => format!("isNewTop{}", stat.code()),
            TokenKey::IsLowest(stat) => format!("isLowest{}", stat.code()),
            TokenKey::IsNewLowest(stat) => format!("isNewLowest{}", stat.code()),
            TokenKey::Domestication => "dom".into(),
            TokenKey::EffImp => "effImp".into(),
            TokenKey::EffImpShort => "effImp_short".into(),
            TokenKey::Index => "index".into(),
            TokenKey::OldName => "oldname".into(),
            TokenKey::SexLang => "sex_lang".into(),
            TokenKey::SexLangShort => "sex_lang_short".into(),
            TokenKey::SexLangGen => "sex_lang_gen".into(),
            TokenKey::SexLangShortGen => "sex_lang_short_gen".into(),
            TokenKey::TopPercent => "topPercent".into(),
            TokenKey::BaseLevel => "baselvl".into(),
            TokenKey::Mutations => "muta".into(),
            TokenKey::Generation => "gen".into(),
            TokenKey::GenerationLetters => "gena".into(),
            TokenKey::GenerationCount => "genn".into(),
            TokenKey::NrInGeneration => "nr_in_gen".into(),
            TokenKey::NrInGenerationSex => "nr_in_gen_sex".into(),
            TokenKey::Random => "rnd".into(),
            TokenKey::TotalCount => "tn".into(),
            TokenKey::SexCount => "sn".into(),
            TokenKey::ArkId => "arkid".into(),
            TokenKey::AlreadyExists => "alreadyExists".into(),
            TokenKey::HighestLevel(rank) => format!("highest{}l", rank),
            TokenKey::HighestStat(rank) => format!("highest{}s", rank),
        }
    }

    /// Human readable description, as shown next to the token dictionary
    pub fn description(self) -> String {
        self.description_for(None)
    }

    /// Description naming stats the way the species calls them
    pub fn description_for(self, species: Option<&Species>) -> String {
        let stat_name = |stat: Stat| species.map_or(stat.name(), |s| s.stat_name(stat));
        match self {
            TokenKey::Species => "species name".into(),
            TokenKey::SpeciesNoVowels => "species name without vowels".into(),
            TokenKey::FirstWordOfOldest => {
                "first word of the name of the first added creature of the species".into()
            }
            TokenKey::Owner => "name of the owner of the creature".into(),
            TokenKey::Tribe => "name of the tribe the creature belongs to".into(),
            TokenKey::Server => "name of the server the creature is assigned to".into(),
            TokenKey::Sex => "sex (\"Male\", \"Female\", \"Unknown\")".into(),
            TokenKey::SexShort => "\"M\", \"F\", \"U\"".into(),
            TokenKey::UniqueNumber => "smallest integer >= 1 that makes the name unique; \
                 use {{#ifexpr: {n} > 1 | _{n} }} to only show it when needed"
                .into(),
            TokenKey::Level(stat) => format!("level of {}", stat_name(stat)),
            TokenKey::BreedingValue(stat) => format!("breeding value of {}", stat_name(stat)),
            TokenKey::IsTop(stat) => format!(
                "1 if the {} level is the top level of the species, empty otherwise",
                stat_name(stat)
            ),
            TokenKey::IsNewTop(stat) => format!(
                "1 if the {} level is higher than the current top of the species, empty otherwise",
                stat_name(stat)
            ),
            TokenKey::IsLowest(stat) => format!(
                "1 if the {} level is the lowest level of the species, empty otherwise",
                stat_name(stat)
            ),
            TokenKey::IsNewLowest(stat) => format!(
                "1 if the {} level is lower than the current lowest of the species, empty otherwise",
                stat_name(stat)
            ),
            TokenKey::Domestication => "\"T\" for tamed, \"B\" for bred, \"W\" for wild".into(),
            TokenKey::EffImp => "taming effectiveness or imprinting bonus".into(),
            TokenKey::EffImpShort => {
                "taming effectiveness or imprinting bonus without decimals".into()
            }
            TokenKey::Index => "index in the collection among the same species".into(),
            TokenKey::OldName => "current name of the creature".into(),
            TokenKey::SexLang => "sex (\"Male\", \"Female\", \"Unknown\")".into(),
            TokenKey::SexLangShort => "sex, short form".into(),
            TokenKey::SexLangGen => "sex, genitive form".into(),
            TokenKey::SexLangShortGen => "sex, short genitive form".into(),
            TokenKey::TopPercent => {
                "percentage of the considered stat levels compared to the top levels of the species"
                    .into()
            }
            TokenKey::BaseLevel => "level right after taming or hatching".into(),
            TokenKey::Mutations => "mutations, capped at 99".into(),
            TokenKey::Generation => "generation".into(),
            TokenKey::GenerationLetters => "generation in letters (0=A, 1=B, 26=AA)".into(),
            TokenKey::GenerationCount => {
                "number of creatures of the species in the same generation plus one".into()
            }
            TokenKey::NrInGeneration => {
                "number of the creature in its generation, ordered by time added".into()
            }
            TokenKey::NrInGenerationSex => {
                "number of the creature in its generation with the same sex, ordered by time added"
                    .into()
            }
            TokenKey::Random => "6-digit random number in the range 0 to 999999".into(),
            TokenKey::TotalCount => "number of creatures of the species plus one".into(),
            TokenKey::SexCount => {
                "number of creatures of the species with the same sex plus one".into()
            }
            TokenKey::ArkId => "the in-game ARK id".into(),
            TokenKey::AlreadyExists => "1 if the creature is already in the collection".into(),
            TokenKey::HighestLevel(rank) => format!(
                "{} highest stat level of the creature (excluding torpidity)",
                ordinal(rank)
            ),
            TokenKey::HighestStat(rank) => format!(
                "stat name of the {} highest stat level (excluding torpidity)",
                ordinal(rank)
            ),
        }
    }

    /// Every token in catalog order, stat and rank tokens expanded
    pub fn catalog() -> Vec<TokenKey> {
        let mut keys = vec![
            TokenKey::Species,
            TokenKey::SpeciesNoVowels,
            TokenKey::FirstWordOfOldest,
            TokenKey::Owner,
            TokenKey::Tribe,
            TokenKey::Server,
            TokenKey::Sex,
            TokenKey::SexShort,
            TokenKey::UniqueNumber,
        ];
        keys.extend(Stat::ALL.map(TokenKey::Level));
        keys.extend(Stat::ALL.map(TokenKey::BreedingValue));
        keys.extend(Stat::ALL.map(TokenKey::IsTop));
        keys.extend(Stat::ALL.map(TokenKey::IsNewTop));
        keys.extend(Stat::ALL.map(TokenKey::IsLowest));
        keys.extend(Stat::ALL.map(TokenKey::IsNewLowest));
        keys.extend([
            TokenKey::Domestication,
            TokenKey::EffImp,
            TokenKey::EffImpShort,
            TokenKey::Index,
            TokenKey::OldName,
            TokenKey::SexLang,
            TokenKey::SexLangShort,
            TokenKey::SexLangGen,
            TokenKey::SexLangShortGen,
            TokenKey::TopPercent,
            TokenKey::BaseLevel,
            TokenKey::Mutations,
            TokenKey::Generation,
            TokenKey::GenerationLetters,
            TokenKey::GenerationCount,
            TokenKey::NrInGeneration,
            TokenKey::NrInGenerationSex,
            TokenKey::Random,
            TokenKey::TotalCount,
            TokenKey::SexCount,
            TokenKey::ArkId,
            TokenKey::AlreadyExists,
        ]);
        keys.extend((1..=MAX_HIGHEST_RANK).map(TokenKey::HighestLevel));
        keys.extend((1..=MAX_HIGHEST_RANK).map(TokenKey::HighestStat));
        keys
    }
}

fn ordinal(rank: u8) -> &'static str {
    match rank {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        5 => "fifth",
        _ => "sixth",
    }
}
