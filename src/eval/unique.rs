//! Compiled patterns and the search for a unique `{n}`

use std::collections::HashSet;

use crate::parser::{parse, Pattern};

use super::evaluator::{Evaluator, UniqueValue};
use super::NamingContext;

/// Result of naming one creature
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameOutcome {
    pub name: String,
    /// Value chosen for `{n}`, if the pattern uses it and a search ran
    pub unique_number: Option<u32>,
    /// The search hit its limit without finding a free name
    pub exhausted: bool,
    /// The name equals another creature's name and `{n}` was not rendered
    pub duplicate: bool,
    /// The name is longer than the configured maximum
    pub too_long: bool,
}

/// A parsed naming pattern, reusable across creatures
#[derive(Debug, Clone, PartialEq)]
pub struct NamePattern {
    source: String,
    pattern: Pattern,
}

impl NamePattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let pattern = parse(&source);
        Self { source, pattern }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn uses_unique_number(&self) -> bool {
        self.pattern.references_token("n")
    }

    /// Render once; `{n}` shows `unique` or the preview placeholder
    pub fn render_once(&self, ctx: &NamingContext, unique: Option<u32>) -> String {
        let unique = unique.map_or(UniqueValue::Placeholder, UniqueValue::Number);
        Evaluator::new(ctx, unique).render(&self.pattern)
    }

    /// Generate the name for the context's creature
    ///
    /// With `{n}` in the pattern, candidates 1, 2, ... are rendered until one
    /// differs from every other creature's name, up to the configured limit.
    /// When the first candidate never renders `{n}`, because it only sits in
    /// a branch not taken, no search runs.
    /// The siblings are only read; committing the name is up to the caller.
    pub fn generate(&self, ctx: &NamingContext) -> NameOutcome {
        let taken: HashSet<&str> = ctx
            .others()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .collect();

        let mut outcome = if self.uses_unique_number() {
            self.search(ctx, &taken)
        } else {
            let name = self.render_once(ctx, None);
            NameOutcome {
                duplicate: taken.contains(name.as_str()),
                name,
                ..Default::default()
            }
        };

        let max = ctx.config.max_name_length;
        outcome.too_long = max > 0 && outcome.name.chars().count() > max;
        outcome
    }

    fn search(&self, ctx: &NamingContext, taken: &HashSet<&str>) -> NameOutcome {
        let limit = if ctx.is_preview() {
            let limit = ctx.config.preview_search_limit;
            if limit == 0 {
                return NameOutcome {
                    name: self.render_once(ctx, None),
                    ..Default::default()
                };
            }
            limit
        } else {
            ctx.config.unique_search_limit.max(1)
        };

        let mut candidate = String::new();
        for n in 1..=limit {
            let evaluator = Evaluator::new(ctx, UniqueValue::Number(n));
            candidate = evaluator.render(&self.pattern);
            if !evaluator.unique_used() {
                // `{n}` sits only in branches not taken, so no candidate differs
                return NameOutcome {
                    duplicate: taken.contains(candidate.as_str()),
                    name: candidate,
                    ..Default::default()
                };
            }
            if !taken.contains(candidate.as_str()) {
                log::debug!("unique name {:?} found at n = {}", candidate, n);
                return NameOutcome {
                    name: candidate,
                    unique_number: Some(n),
                    ..Default::default()
                };
            }
        }

        if ctx.is_preview() {
            log::debug!("preview search stopped after {} candidates", limit);
        } else {
            log::warn!(
                "no unique name for creature {} within {} candidates, keeping {:?}",
                ctx.creature.id,
                limit,
                candidate
            );
        }
        NameOutcome {
            name: candidate,
            unique_number: Some(limit),
            exhausted: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use crate::creature::Creature;
    use crate::eval::RenderMode;

    fn named(id: u64, name: &str) -> Creature {
        Creature::new(id, "Rex").with_name(name)
    }

    #[test]
    fn test_first_free_number() {
        let rex = Creature::new(10, "Rex");
        let siblings = vec![named(1, "Rex_1"), named(2, "Rex_3")];
        let ctx = NamingContext::new(&rex, &siblings);
        let outcome = NamePattern::new("Rex_{n}").generate(&ctx);
        assert_eq!(outcome.name, "Rex_2");
        assert_eq!(outcome.unique_number, Some(2));
        assert!(!outcome.exhausted);
    }

    #[test]
    fn test_own_name_does_not_block() {
        let rex = named(1, "Rex_1");
        let siblings = vec![rex.clone()];
        let ctx = NamingContext::new(&rex, &siblings);
        assert_eq!(NamePattern::new("Rex_{n}").generate(&ctx).name, "Rex_1");
    }

    #[test]
    fn test_search_limit_exhausted() {
        let rex = Creature::new(10, "Rex");
        let siblings = vec![named(1, "Rex"), named(2, "Rex_2")];
        let config = NamingConfig::default().with_unique_search_limit(3);
        let ctx = NamingContext::new(&rex, &siblings).with_config(&config);
        // {n} is only shown from 2 on, and 3 is the last candidate
        let pattern = NamePattern::new("Rex{{#ifexpr: {n} > 1 | _{n} }}");
        let outcome = pattern.generate(&ctx);
        assert_eq!(outcome.name, "Rex_3");
        assert!(!outcome.exhausted);

        let config = NamingConfig::default().with_unique_search_limit(2);
        let ctx = NamingContext::new(&rex, &siblings).with_config(&config);
        let outcome = pattern.generate(&ctx);
        assert_eq!(outcome.name, "Rex_2");
        assert_eq!(outcome.unique_number, Some(2));
        assert!(outcome.exhausted);
    }

    #[test]
    fn test_preview_without_search_uses_placeholder() {
        let rex = Creature::new(10, "Rex");
        let config = NamingConfig::default().with_preview_search_limit(0);
        let ctx = NamingContext::new(&rex, &[])
            .with_config(&config)
            .with_mode(RenderMode::Preview);
        let outcome = NamePattern::new("Rex_{n}").generate(&ctx);
        assert_eq!(outcome.name, "Rex_#");
        assert_eq!(outcome.unique_number, None);
    }

    #[test]
    fn test_duplicate_reported_without_n() {
        let rex = Creature::new(10, "Rex");
        let siblings = vec![named(1, "Rex")];
        let ctx = NamingContext::new(&rex, &siblings);
        let outcome = NamePattern::new("{species}").generate(&ctx);
        assert_eq!(outcome.name, "Rex");
        assert!(outcome.duplicate);
    }

    #[test]
    fn test_n_in_untaken_branch_skips_search() {
        let rex = Creature::new(10, "Rex");
        let siblings = vec![named(1, "Rex")];
        let ctx = NamingContext::new(&rex, &siblings);
        let outcome = NamePattern::new("Rex{{#if: | _{n} }}").generate(&ctx);
        assert_eq!(outcome.name, "Rex");
        assert_eq!(outcome.unique_number, None);
        assert!(!outcome.exhausted);
        assert!(outcome.duplicate);
    }

    #[test]
    fn test_too_long() {
        let rex = Creature::new(10, "Rex");
        let ctx = NamingContext::new(&rex, &[]);
        let outcome = NamePattern::new("A very long creature name indeed").generate(&ctx);
        assert!(outcome.too_long);
    }
}
