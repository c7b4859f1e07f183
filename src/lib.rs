//! Name Patterns - a templating engine for naming bred creatures
//!
//! A pattern mixes literal text with token references (`{species}`, `{hp}`,
//! `{n}`) and function calls (`{{#substring: {species} | 0 | 4}}`). Patterns
//! are evaluated against one creature and the other creatures of its
//! species, so tokens can compare stats across the collection and `{n}`
//! can pick a number that keeps the name unique.
//!
//! # Example
//!
//! ```rust
//! use name_patterns::{generate_name, Creature, NamingContext};
//!
//! let siblings = vec![Creature::new(1, "Rex").with_name("Rex_1")];
//! let rex = Creature::new(2, "Rex").with_levels(vec![35, 20]);
//! let ctx = NamingContext::new(&rex, &siblings);
//!
//! let outcome = generate_name("{species}_{n}", &ctx);
//! assert_eq!(outcome.name, "Rex_2");
//! ```

pub mod collection;
pub mod config;
pub mod creature;
pub mod error;
pub mod eval;
pub mod functions;
pub mod lint;
pub mod parser;
pub mod replacements;
pub mod species;
pub mod stats;
pub mod tokens;

pub use collection::{Collection, CollectionError};
pub use config::{ConfigError, NamingConfig};
pub use creature::{Creature, CreatureId, CreatureStatus, Domestication, Sex};
pub use error::{PatternWarning, WarningKind};
pub use eval::{BatchRenamer, NameOutcome, NamePattern, NamingContext, Rename, RenderMode};
pub use functions::{Function, FunctionError};
pub use parser::{parse, Pattern};
pub use replacements::{CustomReplacements, ReplacementsError};
pub use species::{ColorTable, Species};
pub use stats::Stat;
pub use tokens::{token_dictionary, TokenEntry, TokenKey};

/// Parse `pattern` and generate a name for the context's creature
///
/// Parse a [`NamePattern`] once instead when naming many creatures.
pub fn generate_name(pattern: &str, ctx: &NamingContext) -> NameOutcome {
    NamePattern::new(pattern).generate(ctx)
}

/// Render `pattern` once without a uniqueness search
///
/// `{n}` renders as the configured preview placeholder.
pub fn render(pattern: &str, ctx: &NamingContext) -> String {
    NamePattern::new(pattern).render_once(ctx, None)
}
