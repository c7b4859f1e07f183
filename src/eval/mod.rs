//! Pattern evaluation: contexts, the evaluator, uniqueness search and batch renaming

mod batch;
mod context;
mod evaluator;
mod unique;

pub use batch::{BatchRenamer, Rename};
pub use context::{NamingContext, RenderMode};
pub use evaluator::{Evaluator, UniqueValue};
pub use unique::{NameOutcome, NamePattern};
