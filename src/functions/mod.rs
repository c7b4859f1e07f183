//! Function registry: the names usable as `{{#name: ...}}` in a pattern
//!
//! Every function receives its arguments unevaluated through [`CallArgs`] and
//! evaluates only the ones it needs, so `if` and `ifexpr` never render the
//! branch they do not take.

mod arithmetic;
mod conditional;
mod format;
mod lookup;
pub mod numfmt;
mod text;

use thiserror::Error;

use crate::eval::NamingContext;
use crate::parser::Arg;

/// Errors raised while a function runs
///
/// They never abort rendering; the call renders as `#<function>: <message>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    /// A required argument was not given (1-based position)
    #[error("missing argument {0}")]
    MissingArgument(usize),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid expression '{0}'")]
    InvalidExpression(String),

    #[error("unknown casing '{0}'")]
    UnknownCasing(String),

    #[error("invalid format '{0}'")]
    InvalidFormat(String),

    #[error("format '{0}' requires an integer")]
    IntegerRequired(String),

    #[error("width {0} exceeds {max}", max = MAX_PAD_WIDTH)]
    WidthTooLarge(i64),
}

/// Widest result `padleft` and `padright` will produce
pub const MAX_PAD_WIDTH: usize = 1024;

/// Signature shared by all function implementations
pub type Handler = fn(&CallArgs<'_, '_>) -> Result<String, FunctionError>;

/// A known function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    If,
    IfExpr,
    Expr,
    Len,
    Substring,
    Replace,
    CustomReplace,
    FloatDiv,
    Div,
    PadLeft,
    PadRight,
    Casing,
    Time,
    Format,
    FormatInt,
    IndexOf,
    Color,
}

impl Function {
    pub const ALL: [Function; 17] = [
        Function::If,
        Function::IfExpr,
        Function::Expr,
        Function::Len,
        Function::Substring,
        Function::Replace,
        Function::CustomReplace,
        Function::FloatDiv,
        Function::Div,
        Function::PadLeft,
        Function::PadRight,
        Function::Casing,
        Function::Time,
        Function::Format,
        Function::FormatInt,
        Function::IndexOf,
        Function::Color,
    ];

    /// Look up a function by name, ignoring case
    pub fn lookup(name: &str) -> Option<Function> {
        Function::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::If => "if",
            Function::IfExpr => "ifexpr",
            Function::Expr => "expr",
            Function::Len => "len",
            Function::Substring => "substring",
            Function::Replace => "replace",
            Function::CustomReplace => "customreplace",
            Function::FloatDiv => "float_div",
            Function::Div => "div",
            Function::PadLeft => "padleft",
            Function::PadRight => "padright",
            Function::Casing => "casing",
            Function::Time => "time",
            Function::Format => "format",
            Function::FormatInt => "format_int",
            Function::IndexOf => "indexof",
            Function::Color => "color",
        }
    }

    /// Call shape as written in a pattern
    pub fn usage(self) -> &'static str {
        match self {
            Function::If => "{{#if: text | if not empty | if empty }}",
            Function::IfExpr => "{{#ifexpr: a op b | if true | if false }}",
            Function::Expr => "{{#expr: a op b }}",
            Function::Len => "{{#len: text }}",
            Function::Substring => "{{#substring: text | start | length }}",
            Function::Replace => "{{#replace: text | find | replace by }}",
            Function::CustomReplace => "{{#customreplace: key | default }}",
            Function::FloatDiv => "{{#float_div: number | divisor | format }}",
            Function::Div => "{{#div: number | divisor }}",
            Function::PadLeft => "{{#padleft: text | length | padding character }}",
            Function::PadRight => "{{#padright: text | length | padding character }}",
            Function::Casing => "{{#casing: text | U, L or T }}",
            Function::Time => "{{#time: format }}",
            Function::Format => "{{#format: number | format }}",
            Function::FormatInt => "{{#format_int: number | format }}",
            Function::IndexOf => "{{#indexof: text | find }}",
            Function::Color => "{{#color: region | return name | include unused regions }}",
        }
    }

    pub fn handler(self) -> Handler {
        match self {
            Function::If => conditional::if_,
            Function::IfExpr => conditional::ifexpr,
            Function::Expr => arithmetic::expr,
            Function::Len => text::len,
            Function::Substring => text::substring,
            Function::Replace => text::replace,
            Function::CustomReplace => lookup::customreplace,
            Function::FloatDiv => arithmetic::float_div,
            Function::Div => arithmetic::div,
            Function::PadLeft => text::padleft,
            Function::PadRight => text::padright,
            Function::Casing => text::casing,
            Function::Time => format::time,
            Function::Format => format::format,
            Function::FormatInt => format::format_int,
            Function::IndexOf => text::indexof,
            Function::Color => lookup::color,
        }
    }
}

/// Lazily evaluated arguments of one call
pub struct CallArgs<'e, 'a> {
    args: &'e [Arg],
    eval: &'e dyn Fn(&Arg) -> String,
    ctx: &'e NamingContext<'a>,
}

impl<'e, 'a> CallArgs<'e, 'a> {
    pub fn new(
        args: &'e [Arg],
        eval: &'e dyn Fn(&Arg) -> String,
        ctx: &'e NamingContext<'a>,
    ) -> Self {
        Self { args, eval, ctx }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn ctx(&self) -> &NamingContext<'a> {
        self.ctx
    }

    /// Evaluate an argument; a missing one reads as empty
    pub fn eval(&self, index: usize) -> String {
        self.eval_opt(index).unwrap_or_default()
    }

    /// Evaluate an argument if it was given
    pub fn eval_opt(&self, index: usize) -> Option<String> {
        self.args.get(index).map(|arg| (self.eval)(arg))
    }

    /// Evaluate an argument that was given and is not empty
    pub fn eval_non_empty(&self, index: usize) -> Option<String> {
        self.eval_opt(index).filter(|s| !s.trim().is_empty())
    }

    /// Evaluate a required numeric argument
    pub fn number(&self, index: usize) -> Result<f64, FunctionError> {
        let text = self
            .eval_non_empty(index)
            .ok_or(FunctionError::MissingArgument(index + 1))?;
        parse_number(&text)
    }

    /// Evaluate a required integer argument; fractions are truncated
    pub fn integer(&self, index: usize) -> Result<i64, FunctionError> {
        self.number(index).map(|n| n.trunc() as i64)
    }
}

/// Parse a number the way pattern authors write them, surrounding spaces allowed
pub(crate) fn parse_number(text: &str) -> Result<f64, FunctionError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FunctionError::NotANumber(trimmed.to_string()))
}
