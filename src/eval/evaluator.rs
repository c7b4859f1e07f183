//! Tree-walking evaluator

use std::cell::Cell;

use crate::functions::{CallArgs, Function};
use crate::parser::{Arg, Call, Node, Pattern, Spanned};
use crate::tokens::{resolve, TokenKey};

use super::NamingContext;

/// What `{n}` renders as during one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueValue {
    Number(u32),
    Placeholder,
}

/// Evaluates a pattern against a context with a fixed value for `{n}`
pub struct Evaluator<'c, 'a> {
    ctx: &'c NamingContext<'a>,
    unique: UniqueValue,
    unique_used: Cell<bool>,
}

impl<'c, 'a> Evaluator<'c, 'a> {
    pub fn new(ctx: &'c NamingContext<'a>, unique: UniqueValue) -> Self {
        Self {
            ctx,
            unique,
            unique_used: Cell::new(false),
        }
    }

    /// Whether `{n}` was rendered; references in branches not taken do not count
    pub fn unique_used(&self) -> bool {
        self.unique_used.get()
    }

    pub fn render(&self, pattern: &Pattern) -> String {
        self.render_nodes(&pattern.nodes)
    }

    fn render_nodes(&self, nodes: &[Spanned<Node>]) -> String {
        let mut out = String::new();
        for node in nodes {
            match &node.node {
                Node::Literal(text) => out.push_str(text),
                Node::Token(name) => out.push_str(&self.token(name.as_str())),
                Node::Call(call) => out.push_str(&self.call(call)),
            }
        }
        out
    }

    fn token(&self, name: &str) -> String {
        match TokenKey::parse(name) {
            Some(TokenKey::UniqueNumber) => {
                self.unique_used.set(true);
                match self.unique {
                    UniqueValue::Number(n) => n.to_string(),
                    UniqueValue::Placeholder => self.ctx.config.preview_placeholder.clone(),
                }
            }
            Some(key) => resolve(key, self.ctx),
            None => {
                log::trace!("unknown token {{{}}}", name);
                String::new()
            }
        }
    }

    fn call(&self, call: &Call) -> String {
        let name = call.name.node.as_str();
        let Some(function) = Function::lookup(name) else {
            log::trace!("unknown function #{}", name);
            return String::new();
        };

        let eval = |arg: &Arg| self.render_nodes(&arg.nodes);
        let args = CallArgs::new(&call.args, &eval, self.ctx);
        match (function.handler())(&args) {
            Ok(value) => value,
            Err(err) => format!("#{}: {}", function.name(), err),
        }
    }
}
