//! Abstract Syntax Tree types for naming patterns

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Token or function name as written in the pattern
///
/// Names are matched case-insensitively; the original spelling is kept for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for registry lookups
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a parsed naming pattern
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pattern {
    pub nodes: Vec<Spanned<Node>>,
}

/// A single element of a pattern or of a function argument
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Text copied to the output unchanged
    Literal(String),
    /// Token reference: `{name}`
    Token(Identifier),
    /// Function call: `{{#name: arg | arg }}`
    Call(Call),
}

/// Function call with unevaluated arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Spanned<Identifier>,
    pub args: Vec<Arg>,
}

/// One `|`-separated argument; evaluated only when a function asks for it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arg {
    pub nodes: Vec<Spanned<Node>>,
}

impl Pattern {
    pub fn new(nodes: Vec<Spanned<Node>>) -> Self {
        Self {
            nodes: merge_literals(nodes),
        }
    }

    /// A pattern consisting of a single literal
    pub fn literal(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            nodes: vec![Spanned::new(Node::Literal(text.to_string()), 0..text.len())],
        }
    }

    /// True if no token or function appears anywhere in the pattern
    pub fn is_plain_text(&self) -> bool {
        self.nodes
            .iter()
            .all(|n| matches!(n.node, Node::Literal(_)))
    }

    /// True if a token with this name (case-insensitive) appears anywhere,
    /// including inside function arguments
    pub fn references_token(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        nodes_reference_token(&self.nodes, &name)
    }

    /// Visit every node depth-first, arguments included
    pub fn walk<'p>(&'p self, visit: &mut impl FnMut(&'p Spanned<Node>)) {
        walk_nodes(&self.nodes, visit);
    }
}

impl Arg {
    /// Build an argument, merging literals and trimming whitespace at its edges
    pub fn new(nodes: Vec<Spanned<Node>>) -> Self {
        let mut nodes = merge_literals(nodes);

        if let Some(Spanned {
            node: Node::Literal(text),
            ..
        }) = nodes.first_mut()
        {
            *text = text.trim_start().to_string();
        }
        if let Some(Spanned {
            node: Node::Literal(text),
            ..
        }) = nodes.last_mut()
        {
            *text = text.trim_end().to_string();
        }
        nodes.retain(|n| !matches!(&n.node, Node::Literal(t) if t.is_empty()));

        Self { nodes }
    }

    /// The argument's text if it contains no tokens or calls
    pub fn as_literal(&self) -> Option<&str> {
        match self.nodes.as_slice() {
            [] => Some(""),
            [Spanned {
                node: Node::Literal(text),
                ..
            }] => Some(text.as_str()),
            _ => None,
        }
    }
}

fn nodes_reference_token(nodes: &[Spanned<Node>], name: &str) -> bool {
    nodes.iter().any(|n| match &n.node {
        Node::Literal(_) => false,
        Node::Token(id) => id.normalized() == name,
        Node::Call(call) => call
            .args
            .iter()
            .any(|arg| nodes_reference_token(&arg.nodes, name)),
    })
}

fn walk_nodes<'p>(nodes: &'p [Spanned<Node>], visit: &mut impl FnMut(&'p Spanned<Node>)) {
    for node in nodes {
        visit(node);
        if let Node::Call(call) = &node.node {
            for arg in &call.args {
                walk_nodes(&arg.nodes, visit);
            }
        }
    }
}

/// Join runs of adjacent literals into one node spanning all of them
fn merge_literals(nodes: Vec<Spanned<Node>>) -> Vec<Spanned<Node>> {
    let mut merged: Vec<Spanned<Node>> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (
            Some(Spanned {
                node: Node::Literal(prev),
                span: prev_span,
            }),
            Node::Literal(text),
        ) = (merged.last_mut(), &node.node)
        {
            prev.push_str(text);
            prev_span.end = node.span.end;
            continue;
        }
        merged.push(node);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(text: &str, span: Span) -> Spanned<Node> {
        Spanned::new(Node::Literal(text.to_string()), span)
    }

    #[test]
    fn test_merge_adjacent_literals() {
        let pattern = Pattern::new(vec![lit("{", 0..1), lit("abc", 1..4)]);
        assert_eq!(pattern.nodes, vec![lit("{abc", 0..4)]);
    }

    #[test]
    fn test_arg_trims_edges_only() {
        let arg = Arg::new(vec![lit("  a  b ", 0..7)]);
        assert_eq!(arg.as_literal(), Some("a  b"));
    }

    #[test]
    fn test_arg_drops_whitespace_only_literal() {
        let arg = Arg::new(vec![
            lit(" ", 0..1),
            Spanned::new(Node::Token(Identifier::new("hp")), 1..5),
            lit(" ", 5..6),
        ]);
        assert_eq!(arg.nodes.len(), 1);
        assert!(arg.as_literal().is_none());
    }

    #[test]
    fn test_identifier_normalized() {
        assert_eq!(Identifier::new("isTopHP").normalized(), "istophp");
    }
}
