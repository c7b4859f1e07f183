//! Parser implementation using chumsky
//!
//! The grammar is total: every token stream parses. Anything that does not form
//! a complete token reference or function call is kept as literal text, so a
//! half-typed pattern still renders.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::{lex, Span, Token};

/// Check that a name has identifier shape: `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Calls nested deeper than this are read as literal text
pub const MAX_CALL_DEPTH: usize = 64;

/// Parse a naming pattern into an AST
///
/// Never fails; malformed fragments become literals.
pub fn parse(input: &str) -> Pattern {
    let len = input.len();

    let mut tokens: Vec<(Token, Span)> = lex(input).collect();
    demote_unclosable_calls(&mut tokens);
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    match pattern_parser().parse(token_stream).into_output() {
        Some(pattern) => pattern,
        None => {
            log::debug!("pattern fell back to plain text: {:?}", input);
            Pattern::literal(input)
        }
    }
}

/// Turn the `{` opening a call into a literal when the call can never close
/// or sits deeper than [`MAX_CALL_DEPTH`]
///
/// Openings are paired with `}}` by the same rules the grammar uses, so the
/// grammar only ever tries calls that succeed. Without this, every unclosed
/// opening inside an argument is retried from each later position.
fn demote_unclosable_calls(tokens: &mut [(Token, Span)]) {
    let mut open: Vec<usize> = Vec::new();
    let mut demoted: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let rest = &tokens[i..];
        if is_call_head(rest) {
            if open.len() < MAX_CALL_DEPTH {
                open.push(i);
            } else {
                demoted.push(i);
            }
            i += 5;
        } else if is_token_ref(rest) {
            i += 3;
        } else if is_call_close(rest) && open.pop().is_some() {
            i += 2;
        } else {
            i += 1;
        }
    }

    demoted.extend(open);
    if !demoted.is_empty() {
        log::debug!("{} call openings read as literal text", demoted.len());
    }
    for index in demoted {
        tokens[index].0 = Token::Escaped('{');
    }
}

/// `{{#name:`
fn is_call_head(tokens: &[(Token, Span)]) -> bool {
    matches!(
        tokens,
        [(Token::BraceOpen, _), (Token::BraceOpen, _), (Token::Hash, _), (Token::Text(name), _), (Token::Colon, _), ..]
            if is_identifier(name.trim())
    )
}

/// `{name}`
fn is_token_ref(tokens: &[(Token, Span)]) -> bool {
    matches!(
        tokens,
        [(Token::BraceOpen, _), (Token::Text(name), _), (Token::BraceClose, _), ..]
            if is_identifier(name)
    )
}

fn is_call_close(tokens: &[(Token, Span)]) -> bool {
    matches!(tokens, [(Token::BraceClose, _), (Token::BraceClose, _), ..])
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn pattern_parser<'a, I>() -> impl Parser<'a, I, Pattern, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // `{name}` - the body must be a bare identifier, `{ a b }` stays literal
    let token_ref = just(Token::BraceOpen)
        .ignore_then(select! {
            Token::Text(s) if is_identifier(&s) => Identifier::new(s),
        })
        .then_ignore(just(Token::BraceClose))
        .map_with(|id, e| Spanned::new(Node::Token(id), span_range(&e.span())));

    // `}}` is two brace tokens so that `{isTophp}}}` closes the token first
    let call_close = just(Token::BraceClose).then(just(Token::BraceClose));

    let call = recursive(|call| {
        // Inside an argument, `|` splits and `}}` closes; everything else that
        // is not a construct is literal text (including `:` and a lone `}`)
        let arg_literal = choice((
            any().filter(|t: &Token| !matches!(t, Token::Pipe | Token::BraceClose)),
            just(Token::BraceClose).then_ignore(just(Token::BraceClose).not()),
        ))
        .map_with(|t: Token, e| {
            Spanned::new(Node::Literal(t.literal_text()), span_range(&e.span()))
        });

        let arg = choice((call, token_ref.clone(), arg_literal))
            .repeated()
            .collect::<Vec<_>>()
            .map(Arg::new);

        let name = select! {
            Token::Text(s) if is_identifier(s.trim()) => s.trim().to_string(),
        }
        .map_with(|name, e| Spanned::new(Identifier::new(name), span_range(&e.span())));

        just(Token::BraceOpen)
            .then(just(Token::BraceOpen))
            .then(just(Token::Hash))
            .ignore_then(name)
            .then_ignore(just(Token::Colon))
            .then(arg.separated_by(just(Token::Pipe)).collect::<Vec<_>>())
            .then_ignore(call_close)
            .map_with(|(name, args), e| {
                Spanned::new(Node::Call(Call { name, args }), span_range(&e.span()))
            })
            .boxed()
    });

    // At the top level every leftover token is literal text
    let top_literal = any().map_with(|t: Token, e| {
        Spanned::new(Node::Literal(t.literal_text()), span_range(&e.span()))
    });

    choice((call, token_ref, top_literal))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(Pattern::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn literal(node: &Spanned<Node>) -> &str {
        match &node.node {
            Node::Literal(text) => text,
            other => panic!("Expected literal, got {:?}", other),
        }
    }

    fn call(node: &Spanned<Node>) -> &Call {
        match &node.node {
            Node::Call(c) => c,
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_plain_text() {
        let pattern = parse("Just a name");
        assert_eq!(pattern.nodes.len(), 1);
        assert_eq!(literal(&pattern.nodes[0]), "Just a name");
        assert!(pattern.is_plain_text());
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").nodes.is_empty());
    }

    #[test]
    fn test_parse_token_ref() {
        let pattern = parse("{species} {hp}");
        assert_eq!(pattern.nodes.len(), 3);
        match &pattern.nodes[0].node {
            Node::Token(id) => assert_eq!(id.as_str(), "species"),
            other => panic!("Expected token, got {:?}", other),
        }
        assert_eq!(pattern.nodes[0].span, 0..9);
        assert_eq!(literal(&pattern.nodes[1]), " ");
    }

    #[test]
    fn test_token_ref_with_spaces_is_literal() {
        let pattern = parse("{ hp }");
        assert!(pattern.is_plain_text());
        assert_eq!(literal(&pattern.nodes[0]), "{ hp }");
    }

    #[test]
    fn test_parse_function_call() {
        let pattern = parse("{{#substring: {species} | 0 | 4 }}");
        assert_eq!(pattern.nodes.len(), 1);
        let c = call(&pattern.nodes[0]);
        assert_eq!(c.name.node.as_str(), "substring");
        assert_eq!(c.args.len(), 3);
        assert!(matches!(c.args[0].nodes[0].node, Node::Token(_)));
        assert_eq!(c.args[1].as_literal(), Some("0"));
        assert_eq!(c.args[2].as_literal(), Some("4"));
    }

    #[test]
    fn test_nested_call_pipes_do_not_split_outer() {
        let pattern = parse("{{#if: {{#replace: a | b | c}} | yes | no}}");
        let outer = call(&pattern.nodes[0]);
        assert_eq!(outer.args.len(), 3);
        let inner = call(&outer.args[0].nodes[0]);
        assert_eq!(inner.name.node.as_str(), "replace");
        assert_eq!(inner.args.len(), 3);
        assert_eq!(outer.args[1].as_literal(), Some("yes"));
    }

    #[test]
    fn test_token_ref_closing_before_call_close() {
        let pattern = parse("{{#if: {isTophp}}}");
        assert_eq!(pattern.nodes.len(), 1);
        let c = call(&pattern.nodes[0]);
        assert_eq!(c.args.len(), 1);
        assert!(matches!(&c.args[0].nodes[0].node, Node::Token(id) if id.as_str() == "isTophp"));
    }

    #[test]
    fn test_colon_inside_argument_is_literal() {
        let pattern = parse("{{#time: yyyy-MM-dd_HH:mm }}");
        let c = call(&pattern.nodes[0]);
        assert_eq!(c.args[0].as_literal(), Some("yyyy-MM-dd_HH:mm"));
    }

    #[test]
    fn test_empty_argument_list() {
        let c = parse("{{#len:}}");
        let c = call(&c.nodes[0]);
        assert_eq!(c.args.len(), 1);
        assert_eq!(c.args[0].as_literal(), Some(""));
    }

    #[test]
    fn test_unterminated_call_is_literal() {
        let input = "{{#substring: {species";
        let pattern = parse(input);
        assert!(pattern.is_plain_text());
        assert_eq!(literal(&pattern.nodes[0]), input);
    }

    #[test]
    fn test_unterminated_call_keeps_following_constructs() {
        let pattern = parse("{{#if: x {species}");
        assert_eq!(pattern.nodes.len(), 2);
        assert_eq!(literal(&pattern.nodes[0]), "{{#if: x ");
        assert!(matches!(&pattern.nodes[1].node, Node::Token(id) if id.as_str() == "species"));
    }

    #[test]
    fn test_unknown_names_are_accepted() {
        let pattern = parse("{nope}{{#frobnicate: a}}");
        assert_eq!(pattern.nodes.len(), 2);
        assert!(matches!(pattern.nodes[0].node, Node::Token(_)));
        assert!(matches!(pattern.nodes[1].node, Node::Call(_)));
    }

    #[test]
    fn test_escaped_pipe_does_not_split() {
        let pattern = parse(r"{{#replace: a\|b | \| | -}}");
        let c = call(&pattern.nodes[0]);
        assert_eq!(c.args.len(), 3);
        assert_eq!(c.args[0].as_literal(), Some("a|b"));
        assert_eq!(c.args[1].as_literal(), Some("|"));
    }

    #[test]
    fn test_escaped_braces_are_literal() {
        let pattern = parse(r"\{species\}");
        assert!(pattern.is_plain_text());
        assert_eq!(literal(&pattern.nodes[0]), "{species}");
    }

    #[test]
    fn test_top_level_pipes_and_closers_are_literal() {
        let pattern = parse("a | b }} : #");
        assert!(pattern.is_plain_text());
        assert_eq!(literal(&pattern.nodes[0]), "a | b }} : #");
    }

    #[test]
    fn test_whitespace_inside_argument_preserved() {
        let pattern = parse("{{#len:  a  b  }}");
        let c = call(&pattern.nodes[0]);
        assert_eq!(c.args[0].as_literal(), Some("a  b"));
    }

    #[test]
    fn test_call_name_with_whitespace() {
        let pattern = parse("{{# len : abc}}");
        let c = call(&pattern.nodes[0]);
        assert_eq!(c.name.node.as_str(), "len");
    }

    #[test]
    fn test_many_unclosed_calls_parse_as_text() {
        let input = "{{#if: a ".repeat(40);
        let pattern = parse(&input);
        assert!(pattern.is_plain_text());
        assert_eq!(literal(&pattern.nodes[0]), input);
    }

    #[test]
    fn test_unclosed_call_around_closed_call() {
        let pattern = parse("{{#if: {{#len: abc}} | x");
        assert_eq!(literal(&pattern.nodes[0]), "{{#if: ");
        assert_eq!(call(&pattern.nodes[1]).name.node.as_str(), "len");
        assert_eq!(literal(&pattern.nodes[2]), " | x");
    }

    #[test]
    fn test_malformed_inner_head_does_not_steal_close() {
        // `{{#x` has no colon, so the `}}` belongs to the outer call
        let pattern = parse("{{#if: {{#x }}");
        let c = call(&pattern.nodes[0]);
        assert_eq!(c.args[0].as_literal(), Some("{{#x"));
    }

    #[test]
    fn test_deep_nesting_falls_back_to_literal() {
        let depth = 3000;
        let input = format!("{}x{}", "{{#len: ".repeat(depth), "}}".repeat(depth));
        let pattern = parse(&input);

        let mut calls = 0;
        pattern.walk(&mut |node| {
            if matches!(node.node, Node::Call(_)) {
                calls += 1;
            }
        });
        assert_eq!(calls, MAX_CALL_DEPTH);
    }

    #[test]
    fn test_references_token_inside_arguments() {
        let pattern = parse("{{#ifexpr: {n} > 1 | _{N} }}");
        assert!(pattern.references_token("n"));
        assert!(!pattern.references_token("hp"));
    }
}
