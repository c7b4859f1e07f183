//! Lint pass for naming patterns
//!
//! Parsing accepts any name, so a typo such as `{spcies}` silently renders as
//! nothing. This pass checks names against the token catalog and function
//! registry and finds `{{#` openings that never closed.

use crate::error::{PatternWarning, WarningKind};
use crate::functions::Function;
use crate::parser::{parse, Node, Span};
use crate::tokens::TokenKey;

/// Run all checks on a pattern source, in source order
pub fn check(source: &str) -> Vec<PatternWarning> {
    let pattern = parse(source);
    let mut warnings = Vec::new();

    pattern.walk(&mut |node| match &node.node {
        Node::Token(id) => {
            if TokenKey::parse(id.as_str()).is_none() {
                warnings.push(PatternWarning::new(
                    WarningKind::UnknownToken,
                    node.span.clone(),
                    format!("unknown token '{}'", id),
                ));
            }
        }
        Node::Call(call) => {
            if Function::lookup(call.name.node.as_str()).is_none() {
                warnings.push(PatternWarning::new(
                    WarningKind::UnknownFunction,
                    call.name.span.clone(),
                    format!("unknown function '{}'", call.name.node),
                ));
            }
        }
        Node::Literal(_) => {
            for start in call_openings(source, &node.span) {
                warnings.push(PatternWarning::new(
                    WarningKind::UnterminatedCall,
                    start..node.span.end,
                    "function call is never closed with '}}'",
                ));
            }
        }
    });

    warnings.sort_by_key(|w| w.span.start);
    log::debug!("lint found {} warnings", warnings.len());
    warnings
}

/// Byte offsets of unescaped `{{#` inside a literal's source text
fn call_openings(source: &str, span: &Span) -> Vec<usize> {
    let Some(text) = source.get(span.clone()) else {
        return Vec::new();
    };
    text.match_indices("{{#")
        .map(|(offset, _)| offset)
        .filter(|&offset| !is_escaped(text, offset))
        .map(|offset| span.start + offset)
        .collect()
}

/// True if the byte at `offset` follows an odd run of backslashes
fn is_escaped(text: &str, offset: usize) -> bool {
    let backslashes = text[..offset]
        .bytes()
        .rev()
        .take_while(|&b| b == b'\\')
        .count();
    backslashes % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<WarningKind> {
        check(source).into_iter().map(|w| w.kind).collect()
    }

    #[test]
    fn test_clean_pattern() {
        assert!(check("{species}_{{#substring: {owner} | 0 | 3}}_{n}").is_empty());
    }

    #[test]
    fn test_unknown_token() {
        let warnings = check("{spcies}_{n}");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnknownToken);
        assert_eq!(warnings[0].span, 0..8);
    }

    #[test]
    fn test_stat_tokens_are_known() {
        assert!(check("{HP}{dm_vb}{isNewTopSt}{highest3s}").is_empty());
        assert_eq!(kinds("{highest7l}"), vec![WarningKind::UnknownToken]);
    }

    #[test]
    fn test_unknown_function_points_at_name() {
        let warnings = check("{{#frob: a}}");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnknownFunction);
        assert_eq!(warnings[0].span, 3..7);
    }

    #[test]
    fn test_unknown_names_inside_arguments() {
        assert_eq!(
            kinds("{{#if: {nope} | {{#frob: x}} }}"),
            vec![WarningKind::UnknownToken, WarningKind::UnknownFunction]
        );
    }

    #[test]
    fn test_unterminated_call() {
        let warnings = check("{{#substring: {species}");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnterminatedCall);
        assert_eq!(warnings[0].span.start, 0);
    }

    #[test]
    fn test_escaped_opening_is_not_a_call() {
        assert!(check(r"\{{#x").is_empty());
        assert_eq!(kinds(r"\\{{#x"), vec![WarningKind::UnterminatedCall]);
    }
}
