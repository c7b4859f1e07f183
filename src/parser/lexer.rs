//! Lexer for naming patterns using logos
//!
//! Every character of the input belongs to exactly one token, so lexing never
//! drops text. Structure (`{`, `}`, `|`, `:`, `#`) is emitted as single-character
//! tokens; the grammar decides whether they form a construct or fall back to
//! literal text.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,
    #[token("#")]
    Hash,

    /// `\{`, `\}`, `\|`, `\:`, `\#` or `\\`
    #[regex(r"\\[{}|:#\\]", |lex| lex.slice().chars().nth(1))]
    Escaped(char),

    /// A backslash that does not escape a structural character
    #[token("\\")]
    Backslash,

    #[regex(r"[^{}|:#\\]+", |lex| lex.slice().to_string())]
    Text(String),
}

impl Token {
    /// The text this token contributes when it is read as a literal
    pub fn literal_text(&self) -> String {
        match self {
            Token::BraceOpen => "{".to_string(),
            Token::BraceClose => "}".to_string(),
            Token::Pipe => "|".to_string(),
            Token::Colon => ":".to_string(),
            Token::Hash => "#".to_string(),
            Token::Escaped(c) => c.to_string(),
            Token::Backslash => "\\".to_string(),
            Token::Text(s) => s.clone(),
        }
    }
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_token_ref() {
        assert_eq!(
            tokens("{species}"),
            vec![
                Token::BraceOpen,
                Token::Text("species".to_string()),
                Token::BraceClose
            ]
        );
    }

    #[test]
    fn test_function_call_tokens() {
        assert_eq!(
            tokens("{{#len: abc}}"),
            vec![
                Token::BraceOpen,
                Token::BraceOpen,
                Token::Hash,
                Token::Text("len".to_string()),
                Token::Colon,
                Token::Text(" abc".to_string()),
                Token::BraceClose,
                Token::BraceClose,
            ]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            tokens(r"a\|b\\"),
            vec![
                Token::Text("a".to_string()),
                Token::Escaped('|'),
                Token::Text("b".to_string()),
                Token::Escaped('\\'),
            ]
        );
    }

    #[test]
    fn test_lone_backslash_is_kept() {
        assert_eq!(
            tokens(r"C:\x"),
            vec![
                Token::Text("C".to_string()),
                Token::Colon,
                Token::Backslash,
                Token::Text("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans_cover_input() {
        let input = "Rex {n} | {{#if: a }}";
        let covered: usize = lex(input).map(|(_, span)| span.len()).sum();
        assert_eq!(covered, input.len());
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(
            tokens("Ælfrïc–ü"),
            vec![Token::Text("Ælfrïc–ü".to_string())]
        );
    }
}
