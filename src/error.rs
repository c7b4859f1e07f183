//! Diagnostics for naming patterns
//!
//! Rendering never fails, so these are warnings: they point at the parts of a
//! pattern that will render as empty or literal text.

use std::fmt;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::parser::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    UnknownToken,
    UnknownFunction,
    UnterminatedCall,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnknownToken => write!(f, "unknown-token"),
            WarningKind::UnknownFunction => write!(f, "unknown-function"),
            WarningKind::UnterminatedCall => write!(f, "unterminated-call"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternWarning {
    pub kind: WarningKind,
    pub span: Span,
    pub message: String,
}

impl PatternWarning {
    pub fn new(kind: WarningKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// What the warned-about text renders as
    fn effect(&self) -> &'static str {
        match self.kind {
            WarningKind::UnknownToken | WarningKind::UnknownFunction => "renders as empty text",
            WarningKind::UnterminatedCall => "rendered as literal text",
        }
    }

    /// Format the warning with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        self.write_report(source, filename, true)
    }

    /// Same as [`format`](Self::format) without ANSI colors
    pub fn format_plain(&self, source: &str, filename: &str) -> String {
        self.write_report(source, filename, false)
    }

    fn write_report(&self, source: &str, filename: &str, color: bool) -> String {
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Warning, filename, self.span.start)
            .with_config(Config::default().with_color(color))
            .with_message(&self.message)
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message(self.effect())
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        if let Err(err) = written {
            log::debug!("could not render report: {}", err);
            return self.to_string();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for PatternWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.kind, self.span.start, self.span.end, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let warning = PatternWarning::new(WarningKind::UnknownToken, 0..6, "unknown token 'nope'");
        assert_eq!(warning.to_string(), "unknown-token at 0..6: unknown token 'nope'");
    }

    #[test]
    fn test_plain_report_mentions_message_and_effect() {
        let source = "{nope}_{species}";
        let warning = PatternWarning::new(WarningKind::UnknownToken, 0..6, "unknown token 'nope'");
        let report = warning.format_plain(source, "pattern");
        assert!(report.contains("unknown token 'nope'"));
        assert!(report.contains("renders as empty text"));
        assert!(report.contains("{nope}_{species}"));
        assert!(!report.contains('\u{1b}'));
    }
}
