//! `format`, `format_int` and `time`

use super::numfmt::{format_float, format_integer};
use super::{parse_number, CallArgs, FunctionError};

const DEFAULT_TIME_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// `{{#format: number | format }}`
pub fn format(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let number = args.number(0)?;
    format_float(number, args.eval(1).trim())
}

/// `{{#format_int: number | format }}`
pub fn format_int(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let text = args
        .eval_non_empty(0)
        .ok_or(FunctionError::MissingArgument(1))?;
    let number = match text.trim().parse::<i64>() {
        Ok(n) => n,
        Err(_) => parse_number(&text)?.round() as i64,
    };
    format_integer(number, args.eval(1).trim())
}

/// `{{#time: format }}` with .NET-style date and time patterns
pub fn time(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let format = args
        .eval_non_empty(0)
        .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string());
    let strftime = to_strftime(format.trim());
    Ok(args.ctx().now.format(&strftime).to_string())
}

/// Translate a .NET date format into chrono's strftime syntax
///
/// Only specifiers chrono understands are emitted; everything else is
/// copied as literal text with `%` escaped.
fn to_strftime(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::with_capacity(format.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                i += 1;
                while i < chars.len() && chars[i] != c {
                    push_literal(&mut out, chars[i]);
                    i += 1;
                }
                i += 1;
                continue;
            }
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    push_literal(&mut out, next);
                }
                i += 2;
                continue;
            }
            _ => {}
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let spec = match (c, run) {
            ('y', 1 | 2) => Some("%y"),
            ('y', _) => Some("%Y"),
            ('M', 1) => Some("%-m"),
            ('M', 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('d', 1) => Some("%-d"),
            ('d', 2) => Some("%d"),
            ('d', 3) => Some("%a"),
            ('d', _) => Some("%A"),
            ('H', 1) => Some("%-H"),
            ('H', _) => Some("%H"),
            ('h', 1) => Some("%-I"),
            ('h', _) => Some("%I"),
            ('m', 1) => Some("%-M"),
            ('m', _) => Some("%M"),
            ('s', 1) => Some("%-S"),
            ('s', _) => Some("%S"),
            ('t', _) => Some("%p"),
            ('f' | 'F', 1..=3) => Some("%3f"),
            ('f' | 'F', 4..=6) => Some("%6f"),
            ('f' | 'F', _) => Some("%9f"),
            ('z' | 'K', _) => Some("%:z"),
            _ => None,
        };
        match spec {
            Some(spec) => {
                out.push_str(spec);
                i += run;
            }
            None => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
