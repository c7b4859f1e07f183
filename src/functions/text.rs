//! String functions; positions and lengths count characters, not bytes

use super::{parse_number, CallArgs, FunctionError, MAX_PAD_WIDTH};

pub fn len(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    Ok(args.eval(0).chars().count().to_string())
}

/// `{{#substring: text | start | length }}`
///
/// A negative start counts from the end; out-of-range values are clamped.
pub fn substring(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let text: Vec<char> = args.eval(0).chars().collect();
    let start = args.integer(1)?;
    let length = match args.eval_non_empty(2) {
        Some(length) => Some(parse_number(&length)?.trunc() as i64),
        None => None,
    };
    Ok(char_slice(&text, start, length))
}

fn char_slice(text: &[char], start: i64, length: Option<i64>) -> String {
    let total = text.len() as i64;
    let start = if start < 0 {
        (total + start).max(0)
    } else {
        start.min(total)
    };
    let available = total - start;
    let length = length.map_or(available, |l| l.clamp(0, available));
    text[start as usize..(start + length) as usize].iter().collect()
}

/// `{{#replace: text | find | replace by }}`
pub fn replace(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let text = args.eval(0);
    let find = args.eval(1);
    if find.is_empty() {
        return Ok(text);
    }
    Ok(text.replace(&find, &args.eval(2)))
}

/// `{{#indexof: text | find }}`, empty when not found
pub fn indexof(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let text = args.eval(0);
    let needle = args.eval(1);
    Ok(text
        .find(&needle)
        .map(|byte| text[..byte].chars().count().to_string())
        .unwrap_or_default())
}

pub fn padleft(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    pad(args, Side::Left)
}

pub fn padright(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    pad(args, Side::Right)
}

enum Side {
    Left,
    Right,
}

fn pad(args: &CallArgs<'_, '_>, side: Side) -> Result<String, FunctionError> {
    let text = args.eval(0);
    let width = args.integer(1)?;
    let width = match usize::try_from(width.max(0)) {
        Ok(width) if width <= MAX_PAD_WIDTH => width,
        _ => return Err(FunctionError::WidthTooLarge(width)),
    };
    let fill = args.eval(2).chars().next().unwrap_or(' ');
    let missing = width.saturating_sub(text.chars().count());
    let padding: String = std::iter::repeat(fill).take(missing).collect();
    Ok(match side {
        Side::Left => padding + &text,
        Side::Right => text + &padding,
    })
}

/// `{{#casing: text | U, L or T }}`
pub fn casing(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let text = args.eval(0);
    let mode = args.eval(1);
    match mode.trim().to_ascii_lowercase().as_str() {
        "u" | "upper" => Ok(text.to_uppercase()),
        "l" | "lower" => Ok(text.to_lowercase()),
        "t" | "title" => Ok(title_case(&text)),
        _ => Err(FunctionError::UnknownCasing(mode.trim().to_string())),
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
