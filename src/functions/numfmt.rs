//! .NET-style numeric format strings
//!
//! Standard formats are a letter with an optional precision (`F2`, `N0`,
//! `x4`). Anything else is a custom format built from `0 # . , %`, quoted
//! or escaped literals, and up to three `;`-separated sections for positive,
//! negative and zero values. Midpoints round away from zero.

use super::FunctionError;

/// Largest precision at which pre-rounding by scaling is still exact enough
const MAX_SCALED_DECIMALS: usize = 15;

/// Format with a fixed number of decimals
pub fn fixed(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, round_half_away(value, decimals));
    strip_negative_zero(formatted)
}

/// Fixed decimals with trailing zeros (and a bare point) removed
pub fn fixed_trimmed(value: f64, decimals: usize) -> String {
    trim_fraction(fixed(value, decimals))
}

/// Shortest representation that reads back to the same value
///
/// Switches to `1E+15` style notation below 1e-4 and from 1e15 up.
pub fn shortest(value: f64) -> String {
    if let Some(special) = non_finite(value) {
        return special;
    }
    let value = if value == 0.0 { 0.0 } else { value };
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = split_exponent(&scientific);
    if (-4..15).contains(&exponent) {
        value.to_string()
    } else {
        format!("{}E{}", mantissa, signed_exponent(exponent, 2))
    }
}

/// Format a floating point value
pub fn format_float(value: f64, format: &str) -> Result<String, FunctionError> {
    if format.is_empty() {
        return Ok(shortest(value));
    }
    match parse_standard(format) {
        Some((letter, precision)) => standard(value, letter, precision, format),
        None => Ok(custom(value, format)),
    }
}

/// Format an integer value; adds hexadecimal (`X`, `x`) to the float formats
pub fn format_integer(value: i64, format: &str) -> Result<String, FunctionError> {
    match parse_standard(format) {
        Some(('D' | 'd', precision)) => Ok(decimal(value, precision)),
        Some((letter @ ('X' | 'x'), precision)) => Ok(hex(value, letter, precision)),
        _ => format_float(value as f64, format),
    }
}

fn standard(
    value: f64,
    letter: char,
    precision: Option<usize>,
    format: &str,
) -> Result<String, FunctionError> {
    if let Some(special) = non_finite(value) {
        return Ok(special);
    }
    let formatted = match letter {
        'F' | 'f' => fixed(value, precision.unwrap_or(2)),
        'N' | 'n' => grouped(&fixed(value, precision.unwrap_or(2))),
        'P' | 'p' => format!("{}%", grouped(&fixed(value * 100.0, precision.unwrap_or(2)))),
        'E' | 'e' => exponential(value, precision.unwrap_or(6), letter, 3),
        'G' | 'g' => general(value, precision.unwrap_or(0), letter),
        'R' | 'r' => shortest(value),
        'D' | 'd' | 'X' | 'x' => {
            let integer = as_integer(value)
                .ok_or_else(|| FunctionError::IntegerRequired(format.to_string()))?;
            return format_integer(integer, format);
        }
        _ => return Err(FunctionError::InvalidFormat(format.to_string())),
    };
    Ok(formatted)
}

/// A letter followed by at most two digits
fn parse_standard(format: &str) -> Option<(char, Option<usize>)> {
    let mut chars = format.chars();
    let letter = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    let digits = chars.as_str();
    if digits.is_empty() {
        return Some((letter, None));
    }
    if digits.len() <= 2 && digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.parse().ok().map(|p| (letter, Some(p)));
    }
    None
}

fn as_integer(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < i64::MAX as f64).then_some(value as i64)
}

fn decimal(value: i64, precision: Option<usize>) -> String {
    let width = precision.unwrap_or(0);
    let digits = format!("{:0width$}", value.unsigned_abs(), width = width);
    if value < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

fn hex(value: i64, letter: char, precision: Option<usize>) -> String {
    let width = precision.unwrap_or(0);
    if letter == 'X' {
        format!("{:0width$X}", value, width = width)
    } else {
        format!("{:0width$x}", value, width = width)
    }
}

fn exponential(value: f64, precision: usize, letter: char, min_digits: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = split_exponent(&formatted);
    let marker = if letter.is_ascii_uppercase() { 'E' } else { 'e' };
    format!(
        "{}{}{}",
        mantissa,
        marker,
        signed_exponent(exponent, min_digits)
    )
}

fn general(value: f64, precision: usize, letter: char) -> String {
    if precision == 0 {
        return shortest(value);
    }
    let formatted = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = split_exponent(&formatted);
    if exponent >= -4 && exponent < precision as i32 {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        fixed_trimmed(value, decimals)
    } else {
        let marker = if letter.is_ascii_uppercase() { 'E' } else { 'e' };
        format!(
            "{}{}{}",
            trim_fraction(mantissa.to_string()),
            marker,
            signed_exponent(exponent, 2)
        )
    }
}

fn custom(value: f64, format: &str) -> String {
    if let Some(special) = non_finite(value) {
        return special;
    }
    let sections = split_sections(format);
    let pick = |i: usize| sections.get(i).filter(|s| !s.is_empty());

    if value < 0.0 {
        if let Some(negative) = pick(1) {
            return render_section(negative, -value, false);
        }
    } else if value == 0.0 {
        if let Some(zero) = pick(2) {
            return render_section(zero, 0.0, false);
        }
    }
    render_section(&sections[0], value.abs(), value < 0.0)
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    /// Digit placeholder; `true` for `0`, `false` for `#`
    Digit(bool),
    Point,
    Group,
    Percent,
    Literal(String),
}

/// Split on unquoted, unescaped `;`
fn split_sections(format: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut quote = None;
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        match (c, quote) {
            ('\\', _) => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ('\'' | '"', None) => {
                quote = Some(c);
                current.push(c);
            }
            (c, Some(q)) if c == q => {
                quote = None;
                current.push(c);
            }
            (';', None) => sections.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    sections.push(current);
    sections
}

fn parse_items(section: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut seen_point = false;
    let mut chars = section.chars();
    while let Some(c) = chars.next() {
        let item = match c {
            '0' => Item::Digit(true),
            '#' => Item::Digit(false),
            '.' if !seen_point => {
                seen_point = true;
                Item::Point
            }
            // Later points are ignored
            '.' => continue,
            ',' => Item::Group,
            '%' => Item::Percent,
            '\\' => match chars.next() {
                Some(next) => Item::Literal(next.to_string()),
                None => continue,
            },
            '\'' | '"' => {
                let quoted: String = chars.by_ref().take_while(|&q| q != c).collect();
                Item::Literal(quoted)
            }
            other => Item::Literal(other.to_string()),
        };
        items.push(item);
    }
    items
}

fn render_section(section: &str, value: f64, negative: bool) -> String {
    let items = parse_items(section);
    let point = items.iter().position(|i| *i == Item::Point);
    let (int_items, frac_items) = match point {
        Some(p) => (&items[..p], &items[p + 1..]),
        None => (&items[..], &items[..0]),
    };

    let last_int_digit = int_items.iter().rposition(|i| matches!(i, Item::Digit(_)));
    let first_int_digit = int_items.iter().position(|i| matches!(i, Item::Digit(_)));

    // Commas right after the last integer placeholder scale by 1000 each,
    // commas between placeholders turn on grouping
    let scaling = last_int_digit.map_or(0, |last| {
        int_items[last + 1..]
            .iter()
            .take_while(|i| **i == Item::Group)
            .count()
    });
    let grouping = match (first_int_digit, last_int_digit) {
        (Some(first), Some(last)) => int_items[first..last].contains(&Item::Group),
        _ => false,
    };
    let percents = items.iter().filter(|i| **i == Item::Percent).count();

    let mut value = value;
    for _ in 0..percents {
        value *= 100.0;
    }
    for _ in 0..scaling {
        value /= 1000.0;
    }

    let min_int = first_zero_run(int_items.iter());
    let frac_placeholders: Vec<&Item> = frac_items
        .iter()
        .filter(|i| matches!(i, Item::Digit(_)))
        .collect();
    let frac_digit_count = frac_placeholders.len();
    let min_frac = frac_placeholders
        .iter()
        .rposition(|i| **i == Item::Digit(true))
        .map_or(0, |p| p + 1);
    let has_placeholders = first_int_digit.is_some() || frac_digit_count > 0;

    let rounded = fixed(value, frac_digit_count);
    let (int_str, frac_str) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut int_digits: Vec<char> = int_str.trim_start_matches('0').chars().collect();
    while int_digits.len() < min_int {
        int_digits.insert(0, '0');
    }
    let mut frac_digits: Vec<char> = frac_str.chars().collect();
    while frac_digits.len() > min_frac && frac_digits.last() == Some(&'0') {
        frac_digits.pop();
    }

    // Integer part is laid out right to left so literals keep their place
    let mut reversed: Vec<char> = Vec::new();
    let mut remaining = int_digits.len();
    let mut emitted = 0usize;
    let mut push_digit = |reversed: &mut Vec<char>, digit: char| {
        if grouping && emitted > 0 && emitted % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(digit);
        emitted += 1;
    };
    for (i, item) in int_items.iter().enumerate().rev() {
        match item {
            Item::Digit(_) if Some(i) == first_int_digit => {
                while remaining > 0 {
                    remaining -= 1;
                    push_digit(&mut reversed, int_digits[remaining]);
                }
            }
            Item::Digit(_) => {
                if remaining > 0 {
                    remaining -= 1;
                    push_digit(&mut reversed, int_digits[remaining]);
                }
            }
            Item::Percent => reversed.push('%'),
            Item::Literal(text) => reversed.extend(text.chars().rev()),
            Item::Group | Item::Point => {}
        }
    }
    if has_placeholders {
        while remaining > 0 {
            remaining -= 1;
            push_digit(&mut reversed, int_digits[remaining]);
        }
    }

    let mut out = String::new();
    let is_zero = int_digits.iter().chain(&frac_digits).all(|&d| d == '0');
    if negative && !is_zero {
        out.push('-');
    }
    out.extend(reversed.iter().rev());
    if !frac_digits.is_empty() {
        out.push('.');
    }

    let mut next = frac_digits.iter();
    for item in frac_items {
        match item {
            Item::Digit(_) => {
                if let Some(&d) = next.next() {
                    out.push(d);
                }
            }
            Item::Percent => out.push('%'),
            Item::Literal(text) => out.push_str(text),
            Item::Group | Item::Point => {}
        }
    }
    out
}

/// Placeholders from the first `0` onwards always print a digit
fn first_zero_run<'a>(items: impl Iterator<Item = &'a Item>) -> usize {
    let digits: Vec<&Item> = items.filter(|i| matches!(i, Item::Digit(_))).collect();
    digits
        .iter()
        .position(|i| **i == Item::Digit(true))
        .map_or(0, |first| digits.len() - first)
}

fn round_half_away(value: f64, decimals: usize) -> f64 {
    if decimals > MAX_SCALED_DECIMALS || !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= 1e17 {
        return value;
    }
    scaled.round() / scale
}

fn grouped(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, rest) = match unsigned.find('.') {
        Some(p) => unsigned.split_at(p),
        None => (unsigned, ""),
    };
    let mut out = String::with_capacity(number.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(rest);
    out
}

fn trim_fraction(number: String) -> String {
    if !number.contains('.') {
        return number;
    }
    number
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn strip_negative_zero(number: String) -> String {
    match number.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => number,
    }
}

fn split_exponent(scientific: &str) -> (&str, i32) {
    match scientific.split_once(|c| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (scientific, 0),
    }
}

fn signed_exponent(exponent: i32, min_digits: usize) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}{:0width$}", sign, exponent.abs(), width = min_digits)
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".into())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" }.into())
    } else {
        None
    }
}
