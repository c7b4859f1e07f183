//! `if` and `ifexpr`

use super::{parse_number, CallArgs, FunctionError};

/// Comparison operators, two-character ones first so `<=` is not read as `<`
const COMPARISONS: [&str; 6] = ["==", "!=", "<=", ">=", "<", ">"];

/// `{{#if: text | not empty | empty }}`
pub fn if_(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let condition = args.eval(0);
    if condition.trim().is_empty() {
        Ok(args.eval(2))
    } else {
        Ok(args.eval(1))
    }
}

/// `{{#ifexpr: a op b | true | false }}`
///
/// An expression that does not parse takes the false branch.
pub fn ifexpr(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let expression = args.eval(0);
    if compare(&expression).unwrap_or(false) {
        Ok(args.eval(1))
    } else {
        Ok(args.eval(2))
    }
}

fn compare(expression: &str) -> Option<bool> {
    let (left, op, right) = split_comparison(expression)?;
    let left = parse_number(left).ok()?;
    let right = parse_number(right).ok()?;
    let result = match op {
        "==" => left == right,
        "!=" => left != right,
        "<=" => left <= right,
        ">=" => left >= right,
        "<" => left < right,
        ">" => left > right,
        _ => return None,
    };
    Some(result)
}

fn split_comparison(expression: &str) -> Option<(&str, &'static str, &str)> {
    expression.char_indices().find_map(|(i, _)| {
        let rest = &expression[i..];
        COMPARISONS
            .iter()
            .find(|op| rest.starts_with(*op))
            .map(|op| (&expression[..i], *op, &rest[op.len()..]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_operators() {
        assert_eq!(compare("35 > 30"), Some(true));
        assert_eq!(compare("20 > 30"), Some(false));
        assert_eq!(compare("3 <= 3"), Some(true));
        assert_eq!(compare("3>=4"), Some(false));
        assert_eq!(compare("1 == 1.0"), Some(true));
        assert_eq!(compare("1 != 2"), Some(true));
        assert_eq!(compare("-5 < -2"), Some(true));
    }

    #[test]
    fn test_compare_unparsable() {
        assert_eq!(compare("# > 1"), None);
        assert_eq!(compare("abc"), None);
        assert_eq!(compare(""), None);
        assert_eq!(compare("1 >"), None);
    }
}
