//! `expr`, `div` and `float_div`

use super::numfmt::{format_float, shortest};
use super::{parse_number, CallArgs, FunctionError};

/// `{{#expr: a op b }}` with `+ - * /`
pub fn expr(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let expression = args
        .eval_non_empty(0)
        .ok_or(FunctionError::MissingArgument(1))?;
    evaluate(&expression).map(shortest)
}

/// `{{#div: number | divisor }}`, truncating toward zero
pub fn div(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let number = args.number(0)?;
    let divisor = args.number(1)?;
    if divisor == 0.0 {
        return Err(FunctionError::DivisionByZero);
    }
    Ok(((number / divisor).trunc() as i64).to_string())
}

/// `{{#float_div: number | divisor | format }}`
pub fn float_div(args: &CallArgs<'_, '_>) -> Result<String, FunctionError> {
    let number = args.number(0)?;
    let divisor = args.number(1)?;
    if divisor == 0.0 {
        return Err(FunctionError::DivisionByZero);
    }
    let quotient = number / divisor;
    match args.eval_non_empty(2) {
        Some(format) => format_float(quotient, format.trim()),
        None => Ok(shortest(quotient)),
    }
}

fn evaluate(expression: &str) -> Result<f64, FunctionError> {
    let expression = expression.trim();
    let Some((left, op, right)) = split_operator(expression) else {
        // A lone number is its own value
        return parse_number(expression)
            .map_err(|_| FunctionError::InvalidExpression(expression.to_string()));
    };
    let left = parse_number(left)?;
    let right = parse_number(right)?;
    match op {
        '+' => Ok(left + right),
        '-' => Ok(left - right),
        '*' => Ok(left * right),
        '/' if right == 0.0 => Err(FunctionError::DivisionByZero),
        '/' => Ok(left / right),
        _ => Err(FunctionError::InvalidExpression(expression.to_string())),
    }
}

/// Find the binary operator: the first `+ - * /` that follows an operand
///
/// A sign right after another operator, at the start, or after an exponent
/// marker belongs to the number.
fn split_operator(expression: &str) -> Option<(&str, char, &str)> {
    let mut previous: Option<char> = None;
    for (i, c) in expression.char_indices() {
        if "+-*/".contains(c) {
            if let Some(p) = previous {
                if p.is_ascii_digit() || p == '.' {
                    return Some((&expression[..i], c, &expression[i + 1..]));
                }
            }
        }
        if !c.is_whitespace() {
            previous = Some(c);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_operators() {
        assert_eq!(evaluate("35 * 2"), Ok(70.0));
        assert_eq!(evaluate("10 / 4"), Ok(2.5));
        assert_eq!(evaluate("3 - -2"), Ok(5.0));
        assert_eq!(evaluate("-3 + 1"), Ok(-2.0));
        assert_eq!(evaluate("1e2 + 1"), Ok(101.0));
        assert_eq!(evaluate("42"), Ok(42.0));
    }

    #[test]
    fn test_evaluate_errors() {
        assert_eq!(evaluate("1 / 0"), Err(FunctionError::DivisionByZero));
        assert_eq!(
            evaluate("a + 1"),
            Err(FunctionError::InvalidExpression("a + 1".into()))
        );
        assert_eq!(
            evaluate("2 + x"),
            Err(FunctionError::NotANumber("x".into()))
        );
    }
}
