//! Text pipeline in front of the parser: normalize, validate, parse.
//! Every entry point that accepts user text (plot, add function, calculus on raw text)
//! goes through [`parse_function_string`], so the character check lives in one place.
use crate::error::PlotError;
use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_engine::Expr;
use regex::Regex;
use std::sync::LazyLock;

// anything outside the accepted alphabet
static FORBIDDEN_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z+\-*/^().]").expect("literal character class"));

/// Removes all whitespace and rewrites `^` as `**`.
pub fn normalize_function(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace('^', "**")
}

/// Rejects empty input and input containing characters the parser never accepts.
pub fn validate_function(normalized: &str) -> Result<(), PlotError> {
    if normalized.is_empty() {
        return Err(PlotError::EmptyExpression);
    }
    if let Some(m) = FORBIDDEN_CHAR.find(normalized) {
        let position = normalized[..m.start()].chars().count() + 1;
        return Err(PlotError::InvalidExpression(format!(
            "character '{}' at position {} is not allowed",
            m.as_str(),
            position
        )));
    }
    Ok(())
}

/// normalize -> validate -> parse
pub fn parse_function_string(raw: &str) -> Result<Expr, PlotError> {
    let normalized = normalize_function(raw);
    validate_function(&normalized)?;
    parse_expression_func(&normalized).map_err(PlotError::InvalidExpression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_function("x^2+3*x-1"), "x**2+3*x-1");
        assert_eq!(normalize_function(" x ^ 2\t+ 1\n"), "x**2+1");
        assert_eq!(normalize_function("x**2"), "x**2");
        assert_eq!(normalize_function(""), "");
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate_function(""), Err(PlotError::EmptyExpression));
        assert!(validate_function("sin(x)/x+2.5").is_ok());
        match validate_function("x+1;") {
            Err(PlotError::InvalidExpression(diag)) => {
                assert!(diag.contains("';'"), "{}", diag);
                assert!(diag.contains("position 4"), "{}", diag);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(validate_function("x,1").is_err());
        assert!(validate_function("x_1").is_err());
    }

    #[test]
    fn test_parse_function_string() {
        let expr = parse_function_string("x^2 + 3*x - 1").unwrap();
        assert_eq!(expr.to_string(), "x**2 + 3*x - 1");
        assert_eq!(parse_function_string(""), Err(PlotError::EmptyExpression));
        assert_eq!(parse_function_string("   "), Err(PlotError::EmptyExpression));
        assert!(matches!(
            parse_function_string("invalid function"),
            Err(PlotError::InvalidExpression(_))
        ));
        assert!(matches!(
            parse_function_string("__import__('os')"),
            Err(PlotError::InvalidExpression(_))
        ));
        assert!(matches!(
            parse_function_string("2x"),
            Err(PlotError::InvalidExpression(_))
        ));
    }
}
