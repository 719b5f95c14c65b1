//! a module turns a normalized String expression into a symbolic expression
//!# Example
//! ```
//! use RustedPlotter::symbolic::parse_expr::parse_expression_func;
//! let parsed_expression = parse_expression_func("x**2+3*x-1").unwrap();
//! assert_eq!(parsed_expression.to_string(), "x**2 + 3*x - 1");
//! ```
use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::{E, PI};

//                  precedence climbing
//                "x**2+sin(x)/2"
//                |  parse_expr(0)                  |
//                |_________________________________|
//                |  prefix: x   | infix ** (30)    |
//                |______________|__________________|
//                |  x**2        | infix + (10)     |
//                |______________|__________________|
//                |              | parse_expr(11)   |
//                |              |  sin(x) / 2      |
//                |______________|__________________|
//                |   Add(Pow(x, 2), Div(sin(x), 2)) |

/// The plotting variable.
pub const VARIABLE: &str = "x";

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LeftParen,
    RightParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Ident(name) => format!("'{}'", name),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Power => "'**'".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
        }
    }

    /// Binding power and right associativity of an infix operator.
    fn infix_binding(&self) -> Option<(u8, bool)> {
        match self {
            Token::Plus | Token::Minus => Some((10, false)),
            Token::Star | Token::Slash => Some((20, false)),
            Token::Power => Some((30, true)),
            _ => None,
        }
    }
}

/// Bound on both parser recursion and expression tree depth; deeper input is rejected
/// instead of exhausting the stack.
pub const MAX_DEPTH: usize = 200;

fn too_deep() -> String {
    format!(
        "expression is nested too deeply or is too long (more than {} levels)",
        MAX_DEPTH
    )
}

// unary minus binds tighter than * and / but looser than **, so -x**2 is -(x**2)
const UNARY_BINDING: u8 = 25;

#[derive(Clone, Debug)]
struct Lexeme {
    token: Token,
    /// 1-based character position in the input
    pos: usize,
}

fn lex(input: &str) -> Result<Vec<Lexeme>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut lexemes = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let pos = i + 1;
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '/' => Token::Slash,
            '^' => Token::Power,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    i += 1;
                    Token::Power
                } else {
                    Token::Star
                }
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // scientific notation: 1e-6, 2.5E3
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        while j < chars.len() && chars[j].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| format!("malformed number '{}' at position {}", text, pos))?;
                lexemes.push(Lexeme {
                    token: Token::Number(value),
                    pos,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                lexemes.push(Lexeme {
                    token: Token::Ident(name),
                    pos,
                });
                continue;
            }
            other => return Err(format!("unexpected character '{}' at position {}", other, pos)),
        };
        lexemes.push(Lexeme { token, pos });
        i += 1;
    }
    Ok(lexemes)
}

/// Builds the node for a named single-argument function, `None` if the name is unknown.
fn build_function(name: &str, arg: Expr) -> Option<Expr> {
    let arg = Box::new(arg);
    let expr = match name {
        "exp" => Expr::Exp(arg),
        "log" | "ln" => Expr::Ln(arg),
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" | "tg" => Expr::tg(arg),
        "cot" | "ctg" => Expr::ctg(arg),
        "asin" | "arcsin" => Expr::arcsin(arg),
        "acos" | "arccos" => Expr::arccos(arg),
        "atan" | "arctan" | "arctg" => Expr::arctg(arg),
        "acot" | "arccot" | "arcctg" => Expr::arcctg(arg),
        "sqrt" => Expr::Pow(arg, Box::new(Expr::Const(0.5))),
        _ => return None,
    };
    Some(expr)
}

fn is_function_name(name: &str) -> bool {
    build_function(name, Expr::Const(0.0)).is_some()
}

struct Parser<'a> {
    lexemes: &'a [Lexeme],
    pos: usize,
    /// current recursion depth of parse_expr
    nesting: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expect_right_paren(&mut self, opened_at: usize) -> Result<(), String> {
        match self.current() {
            Some(Lexeme {
                token: Token::RightParen,
                ..
            }) => {
                self.advance();
                Ok(())
            }
            Some(other) => Err(format!(
                "expected ')' to close '(' at position {}, found {} at position {}",
                opened_at,
                other.token.describe(),
                other.pos
            )),
            None => Err(format!(
                "unbalanced parentheses: '(' at position {} is never closed",
                opened_at
            )),
        }
    }

    fn parse_expr(&mut self, min_binding: u8) -> Result<(Expr, usize), String> {
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(too_deep());
        }
        let result = self.parse_binary(min_binding);
        self.nesting -= 1;
        result
    }

    /// Returns the expression and the depth of its tree.
    fn parse_binary(&mut self, min_binding: u8) -> Result<(Expr, usize), String> {
        let (mut left, mut depth) = self.parse_prefix()?;

        while let Some(lexeme) = self.current() {
            let (binding, right_assoc) = match lexeme.token.infix_binding() {
                Some(b) => b,
                None => break,
            };
            if binding < min_binding {
                break;
            }
            self.advance();
            let next_min = if right_assoc { binding } else { binding + 1 };
            let (right, right_depth) = self.parse_expr(next_min)?;
            depth = depth.max(right_depth) + 1;
            // a long flat chain such as x+x+...+x is as deep as it is long
            if depth > MAX_DEPTH {
                return Err(too_deep());
            }
            left = match lexeme.token {
                Token::Plus => Expr::Add(Box::new(left), Box::new(right)),
                Token::Minus => Expr::Sub(Box::new(left), Box::new(right)),
                Token::Star => Expr::Mul(Box::new(left), Box::new(right)),
                Token::Slash => Expr::Div(Box::new(left), Box::new(right)),
                Token::Power => Expr::Pow(Box::new(left), Box::new(right)),
                _ => unreachable!("infix_binding only accepts operators"),
            };
        }

        Ok((left, depth))
    }

    fn parse_prefix(&mut self) -> Result<(Expr, usize), String> {
        let lexeme = self
            .current()
            .ok_or_else(|| "unexpected end of expression".to_string())?;
        match &lexeme.token {
            Token::Number(n) => {
                self.advance();
                Ok((Expr::Const(*n), 1))
            }
            Token::Ident(name) => {
                self.advance();
                if let Some(Lexeme {
                    token: Token::LeftParen,
                    pos: opened_at,
                }) = self.current()
                {
                    if !is_function_name(name) {
                        return Err(format!(
                            "unknown function '{}' at position {}",
                            name, lexeme.pos
                        ));
                    }
                    self.advance();
                    let (arg, depth) = self.parse_expr(0)?;
                    self.expect_right_paren(*opened_at)?;
                    // checked by is_function_name above
                    let function = build_function(name, arg)
                        .ok_or_else(|| format!("unknown function '{}'", name))?;
                    return Ok((function, depth + 1));
                }
                let atom = match name.as_str() {
                    VARIABLE => Expr::Var(VARIABLE.to_string()),
                    "pi" => Expr::Const(PI),
                    "E" => Expr::Const(E),
                    _ if is_function_name(name) => {
                        return Err(format!(
                            "function '{}' at position {} needs an argument in parentheses",
                            name, lexeme.pos
                        ));
                    }
                    _ => {
                        return Err(format!(
                            "unknown symbol '{}' at position {}: only '{}' may be used as a variable",
                            name, lexeme.pos, VARIABLE
                        ));
                    }
                };
                Ok((atom, 1))
            }
            Token::Minus => {
                self.advance();
                let (operand, depth) = self.parse_expr(UNARY_BINDING)?;
                Ok(match operand {
                    Expr::Const(c) => (Expr::Const(-c), depth),
                    other => (-other, depth + 1),
                })
            }
            Token::Plus => {
                self.advance();
                self.parse_expr(UNARY_BINDING)
            }
            Token::LeftParen => {
                let opened_at = lexeme.pos;
                self.advance();
                let inner = self.parse_expr(0)?;
                self.expect_right_paren(opened_at)?;
                Ok(inner)
            }
            Token::RightParen => Err(format!(
                "unbalanced parentheses: unexpected ')' at position {}",
                lexeme.pos
            )),
            other => Err(format!(
                "unexpected {} at position {}",
                other.describe(),
                lexeme.pos
            )),
        }
    }
}

/// Parses a normalized expression string into an [`Expr`].
///
/// Returns the syntax diagnostic as `Err` on malformed input (unbalanced parentheses,
/// unknown tokens, dangling operators, text that is not an expression).
pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    let lexemes = lex(input)?;
    if lexemes.is_empty() {
        return Err("unexpected end of expression".to_string());
    }
    let mut parser = Parser {
        lexemes: &lexemes,
        pos: 0,
        nesting: 0,
    };
    let (expr, _) = parser.parse_expr(0)?;
    match parser.current() {
        None => Ok(expr),
        Some(Lexeme {
            token: Token::RightParen,
            pos,
        }) => Err(format!(
            "unbalanced parentheses: unexpected ')' at position {}",
            pos
        )),
        Some(rest) => Err(format!(
            "unexpected {} at position {} (missing operator?)",
            rest.token.describe(),
            rest.pos
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Box<Expr> {
        Box::new(Expr::Var("x".to_string()))
    }

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_func("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(x()));
    }

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_func("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
        let expr = parse_expression_func("2.5e-1").unwrap();
        assert_eq!(expr, Expr::Const(0.25));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_func("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_subtraction_is_left_associative() {
        let expr = parse_expression_func("x-2-1").unwrap();
        assert_eq!(
            expr,
            Expr::Sub(
                Box::new(Expr::Sub(x(), Box::new(Expr::Const(2.0)))),
                Box::new(Expr::Const(1.0))
            )
        );
    }

    #[test]
    fn test_parse_division() {
        let expr = parse_expression_func("x/2").unwrap();
        assert_eq!(expr, Expr::Div(x(), Box::new(Expr::Const(2.0))));
    }

    #[test]
    fn test_parse_power_both_spellings() {
        let expected = Expr::Pow(x(), Box::new(Expr::Const(2.0)));
        assert_eq!(parse_expression_func("x**2").unwrap(), expected);
        assert_eq!(parse_expression_func("x^2").unwrap(), expected);
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_expression_func("2**x**2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Pow(x(), Box::new(Expr::Const(2.0))))
            )
        );
    }

    #[test]
    fn test_precedence() {
        let expr = parse_expression_func("x**2+3*x-1").unwrap();
        let to_check = Expr::Pow(x(), Box::new(Expr::Const(2.0)))
            + Expr::Const(3.0) * Expr::Var("x".to_string())
            - Expr::Const(1.0);
        assert_eq!(expr, to_check);
    }

    #[test]
    fn test_unary_minus() {
        let expr = parse_expression_func("-x**2").unwrap();
        assert_eq!(expr, -Expr::Pow(x(), Box::new(Expr::Const(2.0))));
        let expr = parse_expression_func("-2*x").unwrap();
        assert_eq!(expr, Expr::Mul(Box::new(Expr::Const(-2.0)), x()));
        let expr = parse_expression_func("x**-1").unwrap();
        assert_eq!(expr, Expr::Pow(x(), Box::new(Expr::Const(-1.0))));
    }

    #[test]
    fn test_parse_with_brackets() {
        let expr = parse_expression_func("(x+1)*(x-2)/exp(x)").unwrap();
        let x_plus_1 = Expr::Var("x".to_string()) + Expr::Const(1.0);
        let x_minus_2 = Expr::Var("x".to_string()) - Expr::Const(2.0);
        let expected = x_plus_1 * x_minus_2 / Expr::Exp(x());
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_function_aliases() {
        assert_eq!(parse_expression_func("ln(x)").unwrap(), Expr::Ln(x()));
        assert_eq!(parse_expression_func("log(x)").unwrap(), Expr::Ln(x()));
        assert_eq!(parse_expression_func("tg(x)").unwrap(), Expr::tg(x()));
        assert_eq!(parse_expression_func("tan(x)").unwrap(), Expr::tg(x()));
        assert_eq!(parse_expression_func("arcsin(x)").unwrap(), Expr::arcsin(x()));
        assert_eq!(parse_expression_func("atan(x)").unwrap(), Expr::arctg(x()));
        assert_eq!(
            parse_expression_func("sqrt(x)").unwrap(),
            Expr::Pow(x(), Box::new(Expr::Const(0.5)))
        );
    }

    #[test]
    fn test_parse_nested_trig() {
        let expr = parse_expression_func("sin(cos(x))").unwrap();
        assert_eq!(expr, Expr::sin(Box::new(Expr::cos(x()))));
    }

    #[test]
    fn test_named_constants() {
        assert_eq!(parse_expression_func("pi").unwrap(), Expr::Const(PI));
        assert_eq!(parse_expression_func("E").unwrap(), Expr::Const(E));
    }

    #[test]
    fn test_invalid_expression() {
        assert!(parse_expression_func("(x+").is_err());
        assert!(parse_expression_func("x+").is_err());
        assert!(parse_expression_func("*x").is_err());
        assert!(parse_expression_func("").is_err());
        assert!(parse_expression_func("()").is_err());
    }

    #[test]
    fn test_unmatched_brackets() {
        let err = parse_expression_func("(x+1").unwrap_err();
        assert!(err.contains("never closed"), "{}", err);
        let err = parse_expression_func("x+1)").unwrap_err();
        assert!(err.contains("unbalanced"), "{}", err);
    }

    #[test]
    fn test_unknown_symbols_are_rejected() {
        let err = parse_expression_func("invalidfunction").unwrap_err();
        assert!(err.contains("unknown symbol 'invalidfunction'"), "{}", err);
        let err = parse_expression_func("foo(x)").unwrap_err();
        assert!(err.contains("unknown function 'foo'"), "{}", err);
        assert!(parse_expression_func("y+1").is_err());
        assert!(parse_expression_func("sin").is_err());
    }

    #[test]
    fn test_implicit_multiplication_is_rejected() {
        let err = parse_expression_func("2x").unwrap_err();
        assert!(err.contains("missing operator"), "{}", err);
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let nested = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = parse_expression_func(&nested).unwrap_err();
        assert!(err.contains("nested too deeply"), "{}", err);
        let minus_chain = format!("{}x", "-".repeat(10_000));
        assert!(parse_expression_func(&minus_chain).is_err());
        let functions = format!("{}x{}", "sin(".repeat(500), ")".repeat(500));
        assert!(parse_expression_func(&functions).is_err());
    }

    #[test]
    fn test_long_flat_chain_is_rejected() {
        let long_sum = vec!["x"; 10_000].join("+");
        assert!(parse_expression_func(&long_sum).is_err());
        let long_power = vec!["x"; 1000].join("**");
        assert!(parse_expression_func(&long_power).is_err());
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let nested = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(parse_expression_func(&nested).unwrap(), Expr::Var("x".to_string()));
        let sum = vec!["x"; 100].join("+");
        assert!(parse_expression_func(&sum).is_ok());
    }

    #[test]
    fn test_round_trip_through_display() {
        for text in ["x**2 + 3*x - 1", "sin(x)/x", "exp(-x**2)", "log(x + 1)*(x - 2)"] {
            let expr = parse_expression_func(text).unwrap();
            assert_eq!(expr.to_string(), text);
        }
    }
}
