//! # Symbolic Engine Module
//!
//! Core expression tree of the plotter. Every function the user types ends up here after
//! normalization, validation and parsing, and everything downstream (sampling, derivatives,
//! integrals, legend labels) works on this type.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - the plotting variable, normally "x"
//! - **Constants**: `Const(f64)` - numerical constants (named constants `pi`, `E` are folded in)
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, `tg`, `ctg`, `arcsin`, `arccos`, `arctg`, `arcctg`
//!
//! ### Canonical text
//! `Display` renders the canonical form used for legend labels and calculus results:
//! `**` for powers, no spaces around `*` and `/`, spaces around `+` and `-`, and only the
//! parentheses precedence requires, e.g. `x**3/3 + 2*x - 1`. Function names follow the
//! usual short spelling (`tan`, `asin`, `log`) even though the variants keep the
//! mathematical notation (`tg`, `arcsin`, `Ln`).

#![allow(non_camel_case_types)]

use std::f64;
use std::fmt;

/// Core symbolic expression enum representing a single-variable formula as a syntax tree.
///
/// # Examples
/// ```rust, ignore
/// use RustedPlotter::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.to_string(), "x + 2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// left + right
    Add(Box<Expr>, Box<Expr>),
    /// left - right
    Sub(Box<Expr>, Box<Expr>),
    /// left * right
    Mul(Box<Expr>, Box<Expr>),
    /// left / right
    Div(Box<Expr>, Box<Expr>),
    /// base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// e^x
    Exp(Box<Expr>),
    /// natural logarithm, rendered as `log`
    Ln(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    /// tangent, rendered as `tan`
    tg(Box<Expr>),
    /// cotangent, rendered as `cot`
    ctg(Box<Expr>),
    /// rendered as `asin`
    arcsin(Box<Expr>),
    /// rendered as `acos`
    arccos(Box<Expr>),
    /// rendered as `atan`
    arctg(Box<Expr>),
    /// rendered as `acot`
    arcctg(Box<Expr>),
}

// binding strength used by the printer
const PREC_ADD: u8 = 10;
const PREC_NEG: u8 = 15;
const PREC_MUL: u8 = 20;
const PREC_POW: u8 = 30;
const PREC_ATOM: u8 = 40;

/// Formats a constant the way it appears in canonical text: integral values lose the
/// fractional part (`2`, not `2.0`).
pub fn format_number(val: f64) -> String {
    if val.is_finite() && val.fract() == 0.0 && val.abs() < 1e15 {
        format!("{}", val as i64)
    } else {
        format!("{}", val)
    }
}

impl Expr {
    /// For a product or quotient whose leading factor is a negative number, the same node
    /// with that sign removed: `-2*x` gives `2*x`, `(-3*x)/y` gives `3*x/y`.
    fn without_leading_minus(&self) -> Option<Expr> {
        match self {
            Expr::Const(c) if *c < 0.0 => Some(Expr::Const(-c)),
            Expr::Mul(lhs, rhs) if **lhs == Expr::Const(-1.0) => Some(rhs.as_ref().clone()),
            Expr::Mul(lhs, rhs) => lhs
                .without_leading_minus()
                .map(|lhs| Expr::Mul(lhs.boxed(), rhs.clone())),
            Expr::Div(lhs, rhs) => lhs
                .without_leading_minus()
                .map(|lhs| Expr::Div(lhs.boxed(), rhs.clone())),
            _ => None,
        }
    }

    /// Printer precedence of the outermost node.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => PREC_ADD,
            Expr::Mul(lhs, _) | Expr::Div(lhs, _) if lhs.without_leading_minus().is_some() => {
                PREC_NEG
            }
            Expr::Mul(..) | Expr::Div(..) => PREC_MUL,
            Expr::Const(c) if *c < 0.0 => PREC_NEG,
            Expr::Pow(_, exp) if **exp == Expr::Const(0.5) => PREC_ATOM,
            Expr::Pow(..) => PREC_POW,
            _ => PREC_ATOM,
        }
    }

    /// Name of a unary function node together with its argument.
    pub fn function_parts(&self) -> Option<(&'static str, &Expr)> {
        match self {
            Expr::Exp(arg) => Some(("exp", arg)),
            Expr::Ln(arg) => Some(("log", arg)),
            Expr::sin(arg) => Some(("sin", arg)),
            Expr::cos(arg) => Some(("cos", arg)),
            Expr::tg(arg) => Some(("tan", arg)),
            Expr::ctg(arg) => Some(("cot", arg)),
            Expr::arcsin(arg) => Some(("asin", arg)),
            Expr::arccos(arg) => Some(("acos", arg)),
            Expr::arctg(arg) => Some(("atan", arg)),
            Expr::arcctg(arg) => Some(("acot", arg)),
            _ => None,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter, wrap: bool) -> fmt::Result {
        if wrap {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    fn fmt_binary(
        f: &mut fmt::Formatter,
        lhs: &Expr,
        rhs: &Expr,
        op: &str,
        prec: u8,
        right_strict: bool,
    ) -> fmt::Result {
        lhs.fmt_operand(f, lhs.precedence() < prec)?;
        write!(f, "{}", op)?;
        let rp = rhs.precedence();
        rhs.fmt_operand(f, rp < prec || (right_strict && rp == prec))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", format_number(*val)),
            Expr::Add(lhs, rhs) => Expr::fmt_binary(f, lhs, rhs, " + ", PREC_ADD, false),
            Expr::Sub(lhs, rhs) => Expr::fmt_binary(f, lhs, rhs, " - ", PREC_ADD, true),
            Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => match self.without_leading_minus() {
                // the sign goes in front of the whole product: -2*x/y, not (-2*x)/y
                Some(positive) => {
                    write!(f, "-")?;
                    positive.fmt_operand(f, positive.precedence() < PREC_MUL)
                }
                None if matches!(self, Expr::Mul(..)) => {
                    Expr::fmt_binary(f, lhs, rhs, "*", PREC_MUL, false)
                }
                None => Expr::fmt_binary(f, lhs, rhs, "/", PREC_MUL, true),
            },
            Expr::Pow(base, exp) if **exp == Expr::Const(0.5) => write!(f, "sqrt({})", base),
            Expr::Pow(base, exp) => {
                base.fmt_operand(f, base.precedence() <= PREC_POW)?;
                write!(f, "**")?;
                exp.fmt_operand(f, exp.precedence() < PREC_POW)
            }
            _ => match self.function_parts() {
                Some((name, arg)) => write!(f, "{}({})", name, arg),
                None => unreachable!("every remaining variant is a unary function"),
            },
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Shorthand for `Expr::Var(name.to_string())`.
    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// Check if the expression contains a variable.
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr)
            | Expr::arcctg(expr) => expr.contains_variable(var_name),
        }
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates sqrt(self) as self^0.5.
    pub fn sqrt(self) -> Expr {
        Expr::Pow(self.boxed(), Box::new(Expr::Const(0.5)))
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Checks if expression is exactly one (constant 1.0).
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 1.0)
    }

    /// Rebuilds a unary function node of the same kind around a new argument.
    pub fn with_argument(&self, arg: Expr) -> Expr {
        let arg = Box::new(arg);
        match self {
            Expr::Exp(_) => Expr::Exp(arg),
            Expr::Ln(_) => Expr::Ln(arg),
            Expr::sin(_) => Expr::sin(arg),
            Expr::cos(_) => Expr::cos(arg),
            Expr::tg(_) => Expr::tg(arg),
            Expr::ctg(_) => Expr::ctg(arg),
            Expr::arcsin(_) => Expr::arcsin(arg),
            Expr::arccos(_) => Expr::arccos(arg),
            Expr::arctg(_) => Expr::arctg(arg),
            Expr::arcctg(_) => Expr::arcctg(arg),
            _ => self.clone(),
        }
    }
}
