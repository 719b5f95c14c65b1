#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
use crate::error::PlotError;
use crate::symbolic::parse_expr::VARIABLE;
use crate::symbolic::preprocess::parse_function_string;
use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

/// a module turns a normalized String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedPlotter::symbolic::parse_expr::parse_expression_func;
/// let parsed_expression = parse_expression_func("x**2*log(x)").unwrap();
/// assert_eq!(parsed_expression.to_string(), "x**2*log(x)");
/// assert_eq!(parsed_expression.eval_at(1.0), Some(0.0));
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// whitespace/`^` normalization, character validation and the full text -> Expr pipeline
/// ```
/// use RustedPlotter::symbolic::preprocess::{normalize_function, parse_function_string};
/// assert_eq!(normalize_function("x^2+3*x-1"), "x**2+3*x-1");
/// let expr = parse_function_string("x ^ 2 + 3*x - 1").unwrap();
/// assert_eq!(expr.to_string(), "x**2 + 3*x - 1");
/// ```
pub mod preprocess;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree
/// 2) prints it in canonical form
/// 3) differentiates, evaluates and simplifies it
///# Example#
/// ```
/// use RustedPlotter::symbolic::preprocess::parse_function_string;
/// let f = parse_function_string("log(x)").unwrap();
/// let f_res = f.lambdify1D()(1.0);
/// let df_dx = f.diff("x").simplify();
/// assert_eq!(df_dx.to_string(), "1/x");
/// assert_eq!(f_res, Some(0.0));
/// // compare numerical and analtical derivatives on a linspace
/// let (norm, res) = f.compare_num1D("x", 1.0, 10.0, 100, 1e-6);
/// assert!(res, "norm = {}", norm);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
pub mod symbolic_integration;
pub mod symbolic_simplify;
///______________________________________________________________________________________________________________________________________________
/// numeric helpers: linspace, central differences, norm
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;

//___________________________________CALCULUS API____________________________________

/// Closed form (or unevaluated integral) of a calculus operation, ready to be shown.
///
/// Integrals carry the constant of integration in their text: `x**3/3 + C`.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculusResult {
    Derivative(Expr),
    Integral(Expr),
    /// no rule applied; holds the integrand
    UnevaluatedIntegral(Expr),
}

impl CalculusResult {
    /// The resulting expression, `None` for an integral that could not be taken.
    pub fn expr(&self) -> Option<&Expr> {
        match self {
            CalculusResult::Derivative(expr) | CalculusResult::Integral(expr) => Some(expr),
            CalculusResult::UnevaluatedIntegral(_) => None,
        }
    }
}

impl fmt::Display for CalculusResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalculusResult::Derivative(expr) => write!(f, "{}", expr),
            CalculusResult::Integral(expr) => write!(f, "{} + C", expr),
            CalculusResult::UnevaluatedIntegral(expr) => {
                write!(f, "Integral({}, {}) + C", expr, VARIABLE)
            }
        }
    }
}

/// Simplified derivative with respect to `x`.
pub fn derivative(expr: &Expr) -> Expr {
    expr.n_th_derivative1D(VARIABLE, 1)
}

/// Simplified antiderivative with respect to `x`, `None` when no integration rule applies.
pub fn integral(expr: &Expr) -> Option<Expr> {
    expr.simplify()
        .integrate(VARIABLE)
        .ok()
        .map(|primitive| primitive.simplify())
}

pub fn derivative_result(expr: &Expr) -> CalculusResult {
    CalculusResult::Derivative(derivative(expr))
}

pub fn integral_result(expr: &Expr) -> CalculusResult {
    match integral(expr) {
        Some(primitive) => CalculusResult::Integral(primitive),
        None => CalculusResult::UnevaluatedIntegral(expr.clone()),
    }
}

/// Parses `raw` and differentiates it.
/// ```
/// use RustedPlotter::symbolic::derivative_text;
/// assert_eq!(derivative_text("x^2").unwrap().to_string(), "2*x");
/// ```
pub fn derivative_text(raw: &str) -> Result<CalculusResult, PlotError> {
    let expr = parse_function_string(raw)?;
    Ok(derivative_result(&expr))
}

/// Parses `raw` and integrates it.
/// ```
/// use RustedPlotter::symbolic::integral_text;
/// assert_eq!(integral_text("x^2").unwrap().to_string(), "x**3/3 + C");
/// ```
pub fn integral_text(raw: &str) -> Result<CalculusResult, PlotError> {
    let expr = parse_function_string(raw)?;
    Ok(integral_result(&expr))
}
