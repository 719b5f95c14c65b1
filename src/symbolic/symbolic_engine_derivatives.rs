//! # Symbolic Engine Derivatives Module
//!
//! Extends the symbolic engine with differentiation and pointwise evaluation.
//!
//! ## Key Methods
//!
//! ### Differentiation
//! - `diff(var: &str)` - analytical derivative (sum, product, quotient, general power and
//!   chain rule for every supported function)
//! - `n_th_derivative1D()` - higher-order derivatives, simplified after every step
//!
//! ### Function evaluation
//! - `eval_expression()` / `eval_at()` - evaluation by substitution; `None` where the
//!   function is undefined (division by zero, log of a non-positive number, fractional
//!   power of a negative number, asin/acos outside [-1, 1], overflow)
//! - `lambdify1D()` - the same thing as a closure
//!
//! ### Numerical Analysis
//! - `compare_num1D()` - cross-check the analytical derivative against central differences

use crate::symbolic::parse_expr::VARIABLE;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{linspace, norm, numerical_derivative};
use std::f64::consts::PI;

fn finite(val: f64) -> Option<f64> {
    if val.is_finite() { Some(val) } else { None }
}

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements the standard rules:
    /// - Power rule: d/dx(u^n) = n*u^(n-1)*u'; d/dx(a^v) = a^v*ln(a)*v';
    ///   general u^v = u^v*(v'*ln(u) + v*u'/u)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
    /// - Chain rule: d/dx(f(g(x))) = f'(g(x))*g'(x)
    ///
    /// The result is not simplified; see [`Expr::n_th_derivative1D`].
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x").simplify(); // 2*x
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) if !rhs.contains_variable(var) => {
                Expr::Div(Box::new(lhs.diff(var)), rhs.clone())
            }
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
                )),
                Box::new(Expr::Pow(rhs.clone(), Box::new(Expr::Const(2.0)))),
            ),
            Expr::Pow(base, exp) if !exp.contains_variable(var) => Expr::Mul(
                Box::new(Expr::Mul(
                    exp.clone(),
                    Box::new(Expr::Pow(
                        base.clone(),
                        Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                    )),
                )),
                Box::new(base.diff(var)),
            ),
            Expr::Pow(base, exp) if !base.contains_variable(var) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(self.clone()),
                    Box::new(Expr::Ln(base.clone())),
                )),
                Box::new(exp.diff(var)),
            ),
            Expr::Pow(base, exp) => Expr::Mul(
                Box::new(self.clone()),
                Box::new(Expr::Add(
                    Box::new(Expr::Mul(
                        Box::new(exp.diff(var)),
                        Box::new(Expr::Ln(base.clone())),
                    )),
                    Box::new(Expr::Div(
                        Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)))),
                        base.clone(),
                    )),
                )),
            ),
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)), expr.clone()),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::tg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::cos(expr.clone())),
                    Box::new(Expr::Const(2.0)),
                )),
            ),
            Expr::ctg(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Pow(
                    Box::new(Expr::sin(expr.clone())),
                    Box::new(Expr::Const(2.0)),
                )),
            ),
            Expr::arcsin(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            Expr::arccos(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            Expr::arctg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
            Expr::arcctg(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
        }
    } // end of diff

    /// Computes the n-th derivative, simplifying after each differentiation.
    ///
    /// # Arguments
    /// * `var_name` - Variable to differentiate with respect to
    /// * `n` - Order of derivative (0 = original function, 1 = first derivative, etc.)
    pub fn n_th_derivative1D(&self, var_name: &str, n: usize) -> Expr {
        let mut expr = self.clone();
        for _ in 0..n {
            expr = expr.diff(var_name).simplify();
        }
        expr.simplify()
    }

    /// Evaluates the expression with `var` bound to `value`.
    ///
    /// Returns `None` when the function is undefined at that point or the result is not
    /// finite. Integer exponents go through `powi`, so `x^2` at 10 is exactly 100.
    pub fn eval_expression(&self, var: &str, value: f64) -> Option<f64> {
        let val = match self {
            Expr::Var(name) => {
                if name == var {
                    value
                } else {
                    return None;
                }
            }
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => {
                lhs.eval_expression(var, value)? + rhs.eval_expression(var, value)?
            }
            Expr::Sub(lhs, rhs) => {
                lhs.eval_expression(var, value)? - rhs.eval_expression(var, value)?
            }
            Expr::Mul(lhs, rhs) => {
                lhs.eval_expression(var, value)? * rhs.eval_expression(var, value)?
            }
            Expr::Div(lhs, rhs) => {
                let num = lhs.eval_expression(var, value)?;
                let den = rhs.eval_expression(var, value)?;
                if den == 0.0 {
                    return None;
                }
                num / den
            }
            Expr::Pow(base, exp) => {
                let base = base.eval_expression(var, value)?;
                let exp = exp.eval_expression(var, value)?;
                if exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64 {
                    base.powi(exp as i32)
                } else if base < 0.0 {
                    return None;
                } else {
                    base.powf(exp)
                }
            }
            Expr::Exp(expr) => expr.eval_expression(var, value)?.exp(),
            Expr::Ln(expr) => {
                let arg = expr.eval_expression(var, value)?;
                if arg <= 0.0 {
                    return None;
                }
                arg.ln()
            }
            Expr::sin(expr) => expr.eval_expression(var, value)?.sin(),
            Expr::cos(expr) => expr.eval_expression(var, value)?.cos(),
            Expr::tg(expr) => expr.eval_expression(var, value)?.tan(),
            Expr::ctg(expr) => {
                let tan = expr.eval_expression(var, value)?.tan();
                if tan == 0.0 {
                    return None;
                }
                1.0 / tan
            }
            Expr::arcsin(expr) => {
                let arg = expr.eval_expression(var, value)?;
                if arg.abs() > 1.0 {
                    return None;
                }
                arg.asin()
            }
            Expr::arccos(expr) => {
                let arg = expr.eval_expression(var, value)?;
                if arg.abs() > 1.0 {
                    return None;
                }
                arg.acos()
            }
            Expr::arctg(expr) => expr.eval_expression(var, value)?.atan(),
            Expr::arcctg(expr) => PI / 2.0 - expr.eval_expression(var, value)?.atan(),
        };
        finite(val)
    } // end of eval_expression

    /// [`Expr::eval_expression`] for the plotting variable `x`.
    pub fn eval_at(&self, x: f64) -> Option<f64> {
        self.eval_expression(VARIABLE, x)
    }

    /// Closure evaluating the expression of one variable.
    pub fn lambdify1D(&self) -> impl Fn(f64) -> Option<f64> + '_ {
        move |x| self.eval_at(x)
    }

    /// Compares the analytical derivative with central differences on `num_values` points of
    /// [start, end]. Points where either side is undefined are skipped.
    ///
    /// # Returns
    /// Tuple of (norm of the difference, norm < max_norm)
    pub fn compare_num1D(
        &self,
        var: &str,
        start: f64,
        end: f64,
        num_values: usize,
        max_norm: f64,
    ) -> (f64, bool) {
        let diff = self.diff(var).simplify(); // analytical derivative
        let domain = linspace(start, end, num_values);
        let step = (1.0 / 1e4) * (end - start) / (num_values.max(2) as f64 - 1.0);
        let numerical = numerical_derivative(|x| self.eval_expression(var, x), &domain, step);
        let (analytical, numerical): (Vec<f64>, Vec<f64>) = domain
            .iter()
            .zip(numerical)
            .filter_map(|(&x, num)| Some((diff.eval_expression(var, x)?, num?)))
            .unzip();
        let norma_val = norm(&analytical, &numerical);
        (norma_val, max_norm > norma_val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parse_expr::parse_expression_func;
    use approx::assert_relative_eq;

    fn derivative_of(text: &str) -> String {
        parse_expression_func(text)
            .unwrap()
            .n_th_derivative1D("x", 1)
            .to_string()
    }

    #[test]
    fn test_diff_polynomials() {
        assert_eq!(derivative_of("x**2"), "2*x");
        assert_eq!(derivative_of("x"), "1");
        assert_eq!(derivative_of("5"), "0");
        assert_eq!(derivative_of("3*x"), "3");
        assert_eq!(derivative_of("x**3/3"), "x**2");
        assert_eq!(derivative_of("x**2+3*x-1"), "2*x + 3");
    }

    #[test]
    fn test_diff_functions() {
        assert_eq!(derivative_of("sin(x)"), "cos(x)");
        assert_eq!(derivative_of("cos(x)"), "-sin(x)");
        assert_eq!(derivative_of("exp(2*x)"), "2*exp(2*x)");
        assert_eq!(derivative_of("log(x)"), "1/x");
        assert_eq!(derivative_of("1/x"), "-1/x**2");
        assert_eq!(derivative_of("asin(x)"), "1/sqrt(1 - x**2)");
        assert_eq!(derivative_of("atan(x)"), "1/(x**2 + 1)");
        assert_eq!(derivative_of("acot(x)"), "-1/(x**2 + 1)");
        assert_eq!(derivative_of("x*sin(x)"), "sin(x) + x*cos(x)");
    }

    #[test]
    fn test_diff_general_power() {
        let expr = parse_expression_func("2**x").unwrap();
        let df = expr.n_th_derivative1D("x", 1);
        assert_relative_eq!(df.eval_at(1.0).unwrap(), 2.0 * 2f64.ln(), epsilon = 1e-12);
        let expr = parse_expression_func("x**x").unwrap();
        let df = expr.n_th_derivative1D("x", 1);
        // d/dx x^x = x^x (ln x + 1)
        assert_relative_eq!(df.eval_at(2.0).unwrap(), 4.0 * (2f64.ln() + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_n_th_derivative() {
        let expr = parse_expression_func("x**3").unwrap();
        assert_eq!(expr.n_th_derivative1D("x", 2).to_string(), "6*x");
        assert_eq!(expr.n_th_derivative1D("x", 3).to_string(), "6");
        assert_eq!(expr.n_th_derivative1D("x", 0).to_string(), "x**3");
    }

    #[test]
    fn test_eval_expression() {
        let expr = parse_expression_func("x**2+3*x-1").unwrap();
        assert_eq!(expr.eval_at(2.0), Some(9.0));
        assert_eq!(parse_expression_func("x**2").unwrap().eval_at(10.0), Some(100.0));
        assert_relative_eq!(
            parse_expression_func("sin(x)").unwrap().eval_at(PI / 2.0).unwrap(),
            1.0
        );
    }

    #[test]
    fn test_eval_undefined_points() {
        assert_eq!(parse_expression_func("1/x").unwrap().eval_at(0.0), None);
        assert_eq!(parse_expression_func("log(x)").unwrap().eval_at(0.0), None);
        assert_eq!(parse_expression_func("log(x)").unwrap().eval_at(-1.0), None);
        assert_eq!(parse_expression_func("sqrt(x)").unwrap().eval_at(-4.0), None);
        assert_eq!(parse_expression_func("asin(x)").unwrap().eval_at(2.0), None);
        assert_eq!(parse_expression_func("exp(x)").unwrap().eval_at(1000.0), None);
        assert_eq!(parse_expression_func("cot(x)").unwrap().eval_at(0.0), None);
        // negative base with integer exponent is fine
        assert_eq!(parse_expression_func("x**3").unwrap().eval_at(-2.0), Some(-8.0));
        assert_eq!(parse_expression_func("sqrt(x)").unwrap().eval_at(4.0), Some(2.0));
    }

    #[test]
    fn test_compare_num1D() {
        for text in ["x**3 - 2*x", "sin(x)*exp(x)", "log(x)/x", "atan(x)", "x**x"] {
            let expr = parse_expression_func(text).unwrap();
            let (norm, ok) = expr.compare_num1D("x", 0.5, 3.0, 50, 1e-4);
            assert!(ok, "{}: norm {}", text, norm);
        }
    }
}
