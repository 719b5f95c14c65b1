//! Rule-based indefinite integration.
//!
//! `integrate(var)` recognises constants, the power rule (including `1/x`), linearity,
//! constant factors, `exp`/`log`/trigonometric/inverse trigonometric functions of a linear
//! argument `a*x + b`, `c^(a*x + b)`, `x^n*exp(a*x)`, `x^n*log(x)`, `x^n*sin(a*x + b)` and
//! `x^n*cos(a*x + b)` (integration by parts) and `f'(x)/f(x)`. Products and integer powers
//! of sums that match no rule are multiplied out and integrated term by term, so
//! `(x + 1)*(x - 1)` integrates as `x**2 - 1`. Anything else is reported as `Err` with a
//! short reason; the caller decides how to show an integral that could not be taken.
use crate::symbolic::symbolic_engine::Expr;

// highest power n taken through repeated integration by parts
const MAX_BY_PARTS_DEGREE: f64 = 20.0;

/// a and b of `a*x + b` when the expression has that shape (a may be zero).
fn linear_coefficients(expr: &Expr, var: &str) -> Option<(f64, f64)> {
    match expr {
        Expr::Var(x) if x == var => Some((1.0, 0.0)),
        Expr::Const(c) => Some((0.0, *c)),
        Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(k), inner) | (inner, Expr::Const(k)) => {
                let (a, b) = linear_coefficients(inner, var)?;
                Some((k * a, k * b))
            }
            _ => None,
        },
        Expr::Div(lhs, rhs) => match rhs.as_ref() {
            Expr::Const(d) if *d != 0.0 => {
                let (a, b) = linear_coefficients(lhs, var)?;
                Some((a / d, b / d))
            }
            _ => None,
        },
        Expr::Add(lhs, rhs) => {
            let (a1, b1) = linear_coefficients(lhs, var)?;
            let (a2, b2) = linear_coefficients(rhs, var)?;
            Some((a1 + a2, b1 + b2))
        }
        Expr::Sub(lhs, rhs) => {
            let (a1, b1) = linear_coefficients(lhs, var)?;
            let (a2, b2) = linear_coefficients(rhs, var)?;
            Some((a1 - a2, b1 - b2))
        }
        _ => None,
    }
}

/// Slope of a linear argument, `None` for constant or non-linear arguments.
fn linear_slope(expr: &Expr, var: &str) -> Option<f64> {
    match linear_coefficients(expr, var) {
        Some((a, _)) if a != 0.0 => Some(a),
        _ => None,
    }
}

fn divide_by_slope(primitive: Expr, a: f64) -> Expr {
    if a == 1.0 {
        primitive
    } else {
        primitive / Expr::Const(a)
    }
}

impl Expr {
    /// SYMBOLIC INTEGRATION

    /// Main integration method - integrates with respect to a variable
    /// Returns the indefinite integral (without constant of integration), not simplified.
    pub fn integrate(&self, var: &str) -> Result<Expr, String> {
        // ∫ c dx = c*x, also for constant-valued subtrees such as exp(2)
        if !self.contains_variable(var) {
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }
        match self {
            // ∫ x dx = x²/2
            Expr::Var(_) => Ok(Expr::Var(var.to_string()).pow(Expr::Const(2.0)) / Expr::Const(2.0)),

            // ∫ (f + g) dx = ∫ f dx + ∫ g dx
            Expr::Add(lhs, rhs) => Ok(lhs.integrate(var)? + rhs.integrate(var)?),

            // ∫ (f - g) dx = ∫ f dx - ∫ g dx
            Expr::Sub(lhs, rhs) => Ok(lhs.integrate(var)? - rhs.integrate(var)?),

            Expr::Mul(lhs, rhs) => self
                .integrate_multiplication(lhs, rhs, var)
                .or_else(|e| self.integrate_expanded(var).ok_or(e)),
            Expr::Div(lhs, rhs) => self
                .integrate_division(lhs, rhs, var)
                .or_else(|e| self.integrate_expanded(var).ok_or(e)),
            Expr::Pow(base, exp) => self
                .integrate_power(base, exp, var)
                .or_else(|e| self.integrate_expanded(var).ok_or(e)),

            // exp, log, trigonometric and inverse trigonometric functions
            _ => self.integrate_function(var),
        }
    }

    /// Multiplication: constant factors, then integration by parts patterns
    fn integrate_multiplication(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        if !lhs.contains_variable(var) {
            return Ok(lhs.clone() * rhs.integrate(var)?);
        }
        if !rhs.contains_variable(var) {
            return Ok(rhs.clone() * lhs.integrate(var)?);
        }

        // x^n * exp(a*x), either order
        if let Some(result) = self.integrate_polynomial_times_exponential(lhs, rhs, var) {
            return Ok(result);
        }
        if let Some(result) = self.integrate_polynomial_times_exponential(rhs, lhs, var) {
            return Ok(result);
        }

        // x^n * ln(x), either order
        if let Some(result) = self.integrate_polynomial_times_logarithm(lhs, rhs, var) {
            return Ok(result);
        }
        if let Some(result) = self.integrate_polynomial_times_logarithm(rhs, lhs, var) {
            return Ok(result);
        }

        // x^n * sin(a*x + b) and x^n * cos(a*x + b), either order
        if let Some(result) = self.integrate_polynomial_times_trigonometric(lhs, rhs, var) {
            return Ok(result);
        }
        if let Some(result) = self.integrate_polynomial_times_trigonometric(rhs, lhs, var) {
            return Ok(result);
        }

        Err(format!("Cannot integrate product: {} * {}", lhs, rhs))
    }

    /// Multiplies out products and powers of sums and integrates the result term by term.
    /// `None` when expanding does not turn the expression into a sum.
    fn integrate_expanded(&self, var: &str) -> Option<Expr> {
        let expanded = self.expand().simplify();
        match expanded {
            Expr::Add(..) | Expr::Sub(..) => expanded.integrate(var).ok(),
            _ => None,
        }
    }

    /// Handle division in integration
    fn integrate_division(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ f(x)/c dx = (∫ f(x) dx)/c
        if !rhs.contains_variable(var) {
            return Ok(lhs.integrate(var)? / rhs.clone());
        }

        if !lhs.contains_variable(var) {
            // ∫ c/(a*x + b) dx = c*ln(a*x + b)/a
            if let Some(a) = linear_slope(rhs, var) {
                return Ok(lhs.clone() * divide_by_slope(rhs.clone().ln(), a));
            }
            // ∫ c/u^n dx = c * ∫ u^(-n) dx
            if let Expr::Pow(base, exp) = rhs {
                if let Expr::Const(n) = exp.as_ref() {
                    let reciprocal = Expr::Pow(base.clone(), Box::new(Expr::Const(-n)));
                    return Ok(lhs.clone() * reciprocal.integrate(var)?);
                }
            }
        }

        // ∫ f'(x)/f(x) dx = ln(f(x))
        if rhs.diff(var).simplify() == lhs.simplify() {
            return Ok(rhs.clone().ln());
        }

        Err(format!("Cannot integrate division: {} / {}", lhs, rhs))
    }

    /// Handle power integration
    fn integrate_power(&self, base: &Expr, exp: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ (a*x + b)^n dx
        if let (Some(a), Expr::Const(n)) = (linear_slope(base, var), exp) {
            if *n == -1.0 {
                // ∫ (a*x + b)^(-1) dx = ln(a*x + b)/a
                return Ok(divide_by_slope(base.clone().ln(), a));
            }
            // ∫ (a*x + b)^n dx = (a*x + b)^(n+1)/(a*(n+1))
            let new_exp = n + 1.0;
            return Ok(base.clone().pow(Expr::Const(new_exp)) / Expr::Const(a * new_exp));
        }

        // ∫ c^(a*x + b) dx = c^(a*x + b)/(a*ln(c))
        if let (Expr::Const(c), Some(a)) = (base, linear_slope(exp, var)) {
            if *c > 0.0 && *c != 1.0 {
                let log_c = Expr::Ln(Box::new(Expr::Const(*c)));
                let denominator = if a == 1.0 {
                    log_c
                } else {
                    Expr::Const(a) * log_c
                };
                return Ok(self.clone() / denominator);
            }
        }

        Err(format!("Cannot integrate power: ({})^({})", base, exp))
    }

    /// ∫ f(a*x + b) dx = F(a*x + b)/a for every unary function with a known primitive F
    fn integrate_function(&self, var: &str) -> Result<Expr, String> {
        let (name, arg) = self
            .function_parts()
            .ok_or_else(|| format!("Cannot integrate {}", self))?;
        let a = linear_slope(arg, var)
            .ok_or_else(|| format!("Cannot integrate {}: argument is not linear", self))?;
        let u = arg.clone();
        let one_plus_u_squared = u.clone().pow(Expr::Const(2.0)) + Expr::Const(1.0);
        let sqrt_one_minus_u_squared =
            (Expr::Const(1.0) - u.clone().pow(Expr::Const(2.0))).sqrt();
        let primitive = match self {
            // ∫ e^u du = e^u
            Expr::Exp(_) => self.clone(),
            // ∫ ln(u) du = u*ln(u) - u
            Expr::Ln(_) => u.clone() * self.clone() - u,
            // ∫ sin(u) du = -cos(u)
            Expr::sin(_) => -Expr::cos(Box::new(u)),
            // ∫ cos(u) du = sin(u)
            Expr::cos(_) => Expr::sin(Box::new(u)),
            // ∫ tan(u) du = -ln(cos(u))
            Expr::tg(_) => -Expr::cos(Box::new(u)).ln(),
            // ∫ cot(u) du = ln(sin(u))
            Expr::ctg(_) => Expr::sin(Box::new(u)).ln(),
            // ∫ arcsin(u) du = u*arcsin(u) + sqrt(1 - u²)
            Expr::arcsin(_) => u * self.clone() + sqrt_one_minus_u_squared,
            // ∫ arccos(u) du = u*arccos(u) - sqrt(1 - u²)
            Expr::arccos(_) => u * self.clone() - sqrt_one_minus_u_squared,
            // ∫ arctan(u) du = u*arctan(u) - ln(1 + u²)/2
            Expr::arctg(_) => u * self.clone() - one_plus_u_squared.ln() / Expr::Const(2.0),
            // ∫ arccot(u) du = u*arccot(u) + ln(1 + u²)/2
            Expr::arcctg(_) => u * self.clone() + one_plus_u_squared.ln() / Expr::Const(2.0),
            _ => return Err(format!("Cannot integrate {} ({})", self, name)),
        };
        Ok(divide_by_slope(primitive, a))
    }

    /// Handle x^n * exp(ax) integration using recursive integration by parts
    fn integrate_polynomial_times_exponential(
        &self,
        poly: &Expr,
        exp: &Expr,
        var: &str,
    ) -> Option<Expr> {
        if let Expr::Exp(exp_inner) = exp {
            let n = Self::extract_power_from_polynomial(poly, var)?;
            let a = match linear_coefficients(exp_inner, var) {
                Some((a, b)) if a != 0.0 && b == 0.0 => a,
                _ => return None,
            };
            return Some(Self::integrate_xn_times_exp_ax(n, a, exp_inner, var));
        }
        None
    }

    /// Integrate x^n * exp(ax) using the recursive formula
    /// ∫ x^n * e^(ax) dx = (1/a) * x^n * e^(ax) - (n/a) * ∫ x^(n-1) * e^(ax) dx
    fn integrate_xn_times_exp_ax(n: i32, a: f64, exponent: &Expr, var: &str) -> Expr {
        let exp_ax = Expr::Exp(Box::new(exponent.clone()));
        if n == 0 {
            return divide_by_slope(exp_ax, a);
        }

        let x = Expr::Var(var.to_string());
        let xn = if n == 1 {
            x
        } else {
            x.pow(Expr::Const(n as f64))
        };

        // First term: (1/a) * x^n * e^(ax)
        let first_term = divide_by_slope(xn * exp_ax, a);

        // Second term: (n/a) * ∫ x^(n-1) * e^(ax) dx
        let second_term = (Expr::Const(n as f64) / Expr::Const(a))
            * Self::integrate_xn_times_exp_ax(n - 1, a, exponent, var);

        first_term - second_term
    }

    /// Handle x^n * sin(a*x + b) and x^n * cos(a*x + b)
    fn integrate_polynomial_times_trigonometric(
        &self,
        poly: &Expr,
        trig: &Expr,
        var: &str,
    ) -> Option<Expr> {
        let (sine, arg) = match trig {
            Expr::sin(arg) => (true, arg.as_ref()),
            Expr::cos(arg) => (false, arg.as_ref()),
            _ => return None,
        };
        let n = Self::extract_power_from_polynomial(poly, var)?;
        let a = linear_slope(arg, var)?;
        Some(Self::integrate_xn_times_trig(n, a, arg, sine, var))
    }

    /// Repeated integration by parts, with u = a*x + b:
    /// ∫ x^n sin(u) dx = -x^n cos(u)/a + (n/a) ∫ x^(n-1) cos(u) dx
    /// ∫ x^n cos(u) dx = x^n sin(u)/a - (n/a) ∫ x^(n-1) sin(u) dx
    fn integrate_xn_times_trig(n: i32, a: f64, arg: &Expr, sine: bool, var: &str) -> Expr {
        let sin_u = Expr::sin(Box::new(arg.clone()));
        let cos_u = Expr::cos(Box::new(arg.clone()));
        if n == 0 {
            return if sine {
                divide_by_slope(-cos_u, a)
            } else {
                divide_by_slope(sin_u, a)
            };
        }

        let x = Expr::Var(var.to_string());
        let xn = if n == 1 {
            x
        } else {
            x.pow(Expr::Const(n as f64))
        };
        let rest = (Expr::Const(n as f64) / Expr::Const(a))
            * Self::integrate_xn_times_trig(n - 1, a, arg, !sine, var);
        if sine {
            divide_by_slope(-(xn * cos_u), a) + rest
        } else {
            divide_by_slope(xn * sin_u, a) - rest
        }
    }

    /// Handle x^n * ln(x) integration using integration by parts
    fn integrate_polynomial_times_logarithm(
        &self,
        poly: &Expr,
        ln_expr: &Expr,
        var: &str,
    ) -> Option<Expr> {
        if let Expr::Ln(ln_inner) = ln_expr {
            if let Expr::Var(x) = ln_inner.as_ref() {
                if x == var {
                    let n = Self::extract_power_from_polynomial(poly, var)?;
                    return Some(Self::integrate_xn_times_ln_x(n, var));
                }
            }
        }
        None
    }

    /// Extract power n from x^n (n a non-negative integer, at most MAX_BY_PARTS_DEGREE)
    fn extract_power_from_polynomial(poly: &Expr, var: &str) -> Option<i32> {
        match poly {
            Expr::Var(x) if x == var => Some(1),
            Expr::Pow(base, exp) => match (base.as_ref(), exp.as_ref()) {
                (Expr::Var(x), Expr::Const(power))
                    if x == var
                        && power.fract() == 0.0
                        && (0.0..=MAX_BY_PARTS_DEGREE).contains(power) =>
                {
                    Some(*power as i32)
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Integrate x^n * ln(x) using integration by parts
    /// ∫ x^n * ln(x) dx = x^(n+1) * [ln(x)/(n+1) - 1/(n+1)²]
    fn integrate_xn_times_ln_x(n: i32, var: &str) -> Expr {
        let x = Expr::Var(var.to_string());
        let n_plus_1 = (n + 1) as f64;
        let x_power = x.clone().pow(Expr::Const(n_plus_1));
        let term1 = x_power.clone() * x.ln() / Expr::Const(n_plus_1);
        let term2 = x_power / Expr::Const(n_plus_1 * n_plus_1);
        term1 - term2
    }

    /// Definite integration using the fundamental theorem of calculus
    pub fn definite_integrate(&self, var: &str, lower: f64, upper: f64) -> Result<f64, String> {
        let indefinite = self.integrate(var)?;
        let upper_val = indefinite
            .eval_expression(var, upper)
            .ok_or_else(|| format!("antiderivative is undefined at {}", upper))?;
        let lower_val = indefinite
            .eval_expression(var, lower)
            .ok_or_else(|| format!("antiderivative is undefined at {}", lower))?;
        Ok(upper_val - lower_val)
    }

    /// Simpson's rule on `n` intervals (rounded up to an even number).
    /// `None` if the integrand is undefined at one of the nodes.
    pub fn numerical_integrate(&self, lower: f64, upper: f64, n: usize) -> Option<f64> {
        let n = (n.max(2) + 1) / 2 * 2;
        let h = (upper - lower) / (n as f64);
        let f = self.lambdify1D();

        let mut sum = f(lower)? + f(upper)?;
        for i in 1..n {
            let x = lower + (i as f64) * h;
            let weight = if i % 2 == 0 { 2.0 } else { 4.0 };
            sum += weight * f(x)?;
        }
        Some(sum * h / 3.0)
    }
}
