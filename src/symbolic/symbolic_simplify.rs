//! # Symbolic Expression Simplification Module
//!
//! Algebraic clean-up of expression trees produced by differentiation and integration, so
//! that results read the way a person would write them (`2*x`, not `2*x**(2 - 1)*1`).
//!
//! ## Simplification Strategy
//!
//! `simplify_()` works bottom-up: children are simplified first, then one of the
//! `combine_*` rules rebuilds the node from already simplified operands.
//!
//! 1. **Constant Folding**: `2 + 3 -> 5`; division and fractional powers are folded only
//!    when the result is an integer, so `1/3` stays exact
//! 2. **Algebraic Identities**: `x + 0`, `x - x`, `x*1`, `x*0`, `x**1`, `x**0`
//! 3. **Coefficient Collection**: `2*(3*x) -> 6*x`, `(3*x**2)/3 -> x**2`. Sums are
//!    flattened into `(coefficient, term)` pairs with exact fractional coefficients, like
//!    terms are merged and numeric multiples of a sum are distributed, so
//!    `(x - 1) + (x + 1) -> 2*x` and `x/2 + x/3 -> 5*x/6`
//! 4. **Power Rules**: `x*x -> x**2`, `x**a*x**b -> x**(a + b)`, `x**(-2) -> 1/x**2`
//! 5. **Canonical Order**: numeric factors first (`3*x`), numeric terms last (`x + 1`),
//!    `a + (-b)` written as `a - b`
//!
//! `simplify()` repeats the pass until the tree stops changing. [`Expr::expand`] multiplies
//! out products and small integer powers of sums; it is not part of `simplify()` and is
//! used by integration.

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::E;

// upper bound on repeated passes in simplify()
const MAX_PASSES: usize = 8;

fn is_integral(val: f64) -> bool {
    val.is_finite() && val.fract() == 0.0
}

// integers above this are no longer exact in f64
const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
// expand() leaves products that would have more terms than this
const MAX_EXPANDED_TERMS: usize = 64;
// largest integer power of a sum that expand() multiplies out
const MAX_EXPANDED_POWER: f64 = 8.0;

fn gcd(a: f64, b: f64) -> f64 {
    let (mut a, mut b) = (a, b);
    while b != 0.0 {
        let t = a % b;
        a = b;
        b = t;
    }
    if a == 0.0 { 1.0 } else { a }
}

/// Coefficient of a term, kept as an exact fraction while numerator and denominator are
/// integers and as a plain float (`den == 1`) otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Ratio {
    num: f64,
    den: f64,
}

impl Ratio {
    const ONE: Ratio = Ratio { num: 1.0, den: 1.0 };
    const MINUS_ONE: Ratio = Ratio { num: -1.0, den: 1.0 };

    fn new(num: f64, den: f64) -> Ratio {
        let exact = is_integral(num) && is_integral(den) && den != 0.0;
        if exact && num.abs() < EXACT_LIMIT && den.abs() < EXACT_LIMIT {
            let g = gcd(num.abs(), den.abs());
            let sign = if den < 0.0 { -1.0 } else { 1.0 };
            Ratio {
                num: sign * num / g,
                den: sign * den / g,
            }
        } else {
            Ratio {
                num: num / den,
                den: 1.0,
            }
        }
    }

    fn add(self, other: Ratio) -> Ratio {
        Ratio::new(self.num * other.den + other.num * self.den, self.den * other.den)
    }

    fn mul(self, other: Ratio) -> Ratio {
        Ratio::new(self.num * other.num, self.den * other.den)
    }

    fn is_negative(self) -> bool {
        self.num < 0.0
    }

    fn abs(self) -> Ratio {
        Ratio {
            num: self.num.abs(),
            den: self.den,
        }
    }
}

/// Splits a term into its numeric coefficient and the remaining factor; `None` stands for
/// a purely numeric term. `3*x**2/2` gives `(3/2, x**2)`, `-1/x` gives `(-1, 1/x)`.
fn split_term(expr: &Expr) -> (Ratio, Option<Expr>) {
    match expr {
        Expr::Const(c) => (Ratio::new(*c, 1.0), None),
        Expr::Mul(lhs, rhs) => match split_term(lhs) {
            (ratio, None) => {
                let (inner, rest) = split_term(rhs);
                (ratio.mul(inner), rest)
            }
            _ => (Ratio::ONE, Some(expr.clone())),
        },
        Expr::Div(num, den) => match (num.as_ref(), den.as_ref()) {
            (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => (Ratio::new(*a, *b), None),
            (_, Expr::Const(d)) if *d != 0.0 && d.is_finite() => {
                let (ratio, rest) = split_term(num);
                (ratio.mul(Ratio::new(1.0, *d)), rest)
            }
            (Expr::Const(a), _) if *a != 1.0 => (
                Ratio::new(*a, 1.0),
                Some(Expr::Div(Box::new(Expr::Const(1.0)), den.clone())),
            ),
            _ => (Ratio::ONE, Some(expr.clone())),
        },
        _ => (Ratio::ONE, Some(expr.clone())),
    }
}

/// Flattens a sum into `terms`, merging like terms as it goes.
fn collect_terms(expr: &Expr, factor: Ratio, terms: &mut Vec<(Ratio, Option<Expr>)>) {
    match expr {
        Expr::Add(lhs, rhs) => {
            collect_terms(lhs, factor, terms);
            collect_terms(rhs, factor, terms);
        }
        Expr::Sub(lhs, rhs) => {
            collect_terms(lhs, factor, terms);
            collect_terms(rhs, factor.mul(Ratio::MINUS_ONE), terms);
        }
        _ => {
            let (ratio, rest) = split_term(expr);
            let ratio = factor.mul(ratio);
            // numeric multiples of a sum are distributed: 2*(x + 1) = 2*x + 2
            if let Some(sum @ (Expr::Add(..) | Expr::Sub(..))) = &rest {
                collect_terms(sum, ratio, terms);
                return;
            }
            match terms.iter_mut().find(|(_, term)| *term == rest) {
                Some((existing, _)) => *existing = existing.add(ratio),
                None => terms.push((ratio, rest)),
            }
        }
    }
}

/// Top-level terms of a sum with their signs; anything else is a single term.
fn summands(expr: &Expr) -> Vec<(bool, Expr)> {
    fn walk(expr: &Expr, negative: bool, out: &mut Vec<(bool, Expr)>) {
        match expr {
            Expr::Add(lhs, rhs) => {
                walk(lhs, negative, out);
                walk(rhs, negative, out);
            }
            Expr::Sub(lhs, rhs) => {
                walk(lhs, negative, out);
                walk(rhs, !negative, out);
            }
            _ => out.push((negative, expr.clone())),
        }
    }
    let mut out = Vec::new();
    walk(expr, false, &mut out);
    out
}

fn sum_of(terms: Vec<(bool, Expr)>) -> Expr {
    let mut iter = terms.into_iter();
    let mut acc = match iter.next() {
        Some((true, term)) => -term,
        Some((false, term)) => term,
        None => return Expr::Const(0.0),
    };
    for (negative, term) in iter {
        acc = if negative {
            Expr::Sub(Box::new(acc), Box::new(term))
        } else {
            Expr::Add(Box::new(acc), Box::new(term))
        };
    }
    acc
}

/// `lhs * rhs` with both sides multiplied out term by term.
fn distribute(lhs: Expr, rhs: Expr) -> Expr {
    let left = summands(&lhs);
    let right = summands(&rhs);
    if (left.len() == 1 && right.len() == 1) || left.len() * right.len() > MAX_EXPANDED_TERMS {
        return Expr::Mul(Box::new(lhs), Box::new(rhs));
    }
    let mut products = Vec::with_capacity(left.len() * right.len());
    for (neg_l, l) in &left {
        for (neg_r, r) in &right {
            products.push((neg_l != neg_r, distribute(l.clone(), r.clone())));
        }
    }
    sum_of(products)
}

/// `x` or `x**n`: written before function factors, as in `x*cos(x)`.
fn is_monomial(expr: &Expr) -> bool {
    match expr {
        Expr::Var(_) => true,
        Expr::Pow(base, exp) => matches!(
            (base.as_ref(), exp.as_ref()),
            (Expr::Var(_), Expr::Const(_))
        ),
        _ => false,
    }
}

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// One bottom-up simplification pass.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let expr = Expr::Const(2.0) * x.clone().pow(Expr::Const(2.0) - Expr::Const(1.0)) * Expr::Const(1.0);
    /// assert_eq!(expr.simplify_().to_string(), "2*x");
    /// ```
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Self::combine_add(lhs.simplify_(), rhs.simplify_()),
            Expr::Sub(lhs, rhs) => Self::combine_sub(lhs.simplify_(), rhs.simplify_()),
            Expr::Mul(lhs, rhs) => Self::combine_mul(lhs.simplify_(), rhs.simplify_()),
            Expr::Div(lhs, rhs) => Self::combine_div(lhs.simplify_(), rhs.simplify_()),
            Expr::Pow(base, exp) => Self::combine_pow(base.simplify_(), exp.simplify_()),
            Expr::Exp(arg) => match arg.simplify_() {
                Expr::Const(0.0) => Expr::Const(1.0),
                Expr::Ln(inner) => *inner,
                arg => Expr::Exp(Box::new(arg)),
            },
            Expr::Ln(arg) => match arg.simplify_() {
                Expr::Const(1.0) => Expr::Const(0.0),
                Expr::Const(c) if c == E => Expr::Const(1.0),
                Expr::Exp(inner) => *inner,
                arg => Expr::Ln(Box::new(arg)),
            },
            Expr::cos(arg) => match arg.simplify_() {
                Expr::Const(0.0) => Expr::Const(1.0),
                arg => Expr::cos(Box::new(arg)),
            },
            // odd functions vanishing at zero
            Expr::sin(arg) | Expr::tg(arg) | Expr::arcsin(arg) | Expr::arctg(arg) => {
                match arg.simplify_() {
                    Expr::Const(0.0) => Expr::Const(0.0),
                    arg => self.with_argument(arg),
                }
            }
            Expr::ctg(arg) | Expr::arccos(arg) | Expr::arcctg(arg) => {
                self.with_argument(arg.simplify_())
            }
        }
    }

    /// Repeats [`Expr::simplify_`] until a fixed point (bounded number of passes).
    pub fn simplify(&self) -> Expr {
        let mut current = self.simplify_();
        for _ in 1..MAX_PASSES {
            let next = current.simplify_();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Multiplies out products and small positive integer powers of sums, and divides
    /// each term of a sum by a common denominator. The result is not simplified.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = parse_expression_func("(x + 1)*(x - 1)").unwrap();
    /// assert_eq!(expr.expand().simplify().to_string(), "x**2 - 1");
    /// ```
    pub fn expand(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(lhs.expand().boxed(), rhs.expand().boxed()),
            Expr::Sub(lhs, rhs) => Expr::Sub(lhs.expand().boxed(), rhs.expand().boxed()),
            Expr::Mul(lhs, rhs) => distribute(lhs.expand(), rhs.expand()),
            Expr::Div(lhs, rhs) => {
                let num = lhs.expand();
                let den = rhs.expand();
                let terms = summands(&num);
                if terms.len() == 1 || terms.len() > MAX_EXPANDED_TERMS {
                    return Expr::Div(num.boxed(), den.boxed());
                }
                sum_of(
                    terms
                        .into_iter()
                        .map(|(negative, term)| (negative, Expr::Div(term.boxed(), den.clone().boxed())))
                        .collect(),
                )
            }
            Expr::Pow(base, exp) => {
                let base = base.expand();
                match exp.as_ref() {
                    Expr::Const(n)
                        if is_integral(*n)
                            && (2.0..=MAX_EXPANDED_POWER).contains(n)
                            && summands(&base).len() > 1 =>
                    {
                        let mut product = base.clone();
                        for _ in 1..(*n as usize) {
                            product = distribute(product, base.clone());
                        }
                        product
                    }
                    _ => Expr::Pow(base.boxed(), exp.expand().boxed()),
                }
            }
            _ => match self.function_parts() {
                Some((_, arg)) => self.with_argument(arg.expand()),
                None => self.clone(),
            },
        }
    }

    /// Rebuilds one collected term in the shape the other rules produce.
    fn rebuild_term(ratio: Ratio, term: Option<Expr>) -> Expr {
        let scaled = Self::combine_mul(Expr::Const(ratio.num), term.unwrap_or(Expr::Const(1.0)));
        if ratio.den == 1.0 {
            scaled
        } else {
            Self::combine_div(scaled, Expr::Const(ratio.den))
        }
    }

    /// Collects like terms of a sum: first-seen order, the numeric term last, and a
    /// positive term in front when there is one (`1 - x**2`, not `-x**2 + 1`).
    fn combine_sum(sum: Expr) -> Expr {
        let mut collected = Vec::new();
        collect_terms(&sum, Ratio::ONE, &mut collected);
        let mut terms: Vec<(Ratio, Option<Expr>)> =
            collected.into_iter().filter(|(ratio, _)| ratio.num != 0.0).collect();
        if let Some(i) = terms.iter().position(|(_, term)| term.is_none()) {
            let constant = terms.remove(i);
            terms.push(constant);
        }
        if terms.first().is_some_and(|(ratio, _)| ratio.is_negative()) {
            if let Some(i) = terms.iter().position(|(ratio, _)| !ratio.is_negative()) {
                let positive = terms.remove(i);
                terms.insert(0, positive);
            }
        }

        let mut iter = terms.into_iter();
        let mut acc = match iter.next() {
            Some((ratio, term)) => Self::rebuild_term(ratio, term),
            None => return Expr::Const(0.0),
        };
        for (ratio, term) in iter {
            acc = if ratio.is_negative() {
                Expr::Sub(Box::new(acc), Box::new(Self::rebuild_term(ratio.abs(), term)))
            } else {
                Expr::Add(Box::new(acc), Box::new(Self::rebuild_term(ratio, term)))
            };
        }
        acc
    }

    fn combine_add(lhs: Expr, rhs: Expr) -> Expr {
        Self::combine_sum(Expr::Add(Box::new(lhs), Box::new(rhs)))
    }

    fn combine_sub(lhs: Expr, rhs: Expr) -> Expr {
        Self::combine_sum(Expr::Sub(Box::new(lhs), Box::new(rhs)))
    }

    fn combine_mul(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b), // (a) * (b) = (a * b)
            (Expr::Const(0.0), _) | (_, Expr::Const(0.0)) => Expr::Const(0.0), // 0 * x = 0
            (Expr::Const(1.0), _) => rhs,                           // 1 * x = x
            (_, Expr::Const(1.0)) => lhs,                           // x * 1 = x
            (_, Expr::Const(_)) => Self::combine_mul(rhs, lhs),     // x * c = c * x
            // c2 * (c1 * x) = (c2 * c1) * x
            (Expr::Const(c), Expr::Mul(inner_lhs, inner_rhs))
                if matches!(inner_lhs.as_ref(), Expr::Const(_)) =>
            {
                let c1 = match inner_lhs.as_ref() {
                    Expr::Const(c1) => *c1,
                    _ => 1.0,
                };
                Self::combine_mul(Expr::Const(c * c1), inner_rhs.as_ref().clone())
            }
            (Expr::Const(c), Expr::Div(num, den)) => match (num.as_ref(), den.as_ref()) {
                // c * (a / x) = (c * a) / x
                (Expr::Const(a), _) => Self::combine_div(Expr::Const(c * a), den.as_ref().clone()),
                // 6 * (x / 3) = 2 * x
                (_, Expr::Const(d)) if is_integral(c / d) => {
                    Self::combine_mul(Expr::Const(c / d), num.as_ref().clone())
                }
                _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
            },
            // (a / b) * x = (a * x) / b for numbers a, b
            (Expr::Div(num, den), _)
                if matches!((num.as_ref(), den.as_ref()), (Expr::Const(_), Expr::Const(_))) =>
            {
                let scaled = Self::combine_mul(num.as_ref().clone(), rhs);
                Self::combine_div(scaled, den.as_ref().clone())
            }
            (_, Expr::Div(num, den))
                if matches!((num.as_ref(), den.as_ref()), (Expr::Const(_), Expr::Const(_))) =>
            {
                Self::combine_mul(rhs, lhs)
            }
            // pull numeric factors to the front: (c * a) * b = c * (a * b)
            (Expr::Mul(inner_lhs, inner_rhs), _) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
                let rest = Self::combine_mul(inner_rhs.as_ref().clone(), rhs);
                Self::combine_mul(inner_lhs.as_ref().clone(), rest)
            }
            // a * (c * b) = c * (a * b)
            (_, Expr::Mul(inner_lhs, inner_rhs)) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
                let rest = Self::combine_mul(lhs, inner_rhs.as_ref().clone());
                Self::combine_mul(inner_lhs.as_ref().clone(), rest)
            }
            // x^a * x^b = x^(a + b)
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                let exp = Self::combine_add(exp1.as_ref().clone(), exp2.as_ref().clone());
                Self::combine_pow(base1.as_ref().clone(), exp)
            }
            // x * x^a = x^(a + 1)
            (_, Expr::Pow(base, exp)) if **base == lhs => {
                let exp = Self::combine_add(exp.as_ref().clone(), Expr::Const(1.0));
                Self::combine_pow(lhs, exp)
            }
            (Expr::Pow(base, exp), _) if **base == rhs => {
                let exp = Self::combine_add(exp.as_ref().clone(), Expr::Const(1.0));
                Self::combine_pow(rhs, exp)
            }
            _ if lhs == rhs => Expr::Pow(Box::new(lhs), Box::new(Expr::Const(2.0))), // x * x = x^2
            _ if lhs.function_parts().is_some() && is_monomial(&rhs) => {
                Expr::Mul(Box::new(rhs), Box::new(lhs)) // cos(x) * x = x * cos(x)
            }
            _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn combine_div(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            // left as is, evaluates to undefined
            (_, Expr::Const(0.0)) => Expr::Div(Box::new(lhs), Box::new(rhs)),
            (Expr::Const(a), Expr::Const(b)) if is_integral(a / b) => Expr::Const(a / b),
            (Expr::Const(0.0), _) => Expr::Const(0.0), // 0 / x = 0
            (_, Expr::Const(1.0)) => lhs,              // x / 1 = x
            (_, Expr::Const(-1.0)) => Self::combine_mul(Expr::Const(-1.0), lhs),
            // x / (-d) = -(x / d)
            (_, Expr::Const(d)) if *d < 0.0 => {
                let quotient = Self::combine_div(lhs, Expr::Const(-*d));
                Self::combine_mul(Expr::Const(-1.0), quotient)
            }
            (Expr::Const(_), Expr::Const(_)) => Expr::Div(Box::new(lhs), Box::new(rhs)),
            _ if lhs == rhs => Expr::Const(1.0), // x / x = 1
            // (c * x) / d
            (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(d)) => match inner_lhs.as_ref() {
                Expr::Const(c) if is_integral(c / d) => {
                    Self::combine_mul(Expr::Const(c / d), inner_rhs.as_ref().clone())
                }
                Expr::Const(c) => Expr::Mul(
                    Box::new(Expr::Const(*c)),
                    Box::new(Self::combine_div(inner_rhs.as_ref().clone(), rhs.clone())),
                ),
                _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
            },
            // (a / b) / c = a / (b * c)
            (Expr::Div(num, den), _) => {
                let den = Self::combine_mul(den.as_ref().clone(), rhs);
                Self::combine_div(num.as_ref().clone(), den)
            }
            // x^a / x^b = x^(a - b)
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                let exp = Self::combine_sub(exp1.as_ref().clone(), exp2.as_ref().clone());
                Self::combine_pow(base1.as_ref().clone(), exp)
            }
            // x / x^a = x^(1 - a)
            (_, Expr::Pow(base, exp)) if **base == lhs => {
                let exp = Self::combine_sub(Expr::Const(1.0), exp.as_ref().clone());
                Self::combine_pow(lhs, exp)
            }
            // x^a / x = x^(a - 1)
            (Expr::Pow(base, exp), _) if **base == rhs => {
                let exp = Self::combine_sub(exp.as_ref().clone(), Expr::Const(1.0));
                Self::combine_pow(rhs, exp)
            }
            _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn combine_pow(base: Expr, exp: Expr) -> Expr {
        match (&base, &exp) {
            (Expr::Const(e), _) if *e == E => Expr::Exp(Box::new(exp)), // E ^ u = exp(u)
            (Expr::Const(a), Expr::Const(b)) if is_integral(*b) && a.powi(*b as i32).is_finite() => {
                Expr::Const(a.powi(*b as i32)) // (a) ^ (b) = (a ^ b)
            }
            // 4 ^ 0.5 = 2, 2 ^ 0.5 stays
            (Expr::Const(a), Expr::Const(b)) if *a > 0.0 && is_integral(a.powf(*b)) => {
                Expr::Const(a.powf(*b))
            }
            (_, Expr::Const(0.0)) => Expr::Const(1.0), // x ^ 0 = 1
            (_, Expr::Const(1.0)) => base,             // x ^ 1 = x
            (Expr::Const(1.0), _) => Expr::Const(1.0), // 1 ^ x = 1
            // (x^a)^n = x^(a*n) for integer n
            (Expr::Pow(inner_base, inner_exp), Expr::Const(n)) if is_integral(*n) => {
                let exp = Self::combine_mul(inner_exp.as_ref().clone(), Expr::Const(*n));
                Self::combine_pow(inner_base.as_ref().clone(), exp)
            }
            // x^(-n) = 1 / x^n
            (_, Expr::Const(n)) if *n < 0.0 && !matches!(base, Expr::Const(_)) => {
                let positive = Self::combine_pow(base.clone(), Expr::Const(-*n));
                Expr::Div(Box::new(Expr::Const(1.0)), Box::new(positive))
            }
            _ => Expr::Pow(Box::new(base), Box::new(exp)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn c(val: f64) -> Expr {
        Expr::Const(val)
    }

    #[test]
    fn test_power_rule_leftovers() {
        // shape produced by differentiating x^2
        let expr = c(2.0) * x().pow(c(2.0) - c(1.0)) * c(1.0);
        assert_eq!(expr.simplify().to_string(), "2*x");
    }

    #[test]
    fn test_constant_folding() {
        assert_eq!((c(2.0) + c(3.0)).simplify(), c(5.0));
        assert_eq!((c(6.0) / c(3.0)).simplify(), c(2.0));
        assert_eq!((c(1.0) / c(3.0)).simplify().to_string(), "1/3");
        assert_eq!(c(2.0).pow(c(3.0)).simplify(), c(8.0));
        assert_eq!(c(4.0).sqrt().simplify(), c(2.0));
        assert_eq!(c(2.0).sqrt().simplify().to_string(), "sqrt(2)");
    }

    #[test]
    fn test_identities() {
        assert_eq!((x() + c(0.0)).simplify(), x());
        assert_eq!((c(0.0) + x()).simplify(), x());
        assert_eq!((x() - c(0.0)).simplify(), x());
        assert_eq!((x() - x()).simplify(), c(0.0));
        assert_eq!((x() * c(1.0)).simplify(), x());
        assert_eq!((x().exp() * c(0.0)).simplify(), c(0.0));
        assert_eq!(x().pow(c(1.0)).simplify(), x());
        assert_eq!(x().pow(c(0.0)).simplify(), c(1.0));
        assert_eq!((x() / x()).simplify(), c(1.0));
        assert_eq!(Expr::sin(c(0.0).boxed()).simplify(), c(0.0));
        assert_eq!(Expr::cos(c(0.0).boxed()).simplify(), c(1.0));
        assert_eq!(c(0.0).exp().simplify(), c(1.0));
        assert_eq!(c(1.0).ln().simplify(), c(0.0));
    }

    #[test]
    fn test_canonical_order() {
        assert_eq!((x() * c(3.0)).simplify().to_string(), "3*x");
        assert_eq!((c(1.0) + x()).simplify().to_string(), "x + 1");
        assert_eq!((x() + c(-1.0)).simplify().to_string(), "x - 1");
        assert_eq!((x() - c(-1.0)).simplify().to_string(), "x + 1");
        assert_eq!((Expr::cos(x().boxed()) * x()).simplify().to_string(), "x*cos(x)");
        assert_eq!((x().ln() + c(-2.0) * x()).simplify().to_string(), "log(x) - 2*x");
    }

    #[test]
    fn test_coefficient_collection() {
        assert_eq!((c(2.0) * (c(3.0) * x())).simplify().to_string(), "6*x");
        assert_eq!(((c(2.0) * x()) * c(3.0)).simplify().to_string(), "6*x");
        assert_eq!((x() + x() + x()).simplify().to_string(), "3*x");
        assert_eq!((c(3.0) * x() - x()).simplify().to_string(), "2*x");
        assert_eq!(
            ((c(3.0) * x().pow(c(2.0))) / c(3.0)).simplify().to_string(),
            "x**2"
        );
        assert_eq!((-(-x())).simplify(), x());
        assert_eq!(
            (c(3.0) * (x().pow(c(2.0)) / c(2.0))).simplify().to_string(),
            "3*x**2/2"
        );
        assert_eq!((Expr::sin(x().boxed()) / c(-2.0)).simplify().to_string(), "-sin(x)/2");
    }

    #[test]
    fn test_power_rules() {
        assert_eq!((x() * x()).simplify().to_string(), "x**2");
        assert_eq!((x() * x().pow(c(2.0))).simplify().to_string(), "x**3");
        assert_eq!((x().pow(c(2.0)) * x().pow(c(3.0))).simplify().to_string(), "x**5");
        assert_eq!((x().pow(c(3.0)) / x()).simplify().to_string(), "x**2");
        assert_eq!((x() / x().pow(c(3.0))).simplify().to_string(), "1/x**2");
        assert_eq!(x().pow(c(2.0)).pow(c(3.0)).simplify().to_string(), "x**6");
        assert_eq!((-(c(1.0) / x().pow(c(2.0)))).simplify().to_string(), "-1/x**2");
    }

    #[test]
    fn test_sum_flattening() {
        let expr = (x() - c(1.0)) + (x() + c(1.0));
        assert_eq!(expr.simplify().to_string(), "2*x");
        let expr = (x() + c(1.0)) - x();
        assert_eq!(expr.simplify(), c(1.0));
        let expr = x() / c(2.0) + x() / c(3.0);
        assert_eq!(expr.simplify().to_string(), "5*x/6");
        let expr = c(1.0) / c(3.0) + c(1.0) / c(6.0);
        assert_eq!(expr.simplify().to_string(), "1/2");
        let expr = c(2.0) * (x() + c(1.0)) - x();
        assert_eq!(expr.simplify().to_string(), "x + 2");
        let expr = Expr::sin(x().boxed()) + x() - Expr::sin(x().boxed());
        assert_eq!(expr.simplify(), x());
    }

    #[test]
    fn test_sum_order() {
        assert_eq!((c(1.0) - x().pow(c(2.0))).simplify().to_string(), "1 - x**2");
        assert_eq!((-x() - c(1.0)).simplify().to_string(), "-x - 1");
        let expr = -(x() * Expr::cos(x().boxed())) + Expr::sin(x().boxed());
        assert_eq!(expr.simplify().to_string(), "sin(x) - x*cos(x)");
    }

    #[test]
    fn test_numeric_fraction_factor() {
        let third = c(-1.0) / c(3.0);
        assert_eq!((third.clone() * x()).simplify().to_string(), "-x/3");
        assert_eq!((x() * third).simplify().to_string(), "-x/3");
    }

    #[test]
    fn test_power_of_e() {
        let e = c(std::f64::consts::E);
        assert_eq!(e.clone().pow(x()).simplify(), x().exp());
        assert_eq!(e.clone().pow(x()).simplify().to_string(), "exp(x)");
        assert_eq!(e.ln().simplify(), c(1.0));
        assert_eq!(x().exp().ln().simplify(), x());
    }

    #[test]
    fn test_expand() {
        let product = (x() + c(1.0)) * (x() - c(1.0));
        assert_eq!(product.expand().simplify().to_string(), "x**2 - 1");
        let square = (x() + c(1.0)).pow(c(2.0));
        assert_eq!(square.expand().simplify().to_string(), "x**2 + 2*x + 1");
        let quotient = (x().pow(c(2.0)) + x()) / x();
        assert_eq!(quotient.expand().simplify().to_string(), "x + 1");
        // non-integer powers are left alone
        let root = (x() + c(1.0)).sqrt();
        assert_eq!(root.expand(), root);
    }

    #[test]
    fn test_nested_division() {
        let expr = (x() / c(2.0)) / c(3.0);
        assert_eq!(expr.simplify().to_string(), "x/6");
    }
}
