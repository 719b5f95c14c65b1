use crate::plotting::domain::Domain;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use itertools::Itertools;

/// Points of one function on its domain: x is uniformly spaced and covers both ends,
/// y is `None` where the function is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    points: Vec<(f64, Option<f64>)>,
}

impl SampleSet {
    pub fn from_points(points: Vec<(f64, Option<f64>)>) -> Self {
        SampleSet { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(f64, Option<f64>)] {
        &self.points
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|&(x, _)| x).collect()
    }

    pub fn ys(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|&(_, y)| y).collect()
    }

    /// points with a value
    pub fn defined(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().filter_map(|&(x, y)| y.map(|y| (x, y)))
    }

    /// Runs of consecutive defined points; a line is never drawn across an undefined point.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            match y {
                Some(y) => current.push((x, y)),
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|&(x, _)| x).minmax().into_option()
    }

    /// min and max over the defined y values
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.defined().map(|(_, y)| y).minmax().into_option()
    }

    /// Natural data bounds: (x bounds, y bounds). y is `None` when no point is defined.
    pub fn bounds(&self) -> Option<((f64, f64), Option<(f64, f64)>)> {
        Some((self.x_bounds()?, self.y_bounds()))
    }
}

/// Evaluates `expr` at `resolution + 1` points `x_i = xmin + (xmax - xmin) * i / resolution`.
/// The last abscissa is `xmax` exactly. An undefined point is stored as `None`.
pub fn sample(expr: &Expr, domain: &Domain, resolution: usize) -> SampleSet {
    let n = resolution.max(1);
    let points = linspace(domain.xmin(), domain.xmax(), n + 1)
        .into_iter()
        .map(|x| (x, expr.eval_at(x)))
        .collect();
    SampleSet { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::preprocess::parse_function_string;
    use approx::assert_relative_eq;

    fn sample_text(f: &str, xmin: f64, xmax: f64, n: usize) -> SampleSet {
        let expr = parse_function_string(f).unwrap();
        sample(&expr, &Domain::new(xmin, xmax).unwrap(), n)
    }

    #[test]
    fn test_sample_square() {
        let samples = sample_text("x^2", 1.0, 10.0, 100);
        assert_eq!(samples.len(), 101);
        assert_eq!(samples.points()[0], (1.0, Some(1.0)));
        assert_eq!(samples.points()[100], (10.0, Some(100.0)));
        assert_relative_eq!(samples.points()[50].0, 5.5, epsilon = 1e-12);
        assert_eq!(samples.x_bounds(), Some((1.0, 10.0)));
        assert_eq!(samples.y_bounds(), Some((1.0, 100.0)));
    }

    #[test]
    fn test_sample_is_deterministic() {
        assert_eq!(sample_text("sin(x)/x", -3.0, 3.0, 60), sample_text("sin(x)/x", -3.0, 3.0, 60));
    }

    #[test]
    fn test_undefined_points_do_not_abort() {
        // x = 0 is hit exactly at i = 50
        let samples = sample_text("1/x", -1.0, 1.0, 100);
        assert_eq!(samples.len(), 101);
        assert_eq!(samples.points()[50], (0.0, None));
        assert_eq!(samples.defined().count(), 100);
        let segments = samples.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 50);
        assert_eq!(segments[1].len(), 50);
    }

    #[test]
    fn test_log_of_negative_domain() {
        let samples = sample_text("log(x)", -2.0, -1.0, 10);
        assert_eq!(samples.defined().count(), 0);
        assert!(samples.segments().is_empty());
        assert_eq!(samples.bounds(), Some(((-2.0, -1.0), None)));
    }

    #[test]
    fn test_zero_resolution_is_one_interval() {
        let samples = sample_text("x", 0.0, 2.0, 0);
        assert_eq!(samples.xs(), vec![0.0, 2.0]);
        assert_eq!(samples.ys(), vec![Some(0.0), Some(2.0)]);
    }
}
