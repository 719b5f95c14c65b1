// numeric helpers shared by the sampler and the derivative cross-check

/// `num_values` points uniformly spaced over [start, end]; the last one is `end` exactly.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    match num_values {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }
    let intervals = (num_values - 1) as f64;
    let span = end - start;
    let mut values = Vec::with_capacity(num_values);
    for i in 0..num_values - 1 {
        let t = (i as f64) / intervals;
        if span.is_finite() {
            values.push(start + span * t);
        } else {
            // end - start overflows near the ends of the f64 range
            values.push(start * (1.0 - t) + end * t);
        }
    }
    values.push(end);
    values
}
/*
    let x_values = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let h = 0.001;
    let derivatives = numerical_derivative(|x| Some(x * x), &x_values, h);
*/
/// Central differences; `None` where either neighbour is undefined.
pub fn numerical_derivative<F>(f: F, x_values: &[f64], h: f64) -> Vec<Option<f64>>
where
    F: Fn(f64) -> Option<f64>,
{
    x_values
        .iter()
        .map(|&x| match (f(x + h), f(x - h)) {
            (Some(plus), Some(minus)) => Some((plus - minus) / (2.0 * h)),
            _ => None,
        })
        .collect()
}

// compute norm of two vectors
pub fn norm(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());
    if x.is_empty() {
        return 0.0;
    }
    (1.0 / x.len() as f64)
        * x.iter()
            .zip(y.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_includes_both_ends() {
        let xs = linspace(1.0, 10.0, 101);
        assert_eq!(xs.len(), 101);
        assert_eq!(xs[0], 1.0);
        assert_eq!(xs[100], 10.0);
        assert_relative_eq!(xs[50], 5.5, epsilon = 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_linspace_over_the_whole_float_range() {
        let xs = linspace(-1.7e308, 1.7e308, 5);
        assert_eq!(xs[0], -1.7e308);
        assert_relative_eq!(xs[1], -0.85e308, max_relative = 1e-12);
        assert_eq!(xs[2], 0.0);
        assert_relative_eq!(xs[3], 0.85e308, max_relative = 1e-12);
        assert_eq!(xs[4], 1.7e308);
    }

    #[test]
    fn test_numerical_derivative() {
        let d = numerical_derivative(|x| Some(x * x), &[1.0, 2.0], 1e-4);
        assert_relative_eq!(d[0].unwrap(), 2.0, epsilon = 1e-6);
        assert_relative_eq!(d[1].unwrap(), 4.0, epsilon = 1e-6);
        let d = numerical_derivative(|x: f64| if x > 0.0 { Some(x.ln()) } else { None }, &[0.0], 1e-4);
        assert_eq!(d[0], None);
    }

    #[test]
    fn test_norm() {
        assert_relative_eq!(norm(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_relative_eq!(norm(&[3.0, 0.0], &[0.0, 4.0]), 2.5);
    }
}
