//! Axis limits of one plot surface and the pan/zoom operations on them.
//!
//! Every operation is pure: it returns the new transform, or `None` when the result would have a
//! collapsed or non-finite axis (`lo >= hi`). The caller keeps the old transform in that case.
use crate::plotting::sampler::SampleSet;

/// relative padding used when all data share a single value
const ZERO_SPAN_PAD: f64 = 0.05;

/// Ordered axis interval, `lo < hi`, both finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lo: f64,
    hi: f64,
}

impl Bounds {
    pub fn new(lo: f64, hi: f64) -> Option<Bounds> {
        if lo.is_finite() && hi.is_finite() && lo < hi {
            Some(Bounds { lo, hi })
        } else {
            None
        }
    }

    /// Data range `[min, max]` widened by `margin * span` on each side.
    /// A single value `v` becomes `v ± 0.05*|v|`, or `±0.05` around zero.
    pub fn padded(min: f64, max: f64, margin: f64) -> Option<Bounds> {
        if max > min {
            // margin*(max - min) overflows for ranges wider than f64::MAX
            let pad = margin * max - margin * min;
            Bounds::new((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
        } else {
            let pad = if min == 0.0 { ZERO_SPAN_PAD } else { ZERO_SPAN_PAD * min.abs() };
            Bounds::new(min - pad, max + pad)
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn scaled(&self, factor: f64) -> Option<Bounds> {
        Bounds::new(self.lo * factor, self.hi * factor)
    }

    pub fn shifted(&self, delta: f64) -> Option<Bounds> {
        Bounds::new(self.lo + delta, self.hi + delta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    xlim: Bounds,
    ylim: Bounds,
}

impl ViewTransform {
    pub fn new(xlim: Bounds, ylim: Bounds) -> Self {
        ViewTransform { xlim, ylim }
    }

    /// Autoscaled limits for a freshly plotted sample set. Without any defined y value the
    /// y axis defaults to (-1, 1).
    pub fn from_samples(samples: &SampleSet, margin: f64) -> Option<ViewTransform> {
        let ((xmin, xmax), y_bounds) = samples.bounds()?;
        let xlim = Bounds::padded(xmin, xmax, margin)?;
        let ylim = match y_bounds {
            Some((ymin, ymax)) => Bounds::padded(ymin, ymax, margin)?,
            None => Bounds { lo: -1.0, hi: 1.0 },
        };
        Some(ViewTransform { xlim, ylim })
    }

    pub fn from_limits(xlim: (f64, f64), ylim: (f64, f64)) -> Option<ViewTransform> {
        Some(ViewTransform {
            xlim: Bounds::new(xlim.0, xlim.1)?,
            ylim: Bounds::new(ylim.0, ylim.1)?,
        })
    }

    pub fn xlim(&self) -> Bounds {
        self.xlim
    }

    pub fn ylim(&self) -> Bounds {
        self.ylim
    }

    /// Multiplies all four limits by `factor`: below 1 zooms in, above 1 zooms out.
    /// Limits scale about the origin, not about the view centre.
    pub fn zoom(&self, factor: f64) -> Option<ViewTransform> {
        if !(factor.is_finite() && factor > 0.0) {
            return None;
        }
        Some(ViewTransform {
            xlim: self.xlim.scaled(factor)?,
            ylim: self.ylim.scaled(factor)?,
        })
    }

    /// Drag from `press` to `release` (data coordinates): the view moves against the drag.
    pub fn pan(&self, press: (f64, f64), release: (f64, f64)) -> Option<ViewTransform> {
        let dx = press.0 - release.0;
        let dy = press.1 - release.1;
        Some(ViewTransform {
            xlim: self.xlim.shifted(dx)?,
            ylim: self.ylim.shifted(dy)?,
        })
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.xlim.contains(x) && self.ylim.contains(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_view() -> ViewTransform {
        let samples = SampleSet::from_points(vec![(1.0, Some(1.0)), (5.5, Some(30.25)), (10.0, Some(100.0))]);
        ViewTransform::from_samples(&samples, 0.05).unwrap()
    }

    #[test]
    fn test_autoscale_margin() {
        let view = square_view();
        assert_relative_eq!(view.xlim().lo(), 0.55, epsilon = 1e-12);
        assert_relative_eq!(view.xlim().hi(), 10.45, epsilon = 1e-12);
        assert_relative_eq!(view.ylim().lo(), -3.95, epsilon = 1e-12);
        assert_relative_eq!(view.ylim().hi(), 104.95, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_function_is_widened() {
        let samples = SampleSet::from_points(vec![(0.0, Some(5.0)), (1.0, Some(5.0))]);
        let view = ViewTransform::from_samples(&samples, 0.05).unwrap();
        assert_relative_eq!(view.ylim().lo(), 4.75, epsilon = 1e-12);
        assert_relative_eq!(view.ylim().hi(), 5.25, epsilon = 1e-12);
        let zeros = SampleSet::from_points(vec![(0.0, Some(0.0)), (1.0, Some(0.0))]);
        let view = ViewTransform::from_samples(&zeros, 0.0).unwrap();
        assert_eq!(view.ylim().as_tuple(), (-0.05, 0.05));
        assert_eq!(view.xlim().as_tuple(), (0.0, 1.0));
    }

    #[test]
    fn test_autoscale_near_float_limits() {
        let samples = SampleSet::from_points(vec![(-1.7e308, Some(-1.7e308)), (1.7e308, Some(1.7e308))]);
        let view = ViewTransform::from_samples(&samples, 0.05).unwrap();
        assert_eq!(view.xlim().as_tuple(), (f64::MIN, f64::MAX));
        assert_eq!(view.ylim().as_tuple(), (f64::MIN, f64::MAX));
        let bounds = Bounds::padded(-1e307, 1e307, 0.05).unwrap();
        assert_relative_eq!(bounds.lo(), -1.1e307, max_relative = 1e-12);
        assert_relative_eq!(bounds.hi(), 1.1e307, max_relative = 1e-12);
    }

    #[test]
    fn test_no_defined_values() {
        let samples = SampleSet::from_points(vec![(-2.0, None), (-1.0, None)]);
        let view = ViewTransform::from_samples(&samples, 0.05).unwrap();
        assert_eq!(view.ylim().as_tuple(), (-1.0, 1.0));
        assert!(ViewTransform::from_samples(&SampleSet::from_points(vec![]), 0.05).is_none());
    }

    #[test]
    fn test_zoom_in_then_out() {
        let view = ViewTransform::from_limits((1.0, 10.0), (-2.0, 4.0)).unwrap();
        let zoomed = view.zoom(0.9).unwrap();
        assert_relative_eq!(zoomed.xlim().lo(), 0.9, epsilon = 1e-12);
        assert_relative_eq!(zoomed.xlim().hi(), 9.0, epsilon = 1e-12);
        assert_relative_eq!(zoomed.ylim().lo(), -1.8, epsilon = 1e-12);
        let back = zoomed.zoom(1.1).unwrap();
        // 0.9 * 1.1 = 0.99, not an exact inverse
        assert_relative_eq!(back.xlim().hi(), 9.9, epsilon = 1e-12);
        assert_relative_eq!(back.ylim().hi(), 3.96, epsilon = 1e-12);
    }

    #[test]
    fn test_zoom_rejects_collapse() {
        let view = ViewTransform::from_limits((1.0, 10.0), (-2.0, 4.0)).unwrap();
        assert!(view.zoom(0.0).is_none());
        assert!(view.zoom(-1.0).is_none());
        let tiny = ViewTransform::from_limits((1e-320, 2e-320), (0.0, 1.0)).unwrap();
        assert!(tiny.zoom(1e-10).is_none());
    }

    #[test]
    fn test_pan() {
        let view = ViewTransform::from_limits((0.0, 10.0), (0.0, 5.0)).unwrap();
        let moved = view.pan((2.0, 1.0), (1.0, 3.0)).unwrap();
        assert_eq!(moved.xlim().as_tuple(), (1.0, 11.0));
        assert_eq!(moved.ylim().as_tuple(), (-2.0, 3.0));
        assert_eq!(view.pan((4.0, 4.0), (4.0, 4.0)).unwrap(), view);
    }

    #[test]
    fn test_pan_rejects_absorbed_span() {
        let view = ViewTransform::from_limits((0.0, 1.0), (0.0, 1.0)).unwrap();
        assert!(view.pan((1e300, 0.0), (0.0, 0.0)).is_none());
    }

    #[test]
    fn test_bounds_invariant() {
        assert!(Bounds::new(1.0, 1.0).is_none());
        assert!(Bounds::new(2.0, 1.0).is_none());
        assert!(Bounds::new(f64::NAN, 1.0).is_none());
        let b = Bounds::new(-1.0, 3.0).unwrap();
        assert_eq!(b.span(), 4.0);
        assert!(b.contains(0.0));
        assert!(!b.contains(3.5));
    }
}
