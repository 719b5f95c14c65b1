use crate::error::PlotError;
use std::fmt;

/// Closed x-interval a function is sampled on. Both ends are finite and `xmin < xmax`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    xmin: f64,
    xmax: f64,
}

impl Domain {
    pub fn new(xmin: f64, xmax: f64) -> Result<Domain, PlotError> {
        if !xmin.is_finite() || !xmax.is_finite() {
            return Err(PlotError::InvalidDomain(
                "xmin and xmax must be finite numbers.".to_string(),
            ));
        }
        if xmin >= xmax {
            return Err(PlotError::InvalidDomain("xmin must be less than xmax.".to_string()));
        }
        Ok(Domain { xmin, xmax })
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn span(&self) -> f64 {
        self.xmax - self.xmin
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.xmin, self.xmax)
    }
}

fn parse_bound(name: &str, text: &str) -> Result<f64, PlotError> {
    text.trim().parse::<f64>().map_err(|e| {
        PlotError::InvalidDomain(format!("cannot read {} '{}' as a number: {}", name, text, e))
    })
}

/// Reads the two domain fields as typed by the user.
pub fn get_domain(xmin_text: &str, xmax_text: &str) -> Result<Domain, PlotError> {
    let xmin = parse_bound("xmin", xmin_text)?;
    let xmax = parse_bound("xmax", xmax_text)?;
    Domain::new(xmin, xmax)
}
