//! Error type shared by every plotter operation.
//!
//! Each variant carries a short user-facing sentence (`user_message`) plus a detail part.
//! `Display` joins them as `"<user message> - <detail>"`; the message sink shows only the
//! part before the first `" - "` and logs the whole string.
use std::fmt;
use strum_macros::{Display, EnumIter};

/// Coarse category of a [`PlotError`], used to pick the message-box title and severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ErrorKind {
    #[strum(serialize = "Empty expression")]
    EmptyExpression,
    #[strum(serialize = "Invalid expression")]
    InvalidExpression,
    #[strum(serialize = "Invalid domain")]
    InvalidDomain,
    #[strum(serialize = "No plot")]
    NoPlotYet,
    #[strum(serialize = "Unknown series")]
    UnknownSeries,
    #[strum(serialize = "Export failed")]
    Export,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// the function field was empty after normalization
    EmptyExpression,
    /// parser or validator diagnostic
    InvalidExpression(String),
    /// why the domain was rejected
    InvalidDomain(String),
    /// name of the operation attempted before anything was plotted
    NoPlotYet(String),
    UnknownSeries(usize),
    Export(String),
}

impl PlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlotError::EmptyExpression => ErrorKind::EmptyExpression,
            PlotError::InvalidExpression(_) => ErrorKind::InvalidExpression,
            PlotError::InvalidDomain(_) => ErrorKind::InvalidDomain,
            PlotError::NoPlotYet(_) => ErrorKind::NoPlotYet,
            PlotError::UnknownSeries(_) => ErrorKind::UnknownSeries,
            PlotError::Export(_) => ErrorKind::Export,
        }
    }

    /// Short sentence meant for the user, without technical detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            PlotError::EmptyExpression => "Please enter a function",
            PlotError::InvalidExpression(_) => "Please enter a valid function",
            PlotError::InvalidDomain(_) => "Please enter valid numbers for the domain",
            PlotError::NoPlotYet(_) => "Please plot a function first",
            PlotError::UnknownSeries(_) => "No such function on the plot",
            PlotError::Export(_) => "Could not save the image",
        }
    }

    fn detail(&self) -> String {
        match self {
            PlotError::EmptyExpression => "the function field is empty".to_string(),
            PlotError::InvalidExpression(diag) => diag.clone(),
            PlotError::InvalidDomain(reason) => reason.clone(),
            PlotError::NoPlotYet(operation) => format!("cannot {} before plotting", operation),
            PlotError::UnknownSeries(index) => format!("series index {} is out of range", index),
            PlotError::Export(reason) => reason.clone(),
        }
    }
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.user_message(), self.detail())
    }
}

impl std::error::Error for PlotError {}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_joins_user_message_and_detail() {
        let err = PlotError::InvalidDomain("xmin must be less than xmax".to_string());
        assert_eq!(
            err.to_string(),
            "Please enter valid numbers for the domain - xmin must be less than xmax"
        );
        let err = PlotError::NoPlotYet("zoom in".to_string());
        assert_eq!(err.to_string(), "Please plot a function first - cannot zoom in before plotting");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PlotError::EmptyExpression.kind(), ErrorKind::EmptyExpression);
        assert_eq!(PlotError::UnknownSeries(3).kind(), ErrorKind::UnknownSeries);
        assert_eq!(ErrorKind::InvalidExpression.to_string(), "Invalid expression");
        assert_eq!(ErrorKind::iter().count(), 6);
    }
}
