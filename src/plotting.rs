//! Numeric side of the plotter: domains, sampling, axis limits, series overlay, the interactive
//! session and image export.
///
///# Example
/// ```
/// use RustedPlotter::plotting::session::PlotSession;
/// let mut session = PlotSession::default();
/// session.plot_text("x^2", "1", "10").unwrap();
/// session.zoom_in().unwrap();
/// assert_eq!(session.series()[0].samples.points()[100], (10.0, Some(100.0)));
/// assert_eq!(session.derivative().unwrap().to_string(), "2*x");
/// assert_eq!(session.cursor_text(1.0, 2.0).unwrap(), "x: 1.00, y: 2.00");
/// ```
/// _____________________________________________________________________________________________________________________________________________
pub mod session;
/// (xmin, xmax) validated at construction, and parsing of the two text fields
pub mod domain;
/// uniform sampling of an expression; undefined points are kept as `None`
pub mod sampler;
/// axis limits with autoscale, zoom and pan
pub mod view_transform;
/// series, colors, overlay manager and plot decorations
pub mod series;
/// plotters-based export to png/jpg/bmp
pub mod render;
