//! One interactive plot surface.
//!
//! `PlotSession` is either empty or holds an [`ActivePlot`]: the series, the shared view transform
//! and the `(Expr, Domain)` of the last `plot` call, which `reset` replays. Text entry points run
//! the full parse pipeline; a failing call returns a [`PlotError`] and leaves the session as it
//! was. Forwarding that error to a message sink is the host's job.
use crate::Utils::config::PlotterConfig;
use crate::error::PlotError;
use crate::plotting::domain::{Domain, get_domain};
use crate::plotting::render::{Scene, render_to_file};
use crate::plotting::series::{Color, ColorTarget, Decorations, OverlayManager, Series};
use crate::plotting::view_transform::ViewTransform;
use crate::symbolic::preprocess::parse_function_string;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::{CalculusResult, derivative_result, integral_result};
use log::{debug, info, warn};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivePlot {
    view: ViewTransform,
    overlay: OverlayManager,
    last_plot: (Expr, Domain),
}

impl ActivePlot {
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn overlay(&self) -> &OverlayManager {
        &self.overlay
    }

    /// expression and domain `reset` plots again
    pub fn last_plot(&self) -> (&Expr, &Domain) {
        (&self.last_plot.0, &self.last_plot.1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlotSession {
    config: PlotterConfig,
    active: Option<ActivePlot>,
    decorations: Decorations,
}

impl PlotSession {
    pub fn new(config: PlotterConfig) -> Self {
        PlotSession {
            config,
            active: None,
            decorations: Decorations::default(),
        }
    }

    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActivePlot> {
        self.active.as_ref()
    }

    pub fn view(&self) -> Option<&ViewTransform> {
        self.active.as_ref().map(|a| &a.view)
    }

    /// Series in plotting order; empty before the first plot.
    pub fn series(&self) -> &[Series] {
        match &self.active {
            Some(active) => active.overlay.series(),
            None => &[],
        }
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    pub fn scene(&self) -> Option<Scene<'_>> {
        self.active.as_ref().map(|active| Scene {
            view: &active.view,
            overlay: &active.overlay,
            decorations: &self.decorations,
        })
    }

    fn active_mut(&mut self, operation: &str) -> Result<&mut ActivePlot, PlotError> {
        self.active
            .as_mut()
            .ok_or_else(|| PlotError::NoPlotYet(operation.to_string()))
    }

    fn active_ref(&self, operation: &str) -> Result<&ActivePlot, PlotError> {
        self.active
            .as_ref()
            .ok_or_else(|| PlotError::NoPlotYet(operation.to_string()))
    }

    //___________________________________PLOTTING____________________________________

    /// Replaces whatever is plotted by `expr` on `domain`, autoscales the view and starts a fresh
    /// set of decorations.
    pub fn plot(&mut self, expr: Expr, domain: Domain) -> Result<(), PlotError> {
        self.start_plot(expr, domain)?;
        self.decorations = Decorations::default();
        Ok(())
    }

    fn start_plot(&mut self, expr: Expr, domain: Domain) -> Result<(), PlotError> {
        let mut overlay = OverlayManager::new();
        overlay.add_series(expr.clone(), domain, self.config.resolution);
        let samples = &overlay.series()[0].samples;
        let view = ViewTransform::from_samples(samples, self.config.autoscale_margin)
            .ok_or_else(|| {
                PlotError::InvalidDomain(format!("cannot fit axis limits to {} on {}", expr, domain))
            })?;
        debug!(
            "plotted {} on {}: xlim {:?}, ylim {:?}",
            expr,
            domain,
            view.xlim().as_tuple(),
            view.ylim().as_tuple()
        );
        self.active = Some(ActivePlot {
            view,
            overlay,
            last_plot: (expr, domain),
        });
        Ok(())
    }

    pub fn plot_text(&mut self, function: &str, xmin: &str, xmax: &str) -> Result<(), PlotError> {
        let expr = parse_function_string(function)?;
        let domain = get_domain(xmin, xmax)?;
        self.plot(expr, domain)
    }

    /// Overlays another function without touching the axis limits.
    pub fn add_function(&mut self, expr: Expr, domain: Domain) -> Result<usize, PlotError> {
        let resolution = self.config.resolution;
        let active = self.active_mut("add another function")?;
        debug!("adding {} on {}", expr, domain);
        Ok(active.overlay.add_series(expr, domain, resolution))
    }

    pub fn add_function_text(&mut self, function: &str, xmin: &str, xmax: &str) -> Result<usize, PlotError> {
        self.active_ref("add another function")?;
        let expr = parse_function_string(function)?;
        let domain = get_domain(xmin, xmax)?;
        self.add_function(expr, domain)
    }

    /// Clears every series and plots the last `plot` again with fresh limits.
    /// Title, labels, grid and legend are kept.
    pub fn reset(&mut self) -> Result<(), PlotError> {
        let (expr, domain) = self.active_ref("reset the plot")?.last_plot.clone();
        debug!("reset to {}", expr);
        self.start_plot(expr, domain)
    }

    //___________________________________VIEW____________________________________

    fn update_view<F>(&mut self, operation: &str, f: F) -> Result<(), PlotError>
    where
        F: FnOnce(&ViewTransform) -> Option<ViewTransform>,
    {
        let active = self.active_mut(operation)?;
        match f(&active.view) {
            Some(view) => {
                debug!(
                    "{}: xlim {:?}, ylim {:?}",
                    operation,
                    view.xlim().as_tuple(),
                    view.ylim().as_tuple()
                );
                active.view = view;
            }
            None => warn!("{} would collapse the axis limits, view left unchanged", operation),
        }
        Ok(())
    }

    pub fn zoom_in(&mut self) -> Result<(), PlotError> {
        let factor = self.config.zoom_in_factor;
        self.update_view("zoom in", |view| view.zoom(factor))
    }

    pub fn zoom_out(&mut self) -> Result<(), PlotError> {
        let factor = self.config.zoom_out_factor;
        self.update_view("zoom out", |view| view.zoom(factor))
    }

    /// `press` and `release` are pointer positions in data coordinates.
    pub fn pan(&mut self, press: (f64, f64), release: (f64, f64)) -> Result<(), PlotError> {
        self.update_view("pan", |view| view.pan(press, release))
    }

    /// Limits reported by an external rendering surface.
    pub fn set_limits(&mut self, xlim: (f64, f64), ylim: (f64, f64)) -> Result<(), PlotError> {
        self.update_view("set the limits", |_| ViewTransform::from_limits(xlim, ylim))
    }

    /// `"x: 1.23, y: 4.56"`, or `None` before the first plot.
    pub fn cursor_text(&self, x: f64, y: f64) -> Option<String> {
        self.active.as_ref()?;
        Some(format!("x: {:.2}, y: {:.2}", x, y))
    }

    //___________________________________CALCULUS____________________________________

    /// Derivative of the primary series' expression.
    pub fn derivative(&self) -> Result<CalculusResult, PlotError> {
        let expr = self.primary_expr("find the derivative")?;
        let result = derivative_result(expr);
        info!("derivative of {} is {}", expr, result);
        Ok(result)
    }

    /// Antiderivative of the primary series' expression.
    pub fn integral(&self) -> Result<CalculusResult, PlotError> {
        let expr = self.primary_expr("find the integral")?;
        let result = integral_result(expr);
        info!("integral of {} is {}", expr, result);
        Ok(result)
    }

    fn primary_expr(&self, operation: &str) -> Result<&Expr, PlotError> {
        let active = self.active_ref(operation)?;
        active
            .overlay
            .primary()
            .map(|series| &series.expr)
            .ok_or_else(|| PlotError::NoPlotYet(operation.to_string()))
    }

    //___________________________________STYLE____________________________________

    pub fn change_color(&mut self, target: ColorTarget, color: Color) -> Result<(), PlotError> {
        let active = self.active_mut("change the color")?;
        active.overlay.change_color(target, color)?;
        debug!("color of {:?} set to {}", target, color);
        Ok(())
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<(), PlotError> {
        self.active_mut("change the visibility")?
            .overlay
            .set_visible(index, visible)
    }

    /// Returns the new grid state.
    pub fn toggle_grid(&mut self) -> Result<bool, PlotError> {
        self.active_ref("toggle the grid")?;
        Ok(self.decorations.toggle_grid())
    }

    /// Returns the new legend state.
    pub fn toggle_legend(&mut self) -> Result<bool, PlotError> {
        self.active_ref("toggle the legend")?;
        Ok(self.decorations.toggle_legend())
    }

    /// `None` means the input dialog was cancelled and nothing changes.
    pub fn set_title(&mut self, title: Option<String>) -> Result<(), PlotError> {
        self.active_ref("change the title")?;
        if let Some(title) = title {
            self.decorations.title = Some(title);
        }
        Ok(())
    }

    pub fn set_x_label(&mut self, label: Option<String>) -> Result<(), PlotError> {
        self.active_ref("change the x-axis label")?;
        if let Some(label) = label {
            self.decorations.x_label = Some(label);
        }
        Ok(())
    }

    pub fn set_y_label(&mut self, label: Option<String>) -> Result<(), PlotError> {
        self.active_ref("change the y-axis label")?;
        if let Some(label) = label {
            self.decorations.y_label = Some(label);
        }
        Ok(())
    }

    //___________________________________EXPORT____________________________________

    pub fn save_image(&self, path: &Path) -> Result<(), PlotError> {
        let scene = self
            .scene()
            .ok_or_else(|| PlotError::NoPlotYet("save the image".to_string()))?;
        render_to_file(&scene, path, self.config.image_size)
    }
}
