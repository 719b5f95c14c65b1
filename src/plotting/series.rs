use crate::error::PlotError;
use crate::plotting::domain::Domain;
use crate::plotting::sampler::{SampleSet, sample};
use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

/// RGB line color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const PALETTE: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

const NAMED: [(&str, Color); 14] = [
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("brown", Color::rgb(165, 42, 42)),
    ("pink", Color::rgb(255, 192, 203)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Default color of the `index`-th series; cycles through 10 colors.
    pub fn palette(index: usize) -> Color {
        PALETTE[index % PALETTE.len()]
    }

    /// `#rrggbb` (case-insensitive) or a basic color name such as `red`.
    pub fn parse(text: &str) -> Option<Color> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        let lower = text.to_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|&(_, color)| color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One plotted function with its samples and style.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub expr: Expr,
    pub domain: Domain,
    pub samples: SampleSet,
    pub color: Color,
    /// canonical text of `expr`
    pub label: String,
    pub visible: bool,
}

impl Series {
    pub fn new(expr: Expr, domain: Domain, resolution: usize, color: Color) -> Series {
        let samples = sample(&expr, &domain, resolution);
        let label = expr.to_string();
        Series {
            expr,
            domain,
            samples,
            color,
            label,
            visible: true,
        }
    }
}

/// Which series a color change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    All,
    Series(usize),
}

/// Series drawn on one surface, in plotting order. The first one is the primary series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayManager {
    series: Vec<Series>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, index: usize) -> Option<&Series> {
        self.series.get(index)
    }

    pub fn primary(&self) -> Option<&Series> {
        self.series.first()
    }

    /// palette color for the series that would be added next
    pub fn next_color(&self) -> Color {
        Color::palette(self.series.len())
    }

    /// Samples `expr` and appends it; returns the index of the new series.
    pub fn add_series(&mut self, expr: Expr, domain: Domain, resolution: usize) -> usize {
        let series = Series::new(expr, domain, resolution, self.next_color());
        self.series.push(series);
        self.series.len() - 1
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    pub fn change_color(&mut self, target: ColorTarget, color: Color) -> Result<(), PlotError> {
        match target {
            ColorTarget::All => {
                for series in self.series.iter_mut() {
                    series.color = color;
                }
            }
            ColorTarget::Series(index) => {
                self.series
                    .get_mut(index)
                    .ok_or(PlotError::UnknownSeries(index))?
                    .color = color;
            }
        }
        Ok(())
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<(), PlotError> {
        self.series
            .get_mut(index)
            .ok_or(PlotError::UnknownSeries(index))?
            .visible = visible;
        Ok(())
    }

    pub fn visible(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| s.visible)
    }
}

/// Title, axis labels, grid and legend of a plot surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub grid: bool,
    pub legend: bool,
}

impl Decorations {
    /// returns the new state
    pub fn toggle_grid(&mut self) -> bool {
        self.grid = !self.grid;
        self.grid
    }

    /// returns the new state
    pub fn toggle_legend(&mut self) -> bool {
        self.legend = !self.legend;
        self.legend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::preprocess::parse_function_string;

    fn overlay_with(functions: &[&str]) -> OverlayManager {
        let mut overlay = OverlayManager::new();
        let domain = Domain::new(1.0, 1000.0).unwrap();
        for f in functions {
            overlay.add_series(parse_function_string(f).unwrap(), domain, 100);
        }
        overlay
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("#FF8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::parse("Red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#gg0000"), None);
        assert_eq!(Color::parse("chartreuse-ish"), None);
        assert_eq!(Color::rgb(31, 119, 180).to_string(), "#1f77b4");
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(Color::palette(0), Color::palette(10));
        assert_ne!(Color::palette(0), Color::palette(1));
    }

    #[test]
    fn test_add_series() {
        let overlay = overlay_with(&["x", "-x"]);
        assert_eq!(overlay.len(), 2);
        assert_eq!(overlay.primary().unwrap().label, "x");
        assert_eq!(overlay.get(1).unwrap().label, "-x");
        assert_eq!(overlay.get(1).unwrap().color, Color::palette(1));
        assert_eq!(overlay.get(1).unwrap().samples.points()[100], (1000.0, Some(-1000.0)));
    }

    #[test]
    fn test_change_color() {
        let mut overlay = overlay_with(&["x", "-x", "x^2"]);
        let red = Color::rgb(255, 0, 0);
        overlay.change_color(ColorTarget::All, red).unwrap();
        assert!(overlay.series().iter().all(|s| s.color == red));
        let blue = Color::rgb(0, 0, 255);
        overlay.change_color(ColorTarget::Series(2), blue).unwrap();
        assert_eq!(overlay.get(2).unwrap().color, blue);
        assert_eq!(overlay.get(0).unwrap().color, red);
        assert_eq!(
            overlay.change_color(ColorTarget::Series(3), blue),
            Err(PlotError::UnknownSeries(3))
        );
    }

    #[test]
    fn test_visibility() {
        let mut overlay = overlay_with(&["x", "-x"]);
        overlay.set_visible(0, false).unwrap();
        let labels: Vec<&str> = overlay.visible().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["-x"]);
        assert_eq!(overlay.set_visible(7, true), Err(PlotError::UnknownSeries(7)));
    }

    #[test]
    fn test_decorations_toggle() {
        let mut decorations = Decorations::default();
        assert!(decorations.toggle_grid());
        assert!(!decorations.legend);
        assert!(decorations.toggle_legend());
        assert!(!decorations.toggle_grid());
        assert!(decorations.legend);
    }
}
