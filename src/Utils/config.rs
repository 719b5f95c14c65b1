//! Plotter settings: sampling resolution, autoscale margin, zoom factors, image size, logging and
//! message-box timeout.
//!
//! Settings can be read from a TOML document with four optional tables:
//! ```toml
//! [plot]
//! resolution = 100
//! width = 800
//! height = 600
//! [view]
//! autoscale_margin = 0.05
//! zoom_in = 0.9
//! zoom_out = 1.1
//! [log]
//! level = "info"
//! console = true
//! dir = "logs"
//! [messages]
//! timeout = 0
//! ```
//! Missing keys keep their defaults. A key with a wrong type or an out-of-range value is reported
//! with `log::error!` and the default is kept.
use log::{LevelFilter, error};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub const DEFAULT_RESOLUTION: usize = 100;
pub const DEFAULT_AUTOSCALE_MARGIN: f64 = 0.05;
pub const DEFAULT_ZOOM_IN: f64 = 0.9;
pub const DEFAULT_ZOOM_OUT: f64 = 1.1;
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (800, 600);

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "cannot read config file: {}", msg),
            ConfigError::Parse(msg) => write!(f, "cannot parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotterConfig {
    /// number of intervals N; a plot has N+1 points
    pub resolution: usize,
    /// fraction of the data span added on each side when a plot is autoscaled
    pub autoscale_margin: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub image_size: (u32, u32),
    pub log_level: LevelFilter,
    pub log_to_console: bool,
    /// directory for the log file, `None` disables file logging
    pub log_dir: Option<PathBuf>,
    /// 0 means the message stays until dismissed
    pub message_timeout: u64,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        PlotterConfig {
            resolution: DEFAULT_RESOLUTION,
            autoscale_margin: DEFAULT_AUTOSCALE_MARGIN,
            zoom_in_factor: DEFAULT_ZOOM_IN,
            zoom_out_factor: DEFAULT_ZOOM_OUT,
            image_size: DEFAULT_IMAGE_SIZE,
            log_level: LevelFilter::Info,
            log_to_console: true,
            log_dir: None,
            message_timeout: 0,
        }
    }
}

impl PlotterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        if resolution >= 1 {
            self.resolution = resolution;
        } else {
            error!("resolution must be at least 1, keeping {}", self.resolution);
        }
        self
    }

    pub fn with_autoscale_margin(mut self, margin: f64) -> Self {
        if margin.is_finite() && margin >= 0.0 {
            self.autoscale_margin = margin;
        } else {
            error!("autoscale margin must be a non-negative number, keeping {}", self.autoscale_margin);
        }
        self
    }

    pub fn with_zoom_factors(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        if positive_factor(zoom_in) && positive_factor(zoom_out) {
            self.zoom_in_factor = zoom_in;
            self.zoom_out_factor = zoom_out;
        } else {
            error!(
                "zoom factors must be positive, keeping {} and {}",
                self.zoom_in_factor, self.zoom_out_factor
            );
        }
        self
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        if width > 0 && height > 0 {
            self.image_size = (width, height);
        } else {
            error!("image size must be positive, keeping {:?}", self.image_size);
        }
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_console_logging(mut self, on: bool) -> Self {
        self.log_to_console = on;
        self
    }

    pub fn with_log_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.log_dir = dir.map(Into::into);
        self
    }

    pub fn with_message_timeout(mut self, seconds: u64) -> Self {
        self.message_timeout = seconds;
        self
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table = content
            .parse::<Table>()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = PlotterConfig::default();

        if let Some(plot) = section(&table, "plot") {
            if let Some(n) = integer_key(plot, "plot", "resolution") {
                config = config.with_resolution(to_usize(n));
            }
            let width = integer_key(plot, "plot", "width").map(to_u32);
            let height = integer_key(plot, "plot", "height").map(to_u32);
            if width.is_some() || height.is_some() {
                let (w, h) = config.image_size;
                config = config.with_image_size(width.unwrap_or(w), height.unwrap_or(h));
            }
        }

        if let Some(view) = section(&table, "view") {
            if let Some(margin) = float_key(view, "view", "autoscale_margin") {
                config = config.with_autoscale_margin(margin);
            }
            let zoom_in = float_key(view, "view", "zoom_in").unwrap_or(config.zoom_in_factor);
            let zoom_out = float_key(view, "view", "zoom_out").unwrap_or(config.zoom_out_factor);
            config = config.with_zoom_factors(zoom_in, zoom_out);
        }

        if let Some(log) = section(&table, "log") {
            if let Some(level) = string_key(log, "log", "level") {
                match level.parse::<LevelFilter>() {
                    Ok(level) => config.log_level = level,
                    Err(_) => error!("[log] level '{}' is not a log level, keeping {}", level, config.log_level),
                }
            }
            if let Some(console) = bool_key(log, "log", "console") {
                config.log_to_console = console;
            }
            if let Some(dir) = string_key(log, "log", "dir") {
                config.log_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(messages) = section(&table, "messages") {
            if let Some(timeout) = integer_key(messages, "messages", "timeout") {
                if timeout >= 0 {
                    config.message_timeout = timeout as u64;
                } else {
                    error!("[messages] timeout must not be negative, keeping {}", config.message_timeout);
                }
            }
        }
        Ok(config)
    }
}

fn positive_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}

// negative values map to 0 so the setters reject them
fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

fn to_u32(n: i64) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

fn section<'a>(table: &'a Table, name: &str) -> Option<&'a Table> {
    match table.get(name) {
        Some(Value::Table(inner)) => Some(inner),
        Some(_) => {
            error!("[{}] must be a table, ignoring it", name);
            None
        }
        None => None,
    }
}

fn integer_key(table: &Table, section: &str, key: &str) -> Option<i64> {
    let value = table.get(key)?;
    let n = value.as_integer();
    if n.is_none() {
        error!("[{}] {} must be an integer, got {}", section, key, value);
    }
    n
}

/// integers are accepted where a float is expected
fn float_key(table: &Table, section: &str, key: &str) -> Option<f64> {
    let value = table.get(key)?;
    let x = value.as_float().or_else(|| value.as_integer().map(|n| n as f64));
    if x.is_none() {
        error!("[{}] {} must be a number, got {}", section, key, value);
    }
    x
}

fn string_key<'a>(table: &'a Table, section: &str, key: &str) -> Option<&'a str> {
    let value = table.get(key)?;
    let s = value.as_str();
    if s.is_none() {
        error!("[{}] {} must be a string, got {}", section, key, value);
    }
    s
}

fn bool_key(table: &Table, section: &str, key: &str) -> Option<bool> {
    let value = table.get(key)?;
    let b = value.as_bool();
    if b.is_none() {
        error!("[{}] {} must be true or false, got {}", section, key, value);
    }
    b
}
