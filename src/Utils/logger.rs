use crate::Utils::config::PlotterConfig;
use chrono::Local;
use log::LevelFilter;
use simplelog::*;
use std::fs::File;
use std::path::{Path, PathBuf};

/// log file name stamped with the local start time: rusted_plotter_2025-01-31_12-00-00.log
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("rusted_plotter_{}.log", date_and_time)
}

/// Installs the global logger: terminal output and/or a time-stamped file in `log_dir`.
/// Returns the path of the log file when one was created. Installing a second global logger is
/// silently ignored, so the function may be called from several tests.
pub fn init_logger(level: LevelFilter, log_to_console: bool, log_dir: Option<&Path>) -> Option<PathBuf> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    if log_to_console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    // File logger
    let mut log_file = None;
    if let Some(dir) = log_dir {
        let path = dir.join(log_file_name());
        if let Ok(file) = File::create(&path) {
            loggers.push(WriteLogger::new(level, Config::default(), file));
            log_file = Some(path);
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
    log_file
}

pub fn init_logger_from_config(config: &PlotterConfig) -> Option<PathBuf> {
    init_logger(config.log_level, config.log_to_console, config.log_dir.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use tempfile::tempdir;

    #[test]
    fn test_log_file_name() {
        let re = Regex::new(r"^rusted_plotter_\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}\.log$").unwrap();
        assert!(re.is_match(&log_file_name()));
    }

    #[test]
    fn test_init_logger_creates_file() {
        let dir = tempdir().unwrap();
        let config = PlotterConfig::default()
            .with_console_logging(false)
            .with_log_dir(Some(dir.path()));
        let path = init_logger_from_config(&config).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(dir.path()));
        log::info!("logger test");
    }

    #[test]
    fn test_init_logger_without_sinks() {
        assert_eq!(init_logger(LevelFilter::Info, false, None), None);
    }
}
