#![allow(non_snake_case)]
use RustedPlotter::PlotSession;
use RustedPlotter::Utils::config::PlotterConfig;
use RustedPlotter::Utils::logger::init_logger_from_config;
use RustedPlotter::Utils::message::{LogMessageSink, MessageSink, Severity, notify_error};
use log::info;
use std::env;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "usage: rusted_plotter <function> <xmin> <xmax> [output.png]";
/// optional settings file in the working directory
const CONFIG_FILE: &str = "rusted_plotter.toml";

fn load_config() -> PlotterConfig {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return PlotterConfig::default();
    }
    match PlotterConfig::from_file(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}, using defaults", e);
            PlotterConfig::default()
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    }
    let config = load_config();
    init_logger_from_config(&config);
    let timeout = config.message_timeout;
    let sink = LogMessageSink;

    let mut session = PlotSession::new(config);
    if let Err(e) = session.plot_text(&args[0], &args[1], &args[2]) {
        notify_error(&sink, &e, timeout).dismiss();
        return ExitCode::FAILURE;
    }
    let series = &session.series()[0];
    info!("{} sampled at {} points", series.label, series.samples.len());

    // calculus works on the plotted expression
    for (title, result) in [("Derivative", session.derivative()), ("Integral", session.integral())] {
        match result {
            Ok(result) => {
                let message = format!("The {} of the function is: {}", title.to_lowercase(), result);
                println!("{}", message);
                sink.display(title, &message, Severity::Information, 0).dismiss();
            }
            Err(e) => {
                notify_error(&sink, &e, timeout).dismiss();
            }
        }
    }

    if let Some(output) = args.get(3) {
        if let Err(e) = session.save_image(Path::new(output)) {
            notify_error(&sink, &e, timeout).dismiss();
            return ExitCode::FAILURE;
        }
        println!("saved {}", output);
    }
    ExitCode::SUCCESS
}
