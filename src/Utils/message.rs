//! User-facing notifications.
//!
//! A [`MessageSink`] shows a titled message with a severity and an optional auto-dismiss
//! countdown. The countdown runs on its own thread and waits on a channel with a timeout: if the
//! handle is dismissed first the countdown is cancelled, otherwise the message is accepted
//! automatically when the time is up. A timeout of 0 means no countdown; the message stays until
//! [`MessageHandle::dismiss`] is called.
use crate::error::{ErrorKind, PlotError};
use log::{debug, error, info, warn};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

/// How a message went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    User,
    Timeout,
}

pub trait MessageSink {
    fn display(&self, title: &str, message: &str, severity: Severity, timeout_seconds: u64) -> MessageHandle;
}

/// The part of a message meant for the user: everything before the first `" - "`.
pub fn user_part(message: &str) -> &str {
    match message.split_once(" - ") {
        Some((head, _)) => head,
        None => message,
    }
}

pub struct MessageHandle {
    title: String,
    text: String,
    timeout_seconds: u64,
    cancel: Option<Sender<()>>,
    countdown: Option<JoinHandle<Dismissal>>,
}

impl MessageHandle {
    /// Starts the countdown when `timeout_seconds > 0`.
    pub fn new(title: &str, text: &str, timeout_seconds: u64) -> Self {
        let mut handle = MessageHandle {
            title: title.to_string(),
            text: text.to_string(),
            timeout_seconds,
            cancel: None,
            countdown: None,
        };
        if timeout_seconds > 0 {
            let (tx, rx) = mpsc::channel::<()>();
            let title = handle.title.clone();
            let countdown = thread::spawn(move || {
                match rx.recv_timeout(Duration::from_secs(timeout_seconds)) {
                    Err(RecvTimeoutError::Timeout) => {
                        debug!("message '{}' accepted after {} s", title, timeout_seconds);
                        Dismissal::Timeout
                    }
                    // dismissed, or the handle was dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => Dismissal::User,
                }
            });
            handle.cancel = Some(tx);
            handle.countdown = Some(countdown);
        }
        handle
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text actually shown to the user.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Closes the message. Reports `Timeout` if the countdown fired before the call.
    pub fn dismiss(mut self) -> Dismissal {
        if let Some(cancel) = self.cancel.take() {
            // the receiver is gone once the countdown has fired
            let _ = cancel.send(());
        }
        self.join_countdown().unwrap_or(Dismissal::User)
    }

    /// Blocks until the countdown ends. `None` when there is no countdown.
    pub fn wait(mut self) -> Option<Dismissal> {
        let result = self.join_countdown();
        self.cancel.take();
        result
    }

    fn join_countdown(&mut self) -> Option<Dismissal> {
        let countdown = self.countdown.take()?;
        match countdown.join() {
            Ok(dismissal) => Some(dismissal),
            Err(_) => {
                error!("countdown of message '{}' panicked", self.title);
                Some(Dismissal::User)
            }
        }
    }
}

/// Sink that writes every message to the log and keeps no widget.
/// The full message is logged; the handle holds only the user-facing part.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMessageSink;

impl MessageSink for LogMessageSink {
    fn display(&self, title: &str, message: &str, severity: Severity, timeout_seconds: u64) -> MessageHandle {
        match severity {
            Severity::Error => error!("{}: {}", title, message),
            Severity::Warning => warn!("{}: {}", title, message),
            Severity::Information => info!("{}: {}", title, message),
        }
        MessageHandle::new(title, user_part(message), timeout_seconds)
    }
}

/// Severity a failed operation is reported with: missing plot is a warning, the rest are errors.
pub fn severity_of(err: &PlotError) -> Severity {
    match err.kind() {
        ErrorKind::NoPlotYet => Severity::Warning,
        _ => Severity::Error,
    }
}

/// Forwards a failed operation to `sink`, titled with the error kind.
pub fn notify_error(sink: &dyn MessageSink, err: &PlotError, timeout_seconds: u64) -> MessageHandle {
    sink.display(&err.kind().to_string(), &err.to_string(), severity_of(err), timeout_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Instant;
    use strum::IntoEnumIterator;

    #[derive(Default)]
    struct RecordingSink {
        shown: RefCell<Vec<(String, String, Severity)>>,
    }

    impl MessageSink for RecordingSink {
        fn display(&self, title: &str, message: &str, severity: Severity, timeout_seconds: u64) -> MessageHandle {
            self.shown
                .borrow_mut()
                .push((title.to_string(), message.to_string(), severity));
            MessageHandle::new(title, user_part(message), timeout_seconds)
        }
    }

    #[test]
    fn test_user_part() {
        assert_eq!(user_part("Please enter a function - the field is empty"), "Please enter a function");
        assert_eq!(user_part("no detail"), "no detail");
        assert_eq!(user_part("x-range - xmin must be less than xmax"), "x-range");
    }

    #[test]
    fn test_severity_names() {
        let names: Vec<String> = Severity::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["Error", "Warning", "Information"]);
    }

    #[test]
    fn test_log_sink_shows_user_part() {
        let handle = LogMessageSink.display(
            "Invalid expression",
            "Please enter a valid function - unexpected ')' at position 3",
            Severity::Error,
            0,
        );
        assert_eq!(handle.title(), "Invalid expression");
        assert_eq!(handle.text(), "Please enter a valid function");
        assert!(!handle.has_countdown());
        assert_eq!(handle.dismiss(), Dismissal::User);
    }

    #[test]
    fn test_zero_timeout_has_nothing_to_wait_for() {
        let handle = MessageHandle::new("Zoom in", "Please plot a function first", 0);
        assert_eq!(handle.timeout_seconds(), 0);
        assert_eq!(handle.wait(), None);
    }

    #[test]
    fn test_dismiss_cancels_countdown() {
        let start = Instant::now();
        let handle = MessageHandle::new("Save", "saved", 30);
        assert!(handle.has_countdown());
        assert_eq!(handle.dismiss(), Dismissal::User);
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn test_countdown_accepts_message() {
        let handle = MessageHandle::new("Info", "done", 1);
        assert_eq!(handle.wait(), Some(Dismissal::Timeout));
    }

    #[test]
    fn test_notify_error() {
        let sink = RecordingSink::default();
        let handle = notify_error(&sink, &PlotError::NoPlotYet("zoom in".to_string()), 0);
        assert_eq!(handle.text(), "Please plot a function first");
        let handle2 = notify_error(&sink, &PlotError::EmptyExpression, 0);
        assert_eq!(handle2.title(), "Empty expression");
        let shown = sink.shown.borrow();
        assert_eq!(shown[0].0, "No plot");
        assert_eq!(shown[0].1, "Please plot a function first - cannot zoom in before plotting");
        assert_eq!(shown[0].2, Severity::Warning);
        assert_eq!(shown[1].2, Severity::Error);
    }
}
