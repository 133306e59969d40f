use std::{
    fmt,
    io::{self, Write},
    sync::Mutex,
};

use tracing::{debug, error};

use crate::services::{Navigator, Notifier, Severity, ViewSpec};

/// Prints notifications as `[severity] message` lines.
pub struct ConsoleNotifier<W> {
    out: Mutex<W>,
}

impl ConsoleNotifier<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleNotifier::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        ConsoleNotifier { out: Mutex::new(out) }
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn notify(&self, message: &str, severity: Severity) {
        debug!(%severity, "{}", message);
        write_line(&self.out, format_args!("[{}] {}", severity, message));
    }
}

/// Hands views to the host by printing them as JSON lines.
pub struct JsonNavigator<W> {
    out: Mutex<W>,
}

impl JsonNavigator<io::Stdout> {
    pub fn stdout() -> Self {
        JsonNavigator::new(io::stdout())
    }
}

impl<W: Write + Send> JsonNavigator<W> {
    pub fn new(out: W) -> Self {
        JsonNavigator { out: Mutex::new(out) }
    }
}

impl<W: Write + Send> Navigator for JsonNavigator<W> {
    fn navigate(&self, view: ViewSpec) {
        let json = match serde_json::to_string(&view) {
            Ok(json) => json,
            Err(e) => {
                error!("Could not serialize view for {}: {}", view.collection, e);
                return;
            }
        };

        write_line(&self.out, format_args!("{}", json));
    }
}

fn write_line<W: Write>(out: &Mutex<W>, line: fmt::Arguments) {
    let mut out = match out.lock() {
        Ok(out) => out,
        Err(e) => {
            error!("Output unavailable: {}", e);
            return;
        }
    };

    if let Err(e) = writeln!(out, "{}", line) {
        error!("Could not write output: {}", e);
    }
}
