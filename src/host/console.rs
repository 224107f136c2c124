//! Bridges engine log output onto the host's script console.

use crate::host::api::HostApplication;
use std::sync::Arc;

/// Log level for host console lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConsoleLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl ConsoleLevel {
    fn label(self) -> &'static str {
        match self {
            ConsoleLevel::Debug => "Debug",
            ConsoleLevel::Info => "Info",
            ConsoleLevel::Warning => "Warning",
            ConsoleLevel::Error => "Error",
        }
    }
}

/// Writes level-tagged, timestamped lines to the host console.
///
/// The console is part of the host UI, so every write is marshaled through
/// the host's run-on-main-thread facility; callers may emit from any thread
/// and the single display call still lands on the main thread.
pub struct HostConsoleBridge {
    host: Arc<dyn HostApplication>,
}

impl HostConsoleBridge {
    pub fn new(host: Arc<dyn HostApplication>) -> Self {
        Self { host }
    }

    pub fn emit(&self, level: ConsoleLevel, message: &str) {
        let line = format_line(level, message);
        let host = self.host.clone();
        self.host
            .run_on_main_thread(Box::new(move || host.write_console(&line)));
    }
}

fn format_line(level: ConsoleLevel, message: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("{timestamp} - Stagelink {} | {message}", level.label())
}
