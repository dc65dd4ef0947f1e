use std::collections::VecDeque;
use std::time::Instant;

/// Oldest entries are dropped past this; the panel is a session diagnostic,
/// not an archive.
const MAX_ENTRIES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub(crate) struct LogEntry {
    pub(crate) level: LogLevel,
    /// Seconds since app start, pre-rendered as "t+12s".
    pub(crate) stamp: String,
    pub(crate) message: String,
}

/// Bounded in-app event log backing the diagnostics panel.
pub(crate) struct EventLog {
    started: Instant,
    entries: VecDeque<LogEntry>,
    pub(crate) visible: bool,
}

impl EventLog {
    pub(crate) fn new(started: Instant) -> Self {
        Self {
            started,
            entries: VecDeque::new(),
            visible: false,
        }
    }

    pub(crate) fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message.into());
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    fn push(&mut self, level: LogLevel, message: String) {
        let stamp = format!("t+{}s", self.started.elapsed().as_secs());
        self.entries.push_back(LogEntry {
            level,
            stamp,
            message,
        });
        while self.entries.len() > MAX_ENTRIES {
            self.entries.pop_front();
        }
    }
}
