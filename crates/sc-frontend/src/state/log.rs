//! Status log

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Append-only list of status lines, capped at [`StatusLog::MAX_ENTRIES`]
#[derive(Debug, Clone, Default)]
pub struct StatusLog {
    entries: Vec<LogEntry>,
}

impl StatusLog {
    pub const MAX_ENTRIES: usize = 500;

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        if self.entries.len() == Self::MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push(LogEntry {
            level,
            message: message.into(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_drops_oldest() {
        let mut log = StatusLog::default();
        for i in 0..StatusLog::MAX_ENTRIES + 3 {
            log.info(format!("line {i}"));
        }
        assert_eq!(log.entries().len(), StatusLog::MAX_ENTRIES);
        assert_eq!(log.entries()[0].message, "line 3");
    }
}
