//! One-line JSON log records on stderr, captured by the Lambda host.

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

pub fn log_info(component: &str, event: &str, details: Value) {
    emit(Level::Info, component, event, details);
}

pub fn log_warn(component: &str, event: &str, details: Value) {
    emit(Level::Warn, component, event, details);
}

pub fn log_error(component: &str, event: &str, details: Value) {
    emit(Level::Error, component, event, details);
}

fn emit(level: Level, component: &str, event: &str, details: Value) {
    eprintln!("{}", log_line(level, component, event, details));
}

fn log_line(level: Level, component: &str, event: &str, details: Value) -> Value {
    json!({
        "component": component,
        "level": level.as_str(),
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_line_carries_level_and_details() {
        let line = log_line(
            Level::Warn,
            "record_writer",
            "summary_write_failed",
            json!({"key": "my file.txt"}),
        );

        assert_eq!(line["level"], "warn");
        assert_eq!(line["component"], "record_writer");
        assert_eq!(line["event"], "summary_write_failed");
        assert_eq!(line["details"]["key"], "my file.txt");
        assert!(line["timestamp"].as_str().is_some());
    }
}
