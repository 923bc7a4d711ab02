//! JSONL transcript writer for loop events.
//!
//! Every [`ConversationEvent`] becomes one JSON line carrying the event's
//! payload fields plus `type`, `run`, `seq` and `timestamp`. The file is
//! opened in append mode so several runs can share one transcript; `run`
//! tells them apart.

use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use toolloop_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use tracing::warn;

/// Appends one JSON object per event to a file.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; each line is flushed as it is
/// written, and the writer flushes again on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run_id: String,
    seq: AtomicU64,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run_id: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
            seq: AtomicU64::new(0),
        })
    }

    /// Override the run identifier stamped on every record.
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("run".to_string(), Value::from(self.run_id.as_str()));
        map.insert("seq".to_string(), Value::from(seq));
        map.insert("timestamp".to_string(), Value::from(timestamp));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let record = self.record(event);
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!(path = %self.path.display(), error = %e, "Could not write transcript line");
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_records_carry_type_run_and_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let logger = JsonlConversationLogger::open(&path)
            .unwrap()
            .with_run_id("run-1");

        logger.log(ConversationEvent::new(
            "model_output",
            json!({"iteration": 1, "text": "Final Answer: 4"}),
        ));
        logger.log(ConversationEvent::new(
            "tool_call",
            json!({"tool": "calculate", "args": "2+2"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "model_output");
        assert_eq!(records[0]["text"], "Final Answer: 4");
        assert_eq!(records[0]["run"], "run-1");
        assert_eq!(records[0]["seq"], 0);
        assert_eq!(records[1]["tool"], "calculate");
        assert_eq!(records[1]["seq"], 1);
        assert!(records[1]["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_non_object_payload_goes_under_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new("note", json!("just a string")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "just a string");
    }

    #[test]
    fn test_appends_across_runs_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("runs.jsonl");

        for run in ["a", "b"] {
            let logger = JsonlConversationLogger::open(&path)
                .unwrap()
                .with_run_id(run);
            logger.log(ConversationEvent::new("loop_finished", json!({})));
        }

        let runs: Vec<_> = read_lines(&path)
            .iter()
            .map(|r| r["run"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(runs, vec!["a", "b"]);
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlConversationLogger::open(blocker.join("runs.jsonl")).is_err());
    }
}
