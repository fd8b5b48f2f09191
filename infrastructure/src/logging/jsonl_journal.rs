//! Append-only run journal stored as JSON Lines.
//!
//! Every record is an envelope:
//!
//! ```json
//! {"seq":0,"timestamp":"2026-01-01T00:00:00.000Z","run_id":1,"event":"run_submitted","details":{...}}
//! ```
//!
//! `seq` counts records written by this journal instance, so a reader can
//! tell interleaved runs apart from reordered lines.

use serde::Serialize;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tourgen_application::{RunEvent, RunJournal};
use tracing::warn;

#[derive(Serialize)]
struct JournalRecord<'a> {
    seq: u64,
    timestamp: String,
    run_id: u64,
    event: &'a str,
    details: &'a Value,
}

/// [`RunJournal`] writing one envelope per line to a file.
pub struct JsonlRunJournal {
    writer: Mutex<BufWriter<File>>,
    next_seq: AtomicU64,
    path: PathBuf,
}

impl JsonlRunJournal {
    /// Open the journal for appending, creating the file and its parent
    /// directories as needed. Returns `None` when the file can't be opened;
    /// callers fall back to running without a journal.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(path = %parent.display(), error = %e, "Run journal directory unavailable");
            return None;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .inspect_err(|e| warn!(path = %path.display(), error = %e, "Run journal unavailable"))
            .ok()?;

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            next_seq: AtomicU64::new(0),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunJournal for JsonlRunJournal {
    fn record(&self, event: RunEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };

        // Sequence is taken under the lock so file order matches seq order
        let record = JournalRecord {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            run_id: event.run_id,
            event: event.kind,
            details: &event.details,
        };

        match serde_json::to_string(&record) {
            Ok(line) => {
                if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
                    warn!(path = %self.path.display(), error = %e, "Run journal write failed");
                }
            }
            Err(e) => warn!(event = event.kind, error = %e, "Run journal record not serializable"),
        }
    }
}
