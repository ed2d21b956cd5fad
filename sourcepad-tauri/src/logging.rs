use crate::options::ensure_parent_dir;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// GUI デバッグログを JSON Lines 形式で出力するロガー
///
/// 1 行 1 イベント: `{"tag": ..., "ts": <ms>, "payload": ...}`
#[derive(Debug)]
pub struct DebugLogger {
    path: PathBuf,
}

#[derive(Serialize)]
struct DebugRecord<'a, T: Serialize> {
    tag: &'a str,
    ts: u128,
    payload: &'a T,
}

impl DebugLogger {
    pub fn new(path: PathBuf) -> io::Result<Self> {
        ensure_parent_dir(&path)?;
        Ok(Self { path })
    }

    pub fn log_event<T: Serialize>(&self, tag: &str, payload: &T) -> io::Result<()> {
        let record = DebugRecord {
            tag,
            ts: timestamp_ms(),
            payload,
        };
        let line = serde_json::to_string(&record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis())
        .unwrap_or_default()
}
