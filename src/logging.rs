//! Structured JSON-lines logging for the panel runtime.
//!
//! Every entry carries a timestamp, run id, and sequence number so a run's
//! output can be filtered and replayed in order. Lines go to stdout and, when
//! the log directory is writable, to `$LOG_DIR/<run-id>/events.jsonl`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

pub struct RunFiles {
    events: Mutex<BufWriter<File>>,
}

impl RunFiles {
    pub fn write_line(&self, line: &str) {
        if let Ok(mut w) = self.events.lock() {
            let _ = writeln!(w, "{}", line);
            let _ = w.flush();
        }
    }
}

/// Create `<dir>/<run_id>/events.jsonl` and return the open writer set.
pub fn open_run_files(dir: &Path, run_id: &str) -> std::io::Result<RunFiles> {
    let run_dir = dir.join(run_id);
    create_dir_all(&run_dir)?;
    let events = File::create(run_dir.join("events.jsonl"))?;
    Ok(RunFiles { events: Mutex::new(BufWriter::new(events)) })
}

struct RunContext {
    run_id: String,
    files: Option<RunFiles>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S%3fZ"));
        let dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "out/runs".to_string());
        // An unwritable log dir degrades to stdout-only logging.
        let files = open_run_files(Path::new(&dir), &run_id).ok();
        RunContext { run_id, files }
    })
}

/// RFC3339 timestamp with milliseconds.
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Epoch milliseconds.
pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured entry if `level` passes the LOG_LEVEL filter.
pub fn log(level: Level, module: &str, fields: Map<String, Value>) {
    if level < Level::from_env() {
        return;
    }
    emit_record(level, module, fields);
}

/// Info-level entry tagged with a module name.
pub fn json_log(module: &str, fields: Map<String, Value>) {
    emit_record(Level::Info, module, fields);
}

fn emit_record(level: Level, module: &str, fields: Map<String, Value>) {
    let ctx = ensure_run_context();
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(ctx.run_id.clone()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("module".to_string(), json!(module));
    for (k, v) in fields {
        entry.insert(k, v);
    }
    let line = Value::Object(entry).to_string();
    if let Some(files) = &ctx.files {
        files.write_line(&line);
    }
    println!("{}", line);
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut m = Map::new();
    for (k, v) in pairs {
        m.insert((*k).to_string(), v.clone());
    }
    m
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

pub fn v_bool(b: bool) -> Value {
    Value::Bool(b)
}
