//! Observability: tracing init and the invocation audit log.
//!
//! Uses config::ObservabilityConfig for LAUNCHLITE_QUIET, LOG_LEVEL,
//! LOG_JSON, AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::invoke::InvocationSpec;

static AUDIT_PATH: OnceLock<Option<String>> = OnceLock::new();

/// Initialize tracing. Call once at process startup.
/// When LAUNCHLITE_QUIET=1, only WARN and above are logged.
pub fn init_tracing() {
    let cfg = ObservabilityConfig::from_env();
    let level: String = if cfg.quiet {
        "launchlite=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    };
}

fn audit_path() -> Option<&'static str> {
    AUDIT_PATH
        .get_or_init(|| {
            let path = ObservabilityConfig::from_env().audit_log?;
            if let Some(parent) = Path::new(&path).parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            Some(path)
        })
        .as_deref()
}

fn append_audit(record: serde_json::Value) {
    let Some(path) = audit_path() else {
        return;
    };
    let line = format!("{record}\n");
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| f.write_all(line.as_bytes()));
    if let Err(e) = result {
        tracing::warn!("audit log write failed: {e}");
    }
}

/// Record the resolved interpreter and final command line, just before spawn.
pub fn audit_invocation(runtime: &str, spec: &InvocationSpec) {
    append_audit(json!({
        "ts": Utc::now().to_rfc3339(),
        "event": "invocation",
        "runtime": runtime,
        "interpreter": spec.interpreter.path.to_string_lossy(),
        "origin": spec.interpreter.origin.as_str(),
        "cmdline": spec.render(),
    }));
}

/// Record the child's exit code after it terminates.
pub fn audit_completed(runtime: &str, exit_code: i32) {
    append_audit(json!({
        "ts": Utc::now().to_rfc3339(),
        "event": "completed",
        "runtime": runtime,
        "exit_code": exit_code,
    }));
}
