//! Structured configuration derived from the environment.

use std::ffi::OsString;
use std::path::PathBuf;

use super::{env_keys, loader};
use crate::candidates::Runtime;

/// Default API base for the wrapped application, applied only when the
/// caller's environment carries no `BASE_URL` (or alias).
pub const DEFAULT_API_BASE: &str = "https://api.deepseek.com/v1";

/// Launcher configuration. Built fresh on each invocation; there is no
/// persisted state.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Which interpreter family to dispatch to.
    pub runtime: Runtime,
    /// Entry-point script handed to the interpreter before the forwarded
    /// args. `None` means the interpreter receives the args directly.
    pub entry_point: Option<PathBuf>,
    /// Operator-pinned interpreter path, prepended as the highest-priority
    /// candidate.
    pub interpreter_override: Option<String>,
    /// Extra fixed flags appended after the built-in per-runtime flags,
    /// whitespace-separated in the environment.
    pub extra_flags: Vec<OsString>,
    /// Verbose resolution diagnostics on stderr.
    pub verbose: bool,
}

impl LauncherConfig {
    pub fn from_env() -> Self {
        loader::load_dotenv();

        let runtime = match loader::env_optional(env_keys::LAUNCHLITE_RUNTIME, &[]) {
            Some(name) => Runtime::parse(&name).unwrap_or_else(|| {
                tracing::warn!("Invalid LAUNCHLITE_RUNTIME: {}, using node", name);
                Runtime::Node
            }),
            None => Runtime::Node,
        };

        let override_key = match runtime {
            Runtime::Node => env_keys::interpreter::NODE,
            Runtime::Python => env_keys::interpreter::PYTHON,
            Runtime::PowerShell => env_keys::interpreter::POWERSHELL,
        };

        Self {
            runtime,
            entry_point: loader::env_optional(env_keys::LAUNCHLITE_ENTRY, &[]).map(PathBuf::from),
            interpreter_override: loader::env_optional(override_key, &[]),
            extra_flags: loader::env_optional(env_keys::LAUNCHLITE_EXTRA_FLAGS, &[])
                .map(|s| s.split_whitespace().map(OsString::from).collect())
                .unwrap_or_default(),
            verbose: loader::env_bool(env_keys::LAUNCHLITE_VERBOSE, &[], false),
        }
    }

    /// Fixed flags prepended ahead of the entry point and forwarded args:
    /// built-in per-runtime flags first, then `extra_flags`.
    pub fn fixed_flags(&self) -> Vec<OsString> {
        let mut flags: Vec<OsString> = match self.runtime {
            Runtime::Node => Vec::new(),
            // Force UTF-8 mode: the legacy wrapper scripts fought GBK
            // console encodings on every Windows host.
            Runtime::Python => vec!["-X".into(), "utf8".into()],
            Runtime::PowerShell => {
                vec!["-NoProfile".into(), "-ExecutionPolicy".into(), "Bypass".into()]
            }
        };
        flags.extend(self.extra_flags.iter().cloned());
        // -File must sit immediately before the script path, so it goes
        // last — after extra_flags — and only when an entry point exists.
        if self.runtime == Runtime::PowerShell && self.entry_point.is_some() {
            flags.push("-File".into());
        }
        flags
    }
}

/// Logging and audit configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self {
            quiet: loader::env_bool(env_keys::observability::LAUNCHLITE_QUIET, &[], false),
            log_level: loader::env_or(
                env_keys::observability::LAUNCHLITE_LOG_LEVEL,
                &[],
                || "launchlite=info".to_string(),
            ),
            log_json: loader::env_bool(env_keys::observability::LAUNCHLITE_LOG_JSON, &[], false),
            audit_log: loader::env_optional(env_keys::observability::LAUNCHLITE_AUDIT_LOG, &[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_fixed_flags_force_utf8() {
        let config = LauncherConfig {
            runtime: Runtime::Python,
            entry_point: None,
            interpreter_override: None,
            extra_flags: vec![],
            verbose: false,
        };
        assert_eq!(config.fixed_flags(), vec![OsString::from("-X"), "utf8".into()]);
    }

    #[test]
    fn test_powershell_file_flag_only_with_entry_point() {
        let mut config = LauncherConfig {
            runtime: Runtime::PowerShell,
            entry_point: None,
            interpreter_override: None,
            extra_flags: vec![],
            verbose: false,
        };
        assert!(!config.fixed_flags().contains(&OsString::from("-File")));

        config.entry_point = Some(PathBuf::from("entry.ps1"));
        let flags = config.fixed_flags();
        assert_eq!(flags.last(), Some(&OsString::from("-File")));
    }

    #[test]
    fn test_powershell_extra_flags_never_split_file_from_script() {
        let config = LauncherConfig {
            runtime: Runtime::PowerShell,
            entry_point: Some(PathBuf::from("entry.ps1")),
            interpreter_override: None,
            extra_flags: vec!["-Extra".into()],
            verbose: false,
        };
        // -File must stay adjacent to the entry point that argv() appends
        // right after the fixed flags; extra flags go before it.
        assert_eq!(
            config.fixed_flags(),
            vec![
                OsString::from("-NoProfile"),
                "-ExecutionPolicy".into(),
                "Bypass".into(),
                "-Extra".into(),
                "-File".into(),
            ]
        );
    }

    #[test]
    fn test_extra_flags_follow_builtin_flags() {
        let config = LauncherConfig {
            runtime: Runtime::Python,
            entry_point: None,
            interpreter_override: None,
            extra_flags: vec!["-B".into()],
            verbose: false,
        };
        assert_eq!(
            config.fixed_flags(),
            vec![OsString::from("-X"), "utf8".into(), "-B".into()]
        );
    }
}
