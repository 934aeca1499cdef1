//! Child-scoped environment normalization.
//!
//! The patch is applied to the spawned `Command` only; the launcher's own
//! environment is never mutated, so nothing leaks to sibling processes or
//! later invocations in the same shell session.
//!
//! Two operations, in this order:
//! - scrub: unset variables known to break interpreter startup when set to
//!   unexpected values (the classic case is `PYTHONHOME` pinned to an empty
//!   string by a stray wrapper script),
//! - defaults: fill variables the wrapped application expects, only when
//!   the caller's environment does not supply them. Caller values always win.

use std::path::PathBuf;
use std::process::Command;

use crate::candidates::Runtime;
use crate::config::{env_keys, loader, DEFAULT_API_BASE};

/// Environment patch for one child invocation.
#[derive(Debug, Clone, Default)]
pub struct EnvPatch {
    scrub: Vec<String>,
    defaults: Vec<(String, String)>,
}

impl EnvPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unset `key` in the child's environment block.
    pub fn scrub(mut self, key: impl Into<String>) -> Self {
        self.scrub.push(key.into());
        self
    }

    /// Set `key` in the child's environment only if the caller did not
    /// supply it.
    pub fn default_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.push((key.into(), value.into()));
        self
    }

    /// Normalization rules per runtime, plus the application-level defaults
    /// every runtime gets.
    pub fn for_runtime(runtime: Runtime) -> Self {
        let patch = Self::new();
        let patch = match runtime {
            Runtime::Python => patch.scrub("PYTHONHOME").scrub("PYTHONPATH"),
            Runtime::Node => {
                let patch = patch.scrub("NODE_REPL_HISTORY");
                match npm_global_node_modules() {
                    Some(dir) => {
                        patch.default_value("NODE_PATH", dir.to_string_lossy().to_string())
                    }
                    None => patch,
                }
            }
            Runtime::PowerShell => patch.scrub("PSModulePath"),
        };
        // A caller supplying the base URL under any accepted alias counts
        // as having supplied it; only a fully absent key gets the default.
        if loader::env_is_set(env_keys::app::BASE_URL, env_keys::app::BASE_URL_ALIASES) {
            patch
        } else {
            patch.default_value(env_keys::app::BASE_URL, DEFAULT_API_BASE)
        }
    }

    pub fn scrubbed(&self) -> &[String] {
        &self.scrub
    }

    pub fn defaults(&self) -> &[(String, String)] {
        &self.defaults
    }

    /// Apply the patch to the child command. The presence check for
    /// defaults runs against the caller's environment, which `Command`
    /// inherits; a caller-supplied value is never overwritten.
    pub fn apply(&self, cmd: &mut Command) {
        for key in &self.scrub {
            tracing::debug!(key = %key, "scrubbing from child environment");
            cmd.env_remove(key);
        }
        for (key, value) in &self.defaults {
            if std::env::var_os(key).is_none() {
                tracing::debug!(key = %key, "filling default in child environment");
                cmd.env(key, value);
            }
        }
    }
}

/// npm's global `node_modules` directory, used to default `NODE_PATH` for
/// Node children. Only offered when the directory actually exists.
fn npm_global_node_modules() -> Option<PathBuf> {
    #[cfg(windows)]
    let dir = dirs::data_dir()?.join("npm").join("node_modules");
    #[cfg(not(windows))]
    let dir = PathBuf::from("/usr/local/lib/node_modules");

    dir.is_dir().then_some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn child_env(cmd: &Command, key: &str) -> Option<Option<String>> {
        cmd.get_envs()
            .find(|(k, _)| *k == OsStr::new(key))
            .map(|(_, v)| v.map(|v| v.to_string_lossy().to_string()))
    }

    #[test]
    fn test_scrub_removes_key_from_child_block() {
        let mut cmd = Command::new("true");
        EnvPatch::new().scrub("LLTEST_SCRUB_ME").apply(&mut cmd);
        // env_remove shows up as an explicit None entry.
        assert_eq!(child_env(&cmd, "LLTEST_SCRUB_ME"), Some(None));
    }

    #[test]
    fn test_default_fills_only_when_caller_absent() {
        std::env::remove_var("LLTEST_DEFAULT_ABSENT");
        let mut cmd = Command::new("true");
        EnvPatch::new()
            .default_value("LLTEST_DEFAULT_ABSENT", "fallback")
            .apply(&mut cmd);
        assert_eq!(
            child_env(&cmd, "LLTEST_DEFAULT_ABSENT"),
            Some(Some("fallback".to_string()))
        );
    }

    #[test]
    fn test_default_never_overwrites_caller_value() {
        std::env::set_var("LLTEST_DEFAULT_SET", "caller-wins");
        let mut cmd = Command::new("true");
        EnvPatch::new()
            .default_value("LLTEST_DEFAULT_SET", "fallback")
            .apply(&mut cmd);
        // No explicit entry: the child simply inherits the caller's value.
        assert_eq!(child_env(&cmd, "LLTEST_DEFAULT_SET"), None);
        std::env::remove_var("LLTEST_DEFAULT_SET");
    }

    #[test]
    fn test_apply_leaves_parent_environment_untouched() {
        std::env::remove_var("LLTEST_PARENT_CLEAN");
        let mut cmd = Command::new("true");
        EnvPatch::new()
            .default_value("LLTEST_PARENT_CLEAN", "child-only")
            .scrub("PATH_NOT_REALLY")
            .apply(&mut cmd);
        assert!(std::env::var_os("LLTEST_PARENT_CLEAN").is_none());
    }

    #[test]
    fn test_python_rules_scrub_home_and_path() {
        let patch = EnvPatch::for_runtime(Runtime::Python);
        assert!(patch.scrubbed().contains(&"PYTHONHOME".to_string()));
        assert!(patch.scrubbed().contains(&"PYTHONPATH".to_string()));
    }

    #[test]
    fn test_base_url_default_and_alias_suppression() {
        std::env::remove_var("BASE_URL");
        for alias in env_keys::app::BASE_URL_ALIASES {
            std::env::remove_var(alias);
        }
        for runtime in Runtime::all() {
            let patch = EnvPatch::for_runtime(*runtime);
            assert!(
                patch
                    .defaults()
                    .iter()
                    .any(|(k, v)| k == "BASE_URL" && v == DEFAULT_API_BASE),
                "{} must default BASE_URL",
                runtime.as_str()
            );
        }

        // A base URL supplied under an alias counts as caller-supplied.
        std::env::set_var("OPENAI_API_BASE", "https://example.test/v1");
        let patch = EnvPatch::for_runtime(Runtime::Node);
        assert!(!patch.defaults().iter().any(|(k, _)| k == "BASE_URL"));
        std::env::remove_var("OPENAI_API_BASE");
    }
}
