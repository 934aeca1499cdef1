//! Spawn the resolved interpreter and forward argv, stdio, and exit code.
//!
//! Final argv is `fixed_flags ++ [entry_point] ++ args`: the caller's
//! arguments are never removed, reordered, or interleaved. Stdio is
//! inherited so interactive and piped use both work; the launcher blocks
//! indefinitely — the child may be a long-running interactive session.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::env::EnvPatch;
use crate::error::LaunchError;
use crate::resolver::ResolvedInterpreter;

/// Exit code when the launcher itself fails to resolve or execute the
/// interpreter. 127 follows the shell "command not found" convention;
/// a child's own 127 still round-trips unchanged, since ChildFailure is
/// propagated without passing through this constant.
pub const LAUNCH_FAILURE_CODE: i32 = 127;

/// One fully-specified child invocation. Constructed fresh per launch and
/// discarded when the child exits.
#[derive(Debug, Clone)]
pub struct InvocationSpec {
    pub interpreter: ResolvedInterpreter,
    pub entry_point: Option<PathBuf>,
    pub fixed_flags: Vec<OsString>,
    pub args: Vec<OsString>,
}

impl InvocationSpec {
    pub fn new(interpreter: ResolvedInterpreter) -> Self {
        Self {
            interpreter,
            entry_point: None,
            fixed_flags: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn entry_point(mut self, entry: Option<PathBuf>) -> Self {
        self.entry_point = entry;
        self
    }

    pub fn fixed_flags(mut self, flags: Vec<OsString>) -> Self {
        self.fixed_flags = flags;
        self
    }

    pub fn args(mut self, args: Vec<OsString>) -> Self {
        self.args = args;
        self
    }

    /// Final argv, minus the interpreter itself.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = self.fixed_flags.clone();
        if let Some(entry) = &self.entry_point {
            argv.push(entry.clone().into_os_string());
        }
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Human-readable command line for verbose and audit output.
    pub fn render(&self) -> String {
        let mut parts = vec![self.interpreter.path.to_string_lossy().to_string()];
        parts.extend(self.argv().iter().map(|a| a.to_string_lossy().to_string()));
        parts.join(" ")
    }
}

/// Spawn with inherited stdio and block until the child exits.
///
/// Returns the child's exit code verbatim — no translation, no swallowing
/// of nonzero codes. On Unix a signal death maps to `128 + signo`, matching
/// shell convention. No timeout, no retries.
pub fn run(spec: &InvocationSpec, patch: &EnvPatch) -> Result<i32, LaunchError> {
    let mut cmd = Command::new(&spec.interpreter.path);
    cmd.args(spec.argv());
    patch.apply(&mut cmd);

    // Stdio defaults to inherited for `status()`: stdin/stdout/stderr
    // connect straight to the parent's streams.
    let status = cmd.status().map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LaunchError::NotFound {
                interpreter: spec.interpreter.path.clone(),
            }
        } else {
            LaunchError::Spawn {
                interpreter: spec.interpreter.path.clone(),
                source,
            }
        }
    })?;

    Ok(exit_code_of(status))
}

fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    // Unreachable in practice: on Windows code() is always Some.
    LAUNCH_FAILURE_CODE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::CandidateOrigin;

    fn interpreter(path: &str) -> ResolvedInterpreter {
        ResolvedInterpreter {
            path: PathBuf::from(path),
            origin: CandidateOrigin::PathLookup,
        }
    }

    #[test]
    fn test_launch_failure_code_is_documented_sentinel() {
        assert_eq!(LAUNCH_FAILURE_CODE, 127);
    }

    #[test]
    fn test_argv_is_fixed_prefix_then_entry_then_args() {
        let spec = InvocationSpec::new(interpreter("node"))
            .fixed_flags(vec!["--no-warnings".into()])
            .entry_point(Some(PathBuf::from("cli.js")))
            .args(vec!["run".into(), "--flag".into(), "value with spaces".into()]);

        assert_eq!(
            spec.argv(),
            vec![
                OsString::from("--no-warnings"),
                "cli.js".into(),
                "run".into(),
                "--flag".into(),
                "value with spaces".into(),
            ]
        );
    }

    #[test]
    fn test_argv_without_entry_point_is_flags_then_args() {
        let spec = InvocationSpec::new(interpreter("node"))
            .args(vec!["--version".into()]);
        assert_eq!(spec.argv(), vec![OsString::from("--version")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_round_trips() {
        for code in [0, 1, 42, 127, 255] {
            let spec = InvocationSpec::new(interpreter("sh")).args(vec![
                "-c".into(),
                format!("exit {code}").into(),
            ]);
            let got = run(&spec, &EnvPatch::new()).expect("spawn sh");
            assert_eq!(got, code, "child exit {code} must pass through exactly");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_forwarded_args_reach_child_unmodified() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("argv.txt");
        // sh -c 'printf ...' argv0 <forwarded...>: one line per argument,
        // so an embedded space must stay inside a single line.
        let script = format!(r#"printf '%s\n' "$@" > {}"#, out.display());
        let spec = InvocationSpec::new(interpreter("sh"))
            .fixed_flags(vec!["-c".into(), script.into(), "launchlite".into()])
            .args(vec!["run".into(), "--flag".into(), "value with spaces".into()]);

        let code = run(&spec, &EnvPatch::new()).expect("spawn sh");
        assert_eq!(code, 0);

        let written = std::fs::read_to_string(&out).expect("read argv capture");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["run", "--flag", "value with spaces"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_child_env_sees_defaults_but_not_scrubbed_keys() {
        std::env::set_var("LLTEST_INVOKE_SCRUB", "present-in-parent");
        std::env::remove_var("LLTEST_INVOKE_DEFAULT");
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("env.txt");
        let script = format!(
            r#"printf '%s|%s' "${{LLTEST_INVOKE_SCRUB-unset}}" "${{LLTEST_INVOKE_DEFAULT-unset}}" > {}"#,
            out.display()
        );
        let patch = EnvPatch::new()
            .scrub("LLTEST_INVOKE_SCRUB")
            .default_value("LLTEST_INVOKE_DEFAULT", "filled");
        let spec = InvocationSpec::new(interpreter("sh"))
            .fixed_flags(vec!["-c".into(), script.into()]);

        let code = run(&spec, &patch).expect("spawn sh");
        assert_eq!(code, 0);
        assert_eq!(std::fs::read_to_string(&out).expect("read"), "unset|filled");

        // Parent environment is untouched by normalization.
        assert_eq!(
            std::env::var("LLTEST_INVOKE_SCRUB").as_deref(),
            Ok("present-in-parent")
        );
        std::env::remove_var("LLTEST_INVOKE_SCRUB");
    }

    #[test]
    fn test_missing_interpreter_is_not_found_error() {
        let spec = InvocationSpec::new(interpreter("launchlite-no-such-interpreter"));
        let err = run(&spec, &EnvPatch::new()).expect_err("must fail");
        let msg = err.to_string();
        assert!(msg.contains("not found"), "diagnostic must say not found: {msg}");
        assert!(msg.contains("launchlite-no-such-interpreter"));
    }

    #[cfg(unix)]
    #[test]
    fn test_present_but_non_executable_file_is_spawn_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fake = dir.path().join("corrupt-node");
        std::fs::write(&fake, b"not a binary").expect("write");
        // No exec bit: existence check would have passed, launch fails.
        let spec = InvocationSpec::new(ResolvedInterpreter {
            path: fake.clone(),
            origin: CandidateOrigin::SystemInstall,
        });
        let err = run(&spec, &EnvPatch::new()).expect_err("must fail");
        assert!(err.to_string().contains(&fake.display().to_string()));
    }
}
