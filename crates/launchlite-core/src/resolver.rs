//! Candidate-ordered interpreter resolution.
//!
//! Explicit paths are probed with a bare existence check only — not
//! executability bits, so a present-but-corrupt file is "found" and fails
//! later at spawn time. The bare-command PATH fallback is returned untested:
//! PATH membership is the OS loader's responsibility.

use std::fmt;
use std::path::PathBuf;

use crate::error::LaunchError;

/// Why a path is in the candidate list. Diagnostic tag only; selection is
/// strictly list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    /// Operator-pinned path from config, always first.
    ConfigOverride,
    /// Interpreter shipped next to the launcher executable.
    BundledLocal,
    /// Machine-wide install (Program Files, /usr/bin, ...).
    SystemInstall,
    /// Per-user install (AppData\Local\Programs, ~/.local/bin, ...).
    UserInstall,
    /// Bare command name, deferred to PATH at spawn time.
    PathLookup,
}

impl CandidateOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigOverride => "config-override",
            Self::BundledLocal => "bundled-local",
            Self::SystemInstall => "system-install",
            Self::UserInstall => "user-install",
            Self::PathLookup => "path-lookup",
        }
    }
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the ordered list of locations where an interpreter might be
/// installed.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub origin: CandidateOrigin,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>, origin: CandidateOrigin) -> Self {
        Self {
            path: path.into(),
            origin,
        }
    }

    /// PATH-fallback candidates carry a bare command name, not a location.
    pub fn is_path_lookup(&self) -> bool {
        self.origin == CandidateOrigin::PathLookup
    }

    pub fn describe(&self) -> String {
        format!("{} [{}]", self.path.display(), self.origin)
    }
}

/// The single chosen interpreter plus the tag of the candidate that matched.
/// The tag is used only for verbose/audit output.
#[derive(Debug, Clone)]
pub struct ResolvedInterpreter {
    pub path: PathBuf,
    pub origin: CandidateOrigin,
}

/// Ordered candidate list for one runtime. Order is a strict priority:
/// the first explicit path that exists wins even when later candidates
/// also exist. Immutable per invocation.
#[derive(Debug, Clone)]
pub struct CandidateList {
    runtime: String,
    candidates: Vec<Candidate>,
}

impl CandidateList {
    pub fn new(runtime: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Self {
            runtime: runtime.into(),
            candidates,
        }
    }

    /// Insert an operator-pinned path ahead of every other candidate.
    pub fn prepend_override(&mut self, path: impl Into<PathBuf>) {
        self.candidates
            .insert(0, Candidate::new(path, CandidateOrigin::ConfigOverride));
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Select the first candidate that exists on disk, falling back to the
    /// bare command name if the list carries one.
    ///
    /// No side effects. A PATH-fallback candidate is never validated here;
    /// if it is also absent the failure surfaces at spawn time as
    /// [`LaunchError::NotFound`].
    pub fn resolve(&self) -> Result<ResolvedInterpreter, LaunchError> {
        for candidate in &self.candidates {
            if candidate.is_path_lookup() {
                tracing::debug!(
                    runtime = %self.runtime,
                    command = %candidate.path.display(),
                    "no explicit candidate present, deferring to PATH"
                );
                return Ok(ResolvedInterpreter {
                    path: candidate.path.clone(),
                    origin: candidate.origin,
                });
            }
            if candidate.path.exists() {
                tracing::debug!(
                    runtime = %self.runtime,
                    path = %candidate.path.display(),
                    origin = %candidate.origin,
                    "candidate selected"
                );
                return Ok(ResolvedInterpreter {
                    path: candidate.path.clone(),
                    origin: candidate.origin,
                });
            }
            tracing::debug!(
                runtime = %self.runtime,
                path = %candidate.path.display(),
                "candidate missing"
            );
        }

        Err(LaunchError::Resolution {
            runtime: self.runtime.clone(),
            attempted: self.candidates.iter().map(Candidate::describe).collect(),
        })
    }
}
