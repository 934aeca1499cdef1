//! Default candidate lists per runtime and platform.
//!
//! One resolver implementation, platform-specific *data*. Priority order is
//! explicit and documented: config override → bundled next to the launcher →
//! system install → user-level install → bare name on PATH.

use std::path::PathBuf;

use crate::resolver::{Candidate, CandidateList, CandidateOrigin};

/// Runtime interpreter kind the launcher can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    Node,
    Python,
    PowerShell,
}

impl Runtime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Python => "python",
            Self::PowerShell => "powershell",
        }
    }

    /// Parse a runtime name from config. Case-insensitive; accepts the
    /// bare interpreter names users actually type.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "node" | "nodejs" => Some(Self::Node),
            "python" | "python3" => Some(Self::Python),
            "powershell" | "pwsh" => Some(Self::PowerShell),
            _ => None,
        }
    }

    pub fn all() -> &'static [Runtime] {
        &[Self::Node, Self::Python, Self::PowerShell]
    }

    /// Executable file name for bundled-local probing.
    #[cfg(windows)]
    fn exe_name(&self) -> &'static str {
        match self {
            Self::Node => "node.exe",
            Self::Python => "python.exe",
            Self::PowerShell => "powershell.exe",
        }
    }

    #[cfg(not(windows))]
    fn exe_name(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Python => "python3",
            Self::PowerShell => "pwsh",
        }
    }

    /// Bare command name for the PATH fallback, last in every list.
    #[cfg(windows)]
    fn bare_name(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Python => "python",
            Self::PowerShell => "powershell",
        }
    }

    #[cfg(not(windows))]
    fn bare_name(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Python => "python3",
            Self::PowerShell => "pwsh",
        }
    }

    /// Machine-wide install locations, highest priority first.
    #[cfg(windows)]
    fn system_paths(&self) -> Vec<PathBuf> {
        match self {
            Self::Node => vec![PathBuf::from(r"C:\Program Files\nodejs\node.exe")],
            Self::Python => vec![PathBuf::from(r"C:\Program Files\Python312\python.exe")],
            Self::PowerShell => vec![PathBuf::from(
                r"C:\Windows\System32\WindowsPowerShell\v1.0\powershell.exe",
            )],
        }
    }

    #[cfg(not(windows))]
    fn system_paths(&self) -> Vec<PathBuf> {
        let names: &[&str] = match self {
            Self::Node => &["node"],
            Self::Python => &["python3"],
            Self::PowerShell => &["pwsh"],
        };
        let mut paths = Vec::new();
        for name in names {
            paths.push(PathBuf::from("/usr/local/bin").join(name));
            paths.push(PathBuf::from("/usr/bin").join(name));
        }
        paths
    }

    /// Per-user install locations.
    #[cfg(windows)]
    fn user_paths(&self) -> Vec<PathBuf> {
        let Some(local) = dirs::data_local_dir() else {
            return Vec::new();
        };
        match self {
            Self::Node => vec![local.join(r"Programs\nodejs\node.exe")],
            Self::Python => vec![local.join(r"Programs\Python\Python312\python.exe")],
            Self::PowerShell => Vec::new(),
        }
    }

    #[cfg(not(windows))]
    fn user_paths(&self) -> Vec<PathBuf> {
        let Some(home) = dirs::home_dir() else {
            return Vec::new();
        };
        match self {
            Self::Node => vec![home.join(".local/bin/node")],
            Self::Python => vec![home.join(".local/bin/python3")],
            Self::PowerShell => Vec::new(),
        }
    }
}

/// Directory containing the launcher executable, for bundled-local probing.
fn launcher_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
}

/// Build the full ordered candidate list for a runtime, optionally prepending
/// an operator-pinned interpreter path from config.
pub fn candidate_list(runtime: Runtime, override_path: Option<&str>) -> CandidateList {
    let mut candidates = Vec::new();

    if let Some(dir) = launcher_dir() {
        candidates.push(Candidate::new(
            dir.join(runtime.exe_name()),
            CandidateOrigin::BundledLocal,
        ));
    }
    for path in runtime.system_paths() {
        candidates.push(Candidate::new(path, CandidateOrigin::SystemInstall));
    }
    for path in runtime.user_paths() {
        candidates.push(Candidate::new(path, CandidateOrigin::UserInstall));
    }
    candidates.push(Candidate::new(
        runtime.bare_name(),
        CandidateOrigin::PathLookup,
    ));

    let mut list = CandidateList::new(runtime.as_str(), candidates);
    if let Some(path) = override_path {
        list.prepend_override(path);
    }
    list
}
