//! Launcher error taxonomy.
//!
//! ChildFailure is deliberately not represented here: a wrapped program's
//! nonzero exit is not a launcher error and is propagated silently as the
//! launcher's own exit code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// No candidate path exists and the list carries no PATH fallback.
    #[error("no {runtime} interpreter found; candidates tried:\n  {}", .attempted.join("\n  "))]
    Resolution {
        runtime: String,
        attempted: Vec<String>,
    },

    /// The resolved interpreter does not exist at spawn time (bare PATH
    /// fallback missing, or the file vanished between probe and exec).
    #[error("interpreter not found: {}", .interpreter.display())]
    NotFound { interpreter: PathBuf },

    /// The interpreter exists but the OS refused to execute it
    /// (permission denied, corrupt binary, wrong architecture).
    #[error("failed to execute {}: {source}", .interpreter.display())]
    Spawn {
        interpreter: PathBuf,
        #[source]
        source: io::Error,
    },
}
