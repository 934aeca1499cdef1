//! launchlite binary: normalize → resolve → invoke, single pass.
//!
//! Exit code contract:
//! - child exits: its code, verbatim (ChildFailure is not a launcher error);
//! - launcher resolution/launch failure: LAUNCH_FAILURE_CODE (127) with one
//!   diagnostic line on stderr. Never hang, never silently exit 0.

mod cli;

use std::ffi::OsString;

use clap::Parser;

use launchlite_core::candidates;
use launchlite_core::config::LauncherConfig;
use launchlite_core::env::EnvPatch;
use launchlite_core::invoke::{self, InvocationSpec};
use launchlite_core::observability;
use launchlite_core::{LaunchError, LAUNCH_FAILURE_CODE};

use cli::Cli;

fn main() {
    observability::init_tracing();
    let cli = Cli::parse();
    let config = LauncherConfig::from_env();
    let verbose = cli.launcher_verbose || config.verbose;

    let code = finish(launch(&config, verbose, cli.args));
    std::process::exit(code);
}

/// Map the launch outcome to the process exit code: a child's code passes
/// through verbatim; a launcher failure prints one diagnostic line and
/// becomes the sentinel.
fn finish(result: Result<i32, LaunchError>) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("launchlite: {err}");
            LAUNCH_FAILURE_CODE
        }
    }
}

fn launch(config: &LauncherConfig, verbose: bool, args: Vec<OsString>) -> Result<i32, LaunchError> {
    // Resolver: first existing candidate in strict list order.
    let list = candidates::candidate_list(config.runtime, config.interpreter_override.as_deref());
    let resolved = list.resolve()?;

    // Normalizer: scoped to the child's environment block only.
    let patch = EnvPatch::for_runtime(config.runtime);

    let spec = InvocationSpec::new(resolved)
        .fixed_flags(config.fixed_flags())
        .entry_point(config.entry_point.clone())
        .args(args);

    if verbose {
        eprintln!(
            "launchlite: interpreter {} [{}]",
            spec.interpreter.path.display(),
            spec.interpreter.origin
        );
        eprintln!("launchlite: exec {}", spec.render());
    }

    observability::audit_invocation(config.runtime.as_str(), &spec);
    let code = invoke::run(&spec, &patch)?;
    observability::audit_completed(config.runtime.as_str(), code);
    tracing::debug!(exit_code = code, "child exited");
    Ok(code)
}
