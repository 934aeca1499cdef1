use std::ffi::OsString;

use clap::Parser;

/// launchlite — resolve an interpreter, normalize the child environment,
/// and forward argv + exit code to the wrapped entry point.
///
/// Help and version flags are disabled on purpose: every argument except
/// `--launcher-verbose` belongs to the wrapped program and must pass
/// through untouched, including `--help` and `--version`.
#[derive(Parser, Debug)]
#[command(
    name = "launchlite",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print resolution details (chosen interpreter, origin, final command
    /// line) to stderr before executing. Stripped from the forwarded
    /// arguments; recognized only ahead of the first forwarded argument.
    #[arg(long = "launcher-verbose")]
    pub launcher_verbose: bool,

    /// Arguments forwarded verbatim to the wrapped entry point.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<OsString>,
}
