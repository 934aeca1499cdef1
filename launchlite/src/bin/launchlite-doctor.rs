//! launchlite-doctor — report which interpreter candidates exist and which
//! one the launcher would select. Presence only; no version probing.
//!
//! Exit code: 0 when every requested runtime resolves to a present
//! interpreter, 1 otherwise.

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use launchlite_core::candidates::{self, Runtime};
use launchlite_core::config::{env_keys, loader};

#[derive(Parser, Debug)]
#[command(name = "launchlite-doctor", version, about = "Check interpreter candidate health")]
struct Cli {
    /// Check a single runtime (node, python, powershell). Default: all.
    #[arg(long, value_parser = parse_runtime)]
    runtime: Option<Runtime>,

    /// Emit a JSON report instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_runtime(s: &str) -> Result<Runtime, String> {
    Runtime::parse(s).ok_or_else(|| format!("unknown runtime '{s}' (expected node, python, or powershell)"))
}

struct CandidateReport {
    path: String,
    origin: &'static str,
    present: bool,
    selected: bool,
}

struct RuntimeReport {
    runtime: &'static str,
    candidates: Vec<CandidateReport>,
    healthy: bool,
}

fn inspect(runtime: Runtime) -> RuntimeReport {
    let override_key = match runtime {
        Runtime::Node => env_keys::interpreter::NODE,
        Runtime::Python => env_keys::interpreter::PYTHON,
        Runtime::PowerShell => env_keys::interpreter::POWERSHELL,
    };
    let override_path = loader::env_optional(override_key, &[]);
    let list = candidates::candidate_list(runtime, override_path.as_deref());

    let mut candidates = Vec::new();
    let mut selected_done = false;
    for candidate in list.iter() {
        // Same probe the resolver uses for explicit paths; bare names get a
        // real PATH lookup here because doctor exists to tell the truth the
        // resolver defers to the OS loader.
        let present = if candidate.is_path_lookup() {
            which::which(&candidate.path).is_ok()
        } else {
            candidate.path.exists()
        };
        // Selection mirrors the resolver: first existing explicit path, or
        // the bare fallback once everything above it is missing.
        let selected = !selected_done && (present || candidate.is_path_lookup());
        if selected {
            selected_done = true;
        }
        candidates.push(CandidateReport {
            path: candidate.path.display().to_string(),
            origin: candidate.origin.as_str(),
            present,
            selected,
        });
    }

    let healthy = candidates.iter().any(|c| c.selected && c.present);
    RuntimeReport {
        runtime: runtime.as_str(),
        candidates,
        healthy,
    }
}

fn print_text(report: &RuntimeReport) {
    println!("{}:", report.runtime);
    for c in &report.candidates {
        let mark = if c.present { "✅" } else { "❌" };
        let arrow = if c.selected { "  ← selected" } else { "" };
        println!("  {} {} [{}]{}", mark, c.path, c.origin, arrow);
    }
    if !report.healthy {
        println!("  ⚠️  no present interpreter; launch would fail with exit 127");
    }
}

fn to_json(report: &RuntimeReport) -> serde_json::Value {
    json!({
        "runtime": report.runtime,
        "healthy": report.healthy,
        "candidates": report.candidates.iter().map(|c| json!({
            "path": c.path,
            "origin": c.origin,
            "present": c.present,
            "selected": c.selected,
        })).collect::<Vec<_>>(),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    loader::load_dotenv();

    let runtimes: Vec<Runtime> = match cli.runtime {
        Some(runtime) => vec![runtime],
        None => Runtime::all().to_vec(),
    };

    let reports: Vec<RuntimeReport> = runtimes.into_iter().map(inspect).collect();
    let all_healthy = reports.iter().all(|r| r.healthy);

    if cli.json {
        let doc = json!({
            "healthy": all_healthy,
            "runtimes": reports.iter().map(to_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());
    } else {
        for report in &reports {
            print_text(report);
        }
    }

    if all_healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
