//! 环境变量 key 常量与别名定义
//!
//! 主变量优先使用 `LAUNCHLITE_*`，兼容旧版包装脚本使用的裸名（如 `BASE_URL`）。

pub const LAUNCHLITE_RUNTIME: &str = "LAUNCHLITE_RUNTIME";
pub const LAUNCHLITE_ENTRY: &str = "LAUNCHLITE_ENTRY";
pub const LAUNCHLITE_EXTRA_FLAGS: &str = "LAUNCHLITE_EXTRA_FLAGS";
pub const LAUNCHLITE_VERBOSE: &str = "LAUNCHLITE_VERBOSE";

/// Per-runtime interpreter override: an absolute path prepended as the
/// highest-priority candidate.
pub mod interpreter {
    pub const NODE: &str = "LAUNCHLITE_NODE";
    pub const PYTHON: &str = "LAUNCHLITE_PYTHON";
    pub const POWERSHELL: &str = "LAUNCHLITE_POWERSHELL";
}

/// Pass-through variables the wrapped application expects. The normalizer
/// fills these only when absent from the caller's environment.
pub mod app {
    /// API base — 主变量优先
    pub const BASE_URL: &str = "BASE_URL";
    pub const BASE_URL_ALIASES: &[&str] = &["OPENAI_API_BASE", "OPENAI_BASE_URL"];
}

/// 可观测性与日志
pub mod observability {
    pub const LAUNCHLITE_QUIET: &str = "LAUNCHLITE_QUIET";
    pub const LAUNCHLITE_LOG_LEVEL: &str = "LAUNCHLITE_LOG_LEVEL";
    pub const LAUNCHLITE_LOG_JSON: &str = "LAUNCHLITE_LOG_JSON";
    pub const LAUNCHLITE_AUDIT_LOG: &str = "LAUNCHLITE_AUDIT_LOG";
}
