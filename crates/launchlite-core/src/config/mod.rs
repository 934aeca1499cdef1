//! LaunchLite 统一配置层
//!
//! 所有环境变量读取集中在此模块，业务代码通过结构化配置访问，避免直接 `std::env::var`。
//!
//! - `loader`：env_or、env_optional、env_bool 等辅助函数
//! - `schema`：LauncherConfig、ObservabilityConfig
//! - `env_keys`：key 常量
//!
//! Note: apart from the non-overriding `.env` import in `load_dotenv`, this
//! module only *reads* the environment. Normalization never touches the
//! launcher's own environment; child-scoped mutation lives in `crate::env`.

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv};
pub use schema::{LauncherConfig, ObservabilityConfig, DEFAULT_API_BASE};
