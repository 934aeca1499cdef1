//! LaunchLite core: resolve a runtime interpreter from an ordered candidate
//! list, normalize the child's environment block, and forward argv + exit
//! code to the wrapped entry point.
//!
//! The launcher binary (`launchlite`) wires these pieces together:
//! normalize → resolve → invoke, single pass, no retries.

pub mod candidates;
pub mod config;
pub mod env;
pub mod error;
pub mod invoke;
pub mod observability;
pub mod resolver;

pub use error::LaunchError;
pub use invoke::LAUNCH_FAILURE_CODE;
