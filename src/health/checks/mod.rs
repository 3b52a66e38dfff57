//! Individual system health checks

mod build_info;
mod config;
mod mouse;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use mouse::MouseCoreCheck;
