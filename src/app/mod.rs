//! Overlay application
//!
//! Configuration, the mouse input core and the frame loop that drives it.

pub mod config;
pub mod input;
mod runner;

pub use config::{AppConfig, InputConfig, LoggingConfig, WindowConfig};
pub use runner::{DemoSummary, MOUSE_HANDLER, OverlayApp};
