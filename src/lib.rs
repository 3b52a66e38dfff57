//! HUD overlay
//!
//! Mouse input arbitration for an overlay drawn on top of a running game.

/// Overlay application - configuration, input handling and the frame loop
pub mod app;

/// Build-time information (rustc, target, timestamp)
pub mod build_info;

/// Crate error type
pub mod error;

/// Startup self-test
pub mod health;

pub use error::{OverlayError, Result};
