//! Crate error type

use thiserror::Error;

/// Errors raised outside the per-frame input path
///
/// The mouse core itself never fails; these cover configuration and the
/// decoding of native hook messages before they become [`RawMouseEvent`]s.
///
/// [`RawMouseEvent`]: crate::app::input::RawMouseEvent
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("ui scale must be a positive finite number, got {0}")]
    InvalidScale(f32),

    #[error("frame rate must be at least 1")]
    InvalidFrameRate,

    #[error("unknown mouse hook message 0x{0:04X}")]
    UnknownMessage(u32),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
