//! Configuration errors
//!
//! The simulation has no I/O, so the only fatal failures happen while a
//! session is being constructed from a `GameConfig`.

/// Reasons a `GameConfig` is rejected
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("screen dimensions must be positive and finite, got {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },
    #[error("max dash cooldown must be positive, got {0}")]
    InvalidCooldown(f32),
    #[error("dash multiplier must be greater than 1, got {0}")]
    InvalidDashMultiplier(f32),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} range is invalid: [{min}, {max})")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} batch size must be at least 1")]
    InvalidBatch { name: &'static str },
    #[error("cull margin fraction must be non-negative, got {0}")]
    InvalidMargin(f32),
    #[error("unknown keyboard layout: {0}")]
    UnknownLayout(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
