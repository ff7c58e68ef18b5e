//! src/error.rs
//!
//! Error taxonomy for the dashboard core. Every variant is recoverable: the
//! caller either skips a frame or falls back to a default value.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The drawing target has no usable area, so no surface can be set up.
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,

    /// An optional host capability (e.g. heap statistics) is missing.
    #[error("host feature unavailable: {0}")]
    HostFeatureUnavailable(&'static str),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
