//! Errors raised while building a world or loading its parameters

use thiserror::Error;

/// Errors that can occur before the first frame runs.
///
/// A sweep itself never fails; everything here is caught at construction.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A parameter is out of range
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),
    /// An explicitly placed particle lies outside `[0, extent)`
    #[error("particle {index} at ({x}, {y}) lies outside the domain")]
    ParticleOutOfDomain { index: usize, x: f32, y: f32 },
    /// An explicitly placed particle carries a tag outside the three kinds
    #[error("particle {index} has unknown kind tag {kind}")]
    InvalidKind { index: usize, kind: u32 },
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
