use cubic_utils::CubePos;
use cubic_utils::noise::NoiseConfigError;
use thiserror::Error;

/// An error raised while building a generator or generating a cube.
///
/// Configuration problems fail fast at construction or first use.
/// [`MissingNeighbor`](Self::MissingNeighbor) and
/// [`MissingCube`](Self::MissingCube) are precondition failures: the scheduler
/// can retry once the dependency has been generated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// A noise field was configured with impossible parameters.
    #[error("invalid noise configuration for the {field} field: {source}")]
    InvalidNoiseConfig {
        /// Which field failed to build.
        field: &'static str,
        /// The underlying noise error.
        #[source]
        source: NoiseConfigError,
    },
    /// The world constants are inconsistent.
    #[error("invalid terrain settings: {0}")]
    InvalidSettings(String),
    /// Biome blending produced a zero or non-finite weight sum.
    #[error("biome blend weights sum to {sum} at lattice column ({x}, {z})")]
    DegenerateBiomeWeights {
        /// Absolute lattice X.
        x: i32,
        /// Absolute lattice Z.
        z: i32,
        /// The offending sum.
        sum: f32,
    },
    /// The 2D height noise left its expected range.
    #[error("height noise {value} at lattice column ({x}, {z}) is outside [-8, 8]")]
    HeightNoiseOutOfRange {
        /// Absolute lattice X.
        x: i32,
        /// Absolute lattice Z.
        z: i32,
        /// The sampled value.
        value: f64,
    },
    /// A vertical neighbour required by the surface pass is not generated yet.
    #[error("cube {missing} must exist before the surface pass on {pos}")]
    MissingNeighbor {
        /// The cube being processed.
        pos: CubePos,
        /// The absent neighbour.
        missing: CubePos,
    },
    /// The cube to process has not been generated.
    #[error("cube {0} has not been generated")]
    MissingCube(CubePos),
}

impl GenerationError {
    /// Whether the failure is a missing dependency a scheduler may retry later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::MissingNeighbor { .. } | Self::MissingCube(_))
    }
}
