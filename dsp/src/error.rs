use crate::math::Real;

/// Errors raised while constructing DSP blocks.
///
/// All validation happens at construction time; the per-sample
/// processing paths are infallible.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DspError {
    #[error("roll-off factor must be in (0, 1], got {0}")]
    InvalidRolloff(Real),

    #[error("samples per symbol must be at least 2, got {0}")]
    InvalidSamplesPerSymbol(usize),

    #[error("filter half-width must be at least 1 symbol, got {0}")]
    InvalidHalfWidth(usize),

    #[error("filter coefficient vector must not be empty")]
    EmptyCoefficients,

    #[error("accumulator window size must be at least 1, got {0}")]
    InvalidWindow(usize),

    #[error("delay line length must be at least 1 sample, got {0}")]
    InvalidDelay(usize),
}

pub type DspResult<T> = Result<T, DspError>;
