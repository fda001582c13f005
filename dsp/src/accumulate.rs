use crate::error::{DspError, DspResult};
use crate::math::Real;

/// Accumulate-and-dump integrator: the loop filter for the carrier
/// recovery error paths.
///
/// Samples are summed silently inside a fixed window; the output only
/// changes on window boundaries, where the completed sum is "dumped"
/// and held until the next boundary. The held value is always the
/// *previous* completed window's sum, so readers see each window one
/// window late. Callers wanting a mean divide the output by
/// [`AccumulateAndDump::window_size`].
#[derive(Debug, Clone)]
pub struct AccumulateAndDump {
    window_size: usize,
    current_win_value: usize,
    accumulator: Real,
    last_dump_value: Real,
}

impl AccumulateAndDump {
    pub fn new(window_size: usize) -> DspResult<Self> {
        if window_size == 0 {
            return Err(DspError::InvalidWindow(window_size));
        }
        Ok(Self {
            window_size,
            current_win_value: 0,
            accumulator: 0.0,
            last_dump_value: 0.0,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Fold `sample` into the current window and return the held dump
    /// value.
    pub fn process(&mut self, sample: Real) -> Real {
        if self.current_win_value == self.window_size {
            self.last_dump_value = self.accumulator;
            self.accumulator = 0.0;
            self.current_win_value = 0;
        }
        self.accumulator += sample;
        self.current_win_value += 1;
        self.last_dump_value
    }
}
