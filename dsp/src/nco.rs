//! Numerically-controlled oscillator.

use crate::iq::IQ;
use crate::math::{wrap_phase, Real};

/// Discrete-time sinusoid generator driven by a phase accumulator.
///
/// Each call to [`Nco::generate`] emits one unit-magnitude sample at
/// the current accumulator value, then advances the accumulator by
/// `rate + phase_offset` and re-wraps it into `(-PI, PI]`. The rate is
/// settable between samples, which is how the carrier-recovery loop
/// steers it.
#[derive(Debug, Clone)]
pub struct Nco {
    rate: Real,
    phase: Real,
}

impl Nco {
    /// Construct with an initial rate (radians/sample) and phase.
    pub fn new(rate: Real, phase: Real) -> Self {
        Self {
            rate,
            phase: wrap_phase(phase),
        }
    }

    pub fn rate(&self) -> Real {
        self.rate
    }

    pub fn set_rate(&mut self, rate: Real) {
        self.rate = rate;
    }

    pub fn phase(&self) -> Real {
        self.phase
    }

    /// Emit the next complex carrier sample and advance the phase.
    pub fn generate(&mut self, phase_offset: Real) -> IQ {
        let (sin, cos) = self.phase.sin_cos();
        self.advance(phase_offset);
        IQ::new(cos, sin)
    }

    /// Real-valued variant: the cosine rail only.
    pub fn generate_real(&mut self, phase_offset: Real) -> Real {
        let sample = self.phase.cos();
        self.advance(phase_offset);
        sample
    }

    fn advance(&mut self, phase_offset: Real) {
        self.phase = wrap_phase(self.phase + self.rate + phase_offset);
    }
}
