//! Channel impairments for exercising the receive chain.

use rand::{rngs::ThreadRng, thread_rng, Rng};
use rand_distr::Normal;

use crate::iq::IQ;
use crate::math::Real;

/// Additive white Gaussian noise source.
///
/// Complex streams get an independent draw on each rail. Tests pass a
/// seeded RNG through [`Awgn::with_rng`] so runs are repeatable.
pub struct Awgn<R = ThreadRng> {
    distr: Normal<Real>,
    rng: R,
}

impl Awgn {
    pub fn new(std_dev: Real) -> Self {
        Self::with_rng(thread_rng(), std_dev)
    }
}

impl<R: Rng> Awgn<R> {
    pub fn with_rng(rng: R, std_dev: Real) -> Self {
        Self {
            distr: Normal::new(0.0, std_dev).expect("standard deviation must be finite"),
            rng,
        }
    }

    pub fn apply(&mut self, buffer: &mut [Real]) {
        for slot in buffer {
            *slot += self.rng.sample(&self.distr);
        }
    }

    pub fn apply_iq(&mut self, buffer: &mut [IQ]) {
        for slot in buffer {
            slot.i += self.rng.sample(&self.distr);
            slot.q += self.rng.sample(&self.distr);
        }
    }
}
