//! BPSK carrier recovery: wipeoff, matched filtering, phase detection,
//! and the acquisition/tracking state machine.

use log::debug;

use crate::accumulate::AccumulateAndDump;
use crate::delay::DelayLine;
use crate::error::DspResult;
use crate::filter::Fir;
use crate::iq::IQ;
use crate::math::{wrap_phase, Real, PI};
use crate::nco::Nco;

/// Lifecycle of the carrier-recovery loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    AcquiringFrequency,
    AcquiringPhase,
    Tracking,
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockState::AcquiringFrequency => write!(f, "freq acq"),
            LockState::AcquiringPhase => write!(f, "phase acq"),
            LockState::Tracking => write!(f, "Tracking"),
        }
    }
}

/// Mean-error bounds inside which the loop considers itself locked.
#[derive(Debug, Clone, Copy)]
pub struct LockThresholds {
    /// Radians/sample of mean frequency error.
    pub freq: Real,
    /// Radians of mean phase error.
    pub phase: Real,
}

impl Default for LockThresholds {
    fn default() -> Self {
        Self {
            freq: 0.01,
            phase: 0.1,
        }
    }
}

/// Reduced loop gains applied once tracking, to suppress jitter.
const TRACKING_PHASE_GAIN: Real = 0.25;
const TRACKING_FREQ_GAIN: Real = 0.1;

/// Matched-filter extent in symbols on either side of center.
const MATCHED_FILTER_HALF_WIDTH: usize = 4;

/// Signed phase error of a filtered sample against the nearest BPSK
/// constellation point (0 or PI).
///
/// Near the negative real axis the error is measured from the PI
/// point with the sign chosen so approaching the axis from either side
/// gives nearby values instead of a 2*PI jump. Samples near the origin
/// (symbol transitions, low SNR) produce unreliable errors; the loop
/// filters are what make those tolerable.
pub fn bpsk_phase_error(sample: IQ) -> Real {
    let phase = sample.phase();
    if sample.i >= 0.0 {
        phase
    } else if sample.q > 0.0 {
        wrap_phase(phase - PI)
    } else {
        wrap_phase(-(phase + PI))
    }
}

/// One demodulated time step.
pub struct Output {
    /// Carrier-corrected, matched-filtered sample.
    pub baseband: IQ,
    /// Raw detector error for this sample.
    pub phase_error: Real,
    /// Lock state after this sample's decision.
    pub state: LockState,
}

/// BPSK carrier-recovery demodulator.
///
/// Owns every sub-block by value and processes exactly one complex
/// sample per call; outputs depend on all state accumulated from every
/// prior sample, so a stream must be fed strictly in order. One
/// instance serves one logical stream.
pub struct BpskDemod {
    carrier: Nco,
    matched: Fir<IQ>,
    freq_err_acc: AccumulateAndDump,
    phase_err_acc: AccumulateAndDump,
    err_delay: DelayLine,
    thresholds: LockThresholds,
    phase_est: Real,
    freq_est: Real,
    state: LockState,
    samples: u64,
}

impl BpskDemod {
    /// Build a demodulator for `sps` samples/symbol, matched-filter
    /// roll-off `rolloff`, and loop-filter window `window` samples,
    /// with default lock thresholds.
    pub fn new(sps: usize, rolloff: Real, window: usize) -> DspResult<Self> {
        Self::with_thresholds(sps, rolloff, window, LockThresholds::default())
    }

    pub fn with_thresholds(
        sps: usize,
        rolloff: Real,
        window: usize,
        thresholds: LockThresholds,
    ) -> DspResult<Self> {
        Ok(Self {
            carrier: Nco::new(0.0, 0.0),
            matched: Fir::root_raised_cosine(sps, rolloff, MATCHED_FILTER_HALF_WIDTH)?,
            freq_err_acc: AccumulateAndDump::new(window)?,
            phase_err_acc: AccumulateAndDump::new(window)?,
            err_delay: DelayLine::new(1)?,
            thresholds,
            phase_est: 0.0,
            freq_est: 0.0,
            state: LockState::AcquiringFrequency,
            samples: 0,
        })
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn freq_estimate(&self) -> Real {
        self.freq_est
    }

    pub fn phase_estimate(&self) -> Real {
        self.phase_est
    }

    /// Process one complex input sample and return the carrier-corrected
    /// output for this time step.
    pub fn process(&mut self, input: IQ) -> Output {
        // Steer the carrier with the current estimates, then wipe it
        // off the input.
        self.carrier.set_rate(self.freq_est);
        let carrier = self.carrier.generate(self.phase_est);
        let wideband = carrier.conj() * input;

        let narrowband = self.matched.process(wideband);
        let err = bpsk_phase_error(narrowband);

        // Differentiate the phase error against its one-sample delay to
        // get a frequency-error sample.
        let err_d1 = self.err_delay.process(err);
        let window = self.freq_err_acc.window_size() as Real;
        let avg_freq_err = self.freq_err_acc.process(err - err_d1) / window;
        let avg_phase_err = self.phase_err_acc.process(err) / window;

        self.samples += 1;
        // The dump values lag by one window and read zero before the
        // first boundary; lock decisions wait that boundary out.
        let decide = self.samples > self.freq_err_acc.window_size() as u64;

        match self.state {
            LockState::AcquiringFrequency => {
                self.phase_est = 0.0;
                self.freq_est = avg_freq_err;
                if decide && avg_freq_err.abs() <= self.thresholds.freq {
                    self.enter(LockState::AcquiringPhase);
                }
            }
            LockState::AcquiringPhase => {
                self.phase_est = avg_phase_err;
                if decide && avg_freq_err.abs() > self.thresholds.freq {
                    self.enter(LockState::AcquiringFrequency);
                } else if decide && avg_phase_err.abs() <= self.thresholds.phase {
                    self.enter(LockState::Tracking);
                }
            }
            LockState::Tracking => {
                self.phase_est = TRACKING_PHASE_GAIN * avg_phase_err;
                self.freq_est = TRACKING_FREQ_GAIN * avg_freq_err;
                if decide && avg_freq_err.abs() > self.thresholds.freq {
                    self.enter(LockState::AcquiringFrequency);
                } else if decide && avg_phase_err.abs() > self.thresholds.phase {
                    self.enter(LockState::AcquiringPhase);
                }
            }
        }

        Output {
            baseband: narrowband,
            phase_error: err,
            state: self.state,
        }
    }

    fn enter(&mut self, next: LockState) {
        debug!("lock state {} -> {} after {} samples", self.state, next, self.samples);
        self.state = next;
    }
}
