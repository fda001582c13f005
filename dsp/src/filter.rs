use crate::error::{DspError, DspResult};
use crate::math::{rrc, Real};
use crate::sample::Sample;

/// Synthesize a unit-energy root-raised-cosine tap set.
///
/// Produces `2 * sps * half_width + 1` taps sampled at
/// `t = -half_width ..= half_width` in steps of `1/sps` symbols, then
/// normalizes so the squared taps sum to one. Larger half-widths give
/// longer filters with better approximations of the ideal response.
pub fn root_raised_cosine_taps(
    sps: usize,
    rolloff: Real,
    half_width: usize,
) -> DspResult<Vec<Real>> {
    if sps < 2 {
        return Err(DspError::InvalidSamplesPerSymbol(sps));
    }
    if !(rolloff > 0.0 && rolloff <= 1.0) {
        return Err(DspError::InvalidRolloff(rolloff));
    }
    if half_width < 1 {
        return Err(DspError::InvalidHalfWidth(half_width));
    }

    let count = 2 * sps * half_width + 1;
    let mut taps = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as Real / sps as Real - half_width as Real;
        taps.push(rrc(t, rolloff));
    }

    let energy: Real = taps.iter().map(|t| t * t).sum();
    let norm = energy.sqrt();
    for tap in &mut taps {
        *tap /= norm;
    }
    Ok(taps)
}

/// Finite-impulse-response filter over a tapped delay line.
///
/// The coefficient vector is real; the sample type is generic, so
/// `Fir<IQ>` applies the identical real filter to both rails of a
/// complex stream. The tap buffer is a ring holding the most recent
/// `N` inputs and never changes length after construction.
#[derive(Debug)]
pub struct Fir<T = Real> {
    coeff: Box<[Real]>,
    taps: Box<[T]>,
    position: usize,
}

impl<T: Sample> Fir<T> {
    pub fn new(coeff: impl Into<Box<[Real]>>) -> DspResult<Self> {
        let coeff = coeff.into();
        if coeff.is_empty() {
            return Err(DspError::EmptyCoefficients);
        }
        let taps = vec![T::ZERO; coeff.len()].into_boxed_slice();
        Ok(Self {
            coeff,
            taps,
            position: 0,
        })
    }

    /// Matched filter for `sps` samples/symbol and the given roll-off.
    pub fn root_raised_cosine(sps: usize, rolloff: Real, half_width: usize) -> DspResult<Self> {
        Self::new(root_raised_cosine_taps(sps, rolloff, half_width)?)
    }

    pub fn coefficients(&self) -> &[Real] {
        &self.coeff
    }

    /// Shift `sample` into the delay line and return the weighted sum,
    /// newest tap against the first coefficient.
    pub fn process(&mut self, sample: T) -> T {
        self.taps[self.position] = sample;
        let (head, tail) = self.taps.split_at(self.position + 1);
        let newest_first = head.iter().rev().chain(tail.iter().rev());
        let out = newest_first
            .zip(&self.coeff[..])
            .map(|(&tap, &coeff)| tap * coeff)
            .sum();
        self.position = (self.position + 1) % self.taps.len();
        out
    }

    pub fn process_inplace(&mut self, buffer: &mut [T]) {
        for slot in buffer {
            *slot = self.process(*slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iq::IQ;

    #[test]
    fn impulse_response_reproduces_coefficients() {
        let coeff = vec![0.5, -0.25, 1.0, 0.125, -0.75];
        let mut fir = Fir::<Real>::new(coeff.clone()).unwrap();
        for (n, &expected) in coeff.iter().enumerate() {
            let input = if n == 0 { 1.0 } else { 0.0 };
            let out = fir.process(input);
            assert!(
                (out - expected).abs() < 1e-12,
                "tap {}: {} vs {}",
                n,
                out,
                expected
            );
        }
        // Once the impulse has left the delay line the output is zero.
        assert!(fir.process(0.0).abs() < 1e-12);
    }

    #[test]
    fn complex_filter_applies_same_taps_to_both_rails() {
        let coeff = vec![0.25, 0.5, 0.25];
        let mut fir = Fir::<IQ>::new(coeff.clone()).unwrap();
        let mut outputs = Vec::new();
        outputs.push(fir.process(IQ::new(1.0, -2.0)));
        outputs.push(fir.process(IQ::ZERO));
        outputs.push(fir.process(IQ::ZERO));
        for (out, &c) in outputs.iter().zip(&coeff) {
            assert!((out.i - c).abs() < 1e-12);
            assert!((out.q + 2.0 * c).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_coefficients_rejected() {
        assert_eq!(
            Fir::<Real>::new(Vec::new()).unwrap_err(),
            DspError::EmptyCoefficients
        );
    }

    #[test]
    fn rrc_tap_count() {
        let taps = root_raised_cosine_taps(4, 0.35, 4).unwrap();
        assert_eq!(taps.len(), 2 * 4 * 4 + 1);
        let taps = root_raised_cosine_taps(8, 0.2, 6).unwrap();
        assert_eq!(taps.len(), 2 * 8 * 6 + 1);
        let fir = Fir::<Real>::root_raised_cosine(8, 0.2, 6).unwrap();
        assert_eq!(fir.coefficients(), &taps[..]);
    }

    #[test]
    fn inplace_processing_matches_per_sample() {
        let coeff = vec![0.1, 0.2, 0.3, 0.4];
        let input: Vec<Real> = (0..32).map(|n| (0.7 * n as Real).cos()).collect();

        let mut per_sample = Fir::<Real>::new(coeff.clone()).unwrap();
        let expected: Vec<Real> = input.iter().map(|&s| per_sample.process(s)).collect();

        let mut inplace = Fir::<Real>::new(coeff).unwrap();
        let mut buffer = input;
        inplace.process_inplace(&mut buffer);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn rrc_unit_energy() {
        let taps = root_raised_cosine_taps(4, 0.35, 4).unwrap();
        let energy: Real = taps.iter().map(|t| t * t).sum();
        assert!((energy - 1.0).abs() < 1e-9, "energy {}", energy);
    }

    #[test]
    fn rrc_symmetric_about_center() {
        let taps = root_raised_cosine_taps(4, 0.35, 4).unwrap();
        let len = taps.len();
        for i in 0..len / 2 {
            assert!(
                (taps[i] - taps[len - 1 - i]).abs() < 1e-12,
                "asymmetric at {}: {} vs {}",
                i,
                taps[i],
                taps[len - 1 - i]
            );
        }
    }

    #[test]
    fn rrc_singular_grid_points_are_finite() {
        // rolloff 0.25 puts |t| = 1/(4a) = 1.0 exactly on the tap grid.
        let taps = root_raised_cosine_taps(4, 0.25, 4).unwrap();
        assert!(taps.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn rrc_rejects_bad_parameters() {
        assert_eq!(
            root_raised_cosine_taps(1, 0.35, 4).unwrap_err(),
            DspError::InvalidSamplesPerSymbol(1)
        );
        assert_eq!(
            root_raised_cosine_taps(4, 0.0, 4).unwrap_err(),
            DspError::InvalidRolloff(0.0)
        );
        assert_eq!(
            root_raised_cosine_taps(4, 1.5, 4).unwrap_err(),
            DspError::InvalidRolloff(1.5)
        );
        assert_eq!(
            root_raised_cosine_taps(4, 0.35, 0).unwrap_err(),
            DspError::InvalidHalfWidth(0)
        );
    }
}
