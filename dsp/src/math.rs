//! Phase, frequency, and pulse-shape math shared by every block.

pub type Real = f64;

#[doc(inline)]
pub use std::f64::consts::*;

/// Wrap a phase into the canonical `(-PI, PI]` range.
///
/// Every phase accumulator in the crate re-wraps after each update so
/// the stored value never grows without bound. Idempotent: wrapping an
/// already-canonical phase returns it unchanged.
pub fn wrap_phase(phase: Real) -> Real {
    let mut wrapped = phase;
    while wrapped > PI {
        wrapped -= TAU;
    }
    while wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Phase increment per sample (radians/sample) for a tone at `freq_hz`.
pub fn rad_rate_from_hz(sample_rate: Real, freq_hz: Real) -> Real {
    TAU * freq_hz / sample_rate
}

/// Tone frequency in Hz for a phase increment of `rate` radians/sample.
pub fn hz_from_rad_rate(sample_rate: Real, rate: Real) -> Real {
    rate * sample_rate / TAU
}

/// Frequency as a fraction of the sample rate.
pub fn norm_freq(sample_rate: Real, freq_hz: Real) -> Real {
    freq_hz / sample_rate
}

/// Comparison slack for locating the removable singularities of [`rrc`].
const RRC_SINGULARITY_EPS: Real = 1e-9;

/// Root-raised-cosine impulse response at symbol-normalized time `t`.
///
/// The closed-form expression has removable singularities at `t = 0`
/// and `|t| = 1/(4*rolloff)`; both are replaced by their limits so the
/// response is defined on the whole tap grid.
pub fn rrc(t: Real, rolloff: Real) -> Real {
    if t.abs() < RRC_SINGULARITY_EPS {
        return (1.0 - rolloff) + 4.0 * rolloff / PI;
    }

    if (t.abs() - 1.0 / (4.0 * rolloff)).abs() < RRC_SINGULARITY_EPS {
        let quarter = PI / (4.0 * rolloff);
        return rolloff / SQRT_2
            * ((1.0 + 2.0 / PI) * quarter.sin() + (1.0 - 2.0 / PI) * quarter.cos());
    }

    let num = (PI * t * (1.0 - rolloff)).sin() + 4.0 * rolloff * t * (PI * t * (1.0 + rolloff)).cos();
    let den = PI * t * (1.0 - (4.0 * rolloff * t).powi(2));
    num / den
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_phase_stays_canonical() {
        let mut theta = -25.0;
        while theta <= 25.0 {
            let wrapped = wrap_phase(theta);
            assert!(
                wrapped > -PI && wrapped <= PI,
                "wrap_phase({}) = {} out of range",
                theta,
                wrapped
            );
            theta += 0.37;
        }
    }

    #[test]
    fn wrap_phase_idempotent() {
        let mut theta = -25.0;
        while theta <= 25.0 {
            let once = wrap_phase(theta);
            assert_eq!(once, wrap_phase(once));
            theta += 0.53;
        }
    }

    #[test]
    fn wrap_phase_boundaries() {
        assert_eq!(wrap_phase(PI), PI);
        assert_eq!(wrap_phase(-PI), PI);
        assert!((wrap_phase(3.0 * PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn rate_conversions_round_trip() {
        let rate = rad_rate_from_hz(48_000.0, 1_200.0);
        assert!((rate - TAU * 0.025).abs() < 1e-12);
        assert!((hz_from_rad_rate(48_000.0, rate) - 1_200.0).abs() < 1e-9);
        assert!((norm_freq(48_000.0, 1_200.0) - 0.025).abs() < 1e-12);
    }

    #[test]
    fn rrc_center_value() {
        let rolloff = 0.35;
        let expected = (1.0 - rolloff) + 4.0 * rolloff / PI;
        assert!((rrc(0.0, rolloff) - expected).abs() < 1e-12);
    }

    #[test]
    fn rrc_singularity_is_finite_and_continuous() {
        let rolloff = 0.25;
        let t = 1.0 / (4.0 * rolloff);
        let at = rrc(t, rolloff);
        assert!(at.is_finite());
        // The limit value should line up with the general formula just
        // off the singular point.
        let near = rrc(t + 1e-6, rolloff);
        assert!((at - near).abs() < 1e-4, "{} vs {}", at, near);
        assert!((rrc(-t, rolloff) - at).abs() < 1e-12);
    }
}
