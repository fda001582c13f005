//! Streaming checks on the complex matched filter: white noise keeps
//! its power through the unit-energy taps, and a steady carrier sees
//! the filter's DC gain on both rails.

use baseband_dsp::channel::Awgn;
use baseband_dsp::filter::{root_raised_cosine_taps, Fir};
use baseband_dsp::iq::IQ;
use baseband_dsp::sample::Sample;
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn unit_energy_filter_preserves_noise_power() {
    let mut rrc_filter = Fir::<IQ>::root_raised_cosine(4, 0.35, 4).unwrap();
    let mut awgn = Awgn::with_rng(StdRng::seed_from_u64(1234), 1.0);

    let mut input = vec![IQ::ZERO; 32768];
    awgn.apply_iq(&mut input);
    let output: Vec<IQ> = input.iter().map(|&s| rrc_filter.process(s)).collect();

    let power = |samples: &[IQ]| {
        samples.iter().map(|s| s.magnitude_squared()).sum::<f64>() / samples.len() as f64
    };
    let input_power = power(&input);
    let output_power = power(&output[64..]);
    let ratio = output_power / input_power;
    assert!(
        (ratio - 1.0).abs() < 0.15,
        "power ratio through unit-energy taps: {}",
        ratio
    );
}

#[test]
fn steady_carrier_sees_dc_gain_on_both_rails() {
    let taps = root_raised_cosine_taps(4, 0.35, 4).unwrap();
    let dc_gain: f64 = taps.iter().sum();
    let mut filter = Fir::<IQ>::new(taps).unwrap();

    let mut last = IQ::ZERO;
    for _ in 0..200 {
        last = filter.process(IQ::new(0.5, -0.25));
    }
    assert!((last.i - 0.5 * dc_gain).abs() < 1e-9);
    assert!((last.q + 0.25 * dc_gain).abs() < 1e-9);
}
