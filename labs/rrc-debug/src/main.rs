//! Prints a synthesized root-raised-cosine tap set for inspection,
//! e.g. to paste into a plotting tool when eyeballing filter designs.

use baseband_dsp::filter::root_raised_cosine_taps;

fn main() {
    let sps = 4;
    let rolloff = 0.35;
    let half_width = 4;

    println!("computing RRC response for:");
    println!("    samples/symbol => {}", sps);
    println!("    rolloff => {}", rolloff);
    println!("    extent => -{} -> +{}", half_width, half_width);

    let taps = root_raised_cosine_taps(sps, rolloff, half_width)
        .expect("valid filter design parameters");

    println!("Number of taps computed: {}", taps.len());
    println!("Coefficients calculated:");
    let rendered: Vec<String> = taps.iter().map(|t| format!("{:.6}", t)).collect();
    println!("{}", rendered.join(", "));

    let energy: f64 = taps.iter().map(|t| t * t).sum();
    println!("Tap energy (should be 1): {}", energy);
}
