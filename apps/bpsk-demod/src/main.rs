//! Reads a file of complex double samples, runs BPSK carrier wipeoff
//! over them, and writes the carrier-resolved samples back out.

mod logger;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::warn;

use baseband_dsp::demod::BpskDemod;
use baseband_dsp::iq::IQ;

use crate::logger::StderrLogger;

/// Bytes per complex double record: an f64 real part then an f64
/// imaginary part, native endianness.
const RECORD_SIZE: usize = 16;

#[derive(Parser)]
#[command(name = "bpsk-demod", version)]
#[command(about = "Carrier wipeoff of a BPSK sample stream")]
struct Cli {
    /// File of input complex double samples
    #[arg(short, long)]
    input: PathBuf,

    /// File of output complex double samples
    #[arg(short, long)]
    output: PathBuf,

    /// Samples per symbol of the matched filter
    #[arg(long, default_value_t = 4)]
    sps: usize,

    /// Roll-off factor of the matched filter
    #[arg(long, default_value_t = 0.35)]
    rolloff: f64,

    /// Loop-filter window size in samples
    #[arg(long, default_value_t = 256)]
    window: usize,

    /// Suppress all diagnostics
    #[arg(short, long)]
    quiet: bool,

    /// Log lock-state transitions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    StderrLogger::new(cli.quiet, cli.verbose).init();

    let input = File::open(&cli.input)
        .with_context(|| format!("failed to open input file {}", cli.input.display()))?;
    let input_len = input.metadata()?.len();
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(
        File::create(&cli.output)
            .with_context(|| format!("failed to open output file {}", cli.output.display()))?,
    );

    let mut demod = BpskDemod::new(cli.sps, cli.rolloff, cli.window)?;

    if !cli.quiet {
        println!("Starting BPSK carrier wipeoff..");
    }

    // One sample in, one sample out, strictly in order; a short read is
    // end of stream.
    let status_interval = cli.window as u64 * 10;
    let mut samples: u64 = 0;
    while let Some(sample) = read_record(&mut reader)? {
        let out = demod.process(sample);
        write_record(&mut writer, out.baseband)?;
        samples += 1;

        if !cli.quiet && samples % status_interval == 0 {
            let progress = samples * RECORD_SIZE as u64;
            print_status(progress, input_len, &demod);
        }
    }
    writer.flush()?;

    if !cli.quiet {
        println!("End of Run Status:");
        print_status(samples * RECORD_SIZE as u64, input_len, &demod);
        println!("Normal Exit..");
    }
    Ok(())
}

/// Read one complex record, or None on end of stream. A ragged tail
/// shorter than one record also ends the stream, with a warning.
fn read_record(reader: &mut impl Read) -> anyhow::Result<Option<IQ>> {
    let mut buf = [0u8; RECORD_SIZE];
    let mut filled = 0;
    while filled < RECORD_SIZE {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            if filled > 0 {
                warn!("input ends mid-record; {} trailing bytes dropped", filled);
            }
            return Ok(None);
        }
        filled += n;
    }
    let re = f64::from_ne_bytes(buf[..8].try_into().unwrap());
    let im = f64::from_ne_bytes(buf[8..].try_into().unwrap());
    Ok(Some(IQ::new(re, im)))
}

fn write_record(writer: &mut impl Write, sample: IQ) -> anyhow::Result<()> {
    writer.write_all(&sample.i.to_ne_bytes())?;
    writer.write_all(&sample.q.to_ne_bytes())?;
    Ok(())
}

fn print_status(progress_bytes: u64, input_len: u64, demod: &BpskDemod) {
    let progress = if input_len > 0 {
        100.0 * progress_bytes as f64 / input_len as f64
    } else {
        0.0
    };
    println!("Demodulator Status:");
    println!("Percentage through file: {:.1}%", progress);
    println!("Demodulator State      : {}", demod.state());
    println!("phase_est              : {}", demod.phase_estimate());
    println!("freq_est               : {}", demod.freq_estimate());
    println!();
}
