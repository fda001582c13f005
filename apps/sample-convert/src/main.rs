//! Converts a file of complex floats (.c32) to a file of complex
//! doubles (.c64) and vice versa. Elements are converted one at a
//! time, so the same tool handles interleaved complex and plain real
//! files alike.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SampleType {
    Float,
    Double,
}

impl SampleType {
    fn label(self) -> &'static str {
        match self {
            SampleType::Float => "float",
            SampleType::Double => "double",
        }
    }
}

/// Elements converted per buffer.
const CHUNK: usize = 256;

/// Chunks between progress dots.
const DOT_INTERVAL: usize = 1024;

#[derive(Parser)]
#[command(name = "sample-convert", version)]
#[command(about = "Convert sample files between float and double element types")]
struct Cli {
    /// Source file
    #[arg(short = 's', long = "src")]
    src: PathBuf,

    /// Source element type
    #[arg(short = 'i', long = "input-type", value_enum)]
    input_type: SampleType,

    /// Destination file
    #[arg(short = 'd', long = "dest")]
    dest: PathBuf,

    /// Destination element type
    #[arg(short = 'o', long = "output-type", value_enum)]
    output_type: SampleType,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.input_type == cli.output_type {
        bail!(
            "refusing to convert {} to the same type {}",
            cli.input_type.label(),
            cli.output_type.label()
        );
    }

    println!("Processing data given the following parameters:");
    println!("Input file {} of type {}", cli.src.display(), cli.input_type.label());
    println!("Output file {} of type {}", cli.dest.display(), cli.output_type.label());

    let reader = BufReader::new(
        File::open(&cli.src)
            .with_context(|| format!("failed to open input file {}", cli.src.display()))?,
    );
    let writer = BufWriter::new(
        File::create(&cli.dest)
            .with_context(|| format!("failed to open output file {}", cli.dest.display()))?,
    );

    match cli.input_type {
        SampleType::Float => convert::<4, 8>(reader, writer, |elem| {
            (f32::from_ne_bytes(elem) as f64).to_ne_bytes()
        }),
        SampleType::Double => convert::<8, 4>(reader, writer, |elem| {
            (f64::from_ne_bytes(elem) as f32).to_ne_bytes()
        }),
    }
}

/// Streaming conversion loop: read up to `CHUNK` input elements,
/// convert each, write the results. A tail that is not a whole number
/// of elements is dropped with a warning.
fn convert<const IN: usize, const OUT: usize>(
    mut reader: impl Read,
    mut writer: impl Write,
    element: impl Fn([u8; IN]) -> [u8; OUT],
) -> anyhow::Result<()> {
    let mut inbuf = vec![0u8; CHUNK * IN];
    let mut outbuf = vec![0u8; CHUNK * OUT];
    let mut chunks = 0usize;

    loop {
        let bytes = fill_buffer(&mut reader, &mut inbuf)?;
        if bytes == 0 {
            break;
        }
        if bytes % IN != 0 {
            println!(
                "Warning: stream error, non multiple of {} bytes read, data truncated.",
                IN
            );
        }
        let count = bytes / IN;
        for (src, dst) in inbuf[..count * IN]
            .chunks_exact(IN)
            .zip(outbuf.chunks_exact_mut(OUT))
        {
            dst.copy_from_slice(&element(src.try_into().unwrap()));
        }
        writer.write_all(&outbuf[..count * OUT])?;

        chunks += 1;
        if chunks % DOT_INTERVAL == 0 {
            print!(".");
            std::io::stdout().flush()?;
        }
    }
    writer.flush()?;
    println!();
    println!("Conversion of file complete.");
    Ok(())
}

/// Read until `buf` is full or the stream ends; returns bytes read.
fn fill_buffer(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
