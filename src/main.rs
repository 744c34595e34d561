use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use comp40::codec::{decode::decompress, encode::compress};
use comp40::ppm::{decode_ppm, encode_ppm};

/// Lossy 2x2-block image compressor for the COMP40 compressed format.
#[derive(Parser, Debug)]
#[command(name = "comp40")]
#[command(group(ArgGroup::new("mode").required(true).args(["compress", "decompress"])))]
struct Args {
    /// Compress a binary PPM into a compressed image stream.
    #[arg(short = 'c', long)]
    compress: bool,

    /// Decompress a compressed image stream into a binary PPM.
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Input file; standard input when omitted.
    input: Option<PathBuf>,

    /// Output file; standard output when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let input = read_input(&args.input)?;

    let output = if args.compress {
        let image = decode_ppm(&input).context("reading PPM input")?;
        compress(&image).context("compressing image")?
    } else {
        let image = decompress(&input).context("reading compressed input")?;
        encode_ppm(&image)
    };

    write_output(&args.output, &output)
}

fn read_input(path: &Option<PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("reading standard input")?;
            Ok(bytes)
        }
    }
}

fn write_output(path: &Option<PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
        }
        None => std::io::stdout()
            .write_all(bytes)
            .context("writing standard output"),
    }
}
