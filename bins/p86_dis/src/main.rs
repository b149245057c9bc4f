mod listing;

use clap::{ArgAction, Parser};
use listing::{write_listing, Style};
use p86_decoder::{DecodeOptions, DisassemblyError};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info, Level};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write output: {0}")]
    Write(#[from] std::io::Error),

    #[error(transparent)]
    Disassembly(#[from] DisassemblyError),
}

#[derive(Debug, Parser)]
#[command(name = "p86-dis", version, about = "Disassemble 8086 mov/add/sub machine code")]
struct Opt {
    /// The binary file to disassemble
    binary: PathBuf,

    /// Print the offset and raw bytes in front of each instruction
    #[arg(short, long)]
    listing: bool,

    /// Decode mod=00 r/m=110 as a 16-bit direct address instead of [BP]
    #[arg(long)]
    direct_address: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Opt {
    fn style(&self) -> Style {
        if self.listing {
            Style::Listing
        } else {
            Style::Plain
        }
    }

    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            direct_address: self.direct_address,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn disassemble(opts: &Opt) -> Result<usize, Error> {
    let data = std::fs::read(&opts.binary).map_err(|source| Error::Read {
        path: opts.binary.clone(),
        source,
    })?;
    info!("Loaded {} bytes from {}", data.len(), opts.binary.display());
    debug!("Decode options: {:?}", opts.decode_options());

    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    write_listing(&mut out, &data, opts.style(), opts.decode_options())
}

fn main() -> ExitCode {
    let opts = Opt::parse();
    init_logging(opts.verbose);

    match disassemble(&opts) {
        Ok(count) => {
            info!("Decoded {} instructions", count);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
