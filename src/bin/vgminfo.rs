//! VGM to JSON dump, used to inspect converter output

use aypsg2vgm::vgm::{VgmJson, VgmReader};
use clap::Parser;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vgminfo")]
#[command(version = "0.1.0")]
#[command(about = "Dump VGM/VGZ files as JSON", long_about = None)]
struct Args {
    /// Input VGM or VGZ file
    input: PathBuf,

    /// Output JSON file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let data = read_vgm_file(&args.input)?;

    let mut reader = VgmReader::new(&data);
    let header = reader.parse_header()?;
    let commands = reader.parse_commands(&header)?;

    if (header.eof_offset as u64 + 4) != data.len() as u64 {
        log::warn!(
            "EOF offset 0x{:X} does not match file size {}",
            header.eof_offset,
            data.len()
        );
    }

    let vgm_json = VgmJson::new(&header, commands);
    if vgm_json.command_samples() != header.total_samples as u64 {
        log::warn!(
            "Header total samples {} differs from command waits {}",
            header.total_samples,
            vgm_json.command_samples()
        );
    }

    let json_string = if args.compact {
        serde_json::to_string(&vgm_json)?
    } else {
        serde_json::to_string_pretty(&vgm_json)?
    };

    match args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json_string.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            println!("{}", json_string);
        }
    }

    Ok(())
}

/// Read a VGM or VGZ file, decompressing when it carries the gzip magic
fn read_vgm_file(path: &PathBuf) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;

    if data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b {
        let mut decoder = GzDecoder::new(Cursor::new(data));
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        Ok(decompressed)
    } else {
        Ok(data)
    }
}
