use aypsg2vgm::convert::{
    convert_file, default_output_path, ConvertOptions, DEFAULT_CHIP_TYPE, DEFAULT_CLOCK_RATE,
};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aypsg2vgm")]
#[command(version = "0.1.0")]
#[command(about = "AY-3-8910 PSG to VGM converter", long_about = None)]
struct Args {
    /// Input PSG file
    input: PathBuf,

    /// Output VGM file (defaults to the input name with a .vgm extension)
    output: Option<PathBuf>,

    /// AY clock rate in Hz
    #[arg(short = 'r', long = "rate", default_value_t = DEFAULT_CLOCK_RATE)]
    rate: u32,

    /// AY chip type written to the VGM header
    #[arg(short = 't', long = "type", default_value_t = DEFAULT_CHIP_TYPE)]
    chip_type: u8,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), aypsg2vgm::Error> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));

    let options = ConvertOptions {
        clock_rate: args.rate,
        chip_type: args.chip_type,
    };
    info!("Setting rate to {}", options.clock_rate);
    info!("Setting type to {}", options.chip_type);

    let summary = convert_file(&args.input, &output, &options)?;
    info!(
        "Conversion complete: {} ({} bytes, {} samples)",
        output.display(),
        summary.file_size,
        summary.total_samples
    );

    Ok(())
}
