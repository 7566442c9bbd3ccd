// Data dump example
//
// Reads every stored sample and writes it as CSV to a file or stdout.

use clap::Parser;
use std::fs::File;
use std::path::Path;
use tfd500_rs::{sample_frame, LinkSettings, Tfd500};

#[derive(Parser)]
#[command(name = "dump")]
#[command(about = "Dump the samples recorded by a TFD500 logger as CSV")]
struct Args {
    /// Path to the serial device
    #[arg(short, long, default_value = LinkSettings::DEFAULT_DEVICE)]
    device: String,

    /// Output file, '-' for stdout. Defaults to tfd500-<start date>.csv
    #[arg(short, long)]
    output: Option<String>,

    /// Overwrite an existing output file
    #[arg(short, long)]
    force: bool,

    /// strftime format for the time column
    #[arg(short, long, default_value = sample_frame::DEFAULT_TIME_FORMAT)]
    time_format: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let logger = Tfd500::open(&args.device);
    let recording = logger.read_all()?;
    if recording.samples.is_empty() {
        eprintln!("No records available (nothing has been logged).");
        return Ok(());
    }

    let mut df = recording.to_dataframe(&args.time_format)?;

    let output = args.output.unwrap_or_else(|| {
        recording
            .configuration
            .start
            .format("tfd500-%Y%m%d.csv")
            .to_string()
    });

    if output == "-" {
        sample_frame::write_csv(&mut df, std::io::stdout().lock(), b';')?;
        return Ok(());
    }

    if Path::new(&output).exists() && !args.force {
        eprintln!("'{output}' already exists; use -f to force overwrite");
        std::process::exit(1);
    }
    sample_frame::write_csv(&mut df, File::create(&output)?, b';')?;
    println!("Wrote {} samples to '{}'", df.height(), output);
    Ok(())
}
