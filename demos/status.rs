// Logger status example
//
// Prints the firmware version, the clock and the current configuration.
// Exits with code 1 while the logger is recording.

use clap::Parser;
use tfd500_rs::{LinkSettings, Tfd500};

#[derive(Parser)]
#[command(name = "status")]
#[command(about = "Show the status and configuration of a TFD500 logger")]
struct Args {
    /// Path to the serial device
    #[arg(short, long, default_value = LinkSettings::DEFAULT_DEVICE)]
    device: String,

    /// Print nothing, only set the exit code
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let logger = Tfd500::open(&args.device);
    let recording = logger.is_busy()?;

    if !args.quiet {
        let config = logger.configuration()?;
        println!("Firmware:     {}", logger.version()?);
        println!("Clock:        {}", logger.clock()?);
        println!("Status:       {}", if recording { "recording" } else { "NOT recording" });
        println!("Start:        {}", config.start);
        println!("Interval:     {}s", config.interval.seconds());
        println!(
            "Mode:         temperature {}",
            if config.humidity { "plus humidity" } else { "only" }
        );
        if recording {
            println!("# of records: unknown");
        } else {
            println!("# of records: {}", config.count);
        }
    }

    std::process::exit(i32::from(recording));
}
