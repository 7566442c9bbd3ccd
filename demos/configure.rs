// Logger setup example
//
// Sets the clock to now and selects interval and recording mode.

use clap::Parser;
use tfd500_rs::{Interval, LinkSettings, Tfd500};

#[derive(Parser)]
#[command(name = "configure")]
#[command(about = "Prepare a TFD500 logger for a new recording")]
struct Args {
    /// Path to the serial device
    #[arg(short, long, default_value = LinkSettings::DEFAULT_DEVICE)]
    device: String,

    /// Recording interval
    #[arg(short, long, default_value = "5m", value_parser = ["10s", "60s", "1m", "300s", "5m"])]
    interval: String,

    /// Record humidity in addition to the temperature
    #[arg(short = 'u', long)]
    humidity: bool,

    /// Erase stored records first
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let interval = match args.interval.as_str() {
        "10s" => Interval::TenSeconds,
        "60s" | "1m" => Interval::OneMinute,
        _ => Interval::FiveMinutes,
    };

    let logger = Tfd500::open(&args.device);
    if args.clear {
        logger.clear_flash()?;
    }
    logger.configure(interval, args.humidity)?;

    println!(
        "Configured: every {}s, temperature {}",
        interval.seconds(),
        if args.humidity { "plus humidity" } else { "only" }
    );
    Ok(())
}
