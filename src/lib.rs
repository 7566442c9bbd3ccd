//! # TFD500 RS
//!
//! A Rust library for reading and configuring the ELV TFD500 temperature and
//! humidity data logger over its USB serial link.
//!
//! The logger speaks a one-byte command protocol. Every reply starts with an
//! echo of the command byte, followed by a fixed number of bytes or by text
//! up to a newline. Recorded samples are read back in 256-byte flash blocks.
//!
//! ## Features
//!
//! - **Per-call sessions**: the port is opened and closed around every exchange
//! - **Framing checks**: a missing or wrong echo byte is an error, never a payload
//! - **Typed configuration**: sample count, start time, mode and interval
//! - **Block stream**: a read pass that stops exactly at the stored sample count
//! - **DataFrame output**: uses `polars` for tabular export and CSV dumps
//!
//! ## Examples
//!
//! ### Status and configuration
//!
//! ```rust,no_run
//! use tfd500_rs::Tfd500;
//!
//! let logger = Tfd500::open("/dev/ttyUSB0");
//! println!("Firmware {}", logger.version()?);
//!
//! if logger.is_idle()? {
//!     let config = logger.configuration()?;
//!     println!("{} samples every {}s since {}", config.count, config.interval.seconds(), config.start);
//! }
//! # Ok::<(), tfd500_rs::Tfd500Error>(())
//! ```
//!
//! ### Reading the samples block by block
//!
//! ```rust,no_run
//! use tfd500_rs::Tfd500;
//!
//! let logger = Tfd500::open("/dev/ttyUSB0");
//! for batch in logger.blocks()? {
//!     for sample in batch? {
//!         println!("{} {:.1} {:?}", sample.time, sample.temperature, sample.humidity);
//!     }
//! }
//! # Ok::<(), tfd500_rs::Tfd500Error>(())
//! ```
//!
//! ### Starting a new recording
//!
//! ```rust,no_run
//! use tfd500_rs::{Interval, LinkSettings, Tfd500};
//! use std::time::Duration;
//!
//! let settings = LinkSettings::from_env().with_timeout(Duration::from_secs(2));
//! let logger = Tfd500::new(settings);
//! logger.clear_flash()?;
//! logger.configure(Interval::OneMinute, true)?;
//! # Ok::<(), tfd500_rs::Tfd500Error>(())
//! ```
//!
//! ### CSV dump
//!
//! ```rust,no_run
//! use tfd500_rs::{sample_frame, Tfd500};
//!
//! let logger = Tfd500::open("/dev/ttyUSB0");
//! let mut df = logger.read_all()?.to_dataframe(sample_frame::DEFAULT_TIME_FORMAT)?;
//! sample_frame::write_csv(&mut df, std::io::stdout(), b';')?;
//! # Ok::<(), tfd500_rs::Tfd500Error>(())
//! ```

pub mod block_stream;
pub mod command;
pub mod configuration;
pub mod data_logger;
pub mod error;
pub mod link_settings;
pub mod record;
pub mod sample_frame;
pub mod serial_link;

#[cfg(test)]
mod mock_link;

// Re-export the main types for convenience
pub use block_stream::{BlockStream, Samples};

pub use command::Command;

pub use configuration::{Configuration, Interval, ModeStatus};

pub use data_logger::Tfd500;

pub use error::Tfd500Error;

pub use link_settings::LinkSettings;

pub use record::{Recording, Sample};

pub use serial_link::{Connector, Expected, Port, SerialConnector};
