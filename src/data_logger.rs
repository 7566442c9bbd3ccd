use crate::block_stream::{BlockStream, Samples};
use crate::command::{block_parameter, Command};
use crate::configuration::{Configuration, Interval, ModeStatus, TIME_FORMAT};
use crate::error::Tfd500Error;
use crate::link_settings::LinkSettings;
use crate::record::Recording;
use crate::serial_link::{Connector, SerialConnector};
use chrono::NaiveDateTime;

/// Handle to one TFD500 logger.
///
/// No connection is held between calls: every operation opens the port, runs
/// its exchange and closes the port again. The handle must have a single
/// owner; overlapping calls on the same device corrupt the framing.
pub struct Tfd500<C: Connector = SerialConnector> {
    connector: C,
}

impl Tfd500<SerialConnector> {
    /// Logger reached over the serial port described by `settings`. No I/O
    /// happens until the first operation.
    pub fn new(settings: LinkSettings) -> Self {
        log::debug!("Using TFD500 logger at {}", settings.device);
        Self::with_connector(SerialConnector::new(settings))
    }

    /// Logger at `device` with default settings.
    pub fn open(device: &str) -> Self {
        Self::new(LinkSettings::new(device))
    }
}

impl<C: Connector> Tfd500<C> {
    /// Logger reached through a custom [`Connector`].
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// `true` unless the logger is recording.
    pub fn is_idle(&self) -> Result<bool, Tfd500Error> {
        let status = Command::Status.send(&self.connector, None)?;
        Ok(status == b"0")
    }

    /// `true` while the logger is recording. Stored samples can only be read
    /// when this is `false`.
    pub fn is_busy(&self) -> Result<bool, Tfd500Error> {
        Ok(!self.is_idle()?)
    }

    /// Current value of the logger's clock.
    pub fn clock(&self) -> Result<NaiveDateTime, Tfd500Error> {
        Ok(self.mode_status()?.clock)
    }

    /// Set the logger's clock. Sub-second precision is dropped.
    pub fn set_clock(&self, time: NaiveDateTime) -> Result<(), Tfd500Error> {
        let value = time.format(TIME_FORMAT).to_string();
        Command::SetClock.send(&self.connector, Some(value.as_bytes()))?;
        Ok(())
    }

    /// Set the logger's clock to the local time of this machine.
    pub fn set_clock_now(&self) -> Result<(), Tfd500Error> {
        self.set_clock(chrono::Local::now().naive_local())
    }

    /// Raw `o` reply: recording mode, interval and clock.
    pub fn mode_status(&self) -> Result<ModeStatus, Tfd500Error> {
        let reply = Command::ReadMode.send_text(&self.connector, None)?;
        ModeStatus::decode(&reply)
    }

    /// Fresh snapshot of the recording setup, see [`Configuration`].
    pub fn configuration(&self) -> Result<Configuration, Tfd500Error> {
        Configuration::fetch(&self.connector)
    }

    /// Record humidity next to temperature from the next recording on.
    pub fn set_humidity(&self, enabled: bool) -> Result<(), Tfd500Error> {
        let value: &[u8] = if enabled { b"1" } else { b"0" };
        Command::SetHumidity.send(&self.connector, Some(value))?;
        Ok(())
    }

    /// Select the recording interval used from the next recording on.
    pub fn set_interval(&self, interval: Interval) -> Result<(), Tfd500Error> {
        let code = [interval.code()];
        Command::SetInterval.send(&self.connector, Some(code.as_slice()))?;
        Ok(())
    }

    /// Like [`Tfd500::set_interval`]. Fails without touching the port unless
    /// `seconds` is 10, 60 or 300.
    pub fn set_interval_seconds(&self, seconds: u64) -> Result<(), Tfd500Error> {
        self.set_interval(Interval::from_seconds(seconds)?)
    }

    /// Set clock, interval and mode in one go, ready for a new recording.
    pub fn configure(&self, interval: Interval, humidity: bool) -> Result<(), Tfd500Error> {
        self.set_clock_now()?;
        self.set_interval(interval)?;
        self.set_humidity(humidity)
    }

    /// Firmware version string.
    pub fn version(&self) -> Result<String, Tfd500Error> {
        let reply = Command::Version.send_text(&self.connector, None)?;
        Ok(reply.trim().to_string())
    }

    /// Erase all records. This also resets the clock and the last used
    /// configuration.
    pub fn clear_flash(&self) -> Result<(), Tfd500Error> {
        Command::ClearFlash.send(&self.connector, None)?;
        Ok(())
    }

    /// Restore factory defaults, set the clock to `01.01.00 00:00:00` and
    /// reboot.
    pub fn factory_reset(&self) -> Result<(), Tfd500Error> {
        Command::FactoryReset.send(&self.connector, None)?;
        Ok(())
    }

    /// Raw content of one flash block. The logger always sends a full block,
    /// including whatever was left behind past the last sample.
    pub fn read_block(&self, index: u32) -> Result<Vec<u8>, Tfd500Error> {
        let parameter = block_parameter(index);
        Command::ReadBlock.send(&self.connector, Some(parameter.as_bytes()))
    }

    /// Start a new read pass. The configuration is re-read for every pass.
    pub fn blocks(&self) -> Result<BlockStream<'_, C>, Tfd500Error> {
        BlockStream::open(&self.connector)
    }

    /// Like [`Tfd500::blocks`], one sample at a time.
    pub fn samples(&self) -> Result<Samples<'_, C>, Tfd500Error> {
        Ok(Samples::new(self.blocks()?))
    }

    /// Read every stored sample. Refused while the logger is recording.
    pub fn read_all(&self) -> Result<Recording, Tfd500Error> {
        if self.is_busy()? {
            return Err(Tfd500Error::Busy);
        }

        let samples = self.samples()?;
        let configuration = *samples.configuration();
        let samples = samples.collect::<Result<Vec<_>, _>>()?;
        log::debug!("Read {} sample(s)", samples.len());

        Ok(Recording {
            configuration,
            samples,
        })
    }
}
