use crate::command::Command;
use crate::error::Tfd500Error;
use crate::serial_link::Connector;
use chrono::{NaiveDateTime, TimeDelta};

/// Date/time layout used on the wire, e.g. `20.07.15 11:44:56`.
pub const TIME_FORMAT: &str = "%d.%m.%y %H:%M:%S";

/// The three recording intervals the logger supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    TenSeconds,
    OneMinute,
    FiveMinutes,
}

impl Interval {
    pub const ALL: [Self; 3] = [Self::TenSeconds, Self::OneMinute, Self::FiveMinutes];

    /// Fails with [`Tfd500Error::InvalidInterval`] unless `seconds` is 10, 60
    /// or 300.
    pub fn from_seconds(seconds: u64) -> Result<Self, Tfd500Error> {
        Self::ALL
            .into_iter()
            .find(|interval| u64::from(interval.seconds()) == seconds)
            .ok_or(Tfd500Error::InvalidInterval { seconds })
    }

    pub const fn seconds(self) -> u32 {
        match self {
            Self::TenSeconds => 10,
            Self::OneMinute => 60,
            Self::FiveMinutes => 300,
        }
    }

    pub fn as_duration(self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.seconds()))
    }

    /// Digit used by the `I` command and in the `o` reply.
    pub const fn code(self) -> u8 {
        match self {
            Self::TenSeconds => b'0',
            Self::OneMinute => b'1',
            Self::FiveMinutes => b'2',
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            b'0' => Some(Self::TenSeconds),
            b'1' => Some(Self::OneMinute),
            b'2' => Some(Self::FiveMinutes),
            _ => None,
        }
    }
}

/// Decoded `o` reply, e.g. `C1 I2 T20.07.15 12:34:56`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeStatus {
    pub humidity: bool,
    pub interval: Interval,
    /// The logger's clock when the reply was sent.
    pub clock: NaiveDateTime,
}

impl ModeStatus {
    pub fn decode(reply: &str) -> Result<Self, Tfd500Error> {
        let [mode, interval, date, time] = split_fields::<4>(reply)?;
        let (humidity, interval) = decode_mode(reply, mode, interval)?;

        let date = date
            .strip_prefix('T')
            .ok_or_else(|| Tfd500Error::decode(reply, "clock field lacks 'T' prefix"))?;
        let clock = parse_timestamp(reply, date, time)?;

        Ok(Self {
            humidity,
            interval,
            clock,
        })
    }

    /// Humidity flag and interval of an `o` reply. The clock fields must be
    /// present but are not looked at.
    pub fn decode_mode(reply: &str) -> Result<(bool, Interval), Tfd500Error> {
        let [mode, interval, _, _] = split_fields::<4>(reply)?;
        decode_mode(reply, mode, interval)
    }
}

fn decode_mode(reply: &str, mode: &str, interval: &str) -> Result<(bool, Interval), Tfd500Error> {
    let humidity = nth_digit(reply, mode, 1)? > 0;
    let code = interval
        .as_bytes()
        .get(1)
        .copied()
        .ok_or_else(|| Tfd500Error::decode(reply, "interval field too short"))?;
    let interval = Interval::from_code(code).ok_or_else(|| {
        Tfd500Error::decode(reply, format!("unknown interval code '{}'", char::from(code)))
    })?;
    Ok((humidity, interval))
}

/// Snapshot of the recording setup.
///
/// Assembled from two separate replies (`d` and `o`). The two reads are not
/// atomic, so the snapshot assumes the setup does not change while it is being
/// taken and while a read pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    /// Number of samples stored. Bounds every read pass.
    pub count: u32,
    pub start: NaiveDateTime,
    pub humidity: bool,
    pub interval: Interval,
}

impl Configuration {
    /// Read `d` then `o` from the logger.
    pub fn fetch<C: Connector + ?Sized>(connector: &C) -> Result<Self, Tfd500Error> {
        let count_reply = Command::ReadCount.send_text(connector, None)?;
        let mode_reply = Command::ReadMode.send_text(connector, None)?;
        let configuration = Self::decode(&count_reply, &mode_reply)?;
        log::debug!("Logger configuration: {:?}", configuration);
        Ok(configuration)
    }

    /// `count_reply` looks like `000010 20.07.15 11:44:56`, `mode_reply`
    /// like `C1 I2 T20.07.15 12:34:56`. The clock in the latter is ignored.
    pub fn decode(count_reply: &str, mode_reply: &str) -> Result<Self, Tfd500Error> {
        let [count, date, time] = split_fields::<3>(count_reply)?;
        let count = count
            .parse::<u32>()
            .map_err(|e| Tfd500Error::decode(count_reply, format!("bad count: {e}")))?;
        let start = parse_timestamp(count_reply, date, time)?;
        let (humidity, interval) = ModeStatus::decode_mode(mode_reply)?;

        Ok(Self {
            count,
            start,
            humidity,
            interval,
        })
    }

    /// Timestamp of the sample at `index`, counted from the start of the
    /// recording.
    pub fn timestamp(&self, index: u32) -> NaiveDateTime {
        self.start + TimeDelta::seconds(i64::from(self.interval.seconds()) * i64::from(index))
    }
}

fn split_fields<const N: usize>(reply: &str) -> Result<[&str; N], Tfd500Error> {
    let fields: Vec<&str> = reply
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .split_whitespace()
        .collect();
    <[&str; N]>::try_from(fields).map_err(|fields| {
        Tfd500Error::decode(
            reply,
            format!("expected {N} fields, found {}", fields.len()),
        )
    })
}

fn nth_digit(reply: &str, field: &str, n: usize) -> Result<u32, Tfd500Error> {
    field
        .chars()
        .nth(n)
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| Tfd500Error::decode(reply, format!("field '{field}' lacks a digit at {n}")))
}

fn parse_timestamp(reply: &str, date: &str, time: &str) -> Result<NaiveDateTime, Tfd500Error> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), TIME_FORMAT)
        .map_err(|e| Tfd500Error::decode(reply, format!("bad timestamp: {e}")))
}
