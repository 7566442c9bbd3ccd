use crate::error::Tfd500Error;
use crate::link_settings::LinkSettings;
use serialport::{DataBits, FlowControl, Parity, StopBits};
use std::io::{ErrorKind, Read, Write};

/// A byte pipe to the logger, valid for a single exchange.
pub trait Port: Read + Write {}

impl<T: Read + Write + ?Sized> Port for T {}

/// Opens a fresh session to the logger.
///
/// Every exchange gets its own session which is dropped (and thereby closed)
/// before [`exchange`] returns.
pub trait Connector {
    fn open(&self) -> Result<Box<dyn Port>, Tfd500Error>;
}

/// Shape of the payload that follows the echo byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected<'a> {
    /// Exactly this many bytes.
    Bytes(usize),
    /// Everything up to and including the delimiter.
    Until(&'a [u8]),
}

#[derive(Debug, Clone)]
pub struct SerialConnector {
    settings: LinkSettings,
}

impl SerialConnector {
    pub fn new(settings: LinkSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }
}

impl Connector for SerialConnector {
    fn open(&self) -> Result<Box<dyn Port>, Tfd500Error> {
        log::debug!(
            "Opening {} at {} baud",
            self.settings.device,
            self.settings.baud_rate
        );
        let serial = serialport::new(self.settings.device.as_str(), self.settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.settings.timeout)
            .open()?;
        Ok(Box::new(serial))
    }
}

/// Send `command` (and `parameters`) and return the reply payload.
///
/// The first reply byte must echo `command`, anything else is a
/// [`Tfd500Error::Framing`] error and no payload is read. Nothing is retried.
pub fn exchange<C: Connector + ?Sized>(
    connector: &C,
    command: u8,
    expected: Expected<'_>,
    parameters: Option<&[u8]>,
) -> Result<Vec<u8>, Tfd500Error> {
    let mut port = connector.open()?;
    let result = transact(port.as_mut(), command, expected, parameters);
    drop(port);

    match &result {
        Ok(payload) => log::debug!(
            "Command '{}' answered with {} byte(s)",
            char::from(command),
            payload.len()
        ),
        Err(e) => log::debug!("Command '{}' failed: {}", char::from(command), e),
    }
    result
}

fn transact(
    port: &mut dyn Port,
    command: u8,
    expected: Expected<'_>,
    parameters: Option<&[u8]>,
) -> Result<Vec<u8>, Tfd500Error> {
    port.write_all(&[command])?;
    if let Some(parameters) = parameters {
        port.write_all(parameters)?;
    }
    port.flush()?;

    match read_byte(port, command)? {
        Some(echo) if echo == command => {}
        received => return Err(Tfd500Error::Framing { command, received }),
    }

    match expected {
        Expected::Bytes(len) => read_fixed(port, command, len),
        Expected::Until(delimiter) => read_until(port, command, delimiter),
    }
}

/// `Ok(None)` means the port reported end of stream.
fn read_byte(port: &mut dyn Port, command: u8) -> Result<Option<u8>, Tfd500Error> {
    let mut byte = [0u8; 1];
    loop {
        match port.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) if e.kind() == ErrorKind::TimedOut => {
                return Err(Tfd500Error::Timeout { command })
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Reads up to `len` bytes. A reply that stops early is returned truncated,
/// one that never starts is a timeout.
fn read_fixed(port: &mut dyn Port, command: u8, len: usize) -> Result<Vec<u8>, Tfd500Error> {
    let mut payload = vec![0u8; len];
    let mut filled = 0;

    while filled < len {
        match port.read(&mut payload[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) if e.kind() == ErrorKind::TimedOut && filled > 0 => break,
            Err(e) if e.kind() == ErrorKind::TimedOut => {
                return Err(Tfd500Error::Timeout { command })
            }
            Err(e) => return Err(e.into()),
        }
    }

    if filled < len {
        log::warn!(
            "Command '{}' expected {} byte(s) but got {}",
            char::from(command),
            len,
            filled
        );
        payload.truncate(filled);
    }
    Ok(payload)
}

fn read_until(
    port: &mut dyn Port,
    command: u8,
    delimiter: &[u8],
) -> Result<Vec<u8>, Tfd500Error> {
    let mut response = Vec::new();

    loop {
        match read_byte(port, command)? {
            Some(byte) => {
                response.push(byte);
                if response.ends_with(delimiter) {
                    break;
                }
            }
            None => {
                return Err(std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!(
                        "reply to '{}' ended before its delimiter",
                        char::from(command)
                    ),
                )
                .into())
            }
        }
    }

    Ok(response)
}
