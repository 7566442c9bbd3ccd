use crate::error::Tfd500Error;
use crate::serial_link::{exchange, Connector, Expected};

/// Length of the `o` and `d` text replies.
pub const TEXT_REPLY_LEN: usize = 24;

/// Length of one data block, whatever the number of samples left in it.
pub const BLOCK_LEN: usize = 256;

pub const VERSION_TERMINATOR: &[u8] = b"\n";

/// Logical logger operations and their wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `0` when idle, anything else while recording.
    Status,
    /// Mode, interval and current clock.
    ReadMode,
    SetClock,
    /// Sample count and recording start.
    ReadCount,
    SetHumidity,
    SetInterval,
    Version,
    ClearFlash,
    FactoryReset,
    ReadBlock,
}

impl Command {
    pub const fn byte(self) -> u8 {
        match self {
            Self::Status => b'a',
            Self::ReadMode => b'o',
            Self::SetClock => b'T',
            Self::ReadCount => b'd',
            Self::SetHumidity => b'C',
            Self::SetInterval => b'I',
            Self::Version => b'v',
            Self::ClearFlash => b'R',
            Self::FactoryReset => b'X',
            Self::ReadBlock => b'F',
        }
    }

    pub const fn response(self) -> Expected<'static> {
        match self {
            Self::Status => Expected::Bytes(1),
            Self::ReadMode | Self::ReadCount => Expected::Bytes(TEXT_REPLY_LEN),
            Self::SetClock
            | Self::SetHumidity
            | Self::SetInterval
            | Self::ClearFlash
            | Self::FactoryReset => Expected::Bytes(0),
            Self::Version => Expected::Until(VERSION_TERMINATOR),
            Self::ReadBlock => Expected::Bytes(BLOCK_LEN),
        }
    }

    /// Run one exchange for this command.
    pub fn send<C: Connector + ?Sized>(
        self,
        connector: &C,
        parameters: Option<&[u8]>,
    ) -> Result<Vec<u8>, Tfd500Error> {
        log::debug!(
            "Sending {:?} ('{}') with parameters {:?}",
            self,
            char::from(self.byte()),
            parameters.map(String::from_utf8_lossy)
        );
        exchange(connector, self.byte(), self.response(), parameters)
    }

    /// Like [`Command::send`] for replies that are text.
    pub fn send_text<C: Connector + ?Sized>(
        self,
        connector: &C,
        parameters: Option<&[u8]>,
    ) -> Result<String, Tfd500Error> {
        let payload = self.send(connector, parameters)?;
        String::from_utf8(payload).map_err(|e| {
            Tfd500Error::decode(&String::from_utf8_lossy(e.as_bytes()), "reply is not UTF-8")
        })
    }
}

/// Parameter of the `F` command: the zero padded block index.
pub fn block_parameter(index: u32) -> String {
    format!("{index:04}")
}
