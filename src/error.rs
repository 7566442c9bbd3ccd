use polars::prelude::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum Tfd500Error {
    #[error("Serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timeout error: no reply to command '{}'", as_char(.command))]
    Timeout { command: u8 },

    /// The first reply byte did not echo the issued command.
    #[error(
        "Framing error: expected echo '{}' but got {}",
        as_char(.command),
        describe_echo(.received)
    )]
    Framing { command: u8, received: Option<u8> },

    #[error("Invalid interval {seconds}s, must be one of 10, 60 or 300")]
    InvalidInterval { seconds: u64 },

    #[error("Could not decode reply '{reply}': {reason}")]
    Decode { reply: String, reason: String },

    #[error("Block {index} held no whole sample ({len} byte(s))")]
    EmptyBlock { index: u32, len: usize },

    #[error("Logger is currently recording")]
    Busy,

    #[error("Frame error: {0}")]
    Frame(#[from] PolarsError),
}

impl Tfd500Error {
    pub(crate) fn decode(reply: &str, reason: impl Into<String>) -> Self {
        Self::Decode {
            reply: reply.to_string(),
            reason: reason.into(),
        }
    }
}

fn as_char(byte: &u8) -> char {
    char::from(*byte)
}

fn describe_echo(received: &Option<u8>) -> String {
    match *received {
        Some(byte) if byte.is_ascii_graphic() => format!("'{}'", char::from(byte)),
        Some(byte) => format!("0x{byte:02x}"),
        None => "nothing".to_string(),
    }
}
