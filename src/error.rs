use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Unknown symbol {symbol:?} at position {position}")]
    UnknownSymbol { symbol: char, position: usize },

    #[error("Invalid key {0:?}: not a member of the current alphabet")]
    InvalidKey(char),

    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Byte 0x{byte:02x} at position {position} is outside the ASCII range")]
    OutOfRangeByte { byte: u8, position: usize },

    #[error("Unsupported transform: {0}")]
    UnsupportedTransform(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
