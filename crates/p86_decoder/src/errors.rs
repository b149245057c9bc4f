use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("No more bytes to decode")]
    EndOfInput,

    #[error("Unrecognized op code ({0:#04x})")]
    UnrecognizedOpcode(u8),

    #[error("Unsupported addressing mode encoding ({0:#010b})")]
    UnsupportedAddressingMode(u8),

    #[error("Stream ended in the middle of an instruction")]
    MalformedStream,
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// A [DecodeError] located in the stream being disassembled.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("Unexpected byte at offset {offset} ({byte:#04x}, {byte:#010b}): {source}")]
pub struct DisassemblyError {
    /// Offset of the first byte of the instruction that failed to decode.
    pub offset: usize,
    /// The raw byte found at `offset`.
    pub byte: u8,
    pub source: DecodeError,
}
