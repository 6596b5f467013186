use crate::layout::PacketType;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Not enough bytes: got {actual}, need at least {minimum}")]
    NotEnoughData { actual: usize, minimum: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The tag byte does not name any known packet layout.
    #[error("Unknown packet type: {0:#04x}")]
    UnknownPacketType(u8),

    /// Raw data was handed to a collection of a different packet type.
    #[error("Packet type mismatch: collection holds {expected}, data is {actual}")]
    PacketTypeMismatch {
        expected: PacketType,
        actual: PacketType,
    },

    /// A log line could not be turned back into a record.
    #[error("Invalid log line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Value cannot be represented in the 2-byte compressed float encoding.
    #[error("Value {0} out of range for fp2 encoding")]
    Fp2Range(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
