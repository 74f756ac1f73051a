use bytes::Bytes;
use thiserror::Error;

/// Errors produced while decoding bencode or building dictionaries.
///
/// Every decode error carries the byte offset into the input at which the
/// problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    #[error("unexpected end of input at offset {position}")]
    UnexpectedEnd { position: usize },

    #[error("invalid tag byte 0x{byte:02x} at offset {position}")]
    InvalidTag { byte: u8, position: usize },

    #[error("invalid integer at offset {position}")]
    InvalidInteger { position: usize },

    #[error("integer out of 64-bit range at offset {position}")]
    IntegerOverflow { position: usize },

    /// Leading zeros or `-0`; only raised in strict mode.
    #[error("non-canonical integer at offset {position}")]
    NonCanonicalInteger { position: usize },

    #[error("invalid string length at offset {position}")]
    InvalidStringLength { position: usize },

    #[error("string of length {length} truncated at offset {position} ({available} bytes available)")]
    TruncatedString {
        length: usize,
        available: usize,
        position: usize,
    },

    #[error("nesting deeper than {max_depth} levels at offset {position}")]
    RecursionLimitExceeded { max_depth: usize, position: usize },

    /// `position` is `None` when the duplicate was rejected by a builder
    /// rather than found in decoded input.
    #[error("duplicate dictionary key {:?}", String::from_utf8_lossy(.key))]
    DuplicateKey {
        key: Bytes,
        position: Option<usize>,
    },

    /// Only raised in strict mode.
    #[error("dictionary keys not sorted at offset {position}")]
    UnsortedKeys { position: usize },

    #[error("trailing data after value at offset {position}")]
    TrailingData { position: usize },
}

impl BencodeError {
    /// Byte offset at which the error was detected, if it came from input.
    pub fn position(&self) -> Option<usize> {
        match self {
            BencodeError::UnexpectedEnd { position }
            | BencodeError::InvalidTag { position, .. }
            | BencodeError::InvalidInteger { position }
            | BencodeError::IntegerOverflow { position }
            | BencodeError::NonCanonicalInteger { position }
            | BencodeError::InvalidStringLength { position }
            | BencodeError::TruncatedString { position, .. }
            | BencodeError::RecursionLimitExceeded { position, .. }
            | BencodeError::UnsortedKeys { position }
            | BencodeError::TrailingData { position } => Some(*position),
            BencodeError::DuplicateKey { position, .. } => *position,
        }
    }
}
