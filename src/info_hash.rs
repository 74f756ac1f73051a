//! Info hashes over canonical bencode.
//!
//! An info hash is the SHA-1 (v1) or SHA-256 (v2, [BEP-52]) digest of the
//! bencoded `info` dictionary of a torrent. It is only meaningful when the
//! bytes being hashed are canonical, which is why [`InfoHash::from_document`]
//! decodes in strict mode and hashes the re-encoded dictionary.
//!
//! # Examples
//!
//! ```
//! use rbit_bencode::bencode::{DictBuilder, Value};
//! use rbit_bencode::InfoHash;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let info = DictBuilder::new()
//!     .insert("name", "example.txt")?
//!     .insert("length", 1024i64)?
//!     .build();
//! let torrent = DictBuilder::new().insert("info", info.clone())?.build();
//!
//! let from_value = InfoHash::v1_of(&info);
//! let from_bytes = InfoHash::from_document(&torrent.to_bencode())?;
//! assert_eq!(from_value, from_bytes);
//! assert_eq!(from_value.to_hex().len(), 40);
//! # Ok(())
//! # }
//! ```
//!
//! [BEP-52]: http://bittorrent.org/beps/bep_0052.html

use sha1::{Digest, Sha1};
use sha2::Sha256;
use std::fmt;
use thiserror::Error;

use crate::bencode::{decode, encode, BencodeError, DecodeConfig, Value};
use crate::constants::{INFO_HASH_V1_LEN, INFO_HASH_V2_LEN, INFO_KEY};

/// Errors that can occur when computing or parsing an info hash.
#[derive(Debug, Error)]
pub enum InfoHashError {
    /// The document is not valid canonical bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// The document has no top-level `info` key.
    #[error("missing info dictionary")]
    MissingInfo,

    /// The document or its `info` entry is not a dictionary.
    #[error("info is not a dictionary")]
    InvalidInfo,

    /// The hash has an invalid length (must be 20 or 32 bytes).
    #[error("invalid info hash length")]
    InvalidLength,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoHash {
    V1([u8; INFO_HASH_V1_LEN]),
    V2([u8; INFO_HASH_V2_LEN]),
}

impl InfoHash {
    /// SHA-1 of the canonical encoding of `value`.
    pub fn v1_of(value: &Value) -> Self {
        let hash: [u8; INFO_HASH_V1_LEN] = Sha1::digest(encode(value)).into();
        InfoHash::V1(hash)
    }

    /// SHA-256 of the canonical encoding of `value`.
    pub fn v2_of(value: &Value) -> Self {
        let hash: [u8; INFO_HASH_V2_LEN] = Sha256::digest(encode(value)).into();
        InfoHash::V2(hash)
    }

    /// Decodes `data` strictly and returns the v1 hash of its `info` dictionary.
    ///
    /// # Errors
    ///
    /// Fails if `data` is not canonical bencode, is not a dictionary, or has
    /// no dictionary under `info`.
    pub fn from_document(data: &[u8]) -> Result<Self, InfoHashError> {
        find_info(data).map(|info| Self::v1_of(&info))
    }

    /// Like [`InfoHash::from_document`], producing a v2 hash.
    pub fn from_document_v2(data: &[u8]) -> Result<Self, InfoHashError> {
        find_info(data).map(|info| Self::v2_of(&info))
    }

    pub fn from_v1_bytes(bytes: &[u8]) -> Result<Self, InfoHashError> {
        let arr = bytes.try_into().map_err(|_| InfoHashError::InvalidLength)?;
        Ok(InfoHash::V1(arr))
    }

    pub fn from_v2_bytes(bytes: &[u8]) -> Result<Self, InfoHashError> {
        let arr = bytes.try_into().map_err(|_| InfoHashError::InvalidLength)?;
        Ok(InfoHash::V2(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, InfoHashError> {
        let bytes = hex_decode(s).ok_or(InfoHashError::InvalidLength)?;
        match bytes.len() {
            INFO_HASH_V1_LEN => Self::from_v1_bytes(&bytes),
            INFO_HASH_V2_LEN => Self::from_v2_bytes(&bytes),
            _ => Err(InfoHashError::InvalidLength),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            InfoHash::V1(arr) => arr,
            InfoHash::V2(arr) => arr,
        }
    }

    pub fn is_v1(&self) -> bool {
        matches!(self, InfoHash::V1(_))
    }

    pub fn is_v2(&self) -> bool {
        matches!(self, InfoHash::V2(_))
    }

    pub fn to_hex(&self) -> String {
        hex_encode(self.as_bytes())
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn find_info(data: &[u8]) -> Result<Value, InfoHashError> {
    let document = decode(data, &DecodeConfig::strict())?
        .into_dict()
        .ok_or(InfoHashError::InvalidInfo)?;
    let info = document.get(INFO_KEY).ok_or(InfoHashError::MissingInfo)?;
    if info.as_dict().is_none() {
        return Err(InfoHashError::InvalidInfo);
    }
    Ok(info.clone())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
        s
    })
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    let s = s.as_bytes();
    if s.len() % 2 != 0 {
        return None;
    }
    s.chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        })
        .collect()
}
