//! rbit-bencode - Bencode codec for BitTorrent
//!
//! Decodes untrusted, fully buffered bencode into a [`Value`] tree and
//! encodes [`Value`] trees back into canonical bytes suitable for hashing.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding with strict and lenient policies
//! - [`info_hash`] - v1/v2 info hashes over canonical encodings
//! - [`constants`] - Grammar tags and default limits
//!
//! # Example
//!
//! ```
//! use rbit_bencode::{decode, encode, DecodeConfig, Value};
//!
//! let value = decode(b"d3:cow3:moo4:spam4:eggse", &DecodeConfig::default()).unwrap();
//! assert_eq!(value.get(b"cow").and_then(Value::as_str), Some("moo"));
//! assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
//! ```

pub mod bencode;
pub mod constants;
pub mod info_hash;

pub use bencode::{
    decode, decode_bytes, encode, BencodeError, CanonicalMode, DecodeConfig, DictBuilder,
    DuplicateKeyPolicy, ListBuilder, Value,
};
pub use info_hash::{InfoHash, InfoHashError};
