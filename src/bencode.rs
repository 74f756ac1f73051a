//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Strict and lenient decoding
//!
//! Input is untrusted. [`DecodeConfig::strict`] (the default) only accepts
//! documents already in canonical form, so that re-encoding reproduces the
//! exact input bytes and hashes over it stay valid.
//! [`DecodeConfig::lenient`] accepts leading zeros, `-0`, unsorted keys and
//! (by default) duplicate keys, normalizing them on the way in.
//!
//! ```
//! use rbit_bencode::bencode::{decode, encode, BencodeError, DecodeConfig};
//!
//! let messy = b"d4:spami007e3:cowi-0ee";
//!
//! let err = decode(messy, &DecodeConfig::strict()).unwrap_err();
//! assert!(matches!(err, BencodeError::NonCanonicalInteger { position: 7 }));
//!
//! let value = decode(messy, &DecodeConfig::lenient()).unwrap();
//! assert_eq!(encode(&value), b"d3:cowi0e4:spami7ee");
//! ```
//!
//! # Building documents
//!
//! ```
//! use rbit_bencode::bencode::{encode, DictBuilder, ListBuilder, Value};
//!
//! # fn main() -> Result<(), rbit_bencode::bencode::BencodeError> {
//! let announce_list = ListBuilder::new()
//!     .push(ListBuilder::new().push("http://a.example/announce").build())
//!     .build();
//!
//! let torrent = DictBuilder::new()
//!     .insert("announce", "http://a.example/announce")?
//!     .insert("announce-list", announce_list)?
//!     .build();
//!
//! assert!(encode(&torrent).starts_with(b"d8:announce"));
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Decoding fails fast with a [`BencodeError`] carrying the offset of the
//! problem. Nesting beyond [`DecodeConfig::max_depth`] fails with
//! [`BencodeError::RecursionLimitExceeded`] before the decoder recurses, so
//! hostile input cannot exhaust the stack. Encoding never fails.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod builder;
mod config;
mod cursor;
mod decode;
mod encode;
mod error;
mod value;

pub use builder::{dict_from_pairs, DictBuilder, ListBuilder};
pub use config::{CanonicalMode, DecodeConfig, DuplicateKeyPolicy};
pub use cursor::Cursor;
pub use decode::{decode, decode_bytes};
pub use encode::{encode, encode_to, encoded_len};
pub use error::BencodeError;
pub use value::{Value, ValueKind};

#[cfg(test)]
mod tests;
