//! Incremental construction of dictionaries and lists.
//!
//! A [`BTreeMap`] silently overwrites a repeated key. [`DictBuilder`] refuses
//! it instead, so a document assembled from several sources cannot lose an
//! entry without the caller noticing.

use bytes::Bytes;
use std::collections::BTreeMap;

use super::error::BencodeError;
use super::value::Value;

/// Builds a [`Value::Dict`], rejecting repeated keys as they are inserted.
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{encode, DictBuilder, Value};
///
/// # fn main() -> Result<(), rbit_bencode::bencode::BencodeError> {
/// let info = DictBuilder::new()
///     .insert("name", "example.txt")?
///     .insert("piece length", 16384i64)?
///     .insert("length", 1024i64)?
///     .build();
///
/// assert_eq!(
///     encode(&info),
///     b"d6:lengthi1024e4:name11:example.txt12:piece lengthi16384ee"
/// );
///
/// assert!(DictBuilder::new().insert("a", 1i64)?.insert("a", 2i64).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DictBuilder {
    entries: BTreeMap<Bytes, Value>,
}

impl DictBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns [`BencodeError::DuplicateKey`] with no position if `key` is
    /// already present.
    pub fn insert(
        mut self,
        key: impl AsRef<[u8]>,
        value: impl Into<Value>,
    ) -> Result<Self, BencodeError> {
        let key = Bytes::copy_from_slice(key.as_ref());
        if self.entries.contains_key(&key) {
            return Err(BencodeError::DuplicateKey {
                key,
                position: None,
            });
        }
        self.entries.insert(key, value.into());
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> Value {
        Value::Dict(self.entries)
    }
}

/// Builds a [`Value::List`] in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ListBuilder {
    items: Vec<Value>,
}

impl ListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, value: impl Into<Value>) -> Self {
        self.items.push(value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn build(self) -> Value {
        Value::List(self.items)
    }
}

impl<V: Into<Value>> FromIterator<V> for ListBuilder {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Collects `(key, value)` pairs into a dictionary, failing on the first
/// repeated key.
///
/// # Errors
///
/// Returns [`BencodeError::DuplicateKey`] if two pairs share a key.
pub fn dict_from_pairs<K, V, I>(pairs: I) -> Result<Value, BencodeError>
where
    K: AsRef<[u8]>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .try_fold(DictBuilder::new(), |builder, (k, v)| builder.insert(k, v))
        .map(DictBuilder::build)
}
