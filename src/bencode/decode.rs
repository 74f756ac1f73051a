use super::config::{DecodeConfig, DuplicateKeyPolicy};
use super::cursor::Cursor;
use super::error::BencodeError;
use super::value::Value;
use crate::constants::{MINUS, STRING_SEPARATOR, TAG_DICT, TAG_END, TAG_INTEGER, TAG_LIST};
use bytes::Bytes;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Decodes exactly one bencode value from `data`.
///
/// The whole buffer must be consumed unless
/// [`allow_trailing_data`](DecodeConfig::allow_trailing_data) is set, in
/// which case leftover bytes are ignored. Byte strings in the result are
/// copied out of `data`; use [`decode_bytes`] to share the buffer instead.
///
/// # Errors
///
/// Fails on the first grammar or policy violation; no partial value is
/// returned. See [`BencodeError`] for the individual cases.
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{decode, BencodeError, DecodeConfig, Value};
///
/// let strict = DecodeConfig::strict();
/// assert_eq!(decode(b"i3e", &strict).unwrap(), Value::Integer(3));
/// assert!(matches!(
///     decode(b"i03e", &strict),
///     Err(BencodeError::NonCanonicalInteger { .. })
/// ));
///
/// let lenient = DecodeConfig::lenient();
/// assert_eq!(decode(b"i03e", &lenient).unwrap(), Value::Integer(3));
/// ```
pub fn decode(data: &[u8], config: &DecodeConfig) -> Result<Value, BencodeError> {
    Decoder::new(data, None, config).run()
}

/// Like [`decode`], but byte strings in the result are zero-copy slices of
/// `data`.
pub fn decode_bytes(data: &Bytes, config: &DecodeConfig) -> Result<Value, BencodeError> {
    Decoder::new(data, Some(data), config).run()
}

struct Decoder<'a> {
    cursor: Cursor<'a>,
    source: Option<&'a Bytes>,
    config: &'a DecodeConfig,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8], source: Option<&'a Bytes>, config: &'a DecodeConfig) -> Self {
        Self {
            cursor: Cursor::new(data),
            source,
            config,
        }
    }

    fn run(mut self) -> Result<Value, BencodeError> {
        let result = self.decode_document();
        if let Err(e) = &result {
            trace!(error = %e, "bencode decode failed");
        }
        result
    }

    fn decode_document(&mut self) -> Result<Value, BencodeError> {
        let value = self.decode_value(0)?;

        if !self.cursor.is_empty() {
            if !self.config.allow_trailing_data {
                return Err(BencodeError::TrailingData {
                    position: self.cursor.position(),
                });
            }
            trace!(
                remaining = self.cursor.remaining(),
                "ignoring trailing data after bencode value"
            );
        }

        Ok(value)
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        let position = self.cursor.position();

        match self.cursor.peek() {
            Some(TAG_INTEGER) => self.decode_integer().map(Value::Integer),
            Some(b'0'..=b'9') => self.decode_string().map(Value::Bytes),
            Some(TAG_LIST) => {
                self.check_depth(depth)?;
                self.decode_list(depth)
            }
            Some(TAG_DICT) => {
                self.check_depth(depth)?;
                self.decode_dict(depth)
            }
            Some(byte) => Err(BencodeError::InvalidTag { byte, position }),
            None => Err(BencodeError::UnexpectedEnd { position }),
        }
    }

    /// Must run before descending into a container opened at `depth`.
    fn check_depth(&self, depth: usize) -> Result<(), BencodeError> {
        if depth >= self.config.max_depth {
            return Err(BencodeError::RecursionLimitExceeded {
                max_depth: self.config.max_depth,
                position: self.cursor.position(),
            });
        }
        Ok(())
    }

    fn decode_integer(&mut self) -> Result<i64, BencodeError> {
        let start = self.cursor.position();
        self.cursor.expect(TAG_INTEGER)?;

        let negative = self.cursor.peek() == Some(MINUS);
        if negative {
            self.cursor.next_byte()?;
        }

        let mut value: i64 = 0;
        let mut digits = 0usize;
        let mut leading_zero = false;

        loop {
            let position = self.cursor.position();
            match self.cursor.next_byte()? {
                TAG_END => break,
                b @ b'0'..=b'9' => {
                    if digits == 0 && b == b'0' {
                        leading_zero = true;
                    }
                    digits += 1;

                    // Accumulate towards the sign so i64::MIN parses.
                    let digit = i64::from(b - b'0');
                    value = value
                        .checked_mul(10)
                        .and_then(|v| {
                            if negative {
                                v.checked_sub(digit)
                            } else {
                                v.checked_add(digit)
                            }
                        })
                        .ok_or(BencodeError::IntegerOverflow { position: start })?;
                }
                _ => return Err(BencodeError::InvalidInteger { position }),
            }
        }

        if digits == 0 {
            return Err(BencodeError::InvalidInteger { position: start });
        }

        let non_canonical = (leading_zero && digits > 1) || (negative && value == 0);
        if non_canonical {
            if self.config.is_strict() {
                return Err(BencodeError::NonCanonicalInteger { position: start });
            }
            debug!(position = start, value, "normalized non-canonical integer");
        }

        Ok(value)
    }

    fn decode_string(&mut self) -> Result<Bytes, BencodeError> {
        let length = self.decode_length()?;

        let available = self.cursor.remaining();
        if length > available {
            return Err(BencodeError::TruncatedString {
                length,
                available,
                position: self.cursor.position(),
            });
        }

        let slice = self.cursor.take(length)?;
        Ok(match self.source {
            Some(source) => source.slice_ref(slice),
            None => Bytes::copy_from_slice(slice),
        })
    }

    /// Reads `<digits>:`. Leading zeros are never accepted here, not even in
    /// lenient mode, because the length decides how many bytes follow.
    fn decode_length(&mut self) -> Result<usize, BencodeError> {
        let start = self.cursor.position();
        let invalid = BencodeError::InvalidStringLength { position: start };

        let mut length: usize = 0;
        let mut digits = 0usize;

        loop {
            match self.cursor.next_byte()? {
                STRING_SEPARATOR => break,
                b @ b'0'..=b'9' => {
                    if digits == 1 && length == 0 {
                        return Err(invalid);
                    }
                    digits += 1;
                    length = length
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(b - b'0')))
                        .ok_or_else(|| invalid.clone())?;
                }
                _ => return Err(invalid),
            }
        }

        if digits == 0 {
            return Err(invalid);
        }

        Ok(length)
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.cursor.expect(TAG_LIST)?;
        let mut list = Vec::new();

        while self.cursor.peek() != Some(TAG_END) {
            list.push(self.decode_value(depth + 1)?);
        }

        self.cursor.expect(TAG_END)?;
        Ok(Value::List(list))
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        let start = self.cursor.position();
        self.cursor.expect(TAG_DICT)?;

        let strict = self.config.is_strict();
        let mut dict: BTreeMap<Bytes, Value> = BTreeMap::new();
        let mut reordered = false;

        while self.cursor.peek() != Some(TAG_END) {
            let key_position = self.cursor.position();
            let key = match self.cursor.peek() {
                Some(b'0'..=b'9') => self.decode_string()?,
                Some(byte) => {
                    return Err(BencodeError::InvalidTag {
                        byte,
                        position: key_position,
                    })
                }
                None => {
                    return Err(BencodeError::UnexpectedEnd {
                        position: key_position,
                    })
                }
            };

            // In strict mode the largest key so far is also the previous one.
            let out_of_order = dict
                .last_key_value()
                .is_some_and(|(last, _)| key < *last);
            if out_of_order {
                if strict {
                    return Err(BencodeError::UnsortedKeys {
                        position: key_position,
                    });
                }
                reordered = true;
            }

            let value = self.decode_value(depth + 1)?;

            match dict.entry(key) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                Entry::Occupied(mut entry) => match self.config.duplicate_key_policy {
                    DuplicateKeyPolicy::Reject => {
                        return Err(BencodeError::DuplicateKey {
                            key: entry.key().clone(),
                            position: Some(key_position),
                        });
                    }
                    DuplicateKeyPolicy::KeepFirst => {
                        debug!(position = key_position, "duplicate key, keeping first");
                    }
                    DuplicateKeyPolicy::KeepLast => {
                        debug!(position = key_position, "duplicate key, keeping last");
                        entry.insert(value);
                    }
                },
            }
        }

        self.cursor.expect(TAG_END)?;

        if reordered {
            debug!(position = start, "sorted out-of-order dictionary keys");
        }

        Ok(Value::Dict(dict))
    }
}
