use bytes::BufMut;

use super::value::Value;
use crate::constants::{MINUS, STRING_SEPARATOR, TAG_DICT, TAG_END, TAG_INTEGER, TAG_LIST};

/// Encodes a bencode value to a byte vector.
///
/// The output is always in canonical form:
/// - Integers: `i<number>e` with no leading zeros and no `-0`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted lexicographically)
///
/// Encoding cannot fail. Two dictionaries with the same entries always
/// produce the same bytes regardless of insertion order.
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{encode, Value};
/// use std::collections::BTreeMap;
/// use bytes::Bytes;
///
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list), b"li1e3:twoe");
///
/// let mut dict = BTreeMap::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// assert_eq!(encode(&Value::Dict(dict)), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(value));
    encode_to(value, &mut buf);
    buf
}

/// Appends the canonical encoding of `value` to `buf`.
pub fn encode_to<B: BufMut>(value: &Value, buf: &mut B) {
    match value {
        Value::Integer(i) => {
            buf.put_u8(TAG_INTEGER);
            put_integer(*i, buf);
            buf.put_u8(TAG_END);
        }
        Value::Bytes(b) => put_string(b, buf),
        Value::List(l) => {
            buf.put_u8(TAG_LIST);
            for item in l {
                encode_to(item, buf);
            }
            buf.put_u8(TAG_END);
        }
        Value::Dict(d) => {
            buf.put_u8(TAG_DICT);
            for (key, val) in d {
                put_string(key, buf);
                encode_to(val, buf);
            }
            buf.put_u8(TAG_END);
        }
    }
}

/// Exact number of bytes [`encode`] produces for `value`.
pub fn encoded_len(value: &Value) -> usize {
    match value {
        Value::Integer(i) => 2 + integer_len(*i),
        Value::Bytes(b) => string_len(b.len()),
        Value::List(l) => 2 + l.iter().map(encoded_len).sum::<usize>(),
        Value::Dict(d) => {
            2 + d
                .iter()
                .map(|(k, v)| string_len(k.len()) + encoded_len(v))
                .sum::<usize>()
        }
    }
}

fn put_string<B: BufMut>(bytes: &[u8], buf: &mut B) {
    put_unsigned(bytes.len() as u64, buf);
    buf.put_u8(STRING_SEPARATOR);
    buf.put_slice(bytes);
}

fn put_integer<B: BufMut>(i: i64, buf: &mut B) {
    if i < 0 {
        buf.put_u8(MINUS);
    }
    // unsigned_abs keeps i64::MIN representable
    put_unsigned(i.unsigned_abs(), buf);
}

fn put_unsigned<B: BufMut>(mut n: u64, buf: &mut B) {
    let mut digits = [0u8; 20];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    buf.put_slice(&digits[start..]);
}

fn string_len(len: usize) -> usize {
    decimal_len(len as u64) + 1 + len
}

fn integer_len(i: i64) -> usize {
    usize::from(i < 0) + decimal_len(i.unsigned_abs())
}

fn decimal_len(mut n: u64) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}
