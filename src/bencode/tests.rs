use std::collections::BTreeMap;

use bytes::Bytes;

use super::*;

fn strict(data: &[u8]) -> Result<Value, BencodeError> {
    decode(data, &DecodeConfig::strict())
}

fn lenient(data: &[u8]) -> Result<Value, BencodeError> {
    decode(data, &DecodeConfig::lenient())
}

fn byte_string(s: &'static [u8]) -> Value {
    Value::Bytes(Bytes::from_static(s))
}

#[test]
fn test_decode_integer() {
    assert_eq!(strict(b"i3e").unwrap(), Value::Integer(3));
    assert_eq!(strict(b"i-3e").unwrap(), Value::Integer(-3));
    assert_eq!(strict(b"i0e").unwrap(), Value::Integer(0));
    assert_eq!(
        strict(b"i9223372036854775807e").unwrap(),
        Value::Integer(i64::MAX)
    );
    assert_eq!(
        strict(b"i-9223372036854775808e").unwrap(),
        Value::Integer(i64::MIN)
    );
}

#[test]
fn test_decode_integer_non_canonical() {
    assert_eq!(
        strict(b"i03e"),
        Err(BencodeError::NonCanonicalInteger { position: 0 })
    );
    assert_eq!(
        strict(b"i-0e"),
        Err(BencodeError::NonCanonicalInteger { position: 0 })
    );
    assert_eq!(
        strict(b"i00e"),
        Err(BencodeError::NonCanonicalInteger { position: 0 })
    );
    assert_eq!(
        strict(b"i-03e"),
        Err(BencodeError::NonCanonicalInteger { position: 0 })
    );

    assert_eq!(lenient(b"i03e").unwrap(), Value::Integer(3));
    assert_eq!(lenient(b"i-0e").unwrap(), Value::Integer(0));
    assert_eq!(lenient(b"i-003e").unwrap(), Value::Integer(-3));
    assert_eq!(lenient(b"i0000e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_invalid() {
    assert_eq!(strict(b"ie"), Err(BencodeError::InvalidInteger { position: 0 }));
    assert_eq!(strict(b"i-e"), Err(BencodeError::InvalidInteger { position: 0 }));
    assert_eq!(
        strict(b"i--1e"),
        Err(BencodeError::InvalidInteger { position: 2 })
    );
    assert_eq!(
        strict(b"i1x2e"),
        Err(BencodeError::InvalidInteger { position: 2 })
    );
    assert_eq!(
        strict(b"i+1e"),
        Err(BencodeError::InvalidInteger { position: 1 })
    );
    assert_eq!(strict(b"i42"), Err(BencodeError::UnexpectedEnd { position: 3 }));
    // lenient mode relaxes canonical form, not the grammar
    assert!(matches!(
        lenient(b"i1.5e"),
        Err(BencodeError::InvalidInteger { .. })
    ));
}

#[test]
fn test_decode_integer_overflow() {
    assert_eq!(
        strict(b"i9223372036854775808e"),
        Err(BencodeError::IntegerOverflow { position: 0 })
    );
    assert_eq!(
        strict(b"i-9223372036854775809e"),
        Err(BencodeError::IntegerOverflow { position: 0 })
    );
    assert!(matches!(
        lenient(b"i99999999999999999999999999e"),
        Err(BencodeError::IntegerOverflow { .. })
    ));
    // leading zeros do not count towards the range
    assert_eq!(
        lenient(b"i00009223372036854775807e").unwrap(),
        Value::Integer(i64::MAX)
    );
}

#[test]
fn test_decode_bytes() {
    assert_eq!(strict(b"4:spam").unwrap(), byte_string(b"spam"));
    assert_eq!(strict(b"0:").unwrap(), byte_string(b""));
    assert_eq!(
        strict(b"3:\x00\xff:").unwrap(),
        Value::Bytes(Bytes::from_static(&[0x00, 0xff, b':']))
    );
}

#[test]
fn test_decode_bytes_invalid_length() {
    assert_eq!(
        strict(b"04:spam"),
        Err(BencodeError::InvalidStringLength { position: 0 })
    );
    // the length rule is not relaxed in lenient mode
    assert_eq!(
        lenient(b"04:spam"),
        Err(BencodeError::InvalidStringLength { position: 0 })
    );
    assert_eq!(
        strict(b"00:"),
        Err(BencodeError::InvalidStringLength { position: 0 })
    );
    assert_eq!(
        strict(b"4x:spam"),
        Err(BencodeError::InvalidStringLength { position: 0 })
    );
    assert_eq!(
        strict(b"99999999999999999999999:"),
        Err(BencodeError::InvalidStringLength { position: 0 })
    );
    assert_eq!(strict(b"4"), Err(BencodeError::UnexpectedEnd { position: 1 }));
}

#[test]
fn test_decode_bytes_truncated() {
    assert_eq!(
        strict(b"5:spam"),
        Err(BencodeError::TruncatedString {
            length: 5,
            available: 4,
            position: 2
        })
    );
    assert!(matches!(
        strict(b"18446744073709551615:x"),
        Err(BencodeError::TruncatedString { available: 1, .. })
    ));
}

#[test]
fn test_decode_list() {
    assert_eq!(
        strict(b"l4:spam4:eggse").unwrap(),
        Value::List(vec![byte_string(b"spam"), byte_string(b"eggs")])
    );
    assert_eq!(strict(b"le").unwrap(), Value::List(vec![]));

    let result = strict(b"l4:spami42ee").unwrap();
    let list = result.as_list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], byte_string(b"spam"));
    assert_eq!(list[1], Value::Integer(42));
}

#[test]
fn test_decode_list_unterminated() {
    assert_eq!(strict(b"l"), Err(BencodeError::UnexpectedEnd { position: 1 }));
    assert_eq!(
        strict(b"li1e"),
        Err(BencodeError::UnexpectedEnd { position: 4 })
    );
}

#[test]
fn test_decode_dict() {
    let result = strict(b"d3:cow3:moo4:spam4:eggse").unwrap();
    let dict = result.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(result.get(b"cow"), Some(&byte_string(b"moo")));
    assert_eq!(result.get(b"spam"), Some(&byte_string(b"eggs")));
    assert_eq!(strict(b"de").unwrap(), Value::Dict(BTreeMap::new()));
}

#[test]
fn test_decode_dict_non_string_key() {
    assert_eq!(
        strict(b"di1ei2ee"),
        Err(BencodeError::InvalidTag {
            byte: b'i',
            position: 1
        })
    );
    assert_eq!(strict(b"d"), Err(BencodeError::UnexpectedEnd { position: 1 }));
    assert_eq!(
        strict(b"d3:cow"),
        Err(BencodeError::UnexpectedEnd { position: 6 })
    );
}

#[test]
fn test_decode_dict_unsorted_keys() {
    let data = b"d4:spam4:eggs3:cow3:mooe";
    assert_eq!(
        strict(data),
        Err(BencodeError::UnsortedKeys { position: 13 })
    );

    let value = lenient(data).unwrap();
    let keys: Vec<&[u8]> = value.as_dict().unwrap().keys().map(|k| k.as_ref()).collect();
    assert_eq!(keys, vec![b"cow".as_slice(), b"spam".as_slice()]);
    assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
}

#[test]
fn test_decode_dict_shorter_key_sorts_first() {
    // "a" < "ab" < "b" in byte order
    assert!(strict(b"d1:ai1e2:abi2e1:bi3ee").is_ok());
    assert!(matches!(
        strict(b"d2:abi2e1:ai1ee"),
        Err(BencodeError::UnsortedKeys { .. })
    ));
}

#[test]
fn test_decode_dict_duplicate_keys() {
    let data = b"d1:ai1e1:ai2ee";

    assert_eq!(
        strict(data),
        Err(BencodeError::DuplicateKey {
            key: Bytes::from_static(b"a"),
            position: Some(7)
        })
    );

    let keep_first = DecodeConfig::strict().with_duplicate_key_policy(DuplicateKeyPolicy::KeepFirst);
    let value = decode(data, &keep_first).unwrap();
    assert_eq!(value.get(b"a"), Some(&Value::Integer(1)));

    let keep_last = DecodeConfig::lenient().with_duplicate_key_policy(DuplicateKeyPolicy::KeepLast);
    let value = decode(data, &keep_last).unwrap();
    assert_eq!(value.get(b"a"), Some(&Value::Integer(2)));
    assert_eq!(value.as_dict().unwrap().len(), 1);
}

#[test]
fn test_decode_dict_duplicate_not_adjacent_lenient() {
    let data = b"d1:bi1e1:ai2e1:bi3ee";

    let reject = DecodeConfig::lenient().with_duplicate_key_policy(DuplicateKeyPolicy::Reject);
    assert!(matches!(
        decode(data, &reject),
        Err(BencodeError::DuplicateKey { position: Some(13), .. })
    ));

    let first = DecodeConfig::lenient().with_duplicate_key_policy(DuplicateKeyPolicy::KeepFirst);
    assert_eq!(
        decode(data, &first).unwrap().get(b"b"),
        Some(&Value::Integer(1))
    );

    let last = DecodeConfig::lenient();
    assert_eq!(
        decode(data, &last).unwrap().get(b"b"),
        Some(&Value::Integer(3))
    );
}

#[test]
fn test_duplicate_value_still_validated() {
    let keep_first = DecodeConfig::lenient().with_duplicate_key_policy(DuplicateKeyPolicy::KeepFirst);
    assert!(matches!(
        decode(b"d1:ai1e1:ai1xee", &keep_first),
        Err(BencodeError::InvalidInteger { .. })
    ));
}

#[test]
fn test_invalid_tag() {
    assert_eq!(
        strict(b"x"),
        Err(BencodeError::InvalidTag {
            byte: b'x',
            position: 0
        })
    );
    assert_eq!(
        strict(b"e"),
        Err(BencodeError::InvalidTag {
            byte: b'e',
            position: 0
        })
    );
    assert_eq!(strict(b""), Err(BencodeError::UnexpectedEnd { position: 0 }));
}

#[test]
fn test_depth_guard() {
    let data = b"llleee";

    let shallow = DecodeConfig::strict().with_max_depth(2);
    assert_eq!(
        decode(data, &shallow),
        Err(BencodeError::RecursionLimitExceeded {
            max_depth: 2,
            position: 2
        })
    );

    let enough = DecodeConfig::strict().with_max_depth(3);
    assert_eq!(
        decode(data, &enough).unwrap(),
        Value::List(vec![Value::List(vec![Value::List(vec![])])])
    );
}

#[test]
fn test_depth_guard_counts_dicts() {
    let config = DecodeConfig::strict().with_max_depth(1);
    assert!(decode(b"d1:ai1ee", &config).is_ok());
    assert!(matches!(
        decode(b"d1:ade", &config),
        Err(BencodeError::RecursionLimitExceeded { .. })
    ));
}

#[test]
fn test_depth_zero_allows_scalars_only() {
    let config = DecodeConfig::strict().with_max_depth(0);
    assert_eq!(decode(b"i1e", &config).unwrap(), Value::Integer(1));
    assert_eq!(decode(b"0:", &config).unwrap(), byte_string(b""));
    assert!(matches!(
        decode(b"le", &config),
        Err(BencodeError::RecursionLimitExceeded { .. })
    ));
}

#[test]
fn test_deeply_nested_input_fails_cleanly() {
    let mut data = vec![b'l'; 1_000_000];
    data.extend(std::iter::repeat(b'e').take(1_000_000));
    assert!(matches!(
        strict(&data),
        Err(BencodeError::RecursionLimitExceeded { max_depth: 64, .. })
    ));
}

#[test]
fn test_trailing_data() {
    assert_eq!(
        strict(b"i42eextra"),
        Err(BencodeError::TrailingData { position: 4 })
    );

    let config = DecodeConfig::strict().with_trailing_data(true);
    assert_eq!(decode(b"i42eextra", &config).unwrap(), Value::Integer(42));
    assert_eq!(decode(b"4:spam4:eggs", &config).unwrap(), byte_string(b"spam"));
}

#[test]
fn test_decode_bytes_shares_buffer() {
    let data = Bytes::from_static(b"l4:spam0:e");
    let value = decode_bytes(&data, &DecodeConfig::strict()).unwrap();
    let list = value.as_list().unwrap();
    let spam = list[0].as_bytes().unwrap();

    assert_eq!(spam.as_ref(), b"spam");
    assert_eq!(spam.as_ptr(), data[3..].as_ptr());
    assert_eq!(list[1], byte_string(b""));
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
    assert_eq!(encode(&Value::Integer(i64::MIN)), b"i-9223372036854775808e");
    assert_eq!(encode(&Value::Integer(i64::MAX)), b"i9223372036854775807e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(encode(&byte_string(b"spam")), b"4:spam");
    assert_eq!(encode(&byte_string(b"")), b"0:");
    assert_eq!(encode(&Value::from(vec![0u8; 10])), {
        let mut expected = b"10:".to_vec();
        expected.extend([0u8; 10]);
        expected
    });
}

#[test]
fn test_encode_list() {
    let list = Value::List(vec![byte_string(b"spam"), Value::Integer(42)]);
    assert_eq!(encode(&list), b"l4:spami42ee");
    assert_eq!(encode(&Value::List(vec![])), b"le");
}

#[test]
fn test_encode_dict_sorted() {
    let mut dict = BTreeMap::new();
    dict.insert(Bytes::from_static(b"spam"), byte_string(b"eggs"));
    dict.insert(Bytes::from_static(b"cow"), byte_string(b"moo"));
    assert_eq!(encode(&Value::Dict(dict)), b"d3:cow3:moo4:spam4:eggse");
}

#[test]
fn test_encode_dict_insertion_order_irrelevant() {
    let a = dict_from_pairs([("b", 2i64), ("a", 1i64), ("c", 3i64)]).unwrap();
    let b = dict_from_pairs([("c", 3i64), ("b", 2i64), ("a", 1i64)]).unwrap();
    assert_eq!(encode(&a), encode(&b));
    assert_eq!(encode(&a), b"d1:ai1e1:bi2e1:ci3ee");
}

#[test]
fn test_encode_to_appends() {
    let mut buf = b"prefix".to_vec();
    encode_to(&Value::Integer(7), &mut buf);
    assert_eq!(buf, b"prefixi7e");

    let mut out = bytes::BytesMut::new();
    encode_to(&Value::string("hi"), &mut out);
    assert_eq!(&out[..], b"2:hi");
}

#[test]
fn test_encoded_len_matches() {
    let value = strict(b"d4:infod6:lengthi-1024e4:name4:teste4:listli0ei10e0:ee").unwrap();
    assert_eq!(encoded_len(&value), encode(&value).len());
    assert_eq!(encoded_len(&Value::Integer(i64::MIN)), 22);
    assert_eq!(encoded_len(&Value::Integer(0)), 3);
}

#[test]
fn test_roundtrip() {
    // Keys must be sorted lexicographically for bencode roundtrip
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = strict(original).unwrap();
    assert_eq!(encode(&decoded), original);
}

#[test]
fn test_nested_structures() {
    let data = b"d4:listl4:spami42eee";
    let decoded = strict(data).unwrap();
    assert_eq!(decoded.to_bencode(), data);
}

#[test]
fn test_lenient_normalization_is_canonical() {
    let messy = b"d4:spami007e3:cowi-0e1:xd1:bi1e1:ai-01eee";
    let normalized = encode(&lenient(messy).unwrap());
    assert_eq!(normalized, b"d3:cowi0e4:spami7e1:xd1:ai-1e1:bi1eee");

    let reparsed = strict(&normalized).unwrap();
    assert_eq!(reparsed, lenient(messy).unwrap());
    assert_eq!(encode(&reparsed), normalized);
}

#[test]
fn test_builder_rejects_duplicates() {
    let err = DictBuilder::new()
        .insert("a", 1i64)
        .and_then(|b| b.insert(b"a".as_slice(), 2i64))
        .unwrap_err();
    assert_eq!(
        err,
        BencodeError::DuplicateKey {
            key: Bytes::from_static(b"a"),
            position: None
        }
    );
    assert_eq!(err.position(), None);

    assert!(dict_from_pairs([("x", 1i64), ("x", 1i64)]).is_err());
}

#[test]
fn test_builders() {
    let list: ListBuilder = [1i64, 2, 3].into_iter().collect();
    assert_eq!(list.len(), 3);
    assert_eq!(encode(&list.build()), b"li1ei2ei3ee");

    let dict = DictBuilder::new()
        .insert("list", ListBuilder::new().push("spam").push(42i64).build())
        .unwrap();
    assert_eq!(dict.len(), 1);
    assert!(!dict.is_empty());
    assert_eq!(encode(&dict.build()), b"d4:listl4:spami42eee");
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert_eq!(value.kind(), ValueKind::Integer);
    assert!(value.as_bytes().is_none());
    assert!(value.get(b"x").is_none());

    let value = byte_string(b"test");
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());
    // digit strings are not coerced to integers
    assert!(byte_string(b"42").as_integer().is_none());

    let value = Value::Bytes(Bytes::from_static(&[0xff, 0xfe]));
    assert!(value.as_str().is_none());
    assert!(value.as_bytes().is_some());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
    assert_eq!(value.clone().into_list(), Some(vec![]));
    assert_eq!(value.into_dict(), None);

    let value = Value::string("s");
    assert_eq!(value.kind(), ValueKind::Bytes);
    assert_eq!(value.into_bytes(), Some(Bytes::from_static(b"s")));
}

#[test]
fn test_error_position() {
    let err = strict(b"l4:spami1xe").unwrap_err();
    assert_eq!(err.position(), Some(9));
    assert_eq!(err.to_string(), "invalid integer at offset 9");
}
