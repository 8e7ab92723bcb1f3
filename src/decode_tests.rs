use std::collections::BTreeMap;

use hex_literal::hex;
use num_bigint::BigInt;

use super::encode::encode;
use super::error::Error;
use super::object::Object;
use super::value::Value;

fn parse(data: &[u8]) -> Value {
    Object::from(data).decode().unwrap()
}

#[test]
fn rfc_tests() {
    // RFC 8949, Appendix A:
    // https://www.rfc-editor.org/rfc/rfc8949.html#section-appendix.a

    assert_eq!(parse(&hex!("00")), Value::Unsigned(0));
    assert_eq!(parse(&hex!("01")), Value::Unsigned(1));
    assert_eq!(parse(&hex!("0a")), Value::Unsigned(10));
    assert_eq!(parse(&hex!("17")), Value::Unsigned(23));
    assert_eq!(parse(&hex!("1818")), Value::Unsigned(24));
    assert_eq!(parse(&hex!("1819")), Value::Unsigned(25));
    assert_eq!(parse(&hex!("1864")), Value::Unsigned(100));
    assert_eq!(parse(&hex!("1903e8")), Value::Unsigned(1000));
    assert_eq!(parse(&hex!("1a000f4240")), Value::Unsigned(1000000));
    assert_eq!(
        parse(&hex!("1b000000e8d4a51000")),
        Value::Unsigned(1000000000000)
    );
    assert_eq!(
        parse(&hex!("1bffffffffffffffff")),
        Value::Unsigned(18446744073709551615)
    );
    assert_eq!(
        parse(&hex!("c249010000000000000000")),
        Value::Big(BigInt::from(18446744073709551616u128))
    );
    assert_eq!(
        parse(&hex!("3bffffffffffffffff")),
        Value::Big(BigInt::from(-18446744073709551616i128))
    );
    assert_eq!(
        parse(&hex!("c349010000000000000000")),
        Value::Big(BigInt::from(-18446744073709551617i128))
    );
    assert_eq!(parse(&hex!("20")), Value::Signed(-1));
    assert_eq!(parse(&hex!("29")), Value::Signed(-10));
    assert_eq!(parse(&hex!("3863")), Value::Signed(-100));
    assert_eq!(parse(&hex!("3903e7")), Value::Signed(-1000));
    assert_eq!(parse(&hex!("f90000")), Value::Half(half::f16::from_f32(0.0)));
    assert_eq!(
        parse(&hex!("f98000")),
        Value::Half(half::f16::from_f32(-0.0))
    );
    assert_eq!(parse(&hex!("f93c00")), Value::Half(half::f16::from_f32(1.0)));
    assert_eq!(parse(&hex!("fb3ff199999999999a")), Value::Double(1.1));
    assert_eq!(parse(&hex!("f93e00")), Value::Half(half::f16::from_f32(1.5)));
    assert_eq!(
        parse(&hex!("f97bff")),
        Value::Half(half::f16::from_f32(65504.0))
    );
    assert_eq!(parse(&hex!("fa47c35000")), Value::Single(100000.0));
    assert_eq!(
        parse(&hex!("fa7f7fffff")),
        Value::Single(3.4028234663852886e+38)
    );
    assert_eq!(parse(&hex!("fb7e37e43c8800759c")), Value::Double(1.0e+300));
    assert_eq!(
        parse(&hex!("f90001")),
        Value::Half(half::f16::from_bits(0x0001))
    );
    assert_eq!(
        parse(&hex!("f90400")),
        Value::Half(half::f16::from_f32(0.00006103515625))
    );
    assert_eq!(
        parse(&hex!("f9c400")),
        Value::Half(half::f16::from_f32(-4.0))
    );
    assert_eq!(parse(&hex!("fbc010666666666666")), Value::Double(-4.1));
    assert_eq!(parse(&hex!("f97c00")), Value::Half(half::f16::INFINITY));
    assert!(matches!(parse(&hex!("f97e00")), Value::Half(f) if f.is_nan()));
    assert_eq!(parse(&hex!("f9fc00")), Value::Half(half::f16::NEG_INFINITY));
    assert_eq!(parse(&hex!("fa7f800000")), Value::Single(f32::INFINITY));
    assert!(matches!(parse(&hex!("fa7fc00000")), Value::Single(f) if f.is_nan()));
    assert_eq!(parse(&hex!("faff800000")), Value::Single(f32::NEG_INFINITY));
    assert_eq!(
        parse(&hex!("fb7ff0000000000000")),
        Value::Double(f64::INFINITY)
    );
    assert!(matches!(parse(&hex!("fb7ff8000000000000")), Value::Double(f) if f.is_nan()));
    assert_eq!(
        parse(&hex!("fbfff0000000000000")),
        Value::Double(f64::NEG_INFINITY)
    );
    assert_eq!(parse(&hex!("f4")), Value::Bool(false));
    assert_eq!(parse(&hex!("f5")), Value::Bool(true));
    assert_eq!(parse(&hex!("f6")), Value::Null);
    assert_eq!(parse(&hex!("f7")), Value::Undefined);
    assert_eq!(parse(&hex!("f0")), Value::Simple(16));
    assert_eq!(parse(&hex!("f8ff")), Value::Simple(255));
    assert_eq!(parse(&hex!("40")), Value::Bytes(Vec::new()));
    assert_eq!(
        parse(&hex!("4401020304")),
        Value::Bytes(hex!("01020304").to_vec())
    );
    assert_eq!(parse(&hex!("60")), Value::Text(String::new()));
    assert_eq!(parse(&hex!("6161")), Value::Text("a".to_string()));
    assert_eq!(parse(&hex!("6449455446")), Value::Text("IETF".to_string()));
    assert_eq!(parse(&hex!("62225c")), Value::Text("\"\\".to_string()));
    assert_eq!(
        parse(&hex!("62c3bc")),
        Value::Text("\u{00fc}".to_string())
    );
    assert_eq!(
        parse(&hex!("63e6b0b4")),
        Value::Text("\u{6c34}".to_string())
    );
    assert_eq!(
        parse(&hex!("64f0908591")),
        Value::Text("\u{10151}".to_string())
    );
    assert_eq!(parse(&hex!("80")), Value::Array(Vec::new()));
    assert_eq!(
        parse(&hex!("83010203")),
        Value::Array(vec![1u8.into(), 2u8.into(), 3u8.into()])
    );
    assert_eq!(
        parse(&hex!("8301820203820405")),
        Value::Array(vec![
            1u8.into(),
            Value::Array(vec![2u8.into(), 3u8.into()]),
            Value::Array(vec![4u8.into(), 5u8.into()]),
        ])
    );
    assert_eq!(
        parse(&hex!(
            "98190102030405060708090a0b0c0d0e0f101112131415161718181819"
        )),
        Value::Array((1u8..=25).map(Value::from).collect())
    );
    assert_eq!(parse(&hex!("a0")), Value::Map(BTreeMap::new()));
    assert_eq!(
        parse(&hex!("a26161016162820203")),
        Value::Map(BTreeMap::from([
            ("a".to_string(), 1u8.into()),
            ("b".to_string(), Value::Array(vec![2u8.into(), 3u8.into()])),
        ]))
    );
    assert_eq!(
        parse(&hex!("826161a161626163")),
        Value::Array(vec![
            "a".into(),
            Value::Map(BTreeMap::from([("b".to_string(), "c".into())])),
        ])
    );
    assert_eq!(
        parse(&hex!("a56161614161626142616361436164614461656145")),
        Value::Map(BTreeMap::from([
            ("a".to_string(), "A".into()),
            ("b".to_string(), "B".into()),
            ("c".to_string(), "C".into()),
            ("d".to_string(), "D".into()),
            ("e".to_string(), "E".into()),
        ]))
    );
    assert_eq!(
        parse(&hex!("5f42010243030405ff")),
        Value::Bytes(hex!("0102030405").to_vec())
    );
    assert_eq!(
        parse(&hex!("7f657374726561646d696e67ff")),
        Value::Text("streaming".to_string())
    );
    assert_eq!(parse(&hex!("9fff")), Value::Array(Vec::new()));
    assert_eq!(
        parse(&hex!("9f018202039f0405ffff")),
        Value::Array(vec![
            1u8.into(),
            Value::Array(vec![2u8.into(), 3u8.into()]),
            Value::Array(vec![4u8.into(), 5u8.into()]),
        ])
    );
    assert_eq!(
        parse(&hex!("83019f0203ff820405")),
        Value::Array(vec![
            1u8.into(),
            Value::Array(vec![2u8.into(), 3u8.into()]),
            Value::Array(vec![4u8.into(), 5u8.into()]),
        ])
    );
    assert_eq!(
        parse(&hex!("bf61610161629f0203ffff")),
        Value::Map(BTreeMap::from([
            ("a".to_string(), 1u8.into()),
            ("b".to_string(), Value::Array(vec![2u8.into(), 3u8.into()])),
        ]))
    );
    assert_eq!(
        parse(&hex!("bf6346756ef563416d7421ff")),
        Value::Map(BTreeMap::from([
            ("Fun".to_string(), true.into()),
            ("Amt".to_string(), (-2i8).into()),
        ]))
    );
}

#[test]
fn hello_world() {
    assert_eq!(
        parse(&hex!("6d68656c6c6f2c20776f726c642e")),
        Value::Text("hello, world.".to_string())
    );
}

#[test]
fn source_and_target_map() {
    assert_eq!(
        parse(&hex!(
            "a2 66736f75726365 6d68656c6c6f2c20776f726c642e
                66746172676574 4d68656c6c6f2c20776f726c642e"
        )),
        Value::Map(BTreeMap::from([
            ("source".to_string(), "hello, world.".into()),
            (
                "target".to_string(),
                Value::Bytes(hex!("68656c6c6f2c20776f726c642e").to_vec())
            ),
        ]))
    );
}

#[test]
fn non_text_keys_take_their_display_form() {
    assert_eq!(
        parse(&hex!("a201020304")),
        Value::Map(BTreeMap::from([
            ("1".to_string(), 2u8.into()),
            ("3".to_string(), 4u8.into()),
        ]))
    );
}

#[test]
fn negative_values_below_i64_fall_back_to_big() {
    assert_eq!(
        parse(&hex!("3b8000000000000000")),
        Value::Big(BigInt::from(-9223372036854775809i128))
    );
}

#[test]
fn simple_value_with_following_octet() {
    // the raw octet comes back even from the reserved range
    assert_eq!(parse(&hex!("f810")), Value::Simple(16));
}

#[test]
fn unsupported_semantic_tags() {
    let decode = |data: &[u8]| Object::from(data).decode();
    assert!(matches!(
        decode(&hex!("c074323031332d30332d32315432303a30343a30305a")),
        Err(Error::UnsupportedTag(0))
    ));
    assert!(matches!(
        decode(&hex!("c11a514b67b0")),
        Err(Error::UnsupportedTag(1))
    ));
    assert!(matches!(decode(&hex!("c6")), Err(Error::UnsupportedTag(6))));
    assert!(matches!(
        decode(&hex!("d74401020304")),
        Err(Error::UnsupportedTag(23))
    ));
    assert!(matches!(
        decode(&hex!("d82076687474703a2f2f7777772e6578616d706c652e636f6d")),
        Err(Error::UnsupportedTag(32))
    ));
}

#[test]
fn bignum_requires_a_byte_string() {
    assert!(matches!(
        Object::from(hex!("c201").as_slice()).decode(),
        Err(Error::IncorrectType(_, _))
    ));
}

#[test]
fn malformed_inputs() {
    let decode = |data: &[u8]| Object::from(data).decode();
    assert!(matches!(decode(&[]), Err(Error::MissingTag)));
    assert!(matches!(decode(&hex!("ff")), Err(Error::Break)));
    assert!(matches!(decode(&hex!("1c")), Err(Error::UnrecognizedTag(0x1C))));
    assert!(matches!(decode(&hex!("1903")), Err(Error::MissingData)));
    assert!(matches!(decode(&hex!("44010203")), Err(Error::MissingData)));
    assert!(matches!(decode(&hex!("830102")), Err(Error::MissingData)));
    assert!(matches!(decode(&hex!("d8")), Err(Error::ShortHeader)));
    assert!(matches!(decode(&hex!("5f6161ff")), Err(Error::InvalidChunk)));
    assert!(matches!(decode(&hex!("bf6161ff")), Err(Error::PartialMap)));
    assert!(matches!(decode(&hex!("61ff")), Err(Error::InvalidUtf8(_))));
}

#[test]
fn decode_inverts_encode() {
    let values = [
        Value::Unsigned(0),
        Value::Unsigned(24),
        Value::Unsigned(1000),
        Value::Unsigned(u64::MAX),
        Value::Signed(-1),
        Value::Signed(-1000),
        Value::Signed(i64::MIN),
        Value::Big(BigInt::from(18446744073709551616u128)),
        Value::Big(BigInt::from(-18446744073709551617i128)),
        Value::Bytes(hex!("01020304").to_vec()),
        Value::Text("hello, world.".to_string()),
        Value::Array(vec![
            1u8.into(),
            Value::Array(vec![2u8.into(), 3u8.into()]),
            "IETF".into(),
        ]),
        Value::Map(BTreeMap::from([
            ("source".to_string(), "hello, world.".into()),
            ("count".to_string(), 13u8.into()),
        ])),
        Value::Bool(false),
        Value::Bool(true),
        Value::Null,
        Value::Undefined,
        Value::Simple(16),
        Value::Simple(255),
        Value::Half(half::f16::from_f32(1.5)),
        Value::Single(100000.0),
        Value::Double(1.1),
    ];
    for value in values {
        assert_eq!(encode(&value).decode().unwrap(), value, "{value:?}");
    }
}

#[test]
fn read_of_write_is_identity() {
    let values = [
        Value::Unsigned(1000000),
        Value::Text("streaming".to_string()),
        Value::Array(vec![1u8.into(), 2u8.into()]),
        Value::Big(BigInt::from(18446744073709551616u128)),
    ];
    for value in values {
        let object = encode(&value);
        let mut sink = Vec::new();
        object.write(&mut sink).unwrap();
        let mut source = sink.as_slice();
        assert_eq!(Object::read(&mut source).unwrap(), object);
    }
}

#[test]
fn describes_structure() {
    let describe = |data: &[u8]| Object::from(data).describe();
    assert_eq!(describe(&[]), "");
    assert_eq!(describe(&hex!("00")), "<tag:unsigned integer>");
    assert_eq!(
        describe(&hex!("1903e8")),
        "<tag:unsigned integer><uint16>"
    );
    assert_eq!(
        describe(&hex!("6d68656c6c6f2c20776f726c642e")),
        "<tag:text><byte[13]>"
    );
    assert_eq!(
        describe(&hex!("83010203")),
        "<tag:array><tag:unsigned integer><tag:unsigned integer><tag:unsigned integer>"
    );
    assert_eq!(
        describe(&hex!("5f42010243030405ff")),
        "<tag:blob><tag:blob><byte[2]><tag:blob><byte[3]><break>"
    );
    assert_eq!(
        describe(&hex!("d818456449455446")),
        "<tag:tagged data item><uint8><tag:blob><byte[5]>"
    );
    assert_eq!(
        describe(&hex!("a16161f93c00")),
        "<tag:map><tag:text><byte[1]><tag:float, simple, break><byte[2]>"
    );
    assert_eq!(
        describe(&hex!("1903")),
        "<tag:unsigned integer><error: not enough octets for the advertised length>"
    );
}
