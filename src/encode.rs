//! The encoder: constructs an object buffer from a runtime value,
//! choosing the narrowest length encoding and recursing for
//! containers.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::object::{Major, Object};
use crate::octets;
use crate::value::Value;

/// Encodes `value` as a single framed item.
///
/// Infallible by construction: every value maps to some object.
/// Integers take the shortest form whose value slot can hold them,
/// lengths always take the shortest length-width, and map entries are
/// emitted in the deterministic RFC 8949 §4.2.1 order (key length
/// first, then bytewise).
pub fn encode(value: &Value) -> Object {
    match value {
        Value::Unsigned(n) => header(Major::Unsigned, *n),
        Value::Signed(v) => {
            if *v >= 0 {
                header(Major::Unsigned, *v as u64)
            } else {
                header(Major::Signed, (-(*v + 1)) as u64)
            }
        }
        Value::Big(b) => big(b),
        Value::Bytes(payload) => {
            let mut item = header(Major::Blob, payload.len() as u64);
            item.extend(payload);
            item
        }
        Value::Text(s) => text(s),
        Value::Array(children) => {
            let mut item = header(Major::Array, children.len() as u64);
            for child in children {
                item.extend(encode(child).as_slice());
            }
            item
        }
        Value::Map(entries) => {
            let mut item = header(Major::Map, entries.len() as u64);
            let mut order: Vec<_> = entries.iter().collect();
            order.sort_by(|a, b| (a.0.len(), a.0.as_bytes()).cmp(&(b.0.len(), b.0.as_bytes())));
            for (key, child) in order {
                item.extend(text(key).as_slice());
                item.extend(encode(child).as_slice());
            }
            item
        }
        Value::Bool(false) => Object::from([0xF4]),
        Value::Bool(true) => Object::from([0xF5]),
        Value::Null => Object::from([0xF6]),
        Value::Undefined => Object::from([0xF7]),
        Value::Simple(v) => {
            if *v < 24 {
                Object::from([0xE0 | *v])
            } else {
                Object::from([0xF8, *v])
            }
        }
        Value::Half(f) => {
            let mut item = Object::from([0xF9]);
            item.extend(&octets::encode_u16(f.to_bits()));
            item
        }
        Value::Single(f) => {
            let mut item = Object::from([0xFA]);
            item.extend(&octets::encode_u32(f.to_bits()));
            item
        }
        Value::Double(f) => {
            let mut item = Object::from([0xFB]);
            item.extend(&octets::encode_u64(f.to_bits()));
            item
        }
        Value::Encoded(object) => object.clone(),
    }
}

/// The item header for `major` carrying `n`: the refined tag octet
/// followed by the length octets its AI advertises.
fn header(major: Major, n: u64) -> Object {
    let mut item = Object::define(major).refine(n);
    match n {
        0..=23 => {}
        24..=0xFF => item.push(n as u8),
        0x100..=0xFFFF => item.extend(&octets::encode_u16(n as u16)),
        0x1_0000..=0xFFFF_FFFF => item.extend(&octets::encode_u32(n as u32)),
        _ => item.extend(&octets::encode_u64(n)),
    }
    item
}

fn text(s: &str) -> Object {
    let mut item = header(Major::Text, s.len() as u64);
    item.extend(s.as_bytes());
    item
}

/// Big integers ride the bignum tags: tag 2 over the big-endian
/// magnitude for v ≥ 0, tag 3 over the magnitude of −1−v otherwise.
fn big(b: &BigInt) -> Object {
    let (number, magnitude) = if b.is_negative() {
        let n: BigInt = -b - 1;
        (3, n.to_bytes_be().1)
    } else {
        (2, b.to_bytes_be().1)
    };
    let mut item = header(Major::Tagged, number);
    item.extend(encode(&Value::Bytes(magnitude)).as_slice());
    item
}
