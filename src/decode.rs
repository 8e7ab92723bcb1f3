//! The decoder: walks an object buffer and materializes a value tree
//! mirroring the framed structure.

use std::collections::BTreeMap;

use num_bigint::{BigInt, BigUint};
use tracing::trace;

use crate::error::Error;
use crate::object::{Major, Object};
use crate::octets;
use crate::value::Value;

impl Object {
    /// Materializes the value tree mirroring this object's framed
    /// structure. Equivalent to [`decode`].
    pub fn decode(&self) -> Result<Value, Error> {
        decode(self)
    }
}

/// Decodes one data item from `object`.
///
/// Semantic tags other than the bignums (2 and 3) are rejected with
/// [`Error::UnsupportedTag`]; applications decode their own tagged
/// types through the [`Coder`](crate::value::Coder) protocol. A break
/// sentinel outside a container surfaces as [`Error::Break`].
pub fn decode(object: &Object) -> Result<Value, Error> {
    if !object.has_tag() {
        return Err(Error::MissingTag);
    }
    let mut offset = 0;
    decode_item(object.as_slice(), &mut offset)
}

fn decode_item(data: &[u8], offset: &mut usize) -> Result<Value, Error> {
    let tag = *data.get(*offset).ok_or(Error::MissingData)?;
    *offset += 1;
    if tag == 0xFF {
        return Err(Error::Break);
    }

    let ai = tag & 0x1F;
    if (28..=30).contains(&ai) {
        return Err(Error::UnrecognizedTag(tag));
    }

    match Major::of(tag) {
        Major::Unsigned => {
            if ai == 31 {
                return Err(Error::UnrecognizedTag(tag));
            }
            Ok(Value::Unsigned(uint_field(data, offset, ai)?))
        }
        Major::Signed => {
            if ai == 31 {
                return Err(Error::UnrecognizedTag(tag));
            }
            Ok(negative(uint_field(data, offset, ai)?))
        }
        Major::Blob => {
            if ai == 31 {
                Ok(Value::Bytes(chunk_payloads(data, offset, Major::Blob)?))
            } else {
                let n = uint_field(data, offset, ai)?;
                Ok(Value::Bytes(payload(data, offset, n)?.to_vec()))
            }
        }
        Major::Text => {
            let octets = if ai == 31 {
                chunk_payloads(data, offset, Major::Text)?
            } else {
                let n = uint_field(data, offset, ai)?;
                payload(data, offset, n)?.to_vec()
            };
            Ok(Value::Text(std::str::from_utf8(&octets)?.to_string()))
        }
        Major::Array => {
            let mut children = Vec::new();
            if ai == 31 {
                loop {
                    match decode_item(data, offset) {
                        Ok(child) => children.push(child),
                        Err(Error::Break) => break,
                        Err(e) => return Err(e),
                    }
                }
            } else {
                let n = uint_field(data, offset, ai)?;
                for _ in 0..n {
                    children.push(decode_item(data, offset)?);
                }
            }
            Ok(Value::Array(children))
        }
        Major::Map => {
            let mut entries = BTreeMap::new();
            if ai == 31 {
                loop {
                    let key = match decode_item(data, offset) {
                        Ok(key) => key,
                        Err(Error::Break) => break,
                        Err(e) => return Err(e),
                    };
                    let value = match decode_item(data, offset) {
                        Ok(value) => value,
                        Err(Error::Break) => return Err(Error::PartialMap),
                        Err(e) => return Err(e),
                    };
                    entries.insert(key_text(&key), value);
                }
            } else {
                let n = uint_field(data, offset, ai)?;
                for _ in 0..n {
                    let key = decode_item(data, offset)?;
                    let value = decode_item(data, offset)?;
                    entries.insert(key_text(&key), value);
                }
            }
            Ok(Value::Map(entries))
        }
        Major::Tagged => {
            let number = match tag {
                0xC0..=0xD7 => ai as u64,
                0xD8..=0xDB => tag_number(data, offset, ai)?,
                _ => return Err(Error::UnrecognizedTag(tag)),
            };
            match number {
                2 => Ok(Value::Big(big_magnitude(data, offset)?.into())),
                3 => {
                    let n = BigInt::from(big_magnitude(data, offset)?);
                    Ok(Value::Big(-n - 1))
                }
                n => Err(Error::UnsupportedTag(n)),
            }
        }
        Major::Simple => match ai {
            0..=19 => Ok(Value::Simple(ai)),
            20 => Ok(Value::Bool(false)),
            21 => Ok(Value::Bool(true)),
            22 => Ok(Value::Null),
            23 => Ok(Value::Undefined),
            24 => {
                let v = *data.get(*offset).ok_or(Error::MissingData)?;
                *offset += 1;
                if v < 32 {
                    trace!("simple value with reserved octet {v}");
                }
                Ok(Value::Simple(v))
            }
            25 => Ok(Value::Half(half::f16::from_bits(octets::decode_u16(
                field(data, offset, 2)?,
            )))),
            26 => Ok(Value::Single(f32::from_bits(octets::decode_u32(field(
                data, offset, 4,
            )?)))),
            27 => Ok(Value::Double(f64::from_bits(octets::decode_u64(field(
                data, offset, 8,
            )?)))),
            _ => unreachable!("break and reserved values handled above"),
        },
    }
}

/// `-1 - n`, falling back to a big integer when it underflows i64.
fn negative(n: u64) -> Value {
    if n <= i64::MAX as u64 {
        Value::Signed(-1 - n as i64)
    } else {
        Value::Big(-BigInt::from(n) - 1)
    }
}

pub(crate) fn field<'a>(data: &'a [u8], offset: &mut usize, n: usize) -> Result<&'a [u8], Error> {
    let end = offset.checked_add(n).ok_or(Error::MissingData)?;
    let octets = data.get(*offset..end).ok_or(Error::MissingData)?;
    *offset = end;
    Ok(octets)
}

pub(crate) fn uint_field(data: &[u8], offset: &mut usize, ai: u8) -> Result<u64, Error> {
    match ai {
        0..=23 => Ok(ai as u64),
        24 => Ok(field(data, offset, 1)?[0] as u64),
        25 => Ok(octets::decode_u16(field(data, offset, 2)?) as u64),
        26 => Ok(octets::decode_u32(field(data, offset, 4)?) as u64),
        27 => Ok(octets::decode_u64(field(data, offset, 8)?)),
        _ => unreachable!("reserved and indefinite values handled by the caller"),
    }
}

fn tag_number(data: &[u8], offset: &mut usize, ai: u8) -> Result<u64, Error> {
    uint_field(data, offset, ai).map_err(|e| match e {
        Error::MissingData => Error::ShortHeader,
        e => e,
    })
}

pub(crate) fn payload<'a>(data: &'a [u8], offset: &mut usize, n: u64) -> Result<&'a [u8], Error> {
    let n = usize::try_from(n).map_err(|_| Error::MissingData)?;
    field(data, offset, n)
}

/// Concatenated payloads of an indefinite-length string: definite
/// chunks of the same major type until the break sentinel.
fn chunk_payloads(data: &[u8], offset: &mut usize, major: Major) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    loop {
        let tag = *data.get(*offset).ok_or(Error::MissingData)?;
        *offset += 1;
        if tag == 0xFF {
            return Ok(out);
        }
        let ai = tag & 0x1F;
        if (28..=30).contains(&ai) {
            return Err(Error::UnrecognizedTag(tag));
        }
        if Major::of(tag) != major || ai == 31 {
            return Err(Error::InvalidChunk);
        }
        let n = uint_field(data, offset, ai)?;
        out.extend_from_slice(payload(data, offset, n)?);
    }
}

/// The map key as text. Non-text keys are keyed by their display
/// form, an implementation-defined extension of the text-keyed view.
fn key_text(key: &Value) -> String {
    match key {
        Value::Text(s) => s.clone(),
        Value::Unsigned(n) => n.to_string(),
        Value::Signed(v) => v.to_string(),
        Value::Big(b) => b.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Half(f) => f.to_string(),
        Value::Single(f) => f.to_string(),
        Value::Double(f) => f.to_string(),
        other => format!("{other:?}"),
    }
}

/// The content of a bignum tag: one byte-string child, interpreted as
/// a big-endian unsigned magnitude.
fn big_magnitude(data: &[u8], offset: &mut usize) -> Result<BigUint, Error> {
    match decode_item(data, offset)? {
        Value::Bytes(magnitude) => Ok(BigUint::from_bytes_be(&magnitude)),
        other => Err(Error::IncorrectType(
            "byte string".to_string(),
            other.kind().to_string(),
        )),
    }
}
