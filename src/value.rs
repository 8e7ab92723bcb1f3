//! The language-neutral value tree produced by the decoder and
//! consumed by the encoder, and the `Coder` extension protocol for
//! user-defined types.

use std::collections::BTreeMap;

use num_bigint::BigInt;

use crate::error::Error;
use crate::object::Object;

/// A decoded CBOR data item.
///
/// Integer widths funnel through the `From` impls below: every
/// unsigned width (and `usize`) becomes `Unsigned`, every signed
/// width (and `isize`) becomes `Signed`. Integers outside the 64-bit
/// lanes live in `Big`, which also carries tag 2/3 bignums.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Unsigned(u64),
    Signed(i64),
    Big(BigInt),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Bool(bool),
    Null,
    Undefined,
    /// A one-octet simple value (major 7, AI 0–19 or the 0xF8 form).
    Simple(u8),
    Half(half::f16),
    Single(f32),
    Double(f64),
    /// A pre-framed item embedded verbatim by the encoder, typically
    /// the output of a [`Coder`]. Never produced by the decoder.
    Encoded(Object),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unsigned(_) => "unsigned integer",
            Value::Signed(_) => "signed integer",
            Value::Big(_) => "big integer",
            Value::Bytes(_) => "byte string",
            Value::Text(_) => "text string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Simple(_) => "simple value",
            Value::Half(_) | Value::Single(_) | Value::Double(_) => "float",
            Value::Encoded(_) => "encoded item",
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Value {
        Value::Unsigned(v as u64)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Value {
        Value::Unsigned(v as u64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Value {
        Value::Unsigned(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Value {
        Value::Unsigned(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Value {
        Value::Unsigned(v as u64)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Value {
        Value::Signed(v as i64)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Value {
        Value::Signed(v as i64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Signed(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Signed(v)
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Value {
        Value::Signed(v as i64)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Value {
        Value::Big(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Value {
        Value::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Value {
        Value::Bytes(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Text(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Value {
        Value::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Value {
        Value::Map(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<half::f16> for Value {
    fn from(v: half::f16) -> Value {
        Value::Half(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Value {
        Value::Single(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Double(v)
    }
}

/// The extension protocol for user-defined types.
///
/// `encode` produces a complete framed item; the codec embeds it
/// verbatim and never re-validates it. The decoder does not route
/// tagged items to a `Coder` automatically; applications inspect the
/// major or tag number themselves and invoke `decode` on the items
/// they recognize.
pub trait Coder: Sized {
    fn encode(&self) -> Object;

    fn decode(object: &Object) -> Result<Self, Error>;
}
