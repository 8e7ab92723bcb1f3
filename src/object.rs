//! The `Object` buffer: an immutable octet sequence owning the
//! encoding of exactly one CBOR data item, plus the `Major` tag
//! classifier derived from its leading octet.

/// The eight RFC 8949 major types, the high 3 bits of a tag octet.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Major {
    Unsigned = 0,
    Signed = 1,
    Blob = 2,
    Text = 3,
    Array = 4,
    Map = 5,
    Tagged = 6,
    Simple = 7,
}

impl Major {
    /// Classifies a tag octet. Total: every octet has a major type.
    pub fn of(tag: u8) -> Major {
        match tag >> 5 {
            0 => Major::Unsigned,
            1 => Major::Signed,
            2 => Major::Blob,
            3 => Major::Text,
            4 => Major::Array,
            5 => Major::Map,
            6 => Major::Tagged,
            _ => Major::Simple,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Major::Unsigned => "unsigned integer",
            Major::Signed => "signed integer",
            Major::Blob => "blob",
            Major::Text => "text",
            Major::Array => "array",
            Major::Map => "map",
            Major::Tagged => "tagged data item",
            Major::Simple => "float, simple, break",
        }
    }
}

/// An octet buffer holding one well-framed data item.
///
/// An `Object` is either empty (uninitialized) or begins with a valid
/// tag whose advertised structure exactly matches the remaining
/// octets. There is no mutation after construction; `concatenate`
/// returns a fresh buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Object {
    data: Vec<u8>,
}

impl Object {
    /// True iff the buffer holds a leading tag octet.
    pub fn has_tag(&self) -> bool {
        !self.data.is_empty()
    }

    /// The leading tag octet, or 0 when empty.
    pub fn tag(&self) -> u8 {
        self.data.first().copied().unwrap_or(0)
    }

    /// The major type named by the leading octet. Derived purely from
    /// the tag; the payload is never scanned.
    pub fn major(&self) -> Major {
        Major::of(self.tag())
    }

    pub fn major_string(&self) -> &'static str {
        self.major().as_str()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns a fresh buffer equal to the octet concatenation. When
    /// either side is empty the result equals the other side.
    pub fn concatenate(&self, other: &Object) -> Object {
        if self.data.is_empty() {
            other.clone()
        } else if other.data.is_empty() {
            self.clone()
        } else {
            let mut data = Vec::with_capacity(self.data.len() + other.data.len());
            data.extend_from_slice(&self.data);
            data.extend_from_slice(&other.data);
            Object { data }
        }
    }

    /// A one-octet object whose tag names `major` with AI 0.
    pub fn define(major: Major) -> Object {
        Object {
            data: vec![(major as u8) << 5],
        }
    }

    /// Rewrites the leading octet so its additional-information field
    /// is the narrowest fit for `size`: the immediate value for sizes
    /// up to 23, otherwise the 1/2/4/8-octet width selector. The
    /// length octets themselves are appended by the encoder.
    pub fn refine(mut self, size: u64) -> Object {
        if let Some(tag) = self.data.first_mut() {
            let ai = match size {
                0..=23 => size as u8,
                24..=0xFF => 24,
                0x100..=0xFFFF => 25,
                0x1_0000..=0xFFFF_FFFF => 26,
                _ => 27,
            };
            *tag = (*tag & 0xE0) | ai;
        }
        self
    }

    pub(crate) fn push(&mut self, octet: u8) {
        self.data.push(octet);
    }

    pub(crate) fn extend(&mut self, octets: &[u8]) {
        self.data.extend_from_slice(octets);
    }
}

impl From<Vec<u8>> for Object {
    fn from(data: Vec<u8>) -> Object {
        Object { data }
    }
}

impl From<&[u8]> for Object {
    fn from(data: &[u8]) -> Object {
        Object {
            data: data.to_vec(),
        }
    }
}

impl<const N: usize> From<[u8; N]> for Object {
    fn from(data: [u8; N]) -> Object {
        Object {
            data: data.to_vec(),
        }
    }
}

impl AsRef<[u8]> for Object {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
