//! Structural shape strings for diagnostics. Shares the decoder's
//! cursor helpers; interprets no payload semantics.

use std::fmt::Write;

use crate::decode::{field, payload, uint_field};
use crate::error::Error;
use crate::object::{Major, Object};

impl Object {
    /// Renders a compact structural description: `<tag:MAJOR>` for
    /// each header, `<uintN>` for length fields, `<byte[N]>` for
    /// payloads, `<break>` for indefinite terminators, children in
    /// order. Diagnostic only; the exact format is not a contract.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        if self.has_tag() {
            let mut offset = 0;
            if let Err(e) = describe_item(self.as_slice(), &mut offset, &mut out) {
                let _ = write!(out, "<error: {e}>");
            }
        }
        out
    }
}

fn describe_item(data: &[u8], offset: &mut usize, out: &mut String) -> Result<(), Error> {
    let tag = *data.get(*offset).ok_or(Error::MissingData)?;
    *offset += 1;
    if tag == 0xFF {
        return Err(Error::Break);
    }

    let ai = tag & 0x1F;
    if (28..=30).contains(&ai) {
        return Err(Error::UnrecognizedTag(tag));
    }

    let major = Major::of(tag);
    let _ = write!(out, "<tag:{}>", major.as_str());
    match major {
        Major::Unsigned | Major::Signed => {
            if ai == 31 {
                return Err(Error::UnrecognizedTag(tag));
            }
            noted_uint(data, offset, ai, out)?;
        }
        Major::Blob | Major::Text => {
            if ai == 31 {
                children_until_break(data, offset, out)?;
            } else {
                let n = noted_uint(data, offset, ai, out)?;
                let n = payload(data, offset, n)?.len();
                let _ = write!(out, "<byte[{n}]>");
            }
        }
        Major::Array => {
            if ai == 31 {
                children_until_break(data, offset, out)?;
            } else {
                let n = noted_uint(data, offset, ai, out)?;
                for _ in 0..n {
                    describe_item(data, offset, out)?;
                }
            }
        }
        Major::Map => {
            if ai == 31 {
                children_until_break(data, offset, out)?;
            } else {
                let n = noted_uint(data, offset, ai, out)?;
                for _ in 0..n {
                    describe_item(data, offset, out)?;
                    describe_item(data, offset, out)?;
                }
            }
        }
        Major::Tagged => match tag {
            0xC0..=0xC5 | 0xD5..=0xD7 => describe_item(data, offset, out)?,
            0xC6..=0xD4 => {}
            0xD8..=0xDB => {
                noted_uint(data, offset, ai, out)?;
                describe_item(data, offset, out)?;
            }
            _ => return Err(Error::UnrecognizedTag(tag)),
        },
        Major::Simple => match ai {
            0..=23 => {}
            24 => {
                field(data, offset, 1)?;
                out.push_str("<byte[1]>");
            }
            25 | 26 | 27 => {
                let width = 1usize << (ai - 24);
                field(data, offset, width)?;
                let _ = write!(out, "<byte[{width}]>");
            }
            _ => unreachable!("break and reserved values handled above"),
        },
    }
    Ok(())
}

/// Reads the AI-named value, annotating widened forms as `<uintN>`.
fn noted_uint(data: &[u8], offset: &mut usize, ai: u8, out: &mut String) -> Result<u64, Error> {
    let n = uint_field(data, offset, ai)?;
    match ai {
        24 => out.push_str("<uint8>"),
        25 => out.push_str("<uint16>"),
        26 => out.push_str("<uint32>"),
        27 => out.push_str("<uint64>"),
        _ => {}
    }
    Ok(n)
}

fn children_until_break(data: &[u8], offset: &mut usize, out: &mut String) -> Result<(), Error> {
    loop {
        match describe_item(data, offset, out) {
            Ok(()) => {}
            Err(Error::Break) => {
                out.push_str("<break>");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}
