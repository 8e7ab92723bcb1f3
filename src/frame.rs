//! The framing engine: pulls one complete data item from a byte
//! source, recursing into children, honoring length prefixes and
//! break sentinels; flushes an object's octets back to a sink.

use std::io::{ErrorKind, Read, Write};

use tracing::trace;

use crate::error::Error;
use crate::object::{Major, Object};
use crate::octets;

impl Object {
    /// Reads exactly one data item from `source`.
    ///
    /// The returned object holds the tag octet followed by every
    /// subsequent octet consumed: length prefix, payload, and children
    /// concatenated in order. Payload semantics are never inspected
    /// beyond byte counts.
    ///
    /// The break sentinel (0xFF) is returned as [`Error::Break`]; only
    /// the indefinite-length container loops convert it into clean
    /// termination, so a top-level break surfaces to the caller.
    pub fn read<R: Read>(source: &mut R) -> Result<Object, Error> {
        read_item(source, true)
    }

    /// Emits the object's octets to `sink`, returning the count.
    pub fn write<W: Write>(&self, sink: &mut W) -> Result<usize, Error> {
        sink.write_all(self.as_slice())?;
        Ok(self.len())
    }
}

/// `read_exact` with end-of-source mapped to the caller's error so
/// short reads stay distinct from genuine source failures.
fn fill<R: Read>(source: &mut R, buf: &mut [u8], short: Error) -> Result<(), Error> {
    source.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            short
        } else {
            e.into()
        }
    })
}

fn read_item<R: Read>(source: &mut R, top: bool) -> Result<Object, Error> {
    let mut octet = [0u8];
    fill(
        source,
        &mut octet,
        if top {
            Error::MissingTag
        } else {
            Error::MissingData
        },
    )?;
    let tag = octet[0];
    if tag == 0xFF {
        return Err(Error::Break);
    }

    let ai = tag & 0x1F;
    if (28..=30).contains(&ai) {
        return Err(Error::UnrecognizedTag(tag));
    }

    let mut item = vec![tag];
    match Major::of(tag) {
        Major::Unsigned | Major::Signed => {
            if ai == 31 {
                return Err(Error::UnrecognizedTag(tag));
            }
            read_uint(source, &mut item, ai, false)?;
        }
        major @ (Major::Blob | Major::Text) => {
            if ai == 31 {
                read_chunks(source, &mut item, major)?;
            } else {
                let n = read_uint(source, &mut item, ai, false)?;
                read_payload(source, &mut item, n)?;
            }
        }
        Major::Array => {
            if ai == 31 {
                loop {
                    match read_item(source, false) {
                        Ok(child) => item.extend_from_slice(child.as_slice()),
                        Err(Error::Break) => {
                            item.push(0xFF);
                            break;
                        }
                        Err(e) => return Err(e),
                    }
                }
            } else {
                let n = read_uint(source, &mut item, ai, false)?;
                for _ in 0..n {
                    let child = read_item(source, false)?;
                    item.extend_from_slice(child.as_slice());
                }
            }
        }
        Major::Map => {
            if ai == 31 {
                loop {
                    match read_item(source, false) {
                        Ok(key) => item.extend_from_slice(key.as_slice()),
                        Err(Error::Break) => {
                            item.push(0xFF);
                            break;
                        }
                        Err(e) => return Err(e),
                    }
                    match read_item(source, false) {
                        Ok(value) => item.extend_from_slice(value.as_slice()),
                        Err(Error::Break) => return Err(Error::PartialMap),
                        Err(e) => return Err(e),
                    }
                }
            } else {
                let n = read_uint(source, &mut item, ai, false)?;
                for _ in 0..n {
                    let key = read_item(source, false)?;
                    item.extend_from_slice(key.as_slice());
                    let value = read_item(source, false)?;
                    item.extend_from_slice(value.as_slice());
                }
            }
        }
        Major::Tagged => match tag {
            // date/time, bignum, fraction/bigfloat, and the
            // expected-conversion tags carry one content item
            0xC0..=0xC5 | 0xD5..=0xD7 => {
                let child = read_item(source, false)?;
                item.extend_from_slice(child.as_slice());
            }
            // tag numbers 6..=20: nothing beyond the tag octet
            0xC6..=0xD4 => {
                trace!("bare tag {tag:#04x} with no content item");
            }
            0xD8..=0xDB => {
                read_uint(source, &mut item, ai, true)?;
                let child = read_item(source, false)?;
                item.extend_from_slice(child.as_slice());
            }
            _ => return Err(Error::UnrecognizedTag(tag)),
        },
        Major::Simple => match ai {
            0..=23 => {}
            24 => {
                let mut value = [0u8];
                fill(source, &mut value, Error::MissingData)?;
                if value[0] < 32 {
                    trace!("simple value with reserved octet {}", value[0]);
                }
                item.push(value[0]);
            }
            25 | 26 | 27 => {
                let width = 1usize << (ai - 24);
                let mut buf = [0u8; 8];
                fill(source, &mut buf[..width], Error::MissingData)?;
                item.extend_from_slice(&buf[..width]);
            }
            _ => unreachable!("break and reserved values handled above"),
        },
    }
    Ok(Object::from(item))
}

/// Reads the value named by `ai`: the immediate value for 0..=23,
/// otherwise 1/2/4/8 following octets, appended to `item`. A short
/// read of a 0xD8..=0xDB tag number reports `ShortHeader`; every
/// other shortfall is `MissingData`.
fn read_uint<R: Read>(
    source: &mut R,
    item: &mut Vec<u8>,
    ai: u8,
    tag_number: bool,
) -> Result<u64, Error> {
    let width = match ai {
        0..=23 => return Ok(ai as u64),
        24 => 1,
        25 => 2,
        26 => 4,
        27 => 8,
        _ => unreachable!("reserved and indefinite values handled by the caller"),
    };
    let mut buf = [0u8; 8];
    fill(
        source,
        &mut buf[..width],
        if tag_number {
            Error::ShortHeader
        } else {
            Error::MissingData
        },
    )?;
    item.extend_from_slice(&buf[..width]);
    Ok(match width {
        1 => buf[0] as u64,
        2 => octets::decode_u16(&buf) as u64,
        4 => octets::decode_u32(&buf) as u64,
        _ => octets::decode_u64(&buf),
    })
}

fn read_payload<R: Read>(source: &mut R, item: &mut Vec<u8>, n: u64) -> Result<(), Error> {
    let copied = std::io::copy(&mut source.take(n), item)?;
    if copied < n {
        return Err(Error::MissingData);
    }
    Ok(())
}

/// Indefinite-length string body: definite-length chunks of the same
/// major type until the break sentinel (RFC 8949 Appendix C).
fn read_chunks<R: Read>(source: &mut R, item: &mut Vec<u8>, major: Major) -> Result<(), Error> {
    loop {
        match read_item(source, false) {
            Ok(chunk) => {
                if chunk.major() != major || chunk.tag() & 0x1F == 31 {
                    return Err(Error::InvalidChunk);
                }
                item.extend_from_slice(chunk.as_slice());
            }
            Err(Error::Break) => {
                item.push(0xFF);
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}
