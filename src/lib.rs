//! CBOR (RFC 8949) item framing and value codec.
//!
//! The crate is built around [`Object`]: an owned octet buffer holding
//! exactly one self-delimited CBOR data item. Objects are produced by
//! [`Object::read`] (framing octets pulled from any [`std::io::Read`]
//! source), by [`encode`](crate::encode::encode) (from a [`Value`]
//! tree), or literally from a
//! caller-supplied octet sequence. They are consumed by
//! [`Object::write`], by [`decode`](crate::decode::decode), or shared
//! freely; an `Object` is immutable once constructed.
//!
//! - **`octets`**: fixed-width big-endian integer codec
//! - **`object`**: the `Object` buffer and `Major` tag classifier
//! - **`value`**: the language-neutral value tree and `Coder` protocol
//! - **`encode`** / **`decode`**: conversion between `Value` and `Object`
//! - **`error`**: the unified error surface
//!
//! Framing is exact: `Object::read` consumes precisely one item from
//! the source, and `Object::write` reproduces the consumed octets
//! bit-for-bit. Reserved additional-information values (28–30) are
//! rejected, and the break sentinel (0xFF) is only accepted where an
//! indefinite-length container expects it.

pub mod decode;
pub mod encode;
pub mod error;
pub mod object;
pub mod octets;
pub mod value;

mod describe;
mod frame;

pub use error::Error;
pub use object::{Major, Object};
pub use value::{Coder, Value};

pub use decode::decode;
pub use encode::encode;




#[cfg(test)]
mod decode_tests;
