use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A reserved additional-information value (28, 29, 30), or an
    /// indefinite-length marker where a definite encoding is required.
    #[error("unrecognized tag {0:#04x}")]
    UnrecognizedTag(u8),

    /// A read or decode of an empty source or object.
    #[error("missing tag")]
    MissingTag,

    /// The source held fewer octets than a length field demanded.
    #[error("not enough octets for the advertised length")]
    MissingData,

    /// A tag-number read (AI 24..=27) came up short.
    #[error("short read inside an item header")]
    ShortHeader,

    /// The break sentinel (0xFF). Caught by the indefinite-length
    /// container loops that expect it; an error everywhere else.
    #[error("break sentinel")]
    Break,

    /// Well-framed tagged item with no semantic decoder.
    #[error("no decoder for tag number {0}")]
    UnsupportedTag(u64),

    /// An indefinite-length string chunk that is not a definite-length
    /// string of the same major type.
    #[error("indefinite-length string contains an invalid chunk")]
    InvalidChunk,

    /// A break between a map key and its value.
    #[error("map has key but no value")]
    PartialMap,

    #[error("incorrect type, expecting {0}, found {1}")]
    IncorrectType(String, String),

    #[error(transparent)]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
