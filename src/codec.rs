use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// Errors produced while serializing or deserializing a container.
///
/// Every deserialization failure leaves the target container cleared,
/// never partially populated.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("stream ended before the encoded structure was complete")]
    UnexpectedEnd,
    #[error("invalid marker byte {0:#04x}")]
    InvalidMarker(u8),
    #[error("unparseable token `{0}`")]
    InvalidToken(String),
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    #[error("stream holds {found} elements but its header claims {expected}")]
    CountMismatch { expected: u64, found: u64 },
}

/// Binary encoding of a single value into a byte sink.
///
/// Integer and float impls are fixed-width little-endian; `String` is
/// length-prefixed.
pub trait Encode {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError>;
}

/// Binary decoding of a single value out of a byte source.
pub trait Decode: Sized {
    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self, CodecError>;
}

/// The serialization contract shared by every container in this crate:
/// a binary and a text encoding, both writing a size header followed by
/// the container's elements, both round-tripping exact content.
///
/// The unsuffixed pair delegates to the binary encoding.
pub trait Serial {
    fn serialize_binary<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError>;
    fn deserialize_binary<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError>;
    fn serialize_text<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError>;
    fn deserialize_text<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError>;

    fn serialize<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        self.serialize_binary(out)
    }

    fn deserialize<R: Read + ?Sized>(&mut self, input: &mut R) -> Result<(), CodecError> {
        self.deserialize_binary(input)
    }
}

impl Encode for u8 {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        Ok(out.write_u8(*self)?)
    }
}

impl Decode for u8 {
    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self, CodecError> {
        Ok(input.read_u8()?)
    }
}

impl Encode for i8 {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        Ok(out.write_i8(*self)?)
    }
}

impl Decode for i8 {
    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self, CodecError> {
        Ok(input.read_i8()?)
    }
}

macro_rules! impl_fixed_width {
    ($($ty:ty => $write:ident / $read:ident,)*) => {$(
        impl Encode for $ty {
            fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
                Ok(out.$write::<LittleEndian>(*self)?)
            }
        }

        impl Decode for $ty {
            fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self, CodecError> {
                Ok(input.$read::<LittleEndian>()?)
            }
        }
    )*};
}

impl_fixed_width! {
    u16 => write_u16 / read_u16,
    u32 => write_u32 / read_u32,
    u64 => write_u64 / read_u64,
    i16 => write_i16 / read_i16,
    i32 => write_i32 / read_i32,
    i64 => write_i64 / read_i64,
    f32 => write_f32 / read_f32,
    f64 => write_f64 / read_f64,
}

impl Encode for bool {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        Ok(out.write_u8(*self as u8)?)
    }
}

impl Decode for bool {
    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self, CodecError> {
        match input.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(CodecError::InvalidMarker(byte)),
        }
    }
}

impl Encode for String {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), CodecError> {
        out.write_u64::<LittleEndian>(self.len() as u64)?;
        Ok(out.write_all(self.as_bytes())?)
    }
}

impl Decode for String {
    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self, CodecError> {
        let len = input.read_u64::<LittleEndian>()?;
        let mut bytes = vec![0u8; len as usize];
        input.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
    }
}

pub(crate) fn read_all<R: Read + ?Sized>(input: &mut R) -> Result<String, CodecError> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    Ok(text)
}

pub(crate) fn next_token<'a, I>(tokens: &mut I) -> Result<&'a str, CodecError>
where
    I: Iterator<Item = &'a str>,
{
    tokens.next().ok_or(CodecError::UnexpectedEnd)
}

pub(crate) fn parse_token<T: std::str::FromStr>(token: &str) -> Result<T, CodecError> {
    token
        .parse()
        .map_err(|_| CodecError::InvalidToken(token.to_string()))
}
