//! Creating and consuming data in wire format.
//!
//! All parsing goes through [`Parser`], octseq’s bounds-checked cursor
//! over an octets slice. It can never advance past the end of the slice
//! it was created for; any attempt to do so results in a
//! [`ParseError::Truncated`].
//!
//! Composing always happens into a `Vec<u8>`. Integers are written in
//! network byte order.

use core::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::vec::Vec;

use bytes::Bytes;
pub use octseq::parse::{Parser, ShortInput};

//------------ compose functions ---------------------------------------------

/// Composes some data prefixed by its length as a 16 bit integer.
///
/// If the composed data turns out to be longer than 0xFFFF octets, the
/// target is truncated back to where it was before and an error is
/// returned.
pub fn compose_len_prefixed<F>(
    target: &mut Vec<u8>,
    op: F,
) -> Result<(), ComposeError>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), ComposeError>,
{
    let start = target.len();
    target.extend_from_slice(&[0; 2]);
    let pos = target.len();
    let res = op(target).and_then(|()| {
        u16::try_from(target.len() - pos).map_err(|_| ComposeError::LongData)
    });
    match res {
        Ok(len) => {
            target[start..pos].copy_from_slice(&len.to_be_bytes());
            Ok(())
        }
        Err(err) => {
            target.truncate(start);
            Err(err)
        }
    }
}

//------------ Compose -------------------------------------------------------

/// A type that knows how to append itself in wire format.
pub trait Compose {
    /// The length in octets of a value of this type, if it is fixed.
    ///
    /// Types with a variable length use 0.
    const COMPOSE_LEN: u16 = 0;

    /// Appends the wire format of the value to `target`.
    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError>;
}

impl<T: Compose + ?Sized> Compose for &T {
    const COMPOSE_LEN: u16 = T::COMPOSE_LEN;

    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        (*self).compose(target)
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            const COMPOSE_LEN: u16 = ($type::BITS >> 3) as u16;

            fn compose(
                &self,
                target: &mut Vec<u8>,
            ) -> Result<(), ComposeError> {
                target.extend_from_slice(&self.to_be_bytes());
                Ok(())
            }
        }
    };
}

compose_to_be_bytes!(u8);
compose_to_be_bytes!(u16);
compose_to_be_bytes!(u32);

impl Compose for Ipv4Addr {
    const COMPOSE_LEN: u16 = 4;

    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        target.extend_from_slice(&self.octets());
        Ok(())
    }
}

impl Compose for Ipv6Addr {
    const COMPOSE_LEN: u16 = 16;

    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        target.extend_from_slice(&self.octets());
        Ok(())
    }
}

//------------ Parse ---------------------------------------------------------

/// A type that can extract a value from a parser.
///
/// If parsing fails and an error is returned, the parser’s position should
/// be considered to be undefined.
pub trait Parse: Sized {
    /// Extracts a value from the beginning of `parser`.
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError>;
}

impl Parse for u8 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u8().map_err(Into::into)
    }
}

impl Parse for u16 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u16_be().map_err(Into::into)
    }
}

impl Parse for u32 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        parser.parse_u32_be().map_err(Into::into)
    }
}

impl Parse for Ipv4Addr {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 4];
        parser.parse_buf(&mut buf)?;
        Ok(buf.into())
    }
}

impl Parse for Ipv6Addr {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 16];
        parser.parse_buf(&mut buf)?;
        Ok(buf.into())
    }
}

/// Takes `len` octets from the parser and copies them into a `Bytes`.
pub fn parse_bytes(
    parser: &mut Parser<'_, [u8]>,
    len: usize,
) -> Result<Bytes, ParseError> {
    let res = Bytes::copy_from_slice(parser.peek(len)?);
    parser.advance(len)?;
    Ok(res)
}

/// Takes all remaining octets from the parser.
pub fn parse_remaining(
    parser: &mut Parser<'_, [u8]>,
) -> Result<Bytes, ParseError> {
    let len = parser.remaining();
    parse_bytes(parser, len)
}

//============ Error Types ===================================================

//------------ ComposeError --------------------------------------------------

/// An error happened while composing data.
///
/// Composing into a vec never runs out of space, so the only thing that can
/// go wrong is data that doesn’t fit its length prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeError {
    /// Length-prefixed data exceeded the maximum of its prefix.
    LongData,

    /// An integer exceeded the width of its field.
    LargeInt,
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::LongData => f.write_str("data too long"),
            ComposeError::LargeInt => f.write_str("integer too large"),
        }
    }
}

impl std::error::Error for ComposeError {}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The input ended before an expected field.
    ///
    /// This includes fields running past the end of the record data as
    /// declared by the record’s RDLENGTH.
    Truncated,

    /// A domain name was malformed.
    ///
    /// This covers compression pointers that don’t point strictly
    /// backwards, unknown label types, and names longer than 255 octets.
    MalformedName,

    /// Record data doesn’t match the schema for its record type.
    SchemaMismatch,
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::Truncated
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::Truncated => f.write_str("unexpected end of input"),
            ParseError::MalformedName => f.write_str("malformed domain name"),
            ParseError::SchemaMismatch => {
                f.write_str("record data does not match record type")
            }
        }
    }
}

impl std::error::Error for ParseError {}

//============ Testing =======================================================
