//! Individual fields of record data.
//!
//! Record data is a sequence of typed fields. Which fields appear in which
//! order is determined by the record type through the
//! [schema table][super::schema]. This module defines the field types,
//! [`RdataType`], and a field value, [`RdataField`].

use core::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::vec::Vec;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;

use crate::base::iana::{Class, Rtype, SecAlg};
use crate::base::name::Dname;
use crate::base::serial::Timestamp;
use crate::base::wire::{
    compose_len_prefixed, parse_bytes, parse_remaining, Compose,
    ComposeError, Parse, ParseError, Parser,
};

//------------ RdataType -----------------------------------------------------

/// The type of a record data field.
///
/// This determines the wire encoding of a field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RdataType {
    /// A domain name, possibly compressed in messages.
    Dname,

    /// An 8 bit integer.
    Int8,

    /// A 16 bit integer.
    Int16,

    /// A 32 bit integer.
    Int32,

    /// A 48 bit integer.
    Int48,

    /// An IPv4 address.
    A,

    /// An IPv6 address.
    Aaaa,

    /// A character string of up to 255 octets preceded by its length.
    Str,

    /// Binary data shown in Base 64, taking up the rest of the data.
    B64,

    /// Binary data shown in hex, taking up the rest of the data.
    Hex,

    /// An NSEC type bitmap, taking up the rest of the data.
    Nsec,

    /// A record type.
    Type,

    /// A class.
    Class,

    /// Certificate data, taking up the rest of the data.
    Cert,

    /// A DNSSEC algorithm number.
    Alg,

    /// Data of an unknown record type, taking up all of the data.
    Unknown,

    /// A signature time.
    Time,

    /// A WKS service bitmap, taking up the rest of the data.
    Service,

    /// Version 0 location data.
    Loc,

    /// Binary data preceded by its length as a 16 bit integer.
    Int16Data,
}

impl RdataType {
    /// Returns the wire size of fields of this type if it is fixed.
    #[must_use]
    pub fn fixed_size(self) -> Option<u16> {
        match self {
            RdataType::Int8 | RdataType::Alg => Some(1),
            RdataType::Int16 | RdataType::Type | RdataType::Class => Some(2),
            RdataType::Int32 | RdataType::A | RdataType::Time => Some(4),
            RdataType::Int48 => Some(6),
            RdataType::Aaaa | RdataType::Loc => Some(16),
            _ => None,
        }
    }
}

//------------ RdataField ----------------------------------------------------

/// A single field of record data.
///
/// Each variant corresponds to one [`RdataType`]. Integer values are kept
/// as native integers and always composed in network byte order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RdataField {
    Dname(Dname),
    Int8(u8),
    Int16(u16),
    Int32(u32),
    /// Only the lower 48 bits are used.
    Int48(u64),
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// The content of the character string without the length octet.
    Str(Bytes),
    B64(Bytes),
    Hex(Bytes),
    Nsec(Bytes),
    Type(Rtype),
    Class(Class),
    Cert(Bytes),
    Alg(SecAlg),
    Unknown(Bytes),
    Time(Timestamp),
    Service(Bytes),
    Loc([u8; 16]),
    /// The content without the length.
    Int16Data(Bytes),
}

impl RdataField {
    /// Returns the type of the field.
    #[must_use]
    pub fn rdata_type(&self) -> RdataType {
        match *self {
            RdataField::Dname(_) => RdataType::Dname,
            RdataField::Int8(_) => RdataType::Int8,
            RdataField::Int16(_) => RdataType::Int16,
            RdataField::Int32(_) => RdataType::Int32,
            RdataField::Int48(_) => RdataType::Int48,
            RdataField::A(_) => RdataType::A,
            RdataField::Aaaa(_) => RdataType::Aaaa,
            RdataField::Str(_) => RdataType::Str,
            RdataField::B64(_) => RdataType::B64,
            RdataField::Hex(_) => RdataType::Hex,
            RdataField::Nsec(_) => RdataType::Nsec,
            RdataField::Type(_) => RdataType::Type,
            RdataField::Class(_) => RdataType::Class,
            RdataField::Cert(_) => RdataType::Cert,
            RdataField::Alg(_) => RdataType::Alg,
            RdataField::Unknown(_) => RdataType::Unknown,
            RdataField::Time(_) => RdataType::Time,
            RdataField::Service(_) => RdataType::Service,
            RdataField::Loc(_) => RdataType::Loc,
            RdataField::Int16Data(_) => RdataType::Int16Data,
        }
    }

    /// Returns the size of the field in wire format.
    ///
    /// Names are counted uncompressed. The value saturates at 65535 for
    /// data too long to be composed at all.
    #[must_use]
    pub fn size(&self) -> u16 {
        if let Some(size) = self.rdata_type().fixed_size() {
            return size;
        }
        let len = match *self {
            RdataField::Dname(ref name) => name.len(),
            RdataField::Str(ref data) => data.len() + 1,
            RdataField::Int16Data(ref data) => data.len() + 2,
            RdataField::B64(ref data)
            | RdataField::Hex(ref data)
            | RdataField::Nsec(ref data)
            | RdataField::Cert(ref data)
            | RdataField::Unknown(ref data)
            | RdataField::Service(ref data) => data.len(),
            _ => 0,
        };
        u16::try_from(len).unwrap_or(u16::MAX)
    }

    /// Returns the octets of a field holding binary data.
    #[must_use]
    pub fn as_data(&self) -> Option<&Bytes> {
        match *self {
            RdataField::Str(ref data)
            | RdataField::B64(ref data)
            | RdataField::Hex(ref data)
            | RdataField::Nsec(ref data)
            | RdataField::Cert(ref data)
            | RdataField::Unknown(ref data)
            | RdataField::Service(ref data)
            | RdataField::Int16Data(ref data) => Some(data),
            _ => None,
        }
    }

    /// Returns the domain name of a `Dname` field.
    #[must_use]
    pub fn as_dname(&self) -> Option<&Dname> {
        match *self {
            RdataField::Dname(ref name) => Some(name),
            _ => None,
        }
    }
}

/// # Parsing and Composing
///
impl RdataField {
    /// Takes a field of the given type from the beginning of a parser.
    ///
    /// The parser must be limited to the end of the record data so that
    /// fields extending to the end only take the record’s data.
    pub fn parse(
        rdata_type: RdataType,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Self, ParseError> {
        Ok(match rdata_type {
            RdataType::Dname => RdataField::Dname(Dname::parse(parser)?),
            RdataType::Int8 => RdataField::Int8(u8::parse(parser)?),
            RdataType::Int16 => RdataField::Int16(u16::parse(parser)?),
            RdataType::Int32 => RdataField::Int32(u32::parse(parser)?),
            RdataType::Int48 => {
                let mut buf = [0u8; 8];
                parser.parse_buf(&mut buf[2..])?;
                RdataField::Int48(u64::from_be_bytes(buf))
            }
            RdataType::A => RdataField::A(Ipv4Addr::parse(parser)?),
            RdataType::Aaaa => RdataField::Aaaa(Ipv6Addr::parse(parser)?),
            RdataType::Str => {
                let len = u8::parse(parser)?;
                RdataField::Str(parse_bytes(parser, len.into())?)
            }
            RdataType::B64 => RdataField::B64(parse_remaining(parser)?),
            RdataType::Hex => RdataField::Hex(parse_remaining(parser)?),
            RdataType::Nsec => RdataField::Nsec(parse_remaining(parser)?),
            RdataType::Type => RdataField::Type(Rtype::parse(parser)?),
            RdataType::Class => RdataField::Class(Class::parse(parser)?),
            RdataType::Cert => RdataField::Cert(parse_remaining(parser)?),
            RdataType::Alg => RdataField::Alg(SecAlg::parse(parser)?),
            RdataType::Unknown => {
                RdataField::Unknown(parse_remaining(parser)?)
            }
            RdataType::Time => RdataField::Time(Timestamp::parse(parser)?),
            RdataType::Service => {
                RdataField::Service(parse_remaining(parser)?)
            }
            RdataType::Loc => {
                let mut buf = [0u8; 16];
                parser.parse_buf(&mut buf)?;
                RdataField::Loc(buf)
            }
            RdataType::Int16Data => {
                let len = u16::parse(parser)?;
                RdataField::Int16Data(parse_bytes(parser, len.into())?)
            }
        })
    }

    /// Appends the canonical wire format of the field to `target`.
    ///
    /// This differs from the regular format only for domain names which
    /// are lowercased.
    pub fn compose_canonical(
        &self,
        target: &mut Vec<u8>,
    ) -> Result<(), ComposeError> {
        match *self {
            RdataField::Dname(ref name) => {
                name.compose_canonical(target);
                Ok(())
            }
            _ => self.compose(target),
        }
    }
}

impl Compose for RdataField {
    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        match *self {
            RdataField::Dname(ref name) => name.compose(target),
            RdataField::Int8(v) => v.compose(target),
            RdataField::Int16(v) => v.compose(target),
            RdataField::Int32(v) => v.compose(target),
            RdataField::Int48(v) => {
                if v >> 48 != 0 {
                    return Err(ComposeError::LargeInt);
                }
                target.extend_from_slice(&v.to_be_bytes()[2..]);
                Ok(())
            }
            RdataField::A(addr) => addr.compose(target),
            RdataField::Aaaa(addr) => addr.compose(target),
            RdataField::Str(ref data) => {
                let len = u8::try_from(data.len())
                    .map_err(|_| ComposeError::LongData)?;
                target.push(len);
                target.extend_from_slice(data);
                Ok(())
            }
            RdataField::B64(ref data)
            | RdataField::Hex(ref data)
            | RdataField::Nsec(ref data)
            | RdataField::Cert(ref data)
            | RdataField::Unknown(ref data)
            | RdataField::Service(ref data) => {
                target.extend_from_slice(data);
                Ok(())
            }
            RdataField::Type(rtype) => rtype.compose(target),
            RdataField::Class(class) => class.compose(target),
            RdataField::Alg(alg) => alg.compose(target),
            RdataField::Time(time) => time.compose(target),
            RdataField::Loc(ref data) => {
                target.extend_from_slice(data);
                Ok(())
            }
            RdataField::Int16Data(ref data) => {
                compose_len_prefixed(target, |target| {
                    target.extend_from_slice(data);
                    Ok(())
                })
            }
        }
    }
}

//--- Display

impl fmt::Display for RdataField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RdataField::Dname(ref name) => write!(f, "{}.", name),
            RdataField::Int8(v) => write!(f, "{}", v),
            RdataField::Int16(v) => write!(f, "{}", v),
            RdataField::Int32(v) => write!(f, "{}", v),
            RdataField::Int48(v) => write!(f, "{}", v),
            RdataField::A(addr) => write!(f, "{}", addr),
            RdataField::Aaaa(addr) => write!(f, "{}", addr),
            RdataField::Str(ref data) => {
                f.write_str("\"")?;
                for &ch in data.iter() {
                    if ch == b'"' || ch == b'\\' {
                        write!(f, "\\{}", ch as char)?;
                    } else if !(0x20..0x7F).contains(&ch) {
                        write!(f, "\\{:03}", ch)?;
                    } else {
                        write!(f, "{}", ch as char)?;
                    }
                }
                f.write_str("\"")
            }
            RdataField::B64(ref data) | RdataField::Cert(ref data) => {
                f.write_str(&BASE64.encode(data))
            }
            RdataField::Int16Data(ref data) => {
                if data.is_empty() {
                    f.write_str("0")
                } else {
                    write!(f, "{} {}", data.len(), BASE64.encode(data))
                }
            }
            RdataField::Hex(ref data)
            | RdataField::Nsec(ref data)
            | RdataField::Service(ref data) => write_hex(f, data),
            RdataField::Unknown(ref data) => {
                write!(f, "\\# {}", data.len())?;
                if !data.is_empty() {
                    f.write_str(" ")?;
                    write_hex(f, data)?;
                }
                Ok(())
            }
            RdataField::Type(rtype) => write!(f, "{}", rtype),
            RdataField::Class(class) => write!(f, "{}", class),
            RdataField::Alg(alg) => write!(f, "{}", alg.to_int()),
            RdataField::Time(time) => write!(f, "{}", time),
            RdataField::Loc(ref data) => write_hex(f, data),
        }
    }
}

fn write_hex(f: &mut fmt::Formatter, data: &[u8]) -> fmt::Result {
    for ch in data {
        write!(f, "{:02X}", ch)?;
    }
    Ok(())
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use rstest::rstest;

    fn composed(field: &RdataField) -> Vec<u8> {
        let mut buf = Vec::new();
        field.compose(&mut buf).unwrap();
        buf
    }

    #[rstest]
    #[case(RdataField::Int8(0x12), b"\x12")]
    #[case(RdataField::Int16(0x1234), b"\x12\x34")]
    #[case(RdataField::Int32(0x1234_5678), b"\x12\x34\x56\x78")]
    #[case(RdataField::Int48(0x1234_5678_9abc), b"\x12\x34\x56\x78\x9a\xbc")]
    #[case(RdataField::A(Ipv4Addr::new(192, 0, 2, 1)), b"\xc0\x00\x02\x01")]
    #[case(RdataField::Str(Bytes::from_static(b"hi")), b"\x02hi")]
    #[case(RdataField::Int16Data(Bytes::from_static(b"abc")), b"\x00\x03abc")]
    #[case(RdataField::Type(Rtype::MX), b"\x00\x0f")]
    #[case(RdataField::Alg(SecAlg::RSASHA1), b"\x05")]
    fn size_matches_wire(#[case] field: RdataField, #[case] wire: &[u8]) {
        assert_eq!(composed(&field), wire);
        assert_eq!(usize::from(field.size()), wire.len());
        let mut parser = Parser::from_ref(wire);
        assert_eq!(
            RdataField::parse(field.rdata_type(), &mut parser).unwrap(),
            field
        );
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn short_fixed_width() {
        let mut parser = Parser::from_ref(&b"\x01\x02\x03"[..]);
        assert_eq!(
            RdataField::parse(RdataType::A, &mut parser),
            Err(ParseError::Truncated)
        );
        let mut parser = Parser::from_ref(&b"\x05abc"[..]);
        assert_eq!(
            RdataField::parse(RdataType::Str, &mut parser),
            Err(ParseError::Truncated)
        );
    }

    #[test]
    fn long_str() {
        let field = RdataField::Str(vec![b'a'; 256].into());
        assert_eq!(
            field.compose(&mut Vec::new()),
            Err(ComposeError::LongData)
        );
    }

    #[test]
    fn large_int48() {
        let mut buf = Vec::new();
        assert!(RdataField::Int48(0xffff_ffff_ffff).compose(&mut buf).is_ok());
        assert_eq!(buf, b"\xff\xff\xff\xff\xff\xff");
        assert_eq!(
            RdataField::Int48(1 << 48).compose(&mut Vec::new()),
            Err(ComposeError::LargeInt)
        );
    }

    #[test]
    fn canonical_name() {
        let field = RdataField::Dname(Dname::from_str("Example.COM").unwrap());
        let mut buf = Vec::new();
        field.compose_canonical(&mut buf).unwrap();
        assert_eq!(buf, b"\x07example\x03com\0");
        assert_eq!(composed(&field), b"\x07Example\x03COM\0");
    }

    #[test]
    fn display() {
        assert_eq!(
            RdataField::Str(Bytes::from_static(b"a \"b\"")).to_string(),
            "\"a \\\"b\\\"\""
        );
        assert_eq!(
            RdataField::B64(Bytes::from_static(b"\x01\x02\x03")).to_string(),
            "AQID"
        );
        assert_eq!(
            RdataField::Unknown(Bytes::from_static(b"\xab\xcd")).to_string(),
            "\\# 2 ABCD"
        );
    }
}
