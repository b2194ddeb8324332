//! Resource records.
//!
//! This module defines [`Record`], a resource record consisting of an
//! owner name, class, TTL, and [`Rdata`]. The record type is not stored
//! separately but taken from the record data which always knows its type.

use core::cmp::Ordering;
use core::fmt;
use std::vec::Vec;

use super::iana::{Class, Rtype};
use super::name::Dname;
use super::wire::{
    compose_len_prefixed, Compose, ComposeError, Parse, ParseError, Parser,
};
use crate::rdata::Rdata;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. Data is arranged in a tree which is navigated using the domain
/// name. Each node in the tree carries a label, starting with the root
/// label as the top-most node. The tree is traversed by stepping through the
/// name from right to left, finding a child node carring the label of each
/// step.
///
/// In addition to the key, a record carries its time to live in seconds
/// and the actual record data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The owner of the record.
    owner: Dname,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: u32,

    /// The record data. The value also specifies the record’s type.
    data: Rdata,
}

/// # Creation and Element Access
///
impl Record {
    /// Creates a new record from its parts.
    pub fn new(owner: Dname, class: Class, ttl: u32, data: Rdata) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
        }
    }

    /// Returns a reference to the owner domain name.
    pub fn owner(&self) -> &Dname {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Sets the record’s class.
    pub fn set_class(&mut self, class: Class) {
        self.class = class
    }

    /// Returns the record’s time-to-live.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Sets the record’s time-to-live.
    pub fn set_ttl(&mut self, ttl: u32) {
        self.ttl = ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &Rdata {
        &self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> Rdata {
        self.data
    }
}

/// # Parsing and Composing
///
impl Record {
    /// Appends the canonical wire format of the record.
    ///
    /// The owner name is lowercased and so are names in the data for those
    /// record types where this is required. The TTL is replaced with `ttl`
    /// which, when creating signed data, is the original TTL of the
    /// signature.
    pub fn compose_canonical(
        &self,
        ttl: u32,
        target: &mut Vec<u8>,
    ) -> Result<(), ComposeError> {
        self.owner.compose_canonical(target);
        self.rtype().compose(target)?;
        self.class.compose(target)?;
        ttl.compose(target)?;
        compose_len_prefixed(target, |target| {
            self.data.compose_canonical(target)
        })
    }
}

impl Parse for Record {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let owner = Dname::parse(parser)?;
        let rtype = Rtype::parse(parser)?;
        let class = Class::parse(parser)?;
        let ttl = u32::parse(parser)?;
        let rdlen = u16::parse(parser)?;
        let data = Rdata::parse(rtype, parser, rdlen.into())?;
        Ok(Record::new(owner, class, ttl, data))
    }
}

impl Compose for Record {
    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        self.owner.compose(target)?;
        self.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        compose_len_prefixed(target, |target| self.data.compose(target))
    }
}

//--- Canonical ordering

impl Record {
    /// Compares two records of the same RRset in canonical order.
    ///
    /// Only the record data is considered since all other parts of the
    /// key are equal within an RRset.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.data.canonical_cmp(&other.data)
    }
}

//--- Display

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.\t{}\t{}\t{}\t{}",
            self.owner,
            self.ttl,
            self.class,
            self.rtype(),
            self.data
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::RdataField;
    use core::str::FromStr;

    fn mx(owner: &str, pref: u16, exchange: &str) -> Record {
        Record::new(
            Dname::from_str(owner).unwrap(),
            Class::IN,
            3600,
            Rdata::new(
                Rtype::MX,
                vec![
                    RdataField::Int16(pref),
                    RdataField::Dname(Dname::from_str(exchange).unwrap()),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn parse_compose() {
        let record = mx("example", 10, "mx.example");
        let mut wire = Vec::new();
        record.compose(&mut wire).unwrap();
        assert_eq!(
            wire,
            b"\x07example\0\x00\x0f\x00\x01\x00\x00\x0e\x10\x00\x0e\
              \x00\x0a\x02mx\x07example\0"
        );
        let mut parser = Parser::from_ref(wire.as_slice());
        assert_eq!(Record::parse(&mut parser), Ok(record));
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn parse_rdlen_past_end() {
        let wire = b"\x07example\0\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x05\
                     \x01\x02\x03\x04";
        let mut parser = Parser::from_ref(&wire[..]);
        assert_eq!(Record::parse(&mut parser), Err(ParseError::Truncated));
    }

    #[test]
    fn compressed_name_in_data() {
        // The exchange is a pointer to the owner name at offset 0.
        let wire = b"\x07example\0\x00\x0f\x00\x01\x00\x00\x0e\x10\x00\x07\
                     \x00\x0a\x02mx\xc0\x00";
        let mut parser = Parser::from_ref(&wire[..]);
        let record = Record::parse(&mut parser).unwrap();
        assert_eq!(record, mx("example", 10, "mx.example"));
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn canonical() {
        let record = mx("Example", 10, "MX.example");
        let mut buf = Vec::new();
        record.compose_canonical(7200, &mut buf).unwrap();
        assert_eq!(
            buf,
            b"\x07example\0\x00\x0f\x00\x01\x00\x00\x1c\x20\x00\x0e\
              \x00\x0a\x02mx\x07example\0"
        );
        assert_eq!(
            mx("example", 5, "mx.example")
                .canonical_cmp(&mx("example", 10, "a.example")),
            Ordering::Less
        );
    }
}
