//! Record data.
//!
//! The data of a resource record is represented by [`Rdata`], an ordered
//! sequence of [`RdataField`]s. The number and types of the fields are
//! determined by the record type via the [schema table][schema]. Data of
//! record types without a known layout is kept as a single opaque field.
//!
//! For the record types needed for DNSSEC and TSIG, the submodules
//! [`dnssec`] and [`tsig`] provide typed views with named accessors.

pub use self::dnssec::{Dnskey, Ds, Rrsig};
pub use self::field::{RdataField, RdataType};
pub use self::schema::Schema;
pub use self::tsig::Tsig;

pub mod dnssec;
pub mod field;
pub mod schema;
pub mod tsig;

use core::cmp::Ordering;
use core::fmt;
use std::vec::Vec;

use bytes::Bytes;

use crate::base::iana::Rtype;
use crate::base::wire::{Compose, ComposeError, ParseError, Parser};

//------------ Rdata ---------------------------------------------------------

/// The data of a resource record.
///
/// A value always knows the record type it belongs to and its fields
/// always match the schema for that type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rdata {
    rtype: Rtype,
    fields: Vec<RdataField>,
}

impl Rdata {
    /// Creates record data from a sequence of fields.
    ///
    /// Returns an error if the fields don’t match the schema for `rtype`.
    pub fn new(
        rtype: Rtype,
        fields: Vec<RdataField>,
    ) -> Result<Self, ParseError> {
        if !Schema::for_rtype(rtype)
            .matches(fields.iter().map(RdataField::rdata_type))
        {
            return Err(ParseError::SchemaMismatch);
        }
        Ok(Rdata { rtype, fields })
    }

    /// Creates opaque record data for a record type without known layout.
    pub fn unknown(rtype: Rtype, data: Bytes) -> Result<Self, ParseError> {
        Self::new(rtype, vec![RdataField::Unknown(data)])
    }

    /// Returns the record type this data belongs to.
    #[must_use]
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the fields.
    #[must_use]
    pub fn fields(&self) -> &[RdataField] {
        &self.fields
    }

    /// Converts the data into its fields.
    #[must_use]
    pub fn into_fields(self) -> Vec<RdataField> {
        self.fields
    }

    /// Returns the length of the data in wire format.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.iter().map(|field| usize::from(field.size())).sum()
    }

    /// Returns whether the data is empty in wire format.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// # Parsing and Composing
///
impl Rdata {
    /// Parses `rdlen` octets of record data of type `rtype`.
    ///
    /// The parser needs to be positioned within the complete message so
    /// that compressed names can be followed. No field may extend beyond
    /// the end of the record data, which results in
    /// [`ParseError::Truncated`]. If octets remain after all fields of the
    /// schema have been parsed, [`ParseError::SchemaMismatch`] is returned.
    pub fn parse(
        rtype: Rtype,
        parser: &mut Parser<'_, [u8]>,
        rdlen: usize,
    ) -> Result<Self, ParseError> {
        let mut parser = parser.parse_parser(rdlen)?;
        let schema = Schema::for_rtype(rtype);
        let mut fields = Vec::with_capacity(schema.fields().len());
        for &rdata_type in schema.fields() {
            fields.push(RdataField::parse(rdata_type, &mut parser)?);
        }
        if schema.repeat_last() {
            if let Some(&last) = schema.fields().last() {
                while parser.remaining() > 0 {
                    fields.push(RdataField::parse(last, &mut parser)?);
                }
            }
        }
        if parser.remaining() != 0 {
            return Err(ParseError::SchemaMismatch);
        }
        Ok(Rdata { rtype, fields })
    }

    /// Appends the canonical wire format of the data to `target`.
    ///
    /// Embedded domain names are lowercased for those record types where
    /// RFC 4034 requires it.
    pub fn compose_canonical(
        &self,
        target: &mut Vec<u8>,
    ) -> Result<(), ComposeError> {
        if Schema::canonical_names(self.rtype) {
            for field in &self.fields {
                field.compose_canonical(target)?;
            }
            Ok(())
        } else {
            self.compose(target)
        }
    }

    /// Returns the canonical wire format of the data.
    pub fn to_canonical_vec(&self) -> Result<Vec<u8>, ComposeError> {
        let mut res = Vec::with_capacity(self.len());
        self.compose_canonical(&mut res)?;
        Ok(res)
    }

    /// Compares two values in canonical order.
    ///
    /// This is the order of the canonical wire format of the data
    /// treated as unsigned left-justified octet sequences. Data that cannot
    /// be composed sorts last.
    #[must_use]
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        match (self.to_canonical_vec(), other.to_canonical_vec()) {
            (Ok(left), Ok(right)) => left.cmp(&right),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => Ordering::Equal,
        }
    }
}

impl Compose for Rdata {
    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        for field in &self.fields {
            field.compose(target)?;
        }
        Ok(())
    }
}

//--- Display

impl fmt::Display for Rdata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, field) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::name::Dname;
    use core::str::FromStr;

    fn parse(rtype: Rtype, data: &[u8]) -> Result<Rdata, ParseError> {
        let mut parser = Parser::from_ref(data);
        Rdata::parse(rtype, &mut parser, data.len())
    }

    #[test]
    fn parse_mx() {
        let rdata = parse(Rtype::MX, b"\x00\x0a\x02mx\x07example\0").unwrap();
        assert_eq!(
            rdata.fields(),
            &[
                RdataField::Int16(10),
                RdataField::Dname(Dname::from_str("mx.example").unwrap())
            ]
        );
        assert_eq!(rdata.len(), 14);
        assert_eq!(rdata.to_string(), "10 mx.example.");
    }

    #[test]
    fn parse_txt() {
        let rdata = parse(Rtype::TXT, b"\x03foo\x00\x03bar").unwrap();
        assert_eq!(rdata.fields().len(), 3);
        assert_eq!(parse(Rtype::TXT, b""), Err(ParseError::Truncated));
    }

    #[test]
    fn parse_unknown() {
        let rdata = parse(Rtype::from_int(65280), b"\x01\x02\x03").unwrap();
        assert_eq!(
            rdata.fields(),
            &[RdataField::Unknown(Bytes::from_static(b"\x01\x02\x03"))]
        );
        let empty = parse(Rtype::from_int(65280), b"").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn schema_errors() {
        // Short A record.
        assert_eq!(parse(Rtype::A, b"\x01\x02\x03"), Err(ParseError::Truncated));
        // Long A record.
        assert_eq!(
            parse(Rtype::A, b"\x01\x02\x03\x04\x05"),
            Err(ParseError::SchemaMismatch)
        );
        // Character string running past the data.
        assert_eq!(
            parse(Rtype::HINFO, b"\x01a\x05b"),
            Err(ParseError::Truncated)
        );
    }

    #[test]
    fn field_cannot_escape_rdlen() {
        // The name continues beyond the declared length of three octets.
        let data = b"\x00\x0a\x02mx\x07example\0";
        let mut parser = Parser::from_ref(&data[..]);
        assert_eq!(
            Rdata::parse(Rtype::MX, &mut parser, 3),
            Err(ParseError::Truncated)
        );
    }

    #[test]
    fn new_checks_schema() {
        assert_eq!(
            Rdata::new(Rtype::MX, vec![RdataField::Int16(10)]),
            Err(ParseError::SchemaMismatch)
        );
        assert!(Rdata::unknown(Rtype::MX, Bytes::new()).is_err());
        assert!(Rdata::unknown(Rtype::from_int(65280), Bytes::new()).is_ok());
    }

    #[test]
    fn canonical() {
        let name = Dname::from_str("MX.Example").unwrap();
        let mx = Rdata::new(
            Rtype::MX,
            vec![RdataField::Int16(10), RdataField::Dname(name.clone())],
        )
        .unwrap();
        assert_eq!(
            mx.to_canonical_vec().unwrap(),
            b"\x00\x0a\x02mx\x07example\0"
        );

        // NSEC keeps the case of the next owner name.
        let nsec = Rdata::new(
            Rtype::NSEC,
            vec![RdataField::Dname(name), RdataField::Nsec(Bytes::new())],
        )
        .unwrap();
        assert_eq!(nsec.to_canonical_vec().unwrap(), b"\x02MX\x07Example\0");

        let other = Rdata::new(
            Rtype::MX,
            vec![
                RdataField::Int16(10),
                RdataField::Dname(Dname::from_str("a.example").unwrap()),
            ],
        )
        .unwrap();
        assert_eq!(other.canonical_cmp(&mx), Ordering::Less);
    }
}
