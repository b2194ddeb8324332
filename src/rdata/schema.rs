//! The table of record data layouts.
//!
//! For every record type with a known layout, the table gives the ordered
//! list of field types its data consists of. Record types not in the table
//! keep their data as a single [`RdataType::Unknown`] field.

use crate::base::iana::Rtype;

use super::field::RdataType;

use RdataType::*;

//------------ Schema --------------------------------------------------------

/// The layout of the record data of a record type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Schema {
    /// The field types in order.
    fields: &'static [RdataType],

    /// Whether the last field may appear any number of times, at least once.
    repeat_last: bool,
}

impl Schema {
    const fn new(fields: &'static [RdataType]) -> Self {
        Schema {
            fields,
            repeat_last: false,
        }
    }

    const fn repeating(fields: &'static [RdataType]) -> Self {
        Schema {
            fields,
            repeat_last: true,
        }
    }

    /// The schema of record types without a known layout.
    pub const UNKNOWN: Schema = Schema::new(&[Unknown]);

    /// Returns the schema for the given record type.
    #[must_use]
    pub fn for_rtype(rtype: Rtype) -> Self {
        match rtype {
            Rtype::A => Schema::new(&[A]),
            Rtype::NS
            | Rtype::MD
            | Rtype::MF
            | Rtype::CNAME
            | Rtype::MB
            | Rtype::MG
            | Rtype::MR
            | Rtype::PTR
            | Rtype::NSAPPTR
            | Rtype::DNAME => Schema::new(&[Dname]),
            Rtype::SOA => Schema::new(&[
                Dname, Dname, Int32, Int32, Int32, Int32, Int32,
            ]),
            Rtype::NULL => Schema::UNKNOWN,
            Rtype::WKS => Schema::new(&[A, Int8, Service]),
            Rtype::HINFO => Schema::new(&[Str, Str]),
            Rtype::MINFO | Rtype::RP => Schema::new(&[Dname, Dname]),
            Rtype::MX | Rtype::AFSDB | Rtype::RT | Rtype::KX => {
                Schema::new(&[Int16, Dname])
            }
            Rtype::TXT | Rtype::X25 | Rtype::ISDN => {
                Schema::repeating(&[Str])
            }
            Rtype::NSAP => Schema::new(&[Hex]),
            Rtype::SIG | Rtype::RRSIG => Schema::new(&[
                Type, Alg, Int8, Int32, Time, Time, Int16, Dname, B64,
            ]),
            Rtype::KEY | Rtype::DNSKEY => {
                Schema::new(&[Int16, Int8, Alg, B64])
            }
            Rtype::PX => Schema::new(&[Int16, Dname, Dname]),
            Rtype::GPOS => Schema::new(&[Str, Str, Str]),
            Rtype::AAAA => Schema::new(&[Aaaa]),
            Rtype::LOC => Schema::new(&[Loc]),
            Rtype::NXT | Rtype::NSEC => Schema::new(&[Dname, Nsec]),
            Rtype::SRV => Schema::new(&[Int16, Int16, Int16, Dname]),
            Rtype::NAPTR => {
                Schema::new(&[Int16, Int16, Str, Str, Str, Dname])
            }
            Rtype::CERT => Schema::new(&[Int16, Int16, Alg, Cert]),
            Rtype::DS => Schema::new(&[Int16, Alg, Int8, Hex]),
            Rtype::SSHFP => Schema::new(&[Int8, Int8, Hex]),
            Rtype::TSIG => Schema::new(&[
                Dname, Int48, Int16, Int16Data, Int16, Int16, Int16Data,
            ]),
            _ => Schema::UNKNOWN,
        }
    }

    /// Returns the field types of the schema.
    #[must_use]
    pub fn fields(self) -> &'static [RdataType] {
        self.fields
    }

    /// Returns whether the last field type repeats.
    #[must_use]
    pub fn repeat_last(self) -> bool {
        self.repeat_last
    }

    /// Returns whether embedded domain names are lowercased in canonical
    /// form.
    ///
    /// This is the list of RFC 4034, section 6.2 without NSEC as
    /// corrected by RFC 6840.
    #[must_use]
    pub fn canonical_names(rtype: Rtype) -> bool {
        matches!(
            rtype,
            Rtype::NS
                | Rtype::MD
                | Rtype::MF
                | Rtype::CNAME
                | Rtype::SOA
                | Rtype::MB
                | Rtype::MG
                | Rtype::MR
                | Rtype::PTR
                | Rtype::MINFO
                | Rtype::MX
                | Rtype::RP
                | Rtype::AFSDB
                | Rtype::RT
                | Rtype::SIG
                | Rtype::PX
                | Rtype::NXT
                | Rtype::NAPTR
                | Rtype::KX
                | Rtype::SRV
                | Rtype::DNAME
                | Rtype::RRSIG
        )
    }

    /// Checks whether a sequence of field types matches the schema.
    #[must_use]
    pub fn matches(self, types: impl IntoIterator<Item = RdataType>) -> bool {
        let mut types = types.into_iter();
        for &expected in self.fields {
            if types.next() != Some(expected) {
                return false;
            }
        }
        match self.fields.last() {
            Some(&last) if self.repeat_last => types.all(|t| t == last),
            _ => types.next().is_none(),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    // Fields that extend to the end of the data.
    fn is_remainder(rtype: &RdataType) -> bool {
        matches!(rtype, B64 | Hex | Nsec | Cert | Service | Unknown)
    }

    #[test]
    fn remainder_types_come_last() {
        for value in 0..=u16::MAX {
            let schema = Schema::for_rtype(Rtype::from_int(value));
            let (last, head) = schema.fields().split_last().unwrap();
            assert!(!head.iter().any(is_remainder));
            if schema.repeat_last() {
                assert!(!is_remainder(last));
            }
        }
    }

    #[test]
    fn matches() {
        let txt = Schema::for_rtype(Rtype::TXT);
        assert!(txt.matches([Str]));
        assert!(txt.matches([Str, Str, Str]));
        assert!(!txt.matches(core::iter::empty()));
        assert!(!txt.matches([Str, Dname]));
        let mx = Schema::for_rtype(Rtype::MX);
        assert!(mx.matches([Int16, Dname]));
        assert!(!mx.matches([Int16, Dname, Dname]));
        assert!(!mx.matches([Int16]));
        assert_eq!(Schema::for_rtype(Rtype::from_int(65280)), Schema::UNKNOWN);
    }
}
