//! Record data from [RFC 2845]: TSIG records.
//!
//! [RFC 2845]: https://tools.ietf.org/html/rfc2845

use bytes::Bytes;

use crate::base::iana::{Rtype, TsigRcode};
use crate::base::name::Dname;
use crate::base::serial::Time48;

use super::{Rdata, RdataField};

//------------ Tsig ----------------------------------------------------------

/// TSIG record data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tsig {
    /// The name of the MAC algorithm, e.g., `hmac-sha256`.
    algorithm: Dname,

    /// The time the record was signed.
    time_signed: Time48,

    /// The permitted difference in seconds from the signing time.
    fudge: u16,

    mac: Bytes,

    /// The message ID before it may have been changed in transit.
    original_id: u16,

    error: TsigRcode,

    /// Other data. Only used with `BADTIME` to carry the server’s time.
    other: Bytes,
}

impl Tsig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        algorithm: Dname,
        time_signed: Time48,
        fudge: u16,
        mac: Bytes,
        original_id: u16,
        error: TsigRcode,
        other: Bytes,
    ) -> Self {
        Tsig {
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other,
        }
    }

    /// Creates the view from generic record data.
    ///
    /// Returns `None` if the data isn’t TSIG data.
    #[must_use]
    pub fn from_rdata(rdata: &Rdata) -> Option<Self> {
        if rdata.rtype() != Rtype::TSIG {
            return None;
        }
        match rdata.fields() {
            [RdataField::Dname(algorithm), RdataField::Int48(time_signed), RdataField::Int16(fudge), RdataField::Int16Data(mac), RdataField::Int16(original_id), RdataField::Int16(error), RdataField::Int16Data(other)] => {
                Some(Tsig::new(
                    algorithm.clone(),
                    Time48::from_u64(*time_signed),
                    *fudge,
                    mac.clone(),
                    *original_id,
                    TsigRcode::from_int(*error),
                    other.clone(),
                ))
            }
            _ => None,
        }
    }

    /// Converts the view into generic record data.
    #[must_use]
    pub fn into_rdata(self) -> Rdata {
        Rdata {
            rtype: Rtype::TSIG,
            fields: vec![
                RdataField::Dname(self.algorithm),
                RdataField::Int48(self.time_signed.into()),
                RdataField::Int16(self.fudge),
                RdataField::Int16Data(self.mac),
                RdataField::Int16(self.original_id),
                RdataField::Int16(self.error.to_int()),
                RdataField::Int16Data(self.other),
            ],
        }
    }

    pub fn algorithm(&self) -> &Dname {
        &self.algorithm
    }

    pub fn time_signed(&self) -> Time48 {
        self.time_signed
    }

    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    pub fn mac(&self) -> &Bytes {
        &self.mac
    }

    pub fn original_id(&self) -> u16 {
        self.original_id
    }

    pub fn error(&self) -> TsigRcode {
        self.error
    }

    pub fn other(&self) -> &Bytes {
        &self.other
    }

    /// Returns whether the signing time is within `fudge` of `now`.
    pub fn is_valid_at(&self, now: Time48) -> bool {
        self.time_signed.eq_fudged(now, self.fudge.into())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::wire::{Compose, Parser};
    use core::str::FromStr;

    #[test]
    fn rdata_round_trip() {
        let tsig = Tsig::new(
            Dname::from_str("hmac-sha256").unwrap(),
            Time48::from_u64(1_700_000_000),
            300,
            Bytes::from_static(b"\x01\x02\x03\x04"),
            0x1234,
            TsigRcode::NOERROR,
            Bytes::new(),
        );
        let rdata = tsig.clone().into_rdata();
        let mut wire = Vec::new();
        rdata.compose(&mut wire).unwrap();
        assert_eq!(wire.len(), 13 + 6 + 2 + 2 + 4 + 2 + 2 + 2);

        let mut parser = Parser::from_ref(wire.as_slice());
        let parsed = Rdata::parse(Rtype::TSIG, &mut parser, wire.len()).unwrap();
        assert_eq!(Tsig::from_rdata(&parsed), Some(tsig));
    }

    #[test]
    fn fudge() {
        let tsig = Tsig::new(
            Dname::from_str("hmac-sha256").unwrap(),
            Time48::from_u64(1000),
            300,
            Bytes::new(),
            0,
            TsigRcode::NOERROR,
            Bytes::new(),
        );
        assert!(tsig.is_valid_at(Time48::from_u64(1300)));
        assert!(tsig.is_valid_at(Time48::from_u64(700)));
        assert!(!tsig.is_valid_at(Time48::from_u64(1301)));
    }
}
