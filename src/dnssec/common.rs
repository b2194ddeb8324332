//! Code shared by DNSSEC validation and signing.
//!
//! Both sides need to agree exactly on the data that is signed. This module
//! provides the closed set of supported algorithms and [`signed_data`], the
//! single routine producing the signed data for an RRset.

use core::cmp::Ordering;
use core::fmt;
use std::vec::Vec;

use openssl::hash::MessageDigest;

use crate::base::iana::{Class, Rtype, SecAlg};
use crate::base::name::Dname;
use crate::base::record::Record;
use crate::base::wire::{Compose, ComposeError};
use crate::rdata::Rrsig;

//------------ Algorithm -----------------------------------------------------

/// The DNSSEC algorithms supported for validation and signing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    /// RSA/MD5. Deprecated but still verified.
    RsaMd5,

    /// RSA/SHA-1.
    RsaSha1,

    /// DSA/SHA-1.
    Dsa,

    /// RSA/SHA-1 for zones using NSEC3.
    RsaSha1Nsec3Sha1,

    /// DSA/SHA-1 for zones using NSEC3.
    DsaNsec3Sha1,

    /// RSA/SHA-256.
    RsaSha256,

    /// RSA/SHA-512.
    RsaSha512,
}

impl Algorithm {
    /// Returns the algorithm for an algorithm number.
    ///
    /// Returns `None` if the algorithm isn’t supported.
    pub fn from_secalg(alg: SecAlg) -> Option<Self> {
        match alg {
            SecAlg::RSAMD5 => Some(Algorithm::RsaMd5),
            SecAlg::RSASHA1 => Some(Algorithm::RsaSha1),
            SecAlg::DSA => Some(Algorithm::Dsa),
            SecAlg::RSASHA1_NSEC3_SHA1 => Some(Algorithm::RsaSha1Nsec3Sha1),
            SecAlg::DSA_NSEC3_SHA1 => Some(Algorithm::DsaNsec3Sha1),
            SecAlg::RSASHA256 => Some(Algorithm::RsaSha256),
            SecAlg::RSASHA512 => Some(Algorithm::RsaSha512),
            _ => None,
        }
    }

    /// Returns the algorithm number.
    pub fn to_secalg(self) -> SecAlg {
        match self {
            Algorithm::RsaMd5 => SecAlg::RSAMD5,
            Algorithm::RsaSha1 => SecAlg::RSASHA1,
            Algorithm::Dsa => SecAlg::DSA,
            Algorithm::RsaSha1Nsec3Sha1 => SecAlg::RSASHA1_NSEC3_SHA1,
            Algorithm::DsaNsec3Sha1 => SecAlg::DSA_NSEC3_SHA1,
            Algorithm::RsaSha256 => SecAlg::RSASHA256,
            Algorithm::RsaSha512 => SecAlg::RSASHA512,
        }
    }

    /// Returns whether this is one of the RSA algorithms.
    pub fn is_rsa(self) -> bool {
        match self {
            Algorithm::RsaMd5
            | Algorithm::RsaSha1
            | Algorithm::RsaSha1Nsec3Sha1
            | Algorithm::RsaSha256
            | Algorithm::RsaSha512 => true,
            Algorithm::Dsa | Algorithm::DsaNsec3Sha1 => false,
        }
    }

    /// Returns the message digest used by the algorithm.
    pub fn digest(self) -> MessageDigest {
        match self {
            Algorithm::RsaMd5 => MessageDigest::md5(),
            Algorithm::RsaSha1
            | Algorithm::Dsa
            | Algorithm::RsaSha1Nsec3Sha1
            | Algorithm::DsaNsec3Sha1 => MessageDigest::sha1(),
            Algorithm::RsaSha256 => MessageDigest::sha256(),
            Algorithm::RsaSha512 => MessageDigest::sha512(),
        }
    }
}

//--- From

impl From<Algorithm> for SecAlg {
    fn from(alg: Algorithm) -> SecAlg {
        alg.to_secalg()
    }
}

//--- Display

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Algorithm::RsaMd5 => "RSAMD5",
            Algorithm::RsaSha1 => "RSASHA1",
            Algorithm::Dsa => "DSA",
            Algorithm::RsaSha1Nsec3Sha1 => "RSASHA1-NSEC3-SHA1",
            Algorithm::DsaNsec3Sha1 => "DSA-NSEC3-SHA1",
            Algorithm::RsaSha256 => "RSASHA256",
            Algorithm::RsaSha512 => "RSASHA512",
        })
    }
}

//------------ Rrset checks --------------------------------------------------

/// Checks that a slice of records forms an RRset.
///
/// All records must share owner, class, and type. Returns the first record
/// which thus carries the RRset’s owner, class, type, and TTL.
pub fn uniform_rrset(rrset: &[Record]) -> Result<&Record, RrsetError> {
    let (first, rest) = rrset.split_first().ok_or(RrsetError::Empty)?;
    let key = |record: &Record| -> (Dname, Class, Rtype) {
        (record.owner().clone(), record.class(), record.rtype())
    };
    let first_key = key(first);
    if rest.iter().all(|record| key(record) == first_key) {
        Ok(first)
    } else {
        Err(RrsetError::Mixed)
    }
}

//------------ signed_data ---------------------------------------------------

/// Produces the data signed by an RRSIG for an RRset.
///
/// The signed data is defined in [RFC 4034, section 3.1.8.1]:
///
/// ```text
/// signed_data = RRSIG_RDATA | RR(1) | RR(2)...
/// ```
///
/// where `RRSIG_RDATA` is the RRSIG record data without the signature and
/// with a lowercase signer name, and `RR(i)` are the records in canonical
/// form with their TTL replaced by the original TTL of the RRSIG, sorted
/// into canonical order and with duplicates removed.
///
/// If an owner has more labels than the RRSIG’s labels field, the record
/// was synthesized from a wildcard and the owner is replaced by the
/// wildcard name as described in [RFC 4035, section 5.3.2].
///
/// The function does not check that the records actually form an RRset.
///
/// [RFC 4034, section 3.1.8.1]: https://tools.ietf.org/html/rfc4034#section-3.1.8.1
/// [RFC 4035, section 5.3.2]: https://tools.ietf.org/html/rfc4035#section-5.3.2
pub fn signed_data(
    rrsig: &Rrsig,
    rrset: &[Record],
) -> Result<Vec<u8>, ComposeError> {
    let mut res = Vec::new();
    rrsig.compose_canonical_head(&mut res)?;

    // The canonical record data and the complete canonical record.
    let mut records = Vec::with_capacity(rrset.len());
    for record in rrset {
        let data = record.data().to_canonical_vec()?;
        let mut full = Vec::new();
        canonical_owner(record.owner(), rrsig.labels()).compose(&mut full)?;
        record.rtype().compose(&mut full)?;
        record.class().compose(&mut full)?;
        rrsig.original_ttl().compose(&mut full)?;
        let rdlen =
            u16::try_from(data.len()).map_err(|_| ComposeError::LongData)?;
        rdlen.compose(&mut full)?;
        full.extend_from_slice(&data);
        records.push((data, full));
    }

    records.sort_by(|left, right| match left.0.cmp(&right.0) {
        Ordering::Equal => left.1.cmp(&right.1),
        other => other,
    });
    records.dedup_by(|left, right| left.1 == right.1);

    for (_, full) in records {
        res.extend_from_slice(&full);
    }
    Ok(res)
}

/// Returns the owner name to use in signed data.
///
/// This is the lowercase owner or, for an owner with more than `labels`
/// labels, the lowercase wildcard from which it was expanded.
fn canonical_owner(owner: &Dname, labels: u8) -> Dname {
    let labels = usize::from(labels);
    if labels < usize::from(owner.rrsig_label_count()) {
        if let Some(wildcard) =
            owner.suffix(labels).and_then(|name| name.prepend(b"*").ok())
        {
            return wildcard.to_canonical();
        }
    }
    owner.to_canonical()
}

//============ Error Types ===================================================

//------------ RrsetError ----------------------------------------------------

/// A slice of records wasn’t a proper RRset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RrsetError {
    /// There were no records at all.
    Empty,

    /// The records differ in owner, class, or type.
    Mixed,
}

impl fmt::Display for RrsetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            RrsetError::Empty => "empty RRset",
            RrsetError::Mixed => "records do not form an RRset",
        })
    }
}

impl std::error::Error for RrsetError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::serial::Timestamp;
    use crate::rdata::{Rdata, RdataField};
    use bytes::Bytes;
    use core::str::FromStr;

    fn name(s: &str) -> Dname {
        Dname::from_str(s).unwrap()
    }

    fn txt(owner: &str, text: &'static [u8]) -> Record {
        Record::new(
            name(owner),
            Class::IN,
            300,
            Rdata::new(Rtype::TXT, vec![RdataField::Str(Bytes::from_static(text))])
                .unwrap(),
        )
    }

    fn rrsig(labels: u8) -> Rrsig {
        Rrsig::new(
            Rtype::TXT,
            SecAlg::RSASHA256,
            labels,
            3600,
            Timestamp::from(2000),
            Timestamp::from(1000),
            12345,
            name("Example"),
            Bytes::new(),
        )
    }

    #[test]
    fn algorithm_numbers() {
        for value in 0..=255 {
            let alg = SecAlg::from_int(value);
            if let Some(known) = Algorithm::from_secalg(alg) {
                assert_eq!(known.to_secalg(), alg);
            }
        }
        assert_eq!(Algorithm::from_secalg(SecAlg::ECDSAP256SHA256), None);
        assert!(Algorithm::RsaMd5.is_rsa());
        assert!(!Algorithm::DsaNsec3Sha1.is_rsa());
    }

    #[test]
    fn uniform() {
        let a = txt("a.example", b"1");
        let b = txt("A.example", b"2");
        let c = txt("c.example", b"3");
        assert_eq!(uniform_rrset(&[]), Err(RrsetError::Empty));
        assert!(uniform_rrset(&[a.clone(), b]).is_ok());
        assert_eq!(uniform_rrset(&[a, c]), Err(RrsetError::Mixed));
    }

    #[test]
    fn sorted_and_deduplicated() {
        let one = txt("a.example", b"1");
        let two = txt("a.example", b"2");
        let forward =
            signed_data(&rrsig(2), &[one.clone(), two.clone()]).unwrap();
        let backward = signed_data(
            &rrsig(2),
            &[two.clone(), one.clone(), two.clone()],
        )
        .unwrap();
        assert_eq!(forward, backward);

        let mut expected = Vec::new();
        rrsig(2).compose_canonical_head(&mut expected).unwrap();
        one.compose_canonical(3600, &mut expected).unwrap();
        two.compose_canonical(3600, &mut expected).unwrap();
        assert_eq!(forward, expected);
    }

    #[test]
    fn wildcard_owner() {
        assert_eq!(
            canonical_owner(&name("A.Z.w.example"), 2),
            name("*.w.example")
        );
        assert_eq!(
            canonical_owner(&name("A.Z.w.example"), 4).as_slice(),
            b"\x01a\x01z\x01w\x07example\0"
        );
        assert_eq!(
            canonical_owner(&name("*.w.example"), 2).as_slice(),
            b"\x01*\x01w\x07example\0"
        );
    }
}
