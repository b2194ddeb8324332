//! Record data from [RFC 4034]: DNSKEY, RRSIG, and DS records.
//!
//! The types in this module are typed views of the generic [`Rdata`] of
//! the respective record types. They are created from record data via
//! `from_rdata` and converted back via `into_rdata`.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use std::vec::Vec;

use bytes::Bytes;

use crate::base::iana::{DigestAlg, Rtype, SecAlg};
use crate::base::name::Dname;
use crate::base::serial::Timestamp;
use crate::base::wire::{Compose, ComposeError};

use super::{Rdata, RdataField};

//------------ key_tag -------------------------------------------------------

/// Calculates the key tag for the wire format of DNSKEY record data.
///
/// This is the algorithm of [RFC 4034, Appendix B]: the data is treated as
/// a sequence of big-endian 16 bit words which are summed up, with the
/// carry folded back in once. For algorithm 1 (RSA/MD5), the key tag is
/// instead the third-to-last and second-to-last octets of the public key.
///
/// Data shorter than the four octet DNSKEY header results in a key tag
/// calculated over whatever is there.
///
/// [RFC 4034, Appendix B]: https://tools.ietf.org/html/rfc4034#appendix-B
#[must_use]
pub fn key_tag(rdata: &[u8]) -> u16 {
    if rdata.get(3) == Some(&SecAlg::RSAMD5.to_int()) {
        let len = rdata.len();
        return if len > 6 {
            u16::from_be_bytes([rdata[len - 3], rdata[len - 2]])
        } else {
            0
        };
    }
    let mut res = 0u32;
    for (idx, &octet) in rdata.iter().enumerate() {
        if idx & 1 == 0 {
            res = res.wrapping_add(u32::from(octet) << 8);
        } else {
            res = res.wrapping_add(u32::from(octet));
        }
    }
    res = res.wrapping_add(res >> 16);
    (res & 0xFFFF) as u16
}

//------------ Dnskey --------------------------------------------------------

/// DNSKEY record data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dnskey {
    flags: u16,
    protocol: u8,
    algorithm: SecAlg,
    public_key: Bytes,
}

impl Dnskey {
    /// The zone key flag.
    pub const ZONE_KEY: u16 = 0x0100;

    /// The revoked flag of RFC 5011.
    pub const REVOKED: u16 = 0x0080;

    /// The secure entry point flag.
    pub const SECURE_ENTRY_POINT: u16 = 0x0001;

    /// The only valid value of the protocol field.
    pub const PROTOCOL: u8 = 3;

    pub fn new(
        flags: u16,
        protocol: u8,
        algorithm: SecAlg,
        public_key: Bytes,
    ) -> Self {
        Dnskey {
            flags,
            protocol,
            algorithm,
            public_key,
        }
    }

    /// Creates the view from generic record data.
    ///
    /// Returns `None` if the data isn’t DNSKEY data.
    #[must_use]
    pub fn from_rdata(rdata: &Rdata) -> Option<Self> {
        if rdata.rtype() != Rtype::DNSKEY {
            return None;
        }
        match rdata.fields() {
            [RdataField::Int16(flags), RdataField::Int8(protocol), RdataField::Alg(algorithm), RdataField::B64(key)] => {
                Some(Dnskey::new(*flags, *protocol, *algorithm, key.clone()))
            }
            _ => None,
        }
    }

    /// Converts the view into generic record data.
    #[must_use]
    pub fn into_rdata(self) -> Rdata {
        Rdata {
            rtype: Rtype::DNSKEY,
            fields: vec![
                RdataField::Int16(self.flags),
                RdataField::Int8(self.protocol),
                RdataField::Alg(self.algorithm),
                RdataField::B64(self.public_key),
            ],
        }
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    pub fn public_key(&self) -> &Bytes {
        &self.public_key
    }

    /// Returns whether the Zone Key flag is set.
    ///
    /// Only zone keys may be used to verify RRSIG records.
    pub fn is_zone_key(&self) -> bool {
        self.flags & Self::ZONE_KEY != 0
    }

    /// Returns whether the Revoked flag is set.
    pub fn is_revoked(&self) -> bool {
        self.flags & Self::REVOKED != 0
    }

    /// Returns whether the Secure Entry Point flag is set.
    pub fn is_secure_entry_point(&self) -> bool {
        self.flags & Self::SECURE_ENTRY_POINT != 0
    }

    /// Returns the key tag of the key.
    pub fn key_tag(&self) -> u16 {
        key_tag(&self.to_vec())
    }

    /// Returns the wire format of the record data.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.public_key.len());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.push(self.protocol);
        buf.push(self.algorithm.to_int());
        buf.extend_from_slice(&self.public_key);
        buf
    }

    /// Calculates the DS record data for this key.
    ///
    /// See [RFC 4034, Section 5.1.4]: the digest is calculated over the
    /// canonical owner name of the DNSKEY record followed by its record
    /// data.
    ///
    /// Returns `None` if the digest algorithm isn’t supported.
    ///
    /// [RFC 4034, Section 5.1.4]: https://tools.ietf.org/html/rfc4034#section-5.1.4
    #[cfg(feature = "validate")]
    pub fn digest(&self, owner: &Dname, digest_type: DigestAlg) -> Option<Ds> {
        use ring::digest;

        let algorithm = match digest_type {
            DigestAlg::SHA1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
            DigestAlg::SHA256 => &digest::SHA256,
            DigestAlg::SHA384 => &digest::SHA384,
            _ => return None,
        };
        let mut buf = Vec::new();
        owner.compose_canonical(&mut buf);
        let rdata = self.to_vec();
        buf.extend_from_slice(&rdata);
        let digest = digest::digest(algorithm, &buf);
        Some(Ds::new(
            key_tag(&rdata),
            self.algorithm,
            digest_type,
            Bytes::copy_from_slice(digest.as_ref()),
        ))
    }
}

//------------ Rrsig ---------------------------------------------------------

/// RRSIG record data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rrsig {
    type_covered: Rtype,
    algorithm: SecAlg,
    labels: u8,
    original_ttl: u32,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Dname,
    signature: Bytes,
}

impl Rrsig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        type_covered: Rtype,
        algorithm: SecAlg,
        labels: u8,
        original_ttl: u32,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Dname,
        signature: Bytes,
    ) -> Self {
        Rrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        }
    }

    /// Creates the view from generic record data.
    ///
    /// Returns `None` if the data isn’t RRSIG data.
    #[must_use]
    pub fn from_rdata(rdata: &Rdata) -> Option<Self> {
        if rdata.rtype() != Rtype::RRSIG {
            return None;
        }
        match rdata.fields() {
            [RdataField::Type(type_covered), RdataField::Alg(algorithm), RdataField::Int8(labels), RdataField::Int32(original_ttl), RdataField::Time(expiration), RdataField::Time(inception), RdataField::Int16(key_tag), RdataField::Dname(signer_name), RdataField::B64(signature)] => {
                Some(Rrsig::new(
                    *type_covered,
                    *algorithm,
                    *labels,
                    *original_ttl,
                    *expiration,
                    *inception,
                    *key_tag,
                    signer_name.clone(),
                    signature.clone(),
                ))
            }
            _ => None,
        }
    }

    /// Converts the view into generic record data.
    #[must_use]
    pub fn into_rdata(self) -> Rdata {
        Rdata {
            rtype: Rtype::RRSIG,
            fields: vec![
                RdataField::Type(self.type_covered),
                RdataField::Alg(self.algorithm),
                RdataField::Int8(self.labels),
                RdataField::Int32(self.original_ttl),
                RdataField::Time(self.expiration),
                RdataField::Time(self.inception),
                RdataField::Int16(self.key_tag),
                RdataField::Dname(self.signer_name),
                RdataField::B64(self.signature),
            ],
        }
    }

    pub fn type_covered(&self) -> Rtype {
        self.type_covered
    }

    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    pub fn labels(&self) -> u8 {
        self.labels
    }

    pub fn original_ttl(&self) -> u32 {
        self.original_ttl
    }

    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    pub fn signer_name(&self) -> &Dname {
        &self.signer_name
    }

    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    pub fn set_signature(&mut self, signature: Bytes) {
        self.signature = signature
    }

    /// Appends the canonical record data without the signature.
    ///
    /// This is the first part of the data covered by the signature. The
    /// signer name is lowercased.
    pub fn compose_canonical_head(
        &self,
        target: &mut Vec<u8>,
    ) -> Result<(), ComposeError> {
        self.type_covered.compose(target)?;
        self.algorithm.compose(target)?;
        self.labels.compose(target)?;
        self.original_ttl.compose(target)?;
        self.expiration.compose(target)?;
        self.inception.compose(target)?;
        self.key_tag.compose(target)?;
        self.signer_name.compose_canonical(target);
        Ok(())
    }
}

//------------ Ds ------------------------------------------------------------

/// DS record data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ds {
    key_tag: u16,
    algorithm: SecAlg,
    digest_type: DigestAlg,
    digest: Bytes,
}

impl Ds {
    pub fn new(
        key_tag: u16,
        algorithm: SecAlg,
        digest_type: DigestAlg,
        digest: Bytes,
    ) -> Self {
        Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    /// Creates the view from generic record data.
    #[must_use]
    pub fn from_rdata(rdata: &Rdata) -> Option<Self> {
        if rdata.rtype() != Rtype::DS {
            return None;
        }
        match rdata.fields() {
            [RdataField::Int16(key_tag), RdataField::Alg(algorithm), RdataField::Int8(digest_type), RdataField::Hex(digest)] => {
                Some(Ds::new(
                    *key_tag,
                    *algorithm,
                    DigestAlg::from_int(*digest_type),
                    digest.clone(),
                ))
            }
            _ => None,
        }
    }

    /// Converts the view into generic record data.
    #[must_use]
    pub fn into_rdata(self) -> Rdata {
        Rdata {
            rtype: Rtype::DS,
            fields: vec![
                RdataField::Int16(self.key_tag),
                RdataField::Alg(self.algorithm),
                RdataField::Int8(self.digest_type.to_int()),
                RdataField::Hex(self.digest),
            ],
        }
    }

    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    pub fn digest_type(&self) -> DigestAlg {
        self.digest_type
    }

    pub fn digest(&self) -> &Bytes {
        &self.digest
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::wire::Parser;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use core::str::FromStr;

    // The RSA/SHA-1 zone key from the example zone in RFC 4035, Appendix A.
    const EXAMPLE_KEY: &str = "AQOy1bZVvpPqhg4j7EJoM9rI3ZmyEx2OzDBVrZy/lvI5CQePxXHZS4i8dANH4DX3tbHol61ek8EFMcsGXxKciJFHyhl94C+NwILQdzsUlSFovBZsyl/NX6yEbtw/xN9ZNcrbYvgjjZ/UVPZIySFNsgEYvh0z2542lzMKR4Dh8uZffQ==";

    fn example_key() -> Dnskey {
        Dnskey::new(
            256,
            3,
            SecAlg::RSASHA1,
            BASE64.decode(EXAMPLE_KEY).unwrap().into(),
        )
    }

    #[test]
    fn dnskey_key_tag() {
        let key = example_key();
        assert_eq!(key.key_tag(), 38519);
        assert!(key.is_zone_key());
        assert!(!key.is_secure_entry_point());
        assert!(!key.is_revoked());
    }

    #[test]
    fn rsamd5_key_tag() {
        let rdata = b"\x01\x00\x03\x01\x03\x01\x00\x01\xAB\xCD\xEF";
        assert_eq!(key_tag(rdata), 0xABCD);
        assert_eq!(key_tag(b"\x01\x00\x03\x01"), 0);
    }

    #[test]
    fn key_tag_fold() {
        // 0xFFFF + 0xFFFF + 0x0002 = 0x20000, folded to 0x0002.
        assert_eq!(key_tag(b"\xFF\xFF\xFF\xFF\x00\x02"), 0x0002);
        assert_eq!(key_tag(b"\x01"), 0x0100);
    }

    #[test]
    fn dnskey_rdata_round_trip() {
        let key = example_key();
        let rdata = key.clone().into_rdata();
        let wire = {
            let mut buf = Vec::new();
            rdata.compose(&mut buf).unwrap();
            buf
        };
        assert_eq!(wire, key.to_vec());
        let mut parser = Parser::from_ref(wire.as_slice());
        let parsed = Rdata::parse(Rtype::DNSKEY, &mut parser, wire.len()).unwrap();
        assert_eq!(Dnskey::from_rdata(&parsed), Some(key));
        assert_eq!(Rrsig::from_rdata(&parsed), None);
    }

    #[test]
    fn rrsig_head() {
        let rrsig = Rrsig::new(
            Rtype::MX,
            SecAlg::RSASHA1,
            2,
            3600,
            Timestamp::from_str("20040509183619").unwrap(),
            Timestamp::from_str("20040409183619").unwrap(),
            38519,
            Dname::from_str("Example").unwrap(),
            Bytes::from_static(b"sig"),
        );
        let mut buf = Vec::new();
        rrsig.compose_canonical_head(&mut buf).unwrap();
        assert_eq!(
            buf,
            b"\x00\x0f\x05\x02\x00\x00\x0e\x10\x40\x9e\x7a\x23\x40\x76\xed\x23\
              \x96\x77\x07example\0"
        );
        let rdata = rrsig.clone().into_rdata();
        assert_eq!(Rrsig::from_rdata(&rdata), Some(rrsig));
    }

    #[cfg(feature = "validate")]
    #[test]
    fn dnskey_digest() {
        let key = example_key();
        let owner = Dname::from_str("example").unwrap();
        let ds = key.digest(&owner, DigestAlg::SHA256).unwrap();
        assert_eq!(ds.key_tag(), 38519);
        assert_eq!(ds.algorithm(), SecAlg::RSASHA1);
        assert_eq!(ds.digest().len(), 32);
        assert_eq!(ds.digest_type(), DigestAlg::SHA256);
        let sha1 = key.digest(&owner, DigestAlg::SHA1).unwrap();
        assert_eq!(sha1.digest().len(), 20);
        assert!(key.digest(&owner, DigestAlg::GOST).is_none());
        let rdata = ds.clone().into_rdata();
        assert_eq!(Ds::from_rdata(&rdata), Some(ds));
    }
}
