//! Public keys for DNSSEC.
//!
//! A DNSKEY record carries the public key as an algorithm-specific octets
//! blob. [`PublicKey`] is the parsed form of such a blob for the RSA and
//! DSA algorithms. It can verify signatures via OpenSSL.
//!
//! The key tag calculation works on the record data alone and lives with
//! the record data types. It is re-exported here as [`key_tag`].

use core::fmt;
use std::vec::Vec;

use bytes::Bytes;
use openssl::bn::BigNum;
use openssl::dsa::{Dsa, DsaSig};
use openssl::error::ErrorStack;
use openssl::pkey::{PKey, Public};
use openssl::rsa::Rsa;
use openssl::sign::Verifier;

use super::common::Algorithm;
use crate::base::iana::SecAlg;
use crate::base::wire::{parse_bytes, parse_remaining, Parse, Parser};
use crate::rdata::Dnskey;

pub use crate::rdata::dnssec::key_tag;

/// The length of the DSA subprime Q and the R and S signature values.
const DSA_Q_LEN: usize = 20;

/// The largest value of the DSA T parameter.
const DSA_MAX_T: u8 = 8;

//------------ PublicKey -----------------------------------------------------

/// A parsed DNSSEC public key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PublicKey {
    /// An RSA key as defined in [RFC 3110].
    ///
    /// [RFC 3110]: https://tools.ietf.org/html/rfc3110
    Rsa {
        algorithm: Algorithm,
        exponent: Bytes,
        modulus: Bytes,
    },

    /// A DSA key as defined in [RFC 2536].
    ///
    /// The length of `p`, `g`, and `y` is `64 + 8 * t` octets each.
    ///
    /// [RFC 2536]: https://tools.ietf.org/html/rfc2536
    Dsa {
        algorithm: Algorithm,
        t: u8,
        q: Bytes,
        p: Bytes,
        g: Bytes,
        y: Bytes,
    },
}

impl PublicKey {
    /// Parses the public key blob of a DNSKEY record.
    pub fn from_dnskey_rdata(
        algorithm: SecAlg,
        raw: &[u8],
    ) -> Result<Self, KeyError> {
        let algorithm = Algorithm::from_secalg(algorithm)
            .ok_or(KeyError::UnsupportedAlgorithm)?;
        let mut parser = Parser::from_ref(raw);
        let res = if algorithm.is_rsa() {
            Self::parse_rsa(algorithm, &mut parser)
        } else {
            Self::parse_dsa(algorithm, &mut parser)
        };
        res.map_err(|_| KeyError::InvalidKey)
    }

    /// Creates a public key from DNSKEY record data.
    pub fn from_dnskey(dnskey: &Dnskey) -> Result<Self, KeyError> {
        Self::from_dnskey_rdata(dnskey.algorithm(), dnskey.public_key())
    }

    fn parse_rsa(
        algorithm: Algorithm,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Self, KeyError> {
        let exp_len = match u8::parse(parser)? {
            0 => usize::from(u16::parse(parser)?),
            len => usize::from(len),
        };
        let exponent = parse_bytes(parser, exp_len)?;
        let modulus = parse_remaining(parser)?;
        if exponent.is_empty() || modulus.is_empty() {
            return Err(KeyError::InvalidKey);
        }
        Ok(PublicKey::Rsa {
            algorithm,
            exponent,
            modulus,
        })
    }

    fn parse_dsa(
        algorithm: Algorithm,
        parser: &mut Parser<'_, [u8]>,
    ) -> Result<Self, KeyError> {
        let t = u8::parse(parser)?;
        if t > DSA_MAX_T {
            return Err(KeyError::InvalidKey);
        }
        let len = 64 + 8 * usize::from(t);
        let q = parse_bytes(parser, DSA_Q_LEN)?;
        let p = parse_bytes(parser, len)?;
        let g = parse_bytes(parser, len)?;
        let y = parse_bytes(parser, len)?;
        if parser.remaining() != 0 {
            return Err(KeyError::InvalidKey);
        }
        Ok(PublicKey::Dsa {
            algorithm,
            t,
            q,
            p,
            g,
            y,
        })
    }

    /// Returns the algorithm of the key.
    pub fn algorithm(&self) -> Algorithm {
        match *self {
            PublicKey::Rsa { algorithm, .. }
            | PublicKey::Dsa { algorithm, .. } => algorithm,
        }
    }

    /// Returns the public key blob for a DNSKEY record.
    pub fn to_dnskey_rdata(&self) -> Vec<u8> {
        let mut res = Vec::new();
        match *self {
            PublicKey::Rsa {
                ref exponent,
                ref modulus,
                ..
            } => {
                match u8::try_from(exponent.len()) {
                    Ok(len) if len > 0 => res.push(len),
                    _ => {
                        // RSA exponents are much shorter than 64 KiB.
                        let len = exponent.len() as u16;
                        res.push(0);
                        res.extend_from_slice(&len.to_be_bytes());
                    }
                }
                res.extend_from_slice(exponent);
                res.extend_from_slice(modulus);
            }
            PublicKey::Dsa {
                t,
                ref q,
                ref p,
                ref g,
                ref y,
                ..
            } => {
                res.push(t);
                res.extend_from_slice(q);
                res.extend_from_slice(p);
                res.extend_from_slice(g);
                res.extend_from_slice(y);
            }
        }
        res
    }

    /// Returns DNSKEY record data for the key with the given flags.
    pub fn to_dnskey(&self, flags: u16) -> Dnskey {
        Dnskey::new(
            flags,
            Dnskey::PROTOCOL,
            self.algorithm().to_secalg(),
            self.to_dnskey_rdata().into(),
        )
    }

    /// Verifies a signature over some signed data.
    ///
    /// The signature is in the format used by RRSIG records: the raw
    /// signature value for RSA and `T | R | S` for DSA.
    pub fn verify(
        &self,
        signed_data: &[u8],
        signature: &[u8],
    ) -> Result<(), AlgorithmError> {
        let valid = match *self {
            PublicKey::Rsa { .. } => {
                let pkey = self.to_pkey()?;
                let mut verifier =
                    Verifier::new(self.algorithm().digest(), &pkey)?;
                verifier.verify_oneshot(signature, signed_data)?
            }
            PublicKey::Dsa { .. } => {
                // T is informational only, R and S follow.
                if signature.len() != 1 + 2 * DSA_Q_LEN {
                    return Err(AlgorithmError::BadSig);
                }
                let r = BigNum::from_slice(&signature[1..1 + DSA_Q_LEN])?;
                let s = BigNum::from_slice(&signature[1 + DSA_Q_LEN..])?;
                let der = DsaSig::from_private_components(r, s)?.to_der()?;
                let pkey = self.to_pkey()?;
                let mut verifier =
                    Verifier::new(self.algorithm().digest(), &pkey)?;
                verifier.verify_oneshot(&der, signed_data)?
            }
        };
        if valid {
            Ok(())
        } else {
            Err(AlgorithmError::BadSig)
        }
    }

    /// Converts the key into an OpenSSL public key.
    fn to_pkey(&self) -> Result<PKey<Public>, ErrorStack> {
        match *self {
            PublicKey::Rsa {
                ref exponent,
                ref modulus,
                ..
            } => {
                let rsa = Rsa::from_public_components(
                    BigNum::from_slice(modulus)?,
                    BigNum::from_slice(exponent)?,
                )?;
                PKey::from_rsa(rsa)
            }
            PublicKey::Dsa {
                ref q,
                ref p,
                ref g,
                ref y,
                ..
            } => {
                let dsa = Dsa::from_public_components(
                    BigNum::from_slice(p)?,
                    BigNum::from_slice(q)?,
                    BigNum::from_slice(g)?,
                    BigNum::from_slice(y)?,
                )?;
                PKey::from_dsa(dsa)
            }
        }
    }
}

//============ Error Types ===================================================

//------------ KeyError ------------------------------------------------------

/// A public key blob couldn’t be parsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyError {
    /// The algorithm is neither an RSA nor a DSA algorithm.
    UnsupportedAlgorithm,

    /// The key blob is malformed.
    InvalidKey,
}

impl From<crate::base::wire::ParseError> for KeyError {
    fn from(_: crate::base::wire::ParseError) -> Self {
        KeyError::InvalidKey
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            KeyError::UnsupportedAlgorithm => "unsupported algorithm",
            KeyError::InvalidKey => "malformed public key",
        })
    }
}

impl std::error::Error for KeyError {}

//------------ AlgorithmError ------------------------------------------------

/// An algorithm error during verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlgorithmError {
    /// The signature didn’t verify.
    BadSig,

    /// The key or signature was rejected by the crypto library.
    InvalidData,
}

impl From<ErrorStack> for AlgorithmError {
    fn from(_: ErrorStack) -> Self {
        AlgorithmError::InvalidData
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            AlgorithmError::BadSig => "bad signature",
            AlgorithmError::InvalidData => "invalid data",
        })
    }
}

impl std::error::Error for AlgorithmError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use rstest::rstest;

    const EXAMPLE_KEY: &str = "AQOy1bZVvpPqhg4j7EJoM9rI3ZmyEx2OzDBVrZy/lvI5CQePxXHZS4i8dANH4DX3tbHol61ek8EFMcsGXxKciJFHyhl94C+NwILQdzsUlSFovBZsyl/NX6yEbtw/xN9ZNcrbYvgjjZ/UVPZIySFNsgEYvh0z2542lzMKR4Dh8uZffQ==";

    #[test]
    fn rsa_key() {
        let raw = BASE64.decode(EXAMPLE_KEY).unwrap();
        let key = PublicKey::from_dnskey_rdata(SecAlg::RSASHA1, &raw).unwrap();
        match key {
            PublicKey::Rsa {
                algorithm,
                ref exponent,
                ref modulus,
            } => {
                assert_eq!(algorithm, Algorithm::RsaSha1);
                assert_eq!(exponent.as_ref(), b"\x03");
                assert_eq!(modulus.len(), raw.len() - 2);
            }
            _ => panic!("not an RSA key"),
        }
        assert_eq!(key.to_dnskey_rdata(), raw);
        assert_eq!(key.to_dnskey(256).key_tag(), 38519);
    }

    #[test]
    fn rsa_long_exponent_len() {
        let raw = b"\x00\x00\x03\x01\x00\x01\xAB\xCD";
        let key = PublicKey::from_dnskey_rdata(SecAlg::RSASHA256, raw).unwrap();
        assert_eq!(key.to_dnskey_rdata(), b"\x03\x01\x00\x01\xAB\xCD");
    }

    #[rstest]
    #[case(b"")]
    #[case(b"\x04\x01\x00\x01")]
    #[case(b"\x00\x01")]
    #[case(b"\x03\x01\x00\x01")]
    fn rsa_malformed(#[case] raw: &[u8]) {
        assert_eq!(
            PublicKey::from_dnskey_rdata(SecAlg::RSASHA1, raw),
            Err(KeyError::InvalidKey)
        );
    }

    #[test]
    fn dsa_layout() {
        let mut raw = vec![0u8];
        raw.extend_from_slice(&[1; 20]);
        raw.extend_from_slice(&[2; 64]);
        raw.extend_from_slice(&[3; 64]);
        raw.extend_from_slice(&[4; 64]);
        let key = PublicKey::from_dnskey_rdata(SecAlg::DSA, &raw).unwrap();
        match key {
            PublicKey::Dsa {
                t,
                ref q,
                ref p,
                ref g,
                ref y,
                ..
            } => {
                assert_eq!(t, 0);
                assert_eq!(q.as_ref(), &[1; 20]);
                assert_eq!(p.as_ref(), &[2; 64]);
                assert_eq!(g.as_ref(), &[3; 64]);
                assert_eq!(y.as_ref(), &[4; 64]);
            }
            _ => panic!("not a DSA key"),
        }
        assert_eq!(key.to_dnskey_rdata(), raw);

        raw.push(0);
        assert_eq!(
            PublicKey::from_dnskey_rdata(SecAlg::DSA, &raw),
            Err(KeyError::InvalidKey)
        );
        raw.truncate(100);
        assert_eq!(
            PublicKey::from_dnskey_rdata(SecAlg::DSA, &raw),
            Err(KeyError::InvalidKey)
        );
        raw[0] = 9;
        assert_eq!(
            PublicKey::from_dnskey_rdata(SecAlg::DSA, &raw),
            Err(KeyError::InvalidKey)
        );
    }

    #[test]
    fn unsupported() {
        assert_eq!(
            PublicKey::from_dnskey_rdata(SecAlg::ECDSAP256SHA256, b"\x01\x02"),
            Err(KeyError::UnsupportedAlgorithm)
        );
        assert_eq!(
            PublicKey::from_dnskey_rdata(SecAlg::ED25519, &[0; 32]),
            Err(KeyError::UnsupportedAlgorithm)
        );
    }
}
