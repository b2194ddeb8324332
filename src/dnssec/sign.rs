//! Signing RRsets.
//!
//! A [`SigningKey`] wraps an OpenSSL private key together with the DNSSEC
//! algorithm it is used with. [`sign_rrset`] produces an RRSIG record for
//! an RRset using the same signed data construction as the validator, so
//! its output is always accepted by [`verify`][super::validator::verify]
//! given the matching DNSKEY.

use core::fmt;
use std::vec::Vec;

use bytes::Bytes;
use openssl::dsa::{Dsa, DsaSig};
use openssl::error::ErrorStack;
use openssl::pkey::{Id, PKey, Private};
use openssl::rsa::{Padding, Rsa};
use openssl::sign::Signer;
use tracing::debug;

use super::common::{signed_data, uniform_rrset, Algorithm, RrsetError};
use super::key::PublicKey;
use crate::base::name::Dname;
use crate::base::record::Record;
use crate::base::serial::Timestamp;
use crate::base::wire::ComposeError;
use crate::rdata::{Dnskey, Rrsig};

/// The length of the DSA subprime Q and of the R and S values.
const DSA_Q_LEN: usize = 20;

//------------ SigningKey ----------------------------------------------------

/// A private key for signing RRsets.
#[derive(Clone, Debug)]
pub struct SigningKey {
    /// The algorithm the key is used with.
    algorithm: Algorithm,

    /// The private key.
    pkey: PKey<Private>,
}

/// # Creation
///
impl SigningKey {
    /// Creates a signing key from an existing OpenSSL key.
    ///
    /// The key must be an RSA key for the RSA algorithms and a DSA key for
    /// the DSA algorithms.
    pub fn from_pkey(
        algorithm: Algorithm,
        pkey: PKey<Private>,
    ) -> Result<Self, SignError> {
        let expected = if algorithm.is_rsa() { Id::RSA } else { Id::DSA };
        if pkey.id() != expected {
            return Err(SignError::InvalidKey);
        }
        Ok(SigningKey { algorithm, pkey })
    }

    /// Generates a new RSA key with a modulus of `bits` bits.
    pub fn generate_rsa(
        algorithm: Algorithm,
        bits: u32,
    ) -> Result<Self, SignError> {
        if !algorithm.is_rsa() {
            return Err(SignError::UnsupportedAlgorithm);
        }
        let pkey = PKey::from_rsa(Rsa::generate(bits)?)?;
        Ok(SigningKey { algorithm, pkey })
    }

    /// Generates a new DSA key with a prime of `bits` bits.
    ///
    /// DNSSEC allows primes between 512 and 1024 bits in steps of 64 bits.
    pub fn generate_dsa(
        algorithm: Algorithm,
        bits: u32,
    ) -> Result<Self, SignError> {
        if algorithm.is_rsa() {
            return Err(SignError::UnsupportedAlgorithm);
        }
        if !(512..=1024).contains(&bits) || bits % 64 != 0 {
            return Err(SignError::InvalidKey);
        }
        let pkey = PKey::from_dsa(Dsa::generate(bits)?)?;
        Ok(SigningKey { algorithm, pkey })
    }
}

/// # Access and Signing
///
impl SigningKey {
    /// Returns the algorithm of the key.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the public part of the key.
    pub fn public_key(&self) -> Result<PublicKey, SignError> {
        if self.algorithm.is_rsa() {
            let rsa = self.pkey.rsa()?;
            Ok(PublicKey::Rsa {
                algorithm: self.algorithm,
                exponent: rsa.e().to_vec().into(),
                modulus: rsa.n().to_vec().into(),
            })
        } else {
            let dsa = self.pkey.dsa()?;
            let p_len = usize::try_from(dsa.p().num_bytes())
                .map_err(|_| SignError::InvalidKey)?;
            let t = dsa_t(p_len).ok_or(SignError::InvalidKey)?;
            let padded = |len: usize, num: &openssl::bn::BigNumRef| {
                i32::try_from(len)
                    .map_err(|_| SignError::InvalidKey)
                    .and_then(|len| Ok(num.to_vec_padded(len)?))
                    .map(Bytes::from)
            };
            Ok(PublicKey::Dsa {
                algorithm: self.algorithm,
                t,
                q: padded(DSA_Q_LEN, dsa.q())?,
                p: padded(p_len, dsa.p())?,
                g: padded(p_len, dsa.g())?,
                y: padded(p_len, dsa.pub_key())?,
            })
        }
    }

    /// Returns the DNSKEY record data for the key.
    pub fn dnskey(&self, flags: u16) -> Result<Dnskey, SignError> {
        Ok(self.public_key()?.to_dnskey(flags))
    }

    /// Signs some data.
    ///
    /// Returns the signature in the format used by RRSIG records.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignError> {
        let mut signer = Signer::new(self.algorithm.digest(), &self.pkey)?;
        if self.algorithm.is_rsa() {
            signer.set_rsa_padding(Padding::PKCS1)?;
            return Ok(signer.sign_oneshot_to_vec(data)?);
        }

        // Convert from DER to T | R | S.
        let der = signer.sign_oneshot_to_vec(data)?;
        let sig = DsaSig::from_der(&der)?;
        let p_len = usize::try_from(self.pkey.dsa()?.p().num_bytes())
            .map_err(|_| SignError::InvalidKey)?;
        let mut res = Vec::with_capacity(1 + 2 * DSA_Q_LEN);
        res.push(dsa_t(p_len).ok_or(SignError::InvalidKey)?);
        res.extend_from_slice(&sig.r().to_vec_padded(DSA_Q_LEN as i32)?);
        res.extend_from_slice(&sig.s().to_vec_padded(DSA_Q_LEN as i32)?);
        Ok(res)
    }
}

/// Returns the DSA size parameter T for a prime of `p_len` octets.
fn dsa_t(p_len: usize) -> Option<u8> {
    if p_len < 64 || (p_len - 64) % 8 != 0 {
        return None;
    }
    u8::try_from((p_len - 64) / 8).ok().filter(|t| *t <= 8)
}

//------------ sign_rrset ----------------------------------------------------

/// Creates an RRSIG record for an RRset.
///
/// The owner, class, and TTL of the RRSIG record as well as the original
/// TTL are taken from the first record of the RRset. The labels field is
/// the label count of the owner, so wildcard owners are handled. The key
/// tag is calculated from the DNSKEY record data the key produces with the
/// given flags.
pub fn sign_rrset(
    rrset: &[Record],
    key: &SigningKey,
    key_flags: u16,
    inception: Timestamp,
    expiration: Timestamp,
    signer_name: &Dname,
) -> Result<Record, SignError> {
    let first = uniform_rrset(rrset)?;
    let key_tag = key.dnskey(key_flags)?.key_tag();
    let mut rrsig = Rrsig::new(
        first.rtype(),
        key.algorithm().to_secalg(),
        first.owner().rrsig_label_count(),
        first.ttl(),
        expiration,
        inception,
        key_tag,
        signer_name.clone(),
        Bytes::new(),
    );
    let data = signed_data(&rrsig, rrset)?;
    rrsig.set_signature(key.sign(&data)?.into());
    debug!(
        "signed RRset {} {} with {} key {}",
        first.owner(),
        first.rtype(),
        key.algorithm(),
        key_tag
    );
    Ok(Record::new(
        first.owner().clone(),
        first.class(),
        first.ttl(),
        rrsig.into_rdata(),
    ))
}

//============ Error Types ===================================================

//------------ SignError -----------------------------------------------------

/// Signing an RRset failed.
#[derive(Clone, Debug)]
pub enum SignError {
    /// The key cannot be used with the requested algorithm.
    UnsupportedAlgorithm,

    /// The key doesn’t have a shape DNSSEC can express.
    InvalidKey,

    /// The RRset was empty.
    EmptyRrset,

    /// The records differ in owner, class, or type.
    MixedRrset,

    /// The signed data couldn’t be assembled.
    Compose(ComposeError),

    /// OpenSSL reported an error.
    Crypto(ErrorStack),
}

impl From<ErrorStack> for SignError {
    fn from(err: ErrorStack) -> Self {
        SignError::Crypto(err)
    }
}

impl From<ComposeError> for SignError {
    fn from(err: ComposeError) -> Self {
        SignError::Compose(err)
    }
}

impl From<RrsetError> for SignError {
    fn from(err: RrsetError) -> Self {
        match err {
            RrsetError::Empty => SignError::EmptyRrset,
            RrsetError::Mixed => SignError::MixedRrset,
        }
    }
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SignError::UnsupportedAlgorithm => {
                f.write_str("unsupported algorithm")
            }
            SignError::InvalidKey => f.write_str("invalid key"),
            SignError::EmptyRrset => f.write_str("empty RRset"),
            SignError::MixedRrset => {
                f.write_str("records do not form an RRset")
            }
            SignError::Compose(ref err) => {
                write!(f, "cannot assemble signed data: {}", err)
            }
            SignError::Crypto(ref err) => write!(f, "crypto error: {}", err),
        }
    }
}

impl std::error::Error for SignError {}

//============ Testing =======================================================
