//! Verifying RRSIG signatures over RRsets.
//!
//! The entry point is [`verify`] which checks an RRset against an RRSIG
//! record using a set of candidate DNSKEY records. Verification is a pure
//! function of its input including the reference time, so there is no
//! implicit clock.

use core::cmp::Ordering;
use core::fmt;

use tracing::{debug, trace};

use super::common::{signed_data, uniform_rrset, Algorithm};
use super::key::PublicKey;
use crate::base::record::Record;
use crate::base::serial::Timestamp;
use crate::rdata::{Dnskey, Rrsig};

//------------ VerifyResult --------------------------------------------------

/// The outcome of verifying an RRset.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VerifyResult {
    /// The signature was verified with one of the keys.
    Valid,

    /// The signature did not verify with any candidate key.
    ///
    /// This is also the result for malformed input, such as an RRset whose
    /// records don’t share owner, class, and type.
    Invalid,

    /// None of the keys matches the algorithm and key tag of the RRSIG.
    NoMatchingKey,

    /// The algorithm of the RRSIG isn’t supported.
    UnsupportedAlgorithm,

    /// The reference time is after the expiration time of the RRSIG.
    Expired,

    /// The reference time is before the inception time of the RRSIG.
    NotYetValid,
}

impl VerifyResult {
    /// Returns whether the result is `Valid`.
    pub fn is_valid(self) -> bool {
        matches!(self, VerifyResult::Valid)
    }
}

impl fmt::Display for VerifyResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            VerifyResult::Valid => "valid",
            VerifyResult::Invalid => "invalid",
            VerifyResult::NoMatchingKey => "no matching key",
            VerifyResult::UnsupportedAlgorithm => "unsupported algorithm",
            VerifyResult::Expired => "signature expired",
            VerifyResult::NotYetValid => "signature not yet valid",
        })
    }
}

//------------ verify --------------------------------------------------------

/// Verifies an RRset against an RRSIG record.
///
/// Only those records of `keys` are tried that are DNSKEY records with
/// the algorithm and key tag given in the RRSIG. If any of them verifies
/// the signature, the result is [`VerifyResult::Valid`].
///
/// The validity period of the RRSIG is checked against `now` using serial
/// number arithmetic before any cryptographic work is done.
///
/// The order of the records in `rrset` doesn’t matter.
pub fn verify(
    rrset: &[Record],
    rrsig: &Record,
    keys: &[Record],
    now: Timestamp,
) -> VerifyResult {
    let (sig, algorithm) = match check_rrsig(rrsig, now) {
        Ok(res) => res,
        Err(res) => return res,
    };
    let candidates: Vec<Dnskey> = keys
        .iter()
        .filter_map(|record| Dnskey::from_rdata(record.data()))
        .filter(|key| {
            key.algorithm() == sig.algorithm()
                && key.key_tag() == sig.key_tag()
        })
        .collect();
    if candidates.is_empty() {
        debug!(
            "no DNSKEY with algorithm {} and key tag {} for RRSIG at {}",
            algorithm,
            sig.key_tag(),
            rrsig.owner()
        );
        return VerifyResult::NoMatchingKey;
    }
    verify_candidates(rrset, rrsig, &sig, &candidates)
}

/// Verifies an RRset against an RRSIG record using a single key.
///
/// Unlike [`verify`], this does not compare the key tag of the key with
/// the one in the RRSIG. It still requires the key to be a DNSKEY record
/// of the algorithm of the RRSIG.
pub fn verify_with_key(
    rrset: &[Record],
    rrsig: &Record,
    key: &Record,
    now: Timestamp,
) -> VerifyResult {
    let (sig, _) = match check_rrsig(rrsig, now) {
        Ok(res) => res,
        Err(res) => return res,
    };
    match Dnskey::from_rdata(key.data()) {
        Some(dnskey) if dnskey.algorithm() == sig.algorithm() => {
            verify_candidates(rrset, rrsig, &sig, &[dnskey])
        }
        _ => VerifyResult::NoMatchingKey,
    }
}

/// Performs the checks of the RRSIG that don’t need a key.
fn check_rrsig(
    rrsig: &Record,
    now: Timestamp,
) -> Result<(Rrsig, Algorithm), VerifyResult> {
    let sig = match Rrsig::from_rdata(rrsig.data()) {
        Some(sig) => sig,
        None => {
            debug!("record at {} is not an RRSIG", rrsig.owner());
            return Err(VerifyResult::Invalid);
        }
    };
    let algorithm = match Algorithm::from_secalg(sig.algorithm()) {
        Some(algorithm) => algorithm,
        None => {
            debug!("unsupported RRSIG algorithm {}", sig.algorithm());
            return Err(VerifyResult::UnsupportedAlgorithm);
        }
    };
    // Times that can't be ordered relative to a bound are outside.
    if !matches!(
        now.partial_cmp(&sig.inception()),
        Some(Ordering::Equal | Ordering::Greater)
    ) {
        debug!("RRSIG at {} not valid before {}", rrsig.owner(), sig.inception());
        return Err(VerifyResult::NotYetValid);
    }
    if !matches!(
        now.partial_cmp(&sig.expiration()),
        Some(Ordering::Equal | Ordering::Less)
    ) {
        debug!("RRSIG at {} expired at {}", rrsig.owner(), sig.expiration());
        return Err(VerifyResult::Expired);
    }
    Ok((sig, algorithm))
}

/// Verifies the RRset with each of the candidate keys.
fn verify_candidates(
    rrset: &[Record],
    rrsig: &Record,
    sig: &Rrsig,
    candidates: &[Dnskey],
) -> VerifyResult {
    // The RRset must be a proper RRset covered by the RRSIG.
    let first = match uniform_rrset(rrset) {
        Ok(first) => first,
        Err(err) => {
            debug!("cannot verify RRSIG at {}: {}", rrsig.owner(), err);
            return VerifyResult::Invalid;
        }
    };
    if first.rtype() != sig.type_covered()
        || first.class() != rrsig.class()
        || first.owner() != rrsig.owner()
        || sig.labels() > first.owner().rrsig_label_count()
    {
        debug!(
            "RRSIG at {} does not cover RRset {} {}",
            rrsig.owner(),
            first.owner(),
            first.rtype()
        );
        return VerifyResult::Invalid;
    }

    let data = match signed_data(sig, rrset) {
        Ok(data) => data,
        Err(err) => {
            debug!("failed to build signed data: {}", err);
            return VerifyResult::Invalid;
        }
    };

    for dnskey in candidates {
        let key = match PublicKey::from_dnskey(dnskey) {
            Ok(key) => key,
            Err(err) => {
                trace!("skipping DNSKEY {}: {}", dnskey.key_tag(), err);
                continue;
            }
        };
        match key.verify(&data, sig.signature()) {
            Ok(()) => {
                trace!(
                    "RRset {} {} verified with key {}",
                    first.owner(),
                    first.rtype(),
                    dnskey.key_tag()
                );
                return VerifyResult::Valid;
            }
            Err(err) => {
                trace!("DNSKEY {} failed: {}", dnskey.key_tag(), err);
            }
        }
    }
    VerifyResult::Invalid
}

//============ Testing =======================================================
