//! DNSSEC validation and signing.
//!
//! This module implements the cryptographic part of DNSSEC for the RSA and
//! DSA algorithms: verifying an RRSIG over an RRset with a set of DNSKEY
//! records and, with the `sign` feature, creating such RRSIGs.
//!
//! Chain-of-trust building and authenticated denial of existence are not
//! part of this module. It only answers whether a given signature is valid
//! for a given RRset at a given time.
//!
//! * [`common`] defines the supported [`Algorithm`]s and the signed data
//!   both sides agree on,
//! * [`key`] parses public keys from DNSKEY record data,
//! * [`validator`] verifies RRSIG records, and
//! * `sign` creates them.

pub use self::common::Algorithm;
pub use self::key::{key_tag, PublicKey};
pub use self::validator::{verify, verify_with_key, VerifyResult};

pub mod common;
pub mod key;
#[cfg(feature = "sign")]
pub mod sign;
pub mod validator;
