//! A DNS message library for Rust.
//!
//! This crate provides a typed, in-memory representation of DNS messages,
//! converts it from and into the wire format, and performs the
//! cryptographic operations of DNSSEC and TSIG over it.
//!
//! The crate uses feature flags to allow you to select only those modules
//! you need for your particular project. The feature names are equal to the
//! module they enable.
//!
//! # Modules
//!
//! A set of modules providing fundamental types and functionality is always
//! enabled:
//!
//! * [base] contains the types for DNS messages, their header, questions,
//!   records, and domain names as well as the wire format codec,
//! * [rdata] contains record data as a sequence of typed fields plus typed
//!   views for the DNSSEC and TSIG record types, and
//! * [utils] contains a few helpers.
//!
//! In addition, there are a number of modules that can be enabled through
//! feature flags. All of them are enabled by default:
//!
#![cfg_attr(feature = "validate", doc = "* [dnssec]:")]
#![cfg_attr(not(feature = "validate"), doc = "* dnssec:")]
//!   Verifying RRSIG records over RRsets for the RSA and DSA algorithms
//!   and, with the `sign` feature, creating them.
#![cfg_attr(feature = "tsig", doc = "* [tsig]:")]
#![cfg_attr(not(feature = "tsig"), doc = "* tsig:")]
//!   Support for securing DNS messages with TSIG records.
//!
//!
//! # Reference of Feature Flags
//!
//! * `rand`: Enables creating random message IDs via
//!   [`Header::set_random_id`][base::Header::set_random_id].
//! * `validate`: DNSSEC validation using the
//!   [OpenSSL](https://www.openssl.org/) and
//!   [ring](https://github.com/briansmith/ring) crates.
//! * `sign`: DNSSEC signing. This enables the `validate` feature.
//! * `tsig`: signing and validating messages via TSIG.
//!
//! # Example
//!
//! ```
//! use core::str::FromStr;
//! use dnsmsg::base::{Dname, Message, Rtype};
//!
//! let mut msg = Message::new();
//! msg.header_mut().set_id(0x1234);
//! msg.header_mut().set_rd(true);
//! msg.push_question((Dname::from_str("example.com").unwrap(), Rtype::A));
//!
//! let wire = dnsmsg::encode(&msg).unwrap();
//! assert_eq!(dnsmsg::decode(&wire).unwrap(), msg);
//! ```

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
#[cfg(feature = "validate")]
pub mod dnssec;
pub mod rdata;
#[cfg(feature = "tsig")]
pub mod tsig;
pub mod utils;

#[cfg(test)]
mod logging;

use base::message::Message;
use base::wire::{ComposeError, ParseError};

/// Decodes a DNS message from its wire format.
///
/// This is a shortcut for [`Message::decode`].
pub fn decode(octets: &[u8]) -> Result<Message, ParseError> {
    Message::decode(octets)
}

/// Encodes a DNS message into its wire format.
///
/// This is a shortcut for [`Message::encode`].
pub fn encode(message: &Message) -> Result<Vec<u8>, ComposeError> {
    message.encode()
}
