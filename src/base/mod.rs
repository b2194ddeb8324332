//! Basics.
//!
//! This module provides the types for working with DNS data and for
//! converting DNS messages from and into their wire format.
//!
//! A [`Message`] owns its [`Header`], a list of [`Question`]s, and three
//! lists of [`Record`]s for the answer, authority, and additional
//! sections. It is created from wire format via [`Message::decode`] and
//! turned back into wire format via [`Message::encode`].
//!
//!
//! ## Parsing and Composing
//!
//! In order to easily distinguish the process of creating and dissecting
//! wire-format messages from other forms of representation conversion, we
//! use the term *parsing* for extracting data from a wire-format
//! representation and *composing* for producing such a representation.
//!
//! Parsing always happens on a buffer holding a complete DNS message,
//! since compressed domain names may refer to any earlier part of the
//! message. All parsing goes through the bounds-checked [`Parser`] from the
//! [wire] module, so malformed or hostile input can only ever lead to an
//! error. Composing never compresses names.
//!
//!
//! # Types for DNS Data
//!
//! The module contains a number of types for DNS data, arranged in
//! submodules:
//!
//! * [header] for the header of DNS messages,
//! * [iana] for the various registry values such as record types,
//! * [name] for domain names,
//! * [question] for questions,
//! * [record] for DNS resource records, and
//! * [serial] for serial numbers and the time values of RRSIG and TSIG
//!   records.
//!
//! The data of resource records lives in the top-level [rdata] module.
//!
//! [rdata]: crate::rdata
//! [`Parser`]: wire::Parser

pub use self::header::{Header, HeaderCounts, HeaderSection};
pub use self::iana::{Class, Opcode, Rcode, Rtype, SecAlg};
pub use self::message::{Message, Section};
pub use self::name::Dname;
pub use self::question::Question;
pub use self::record::Record;
pub use self::serial::{Serial, Time48, Timestamp};
pub use self::wire::{ComposeError, ParseError};

pub mod header;
pub mod iana;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod serial;
pub mod wire;
