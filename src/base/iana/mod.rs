//! IANA Definitions for DNS.
//!
//! This module contains types for parameters defined in IANA registries
//! that are relevant for this crate.
//!
//! All types defined hereunder follow the same basic structure. They are
//! newtypes around the raw integer with associated constants for all
//! well-defined values. Since unknown values must survive a round trip
//! through the wire format, any integer value can be represented.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. `FromStr` and `Display` are implemented to convert from
//! the string codes to the values and back.

pub use self::class::Class;
pub use self::digestalg::DigestAlg;
pub use self::opcode::Opcode;
pub use self::rcode::{Rcode, TsigRcode};
pub use self::rtype::Rtype;
pub use self::secalg::SecAlg;

#[macro_use]
mod macros;

pub mod class;
pub mod digestalg;
pub mod opcode;
pub mod rcode;
pub mod rtype;
pub mod secalg;
