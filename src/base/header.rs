//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the
//! header. Its content and format are defined in section 4.1.1 of
//! [RFC 1035].
//!
//! The header is split into two types: [`Header`] holds the first four
//! octets with the message ID, opcode, flags and response code, while
//! [`HeaderCounts`] holds the four section counts. [`HeaderSection`]
//! combines both.
//!
//! When a [`Message`][crate::base::Message] is encoded, the counts are
//! always taken from the actual lengths of its sections. When it is
//! decoded, they only tell how many entries to read.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use core::fmt;
use std::vec::Vec;

use super::iana::{Opcode, Rcode};
use super::wire::{Compose, ComposeError, Parse, ParseError, Parser};

//------------ Header --------------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type keeps the first four octets of the header in their wire
/// representation. The data is layed out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Header {
    inner: [u8; 4],
}

/// Defines the getter and setter for a single flag bit.
macro_rules! flag_bit {
    ( $(#[$attr:meta])* $get:ident, $set:ident, $offset:expr, $bit:expr ) => {
        $(#[$attr])*
        #[must_use]
        pub fn $get(self) -> bool {
            self.inner[$offset] & (1 << $bit) != 0
        }

        #[doc = concat!("Sets the value of the `", stringify!($get), "` bit.")]
        pub fn $set(&mut self, set: bool) {
            if set {
                self.inner[$offset] |= 1 << $bit
            } else {
                self.inner[$offset] &= !(1 << $bit)
            }
        }
    };
}

impl Header {
    /// Creates a new header with all fields zero or unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header from its four wire octets.
    #[must_use]
    pub fn from_array(inner: [u8; 4]) -> Self {
        Header { inner }
    }

    /// Returns a reference to the underlying octets slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    /// Returns the value of the ID field.
    #[must_use]
    pub fn id(self) -> u16 {
        u16::from_be_bytes([self.inner[0], self.inner[1]])
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.inner[..2].copy_from_slice(&value.to_be_bytes())
    }

    /// Sets the value of the ID field to a randomly chosen number.
    #[cfg(feature = "rand")]
    pub fn set_random_id(&mut self) {
        self.set_id(::rand::random())
    }

    flag_bit!(
        /// Returns whether the message is a response.
        qr, set_qr, 2, 7
    );

    /// Returns the value of the Opcode field.
    #[must_use]
    pub fn opcode(self) -> Opcode {
        Opcode::from_int((self.inner[2] >> 3) & 0x0F)
    }

    /// Sets the value of the opcode field.
    ///
    /// Only the lower four bits of the opcode are used.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.inner[2] = self.inner[2] & 0x87 | ((opcode.to_int() & 0x0F) << 3);
    }

    flag_bit!(
        /// Returns whether the answer is authoritative.
        aa, set_aa, 2, 2
    );
    flag_bit!(
        /// Returns whether the message was truncated.
        tc, set_tc, 2, 1
    );
    flag_bit!(
        /// Returns whether recursion is desired.
        rd, set_rd, 2, 0
    );
    flag_bit!(
        /// Returns whether recursion is available.
        ra, set_ra, 3, 7
    );
    flag_bit!(
        /// Returns whether the reserved bit is set.
        z, set_z, 3, 6
    );
    flag_bit!(
        /// Returns whether the data has been authenticated.
        ad, set_ad, 3, 5
    );
    flag_bit!(
        /// Returns whether checking is disabled.
        cd, set_cd, 3, 4
    );

    /// Returns all flags contained in the header.
    #[must_use]
    pub fn flags(self) -> Flags {
        Flags {
            qr: self.qr(),
            aa: self.aa(),
            tc: self.tc(),
            rd: self.rd(),
            ra: self.ra(),
            ad: self.ad(),
            cd: self.cd(),
        }
    }

    /// Returns the value of the RCODE field.
    #[must_use]
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.inner[3] & 0x0F)
    }

    /// Sets the value of the RCODE field.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.inner[3] = self.inner[3] & 0xF0 | (rcode.to_int() & 0x0F);
    }
}

//------------ Flags ---------------------------------------------------------

/// The flags contained in the DNS message header.
///
/// In text notation, each flag that is set is represented by its uppercase
/// two-letter name. Multiple flags are separated by a space.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Flags {
    /// Query response.
    pub qr: bool,

    /// Authoritative answer.
    pub aa: bool,

    /// Truncated.
    pub tc: bool,

    /// Recursion desired.
    pub rd: bool,

    /// Recursion available.
    pub ra: bool,

    /// Authentic data.
    pub ad: bool,

    /// Checking disabled.
    pub cd: bool,
}

impl Flags {
    fn tokens(self) -> [(bool, &'static str); 7] {
        [
            (self.qr, "QR"),
            (self.aa, "AA"),
            (self.tc, "TC"),
            (self.rd, "RD"),
            (self.ra, "RA"),
            (self.ad, "AD"),
            (self.cd, "CD"),
        ]
    }
}

//--- Display

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        for (set, token) in self.tokens() {
            if set {
                write!(f, "{}{}", sep, token)?;
                sep = " ";
            }
        }
        Ok(())
    }
}

//------------ HeaderCounts --------------------------------------------------

/// The section count part of the header section of a DNS message.
///
/// This part consists of four 16 bit counters for the number of entries in
/// the four sections of the message.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HeaderCounts {
    /// The question, answer, authority, and additional counts.
    counts: [u16; 4],
}

impl HeaderCounts {
    /// Creates new counts with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries in the question section.
    #[must_use]
    pub fn qdcount(self) -> u16 {
        self.counts[0]
    }

    /// Sets the QDCOUNT field.
    pub fn set_qdcount(&mut self, value: u16) {
        self.counts[0] = value
    }

    /// Returns the number of records in the answer section.
    #[must_use]
    pub fn ancount(self) -> u16 {
        self.counts[1]
    }

    /// Sets the ANCOUNT field.
    pub fn set_ancount(&mut self, value: u16) {
        self.counts[1] = value
    }

    /// Returns the number of records in the authority section.
    #[must_use]
    pub fn nscount(self) -> u16 {
        self.counts[2]
    }

    /// Sets the NSCOUNT field.
    pub fn set_nscount(&mut self, value: u16) {
        self.counts[2] = value
    }

    /// Returns the number of records in the additional section.
    #[must_use]
    pub fn arcount(self) -> u16 {
        self.counts[3]
    }

    /// Sets the ARCOUNT field.
    pub fn set_arcount(&mut self, value: u16) {
        self.counts[3] = value
    }

    /// Decreases the ARCOUNT field by one.
    ///
    /// Used when a TSIG record is removed from a message. Returns an error
    /// if the count is already zero.
    pub fn dec_arcount(&mut self) -> Result<(), ParseError> {
        self.counts[3] = self.counts[3]
            .checked_sub(1)
            .ok_or(ParseError::SchemaMismatch)?;
        Ok(())
    }

    /// Increases the ARCOUNT field by one.
    pub fn inc_arcount(&mut self) -> Result<(), ComposeError> {
        self.counts[3] =
            self.counts[3].checked_add(1).ok_or(ComposeError::LongData)?;
        Ok(())
    }
}

//------------ HeaderSection -------------------------------------------------

/// The complete header section of a DNS message.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HeaderSection {
    header: Header,
    counts: HeaderCounts,
}

impl HeaderSection {
    /// The length of the header section in wire format.
    pub const LEN: usize = 12;

    /// Creates a new header section with everything zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns a reference to the header counts.
    #[must_use]
    pub fn counts(&self) -> &HeaderCounts {
        &self.counts
    }

    /// Returns a mutable reference to the header counts.
    pub fn counts_mut(&mut self) -> &mut HeaderCounts {
        &mut self.counts
    }
}

//--- Parse and Compose

impl Parse for HeaderSection {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut inner = [0u8; 4];
        parser.parse_buf(&mut inner)?;
        let mut counts = [0u16; 4];
        for count in &mut counts {
            *count = u16::parse(parser)?;
        }
        Ok(HeaderSection {
            header: Header::from_array(inner),
            counts: HeaderCounts { counts },
        })
    }
}

impl Compose for HeaderSection {
    const COMPOSE_LEN: u16 = 12;

    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        target.extend_from_slice(self.header.as_slice());
        for count in self.counts.counts {
            count.compose(target)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! test_field {
        ($get:ident, $set:ident, $default:expr, $($value:expr),*) => {
            $({
                let mut h = Header::new();
                assert_eq!(h.$get(), $default);
                h.$set($value);
                assert_eq!(h.$get(), $value);
            })*
        }
    }

    #[test]
    fn header() {
        test_field!(id, set_id, 0, 0x1234);
        test_field!(qr, set_qr, false, true, false);
        test_field!(opcode, set_opcode, Opcode::QUERY, Opcode::NOTIFY);
        test_field!(aa, set_aa, false, true, false);
        test_field!(tc, set_tc, false, true, false);
        test_field!(rd, set_rd, false, true, false);
        test_field!(ra, set_ra, false, true, false);
        test_field!(z, set_z, false, true, false);
        test_field!(ad, set_ad, false, true, false);
        test_field!(cd, set_cd, false, true, false);
        test_field!(rcode, set_rcode, Rcode::NOERROR, Rcode::REFUSED);
    }

    #[test]
    fn bits_in_place() {
        let mut h = Header::new();
        h.set_id(0xBEEF);
        h.set_qr(true);
        h.set_opcode(Opcode::UPDATE);
        h.set_rd(true);
        h.set_cd(true);
        h.set_rcode(Rcode::NXDOMAIN);
        assert_eq!(h.as_slice(), b"\xBE\xEF\xA9\x13");
        assert_eq!(h.flags().to_string(), "QR RD CD");
    }

    #[test]
    fn section_parse_compose() {
        let data = b"\x12\x34\x81\x80\x00\x01\x00\x02\x00\x00\x00\x01";
        let mut parser = Parser::from_ref(&data[..]);
        let section = HeaderSection::parse(&mut parser).unwrap();
        assert_eq!(section.header().id(), 0x1234);
        assert!(section.header().qr() && section.header().ra());
        assert_eq!(section.counts().qdcount(), 1);
        assert_eq!(section.counts().ancount(), 2);
        assert_eq!(section.counts().nscount(), 0);
        assert_eq!(section.counts().arcount(), 1);
        let mut buf = Vec::new();
        section.compose(&mut buf).unwrap();
        assert_eq!(buf, data);

        let mut parser = Parser::from_ref(&data[..11]);
        assert_eq!(
            HeaderSection::parse(&mut parser),
            Err(ParseError::Truncated)
        );
    }

    #[test]
    fn arcount_bounds() {
        let mut c = HeaderCounts::new();
        assert!(c.dec_arcount().is_err());
        c.set_arcount(0xFFFE);
        assert!(c.inc_arcount().is_ok());
        assert!(c.inc_arcount().is_err());
        assert!(c.dec_arcount().is_ok());
        assert_eq!(c.arcount(), 0xFFFE);
    }
}
