//! Complete DNS messages.
//!
//! A [`Message`] owns its header and the four sections. It is converted from
//! and into wire format through [`Message::decode`] and [`Message::encode`].
//!
//! Decoding reads exactly as many questions and records as the counts in
//! the header section announce. Since all reading happens through a
//! bounds-checked parser, counts larger than what the message actually
//! contains lead to a [`ParseError::Truncated`] rather than to reading
//! beyond the buffer. Encoding derives the counts from the section lengths
//! and never compresses names, so the output for a given message is always
//! the same.

use core::fmt;
use std::vec::Vec;

use tracing::{debug, trace};

use super::header::{Header, HeaderCounts, HeaderSection};
use super::question::Question;
use super::record::Record;
use super::wire::{Compose, ComposeError, Parse, ParseError, Parser};

//------------ Section -------------------------------------------------------

/// The record sections of a message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Section::Answer => "ANSWER",
            Section::Authority => "AUTHORITY",
            Section::Additional => "ADDITIONAL",
        })
    }
}

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The header counts are not stored. They are always derived from the
/// lengths of the sections, see [`counts`][Self::counts].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    header: Header,
    question: Vec<Question>,
    answer: Vec<Record>,
    authority: Vec<Record>,
    additional: Vec<Record>,
}

/// # Creation and Element Access
///
impl Message {
    /// Creates an empty message with an all-zero header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty message with the given header.
    #[must_use]
    pub fn with_header(header: Header) -> Self {
        Message {
            header,
            ..Default::default()
        }
    }

    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the header counts for the current content of the message.
    ///
    /// Sections with more than 65535 entries report 65535. Such messages
    /// cannot be encoded.
    pub fn counts(&self) -> HeaderCounts {
        fn clamp(len: usize) -> u16 {
            u16::try_from(len).unwrap_or(u16::MAX)
        }

        let mut res = HeaderCounts::new();
        res.set_qdcount(clamp(self.question.len()));
        res.set_ancount(clamp(self.answer.len()));
        res.set_nscount(clamp(self.authority.len()));
        res.set_arcount(clamp(self.additional.len()));
        res
    }

    /// Returns the header section for the current content of the message.
    pub fn header_section(&self) -> HeaderSection {
        let mut res = HeaderSection::new();
        *res.header_mut() = self.header;
        *res.counts_mut() = self.counts();
        res
    }

    /// Returns the question section.
    pub fn question(&self) -> &[Question] {
        &self.question
    }

    /// Returns a mutable reference to the question section.
    pub fn question_mut(&mut self) -> &mut Vec<Question> {
        &mut self.question
    }

    /// Returns the records of the given section.
    pub fn section(&self, section: Section) -> &[Record] {
        match section {
            Section::Answer => &self.answer,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        }
    }

    /// Returns a mutable reference to the records of the given section.
    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Record> {
        match section {
            Section::Answer => &mut self.answer,
            Section::Authority => &mut self.authority,
            Section::Additional => &mut self.additional,
        }
    }

    pub fn answer(&self) -> &[Record] {
        &self.answer
    }

    pub fn authority(&self) -> &[Record] {
        &self.authority
    }

    pub fn additional(&self) -> &[Record] {
        &self.additional
    }

    /// Appends a question.
    pub fn push_question(&mut self, question: impl Into<Question>) {
        self.question.push(question.into())
    }

    /// Appends a record to the given section.
    pub fn push(&mut self, section: Section, record: Record) {
        self.section_mut(section).push(record)
    }

    /// Returns an iterator over the records of all three record sections.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.answer
            .iter()
            .chain(self.authority.iter())
            .chain(self.additional.iter())
    }
}

/// # Decoding and Encoding
///
impl Message {
    /// Decodes a message from its wire format.
    ///
    /// Octets following the last record announced by the header are
    /// ignored.
    pub fn decode(octets: &[u8]) -> Result<Self, ParseError> {
        let mut parser = Parser::from_ref(octets);
        let res = Self::parse(&mut parser);
        match res {
            Ok(ref msg) => {
                if parser.remaining() > 0 {
                    trace!(
                        "ignoring {} octets of trailing data in message {}",
                        parser.remaining(),
                        msg.header.id()
                    );
                }
            }
            Err(err) => {
                debug!(
                    "failed to decode message at position {}: {}",
                    parser.pos(),
                    err
                );
            }
        }
        res
    }

    /// Encodes the message into its wire format.
    ///
    /// Fails only if a section has more than 65535 entries or some record
    /// data is longer than 65535 octets.
    pub fn encode(&self) -> Result<Vec<u8>, ComposeError> {
        let mut target = Vec::with_capacity(512);
        self.compose(&mut target)?;
        Ok(target)
    }

    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let section = HeaderSection::parse(parser)?;
        let counts = *section.counts();
        trace!(
            "decoding message {}: {} questions, {} answers, \
             {} authority, {} additional",
            section.header().id(),
            counts.qdcount(),
            counts.ancount(),
            counts.nscount(),
            counts.arcount()
        );

        // The counts are untrusted, so the vecs grow as records arrive.
        let mut res = Message::with_header(*section.header());
        for _ in 0..counts.qdcount() {
            res.question.push(Question::parse(parser)?);
        }
        for (section, count) in [
            (Section::Answer, counts.ancount()),
            (Section::Authority, counts.nscount()),
            (Section::Additional, counts.arcount()),
        ] {
            for _ in 0..count {
                let record = Record::parse(parser)?;
                trace!("{} {}", section, record);
                res.section_mut(section).push(record);
            }
        }
        Ok(res)
    }
}

impl Compose for Message {
    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        let too_long = |len: usize| len > usize::from(u16::MAX);
        if too_long(self.question.len())
            || too_long(self.answer.len())
            || too_long(self.authority.len())
            || too_long(self.additional.len())
        {
            return Err(ComposeError::LongData);
        }
        self.header_section().compose(target)?;
        for question in &self.question {
            question.compose(target)?;
        }
        for record in self.records() {
            record.compose(target)?;
        }
        Ok(())
    }
}

//--- Display

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header = self.header;
        writeln!(
            f,
            ";; opcode: {}, rcode: {}, id: {}",
            header.opcode(),
            header.rcode(),
            header.id()
        )?;
        writeln!(f, ";; flags: {}", header.flags())?;
        writeln!(f, ";; QUESTION SECTION:")?;
        for question in &self.question {
            writeln!(f, ";{}", question)?;
        }
        for section in
            [Section::Answer, Section::Authority, Section::Additional]
        {
            let records = self.section(section);
            if records.is_empty() {
                continue;
            }
            writeln!(f, "\n;; {} SECTION:", section)?;
            for record in records {
                writeln!(f, "{}", record)?;
            }
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Class, Opcode, Rcode, Rtype};
    use crate::base::name::Dname;
    use crate::rdata::{Rdata, RdataField};
    use core::str::FromStr;
    use std::net::Ipv4Addr;

    fn name(s: &str) -> Dname {
        Dname::from_str(s).unwrap()
    }

    fn response() -> Message {
        let mut header = Header::new();
        header.set_id(0xBEEF);
        header.set_qr(true);
        header.set_rd(true);
        header.set_ra(true);
        header.set_opcode(Opcode::QUERY);
        header.set_rcode(Rcode::NOERROR);
        let mut msg = Message::with_header(header);
        msg.push_question((name("example.com"), Rtype::A));
        msg.push(
            Section::Answer,
            Record::new(
                name("example.com"),
                Class::IN,
                300,
                Rdata::new(
                    Rtype::A,
                    vec![RdataField::A(Ipv4Addr::new(192, 0, 2, 1))],
                )
                .unwrap(),
            ),
        );
        msg
    }

    #[test]
    fn round_trip() {
        let msg = response();
        let wire = msg.encode().unwrap();
        assert_eq!(&wire[..12], b"\xBE\xEF\x81\x80\0\x01\0\x01\0\0\0\0");
        let decoded = Message::decode(&wire).unwrap();
        assert_eq!(decoded, msg);
        assert_eq!(decoded.encode().unwrap(), wire);
    }

    #[test]
    fn counts_follow_sections() {
        let mut msg = response();
        assert_eq!(msg.counts().ancount(), 1);
        msg.section_mut(Section::Answer).clear();
        assert_eq!(msg.counts().ancount(), 0);
        assert_eq!(&msg.encode().unwrap()[6..8], b"\0\0");
    }

    #[test]
    fn decode_compressed() {
        // Answer owner is a pointer to the question name.
        let wire = b"\x12\x34\x81\x80\0\x01\0\x01\0\0\0\0\
                     \x07example\x03com\0\0\x01\0\x01\
                     \xc0\x0c\0\x01\0\x01\0\0\x01\x2c\0\x04\xc0\x00\x02\x01";
        let msg = Message::decode(wire).unwrap();
        assert_eq!(msg.answer()[0].owner(), &name("example.com"));
        assert_eq!(msg.header().id(), 0x1234);
    }

    #[test]
    fn decode_trailing_data() {
        let mut wire = response().encode().unwrap();
        wire.extend_from_slice(b"junk");
        assert_eq!(Message::decode(&wire).unwrap(), response());
    }

    #[test]
    fn decode_large_counts() {
        // Announces 65535 answers but carries none.
        let wire = b"\0\0\0\0\0\0\xff\xff\0\0\0\0";
        assert_eq!(Message::decode(wire), Err(ParseError::Truncated));
    }

    #[test]
    fn decode_short_header() {
        assert_eq!(
            Message::decode(b"\0\0\0\0\0\0\0\0\0\0\0"),
            Err(ParseError::Truncated)
        );
    }

    #[test]
    fn empty() {
        let wire = Message::new().encode().unwrap();
        assert_eq!(wire, [0u8; 12]);
        assert_eq!(Message::decode(&wire).unwrap(), Message::new());
    }
}
