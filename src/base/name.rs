//! Domain names.
//!
//! This module provides [`Dname`], an owned absolute domain name kept in
//! uncompressed wire format. Names are parsed from messages with full
//! support for compression pointers but are always composed uncompressed.
//!
//! Domain names compare and hash ignoring ASCII case. For DNSSEC and TSIG,
//! the canonical form with all letters in lowercase is available via
//! [`Dname::compose_canonical`] and [`Dname::to_canonical`].

use core::str::FromStr;
use core::{fmt, hash};
use std::vec::Vec;

use bytes::Bytes;

use super::wire::{Compose, ComposeError, ParseError, Parser};

//------------ Dname ---------------------------------------------------------

/// An absolute domain name in uncompressed wire format.
///
/// The underlying octets are guaranteed to be a sequence of normal labels
/// of at most 63 octets each, ending in the root label, and no longer than
/// 255 octets in total.
#[derive(Clone)]
pub struct Dname(Bytes);

/// # Creation
///
impl Dname {
    /// Domain names have a maximum length of 255 octets.
    pub const MAX_LEN: usize = 255;

    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Dname(Bytes::from_static(b"\0"))
    }

    /// Creates a domain name from static octets without checking them.
    ///
    /// # Safety
    ///
    /// The octets must be a valid uncompressed absolute domain name.
    pub(crate) const unsafe fn from_static_unchecked(
        octets: &'static [u8],
    ) -> Self {
        Dname(Bytes::from_static(octets))
    }
}

/// # Parsing and Composing
///
impl Dname {
    /// Takes a possibly compressed name from the beginning of a parser.
    ///
    /// The parser must be positioned within the complete message so that
    /// compression pointers can be followed. A compression pointer must
    /// point to a position strictly before the pointer itself. Since a
    /// name can only ever grow while following pointers, this rules out
    /// loops.
    ///
    /// Afterwards, the parser is positioned right after the name as it
    /// appeared at the original position, i.e., after the first pointer.
    pub fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut buf = Vec::new();

        // Phase one: read labels until the root label or a pointer.
        let mut ptr = loop {
            match LabelType::parse(parser)? {
                LabelType::Normal(0) => {
                    buf.push(0);
                    return Ok(Dname(buf.into()));
                }
                LabelType::Normal(label_len) => {
                    push_label(&mut buf, parser.peek(label_len)?)?;
                    parser.advance(label_len)?;
                }
                LabelType::Compressed(ptr) => break ptr,
            }
        };

        // Phase two: follow pointers on a copy of the parser. The original
        // has already reached the end of the name.
        let mut parser = parser.clone();
        loop {
            // The pointer starts two octets before the current position.
            if ptr >= parser.pos() - 2 {
                return Err(ParseError::MalformedName);
            }
            parser.seek(ptr)?;
            loop {
                match LabelType::parse(&mut parser)? {
                    LabelType::Normal(0) => {
                        buf.push(0);
                        return Ok(Dname(buf.into()));
                    }
                    LabelType::Normal(label_len) => {
                        push_label(&mut buf, parser.peek(label_len)?)?;
                        parser.advance(label_len)?;
                    }
                    LabelType::Compressed(new_ptr) => {
                        ptr = new_ptr;
                        break;
                    }
                }
            }
        }
    }

    /// Appends the name in canonical form to `target`.
    ///
    /// The canonical form has all ASCII letters converted to lowercase.
    pub fn compose_canonical(&self, target: &mut Vec<u8>) {
        // Length octets are at most 63 and therefore never ASCII letters.
        target.extend(self.0.iter().map(u8::to_ascii_lowercase));
    }
}

/// # Properties
///
impl Dname {
    /// Returns a reference to the underlying wire format octets.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the length of the name in wire format.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether this is the root name.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns an iterator over the labels of the name.
    ///
    /// The root label is not included.
    pub fn iter_labels(&self) -> LabelIter<'_> {
        LabelIter { slice: self.as_slice() }
    }

    /// Returns the number of labels not counting the root label.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Returns whether the first label is the wildcard label `*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.as_slice().starts_with(b"\x01*")
    }

    /// Returns the label count as used in the RRSIG labels field.
    ///
    /// This doesn’t count the root label nor a leading wildcard label.
    #[must_use]
    pub fn rrsig_label_count(&self) -> u8 {
        let count = self.label_count() - usize::from(self.is_wildcard());
        // A name of at most 255 octets has at most 127 labels.
        count as u8
    }

    /// Returns a name consisting of only the `count` rightmost labels.
    ///
    /// Returns `None` if the name has fewer labels.
    #[must_use]
    pub fn suffix(&self, count: usize) -> Option<Self> {
        let skip = self.label_count().checked_sub(count)?;
        let mut start = 0;
        for label in self.iter_labels().take(skip) {
            start += label.len() + 1;
        }
        Some(Dname(self.0.slice(start..)))
    }

    /// Returns a new name with `label` prepended.
    pub fn prepend(&self, label: &[u8]) -> Result<Self, ParseError> {
        let mut buf = Vec::with_capacity(self.len() + label.len() + 1);
        push_label(&mut buf, label)?;
        buf.extend_from_slice(self.as_slice());
        if buf.len() > Self::MAX_LEN {
            return Err(ParseError::MalformedName);
        }
        Ok(Dname(buf.into()))
    }

    /// Returns the canonical version of the name.
    #[must_use]
    pub fn to_canonical(&self) -> Self {
        let mut buf = Vec::with_capacity(self.len());
        self.compose_canonical(&mut buf);
        Dname(buf.into())
    }
}

//--- Compose

impl Compose for Dname {
    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        target.extend_from_slice(self.as_slice());
        Ok(())
    }
}

//--- FromStr

impl FromStr for Dname {
    type Err = FromStrError;

    /// Converts a presentation format name into a domain name.
    ///
    /// A trailing dot is optional since all names are absolute. Labels may
    /// contain escape sequences of the form `\X` and `\DDD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "." {
            return Ok(Dname::root());
        }
        let mut buf = Vec::new();
        let mut label = Vec::new();
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    finish_label(&mut buf, &mut label)?;
                    if chars.as_str().is_empty() {
                        buf.push(0);
                        return Ok(Dname(buf.into()));
                    }
                }
                '\\' => label.push(parse_escape(&mut chars)?),
                ch if ch.is_ascii() => label.push(ch as u8),
                _ => return Err(FromStrError::BadSymbol),
            }
        }
        finish_label(&mut buf, &mut label)?;
        buf.push(0);
        Ok(Dname(buf.into()))
    }
}

/// Moves a label from presentation format into the name under construction.
fn finish_label(
    buf: &mut Vec<u8>,
    label: &mut Vec<u8>,
) -> Result<(), FromStrError> {
    if label.is_empty() {
        return Err(FromStrError::EmptyLabel);
    }
    if label.len() > 63 {
        return Err(FromStrError::LongLabel);
    }
    push_label(buf, label).map_err(|_| FromStrError::LongName)?;
    label.clear();
    Ok(())
}

/// Parses the part of an escape sequence after the backslash.
fn parse_escape(chars: &mut core::str::Chars) -> Result<u8, FromStrError> {
    let ch = chars.next().ok_or(FromStrError::BadEscape)?;
    if let Some(first) = ch.to_digit(10) {
        let mut value = first;
        for _ in 0..2 {
            let digit = chars
                .next()
                .and_then(|ch| ch.to_digit(10))
                .ok_or(FromStrError::BadEscape)?;
            value = value * 10 + digit;
        }
        u8::try_from(value).map_err(|_| FromStrError::BadEscape)
    } else if ch.is_ascii() {
        Ok(ch as u8)
    } else {
        Err(FromStrError::BadEscape)
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Dname {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl Eq for Dname {}

impl hash::Hash for Dname {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for ch in self.as_slice() {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Dname {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for (idx, label) in self.iter_labels().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            for &ch in label {
                if ch == b' ' || ch == b'.' || ch == b'\\' {
                    write!(f, "\\{}", ch as char)?;
                } else if !(0x20..0x7F).contains(&ch) {
                    write!(f, "\\{:03}", ch)?;
                } else {
                    write!(f, "{}", ch as char)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Dname {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dname({})", self)
    }
}

//------------ LabelIter -----------------------------------------------------

/// An iterator over the non-root labels of a domain name.
#[derive(Clone, Debug)]
pub struct LabelIter<'a> {
    slice: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, rest) = self.slice.split_first()?;
        let len = usize::from(len);
        if len == 0 || rest.len() < len {
            return None;
        }
        let (label, rest) = rest.split_at(len);
        self.slice = rest;
        Some(label)
    }
}

//------------ LabelType -----------------------------------------------------

/// The type of a label as indicated by its first octet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LabelType {
    /// A normal label with its size in octets.
    Normal(usize),

    /// A compressed label with the position of where to continue.
    Compressed(usize),
}

impl LabelType {
    /// Takes a label type from the beginning of a parser.
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let ltype = parser.parse_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype.into())),
            0xC0..=0xFF => {
                let res = usize::from(parser.parse_u8()?);
                let res = res | ((usize::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(ParseError::MalformedName),
        }
    }
}

/// Appends a label to a name under construction.
///
/// Checks that the label is at most 63 octets long and that there is still
/// space for the root label afterwards.
fn push_label(buf: &mut Vec<u8>, label: &[u8]) -> Result<(), ParseError> {
    if label.is_empty() || label.len() > 63 {
        return Err(ParseError::MalformedName);
    }
    if buf.len() + label.len() + 1 >= Dname::MAX_LEN {
        return Err(ParseError::MalformedName);
    }
    buf.push(label.len() as u8);
    buf.extend_from_slice(label);
    Ok(())
}

//------------ FromStrError --------------------------------------------------

/// An error happened when converting a string into a domain name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FromStrError {
    /// An empty label was encountered.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name would be longer than 255 octets.
    LongName,

    /// An illegal escape sequence was encountered.
    BadEscape,

    /// A non-ASCII character was encountered.
    BadSymbol,
}

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            FromStrError::EmptyLabel => "empty label",
            FromStrError::LongLabel => "label with more than 63 octets",
            FromStrError::LongName => "domain name with more than 255 octets",
            FromStrError::BadEscape => "illegal escape sequence",
            FromStrError::BadSymbol => "illegal character",
        })
    }
}

impl std::error::Error for FromStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn name(s: &str) -> Dname {
        Dname::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(name(".").as_slice(), b"\0");
        assert_eq!(name("www.example.com").as_slice(), b"\x03www\x07example\x03com\0");
        assert_eq!(name("www.example.com."), name("www.example.com"));
        assert_eq!(name("a\\.b.c").as_slice(), b"\x03a.b\x01c\0");
        assert_eq!(name("\\065.c").as_slice(), b"\x01A\x01c\0");
        assert_eq!(Dname::from_str("a..b"), Err(FromStrError::EmptyLabel));
        assert_eq!(Dname::from_str(""), Err(FromStrError::EmptyLabel));
        assert!(Dname::from_str(&"a".repeat(64)).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(name("www.Example.com.").to_string(), "www.Example.com");
        assert_eq!(Dname::root().to_string(), ".");
        assert_eq!(name("a\\.b.c").to_string(), "a\\.b.c");
    }

    #[test]
    fn eq_ignores_case() {
        assert_eq!(name("WWW.example.COM"), name("www.EXAMPLE.com"));
        assert_ne!(name("www.example.com"), name("ww.example.com"));
        assert_eq!(
            name("WWW.example.COM").to_canonical().as_slice(),
            b"\x03www\x07example\x03com\0"
        );
    }

    #[test]
    fn labels() {
        let wild = name("*.b.example");
        assert!(wild.is_wildcard());
        assert_eq!(wild.label_count(), 3);
        assert_eq!(wild.rrsig_label_count(), 2);
        assert_eq!(wild.suffix(2), Some(name("b.example")));
        assert_eq!(wild.suffix(0), Some(Dname::root()));
        assert_eq!(wild.suffix(4), None);
        assert_eq!(name("b.example").prepend(b"*").unwrap(), wild);
        assert_eq!(Dname::root().label_count(), 0);
    }

    #[test]
    fn parse_uncompressed() {
        let data = b"\x03www\x07example\x03com\0\x01";
        let mut parser = Parser::from_ref(&data[..]);
        assert_eq!(Dname::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn parse_compressed() {
        //  0: \x07example\x03com\0      (13 octets)
        // 13: \x03www\xc0\x00           (6 octets)
        // 19: \x03ftp\xc0\x0d
        let data = b"\x07example\x03com\0\x03www\xc0\x00\x03ftp\xc0\x0d";
        let mut parser = Parser::from_ref(&data[..]);
        parser.advance(13).unwrap();
        assert_eq!(Dname::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(parser.pos(), 19);
        assert_eq!(
            Dname::parse(&mut parser).unwrap(),
            name("ftp.www.example.com")
        );
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn parse_bad_pointers() {
        // Pointer to itself.
        let mut parser = Parser::from_ref(&b"\x03www\xc0\x04"[..]);
        assert_eq!(Dname::parse(&mut parser), Err(ParseError::MalformedName));

        // Pointer forward.
        let mut parser = Parser::from_ref(&b"\xc0\x02\x03com\0"[..]);
        assert_eq!(Dname::parse(&mut parser), Err(ParseError::MalformedName));

        // Loop between two pointers that pass the backwards check.
        let mut parser = Parser::from_ref(&b"\x01a\xc0\x00"[..]);
        parser.advance(2).unwrap();
        assert_eq!(Dname::parse(&mut parser), Err(ParseError::MalformedName));

        // Reserved label types.
        let mut parser = Parser::from_ref(&b"\x41abc\0"[..]);
        assert_eq!(Dname::parse(&mut parser), Err(ParseError::MalformedName));
        let mut parser = Parser::from_ref(&b"\x81abc\0"[..]);
        assert_eq!(Dname::parse(&mut parser), Err(ParseError::MalformedName));
    }

    #[test]
    fn parse_truncated() {
        let data = b"\x03www\x07example\x03com\0";
        for len in 0..data.len() {
            let mut parser = Parser::from_ref(&data[..len]);
            assert_eq!(Dname::parse(&mut parser), Err(ParseError::Truncated));
        }
    }

    #[test]
    fn parse_long_name() {
        let mut data = Vec::new();
        for _ in 0..5 {
            data.push(63);
            data.extend_from_slice(&[b'a'; 63]);
        }
        data.push(0);
        let mut parser = Parser::from_ref(data.as_slice());
        assert_eq!(Dname::parse(&mut parser), Err(ParseError::MalformedName));
    }
}
