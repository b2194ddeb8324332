//! A single question in a DNS message.

use core::fmt;
use std::vec::Vec;

use super::iana::{Class, Rtype};
use super::name::Dname;
use super::wire::{Compose, ComposeError, Parse, ParseError, Parser};

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    /// The domain name of the question.
    qname: Dname,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the quesiton.
    qclass: Class,
}

/// # Creation and Conversion
///
impl Question {
    /// Creates a new question from its three componets.
    pub fn new(qname: Dname, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Creates a new question from a name and record type, assuming class IN.
    pub fn new_in(qname: Dname, qtype: Rtype) -> Self {
        Self::new(qname, qtype, Class::IN)
    }

    /// Converts the question into the qname.
    pub fn into_qname(self) -> Dname {
        self.qname
    }
}

/// # Field Access
///
impl Question {
    /// Returns a reference to the domain name in the question.
    pub fn qname(&self) -> &Dname {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

//--- Parse and Compose

impl Parse for Question {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Ok(Question::new(
            Dname::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
        ))
    }
}

impl Compose for Question {
    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        self.qname.compose(target)?;
        self.qtype.compose(target)?;
        self.qclass.compose(target)
    }
}

//--- From

impl From<(Dname, Rtype, Class)> for Question {
    fn from((name, rtype, class): (Dname, Rtype, Class)) -> Self {
        Question::new(name, rtype, class)
    }
}

impl From<(Dname, Rtype)> for Question {
    fn from((name, rtype): (Dname, Rtype)) -> Self {
        Question::new_in(name, rtype)
    }
}

//--- Display

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.\t{}\t{}", self.qname, self.qtype, self.qclass)
    }
}

//============ Testing =======================================================
