//! Serial numbers and the time values built on them.
//!
//! DNS uses 32 bit serial numbers in various places that are conceptionally
//! viewed as the 32 bit modulus of a larger number space. [RFC 1982] defines
//! how to compare such values. This module provides [`Serial`]
//! implementing these rules, [`Timestamp`] for the signature validity
//! times of RRSIG records, and [`Time48`] for the 48 bit signing time of
//! TSIG records.
//!
//! [RFC 1982]: https://tools.ietf.org/html/rfc1982

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use std::vec::Vec;

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use super::wire::{Compose, ComposeError, Parse, ParseError, Parser};

//------------ Serial --------------------------------------------------------

/// A serial number.
///
/// Serial numbers only implement a partial ordering. Two values exactly
/// 2^31 apart are neither equal nor is one larger than the other.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Serial(pub u32);

impl Serial {
    /// Returns the serial number as a raw integer.
    #[must_use]
    pub fn into_int(self) -> u32 {
        self.0
    }
}

//--- Parse and Compose

impl Parse for Serial {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        u32::parse(parser).map(Serial)
    }
}

impl Compose for Serial {
    const COMPOSE_LEN: u16 = 4;

    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        self.0.compose(target)
    }
}

//--- From and Display

impl From<u32> for Serial {
    fn from(value: u32) -> Self {
        Serial(value)
    }
}

impl From<Serial> for u32 {
    fn from(value: Serial) -> u32 {
        value.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--- PartialOrd

impl PartialOrd for Serial {
    fn partial_cmp(&self, other: &Serial) -> Option<Ordering> {
        let diff = other.0.wrapping_sub(self.0);
        match diff {
            0 => Some(Ordering::Equal),
            0x8000_0000 => None,
            diff if diff < 0x8000_0000 => Some(Ordering::Less),
            _ => Some(Ordering::Greater),
        }
    }
}

//------------ Timestamp -----------------------------------------------------

/// A timestamp for RRSIG records.
///
/// RRSIG inception and expiration times are seconds since the Unix epoch
/// modulo 2^32 and are compared using serial number arithmetic. In
/// presentation format, they are either the plain integer or a date in
/// `YYYYMMDDHHmmSS` format in UTC.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Timestamp(Serial);

impl Timestamp {
    /// Returns the timestamp as a raw integer.
    #[must_use]
    pub fn into_int(self) -> u32 {
        self.0.into_int()
    }
}

//--- Parse and Compose

impl Parse for Timestamp {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        Serial::parse(parser).map(Self)
    }
}

impl Compose for Timestamp {
    const COMPOSE_LEN: u16 = Serial::COMPOSE_LEN;

    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        self.0.compose(target)
    }
}

//--- From and FromStr

impl From<u32> for Timestamp {
    fn from(item: u32) -> Self {
        Self(Serial(item))
    }
}

impl FromStr for Timestamp {
    type Err = IllegalSignatureTime;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if !src.bytes().all(|ch| ch.is_ascii_digit()) {
            return Err(IllegalSignatureTime);
        }
        if src.len() != 14 {
            return u32::from_str(src)
                .map(Timestamp::from)
                .map_err(|_| IllegalSignatureTime);
        }
        let num = |range: core::ops::Range<usize>| {
            u16::from_str(&src[range]).map_err(|_| IllegalSignatureTime)
        };
        let month = Month::try_from(num(4..6)? as u8)
            .map_err(|_| IllegalSignatureTime)?;
        let date = Date::from_calendar_date(
            i32::from(num(0..4)?),
            month,
            num(6..8)? as u8,
        )
        .map_err(|_| IllegalSignatureTime)?;
        let time = Time::from_hms(
            num(8..10)? as u8,
            num(10..12)? as u8,
            num(12..14)? as u8,
        )
        .map_err(|_| IllegalSignatureTime)?;
        let secs = PrimitiveDateTime::new(date, time)
            .assume_utc()
            .unix_timestamp();
        // Timestamps are the Unix time modulo 2^32.
        Ok(Timestamp::from(secs as u32))
    }
}

//--- Display

impl fmt::Display for Timestamp {
    /// Formats the timestamp as `YYYYMMDDHHmmSS`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match OffsetDateTime::from_unix_timestamp(i64::from(self.into_int()))
        {
            Ok(dt) => write!(
                f,
                "{:04}{:02}{:02}{:02}{:02}{:02}",
                dt.year(),
                u8::from(dt.month()),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

//--- PartialOrd

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

//------------ Time48 --------------------------------------------------------

/// The 48 bit time signed value of a TSIG record.
///
/// This is the Unix time in seconds. Unlike RRSIG times, it is not a serial
/// number but a plain 48 bit unsigned integer.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time48(u64);

impl Time48 {
    /// Returns the time of the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self::from_u64(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|dur| dur.as_secs())
                .unwrap_or(0),
        )
    }

    /// Creates a value from a 64 bit integer.
    ///
    /// The upper 16 bits of `value` are dropped.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Time48(value & 0xFFFF_FFFF_FFFF)
    }

    /// Returns the wire format of the value.
    #[must_use]
    pub fn into_octets(self) -> [u8; 6] {
        let mut res = [0u8; 6];
        res.copy_from_slice(&self.0.to_be_bytes()[2..]);
        res
    }

    /// Returns whether `other` is at most `fudge` seconds away.
    #[must_use]
    pub fn eq_fudged(self, other: Self, fudge: u64) -> bool {
        self.0.abs_diff(other.0) <= fudge
    }
}

//--- Parse and Compose

impl Parse for Time48 {
    fn parse(parser: &mut Parser<'_, [u8]>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 8];
        parser.parse_buf(&mut buf[2..])?;
        Ok(Time48(u64::from_be_bytes(buf)))
    }
}

impl Compose for Time48 {
    const COMPOSE_LEN: u16 = 6;

    fn compose(&self, target: &mut Vec<u8>) -> Result<(), ComposeError> {
        target.extend_from_slice(&self.into_octets());
        Ok(())
    }
}

//--- From and Display

impl From<Time48> for u64 {
    fn from(value: Time48) -> u64 {
        value.0
    }
}

impl fmt::Display for Time48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//------------ IllegalSignatureTime ------------------------------------------

/// A string wasn’t a valid signature time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalSignatureTime;

impl fmt::Display for IllegalSignatureTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal signature time")
    }
}

impl std::error::Error for IllegalSignatureTime {}

//============ Testing =======================================================
