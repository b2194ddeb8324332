//! Support for TSIG.
//!
//! This module implements signing and verifying individual DNS messages
//! with TSIG as defined in [RFC 8945].
//!
//! TSIG authenticates a message exchange with a secret key shared between
//! the two participants. The sender calculates a MAC over the message and
//! some additional variables and appends it in a record of type TSIG to
//! the additional section. The receiver strips that record, recalculates
//! the MAC with the same key and compares. When answering, the MAC of the
//! request is included in the calculation in order to bind request and
//! answer together. Callers pass it in as the `prior_mac` argument.
//!
//! Keys are managed via the [`Key`] type which ties together the secret,
//! the name of the key, and the [`Algorithm`] it is used with. All
//! algorithms from [RFC 8945] are supported, including HMAC-MD5 which is
//! required for interoperability even if no longer recommended.
//!
//! The functions here operate on messages in wire format. [`sign`] returns
//! the TSIG record to be appended, [`sign_message`] appends it right away.
//! [`verify`] checks only the MAC while [`verify_at`] also checks the time
//! and reports the reason for failure.
//!
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945

use core::{cmp, fmt, str};
use std::vec::Vec;

use bytes::Bytes;
use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use ring::rand::SecureRandom;
use ring::{constant_time, hmac, rand};
use tracing::{debug, trace};

use crate::base::header::HeaderSection;
use crate::base::iana::{Class, TsigRcode};
use crate::base::name::Dname;
use crate::base::question::Question;
use crate::base::record::Record;
use crate::base::serial::Time48;
use crate::base::wire::{
    compose_len_prefixed, Compose, ComposeError, Parse, ParseError, Parser,
};
use crate::rdata::Tsig;
use crate::utils::config::DefMinMax;

//------------ Configuration -------------------------------------------------

/// The fudge used by [`sign_message`].
///
/// RFC 8945 recommends 300 seconds.
pub const DEFAULT_FUDGE: u16 = 300;

/// The shortest MAC ever accepted.
const MIN_MAC_LEN: usize = 10;

//------------ Key -----------------------------------------------------------

/// A key for creating and validating TSIG signatures.
///
/// A key has a name, an algorithm, and the secret octets. By default,
/// signatures are created with the full native length of the algorithm and
/// received signatures have to be at full length, too. Truncation can be
/// enabled via [`with_min_mac_len`] and [`with_signing_len`] within the
/// limits of RFC 8945: at least 10 octets and at least half the native
/// length.
///
/// [`with_min_mac_len`]: Self::with_min_mac_len
/// [`with_signing_len`]: Self::with_signing_len
#[derive(Clone)]
pub struct Key {
    /// The name of the key.
    name: Dname,

    /// The algorithm the key is used with.
    algorithm: Algorithm,

    /// The shared secret.
    secret: Bytes,

    /// Minimum length of received signatures.
    min_mac_len: usize,

    /// The length of a signature created with this key.
    signing_len: usize,
}

/// # Creating Keys
///
impl Key {
    /// Creates a new key from its components.
    pub fn new(
        name: Dname,
        algorithm: Algorithm,
        secret: impl Into<Bytes>,
    ) -> Self {
        Key {
            name,
            algorithm,
            secret: secret.into(),
            min_mac_len: algorithm.native_len(),
            signing_len: algorithm.native_len(),
        }
    }

    /// Creates a new key from a base64 encoded secret.
    ///
    /// This is the format used by configuration files of most name
    /// servers.
    pub fn from_base64(
        name: Dname,
        algorithm: Algorithm,
        secret: &str,
    ) -> Result<Self, base64::DecodeError> {
        use base64::Engine;

        let secret = base64::engine::general_purpose::STANDARD
            .decode(secret.trim())?;
        Ok(Self::new(name, algorithm, secret))
    }

    /// Generates a new key with a random secret of the native length.
    pub fn generate(
        name: Dname,
        algorithm: Algorithm,
    ) -> Result<Self, TsigError> {
        let mut secret = vec![0u8; algorithm.native_len()];
        rand::SystemRandom::new()
            .fill(&mut secret)
            .map_err(|_| TsigError::Crypto)?;
        Ok(Self::new(name, algorithm, secret))
    }

    /// Sets the minimum length of accepted signatures.
    ///
    /// The value is trimmed to the allowed range for the algorithm.
    #[must_use]
    pub fn with_min_mac_len(mut self, len: usize) -> Self {
        self.min_mac_len = self.algorithm.mac_len().limit(len);
        self
    }

    /// Sets the length of created signatures.
    ///
    /// The value is trimmed to the allowed range for the algorithm.
    #[must_use]
    pub fn with_signing_len(mut self, len: usize) -> Self {
        self.signing_len = self.algorithm.mac_len().limit(len);
        self
    }
}

/// # Access to Properties
///
impl Key {
    /// Returns the name of the key.
    pub fn name(&self) -> &Dname {
        &self.name
    }

    /// Returns the algorithm of the key.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the minimum acceptable length of a received signature.
    pub fn min_mac_len(&self) -> usize {
        self.min_mac_len
    }

    /// Returns the length of a signature generated by this key.
    pub fn signing_len(&self) -> usize {
        self.signing_len
    }

    /// Checks whether the TSIG record was made with this key.
    fn check_tsig(&self, record: &Record, tsig: &Tsig) -> bool {
        *record.owner() == self.name
            && Algorithm::from_dname(tsig.algorithm()) == Some(self.algorithm)
    }

    /// Compares the expected MAC with the one provided.
    ///
    /// The provided MAC may be truncated as far as this key allows.
    fn compare_macs(
        &self,
        expected: &[u8],
        provided: &[u8],
    ) -> Result<(), TsigError> {
        if provided.len() > expected.len()
            || provided.len() < self.algorithm.min_mac_len()
        {
            return Err(TsigError::FormErr);
        }
        if provided.len() < self.min_mac_len {
            return Err(TsigError::MacMismatch);
        }
        constant_time::verify_slices_are_equal(
            &expected[..provided.len()],
            provided,
        )
        .map_err(|_| TsigError::MacMismatch)
    }
}

//--- Debug

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("algorithm", &self.algorithm)
            .field("min_mac_len", &self.min_mac_len)
            .field("signing_len", &self.signing_len)
            .finish_non_exhaustive()
    }
}

//------------ Signing -------------------------------------------------------

/// Creates the TSIG record for a message using the current time.
///
/// See [`sign_at`] for details.
pub fn sign(
    packet: &[u8],
    key: &Key,
    fudge: u16,
    prior_mac: Option<&[u8]>,
) -> Result<Record, TsigError> {
    sign_at(packet, key, fudge, prior_mac, Time48::now())
}

/// Creates the TSIG record for a message with the given signing time.
///
/// The `packet` is the complete message in wire format without the TSIG
/// record. The returned record needs to be appended to the additional
/// section of that message and ARCOUNT needs to be increased. The
/// original ID in the record is the ID of `packet`.
///
/// If `prior_mac` is given, it is included in the MAC as required for an
/// answer to a signed request.
pub fn sign_at(
    packet: &[u8],
    key: &Key,
    fudge: u16,
    prior_mac: Option<&[u8]>,
    time_signed: Time48,
) -> Result<Record, TsigError> {
    let section = HeaderSection::parse(&mut Parser::from_ref(packet))?;
    let variables = Variables {
        time_signed,
        fudge,
        error: TsigRcode::NOERROR,
        other: Bytes::new(),
    };
    let mut input = Vec::with_capacity(packet.len() + 128);
    compose_prior_mac(prior_mac, &mut input)?;
    input.extend_from_slice(packet);
    variables.compose(key, &mut input)?;
    let mut mac = key.algorithm.mac(&key.secret, &input)?;
    mac.truncate(key.signing_len);
    trace!(
        "signed message {} with key {} ({})",
        section.header().id(),
        key.name,
        key.algorithm
    );
    Ok(variables.into_record(key, mac.into(), section.header().id()))
}

/// Signs a message and appends the TSIG record.
///
/// This uses the current time and [`DEFAULT_FUDGE`]. Returns the TSIG
/// record that was appended so its MAC can be used for the next message
/// of an exchange.
pub fn sign_message(
    packet: &mut Vec<u8>,
    key: &Key,
    prior_mac: Option<&[u8]>,
) -> Result<Record, TsigError> {
    let record = sign(packet, key, DEFAULT_FUDGE, prior_mac)?;
    let mut section =
        HeaderSection::parse(&mut Parser::from_ref(packet.as_slice()))?;
    section.counts_mut().inc_arcount()?;
    let mut header = Vec::with_capacity(HeaderSection::LEN);
    section.compose(&mut header)?;
    packet[..HeaderSection::LEN].copy_from_slice(&header);
    record.compose(packet)?;
    Ok(record)
}

//------------ Verification --------------------------------------------------

/// Verifies the TSIG record of a message.
///
/// Returns `true` only if the message ends in a TSIG record made with
/// `key` and the MAC is correct. Any malformed input leads to `false`.
/// The signing time is not checked, use [`verify_at`] for that.
pub fn verify(packet: &[u8], key: &Key, prior_mac: Option<&[u8]>) -> bool {
    match check_mac(packet, key, prior_mac) {
        Ok(_) => true,
        Err(err) => {
            debug!("TSIG verification failed: {}", err);
            false
        }
    }
}

/// Verifies the TSIG record of a message including the signing time.
///
/// In addition to what [`verify`] does, this checks that the signing
/// time is within the fudge of `now`. The time is only checked once the
/// MAC has been found to be correct.
pub fn verify_at(
    packet: &[u8],
    key: &Key,
    prior_mac: Option<&[u8]>,
    now: Time48,
) -> Result<(), TsigError> {
    let tsig = check_mac(packet, key, prior_mac)?;
    if !tsig.is_valid_at(now) {
        debug!(
            "TSIG signed at {} is outside fudge {} of {}",
            tsig.time_signed(),
            tsig.fudge(),
            now
        );
        return Err(TsigError::BadTime);
    }
    Ok(())
}

/// Checks the MAC of a message and returns its TSIG data.
fn check_mac(
    packet: &[u8],
    key: &Key,
    prior_mac: Option<&[u8]>,
) -> Result<Tsig, TsigError> {
    let (mut section, start, record) = find_tsig(packet)?;
    let tsig = Tsig::from_rdata(record.data()).ok_or(TsigError::FormErr)?;
    if !key.check_tsig(&record, &tsig) {
        return Err(TsigError::BadKey);
    }

    // The message as it was before the TSIG record was added.
    section.counts_mut().dec_arcount()?;
    section.header_mut().set_id(tsig.original_id());

    let variables = Variables {
        time_signed: tsig.time_signed(),
        fudge: tsig.fudge(),
        error: tsig.error(),
        other: tsig.other().clone(),
    };
    let mut input = Vec::with_capacity(start + 128);
    compose_prior_mac(prior_mac, &mut input)?;
    section.compose(&mut input)?;
    input.extend_from_slice(&packet[HeaderSection::LEN..start]);
    variables.compose(key, &mut input)?;
    let expected = key.algorithm.mac(&key.secret, &input)?;
    key.compare_macs(&expected, tsig.mac())?;
    Ok(tsig)
}

/// Finds the TSIG record of a message.
///
/// Returns the header section, the position where the last additional
/// record starts, and that record. Fails if there is no such record or it
/// isn’t a TSIG record.
fn find_tsig(
    packet: &[u8],
) -> Result<(HeaderSection, usize, Record), TsigError> {
    let mut parser = Parser::from_ref(packet);
    let section = HeaderSection::parse(&mut parser)?;
    let counts = *section.counts();
    if counts.arcount() == 0 {
        return Err(TsigError::FormErr);
    }
    for _ in 0..counts.qdcount() {
        Question::parse(&mut parser)?;
    }
    let before = u32::from(counts.ancount())
        + u32::from(counts.nscount())
        + u32::from(counts.arcount())
        - 1;
    for _ in 0..before {
        Record::parse(&mut parser)?;
    }
    let start = parser.pos();
    let record = Record::parse(&mut parser)?;
    if Tsig::from_rdata(record.data()).is_none() {
        return Err(TsigError::FormErr);
    }
    Ok((section, start, record))
}

/// Adds the prior MAC, if any, to the MAC input.
fn compose_prior_mac(
    prior_mac: Option<&[u8]>,
    target: &mut Vec<u8>,
) -> Result<(), ComposeError> {
    match prior_mac {
        Some(mac) => compose_len_prefixed(target, |target| {
            target.extend_from_slice(mac);
            Ok(())
        }),
        None => Ok(()),
    }
}

//------------ Variables -----------------------------------------------------

/// The TSIG variables that aren’t part of the key.
#[derive(Clone, Debug)]
struct Variables {
    /// The time the signature was created.
    time_signed: Time48,

    /// The permitted difference in seconds to the current time.
    fudge: u16,

    /// The TSIG error code.
    error: TsigRcode,

    /// The content of the ‘other’ field.
    other: Bytes,
}

impl Variables {
    /// Appends the variables including key information to the MAC input.
    fn compose(
        &self,
        key: &Key,
        target: &mut Vec<u8>,
    ) -> Result<(), ComposeError> {
        // Key name, in canonical wire format
        key.name.compose_canonical(target);
        // CLASS (always ANY)
        Class::ANY.compose(target)?;
        // TTL (always 0)
        0u32.compose(target)?;
        // Algorithm name, in canonical wire format
        target.extend_from_slice(key.algorithm.into_wire_slice());
        self.time_signed.compose(target)?;
        self.fudge.compose(target)?;
        self.error.compose(target)?;
        compose_len_prefixed(target, |target| {
            target.extend_from_slice(&self.other);
            Ok(())
        })
    }

    /// Produces the TSIG record.
    fn into_record(self, key: &Key, mac: Bytes, original_id: u16) -> Record {
        Record::new(
            key.name.clone(),
            Class::ANY,
            0,
            Tsig::new(
                key.algorithm.to_dname(),
                self.time_signed,
                self.fudge,
                mac,
                original_id,
                self.error,
                self.other,
            )
            .into_rdata(),
        )
    }
}

//------------ Algorithm -----------------------------------------------------

/// The supported TSIG algorithms.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// Creates a value from its domain name representation.
    ///
    /// Returns `None` if the name doesn’t represent a known algorithm.
    pub fn from_dname(name: &Dname) -> Option<Self> {
        [
            Algorithm::Md5,
            Algorithm::Sha1,
            Algorithm::Sha256,
            Algorithm::Sha384,
            Algorithm::Sha512,
        ]
        .into_iter()
        .find(|alg| alg.to_dname() == *name)
    }

    /// Returns the wire-format domain name for this value.
    fn into_wire_slice(self) -> &'static [u8] {
        match self {
            Algorithm::Md5 => b"\x08hmac-md5\x07sig-alg\x03reg\x03int\0",
            Algorithm::Sha1 => b"\x09hmac-sha1\0",
            Algorithm::Sha256 => b"\x0Bhmac-sha256\0",
            Algorithm::Sha384 => b"\x0Bhmac-sha384\0",
            Algorithm::Sha512 => b"\x0Bhmac-sha512\0",
        }
    }

    /// Returns a domain name for this value.
    pub fn to_dname(self) -> Dname {
        // SAFETY: All wire slices are valid absolute names.
        unsafe { Dname::from_static_unchecked(self.into_wire_slice()) }
    }

    /// Returns the native length of a signature created with this algorithm.
    pub fn native_len(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
            Algorithm::Sha384 => 48,
            Algorithm::Sha512 => 64,
        }
    }

    /// Returns the shortest MAC allowed for this algorithm.
    pub fn min_mac_len(self) -> usize {
        cmp::max(MIN_MAC_LEN, self.native_len() / 2)
    }

    /// Returns the allowed MAC lengths with the native length as default.
    fn mac_len(self) -> DefMinMax<usize> {
        DefMinMax::new(self.native_len(), self.min_mac_len(), self.native_len())
    }

    /// Calculates the full-length MAC over some data.
    fn mac(self, secret: &[u8], data: &[u8]) -> Result<Vec<u8>, TsigError> {
        let alg = match self {
            Algorithm::Md5 => {
                // ring doesn’t do MD5.
                let pkey =
                    PKey::hmac(secret).map_err(|_| TsigError::Crypto)?;
                let mut signer =
                    openssl::sign::Signer::new(MessageDigest::md5(), &pkey)
                        .map_err(|_| TsigError::Crypto)?;
                signer.update(data).map_err(|_| TsigError::Crypto)?;
                return signer.sign_to_vec().map_err(|_| TsigError::Crypto);
            }
            Algorithm::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Algorithm::Sha256 => hmac::HMAC_SHA256,
            Algorithm::Sha384 => hmac::HMAC_SHA384,
            Algorithm::Sha512 => hmac::HMAC_SHA512,
        };
        let key = hmac::Key::new(alg, secret);
        Ok(hmac::sign(&key, data).as_ref().to_vec())
    }
}

//--- FromStr

impl str::FromStr for Algorithm {
    type Err = TsigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('.').to_ascii_lowercase().as_str() {
            "hmac-md5" | "hmac-md5.sig-alg.reg.int" => Ok(Algorithm::Md5),
            "hmac-sha1" => Ok(Algorithm::Sha1),
            "hmac-sha256" => Ok(Algorithm::Sha256),
            "hmac-sha384" => Ok(Algorithm::Sha384),
            "hmac-sha512" => Ok(Algorithm::Sha512),
            _ => Err(TsigError::UnsupportedAlgorithm),
        }
    }
}

//--- Display

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Algorithm::Md5 => "hmac-md5.sig-alg.reg.int",
            Algorithm::Sha1 => "hmac-sha1",
            Algorithm::Sha256 => "hmac-sha256",
            Algorithm::Sha384 => "hmac-sha384",
            Algorithm::Sha512 => "hmac-sha512",
        })
    }
}

//============ Error Types ===================================================

//------------ TsigError -----------------------------------------------------

/// Signing or verifying a message failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TsigError {
    /// The algorithm isn’t supported.
    UnsupportedAlgorithm,

    /// The message or its TSIG record is malformed.
    FormErr,

    /// The MAC is not correct.
    MacMismatch,

    /// The TSIG record was made with a different key.
    BadKey,

    /// The signing time is outside the fudge.
    BadTime,

    /// The cryptographic backend failed.
    Crypto,
}

impl TsigError {
    /// Returns the TSIG error code to use in an answer.
    pub fn rcode(self) -> TsigRcode {
        match self {
            TsigError::BadKey | TsigError::UnsupportedAlgorithm => {
                TsigRcode::BADKEY
            }
            TsigError::BadTime => TsigRcode::BADTIME,
            TsigError::MacMismatch => TsigRcode::BADSIG,
            TsigError::FormErr => TsigRcode::FORMERR,
            TsigError::Crypto => TsigRcode::SERVFAIL,
        }
    }
}

impl From<ParseError> for TsigError {
    fn from(_: ParseError) -> Self {
        TsigError::FormErr
    }
}

impl From<ComposeError> for TsigError {
    fn from(_: ComposeError) -> Self {
        TsigError::FormErr
    }
}

impl fmt::Display for TsigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            TsigError::UnsupportedAlgorithm => "unsupported TSIG algorithm",
            TsigError::FormErr => "malformed message",
            TsigError::MacMismatch => "bad MAC",
            TsigError::BadKey => "unknown key",
            TsigError::BadTime => "signing time out of range",
            TsigError::Crypto => "crypto backend failure",
        })
    }
}

impl std::error::Error for TsigError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::message::Message;
    use crate::base::header::Header;
    use crate::logging::init_logging;
    use core::str::FromStr;
    use rstest::rstest;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn name(s: &str) -> Dname {
        Dname::from_str(s).unwrap()
    }

    fn key(algorithm: Algorithm) -> Key {
        Key::new(name("transfer.example"), algorithm, SECRET)
    }

    fn request() -> Vec<u8> {
        let mut header = Header::new();
        header.set_id(0x4d2a);
        header.set_rd(true);
        let mut msg = Message::with_header(header);
        msg.push_question((name("example.com"), Rtype::SOA));
        msg.encode().unwrap()
    }

    fn signed(key: &Key, time: u64) -> Vec<u8> {
        let mut packet = request();
        let record = sign_at(
            &packet,
            key,
            DEFAULT_FUDGE,
            None,
            Time48::from_u64(time),
        )
        .unwrap();
        packet[11] += 1;
        record.compose(&mut packet).unwrap();
        packet
    }

    #[rstest]
    #[case(Algorithm::Md5)]
    #[case(Algorithm::Sha1)]
    #[case(Algorithm::Sha256)]
    #[case(Algorithm::Sha384)]
    #[case(Algorithm::Sha512)]
    fn sign_then_verify(#[case] algorithm: Algorithm) {
        init_logging();
        let key = key(algorithm);
        let packet = signed(&key, 1_700_000_000);
        assert!(verify(&packet, &key, None));

        let msg = Message::decode(&packet).unwrap();
        let tsig = Tsig::from_rdata(msg.additional()[0].data()).unwrap();
        assert_eq!(tsig.mac().len(), algorithm.native_len());
        assert_eq!(tsig.original_id(), 0x4d2a);
        assert_eq!(tsig.algorithm(), &algorithm.to_dname());
    }

    #[test]
    fn altered_secret_or_body() {
        let key = key(Algorithm::Sha256);
        let packet = signed(&key, 1_700_000_000);

        let mut secret = SECRET.to_vec();
        secret[0] ^= 1;
        let other = Key::new(key.name().clone(), Algorithm::Sha256, secret);
        assert!(!verify(&packet, &other, None));

        let mut altered = packet.clone();
        altered[2] ^= 0x01;
        assert!(!verify(&altered, &key, None));
    }

    #[test]
    fn changed_id_is_accepted() {
        // Forwarders may change the ID, the original ID is in the record.
        let key = key(Algorithm::Sha256);
        let mut packet = signed(&key, 1_700_000_000);
        packet[0] = 0;
        packet[1] = 1;
        assert!(verify(&packet, &key, None));
    }

    #[test]
    fn prior_mac() {
        let key = key(Algorithm::Sha1);
        let mut answer = request();
        let prior = &b"request mac"[..];
        let record = sign_message(&mut answer, &key, Some(prior)).unwrap();
        assert_eq!(answer[11], 1);
        assert_eq!(record.class(), Class::ANY);
        assert_eq!(record.ttl(), 0);
        assert!(verify(&answer, &key, Some(prior)));
        assert!(!verify(&answer, &key, Some(&b"other mac"[..])));
        assert!(!verify(&answer, &key, None));
    }

    #[test]
    fn verify_at_errors() {
        let key = key(Algorithm::Sha256);
        let packet = signed(&key, 1_700_000_000);
        assert_eq!(
            verify_at(&packet, &key, None, Time48::from_u64(1_700_000_300)),
            Ok(())
        );
        assert_eq!(
            verify_at(&packet, &key, None, Time48::from_u64(1_700_000_301)),
            Err(TsigError::BadTime)
        );
        let other = Key::new(name("other.example"), Algorithm::Sha256, SECRET);
        assert_eq!(
            verify_at(&packet, &other, None, Time48::from_u64(1_700_000_000)),
            Err(TsigError::BadKey)
        );
        let other = Key::new(key.name().clone(), Algorithm::Sha512, SECRET);
        assert_eq!(
            verify_at(&packet, &other, None, Time48::from_u64(1_700_000_000)),
            Err(TsigError::BadKey)
        );
        assert_eq!(
            verify_at(&request(), &key, None, Time48::from_u64(0)),
            Err(TsigError::FormErr)
        );
    }

    #[test]
    fn malformed_is_not_verified() {
        let key = key(Algorithm::Sha256);
        let packet = signed(&key, 1_700_000_000);
        for len in 0..packet.len() {
            assert!(!verify(&packet[..len], &key, None));
        }
    }

    #[test]
    fn truncated_macs() {
        let key = key(Algorithm::Sha256).with_signing_len(16);
        assert_eq!(key.signing_len(), 16);
        let packet = signed(&key, 1_700_000_000);
        assert!(!verify(&packet, &key, None));
        assert!(verify(&packet, &key.clone().with_min_mac_len(16), None));
        assert_eq!(key.clone().with_min_mac_len(1).min_mac_len(), 16);
        assert_eq!(key.with_min_mac_len(100).min_mac_len(), 32);
    }

    #[test]
    fn algorithm_names() {
        assert_eq!(
            Algorithm::from_dname(&name("HMAC-MD5.SIG-ALG.REG.INT")),
            Some(Algorithm::Md5)
        );
        assert_eq!(
            Algorithm::from_dname(&name("hmac-sha256")),
            Some(Algorithm::Sha256)
        );
        assert_eq!(Algorithm::from_dname(&name("hmac-sha224")), None);
        assert_eq!(Algorithm::from_str("hmac-sha384."), Ok(Algorithm::Sha384));
        assert_eq!(
            Algorithm::from_str("gss-tsig"),
            Err(TsigError::UnsupportedAlgorithm)
        );
        assert_eq!(Algorithm::Md5.min_mac_len(), 10);
        assert_eq!(Algorithm::Sha512.min_mac_len(), 32);
    }

    #[test]
    fn base64_key() {
        let key = Key::from_base64(
            name("key.example"),
            Algorithm::Sha256,
            "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=",
        )
        .unwrap();
        assert_eq!(key.secret.as_ref(), SECRET);
        assert!(Key::from_base64(name("k"), Algorithm::Sha1, "!!").is_err());
        let generated =
            Key::generate(name("k"), Algorithm::Sha384).unwrap();
        assert_eq!(generated.secret.len(), 48);
    }
}
