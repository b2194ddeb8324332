mod common;

use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::Bytes;
use common::{init_logging, name, record};
use dnsmsg::base::iana::{Class, Opcode, Rcode, Rtype};
use dnsmsg::base::{Header, Message, ParseError, Section};
use dnsmsg::rdata::{Rdata, RdataField};

fn sample() -> Message {
    let mut header = Header::new();
    header.set_id(0x0815);
    header.set_qr(true);
    header.set_aa(true);
    header.set_opcode(Opcode::QUERY);
    header.set_rcode(Rcode::NOERROR);
    let mut msg = Message::with_header(header);
    msg.push_question((name("example.com"), Rtype::MX, Class::IN));
    msg.push(
        Section::Answer,
        record(
            "example.com",
            3600,
            Rtype::MX,
            vec![RdataField::Int16(10), RdataField::Dname(name("mail.example.com"))],
        ),
    );
    msg.push(
        Section::Authority,
        record(
            "example.com",
            3600,
            Rtype::SOA,
            vec![
                RdataField::Dname(name("ns.example.com")),
                RdataField::Dname(name("hostmaster.example.com")),
                RdataField::Int32(2024010101),
                RdataField::Int32(7200),
                RdataField::Int32(3600),
                RdataField::Int32(1209600),
                RdataField::Int32(300),
            ],
        ),
    );
    msg.push(
        Section::Additional,
        record(
            "mail.example.com",
            300,
            Rtype::A,
            vec![RdataField::A(Ipv4Addr::new(192, 0, 2, 25))],
        ),
    );
    msg.push(
        Section::Additional,
        record(
            "mail.example.com",
            300,
            Rtype::AAAA,
            vec![RdataField::Aaaa(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 25))],
        ),
    );
    msg.push(
        Section::Additional,
        record(
            "mail.example.com",
            300,
            Rtype::TXT,
            vec![
                RdataField::Str(Bytes::from_static(b"v=spf1 -all")),
                RdataField::Str(Bytes::from_static(b"")),
            ],
        ),
    );
    msg.push(
        Section::Additional,
        dnsmsg::base::Record::new(
            name("mail.example.com"),
            Class::IN,
            300,
            Rdata::unknown(Rtype::from_int(65280), Bytes::from_static(b"\xde\xad\xbe\xef"))
                .unwrap(),
        ),
    );
    msg
}

#[test]
fn round_trip() {
    init_logging();
    let msg = sample();
    let wire = dnsmsg::encode(&msg).unwrap();
    assert_eq!(&wire[4..12], b"\0\x01\0\x01\0\x01\0\x04");

    let decoded = dnsmsg::decode(&wire).unwrap();
    assert_eq!(decoded, msg);
    assert_eq!(dnsmsg::encode(&decoded).unwrap(), wire);

    // Encoding is deterministic.
    assert_eq!(dnsmsg::encode(&msg).unwrap(), wire);
}

#[test]
fn every_prefix_is_truncated() {
    let wire = dnsmsg::encode(&sample()).unwrap();
    for len in 0..wire.len() {
        assert_eq!(
            dnsmsg::decode(&wire[..len]),
            Err(ParseError::Truncated),
            "prefix of {} octets",
            len
        );
    }
}

#[test]
fn altered_octets_never_panic() {
    let wire = dnsmsg::encode(&sample()).unwrap();
    for pos in 0..wire.len() {
        for value in [0x00, 0x01, 0x3f, 0x40, 0x7f, 0xc0, 0xff] {
            let mut altered = wire.clone();
            altered[pos] = value;
            // Anything goes as long as it doesn’t panic.
            let _ = dnsmsg::decode(&altered);
        }
    }
}

#[test]
fn inflated_counts() {
    let mut wire = dnsmsg::encode(&sample()).unwrap();
    for pos in [4, 6, 8, 10] {
        wire[pos] = 0xff;
        wire[pos + 1] = 0xff;
    }
    assert!(dnsmsg::decode(&wire).is_err());

    // Counts alone, without any data, are truncated.
    assert_eq!(
        dnsmsg::decode(b"\0\0\0\0\xff\xff\xff\xff\xff\xff\xff\xff"),
        Err(ParseError::Truncated)
    );
}

#[test]
fn compression_loops() {
    // The question name points at itself.
    let wire = b"\0\0\0\0\0\x01\0\0\0\0\0\0\xc0\x0c\0\x01\0\x01";
    assert_eq!(dnsmsg::decode(wire), Err(ParseError::MalformedName));

    // Two names pointing at each other.
    let wire = b"\0\0\0\0\0\x02\0\0\0\0\0\0\
                 \x01a\xc0\x14\0\x01\0\x01\
                 \x01b\xc0\x0c\0\x01\0\x01";
    assert_eq!(dnsmsg::decode(wire), Err(ParseError::MalformedName));

    // A forward pointer past the end of the message.
    let wire = b"\0\0\0\0\0\x01\0\0\0\0\0\0\xc0\xff\0\x01\0\x01";
    assert_eq!(dnsmsg::decode(wire), Err(ParseError::MalformedName));
}

#[test]
fn rdata_length_mismatch() {
    // An A record claiming five octets of data.
    let wire = b"\0\0\0\0\0\0\0\x01\0\0\0\0\
                 \0\0\x01\0\x01\0\0\0\x3c\0\x05\xc0\0\x02\x01\x02";
    assert_eq!(dnsmsg::decode(wire), Err(ParseError::SchemaMismatch));

    // An A record claiming three octets of data.
    let wire = b"\0\0\0\0\0\0\0\x01\0\0\0\0\
                 \0\0\x01\0\x01\0\0\0\x3c\0\x03\xc0\0\x02";
    assert_eq!(dnsmsg::decode(wire), Err(ParseError::Truncated));
}
