//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource record has a 16 bit type value indicating what kind of
    /// information is represented by the record. A few additional types,
    /// called query types, are defined as well and can only be used in
    /// questions. This type represents both.
    ///
    /// Only types for which this crate knows the record data layout, plus
    /// the query types, have constants here. Any other value can still be
    /// represented and its record data is kept as an opaque blob.
    ///
    /// The currently assigned values are maintained in an [IANA registry].
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// A mail destination (obsolete).
    (MD => 3, "MD")

    /// A mail forwarder (obsolete).
    (MF => 4, "MF")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A mailbox domain name (experimental).
    (MB => 7, "MB")

    /// A mail group member (experimental).
    (MG => 8, "MG")

    /// A mail rename domain name (experimental).
    (MR => 9, "MR")

    /// A null resource record (experimental).
    (NULL => 10, "NULL")

    /// A well known service description.
    (WKS => 11, "WKS")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mailbox or mail list information.
    (MINFO => 14, "MINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// For Responsible Person.
    (RP => 17, "RP")

    /// For AFS Data Base location.
    (AFSDB => 18, "AFSDB")

    /// For X.25 PSDN address.
    (X25 => 19, "X25")

    /// For ISDN address.
    (ISDN => 20, "ISDN")

    /// For Route Through.
    (RT => 21, "RT")

    /// For NSAP address, NSAP style A record.
    (NSAP => 22, "NSAP")

    /// For domain name pointer, NSAP style.
    (NSAPPTR => 23, "NSAP-PTR")

    /// For security signature.
    (SIG => 24, "SIG")

    /// For security key.
    (KEY => 25, "KEY")

    /// X.400 mail mapping information.
    (PX => 26, "PX")

    /// Geographical position.
    (GPOS => 27, "GPOS")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// Location information.
    (LOC => 29, "LOC")

    /// Next domain (obsolete).
    (NXT => 30, "NXT")

    /// Server selection.
    (SRV => 33, "SRV")

    /// Naming authority pointer.
    (NAPTR => 35, "NAPTR")

    /// Key exchanger.
    (KX => 36, "KX")

    /// CERT
    (CERT => 37, "CERT")

    /// DNAME
    (DNAME => 39, "DNAME")

    /// OPT
    (OPT => 41, "OPT")

    /// Delegation signer.
    (DS => 43, "DS")

    /// SSH key fingerprint.
    (SSHFP => 44, "SSHFP")

    /// RRSIG
    (RRSIG => 46, "RRSIG")

    /// NSEC
    (NSEC => 47, "NSEC")

    /// DNSKEY
    (DNSKEY => 48, "DNSKEY")

    /// Transaction signature.
    (TSIG => 250, "TSIG")

    /// Incremental transfer.
    (IXFR => 251, "IXFR")

    /// Transfer of an entire zone.
    (AXFR => 252, "AXFR")

    /// A request for all records the server/cache has available.
    (ANY => 255, "ANY")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16, "unknown record type");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Rtype;
    use core::str::FromStr;

    #[test]
    fn mnemonics() {
        assert_eq!(Rtype::from_str("rrsig").unwrap(), Rtype::RRSIG);
        assert_eq!(Rtype::from_str("NSAP-PTR").unwrap(), Rtype::NSAPPTR);
        assert_eq!(Rtype::from_str("TYPE65280").unwrap().to_int(), 65280);
        assert_eq!(Rtype::from_int(65280).to_string(), "TYPE65280");
        assert_eq!(Rtype::DNSKEY.to_string(), "DNSKEY");
    }
}
