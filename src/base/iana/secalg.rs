//! DNSSEC Algorithm Numbers

//------------ SecAlg -------------------------------------------------------

int_enum! {
    /// Security Algorithm Numbers.
    ///
    /// These numbers are used in various security related record types.
    /// This type covers the whole registry, including values for which no
    /// cryptographic support exists in this crate. Which algorithms can
    /// actually be used is decided by
    /// [`dnssec::Algorithm`](crate::dnssec::Algorithm).
    ///
    /// For the currently registered values see the [IANA registration].
    ///
    /// [IANA registration]: http://www.iana.org/assignments/dns-sec-alg-numbers/dns-sec-alg-numbers.xhtml#dns-sec-alg-numbers-1
    =>
    SecAlg, u8;

    /// Delete DS
    (DELETE => 0, "DELETE")

    /// RSA/MD5
    ///
    /// This algorithm was described in RFC 2537 and since has been
    /// deprecated due to weaknesses of the MD5 hash algorithm by RFC 3110.
    (RSAMD5 => 1, "RSAMD5")

    /// Diffie-Hellman
    ///
    /// Can only be used for storing keys, never for signing.
    (DH => 2, "DH")

    /// DSA/SHA1
    ///
    /// This algorithm is described in RFC 2536.
    (DSA => 3, "DSA")

    /// Elliptic curve cryptography, reserved.
    (ECC => 4, "ECC")

    /// RSA/SHA-1
    ///
    /// This algorithm is described in RFC 3110.
    (RSASHA1 => 5, "RSASHA1")

    /// DSA-NSEC3-SHA1
    (DSA_NSEC3_SHA1 => 6, "DSA-NSEC3-SHA1")

    /// RSASHA1-NSEC3-SHA1
    (RSASHA1_NSEC3_SHA1 => 7, "RSASHA1-NSEC3-SHA1")

    /// RSA/SHA-256
    ///
    /// This algorithm is described in RFC 5702.
    (RSASHA256 => 8, "RSASHA256")

    /// RSA/SHA-512
    ///
    /// This algorithm is described in RFC 5702.
    (RSASHA512 => 10, "RSASHA512")

    /// ECDSA Curve P-256 with SHA-256
    (ECDSAP256SHA256 => 13, "ECDSAP256SHA256")

    /// ECDSA Curve P-384 with SHA-384
    (ECDSAP384SHA384 => 14, "ECDSAP384SHA384")

    /// ED25519
    (ED25519 => 15, "ED25519")

    /// Reserved for Indirect Keys
    (INDIRECT => 252, "INDIRECT")

    /// A private algorithm identified by a domain name.
    (PRIVATEDNS => 253, "PRIVATEDNS")

    /// A private algorithm identified by a ISO OID.
    (PRIVATEOID => 254, "PRIVATEOID")
}

int_enum_str_with_decimal!(SecAlg, u8, "unknown algorithm");
