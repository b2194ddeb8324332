//! DNS response codes.
//!
//! The message header carries a four bit response code represented by
//! [`Rcode`]. The TSIG record carries its own 16 bit error code which
//! shares the same registry but adds a few values of its own. It is
//! represented by [`TsigRcode`].

//------------ Rcode ---------------------------------------------------------

int_enum! {
    /// DNS Response Codes.
    ///
    /// The response code of a response indicates what happend on the server
    /// when trying to answer the query. Only the lower four bits are
    /// available in the header.
    =>
    Rcode, u8;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// Format error.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    (REFUSED => 5, "REFUSED")

    /// Name exists when it should not.
    (YXDOMAIN => 6, "YXDOMAIN")

    /// RR set exists when it should not.
    (YXRRSET => 7, "YXRRSET")

    /// RR set that should exist does not.
    (NXRRSET => 8, "NXRRSET")

    /// Server not authoritative for zone or client not authorized.
    ///
    /// TSIG failures are reported with this code.
    (NOTAUTH => 9, "NOTAUTH")

    /// Name not contained in zone.
    (NOTZONE => 10, "NOTZONE")
}

int_enum_str_with_decimal!(Rcode, u8, "unknown rcode");

//------------ TsigRcode -----------------------------------------------------

pub mod tsig {
    //! The response code of the TSIG error field.

    int_enum! {
        /// Response codes for transaction authentication (TSIG).
        ///
        /// TSIG and TKEY resource records contain a 16 bit wide error
        /// field whose values are an extension of the standard DNS
        /// [`Rcode`](super::Rcode).
        ///
        /// See [RFC 8945] for the values used by TSIG.
        ///
        /// [RFC 8945]: https://tools.ietf.org/html/rfc8945
        =>
        TsigRcode, u16;

        /// No error condition.
        (NOERROR => 0, "NOERROR")

        /// Format error.
        (FORMERR => 1, "FORMERR")

        /// Server failure.
        (SERVFAIL => 2, "SERVFAIL")

        /// Server not authoritative or client not authorized.
        (NOTAUTH => 9, "NOTAUTH")

        /// TSIG signature failure.
        (BADSIG => 16, "BADSIG")

        /// Key not recognized.
        (BADKEY => 17, "BADKEY")

        /// Signature out of time window.
        (BADTIME => 18, "BADTIME")

        /// Bad truncation.
        (BADTRUNC => 22, "BADTRUNC")
    }

    int_enum_str_with_decimal!(TsigRcode, u16, "unknown TSIG error");
}

pub use self::tsig::TsigRcode;
