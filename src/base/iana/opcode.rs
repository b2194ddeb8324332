//! DNS OpCodes.

//------------ Opcode --------------------------------------------------------

int_enum! {
    /// DNS OpCodes.
    ///
    /// The opcode specifies the kind of query to be performed. It is a
    /// four bit value stored in the message header.
    ///
    /// The opcode and its initial set of values are defined in [RFC 1035].
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    =>
    Opcode, u8;

    /// A standard query (0).
    (QUERY => 0, "QUERY")

    /// An inverse query (IQUERY) (1, obsolete).
    (IQUERY => 1, "IQUERY")

    /// A server status request (2).
    (STATUS => 2, "STATUS")

    /// A NOTIFY query (4).
    (NOTIFY => 4, "NOTIFY")

    /// An UPDATE query (5).
    (UPDATE => 5, "UPDATE")
}

int_enum_str_with_decimal!(Opcode, u8, "unknown opcode");
