//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for
    /// different network types. That is, each class has its own separate
    /// record tree starting at the root. However, in practice, only the IN
    /// class is really relevant.
    ///
    /// In addition, there are query classes or QCLASSes that are used in
    /// questions or UPDATE queries, namely NONE and ANY (or *). TSIG records
    /// always use class ANY.
    ///
    /// See [RFC 1034] for the introduction of classes and the
    /// [DNS CLASSes IANA registry] for an overview of assigned values.
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    /// [DNS CLASSes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16;

    /// Internet (IN).
    (IN => 1, "IN")

    /// Chaosnet (CH).
    (CH => 3, "CH")

    /// Hesiod (HS).
    (HS => 4, "HS")

    /// Query class None.
    (NONE => 0xFE, "NONE")

    /// Query class * (ANY).
    (ANY => 0xFF, "ANY")
}

int_enum_str_with_prefix!(Class, "CLASS", u16, "unknown class");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Class;
    use core::str::FromStr;

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Class::IN), "Class::IN");
        assert_eq!(format!("{:?}", Class::from_int(69)), "Class(69)");
    }

    #[test]
    fn from_str_and_display() {
        assert_eq!(Class::from_str("in").unwrap(), Class::IN);
        assert_eq!(Class::from_str("CLASS5").unwrap(), Class::from_int(5));
        assert!(Class::from_str("CLASSX").is_err());
        assert_eq!(Class::from_int(5).to_string(), "CLASS5");
        assert_eq!(Class::ANY.to_string(), "ANY");
    }
}
