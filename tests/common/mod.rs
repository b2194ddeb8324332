#![allow(dead_code)]

use core::str::FromStr;

use dnsmsg::base::iana::{Class, Rtype};
use dnsmsg::base::{Dname, Record};
use dnsmsg::rdata::{Rdata, RdataField};
use tracing_subscriber::EnvFilter;

/// Sets up logging of events reported by the crate and the test suite.
///
/// Use the RUST_LOG environment variable to override the defaults.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}

pub fn name(s: &str) -> Dname {
    Dname::from_str(s).unwrap()
}

pub fn record(owner: &str, ttl: u32, rtype: Rtype, fields: Vec<RdataField>) -> Record {
    Record::new(name(owner), Class::IN, ttl, Rdata::new(rtype, fields).unwrap())
}
