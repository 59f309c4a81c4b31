//! Canonical orderings for the field types a criterion can compare.
//!
//! Every constructor family funnels its operands through these functions so
//! that a bound stored at construction time and a value seen at evaluation
//! time are compared on the same scale.

use std::cmp::Ordering;
use std::net::IpAddr;

use chrono::{DateTime, SubsecRound, Utc};

/// Canonical 16-byte form of an address.
///
/// IPv4 addresses are mapped into IPv6 (`::ffff:a.b.c.d`), so the two
/// encodings of the same IPv4 address compare equal.
pub fn canonical_ip(addr: IpAddr) -> [u8; 16] {
    match addr {
        IpAddr::V4(v4) => v4.to_ipv6_mapped().octets(),
        IpAddr::V6(v6) => v6.octets(),
    }
}

/// Compares two optional addresses byte-wise in canonical form.
///
/// An absent address sorts before every present one.
pub fn compare_ips(a: Option<IpAddr>, b: Option<IpAddr>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => canonical_ip(a).cmp(&canonical_ip(b)),
    }
}

/// Normalizes a timestamp for comparison: UTC, whole seconds.
pub fn normalize_time(time: DateTime<Utc>) -> DateTime<Utc> {
    time.trunc_subsecs(0)
}

/// Collation key: ASCII-folded and lowercased.
pub fn collation_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings in collation order.
///
/// Strings with equal keys fall back to lexical order so the result is a
/// total order.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
