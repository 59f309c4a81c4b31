//! Criteria over optional IP addresses.
//!
//! Both operands are compared in canonical 16-byte form, so `10.1.10.1` and
//! `::ffff:10.1.10.1` are the same address. An absent address only satisfies
//! [`is_null_ip`]; for ordering it sits below every real address.
//!
//! Address literals are parsed when the criterion is built. An unparsable
//! literal is a programming error and panics right there.

use std::net::{IpAddr, Ipv6Addr};

use super::{Criterion, Limits, PLACEHOLDER};
use crate::op::Op;
use crate::ordering::{canonical_ip, compare_ips};

/// Field type the IP criteria apply to.
pub type Address = Option<IpAddr>;

fn parse_ip(literal: &str) -> IpAddr {
    literal
        .trim()
        .parse()
        .unwrap_or_else(|err| panic!("invalid IP address literal {literal:?}: {err}"))
}

fn canonical(addr: IpAddr) -> Address {
    Some(IpAddr::V6(Ipv6Addr::from(canonical_ip(addr))))
}

fn compare_ip(op: Op, literal: &str) -> Criterion<Address> {
    let bound = parse_ip(literal);
    let limits = match op {
        Op::Eq => Limits::exactly(canonical(bound)),
        Op::Lt | Op::Lte => Limits::at_most(canonical(bound)),
        Op::Gt | Op::Gte => Limits::at_least(canonical(bound)),
    };
    Criterion::new(
        move |addr: &Address| op.eval_ordering(compare_ips(*addr, Some(bound))),
        format!("{PLACEHOLDER} {op} {bound}"),
        format!("{PLACEHOLDER} {} {bound}", op.complement_str()),
    )
    .with_limits(limits)
}

/// Address equals `literal`.
pub fn equals_ip(literal: &str) -> Criterion<Address> {
    compare_ip(Op::Eq, literal)
}

/// Address sorts strictly before `literal`. Absent addresses qualify.
pub fn is_less_than_ip(literal: &str) -> Criterion<Address> {
    compare_ip(Op::Lt, literal)
}

/// Address sorts before or equals `literal`. Absent addresses qualify.
pub fn is_less_than_or_equals_ip(literal: &str) -> Criterion<Address> {
    compare_ip(Op::Lte, literal)
}

/// Address sorts strictly after `literal`.
pub fn is_greater_than_ip(literal: &str) -> Criterion<Address> {
    compare_ip(Op::Gt, literal)
}

/// Address sorts after or equals `literal`.
pub fn is_greater_than_or_equals_ip(literal: &str) -> Criterion<Address> {
    compare_ip(Op::Gte, literal)
}

/// Address lies in the closed range `[start, end]`.
pub fn is_between_ips(start: &str, end: &str) -> Criterion<Address> {
    let lo = parse_ip(start);
    let hi = parse_ip(end);
    Criterion::new(
        move |addr: &Address| {
            compare_ips(*addr, Some(lo)).is_ge() && compare_ips(*addr, Some(hi)).is_le()
        },
        format!("{PLACEHOLDER} between {lo} and {hi}"),
        format!("{PLACEHOLDER} not between {lo} and {hi}"),
    )
    .with_limits(Limits::between(canonical(lo), canonical(hi)))
}

/// Address is absent.
pub fn is_null_ip() -> Criterion<Address> {
    Criterion::new(
        |addr: &Address| addr.is_none(),
        format!("{PLACEHOLDER} is null"),
        format!("{PLACEHOLDER} is not null"),
    )
    .with_limits(Limits::exactly(None))
}
