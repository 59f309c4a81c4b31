//! Criteria over string fields.
//!
//! Ordering comparisons are plain lexical (byte) order. The `collates_*`
//! family compares in collation order instead (see
//! [`collate`](crate::ordering::collate)); since that order differs from the
//! lexical one, those criteria carry no limits.

use regex::Regex;

use super::{Criterion, Limits, PLACEHOLDER};
use crate::error::Result;
use crate::op::Op;
use crate::ordering::collate;

fn compare_string(op: Op, bound: &str) -> Criterion<String> {
    let limits = match op {
        Op::Eq => Limits::exactly(bound.to_string()),
        Op::Lt | Op::Lte => Limits::at_most(bound.to_string()),
        Op::Gt | Op::Gte => Limits::at_least(bound.to_string()),
    };
    let owned = bound.to_string();
    Criterion::new(
        move |s: &String| op.eval_ordering(s.as_str().cmp(owned.as_str())),
        format!("{PLACEHOLDER} {op} {bound:?}"),
        format!("{PLACEHOLDER} {} {bound:?}", op.complement_str()),
    )
    .with_limits(limits)
}

fn collation_words(op: Op) -> &'static str {
    match op {
        Op::Eq => "collates equal to",
        Op::Lt => "collates before",
        Op::Lte => "collates before or equals",
        Op::Gt => "collates after",
        Op::Gte => "collates after or equals",
    }
}

fn compare_collated(op: Op, bound: &str) -> Criterion<String> {
    let owned = bound.to_string();
    let not_words = op
        .complement()
        .map_or("does not collate equal to", collation_words);
    Criterion::new(
        move |s: &String| op.eval_ordering(collate(s, &owned)),
        format!("{PLACEHOLDER} {} {bound:?}", collation_words(op)),
        format!("{PLACEHOLDER} {not_words} {bound:?}"),
    )
}

/// String equals `value`.
pub fn equals_string(value: &str) -> Criterion<String> {
    compare_string(Op::Eq, value)
}

/// String sorts strictly before `value`.
pub fn is_less_than_string(value: &str) -> Criterion<String> {
    compare_string(Op::Lt, value)
}

/// String sorts before or equals `value`.
pub fn is_less_than_or_equals_string(value: &str) -> Criterion<String> {
    compare_string(Op::Lte, value)
}

/// String sorts strictly after `value`.
pub fn is_greater_than_string(value: &str) -> Criterion<String> {
    compare_string(Op::Gt, value)
}

/// String sorts after or equals `value`.
pub fn is_greater_than_or_equals_string(value: &str) -> Criterion<String> {
    compare_string(Op::Gte, value)
}

/// String lies in the closed lexical range `[start, end]`.
pub fn is_between_strings(start: &str, end: &str) -> Criterion<String> {
    let (lo, hi) = (start.to_string(), end.to_string());
    let limits = Limits::between(lo.clone(), hi.clone());
    Criterion::new(
        move |s: &String| lo.as_str() <= s.as_str() && s.as_str() <= hi.as_str(),
        format!("{PLACEHOLDER} between {start:?} and {end:?}"),
        format!("{PLACEHOLDER} not between {start:?} and {end:?}"),
    )
    .with_limits(limits)
}

/// String is empty.
pub fn is_null_string() -> Criterion<String> {
    Criterion::new(
        |s: &String| s.is_empty(),
        format!("{PLACEHOLDER} is empty"),
        format!("{PLACEHOLDER} is not empty"),
    )
    .with_limits(Limits::exactly(String::new()))
}

/// String collates strictly before `value`.
pub fn collates_before(value: &str) -> Criterion<String> {
    compare_collated(Op::Lt, value)
}

/// String collates before or equal to `value`.
pub fn collates_before_or_equals(value: &str) -> Criterion<String> {
    compare_collated(Op::Lte, value)
}

/// String collates strictly after `value`.
pub fn collates_after(value: &str) -> Criterion<String> {
    compare_collated(Op::Gt, value)
}

/// String collates after or equal to `value`.
pub fn collates_after_or_equals(value: &str) -> Criterion<String> {
    compare_collated(Op::Gte, value)
}

/// String matches a regular expression.
///
/// Returns an error if the pattern is invalid.
pub fn matches_regex(pattern: &str) -> Result<Criterion<String>> {
    let regex = Regex::new(pattern)?;
    Ok(Criterion::new(
        move |s: &String| regex.is_match(s),
        format!("{PLACEHOLDER} =~ /{pattern}/"),
        format!("{PLACEHOLDER} !~ /{pattern}/"),
    ))
}
