//! Criteria over timestamps.
//!
//! Bounds and evaluated values are both normalized with
//! [`normalize_time`](crate::ordering::normalize_time) (UTC, whole seconds),
//! so a hit recorded at `01:00:00.750` equals a bound of `01:00:00`. Limits
//! are expressed on that normalized scale.

use chrono::{DateTime, SecondsFormat, Utc};

use super::{Criterion, Limits, PLACEHOLDER};
use crate::op::Op;
use crate::ordering::normalize_time;

fn display(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn compare_time(op: Op, bound: impl Into<DateTime<Utc>>) -> Criterion<DateTime<Utc>> {
    let bound = normalize_time(bound.into());
    let limits = match op {
        Op::Eq => Limits::exactly(bound),
        Op::Lt | Op::Lte => Limits::at_most(bound),
        Op::Gt | Op::Gte => Limits::at_least(bound),
    };
    let shown = display(bound);
    Criterion::new(
        move |t: &DateTime<Utc>| op.eval_ordering(normalize_time(*t).cmp(&bound)),
        format!("{PLACEHOLDER} {op} {shown}"),
        format!("{PLACEHOLDER} {} {shown}", op.complement_str()),
    )
    .with_limits(limits)
}

/// Time equals `time` (to the second).
pub fn equals_time(time: impl Into<DateTime<Utc>>) -> Criterion<DateTime<Utc>> {
    compare_time(Op::Eq, time)
}

/// Time is strictly before `time`.
pub fn is_before(time: impl Into<DateTime<Utc>>) -> Criterion<DateTime<Utc>> {
    compare_time(Op::Lt, time)
}

/// Time is before or equal to `time`.
pub fn is_before_or_equals(time: impl Into<DateTime<Utc>>) -> Criterion<DateTime<Utc>> {
    compare_time(Op::Lte, time)
}

/// Time is strictly after `time`.
pub fn is_after(time: impl Into<DateTime<Utc>>) -> Criterion<DateTime<Utc>> {
    compare_time(Op::Gt, time)
}

/// Time is after or equal to `time`.
pub fn is_after_or_equals(time: impl Into<DateTime<Utc>>) -> Criterion<DateTime<Utc>> {
    compare_time(Op::Gte, time)
}

/// Time lies in the closed range `[start, end]`.
pub fn is_between_times(
    start: impl Into<DateTime<Utc>>,
    end: impl Into<DateTime<Utc>>,
) -> Criterion<DateTime<Utc>> {
    let lo = normalize_time(start.into());
    let hi = normalize_time(end.into());
    let (shown_lo, shown_hi) = (display(lo), display(hi));
    Criterion::new(
        move |t: &DateTime<Utc>| {
            let t = normalize_time(*t);
            lo <= t && t <= hi
        },
        format!("{PLACEHOLDER} between {shown_lo} and {shown_hi}"),
        format!("{PLACEHOLDER} not between {shown_lo} and {shown_hi}"),
    )
    .with_limits(Limits::between(lo, hi))
}

/// Time is the zero value (the Unix epoch).
pub fn is_null_time() -> Criterion<DateTime<Utc>> {
    let zero = DateTime::<Utc>::default();
    Criterion::new(
        move |t: &DateTime<Utc>| normalize_time(*t) == zero,
        format!("{PLACEHOLDER} is null"),
        format!("{PLACEHOLDER} is not null"),
    )
    .with_limits(Limits::exactly(zero))
}
