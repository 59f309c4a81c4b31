//! Typed predicates over a single field.
//!
//! A [`Criterion`] bundles three things:
//! - a pure predicate deciding whether a field value qualifies
//! - a pair of display templates (`format` / `not_format`) with one `{}`
//!   placeholder where the field name or a sample value is substituted
//! - optional estimated [`Limits`] used by the store to narrow a scan
//!
//! Constructors are grouped per field type in [`ip`], [`string`] and [`time`].
//! [`meets`] wraps an arbitrary closure and [`does_not`] negates any criterion.
//!
//! # Example
//!
//! ```
//! use hitstore::criterion::{does_not, string::equals_string};
//!
//! let city = equals_string("Alternia");
//! assert!(city.meets(&"Alternia".to_string()));
//! assert_eq!(city.format_with("client.city"), "client.city == \"Alternia\"");
//!
//! let elsewhere = does_not(city);
//! assert!(elsewhere.meets(&"Beforus".to_string()));
//! assert_eq!(elsewhere.format_with("client.city"), "client.city != \"Alternia\"");
//! ```

pub mod ip;
pub mod string;
pub mod time;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;

/// The placeholder every display template carries exactly once.
pub const PLACEHOLDER: &str = "{}";

type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Estimated bounds on the values a criterion can accept.
///
/// Limits over-approximate: when a criterion accepts `v` and a bound is
/// present, `v` lies inside it. Values inside the bounds may still be
/// rejected; callers always re-check with [`Criterion::meets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits<E> {
    /// Inclusive lower bound, if any.
    pub min: Option<E>,
    /// Inclusive upper bound, if any.
    pub max: Option<E>,
}

impl<E> Limits<E> {
    /// Creates limits from optional bounds.
    pub fn new(min: Option<E>, max: Option<E>) -> Self {
        Limits { min, max }
    }

    /// Limits with only a lower bound.
    pub fn at_least(min: E) -> Self {
        Limits::new(Some(min), None)
    }

    /// Limits with only an upper bound.
    pub fn at_most(max: E) -> Self {
        Limits::new(None, Some(max))
    }

    /// Limits covering the closed range `[min, max]`.
    pub fn between(min: E, max: E) -> Self {
        Limits::new(Some(min), Some(max))
    }

    /// Returns `true` if `value` lies within the present bounds under `cmp`.
    pub fn contains_by<F>(&self, value: &E, cmp: F) -> bool
    where
        F: Fn(&E, &E) -> Ordering,
    {
        let above_min = self
            .min
            .as_ref()
            .map_or(true, |min| cmp(value, min) != Ordering::Less);
        let below_max = self
            .max
            .as_ref()
            .map_or(true, |max| cmp(value, max) != Ordering::Greater);
        above_min && below_max
    }
}

impl<E: Clone> Limits<E> {
    /// Limits admitting a single value.
    pub fn exactly(value: E) -> Self {
        Limits::new(Some(value.clone()), Some(value))
    }
}

impl<E: Ord> Limits<E> {
    /// Returns `true` if `value` lies within the present bounds.
    pub fn contains(&self, value: &E) -> bool {
        self.contains_by(value, Ord::cmp)
    }
}

/// A single typed predicate with display metadata.
///
/// Criteria are cheap to clone: the predicate is shared.
pub struct Criterion<E> {
    meets: Predicate<E>,
    format: String,
    not_format: String,
    est_limits: Option<Limits<E>>,
}

impl<E> Criterion<E> {
    /// Creates a criterion from a predicate and its two display templates.
    pub fn new<F>(meets: F, format: impl Into<String>, not_format: impl Into<String>) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Criterion {
            meets: Arc::new(meets),
            format: format.into(),
            not_format: not_format.into(),
            est_limits: None,
        }
    }

    /// Attaches estimated limits.
    pub fn with_limits(mut self, limits: Limits<E>) -> Self {
        self.est_limits = Some(limits);
        self
    }

    /// Evaluates the predicate.
    pub fn meets(&self, value: &E) -> bool {
        (self.meets)(value)
    }

    /// Display template for the criterion.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Display template for the negated criterion.
    pub fn not_format(&self) -> &str {
        &self.not_format
    }

    /// Estimated limits, if the constructor could provide them.
    pub fn est_limits(&self) -> Option<&Limits<E>> {
        self.est_limits.as_ref()
    }

    /// Renders [`format`](Self::format) with `value` in the placeholder.
    pub fn format_with(&self, value: &str) -> String {
        fill(&self.format, value)
    }

    /// Renders [`not_format`](Self::not_format) with `value` in the placeholder.
    pub fn not_format_with(&self, value: &str) -> String {
        fill(&self.not_format, value)
    }
}

impl<E> Clone for Criterion<E>
where
    E: Clone,
{
    fn clone(&self) -> Self {
        Criterion {
            meets: Arc::clone(&self.meets),
            format: self.format.clone(),
            not_format: self.not_format.clone(),
            est_limits: self.est_limits.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Criterion<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criterion")
            .field("format", &self.format)
            .field("not_format", &self.not_format)
            .field("est_limits", &self.est_limits)
            .finish_non_exhaustive()
    }
}

impl<E: 'static> std::ops::Not for Criterion<E> {
    type Output = Criterion<E>;

    fn not(self) -> Self::Output {
        does_not(self)
    }
}

/// Wraps an arbitrary predicate.
///
/// Without a `name`, a random one is generated so that distinct closures
/// print distinctly. The name is cosmetic.
pub fn meets<E, F>(predicate: F, name: Option<&str>) -> Criterion<E>
where
    F: Fn(&E) -> bool + Send + Sync + 'static,
{
    let name = name.map_or_else(random_name, str::to_owned);
    Criterion::new(
        predicate,
        format!("{name}({PLACEHOLDER})"),
        format!("!{name}({PLACEHOLDER})"),
    )
}

/// Negates a criterion.
///
/// The templates swap places. Limits are dropped: the complement of a range
/// is not a single range.
pub fn does_not<E: 'static>(criterion: Criterion<E>) -> Criterion<E> {
    let inner = criterion.meets;
    Criterion {
        meets: Arc::new(move |value: &E| !inner(value)),
        format: criterion.not_format,
        not_format: criterion.format,
        est_limits: None,
    }
}

fn fill(template: &str, value: &str) -> String {
    template.replacen(PLACEHOLDER, value, 1)
}

fn random_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("pred_{}", suffix.to_lowercase())
}
