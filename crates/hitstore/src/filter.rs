//! Filter algebra: per-field conjunctions and boolean trees over them.
//!
//! A [`Where`] holds at most one [`Criterion`] per hit field and matches when
//! every set criterion does. [`FilterNode`] combines `Where` leaves with
//! AND, OR and NOT into arbitrary expressions. Both implement [`Filter`],
//! which is what the store accepts.
//!
//! ```text
//! Where::matches = all set fields meet their criterion (empty = true)
//! And(children)  = every child matches
//! Or(children)   = at least one child matches
//! Not(child)     = child does not match
//! ```
//!
//! # Example
//!
//! ```
//! use hitstore::criterion::string::equals_string;
//! use hitstore::Where;
//!
//! let alternia = Where::new().client_city(equals_string("Alternia"));
//! let beforus = Where::new().client_country(equals_string("Beforus"));
//! let either = alternia.clone().or(beforus);
//!
//! assert_eq!(
//!     either.to_string(),
//!     "(client.city == \"Alternia\" OR client.country == \"Beforus\")"
//! );
//! assert_eq!(alternia.negate().to_string(), "client.city != \"Alternia\"");
//! ```

use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};

use crate::criterion::Criterion;
use crate::hit::Hit;

/// Anything the store can evaluate against a hit.
pub trait Filter {
    /// Returns `true` if `hit` satisfies the filter.
    fn matches(&self, hit: &Hit) -> bool;

    /// Returns this filter as a tree node.
    fn node(&self) -> FilterNode;

    /// Returns the single conjunction this filter reduces to, if any.
    ///
    /// The store only narrows its scan range for such filters.
    fn as_where(&self) -> Option<&Where> {
        None
    }
}

/// A conjunction of per-field criteria.
///
/// Unset fields match every value, so `Where::default()` matches every hit.
#[derive(Debug, Clone, Default)]
pub struct Where {
    /// Criterion on the hit time.
    pub time: Option<Criterion<DateTime<Utc>>>,
    /// Criterion on the requested host.
    pub host: Option<Criterion<String>>,
    /// Criterion on the requested resource.
    pub resource: Option<Criterion<String>>,
    /// Criterion on the client address.
    pub client_address: Option<Criterion<Option<IpAddr>>>,
    /// Criterion on the client country.
    pub client_country: Option<Criterion<String>>,
    /// Criterion on the client city.
    pub client_city: Option<Criterion<String>>,
}

fn check<E>(criterion: &Option<Criterion<E>>, value: &E) -> bool {
    criterion.as_ref().map_or(true, |c| c.meets(value))
}

impl Where {
    /// Creates an empty conjunction (matches everything).
    pub fn new() -> Self {
        Where::default()
    }

    // ========================================================================
    // Field setters
    // ========================================================================

    /// Sets the criterion on `time`.
    pub fn time(mut self, criterion: Criterion<DateTime<Utc>>) -> Self {
        self.time = Some(criterion);
        self
    }

    /// Sets the criterion on `host`.
    pub fn host(mut self, criterion: Criterion<String>) -> Self {
        self.host = Some(criterion);
        self
    }

    /// Sets the criterion on `resource`.
    pub fn resource(mut self, criterion: Criterion<String>) -> Self {
        self.resource = Some(criterion);
        self
    }

    /// Sets the criterion on `client.address`.
    pub fn client_address(mut self, criterion: Criterion<Option<IpAddr>>) -> Self {
        self.client_address = Some(criterion);
        self
    }

    /// Sets the criterion on `client.country`.
    pub fn client_country(mut self, criterion: Criterion<String>) -> Self {
        self.client_country = Some(criterion);
        self
    }

    /// Sets the criterion on `client.city`.
    pub fn client_city(mut self, criterion: Criterion<String>) -> Self {
        self.client_city = Some(criterion);
        self
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Tests a hit against every set criterion.
    pub fn matches(&self, hit: &Hit) -> bool {
        check(&self.time, &hit.time)
            && check(&self.host, &hit.host)
            && check(&self.resource, &hit.resource)
            && check(&self.client_address, &hit.client.address)
            && check(&self.client_country, &hit.client.country)
            && check(&self.client_city, &hit.client.city)
    }

    /// Returns `true` if no field carries a criterion.
    pub fn is_empty(&self) -> bool {
        self.templates().is_empty()
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Wraps this conjunction as a leaf node.
    pub fn into_node(self) -> FilterNode {
        FilterNode::Leaf(self)
    }

    /// Negates the whole conjunction: `NOT (a AND b ...)`.
    pub fn negate(self) -> FilterNode {
        FilterNode::Not(Box::new(self.into_node()))
    }

    /// Combines with another filter under AND.
    pub fn and(self, other: impl Into<FilterNode>) -> FilterNode {
        FilterNode::And(vec![self.into_node(), other.into()])
    }

    /// Combines with several filters under a single AND.
    pub fn and_all<I>(self, others: I) -> FilterNode
    where
        I: IntoIterator,
        I::Item: Into<FilterNode>,
    {
        FilterNode::And(group(self.into_node(), others))
    }

    /// Combines with another filter under OR.
    pub fn or(self, other: impl Into<FilterNode>) -> FilterNode {
        FilterNode::Or(vec![self.into_node(), other.into()])
    }

    /// Combines with several filters under a single OR.
    pub fn or_all<I>(self, others: I) -> FilterNode
    where
        I: IntoIterator,
        I::Item: Into<FilterNode>,
    {
        FilterNode::Or(group(self.into_node(), others))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Renders the expression with `value` in place of every field name.
    pub fn filled_string(&self, value: &str) -> String {
        self.render(&|_| value.to_string(), false)
    }

    /// `(field name, format, not_format)` for every set field, in field order.
    fn templates(&self) -> Vec<(&'static str, &str, &str)> {
        fn entry<'a, E>(
            name: &'static str,
            c: &'a Option<Criterion<E>>,
        ) -> Option<(&'static str, &'a str, &'a str)> {
            c.as_ref().map(|c| (name, c.format(), c.not_format()))
        }

        [
            entry("time", &self.time),
            entry("host", &self.host),
            entry("resource", &self.resource),
            entry("client.address", &self.client_address),
            entry("client.country", &self.client_country),
            entry("client.city", &self.client_city),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn render(&self, name: &dyn Fn(&'static str) -> String, grouped: bool) -> String {
        let parts: Vec<String> = self
            .templates()
            .into_iter()
            .map(|(field, format, _)| fill(format, &name(field)))
            .collect();
        match parts.len() {
            0 => "TRUE".to_string(),
            1 => parts.into_iter().collect(),
            _ if grouped => format!("({})", parts.join(" AND ")),
            _ => parts.join(" AND "),
        }
    }

    fn render_negated(&self, name: &dyn Fn(&'static str) -> String) -> String {
        let templates = self.templates();
        match templates.as_slice() {
            [] => "FALSE".to_string(),
            [(field, _, not_format)] => fill(not_format, &name(*field)),
            _ => format!("NOT {}", self.render(name, true)),
        }
    }
}

fn fill(template: &str, value: &str) -> String {
    template.replacen(crate::criterion::PLACEHOLDER, value, 1)
}

fn group<I>(first: FilterNode, rest: I) -> Vec<FilterNode>
where
    I: IntoIterator,
    I::Item: Into<FilterNode>,
{
    std::iter::once(first)
        .chain(rest.into_iter().map(Into::into))
        .collect()
}

impl Filter for Where {
    fn matches(&self, hit: &Hit) -> bool {
        Where::matches(self, hit)
    }

    fn node(&self) -> FilterNode {
        FilterNode::Leaf(self.clone())
    }

    fn as_where(&self) -> Option<&Where> {
        Some(self)
    }
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&|field| field.to_string(), false))
    }
}

/// A boolean expression over [`Where`] leaves.
#[derive(Debug, Clone)]
pub enum FilterNode {
    /// A single conjunction.
    Leaf(Where),
    /// Every child must match. An empty group matches everything.
    And(Vec<FilterNode>),
    /// At least one child must match. An empty group matches nothing.
    Or(Vec<FilterNode>),
    /// The child must not match.
    Not(Box<FilterNode>),
}

impl FilterNode {
    /// Evaluates the tree against a hit.
    pub fn matches(&self, hit: &Hit) -> bool {
        match self {
            FilterNode::Leaf(cond) => cond.matches(hit),
            FilterNode::And(group) => group.iter().all(|child| child.matches(hit)),
            FilterNode::Or(group) => group.iter().any(|child| child.matches(hit)),
            FilterNode::Not(child) => !child.matches(hit),
        }
    }

    /// Combines with another filter under AND, extending an existing AND group.
    pub fn and(self, other: impl Into<FilterNode>) -> FilterNode {
        match self {
            FilterNode::And(mut group) => {
                group.push(other.into());
                FilterNode::And(group)
            }
            node => FilterNode::And(vec![node, other.into()]),
        }
    }

    /// Combines with another filter under OR, extending an existing OR group.
    pub fn or(self, other: impl Into<FilterNode>) -> FilterNode {
        match self {
            FilterNode::Or(mut group) => {
                group.push(other.into());
                FilterNode::Or(group)
            }
            node => FilterNode::Or(vec![node, other.into()]),
        }
    }

    /// Wraps the tree in NOT.
    pub fn negate(self) -> FilterNode {
        FilterNode::Not(Box::new(self))
    }

    /// Returns the conjunction if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&Where> {
        match self {
            FilterNode::Leaf(cond) => Some(cond),
            _ => None,
        }
    }

    /// Renders the expression with `value` in place of every field name.
    pub fn filled_string(&self, value: &str) -> String {
        self.render(&|_| value.to_string(), false)
    }

    fn render(&self, name: &dyn Fn(&'static str) -> String, grouped: bool) -> String {
        match self {
            FilterNode::Leaf(cond) => cond.render(name, grouped),
            FilterNode::And(group) => render_group(group, " AND ", "TRUE", name),
            FilterNode::Or(group) => render_group(group, " OR ", "FALSE", name),
            FilterNode::Not(child) => match child.as_ref() {
                FilterNode::Leaf(cond) => cond.render_negated(name),
                other => format!("NOT {}", other.render(name, true)),
            },
        }
    }
}

fn render_group(
    group: &[FilterNode],
    sep: &str,
    empty: &str,
    name: &dyn Fn(&'static str) -> String,
) -> String {
    if group.is_empty() {
        return empty.to_string();
    }
    let parts: Vec<String> = group.iter().map(|child| child.render(name, true)).collect();
    format!("({})", parts.join(sep))
}

impl Filter for FilterNode {
    fn matches(&self, hit: &Hit) -> bool {
        FilterNode::matches(self, hit)
    }

    fn node(&self) -> FilterNode {
        self.clone()
    }

    fn as_where(&self) -> Option<&Where> {
        self.as_leaf()
    }
}

impl From<Where> for FilterNode {
    fn from(cond: Where) -> Self {
        FilterNode::Leaf(cond)
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&|field| field.to_string(), false))
    }
}
