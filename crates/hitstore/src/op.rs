//! Comparison operators shared by the ordered criterion families.
//!
//! The [`Op`] enum is what the IP, string and time constructors use to turn
//! an [`Ordering`] into a verdict and to render their display templates.

use std::cmp::Ordering;

/// Comparison operator for an ordered criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
}

impl Op {
    /// Evaluates a comparison given the ordering of `field` against the bound.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }

    /// Returns the operator whose verdict is always the opposite of this one,
    /// or `None` for `Eq` (its complement is rendered as `!=`).
    pub fn complement(self) -> Option<Op> {
        match self {
            Op::Eq => None,
            Op::Lt => Some(Op::Gte),
            Op::Lte => Some(Op::Gt),
            Op::Gt => Some(Op::Lte),
            Op::Gte => Some(Op::Lt),
        }
    }

    /// Returns the symbol used in display templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Gt => ">",
            Op::Gte => ">=",
        }
    }

    /// Returns the symbol of the complementary operator.
    pub fn complement_str(self) -> &'static str {
        self.complement().map(Op::as_str).unwrap_or("!=")
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
