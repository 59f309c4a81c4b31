//! Hitstore - an embedded, time-ordered store of request hits.
//!
//! Hitstore keeps [`Hit`] records sorted by time in memory and answers
//! filtered reads and writes against them. It provides:
//!
//! - Typed criteria per field type: IP addresses, strings, timestamps
//! - Per-field conjunctions ([`Where`]) and boolean trees ([`FilterNode`])
//! - Scan narrowing from the time criterion's estimated limits
//! - Order-preserving `update` and `delete`
//! - JSON persistence with a backup taken before every overwrite
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use hitstore::criterion::string::equals_string;
//! use hitstore::criterion::time::is_after;
//! use hitstore::{Hit, Store, Where};
//!
//! let at = |h| Utc.with_ymd_and_hms(2009, 4, 13, h, 0, 0).unwrap();
//!
//! let mut store = Store::new();
//! store.insert(Hit::new(at(0), "example.org", "/"));
//! store.insert(Hit::new(at(1), "example.org", "/about"));
//! store.insert(Hit::new(at(2), "example.net", "/"));
//!
//! let recent = Where::new().time(is_after(Utc.with_ymd_and_hms(2009, 4, 13, 0, 30, 0).unwrap()));
//! let hits = store.select(Some(&recent)).unwrap();
//! assert_eq!(hits.len(), 2);
//! assert_eq!(hits[0].resource, "/about");
//!
//! let not_org = Where::new().host(equals_string("example.org")).negate();
//! assert_eq!(store.delete(Some(&not_org)).unwrap(), 1);
//! assert_eq!(store.len(), 2);
//! ```
//!
//! # Filter Semantics
//!
//! ```text
//! Where        = every set field meets its criterion (unset = any value)
//! And(a, b..)  = all children match
//! Or(a, b..)   = any child matches
//! Not(a)       = a does not match
//! ```
//!
//! Only a filter that is a single `Where` with a bounded time criterion
//! narrows the scan; everything else scans the whole store. Results are the
//! same either way because every candidate is checked against the full
//! filter.
//!
//! # Criterion Families
//!
//! | Field type | Constructors |
//! |------|-----------|
//! | IP | `equals_ip`, `is_less_than[_or_equals]_ip`, `is_greater_than[_or_equals]_ip`, `is_between_ips`, `is_null_ip` |
//! | String | `equals_string`, `is_less_than[_or_equals]_string`, `is_greater_than[_or_equals]_string`, `is_between_strings`, `is_null_string`, `collates_before/after[_or_equals]`, `matches_regex` |
//! | Time | `equals_time`, `is_before[_or_equals]`, `is_after[_or_equals]`, `is_between_times`, `is_null_time` |
//! | Any | `meets`, `does_not` |

mod backup;
mod config;
pub mod criterion;
mod error;
mod filter;
mod hit;
mod op;
pub mod ordering;
mod store;
mod traits;

// Re-export public API
pub use backup::{backup_path, create_file_backup, BACKUP_SUFFIX};
pub use config::StoreConfig;
pub use criterion::{does_not, meets, Criterion, Limits};
pub use error::{Result, StoreError};
pub use filter::{Filter, FilterNode, Where};
pub use hit::{Hit, Requester};
pub use op::Op;
pub use store::{SharedStore, Store};
pub use traits::Closer;
