//! The hit store: a time-ordered collection with filtered reads and writes.
//!
//! [`Store`] keeps its hits sorted ascending by time (ties in insertion
//! order) before and after every public operation. All three query
//! operations share one primitive that turns a filter into the ascending list
//! of matching indices:
//!
//! 1. No filter, or an empty [`Where`]: every index.
//! 2. A single `Where` leaf whose time criterion has limits: binary-search the
//!    candidate range `[lo, hi)` from those limits.
//! 3. Anything else (AND/OR/NOT trees): the full range.
//! 4. Every candidate is checked against the complete filter.
//!
//! Persistence is a JSON file at the configured path. Each save first copies
//! the previous file to `<path>.bak` (see [`create_file_backup`]) and refuses
//! to overwrite anything if that copy fails.
//!
//! A store performs no locking. Mutation requires `&mut self`; use
//! [`SharedStore`] to share one store between threads.

mod shared;

pub use shared::SharedStore;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::ops::Range;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::backup::create_file_backup;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::filter::{Filter, Where};
use crate::hit::Hit;
use crate::ordering::normalize_time;
use crate::traits::Closer;

/// An in-process, single-writer store of [`Hit`] records.
#[derive(Debug, Default)]
pub struct Store {
    hits: Vec<Hit>,
    config: StoreConfig,
    dirty: bool,
}

impl Store {
    /// Creates an empty in-memory store with no backing file.
    pub fn new() -> Self {
        Store::default()
    }

    /// Creates an empty store with the given configuration.
    ///
    /// Nothing is read from disk; use [`Store::open`] to load existing hits.
    pub fn with_config(config: StoreConfig) -> Self {
        Store {
            hits: Vec::new(),
            config,
            dirty: false,
        }
    }

    /// Creates an in-memory store holding `hits`, stably sorted by time.
    pub fn from_hits(mut hits: Vec<Hit>) -> Self {
        hits.sort_by_key(|hit| hit.time);
        Store {
            hits,
            config: StoreConfig::default(),
            dirty: false,
        }
    }

    /// Opens the store described by `config`.
    ///
    /// Hits are loaded from the configured path if the file exists; a missing
    /// file yields an empty store that will be created on the first save.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let mut hits = match config.path.as_deref() {
            Some(path) if path.exists() => read_hits(path)?,
            _ => Vec::new(),
        };
        hits.sort_by_key(|hit| hit.time);

        if let Some(path) = &config.path {
            info!(path = %path.display(), hits = hits.len(), "opened hit store");
        }

        Ok(Store {
            hits,
            config,
            dirty: false,
        })
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of stored hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns `true` if the store holds no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns `true` if the store changed since it was opened or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Inserts a hit after every stored hit with an equal or earlier time.
    pub fn insert(&mut self, hit: Hit) {
        self.insert_sorted(hit);
        self.dirty = true;
    }

    /// Returns copies of the matching hits in time order.
    ///
    /// `None` selects everything. The in-memory store never fails; the
    /// `Result` is part of the store contract.
    pub fn select(&self, filter: Option<&dyn Filter>) -> Result<Vec<Hit>> {
        Ok(self
            .apply_filter(filter)
            .into_iter()
            .map(|i| self.hits[i].clone())
            .collect())
    }

    /// Counts the matching hits.
    pub fn count(&self, filter: Option<&dyn Filter>) -> Result<usize> {
        Ok(self.apply_filter(filter).len())
    }

    /// Rewrites every matching hit with `f`.
    ///
    /// Matches are visited once each, in time order. Returns
    /// `(matched, updated)`, where `updated` only counts hits that `f`
    /// actually changed. Hits whose time changed are moved to their new
    /// sorted position; hits with equal times keep their relative order.
    pub fn update<F>(&mut self, filter: Option<&dyn Filter>, mut f: F) -> Result<(usize, usize)>
    where
        F: FnMut(Hit) -> Hit,
    {
        let matched = self.apply_filter(filter);
        let mut updated = 0;
        let mut moved = Vec::new();

        for &i in &matched {
            let new = f(self.hits[i].clone());
            if new == self.hits[i] {
                continue;
            }
            updated += 1;
            if new.time != self.hits[i].time {
                moved.push(i);
            }
            self.hits[i] = new;
        }

        if !moved.is_empty() {
            self.reposition(&moved);
        }
        if updated > 0 {
            self.dirty = true;
        }

        debug!(
            matched = matched.len(),
            updated,
            moved = moved.len(),
            "updated hits"
        );
        Ok((matched.len(), updated))
    }

    /// Removes every matching hit and returns how many were removed.
    pub fn delete(&mut self, filter: Option<&dyn Filter>) -> Result<usize> {
        let matched = self.apply_filter(filter);
        if matched.is_empty() {
            return Ok(0);
        }

        let mut doomed = matched.iter().copied().peekable();
        let mut index = 0;
        self.hits.retain(|_| {
            let remove = doomed.peek() == Some(&index);
            if remove {
                doomed.next();
            }
            index += 1;
            !remove
        });

        self.dirty = true;
        debug!(deleted = matched.len(), remaining = self.hits.len(), "deleted hits");
        Ok(matched.len())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Writes all hits to the configured path.
    ///
    /// If the file already exists, it is always copied to `<path>.bak`
    /// first. A failed backup aborts the save and leaves the
    /// existing file untouched.
    pub fn save(&mut self) -> Result<()> {
        let path = self.config.path.clone().ok_or(StoreError::NoPath)?;

        if path.exists() {
            if let Err(err) = create_file_backup(&path) {
                warn!(path = %path.display(), error = %err, "backup failed, save aborted");
                return Err(err);
            }
        }

        write_hits(&path, &self.hits)?;
        self.dirty = false;
        info!(path = %path.display(), hits = self.hits.len(), "saved hit store");
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Ascending indices of the hits matching `filter`.
    pub(crate) fn apply_filter(&self, filter: Option<&dyn Filter>) -> Vec<usize> {
        let n = self.hits.len();
        let Some(filter) = filter else {
            return (0..n).collect();
        };

        let range = match filter.as_where() {
            Some(cond) if cond.is_empty() => return (0..n).collect(),
            Some(cond) => self.scan_range(cond),
            None => 0..n,
        };
        debug!(lo = range.start, hi = range.end, total = n, "scanning hits");

        range.filter(|&i| filter.matches(&self.hits[i])).collect()
    }

    /// Candidate range for a conjunction, narrowed by its time limits.
    ///
    /// Limits are on the normalized time scale, so hits are compared after
    /// normalization. Normalization is monotonic, which keeps the sequence
    /// partitioned for the binary searches.
    fn scan_range(&self, cond: &Where) -> Range<usize> {
        let n = self.hits.len();
        let Some(limits) = cond.time.as_ref().and_then(|c| c.est_limits()) else {
            return 0..n;
        };

        let lo = limits.min.map_or(0, |min| {
            self.hits
                .partition_point(|hit| normalize_time(hit.time) < min)
        });
        let hi = limits.max.map_or(n, |max| {
            self.hits
                .partition_point(|hit| normalize_time(hit.time) <= max)
        });
        lo..hi.max(lo)
    }

    fn insert_sorted(&mut self, hit: Hit) {
        let pos = self.hits.partition_point(|h| h.time <= hit.time);
        self.hits.insert(pos, hit);
    }

    /// Moves the hits at `moved` (ascending indices) to their sorted places.
    fn reposition(&mut self, moved: &[usize]) {
        let mut is_moved = vec![false; self.hits.len()];
        for &i in moved {
            is_moved[i] = true;
        }

        let mut kept = Vec::with_capacity(self.hits.len() - moved.len());
        let mut extracted = Vec::with_capacity(moved.len());
        for (i, hit) in std::mem::take(&mut self.hits).into_iter().enumerate() {
            if is_moved[i] {
                extracted.push(hit);
            } else {
                kept.push(hit);
            }
        }

        self.hits = kept;
        for hit in extracted {
            self.insert_sorted(hit);
        }
    }
}

impl Closer for Store {
    /// Saves pending changes when a backing file is configured and
    /// `save_on_close` is set.
    fn close(&mut self) -> Result<()> {
        if self.dirty && self.config.save_on_close && self.config.path.is_some() {
            self.save()?;
        }
        Ok(())
    }
}

fn read_hits(path: &Path) -> Result<Vec<Hit>> {
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn write_hits(path: &Path, hits: &[Hit]) -> Result<()> {
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer(&mut writer, hits).map_err(StoreError::Encode)?;
    writer.flush().map_err(io_error)?;
    writer.get_ref().sync_all().map_err(io_error)
}
