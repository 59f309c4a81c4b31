//! Lifecycle trait shared by store implementations.

use crate::error::Result;

/// The one contract the rest of an application needs from a store: a way to
/// flush and release it on shutdown.
///
/// # Example
///
/// ```
/// use hitstore::{Closer, Store};
///
/// fn shutdown(stores: &mut [Box<dyn Closer>]) -> hitstore::Result<()> {
///     for store in stores {
///         store.close()?;
///     }
///     Ok(())
/// }
///
/// let mut stores: Vec<Box<dyn Closer>> = vec![Box::new(Store::new())];
/// shutdown(&mut stores).unwrap();
/// ```
pub trait Closer {
    /// Flushes pending state and releases the store.
    fn close(&mut self) -> Result<()>;
}
