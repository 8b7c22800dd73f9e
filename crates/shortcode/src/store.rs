use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::code::ShortCode;

/// Boxed error type carried by store implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A point-in-time, read-only view of every code recorded in the persistent
/// store.
///
/// A snapshot is taken once per refill cycle and never re-validated per
/// candidate within that cycle. Codes written to the store after the read
/// are invisible to the cycle; that window is an accepted property of the
/// single-instance deployment model.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    codes: HashSet<ShortCode>,
}

impl Snapshot {
    pub fn contains(&self, code: &ShortCode) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<ShortCode> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ShortCode>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Read-only boundary to the persistent store of issued codes.
///
/// The generation side only ever *reads* the store; record creation belongs
/// to the consuming API. The returned future is `Send` so refills can run as
/// detached tasks over any `CodeStore`.
pub trait CodeStore: Send + Sync + 'static {
    /// Reads the set of codes already recorded in the persistent store.
    ///
    /// # Errors
    ///
    /// Returns the store's own error on a failed read. Callers treat this
    /// fail-closed: no codes are generated against an unknown store state.
    fn snapshot(&self) -> impl Future<Output = Result<Snapshot, BoxError>> + Send;
}

impl<S: CodeStore> CodeStore for Arc<S> {
    fn snapshot(&self) -> impl Future<Output = Result<Snapshot, BoxError>> + Send {
        S::snapshot(self)
    }
}

/// In-memory `CodeStore` for tests and embedded single-process setups.
#[derive(Debug, Default)]
pub struct MemoryStore {
    codes: RwLock<HashSet<ShortCode>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a code as issued, as the consuming API would after handing it
    /// out.
    pub fn record(&self, code: ShortCode) {
        self.codes.write().insert(code);
    }

    pub fn len(&self) -> usize {
        self.codes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.read().is_empty()
    }
}

impl CodeStore for MemoryStore {
    fn snapshot(&self) -> impl Future<Output = Result<Snapshot, BoxError>> + Send {
        let snapshot = self.codes.read().iter().cloned().collect();
        async move { Ok(snapshot) }
    }
}
