use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::code::{CodeSource, ShortCode, ThreadRandomCodes};
use crate::error::{Error, Result};
use crate::oracle::UniquenessOracle;
use crate::store::CodeStore;

/// Default number of pre-generated codes kept ready to serve.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// A bounded FIFO buffer of pre-validated, unused codes.
///
/// The pool is the fast path for `GetShortCode`: codes are generated ahead
/// of demand by [`refill`](Self::refill) and handed out in generation order
/// by [`take`](Self::take). When the pool is drained, `take` falls back to
/// generating a single code synchronously so the caller is never blocked
/// behind a refill.
///
/// The queue lock is only ever held for sub-microsecond operations and never
/// across an `await`. Refills are single-flight: concurrent triggers collapse
/// into the one already in progress.
///
/// A code produced by the fallback path never transits the queue, so a
/// concurrently running refill cannot see it and could in principle draw the
/// same code. The 62^7 candidate space makes that window negligible; it is
/// accepted under the single-instance deployment model, together with the
/// wider non-transactionality between the store snapshot and pool mutation.
pub struct CodePool<S, C = ThreadRandomCodes> {
    store: S,
    oracle: UniquenessOracle<C>,
    queue: Mutex<VecDeque<ShortCode>>,
    refilling: AtomicBool,
    capacity: usize,
}

/// Clears the single-flight flag when the refill cycle ends, including when
/// the refill future is dropped mid-cycle.
struct RefillGuard<'a>(&'a AtomicBool);

impl Drop for RefillGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S, C> CodePool<S, C>
where
    S: CodeStore,
    C: CodeSource,
{
    pub fn new(store: S, oracle: UniquenessOracle<C>, capacity: usize) -> Self {
        Self {
            store,
            oracle,
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            refilling: AtomicBool::new(false),
            capacity,
        }
    }

    /// Target number of queued codes after a completed refill.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of codes currently queued.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Removes and returns the oldest queued code.
    ///
    /// If the queue is empty, reads a fresh store snapshot and generates one
    /// code directly, bypassing the queue. `take` never waits for an
    /// in-flight refill and does not trigger one; scheduling refills after
    /// hand-off is the service layer's job.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SnapshotRead`] if the fallback path cannot read the
    /// store snapshot. Codes are never issued against an unknown store
    /// state.
    pub async fn take(&self) -> Result<ShortCode> {
        let popped = self.queue.lock().pop_front();
        if let Some(code) = popped {
            tracing::debug!(code = %code, remaining = self.len(), "served code from pool");
            return Ok(code);
        }

        let snapshot = self.store.snapshot().await.map_err(Error::SnapshotRead)?;
        let code = {
            let queue = self.queue.lock();
            self.oracle.propose(&snapshot, |c| queue.contains(c))
        };
        tracing::debug!(code = %code, "pool drained, generated code directly");
        Ok(code)
    }

    /// Tops the queue up to capacity.
    ///
    /// Single-flight: if a refill is already running, this call is a no-op.
    /// One store snapshot is read per cycle; candidates are checked against
    /// it and against the live queue contents. A failed snapshot read aborts
    /// the cycle (fail-closed) and leaves the queue unchanged; the next
    /// trigger retries.
    pub async fn refill(&self) {
        if self.refilling.swap(true, Ordering::AcqRel) {
            return;
        }
        let _guard = RefillGuard(&self.refilling);

        if let Err(e) = self.refill_cycle().await {
            tracing::warn!(error = %e, "refill cycle aborted");
        }
    }

    async fn refill_cycle(&self) -> Result<()> {
        if self.queue.lock().len() >= self.capacity {
            return Ok(());
        }

        let snapshot = self.store.snapshot().await.map_err(Error::SnapshotRead)?;

        loop {
            let mut queue = self.queue.lock();
            if queue.len() >= self.capacity {
                break;
            }
            let code = self.oracle.propose(&snapshot, |c| queue.contains(c));
            queue.push_back(code.clone());
            let queued = queue.len();
            drop(queue);
            tracing::debug!(code = %code, pool_size = queued, "generated code");
        }

        Ok(())
    }
}
