use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::cache::frontend::{CacheFrontend, Presence};
use crate::cache::hits::HitSink;
use crate::cache::tracker::FrequencyTracker;
use crate::code::ShortCode;

/// Orchestrates the [`CacheFrontend`] and [`FrequencyTracker`] as one
/// logical unit.
///
/// Both structures live behind a single mutex, and every operation runs its
/// whole sequence inside that critical section. For `admit` in particular
/// the check→evict→insert sequence is atomic with respect to other
/// coordinator calls, so the capacity bound is never observable as violated,
/// even transiently, by concurrent admissions.
///
/// A cache slot and its frequency entry share a lifecycle: admitted
/// together, and removed together by eviction, passive TTL expiry, or
/// explicit removal.
pub struct CacheCoordinator {
    state: Mutex<State>,
    capacity: usize,
    hits: Option<HitSink>,
}

struct State {
    tracker: FrequencyTracker,
    frontend: CacheFrontend,
}

impl CacheCoordinator {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                tracker: FrequencyTracker::new(),
                frontend: CacheFrontend::new(),
            }),
            capacity,
            hits: None,
        }
    }

    /// Attaches a sink that receives a best-effort notification per hit.
    pub fn with_hit_sink(mut self, hits: HitSink) -> Self {
        self.hits = Some(hits);
        self
    }

    /// Maximum number of code→target pairs retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pairs currently tracked.
    pub fn len(&self) -> usize {
        self.state.lock().tracker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current frequency score for `code`, if cached.
    pub fn score(&self, code: &ShortCode) -> Option<u64> {
        self.state.lock().tracker.score(code)
    }

    /// Returns the cached target for `code`, counting the access.
    ///
    /// A hit increments the frequency score by exactly 1 and emits a
    /// best-effort hit notification; it never creates an entry. An expired
    /// slot is removed together with its frequency entry and reported as a
    /// miss.
    pub fn lookup(&self, code: &ShortCode) -> Option<String> {
        self.lookup_at(code, Instant::now())
    }

    pub(crate) fn lookup_at(&self, code: &ShortCode, now: Instant) -> Option<String> {
        let mut state = self.state.lock();
        match state.frontend.get_at(code, now) {
            Presence::Live(target) => {
                state.tracker.increment(code, 1);
                drop(state);
                if let Some(hits) = &self.hits {
                    hits.record(code);
                }
                Some(target)
            }
            Presence::Expired => {
                state.tracker.remove(code);
                None
            }
            Presence::Missing => None,
        }
    }

    /// Admits `code` → `target` after a miss, evicting if necessary.
    ///
    /// If the tracker is at capacity and `code` is not already present, the
    /// entry with the lowest score (oldest insertion among ties) is removed
    /// from both structures first. The new pair is then written with its
    /// score set to exactly 1: a re-admitted code restarts its frequency
    /// count rather than inheriting the old one.
    ///
    /// Returns the evicted code, if any.
    pub fn admit(&self, code: ShortCode, target: String, ttl: Duration) -> Option<ShortCode> {
        self.admit_at(code, target, ttl, Instant::now())
    }

    pub(crate) fn admit_at(
        &self,
        code: ShortCode,
        target: String,
        ttl: Duration,
        now: Instant,
    ) -> Option<ShortCode> {
        let mut state = self.state.lock();

        let mut evicted = None;
        if state.tracker.len() >= self.capacity && !state.tracker.contains(&code) {
            if let Some((victim, score)) = state.tracker.pop_minimum() {
                state.frontend.remove(&victim);
                tracing::debug!(code = %victim, score, "capacity reached, evicted least frequently used");
                evicted = Some(victim);
            }
        }

        state.frontend.insert_at(code.clone(), target, ttl, now);
        // Reset, not increment: a fresh admission always starts at score 1
        // with a fresh insertion age.
        state.tracker.remove(&code);
        state.tracker.increment(&code, 1);

        evicted
    }

    /// Drops both halves of the pair unconditionally.
    ///
    /// Used when the record backing `code` is deleted from the persistent
    /// store.
    pub fn remove(&self, code: &ShortCode) {
        let mut state = self.state.lock();
        state.frontend.remove(code);
        state.tracker.remove(code);
    }
}
