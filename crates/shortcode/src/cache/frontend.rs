use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::code::ShortCode;

/// Outcome of a frontend lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// The slot exists and has not expired.
    Live(String),
    /// The slot existed but its TTL elapsed; it has been removed. The caller
    /// must drop the paired frequency entry.
    Expired,
    /// No slot for this code.
    Missing,
}

/// Time-bounded code→target store.
///
/// Expiry is passive: a slot past its deadline is only removed when a lookup
/// touches it. A slot whose TTL is zero is expired from the moment it is
/// written.
///
/// The `_at` variants take an explicit `now` so expiry can be tested without
/// sleeping; the plain methods use the real clock.
#[derive(Debug, Default)]
pub struct CacheFrontend {
    slots: HashMap<ShortCode, Slot>,
}

#[derive(Debug)]
struct Slot {
    target: String,
    expires_at: Instant,
}

impl CacheFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn insert(&mut self, code: ShortCode, target: String, ttl: Duration) {
        self.insert_at(code, target, ttl, Instant::now());
    }

    pub fn insert_at(&mut self, code: ShortCode, target: String, ttl: Duration, now: Instant) {
        self.slots.insert(
            code,
            Slot {
                target,
                expires_at: now + ttl,
            },
        );
    }

    pub fn get(&mut self, code: &ShortCode) -> Presence {
        self.get_at(code, Instant::now())
    }

    pub fn get_at(&mut self, code: &ShortCode, now: Instant) -> Presence {
        let Some(slot) = self.slots.get(code) else {
            return Presence::Missing;
        };
        if now < slot.expires_at {
            return Presence::Live(slot.target.clone());
        }
        self.slots.remove(code);
        Presence::Expired
    }

    pub fn remove(&mut self, code: &ShortCode) -> Option<String> {
        self.slots.remove(code).map(|slot| slot.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_until_deadline_then_expired_then_missing() {
        let mut frontend = CacheFrontend::new();
        let now = Instant::now();
        let code = ShortCode::from("abc1234");
        frontend.insert_at(code.clone(), "https://example.com".into(), Duration::from_secs(60), now);

        assert_eq!(
            frontend.get_at(&code, now + Duration::from_secs(59)),
            Presence::Live("https://example.com".into())
        );
        assert_eq!(
            frontend.get_at(&code, now + Duration::from_secs(60)),
            Presence::Expired
        );
        // The expired slot was removed on first touch.
        assert_eq!(
            frontend.get_at(&code, now + Duration::from_secs(60)),
            Presence::Missing
        );
    }

    #[test]
    fn zero_ttl_slots_are_born_expired() {
        let mut frontend = CacheFrontend::new();
        let now = Instant::now();
        let code = ShortCode::from("abc1234");
        frontend.insert_at(code.clone(), "https://example.com".into(), Duration::ZERO, now);
        assert_eq!(frontend.get_at(&code, now), Presence::Expired);
    }

    #[test]
    fn reinsert_replaces_target_and_deadline() {
        let mut frontend = CacheFrontend::new();
        let now = Instant::now();
        let code = ShortCode::from("abc1234");
        frontend.insert_at(code.clone(), "https://old.example".into(), Duration::ZERO, now);
        frontend.insert_at(code.clone(), "https://new.example".into(), Duration::from_secs(1), now);

        assert_eq!(
            frontend.get_at(&code, now),
            Presence::Live("https://new.example".into())
        );
        assert_eq!(frontend.len(), 1);
    }
}
