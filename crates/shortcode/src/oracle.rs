use crate::code::{CodeSource, ShortCode, ThreadRandomCodes};
use crate::store::Snapshot;

/// Decides whether a candidate code is usable.
///
/// The oracle draws candidates from its [`CodeSource`] and accepts the first
/// one that is absent from the persistent-store snapshot and not matched by
/// the caller's in-flight check (typically the pool's queue). There is no
/// retry bound: with a 62^7 candidate space, consecutive collisions are
/// vanishingly rare, and a bound would only turn an impossible case into an
/// error path nobody can exercise.
///
/// The snapshot passed in is read once per refill cycle by the caller, not
/// re-fetched per candidate.
#[derive(Debug, Default, Clone)]
pub struct UniquenessOracle<C = ThreadRandomCodes> {
    codes: C,
}

impl<C: CodeSource> UniquenessOracle<C> {
    pub fn new(codes: C) -> Self {
        Self { codes }
    }

    /// Draws candidates until one passes both uniqueness checks.
    ///
    /// `in_flight` must return `true` for codes that are already queued but
    /// not yet persisted.
    pub fn propose(
        &self,
        snapshot: &Snapshot,
        in_flight: impl Fn(&ShortCode) -> bool,
    ) -> ShortCode {
        loop {
            let candidate = self.codes.draw();
            if snapshot.contains(&candidate) || in_flight(&candidate) {
                tracing::trace!(code = %candidate, "candidate collided, redrawing");
                continue;
            }
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays a fixed candidate sequence, repeating the final entry.
    struct ScriptedCodes {
        script: Mutex<Vec<ShortCode>>,
    }

    impl ScriptedCodes {
        fn new(codes: &[&str]) -> Self {
            Self {
                script: Mutex::new(codes.iter().map(|c| (*c).into()).collect()),
            }
        }
    }

    impl CodeSource for ScriptedCodes {
        fn draw(&self) -> ShortCode {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.remove(0)
            } else {
                script[0].clone()
            }
        }
    }

    #[test]
    fn accepts_first_clean_candidate() {
        let oracle = UniquenessOracle::new(ScriptedCodes::new(&["fresh00"]));
        let snapshot = Snapshot::default();
        let code = oracle.propose(&snapshot, |_| false);
        assert_eq!(code, ShortCode::from("fresh00"));
    }

    #[test]
    fn redraws_past_snapshot_collisions() {
        let oracle = UniquenessOracle::new(ScriptedCodes::new(&["taken00", "taken00", "fresh00"]));
        let snapshot: Snapshot = [ShortCode::from("taken00")].into_iter().collect();
        let code = oracle.propose(&snapshot, |_| false);
        assert_eq!(code, ShortCode::from("fresh00"));
    }

    #[test]
    fn redraws_past_in_flight_collisions() {
        let oracle = UniquenessOracle::new(ScriptedCodes::new(&["queued0", "fresh00"]));
        let snapshot = Snapshot::default();
        let code = oracle.propose(&snapshot, |c| c.as_str() == "queued0");
        assert_eq!(code, ShortCode::from("fresh00"));
    }
}
