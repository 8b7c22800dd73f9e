use crate::store::BoxError;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors the core can produce.
///
/// Cache operations are in-process and infallible; the only fallible
/// dependency is the persistent-store snapshot read, which is handled
/// fail-closed: a failed read aborts the current generation cycle instead
/// of issuing codes against an unknown store state.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Reading the issued-code snapshot from the persistent store failed.
    #[error("snapshot read failed: {0}")]
    SnapshotRead(#[source] BoxError),
}
