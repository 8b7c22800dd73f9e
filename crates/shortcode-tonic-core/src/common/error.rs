//! Error types for the short-code generation service.
//!
//! This module defines the central `Error` enum, which captures all
//! reportable error cases at the service boundary. It implements
//! `From<Error>` for `tonic::Status` so failures propagate to clients with
//! appropriate status codes. Messages stay opaque: callers learn that
//! generation failed, not what the store looks like internally.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the short-code generation service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Code generation failed, e.g. the persistent-store snapshot could not
    /// be read (the service is fail-closed on snapshot errors).
    #[error("code generation error: {0}")]
    CodeGeneration(#[from] shortcode::Error),

    /// The service is in the process of shutting down.
    #[error("service is shutting down")]
    ServiceShutdown,
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::CodeGeneration(_) => Status::internal("code generation failed"),
            Error::ServiceShutdown => Status::unavailable("service is shutting down"),
        }
    }
}
