//! Shared types and constants for the short-code wire contract.
//!
//! Client and server agree on the code shape at compile time: every code in
//! a [`proto::GetShortCodeResponse`](crate::proto::GetShortCodeResponse) is
//! [`CODE_LENGTH`] characters drawn from [`ALPHABET`].

pub use shortcode::{ALPHABET, CODE_LENGTH, ShortCode};

/// Default listen address for the generation service.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:50051";
