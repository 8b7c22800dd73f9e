#![doc = include_str!("../README.md")]

mod common;
pub use common::*;
// Public re-export so downstream crates can access the core library via
// `shortcode_tonic_core::shortcode`
pub use shortcode;
