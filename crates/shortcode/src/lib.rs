#![doc = include_str!("../README.md")]

mod cache;
mod code;
mod error;
mod oracle;
mod pool;
mod store;

pub use crate::cache::*;
pub use crate::code::*;
pub use crate::error::*;
pub use crate::oracle::*;
pub use crate::pool::*;
pub use crate::store::*;
