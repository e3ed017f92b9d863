//! Schema module - Run configuration and result types.

mod config;
mod result;

pub use config::*;
pub use result::*;
