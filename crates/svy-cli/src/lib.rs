//! Shared pieces of the `svy` binary.

pub mod logging;
