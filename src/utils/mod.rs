//! The `utils` module collects shared pieces used across the crate: the
//! error taxonomy and logging setup.

pub mod error;
pub mod logging;
