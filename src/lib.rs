//! sesseval: batch evaluation of binary predictions across sessions
//!
//! Re-exports [`sesseval_core`]. The `sesseval` binary lives in the
//! `sesseval-cli` package.

pub use sesseval_core::*;
