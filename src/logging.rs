//! Console progress of a boosting run.
//! The per-round records go through the `log` facade,
//! the colored table is printed only when `verbose` is set.
mod progress;


pub use progress::{ProgressLogger, RoundLoss};
