//! `distinct-counter` estimates the number of distinct client addresses in an
//! access-log stream and compares the estimate against an exact count.
//!
//! The estimator is a HyperLogLog sketch with a configurable error rate; the
//! exact counter is a plain distinct set used as ground truth. The comparison
//! harness feeds both from the same item stream and reports counts, relative
//! error, and per-component timings.
pub mod error;
pub mod estimator;
pub mod exact;
pub mod harness;
pub mod input;

pub use crate::error::EstimatorError;
pub use crate::estimator::HyperLogLog;
pub use crate::exact::ExactCounter;
pub use crate::harness::{compare, ComparisonReport};
pub use crate::input::{classify_line, load_addresses, LineOutcome, LoadedAddresses};
