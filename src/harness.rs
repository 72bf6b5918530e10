//! Comparison harness: exact count versus estimate over one item stream.
//!
//! Both counters consume the same slice; each pass is timed independently so
//! the report captures the accuracy/performance trade-off in one record.
//! Rendering the report as a table or JSON is the caller's concern.

use std::hash::Hash;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::EstimatorError;
use crate::estimator::HyperLogLog;
use crate::exact::ExactCounter;

/// Outcome of one comparison run.
///
/// The exact count is an integer (it is a set size); the estimate is kept
/// fractional and left to the caller to round for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub exact_count: usize,
    pub estimated_count: f64,
    pub exact_elapsed: Duration,
    pub estimate_elapsed: Duration,
}

impl ComparisonReport {
    /// Relative error of the estimate against the exact count, 0 for an empty
    /// input.
    pub fn relative_error(&self) -> f64 {
        if self.exact_count == 0 {
            0.0
        } else {
            (self.estimated_count - self.exact_count as f64).abs() / self.exact_count as f64
        }
    }
}

/// Feed `items` through the exact counter and the estimator, timing each pass.
///
/// Each timed section covers ingestion plus the final count for that
/// component. The estimator is constructed up front so a bad configuration
/// aborts the run before any work is done.
///
/// # Errors
/// Propagates [`EstimatorError::InvalidConfiguration`] from the estimator
/// constructor verbatim.
pub fn compare<T: Hash + Eq>(
    items: &[T],
    error_rate: f64,
) -> Result<ComparisonReport, EstimatorError> {
    let mut estimator: HyperLogLog = HyperLogLog::new(error_rate)?;

    let start = Instant::now();
    let mut exact = ExactCounter::new();
    for item in items {
        exact.insert(item);
    }
    let exact_count = exact.count();
    let exact_elapsed = start.elapsed();

    let start = Instant::now();
    for item in items {
        estimator.insert(item);
    }
    let estimated_count = estimator.estimate();
    let estimate_elapsed = start.elapsed();

    Ok(ComparisonReport {
        exact_count,
        estimated_count,
        exact_elapsed,
        estimate_elapsed,
    })
}
