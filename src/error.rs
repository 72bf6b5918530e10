use thiserror::Error;

/// Errors surfaced by the estimator.
///
/// Both variants are construction-time or merge-time failures; ingestion
/// itself is total and never leaves the registers partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EstimatorError {
    /// The requested error rate or precision cannot be honored.
    #[error("invalid estimator configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },

    /// Merging estimators built with different precisions.
    #[error("incompatible estimator configurations: precision {lhs} vs {rhs}")]
    IncompatibleConfiguration { lhs: u8, rhs: u8 },
}
