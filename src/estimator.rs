//! Approximate distinct counter based on HyperLogLog registers.
//!
//! The estimator is configured with a target relative error in `(0, 1)`,
//! mapped to a precision `p` and a register array of `m = 2^p` one-byte
//! registers. Each inserted item is hashed to 64 bits: the top `p` bits select
//! a register and the remaining bits contribute a rank (leading zero count
//! plus one) that the register keeps the maximum of.
//!
//! Expected standard error is `1.04 / sqrt(m)`:
//!
//! - p = 10: 1024 registers, ~3.25%
//! - p = 12: 4096 registers, ~1.63%
//! - p = 14: 16384 registers, ~0.81%
//! - p = 18: 262144 registers, ~0.20%
//!
//! Registers are the only persisted state and only ever increase, so the final
//! state depends on the set of distinct items alone, not on insertion order or
//! duplicate count. That monotonicity is also what would make a concurrent
//! extension cheap: per-register compare-and-swap max updates commute, and an
//! `estimate` racing concurrent inserts reads a register snapshot whose
//! estimate lies between the before and after values of the racing inserts.
//! The implementation here is single-threaded.

use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::mem::{size_of, size_of_val};

use wyhash::WyHash;

use crate::error::EstimatorError;

/// Supported precision range: fewer than 16 registers is statistically
/// meaningless, more than 2^18 exceeds any realistic accuracy demand.
const MIN_PRECISION: u8 = 4;
const MAX_PRECISION: u8 = 18;

/// Approximate cardinality estimator with `2^precision` registers.
///
/// The hasher is a type parameter fixed at construction; the default `WyHash`
/// build hasher is zero-sized and seed-free, so identical items hash
/// identically across instances and runs.
pub struct HyperLogLog<H: Hasher + Default = WyHash> {
    precision: u8,
    registers: Vec<u8>,
    build_hasher: BuildHasherDefault<H>,
}

impl<H: Hasher + Default> HyperLogLog<H> {
    /// Creates an estimator targeting the given relative standard error.
    ///
    /// The error rate maps to a precision via `p = ceil(log2((1.04 / e)^2))`.
    ///
    /// # Errors
    /// Returns [`EstimatorError::InvalidConfiguration`] when `error_rate` is
    /// not strictly between 0 and 1, or when the derived precision falls
    /// outside the supported `[4, 18]` range.
    pub fn new(error_rate: f64) -> Result<Self, EstimatorError> {
        if !error_rate.is_finite() || error_rate <= 0.0 || error_rate >= 1.0 {
            return Err(EstimatorError::InvalidConfiguration {
                reason: "error rate must be finite and strictly between 0 and 1",
            });
        }

        let required_registers = (1.04 / error_rate).powi(2);
        let precision = required_registers.log2().ceil();
        if !(f64::from(MIN_PRECISION)..=f64::from(MAX_PRECISION)).contains(&precision) {
            return Err(EstimatorError::InvalidConfiguration {
                reason: "derived precision outside the supported [4, 18] range",
            });
        }

        Self::with_precision(precision as u8)
    }

    /// Creates an estimator with an explicit precision in `[4, 18]`.
    ///
    /// # Errors
    /// Returns [`EstimatorError::InvalidConfiguration`] when `precision` is
    /// out of range.
    pub fn with_precision(precision: u8) -> Result<Self, EstimatorError> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(EstimatorError::InvalidConfiguration {
                reason: "precision must be within the inclusive [4, 18] range",
            });
        }

        Ok(Self {
            precision,
            registers: vec![0; 1usize << precision],
            build_hasher: BuildHasherDefault::default(),
        })
    }

    /// Insert a hashable item.
    #[inline]
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        let mut hasher = self.build_hasher.build_hasher();
        item.hash(&mut hasher);
        self.insert_hash(hasher.finish());
    }

    /// Insert a pre-computed 64-bit hash.
    ///
    /// The top `precision` bits select the register; the remaining bits yield
    /// `rank = leading_zeros + 1` in `[1, 64 - precision + 1]`. Exactly one
    /// register is read and updated.
    #[inline]
    pub fn insert_hash(&mut self, hash: u64) {
        let idx = (hash >> (64 - self.precision)) as usize;
        // Sentinel bit below the remainder caps the rank at 64 - precision + 1
        // when the remainder is all zeros.
        let w = (hash << self.precision) | (1u64 << (self.precision - 1));
        let rank = (w.leading_zeros() + 1) as u8;
        if rank > self.registers[idx] {
            self.registers[idx] = rank;
        }
    }

    /// Return the cardinality estimate.
    ///
    /// A pure function of the register state: the bias-corrected harmonic mean
    /// of the registers, falling back to linear counting over the zero
    /// registers while the raw estimate stays below `2.5 * m`. The 32-bit
    /// large-range correction does not apply to a 64-bit hash space and is
    /// omitted.
    pub fn estimate(&self) -> f64 {
        let m = self.registers.len() as f64;
        let mut sum = 0.0;
        let mut zeros = 0usize;
        for &rank in &self.registers {
            sum += 1.0 / (1u64 << rank) as f64;
            if rank == 0 {
                zeros += 1;
            }
        }

        let raw = alpha(self.registers.len()) * m * m / sum;
        if raw <= 2.5 * m && zeros > 0 {
            m * (m / zeros as f64).ln()
        } else {
            raw
        }
    }

    /// Merge another estimator into this one.
    ///
    /// The element-wise register maximum reproduces exactly the state of a
    /// single estimator fed the union of both item streams.
    ///
    /// # Errors
    /// Returns [`EstimatorError::IncompatibleConfiguration`] when the two
    /// estimators were built with different precisions.
    pub fn merge(&mut self, other: &Self) -> Result<(), EstimatorError> {
        if self.precision != other.precision {
            return Err(EstimatorError::IncompatibleConfiguration {
                lhs: self.precision,
                rhs: other.precision,
            });
        }

        for (lhs, &rhs) in self.registers.iter_mut().zip(&other.registers) {
            if rhs > *lhs {
                *lhs = rhs;
            }
        }

        Ok(())
    }

    /// Return the configured precision.
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Return the number of registers (`2^precision`).
    #[inline]
    pub fn register_count(&self) -> usize {
        self.registers.len()
    }

    /// Return the expected relative standard error, `1.04 / sqrt(m)`.
    pub fn expected_relative_error(&self) -> f64 {
        1.04 / (self.registers.len() as f64).sqrt()
    }

    /// Return `true` when no item has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|&rank| rank == 0)
    }

    /// Return the memory footprint of the estimator.
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(self.registers.as_slice())
    }
}

impl<H: Hasher + Default> Clone for HyperLogLog<H> {
    fn clone(&self) -> Self {
        Self {
            precision: self.precision,
            registers: self.registers.clone(),
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<H: Hasher + Default> PartialEq for HyperLogLog<H> {
    /// Estimators compare equal when they hold identical register state.
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision && self.registers == other.registers
    }
}

impl<H: Hasher + Default> Debug for HyperLogLog<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, estimate: {:.1}, size: {} }}",
            self.precision,
            self.estimate(),
            self.size_of()
        )
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}
