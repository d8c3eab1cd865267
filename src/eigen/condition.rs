#![allow(non_snake_case)]
use crate::algebra::*;

/// 2-norm condition number estimator based on a singular value
/// decomposition.
///
/// The SVD engine and its workspace are kept between calls, which makes
/// repeated estimates for same sized matrices cheap.
pub struct ConditionEstimator<T> {
    engine: SVDEngine<T>,
    // private copy of the input, since the SVD is destructive
    work: Matrix<T>,
}

impl<T> ConditionEstimator<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        Self {
            engine: SVDEngine::new((n, n)),
            work: Matrix::zeros((n, n)),
        }
    }

    /// Ratio of the largest to the smallest singular value of `A`.
    ///
    /// Returns `T::infinity()` if the smallest singular value is exactly
    /// zero, and 1 for an empty matrix.  `A` is not modified.
    pub fn estimate(&mut self, A: &Matrix<T>) -> Result<T, DenseFactorizationError> {
        if !A.is_square() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }
        if A.nrows() == 0 {
            return Ok(T::one());
        }

        if self.work.size() != A.size() {
            self.engine.resize(A.size());
            self.work.resize(A.size());
        }
        self.work.data_mut().copy_from(A.data());
        self.engine.factor(&mut self.work)?;

        // singular values are in descending order
        let s = &self.engine.s;
        let (smax, smin) = match (s.first(), s.last()) {
            (Some(&smax), Some(&smin)) => (smax, smin),
            _ => return Ok(T::one()),
        };

        if smin == T::zero() {
            Ok(T::infinity())
        } else {
            Ok(smax / smin)
        }
    }
}

/// Ratio of the largest to the smallest singular value of `A`.
///
/// See [`ConditionEstimator::estimate`].
pub fn condition_number<T: FloatT>(A: &Matrix<T>) -> Result<T, DenseFactorizationError> {
    ConditionEstimator::new(A.nrows()).estimate(A)
}

// ---- unit testing ----
