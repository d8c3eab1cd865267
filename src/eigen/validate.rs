#![allow(non_snake_case)]
use super::decomposition::EigenDecomposition;
use crate::algebra::*;
use crate::io::ReportSink;
use thiserror::Error;

/// Error type returned by the reconstruction validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Matrix and decomposition sizes do not agree
    #[error("Matrix and decomposition dimensions are incompatible")]
    IncompatibleDimension,
    /// The eigenvector matrix can not be inverted
    #[error("Eigenvector matrix is singular, the matrix may be defective")]
    SingularEigenbasis,
    /// Any other failure in the dense factorization
    #[error(transparent)]
    Factorization(#[from] DenseFactorizationError),
}

/// Rebuilds the decomposed matrix as `V * D * inv(V)`, with `D` the
/// [block diagonal](EigenDecomposition::block_diagonal) eigenvalue matrix.
pub fn reconstruct<T: FloatT>(decomp: &EigenDecomposition<T>) -> Result<Matrix<T>, ValidationError> {
    let n = decomp.size();
    if decomp.wi.len() != n || decomp.V.size() != (n, n) {
        return Err(ValidationError::IncompatibleDimension);
    }

    let Vinv = match LuSolver::new().inverse(&decomp.V) {
        Ok(Vinv) => Vinv,
        Err(DenseFactorizationError::LU(info)) if info > 0 => {
            return Err(ValidationError::SingularEigenbasis);
        }
        Err(e) => return Err(e.into()),
    };
    // numerically singular, but with nonzero pivots
    if !Vinv.is_finite() {
        return Err(ValidationError::SingularEigenbasis);
    }

    let D = decomp.block_diagonal();
    let mut VD = Matrix::zeros((n, n));
    VD.mul(&decomp.V, &D, T::one(), T::zero());
    let mut Ahat = Matrix::zeros((n, n));
    Ahat.mul(&VD, &Vinv, T::one(), T::zero());
    Ok(Ahat)
}

/// Relative reconstruction error `‖A - V*D*inv(V)‖_F / ‖A‖_F`.
///
/// If `A` is zero the absolute error is returned instead.
pub fn check_decomposition<T: FloatT>(
    A: &Matrix<T>,
    decomp: &EigenDecomposition<T>,
) -> Result<T, ValidationError> {
    if !A.is_square() || A.nrows() != decomp.size() {
        return Err(ValidationError::IncompatibleDimension);
    }

    // R = A - Ahat
    let mut R = reconstruct(decomp)?;
    R.data_mut().axpby(T::one(), A.data(), -T::one());

    let err = R.norm_fro();
    let nrmA = A.norm_fro();
    if nrmA == T::zero() {
        Ok(err)
    } else {
        Ok(err / nrmA)
    }
}

/// Writes `"<method> relative reconstruction error: <error>"` to `sink`.
pub fn report_decomposition<T: FloatT>(
    method: &str,
    error: T,
    sink: &mut impl ReportSink,
) -> std::io::Result<()> {
    sink.emit_line(&format!("{method} relative reconstruction error: {error:e}"))
}

// ---- unit testing ----
