use thiserror::Error;

/// Error type returned by BLAS-like dense factorization routines.  Errors
/// return the internal BLAS error codes.
#[allow(clippy::upper_case_acronyms)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenseFactorizationError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// ?gesdd returned a nonzero info code
    #[error("SVD error (info = {0})")]
    SVD(i32),
    /// ?gesv returned a nonzero info code
    #[error("LU error (info = {0})")]
    LU(i32),
    /// ?gehrd or ?orghr returned a nonzero info code
    #[error("Hessenberg reduction error (info = {0})")]
    Hessenberg(i32),
}

// BLAS integer dimensions are i32.  Anything larger can't be passed
// through the FFI boundary.
pub(crate) fn blas_dim(n: usize) -> Result<i32, DenseFactorizationError> {
    i32::try_from(n).map_err(|_| DenseFactorizationError::IncompatibleDimension)
}
