#![allow(non_snake_case)]
use crate::algebra::{DenseFactorizationError, DenseMatrix, Matrix};

pub trait FactorSVD {
    type T;
    // compute "economy size" SVD.  Values in A are overwritten
    // as internal working space.
    fn factor(&mut self, A: &mut Matrix<Self::T>) -> Result<(), DenseFactorizationError>;
}

pub trait MultiplyGEMM {
    type T;
    fn mul<MATA, MATB>(&mut self, A: &MATA, B: &MATB, α: Self::T, β: Self::T) -> &Self
    where
        MATB: DenseMatrix<T = Self::T>,
        MATA: DenseMatrix<T = Self::T>;
}

// Solve AX = B.  A will be corrupted post solution, and B will be
// overwritten with the solution X.
pub trait SolveLU<T> {
    fn lusolve(
        &mut self,
        A: &mut Matrix<T>,
        B: &mut Matrix<T>,
    ) -> Result<(), DenseFactorizationError>;
}
