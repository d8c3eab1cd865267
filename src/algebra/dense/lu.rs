#![allow(non_snake_case)]
use crate::algebra::*;

/// LU based linear solver over LAPACK ?gesv
#[derive(Debug, Default)]
pub struct LuSolver {
    // BLAS workspace (allocated vecs only)
    ipiv: Vec<i32>,
}

impl LuSolver {
    pub fn new() -> Self {
        let ipiv = vec![];
        Self { ipiv }
    }

    /// Computes the inverse of `A`.  `A` is not modified.
    ///
    /// Fails with `DenseFactorizationError::LU(i)` if the i-th
    /// pivot of the factorization is exactly zero.
    pub fn inverse<T: FloatT>(&mut self, A: &Matrix<T>) -> Result<Matrix<T>, DenseFactorizationError> {
        let mut Awork = A.clone();
        let mut X = Matrix::<T>::identity(A.nrows());
        self.lusolve(&mut Awork, &mut X)?;
        Ok(X)
    }
}

impl<T> SolveLU<T> for LuSolver
where
    T: FloatT,
{
    fn lusolve(
        &mut self,
        A: &mut Matrix<T>,
        B: &mut Matrix<T>,
    ) -> Result<(), DenseFactorizationError> {
        if !A.is_square() || A.ncols() != B.nrows() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        if A.nrows() == 0 || B.ncols() == 0 {
            return Ok(());
        }

        let n = blas_dim(A.nrows())?;
        let nrhs = blas_dim(B.ncols())?;
        let lda = n;
        let a = A.data_mut();
        self.ipiv.resize(n as usize, 0);
        let ipiv = self.ipiv.as_mut_slice();
        let ldb = n;
        let b = B.data_mut();
        let info = &mut 0_i32;

        T::xgesv(n, nrhs, a, lda, ipiv, b, ldb, info);

        if *info != 0 {
            return Err(DenseFactorizationError::LU(*info));
        }

        Ok(())
    }
}

macro_rules! generate_test_lu {
    ($fxx:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            let mut A = Matrix::<$fxx>::from(&[
                [3., 2., 4.], //
                [2., 0., 2.], //
                [4., 2., 3.], //
            ]);

            let mut B = Matrix::<$fxx>::from(&[
                [-5., 13.], //
                [-2., 4.],  //
                [-2., 9.],  //
            ]);

            let X = Matrix::<$fxx>::from(&[
                [1., -1.], //
                [0., 2.],  //
                [-2., 3.], //
            ]);

            let mut lu = LuSolver::new();
            lu.lusolve(&mut A, &mut B).unwrap();
            assert!(B.data.norm_inf_diff(&X.data) < 1e-5);
        }
    };
}

generate_test_lu!(f32, test_lu_f32);
generate_test_lu!(f64, test_lu_f64);

#[test]
fn test_lu_inverse() {
    let A = Matrix::<f64>::from(&[
        [4., 7.], //
        [2., 6.], //
    ]);
    let Acopy = A.clone();

    let mut lu = LuSolver::new();
    let Ainv = lu.inverse(&A).unwrap();
    let expected = Matrix::<f64>::from(&[
        [0.6, -0.7], //
        [-0.2, 0.4], //
    ]);
    assert!(Ainv.data.norm_inf_diff(&expected.data) < 1e-14);
    assert_eq!(A, Acopy);
}

#[test]
fn test_lu_singular() {
    let A = Matrix::<f64>::from(&[
        [1., 2.], //
        [2., 4.], //
    ]);
    let mut lu = LuSolver::new();
    assert!(matches!(lu.inverse(&A), Err(DenseFactorizationError::LU(i)) if i > 0));
}
