#![allow(non_snake_case)]
use super::kernel::{normalize_eigenvectors, GeevKernel};
use crate::algebra::*;
use std::cmp::Ordering;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Error type returned by [`eigen_decomposition`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompositionError {
    /// The input matrix is not square
    #[error("Matrix must be square, found {nrows} x {ncols}")]
    NotSquare { nrows: usize, ncols: usize },
    /// The input matrix has Inf or NaN entries
    #[error("Matrix contains non-finite values")]
    NonFinite,
    /// The kernel returned a nonzero info code.  No result is available.
    #[error("{kernel} failed (info = {info})")]
    Kernel { kernel: &'static str, info: i32 },
}

/// Eigenvalues and right eigenvectors of a real square matrix.
///
/// Eigenvalue `j` is `wr[j] + i*wi[j]`.  Complex eigenvalues come in
/// conjugate pairs `(j, j+1)` with `wi[j] > 0`, and the eigenvector of
/// `wr[j] + i*wi[j]` is `V[:,j] + i*V[:,j+1]`.  Real eigenvalues have
/// `wi[j] == 0` and eigenvector `V[:,j]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct EigenDecomposition<T = f64> {
    /// real parts of the eigenvalues
    pub wr: Vec<T>,
    /// imaginary parts of the eigenvalues
    pub wi: Vec<T>,
    /// eigenvectors, one per column
    pub V: Matrix<T>,
}

impl<T> EigenDecomposition<T>
where
    T: FloatT,
{
    /// Dimension of the decomposed matrix
    pub fn size(&self) -> usize {
        self.wr.len()
    }

    /// True if every eigenvalue is real
    pub fn is_real(&self) -> bool {
        self.wi.iter().all(|&x| x == T::zero())
    }

    // (first column, width) of each 1x1 or 2x2 eigenvalue block
    fn blocks(&self) -> Vec<(usize, usize)> {
        let n = self.size();
        let mut blocks = Vec::with_capacity(n);
        let mut j = 0;
        while j < n {
            if self.wi[j] != T::zero() && j + 1 < n {
                blocks.push((j, 2));
                j += 2;
            } else {
                blocks.push((j, 1));
                j += 1;
            }
        }
        blocks
    }

    /// Real block diagonal matrix `D` with `A*V = V*D`.
    ///
    /// This is `diag(wr)` for a real spectrum.  Each conjugate pair
    /// `a +/- ib` contributes a block `[a b; -b a]`.
    pub fn block_diagonal(&self) -> Matrix<T> {
        let n = self.size();
        let mut D = Matrix::zeros((n, n));
        for (j, width) in self.blocks() {
            D[(j, j)] = self.wr[j];
            if width == 2 {
                D[(j, j + 1)] = self.wi[j];
                D[(j + 1, j)] = self.wi[j + 1];
                D[(j + 1, j + 1)] = self.wr[j + 1];
            }
        }
        D
    }

    /// Returns a copy in a canonical form, so that decompositions from
    /// different kernels can be compared entry by entry.
    ///
    /// Eigenvalues are sorted by real part and then by magnitude of the
    /// imaginary part, keeping conjugate pairs together with the positive
    /// imaginary part first.  Eigenvectors get unit 2-norm, and their
    /// component of largest magnitude is made real and positive.
    pub fn canonicalize(&self) -> Self {
        let n = self.size();
        let mut blocks = self.blocks();

        let key = |j: usize| (self.wr[j], self.wi[j].abs());
        blocks.sort_by(|&(a, _), &(b, _)| {
            let (ka, kb) = (key(a), key(b));
            let cmp = |x: T, y: T| x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            cmp(ka.0, kb.0).then(cmp(ka.1, kb.1))
        });

        let mut wr = Vec::with_capacity(n);
        let mut wi = Vec::with_capacity(n);
        let mut V = Matrix::zeros((n, n));

        for (src, width) in blocks {
            let dst = wr.len();
            for c in 0..width {
                wr.push(self.wr[src + c]);
                V.col_slice_mut(dst + c)
                    .copy_from(self.V.col_slice(src + c));
            }
            if width == 1 {
                wi.push(T::zero());
            } else {
                let b = self.wi[src].abs();
                wi.push(b);
                wi.push(-b);
                // stored with the negative part first, so the
                // eigenvector is the conjugate of the stored one
                if self.wi[src] < T::zero() {
                    V.col_slice_mut(dst + 1).negate();
                }
            }
        }

        normalize_eigenvectors(n, &wi, V.data_mut(), true);
        Self { wr, wi, V }
    }

    /// Largest absolute difference between the eigenvalues of `self`
    /// and `other`, over both real and imaginary parts.  Both should
    /// be [canonicalized](Self::canonicalize) for this to be meaningful.
    pub fn max_eigenvalue_diff(&self, other: &Self) -> T {
        let dr = self.wr.norm_inf_diff(&other.wr);
        let di = self.wi.norm_inf_diff(&other.wi);
        // propagate NaN rather than let max() hide it
        if dr.is_nan() || di.is_nan() {
            T::nan()
        } else {
            T::max(dr, di)
        }
    }

    /// Largest absolute elementwise difference between the eigenvector
    /// matrices of `self` and `other`.
    pub fn max_eigenvector_diff(&self, other: &Self) -> T {
        self.V.norm_inf_diff(&other.V)
    }
}

/// Computes the eigen-decomposition of `A` with the given kernel.
///
/// `A` is copied before the kernel is invoked and is never modified.
/// A nonzero kernel status is reported as
/// [`DecompositionError::Kernel`] and no partial result is returned.
pub fn eigen_decomposition<T, K>(
    kernel: &mut K,
    A: &Matrix<T>,
) -> Result<EigenDecomposition<T>, DecompositionError>
where
    T: FloatT,
    K: GeevKernel<T> + ?Sized,
{
    if !A.is_square() {
        return Err(DecompositionError::NotSquare {
            nrows: A.nrows(),
            ncols: A.ncols(),
        });
    }
    if !A.is_finite() {
        return Err(DecompositionError::NonFinite);
    }

    let n = A.nrows();
    let mut scratch = A.data.clone();
    let mut wr = vec![T::zero(); n];
    let mut wi = vec![T::zero(); n];
    let mut V = Matrix::zeros((n, n));

    let info = kernel.geev(n, &mut scratch, &mut wr, &mut wi, V.data_mut());

    if info != 0 {
        return Err(DecompositionError::Kernel {
            kernel: kernel.name(),
            info,
        });
    }

    Ok(EigenDecomposition { wr, wi, V })
}

// ---- unit testing ----

#[cfg(test)]
mod test {
    use super::*;
    use crate::eigen::{HessenbergMethod, LapackGeev, NativeGeev};

    #[test]
    fn test_block_diagonal() {
        let decomp = EigenDecomposition {
            wr: vec![1.0, 2.0, 2.0],
            wi: vec![0.0, 3.0, -3.0],
            V: Matrix::identity(3),
        };
        assert!(!decomp.is_real());
        let D = decomp.block_diagonal();
        assert_eq!(
            D,
            Matrix::from(&[
                [1., 0., 0.],  //
                [0., 2., 3.],  //
                [0., -3., 2.], //
            ])
        );
    }

    #[test]
    fn test_canonicalize() {
        // eigenvalues (3, 1+2i, 1-2i, -1) in mixed order
        #[rustfmt::skip]
        let V = Matrix::from(&[
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
            [-2.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.5],
        ]);
        let decomp = EigenDecomposition {
            wr: vec![3.0, 1.0, 1.0, -1.0],
            wi: vec![0.0, 2.0, -2.0, 0.0],
            V,
        };
        let canon = decomp.canonicalize();

        assert_eq!(canon.wr, vec![-1.0, 1.0, 1.0, 3.0]);
        assert_eq!(canon.wi, vec![0.0, 2.0, -2.0, 0.0]);

        // the complex eigenvector (e1 - i*e2) has unit norm overall
        let h = 0.5_f64.sqrt();
        #[rustfmt::skip]
        let expected = Matrix::from(&[
            [0.0, h,   0.0, 0.0],
            [0.0, 0.0, -h,  0.0],
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 0.0],
        ]);
        assert!(canon.V.norm_inf_diff(&expected) < 1e-15);

        // canonical form is a fixed point
        let again = canon.canonicalize();
        assert_eq!(again.wr, canon.wr);
        assert_eq!(again.wi, canon.wi);
        assert!(again.max_eigenvector_diff(&canon) < 1e-15);
        assert_eq!(decomp.max_eigenvalue_diff(&decomp), 0.0);
    }

    #[test]
    fn test_canonicalize_conjugate_first() {
        // pair stored with the negative imaginary part first
        let decomp = EigenDecomposition {
            wr: vec![0.0, 0.0],
            wi: vec![-1.0, 1.0],
            V: Matrix::from(&[[1.0, 0.0], [0.0, 1.0]]),
        };
        let canon = decomp.canonicalize();
        assert_eq!(canon.wi, vec![1.0, -1.0]);
        let h = 0.5_f64.sqrt();
        assert!(canon.V.col_slice(1).norm_inf_diff(&[0.0, -h]) < 1e-15);
    }

    struct FailingKernel(i32);

    impl GeevKernel<f64> for FailingKernel {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn geev(&mut self, _n: usize, a: &mut [f64], _wr: &mut [f64], _wi: &mut [f64], _v: &mut [f64]) -> i32 {
            a.set(f64::NAN);
            self.0
        }
    }

    #[test]
    fn test_kernel_failure() {
        let A = Matrix::<f64>::identity(3);
        for info in [2, -4] {
            let mut kernel = FailingKernel(info);
            assert_eq!(
                eigen_decomposition(&mut kernel, &A),
                Err(DecompositionError::Kernel {
                    kernel: "failing",
                    info
                })
            );
        }
        // the kernel scribbled on its own copy only
        assert_eq!(A, Matrix::identity(3));
    }

    #[test]
    fn test_bad_inputs() {
        let mut kernel = LapackGeev::<f64>::new();

        let A = Matrix::<f64>::zeros((2, 3));
        assert_eq!(
            eigen_decomposition(&mut kernel, &A),
            Err(DecompositionError::NotSquare { nrows: 2, ncols: 3 })
        );

        let mut A = Matrix::<f64>::identity(2);
        A[(1, 0)] = f64::INFINITY;
        assert_eq!(
            eigen_decomposition(&mut kernel, &A),
            Err(DecompositionError::NonFinite)
        );
    }

    macro_rules! generate_test_decomposition {
        ($fxx:ty, $test_name:ident, $tol:expr) => {
            #[test]
            fn $test_name() {
                #[rustfmt::skip]
                let A = Matrix::<$fxx>::from(&[
                    [2.0, 1.0, 0.0, 0.0],
                    [-1.0, 2.0, 0.5, 0.0],
                    [0.0, 0.3, -3.0, 1.0],
                    [0.2, 0.0, 0.0, 4.0],
                ]);
                let Acopy = A.clone();

                let mut lapack = LapackGeev::<$fxx>::new();
                let mut native = NativeGeev::<$fxx>::new(HessenbergMethod::Native);
                let a = eigen_decomposition(&mut lapack, &A).unwrap();
                let b = eigen_decomposition(&mut native, &A).unwrap();
                assert_eq!(A, Acopy);

                let (a, b) = (a.canonicalize(), b.canonicalize());
                assert!(a.max_eigenvalue_diff(&b) < $tol);
                assert!(a.max_eigenvector_diff(&b) < $tol);

                // empty matrices are fine too
                let E = Matrix::<$fxx>::zeros((0, 0));
                let e = eigen_decomposition(&mut native, &E).unwrap();
                assert_eq!(e.size(), 0);
                assert!(e.is_real());
            }
        };
    }

    generate_test_decomposition!(f32, test_decomposition_f32, 1e-4);
    generate_test_decomposition!(f64, test_decomposition_f64, 1e-10);
}
