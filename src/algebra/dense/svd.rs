#![allow(non_snake_case)]

use crate::algebra::*;
use core::cmp::min;

pub(crate) struct SVDBlasWorkVectors<T> {
    pub work: Vec<T>,
    pub iwork: Vec<i32>,
}

impl<T: FloatT> Default for SVDBlasWorkVectors<T> {
    fn default() -> Self {
        // must be at least 1 element because the
        // requiring work size is written into the
        // first element
        let work = vec![T::one()];
        let iwork = vec![1];
        Self { work, iwork }
    }
}

/// Economy size singular value decomposition by LAPACK `?gesdd`
pub struct SVDEngine<T> {
    /// Computed singular values, in descending order
    pub s: Vec<T>,

    /// Left and right SVD matrices, each containing.
    /// min(m,n) vectors.  Note right singular vectors
    /// are stored in transposed form.
    pub U: Matrix<T>,
    pub Vt: Matrix<T>,

    // BLAS workspace (allocated vecs only)
    blas: Option<SVDBlasWorkVectors<T>>,
}

impl<T> SVDEngine<T>
where
    T: FloatT,
{
    pub fn new(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let s = vec![T::zero(); min(m, n)];
        let U = Matrix::<T>::zeros((m, min(m, n)));
        let Vt = Matrix::<T>::zeros((min(m, n), n));
        let blas = None;
        Self { s, U, Vt, blas }
    }

    pub fn resize(&mut self, size: (usize, usize)) {
        let (m, n) = size;
        self.s.resize(min(m, n), T::zero());
        self.U.resize((m, min(m, n)));
        self.Vt.resize((min(m, n), n));
    }

    fn checkdim(&self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        let (m, n) = A.size();

        if self.U.nrows() != m || self.Vt.ncols() != n {
            Err(DenseFactorizationError::IncompatibleDimension)
        } else {
            Ok(())
        }
    }
}

impl<T> FactorSVD for SVDEngine<T>
where
    T: FloatT,
{
    type T = T;
    fn factor(&mut self, A: &mut Matrix<T>) -> Result<(), DenseFactorizationError> {
        self.checkdim(A)?;

        // nothing to factor
        if self.s.is_empty() {
            return Ok(());
        }

        // standard BLAS ?gesdd arguments for economy size SVD.

        let m = blas_dim(self.U.nrows())?;
        let n = blas_dim(self.Vt.ncols())?;

        // unwrap or populate on the first call
        let blaswork = self.blas.get_or_insert_with(SVDBlasWorkVectors::default);

        let job = b'S'; // compact.
        let a = A.data_mut();
        let lda = m;
        let s = &mut self.s; // singular values go here
        let u = self.U.data_mut(); // U data goes here
        let ldu = m; // leading dim of U
        let vt = self.Vt.data_mut(); // Vt data goes here
        let ldvt = min(m, n); // leading dim of Vt
        let work = &mut blaswork.work;
        let mut lwork = -1_i32; // -1 => config to request required work size
        let iwork = &mut blaswork.iwork;
        let info = &mut 0_i32; // output info

        // iwork is always 8*min(m,n) elements for ?gesdd
        iwork.resize(8 * min(m, n) as usize, 0);

        for i in 0..2 {
            T::xgesdd(
                job, m, n, a, lda, s, u, ldu, vt, ldvt, work, lwork, iwork, info,
            );
            if *info != 0 {
                return Err(DenseFactorizationError::SVD(*info));
            }

            // resize work vector and reset length
            if i == 0 {
                lwork = work[0].to_i32().unwrap_or(1).max(1);
                work.resize(lwork as usize, T::zero());
            }
        }
        Ok(())
    }
}

// ---- unit testing ----
