#![allow(non_snake_case)]
use super::kernel::{check_geev_args, GeevKernel};
use crate::algebra::*;

pub(crate) struct GeevBlasWorkVectors<T> {
    pub work: Vec<T>,
    pub vl: Vec<T>,
}

impl<T: FloatT> Default for GeevBlasWorkVectors<T> {
    fn default() -> Self {
        // must be at least 1 element because the
        // requiring work size is written into the
        // first element.  Left eigenvectors are not
        // computed, so vl is never more than a placeholder.
        let work = vec![T::one()];
        let vl = vec![T::zero()];
        Self { work, vl }
    }
}

/// Eigen-decomposition kernel calling LAPACK ?geev directly.
///
/// Only right eigenvectors are computed (`jobvl = 'N'`, `jobvr = 'V'`).
/// The LAPACK workspace is allocated on the first call and kept for
/// subsequent ones.
pub struct LapackGeev<T> {
    // BLAS workspace (allocated vecs only)
    blas: Option<GeevBlasWorkVectors<T>>,
}

impl<T: FloatT> LapackGeev<T> {
    pub fn new() -> Self {
        Self { blas: None }
    }
}

impl<T: FloatT> Default for LapackGeev<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GeevKernel<T> for LapackGeev<T>
where
    T: FloatT,
{
    fn name(&self) -> &'static str {
        "LAPACK geev"
    }

    fn geev(&mut self, n: usize, a: &mut [T], wr: &mut [T], wi: &mut [T], v: &mut [T]) -> i32 {
        let info = check_geev_args(n, a, wr, wi, v);
        if info != 0 || n == 0 {
            return info;
        }

        // standard BLAS ?geev arguments for computing
        // right eigenvectors only.  check_geev_args
        // has already bounded n to the i32 range.
        let n = n as i32;

        // unwrap or populate on the first call
        let blaswork = self.blas.get_or_insert_with(GeevBlasWorkVectors::default);

        let jobvl = b'N';
        let jobvr = b'V';
        let lda = n;
        let vl = &mut blaswork.vl;
        let ldvl = 1;
        let ldvr = n;
        let work = &mut blaswork.work;
        let mut lwork = -1_i32; // -1 => config to request required work size
        let info = &mut 0_i32; // output info

        for i in 0..2 {
            #[rustfmt::skip]
            T::xgeev(jobvl, jobvr, n, a, lda, wr, wi, vl, ldvl, v, ldvr, work, lwork, info);

            if *info != 0 {
                return *info;
            }

            // resize work vector and reset length
            if i == 0 {
                lwork = work[0].to_i32().unwrap_or(1).max(4 * n);
                work.resize(lwork as usize, T::zero());
            }
        }
        0
    }
}

// ---- unit testing ----
