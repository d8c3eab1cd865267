#![allow(non_snake_case)]
use crate::algebra::*;

/// Raw eigen-decomposition kernel for a general real square matrix.
///
/// This is the single foreign boundary of the crate: flat column major
/// buffers, an explicit dimension and an explicit status code, following
/// the LAPACK `?geev` calling convention.  Implementations exist for
/// LAPACK itself ([`LapackGeev`](crate::eigen::LapackGeev)) and for the
/// in-process solver ([`NativeGeev`](crate::eigen::NativeGeev)).
pub trait GeevKernel<T: FloatT> {
    /// Human readable name used in reports
    fn name(&self) -> &'static str;

    /// Computes eigenvalues `wr + i*wi` and right eigenvectors `v` of the
    /// `n x n` matrix in `a`.
    ///
    /// `a` is overwritten.  Eigenvectors are normalized to unit 2-norm.
    /// A complex conjugate pair occupies two consecutive entries with
    /// the positive imaginary part first, and its eigenvector is stored
    /// as real part / imaginary part in the matching two columns of `v`.
    ///
    /// Returns `info`:
    /// * `0` on success
    /// * `k > 0` if the QR iteration failed.  Eigenvalues `k+1..n`
    ///   (1-based) have converged, but nothing is reported for them.
    /// * `k < 0` if argument `|k|` was invalid, counting
    ///   `n, a, wr, wi, v` from 1.
    fn geev(&mut self, n: usize, a: &mut [T], wr: &mut [T], wi: &mut [T], v: &mut [T]) -> i32;
}

// LAPACK style argument checks shared by all kernels.
pub(crate) fn check_geev_args<T>(n: usize, a: &[T], wr: &[T], wi: &[T], v: &[T]) -> i32 {
    let Some(nn) = n.checked_mul(n) else {
        return -1;
    };
    if blas_dim(n).is_err() {
        -1
    } else if a.len() != nn {
        -2
    } else if wr.len() != n {
        -3
    } else if wi.len() != n {
        -4
    } else if v.len() != nn {
        -5
    } else {
        0
    }
}

/// Normalizes the eigenvectors in `v` (column major, `n x n`) in place.
///
/// Every eigenvector gets unit 2-norm.  For a complex eigenvector the
/// component of largest magnitude is rotated to be real and positive,
/// and its imaginary part is set to exactly zero.  If `positive` is set,
/// a real eigenvector is also flipped so that its component of largest
/// magnitude is positive.
pub(crate) fn normalize_eigenvectors<T: FloatT>(n: usize, wi: &[T], v: &mut [T], positive: bool) {
    let mut j = 0;
    while j < n {
        if wi[j] == T::zero() || j + 1 == n {
            let col = &mut v[j * n..(j + 1) * n];
            let nrm = col.norm();
            if nrm > T::zero() {
                col.scale(T::recip(nrm));
            }
            if positive {
                if let Some(k) = col.argmax_abs() {
                    if col[k] < T::zero() {
                        col.negate();
                    }
                }
            }
            j += 1;
        } else {
            let (re, im) = v[j * n..(j + 2) * n].split_at_mut(n);
            let nrm = T::sqrt(re.sumsq() + im.sumsq());
            if nrm > T::zero() {
                re.scale(T::recip(nrm));
                im.scale(T::recip(nrm));
            }

            // find the component of largest modulus and rotate by
            // the conjugate of its phase
            let mut k = 0;
            let mut kmax = T::zero();
            for i in 0..n {
                let m = re[i] * re[i] + im[i] * im[i];
                if m > kmax {
                    kmax = m;
                    k = i;
                }
            }
            if kmax > T::zero() {
                let r = T::sqrt(kmax);
                let (c, s) = (re[k] / r, im[k] / r);
                for i in 0..n {
                    let (x, y) = (re[i], im[i]);
                    re[i] = c * x + s * y;
                    im[i] = c * y - s * x;
                }
                im[k] = T::zero();
            }
            j += 2;
        }
    }
}
