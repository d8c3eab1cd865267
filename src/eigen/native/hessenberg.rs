#![allow(non_snake_case)]
use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Algorithm used for the Hessenberg reduction stage of
/// the native eigensolver
#[derive(PartialEq, Eq, Copy, Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HessenbergMethod {
    /// Householder reflections computed in Rust
    #[default]
    Native,
    /// LAPACK ?gehrd followed by ?orghr
    Lapack,
}

pub(crate) struct HessenbergBlasWorkVectors<T> {
    pub tau: Vec<T>,
    pub work: Vec<T>,
}

impl<T: FloatT> Default for HessenbergBlasWorkVectors<T> {
    fn default() -> Self {
        // must be at least 1 element because the
        // requiring work size is written into the
        // first element
        let tau = vec![T::zero()];
        let work = vec![T::one()];
        Self { tau, work }
    }
}

/// Reduction of a square matrix to upper Hessenberg form `A = Q*H*Q^T`
pub struct HessenbergEngine<T> {
    pub method: HessenbergMethod,

    // Householder vector workspace for the native method
    ort: Vec<T>,

    // BLAS workspace (allocated vecs only)
    blas: Option<HessenbergBlasWorkVectors<T>>,
}

impl<T> HessenbergEngine<T>
where
    T: FloatT,
{
    pub fn new(method: HessenbergMethod) -> Self {
        Self {
            method,
            ort: vec![],
            blas: None,
        }
    }

    /// Overwrites `H` (holding `A` on entry) with its Hessenberg form
    /// and `Q` with the orthogonal similarity transform.  Every entry
    /// of `H` below the first subdiagonal is exactly zero on return.
    pub fn reduce(&mut self, H: &mut Matrix<T>, Q: &mut Matrix<T>) -> Result<(), DenseFactorizationError> {
        if !H.is_square() || Q.size() != H.size() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }
        if H.nrows() == 0 {
            return Ok(());
        }

        match self.method {
            HessenbergMethod::Native => self.reduce_native(H, Q),
            HessenbergMethod::Lapack => self.reduce_lapack(H, Q)?,
        }

        let n = H.nrows();
        for c in 0..n {
            for r in (c + 2)..n {
                H[(r, c)] = T::zero();
            }
        }
        Ok(())
    }

    // Householder reduction, as in EISPACK orthes and ortran
    fn reduce_native(&mut self, H: &mut Matrix<T>, V: &mut Matrix<T>) {
        let n = H.nrows();
        let (low, high) = (0, n - 1);
        let ort = &mut self.ort;
        ort.resize(n, T::zero());
        ort.set(T::zero());

        for m in (low + 1)..high {
            // scale column
            let mut scale = T::zero();
            for i in m..=high {
                scale += T::abs(H[(i, m - 1)]);
            }
            if scale == T::zero() {
                continue;
            }

            // compute Householder transformation
            let mut h = T::zero();
            for i in (m..=high).rev() {
                ort[i] = H[(i, m - 1)] / scale;
                h += ort[i] * ort[i];
            }
            let mut g = T::sqrt(h);
            if ort[m] > T::zero() {
                g = -g;
            }
            h -= ort[m] * g;
            ort[m] -= g;

            // apply Householder similarity transformation
            // H = (I-u*u'/h)*H*(I-u*u')/h)
            for j in m..n {
                let mut f = T::zero();
                for i in (m..=high).rev() {
                    f += ort[i] * H[(i, j)];
                }
                f /= h;
                for i in m..=high {
                    H[(i, j)] -= f * ort[i];
                }
            }

            for i in 0..=high {
                let mut f = T::zero();
                for j in (m..=high).rev() {
                    f += ort[j] * H[(i, j)];
                }
                f /= h;
                for j in m..=high {
                    H[(i, j)] -= f * ort[j];
                }
            }
            ort[m] *= scale;
            H[(m, m - 1)] = scale * g;
        }

        // accumulate transformations
        V.set_identity();

        for m in ((low + 1)..high).rev() {
            if H[(m, m - 1)] == T::zero() {
                continue;
            }
            for i in (m + 1)..=high {
                ort[i] = H[(i, m - 1)];
            }
            for j in m..=high {
                let mut g = T::zero();
                for i in m..=high {
                    g += ort[i] * V[(i, j)];
                }
                // double division avoids possible underflow
                g = (g / ort[m]) / H[(m, m - 1)];
                for i in m..=high {
                    V[(i, j)] += g * ort[i];
                }
            }
        }
    }

    // LAPACK ?gehrd + ?orghr
    fn reduce_lapack(&mut self, H: &mut Matrix<T>, Q: &mut Matrix<T>) -> Result<(), DenseFactorizationError> {
        // standard BLAS ?gehrd and ?orghr arguments for
        // reducing the full matrix, i.e. no balancing
        let n = blas_dim(H.nrows())?;
        let ilo = 1;
        let ihi = n;
        let lda = n;

        // unwrap or populate on the first call
        let blaswork = self.blas.get_or_insert_with(HessenbergBlasWorkVectors::default);
        blaswork.tau.resize(usize::max(1, H.nrows() - 1), T::zero());

        let tau = &mut blaswork.tau;
        let work = &mut blaswork.work;
        let info = &mut 0_i32; // output info

        let mut lwork = -1_i32; // -1 => config to request required work size
        for i in 0..2 {
            T::xgehrd(n, ilo, ihi, H.data_mut(), lda, tau, work, lwork, info);
            if *info != 0 {
                return Err(DenseFactorizationError::Hessenberg(*info));
            }
            // resize work vector and reset length
            if i == 0 {
                lwork = work[0].to_i32().unwrap_or(1).max(1);
                work.resize(lwork as usize, T::zero());
            }
        }

        // Q is formed from the reflectors stored below
        // the subdiagonal of the ?gehrd output
        Q.data_mut().copy_from(H.data());

        let mut lwork = -1_i32;
        for i in 0..2 {
            T::xorghr(n, ilo, ihi, Q.data_mut(), lda, tau, work, lwork, info);
            if *info != 0 {
                return Err(DenseFactorizationError::Hessenberg(*info));
            }
            if i == 0 {
                lwork = work[0].to_i32().unwrap_or(1).max(1);
                if lwork as usize > work.len() {
                    work.resize(lwork as usize, T::zero());
                }
            }
        }
        Ok(())
    }
}

// ---- unit testing ----

#[cfg(test)]
mod test {
    use super::*;

    #[rustfmt::skip]
    fn test_matrix_4x4<T: FloatT>() -> Matrix<T> {
        Matrix::<T>::from(&[
            [(4.0).as_T(),  (1.0).as_T(),  (-2.0).as_T(), (2.0).as_T()],
            [(1.0).as_T(),  (2.0).as_T(),  (0.0).as_T(),  (1.0).as_T()],
            [(-2.0).as_T(), (3.0).as_T(),  (3.0).as_T(),  (-2.0).as_T()],
            [(2.0).as_T(),  (1.0).as_T(),  (-2.0).as_T(), (-1.0).as_T()],
        ])
    }

    fn run_hessenberg_test<T: FloatT>(method: HessenbergMethod, tol: T) {
        let A = test_matrix_4x4::<T>();
        let n = A.nrows();
        let mut H = A.clone();
        let mut Q = Matrix::<T>::zeros((n, n));

        let mut eng = HessenbergEngine::<T>::new(method);
        eng.reduce(&mut H, &mut Q).unwrap();
        assert!(H.is_hessenberg());

        // Q'Q = I
        let mut QtQ = Matrix::<T>::zeros((n, n));
        QtQ.mul(&Q.t(), &Q, T::one(), T::zero());
        assert!(QtQ.norm_inf_diff(&Matrix::identity(n)) < tol);

        // Q*H*Q' = A
        let mut QH = Matrix::<T>::zeros((n, n));
        QH.mul(&Q, &H, T::one(), T::zero());
        let mut QHQt = Matrix::<T>::zeros((n, n));
        QHQt.mul(&QH, &Q.t(), T::one(), T::zero());
        assert!(QHQt.norm_inf_diff(&A) < tol);
    }

    macro_rules! generate_test_hessenberg {
        ($fxx:ty, $test_name:ident, $tol:expr) => {
            #[test]
            fn $test_name() {
                run_hessenberg_test::<$fxx>(HessenbergMethod::Native, $tol);
                run_hessenberg_test::<$fxx>(HessenbergMethod::Lapack, $tol);
            }
        };
    }

    generate_test_hessenberg!(f32, test_hessenberg_f32, 1e-5);
    generate_test_hessenberg!(f64, test_hessenberg_f64, 1e-12);

    #[test]
    fn test_hessenberg_trivial_sizes() {
        for method in [HessenbergMethod::Native, HessenbergMethod::Lapack] {
            let mut eng = HessenbergEngine::<f64>::new(method);

            let mut H = Matrix::<f64>::zeros((0, 0));
            let mut Q = Matrix::<f64>::zeros((0, 0));
            assert!(eng.reduce(&mut H, &mut Q).is_ok());

            let mut H = Matrix::from(&[[3.0]]);
            let mut Q = Matrix::<f64>::zeros((1, 1));
            eng.reduce(&mut H, &mut Q).unwrap();
            assert_eq!(H, Matrix::from(&[[3.0]]));
            assert!((Q[(0, 0)].abs() - 1.0).abs() < 1e-15);

            let mut Q = Matrix::<f64>::zeros((2, 2));
            assert_eq!(
                eng.reduce(&mut H, &mut Q),
                Err(DenseFactorizationError::IncompatibleDimension)
            );
        }
    }
}
