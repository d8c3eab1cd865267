#![allow(non_snake_case)]
//! In-process eigensolver for general real matrices.
//!
//! The matrix is reduced to upper Hessenberg form, either with Householder
//! reflections computed here or with LAPACK `?gehrd`/`?orghr`, and then to
//! real Schur form by Francis double-shift QR iteration.  Eigenvectors
//! are recovered by back substitution and normalized as LAPACK `?geev`
//! does, so results from both kernels can be compared directly.

use super::kernel::{check_geev_args, normalize_eigenvectors, GeevKernel};
use crate::algebra::*;

mod hessenberg;
mod schur;
pub use hessenberg::*;

/// Eigen-decomposition kernel running the in-process solver.
pub struct NativeGeev<T> {
    engine: HessenbergEngine<T>,

    // working copies of the Hessenberg / Schur form
    // and the accumulated transformations
    H: Matrix<T>,
    Q: Matrix<T>,
}

impl<T> NativeGeev<T>
where
    T: FloatT,
{
    pub fn new(method: HessenbergMethod) -> Self {
        Self {
            engine: HessenbergEngine::new(method),
            H: Matrix::zeros((0, 0)),
            Q: Matrix::zeros((0, 0)),
        }
    }

    pub fn method(&self) -> HessenbergMethod {
        self.engine.method
    }
}

impl<T: FloatT> Default for NativeGeev<T> {
    fn default() -> Self {
        Self::new(HessenbergMethod::default())
    }
}

impl<T> GeevKernel<T> for NativeGeev<T>
where
    T: FloatT,
{
    fn name(&self) -> &'static str {
        "Native solver"
    }

    fn geev(&mut self, n: usize, a: &mut [T], wr: &mut [T], wi: &mut [T], v: &mut [T]) -> i32 {
        let info = check_geev_args(n, a, wr, wi, v);
        if info != 0 || n == 0 {
            return info;
        }

        self.H.resize((n, n));
        self.H.copy_from_slice(a);
        self.Q.resize((n, n));

        // bring the entries into a range where the QR sweeps
        // neither overflow nor underflow, as ?geev does
        let scaling = scaling_factor(self.H.data().norm_inf());
        if let Some(c) = scaling {
            self.H.data_mut().scale(c);
        }

        match self.engine.reduce(&mut self.H, &mut self.Q) {
            Ok(()) => {}
            Err(DenseFactorizationError::Hessenberg(info)) => return info,
            Err(_) => return -2,
        }

        let result = schur::hqr2(&mut self.H, &mut self.Q, wr, wi);

        // the input is working storage only
        a.copy_from(self.H.data());

        if let Err(k) = result {
            // n is bounded by i32 after check_geev_args
            return k as i32 + 1;
        }

        if let Some(c) = scaling {
            wr.scale(c.recip());
            wi.scale(c.recip());
        }

        v.copy_from(self.Q.data());
        normalize_eigenvectors(n, wi, v, false);
        0
    }
}

// Factor taking a matrix with largest entry `anrm` into
// [sqrt(safmin)/eps, eps/sqrt(safmin)], or None if it is
// already inside, zero or not finite.
fn scaling_factor<T: FloatT>(anrm: T) -> Option<T> {
    let smlnum = T::min_positive_value().sqrt() / T::epsilon();
    let bignum = smlnum.recip();

    if !anrm.is_finite() || anrm == T::zero() {
        None
    } else if anrm < smlnum {
        Some(smlnum / anrm)
    } else if anrm > bignum {
        Some(bignum / anrm)
    } else {
        None
    }
}

// ---- unit testing ----

#[cfg(test)]
mod test {
    use super::*;

    fn run_native_geev<T: FloatT>(method: HessenbergMethod, A: &Matrix<T>) -> (Vec<T>, Vec<T>, Matrix<T>) {
        let n = A.nrows();
        let mut a = A.data.clone();
        let mut wr = vec![T::zero(); n];
        let mut wi = vec![T::zero(); n];
        let mut v = vec![T::zero(); n * n];
        let mut kernel = NativeGeev::<T>::new(method);
        assert_eq!(kernel.geev(n, &mut a, &mut wr, &mut wi, &mut v), 0);
        (wr, wi, Matrix::new_from_slice((n, n), &v))
    }

    // checks A*V = V*D column by column, with D the real block
    // diagonal form of the eigenvalues
    fn eigen_residual<T: FloatT>(A: &Matrix<T>, wr: &[T], wi: &[T], V: &Matrix<T>) -> T {
        let n = A.nrows();
        let mut AV = Matrix::<T>::zeros((n, n));
        AV.mul(A, V, T::one(), T::zero());

        let mut VD = Matrix::<T>::zeros((n, n));
        let mut j = 0;
        while j < n {
            if wi[j] == T::zero() {
                for i in 0..n {
                    VD[(i, j)] = V[(i, j)] * wr[j];
                }
                j += 1;
            } else {
                for i in 0..n {
                    let (re, im) = (V[(i, j)], V[(i, j + 1)]);
                    VD[(i, j)] = re * wr[j] + im * wi[j + 1];
                    VD[(i, j + 1)] = re * wi[j] + im * wr[j];
                }
                j += 2;
            }
        }
        AV.norm_inf_diff(&VD)
    }

    #[rustfmt::skip]
    fn test_matrix_real<T: FloatT>() -> Matrix<T> {
        // eigenvalues 2, 3 from the leading block, and 1
        Matrix::<T>::from(&[
            [(4.0).as_T(),  (-2.0).as_T(), (1.0).as_T()],
            [(1.0).as_T(),  (1.0).as_T(),  (0.0).as_T()],
            [(0.0).as_T(),  (0.0).as_T(),  (1.0).as_T()],
        ])
    }

    #[rustfmt::skip]
    fn test_matrix_complex<T: FloatT>() -> Matrix<T> {
        // a rotation block coupled to a real eigenvalue
        Matrix::<T>::from(&[
            [(1.0).as_T(),  (-2.0).as_T(), (0.5).as_T(),  (0.0).as_T()],
            [(2.0).as_T(),  (1.0).as_T(),  (0.0).as_T(),  (0.3).as_T()],
            [(0.0).as_T(),  (0.0).as_T(),  (3.0).as_T(),  (1.0).as_T()],
            [(0.0).as_T(),  (0.0).as_T(),  (0.0).as_T(),  (-1.0).as_T()],
        ])
    }

    fn run_native_geev_test<T: FloatT>(method: HessenbergMethod, tol: T) {
        let A = test_matrix_real::<T>();
        let (wr, wi, V) = run_native_geev(method, &A);
        assert_eq!(wi.norm_inf(), T::zero());
        let mut sorted = wr.clone();
        sorted.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert!(sorted.norm_inf_diff(&[T::one(), (2.0).as_T(), (3.0).as_T()]) < tol);
        assert!(eigen_residual(&A, &wr, &wi, &V) < tol);
        for j in 0..V.ncols() {
            assert!((V.col_slice(j).norm() - T::one()).abs() < tol);
        }

        let A = test_matrix_complex::<T>();
        let (wr, wi, V) = run_native_geev(method, &A);
        assert!(eigen_residual(&A, &wr, &wi, &V) < tol);

        // exactly one conjugate pair 1 +/- 2i, positive part first
        let j = wi.iter().position(|&x| x != T::zero()).unwrap();
        assert!((wr[j] - T::one()).abs() < tol);
        assert!((wi[j] - (2.0).as_T()).abs() < tol);
        assert_eq!(wi[j + 1], -wi[j]);
    }

    macro_rules! generate_test_native_geev {
        ($fxx:ty, $test_name:ident, $tol:expr) => {
            #[test]
            fn $test_name() {
                run_native_geev_test::<$fxx>(HessenbergMethod::Native, $tol);
                run_native_geev_test::<$fxx>(HessenbergMethod::Lapack, $tol);
            }
        };
    }

    generate_test_native_geev!(f32, test_native_geev_f32, 1e-4);
    generate_test_native_geev!(f64, test_native_geev_f64, 1e-12);

    #[test]
    fn test_native_geev_names_and_args() {
        let mut kernel = NativeGeev::<f64>::default();
        assert_eq!(kernel.name(), "Native solver");
        assert_eq!(kernel.method(), HessenbergMethod::Native);

        let mut a = vec![1.0; 4];
        let mut wr = vec![0.0; 1];
        let mut wi = vec![0.0; 2];
        let mut v = vec![0.0; 4];
        assert_eq!(kernel.geev(2, &mut a, &mut wr, &mut wi, &mut v), -3);
        assert_eq!(kernel.geev(0, &mut [], &mut [], &mut [], &mut []), 0);
    }

    fn run_native_geev_extreme_test<T: FloatT>(scales: &[T], tol: T) {
        use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};

        let n = 6;
        let mut rng = StdRng::seed_from_u64(7);
        let dist = Uniform::new_inclusive(-1.0_f64, 1.0);
        let data: Vec<T> = (0..n * n).map(|_| -> T { rng.sample(dist).as_T() }).collect();
        let A = Matrix::new_from_slice((n, n), &data);

        for &c in scales {
            let mut cA = A.clone();
            cA.scale(c);

            for method in [HessenbergMethod::Native, HessenbergMethod::Lapack] {
                let (mut wr, mut wi, V) = run_native_geev(method, &cA);
                assert!(wr.is_finite() && wi.is_finite() && V.is_finite());

                // eigenvalues of c*A are c times those of A
                wr.scale(c.recip());
                wi.scale(c.recip());
                assert!(eigen_residual(&A, &wr, &wi, &V) < tol);
            }
        }
    }

    #[test]
    fn test_native_geev_extreme_f64() {
        run_native_geev_extreme_test::<f64>(&[1e200, 1e160, 1e-160, 1e-300], 1e-10);
    }

    #[test]
    fn test_native_geev_extreme_f32() {
        run_native_geev_extreme_test::<f32>(&[1e30, 1e-30], 1e-3);
    }

    #[test]
    fn test_scaling_factor() {
        assert_eq!(scaling_factor(1.0_f64), None);
        assert_eq!(scaling_factor(0.0_f64), None);
        assert_eq!(scaling_factor(f64::INFINITY), None);
        assert_eq!(scaling_factor(f64::NAN), None);

        let c = scaling_factor(1e200_f64).unwrap();
        assert!(c * 1e200 > 1e100 && c * 1e200 < 1e154);
        let c = scaling_factor(1e-300_f64).unwrap();
        assert!(c * 1e-300 > 1e-154 && c * 1e-300 < 1e-100);
    }

    #[test]
    fn test_native_geev_random() {
        use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};

        let n = 25;
        let mut rng = StdRng::seed_from_u64(1234);
        let dist = Uniform::new_inclusive(-1.0, 1.0);
        let data: Vec<f64> = (0..n * n).map(|_| rng.sample(dist)).collect();
        let A = Matrix::new_from_slice((n, n), &data);

        for method in [HessenbergMethod::Native, HessenbergMethod::Lapack] {
            let (wr, wi, V) = run_native_geev(method, &A);
            assert!(eigen_residual(&A, &wr, &wi, &V) < 1e-10);

            // conjugate pairs are adjacent
            let mut j = 0;
            while j < n {
                if wi[j] != 0.0 {
                    assert!(wi[j] > 0.0);
                    assert_eq!(wi[j + 1], -wi[j]);
                    assert_eq!(wr[j + 1], wr[j]);
                    j += 2;
                } else {
                    j += 1;
                }
            }
        }
    }
}
