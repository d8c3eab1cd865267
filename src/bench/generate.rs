#![allow(non_snake_case)]
use crate::algebra::*;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Source of random dense test matrices.
///
/// Entries are drawn independently and uniformly from `[-1, 1]`.  A
/// seeded generator produces the same sequence of matrices on every run.
pub struct MatrixGenerator {
    rng: StdRng,
    dist: Uniform<f64>,
}

impl MatrixGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            dist: Uniform::new_inclusive(-1.0, 1.0),
        }
    }

    /// Draws a fresh `n x n` matrix.
    ///
    /// Fails with `IncompatibleDimension` if `n*n` overflows or `n` is
    /// too large for a BLAS dimension.  Nothing is drawn in that case.
    pub fn generate<T: FloatT>(&mut self, n: usize) -> Result<Matrix<T>, DenseFactorizationError> {
        let len = n
            .checked_mul(n)
            .ok_or(DenseFactorizationError::IncompatibleDimension)?;
        blas_dim(n)?;

        let data = (0..len)
            .map(|_| -> T { self.dist.sample(&mut self.rng).as_T() })
            .collect::<Vec<_>>();
        Ok(Matrix::new_from_slice((n, n), &data))
    }
}

#[test]
fn test_generator_range_and_seed() {
    let mut g1 = MatrixGenerator::new(Some(1234));
    let mut g2 = MatrixGenerator::new(Some(1234));

    let A: Matrix<f64> = g1.generate(8).unwrap();
    let B: Matrix<f64> = g2.generate(8).unwrap();
    assert_eq!(A, B);
    assert_eq!(A.size(), (8, 8));
    assert!(A.data().iter().all(|&x| (-1.0..=1.0).contains(&x)));

    // the stream advances
    let C: Matrix<f64> = g1.generate(8).unwrap();
    assert_ne!(A, C);

    let E: Matrix<f32> = g1.generate(0).unwrap();
    assert_eq!(E.size(), (0, 0));
}

#[test]
fn test_generator_size_overflow() {
    let mut g1 = MatrixGenerator::new(Some(1234));
    let mut g2 = MatrixGenerator::new(Some(1234));

    let too_big = [usize::MAX, 1 << (usize::BITS / 2), i32::MAX as usize + 1];
    for n in too_big {
        assert_eq!(
            g1.generate::<f64>(n),
            Err(DenseFactorizationError::IncompatibleDimension)
        );
    }

    // a rejected size leaves the stream untouched
    let A: Matrix<f64> = g1.generate(3).unwrap();
    let B: Matrix<f64> = g2.generate(3).unwrap();
    assert_eq!(A, B);
}
