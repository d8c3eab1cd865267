#![allow(non_snake_case)]
use crate::algebra::{FloatT, Matrix, MatrixMath, VectorMath};

impl<T: FloatT> MatrixMath for Matrix<T> {
    type T = T;

    fn norm_fro(&self) -> T {
        self.data.norm()
    }

    fn norm_inf_diff(&self, B: &Self) -> T {
        assert_eq!((self.m, self.n), (B.m, B.n));
        self.data.norm_inf_diff(&B.data)
    }

    fn scale(&mut self, c: T) {
        self.data.scale(c);
    }

    fn rscale(&mut self, r: &[T]) {
        assert_eq!(r.len(), self.n);
        for (col, val) in r.iter().enumerate() {
            self.col_slice_mut(col).scale(*val);
        }
    }

    fn is_finite(&self) -> bool {
        self.data.is_finite()
    }
}

#[test]
fn test_matrix_norms() {
    let A = Matrix::<f64>::from(&[
        [1., -2.], //
        [2., 4.],  //
    ]);
    assert_eq!(A.norm_fro(), 5.0);

    let mut B = A.clone();
    B.rscale(&[1., 0.5]);
    assert_eq!(B, Matrix::from(&[[1., -1.], [2., 2.]]));
    assert_eq!(A.norm_inf_diff(&B), 2.0);

    B.scale(f64::NAN);
    assert!(!B.is_finite());
}
