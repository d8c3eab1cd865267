// All vector and matrix math used by the eigensolvers and the
// comparison driver goes through these traits, which are implemented
// generically for floats of type FloatT.

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)
pub trait VectorMath {
    type T;

    /// Copy values from `src` to `self`
    fn copy_from(&mut self, src: &Self) -> &mut Self;

    /// Apply an elementwise operation on a vector.
    fn scalarop(&mut self, op: impl Fn(Self::T) -> Self::T) -> &mut Self;

    /// set all elements to the same value
    fn set(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise negation of entries.
    fn negate(&mut self) -> &mut Self;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Sum of squares of the elements.
    fn sumsq(&self) -> Self::T;

    /// 2-norm
    fn norm(&self) -> Self::T;

    /// Infinity norm
    fn norm_inf(&self) -> Self::T;

    /// Largest absolute elementwise difference between `self` and `b`
    fn norm_inf_diff(&self, b: &Self) -> Self::T;

    /// Index of the first element of largest magnitude
    fn argmax_abs(&self) -> Option<usize>;

    /// Minimum value in vector
    fn minimum(&self) -> Self::T;

    /// Maximum value in vector
    fn maximum(&self) -> Self::T;

    /// Checks if all elements are finite, i.e. no Infs or NaNs
    fn is_finite(&self) -> bool;

    /// BLAS-like shift and scale in place.  Produces `self = a*x+b*self`
    fn axpby(&mut self, a: Self::T, x: &Self, b: Self::T) -> &mut Self;
}

/// Matrix operations for matrices of [`FloatT`](crate::algebra::FloatT)
pub trait MatrixMath {
    type T;

    /// Frobenius norm
    fn norm_fro(&self) -> Self::T;

    /// Largest absolute elementwise difference from `B`
    fn norm_inf_diff(&self, B: &Self) -> Self::T;

    /// Scales a matrix in place
    fn scale(&mut self, c: Self::T);

    /// Right multiply by diagonal matrix `diag(r)`
    fn rscale(&mut self, r: &[Self::T]);

    /// Checks if all elements are finite, i.e. no Infs or NaNs
    fn is_finite(&self) -> bool;
}
