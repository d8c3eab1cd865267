mod core;
mod matrix_math;

mod blas;
pub use self::blas::*;
mod blaslike_traits;
pub use blaslike_traits::*;
mod svd;
pub use svd::*;
mod lu;
pub use lu::*;

mod gemm;
