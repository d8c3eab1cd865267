//! Eigen-decomposition of general real square matrices.
//!
//! Decompositions are computed by a [`GeevKernel`], which follows the LAPACK
//! `?geev` calling convention on flat column major buffers.  Two kernels
//! are provided:
//!
//! * [`LapackGeev`] calls LAPACK `?geev` directly.
//! * [`NativeGeev`] runs an in-process Hessenberg / Francis QR solver,
//!   with the Hessenberg reduction optionally delegated to LAPACK.
//!
//! [`eigen_decomposition`] wraps either kernel behind a typed interface.
//! Results are checked with [`check_decomposition`], which rebuilds the
//! matrix from its eigenvalues and eigenvectors, and the sensitivity of
//! the input is measured by [`condition_number`].

mod condition;
mod decomposition;
mod kernel;
mod lapack_geev;
mod native;
mod validate;

pub use condition::*;
pub use decomposition::*;
pub use kernel::GeevKernel;
pub use lapack_geev::*;
pub use native::*;
pub use validate::*;
