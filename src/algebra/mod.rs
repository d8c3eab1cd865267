//! Dense linear algebra used by the eigensolvers and validators.
//!
//! All matrices are dense and stored in column major format, which is the
//! layout expected by the BLAS and LAPACK routines that the factorization
//! engines in this module call through to.

#![allow(non_snake_case)]

mod adjoint;
mod dense;
mod error_types;
mod floats;
mod math_traits;
mod matrix_traits;
mod matrix_types;
mod vecmath;

pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_traits::*;
pub use matrix_types::*;
