//! __eigbench__ compares two ways of computing the eigen-decomposition
//! of a dense, square, real matrix:
//!
//! * __path A__ : LAPACK `?geev`, called through a typed adapter.
//! * __path B__ : an in-process solver that reduces the matrix to
//!   Hessenberg form and then to real Schur form by Francis QR iteration.
//!   The Hessenberg reduction is either computed in Rust or delegated to
//!   LAPACK `?gehrd`/`?orghr`.
//!
//! Both paths are timed and checked by rebuilding the matrix from its
//! eigenvalues and eigenvectors.  The results are then compared and
//! reported to the console and to a results file.
//!
//! The [`eigen`] module can also be used on its own:
//!
//! ```
//! use eigbench::algebra::Matrix;
//! use eigbench::eigen::*;
//!
//! let A = Matrix::from(&[[2., 1.], [1., 2.]]);
//! let decomp = eigen_decomposition(&mut LapackGeev::new(), &A).unwrap();
//! assert!(check_decomposition(&A, &decomp).unwrap() < 1e-12);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the crate, as reported by the command line tool
pub fn version() -> &'static str {
    VERSION
}

pub mod algebra;
pub mod bench;
pub mod eigen;
pub mod io;
pub mod timers;
