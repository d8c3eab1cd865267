#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(clippy::too_many_arguments)]

// standard imports via blas-lapack-rs crates.  The backing library
// is selected by the lapack-* cargo features.
extern crate blas_src;
extern crate lapack_src;
use lapack::*;
use blas::*;


pub trait BlasFloatT:
    private::BlasFloatSealed
    + XgeevScalar
    + XgehrdScalar
    + XorghrScalar
    + XgesddScalar
    + XgesvScalar
    + XgemmScalar
{}

impl BlasFloatT for f32 {}
impl BlasFloatT for f64 {}

mod private {
  pub trait BlasFloatSealed {}
  impl BlasFloatSealed for f32 {}
  impl BlasFloatSealed for f64 {}
}


// --------------------------------------
// ?geev : general (nonsymmetric) eigen decomposition
// --------------------------------------

pub trait XgeevScalar: Sized {
    fn xgeev(
        jobvl: u8, jobvr: u8, n: i32, a: &mut [Self], lda: i32, wr: &mut [Self], wi: &mut [Self],
        vl: &mut [Self], ldvl: i32, vr: &mut [Self], ldvr: i32,
        work: &mut [Self], lwork: i32, info: &mut i32,
    );
}

macro_rules! impl_blas_xgeev {
    ($T:ty, $XGEEV:path) => {
        impl XgeevScalar for $T {
            fn xgeev(
                jobvl: u8, jobvr: u8, n: i32, a: &mut [Self], lda: i32, wr: &mut [Self], wi: &mut [Self],
                vl: &mut [Self], ldvl: i32, vr: &mut [Self], ldvr: i32,
                work: &mut [Self], lwork: i32, info: &mut i32,
            ) {
                unsafe{
                    $XGEEV(
                        jobvl, jobvr, n, a, lda, wr, wi, vl, ldvl, vr, ldvr, work, lwork, info,
                    );
                }
            }
        }
    };
}

impl_blas_xgeev!(f32, sgeev);
impl_blas_xgeev!(f64, dgeev);


// --------------------------------------
// ?gehrd : reduction to upper Hessenberg form
// --------------------------------------

pub trait XgehrdScalar: Sized {
    fn xgehrd(
        n: i32, ilo: i32, ihi: i32, a: &mut [Self], lda: i32, tau: &mut [Self],
        work: &mut [Self], lwork: i32, info: &mut i32,
    );
}

macro_rules! impl_blas_xgehrd {
    ($T:ty, $XGEHRD:path) => {
        impl XgehrdScalar for $T {
            fn xgehrd(
                n: i32, ilo: i32, ihi: i32, a: &mut [Self], lda: i32, tau: &mut [Self],
                work: &mut [Self], lwork: i32, info: &mut i32,
            ) {
                unsafe{
                    $XGEHRD(n, ilo, ihi, a, lda, tau, work, lwork, info);
                }
            }
        }
    };
}

impl_blas_xgehrd!(f32, sgehrd);
impl_blas_xgehrd!(f64, dgehrd);


// --------------------------------------
// ?orghr : orthogonal factor of a ?gehrd reduction
// --------------------------------------

pub trait XorghrScalar: Sized {
    fn xorghr(
        n: i32, ilo: i32, ihi: i32, a: &mut [Self], lda: i32, tau: &[Self],
        work: &mut [Self], lwork: i32, info: &mut i32,
    );
}

macro_rules! impl_blas_xorghr {
    ($T:ty, $XORGHR:path) => {
        impl XorghrScalar for $T {
            fn xorghr(
                n: i32, ilo: i32, ihi: i32, a: &mut [Self], lda: i32, tau: &[Self],
                work: &mut [Self], lwork: i32, info: &mut i32,
            ) {
                unsafe{
                    $XORGHR(n, ilo, ihi, a, lda, tau, work, lwork, info);
                }
            }
        }
    };
}

impl_blas_xorghr!(f32, sorghr);
impl_blas_xorghr!(f64, dorghr);


// --------------------------------------
// ?gesdd : SVD (divide and conquer method)
// --------------------------------------

pub trait XgesddScalar: Sized {
    fn xgesdd(
        jobz: u8, m: i32, n: i32, a: &mut [Self], lda: i32,
        s: &mut [Self], u: &mut [Self], ldu: i32, vt: &mut [Self], ldvt: i32,
        work: &mut [Self], lwork: i32, iwork: &mut [i32], info: &mut i32
    );
}

macro_rules! impl_blas_xgesdd{
    ($T:ty, $XGESDD:path) => {
        impl XgesddScalar for $T {
            fn xgesdd(
                jobz: u8, m: i32, n: i32, a: &mut [Self], lda: i32,
                s: &mut [Self], u: &mut [Self], ldu: i32, vt: &mut [Self], ldvt: i32,
                work: &mut [Self], lwork: i32, iwork: &mut [i32], info: &mut i32
            ) {
                unsafe{
                    $XGESDD(
                        jobz, m, n, a, lda, s, u, ldu, vt, ldvt, work, lwork, iwork, info
                    );
                }
            }
        }
    };
}

impl_blas_xgesdd!(f32, sgesdd);
impl_blas_xgesdd!(f64, dgesdd);


// --------------------------------------
// ?gesv : LU factorization and solve
// --------------------------------------

pub trait XgesvScalar: Sized {
    fn xgesv(
        n: i32, nrhs: i32, a: &mut [Self], lda: i32, ipiv: &mut [i32],
        b: &mut [Self], ldb: i32, info: &mut i32
    );
}

macro_rules! impl_blas_xgesv{
    ($T:ty, $XGESV:path) => {
        impl XgesvScalar for $T {
            fn xgesv(
                n: i32, nrhs: i32, a: &mut [Self], lda: i32, ipiv: &mut [i32],
                b: &mut [Self], ldb: i32, info: &mut i32
            ) {
                unsafe{
                    $XGESV(n, nrhs, a, lda, ipiv, b, ldb, info);
                }
            }
        }
    };
}

impl_blas_xgesv!(f32, sgesv);
impl_blas_xgesv!(f64, dgesv);


// --------------------------------------
// ?gemm : matrix matrix multiply
// --------------------------------------

pub trait XgemmScalar: Sized {
    fn xgemm(
        transa: u8, transb: u8, m: i32, n: i32, k: i32, alpha: Self, a: &[Self],
        lda: i32, b: &[Self], ldb: i32, beta: Self, c: &mut [Self], ldc: i32
    );
}

macro_rules! impl_blas_gemm {
    ($T:ty, $XGEMM:path) => {
        impl XgemmScalar for $T {
            fn xgemm(
                transa: u8, transb: u8, m: i32, n: i32, k: i32, alpha: Self, a: &[Self],
                lda: i32, b: &[Self], ldb: i32, beta: Self, c: &mut [Self], ldc: i32
            ) {
                unsafe{
                    $XGEMM(
                        transa, transb, m, n, k, alpha, a,
                        lda, b, ldb, beta, c, ldc
                    );
                }
            }
        }
    };
}

impl_blas_gemm!(f32, sgemm);
impl_blas_gemm!(f64, dgemm);
