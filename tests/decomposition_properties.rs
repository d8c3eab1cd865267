#![allow(non_snake_case)]

use eigbench::{algebra::*, bench::MatrixGenerator, eigen::*};

fn kernels() -> Vec<Box<dyn GeevKernel<f64>>> {
    vec![
        Box::new(LapackGeev::<f64>::new()),
        Box::new(NativeGeev::<f64>::new(HessenbergMethod::Native)),
        Box::new(NativeGeev::<f64>::new(HessenbergMethod::Lapack)),
    ]
}

#[test]
fn test_reconstruction_well_conditioned() {
    // symmetric matrices have a real spectrum and an orthogonal eigenbasis
    let mut gen = MatrixGenerator::new(Some(2024));
    for n in [1, 2, 7, 30] {
        let B: Matrix<f64> = gen.generate(n).unwrap();
        let mut A = Matrix::zeros((n, n));
        for i in 0..n {
            for j in 0..n {
                A[(i, j)] = B[(i, j)] + B[(j, i)];
            }
        }

        for mut kernel in kernels() {
            let decomp = eigen_decomposition(kernel.as_mut(), &A).unwrap();
            assert!(decomp.is_real(), "{} n = {n}", kernel.name());
            let err = check_decomposition(&A, &decomp).unwrap();
            assert!(err < 1e-8, "{} n = {n}: {err:e}", kernel.name());
        }
    }
}

#[test]
fn test_reconstruction_random() {
    // general random matrices, usually with complex pairs
    let mut gen = MatrixGenerator::new(Some(99));
    for n in [3, 10, 40] {
        let A: Matrix<f64> = gen.generate(n).unwrap();
        for mut kernel in kernels() {
            let decomp = eigen_decomposition(kernel.as_mut(), &A).unwrap();
            let err = check_decomposition(&A, &decomp).unwrap();
            assert!(err < 1e-8, "{} n = {n}: {err:e}", kernel.name());
        }
    }
}

#[test]
fn test_input_unmodified() {
    let mut gen = MatrixGenerator::new(Some(5));
    let A: Matrix<f64> = gen.generate(12).unwrap();
    let copy = A.clone();
    for mut kernel in kernels() {
        eigen_decomposition(kernel.as_mut(), &A).unwrap();
        assert_eq!(A, copy);
    }
}

#[test]
fn test_kernels_agree() {
    let mut gen = MatrixGenerator::new(Some(17));
    let A: Matrix<f64> = gen.generate(20).unwrap();

    let reference = eigen_decomposition(&mut LapackGeev::new(), &A)
        .unwrap()
        .canonicalize();

    for method in [HessenbergMethod::Native, HessenbergMethod::Lapack] {
        let other = eigen_decomposition(&mut NativeGeev::new(method), &A)
            .unwrap()
            .canonicalize();
        assert!(reference.max_eigenvalue_diff(&other) < 1e-10);
        assert!(reference.max_eigenvector_diff(&other) < 1e-8);
    }
}

#[test]
fn test_diagonal_matrix() {
    let A = Matrix::from_diagonal(&[2.0, 3.0, 5.0]);
    for mut kernel in kernels() {
        let decomp = eigen_decomposition(kernel.as_mut(), &A)
            .unwrap()
            .canonicalize();
        assert!(decomp.wr.norm_inf_diff(&[2.0, 3.0, 5.0]) < 1e-14);
        assert_eq!(decomp.wi, vec![0.0; 3]);
        assert!(decomp.V.norm_inf_diff(&Matrix::identity(3)) < 1e-15);
        assert!(check_decomposition(&A, &decomp).unwrap() < 1e-14);
    }
}

#[test]
fn test_zero_matrix() {
    for n in [1, 4, 9] {
        let A = Matrix::<f64>::zeros((n, n));
        for mut kernel in kernels() {
            let decomp = eigen_decomposition(kernel.as_mut(), &A).unwrap();
            assert_eq!(decomp.wr, vec![0.0; n], "{}", kernel.name());
            assert_eq!(decomp.wi, vec![0.0; n], "{}", kernel.name());
            assert!(decomp.V.is_finite());
            assert_eq!(check_decomposition(&A, &decomp), Ok(0.0));
        }
    }
}

#[test]
fn test_badly_scaled_matrices() {
    // entries whose squares overflow or underflow
    let mut gen = MatrixGenerator::new(Some(6));
    let B: Matrix<f64> = gen.generate(6).unwrap();
    for c in [1e200, 1e160, 1e-300] {
        let mut A = B.clone();
        A.data_mut().scale(c);
        for mut kernel in kernels() {
            let decomp = eigen_decomposition(kernel.as_mut(), &A).unwrap();
            let err = check_decomposition(&A, &decomp).unwrap();
            assert!(err < 1e-10, "{} c = {c:e}: {err:e}", kernel.name());
        }
    }
}

#[test]
fn test_condition_number_properties() {
    assert_eq!(condition_number(&Matrix::<f64>::identity(6)), Ok(1.0));

    let mut A = Matrix::<f64>::identity(4);
    A[(2, 2)] = 0.0;
    assert_eq!(condition_number(&A), Ok(f64::INFINITY));

    // scale invariance
    let mut gen = MatrixGenerator::new(Some(8));
    let B: Matrix<f64> = gen.generate(5).unwrap();
    let mut C = B.clone();
    C.data_mut().scale(3.0);
    let (kb, kc) = (condition_number(&B).unwrap(), condition_number(&C).unwrap());
    assert!((kb - kc).abs() <= 1e-10 * kb);
}

#[test]
fn test_nonzero_info_gives_no_result() {
    struct NoConvergence;
    impl GeevKernel<f64> for NoConvergence {
        fn name(&self) -> &'static str {
            "stalled"
        }
        fn geev(&mut self, n: usize, _a: &mut [f64], _wr: &mut [f64], _wi: &mut [f64], _v: &mut [f64]) -> i32 {
            n as i32
        }
    }

    let A = Matrix::<f64>::identity(3);
    assert_eq!(
        eigen_decomposition(&mut NoConvergence, &A),
        Err(DecompositionError::Kernel {
            kernel: "stalled",
            info: 3
        })
    );
}
