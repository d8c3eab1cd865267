#![allow(non_snake_case)]
use super::generate::MatrixGenerator;
use super::prompt::Prompt;
use super::report::{ComparisonReport, MethodReport};
use super::settings::{BenchSettings, SettingsError};
use crate::algebra::*;
use crate::eigen::*;
use crate::io::ReportSink;
use crate::timers::*;
use std::io;
use thiserror::Error;

/// Error type returned by a comparison run.  Every error ends the run.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Invalid settings
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// A kernel rejected the matrix or failed to converge
    #[error("Error in {path} eigenvalue decomposition: {source}")]
    Decomposition {
        path: &'static str,
        source: DecompositionError,
    },
    /// The decomposition could not be checked
    #[error("Error checking {path} eigenvalue decomposition: {source}")]
    Validation {
        path: &'static str,
        source: ValidationError,
    },
    /// An `n x n` matrix can not be stored or passed to LAPACK
    #[error("Matrix size {0} is too large")]
    MatrixSize(usize),
    /// The condition number could not be computed
    #[error("Condition number estimate failed: {0}")]
    Condition(#[from] DenseFactorizationError),
    /// Writing the report or reading an answer failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Checks that an `n x n` matrix can be stored and passed to LAPACK.
pub fn check_matrix_size(n: usize) -> Result<(), BenchError> {
    match n.checked_mul(n) {
        Some(_) if blas_dim(n).is_ok() => Ok(()),
        _ => Err(BenchError::MatrixSize(n)),
    }
}

/// A matrix that has passed the conditioning stage of a run.
#[derive(Debug, Clone)]
pub struct PreparedMatrix<T> {
    pub matrix: Matrix<T>,
    pub condition_number: T,
    /// number of times the matrix was redrawn
    pub regenerations: u32,
}

// one decomposition path, as seen by the report
struct PathResult<T> {
    decomp: EigenDecomposition<T>,
    report: MethodReport<T>,
}

/// Comparison of two eigen-decomposition kernels on the same matrix.
///
/// Path A is LAPACK `?geev` and path B the native solver unless other
/// kernels are supplied with [`with_kernels`](Self::with_kernels).
/// A run has two stages.  [`prepare`](Self::prepare) draws a random matrix
/// and lets the operator redraw it while it is badly conditioned, and
/// [`run`](Self::run) times, validates and compares both paths.
pub struct Comparison<T: FloatT> {
    pub settings: BenchSettings<T>,
    path_a: Box<dyn GeevKernel<T>>,
    path_b: Box<dyn GeevKernel<T>>,
    generator: MatrixGenerator,
    estimator: ConditionEstimator<T>,
    timers: Timers,
}

impl<T> Comparison<T>
where
    T: FloatT,
{
    pub fn new(settings: BenchSettings<T>) -> Result<Self, BenchError> {
        let path_a = Box::new(LapackGeev::<T>::new());
        let path_b = Box::new(NativeGeev::<T>::new(settings.mode.hessenberg_method()));
        Self::with_kernels(settings, path_a, path_b)
    }

    pub fn with_kernels(
        settings: BenchSettings<T>,
        path_a: Box<dyn GeevKernel<T>>,
        path_b: Box<dyn GeevKernel<T>>,
    ) -> Result<Self, BenchError> {
        settings.validate()?;
        Ok(Self {
            generator: MatrixGenerator::new(settings.seed),
            estimator: ConditionEstimator::new(0),
            timers: Timers::default(),
            settings,
            path_a,
            path_b,
        })
    }

    /// Timers of the most recent [`run`](Self::run)
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Draws a random `n x n` matrix and checks its condition number.
    ///
    /// While the condition number is above the threshold the operator is
    /// asked through `prompt` whether to draw again.  This stops when a
    /// matrix meets the threshold, when the operator declines, or after
    /// `max_regenerations` redraws.  The last matrix drawn is returned.
    pub fn prepare(
        &mut self,
        n: usize,
        prompt: &mut impl Prompt,
        sink: &mut impl ReportSink,
    ) -> Result<PreparedMatrix<T>, BenchError> {
        check_matrix_size(n)?;
        let threshold = self.settings.condition_threshold;

        let mut A = self.draw(n)?;
        let mut kappa = self.estimator.estimate(&A)?;
        sink.emit_line(&format!("Condition number of the matrix: {kappa}"))?;

        let mut regenerations = 0;
        let mut question = "Condition number is poor. Regenerate matrix for better condition number? (y/n): ";

        while kappa > threshold && regenerations < self.settings.max_regenerations {
            if !prompt.confirm(question)? {
                break;
            }
            A = self.draw(n)?;
            kappa = self.estimator.estimate(&A)?;
            regenerations += 1;
            sink.emit_line(&format!("Condition number of the new matrix: {kappa}"))?;
            question = "Regenerate again? (y/n): ";
        }

        Ok(PreparedMatrix {
            matrix: A,
            condition_number: kappa,
            regenerations,
        })
    }

    fn draw(&mut self, n: usize) -> Result<Matrix<T>, BenchError> {
        self.generator
            .generate(n)
            .map_err(|_| BenchError::MatrixSize(n))
    }

    /// Accepts a caller supplied matrix without any regeneration.
    pub fn accept(
        &mut self,
        A: Matrix<T>,
        sink: &mut impl ReportSink,
    ) -> Result<PreparedMatrix<T>, BenchError> {
        let kappa = self.estimator.estimate(&A)?;
        sink.emit_line(&format!("Condition number of the matrix: {kappa}"))?;
        Ok(PreparedMatrix {
            matrix: A,
            condition_number: kappa,
            regenerations: 0,
        })
    }

    /// Decomposes the prepared matrix with both paths, checks and
    /// compares the results and writes the summary to `sink`.
    pub fn run(
        &mut self,
        prepared: &PreparedMatrix<T>,
        sink: &mut impl ReportSink,
    ) -> Result<ComparisonReport<T>, BenchError> {
        let A = &prepared.matrix;
        self.timers = Timers::default();
        let timers = &mut self.timers;

        let result_a;
        timeit! {timers => "path A"; {
            result_a = run_path(self.path_a.as_mut(), "path A", A, timers, sink);
        }}
        let a = result_a?;

        let result_b;
        timeit! {timers => "path B"; {
            result_b = run_path(self.path_b.as_mut(), "path B", A, timers, sink);
        }}
        let b = result_b?;

        let ca = a.decomp.canonicalize();
        let cb = b.decomp.canonicalize();
        let diffs = (ca.max_eigenvalue_diff(&cb), ca.max_eigenvector_diff(&cb));

        let report = ComparisonReport::new(
            self.settings.mode,
            A.nrows(),
            prepared.condition_number,
            prepared.regenerations,
            a.report,
            b.report,
            diffs,
        );
        report.write_summary(self.settings.compare_tolerance, sink)?;

        if self.settings.verbose {
            sink.emit_line("")?;
            sink.emit_line("Timing:")?;
            self.timers.print(sink)?;
        }

        Ok(report)
    }

    /// [`prepare`](Self::prepare) followed by [`run`](Self::run).
    pub fn execute(
        &mut self,
        n: usize,
        prompt: &mut impl Prompt,
        sink: &mut impl ReportSink,
    ) -> Result<ComparisonReport<T>, BenchError> {
        let prepared = self.prepare(n, prompt, sink)?;
        self.run(&prepared, sink)
    }
}

// decompose, report the time, validate, report the error.
// `key` is the name of the running timer
fn run_path<T: FloatT>(
    kernel: &mut dyn GeevKernel<T>,
    key: &'static str,
    A: &Matrix<T>,
    timers: &mut Timers,
    sink: &mut impl ReportSink,
) -> Result<PathResult<T>, BenchError> {
    let name = kernel.name();

    let result;
    timeit! {timers => "decompose"; {
        result = eigen_decomposition(kernel, A);
    }}
    let decomp = result.map_err(|source| BenchError::Decomposition { path: name, source })?;

    let duration = timers.elapsed(&[key, "decompose"]).unwrap_or_default();
    sink.emit_line(&format!(
        "{} Duration: {} seconds",
        name,
        duration.as_secs_f64()
    ))?;

    let result;
    timeit! {timers => "validate"; {
        result = check_decomposition(A, &decomp);
    }}
    let relative_error = result.map_err(|source| BenchError::Validation { path: name, source })?;
    report_decomposition(name, relative_error, sink)?;

    Ok(PathResult {
        decomp,
        report: MethodReport {
            name: name.to_string(),
            duration,
            relative_error,
        },
    })
}
