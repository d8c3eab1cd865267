//! Benchmark comparing two eigen-decomposition paths.
//!
//! A [`Comparison`] draws a random matrix with a [`MatrixGenerator`],
//! lets the operator redraw it through a [`Prompt`] while it is badly
//! conditioned, and then times, validates and compares LAPACK `?geev`
//! against the native solver.  Every line of output goes to a
//! [`ReportSink`](crate::io::ReportSink), and the outcome is returned as a
//! [`ComparisonReport`].
//!
//! __Example usage__ :
//!
//! ```no_run
//! use eigbench::bench::*;
//! use eigbench::io::PrintTarget;
//!
//! let settings = BenchSettingsBuilder::<f64>::default()
//!     .mode(SolverMode::Lapack)
//!     .seed(Some(42))
//!     .build()
//!     .unwrap();
//!
//! let mut bench = Comparison::new(settings).unwrap();
//! let mut out = PrintTarget::default();
//! let report = bench.execute(100, &mut FixedAnswer(true), &mut out).unwrap();
//! println!("{} was faster", report.faster);
//! ```

mod driver;
mod generate;
mod prompt;
mod report;
mod settings;

pub use driver::*;
pub use generate::*;
pub use prompt::*;
pub use report::*;
pub use settings::*;
