use super::SolverMode;
use crate::algebra::*;
use crate::io::ReportSink;
use std::io;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::{fs::File, io::Write};

/// Timing and accuracy of a single decomposition path
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct MethodReport<T = f64> {
    /// kernel name
    pub name: String,
    /// wall clock time of the decomposition alone
    pub duration: Duration,
    /// relative reconstruction error
    pub relative_error: T,
}

/// Outcome of a comparison run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct ComparisonReport<T = f64> {
    pub mode: SolverMode,
    pub size: usize,
    /// condition number of the accepted matrix
    pub condition_number: T,
    /// number of times the matrix was regenerated before acceptance
    pub regenerations: u32,
    pub path_a: MethodReport<T>,
    pub path_b: MethodReport<T>,
    /// max abs difference of canonicalized eigenvalues
    pub max_diff_eigenvalues: T,
    /// max abs difference of canonicalized eigenvectors
    pub max_diff_eigenvectors: T,
    /// name of the faster path.  Ties go to path A.
    pub faster: String,
    /// time difference between the two paths
    pub speedup: Duration,
}

impl<T> ComparisonReport<T>
where
    T: FloatT,
{
    pub(crate) fn new(
        mode: SolverMode,
        size: usize,
        condition_number: T,
        regenerations: u32,
        path_a: MethodReport<T>,
        path_b: MethodReport<T>,
        (max_diff_eigenvalues, max_diff_eigenvectors): (T, T),
    ) -> Self {
        let (faster, speedup) = if path_a.duration <= path_b.duration {
            (path_a.name.clone(), path_b.duration - path_a.duration)
        } else {
            (path_b.name.clone(), path_a.duration - path_b.duration)
        };
        Self {
            mode,
            size,
            condition_number,
            regenerations,
            path_a,
            path_b,
            max_diff_eigenvalues,
            max_diff_eigenvectors,
            faster,
            speedup,
        }
    }

    /// True if both cross-method differences are within `tol`.
    /// A NaN difference never agrees.
    pub fn agrees(&self, tol: T) -> bool {
        self.max_diff_eigenvalues <= tol && self.max_diff_eigenvectors <= tol
    }

    /// Writes the end of run summary, one line at a time
    pub fn write_summary(&self, tol: T, sink: &mut impl ReportSink) -> io::Result<()> {
        let (a, b) = (&self.path_a, &self.path_b);

        sink.emit_line("")?;
        sink.emit_line("Summary:")?;
        sink.emit_line(&format!("Chosen method: {}", self.mode))?;
        sink.emit_line(&format!("Matrix size: {}", self.size))?;
        for p in [a, b] {
            sink.emit_line(&format!(
                "{} Duration: {} seconds",
                p.name,
                p.duration.as_secs_f64()
            ))?;
        }
        sink.emit_line(&format!(
            "Maximum difference between {} and {} eigenvalues: {:e}",
            a.name, b.name, self.max_diff_eigenvalues
        ))?;
        sink.emit_line(&format!(
            "Maximum difference between {} and {} eigenvectors: {:e}",
            a.name, b.name, self.max_diff_eigenvectors
        ))?;
        for p in [a, b] {
            sink.emit_line(&format!(
                "{} relative reconstruction error: {:e}",
                p.name, p.relative_error
            ))?;
        }
        sink.emit_line(&format!(
            "{} was faster by {} seconds",
            self.faster,
            self.speedup.as_secs_f64()
        ))?;
        if self.agrees(tol) {
            sink.emit_line(&format!("Decompositions agree to within {tol:e}"))
        } else {
            sink.emit_line(&format!("Decompositions differ by more than {tol:e}"))
        }
    }
}

#[cfg(feature = "serde")]
impl<T> ComparisonReport<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Writes the report to `file` as JSON
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string_pretty(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::{ConfigurablePrintTarget, PrintTarget};

    fn sample_report(b_secs: u64) -> ComparisonReport<f64> {
        let a = MethodReport {
            name: "LAPACK geev".to_string(),
            duration: Duration::from_secs(2),
            relative_error: 1e-15,
        };
        let b = MethodReport {
            name: "Native solver".to_string(),
            duration: Duration::from_secs(b_secs),
            relative_error: 2e-15,
        };
        ComparisonReport::new(SolverMode::Lapack, 4, 10.0, 1, a, b, (1e-14, 0.5))
    }

    #[test]
    fn test_faster_path() {
        let r = sample_report(5);
        assert_eq!(r.faster, "LAPACK geev");
        assert_eq!(r.speedup, Duration::from_secs(3));

        let r = sample_report(1);
        assert_eq!(r.faster, "Native solver");
        assert_eq!(r.speedup, Duration::from_secs(1));

        // ties go to path A
        let r = sample_report(2);
        assert_eq!(r.faster, "LAPACK geev");
        assert_eq!(r.speedup, Duration::ZERO);
    }

    #[test]
    fn test_agrees() {
        let mut r = sample_report(5);
        assert!(!r.agrees(1e-8));
        assert!(r.agrees(1.0));
        r.max_diff_eigenvectors = f64::NAN;
        assert!(!r.agrees(1.0));
    }

    #[test]
    fn test_write_summary() {
        let r = sample_report(5);
        let mut out = PrintTarget::default();
        out.print_to_buffer();
        r.write_summary(1e-8, &mut out).unwrap();

        let text = out.get_print_buffer().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Summary:");
        assert_eq!(lines[2], "Chosen method: Native solver with LAPACK");
        assert_eq!(lines[3], "Matrix size: 4");
        assert_eq!(lines[4], "LAPACK geev Duration: 2 seconds");
        assert_eq!(lines[5], "Native solver Duration: 5 seconds");
        assert_eq!(
            lines[6],
            "Maximum difference between LAPACK geev and Native solver eigenvalues: 1e-14"
        );
        assert_eq!(
            lines[7],
            "Maximum difference between LAPACK geev and Native solver eigenvectors: 5e-1"
        );
        assert_eq!(lines[8], "LAPACK geev relative reconstruction error: 1e-15");
        assert_eq!(lines[9], "Native solver relative reconstruction error: 2e-15");
        assert_eq!(lines[10], "LAPACK geev was faster by 3 seconds");
        assert_eq!(lines[11], "Decompositions differ by more than 1e-8");
        assert_eq!(lines.len(), 12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_write_json() {
        use std::io::{Read, Seek, SeekFrom};

        let r = sample_report(5);
        let mut file = tempfile::tempfile().unwrap();
        r.write_to_file(&mut file).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let mut buffer = String::new();
        file.read_to_string(&mut buffer).unwrap();
        let loaded: ComparisonReport<f64> = serde_json::from_str(&buffer).unwrap();
        assert_eq!(loaded, r);
    }
}
