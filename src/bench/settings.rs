use crate::algebra::*;
use crate::eigen::HessenbergMethod;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::{
    fs::File,
    io,
    io::{Read, Write},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadField(&'static str),
}

/// Configuration of the native eigensolver that is compared
/// against LAPACK ?geev
#[derive(PartialEq, Eq, Copy, Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverMode {
    /// everything computed in Rust
    #[default]
    Native,
    /// Hessenberg reduction delegated to LAPACK
    Lapack,
}

impl SolverMode {
    /// Hessenberg reduction used by the native solver in this mode
    pub fn hessenberg_method(&self) -> HessenbergMethod {
        match self {
            SolverMode::Native => HessenbergMethod::Native,
            SolverMode::Lapack => HessenbergMethod::Lapack,
        }
    }
}

impl TryFrom<u8> for SolverMode {
    type Error = SettingsError;
    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(SolverMode::Native),
            1 => Ok(SolverMode::Lapack),
            _ => Err(SettingsError::BadField("mode")),
        }
    }
}

impl std::fmt::Display for SolverMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverMode::Native => write!(f, "Native solver without LAPACK"),
            SolverMode::Lapack => write!(f, "Native solver with LAPACK"),
        }
    }
}

/// Settings for an eigen-decomposition comparison run

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BenchSettings<T: FloatT> {
    ///condition number above which the operator is offered a new matrix
    #[builder(default = "(1e6).as_T()")]
    pub condition_threshold: T,

    ///maximum number of matrix regenerations
    #[builder(default = "100")]
    pub max_regenerations: u32,

    ///random seed for matrix generation.  `None` draws from the OS.
    #[builder(default = "None")]
    pub seed: Option<u64>,

    ///native solver configuration
    #[builder(default = "SolverMode::Native")]
    pub mode: SolverMode,

    ///report file, overwritten on each run
    #[builder(default = "String::from(\"results.txt\")")]
    pub results_path: String,

    ///verbose printing
    #[builder(default = "true")]
    pub verbose: bool,

    ///largest cross-method difference for the two paths to agree
    #[builder(default = "(1e-8).as_T()")]
    pub compare_tolerance: T,
}

impl<T> Default for BenchSettings<T>
where
    T: FloatT,
{
    fn default() -> BenchSettings<T> {
        BenchSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> BenchSettings<T>
where
    T: FloatT,
{
    /// Checks that every field holds a usable value
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_condition_threshold(self.condition_threshold)?;
        validate_results_path(&self.results_path)?;
        validate_compare_tolerance(self.compare_tolerance)?;
        Ok(())
    }
}

impl From<SettingsError> for BenchSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        BenchSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> BenchSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(threshold) = self.condition_threshold {
            validate_condition_threshold(threshold)?;
        }
        if let Some(ref path) = self.results_path {
            validate_results_path(path)?;
        }
        if let Some(tol) = self.compare_tolerance {
            validate_compare_tolerance(tol)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_condition_threshold<T: FloatT>(threshold: T) -> Result<(), SettingsError> {
    // NaN fails this comparison too
    if threshold > T::one() {
        Ok(())
    } else {
        Err(SettingsError::BadField("condition_threshold"))
    }
}

fn validate_results_path(path: &str) -> Result<(), SettingsError> {
    if path.trim().is_empty() {
        Err(SettingsError::BadField("results_path"))
    } else {
        Ok(())
    }
}

fn validate_compare_tolerance<T: FloatT>(tol: T) -> Result<(), SettingsError> {
    if tol >= T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadField("compare_tolerance"))
    }
}

// ---------------------------------------------------------
// JSON file in/out
// ---------------------------------------------------------

#[cfg(feature = "serde")]
impl<T> BenchSettings<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Writes the settings to `file` as JSON
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let mut settings = self.clone();

        // sanitize settings to remove values that
        // can't be serialized, i.e. infs
        sanitize_settings(&mut settings);

        let json = serde_json::to_string_pretty(&settings)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Reads and validates settings written by [`write_to_file`](Self::write_to_file).
    /// Missing fields take their default values.
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let mut settings: BenchSettings<T> = serde_json::from_str(&buffer)?;

        // restore sanitized settings to their (likely) original values
        desanitize_settings(&mut settings);

        settings
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }
}

#[cfg(feature = "serde")]
fn sanitize_settings<T: FloatT>(settings: &mut BenchSettings<T>) {
    if settings.condition_threshold == T::infinity() {
        settings.condition_threshold = T::max_value();
    }
}

#[cfg(feature = "serde")]
fn desanitize_settings<T: FloatT>(settings: &mut BenchSettings<T>) {
    if settings.condition_threshold == T::max_value() {
        settings.condition_threshold = T::infinity();
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    BenchSettingsBuilder::<f64>::default().build().unwrap();

    // fail on a threshold that every matrix exceeds
    assert!(BenchSettingsBuilder::<f64>::default()
        .condition_threshold(0.5)
        .build()
        .is_err());

    // fail on an empty report path
    assert!(BenchSettingsBuilder::<f64>::default()
        .results_path("".to_string())
        .build()
        .is_err());

    // fail on a negative tolerance
    assert!(BenchSettingsBuilder::<f32>::default()
        .compare_tolerance(-1.0)
        .build()
        .is_err());

    // direct validation of a modified struct
    let mut settings = BenchSettings::<f64>::default();
    assert!(settings.validate().is_ok());
    settings.condition_threshold = f64::NAN;
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadField("condition_threshold"))
    );
}

#[test]
fn test_settings_defaults() {
    let settings = BenchSettings::<f64>::default();
    assert_eq!(settings.condition_threshold, 1e6);
    assert_eq!(settings.max_regenerations, 100);
    assert_eq!(settings.seed, None);
    assert_eq!(settings.mode, SolverMode::Native);
    assert_eq!(settings.results_path, "results.txt");
    assert!(settings.verbose);
    assert_eq!(settings.compare_tolerance, 1e-8);
}

#[test]
fn test_solver_mode() {
    assert_eq!(SolverMode::try_from(0), Ok(SolverMode::Native));
    assert_eq!(SolverMode::try_from(1), Ok(SolverMode::Lapack));
    assert_eq!(SolverMode::try_from(2), Err(SettingsError::BadField("mode")));
    assert_eq!(SolverMode::Lapack.to_string(), "Native solver with LAPACK");
    assert_eq!(
        SolverMode::Native.hessenberg_method(),
        HessenbergMethod::Native
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_settings_json_io() {
    use std::io::{Seek, SeekFrom};

    let settings = BenchSettingsBuilder::<f64>::default()
        .condition_threshold(f64::INFINITY)
        .seed(Some(42))
        .mode(SolverMode::Lapack)
        .build()
        .unwrap();

    let mut file = tempfile::tempfile().unwrap();
    settings.write_to_file(&mut file).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    let loaded = BenchSettings::<f64>::read_from_file(&mut file).unwrap();

    assert_eq!(loaded.condition_threshold, f64::INFINITY);
    assert_eq!(loaded.seed, Some(42));
    assert_eq!(loaded.mode, SolverMode::Lapack);
    assert_eq!(loaded.results_path, settings.results_path);

    // partial input falls back to defaults, bad values are rejected
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"{\"results_path\": \"\"}").unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    assert!(BenchSettings::<f64>::read_from_file(&mut file).is_err());
}
