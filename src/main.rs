//! eigbench CLI
//!
//! Compares LAPACK `?geev` against the native eigensolver on a random
//! matrix and writes the report to the console and to a results file.

use clap::error::ErrorKind;
use clap::Parser;
use eigbench::bench::*;
use eigbench::io::{ConfigurablePrintTarget, MultiSink, PrintTarget};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "eigbench")]
#[command(version = eigbench::version(), about = "Eigen-decomposition benchmark: LAPACK geev against a native solver")]
struct Cli {
    /// Native solver configuration: 0 = without LAPACK, 1 = with LAPACK
    #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
    mode: u8,

    /// Matrix size.  Asked for on stdin if not given
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Seed for the random matrix
    #[arg(long)]
    seed: Option<u64>,

    /// Condition number above which regeneration is offered
    #[arg(long)]
    threshold: Option<f64>,

    /// Results file, overwritten on each run
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Read settings from a JSON file.  Other options override it
    #[cfg(feature = "serde")]
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Also write the comparison report as JSON
    #[cfg(feature = "serde")]
    #[arg(long, value_name = "PATH")]
    json: Option<String>,

    /// Answer yes to every regeneration question
    #[arg(short, long, conflicts_with = "no")]
    yes: bool,

    /// Answer no to every regeneration question
    #[arg(long)]
    no: bool,

    /// No console output, questions included.  The results file is still written
    #[arg(short, long)]
    quiet: bool,

    /// Print the timing breakdown of each path
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = build_settings(&cli)?;

    let mut stdin_prompt = StdinPrompt::new(cli.quiet);

    let n = match cli.size {
        Some(n) => n,
        None => read_size(&stdin_prompt)?,
    };
    if n == 0 {
        return Err("Matrix size must be a positive integer".into());
    }
    check_matrix_size(n)?;

    let mut out = MultiSink::new();
    if !cli.quiet {
        out.push(PrintTarget::default());
    }
    let mut file_target = PrintTarget::default();
    file_target.print_to_file(File::create(&settings.results_path)?);
    out.push(file_target);

    let mut fixed_prompt = FixedAnswer(cli.yes);
    let mut prompt: &mut dyn Prompt = if cli.yes || cli.no {
        &mut fixed_prompt
    } else {
        &mut stdin_prompt
    };

    let mut bench = Comparison::new(settings)?;
    let prepared = bench.prepare(n, &mut prompt, &mut out)?;
    let report = bench.run(&prepared, &mut out)?;

    #[cfg(feature = "serde")]
    if let Some(path) = &cli.json {
        report.write_to_file(&mut File::create(path)?)?;
    }
    #[cfg(not(feature = "serde"))]
    let _ = report;

    Ok(())
}

fn build_settings(cli: &Cli) -> Result<BenchSettings<f64>, Box<dyn std::error::Error>> {
    #[cfg(feature = "serde")]
    let mut settings = match &cli.config {
        Some(path) => BenchSettings::<f64>::read_from_file(&mut File::open(path)?)?,
        None => quiet_defaults(),
    };
    #[cfg(not(feature = "serde"))]
    let mut settings = quiet_defaults();

    settings.mode = SolverMode::try_from(cli.mode)?;
    settings.verbose |= cli.verbose;
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(threshold) = cli.threshold {
        settings.condition_threshold = threshold;
    }
    if let Some(output) = &cli.output {
        settings.results_path = output.clone();
    }
    settings.validate()?;
    Ok(settings)
}

// timing trees only on request
fn quiet_defaults() -> BenchSettings<f64> {
    BenchSettings {
        verbose: false,
        ..BenchSettings::default()
    }
}

fn read_size(prompt: &StdinPrompt) -> Result<usize, Box<dyn std::error::Error>> {
    let line = prompt.read_line("Enter the size of the matrix: ")?;
    line.trim()
        .parse::<usize>()
        .map_err(|_| format!("Invalid matrix size \"{}\"", line.trim()).into())
}
