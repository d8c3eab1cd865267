#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use eigbench::{bench::*, io::*};
    use std::io::{Read, Seek, SeekFrom};

    let settings = BenchSettingsBuilder::<f64>::default()
        .seed(Some(77))
        .mode(SolverMode::Lapack)
        .verbose(false)
        .build()
        .unwrap();

    // write the settings to a file
    let mut file = tempfile::tempfile().unwrap();
    settings.write_to_file(&mut file).unwrap();

    // read them back and run with them
    file.seek(SeekFrom::Start(0)).unwrap();
    let settings2 = BenchSettings::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(settings2.seed, Some(77));
    assert_eq!(settings2.mode, SolverMode::Lapack);

    let mut out = PrintTarget::default();
    out.print_to_sink();
    let mut bench = Comparison::new(settings2).unwrap();
    let report = bench.execute(5, &mut FixedAnswer(true), &mut out).unwrap();

    // write the report and read it back
    let mut file = tempfile::tempfile().unwrap();
    report.write_to_file(&mut file).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut json = String::new();
    file.read_to_string(&mut json).unwrap();
    let report2: ComparisonReport<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(report, report2);
}
