//! Integration tests for pfile-classifier
//!
//! These tests run the full pipeline from an acquisition listing and E-files
//! on disk to label and metadata assignments.

use chrono::NaiveDate;
use pfile_classifier::acquisition::{Acquisition, AcquisitionFile, PairMatcher, PairPolicy};
use pfile_classifier::classify::{propagate, LabelTable, MeasurementLabel};
use pfile_classifier::efile::{EFileParser, FieldValue, SCAN_TIMESTAMP};
use pfile_classifier::pipeline::{Classifier, ClassifierOptions, DirectorySource, Outcome};
use std::fs;
use tempfile::tempdir;

const EFILE: &str = "\
exam_number = 4312
series_description = Ax BOLD fMRI task
slice_thickness = 3.5 mm
repetition_time = 2000 msec
echo_time = 30.0 msec
flip_angle = 77 deg.
field_of_view = 240 mm
date_of_scan = 01/15/123
time_of_scan = 09:30
slice = 1
gw_point1 = -120.0 -120.0 40.0
gw_point2 = 120.0 -120.0 40.0
gw_point3 = -120.0 120.0 40.0
";

fn pfile(name: &str) -> AcquisitionFile {
    AcquisitionFile::new(name).with_type("pfile")
}

fn acquisition(id: &str) -> Acquisition {
    Acquisition::new(
        id,
        vec![
            pfile("P05120.7.gz"),
            AcquisitionFile::new("P05120_physio.7").with_type("physio"),
            pfile("E05120.7"),
            AcquisitionFile::new("P05120.7.nii.gz").with_type("nifti"),
        ],
    )
}

fn label_table() -> LabelTable {
    LabelTable::default()
        .with_rule("fmri", "functional")
        .with_rule("t1", "anatomy_t1w")
}

/// Test the complete match-parse-propagate cycle on disk
#[test]
fn test_pipeline_from_directory() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("acq-1")).unwrap();
    fs::write(dir.path().join("acq-1").join("E05120.7"), EFILE).unwrap();

    let acquisitions = vec![acquisition("acq-1")];
    let classifier = Classifier::new(ClassifierOptions::default(), label_table());
    let report = classifier.run(&acquisitions, &DirectorySource::new(dir.path()));

    assert!(!report.has_failures());
    let propagation = report.propagations().next().unwrap();
    assert_eq!(propagation.measurement, MeasurementLabel::new("functional"));

    let labeled: Vec<&str> = propagation
        .labels
        .iter()
        .map(|assignment| assignment.file_name.as_str())
        .collect();
    assert_eq!(labeled, vec!["P05120.7.gz", "E05120.7", "P05120.7.nii.gz"]);

    let record = &propagation.metadata[0].record;
    assert_eq!(record.get("slice_thickness"), Some(&FieldValue::Real(0.0035)));
    assert_eq!(record.get("repetition_time"), Some(&FieldValue::Real(2.0)));
    assert_eq!(record.get("echo_time"), Some(&FieldValue::Real(0.03)));
    assert_eq!(record.get("flip_angle"), Some(&FieldValue::Integer(77)));
    assert_eq!(record.get("field_of_view"), Some(&FieldValue::Real(0.24)));
    assert!(record.contains_key("slice = 1"));

    let scan = NaiveDate::from_ymd_opt(2023, 1, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    assert_eq!(record.get(SCAN_TIMESTAMP), Some(&FieldValue::Timestamp(scan)));
    assert_eq!(propagation.timestamp_backfill(), Some(scan));
}

/// E-files may also sit directly in the root directory
#[test]
fn test_directory_source_flat_layout() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("E05120.7"), EFILE).unwrap();

    let source = DirectorySource::new(dir.path());
    assert_eq!(source.root(), dir.path());

    let acquisitions = vec![acquisition("acq-flat")];
    let classifier = Classifier::new(ClassifierOptions::default(), label_table());
    let report = classifier.run(&acquisitions, &source);

    assert_eq!(report.classified_count(), 1);
}

/// One broken acquisition does not affect the others
#[test]
fn test_failures_are_isolated() {
    let dir = tempdir().unwrap();
    for (id, content) in [("good", EFILE), ("truncated", "slice = 1\ngw_point1 = 0\n")] {
        fs::create_dir(dir.path().join(id)).unwrap();
        fs::write(dir.path().join(id).join("E05120.7"), content).unwrap();
    }

    let acquisitions = vec![acquisition("truncated"), acquisition("good")];
    let classifier = Classifier::new(ClassifierOptions::default(), label_table());
    let report = classifier.run(&acquisitions, &DirectorySource::new(dir.path()));

    match &report.acquisitions[0].outcome {
        Outcome::Failed { reason } => assert!(reason.contains("Truncated slice record")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(matches!(report.acquisitions[1].outcome, Outcome::Classified(_)));
}

/// Already-classified acquisitions are left alone
#[test]
fn test_classified_acquisition_is_skipped() {
    let acquisition = Acquisition::new(
        "done",
        vec![
            pfile("P05120.7.gz").with_measurement("functional"),
            pfile("E05120.7").with_measurement("functional"),
        ],
    );
    assert_eq!(PairMatcher::default().match_pair(&acquisition).unwrap(), None);
}

/// The legacy policy keeps the last P-file listed
#[test]
fn test_last_match_policy_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("E05120.7"), EFILE).unwrap();

    let acquisition = Acquisition::new(
        "acq-legacy",
        vec![pfile("P05119.7.gz"), pfile("E05120.7"), pfile("P05120.7.gz")],
    );
    let options = ClassifierOptions {
        policy: PairPolicy::LastMatch,
        ..Default::default()
    };
    let classifier = Classifier::new(options, label_table());
    let report = classifier.run([&acquisition], &DirectorySource::new(dir.path()));

    let propagation = report.propagations().next().unwrap();
    assert_eq!(propagation.metadata[0].file_name, "P05120.7.gz");
}

/// Parsing straight from a file path
#[test]
fn test_parse_from_file_and_propagate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("E05120.7");
    fs::write(&path, EFILE).unwrap();

    let parsed = EFileParser::default().parse_file(&path).unwrap();
    let pair = PairMatcher::default()
        .match_pair(&acquisition("acq-1"))
        .unwrap()
        .unwrap();
    let propagation = propagate(&pair, &parsed, &label_table()).unwrap();

    assert_eq!(propagation.metadata[1].file_name, "E05120.7");
    assert_eq!(propagation.metadata[1].record, parsed.record);
}

/// Missing files surface as I/O parse errors
#[test]
fn test_parse_missing_file() {
    let dir = tempdir().unwrap();
    let err = EFileParser::default()
        .parse_file(dir.path().join("missing.7"))
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to read E-file"));
}
