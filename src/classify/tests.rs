use super::*;
use crate::acquisition::{Acquisition, AcquisitionFile, PairMatcher};
use crate::efile::{EFileParser, ParseError, ParsedEFile};
use chrono::NaiveDate;

const EFILE: &str = "\
series_description = Ax fMRI rest
repetition_time = 2000 msec
date_of_scan = 01/15/123
time_of_scan = 09:30
";

fn pfile(name: &str) -> AcquisitionFile {
    AcquisitionFile::new(name).with_type("pfile")
}

fn matched_pair() -> MatchedPair {
    let acquisition = Acquisition::new(
        "acq-1",
        vec![
            pfile("P05120.7.gz"),
            AcquisitionFile::new("P05120_physio.7").with_type("physio"),
            pfile("E05120.7"),
            AcquisitionFile::new("P99999.7.nii.gz").with_type("nifti"),
        ],
    );
    PairMatcher::default()
        .match_pair(&acquisition)
        .unwrap()
        .unwrap()
}

fn parsed_efile() -> ParsedEFile {
    EFileParser::default().parse_str(EFILE).unwrap()
}

fn functional(_: &str) -> MeasurementLabel {
    MeasurementLabel::new("functional")
}

#[test]
fn test_labels_skip_physio_and_unrelated_files() {
    let propagation = propagate(&matched_pair(), &parsed_efile(), &functional).unwrap();

    let labeled: Vec<&str> = propagation
        .labels
        .iter()
        .map(|assignment| assignment.file_name.as_str())
        .collect();
    assert_eq!(labeled, vec!["P05120.7.gz", "E05120.7"]);
    assert!(propagation
        .labels
        .iter()
        .all(|assignment| assignment.measurement.as_str() == "functional"));
}

#[test]
fn test_scanner_style_efile_name_is_labeled_once() {
    let acquisition = Acquisition::new(
        "acq-2",
        vec![
            pfile("P05120.7.gz"),
            pfile("E12345S003P05120.7"),
            AcquisitionFile::new("P05120.7.nii.gz").with_type("nifti"),
        ],
    );
    let pair = PairMatcher::default()
        .match_pair(&acquisition)
        .unwrap()
        .unwrap();
    let propagation = propagate(&pair, &parsed_efile(), &functional).unwrap();

    let labeled: Vec<&str> = propagation
        .labels
        .iter()
        .map(|assignment| assignment.file_name.as_str())
        .collect();
    assert_eq!(
        labeled,
        vec!["P05120.7.gz", "E12345S003P05120.7", "P05120.7.nii.gz"]
    );
}

#[test]
fn test_metadata_goes_to_pfile_then_efile() {
    let parsed = parsed_efile();
    let propagation = propagate(&matched_pair(), &parsed, &functional).unwrap();

    assert_eq!(propagation.metadata.len(), 2);
    assert_eq!(propagation.metadata[0].file_name, "P05120.7.gz");
    assert_eq!(propagation.metadata[1].file_name, "E05120.7");
    assert_eq!(propagation.metadata[0].record, parsed.record);
}

#[test]
fn test_inference_receives_series_description() {
    let table = LabelTable::default()
        .with_rule("localizer", "localizer")
        .with_rule("FMRI", "functional");
    let propagation = propagate(&matched_pair(), &parsed_efile(), &table).unwrap();
    assert_eq!(propagation.measurement, MeasurementLabel::new("functional"));
}

#[test]
fn test_missing_series_description() {
    let parsed = EFileParser::default()
        .parse_str("date_of_scan = 01/15/123\ntime_of_scan = 09:30\n")
        .unwrap();
    let err = propagate(&matched_pair(), &parsed, &functional).unwrap_err();
    assert!(matches!(err, ClassifyError::MissingField(SERIES_DESCRIPTION)));
}

#[test]
fn test_numeric_series_description_is_rendered() {
    let parsed = EFileParser::default()
        .parse_str("series_description = 3\ndate_of_scan = 01/15/123\ntime_of_scan = 09:30\n")
        .unwrap();
    let echo = |description: &str| MeasurementLabel::new(format!("series-{}", description));
    let propagation = propagate(&matched_pair(), &parsed, &echo).unwrap();
    assert_eq!(propagation.measurement.as_str(), "series-3");
}

#[test]
fn test_timestamp_backfill() {
    let scan = NaiveDate::from_ymd_opt(2023, 1, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();

    let propagation = propagate(&matched_pair(), &parsed_efile(), &functional).unwrap();
    assert_eq!(propagation.scan_timestamp, scan);
    assert_eq!(propagation.timestamp_backfill(), Some(scan));

    let mut pair = matched_pair();
    pair.timestamp = Some(scan - chrono::Duration::days(1));
    let propagation = propagate(&pair, &parsed_efile(), &functional).unwrap();
    assert_eq!(propagation.timestamp_backfill(), None);
}

#[test]
fn test_classify_reports_parse_errors() {
    let err = classify(
        &matched_pair(),
        "series_description = x\n",
        &EFileParser::default(),
        &functional,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::Parse(ParseError::MissingField(_))
    ));
}

#[test]
fn test_label_table_default() {
    let table = LabelTable::default().with_rule("t1", "anatomy_t1w");
    assert_eq!(table.infer_measurement("Sag T1 FLAIR").as_str(), "anatomy_t1w");
    assert_eq!(table.infer_measurement("DTI 60dir").as_str(), "unknown");
}

#[test]
fn test_label_table_from_toml() {
    let table: LabelTable = toml::from_str(
        r#"
            default = "other"

            [[rules]]
            pattern = "dti"
            label = "diffusion"
        "#,
    )
    .unwrap();
    assert_eq!(table.infer_measurement("Ax DTI 30").as_str(), "diffusion");
    assert_eq!(table.infer_measurement("Ax fMRI").as_str(), "other");
}
