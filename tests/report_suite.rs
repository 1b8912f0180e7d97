use std::path::{Path, PathBuf};

use cardioshield_report::{
    Config, FixedClock, FixedReportIds, OutputMode, Page, PageRole, Primitive, ReportArtifact,
    ReportError, ReportGenerator, ReportInput, load_config, render_svg_pages,
};
use chrono::NaiveDate;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_input(name: &str) -> ReportInput {
    let raw = std::fs::read_to_string(fixture_path(name)).expect("fixture read failed");
    ReportInput::from_json(&raw).expect("fixture should decode")
}

fn generator(config: Config) -> ReportGenerator<FixedReportIds, FixedClock> {
    ReportGenerator::new(config)
        .with_id_source(FixedReportIds::new(["CS-4821"]))
        .with_clock(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Fill state of the YES and NO boxes drawn after a lifestyle label.
fn check_pair_fills(page: &Page, label: &str) -> [bool; 2] {
    let start = page
        .content
        .iter()
        .position(|prim| matches!(prim, Primitive::Text(run) if run.text == label))
        .unwrap_or_else(|| panic!("missing label {label}"));
    let fills: Vec<bool> = page.content[start..]
        .iter()
        .filter_map(|prim| match prim {
            Primitive::Rect { paint, .. } => Some(paint.fill.is_some()),
            _ => None,
        })
        .take(2)
        .collect();
    [fills[0], fills[1]]
}

#[test]
fn every_fixture_renders_two_pages() {
    for name in ["high_risk.json", "low_risk.json", "unknown_codes.json"] {
        let (patient, result) = load_input(name).into_records().unwrap();
        let document = generator(Config::default()).layout(&patient, &result).unwrap();
        assert_eq!(document.page_count(), 2, "{name}");
        assert_eq!(document.pages[0].role, PageRole::Summary, "{name}");
        assert_eq!(document.pages[1].role, PageRole::Guidance, "{name}");
        assert!(document.pages[1].contains_text("Page 2 of 2"), "{name}");
    }
}

#[test]
fn worked_high_risk_example() {
    let (patient, result) = load_input("high_risk.json").into_records().unwrap();
    let document = generator(Config::default()).layout(&patient, &result).unwrap();
    let summary = &document.pages[0];
    for expected in [
        "CS-4821",
        "3/9/2024",
        "45",
        "Male",
        "170",
        "80",
        "140 mmHg",
        "90 mmHg",
        "27.7",
        "High",
        "Above Normal",
        "HIGH RISK DETECTED",
        "78%",
    ] {
        assert!(summary.contains_text(expected), "missing {expected}");
    }
    let guidance: Vec<&str> = document.pages[1].texts().collect();
    assert!(guidance.iter().any(|t| t.contains("Quit smoking immediately")));
    assert!(!guidance.iter().any(|t| t.contains("Avoid smoking and secondhand smoke")));
}

#[test]
fn lifestyle_pairs_fill_the_recorded_answer() {
    let (patient, result) = load_input("high_risk.json").into_records().unwrap();
    let document = generator(Config::default()).layout(&patient, &result).unwrap();
    let summary = &document.pages[0];
    assert_eq!(check_pair_fills(summary, "Smoker"), [true, false]);
    assert_eq!(check_pair_fills(summary, "Physical Activity"), [true, false]);
    assert_eq!(check_pair_fills(summary, "Alcohol Intake"), [false, true]);

    let (patient, result) = load_input("low_risk.json").into_records().unwrap();
    let document = generator(Config::default()).layout(&patient, &result).unwrap();
    let summary = &document.pages[0];
    assert_eq!(check_pair_fills(summary, "Smoker"), [false, true]);
    assert_eq!(check_pair_fills(summary, "Physical Activity"), [true, false]);
    assert_eq!(check_pair_fills(summary, "Alcohol Intake"), [true, false]);
}

#[test]
fn low_risk_fixture_switches_every_block() {
    let (patient, result) = load_input("low_risk.json").into_records().unwrap();
    let document = generator(Config::default()).layout(&patient, &result).unwrap();
    let texts: Vec<&str> = document.texts().collect();
    assert!(texts.contains(&"LOW RISK DETECTED"));
    assert!(texts.contains(&"8.25%"));
    assert!(texts.contains(&"165.5"));
    assert!(texts.contains(&"Female"));
    assert!(!texts.contains(&"HIGH RISK DETECTED"));
    assert!(texts.iter().any(|t| t.contains("optimal range")));
    assert!(texts.iter().any(|t| t.contains("Avoid smoking and secondhand smoke")));
}

#[test]
fn file_mode_artifact_is_named_by_date() {
    let (patient, result) = load_input("high_risk.json").into_records().unwrap();
    let artifact = generator(Config::default())
        .generate(&patient, &result, OutputMode::File)
        .unwrap();
    match &artifact {
        ReportArtifact::File { filename, bytes } => {
            assert_eq!(filename, "CardioShield_Report_2024-03-09.pdf");
            assert!(bytes.starts_with(b"%PDF-"));
        }
        other => panic!("expected a file artifact, got {other:?}"),
    }
}

#[test]
fn fixed_sources_make_output_reproducible() {
    let (patient, result) = load_input("low_risk.json").into_records().unwrap();
    let first = generator(Config::default())
        .generate(&patient, &result, OutputMode::Stream)
        .unwrap();
    let second = generator(Config::default())
        .generate(&patient, &result, OutputMode::Stream)
        .unwrap();
    assert_eq!(first.bytes(), second.bytes());
}

#[test]
fn missing_result_is_invalid_input() {
    let err = load_input("missing_result.json").into_records().unwrap_err();
    assert!(matches!(err, ReportError::InvalidInput(_)));
    assert!(err.to_string().contains("risk result"));
}

#[test]
fn malformed_envelope_is_invalid_input() {
    let err = ReportInput::from_json("{\"formData\": {\"age\": \"old\"}}").unwrap_err();
    assert!(matches!(err, ReportError::InvalidInput(_)));
}

#[test]
fn unknown_codes_leave_fields_blank() {
    let (patient, result) = load_input("unknown_codes.json").into_records().unwrap();
    let document = generator(Config::default()).layout(&patient, &result).unwrap();
    let summary = &document.pages[0];
    assert!(summary.contains_text("CHOLESTEROL LEVEL"));
    assert!(summary.contains_text("GLUCOSE LEVEL"));
    assert!(!summary.contains_text("Normal"));
    assert!(!summary.contains_text("Above Normal"));
}

#[test]
fn print_config_changes_palette_and_date() {
    let config = load_config(Some(fixture_path("print.json5").as_path())).unwrap();
    let (patient, result) = load_input("high_risk.json").into_records().unwrap();
    let mut reports = generator(config);
    let document = reports.layout(&patient, &result).unwrap();
    assert!(document.pages[0].contains_text("2024-03-09"));

    let artifact = reports.generate(&patient, &result, OutputMode::Stream).unwrap();
    assert!(contains(artifact.bytes(), b"(HIGH RISK DETECTED) Tj"));
    assert!(contains(artifact.bytes(), b"/BaseFont /Helvetica-Oblique"));
}

#[test]
fn svg_pages_match_document() {
    let config = Config::default();
    let (patient, result) = load_input("high_risk.json").into_records().unwrap();
    let document = generator(config.clone()).layout(&patient, &result).unwrap();
    let pages = render_svg_pages(&document, &config.theme);
    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("HIGH RISK DETECTED"));
    assert!(pages[1].contains("PREVENTION &amp; LIFESTYLE RECOMMENDATIONS"));
}
