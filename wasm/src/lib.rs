use cardioshield_report::{
    Clock, Config, FixedClock, FixedReportIds, OutputMode, RandomReportIds, ReportGenerator,
    ReportIdSource, ReportInput, SystemClock, Theme, build_summary,
};
use chrono::NaiveDate;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportOptions {
    theme: Option<String>,
    report_id: Option<String>,
    /// `YYYY-MM-DD`; defaults to the browser's local date.
    date: Option<String>,
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn parse_options(options_json: Option<String>) -> Result<ReportOptions, String> {
    match options_json {
        Some(raw) => serde_json::from_str(&raw).map_err(|error| error.to_string()),
        None => Ok(ReportOptions::default()),
    }
}

fn report_date(options: &ReportOptions) -> Result<NaiveDate, String> {
    match options.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|error| error.to_string()),
        None => Ok(SystemClock.today()),
    }
}

fn build_pdf(input_json: &str, options: &ReportOptions) -> Result<Vec<u8>, String> {
    let (patient, result) = ReportInput::from_json(input_json)
        .and_then(ReportInput::into_records)
        .map_err(|error| error.to_string())?;

    let mut config = Config::default();
    if let Some(name) = options.theme.as_deref() {
        config.theme = Theme::by_name(name).map_err(|error| error.to_string())?;
    }
    let ids: Box<dyn ReportIdSource> = match &options.report_id {
        Some(id) => Box::new(FixedReportIds::new([id.clone()])),
        None => Box::new(RandomReportIds),
    };
    let date = report_date(options)?;

    // The page shows the PDF in a viewer, so the bytes are streamed.
    let artifact = ReportGenerator::new(config)
        .with_id_source(ids)
        .with_clock(FixedClock(date))
        .generate(&patient, &result, OutputMode::Stream)
        .map_err(|error| error.to_string())?;
    Ok(artifact.into_bytes())
}

/// Returns the report PDF for a navigation-state JSON envelope.
#[wasm_bindgen]
pub fn generate_report_pdf(
    input_json: &str,
    options_json: Option<String>,
) -> Result<Vec<u8>, JsValue> {
    let options = parse_options(options_json).map_err(to_js)?;
    build_pdf(input_json, &options).map_err(to_js)
}

fn build_summary_json(input_json: &str, date: NaiveDate) -> Result<String, String> {
    let (patient, result) = ReportInput::from_json(input_json)
        .and_then(ReportInput::into_records)
        .map_err(|error| error.to_string())?;
    let summary = build_summary(&patient, &result, date, &Theme::default());
    serde_json::to_string(&summary).map_err(|error| error.to_string())
}

/// Returns the on-screen report view-model as JSON.
#[wasm_bindgen]
pub fn report_summary_json(input_json: &str) -> Result<String, JsValue> {
    build_summary_json(input_json, SystemClock.today()).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE: &str = r#"{
        "formData": {"age": "52", "gender": "1", "height": "158", "weight": "61",
            "ap_hi": "118", "ap_lo": "76", "cholesterol": "1", "gluc": "1",
            "smoke": "0", "alco": "0", "active": "1"},
        "result": {"result": 0, "prob": 21, "bmi": 24.4}
    }"#;

    fn options() -> ReportOptions {
        ReportOptions {
            theme: None,
            report_id: Some("CS-77".to_string()),
            date: Some("2024-06-01".to_string()),
        }
    }

    #[test]
    fn builds_pdf_bytes() {
        let bytes = build_pdf(STATE, &options()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(bytes, build_pdf(STATE, &options()).unwrap());
    }

    #[test]
    fn reports_missing_records() {
        let err = build_pdf(r#"{"formData": null}"#, &options()).unwrap_err();
        assert!(err.contains("patient data record is missing"));
    }

    #[test]
    fn rejects_unknown_theme() {
        let options = ReportOptions {
            theme: Some("neon".to_string()),
            ..options()
        };
        assert!(build_pdf(STATE, &options).is_err());
    }

    #[test]
    fn summary_json_has_banner() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let json = build_summary_json(STATE, date).unwrap();
        assert!(json.contains("LOW RISK DETECTED"));
        assert!(json.contains("\"date\":\"6/1/2024\""));
    }
}
