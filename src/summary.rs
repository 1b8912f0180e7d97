//! On-screen report view-model: the tables, verdict banner, gauge and
//! prevention tips a viewer shows next to the download button.

use chrono::NaiveDate;
use serde::Serialize;

use crate::content::{self, GUIDANCE, format_number, ordinal_label, yes_no};
use crate::ir::{PatientData, RiskLevel, RiskResult};
use crate::theme::Theme;

/// Above this probability the gauge is drawn in the alarm colour.
pub const GAUGE_ALARM_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub date: String,
    pub banner: Banner,
    pub profile: Vec<SummaryRow>,
    pub vitals: Vec<SummaryRow>,
    pub gauge: Vec<GaugeSegment>,
    pub recommendation: &'static str,
    pub prevention: Prevention,
    pub disclaimer: [&'static str; 2],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub headline: &'static str,
    pub probability: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GaugeSegment {
    pub name: &'static str,
    pub value: f32,
    pub fill: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prevention {
    /// "Critical" for high risk, "Proactive" otherwise.
    pub emphasis: &'static str,
    pub heading: &'static str,
    pub sections: Vec<PreventionSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreventionSection {
    pub title: &'static str,
    pub tips: Vec<&'static str>,
}

fn row(label: &'static str, value: impl Into<String>) -> SummaryRow {
    SummaryRow {
        label,
        value: value.into(),
    }
}

pub fn build_summary(
    patient: &PatientData,
    result: &RiskResult,
    date: NaiveDate,
    theme: &Theme,
) -> ReportSummary {
    let level = result.classification;
    let high = level.is_high();

    let profile = vec![
        row("Age", format!("{} Years", patient.age)),
        row("Gender", patient.gender.label()),
        row("Height", format!("{} cm", format_number(patient.height))),
        row("Weight", format!("{} kg", format_number(patient.weight))),
        row("BMI Score", format_number(result.bmi)),
    ];
    let vitals = vec![
        row("Blood Pressure", format!("{}/{} mmHg", patient.ap_hi, patient.ap_lo)),
        row("Cholesterol", ordinal_label(&patient.cholesterol).unwrap_or_default()),
        row("Glucose", ordinal_label(&patient.gluc).unwrap_or_default()),
        row("Smoker", yes_no(patient.smoke)),
        row("Alcohol Intake", yes_no(patient.alco)),
    ];

    let gauge_fill = if result.probability > GAUGE_ALARM_THRESHOLD {
        theme.gauge_high
    } else {
        theme.gauge_low
    };
    let gauge = vec![
        GaugeSegment {
            name: "Safe",
            value: 100.0,
            fill: theme.gauge_track.to_hex(),
        },
        GaugeSegment {
            name: "Risk Probability",
            value: result.probability,
            fill: gauge_fill.to_hex(),
        },
    ];

    let sections = GUIDANCE
        .iter()
        .map(|section| PreventionSection {
            title: section.title,
            tips: section.items(level).to_vec(),
        })
        .collect();

    ReportSummary {
        title: content::BRAND_TITLE,
        subtitle: content::SCREEN_SUBTITLE,
        date: date.format("%-m/%-d/%Y").to_string(),
        banner: Banner {
            headline: content::headline(level),
            probability: format!("{}%", format_number(result.probability)),
            color: if high { theme.high_risk } else { theme.banner_low }.to_hex(),
        },
        profile,
        vitals,
        gauge,
        recommendation: content::screen_recommendation(level),
        prevention: Prevention {
            emphasis: if level == RiskLevel::High { "Critical" } else { "Proactive" },
            heading: "Health Recommendations",
            sections,
        },
        disclaimer: content::SCREEN_DISCLAIMER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Gender, OrdinalCode};

    fn patient() -> PatientData {
        PatientData {
            age: 45,
            gender: Gender::Male,
            height: 170.0,
            weight: 80.0,
            ap_hi: 140,
            ap_lo: 90,
            cholesterol: OrdinalCode::new("3"),
            gluc: OrdinalCode::new("2"),
            smoke: true,
            alco: false,
            active: true,
        }
    }

    fn result(level: RiskLevel, probability: f32) -> RiskResult {
        RiskResult {
            classification: level,
            probability,
            bmi: 27.7,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn tables_follow_the_screen_wording() {
        let theme = Theme::default();
        let summary = build_summary(&patient(), &result(RiskLevel::High, 78.0), date(), &theme);
        assert_eq!(summary.profile[0], row("Age", "45 Years"));
        assert_eq!(summary.profile[2], row("Height", "170 cm"));
        assert_eq!(summary.profile[4], row("BMI Score", "27.7"));
        assert_eq!(summary.vitals[0], row("Blood Pressure", "140/90 mmHg"));
        assert_eq!(summary.vitals[1], row("Cholesterol", "High"));
        assert_eq!(summary.vitals[2], row("Glucose", "Above Normal"));
        assert_eq!(summary.vitals[3], row("Smoker", "Yes"));
        assert_eq!(summary.vitals[4], row("Alcohol Intake", "No"));
        assert_eq!(summary.date, "3/9/2024");
    }

    #[test]
    fn gauge_switches_colour_above_half() {
        let theme = Theme::default();
        let high = build_summary(&patient(), &result(RiskLevel::High, 78.0), date(), &theme);
        assert_eq!(high.gauge[0].fill, theme.gauge_track.to_hex());
        assert_eq!(high.gauge[1].fill, theme.gauge_high.to_hex());
        assert_eq!(high.gauge[1].value, 78.0);

        let boundary = build_summary(&patient(), &result(RiskLevel::High, 50.0), date(), &theme);
        assert_eq!(boundary.gauge[1].fill, theme.gauge_low.to_hex());
    }

    #[test]
    fn recommendation_and_tips_follow_classification() {
        let theme = Theme::default();
        let low = build_summary(&patient(), &result(RiskLevel::Low, 12.0), date(), &theme);
        assert_eq!(low.banner.headline, "LOW RISK DETECTED");
        assert_eq!(low.banner.probability, "12%");
        assert!(low.recommendation.starts_with("Your heart health metrics"));
        assert_eq!(low.prevention.emphasis, "Proactive");
        assert_eq!(low.prevention.sections.len(), 4);
        for (section, shared) in low.prevention.sections.iter().zip(GUIDANCE.iter()) {
            assert_eq!(section.tips, shared.items(RiskLevel::Low));
        }
    }

    #[test]
    fn banner_colour_follows_classification() {
        for theme in [Theme::cardioshield(), Theme::monochrome()] {
            let high = build_summary(&patient(), &result(RiskLevel::High, 78.0), date(), &theme);
            assert_eq!(high.banner.color, theme.high_risk.to_hex());
            let low = build_summary(&patient(), &result(RiskLevel::Low, 12.0), date(), &theme);
            assert_eq!(low.banner.color, theme.banner_low.to_hex());
        }
        assert_eq!(Theme::cardioshield().banner_low.to_hex(), "#4ADE80");
    }

    #[test]
    fn unknown_codes_render_empty_cells() {
        let mut patient = patient();
        patient.gluc = OrdinalCode::new("9");
        let theme = Theme::default();
        let summary = build_summary(&patient, &result(RiskLevel::Low, 5.0), date(), &theme);
        assert_eq!(summary.vitals[2].value, "");
    }

    #[test]
    fn serializes_camel_case() {
        let theme = Theme::default();
        let summary = build_summary(&patient(), &result(RiskLevel::High, 78.0), date(), &theme);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["banner"]["headline"], "HIGH RISK DETECTED");
        assert_eq!(json["prevention"]["emphasis"], "Critical");
        assert!(json["gauge"].is_array());
    }
}
