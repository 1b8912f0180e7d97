use crate::content::{self, format_number};
use crate::ir::{PatientData, RiskResult};
use crate::text_metrics::{FontFace, line_height, measure_text_width, wrap_text};
use crate::theme::Rgb;

use super::widgets::{Field, cap_height, check_pair, field_box, line, section_heading, text};
use super::{Paint, PageFlow, Primitive};

const PAGE_RULE_LENGTH: f32 = 40.0;
const HEADLINE_SIZE: f32 = 24.0;
const ICON_GLYPH_SIZE: f32 = 28.0;
const NOTES_TEXT_SIZE: f32 = 10.0;
const NOTES_TOP_PADDING: f32 = 10.0;
const NOTES_BOTTOM_PADDING: f32 = 6.0;

pub(super) fn layout_summary_page(
    flow: &mut PageFlow<'_>,
    patient: &PatientData,
    result: &RiskResult,
) {
    patient_profile(flow, patient);
    clinical_vitals(flow, patient, result);
    lifestyle_factors(flow, patient);
    risk_panel(flow, result);
    recommendation(flow, result);
}

fn patient_profile(flow: &mut PageFlow<'_>, patient: &PatientData) {
    let config = flow.config();
    let theme = flow.theme();
    flow.ensure_space(config.heading_gap + config.field_height);

    let y = flow.y();
    section_heading(flow.content(), theme, config.margin_x, y, "PATIENT PROFILE", PAGE_RULE_LENGTH);
    flow.advance(config.heading_gap);

    let age = patient.age.to_string();
    let height = format_number(patient.height);
    let weight = format_number(patient.weight);
    let fields = [
        Field::new("Age (Years)", Some(&age), config.field_width),
        Field::new("Gender", Some(patient.gender.label()), config.field_width),
        Field::new("Height (cm)", Some(&height), config.field_width),
        Field::new("Weight (kg)", Some(&weight), config.last_field_width),
    ];
    let y = flow.y();
    for (column, field) in config.columns.iter().zip(fields.iter()) {
        field_box(flow.content(), theme, config, *column, y, field);
    }
    flow.advance(config.field_height + config.section_gap);
}

fn clinical_vitals(flow: &mut PageFlow<'_>, patient: &PatientData, result: &RiskResult) {
    let config = flow.config();
    let theme = flow.theme();
    let block = config.heading_gap + config.field_height * 2.0 + config.field_row_gap;
    flow.ensure_space(block);

    let y = flow.y();
    section_heading(flow.content(), theme, config.margin_x, y, "CLINICAL VITALS", PAGE_RULE_LENGTH);
    flow.advance(config.heading_gap);

    let systolic = format!("{} mmHg", patient.ap_hi);
    let diastolic = format!("{} mmHg", patient.ap_lo);
    let bmi = format_number(result.bmi);
    let y = flow.y();
    let cols = config.columns;
    field_box(
        flow.content(),
        theme,
        config,
        cols[0],
        y,
        &Field::new("Systolic BP", Some(&systolic), config.field_width),
    );
    field_box(
        flow.content(),
        theme,
        config,
        cols[1],
        y,
        &Field::new("Diastolic BP", Some(&diastolic), config.field_width),
    );
    field_box(
        flow.content(),
        theme,
        config,
        cols[2],
        y,
        &Field::new("BMI Score", Some(&bmi), config.wide_field_width).highlighted(),
    );
    flow.advance(config.field_height + config.field_row_gap);

    let cholesterol = ordinal_value("cholesterol", &patient.cholesterol);
    let glucose = ordinal_value("glucose", &patient.gluc);
    let y = flow.y();
    field_box(
        flow.content(),
        theme,
        config,
        cols[0],
        y,
        &Field::new("Cholesterol Level", cholesterol, config.half_field_width),
    );
    field_box(
        flow.content(),
        theme,
        config,
        cols[2],
        y,
        &Field::new("Glucose Level", glucose, config.half_field_width),
    );
    flow.advance(config.field_height + config.section_gap);
}

fn ordinal_value(name: &str, code: &crate::ir::OrdinalCode) -> Option<&'static str> {
    let label = content::ordinal_label(code);
    if label.is_none() {
        log::warn!("unknown {name} code {:?}, leaving the field blank", code.as_str());
    }
    label
}

fn lifestyle_factors(flow: &mut PageFlow<'_>, patient: &PatientData) {
    let config = flow.config();
    let theme = flow.theme();
    flow.ensure_space(config.check_heading_gap + config.check_row_gap + 2.0);

    let y = flow.y();
    section_heading(
        flow.content(),
        theme,
        config.margin_x,
        y,
        "LIFESTYLE FACTORS",
        PAGE_RULE_LENGTH,
    );
    flow.advance(config.check_heading_gap);

    let [left, right] = config.check_columns;
    let y = flow.y();
    check_pair(flow.content(), theme, left, y, "Smoker", patient.smoke);
    check_pair(flow.content(), theme, right, y, "Physical Activity", patient.active);
    flow.advance(config.check_row_gap);

    let y = flow.y();
    check_pair(flow.content(), theme, left, y, "Alcohol Intake", patient.alco);
    flow.advance(config.check_row_gap);
}

fn risk_panel(flow: &mut PageFlow<'_>, result: &RiskResult) {
    let config = flow.config();
    let theme = flow.theme();
    flow.ensure_space(config.panel_height);

    let high = result.classification.is_high();
    let color = theme.risk_color(high);
    let x = config.margin_x;
    let y = flow.y();
    let width = config.page_width - config.margin_x * 2.0;
    let out = flow.content();

    out.push(Primitive::RoundedRect {
        x,
        y,
        width,
        height: config.panel_height,
        radius: 4.0,
        paint: Paint::fill_and_stroke(theme.risk_tint(high), color, 1.0),
    });

    let center = (x + 25.0, y + config.panel_height / 2.0);
    out.push(Primitive::Circle {
        cx: center.0,
        cy: center.1,
        r: 15.0,
        paint: Paint::fill(color),
    });
    if high {
        let width = measure_text_width("!", ICON_GLYPH_SIZE, FontFace::Bold);
        text(
            out,
            center.0 - width / 2.0,
            center.1 + cap_height(ICON_GLYPH_SIZE) / 2.0,
            "!",
            FontFace::Bold,
            ICON_GLYPH_SIZE,
            Rgb::WHITE,
        );
    } else {
        let (cx, cy) = center;
        line(out, (cx - 7.0, cy), (cx - 2.0, cy + 7.0), Rgb::WHITE, 3.0);
        line(out, (cx - 2.0, cy + 7.0), (cx + 7.0, cy - 7.0), Rgb::WHITE, 3.0);
    }

    let text_x = x + 50.0;
    text(
        out,
        text_x,
        y + 20.0,
        content::headline(result.classification),
        FontFace::Bold,
        HEADLINE_SIZE,
        color,
    );
    let label = "Estimated Risk Probability:";
    text(out, text_x, y + 35.0, label, FontFace::Regular, 12.0, theme.body_text);
    let label_width = measure_text_width(label, 12.0, FontFace::Regular);
    text(
        out,
        text_x + label_width.max(52.0) + 3.0,
        y + 35.0,
        &format!("{}%", format_number(result.probability)),
        FontFace::Bold,
        14.0,
        theme.body_text,
    );

    flow.advance(config.panel_height + config.panel_gap);
}

fn recommendation(flow: &mut PageFlow<'_>, result: &RiskResult) {
    let config = flow.config();
    let theme = flow.theme();
    let x = config.margin_x;
    let width = config.page_width - config.margin_x * 2.0;

    let lines = wrap_text(
        content::report_recommendation(result.classification),
        NOTES_TEXT_SIZE,
        FontFace::Italic,
        width - 10.0,
    );
    let leading = line_height(NOTES_TEXT_SIZE);
    let box_height = (NOTES_TOP_PADDING
        + (lines.len().saturating_sub(1)) as f32 * leading
        + NOTES_BOTTOM_PADDING)
        .max(config.notes_min_height);
    flow.ensure_space(config.notes_heading_gap + box_height);

    let y = flow.y();
    text(
        flow.content(),
        x,
        y,
        "MEDICAL NOTES / RECOMMENDATION",
        FontFace::Bold,
        10.0,
        theme.primary,
    );
    flow.advance(config.notes_heading_gap);

    let y = flow.y();
    let out = flow.content();
    out.push(Primitive::RoundedRect {
        x,
        y,
        width,
        height: box_height,
        radius: 2.0,
        paint: Paint::fill_and_stroke(Rgb::WHITE, theme.border, 0.1),
    });
    for (idx, line) in lines.iter().enumerate() {
        text(
            out,
            x + 5.0,
            y + NOTES_TOP_PADDING + idx as f32 * leading,
            line,
            FontFace::Italic,
            NOTES_TEXT_SIZE,
            theme.notes_text,
        );
    }
    flow.advance(box_height + config.section_gap);
}

#[cfg(test)]
mod tests {
    use super::super::tests::{sample_patient, sample_result};
    use super::super::{LayoutContext, PageRole, compute_layout};
    use crate::config::LayoutConfig;
    use crate::ir::{OrdinalCode, RiskLevel};
    use crate::theme::Theme;

    fn summary_texts(patient: &crate::ir::PatientData, level: RiskLevel) -> Vec<String> {
        let theme = Theme::cardioshield();
        let config = LayoutConfig::default();
        let ctx = LayoutContext {
            theme: &theme,
            config: &config,
            report_id: "CS-42",
            date: "3/9/2024",
        };
        let doc = compute_layout(patient, &sample_result(level), &ctx).unwrap();
        assert_eq!(doc.pages[0].role, PageRole::Summary);
        doc.pages[0].texts().map(str::to_string).collect()
    }

    #[test]
    fn high_risk_example_renders_expected_values() {
        let texts = summary_texts(&sample_patient(), RiskLevel::High);
        for expected in [
            "HIGH RISK DETECTED",
            "78%",
            "High",
            "Above Normal",
            "140 mmHg",
            "90 mmHg",
            "27.7",
            "Male",
            "CS-42",
            "3/9/2024",
        ] {
            assert!(texts.iter().any(|t| t == expected), "missing {expected}");
        }
        assert!(!texts.iter().any(|t| t == "LOW RISK DETECTED"));
    }

    #[test]
    fn unknown_ordinal_code_leaves_field_blank() {
        let mut patient = sample_patient();
        patient.cholesterol = OrdinalCode::new("7");
        patient.gluc = OrdinalCode::new("");
        let texts = summary_texts(&patient, RiskLevel::Low);
        assert!(texts.iter().any(|t| t == "CHOLESTEROL LEVEL"));
        assert!(texts.iter().any(|t| t == "LOW RISK DETECTED"));
        assert!(!texts.iter().any(|t| t == "High" || t == "Above Normal" || t == "Normal"));
    }

    #[test]
    fn notes_paragraph_follows_classification() {
        let high = summary_texts(&sample_patient(), RiskLevel::High).join(" ");
        let low = summary_texts(&sample_patient(), RiskLevel::Low).join(" ");
        assert!(high.contains("elevated risk factors"));
        assert!(!high.contains("optimal range"));
        assert!(low.contains("optimal range"));
        assert!(!low.contains("elevated risk factors"));
    }
}
