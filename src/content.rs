//! Static report content shared by the PDF layout and the on-screen summary.

use crate::ir::{OrdinalCode, RiskLevel};

pub const BRAND_TITLE: &str = "CardioShield AI";
pub const BRAND_SUBTITLE: &str = "Advanced Cardiac Diagnostic Center";
pub const SCREEN_SUBTITLE: &str = "Advanced Cardiac Health Diagnostic Report";
pub const WATERMARK: &str = "CardioShield";
pub const GUIDANCE_TITLE: &str = "PREVENTION & LIFESTYLE RECOMMENDATIONS";
pub const REPORT_FOOTER: &str =
    "Educational Purpose Only. Always consult a doctor for medical advice.";
pub const GUIDANCE_FOOTER: &str = "Educational Purpose Only. Consult a doctor.";
pub const SCREEN_DISCLAIMER: [&str; 2] = [
    "Disclaimer: This is an AI-generated report for educational purposes only. It is not a medical diagnosis.",
    "Always consult a doctor for professional medical advice.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidanceCategory {
    Lifestyle,
    Diet,
    Monitoring,
    Stress,
}

impl GuidanceCategory {
    pub const ALL: [GuidanceCategory; 4] = [
        GuidanceCategory::Lifestyle,
        GuidanceCategory::Diet,
        GuidanceCategory::Monitoring,
        GuidanceCategory::Stress,
    ];
}

pub struct GuidanceSection {
    pub category: GuidanceCategory,
    pub title: &'static str,
    pub high: [&'static str; 4],
    pub low: [&'static str; 4],
}

impl GuidanceSection {
    pub fn items(&self, level: RiskLevel) -> &[&'static str] {
        match level {
            RiskLevel::High => &self.high,
            RiskLevel::Low => &self.low,
        }
    }

    pub fn heading(&self) -> String {
        self.title.to_uppercase()
    }
}

pub static GUIDANCE: [GuidanceSection; 4] = [
    GuidanceSection {
        category: GuidanceCategory::Lifestyle,
        title: "Lifestyle & Habits",
        high: [
            "Aim for at least 30 minutes of moderate-intensity aerobic activity 5 days a week.",
            "Quit smoking immediately. Seek support groups or nicotine replacement therapy.",
            "Limit alcohol intake to a minimum or avoid it completely.",
            "Prioritize 7-8 hours of quality sleep every night.",
        ],
        low: [
            "Maintain your current activity level of 150 minutes of moderate exercise per week.",
            "Avoid smoking and secondhand smoke exposure.",
            "Drink alcohol in moderation.",
            "Keep a consistent sleep schedule to support overall well-being.",
        ],
    },
    GuidanceSection {
        category: GuidanceCategory::Diet,
        title: "Dietary Guidelines",
        high: [
            "Adopt a heart-healthy diet (e.g., DASH or Mediterranean diet).",
            "Reduce sodium intake to under 1,500 mg per day.",
            "Limit saturated fats (red meat, full-fat dairy) and avoid trans fats.",
            "Increase fiber intake with fruits, vegetables, whole grains, and legumes.",
        ],
        low: [
            "Continue a balanced diet rich in fruits, vegetables, and whole grains.",
            "Limit processed foods and sugary beverages.",
            "Choose healthy fats like olive oil, avocados, and nuts.",
            "Stay hydrated and monitor calorie intake to maintain a healthy weight.",
        ],
    },
    GuidanceSection {
        category: GuidanceCategory::Monitoring,
        title: "Health Monitoring",
        high: [
            "Measure blood pressure daily and keep a log for your doctor.",
            "Check weight daily to monitor for fluid retention.",
            "Schedule regular cholesterol and glucose screenings as advised.",
            "Be aware of warning signs like chest pain, shortness of breath, or palpitations.",
        ],
        low: [
            "Check blood pressure at least once a year.",
            "Monitor weight periodically to prevent gradual gain.",
            "Get a routine physical exam and blood work annually.",
            "Know your family history and discuss any changes with your doctor.",
        ],
    },
    GuidanceSection {
        category: GuidanceCategory::Stress,
        title: "Stress Management",
        high: [
            "Practice daily stress-reduction techniques like deep breathing or meditation.",
            "Consider counseling or therapy to manage chronic stress or anxiety.",
            "Ensure you have time for relaxation and hobbies.",
            "Connect with friends and family for emotional support.",
        ],
        low: [
            "Incorporate relaxation techniques into your daily routine.",
            "Maintain a healthy work-life balance.",
            "Engage in social activities and hobbies you enjoy.",
            "Practice mindfulness to stay grounded.",
        ],
    },
];

pub fn guidance(category: GuidanceCategory) -> &'static GuidanceSection {
    GUIDANCE
        .iter()
        .find(|section| section.category == category)
        .unwrap_or(&GUIDANCE[0])
}

pub fn headline(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "HIGH RISK DETECTED",
        RiskLevel::Low => "LOW RISK DETECTED",
    }
}

/// Paragraph printed in the notes box of the PDF.
pub fn report_recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => {
            "Patient analysis indicates elevated risk factors. Immediate consultation with a specialist is advised. Please focus on blood pressure management and lifestyle adjustments."
        }
        RiskLevel::Low => {
            "Patient analysis indicates low risk factors. Current health metrics are within optimal range. Continue balanced diet and regular activity."
        }
    }
}

/// Paragraph shown under "Clinical Recommendation" on screen.
pub fn screen_recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => {
            "We strongly recommend consulting a cardiologist for further evaluation. Focus on lifestyle changes such as a heart-healthy diet, regular moderate exercise, and monitoring blood pressure."
        }
        RiskLevel::Low => {
            "Your heart health metrics appear to be within a safe range. Maintain a healthy lifestyle, stay active, and continue regular check-ups to prevent future risks."
        }
    }
}

/// Label for a cholesterol/glucose code; `None` outside 1..=3.
pub fn ordinal_label(code: &OrdinalCode) -> Option<&'static str> {
    match code.level()? {
        1 => Some("Normal"),
        2 => Some("Above Normal"),
        3 => Some("High"),
        _ => None,
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Formats a measured value without a trailing `.0` and with at most two decimals.
pub fn format_number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        let text = format!("{:.2}", rounded);
        text.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_codes_map_to_labels() {
        assert_eq!(ordinal_label(&OrdinalCode::new("1")), Some("Normal"));
        assert_eq!(ordinal_label(&OrdinalCode::new("2")), Some("Above Normal"));
        assert_eq!(ordinal_label(&OrdinalCode::new("3")), Some("High"));
        assert_eq!(ordinal_label(&OrdinalCode::new("0")), None);
        assert_eq!(ordinal_label(&OrdinalCode::new("4")), None);
        assert_eq!(ordinal_label(&OrdinalCode::new("high")), None);
    }

    #[test]
    fn every_category_has_both_lists() {
        for category in GuidanceCategory::ALL {
            let section = guidance(category);
            assert_eq!(section.category, category);
            assert_eq!(section.items(RiskLevel::High).len(), 4);
            assert_eq!(section.items(RiskLevel::Low).len(), 4);
            assert_ne!(section.items(RiskLevel::High), section.items(RiskLevel::Low));
        }
    }

    #[test]
    fn headings_are_upper_case_titles() {
        assert_eq!(guidance(GuidanceCategory::Lifestyle).heading(), "LIFESTYLE & HABITS");
        assert_eq!(guidance(GuidanceCategory::Stress).heading(), "STRESS MANAGEMENT");
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(format_number(78.0), "78");
        assert_eq!(format_number(27.7), "27.7");
        assert_eq!(format_number(27.456), "27.46");
        assert_eq!(format_number(170.0), "170");
    }
}
