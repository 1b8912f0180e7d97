use crate::error::{ReportError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Biological sex as captured by the diagnostic form. The form encodes
/// female as `'1'`; every other code is reported as male.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn from_code(code: &str) -> Self {
        if code.trim() == "1" {
            Self::Female
        } else {
            Self::Male
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

/// Raw ordinal code (cholesterol, glucose). Kept as given so that an
/// out-of-range code can still be carried through to a blank label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrdinalCode(pub String);

impl OrdinalCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn level(&self) -> Option<u8> {
        match self.0.trim() {
            "1" => Some(1),
            "2" => Some(2),
            "3" => Some(3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientData {
    #[serde(deserialize_with = "de_u32")]
    pub age: u32,
    #[serde(deserialize_with = "de_gender")]
    pub gender: Gender,
    #[serde(deserialize_with = "de_f32")]
    pub height: f32,
    #[serde(deserialize_with = "de_f32")]
    pub weight: f32,
    #[serde(deserialize_with = "de_i32")]
    pub ap_hi: i32,
    #[serde(deserialize_with = "de_i32")]
    pub ap_lo: i32,
    #[serde(deserialize_with = "de_ordinal")]
    pub cholesterol: OrdinalCode,
    #[serde(deserialize_with = "de_ordinal")]
    pub gluc: OrdinalCode,
    #[serde(deserialize_with = "de_flag")]
    pub smoke: bool,
    #[serde(deserialize_with = "de_flag")]
    pub alco: bool,
    #[serde(deserialize_with = "de_flag")]
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    /// The scoring service reports `1` for high risk; anything else is low.
    pub fn from_code(code: i64) -> Self {
        if code == 1 { Self::High } else { Self::Low }
    }

    pub fn is_high(self) -> bool {
        self == Self::High
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    #[serde(rename = "result", deserialize_with = "de_risk_level")]
    pub classification: RiskLevel,
    #[serde(rename = "prob", deserialize_with = "de_f32")]
    pub probability: f32,
    #[serde(deserialize_with = "de_f32")]
    pub bmi: f32,
}

/// Navigation state handed over by the diagnostic flow. Either record may be
/// missing when the report page is reached directly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub form_data: Option<PatientData>,
    pub result: Option<RiskResult>,
}

impl ReportInput {
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|err| ReportError::InvalidInput(err.to_string()))
    }

    /// Returns both records, or `InvalidInput` naming the first absent one.
    pub fn into_records(self) -> Result<(PatientData, RiskResult)> {
        let patient = self.form_data.ok_or_else(|| ReportError::missing("patient data"))?;
        let result = self.result.ok_or_else(|| ReportError::missing("risk result"))?;
        Ok((patient, result))
    }
}

pub fn parse_patient(input: &str) -> Result<PatientData> {
    serde_json::from_str(input).map_err(|err| ReportError::InvalidInput(err.to_string()))
}

pub fn parse_result(input: &str) -> Result<RiskResult> {
    serde_json::from_str(input).map_err(|err| ReportError::InvalidInput(err.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FormValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl FormValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            FormValue::Bool(val) => Some(if *val { 1.0 } else { 0.0 }),
            FormValue::Number(val) => Some(*val),
            FormValue::String(val) => val.trim().parse::<f64>().ok(),
        }
    }

    fn as_code(&self) -> String {
        match self {
            FormValue::Bool(val) => if *val { "1" } else { "0" }.to_string(),
            FormValue::Number(val) if val.fract() == 0.0 => format!("{}", *val as i64),
            FormValue::Number(val) => format!("{val}"),
            FormValue::String(val) => val.trim().to_string(),
        }
    }
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    let value = FormValue::deserialize(deserializer)?;
    value
        .as_f64()
        .filter(|val| val.is_finite())
        .ok_or_else(|| {
            serde::de::Error::custom(format!("expected a number, got {:?}", value.as_code()))
        })
}

fn de_f32<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f32, D::Error> {
    number(deserializer).map(|val| val as f32)
}

fn de_i32<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i32, D::Error> {
    number(deserializer).map(|val| val.round() as i32)
}

fn de_u32<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let val = number(deserializer)?;
    if val < 0.0 {
        return Err(serde::de::Error::custom("expected a non-negative number"));
    }
    Ok(val.round() as u32)
}

fn de_gender<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Gender, D::Error> {
    FormValue::deserialize(deserializer).map(|value| Gender::from_code(&value.as_code()))
}

fn de_ordinal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<OrdinalCode, D::Error> {
    FormValue::deserialize(deserializer).map(|value| OrdinalCode(value.as_code()))
}

fn de_flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    FormValue::deserialize(deserializer).map(|value| value.as_code() == "1")
}

fn de_risk_level<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<RiskLevel, D::Error> {
    let value = FormValue::deserialize(deserializer)?;
    Ok(RiskLevel::from_code(value.as_f64().map(|v| v as i64).unwrap_or(0)))
}
