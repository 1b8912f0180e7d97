use crate::error::{ReportError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());
static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Parses `#rgb`, `#rrggbb` or `rgb(r, g, b)`.
pub fn parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim();
    if let Some(caps) = HEX_RE.captures(value) {
        let digits = caps.get(1)?.as_str();
        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        let channel = |idx: usize| u8::from_str_radix(&expanded[idx..idx + 2], 16).ok();
        return Some(Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    if let Some(caps) = RGB_RE.captures(value) {
        let channel = |idx: usize| caps.get(idx)?.as_str().parse::<u8>().ok();
        return Some(Rgb(channel(1)?, channel(2)?, channel(3)?));
    }
    None
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub primary: Rgb,
    pub accent: Rgb,
    pub border: Rgb,
    pub label_background: Rgb,
    pub high_risk: Rgb,
    pub low_risk: Rgb,
    pub high_risk_tint: Rgb,
    pub low_risk_tint: Rgb,
    pub badge_background: Rgb,
    pub badge_label: Rgb,
    pub field_label: Rgb,
    pub field_value: Rgb,
    pub highlight_fill: Rgb,
    pub watermark: Rgb,
    pub check_label: Rgb,
    pub check_muted: Rgb,
    pub check_no_fill: Rgb,
    pub check_no_text: Rgb,
    pub body_text: Rgb,
    pub notes_text: Rgb,
    pub background: Rgb,
    pub gauge_track: Rgb,
    pub gauge_high: Rgb,
    pub gauge_low: Rgb,
    /// Headline colour of the on-screen banner for a low-risk result.
    pub banner_low: Rgb,
}

impl Theme {
    pub fn cardioshield() -> Self {
        Self {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            primary: Rgb(15, 23, 42),
            accent: Rgb(6, 182, 212),
            border: Rgb(203, 213, 225),
            label_background: Rgb(241, 245, 249),
            high_risk: Rgb(244, 63, 94),
            low_risk: Rgb(34, 197, 94),
            high_risk_tint: Rgb(255, 240, 240),
            low_risk_tint: Rgb(240, 255, 250),
            badge_background: Rgb(30, 41, 59),
            badge_label: Rgb(148, 163, 184),
            field_label: Rgb(71, 85, 105),
            field_value: Rgb(15, 23, 42),
            highlight_fill: Rgb(250, 255, 255),
            watermark: Rgb(245, 247, 250),
            check_label: Rgb(70, 70, 70),
            check_muted: Rgb(150, 150, 150),
            check_no_fill: Rgb(200, 200, 200),
            check_no_text: Rgb(50, 50, 50),
            body_text: Rgb(60, 60, 60),
            notes_text: Rgb(80, 80, 80),
            background: Rgb::WHITE,
            gauge_track: Rgb(51, 65, 85),
            gauge_high: Rgb(244, 63, 94),
            gauge_low: Rgb(74, 222, 128),
            banner_low: Rgb(74, 222, 128),
        }
    }

    /// Print-friendly palette: brand colours collapse to greys, the risk
    /// colours stay distinguishable.
    pub fn monochrome() -> Self {
        Self {
            primary: Rgb(33, 33, 33),
            accent: Rgb(97, 97, 97),
            border: Rgb(189, 189, 189),
            label_background: Rgb(238, 238, 238),
            high_risk: Rgb(66, 66, 66),
            low_risk: Rgb(158, 158, 158),
            high_risk_tint: Rgb(245, 245, 245),
            low_risk_tint: Rgb(250, 250, 250),
            badge_background: Rgb(66, 66, 66),
            badge_label: Rgb(189, 189, 189),
            field_label: Rgb(66, 66, 66),
            field_value: Rgb(33, 33, 33),
            highlight_fill: Rgb(250, 250, 250),
            watermark: Rgb(247, 247, 247),
            gauge_high: Rgb(66, 66, 66),
            gauge_low: Rgb(158, 158, 158),
            banner_low: Rgb(117, 117, 117),
            ..Self::cardioshield()
        }
    }

    pub fn risk_color(&self, high: bool) -> Rgb {
        if high { self.high_risk } else { self.low_risk }
    }

    pub fn risk_tint(&self, high: bool) -> Rgb {
        if high {
            self.high_risk_tint
        } else {
            self.low_risk_tint
        }
    }

    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "cardioshield" | "default" => Ok(Self::cardioshield()),
            "monochrome" | "print" => Ok(Self::monochrome()),
            other => Err(ReportError::Config(format!("unknown theme '{other}'"))),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::cardioshield()
    }
}
