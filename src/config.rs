use crate::error::{ReportError, Result};
use crate::theme::{Rgb, Theme, parse_color};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page geometry and the fixed spacing of the report sections. All lengths
/// are millimetres on a top-left origin canvas; font sizes are points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub page_inset: f32,
    pub margin_x: f32,
    pub header_height: f32,
    pub guidance_header_height: f32,
    pub footer_height: f32,
    pub footer_gap: f32,
    pub columns: [f32; 4],
    pub field_width: f32,
    pub last_field_width: f32,
    pub wide_field_width: f32,
    pub half_field_width: f32,
    pub field_height: f32,
    pub field_label_band: f32,
    pub field_row_gap: f32,
    pub content_top: f32,
    pub heading_gap: f32,
    pub section_gap: f32,
    pub check_heading_gap: f32,
    pub check_columns: [f32; 2],
    pub check_row_gap: f32,
    pub panel_height: f32,
    pub panel_gap: f32,
    pub notes_heading_gap: f32,
    pub notes_min_height: f32,
    pub guidance_top: f32,
    pub guidance_item_gap: f32,
    pub guidance_section_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            page_inset: 5.0,
            margin_x: 10.0,
            header_height: 35.0,
            guidance_header_height: 20.0,
            footer_height: 20.0,
            footer_gap: 4.0,
            columns: [10.0, 60.0, 110.0, 160.0],
            field_width: 45.0,
            last_field_width: 40.0,
            wide_field_width: 90.0,
            half_field_width: 95.0,
            field_height: 18.0,
            field_label_band: 7.0,
            field_row_gap: 7.0,
            content_top: 50.0,
            heading_gap: 8.0,
            section_gap: 7.0,
            check_heading_gap: 10.0,
            check_columns: [15.0, 110.0],
            check_row_gap: 12.0,
            panel_height: 50.0,
            panel_gap: 12.0,
            notes_heading_gap: 5.0,
            notes_min_height: 24.0,
            guidance_top: 40.0,
            guidance_item_gap: 7.0,
            guidance_section_gap: 5.0,
        }
    }
}

impl LayoutConfig {
    /// Lowest y a content block may reach before the footer band.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.footer_height - self.footer_gap
    }

    /// Checks the fixed grid against the page before anything is laid out.
    pub fn validate(&self) -> Result<()> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(ReportError::Config("page size must be positive".to_string()));
        }
        let right_edge = self.page_width - self.page_inset;
        let widest = [
            self.columns[0] + self.field_width,
            self.columns[1] + self.field_width,
            self.columns[2] + self.wide_field_width,
            self.columns[3] + self.last_field_width,
            self.columns[0] + self.half_field_width,
            self.columns[2] + self.half_field_width,
        ];
        if let Some(edge) = widest.iter().copied().find(|edge| *edge > right_edge) {
            return Err(ReportError::Config(format!(
                "field grid reaches {edge:.1}mm, page content ends at {right_edge:.1}mm"
            )));
        }
        if self.content_bottom() <= self.guidance_top || self.content_bottom() <= self.content_top
        {
            return Err(ReportError::Config(
                "footer leaves no room for page content".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// chrono format string for the date printed in the report badge.
    pub date_format: String,
    /// Raster pixels per millimetre for PNG previews.
    pub png_scale: f32,
    pub compress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y".to_string(),
            png_scale: 4.0,
            compress: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    primary_color: Option<String>,
    accent_color: Option<String>,
    border_color: Option<String>,
    label_background: Option<String>,
    high_risk_color: Option<String>,
    low_risk_color: Option<String>,
    body_text_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    page_size: Option<String>,
    page_width: Option<f32>,
    page_height: Option<f32>,
    margin_x: Option<f32>,
    footer_height: Option<f32>,
    columns: Option<[f32; 4]>,
    guidance_item_gap: Option<f32>,
    guidance_section_gap: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    date_format: Option<String>,
    png_scale: Option<f32>,
    compress: Option<bool>,
}

fn color_override(target: &mut Rgb, value: Option<String>, key: &str) -> Result<()> {
    if let Some(raw) = value {
        *target = parse_color(&raw)
            .ok_or_else(|| ReportError::Config(format!("{key}: unsupported colour '{raw}'")))?;
    }
    Ok(())
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|err| ReportError::Config(format!("{}: {err}", path.display())))?;
    parse_config(&contents)
}

/// Parses a JSON5 config document on top of the defaults.
pub fn parse_config(contents: &str) -> Result<Config> {
    let parsed: ConfigFile =
        json5::from_str(contents).map_err(|err| ReportError::Config(err.to_string()))?;
    let mut config = Config::default();

    if let Some(name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(name)?;
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        color_override(&mut theme.primary, vars.primary_color, "primaryColor")?;
        color_override(&mut theme.accent, vars.accent_color, "accentColor")?;
        color_override(&mut theme.border, vars.border_color, "borderColor")?;
        color_override(&mut theme.label_background, vars.label_background, "labelBackground")?;
        color_override(&mut theme.high_risk, vars.high_risk_color, "highRiskColor")?;
        color_override(&mut theme.low_risk, vars.low_risk_color, "lowRiskColor")?;
        color_override(&mut theme.body_text, vars.body_text_color, "bodyTextColor")?;
        color_override(&mut theme.background, vars.background, "background")?;
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(size) = layout.page_size.as_deref() {
            let (width, height) = page_size(size)?;
            target.page_width = width;
            target.page_height = height;
        }
        if let Some(v) = layout.page_width {
            target.page_width = v;
        }
        if let Some(v) = layout.page_height {
            target.page_height = v;
        }
        if let Some(v) = layout.margin_x {
            target.margin_x = v;
        }
        if let Some(v) = layout.footer_height {
            target.footer_height = v;
        }
        if let Some(v) = layout.columns {
            target.columns = v;
        }
        if let Some(v) = layout.guidance_item_gap {
            target.guidance_item_gap = v;
        }
        if let Some(v) = layout.guidance_section_gap {
            target.guidance_section_gap = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.date_format {
            config.render.date_format = v;
        }
        if let Some(v) = render.png_scale {
            config.render.png_scale = v;
        }
        if let Some(v) = render.compress {
            config.render.compress = v;
        }
    }

    config.layout.validate()?;
    Ok(config)
}

fn page_size(name: &str) -> Result<(f32, f32)> {
    match name.to_ascii_lowercase().as_str() {
        "a4" => Ok((210.0, 297.0)),
        "letter" => Ok((215.9, 279.4)),
        other => Err(ReportError::Config(format!("unknown page size '{other}'"))),
    }
}
