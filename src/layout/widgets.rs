use crate::config::LayoutConfig;
use crate::text_metrics::{FontFace, PT_TO_MM, measure_text_width};
use crate::theme::{Rgb, Theme};

use super::{Paint, Primitive, TextRun};

const FIELD_LABEL_SIZE: f32 = 7.0;
const FIELD_VALUE_SIZE: f32 = 11.0;
const HEADING_SIZE: f32 = 12.0;
const CHECK_LABEL_SIZE: f32 = 10.0;
const CHECK_BOX_TEXT_SIZE: f32 = 8.0;
pub(super) const RULE_WIDTH: f32 = 0.5;

pub(super) fn text(
    out: &mut Vec<Primitive>,
    x: f32,
    y: f32,
    text: &str,
    face: FontFace,
    size: f32,
    color: Rgb,
) {
    out.push(Primitive::Text(TextRun {
        x,
        y,
        text: text.to_string(),
        face,
        size,
        color,
        angle: 0.0,
        width: measure_text_width(text, size, face),
    }));
}

pub(super) fn centered_text(
    out: &mut Vec<Primitive>,
    center_x: f32,
    y: f32,
    value: &str,
    face: FontFace,
    size: f32,
    color: Rgb,
) {
    let width = measure_text_width(value, size, face);
    text(out, center_x - width / 2.0, y, value, face, size, color);
}

/// Text centred on (cx, cy) along a baseline rotated counter-clockwise.
pub(super) fn rotated_centered_text(
    out: &mut Vec<Primitive>,
    center: (f32, f32),
    angle: f32,
    value: &str,
    face: FontFace,
    size: f32,
    color: Rgb,
) {
    let width = measure_text_width(value, size, face);
    let rad = angle.to_radians();
    out.push(Primitive::Text(TextRun {
        x: center.0 - width / 2.0 * rad.cos(),
        y: center.1 + width / 2.0 * rad.sin(),
        text: value.to_string(),
        face,
        size,
        color,
        angle,
        width,
    }));
}

pub(super) fn rect(
    out: &mut Vec<Primitive>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    paint: Paint,
) {
    out.push(Primitive::Rect {
        x,
        y,
        width,
        height,
        paint,
    });
}

pub(super) fn line(
    out: &mut Vec<Primitive>,
    from: (f32, f32),
    to: (f32, f32),
    color: Rgb,
    width: f32,
) {
    out.push(Primitive::Line {
        x1: from.0,
        y1: from.1,
        x2: to.0,
        y2: to.1,
        color,
        width,
    });
}

/// Section title with a short accent rule under it.
pub(super) fn section_heading(
    out: &mut Vec<Primitive>,
    theme: &Theme,
    x: f32,
    y: f32,
    title: &str,
    rule_length: f32,
) {
    text(out, x, y, title, FontFace::Bold, HEADING_SIZE, theme.primary);
    line(out, (x, y + 2.0), (x + rule_length, y + 2.0), theme.accent, RULE_WIDTH);
}

pub(super) struct Field<'a> {
    pub label: &'a str,
    pub value: Option<&'a str>,
    pub width: f32,
    pub highlight: bool,
}

impl<'a> Field<'a> {
    pub(super) fn new(label: &'a str, value: Option<&'a str>, width: f32) -> Self {
        Self {
            label,
            value,
            width,
            highlight: false,
        }
    }

    pub(super) fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }
}

/// Labelled value box. An empty value leaves the box body blank.
pub(super) fn field_box(
    out: &mut Vec<Primitive>,
    theme: &Theme,
    config: &LayoutConfig,
    x: f32,
    y: f32,
    field: &Field<'_>,
) {
    let height = config.field_height;
    let (body, border, band, label_color) = if field.highlight {
        (theme.highlight_fill, theme.accent, theme.accent, Rgb::WHITE)
    } else {
        (Rgb::WHITE, theme.border, theme.label_background, theme.field_label)
    };
    rect(out, x, y, field.width, height, Paint::fill(body));
    rect(out, x, y, field.width, height, Paint::stroke(border, RULE_WIDTH));
    rect(out, x, y, field.width, config.field_label_band, Paint::fill(band));
    text(
        out,
        x + 3.0,
        y + 5.0,
        &field.label.to_uppercase(),
        FontFace::Bold,
        FIELD_LABEL_SIZE,
        label_color,
    );
    if let Some(value) = field.value.filter(|value| !value.is_empty()) {
        text(
            out,
            x + 3.0,
            y + 14.0,
            value,
            FontFace::Regular,
            FIELD_VALUE_SIZE,
            theme.field_value,
        );
    }
}

/// "label [YES] [NO]" indicator; the selected box is filled.
pub(super) fn check_pair(
    out: &mut Vec<Primitive>,
    theme: &Theme,
    x: f32,
    y: f32,
    label: &str,
    yes: bool,
) {
    text(out, x, y, label, FontFace::Bold, CHECK_LABEL_SIZE, theme.check_label);

    let (yes_paint, yes_text) = if yes {
        (
            Paint::fill_and_stroke(theme.accent, theme.border, RULE_WIDTH),
            Rgb::WHITE,
        )
    } else {
        (Paint::stroke(theme.border, RULE_WIDTH), theme.check_muted)
    };
    rect(out, x + 40.0, y - 4.0, 12.0, 6.0, yes_paint);
    text(out, x + 42.0, y, "YES", FontFace::Bold, CHECK_BOX_TEXT_SIZE, yes_text);

    let (no_paint, no_text) = if yes {
        (Paint::stroke(theme.border, RULE_WIDTH), theme.check_muted)
    } else {
        (
            Paint::fill_and_stroke(theme.check_no_fill, theme.border, RULE_WIDTH),
            theme.check_no_text,
        )
    };
    rect(out, x + 55.0, y - 4.0, 10.0, 6.0, no_paint);
    text(out, x + 57.0, y, "NO", FontFace::Bold, CHECK_BOX_TEXT_SIZE, no_text);
}

/// Cap height of Helvetica in millimetres, for vertically centring glyphs.
pub(super) fn cap_height(size: f32) -> f32 {
    size * 0.718 * PT_TO_MM
}
