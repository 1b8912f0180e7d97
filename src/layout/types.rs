use serde::Serialize;

use crate::text_metrics::FontFace;
use crate::theme::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paint {
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub line_width: f32,
}

impl Paint {
    pub fn fill(color: Rgb) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
        }
    }

    pub fn stroke(color: Rgb, line_width: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
        }
    }

    pub fn fill_and_stroke(fill: Rgb, stroke: Rgb, line_width: f32) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            line_width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    /// Baseline start, already resolved from the requested alignment.
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
    /// Counter-clockwise rotation around (x, y) in degrees.
    pub angle: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Text(TextRun),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        paint: Paint,
    },
    RoundedRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        paint: Paint,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        paint: Paint,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
}

impl Primitive {
    /// Axis-aligned bounds `(x, y, width, height)`; rotated text reports the
    /// box of its rotated baseline.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match self {
            Primitive::Text(run) => {
                let ascent = run.size * crate::text_metrics::PT_TO_MM * 0.75;
                if run.angle == 0.0 {
                    (run.x, run.y - ascent, run.width, ascent)
                } else {
                    let rad = run.angle.to_radians();
                    let x2 = run.x + run.width * rad.cos();
                    let y2 = run.y - run.width * rad.sin();
                    (
                        run.x.min(x2),
                        run.y.min(y2),
                        (x2 - run.x).abs(),
                        (y2 - run.y).abs(),
                    )
                }
            }
            Primitive::Rect {
                x, y, width, height, ..
            }
            | Primitive::RoundedRect {
                x, y, width, height, ..
            } => (*x, *y, *width, *height),
            Primitive::Circle { cx, cy, r, .. } => (cx - r, cy - r, r * 2.0, r * 2.0),
            Primitive::Line { x1, y1, x2, y2, .. } => {
                (x1.min(*x2), y1.min(*y2), (x2 - x1).abs(), (y2 - y1).abs())
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Primitive::Text(run) => Some(run.text.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRole {
    Summary,
    Guidance,
}

/// Primitives are kept in paint order, split into page chrome (border,
/// header, footer) and flowed content so overflow checks can ignore chrome.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub role: PageRole,
    pub chrome: Vec<Primitive>,
    pub content: Vec<Primitive>,
    pub footer: Vec<Primitive>,
}

impl Page {
    pub fn new(role: PageRole) -> Self {
        Self {
            role,
            chrome: Vec::new(),
            content: Vec::new(),
            footer: Vec::new(),
        }
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.chrome
            .iter()
            .chain(self.content.iter())
            .chain(self.footer.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives().filter_map(Primitive::text)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    pub report_id: String,
    pub date: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::texts)
    }
}
