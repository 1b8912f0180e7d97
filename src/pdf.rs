//! PDF emission of a laid-out [`Document`] using the base-14 Helvetica faces.

use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::{Document, Paint, Primitive, TextRun};
use crate::text_metrics::FontFace;

const MM_TO_PT: f32 = 72.0 / 25.4;
/// Control-point offset approximating a quarter circle with one cubic.
const KAPPA: f32 = 0.552_284_8;

const FONTS: [(FontFace, &str); 3] = [
    (FontFace::Regular, "F1"),
    (FontFace::Bold, "F2"),
    (FontFace::Italic, "F3"),
];

fn font_name(face: FontFace) -> &'static str {
    FONTS
        .iter()
        .find(|(candidate, _)| *candidate == face)
        .map(|(_, name)| *name)
        .unwrap_or("F1")
}

/// Converts layout millimetres (top-left origin) into PDF points
/// (bottom-left origin).
struct PageSpace {
    height: f32,
}

impl PageSpace {
    fn x(&self, x: f32) -> f32 {
        x * MM_TO_PT
    }

    fn y(&self, y: f32) -> f32 {
        (self.height - y) * MM_TO_PT
    }

    fn len(&self, value: f32) -> f32 {
        value * MM_TO_PT
    }
}

pub fn render_pdf(document: &Document, compress: bool) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();
    let font_ids: Vec<(FontFace, Ref)> = FONTS.iter().map(|(face, _)| (*face, alloc())).collect();
    let page_ids: Vec<Ref> = document.pages.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = document.pages.iter().map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    let title = format!("CardioShield Report {}", document.report_id);
    pdf.document_info(info_id)
        .title(TextStr(&title))
        .producer(TextStr(concat!("cardioshield-report ", env!("CARGO_PKG_VERSION"))));

    for (face, id) in &font_ids {
        pdf.type1_font(*id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let space = PageSpace {
        height: document.height,
    };
    let media_box = Rect::new(
        0.0,
        0.0,
        document.width * MM_TO_PT,
        document.height * MM_TO_PT,
    );

    for (idx, page) in document.pages.iter().enumerate() {
        let mut content = Content::new();
        for primitive in page.primitives() {
            draw(&mut content, &space, primitive);
        }
        let raw = content.finish();
        if compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[idx], &compressed)
                .filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_ids[idx], &raw);
        }

        let mut pdf_page = pdf.page(page_ids[idx]);
        pdf_page
            .media_box(media_box)
            .parent(pages_id)
            .contents(content_ids[idx]);
        let mut resources = pdf_page.resources();
        let mut fonts = resources.fonts();
        for (face, id) in &font_ids {
            fonts.pair(Name(font_name(*face).as_bytes()), *id);
        }
        fonts.finish();
        resources.finish();
        pdf_page.finish();
    }

    let bytes = pdf.finish();
    log::debug!(
        "emitted {} page PDF ({} bytes)",
        document.pages.len(),
        bytes.len()
    );
    bytes
}

fn draw(content: &mut Content, space: &PageSpace, primitive: &Primitive) {
    match primitive {
        Primitive::Text(run) => draw_text(content, space, run),
        Primitive::Rect {
            x,
            y,
            width,
            height,
            paint,
        } => {
            content.save_state();
            apply_paint(content, space, paint);
            content.rect(
                space.x(*x),
                space.y(*y + *height),
                space.len(*width),
                space.len(*height),
            );
            finish_path(content, paint);
            content.restore_state();
        }
        Primitive::RoundedRect {
            x,
            y,
            width,
            height,
            radius,
            paint,
        } => {
            content.save_state();
            apply_paint(content, space, paint);
            rounded_rect_path(content, space, (*x, *y, *width, *height), *radius);
            finish_path(content, paint);
            content.restore_state();
        }
        Primitive::Circle { cx, cy, r, paint } => {
            content.save_state();
            apply_paint(content, space, paint);
            circle_path(content, space, *cx, *cy, *r);
            finish_path(content, paint);
            content.restore_state();
        }
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        } => {
            content.save_state();
            let (r, g, b) = color.to_unit();
            content.set_stroke_rgb(r, g, b);
            content.set_line_width(space.len(*width));
            content.move_to(space.x(*x1), space.y(*y1));
            content.line_to(space.x(*x2), space.y(*y2));
            content.stroke();
            content.restore_state();
        }
    }
}

fn draw_text(content: &mut Content, space: &PageSpace, run: &TextRun) {
    let bytes = to_winansi_bytes(&run.text);
    let (r, g, b) = run.color.to_unit();
    let (sin, cos) = run.angle.to_radians().sin_cos();
    content.save_state();
    content.set_fill_rgb(r, g, b);
    content
        .begin_text()
        .set_font(Name(font_name(run.face).as_bytes()), run.size)
        .set_text_matrix([cos, sin, -sin, cos, space.x(run.x), space.y(run.y)])
        .show(Str(&bytes))
        .end_text();
    content.restore_state();
}

fn apply_paint(content: &mut Content, space: &PageSpace, paint: &Paint) {
    if let Some(fill) = paint.fill {
        let (r, g, b) = fill.to_unit();
        content.set_fill_rgb(r, g, b);
    }
    if let Some(stroke) = paint.stroke {
        let (r, g, b) = stroke.to_unit();
        content.set_stroke_rgb(r, g, b);
        content.set_line_width(space.len(paint.line_width));
    }
}

fn finish_path(content: &mut Content, paint: &Paint) {
    match (paint.fill.is_some(), paint.stroke.is_some()) {
        (true, true) => {
            content.fill_nonzero_and_stroke();
        }
        (true, false) => {
            content.fill_nonzero();
        }
        (false, true) => {
            content.stroke();
        }
        (false, false) => {
            content.end_path();
        }
    }
}

fn rounded_rect_path(
    content: &mut Content,
    space: &PageSpace,
    rect: (f32, f32, f32, f32),
    radius: f32,
) {
    let (x, y, w, h) = rect;
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    let k = r * KAPPA;
    let p = |px: f32, py: f32| (space.x(px), space.y(py));

    let (sx, sy) = p(x + r, y);
    content.move_to(sx, sy);
    let (lx, ly) = p(x + w - r, y);
    content.line_to(lx, ly);
    curve(content, p(x + w - r + k, y), p(x + w, y + r - k), p(x + w, y + r));
    let (lx, ly) = p(x + w, y + h - r);
    content.line_to(lx, ly);
    curve(content, p(x + w, y + h - r + k), p(x + w - r + k, y + h), p(x + w - r, y + h));
    let (lx, ly) = p(x + r, y + h);
    content.line_to(lx, ly);
    curve(content, p(x + r - k, y + h), p(x, y + h - r + k), p(x, y + h - r));
    let (lx, ly) = p(x, y + r);
    content.line_to(lx, ly);
    curve(content, p(x, y + r - k), p(x + r - k, y), p(x + r, y));
    content.close_path();
}

fn circle_path(content: &mut Content, space: &PageSpace, cx: f32, cy: f32, r: f32) {
    let k = r * KAPPA;
    let p = |px: f32, py: f32| (space.x(px), space.y(py));

    let (sx, sy) = p(cx + r, cy);
    content.move_to(sx, sy);
    curve(content, p(cx + r, cy + k), p(cx + k, cy + r), p(cx, cy + r));
    curve(content, p(cx - k, cy + r), p(cx - r, cy + k), p(cx - r, cy));
    curve(content, p(cx - r, cy - k), p(cx - k, cy - r), p(cx, cy - r));
    curve(content, p(cx + k, cy - r), p(cx + r, cy - k), p(cx + r, cy));
    content.close_path();
}

fn curve(content: &mut Content, c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) {
    content.cubic_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
}

/// Maps text onto WinAnsiEncoding; characters outside it become `?`.
fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{00A0}'..='\u{00FF}' => ch as u32 as u8,
            other => {
                log::warn!("character {other:?} has no WinAnsi code, printing '?'");
                b'?'
            }
        })
        .collect()
}
