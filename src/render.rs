use crate::layout::{Document, Page, Paint, Primitive, TextRun};
use crate::text_metrics::{FontFace, PT_TO_MM};
use crate::theme::{Rgb, Theme};

/// Renders one page as a standalone SVG in millimetre user units.
pub fn render_svg(document: &Document, page: &Page, theme: &Theme) -> String {
    let width = document.width;
    let height = document.height;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}mm\" height=\"{height}mm\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        color(theme.background)
    ));

    for primitive in page.primitives() {
        svg.push_str(&primitive_svg(primitive, theme));
    }

    svg.push_str("</svg>");
    svg
}

/// Renders every page, in order.
pub fn render_svg_pages(document: &Document, theme: &Theme) -> Vec<String> {
    document
        .pages
        .iter()
        .map(|page| render_svg(document, page, theme))
        .collect()
}

fn primitive_svg(primitive: &Primitive, theme: &Theme) -> String {
    match primitive {
        Primitive::Text(run) => text_svg(run, theme),
        Primitive::Rect {
            x,
            y,
            width,
            height,
            paint,
        } => format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" {}/>",
            paint_attrs(paint)
        ),
        Primitive::RoundedRect {
            x,
            y,
            width,
            height,
            radius,
            paint,
        } => format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\" {}/>",
            paint_attrs(paint)
        ),
        Primitive::Circle { cx, cy, r, paint } => format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" {}/>",
            paint_attrs(paint)
        ),
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            color: stroke,
            width,
        } => format!(
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{width:.2}\" stroke-linecap=\"round\"/>",
            color(*stroke)
        ),
    }
}

fn text_svg(run: &TextRun, theme: &Theme) -> String {
    let weight = if run.face == FontFace::Bold { "bold" } else { "normal" };
    let style = if run.face == FontFace::Italic { "italic" } else { "normal" };
    let transform = if run.angle != 0.0 {
        format!(
            " transform=\"rotate({:.2} {:.2} {:.2})\"",
            -run.angle, run.x, run.y
        )
    } else {
        String::new()
    };
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{:.3}\" font-weight=\"{weight}\" font-style=\"{style}\" fill=\"{}\" xml:space=\"preserve\"{transform}>{}</text>",
        run.x,
        run.y,
        escape_xml(&theme.font_family),
        run.size * PT_TO_MM,
        color(run.color),
        escape_xml(&run.text)
    )
}

fn paint_attrs(paint: &Paint) -> String {
    let fill = paint.fill.map(color).unwrap_or_else(|| "none".to_string());
    match paint.stroke {
        Some(stroke) => format!(
            "fill=\"{fill}\" stroke=\"{}\" stroke-width=\"{:.2}\"",
            color(stroke),
            paint.line_width
        ),
        None => format!("fill=\"{fill}\""),
    }
}

fn color(rgb: Rgb) -> String {
    format!("rgb({},{},{})", rgb.0, rgb.1, rgb.2)
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Rasterises an SVG page at `scale` pixels per millimetre.
#[cfg(feature = "png")]
pub fn render_png(svg: &str, scale: f32) -> crate::error::Result<Vec<u8>> {
    use crate::error::ReportError;

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| ReportError::Render(err.to_string()))?;
    // usvg converts the mm page size to CSS pixels (96 dpi).
    let px_per_mm = 96.0 / 25.4;
    let factor = scale / px_per_mm;
    let size = tree.size();
    let width = (size.width() * factor).ceil() as u32;
    let height = (size.height() * factor).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ReportError::Render(format!("cannot allocate {width}x{height} pixmap")))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(factor, factor),
        &mut pixmap_mut,
    );
    pixmap
        .encode_png()
        .map_err(|err| ReportError::Render(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PageRole, TextRun};

    fn document_with(primitives: Vec<Primitive>) -> Document {
        let mut page = Page::new(PageRole::Summary);
        page.content = primitives;
        Document {
            width: 210.0,
            height: 297.0,
            report_id: "CS-1".to_string(),
            date: "1/1/2024".to_string(),
            pages: vec![page],
        }
    }

    #[test]
    fn render_svg_basic() {
        let doc = document_with(vec![
            Primitive::Rect {
                x: 5.0,
                y: 5.0,
                width: 200.0,
                height: 35.0,
                paint: Paint::fill(Rgb(15, 23, 42)),
            },
            Primitive::Text(TextRun {
                x: 15.0,
                y: 20.0,
                text: "Heart & <Vitals>".to_string(),
                face: FontFace::Bold,
                size: 22.0,
                color: Rgb::WHITE,
                angle: 0.0,
                width: 60.0,
            }),
        ]);
        let svg = render_svg(&doc, &doc.pages[0], &Theme::cardioshield());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("viewBox=\"0 0 210 297\""));
        assert!(svg.contains("Heart &amp; &lt;Vitals&gt;"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("fill=\"rgb(15,23,42)\""));
    }

    #[test]
    fn stroke_only_shapes_have_no_fill() {
        let doc = document_with(vec![Primitive::Circle {
            cx: 35.0,
            cy: 200.0,
            r: 15.0,
            paint: Paint::stroke(Rgb(1, 2, 3), 0.5),
        }]);
        let svg = render_svg(&doc, &doc.pages[0], &Theme::cardioshield());
        assert!(svg.contains("fill=\"none\" stroke=\"rgb(1,2,3)\""));
    }

    #[test]
    fn rotated_text_gets_transform() {
        let doc = document_with(vec![Primitive::Text(TextRun {
            x: 50.0,
            y: 200.0,
            text: "CardioShield".to_string(),
            face: FontFace::Bold,
            size: 60.0,
            color: Rgb::WHITE,
            angle: 45.0,
            width: 130.0,
        })]);
        let svg = render_svg(&doc, &doc.pages[0], &Theme::cardioshield());
        assert!(svg.contains("rotate(-45.00 50.00 200.00)"));
    }
}
