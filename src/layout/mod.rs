mod cursor;
mod guidance;
mod summary_page;
pub(crate) mod types;
mod widgets;

pub use types::*;

use cursor::LayoutCursor;
use guidance::layout_guidance;
use summary_page::layout_summary_page;
use widgets::{RULE_WIDTH, centered_text, rect, rotated_centered_text, text};

use crate::config::LayoutConfig;
use crate::content;
use crate::error::Result;
use crate::ir::{PatientData, RiskResult};
use crate::text_metrics::FontFace;
use crate::theme::{Rgb, Theme};

const WATERMARK_SIZE: f32 = 60.0;
const GUIDANCE_TITLE_SIZE: f32 = 14.0;
const FOOTER_TEXT_SIZE: f32 = 8.0;

/// Everything a page needs besides the patient records.
pub struct LayoutContext<'a> {
    pub theme: &'a Theme,
    pub config: &'a LayoutConfig,
    pub report_id: &'a str,
    pub date: &'a str,
}

/// Lays out the full report. The result depends only on the arguments.
pub fn compute_layout(
    patient: &PatientData,
    result: &RiskResult,
    ctx: &LayoutContext<'_>,
) -> Result<Document> {
    ctx.config.validate()?;

    let mut flow = PageFlow::new(ctx);
    layout_summary_page(&mut flow, patient, result);
    layout_guidance(&mut flow, result.classification);
    let pages = flow.finish();

    log::debug!(
        "laid out report {} on {} pages ({} primitives)",
        ctx.report_id,
        pages.len(),
        pages.iter().map(|page| page.primitives().count()).sum::<usize>()
    );

    Ok(Document {
        width: ctx.config.page_width,
        height: ctx.config.page_height,
        report_id: ctx.report_id.to_string(),
        date: ctx.date.to_string(),
        pages,
    })
}

/// Owns the pages being built and the cursor on the last one.
pub(super) struct PageFlow<'a> {
    ctx: &'a LayoutContext<'a>,
    pages: Vec<Page>,
    cursor: LayoutCursor,
}

impl<'a> PageFlow<'a> {
    fn new(ctx: &'a LayoutContext<'a>) -> Self {
        let config = ctx.config;
        let mut page = Page::new(PageRole::Summary);
        summary_chrome(&mut page.chrome, ctx);
        Self {
            ctx,
            pages: vec![page],
            cursor: LayoutCursor::new(config.content_top, config.content_bottom()),
        }
    }

    pub(super) fn theme(&self) -> &'a Theme {
        self.ctx.theme
    }

    pub(super) fn config(&self) -> &'a LayoutConfig {
        self.ctx.config
    }

    pub(super) fn y(&self) -> f32 {
        self.cursor.y()
    }

    pub(super) fn advance(&mut self, dy: f32) {
        self.cursor.advance(dy);
    }

    pub(super) fn content(&mut self) -> &mut Vec<Primitive> {
        let last = self.pages.len() - 1;
        &mut self.pages[last].content
    }

    pub(super) fn current_role(&self) -> PageRole {
        self.pages
            .last()
            .map(|page| page.role)
            .unwrap_or(PageRole::Summary)
    }

    /// Starts a guidance page and moves the cursor to its top.
    pub(super) fn start_guidance_page(&mut self) {
        let mut page = Page::new(PageRole::Guidance);
        let continued = self
            .pages
            .iter()
            .any(|page| page.role == PageRole::Guidance);
        guidance_chrome(&mut page.chrome, self.ctx, continued);
        self.pages.push(page);
        let config = self.ctx.config;
        self.cursor = LayoutCursor::new(config.guidance_top, config.content_bottom());
        log::debug!("started page {} (guidance)", self.pages.len());
    }

    /// Breaks to a new page when a block of `height` would cross the footer.
    /// A block taller than a fresh page is placed anyway.
    pub(super) fn ensure_space(&mut self, height: f32) -> bool {
        if self.cursor.fits(height) || self.cursor.at_top() {
            return false;
        }
        log::debug!(
            "block of {height:.1}mm does not fit below y={:.1}, breaking page",
            self.cursor.y()
        );
        self.start_guidance_page();
        true
    }

    fn finish(mut self) -> Vec<Page> {
        let total = self.pages.len();
        for (idx, page) in self.pages.iter_mut().enumerate() {
            footer(&mut page.footer, self.ctx, page.role, idx + 1, total);
        }
        self.pages
    }
}

fn page_border(out: &mut Vec<Primitive>, theme: &Theme, config: &LayoutConfig) {
    let inset = config.page_inset;
    rect(
        out,
        inset,
        inset,
        config.page_width - inset * 2.0,
        config.page_height - inset * 2.0,
        Paint::stroke(theme.border, RULE_WIDTH),
    );
}

fn summary_chrome(out: &mut Vec<Primitive>, ctx: &LayoutContext<'_>) {
    let theme = ctx.theme;
    let config = ctx.config;
    let inset = config.page_inset;

    rotated_centered_text(
        out,
        (config.page_width / 2.0, config.page_height / 2.0),
        45.0,
        content::WATERMARK,
        FontFace::Bold,
        WATERMARK_SIZE,
        theme.watermark,
    );
    page_border(out, theme, config);
    rect(
        out,
        inset,
        inset,
        config.page_width - inset * 2.0,
        config.header_height,
        Paint::fill(theme.primary),
    );

    let title_x = config.margin_x + 5.0;
    text(out, title_x, 20.0, content::BRAND_TITLE, FontFace::Bold, 22.0, Rgb::WHITE);
    text(out, title_x, 28.0, content::BRAND_SUBTITLE, FontFace::Bold, 10.0, theme.accent);

    let badge_x = config.page_width - config.margin_x - 65.0;
    out.push(Primitive::RoundedRect {
        x: badge_x,
        y: 12.0,
        width: 65.0,
        height: 20.0,
        radius: 2.0,
        paint: Paint::fill(theme.badge_background),
    });
    text(out, badge_x + 5.0, 19.0, "REPORT ID", FontFace::Bold, 8.0, theme.badge_label);
    text(out, badge_x + 5.0, 27.0, "DATE", FontFace::Bold, 8.0, theme.badge_label);
    text(out, badge_x + 25.0, 19.0, ctx.report_id, FontFace::Bold, 10.0, Rgb::WHITE);
    text(out, badge_x + 25.0, 27.0, ctx.date, FontFace::Bold, 10.0, Rgb::WHITE);
}

fn guidance_chrome(out: &mut Vec<Primitive>, ctx: &LayoutContext<'_>, continued: bool) {
    let theme = ctx.theme;
    let config = ctx.config;
    let inset = config.page_inset;

    rect(
        out,
        inset,
        inset,
        config.page_width - inset * 2.0,
        config.guidance_header_height,
        Paint::fill(theme.primary),
    );
    let title = if continued {
        format!("{} (CONTINUED)", content::GUIDANCE_TITLE)
    } else {
        content::GUIDANCE_TITLE.to_string()
    };
    centered_text(
        out,
        config.page_width / 2.0,
        inset + config.guidance_header_height * 0.6,
        &title,
        FontFace::Bold,
        GUIDANCE_TITLE_SIZE,
        Rgb::WHITE,
    );
    page_border(out, theme, config);
}

fn footer(
    out: &mut Vec<Primitive>,
    ctx: &LayoutContext<'_>,
    role: PageRole,
    number: usize,
    total: usize,
) {
    let theme = ctx.theme;
    let config = ctx.config;
    let band_top = config.page_height - config.footer_height;
    let baseline = config.page_height - 8.0;

    rect(
        out,
        0.0,
        band_top,
        config.page_width,
        config.footer_height,
        Paint::fill(theme.primary),
    );
    let message = match role {
        PageRole::Summary => content::REPORT_FOOTER,
        PageRole::Guidance => content::GUIDANCE_FOOTER,
    };
    centered_text(
        out,
        config.page_width / 2.0,
        baseline,
        message,
        FontFace::Regular,
        FOOTER_TEXT_SIZE,
        Rgb::WHITE,
    );
    if role == PageRole::Guidance {
        text(
            out,
            config.page_width - 20.0,
            baseline,
            &format!("Page {number} of {total}"),
            FontFace::Regular,
            FOOTER_TEXT_SIZE,
            Rgb::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Gender, OrdinalCode, RiskLevel};

    pub(crate) fn sample_patient() -> PatientData {
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

    pub(crate) fn sample_result(level: RiskLevel) -> RiskResult {
        RiskResult {
            classification: level,
            probability: 78.0,
            bmi: 27.7,
        }
    }

    fn layout(level: RiskLevel, config: &LayoutConfig) -> Document {
        let theme = Theme::cardioshield();
        let ctx = LayoutContext {
            theme: &theme,
            config,
            report_id: "CS-1234",
            date: "3/9/2024",
        };
        compute_layout(&sample_patient(), &sample_result(level), &ctx).unwrap()
    }

    #[test]
    fn default_report_has_two_pages() {
        let config = LayoutConfig::default();
        for level in [RiskLevel::High, RiskLevel::Low] {
            let doc = layout(level, &config);
            assert_eq!(doc.page_count(), 2);
            assert_eq!(doc.pages[0].role, PageRole::Summary);
            assert_eq!(doc.pages[1].role, PageRole::Guidance);
        }
    }

    #[test]
    fn content_stays_above_footer_band() {
        let config = LayoutConfig::default();
        let band_top = config.page_height - config.footer_height;
        for level in [RiskLevel::High, RiskLevel::Low] {
            let doc = layout(level, &config);
            for page in &doc.pages {
                for primitive in &page.content {
                    let (_, y, _, h) = primitive.bounds();
                    assert!(y + h <= band_top, "{primitive:?} enters the footer");
                }
            }
        }
    }

    #[test]
    fn every_primitive_is_on_the_page() {
        let config = LayoutConfig::default();
        let doc = layout(RiskLevel::High, &config);
        for page in &doc.pages {
            for primitive in page.primitives() {
                let (x, y, w, h) = primitive.bounds();
                assert!(x >= 0.0 && y >= 0.0, "{primitive:?}");
                assert!(x + w <= doc.width + 0.01 && y + h <= doc.height + 0.01, "{primitive:?}");
            }
        }
    }

    #[test]
    fn short_page_flows_notes_onto_next_page() {
        let config = LayoutConfig {
            page_height: 250.0,
            ..LayoutConfig::default()
        };
        let doc = layout(RiskLevel::High, &config);
        assert!(!doc.pages[0].contains_text("MEDICAL NOTES / RECOMMENDATION"));
        assert!(doc.pages[1].contains_text("MEDICAL NOTES / RECOMMENDATION"));
        assert!(doc.page_count() >= 2);
        let last = doc.pages.last().unwrap();
        let expected = format!("Page {} of {}", doc.page_count(), doc.page_count());
        assert!(last.contains_text(&expected));
    }

    #[test]
    fn tight_guidance_spacing_adds_continuation_page() {
        let config = LayoutConfig {
            guidance_item_gap: 14.0,
            guidance_section_gap: 10.0,
            ..LayoutConfig::default()
        };
        let doc = layout(RiskLevel::Low, &config);
        assert_eq!(doc.page_count(), 3);
        assert!(
            doc.pages[2]
                .texts()
                .any(|text| text.ends_with("(CONTINUED)"))
        );
        assert!(doc.pages[2].contains_text("Page 3 of 3"));
        assert!(doc.pages[1].contains_text("Page 2 of 3"));
    }

    #[test]
    fn invalid_grid_is_rejected_before_layout() {
        let config = LayoutConfig {
            page_width: 120.0,
            ..LayoutConfig::default()
        };
        let theme = Theme::cardioshield();
        let ctx = LayoutContext {
            theme: &theme,
            config: &config,
            report_id: "CS-1",
            date: "1/1/2024",
        };
        let err = compute_layout(&sample_patient(), &sample_result(RiskLevel::Low), &ctx);
        assert!(matches!(err, Err(crate::error::ReportError::Config(_))));
    }
}
