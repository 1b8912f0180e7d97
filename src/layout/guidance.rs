use crate::content::{self, GuidanceSection};
use crate::ir::RiskLevel;
use crate::text_metrics::{FontFace, line_height, measure_text_width, wrap_text};

use super::widgets::{section_heading, text};
use super::{PageFlow, PageRole};

const SECTION_RULE_LENGTH: f32 = 45.0;
const ITEM_TEXT_SIZE: f32 = 10.0;
const ITEM_INDENT: f32 = 5.0;
const ITEMS_OFFSET: f32 = 10.0;
const BULLET: &str = "\u{2022}  ";

/// Wrapped lines of one guidance item; continuation lines hang under the text.
struct ItemLines(Vec<String>);

impl ItemLines {
    fn height(&self, item_gap: f32) -> f32 {
        item_gap + self.0.len().saturating_sub(1) as f32 * line_height(ITEM_TEXT_SIZE)
    }
}

pub(super) fn layout_guidance(flow: &mut PageFlow<'_>, level: RiskLevel) {
    if flow.current_role() != PageRole::Guidance {
        flow.start_guidance_page();
    }
    for section in content::GUIDANCE.iter() {
        guidance_section(flow, section, level);
    }
}

fn guidance_section(flow: &mut PageFlow<'_>, section: &GuidanceSection, level: RiskLevel) {
    let config = flow.config();
    let theme = flow.theme();
    let x = config.margin_x + 5.0;
    let item_x = x + ITEM_INDENT;
    let bullet = measure_text_width(BULLET, ITEM_TEXT_SIZE, FontFace::Regular);
    let max_width = config.page_width - item_x - config.margin_x - 5.0 - bullet;

    let items: Vec<ItemLines> = section
        .items(level)
        .iter()
        .map(|item| ItemLines(wrap_text(item, ITEM_TEXT_SIZE, FontFace::Regular, max_width)))
        .collect();
    // Heading baseline down to the last item baseline.
    let extent = ITEMS_OFFSET
        + items
            .iter()
            .map(|item| item.height(config.guidance_item_gap))
            .sum::<f32>()
        - config.guidance_item_gap;
    flow.ensure_space(extent);

    let y = flow.y();
    section_heading(flow.content(), theme, x, y, &section.heading(), SECTION_RULE_LENGTH);
    flow.advance(ITEMS_OFFSET);

    let leading = line_height(ITEM_TEXT_SIZE);
    for item in &items {
        let body = (item.0.len().saturating_sub(1)) as f32 * leading;
        if flow.ensure_space(body) {
            log::debug!("guidance section '{}' continues on a new page", section.title);
        }
        let y = flow.y();
        for (idx, line) in item.0.iter().enumerate() {
            // Continuation lines align with the text after the bullet.
            let (line_x, line) = if idx == 0 {
                (item_x, format!("{BULLET}{line}"))
            } else {
                (item_x + bullet, line.clone())
            };
            text(
                flow.content(),
                line_x,
                y + idx as f32 * leading,
                &line,
                FontFace::Regular,
                ITEM_TEXT_SIZE,
                theme.body_text,
            );
        }
        flow.advance(item.height(config.guidance_item_gap));
    }
    flow.advance(config.guidance_section_gap);
}
