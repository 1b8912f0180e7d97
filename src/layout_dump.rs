use crate::layout::{Document, PageRole, Primitive};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub report_id: String,
    pub date: String,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<PageDump>,
}

#[derive(Debug, Serialize)]
pub struct PageDump {
    pub number: usize,
    pub role: PageRole,
    pub chrome: Vec<PrimitiveDump>,
    pub content: Vec<PrimitiveDump>,
    pub footer: Vec<PrimitiveDump>,
}

/// A primitive flattened to its kind, bounding box and text (if any).
#[derive(Debug, Serialize)]
pub struct PrimitiveDump {
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PrimitiveDump {
    fn from_primitive(primitive: &Primitive) -> Self {
        let kind = match primitive {
            Primitive::Text(_) => "text",
            Primitive::Rect { .. } => "rect",
            Primitive::RoundedRect { .. } => "rounded_rect",
            Primitive::Circle { .. } => "circle",
            Primitive::Line { .. } => "line",
        };
        let (x, y, width, height) = primitive.bounds();
        PrimitiveDump {
            kind,
            x,
            y,
            width,
            height,
            text: primitive.text().map(str::to_string),
        }
    }
}

fn dump_all(primitives: &[Primitive]) -> Vec<PrimitiveDump> {
    primitives.iter().map(PrimitiveDump::from_primitive).collect()
}

impl LayoutDump {
    pub fn from_document(document: &Document) -> Self {
        let pages = document
            .pages
            .iter()
            .enumerate()
            .map(|(idx, page)| PageDump {
                number: idx + 1,
                role: page.role,
                chrome: dump_all(&page.chrome),
                content: dump_all(&page.content),
                footer: dump_all(&page.footer),
            })
            .collect();

        LayoutDump {
            report_id: document.report_id.clone(),
            date: document.date.clone(),
            width: document.width,
            height: document.height,
            pages,
        }
    }
}

pub fn write_layout_dump(path: &Path, document: &Document) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_document(document);
    serde_json::to_writer_pretty(writer, &dump)?;
    log::info!("wrote layout dump to {}", path.display());
    Ok(())
}
