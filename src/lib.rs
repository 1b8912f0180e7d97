#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod identity;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod output;
pub mod pdf;
pub mod render;
pub mod report;
pub mod summary;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::{ReportError, Result};
pub use identity::{
    Clock, FixedClock, FixedReportIds, RandomReportIds, ReportIdSource, SystemClock,
};
pub use ir::{Gender, OrdinalCode, PatientData, ReportInput, RiskLevel, RiskResult};
pub use layout::{Document, LayoutContext, Page, PageRole, Primitive, compute_layout};
pub use output::{OutputMode, ReportArtifact, persist, report_filename, stream_to};
pub use pdf::render_pdf;
#[cfg(feature = "png")]
pub use render::render_png;
pub use render::{render_svg, render_svg_pages};
pub use report::{ReportGenerator, generate_report};
pub use summary::{ReportSummary, build_summary};
pub use theme::Theme;
