use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::identity::{Clock, RandomReportIds, ReportIdSource, SystemClock};
use crate::ir::{PatientData, RiskResult};
use crate::layout::{Document, LayoutContext, compute_layout};
use crate::output::{OutputMode, ReportArtifact, report_filename};
use crate::pdf::render_pdf;

/// Builds reports with an injected identifier source and clock.
pub struct ReportGenerator<I = RandomReportIds, C = SystemClock> {
    config: Config,
    ids: I,
    clock: C,
}

impl ReportGenerator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ids: RandomReportIds,
            clock: SystemClock,
        }
    }
}

impl<I: ReportIdSource, C: Clock> ReportGenerator<I, C> {
    pub fn with_id_source<J: ReportIdSource>(self, ids: J) -> ReportGenerator<J, C> {
        ReportGenerator {
            config: self.config,
            ids,
            clock: self.clock,
        }
    }

    pub fn with_clock<D: Clock>(self, clock: D) -> ReportGenerator<I, D> {
        ReportGenerator {
            config: self.config,
            ids: self.ids,
            clock,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lays out one report, drawing a fresh identifier and today's date.
    pub fn layout(&mut self, patient: &PatientData, result: &RiskResult) -> Result<Document> {
        self.layout_dated(patient, result).map(|(document, _)| document)
    }

    pub fn generate(
        &mut self,
        patient: &PatientData,
        result: &RiskResult,
        mode: OutputMode,
    ) -> Result<ReportArtifact> {
        let (document, date) = self.layout_dated(patient, result)?;
        Ok(self.package(&document, date, mode))
    }

    /// Emits an already laid-out document as a PDF artifact. `date` names
    /// the file in `File` mode.
    pub fn package(
        &self,
        document: &Document,
        date: NaiveDate,
        mode: OutputMode,
    ) -> ReportArtifact {
        let bytes = render_pdf(document, self.config.render.compress);
        log::info!(
            "generated report {} ({} pages, {} bytes)",
            document.report_id,
            document.page_count(),
            bytes.len()
        );
        match mode {
            OutputMode::File => ReportArtifact::File {
                filename: report_filename(date),
                bytes,
            },
            OutputMode::Stream => ReportArtifact::Stream { bytes },
        }
    }

    // One date feeds both the badge and the file name.
    fn layout_dated(
        &mut self,
        patient: &PatientData,
        result: &RiskResult,
    ) -> Result<(Document, NaiveDate)> {
        let report_id = self.ids.next_id();
        let date = self.clock.today();
        let display_date = format_date(date, &self.config.render.date_format)?;
        let ctx = LayoutContext {
            theme: &self.config.theme,
            config: &self.config.layout,
            report_id: &report_id,
            date: &display_date,
        };
        let document = compute_layout(patient, result, &ctx)?;
        Ok((document, date))
    }
}

fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| ReportError::Config(format!("invalid date format '{format}'")))?;
    Ok(out)
}

/// Generates a report with the default configuration, a random identifier
/// and the system date.
pub fn generate_report(
    patient: &PatientData,
    result: &RiskResult,
    mode: OutputMode,
) -> Result<ReportArtifact> {
    ReportGenerator::new(Config::default()).generate(patient, result, mode)
}
