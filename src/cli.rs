use crate::config::{Config, load_config};
use crate::identity::{
    Clock, FixedClock, FixedReportIds, RandomReportIds, ReportIdSource, SystemClock,
};
use crate::ir::{PatientData, ReportInput, RiskResult, parse_patient, parse_result};
use crate::layout_dump::write_layout_dump;
use crate::output::{OutputMode, persist, report_filename, stream_to};
use crate::render::render_svg_pages;
use crate::report::ReportGenerator;
use crate::summary::build_summary;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "cardioshield",
    version,
    about = "Render the CardioShield cardiac-risk report"
)]
pub struct Args {
    /// Navigation-state JSON ({"formData": .., "result": ..}) or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with_all = ["patient", "result"])]
    pub input: Option<PathBuf>,

    /// Patient form JSON (use together with --result)
    #[arg(long = "patient")]
    pub patient: Option<PathBuf>,

    /// Risk result JSON (use together with --patient)
    #[arg(long = "result")]
    pub result: Option<PathBuf>,

    /// Save the PDF under its dated name or stream it to stdout
    #[arg(short = 'm', long = "mode", value_enum, default_value = "file")]
    pub mode: Mode,

    /// Directory for saved files
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,

    /// Output format
    #[arg(short = 'e', long = "format", value_enum, default_value = "pdf")]
    pub format: OutputFormat,

    /// JSON5 config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Use this report identifier instead of a random one
    #[arg(long = "report-id")]
    pub report_id: Option<String>,

    /// Use this date (YYYY-MM-DD) instead of today
    #[arg(long = "date", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Write the computed page layout as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    File,
    Stream,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::File => OutputMode::File,
            Mode::Stream => OutputMode::Stream,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Svg,
    Png,
    Summary,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Summary => "json",
        }
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let (patient, result) = read_records(&args)?;
    // Pin the date once so the badge, file names and summary agree.
    let date = args.date.unwrap_or_else(|| SystemClock.today());

    if args.format == OutputFormat::Summary {
        let summary = build_summary(&patient, &result, date, &config.theme);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let ids: Box<dyn ReportIdSource> = match &args.report_id {
        Some(id) => Box::new(FixedReportIds::new([id.clone()])),
        None => Box::new(RandomReportIds),
    };

    let mut generator = ReportGenerator::new(config.clone())
        .with_id_source(ids)
        .with_clock(FixedClock(date));
    let document = generator.layout(&patient, &result)?;
    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &document)?;
    }

    match args.format {
        OutputFormat::Pdf => {
            let artifact = generator.package(&document, date, args.mode.into());
            match args.mode {
                Mode::File => {
                    let path = persist(&artifact, &args.out_dir)?;
                    eprintln!("saved {}", path.display());
                }
                Mode::Stream => {
                    let stdout = io::stdout();
                    stream_to(&artifact, &mut stdout.lock())?;
                }
            }
        }
        OutputFormat::Svg | OutputFormat::Png => {
            let pages = render_svg_pages(&document, &config.theme);
            let outputs = resolve_page_outputs(&args.out_dir, date, args.format, pages.len());
            std::fs::create_dir_all(&args.out_dir)
                .with_context(|| format!("creating {}", args.out_dir.display()))?;
            for (svg, output) in pages.iter().zip(outputs.iter()) {
                write_page(svg, output, args.format, &config)?;
            }
        }
        OutputFormat::Summary => {}
    }

    Ok(())
}

fn write_page(svg: &str, output: &Path, format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let png = crate::render::render_png(svg, config.render.png_scale)?;
                std::fs::write(output, png)?;
            }
            #[cfg(not(feature = "png"))]
            {
                let _ = (svg, config);
                return Err(anyhow::anyhow!("PNG output requires the 'png' feature"));
            }
        }
        _ => {
            std::fs::write(output, svg)?;
        }
    }
    log::info!("wrote {}", output.display());
    eprintln!("saved {}", output.display());
    Ok(())
}

fn read_records(args: &Args) -> Result<(PatientData, RiskResult)> {
    if args.patient.is_some() || args.result.is_some() {
        let form_data = args
            .patient
            .as_deref()
            .map(|path| read_file(path).and_then(|raw| Ok(parse_patient(&raw)?)))
            .transpose()?;
        let result = args
            .result
            .as_deref()
            .map(|path| read_file(path).and_then(|raw| Ok(parse_result(&raw)?)))
            .transpose()?;
        return Ok(ReportInput { form_data, result }.into_records()?);
    }

    let raw = read_input(args.input.as_deref())?;
    Ok(ReportInput::from_json(&raw)?.into_records()?)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return read_file(path);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// One file per page: `<out_dir>/CardioShield_Report_<date>-<n>.<ext>`.
fn resolve_page_outputs(
    out_dir: &Path,
    date: NaiveDate,
    format: OutputFormat,
    count: usize,
) -> Vec<PathBuf> {
    let filename = report_filename(date);
    let stem = filename.trim_end_matches(".pdf");
    (0..count)
        .map(|idx| out_dir.join(format!("{}-{}.{}", stem, idx + 1, format.extension())))
        .collect()
}
