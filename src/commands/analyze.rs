use crate::config::{self, VibecheckConfig};
use crate::core::AnalysisMode;
use crate::engine::VibeEngine;
use crate::io::{create_writer, AnalysisReport, OutputFormat};
use crate::patterns::PatternLibrary;
use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

pub struct AnalyzeOptions {
    pub inputs: Vec<PathBuf>,
    pub text: Option<String>,
    pub mode: AnalysisMode,
    pub context: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub list_patterns: bool,
}

pub fn run(options: AnalyzeOptions) -> Result<()> {
    let config = load_config(&options)?;
    let library = PatternLibrary::load_with(&config.patterns)
        .context("loading pattern library")?;

    if options.list_patterns {
        list_patterns(&library);
        return Ok(());
    }

    let engine = VibeEngine::new(library)
        .with_external_timeout(Duration::from_secs(config.external.timeout_secs));

    let documents = collect_documents(&options)?;
    let context_text = options.context.as_deref();
    let mode = options.mode;

    let reports: Vec<AnalysisReport> = if documents.len() > 1 {
        documents
            .par_iter()
            .progress_count(documents.len() as u64)
            .map(|(name, body)| analyze_document(&engine, name, body, mode, context_text))
            .collect::<Result<Vec<_>>>()?
    } else {
        documents
            .iter()
            .map(|(name, body)| analyze_document(&engine, name, body, mode, context_text))
            .collect::<Result<Vec<_>>>()?
    };

    write_reports(&options, &config, &reports)
}

fn load_config(options: &AnalyzeOptions) -> Result<VibecheckConfig> {
    match &options.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(config::load_config()),
    }
}

fn analyze_document(
    engine: &VibeEngine,
    name: &str,
    body: &str,
    mode: AnalysisMode,
    context: Option<&str>,
) -> Result<AnalysisReport> {
    let verdict = engine
        .analyze(body, mode, context)
        .with_context(|| format!("analyzing {name}"))?;
    Ok(AnalysisReport {
        input: name.to_string(),
        mode,
        generated_at: Utc::now(),
        verdict,
    })
}

/// Gather (name, body) pairs from --text, explicit files, or stdin.
fn collect_documents(options: &AnalyzeOptions) -> Result<Vec<(String, String)>> {
    if let Some(text) = &options.text {
        return Ok(vec![("<text>".to_string(), text.clone())]);
    }

    if options.inputs.is_empty() {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("reading stdin")?;
        return Ok(vec![("<stdin>".to_string(), body)]);
    }

    options
        .inputs
        .iter()
        .map(|path| {
            let body = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((path.display().to_string(), body))
        })
        .collect()
}

fn list_patterns(library: &PatternLibrary) {
    println!(
        "{:<40} {:<16} {:>9} {:>8}",
        "PATTERN", "CATEGORY", "THRESHOLD", "SIGNALS"
    );
    for pattern in library.patterns() {
        println!(
            "{:<40} {:<16} {:>9.2} {:>8}",
            pattern.id(),
            pattern.category().to_string(),
            pattern.detection_threshold(),
            pattern.definition().signals.len()
        );
    }
}

fn write_reports(
    options: &AnalyzeOptions,
    config: &VibecheckConfig,
    reports: &[AnalysisReport],
) -> Result<()> {
    let format = options
        .format
        .or_else(|| format_from_name(&config.output.default_format))
        .unwrap_or(OutputFormat::Terminal);

    let out: Box<dyn std::io::Write> = match &options.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    let mut writer = create_writer(format, out);
    writer.write_reports(reports)
}

fn format_from_name(name: &str) -> Option<OutputFormat> {
    match name {
        "json" => Some(OutputFormat::Json),
        "markdown" => Some(OutputFormat::Markdown),
        "terminal" => Some(OutputFormat::Terminal),
        other => {
            log::warn!("unknown output format '{other}' in config; using terminal");
            None
        }
    }
}
