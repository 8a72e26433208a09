pub mod best_practices;
pub mod global;
pub mod page;
pub mod sanitize;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{InputManifest, PageInput, ReportOptions};
use crate::error::{ReportError, Result};
use crate::progress::Progress;
use crate::translator::Translate;
use global::{FinalReport, RawGlobalReport};
use page::{PageView, RawPageReport};

const INDENT: &[u8] = b"   ";

/// Pipeline: page reports → page views → merged report → output file.
/// Nothing is written unless every input was read and normalized.
pub fn create_json_report(
    inputs: &InputManifest,
    options: &ReportOptions,
    translator: &dyn Translate,
) -> Result<FinalReport> {
    debug!("Report options: {:?}", options);
    let progress = Progress::start(inputs.reports.len() as u64 + 2, options.ci, "Create JSON report");
    progress.tick();

    let result = build_report(inputs, translator, &progress).and_then(|report| {
        write_report(&options.report_output_file, &report)?;
        progress.tick();
        Ok(report)
    });
    progress.finish();

    let report = result?;
    info!(
        "JSON report for {} pages written to {}",
        report.all_reports_variables.len(),
        options.report_output_file.display()
    );
    Ok(report)
}

fn build_report(
    inputs: &InputManifest,
    translator: &dyn Translate,
    progress: &Progress,
) -> Result<FinalReport> {
    let pages = read_all_reports(&inputs.reports, translator, progress)?;
    let global: RawGlobalReport = read_json(&inputs.global_report.path)?;
    Ok(global::assemble(global, pages, translator))
}

fn read_all_reports(
    inputs: &[PageInput],
    translator: &dyn Translate,
    progress: &Progress,
) -> Result<Vec<PageView>> {
    let mut views = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        let raw = load_page(input, i as u64 + 1)?;
        views.push(page::normalize(&raw, translator)?);
        progress.tick();
    }
    Ok(views)
}

/// Read one page report. A report without its own `index` takes the one
/// from the input list, then its 1-based position.
pub fn load_page(input: &PageInput, position: u64) -> Result<RawPageReport> {
    let mut raw: RawPageReport = read_json(&input.path)?;
    raw.path = input.path.clone();
    if raw.index.is_none() {
        raw.index = Some(input.index.unwrap_or(position));
    }
    Ok(raw)
}

/// Copy-through field: `None` when absent, `Some(Value::Null)` for an explicit
/// `null`, any other JSON value as written. Use with `#[serde(default)]`.
pub fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Read and decode a JSON file, keeping read, syntax and shape failures apart.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_value(value).map_err(|e| ReportError::malformed(path, e.to_string()))
}

/// JSON with 3-space indentation.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

/// Write through a sibling temp file so the destination is never half-written.
fn write_report(path: &Path, report: &FinalReport) -> Result<()> {
    let io_err = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let bytes = to_json(report).map_err(|e| io_err(e.into()))?;
    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

// ── Tests ──
