use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::report::read_json;
use crate::translator::Catalog;

/// Run options for the JSON report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub report_output_file: PathBuf,
    /// Plain log lines instead of a progress bar. Never changes the output.
    pub ci: bool,
    pub language: String,
    pub locale_file: Option<PathBuf>,
}

impl ReportOptions {
    /// Rule catalog for these options; a custom locale file wins over `language`.
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.language, self.locale_file.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageInput {
    pub path: PathBuf,
    #[serde(default)]
    pub index: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlobalInput {
    pub path: PathBuf,
}

/// Page reports (in report order) and the run summary, as listed by the
/// analysis stage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputManifest {
    pub reports: Vec<PageInput>,
    pub global_report: GlobalInput,
}

impl InputManifest {
    /// Read a manifest file. Relative paths are taken from the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let manifest: InputManifest = read_json(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        debug!("Manifest {} lists {} page reports", path.display(), manifest.reports.len());
        Ok(manifest.relative_to(base))
    }

    /// Build from explicit paths; page indexes follow argument order, from 1.
    pub fn from_paths(global: PathBuf, pages: Vec<PathBuf>) -> Self {
        let reports = pages
            .into_iter()
            .enumerate()
            .map(|(i, path)| PageInput {
                path,
                index: Some(i as u64 + 1),
            })
            .collect();
        InputManifest {
            reports,
            global_report: GlobalInput { path: global },
        }
    }

    fn relative_to(mut self, base: &Path) -> Self {
        for page in &mut self.reports {
            page.path = base.join(&page.path);
        }
        self.global_report.path = base.join(&self.global_report.path);
        self
    }
}

// ── Tests ──
