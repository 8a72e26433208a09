use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::translator::Translate;

/// Rule identifiers reported for every page, in display order.
pub const RULES: &[&str] = &[
    "AddExpiresOrCacheControlHeaders",
    "CompressHttp",
    "DomainsNumber",
    "DontResizeImageInBrowser",
    "EmptySrcTag",
    "ExternalizeCss",
    "ExternalizeJs",
    "HttpError",
    "HttpRequests",
    "ImageDownloadedNotDisplayed",
    "JsValidate",
    "MaxCookiesLength",
    "MinifiedCss",
    "MinifiedJs",
    "NoCookieForStaticRessources",
    "NoRedirect",
    "OptimizeBitmapImages",
    "OptimizeSvg",
    "Plugins",
    "PrintStyleSheet",
    "SocialNetworkButton",
    "StyleSheets",
    "UseETags",
    "UseStandardTypefaces",
];

const DEFAULT_NOTE: &str = "A";

/// One finding as written by the page audit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinding {
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub compliance_level: Option<String>,
}

pub type Findings = HashMap<String, RawFinding>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPracticeEntry {
    pub name: String,
    pub comment: String,
    pub note: String,
}

/// Build the localized best-practice list for one page, one entry per rule in
/// `RULES` order. Every rule must be present in `findings`.
pub fn extract(findings: &Findings, translator: &dyn Translate) -> Result<Vec<BestPracticeEntry>> {
    RULES
        .iter()
        .map(|rule| -> Result<BestPracticeEntry> {
            let finding = findings.get(*rule).ok_or_else(|| ReportError::MissingRule {
                rule: rule.to_string(),
            })?;
            Ok(BestPracticeEntry {
                name: translator.translate_rule(rule),
                comment: non_empty(&finding.comment).unwrap_or_default().to_string(),
                note: non_empty(&finding.compliance_level)
                    .unwrap_or(DEFAULT_NOTE)
                    .to_string(),
            })
        })
        .collect()
}

// Empty strings count as absent, matching how the audit writes unset fields.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ── Tests ──
