use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::page::PageView;
use crate::translator::Translate;

/// Audit-run summary written next to the page reports. Copied fields keep
/// whatever JSON they hold; absent ones stay absent, `null` stays `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGlobalReport {
    #[serde(default, deserialize_with = "crate::report::present")]
    pub date: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub hostname: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub device: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub connection: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub eco_index: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub grade: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub nb_best_practices_to_correct: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub nb_pages: Option<Value>,
    /// Only the count is reported.
    pub errors: Vec<Value>,
    pub worst_rules: Option<Vec<String>>,
}

/// Ranked worst-rule labels. Serializes as `""` when there are none, the
/// shape existing report consumers expect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorstRules(pub Vec<String>);

impl Serialize for WorstRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            serializer.serialize_str("")
        } else {
            self.0.serialize(serializer)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco_index: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_best_practices_to_correct: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_pages: Option<Value>,
    pub nb_errors: usize,
    pub all_reports_variables: Vec<PageView>,
    pub worst_rules: WorstRules,
}

pub fn assemble(raw: RawGlobalReport, pages: Vec<PageView>, translator: &dyn Translate) -> FinalReport {
    FinalReport {
        date: raw.date,
        hostname: raw.hostname,
        device: raw.device,
        connection: raw.connection,
        eco_index: raw.eco_index,
        grade: raw.grade,
        nb_best_practices_to_correct: raw.nb_best_practices_to_correct,
        nb_pages: raw.nb_pages,
        nb_errors: raw.errors.len(),
        all_reports_variables: pages,
        worst_rules: rank_worst_rules(raw.worst_rules.as_deref().unwrap_or_default(), translator),
    }
}

/// `["CompressHttp", "MinifiedJs"]` → `["#1 <CompressHttp label>", "#2 <MinifiedJs label>"]`.
pub fn rank_worst_rules(rules: &[String], translator: &dyn Translate) -> WorstRules {
    WorstRules(
        rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("#{} {}", i + 1, translator.translate_rule(rule)))
            .collect(),
    )
}

// ── Tests ──
