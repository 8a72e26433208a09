use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::best_practices::{self, BestPracticeEntry, Findings};
use super::sanitize::sanitize;
use crate::error::{ReportError, Result};
use crate::translator::Translate;

#[derive(Debug, Clone, Deserialize)]
pub struct PageInformations {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One page audit, as written by the analysis stage. Only `date`, `success`
/// and `pageInformations` are required; everything else is best-effort.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageReport {
    /// File the report was read from, for error messages.
    #[serde(skip)]
    pub path: PathBuf,
    /// Copied as written; must be present, may be any JSON value.
    pub date: Value,
    pub success: bool,
    pub page_informations: PageInformations,
    pub index: Option<u64>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub eco_index: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub grade: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub water_consumption: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub greenhouse_gases_emission: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub nb_request: Option<Value>,
    pub responses_size: Option<f64>,
    pub responses_size_uncompress: Option<f64>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub dom_size: Option<Value>,
    #[serde(default, deserialize_with = "crate::report::present")]
    pub nb_best_practices_to_correct: Option<Value>,
    pub best_practices: Option<Findings>,
}

/// Metrics only present for pages whose audit succeeded. Sizes are in kB.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco_index: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_consumption: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greenhouse_gases_emission: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_request: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncompress_page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom_size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_best_practices_to_correct: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub date: Value,
    pub success: bool,
    pub name: String,
    pub filename: String,
    #[serde(flatten)]
    pub metrics: Option<PageMetrics>,
    pub best_practices: Vec<BestPracticeEntry>,
}

pub fn normalize(raw: &RawPageReport, translator: &dyn Translate) -> Result<PageView> {
    let info = &raw.page_informations;
    let display_name = info.name.as_deref().filter(|n| !n.is_empty());
    let name = display_name
        .or(info.url.as_deref())
        .unwrap_or_default()
        .to_string();
    let filename = page_filename(raw, display_name)?;

    if !raw.success {
        return Ok(PageView {
            date: raw.date.clone(),
            success: false,
            name,
            filename,
            metrics: None,
            best_practices: Vec::new(),
        });
    }

    let findings = raw.best_practices.clone().unwrap_or_default();
    let best_practices = best_practices::extract(&findings, translator)?;

    Ok(PageView {
        date: raw.date.clone(),
        success: true,
        name,
        filename,
        metrics: Some(PageMetrics {
            eco_index: raw.eco_index.clone(),
            grade: raw.grade.clone(),
            water_consumption: raw.water_consumption.clone(),
            greenhouse_gases_emission: raw.greenhouse_gases_emission.clone(),
            nb_request: raw.nb_request.clone(),
            page_size: raw.responses_size.map(to_kilobytes),
            uncompress_page_size: raw.responses_size_uncompress.map(to_kilobytes),
            dom_size: raw.dom_size.clone(),
            nb_best_practices_to_correct: raw.nb_best_practices_to_correct.clone(),
        }),
        best_practices,
    })
}

fn page_filename(raw: &RawPageReport, display_name: Option<&str>) -> Result<String> {
    if let Some(name) = display_name.map(sanitize).filter(|n| !n.is_empty()) {
        return Ok(format!("{}.json", name));
    }
    match raw.index {
        Some(index) => Ok(format!("{}.json", index)),
        None => Err(ReportError::malformed(
            raw.path.clone(),
            "page has neither a usable name nor an index",
        )),
    }
}

/// Bytes to kB, halves rounded up: 1499 → 1, 1500 → 2.
pub fn to_kilobytes(bytes: f64) -> u64 {
    (bytes / 1000.0).round() as u64
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::best_practices::RULES;
    use crate::translator::StubTranslator;
    use serde_json::json;

    fn findings_json() -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = RULES
            .iter()
            .map(|r| (r.to_string(), json!({ "complianceLevel": "B", "comment": "" })))
            .collect();
        serde_json::Value::Object(map)
    }

    fn success_page(name: &str) -> RawPageReport {
        serde_json::from_value(json!({
            "date": "2024-03-01 10:00:00",
            "success": true,
            "index": 3,
            "pageInformations": { "name": name, "url": "https://example.org/" },
            "ecoIndex": 72.5,
            "grade": "B",
            "waterConsumption": 1.83,
            "greenhouseGasesEmission": 1.22,
            "nbRequest": 41,
            "responsesSize": 1500,
            "responsesSizeUncompress": 4499,
            "domSize": 650,
            "nbBestPracticesToCorrect": 5,
            "bestPractices": findings_json()
        }))
        .unwrap()
    }

    fn failed_page(name: &str, index: Option<u64>) -> RawPageReport {
        let mut value = json!({
            "date": "2024-03-01 10:00:00",
            "success": false,
            "pageInformations": { "name": name, "url": "https://example.org/broken" }
        });
        if let Some(index) = index {
            value["index"] = json!(index);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn success_page_view() {
        let view = normalize(&success_page("Home"), &StubTranslator).unwrap();
        assert!(view.success);
        assert_eq!(view.name, "Home");
        assert_eq!(view.filename, "Home.json");
        assert_eq!(view.best_practices.len(), RULES.len());
        assert_eq!(view.best_practices[0].note, "B");

        let metrics = view.metrics.unwrap();
        assert_eq!(metrics.page_size, Some(2));
        assert_eq!(metrics.uncompress_page_size, Some(4));
        assert_eq!(metrics.grade, Some(json!("B")));
        assert_eq!(metrics.nb_request, Some(json!(41)));
    }

    #[test]
    fn copied_metrics_keep_null_and_any_shape() {
        let mut raw = success_page("Home");
        raw.grade = Some(Value::Null);
        raw.eco_index = Some(json!("n/a"));
        raw.nb_request = Some(json!({ "html": 1, "js": 40 }));
        raw.dom_size = None;

        let value = serde_json::to_value(normalize(&raw, &StubTranslator).unwrap()).unwrap();
        let page = value.as_object().unwrap();
        assert_eq!(page["grade"], Value::Null);
        assert_eq!(page["ecoIndex"], json!("n/a"));
        assert_eq!(page["nbRequest"], json!({ "html": 1, "js": 40 }));
        assert!(!page.contains_key("domSize"));
    }

    #[test]
    fn null_fields_decode_as_present() {
        let raw: RawPageReport = serde_json::from_value(json!({
            "date": null,
            "success": true,
            "pageInformations": { "name": "Home" },
            "waterConsumption": null,
            "bestPractices": findings_json()
        }))
        .unwrap();
        assert_eq!(raw.water_consumption, Some(Value::Null));
        assert_eq!(raw.greenhouse_gases_emission, None);

        let value = serde_json::to_value(normalize(&raw, &StubTranslator).unwrap()).unwrap();
        assert_eq!(value["date"], Value::Null);
        assert_eq!(value["waterConsumption"], Value::Null);
        assert!(value.get("greenhouseGasesEmission").is_none());
    }

    #[test]
    fn failed_page_view_has_no_metrics() {
        let view = normalize(&failed_page("Broken", Some(2)), &StubTranslator).unwrap();
        assert!(!view.success);
        assert!(view.metrics.is_none());
        assert!(view.best_practices.is_empty());

        let value = serde_json::to_value(&view).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["bestPractices", "date", "filename", "name", "success"]);
        assert_eq!(value["bestPractices"], json!([]));
    }

    #[test]
    fn failed_page_ignores_findings() {
        let mut raw = failed_page("Broken", Some(2));
        raw.best_practices = Some(Findings::new());
        let view = normalize(&raw, &StubTranslator).unwrap();
        assert!(view.best_practices.is_empty());
    }

    #[test]
    fn filename_from_index_when_name_empty() {
        let view = normalize(&failed_page("", Some(7)), &StubTranslator).unwrap();
        assert_eq!(view.filename, "7.json");
        assert_eq!(view.name, "https://example.org/broken");
    }

    #[test]
    fn filename_is_sanitized() {
        let view = normalize(&failed_page("Café/Test 1°", Some(1)), &StubTranslator).unwrap();
        assert_eq!(view.filename, "CafeTest1.json");
        assert_eq!(view.name, "Café/Test 1°");
    }

    #[test]
    fn filename_falls_back_when_name_sanitizes_to_nothing() {
        let view = normalize(&failed_page("/ °", Some(4)), &StubTranslator).unwrap();
        assert_eq!(view.filename, "4.json");
    }

    #[test]
    fn no_name_and_no_index_is_malformed() {
        let err = normalize(&failed_page("", None), &StubTranslator).unwrap_err();
        assert!(matches!(err, ReportError::Malformed { .. }));
    }

    #[test]
    fn missing_rule_propagates() {
        let mut raw = success_page("Home");
        raw.best_practices.as_mut().unwrap().remove("Plugins");
        let err = normalize(&raw, &StubTranslator).unwrap_err();
        assert!(matches!(err, ReportError::MissingRule { rule } if rule == "Plugins"));
    }

    #[test]
    fn rounding_rule() {
        assert_eq!(to_kilobytes(0.0), 0);
        assert_eq!(to_kilobytes(499.0), 0);
        assert_eq!(to_kilobytes(500.0), 1);
        assert_eq!(to_kilobytes(1499.0), 1);
        assert_eq!(to_kilobytes(1500.0), 2);
        assert_eq!(to_kilobytes(2500.0), 3);
        assert_eq!(to_kilobytes(123456.0), 123);
    }

    #[test]
    fn success_page_key_order() {
        let view = normalize(&success_page("Home"), &StubTranslator).unwrap();
        let text = serde_json::to_string(&view).unwrap();
        let order = [
            "\"date\"",
            "\"success\"",
            "\"name\"",
            "\"filename\"",
            "\"ecoIndex\"",
            "\"grade\"",
            "\"waterConsumption\"",
            "\"greenhouseGasesEmission\"",
            "\"nbRequest\"",
            "\"pageSize\"",
            "\"uncompressPageSize\"",
            "\"domSize\"",
            "\"nbBestPracticesToCorrect\"",
            "\"bestPractices\"",
        ];
        let positions: Vec<usize> = order.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", text);
    }

    #[test]
    fn integer_metrics_stay_integers() {
        let view = normalize(&success_page("Home"), &StubTranslator).unwrap();
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["domSize"].to_string(), "650");
        assert_eq!(value["ecoIndex"].to_string(), "72.5");
        assert_eq!(value["pageSize"].to_string(), "2");
    }
}
