//! Report rendering: table, JSON, and SARIF
//!
//! Formatters consume the sorted report list read-only. Field names in the
//! JSON and SARIF outputs are a compatibility surface; renaming them breaks
//! downstream CI integrations.

use crate::error::Result;
use crate::types::{RiskReport, Verdict};
use chrono::Utc;
use colored::{ColoredString, Colorize};
use serde::Serialize;

const JSON_SCHEMA_VERSION: &str = "1.0";
const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const TOOL_NAME: &str = "DepFence";

/// Truncate a sorted report list to the free-tier limit.
///
/// Returns the (possibly shortened) list and whether truncation occurred.
pub fn truncate_reports(reports: Vec<RiskReport>, limit: usize) -> (Vec<RiskReport>, bool) {
    if reports.len() > limit {
        let mut reports = reports;
        reports.truncate(limit);
        (reports, true)
    } else {
        (reports, false)
    }
}

// --- JSON ---

#[derive(Serialize)]
struct JsonOutput<'a> {
    schema_version: &'static str,
    scan_timestamp: String,
    truncated: bool,
    packages: Vec<JsonPackage<'a>>,
}

#[derive(Serialize)]
struct JsonPackage<'a> {
    name: &'a str,
    risk_score: f64,
    risk_level: &'static str,
    last_release_date: &'a str,
    factors: &'a [String],
}

/// Render reports as the machine-readable JSON document
pub fn render_json(reports: &[RiskReport], truncated: bool) -> Result<String> {
    let out = JsonOutput {
        schema_version: JSON_SCHEMA_VERSION,
        scan_timestamp: Utc::now().to_rfc3339(),
        truncated,
        packages: reports
            .iter()
            .map(|r| JsonPackage {
                name: &r.name,
                risk_score: f64::from(r.score) / 100.0,
                risk_level: r.verdict.as_lower(),
                last_release_date: &r.last_release_date,
                factors: &r.factors,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

// --- SARIF ---

#[derive(Serialize)]
struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun<'a>>,
}

#[derive(Serialize)]
struct SarifRun<'a> {
    tool: SarifTool<'a>,
    results: Vec<SarifResult<'a>>,
}

#[derive(Serialize)]
struct SarifTool<'a> {
    driver: SarifDriver<'a>,
}

#[derive(Serialize)]
struct SarifDriver<'a> {
    name: &'static str,
    version: &'static str,
    rules: Vec<SarifRule<'a>>,
}

#[derive(Serialize)]
struct SarifRule<'a> {
    id: &'a str,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
}

#[derive(Serialize)]
struct SarifResult<'a> {
    #[serde(rename = "ruleId")]
    rule_id: &'a str,
    level: &'static str,
    message: SarifMessage,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

fn sarif_level(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Low => "note",
        Verdict::Medium => "warning",
        Verdict::High | Verdict::Critical | Verdict::Unknown => "error",
    }
}

/// Render reports as a SARIF 2.1.0 log for CI code-scanning integrations
pub fn render_sarif(reports: &[RiskReport]) -> Result<String> {
    let rules = reports
        .iter()
        .map(|r| SarifRule {
            id: &r.name,
            short_description: SarifMessage {
                text: format!("Maintainer abandonment risk for {}", r.name),
            },
        })
        .collect();

    let results = reports
        .iter()
        .map(|r| SarifResult {
            rule_id: &r.name,
            level: sarif_level(r.verdict),
            message: SarifMessage {
                text: format!(
                    "{} has abandonment risk score {} ({})",
                    r.name, r.score, r.verdict
                ),
            },
        })
        .collect();

    let log = SarifLog {
        schema: SARIF_SCHEMA,
        version: SARIF_VERSION,
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME,
                    version: env!("CARGO_PKG_VERSION"),
                    rules,
                },
            },
            results,
        }],
    };
    Ok(serde_json::to_string_pretty(&log)?)
}

// --- Table ---

fn colored_verdict(verdict: Verdict, text: &str) -> ColoredString {
    match verdict {
        Verdict::Low => text.green(),
        Verdict::Medium => text.yellow(),
        Verdict::High => text.red(),
        Verdict::Critical => text.bright_red(),
        Verdict::Unknown => text.bright_black(),
    }
}

/// Render reports as a plain-text table. Color is controlled globally via
/// `colored::control` by the caller.
pub fn render_table(reports: &[RiskReport]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{:<30} {:>5} {:>6} {:>5} {:>5} Verdict\n",
        "Package", "Risk", "Days", "Maint", "Rels"
    ));
    out.push_str(&"─".repeat(70));
    out.push('\n');

    for r in reports {
        let days = if r.last_release_days >= 0 {
            r.last_release_days.to_string()
        } else {
            "?".to_string()
        };
        out.push_str(&format!(
            "{:<30} {:>5} {:>6} {:>5} {:>5} {}\n",
            r.name,
            colored_verdict(r.verdict, &r.score.to_string()),
            days,
            r.maintainer_count,
            r.release_count,
            colored_verdict(r.verdict, &r.verdict.to_string()),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, score: u8) -> RiskReport {
        RiskReport {
            name: name.to_string(),
            score,
            last_release_days: 42,
            maintainer_count: 1,
            release_count: 3,
            verdict: Verdict::from_score(score),
            last_release_date: "2024-01-15".to_string(),
            factors: vec!["only 3 release(s) published".to_string()],
        }
    }

    #[test]
    fn test_json_contract_fields() {
        let reports = vec![report("flask", 62)];
        let out = render_json(&reports, true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(v["schema_version"], "1.0");
        assert!(v["scan_timestamp"].is_string());
        assert_eq!(v["truncated"], true);
        let pkg = &v["packages"][0];
        assert_eq!(pkg["name"], "flask");
        assert_eq!(pkg["risk_score"], 0.62);
        assert_eq!(pkg["risk_level"], "high");
        assert_eq!(pkg["last_release_date"], "2024-01-15");
        assert_eq!(pkg["factors"][0], "only 3 release(s) published");
    }

    #[test]
    fn test_json_unknown_verdict_lowercased() {
        let reports = vec![RiskReport::unknown("ghost")];
        let out = render_json(&reports, false).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["packages"][0]["risk_level"], "unknown");
        assert_eq!(v["packages"][0]["risk_score"], 1.0);
    }

    #[test]
    fn test_sarif_structure_and_levels() {
        let reports = vec![report("low-pkg", 10), report("med-pkg", 30), report("high-pkg", 80)];
        let out = render_sarif(&reports).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(v["version"], "2.1.0");
        assert!(v["$schema"].as_str().unwrap().contains("sarif"));
        let run = &v["runs"][0];
        assert_eq!(run["tool"]["driver"]["name"], "DepFence");
        assert_eq!(run["tool"]["driver"]["rules"].as_array().unwrap().len(), 3);

        let results = run["results"].as_array().unwrap();
        assert_eq!(results[0]["level"], "note");
        assert_eq!(results[1]["level"], "warning");
        assert_eq!(results[2]["level"], "error");
        assert_eq!(results[2]["ruleId"], "high-pkg");
        assert!(results[2]["message"]["text"]
            .as_str()
            .unwrap()
            .contains("high-pkg"));
    }

    #[test]
    fn test_sarif_unknown_is_error() {
        let reports = vec![RiskReport::unknown("ghost")];
        let out = render_sarif(&reports).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["runs"][0]["results"][0]["level"], "error");
    }

    #[test]
    fn test_table_columns_and_unknown_days() {
        colored::control::set_override(false);
        let mut rpt = report("requests", 12);
        rpt.last_release_days = -1;
        let out = render_table(&[rpt]);
        assert!(out.contains("Package"));
        assert!(out.contains("Verdict"));
        assert!(out.contains("requests"));
        assert!(out.contains(" ? "));
        colored::control::unset_override();
    }

    #[test]
    fn test_truncation() {
        let reports: Vec<_> = (0..25).map(|i| report(&format!("pkg{}", i), 50)).collect();
        let (shown, truncated) = truncate_reports(reports, 20);
        assert!(truncated);
        assert_eq!(shown.len(), 20);

        let reports: Vec<_> = (0..5).map(|i| report(&format!("pkg{}", i), 50)).collect();
        let (shown, truncated) = truncate_reports(reports, 20);
        assert!(!truncated);
        assert_eq!(shown.len(), 5);
    }
}
