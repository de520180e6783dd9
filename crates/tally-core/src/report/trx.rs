use super::{Report, ReportedResult};
use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

// Serde mapping for the one TRX shape this tool ingests. Only the attributes
// and children that feed the store are modeled; everything else in the
// document is skipped by serde.
#[derive(Debug, Deserialize)]
struct TrxTestRun {
    #[serde(rename = "Results", default)]
    results: TrxResults,
}

#[derive(Debug, Default, Deserialize)]
struct TrxResults {
    #[serde(rename = "UnitTestResult", default)]
    unit_test_results: Vec<TrxUnitTestResult>,
}

#[derive(Debug, Deserialize)]
struct TrxUnitTestResult {
    #[serde(rename = "@testName")]
    test_name: String,
    #[serde(rename = "@outcome", default)]
    outcome: String,
    #[serde(rename = "Output")]
    output: Option<TrxOutput>,
}

#[derive(Debug, Deserialize)]
struct TrxOutput {
    #[serde(rename = "ErrorInfo")]
    error_info: Option<TrxErrorInfo>,
}

#[derive(Debug, Deserialize)]
struct TrxErrorInfo {
    #[serde(rename = "Message")]
    message: Option<String>,
}

pub fn parse_file(path: &Path) -> anyhow::Result<Report> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report {}", path.display()))?;
    parse_str(&text)
}

pub fn parse_str(text: &str) -> anyhow::Result<Report> {
    // The serde mapping matches bare element names, so the default namespace
    // declaration has to go before deserializing.
    let xmlns = Regex::new(r#"xmlns="[^"]*" ?"#)?;
    let stripped = xmlns.replace_all(text, "");

    let parsed: TrxTestRun =
        quick_xml::de::from_str(&stripped).context("failed to parse TRX document")?;

    let results = parsed
        .results
        .unit_test_results
        .into_iter()
        .map(|r| {
            let error_message = r.output.and_then(|o| o.error_info).and_then(|e| e.message);
            ReportedResult {
                test_name: r.test_name,
                outcome: r.outcome,
                error_message,
            }
        })
        .collect();

    Ok(Report { results })
}
