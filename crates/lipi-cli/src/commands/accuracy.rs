//! Accuracy runs over a labelled corpus.
//!
//! Two corpus formats are accepted: a TOML file with `[[cases]]` entries,
//! or a JSON array of `{ "roman": ..., "devanagari": ... }` records.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use lipi_core::RuleTable;
use lipi_engine::transliterate_batch;

use super::{read_file, CliError};

#[derive(Debug, Deserialize)]
pub struct AccuracyCorpus {
    pub cases: Vec<AccuracyCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccuracyCase {
    pub roman: String,
    pub expected: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_category() -> String {
    "uncategorized".to_string()
}

#[derive(Debug, Deserialize)]
struct DatasetRecord {
    #[serde(default)]
    roman: String,
    #[serde(default)]
    devanagari: String,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResult {
    pub roman: String,
    pub expected: String,
    pub actual: String,
    pub status: AccuracyStatus,
    pub category: String,
    /// Passed only after whitespace was ignored.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub spacing_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
pub struct AccuracySummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub pass_rate: String,
}

#[derive(Debug, Serialize)]
pub struct AccuracyReport {
    pub results: Vec<AccuracyResult>,
    pub summary: AccuracySummary,
}

/// Load a corpus; `.json` files are read as a flat dataset.
pub fn load_corpus(path: &str) -> Result<AccuracyCorpus, CliError> {
    let content = read_file(path)?;
    let corpus_err = |msg: String| CliError::Corpus {
        path: path.to_string(),
        msg,
    };
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let records: Vec<DatasetRecord> =
            serde_json::from_str(&content).map_err(|e| corpus_err(e.to_string()))?;
        let cases = records
            .into_iter()
            .filter_map(|r| {
                let roman = r.roman.trim();
                let expected = r.devanagari.trim();
                if roman.is_empty() || expected.is_empty() {
                    return None;
                }
                Some(AccuracyCase {
                    roman: roman.to_string(),
                    expected: expected.to_string(),
                    category: "dataset".to_string(),
                    tags: Vec::new(),
                    skip: false,
                    note: None,
                })
            })
            .collect();
        Ok(AccuracyCorpus { cases })
    } else {
        toml::from_str(&content).map_err(|e| corpus_err(e.to_string()))
    }
}

/// Drop zero-width characters and straighten curly quotes.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}'))
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            c => c,
        })
        .collect()
}

fn without_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Compare `actual` with `expected`: `(pass, spacing_only)`.
fn compare(actual: &str, expected: &str) -> (bool, bool) {
    let actual = normalize(actual);
    let expected = normalize(expected);
    if actual == expected {
        (true, false)
    } else if without_whitespace(&actual) == without_whitespace(&expected) {
        (true, true)
    } else {
        (false, false)
    }
}

pub fn run_accuracy(
    table: &RuleTable,
    corpus: &AccuracyCorpus,
    category: Option<&str>,
    tag: Option<&str>,
) -> AccuracyReport {
    let cases: Vec<&AccuracyCase> = corpus
        .cases
        .iter()
        .filter(|c| category.map_or(true, |cat| c.category == cat))
        .filter(|c| tag.map_or(true, |t| c.tags.iter().any(|ct| ct == t)))
        .collect();

    let inputs: Vec<&str> = cases
        .iter()
        .filter(|c| !c.skip)
        .map(|c| c.roman.as_str())
        .collect();
    let mut outputs = transliterate_batch(table, &inputs).into_iter();

    let mut results = Vec::with_capacity(cases.len());
    for case in cases {
        let (actual, status, spacing_only) = if case.skip {
            (String::new(), AccuracyStatus::Skip, false)
        } else {
            let actual = outputs.next().unwrap_or_default();
            let (pass, spacing_only) = compare(&actual, &case.expected);
            let status = if pass {
                AccuracyStatus::Pass
            } else {
                AccuracyStatus::Fail
            };
            (actual, status, spacing_only)
        };
        results.push(AccuracyResult {
            roman: case.roman.clone(),
            expected: case.expected.clone(),
            actual,
            status,
            category: case.category.clone(),
            spacing_only,
            note: case.note.clone(),
        });
    }

    let count = |s: AccuracyStatus| results.iter().filter(|r| r.status == s).count();
    let (pass, fail, skip) = (
        count(AccuracyStatus::Pass),
        count(AccuracyStatus::Fail),
        count(AccuracyStatus::Skip),
    );
    let tested = pass + fail;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };
    let summary = AccuracySummary {
        total: results.len(),
        pass,
        fail,
        skip,
        pass_rate: format!("{:.1}%", rate),
    };
    AccuracyReport { results, summary }
}

/// Human-readable report grouped by category.
///
/// Passing cases are listed only when `verbose` is set.
pub fn format_report(report: &AccuracyReport, verbose: bool) -> String {
    let mut out = String::new();
    let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
    for r in &report.results {
        grouped.entry(&r.category).or_default().push(r);
    }

    for (cat, group) in &grouped {
        out.push_str(&format!("\n=== {} ({} cases) ===\n", cat, group.len()));
        for r in group {
            match r.status {
                AccuracyStatus::Pass if verbose => {
                    let mark = if r.spacing_only { " (spacing)" } else { "" };
                    out.push_str(&format!(
                        "  \u{2713} {} \u{2192} {}{}\n",
                        r.roman, r.expected, mark
                    ));
                }
                AccuracyStatus::Pass => {}
                AccuracyStatus::Fail => {
                    out.push_str(&format!(
                        "  \u{2717} {} \u{2192} {} (got: {})\n",
                        r.roman, r.expected, r.actual
                    ));
                }
                AccuracyStatus::Skip => {
                    let reason = r.note.as_deref().unwrap_or("known failure");
                    out.push_str(&format!("  - {} [skip: {}]\n", r.roman, reason));
                }
            }
        }
    }

    let s = &report.summary;
    out.push('\n');
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("  Total:     {}\n", s.total));
    out.push_str(&format!("  Pass:      {:>3}\n", s.pass));
    out.push_str(&format!("  Fail:      {:>3}\n", s.fail));
    out.push_str(&format!("  Skip:      {:>3}\n", s.skip));
    out.push_str(&format!(
        "  Pass rate: {} ({}/{})\n",
        s.pass_rate,
        s.pass,
        s.pass + s.fail
    ));
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn corpus(toml_str: &str) -> AccuracyCorpus {
        toml::from_str(toml_str).unwrap()
    }

    const CORPUS: &str = r#"
[[cases]]
roman = "namaste"
expected = "नमस्ते"
category = "greeting"
tags = ["common"]

[[cases]]
roman = "nepal"
expected = "नेपाल"
category = "place"
tags = ["common"]

[[cases]]
roman = "sita"
expected = "सीता"
category = "name"

[[cases]]
roman = "krishna"
expected = "कृष्ण"
category = "name"
skip = true
note = "needs lexical data"
"#;

    #[test]
    fn test_run_accuracy() {
        let report = run_accuracy(RuleTable::global(), &corpus(CORPUS), None, None);
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.pass, 2);
        assert_eq!(report.summary.fail, 1);
        assert_eq!(report.summary.skip, 1);
        assert_eq!(report.summary.pass_rate, "66.7%");
        assert_eq!(report.results[2].actual, "सित");
        assert_eq!(report.results[3].actual, "");
    }

    #[test]
    fn test_filters() {
        let c = corpus(CORPUS);
        let by_cat = run_accuracy(RuleTable::global(), &c, Some("name"), None);
        assert_eq!(by_cat.summary.total, 2);
        let by_tag = run_accuracy(RuleTable::global(), &c, None, Some("common"));
        assert_eq!(by_tag.summary.total, 2);
        assert_eq!(by_tag.summary.pass_rate, "100.0%");
    }

    #[test]
    fn test_spacing_only_counts_as_pass() {
        let c = corpus(
            r#"
[[cases]]
roman = "ra.m nepal"
expected = "रंनेपाल"
"#,
        );
        let report = run_accuracy(RuleTable::global(), &c, None, None);
        assert_eq!(report.results[0].status, AccuracyStatus::Pass);
        assert!(report.results[0].spacing_only);
        assert_eq!(report.results[0].category, "uncategorized");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("क\u{200D}ख \u{2018}x\u{2019}"), "कख 'x'");
        assert_eq!(compare("a\u{200C}b", "ab"), (true, false));
        assert_eq!(compare("a b", "ab"), (true, true));
        assert_eq!(compare("ab", "ac"), (false, false));
    }

    #[test]
    fn test_format_report() {
        let report = run_accuracy(RuleTable::global(), &corpus(CORPUS), None, None);
        let text = format_report(&report, false);
        assert!(text.contains("=== name (2 cases) ==="));
        assert!(text.contains("\u{2717} sita \u{2192} सीता (got: सित)"));
        assert!(text.contains("- krishna [skip: needs lexical data]"));
        assert!(!text.contains("\u{2713}"));
        assert!(text.contains("  Pass rate: 66.7% (2/3)"));

        let verbose = format_report(&report, true);
        assert!(verbose.contains("\u{2713} namaste \u{2192} नमस्ते"));
    }

    #[test]
    fn test_report_json() {
        let report = run_accuracy(RuleTable::global(), &corpus(CORPUS), None, None);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["results"][0]["status"], "pass");
        assert_eq!(value["results"][3]["status"], "skip");
        assert!(value["results"][0].get("spacing_only").is_none());
        assert_eq!(value["summary"]["fail"], 1);
    }

    #[test]
    fn test_load_json_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        fs::write(
            &path,
            r#"[
  {"roman": " pani ", "devanagari": "पानी"},
  {"roman": "", "devanagari": "खाली"},
  {"roman": "ghar"}
]"#,
        )
        .unwrap();
        let corpus = load_corpus(path.to_str().unwrap()).unwrap();
        assert_eq!(corpus.cases.len(), 1);
        assert_eq!(corpus.cases[0].roman, "pani");
        assert_eq!(corpus.cases[0].category, "dataset");
    }

    #[test]
    fn test_load_toml_corpus_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[[cases]]\nroman = \"ka\"\n").unwrap();
        let err = load_corpus(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Corpus { .. }));
    }

    #[test]
    fn test_bundled_corpus_passes() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/accuracy.toml");
        let corpus = load_corpus(path).unwrap();
        let report = run_accuracy(RuleTable::global(), &corpus, None, None);
        let failures: Vec<&str> = report
            .results
            .iter()
            .filter(|r| r.status == AccuracyStatus::Fail)
            .map(|r| r.roman.as_str())
            .collect();
        assert!(failures.is_empty(), "failures: {failures:?}");
    }
}
