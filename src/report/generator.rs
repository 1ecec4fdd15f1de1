//! Markdown and JSON report generation.
//!
//! This module renders a [`CaseReport`] so the outcome of a run survives
//! the abnormal termination that follows it.

use crate::driver::{Fault, RunOutcome};
use crate::models::{CaseReport, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &CaseReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# bofcase Report: {}\n\n", report.metadata.case_id));

    output.push_str(&generate_metadata_section(&report.metadata));

    output.push_str(&generate_inputs_section(report));

    output.push_str(&generate_output_section(&report.outcome));

    output.push_str(&generate_verdict_section(report));

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Case:** `{}`\n", metadata.case_id));
    section.push_str(&format!("- **Bug Type:** {}\n", metadata.bug_type));
    section.push_str(&format!(
        "- **Run Date:** {}\n",
        metadata.run_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Fault Mode:** `{}`\n", metadata.fault_mode));
    section.push_str(&format!("- **bofcase Version:** {}\n", metadata.tool_version));
    section.push_str(&format!(
        "- **Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the inputs section.
fn generate_inputs_section(report: &CaseReport) -> String {
    let mut section = String::new();

    section.push_str("## Inputs\n\n");
    section.push_str("| Input | Value |\n");
    section.push_str("|:---|:---|\n");
    section.push_str(&format!("| Entity | {} |\n", report.entity));
    section.push_str(&format!(
        "| Operands | {}, {} |\n",
        report.operands.0, report.operands.1
    ));
    section.push_str(&format!("| Sequence | {:?} |\n", report.sequence));
    section.push_str(&format!(
        "| Probe Index | {} |\n\n",
        report.outcome.probe_index
    ));

    section
}

/// Generate the section listing the lines the case printed.
fn generate_output_section(outcome: &RunOutcome) -> String {
    let mut section = String::new();

    section.push_str("## Output\n\n");
    if outcome.lines.is_empty() {
        section.push_str("The case printed nothing.\n\n");
        return section;
    }

    section.push_str("```\n");
    for line in &outcome.lines {
        section.push_str(line);
        section.push('\n');
    }
    section.push_str("```\n\n");

    section
}

/// Generate the verdict section.
fn generate_verdict_section(report: &CaseReport) -> String {
    let mut section = String::new();

    section.push_str("## Verdict\n\n");
    section.push_str(&format!(
        "{} **{}**\n\n",
        report.verdict.emoji(),
        report.verdict
    ));

    match (&report.outcome.fault, report.outcome.value) {
        (Some(fault), _) => section.push_str(&generate_fault_block(fault)),
        (None, Some(value)) => section.push_str(&format!(
            "Position {} holds `{}`.\n\n",
            report.outcome.probe_index, value
        )),
        (None, None) => {}
    }

    section
}

/// Generate the block describing a bounds violation.
fn generate_fault_block(fault: &Fault) -> String {
    let mut block = String::new();

    block.push_str(&format!("- **Attempted Index:** {}\n", fault.index));
    block.push_str(&format!("- **Length:** {}\n", fault.len));
    block.push_str(&format!(
        "- **Valid Range:** {}\n\n",
        if fault.len == 0 {
            "none".to_string()
        } else {
            format!("0..={}", fault.len - 1)
        }
    ));
    block.push_str(&format!("> {}\n\n", fault.message));

    block
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by bofcase*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &CaseReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaultMode;

    fn create_test_report(probe_index: usize) -> CaseReport {
        let (value, fault) = if probe_index < 3 {
            (Some(probe_index as i64 + 1), None)
        } else {
            (
                None,
                Some(Fault {
                    index: probe_index,
                    len: 3,
                    message: format!("index out of range [{}] with length 3", probe_index),
                }),
            )
        };

        CaseReport::new(
            ReportMetadata::for_case(FaultMode::Panic, 0.002),
            "Alice".to_string(),
            (10, 20),
            vec![1, 2, 3],
            RunOutcome {
                lines: vec![
                    "Hello, Alice!".to_string(),
                    "The result of Add is: 30".to_string(),
                ],
                sum: 30,
                probe_index,
                value,
                fault,
            },
        )
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report(5);
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# bofcase Report: bof_case01"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("- **Bug Type:** BOF"));
        assert!(markdown.contains("Hello, Alice!\nThe result of Add is: 30\n"));
        assert!(markdown.contains("**Bounds violation**"));
        assert!(markdown.contains("- **Attempted Index:** 5"));
        assert!(markdown.contains("- **Length:** 3"));
        assert!(markdown.contains("- **Valid Range:** 0..=2"));
    }

    #[test]
    fn test_markdown_in_range_probe() {
        let report = create_test_report(1);
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("**Completed**"));
        assert!(markdown.contains("Position 1 holds `2`."));
        assert!(!markdown.contains("Attempted Index"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(5);
        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["case_id"], "bof_case01");
        assert_eq!(value["metadata"]["fault_mode"], "panic");
        assert_eq!(value["verdict"], "bounds_violation");
        assert_eq!(value["outcome"]["fault"]["index"], 5);
        assert_eq!(value["outcome"]["fault"]["len"], 3);
        assert!(value["outcome"].get("value").is_none());
    }
}
