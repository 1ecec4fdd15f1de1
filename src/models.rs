//! Data models for case reports.
//!
//! A report records one replay of the benchmark case: which case it was,
//! when and how it ran, and what the driver produced.

use crate::config::FaultMode;
use crate::driver::RunOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the replayed benchmark case.
pub const CASE_ID: &str = "bof_case01";

/// Bug-type label of the replayed case.
pub const BUG_TYPE: &str = "BOF";

/// Final status of a run, as recorded in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The probe was in range and the case completed.
    Completed,
    /// The probe was out of range and the case terminated abnormally.
    BoundsViolation,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Completed => write!(f, "Completed"),
            Verdict::BoundsViolation => write!(f, "Bounds violation"),
        }
    }
}

impl Verdict {
    /// Returns an emoji representation of the verdict.
    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::Completed => "🟢",
            Verdict::BoundsViolation => "🔴",
        }
    }
}

/// Metadata about the case report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Benchmark case identifier.
    pub case_id: String,
    /// Bug-type label of the case.
    pub bug_type: String,
    /// Date and time of the run.
    pub run_date: DateTime<Utc>,
    /// Version of bofcase that produced the report.
    pub tool_version: String,
    /// How the bounds violation was configured to surface.
    pub fault_mode: FaultMode,
    /// Time spent before the report was written, in seconds.
    pub duration_seconds: f64,
}

impl ReportMetadata {
    /// Metadata for a run of the built-in case, stamped now.
    pub fn for_case(fault_mode: FaultMode, duration_seconds: f64) -> Self {
        Self {
            case_id: CASE_ID.to_string(),
            bug_type: BUG_TYPE.to_string(),
            run_date: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            fault_mode,
            duration_seconds,
        }
    }
}

/// The complete case report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub metadata: ReportMetadata,
    pub verdict: Verdict,
    /// Entity name used for the greeting.
    pub entity: String,
    /// Addition operands.
    pub operands: (i64, i64),
    /// Sequence contents.
    pub sequence: Vec<i64>,
    pub outcome: RunOutcome,
}

impl CaseReport {
    pub fn new(
        metadata: ReportMetadata,
        entity: String,
        operands: (i64, i64),
        sequence: Vec<i64>,
        outcome: RunOutcome,
    ) -> Self {
        let verdict = if outcome.fault.is_some() {
            Verdict::BoundsViolation
        } else {
            Verdict::Completed
        };

        Self {
            metadata,
            verdict,
            entity,
            operands,
            sequence,
            outcome,
        }
    }
}
