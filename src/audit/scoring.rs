//! Turning check results into a score, a grade, and prioritized
//! recommendations.

use super::checks::{CheckResult, CheckStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};

const PASSED_POINTS: u32 = 100;
const INFO_POINTS: u32 = 75;
const WARNING_POINTS: u32 = 50;
const CRITICAL_POINTS: u32 = 0;

fn points(status: CheckStatus) -> u32 {
    match status {
        CheckStatus::Passed => PASSED_POINTS,
        CheckStatus::Info => INFO_POINTS,
        CheckStatus::Warning => WARNING_POINTS,
        CheckStatus::Critical => CRITICAL_POINTS,
    }
}

/// Letter grade; `Ord` follows declaration order, so a "greater" grade is a
/// worse one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Threshold table, with one cap: an instance carrying any critical
    /// check never grades A, whatever its mean score.
    pub fn from_score(score: u32, has_critical: bool) -> Self {
        let base = match score {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        };
        if has_critical && base == Grade::A {
            Grade::B
        } else {
            base
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recommendation priority, highest first in declaration order so a plain
/// sort puts critical items at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

impl Priority {
    fn from_status(status: CheckStatus) -> Option<Self> {
        match status {
            CheckStatus::Critical => Some(Priority::Critical),
            CheckStatus::Warning => Some(Priority::High),
            CheckStatus::Info => Some(Priority::Medium),
            CheckStatus::Passed => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSummary {
    pub passed: usize,
    pub info: usize,
    pub warning: usize,
    pub critical: usize,
}

impl AuditSummary {
    pub fn total(&self) -> usize {
        self.passed + self.info + self.warning + self.critical
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditCategory {
    pub label: String,
    pub checks: Vec<CheckResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub generated_at: String,
    pub categories: Vec<AuditCategory>,
    pub summary: AuditSummary,
    /// Mean check points, 0-100.
    pub score: u32,
    pub grade: Grade,
    pub recommendations: Vec<Recommendation>,
}

/// Fold the per-category check results into the final report.
pub fn build_report(categories: Vec<(&'static str, Vec<CheckResult>)>) -> AuditReport {
    let mut summary = AuditSummary::default();
    let mut total_points: u64 = 0;
    let mut recommendations = Vec::new();

    for (label, checks) in &categories {
        for check in checks {
            match check.status {
                CheckStatus::Passed => summary.passed += 1,
                CheckStatus::Info => summary.info += 1,
                CheckStatus::Warning => summary.warning += 1,
                CheckStatus::Critical => summary.critical += 1,
            }
            total_points += u64::from(points(check.status));

            if let Some(remediation) = &check.remediation {
                // remediation is None exactly for passed checks, so the
                // priority mapping is total here.
                if let Some(priority) = Priority::from_status(check.status) {
                    recommendations.push(Recommendation {
                        priority,
                        category: (*label).to_string(),
                        action: remediation.clone(),
                    });
                }
            }
        }
    }

    let count = summary.total();
    let score = if count == 0 {
        PASSED_POINTS
    } else {
        (total_points as f64 / count as f64).round() as u32
    };

    recommendations.sort_by_key(|r| r.priority);

    let has_critical = summary.critical > 0;

    AuditReport {
        generated_at: Utc::now().to_rfc3339(),
        categories: categories
            .into_iter()
            .map(|(label, checks)| AuditCategory {
                label: label.to_string(),
                checks,
            })
            .collect(),
        summary,
        score,
        grade: Grade::from_score(score, has_critical),
        recommendations,
    }
}

/// Ten-segment visual bar for terminal score rendering.
pub fn score_bar(score: u32, max: u32) -> String {
    let filled = ((score as f32 / max as f32) * 10.0).round() as usize;
    let filled = filled.min(10);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}
