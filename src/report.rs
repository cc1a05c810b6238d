//! Aggregation of probe outcomes into a run summary.

use serde::Serialize;

use crate::probe::Outcome;

/// Every configured target succeeded.
pub const EXIT_OK: u8 = 0;
/// The run completed but one or more targets failed.
pub const EXIT_FAILURES: u8 = 1;
/// Nothing to do or the run could not start: no targets configured,
/// configuration unreadable, or the HTTP client failed to build.
pub const EXIT_CONFIG: u8 = 2;

/// Aggregate counts plus the failing outcomes, in collection order.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub success_count: usize,
    pub failure_count: usize,
    pub total: usize,
    pub failing: Vec<Outcome>,
}

impl Summary {
    /// Reduce an outcome collection. `success_count + failure_count`
    /// equals `total` by construction.
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let failing: Vec<Outcome> = outcomes
            .iter()
            .filter(|o| !o.is_success())
            .cloned()
            .collect();

        Self {
            success_count: outcomes.len() - failing.len(),
            failure_count: failing.len(),
            total: outcomes.len(),
            failing,
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.total == 0 {
            EXIT_CONFIG
        } else if self.failure_count > 0 {
            EXIT_FAILURES
        } else {
            EXIT_OK
        }
    }
}

/// Emit the final report, either as tracing lines or as a single JSON
/// object on stdout for log scrapers.
pub fn print_summary(summary: &Summary, json: bool) {
    if json {
        match serde_json::to_string(summary) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!("Failed to serialize summary: {}", e),
        }
        return;
    }

    tracing::info!(
        "Run complete: {} succeeded, {} failed, {} total",
        summary.success_count,
        summary.failure_count,
        summary.total
    );

    for outcome in &summary.failing {
        tracing::warn!(
            "FAILED {}: {}",
            outcome.target_name,
            outcome.detail.as_deref().unwrap_or("unknown error")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Status;

    fn outcomes(verdicts: &[(&str, bool)]) -> Vec<Outcome> {
        verdicts
            .iter()
            .map(|(name, ok)| {
                if *ok {
                    Outcome::success(name)
                } else {
                    Outcome::failure(name, "GET /rest/v1: HTTP 503".to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_counts_always_add_up() {
        for verdicts in [
            vec![],
            vec![("a", true)],
            vec![("a", false)],
            vec![("a", true), ("b", false), ("c", true), ("d", false)],
        ] {
            let summary = Summary::from_outcomes(&outcomes(&verdicts));
            assert_eq!(summary.success_count + summary.failure_count, summary.total);
        }
    }

    #[test]
    fn test_failing_list_keeps_collection_order() {
        let summary = Summary::from_outcomes(&outcomes(&[
            ("a", true),
            ("b", false),
            ("c", false),
            ("d", true),
        ]));

        let names: Vec<&str> = summary.failing.iter().map(|o| o.target_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(summary.failing[0].status, Status::Failure);
    }

    #[test]
    fn test_exit_code_all_success() {
        let summary = Summary::from_outcomes(&outcomes(&[("a", true), ("b", true)]));
        assert_eq!(summary.exit_code(), EXIT_OK);
    }

    #[test]
    fn test_exit_code_with_failures() {
        let summary = Summary::from_outcomes(&outcomes(&[("a", true), ("b", false)]));
        assert_eq!(summary.exit_code(), EXIT_FAILURES);
    }

    #[test]
    fn test_exit_code_empty_run_is_config_problem() {
        let summary = Summary::from_outcomes(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn test_summary_serializes_for_scrapers() {
        let summary = Summary::from_outcomes(&outcomes(&[("a", true), ("b", false)]));
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["success_count"], 1);
        assert_eq!(value["failure_count"], 1);
        assert_eq!(value["total"], 2);
        assert_eq!(value["failing"][0]["target_name"], "b");
        assert_eq!(value["failing"][0]["status"], "failure");
    }
}
