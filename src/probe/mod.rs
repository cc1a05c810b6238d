//! Probe module for keep-alive pings.
//!
//! Walks a fixed list of candidate endpoints per target and reports a
//! single success/failure outcome.

mod http;

pub use http::*;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::config::Target;

/// Candidate paths tried in order until one responds healthy:
/// schema introspection, auth settings, then the bare REST root.
pub const CANDIDATE_PATHS: &[&str] = &["/rest/v1/", "/auth/v1/settings", "/rest/v1"];

/// Transport error types.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
}

/// Verdict for one target in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// The single result produced for one target.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub target_name: String,
    pub status: Status,
    /// Error description, present only on failure.
    pub detail: Option<String>,
    pub time: DateTime<Utc>,
}

impl Outcome {
    pub(crate) fn success(target_name: &str) -> Self {
        Self {
            target_name: target_name.to_string(),
            status: Status::Success,
            detail: None,
            time: Utc::now(),
        }
    }

    pub(crate) fn failure(target_name: &str, detail: String) -> Self {
        Self {
            target_name: target_name.to_string(),
            status: Status::Failure,
            detail: Some(detail),
            time: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Probe one target, trying each candidate path in order.
///
/// A response with status < 300 is healthy and stops the walk. Transport
/// errors and unhealthy statuses are absorbed; if every path fails, the
/// outcome carries the last attempt's error. Never returns an error.
pub async fn probe_target(sender: &dyn HttpSender, target: &Target, paths: &[&str]) -> Outcome {
    let mut last_detail = String::from("no candidate paths configured");

    for path in paths {
        let url = format!("{}{}", target.base_url, path);

        match sender.get(&url, &target.api_key).await {
            Ok(code) if code < 300 => {
                tracing::info!("{}: awake (HTTP {} via {})", target.name, code, path);
                return Outcome::success(&target.name);
            }
            Ok(code) => {
                last_detail = format!("GET {}: HTTP {}", path, code);
                tracing::debug!("{}: {}", target.name, last_detail);
            }
            Err(e) => {
                last_detail = format!("GET {}: {}", path, e);
                tracing::debug!("{}: {}", target.name, last_detail);
            }
        }
    }

    tracing::warn!("{}: all endpoints failed ({})", target.name, last_detail);
    Outcome::failure(&target.name, last_detail)
}
