//! Viability metrics carried at the end of an AI reply.
//!
//! When the assistant analyses an idea it appends a JSON object of the form
//!
//! ```text
//! {"metrics": {"score": 72, "demand": "High", "competition": "Medium"}}
//! ```
//!
//! which drives the metrics panel. The object is stripped from the text
//! before the reply is revealed.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Low / Medium / High rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
}

/// Metrics derived from one analysed idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaMetrics {
    /// Confidence rating, 0-100.
    pub viability_score: u8,
    /// Estimated market demand.
    pub market_demand: Level,
    /// Estimated competition.
    pub competition_level: Level,
}

/// Wire shape of the trailing object.
#[derive(Deserialize)]
struct MetricsEnvelope {
    metrics: RawMetrics,
}

#[derive(Deserialize)]
struct RawMetrics {
    score: f64,
    demand: Level,
    competition: Level,
}

impl From<RawMetrics> for IdeaMetrics {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(raw: RawMetrics) -> Self {
        Self {
            viability_score: raw.score.round().clamp(0.0, 100.0) as u8,
            market_demand: raw.demand,
            competition_level: raw.competition,
        }
    }
}

/// A reply split into display text and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Text to reveal.
    pub text: String,
    /// Metrics, if the reply carried a valid block.
    pub metrics: Option<IdeaMetrics>,
}

static METRICS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{"metrics":\s*\{.*?\}\}"#).expect("Invalid metrics regex")
});

/// Pull the metrics object out of a reply.
///
/// Only the first candidate object is considered. If it does not parse, the
/// reply is returned unchanged.
///
/// ```
/// use typecast::metrics::{extract_metrics, Level};
///
/// let reply = "Solid idea.\n{\"metrics\": {\"score\": 80, \"demand\": \"High\", \"competition\": \"Low\"}}";
/// let extracted = extract_metrics(reply);
/// assert_eq!(extracted.text, "Solid idea.");
/// assert_eq!(extracted.metrics.unwrap().market_demand, Level::High);
/// ```
pub fn extract_metrics(reply: &str) -> Extracted {
    let unchanged = || Extracted {
        text: reply.to_string(),
        metrics: None,
    };

    let Some(found) = METRICS_REGEX.find(reply) else {
        return unchanged();
    };

    match serde_json::from_str::<MetricsEnvelope>(found.as_str()) {
        Ok(envelope) => {
            let mut text = String::with_capacity(reply.len() - found.len());
            text.push_str(&reply[..found.start()]);
            text.push_str(&reply[found.end()..]);
            Extracted {
                text: text.trim().to_string(),
                metrics: Some(envelope.metrics.into()),
            }
        }
        Err(err) => {
            debug!(error = %err, "ignoring malformed metrics block");
            unchanged()
        }
    }
}
