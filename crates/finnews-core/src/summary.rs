//! Final analysis summary types

use crate::state::{MarketImpact, Sentiment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Independent signals contributing to the confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceFactor {
    /// Sentiment resolved to a directional (positive/negative) value
    ClearSentiment,
    /// Market impact resolved to high or medium
    MeasurableImpact,
    /// At least one ticker symbol was extracted
    IdentifiedCompanies,
}

impl ConfidenceFactor {
    /// Canonical snake_case token
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceFactor::ClearSentiment => "clear_sentiment",
            ConfidenceFactor::MeasurableImpact => "measurable_impact",
            ConfidenceFactor::IdentifiedCompanies => "identified_companies",
        }
    }
}

impl fmt::Display for ConfidenceFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the aggregator produced a full summary or its fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisQuality {
    Complete,
    Incomplete,
}

/// The aggregated analysis of one article
///
/// Written exactly once by the aggregator stage and never mutated after.
/// `risk_score` counts risks other than the `none` sentinel; it is distinct
/// from the high-risk-category count the decision table branches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Classified sentiment
    pub sentiment: Sentiment,

    /// Classified market impact
    pub impact_level: MarketImpact,

    /// Identified risk tokens (never empty; `["none"]` when risk-free)
    pub risks: Vec<String>,

    /// Extracted ticker symbols
    pub tickers: Vec<String>,

    /// One of the canned investment-signal decision strings
    pub decision: String,

    /// Count of risks other than the `none` sentinel
    pub risk_score: usize,

    /// Whether any ticker symbols were extracted
    pub has_tickers: bool,

    /// The confidence factors that held for this analysis
    pub confidence_factors: Vec<ConfidenceFactor>,

    /// `confidence_factors.len() / 3`, in [0, 1]
    pub confidence_score: f64,

    /// Complete, or incomplete when the aggregator fell back
    pub analysis_quality: AnalysisQuality,
}
