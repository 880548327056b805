//! Analysis state threaded through the pipeline
//!
//! `AnalysisState` is an append-only record: every stage reads the fields
//! written by earlier stages and writes exactly one field of its own. Stages
//! consume the state by value and return the updated value, so there is no
//! shared mutation between stages.

use crate::article::NewsArticle;
use crate::summary::AnalysisSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Financial sentiment of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// All variants in response-repair scan order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Canonical lowercase token
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Parse a model response, repairing near-misses
    ///
    /// Lowercases and trims the response, then accepts an exact token match.
    /// Otherwise scans for any valid token as a substring, in the fixed
    /// order positive, negative, neutral. Returns `None` when no token is
    /// present so the caller can apply its default.
    pub fn from_response(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| cleaned == s.as_str())
            .or_else(|| Self::ALL.into_iter().find(|s| cleaned.contains(s.as_str())))
    }

    /// Whether the sentiment is a clear directional signal
    pub fn is_directional(self) -> bool {
        matches!(self, Sentiment::Positive | Sentiment::Negative)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected market impact of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketImpact {
    High,
    Medium,
    #[default]
    Low,
}

impl MarketImpact {
    /// All variants in response-repair scan order
    pub const ALL: [MarketImpact; 3] =
        [MarketImpact::High, MarketImpact::Medium, MarketImpact::Low];

    /// Canonical lowercase token
    pub fn as_str(self) -> &'static str {
        match self {
            MarketImpact::High => "high",
            MarketImpact::Medium => "medium",
            MarketImpact::Low => "low",
        }
    }

    /// Parse a model response, repairing near-misses
    ///
    /// Same policy as [`Sentiment::from_response`], with the scan order
    /// high, medium, low.
    pub fn from_response(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|i| cleaned == i.as_str())
            .or_else(|| Self::ALL.into_iter().find(|i| cleaned.contains(i.as_str())))
    }

    /// Whether the impact is large enough to count toward confidence
    pub fn is_measurable(self) -> bool {
        matches!(self, MarketImpact::High | MarketImpact::Medium)
    }
}

impl fmt::Display for MarketImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-article analysis state
///
/// Fields other than `news` start unset and are written once each as the
/// pipeline advances. Accessors resolve unset fields to the documented
/// defaults (empty content, no tickers, neutral sentiment, low impact).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisState {
    news: NewsArticle,
    cleaned_content: Option<String>,
    tickers: Option<Vec<String>>,
    sentiment: Option<Sentiment>,
    market_impact: Option<MarketImpact>,
    risks: Option<Vec<String>>,
    final_analysis: Option<AnalysisSummary>,
}

impl AnalysisState {
    /// Create the initial state for an article
    pub fn new(news: NewsArticle) -> Self {
        Self {
            news,
            cleaned_content: None,
            tickers: None,
            sentiment: None,
            market_impact: None,
            risks: None,
            final_analysis: None,
        }
    }

    /// The input article
    pub fn news(&self) -> &NewsArticle {
        &self.news
    }

    /// Normalized article text, empty until preprocessing has run
    pub fn cleaned_content(&self) -> &str {
        self.cleaned_content.as_deref().unwrap_or("")
    }

    /// Extracted ticker symbols, empty until preprocessing has run
    pub fn tickers(&self) -> &[String] {
        self.tickers.as_deref().unwrap_or(&[])
    }

    /// Classified sentiment, if the sentiment stage has run
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }

    /// Sentiment resolved to its neutral default
    pub fn sentiment_or_default(&self) -> Sentiment {
        self.sentiment.unwrap_or_default()
    }

    /// Classified market impact, if the impact stage has run
    pub fn market_impact(&self) -> Option<MarketImpact> {
        self.market_impact
    }

    /// Market impact resolved to its low default
    pub fn market_impact_or_default(&self) -> MarketImpact {
        self.market_impact.unwrap_or_default()
    }

    /// Identified risk tokens, if the entity-risk stage has run
    pub fn risks(&self) -> Option<&[String]> {
        self.risks.as_deref()
    }

    /// The final analysis summary, if the aggregator has run
    pub fn final_analysis(&self) -> Option<&AnalysisSummary> {
        self.final_analysis.as_ref()
    }

    /// Consume the state, yielding the final analysis summary
    pub fn into_final_analysis(self) -> Option<AnalysisSummary> {
        self.final_analysis
    }

    /// Record the preprocessing output
    pub fn with_preprocessed(mut self, cleaned_content: String, tickers: Vec<String>) -> Self {
        self.cleaned_content = Some(cleaned_content);
        self.tickers = Some(tickers);
        self
    }

    /// Record the sentiment classification
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Record the market-impact classification
    pub fn with_market_impact(mut self, impact: MarketImpact) -> Self {
        self.market_impact = Some(impact);
        self
    }

    /// Record the identified risks
    pub fn with_risks(mut self, risks: Vec<String>) -> Self {
        self.risks = Some(risks);
        self
    }

    /// Record the final analysis summary
    pub fn with_final_analysis(mut self, summary: AnalysisSummary) -> Self {
        self.final_analysis = Some(summary);
        self
    }
}
