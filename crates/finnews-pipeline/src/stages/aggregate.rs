//! Aggregator stage: deterministic investment-signal decision
//!
//! Combines the classified sentiment, market impact, and risk list into one
//! of eleven canned decision strings plus a confidence score. This stage is
//! the only one that can mark an analysis incomplete: it does so when an
//! upstream field was never written, which cannot happen through the
//! pipeline runner but can when the stage is driven directly.

use async_trait::async_trait;
use finnews_core::{
    AnalysisQuality, AnalysisState, AnalysisSummary, ConfidenceFactor, Error, MarketImpact,
    Result, Sentiment, Stage, vocab,
};
use tracing::{info, warn};

/// Decision emitted by the fallback summary
pub const INCOMPLETE_DECISION: &str = "Unable to generate decision - Analysis incomplete";

/// Count the risks that belong to the high-risk categories
///
/// This count drives the decision-table branching. It is intentionally
/// distinct from [`reported_risk_score`], which the summary exposes.
pub fn significant_risk_count(risks: &[String]) -> usize {
    risks.iter().filter(|risk| vocab::is_high_risk(risk)).count()
}

/// Whether the risk list represents significant risk
///
/// True when at least one high-risk category is present and the `none`
/// sentinel is absent.
pub fn has_significant_risk(risks: &[String]) -> bool {
    significant_risk_count(risks) > 0 && !risks.iter().any(|risk| risk == vocab::NONE_RISK)
}

/// Count the risks other than the `none` sentinel
///
/// This is the `risk_score` surfaced in the summary.
pub fn reported_risk_score(risks: &[String]) -> usize {
    risks.iter().filter(|risk| *risk != vocab::NONE_RISK).count()
}

/// Map the classified signals to an investment decision
pub fn decide(sentiment: Sentiment, impact: MarketImpact, significant_risk: bool) -> &'static str {
    match sentiment {
        Sentiment::Positive => match impact {
            MarketImpact::High => {
                if significant_risk {
                    "Cautious Buy Signal - Positive sentiment but monitor identified risks"
                } else {
                    "Strong Buy Signal - Positive sentiment with high market impact and manageable risks"
                }
            }
            MarketImpact::Medium => {
                if significant_risk {
                    "Hold/Monitor - Positive sentiment offset by medium risks"
                } else {
                    "Moderate Buy Signal - Positive sentiment with medium impact"
                }
            }
            MarketImpact::Low => {
                "Weak Buy Signal - Positive sentiment but limited market impact expected"
            }
        },
        Sentiment::Negative => match impact {
            MarketImpact::High => "Strong Sell Signal - Negative sentiment with high market impact",
            MarketImpact::Medium => {
                "Moderate Sell/Avoid Signal - Negative sentiment with medium impact"
            }
            MarketImpact::Low => {
                "Monitor/Hold - Negative sentiment but limited market impact expected"
            }
        },
        Sentiment::Neutral => match impact {
            MarketImpact::High => {
                if significant_risk {
                    "Cautious Hold - Neutral sentiment but high impact and significant risks"
                } else {
                    "Monitor - Neutral sentiment with high potential impact"
                }
            }
            MarketImpact::Medium => "Hold - Neutral sentiment with medium impact",
            MarketImpact::Low => "No Action - Neutral sentiment with low market impact",
        },
    }
}

/// Collect the confidence factors that hold for this analysis
pub fn confidence_factors(
    sentiment: Sentiment,
    impact: MarketImpact,
    tickers: &[String],
) -> Vec<ConfidenceFactor> {
    let mut factors = Vec::new();
    if sentiment.is_directional() {
        factors.push(ConfidenceFactor::ClearSentiment);
    }
    if impact.is_measurable() {
        factors.push(ConfidenceFactor::MeasurableImpact);
    }
    if !tickers.is_empty() {
        factors.push(ConfidenceFactor::IdentifiedCompanies);
    }
    factors
}

/// Final pipeline stage: writes `final_analysis`
pub struct AggregatorStage;

impl AggregatorStage {
    /// Create the stage
    pub fn new() -> Self {
        Self
    }

    fn summarize(state: &AnalysisState) -> Result<AnalysisSummary> {
        let sentiment = state.sentiment().ok_or(Error::MissingField("sentiment"))?;
        let impact = state
            .market_impact()
            .ok_or(Error::MissingField("market_impact"))?;
        let risks = state.risks().ok_or(Error::MissingField("risks"))?.to_vec();
        let tickers = state.tickers().to_vec();

        let decision = decide(sentiment, impact, has_significant_risk(&risks)).to_string();
        let factors = confidence_factors(sentiment, impact, &tickers);

        Ok(AnalysisSummary {
            sentiment,
            impact_level: impact,
            risk_score: reported_risk_score(&risks),
            has_tickers: !tickers.is_empty(),
            risks,
            tickers,
            decision,
            confidence_score: factors.len() as f64 / 3.0,
            confidence_factors: factors,
            analysis_quality: AnalysisQuality::Complete,
        })
    }

    fn fallback_summary(state: &AnalysisState) -> AnalysisSummary {
        let risks = state
            .risks()
            .map_or_else(vocab::no_risks, <[String]>::to_vec);
        let tickers = state.tickers().to_vec();

        AnalysisSummary {
            sentiment: state.sentiment_or_default(),
            impact_level: state.market_impact_or_default(),
            risk_score: reported_risk_score(&risks),
            has_tickers: !tickers.is_empty(),
            risks,
            tickers,
            decision: INCOMPLETE_DECISION.to_string(),
            confidence_factors: Vec::new(),
            confidence_score: 0.0,
            analysis_quality: AnalysisQuality::Incomplete,
        }
    }
}

impl Default for AggregatorStage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Stage for AggregatorStage {
    async fn run(&self, state: AnalysisState) -> AnalysisState {
        let summary = match Self::summarize(&state) {
            Ok(summary) => {
                info!(
                    decision = %summary.decision,
                    confidence = summary.confidence_score,
                    "Analysis aggregated"
                );
                summary
            }
            Err(e) => {
                warn!(error = %e, "Aggregation failed, emitting incomplete summary");
                Self::fallback_summary(&state)
            }
        };

        state.with_final_analysis(summary)
    }

    fn name(&self) -> &'static str {
        "aggregator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finnews_core::NewsArticle;

    fn risks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_decision_table_all_cells() {
        use MarketImpact::{High, Low, Medium};
        use Sentiment::{Negative, Neutral, Positive};

        let cells: [(Sentiment, MarketImpact, bool, &str); 18] = [
            (Positive, High, false, "Strong Buy Signal - Positive sentiment with high market impact and manageable risks"),
            (Positive, High, true, "Cautious Buy Signal - Positive sentiment but monitor identified risks"),
            (Positive, Medium, false, "Moderate Buy Signal - Positive sentiment with medium impact"),
            (Positive, Medium, true, "Hold/Monitor - Positive sentiment offset by medium risks"),
            (Positive, Low, false, "Weak Buy Signal - Positive sentiment but limited market impact expected"),
            (Positive, Low, true, "Weak Buy Signal - Positive sentiment but limited market impact expected"),
            (Negative, High, false, "Strong Sell Signal - Negative sentiment with high market impact"),
            (Negative, High, true, "Strong Sell Signal - Negative sentiment with high market impact"),
            (Negative, Medium, false, "Moderate Sell/Avoid Signal - Negative sentiment with medium impact"),
            (Negative, Medium, true, "Moderate Sell/Avoid Signal - Negative sentiment with medium impact"),
            (Negative, Low, false, "Monitor/Hold - Negative sentiment but limited market impact expected"),
            (Negative, Low, true, "Monitor/Hold - Negative sentiment but limited market impact expected"),
            (Neutral, High, true, "Cautious Hold - Neutral sentiment but high impact and significant risks"),
            (Neutral, High, false, "Monitor - Neutral sentiment with high potential impact"),
            (Neutral, Medium, false, "Hold - Neutral sentiment with medium impact"),
            (Neutral, Medium, true, "Hold - Neutral sentiment with medium impact"),
            (Neutral, Low, false, "No Action - Neutral sentiment with low market impact"),
            (Neutral, Low, true, "No Action - Neutral sentiment with low market impact"),
        ];

        for (sentiment, impact, significant, expected) in cells {
            assert_eq!(decide(sentiment, impact, significant), expected);
        }
    }

    #[test]
    fn test_significant_risk_requires_high_category() {
        assert!(has_significant_risk(&risks(&["regulatory"])));
        assert!(has_significant_risk(&risks(&["market", "legal"])));
        assert!(!has_significant_risk(&risks(&["market", "cyber"])));
        assert!(!has_significant_risk(&risks(&["none"])));
    }

    #[test]
    fn test_none_sentinel_suppresses_significant_risk() {
        // The sentinel wins even when a high-risk category slipped through
        assert!(!has_significant_risk(&risks(&["regulatory", "none"])));
    }

    #[test]
    fn test_risk_scores_diverge() {
        let list = risks(&["market", "cyber", "regulatory"]);
        assert_eq!(reported_risk_score(&list), 3);
        assert_eq!(significant_risk_count(&list), 1);
    }

    #[test]
    fn test_confidence_factor_combinations() {
        let tsla = vec!["TSLA".to_string()];
        let none: Vec<String> = Vec::new();

        let all = confidence_factors(Sentiment::Positive, MarketImpact::High, &tsla);
        assert_eq!(all.len(), 3);

        let partial = confidence_factors(Sentiment::Neutral, MarketImpact::Medium, &none);
        assert_eq!(partial, [ConfidenceFactor::MeasurableImpact]);

        let empty = confidence_factors(Sentiment::Neutral, MarketImpact::Low, &none);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_confidence_score_is_factor_count_over_three() {
        for sentiment in Sentiment::ALL {
            for impact in MarketImpact::ALL {
                for tickers in [Vec::new(), vec!["AAPL".to_string()]] {
                    let factors = confidence_factors(sentiment, impact, &tickers);
                    let score = factors.len() as f64 / 3.0;
                    assert!((0.0..=1.0).contains(&score));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_stage_builds_complete_summary() {
        let state = AnalysisState::new(NewsArticle::new("h", "c"))
            .with_preprocessed("text".to_string(), vec!["TSLA".to_string()])
            .with_sentiment(Sentiment::Positive)
            .with_market_impact(MarketImpact::High)
            .with_risks(risks(&["market"]));

        let state = AggregatorStage::new().run(state).await;
        let summary = state.final_analysis().unwrap();

        assert_eq!(summary.analysis_quality, AnalysisQuality::Complete);
        assert_eq!(
            summary.decision,
            "Strong Buy Signal - Positive sentiment with high market impact and manageable risks"
        );
        assert_eq!(summary.risk_score, 1);
        assert!(summary.has_tickers);
        assert_eq!(summary.confidence_factors.len(), 3);
        assert!((summary.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_stage_falls_back_on_partial_state() {
        // Aggregator driven directly, without the upstream stages
        let state = AnalysisState::new(NewsArticle::new("h", "c"));
        let state = AggregatorStage::new().run(state).await;
        let summary = state.final_analysis().unwrap();

        assert_eq!(summary.analysis_quality, AnalysisQuality::Incomplete);
        assert_eq!(summary.decision, INCOMPLETE_DECISION);
        assert_eq!(summary.sentiment, Sentiment::Neutral);
        assert_eq!(summary.impact_level, MarketImpact::Low);
        assert_eq!(summary.risks, ["none"]);
        assert_eq!(summary.confidence_score, 0.0);
    }
}
