//! Evaluation harness for the analysis pipeline
//!
//! Runs a set of labeled articles through the pipeline and scores the
//! predictions: sentiment and impact as exact matches, risks as the overlap
//! ratio with the expected categories.

use crate::pipeline::NewsPipeline;
use chrono::Utc;
use finnews_core::{AnalysisSummary, MarketImpact, NewsArticle, Sentiment, vocab};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// A labeled article for evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    /// The input article
    pub article: NewsArticle,
    /// Expected sentiment classification
    pub expected_sentiment: Sentiment,
    /// Expected market-impact classification
    pub expected_impact: MarketImpact,
    /// Expected risk categories (or `["none"]`)
    pub expected_risks: Vec<String>,
}

/// Scores for a single case
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CaseMetrics {
    /// Predicted sentiment matched the label
    pub sentiment_correct: bool,
    /// Predicted impact matched the label
    pub impact_correct: bool,
    /// Fraction of expected risk categories the prediction covered
    pub risk_overlap: f64,
    /// Mean of the three scores above
    pub overall_accuracy: f64,
}

/// One evaluated case with its prediction and scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// The evaluated case
    pub case: EvalCase,
    /// What the pipeline predicted
    pub predicted: AnalysisSummary,
    /// Scores for this case
    pub metrics: CaseMetrics,
}

/// Aggregated evaluation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Per-case results
    pub results: Vec<CaseResult>,
    /// Mean sentiment accuracy over all cases
    pub sentiment_accuracy: f64,
    /// Mean impact accuracy over all cases
    pub impact_accuracy: f64,
    /// Mean risk overlap over all cases
    pub risk_accuracy: f64,
    /// Mean overall accuracy over all cases
    pub overall_accuracy: f64,
    /// When the evaluation ran (RFC 3339)
    pub evaluated_at: String,
}

/// Score one prediction against its label
///
/// The risk overlap is the share of expected categories present in the
/// prediction. A `["none"]` label scores 1.0 only when the prediction is
/// also risk-free.
pub fn score_prediction(predicted: &AnalysisSummary, case: &EvalCase) -> CaseMetrics {
    let sentiment_correct = predicted.sentiment == case.expected_sentiment;
    let impact_correct = predicted.impact_level == case.expected_impact;

    let predicted_risks: HashSet<&str> = predicted.risks.iter().map(String::as_str).collect();
    let expected_risks: HashSet<&str> = case.expected_risks.iter().map(String::as_str).collect();

    let risk_overlap = if expected_risks.contains(vocab::NONE_RISK) {
        if predicted_risks.contains(vocab::NONE_RISK) { 1.0 } else { 0.0 }
    } else if expected_risks.is_empty() {
        0.0
    } else {
        predicted_risks.intersection(&expected_risks).count() as f64 / expected_risks.len() as f64
    };

    let overall_accuracy = (f64::from(u8::from(sentiment_correct))
        + f64::from(u8::from(impact_correct))
        + risk_overlap)
        / 3.0;

    CaseMetrics {
        sentiment_correct,
        impact_correct,
        risk_overlap,
        overall_accuracy,
    }
}

/// The built-in three-case evaluation set
pub fn builtin_cases() -> Vec<EvalCase> {
    vec![
        EvalCase {
            article: NewsArticle::new(
                "Tesla Reports Record Quarterly Earnings, Beats Analyst Expectations",
                "Tesla Inc. (NASDAQ: TSLA) announced record quarterly earnings of $3.2 billion, \
                 significantly beating analyst expectations of $2.8 billion. The electric vehicle \
                 maker attributed the strong performance to increased production capacity and \
                 growing demand for Model 3 and Model Y vehicles.",
            )
            .with_article_id("test_001")
            .with_published_at("2024-01-15"),
            expected_sentiment: Sentiment::Positive,
            expected_impact: MarketImpact::High,
            expected_risks: vec!["market".to_string()],
        },
        EvalCase {
            article: NewsArticle::new(
                "Apple Faces Regulatory Challenges in European Union Over App Store Practices",
                "Apple Inc. is facing increased regulatory scrutiny from the European Union \
                 regarding its App Store policies. The EU is investigating potential \
                 anti-competitive practices and may impose significant fines. This could impact \
                 Apple's revenue from its services segment.",
            )
            .with_article_id("test_002")
            .with_published_at("2024-01-16"),
            expected_sentiment: Sentiment::Negative,
            expected_impact: MarketImpact::Medium,
            expected_risks: vec!["regulatory".to_string(), "financial".to_string()],
        },
        EvalCase {
            article: NewsArticle::new(
                "Microsoft Announces Dividend Increase for Shareholders",
                "Microsoft Corporation announced a 5% increase in its quarterly dividend, \
                 reflecting the company's strong cash position and commitment to returning value \
                 to shareholders. The tech giant continues to benefit from growing cloud \
                 computing revenues.",
            )
            .with_article_id("test_003")
            .with_published_at("2024-01-17"),
            expected_sentiment: Sentiment::Positive,
            expected_impact: MarketImpact::Low,
            expected_risks: vec!["none".to_string()],
        },
    ]
}

/// Run the pipeline over a case set and aggregate the scores
pub async fn run_evaluation(pipeline: &NewsPipeline, cases: Vec<EvalCase>) -> EvaluationReport {
    info!(cases = cases.len(), "Running evaluation");

    let mut results = Vec::with_capacity(cases.len());

    for case in cases {
        let state = pipeline.analyze(case.article.clone()).await;
        // The runner always writes final_analysis
        let Some(predicted) = state.into_final_analysis() else {
            continue;
        };
        let metrics = score_prediction(&predicted, &case);

        info!(
            headline = %case.article.headline,
            overall = metrics.overall_accuracy,
            "Case evaluated"
        );

        results.push(CaseResult {
            case,
            predicted,
            metrics,
        });
    }

    let count = results.len().max(1) as f64;
    let mean = |value: f64| value / count;

    let sentiment_total: f64 = results
        .iter()
        .map(|r| f64::from(u8::from(r.metrics.sentiment_correct)))
        .sum();
    let impact_total: f64 = results
        .iter()
        .map(|r| f64::from(u8::from(r.metrics.impact_correct)))
        .sum();
    let risk_total: f64 = results.iter().map(|r| r.metrics.risk_overlap).sum();
    let overall_total: f64 = results.iter().map(|r| r.metrics.overall_accuracy).sum();

    EvaluationReport {
        sentiment_accuracy: mean(sentiment_total),
        impact_accuracy: mean(impact_total),
        risk_accuracy: mean(risk_total),
        overall_accuracy: mean(overall_total),
        evaluated_at: Utc::now().to_rfc3339(),
        results,
    }
}

impl EvaluationReport {
    /// Write the report as pretty JSON into `dir`
    ///
    /// The file name carries a timestamp so repeated runs never clobber
    /// each other. Returns the written path.
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let file_name = format!("evaluation_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
        let path = dir.join(file_name);

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&path, json)?;

        info!(path = %path.display(), "Evaluation report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::test_support::MockGenerator;
    use finnews_core::{AnalysisQuality, ConfidenceFactor};
    use std::sync::Arc;

    fn summary(
        sentiment: Sentiment,
        impact: MarketImpact,
        risks: &[&str],
    ) -> AnalysisSummary {
        AnalysisSummary {
            sentiment,
            impact_level: impact,
            risks: risks.iter().map(|s| (*s).to_string()).collect(),
            tickers: Vec::new(),
            decision: String::new(),
            risk_score: 0,
            has_tickers: false,
            confidence_factors: Vec::<ConfidenceFactor>::new(),
            confidence_score: 0.0,
            analysis_quality: AnalysisQuality::Complete,
        }
    }

    fn case(
        sentiment: Sentiment,
        impact: MarketImpact,
        risks: &[&str],
    ) -> EvalCase {
        EvalCase {
            article: NewsArticle::new("h", "c"),
            expected_sentiment: sentiment,
            expected_impact: impact,
            expected_risks: risks.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn test_perfect_prediction() {
        let metrics = score_prediction(
            &summary(Sentiment::Positive, MarketImpact::High, &["market"]),
            &case(Sentiment::Positive, MarketImpact::High, &["market"]),
        );
        assert!(metrics.sentiment_correct);
        assert!(metrics.impact_correct);
        assert_eq!(metrics.risk_overlap, 1.0);
        assert_eq!(metrics.overall_accuracy, 1.0);
    }

    #[test]
    fn test_partial_risk_overlap() {
        let metrics = score_prediction(
            &summary(Sentiment::Negative, MarketImpact::Medium, &["regulatory"]),
            &case(Sentiment::Negative, MarketImpact::Medium, &["regulatory", "financial"]),
        );
        assert_eq!(metrics.risk_overlap, 0.5);
        assert!((metrics.overall_accuracy - 2.5 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_none_label_requires_none_prediction() {
        let hit = score_prediction(
            &summary(Sentiment::Positive, MarketImpact::Low, &["none"]),
            &case(Sentiment::Positive, MarketImpact::Low, &["none"]),
        );
        assert_eq!(hit.risk_overlap, 1.0);

        let miss = score_prediction(
            &summary(Sentiment::Positive, MarketImpact::Low, &["market"]),
            &case(Sentiment::Positive, MarketImpact::Low, &["none"]),
        );
        assert_eq!(miss.risk_overlap, 0.0);
    }

    #[test]
    fn test_builtin_cases_shape() {
        let cases = builtin_cases();
        assert_eq!(cases.len(), 3);
        assert!(cases.iter().all(|c| !c.article.is_empty()));
        assert!(cases.iter().all(|c| !c.expected_risks.is_empty()));
    }

    #[tokio::test]
    async fn test_run_evaluation_aggregates() {
        let mut mock = MockGenerator::new();
        // Sentiment/impact/risk responses for all three built-in cases
        mock.expect_generate().returning(|request| {
            if request.prompt.ends_with("Sentiment:") {
                Ok("positive".to_string())
            } else if request.prompt.ends_with("Market Impact:") {
                Ok("high".to_string())
            } else {
                Ok("market".to_string())
            }
        });

        let pipeline = NewsPipeline::new(Arc::new(mock), PipelineConfig::default());
        let report = run_evaluation(&pipeline, builtin_cases()).await;

        assert_eq!(report.results.len(), 3);
        // Cases 1 and 3 expect positive sentiment, case 2 negative
        assert!((report.sentiment_accuracy - 2.0 / 3.0).abs() < 1e-9);
        // Only case 1 expects high impact
        assert!((report.impact_accuracy - 1.0 / 3.0).abs() < 1e-9);
        assert!(report.overall_accuracy > 0.0 && report.overall_accuracy < 1.0);
    }
}
