//! Market-impact stage: estimate how much the news can move the market

use crate::config::PipelineConfig;
use async_trait::async_trait;
use finnews_core::{AnalysisState, MarketImpact, Sentiment, Stage};
use finnews_llm::{GenerationRequest, TextGenerator};
use std::sync::Arc;
use tracing::{info, warn};

fn build_prompt(content: &str, sentiment: Sentiment, tickers: &[String]) -> String {
    let ticker_context = if tickers.is_empty() {
        String::new()
    } else {
        format!(" The analysis involves: {}.", tickers.join(", "))
    };
    let sentiment_context = format!(" The sentiment is {sentiment}.");

    format!(
        r#"Evaluate the potential market impact of the following financial news content.{ticker_context}{sentiment_context}

Consider factors such as:
- High impact: Major corporate events (earnings surprises, M&A, regulatory changes), market-moving announcements
- Medium impact: Standard earnings reports, product launches, management changes, industry trends
- Low impact: Routine announcements, minor updates, general market commentary

Respond with ONLY one word: 'high', 'medium', or 'low'.

Content:
"""
{content}
"""

Market Impact:"#
    )
}

/// Third pipeline stage: writes `market_impact`
///
/// Sentiment and tickers only enrich the prompt context; they never branch
/// the logic. Failures and empty content resolve to low impact.
pub struct MarketImpactStage {
    generator: Arc<dyn TextGenerator>,
    config: Arc<PipelineConfig>,
}

impl MarketImpactStage {
    /// Create the stage
    pub fn new(generator: Arc<dyn TextGenerator>, config: Arc<PipelineConfig>) -> Self {
        Self { generator, config }
    }
}

#[async_trait]
impl Stage for MarketImpactStage {
    async fn run(&self, state: AnalysisState) -> AnalysisState {
        let content = state.cleaned_content();

        if content.is_empty() {
            warn!("No cleaned content found for market impact analysis");
            return state.with_market_impact(MarketImpact::Low);
        }

        let request = GenerationRequest::builder(&self.config.model)
            .prompt(build_prompt(
                content,
                state.sentiment_or_default(),
                state.tickers(),
            ))
            .temperature(self.config.impact_temperature)
            .max_output_tokens(self.config.impact_max_tokens)
            .build();

        let impact = match self.generator.generate(request).await {
            Ok(response) => MarketImpact::from_response(&response).unwrap_or_else(|| {
                warn!(%response, "Invalid impact response, defaulting to low");
                MarketImpact::Low
            }),
            Err(e) => {
                warn!(error = %e, "Impact generation failed, defaulting to low");
                MarketImpact::Low
            }
        };

        info!(%impact, "Market impact analysis complete");
        state.with_market_impact(impact)
    }

    fn name(&self) -> &'static str {
        "market-impact"
    }
}
