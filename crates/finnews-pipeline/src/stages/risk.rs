//! Entity-risk stage: enumerate risk categories mentioned in the article

use crate::config::PipelineConfig;
use async_trait::async_trait;
use finnews_core::{AnalysisState, Stage, vocab};
use finnews_llm::{GenerationRequest, TextGenerator};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{info, warn};

static BRACKETED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("list pattern is valid"));

fn build_prompt(content: &str, tickers: &[String]) -> String {
    let ticker_context = if tickers.is_empty() {
        String::new()
    } else {
        format!(" The analysis involves: {}.", tickers.join(", "))
    };

    format!(
        r#"Identify potential risks mentioned or implied in the following financial news content.{ticker_context}

Consider these risk categories:
- regulatory: Government regulations, compliance issues, policy changes
- geopolitical: International relations, trade wars, sanctions
- financial: Credit risks, liquidity issues, market volatility
- operational: Business operations, supply chain, management issues
- market: Competition, market share, industry trends
- legal: Lawsuits, litigation, legal disputes
- reputation: Brand damage, public relations issues
- cyber: Technology risks, data breaches, security issues

Respond with a comma-separated list of relevant risk categories (e.g., "regulatory, financial, market"). If no specific risks are identified, respond with "none".

Content:
"""
{content}
"""

Risks:"#
    )
}

/// Parse risk categories out of a free-text model response
///
/// Tiered strategies, first one that yields any token wins:
/// 1. a bracketed list-like substring, quotes stripped, split on commas
/// 2. the whole response split on the first separator found among comma,
///    semicolon, newline
/// 3. vocabulary categories that literally appear in the response
///
/// Tokens that are empty or mean "no risk" (none/no/nil/na/n/a) are dropped;
/// an empty result collapses to the `["none"]` sentinel list.
pub fn parse_risks(raw: &str) -> Vec<String> {
    let cleaned = raw.trim().to_lowercase();

    let mut risks: Vec<String> = Vec::new();

    if let Some(captures) = BRACKETED_LIST.captures(&cleaned) {
        let items = captures[1].replace(['\'', '"'], "");
        risks = items
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();
    }

    if risks.is_empty() {
        for separator in [',', ';', '\n'] {
            if cleaned.contains(separator) {
                risks = cleaned
                    .split(separator)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect();
                break;
            }
        }
    }

    if risks.is_empty() {
        risks = vocab::RISK_CATEGORIES
            .iter()
            .filter(|category| cleaned.contains(**category))
            .map(|category| (*category).to_string())
            .collect();
    }

    let filtered: Vec<String> = risks
        .into_iter()
        .filter(|risk| !risk.is_empty() && !vocab::NON_RISK_TOKENS.contains(&risk.as_str()))
        .collect();

    if filtered.is_empty() { vocab::no_risks() } else { filtered }
}

/// Fourth pipeline stage: writes `risks`
///
/// Failures and empty content resolve to the `["none"]` sentinel, so the
/// risks list is never empty.
pub struct EntityRiskStage {
    generator: Arc<dyn TextGenerator>,
    config: Arc<PipelineConfig>,
}

impl EntityRiskStage {
    /// Create the stage
    pub fn new(generator: Arc<dyn TextGenerator>, config: Arc<PipelineConfig>) -> Self {
        Self { generator, config }
    }
}

#[async_trait]
impl Stage for EntityRiskStage {
    async fn run(&self, state: AnalysisState) -> AnalysisState {
        let content = state.cleaned_content();

        if content.is_empty() {
            warn!("No cleaned content found for risk analysis");
            return state.with_risks(vocab::no_risks());
        }

        let request = GenerationRequest::builder(&self.config.model)
            .prompt(build_prompt(content, state.tickers()))
            .temperature(self.config.risk_temperature)
            .max_output_tokens(self.config.risk_max_tokens)
            .build();

        let risks = match self.generator.generate(request).await {
            Ok(response) => parse_risks(&response),
            Err(e) => {
                warn!(error = %e, "Risk generation failed, defaulting to none");
                vocab::no_risks()
            }
        };

        info!(risks = risks.join(", "), "Risk analysis complete");
        state.with_risks(risks)
    }

    fn name(&self) -> &'static str {
        "entity-risk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockGenerator;
    use finnews_core::NewsArticle;
    use finnews_llm::LlmError;

    #[test]
    fn test_comma_separated_response() {
        assert_eq!(parse_risks("regulatory, financial"), ["regulatory", "financial"]);
    }

    #[test]
    fn test_bracketed_list_response() {
        assert_eq!(
            parse_risks(r#"["regulatory", 'market']"#),
            ["regulatory", "market"]
        );
    }

    #[test]
    fn test_newline_and_semicolon_separators() {
        assert_eq!(parse_risks("legal; cyber"), ["legal", "cyber"]);
        assert_eq!(parse_risks("operational\nreputation"), ["operational", "reputation"]);
    }

    #[test]
    fn test_vocabulary_scan_fallback() {
        assert_eq!(
            parse_risks("There is clear regulatory pressure here"),
            ["regulatory"]
        );
    }

    #[test]
    fn test_none_sentinel() {
        assert_eq!(parse_risks("none"), ["none"]);
        assert_eq!(parse_risks("N/A"), ["none"]);
    }

    #[test]
    fn test_garbled_text_without_categories() {
        assert_eq!(parse_risks("I see big problems here"), ["none"]);
    }

    #[test]
    fn test_mixed_none_tokens_are_filtered() {
        // "no" is filtered; the surviving category wins over the sentinel
        assert_eq!(parse_risks("no, financial"), ["financial"]);
    }

    #[test]
    fn test_case_normalization() {
        assert_eq!(parse_risks("REGULATORY, Geopolitical"), ["regulatory", "geopolitical"]);
    }

    fn state_with_content(content: &str) -> AnalysisState {
        AnalysisState::new(NewsArticle::new("h", "c"))
            .with_preprocessed(content.to_string(), Vec::new())
    }

    fn stage_with(mock: MockGenerator) -> EntityRiskStage {
        EntityRiskStage::new(Arc::new(mock), Arc::new(PipelineConfig::default()))
    }

    #[tokio::test]
    async fn test_stage_parses_response() {
        let mut mock = MockGenerator::new();
        mock.expect_generate()
            .withf(|request| request.prompt.ends_with("Risks:") && request.temperature == 0.3)
            .returning(|_| Ok("regulatory, financial".to_string()));

        let state = stage_with(mock).run(state_with_content("EU probe widens")).await;
        assert_eq!(
            state.risks(),
            Some(&["regulatory".to_string(), "financial".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_generator_error_defaults_to_none() {
        let mut mock = MockGenerator::new();
        mock.expect_generate()
            .returning(|_| Err(LlmError::RequestFailed("timeout".to_string())));

        let state = stage_with(mock).run(state_with_content("EU probe widens")).await;
        assert_eq!(state.risks(), Some(&["none".to_string()][..]));
    }

    #[tokio::test]
    async fn test_empty_content_skips_generator() {
        let mut mock = MockGenerator::new();
        mock.expect_generate().times(0);

        let state = stage_with(mock).run(state_with_content("")).await;
        assert_eq!(state.risks(), Some(&["none".to_string()][..]));
    }
}
