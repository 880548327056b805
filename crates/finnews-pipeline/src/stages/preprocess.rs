//! Preprocessing stage: ticker extraction and content cleaning

use async_trait::async_trait;
use finnews_core::{AnalysisState, Stage, vocab};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{info, warn};

/// Ordered ticker patterns, most specific first
///
/// Matching is case-insensitive; captured symbols are uppercased before the
/// denylist check.
static TICKER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\(NASDAQ:\s*([A-Z]{1,5})\)", // (NASDAQ: TSLA)
        r"(?i)\(NYSE:\s*([A-Z]{1,5})\)",   // (NYSE: AAPL)
        r"(?i)\(([A-Z]{1,5})\)",           // (TSLA)
        r"(?i)\$([A-Z]{1,5})\b",           // $TSLA
        r"(?i)\b([A-Z]{1,5})\s+stock\b",   // TSLA stock
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("ticker pattern is valid"))
    .collect()
});

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static BRACKETED_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("bracket pattern is valid"));

/// Extract stock ticker symbols from article text
///
/// Applies the patterns in order, uppercases every match, drops denylisted
/// words (CEO, SEC, ...), and dedups while preserving first-seen order.
pub fn extract_tickers(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tickers = Vec::new();

    for pattern in TICKER_PATTERNS.iter() {
        for captures in pattern.captures_iter(content) {
            let symbol = captures[1].to_uppercase();
            if vocab::TICKER_DENYLIST.contains(&symbol.as_str()) {
                continue;
            }
            if seen.insert(symbol.clone()) {
                tickers.push(symbol);
            }
        }
    }

    tickers
}

/// Clean and normalize article text
///
/// Strips `[...]` annotations and the `(Reuters)` / `(AP)` wire-service
/// tags, then collapses whitespace runs and trims, so the output never
/// carries the gaps the removals leave behind.
pub fn clean_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let without_tags = BRACKETED_TAGS
        .replace_all(content, "")
        .replace("(Reuters)", "")
        .replace("(AP)", "");
    WHITESPACE_RUNS
        .replace_all(without_tags.trim(), " ")
        .into_owned()
}

/// First pipeline stage: derives `cleaned_content` and `tickers`
///
/// Purely textual, no external calls. An article with no analyzable text
/// yields empty output so the downstream stages short-circuit without
/// touching the LLM.
pub struct PreprocessingStage;

impl PreprocessingStage {
    /// Create the stage
    pub fn new() -> Self {
        Self
    }
}

impl Default for PreprocessingStage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Stage for PreprocessingStage {
    async fn run(&self, state: AnalysisState) -> AnalysisState {
        let article = state.news();

        if article.is_empty() {
            warn!("No news content found in state");
            return state.with_preprocessed(String::new(), Vec::new());
        }

        let full_content = format!("{}. {}", article.headline, article.content);
        let full_content = full_content.trim();

        let tickers = extract_tickers(full_content);
        let cleaned_content = clean_content(full_content);

        info!(
            tickers = tickers.len(),
            characters = cleaned_content.len(),
            "Preprocessing complete"
        );

        state.with_preprocessed(cleaned_content, tickers)
    }

    fn name(&self) -> &'static str {
        "preprocessing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finnews_core::NewsArticle;

    #[test]
    fn test_exchange_qualified_tickers() {
        let tickers = extract_tickers("Tesla Inc. (NASDAQ: TSLA) and Apple (NYSE: AAPL) rallied");
        assert_eq!(tickers, ["TSLA", "AAPL"]);
    }

    #[test]
    fn test_bare_dollar_and_stock_suffix_patterns() {
        assert_eq!(extract_tickers("Shares of (MSFT) climbed"), ["MSFT"]);
        assert_eq!(extract_tickers("Traders piled into $NVDA today"), ["NVDA"]);
        assert_eq!(extract_tickers("GME stock surged again"), ["GME"]);
    }

    #[test]
    fn test_case_insensitive_match_uppercases() {
        assert_eq!(extract_tickers("buy $tsla now"), ["TSLA"]);
    }

    #[test]
    fn test_denylist_filters_false_positives() {
        let tickers = extract_tickers("The CEO met the SEC about the IPO (AI)");
        assert!(tickers.is_empty());
    }

    #[test]
    fn test_duplicates_removed() {
        let tickers = extract_tickers("(NASDAQ: TSLA) rose while $TSLA shorts covered");
        assert_eq!(tickers, ["TSLA"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let content = "Tesla (NASDAQ: TSLA) and $AAPL moved on FDA news";
        assert_eq!(extract_tickers(content), extract_tickers(content));
    }

    #[test]
    fn test_clean_content_collapses_whitespace() {
        assert_eq!(clean_content("a  b\n\tc "), "a b c");
    }

    #[test]
    fn test_clean_content_strips_tags() {
        assert_eq!(
            clean_content("NEW YORK (Reuters) Markets [breaking] rallied (AP) today"),
            "NEW YORK Markets rallied today"
        );
    }

    #[test]
    fn test_clean_content_empty() {
        assert_eq!(clean_content(""), "");
    }

    #[tokio::test]
    async fn test_stage_populates_state() {
        let article = NewsArticle::new(
            "Tesla Reports Record Quarterly Earnings",
            "Tesla Inc. (NASDAQ: TSLA) announced record earnings.",
        );
        let state = PreprocessingStage::new().run(AnalysisState::new(article)).await;

        assert_eq!(state.tickers(), ["TSLA".to_string()]);
        assert!(state.cleaned_content().starts_with("Tesla Reports Record"));
    }

    #[tokio::test]
    async fn test_stage_handles_empty_article() {
        let state = PreprocessingStage::new()
            .run(AnalysisState::new(NewsArticle::new("", "")))
            .await;

        assert_eq!(state.cleaned_content(), "");
        assert!(state.tickers().is_empty());
    }
}
