//! Output rendering for analysis results

use comfy_table::{Cell, Table, presets::UTF8_FULL};
use finnews_core::{AnalysisSummary, NewsArticle};

/// Render a summary as a two-column terminal table
pub fn summary_table(headline: &str, summary: &AnalysisSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec![Cell::new("Headline"), Cell::new(headline)]);
    table.add_row(vec![
        Cell::new("Sentiment"),
        Cell::new(summary.sentiment.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Impact"),
        Cell::new(summary.impact_level.to_string()),
    ]);
    table.add_row(vec![Cell::new("Risks"), Cell::new(summary.risks.join(", "))]);
    table.add_row(vec![
        Cell::new("Tickers"),
        Cell::new(summary.tickers.join(", ")),
    ]);
    table.add_row(vec![Cell::new("Decision"), Cell::new(&summary.decision)]);
    table.add_row(vec![
        Cell::new("Confidence"),
        Cell::new(format!("{:.2}", summary.confidence_score)),
    ]);

    table
}

/// Render a list of search results as a terminal table
pub fn articles_table(articles: &[NewsArticle]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Headline", "Source", "Published"]);

    for (index, article) in articles.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&article.headline),
            Cell::new(article.source.as_deref().unwrap_or("-")),
            Cell::new(&article.published_at),
        ]);
    }

    table
}

/// Flatten a summary into a single CSV record
///
/// Columns match the session-export format: headline, sentiment,
/// impact_level, decision, risks, tickers, confidence_score.
pub fn summary_csv(headline: &str, summary: &AnalysisSummary) -> String {
    let header = "headline,sentiment,impact_level,decision,risks,tickers,confidence_score";
    let row = [
        csv_field(headline),
        csv_field(summary.sentiment.as_str()),
        csv_field(summary.impact_level.as_str()),
        csv_field(&summary.decision),
        csv_field(&summary.risks.join(", ")),
        csv_field(&summary.tickers.join(", ")),
        format!("{:.2}", summary.confidence_score),
    ]
    .join(",");

    format!("{header}\n{row}\n")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
