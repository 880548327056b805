//! Command-line interface for the finnews-rs analysis pipeline

mod output;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use finnews_core::NewsArticle;
use finnews_llm::providers::GeminiProvider;
use finnews_pipeline::{NewsPipeline, PipelineConfig, eval};
use finnews_search::SerperClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "finnews")]
#[command(about = "Financial news analysis pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one article, given directly or fetched via a search query
    Analyze {
        /// Article headline
        #[arg(long, requires = "content", conflicts_with = "query")]
        headline: Option<String>,

        /// Article body text
        #[arg(long, requires = "headline")]
        content: Option<String>,

        /// Search query; the top result is analyzed
        #[arg(long)]
        query: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List news articles for a search query
    Search {
        /// Search query
        query: String,

        /// Number of results to fetch
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,
    },

    /// Run the built-in evaluation cases through the pipeline
    Evaluate {
        /// Directory for the JSON results file
        #[arg(long, default_value = "evaluation/results")]
        out_dir: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn build_pipeline() -> anyhow::Result<NewsPipeline> {
    let generator =
        GeminiProvider::from_env().context("Gemini provider configuration is incomplete")?;
    let config = PipelineConfig::default().with_env_model();
    config.validate().context("Invalid pipeline configuration")?;

    Ok(NewsPipeline::new(Arc::new(generator), config))
}

async fn resolve_article(
    headline: Option<String>,
    content: Option<String>,
    query: Option<String>,
) -> anyhow::Result<NewsArticle> {
    if let (Some(headline), Some(content)) = (headline, content) {
        return Ok(NewsArticle::new(headline, content));
    }

    let Some(query) = query else {
        bail!("provide either --headline with --content, or --query");
    };

    let client = SerperClient::from_env().context("Search configuration is incomplete")?;
    let articles = client
        .search_news(&query, 1)
        .await
        .context("News search failed")?;

    articles
        .into_iter()
        .next()
        .with_context(|| format!("No articles found for query: {query}"))
}

async fn run_analyze(
    headline: Option<String>,
    content: Option<String>,
    query: Option<String>,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let article = resolve_article(headline, content, query).await?;
    let headline = article.headline.clone();

    let pipeline = build_pipeline()?;
    let state = pipeline.analyze(article).await;
    let Some(summary) = state.final_analysis() else {
        bail!("pipeline returned no analysis");
    };

    let rendered = match format {
        OutputFormat::Table => format!("{}\n", output::summary_table(&headline, summary)),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(summary)?),
        OutputFormat::Csv => output::summary_csv(&headline, summary),
    };

    match out {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Analysis written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

async fn run_search(query: String, limit: usize) -> anyhow::Result<()> {
    let client = SerperClient::from_env().context("Search configuration is incomplete")?;
    let articles = client
        .search_news(&query, limit)
        .await
        .context("News search failed")?;

    if articles.is_empty() {
        println!("No articles found for: {query}");
        return Ok(());
    }

    println!("{}", output::articles_table(&articles));
    Ok(())
}

async fn run_evaluate(out_dir: PathBuf) -> anyhow::Result<()> {
    let pipeline = build_pipeline()?;
    let report = eval::run_evaluation(&pipeline, eval::builtin_cases()).await;

    println!("Sentiment accuracy: {:.2}", report.sentiment_accuracy);
    println!("Impact accuracy:    {:.2}", report.impact_accuracy);
    println!("Risk accuracy:      {:.2}", report.risk_accuracy);
    println!("Overall accuracy:   {:.2}", report.overall_accuracy);

    let path = report
        .write_to_dir(&out_dir)
        .context("Failed to write evaluation report")?;
    println!("Report: {}", path.display());

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    finnews_utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            headline,
            content,
            query,
            format,
            out,
        } => run_analyze(headline, content, query, format, out).await,
        Command::Search { query, limit } => run_search(query, limit).await,
        Command::Evaluate { out_dir } => run_evaluate(out_dir).await,
    }
}
