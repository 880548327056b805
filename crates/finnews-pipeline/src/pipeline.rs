//! Sequential pipeline runner

use crate::config::PipelineConfig;
use crate::stages::{
    AggregatorStage, EntityRiskStage, MarketImpactStage, PreprocessingStage, SentimentStage,
};
use finnews_core::{AnalysisState, NewsArticle, Stage};
use finnews_llm::TextGenerator;
use std::sync::Arc;
use tracing::debug;

/// The fixed-topology news analysis pipeline
///
/// Runs the five stages strictly in order, threading one state value
/// through them. There is no retry between stages and no way for a run to
/// abort: every stage resolves its own failures to a safe default, so the
/// returned state always carries a populated `final_analysis`.
///
/// Each call to [`analyze`](Self::analyze) owns its state; concurrent calls
/// on the same pipeline are independent runs.
pub struct NewsPipeline {
    stages: Vec<Arc<dyn Stage>>,
}

impl NewsPipeline {
    /// Build the pipeline for a text generator and configuration
    pub fn new(generator: Arc<dyn TextGenerator>, config: PipelineConfig) -> Self {
        let config = Arc::new(config);
        Self {
            stages: vec![
                Arc::new(PreprocessingStage::new()),
                Arc::new(SentimentStage::new(Arc::clone(&generator), Arc::clone(&config))),
                Arc::new(MarketImpactStage::new(
                    Arc::clone(&generator),
                    Arc::clone(&config),
                )),
                Arc::new(EntityRiskStage::new(generator, config)),
                Arc::new(AggregatorStage::new()),
            ],
        }
    }

    /// Analyze a single article
    ///
    /// The single public entry point of the core: takes the article record
    /// and returns the full final state, `final_analysis` included.
    pub async fn analyze(&self, article: NewsArticle) -> AnalysisState {
        let mut state = AnalysisState::new(article);

        for stage in &self.stages {
            debug!(stage = stage.name(), "Running stage");
            state = stage.run(state).await;
        }

        state
    }
}
