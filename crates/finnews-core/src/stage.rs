//! Pipeline stage trait

use crate::state::AnalysisState;
use async_trait::async_trait;

/// One step of the analysis pipeline
///
/// Stages are total: `run` always returns an updated state. A stage that
/// fails internally (LLM error, unparseable response) writes its documented
/// fallback value instead of propagating the error, so the pipeline runner
/// never aborts mid-run.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Advance the state by one step
    async fn run(&self, state: AnalysisState) -> AnalysisState;

    /// Get the stage's name, used in logs
    fn name(&self) -> &'static str;
}
