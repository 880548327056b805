//! Five-stage financial news analysis pipeline
//!
//! An article moves through a fixed sequence of stages, each reading the
//! fields written by its predecessors and writing exactly one of its own:
//!
//! 1. Preprocessing - ticker extraction and content cleaning
//! 2. Sentiment - LLM classification into positive/negative/neutral
//! 3. Market impact - LLM classification into high/medium/low
//! 4. Entity risk - LLM enumeration of risk categories
//! 5. Aggregator - deterministic decision table plus confidence score
//!
//! Every stage is individually fault-tolerant: LLM failures and garbled
//! responses fall back to documented defaults, so [`NewsPipeline::analyze`]
//! always returns a fully populated state.

pub mod config;
pub mod eval;
pub mod pipeline;
pub mod stages;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use pipeline::NewsPipeline;
