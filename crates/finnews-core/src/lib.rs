//! Core data model for the financial news analysis pipeline
//!
//! This crate defines the types shared by every pipeline stage: the input
//! article, the append-only analysis state, the closed classification enums,
//! the risk vocabulary, and the final analysis summary.

pub mod article;
pub mod error;
pub mod stage;
pub mod state;
pub mod summary;
pub mod vocab;

pub use article::NewsArticle;
pub use error::{Error, Result};
pub use stage::Stage;
pub use state::{AnalysisState, MarketImpact, Sentiment};
pub use summary::{AnalysisQuality, AnalysisSummary, ConfidenceFactor};
