//! Pipeline stage implementations

pub mod aggregate;
pub mod impact;
pub mod preprocess;
pub mod risk;
pub mod sentiment;

pub use aggregate::AggregatorStage;
pub use impact::MarketImpactStage;
pub use preprocess::PreprocessingStage;
pub use risk::EntityRiskStage;
pub use sentiment::SentimentStage;
