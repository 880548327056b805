//! Serper news-search client for finnews-rs
//!
//! Thin wrapper over the Google Serper news endpoint that maps results to
//! [`NewsArticle`] records for the analysis pipeline.

pub mod client;
pub mod error;

pub use client::{SerperClient, fetch_financial_news};
pub use error::{Result, SearchError};
