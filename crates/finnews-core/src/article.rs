//! Input news article record

use serde::{Deserialize, Serialize};

/// A single news article fed into the analysis pipeline
///
/// The article is immutable once the pipeline starts; stages only read it.
/// `article_id`, `link`, and `source` are optional because search results
/// and manually entered articles do not always carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Identifier for tracking the article across runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,

    /// Article headline
    pub headline: String,

    /// Article body or snippet
    pub content: String,

    /// Publication date as reported by the source (free-form text)
    #[serde(default)]
    pub published_at: String,

    /// Link to the full article
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Publishing outlet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl NewsArticle {
    /// Create an article from a headline and body
    pub fn new(headline: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the article id
    pub fn with_article_id(mut self, id: impl Into<String>) -> Self {
        self.article_id = Some(id.into());
        self
    }

    /// Set the publication date
    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = published_at.into();
        self
    }

    /// Set the article link
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the publishing outlet
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether the article carries no analyzable text at all
    pub fn is_empty(&self) -> bool {
        self.headline.trim().is_empty() && self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let article = NewsArticle::new("Headline", "Body")
            .with_article_id("a-1")
            .with_published_at("2024-01-15")
            .with_source("Reuters");

        assert_eq!(article.headline, "Headline");
        assert_eq!(article.article_id.as_deref(), Some("a-1"));
        assert_eq!(article.published_at, "2024-01-15");
        assert_eq!(article.source.as_deref(), Some("Reuters"));
        assert!(article.link.is_none());
    }

    #[test]
    fn test_is_empty() {
        assert!(NewsArticle::new("", "").is_empty());
        assert!(NewsArticle::new("  ", "\n").is_empty());
        assert!(!NewsArticle::new("Headline", "").is_empty());
        assert!(!NewsArticle::new("", "Body").is_empty());
    }
}
