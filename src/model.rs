//! Wire records shared by the engine, storage and HTTP layer.
//!
//! All records serialize in camelCase; this is the JSON shape the UI consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of ranked keywords in a `TfIdfResult`.
pub const MAX_KEYWORDS: usize = 15;
/// Maximum number of entries shown per preprocessing stage.
pub const PREVIEW_LIMIT: usize = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub term: String,
    pub tfidf: f64,
    pub frequency: usize,
}

/// Ranked keywords, strongest |tfidf| first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfIdfResult {
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessingSteps {
    pub original_text: String,
    pub tokenized: Vec<String>,
    pub without_stopwords: Vec<String>,
    pub lemmatized: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Thresholds: above 0.6 is positive, below 0.4 is negative.
    pub fn from_score(score: f64) -> Self {
        if score > 0.6 {
            SentimentLabel::Positive
        } else if score < 0.4 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    /// Normalized score in [0, 1].
    pub score: f64,
    pub label: SentimentLabel,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Always 0 from the engine; storage assigns the real id.
    pub document_id: i64,
    pub original_text: String,
    pub word_count: usize,
    pub preprocessed_word_count: usize,
    pub unique_terms: usize,
    pub term_density: f64,
    /// Wall-clock seconds spent in `analyze_text`.
    pub processing_time: f64,
    pub highlighted_text: String,
    pub sentiment: SentimentResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessing: Option<PreprocessingSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tfidf: Option<TfIdfResult>,
}

/// Per-document heuristics, each an integer in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetrics {
    pub nlp_terms: u32,
    pub technical_content: u32,
    pub academic_style: u32,
    pub positive_sentiment: u32,
    pub complexity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueKeywords {
    pub doc1: Vec<String>,
    pub doc2: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentComparison {
    /// Jaccard similarity × 100, rounded.
    pub similarity_score: u32,
    pub similarity_explanation: String,
    pub common_keywords: Vec<String>,
    pub unique_keywords: UniqueKeywords,
    pub doc1_metrics: DocumentMetrics,
    pub doc2_metrics: DocumentMetrics,
}

fn enabled() -> bool {
    true
}

/// Which optional sections `analyze_text` populates. Sentiment is always computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOptions {
    #[serde(default = "enabled")]
    pub preprocessing: bool,
    #[serde(default = "enabled")]
    pub tfidf: bool,
    #[serde(default = "enabled")]
    pub sentiment: bool,
    #[serde(default = "enabled")]
    pub keywords: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            preprocessing: true,
            tfidf: true,
            sentiment: true,
            keywords: true,
        }
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub analyzed_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Insert shape for [`Document`]; id and timestamp are assigned by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub user_id: Option<i64>,
}
