// src/lib.rs
// Public library surface for the binary and integration tests.

// Text engine
pub mod compare;
pub mod engine;
pub mod keywords;
pub mod lemmatize;
pub mod lexicon;
pub mod model;
pub mod sentiment;
pub mod tfidf;
pub mod tokenize;

// Service layer
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod storage;

pub use crate::api::{router, AppState};
pub use crate::engine::TextEngine;
pub use crate::model::{
    AnalysisResult, AnalyzeOptions, DocumentComparison, SentimentLabel, SentimentResult,
    TfIdfResult,
};
