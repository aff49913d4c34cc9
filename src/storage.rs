// src/storage.rs
//! Document and analysis storage behind an async trait, with an in-memory
//! implementation. Locks are held only for the map access, never across `.await`.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use anyhow::Result;
use chrono::{Duration, Utc};

use crate::model::{AnalysisResult, Document, NewDocument};
use crate::tokenize::tokenize;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// All documents, newest `analyzed_at` first.
    async fn all_documents(&self) -> Result<Vec<Document>>;
    async fn get_document(&self, id: i64) -> Result<Option<Document>>;
    /// Assigns a fresh id and the current timestamp.
    async fn create_document(&self, doc: NewDocument) -> Result<Document>;
    /// Stores `result` keyed by its `document_id`, replacing any previous one.
    async fn save_analysis(&self, result: AnalysisResult) -> Result<AnalysisResult>;
    async fn get_analysis(&self, document_id: i64) -> Result<Option<AnalysisResult>>;
}

#[derive(Debug, Default)]
struct Inner {
    documents: BTreeMap<i64, Document>,
    analyses: HashMap<i64, AnalysisResult>,
    last_id: i64,
}

impl Inner {
    fn insert(&mut self, doc: NewDocument, age: Duration) -> Document {
        self.last_id += 1;
        let document = Document {
            id: self.last_id,
            title: doc.title,
            content: doc.content,
            word_count: doc.word_count,
            analyzed_at: Utc::now() - age,
            user_id: doc.user_id,
        };
        self.documents.insert(document.id, document.clone());
        document
    }
}

/// Volatile store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemStorage {
    inner: RwLock<Inner>,
}

const SAMPLES: &[(&str, &str, i64)] = &[
    (
        "NLP Research Paper",
        "Natural language processing (NLP) is a subfield of linguistics, computer science, and \
         artificial intelligence concerned with the interactions between computers and human \
         language. The goal is to enable computers to process and analyze large amounts of \
         natural language data. Challenges in NLP frequently involve speech recognition, natural \
         language understanding, and natural language generation.",
        2,
    ),
    (
        "Product Review Dataset",
        "This dataset contains customer reviews for various products. Each review includes a \
         star rating, review text, and metadata about the product. The reviews can be analyzed \
         for sentiment, feature extraction, and opinion mining. This type of analysis helps \
         businesses understand customer satisfaction and product performance.",
        24,
    ),
    (
        "News Articles Comparison",
        "News articles from different sources often present varying perspectives on the same \
         events. By comparing the language, sentiment, and focus of these articles, we can \
         identify potential bias and understand how different outlets frame important issues. \
         This comparative analysis uses TF-IDF and other NLP techniques to highlight differences \
         in coverage.",
        48,
    ),
    (
        "Customer Feedback Analysis",
        "Customer feedback provides valuable insights for business improvement. By analyzing \
         comments, reviews, and survey responses using NLP techniques, companies can extract \
         actionable feedback, identify trends, and categorize issues. This helps prioritize \
         improvements and track customer sentiment over time.",
        72,
    ),
];

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with four sample documents (ids 1..=4), aged
    /// 2 hours, 1 day, 2 days and 3 days.
    pub fn with_samples(user_id: i64) -> Self {
        let mut inner = Inner::default();
        for (title, content, hours) in SAMPLES {
            let doc = NewDocument {
                title: (*title).to_string(),
                content: (*content).to_string(),
                word_count: tokenize(content).len(),
                user_id: Some(user_id),
            };
            inner.insert(doc, Duration::hours(*hours));
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait::async_trait]
impl Storage for MemStorage {
    async fn all_documents(&self) -> Result<Vec<Document>> {
        let inner = self.inner.read().expect("storage rwlock poisoned");
        let mut docs: Vec<Document> = inner.documents.values().cloned().collect();
        docs.sort_by(|a, b| b.analyzed_at.cmp(&a.analyzed_at).then(b.id.cmp(&a.id)));
        Ok(docs)
    }

    async fn get_document(&self, id: i64) -> Result<Option<Document>> {
        let inner = self.inner.read().expect("storage rwlock poisoned");
        Ok(inner.documents.get(&id).cloned())
    }

    async fn create_document(&self, doc: NewDocument) -> Result<Document> {
        let mut inner = self.inner.write().expect("storage rwlock poisoned");
        Ok(inner.insert(doc, Duration::zero()))
    }

    async fn save_analysis(&self, result: AnalysisResult) -> Result<AnalysisResult> {
        let mut inner = self.inner.write().expect("storage rwlock poisoned");
        inner.analyses.insert(result.document_id, result.clone());
        Ok(result)
    }

    async fn get_analysis(&self, document_id: i64) -> Result<Option<AnalysisResult>> {
        let inner = self.inner.read().expect("storage rwlock poisoned");
        Ok(inner.analyses.get(&document_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TextEngine;
    use crate::model::AnalyzeOptions;

    fn new_doc(title: &str) -> NewDocument {
        NewDocument {
            title: title.into(),
            content: "Some content to store.".into(),
            word_count: 4,
            user_id: Some(1),
        }
    }

    #[tokio::test]
    async fn samples_are_seeded_newest_first() {
        let s = MemStorage::with_samples(1);
        let docs = s.all_documents().await.unwrap();
        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "NLP Research Paper",
                "Product Review Dataset",
                "News Articles Comparison",
                "Customer Feedback Analysis",
            ]
        );
        assert_eq!(docs[0].id, 1);
        assert!(docs.iter().all(|d| d.word_count > 0 && d.user_id == Some(1)));
    }

    #[tokio::test]
    async fn created_documents_get_increasing_ids_and_come_first() {
        let s = MemStorage::with_samples(1);
        let a = s.create_document(new_doc("a")).await.unwrap();
        let b = s.create_document(new_doc("b")).await.unwrap();
        assert_eq!((a.id, b.id), (5, 6));
        assert_eq!(s.all_documents().await.unwrap()[0].id, 6);
        assert_eq!(s.get_document(5).await.unwrap().unwrap().title, "a");
        assert!(s.get_document(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn analysis_is_keyed_by_document_id() {
        let s = MemStorage::new();
        let doc = s.create_document(new_doc("x")).await.unwrap();
        assert_eq!(doc.id, 1);
        assert!(s.get_analysis(doc.id).await.unwrap().is_none());

        let mut result = TextEngine::default().analyze_text(&doc.content, AnalyzeOptions::default());
        result.document_id = doc.id;
        s.save_analysis(result.clone()).await.unwrap();

        assert_eq!(s.get_analysis(doc.id).await.unwrap(), Some(result));
    }
}
