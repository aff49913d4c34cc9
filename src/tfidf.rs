// src/tfidf.rs
//! Incremental TF-IDF index over a small, ordered set of documents.
//!
//! `tf`  = raw count of the term in the document,
//! `idf` = 1 + ln(N / (1 + df)).

use std::collections::HashMap;

use crate::tokenize::tokenize;

/// Per-document term counts plus document frequencies.
#[derive(Debug, Default, Clone)]
pub struct TermIndex {
    docs: Vec<HashMap<String, usize>>,
    doc_freq: HashMap<String, usize>,
}

impl TermIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index seeded with `corpus` in order. The next added document gets index `corpus.len()`.
    pub fn with_corpus(corpus: &[&str]) -> Self {
        let mut index = Self::new();
        for doc in corpus {
            index.add_document(doc);
        }
        index
    }

    /// Tokenize and add a document; returns its index.
    pub fn add_document(&mut self, text: &str) -> usize {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        for term in counts.keys() {
            *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        self.docs.push(counts);
        self.docs.len() - 1
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Number of documents containing `term`.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Raw count of `term` in document `doc` (0 for unknown documents).
    pub fn tf(&self, term: &str, doc: usize) -> f64 {
        self.docs
            .get(doc)
            .and_then(|counts| counts.get(term))
            .map(|&c| c as f64)
            .unwrap_or(0.0)
    }

    pub fn idf(&self, term: &str) -> f64 {
        let n = self.doc_count() as f64;
        let df = self.doc_frequency(term) as f64;
        1.0 + (n / (1.0 + df)).ln()
    }

    pub fn tfidf(&self, term: &str, doc: usize) -> f64 {
        self.tf(term, doc) * self.idf(term)
    }
}
