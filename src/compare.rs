// src/compare.rs
//! Pairwise document comparison: vocabulary overlap, Jaccard similarity and
//! per-document heuristic metrics.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::keywords::top_terms;
use crate::model::{DocumentComparison, DocumentMetrics, UniqueKeywords, MAX_KEYWORDS};
use crate::sentiment::SentimentAnalyzer;
use crate::tokenize::{remove_stopwords, tokenize};

/// How many common/unique keywords are reported.
const KEYWORD_PREVIEW: usize = 5;

static NLP_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(language|natural|processing|nlp|text|analysis|algorithm|model|data|learning)\b",
    )
    .expect("nlp vocabulary regex")
});

const TECHNICAL_VOCABULARY: &[&str] = &[
    "algorithm", "api", "architecture", "bandwidth", "benchmark", "binary", "cache", "compiler",
    "computer", "computation", "configuration", "database", "dataset", "deployment", "encryption",
    "framework", "function", "hardware", "implementation", "interface", "kernel", "latency",
    "library", "metadata", "model", "network", "neural", "parameter", "pipeline", "protocol",
    "query", "server", "software", "statistical", "syntax", "system", "tfidf", "throughput",
    "token", "vector", "version",
];

const ACADEMIC_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ity", "ism", "ology", "ical", "ive", "ance", "ence", "sis",
];

/// Jaccard similarity of the token sets, as a rounded percentage.
pub fn jaccard_similarity(a: &str, b: &str) -> u32 {
    let left: HashSet<String> = tokenize(a).into_iter().collect();
    let right: HashSet<String> = tokenize(b).into_iter().collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0;
    }
    let shared = left.intersection(&right).count();
    ((shared as f64 / union as f64) * 100.0).round() as u32
}

fn similarity_explanation(score: u32) -> String {
    if score > 70 {
        "These documents are highly similar in topic and vocabulary, with many overlapping key terms."
            .to_string()
    } else if score > 40 {
        "These documents share some common themes and vocabulary but have distinct focus areas."
            .to_string()
    } else {
        "These documents show little similarity in topic and vocabulary.".to_string()
    }
}

/// Scale `ratio` (clamped to [0, 1]) into `floor..=floor + span`.
fn scaled(floor: u32, span: f64, ratio: f64) -> u32 {
    floor + (span * ratio.clamp(0.0, 1.0)).round() as u32
}

fn share<F: Fn(&str) -> bool>(tokens: &[String], pred: F) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    tokens.iter().filter(|t| pred(t)).count() as f64 / tokens.len() as f64
}

/// Share of content words that are technical vocabulary or very long words; 50..=80.
fn technical_content(content: &[String]) -> u32 {
    let density = share(content, |t| {
        TECHNICAL_VOCABULARY.contains(&t) || t.chars().count() >= 10
    });
    scaled(50, 30.0, density * 2.0)
}

/// Share of content words with nominal/academic suffixes; 40..=80.
fn academic_style(content: &[String]) -> u32 {
    let density = share(content, |t| {
        t.chars().count() > 5 && ACADEMIC_SUFFIXES.iter().any(|s| t.ends_with(s))
    });
    scaled(40, 40.0, density * 2.5)
}

/// Average sentence length and average word length; 40..=80.
fn complexity(text: &str, tokens: &[String]) -> u32 {
    if tokens.is_empty() {
        return 40;
    }
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
        .max(1);
    let avg_sentence = tokens.len() as f64 / sentences as f64;
    let avg_word =
        tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / tokens.len() as f64;

    let c = 0.5 * (avg_sentence / 25.0).min(1.0) + 0.5 * ((avg_word - 3.0) / 5.0).clamp(0.0, 1.0);
    scaled(40, 40.0, c)
}

/// Heuristic metrics for one document. Deterministic for a given text.
pub fn document_metrics(text: &str, sentiment: &SentimentAnalyzer) -> DocumentMetrics {
    let tokens = tokenize(text);
    let content = remove_stopwords(&tokens);

    let nlp_hits = NLP_TERMS.find_iter(text).count() as u32;
    let lexical = sentiment.lexical_score(text);
    let positive = (((lexical + 5.0) / 10.0) * 100.0).round().clamp(0.0, 100.0) as u32;

    DocumentMetrics {
        nlp_terms: nlp_hits.saturating_mul(5).min(100),
        technical_content: technical_content(&content),
        academic_style: academic_style(&content),
        positive_sentiment: positive,
        complexity: complexity(text, &tokens),
    }
}

/// Compare two documents.
pub fn compare_documents(
    doc1: &str,
    doc2: &str,
    sentiment: &SentimentAnalyzer,
) -> DocumentComparison {
    let kw1 = top_terms(doc1, MAX_KEYWORDS);
    let kw2 = top_terms(doc2, MAX_KEYWORDS);

    let common: Vec<String> = kw1.iter().filter(|k| kw2.contains(k)).cloned().collect();
    let only_in = |list: &[String]| -> Vec<String> {
        list.iter()
            .filter(|k| !common.contains(k))
            .take(KEYWORD_PREVIEW)
            .cloned()
            .collect()
    };
    let unique_keywords = UniqueKeywords {
        doc1: only_in(&kw1),
        doc2: only_in(&kw2),
    };

    let similarity_score = jaccard_similarity(doc1, doc2);

    DocumentComparison {
        similarity_score,
        similarity_explanation: similarity_explanation(similarity_score),
        common_keywords: common.into_iter().take(KEYWORD_PREVIEW).collect(),
        unique_keywords,
        doc1_metrics: document_metrics(doc1, sentiment),
        doc2_metrics: document_metrics(doc2, sentiment),
    }
}
