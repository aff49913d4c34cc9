// src/keywords.rs
//! Keyword extraction.
//!
//! [`extract_keywords`] is the full relevance ranking used by `analyze_text`:
//! TF-IDF against the reference corpus, term-importance weights, sentiment and
//! frequency boosts, and negative-tier polarity overrides.
//!
//! [`top_terms`] is the plain vocabulary pass used for document comparison:
//! single-document TF-IDF with no boosts.

use std::collections::HashMap;

use crate::lexicon::Lexicon;
use crate::model::{Keyword, TfIdfResult, MAX_KEYWORDS};
use crate::tfidf::TermIndex;
use crate::tokenize::{remove_stopwords, tokenize};

const SENTIMENT_BOOST: f64 = 0.15;
const FREQUENCY_BOOST: f64 = 0.1;

/// Round to 4 decimal places.
pub(crate) fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Count tokens in first-encounter order.
fn ordered_counts(tokens: Vec<String>) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut pos: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        let seen = pos.get(&token).copied();
        match seen {
            Some(i) => order[i].1 += 1,
            None => {
                pos.insert(token.clone(), order.len());
                order.push((token, 1));
            }
        }
    }
    order
}

#[inline]
fn is_candidate(term: &str) -> bool {
    term.chars().count() > 2
}

/// Stable sort by descending |score|; ties keep first-encounter order.
fn rank_by_magnitude(keywords: &mut [Keyword]) {
    keywords.sort_by(|a, b| b.tfidf.abs().total_cmp(&a.tfidf.abs()));
}

/// Relevance score for one term before rounding.
fn boosted_score(
    lexicon: &Lexicon,
    index: &TermIndex,
    target: usize,
    term: &str,
    freq: usize,
) -> f64 {
    let mut score = index.tfidf(term, target) * lexicon.importance(term);
    score += lexicon.polarity(term).abs() * SENTIMENT_BOOST;
    score += ((freq + 1) as f64).ln() * FREQUENCY_BOOST;

    match lexicon.negative_tier(term) {
        Some(tier) => -score.abs() * tier.multiplier(),
        None => score,
    }
}

/// Rank the top keywords of `text`. Empty or stopword-only text yields no keywords.
pub fn extract_keywords(text: &str, lexicon: &Lexicon) -> TfIdfResult {
    let mut index = TermIndex::with_corpus(lexicon.reference_corpus());
    let target = index.add_document(text);

    let counts = ordered_counts(remove_stopwords(&tokenize(text)));

    let mut keywords: Vec<Keyword> = counts
        .into_iter()
        .filter(|(term, _)| is_candidate(term))
        .map(|(term, freq)| {
            let score = boosted_score(lexicon, &index, target, &term, freq);
            Keyword {
                term,
                tfidf: round4(score),
                frequency: freq,
            }
        })
        .collect();

    rank_by_magnitude(&mut keywords);
    keywords.truncate(MAX_KEYWORDS);

    TfIdfResult { keywords }
}

/// Top `limit` distinct terms of `text` by plain single-document TF-IDF.
pub fn top_terms(text: &str, limit: usize) -> Vec<String> {
    let mut index = TermIndex::new();
    let doc = index.add_document(text);

    let mut scored: Vec<(String, f64)> = ordered_counts(remove_stopwords(&tokenize(text)))
        .into_iter()
        .filter(|(term, _)| is_candidate(term))
        .map(|(term, _)| {
            let s = index.tfidf(&term, doc);
            (term, s)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().take(limit).map(|(t, _)| t).collect()
}
