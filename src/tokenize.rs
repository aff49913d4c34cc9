// src/tokenize.rs
//! Tokenizer and stopword filter shared by every stage of the pipeline.
//!
//! Two tokenizers live here:
//! - [`tokenize`] normalizes contractions (`doesn't` → `does not`) and is used for
//!   preprocessing, keyword extraction and similarity.
//! - [`simple_tokens`] keeps contractions intact because the sentiment scorer
//!   treats `doesn't`, `won't`, ... as negation triggers.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Closed English stopword set: articles, pronouns, auxiliaries, contraction fragments.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at",
    "by", "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor",
    "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "d", "ll", "m", "re",
    "ve", "can", "will", "just", "don", "should", "now", "i", "me", "my", "myself", "we", "our",
    "ours", "ourselves", "you", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "these", "those",
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "would", "could", "ought", "might", "must", "shall", "may",
    "also", "yet", "im", "ive", "youre", "youve", "hes", "shes", "theyre", "weve", "theyve",
    "hasnt", "havent", "hadnt", "doesnt", "dont", "didnt", "isnt", "wasnt", "wont", "cant",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Contraction rewrites, applied in order to lowercased text.
/// Irregular forms come first so the generic `n't` rule does not produce `ca not`.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("can't", "can not"),
    ("won't", "will not"),
    ("n't", " not"),
    ("'s", " is"),
    ("'m", " am"),
    ("'re", " are"),
    ("'ll", " will"),
    ("'ve", " have"),
    ("'d", " would"),
];

/// True if `word` (already lowercased) is a stopword.
#[inline]
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Replace typographic apostrophes with ASCII `'`.
fn normalize_apostrophes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
            other => other,
        })
        .collect()
}

/// Lowercase and rewrite contractions, then drop any apostrophes that are left.
fn expand_contractions(text: &str) -> String {
    let mut out = normalize_apostrophes(&text.to_lowercase());
    for (from, to) in CONTRACTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out.replace('\'', "")
}

/// Split raw text into lowercase word tokens with contractions expanded.
/// Punctuation-only fragments are dropped; text without word characters yields `[]`.
pub fn tokenize(text: &str) -> Vec<String> {
    expand_contractions(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase tokens that keep internal apostrophes (`doesn't`, `it's`).
pub fn simple_tokens(text: &str) -> Vec<String> {
    normalize_apostrophes(&text.to_lowercase())
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Filter stopwords, preserving order and duplicates.
pub fn remove_stopwords(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !is_stopword(t.as_str()))
        .cloned()
        .collect()
}
