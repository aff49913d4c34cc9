// src/lexicon.rs
//! Static scoring tables: polarity lexicons, intensifiers, negation triggers,
//! term-importance weights, negative-word tiers, negative phrase patterns and the
//! reference corpus used to stabilize single-document IDF.
//!
//! Everything is built once into an immutable [`Lexicon`] and shared via `Arc`;
//! nothing here is mutated after construction.

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// General-purpose AFINN-style polarity lexicon (integers in -5..=5).
const BASE_LEXICON_JSON: &str = include_str!("../data/base_lexicon.json");

/// Domain lexicon tuned for reviews and feedback. Stronger than the base lexicon.
const CUSTOM_SCORES: &[(&str, f64)] = &[
    // strong positive
    ("amazing", 8.0),
    ("best", 8.0),
    ("fantastic", 8.0),
    ("outstanding", 8.0),
    ("excellent", 8.0),
    ("exceeded", 8.0),
    ("perfect", 8.0),
    ("incredible", 8.0),
    ("happier", 8.0),
    ("helpful", 6.0),
    ("resolved", 6.0),
    ("improved", 6.0),
    ("significantly", 6.0),
    // moderate positive
    ("great", 4.0),
    ("wonderful", 4.0),
    ("impressive", 4.0),
    ("love", 4.0),
    ("happy", 4.0),
    ("recommend", 3.0),
    ("satisfied", 3.0),
    ("stable", 3.0),
    ("reliable", 3.0),
    ("performance", 3.0),
    // mild positive
    ("good", 3.0),
    ("nice", 3.0),
    ("pretty", 2.0),
    ("fine", 2.0),
    ("works", 2.0),
    ("decent", 2.0),
    ("okay", 1.0),
    // strong negative
    ("terrible", -5.0),
    ("waste", -5.0),
    ("horrible", -5.0),
    ("awful", -5.0),
    ("worst", -5.0),
    ("hate", -5.0),
    ("useless", -5.0),
    ("unreliable", -4.0),
    ("broken", -4.0),
    // moderate negative
    ("bad", -4.0),
    ("poor", -4.0),
    ("disappointed", -4.0),
    ("disappointing", -4.0),
    ("flaws", -3.0),
    // mild negative
    ("issues", -3.0),
    ("problem", -3.0),
    ("never", -3.0),
    ("slow", -2.0),
    ("improvement", -2.0),
    ("expected", -1.0),
    ("minor", -1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 2.5),
    ("completely", 2.5),
    ("totally", 2.5),
    ("incredibly", 2.5),
    ("extremely", 2.5),
    ("most", 2.5),
    ("very", 2.0),
    ("really", 2.0),
    ("significantly", 2.0),
    ("highly", 2.0),
    ("quite", 1.5),
    ("all", 1.5),
    ("so", 1.5),
    ("such", 1.5),
    ("especially", 1.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "cannot", "doesn't", "didn't", "don't", "won't", "can't",
    "isn't", "wasn't", "aren't", "wouldn't", "shouldn't", "couldn't",
];

const IMPORTANCE: &[(&str, f64)] = &[
    ("disappointed", 1.4),
    ("disappointing", 1.4),
    ("waste", 1.4),
    ("broken", 1.4),
    ("terrible", 1.4),
    ("quality", 1.3),
    ("performance", 1.3),
    ("recommend", 1.3),
    ("reliable", 1.3),
    ("refund", 1.3),
    ("amazing", 1.3),
    ("excellent", 1.3),
    ("product", 1.2),
    ("products", 1.2),
    ("price", 1.2),
    ("value", 1.2),
    ("money", 1.2),
    ("purchase", 1.2),
    ("service", 1.2),
    ("customer", 1.2),
    ("support", 1.2),
    ("experience", 1.2),
    ("feature", 1.2),
    ("features", 1.2),
    ("delivery", 1.2),
];

const STRONG_NEGATIVE: &[&str] = &[
    "terrible", "horrible", "awful", "worst", "waste", "hate", "useless", "garbage", "scam",
    "broken",
];
const MODERATE_NEGATIVE: &[&str] = &[
    "bad", "poor", "disappointed", "disappointing", "unreliable", "defective", "faulty", "failed",
    "frustrating", "annoying",
];
const MILD_NEGATIVE: &[&str] = &[
    "issue", "issues", "problem", "problems", "slow", "flaws", "minor", "mediocre", "lacking",
    "expensive", "difficult",
];

/// Case-insensitive phrases that signal a negative experience regardless of word scores.
const NEGATIVE_PATTERNS: &[(&str, &str)] = &[
    ("stopped working", r"(?i)\bstopped\s+working\b"),
    ("no longer", r"(?i)\bno\s+longer\b"),
    ("doesn't work", r"(?i)\b(doesn['’]?t|does\s+not)\s+work\b"),
    ("wouldn't recommend", r"(?i)\b(wouldn['’]?t|would\s+not)\s+recommend\b"),
    ("would never", r"(?i)\bwould\s+never\b"),
    ("waste of", r"(?i)\bwaste\s+of\b"),
    ("complete waste", r"(?i)\bcomplete\s+waste\b"),
    ("don't waste", r"(?i)\b(don['’]?t|do\s+not)\s+waste\b"),
    ("can't believe how bad", r"(?i)\b(can['’]?t|cannot)\s+believe\s+how\s+bad\b"),
    ("terrible product", r"(?i)\bterrible\b.*\bproduct\b"),
    ("not worth", r"(?i)\bnot\s+worth\b"),
    ("fell apart", r"(?i)\bfell\s+apart\b"),
    ("broke after", r"(?i)\bbroke\s+after\b"),
    ("never again", r"(?i)\bnever\s+again\b"),
    ("hate how", r"(?i)\bhate\s+how\b"),
    ("expected more", r"(?i)\bexpected\s+more\b"),
];

/// Representative sentences indexed before every target document.
const REFERENCE_CORPUS: &[&str] = &[
    "This product works well and the quality is good for the price.",
    "The customer service team was helpful and answered every question.",
    "Delivery was slow and the package arrived damaged.",
    "I would recommend this purchase to friends and family.",
    "The software update improved performance and fixed several bugs.",
    "Natural language processing turns raw text into structured data.",
    "The report describes the analysis method and the results of the study.",
    "Battery life is decent but the screen could be brighter.",
    "The new features are easy to use and the design looks modern.",
    "Support took a week to reply and the issue is still not resolved.",
    "News articles often frame the same events in different ways.",
    "Customer feedback helps companies understand what to improve next.",
];

/// Strength tier for words whose own polarity is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativeTier {
    Strong,
    Moderate,
    Mild,
}

impl NegativeTier {
    pub fn multiplier(self) -> f64 {
        match self {
            NegativeTier::Strong => 2.0,
            NegativeTier::Moderate => 1.5,
            NegativeTier::Mild => 1.2,
        }
    }
}

/// A compiled negative phrase rule.
#[derive(Debug)]
pub struct PhrasePattern {
    pub label: &'static str,
    pub re: Regex,
}

/// Immutable bundle of every table the engine reads.
#[derive(Debug)]
pub struct Lexicon {
    base: HashMap<String, f64>,
    custom: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    importance: HashMap<&'static str, f64>,
    tiers: HashMap<&'static str, NegativeTier>,
    negative_patterns: Vec<PhrasePattern>,
}

static SHARED: Lazy<Arc<Lexicon>> =
    Lazy::new(|| Arc::new(Lexicon::builtin().expect("valid built-in lexicon")));

impl Lexicon {
    /// Process-wide instance built from the embedded tables.
    pub fn shared() -> Arc<Lexicon> {
        Arc::clone(&SHARED)
    }

    /// Build the tables from embedded data. Fails only if the embedded data is invalid
    /// (malformed JSON, bad regex, or a word listed in more than one negative tier).
    pub fn builtin() -> anyhow::Result<Self> {
        let raw: HashMap<String, i32> =
            serde_json::from_str(BASE_LEXICON_JSON).context("base lexicon is not valid JSON")?;
        let base = raw.into_iter().map(|(k, v)| (k, f64::from(v))).collect();

        let mut tiers = HashMap::new();
        for (words, tier) in [
            (STRONG_NEGATIVE, NegativeTier::Strong),
            (MODERATE_NEGATIVE, NegativeTier::Moderate),
            (MILD_NEGATIVE, NegativeTier::Mild),
        ] {
            for &w in words {
                if let Some(prev) = tiers.insert(w, tier) {
                    anyhow::bail!("`{w}` listed in both {prev:?} and {tier:?} negative tiers");
                }
            }
        }

        let negative_patterns = NEGATIVE_PATTERNS
            .iter()
            .map(|&(label, pattern)| {
                let re = Regex::new(pattern)
                    .with_context(|| format!("pattern `{label}` regex error"))?;
                Ok(PhrasePattern { label, re })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            base,
            custom: CUSTOM_SCORES.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            importance: IMPORTANCE.iter().copied().collect(),
            tiers,
            negative_patterns,
        })
    }

    /// Base lexicon score (0 when unknown).
    #[inline]
    pub fn base_score(&self, word: &str) -> f64 {
        self.base.get(word).copied().unwrap_or(0.0)
    }

    /// Custom domain score, if the word is in the custom lexicon.
    #[inline]
    pub fn custom_score(&self, word: &str) -> Option<f64> {
        self.custom.get(word).copied()
    }

    /// Signed polarity used for keyword boosts: custom lexicon first, then base.
    pub fn polarity(&self, word: &str) -> f64 {
        self.custom_score(word)
            .unwrap_or_else(|| self.base_score(word))
    }

    #[inline]
    pub fn intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    #[inline]
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    /// Term-importance multiplier, 1.0 by default.
    pub fn importance(&self, word: &str) -> f64 {
        self.importance.get(word).copied().unwrap_or(1.0)
    }

    pub fn negative_tier(&self, word: &str) -> Option<NegativeTier> {
        self.tiers.get(word).copied()
    }

    pub fn negative_patterns(&self) -> &[PhrasePattern] {
        &self.negative_patterns
    }

    pub fn reference_corpus(&self) -> &'static [&'static str] {
        REFERENCE_CORPUS
    }
}
