// src/sentiment.rs
//! Rule-based sentiment scorer.
//!
//! Signals, applied in order:
//! 1. base lexical score: sum of the general-purpose lexicon over all tokens,
//! 2. contextual walk over the custom lexicon (intensifier on the previous token,
//!    negated positives count twice against, negation triggers penalize a positive
//!    next token),
//! 3. −3 per distinct negative phrase pattern,
//! 4. punctuation: `!` amplifies the current polarity, `?` always pulls down,
//! 5. normalization `clamp((total + 15) / 30, 0, 1)`.
//!
//! Pure function of the text and the shared tables.

use std::sync::Arc;

use crate::keywords::round4;
use crate::lexicon::Lexicon;
use crate::model::{SentimentLabel, SentimentResult};
use crate::tokenize::simple_tokens;

const PATTERN_PENALTY: f64 = 3.0;
const PUNCTUATION_WEIGHT: f64 = 0.5;
const NORMALIZE_OFFSET: f64 = 15.0;
const NORMALIZE_RANGE: f64 = 30.0;

/// Intermediate sums, kept for diagnostics and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBreakdown {
    pub lexical: f64,
    pub contextual: f64,
    pub matched_patterns: Vec<&'static str>,
    pub punctuation: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Sum of base-lexicon scores over the sentiment tokens.
    pub fn lexical_score(&self, text: &str) -> f64 {
        self.lexical_of(&simple_tokens(text))
    }

    fn lexical_of(&self, tokens: &[String]) -> f64 {
        tokens.iter().map(|t| self.lexicon.base_score(t)).sum()
    }

    /// Custom-lexicon walk with a one-token window on each side.
    fn contextual_of(&self, tokens: &[String]) -> f64 {
        let lex = &self.lexicon;
        let mut acc = 0.0;

        for (i, tok) in tokens.iter().enumerate() {
            let prev = i.checked_sub(1).map(|j| tokens[j].as_str());
            let next = tokens.get(i + 1).map(String::as_str);

            if let Some(score) = lex.custom_score(tok) {
                let negated = prev.is_some_and(|p| lex.is_negation(p));
                if negated && score > 0.0 {
                    acc -= 2.0 * score;
                } else {
                    let mult = prev.and_then(|p| lex.intensifier(p)).unwrap_or(1.0);
                    acc += score * mult;
                }
            }

            // Compounds with the branch above for "not <positive>" pairs.
            if lex.is_negation(tok) {
                if let Some(n) = next.and_then(|n| lex.custom_score(n)).filter(|&n| n > 0.0) {
                    acc -= 2.0 * n;
                }
            }
        }

        acc
    }

    /// Full breakdown of how `text` was scored.
    pub fn breakdown(&self, text: &str) -> SentimentBreakdown {
        let tokens = simple_tokens(text);
        let lexical = self.lexical_of(&tokens);
        let contextual = self.contextual_of(&tokens);

        let matched_patterns: Vec<&'static str> = self
            .lexicon
            .negative_patterns()
            .iter()
            .filter(|p| p.re.is_match(text))
            .map(|p| p.label)
            .collect();
        let pattern_total = -PATTERN_PENALTY * matched_patterns.len() as f64;

        let running = lexical + contextual + pattern_total;
        let exclamations = text.matches('!').count() as f64;
        let questions = text.matches('?').count() as f64;

        let mut punctuation = 0.0;
        if running > 0.0 {
            punctuation += PUNCTUATION_WEIGHT * exclamations;
        } else if running < 0.0 {
            punctuation -= PUNCTUATION_WEIGHT * exclamations;
        }
        punctuation -= PUNCTUATION_WEIGHT * questions;

        SentimentBreakdown {
            lexical,
            contextual,
            matched_patterns,
            punctuation,
            total: running + punctuation,
        }
    }

    pub fn analyze(&self, text: &str) -> SentimentResult {
        let total = self.breakdown(text).total;
        let score = round4(normalize(total));
        let label = SentimentLabel::from_score(score);
        SentimentResult {
            score,
            label,
            explanation: explain(label, score),
        }
    }
}

/// Map a raw total into [0, 1].
fn normalize(total: f64) -> f64 {
    ((total + NORMALIZE_OFFSET) / NORMALIZE_RANGE).clamp(0.0, 1.0)
}

fn explain(label: SentimentLabel, score: f64) -> String {
    let pct = score * 100.0;
    match label {
        SentimentLabel::Positive => {
            let intensity = if score > 0.8 { "very positive" } else { "positive" };
            format!("Positive: this text expresses {intensity} sentiment ({pct:.1}%).")
        }
        SentimentLabel::Negative => {
            let intensity = if score < 0.2 { "very negative" } else { "negative" };
            format!("Negative: this text expresses {intensity} sentiment ({pct:.1}%).")
        }
        SentimentLabel::Neutral => {
            format!("Neutral: this text is balanced or mildly opinionated ({pct:.1}%).")
        }
    }
}
