//! # Text Engine
//! Pure, testable facade that maps text → `AnalysisResult` / `DocumentComparison`.
//! No I/O. The only shared state is the immutable [`Lexicon`] behind an `Arc`.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use regex::Regex;
use tracing::debug;

use crate::compare;
use crate::keywords::extract_keywords;
use crate::lemmatize::lemmatize_all;
use crate::lexicon::Lexicon;
use crate::model::{
    AnalysisResult, AnalyzeOptions, DocumentComparison, PreprocessingSteps, SentimentResult,
    TfIdfResult, PREVIEW_LIMIT,
};
use crate::sentiment::SentimentAnalyzer;
use crate::tokenize::{remove_stopwords, tokenize};

/// Number of top keywords wrapped in highlight spans.
const HIGHLIGHT_TOP: usize = 5;

#[derive(Debug, Clone)]
pub struct TextEngine {
    lexicon: Arc<Lexicon>,
    sentiment: SentimentAnalyzer,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new(Lexicon::shared())
    }
}

impl TextEngine {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        let sentiment = SentimentAnalyzer::new(Arc::clone(&lexicon));
        Self { lexicon, sentiment }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn extract_keywords(&self, text: &str) -> TfIdfResult {
        extract_keywords(text, &self.lexicon)
    }

    pub fn analyze_sentiment(&self, text: &str) -> SentimentResult {
        self.sentiment.analyze(text)
    }

    /// Full analysis. `document_id` is always 0; storage assigns the real one.
    pub fn analyze_text(&self, text: &str, options: AnalyzeOptions) -> AnalysisResult {
        let started = Instant::now();

        let tokenized = tokenize(text);
        let without_stopwords = remove_stopwords(&tokenized);
        let lemmatized = lemmatize_all(&without_stopwords);

        let unique_terms = lemmatized.iter().collect::<HashSet<_>>().len();
        let term_density = if lemmatized.is_empty() {
            0.0
        } else {
            round2(unique_terms as f64 / lemmatized.len() as f64 * 100.0)
        };

        let tfidf = (options.tfidf || options.keywords).then(|| self.extract_keywords(text));
        let sentiment = self.sentiment.analyze(text);

        let highlighted_text = match (&tfidf, options.keywords) {
            (Some(result), true) => {
                let top: Vec<&str> = result
                    .keywords
                    .iter()
                    .take(HIGHLIGHT_TOP)
                    .map(|k| k.term.as_str())
                    .collect();
                highlight_keywords(text, &top)
            }
            _ => html_escape::encode_text(text).into_owned(),
        };

        let preprocessing = options.preprocessing.then(|| PreprocessingSteps {
            original_text: text.to_string(),
            tokenized: preview(&tokenized),
            without_stopwords: preview(&without_stopwords),
            lemmatized: preview(&lemmatized),
        });

        debug!(
            target: "engine",
            id = %anon_hash(text),
            words = tokenized.len(),
            unique_terms,
            sentiment = sentiment.score,
            "analyzed text"
        );

        AnalysisResult {
            document_id: 0,
            original_text: text.to_string(),
            word_count: tokenized.len(),
            preprocessed_word_count: lemmatized.len(),
            unique_terms,
            term_density,
            processing_time: started.elapsed().as_secs_f64(),
            highlighted_text,
            sentiment,
            preprocessing,
            tfidf: if options.tfidf { tfidf } else { None },
        }
    }

    pub fn compare_documents(&self, doc1: &str, doc2: &str) -> DocumentComparison {
        let out = compare::compare_documents(doc1, doc2, &self.sentiment);
        debug!(target: "engine", similarity = out.similarity_score, "compared documents");
        out
    }
}

/// Short stable id for log correlation. Raw text is never logged.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn preview(items: &[String]) -> Vec<String> {
    items.iter().take(PREVIEW_LIMIT).cloned().collect()
}

/// HTML-escape `text` and wrap whole-word, case-insensitive keyword matches in highlight spans.
/// Matching runs on the raw text so entities produced by escaping are never split.
pub fn highlight_keywords(text: &str, keywords: &[&str]) -> String {
    let terms: Vec<String> = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| regex::escape(k))
        .collect();
    if terms.is_empty() {
        return html_escape::encode_text(text).into_owned();
    }

    // One alternation pass so a span is never wrapped twice.
    let Ok(re) = Regex::new(&format!(r"(?i)\b({})\b", terms.join("|"))) else {
        return html_escape::encode_text(text).into_owned();
    };

    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&html_escape::encode_text(&text[last..m.start()]));
        out.push_str(r#"<span class="doc-highlight">"#);
        out.push_str(&html_escape::encode_text(m.as_str()));
        out.push_str("</span>");
        last = m.end();
    }
    out.push_str(&html_escape::encode_text(&text[last..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SentimentLabel;

    fn engine() -> TextEngine {
        TextEngine::default()
    }

    #[test]
    fn placeholder_document_id_and_counts() {
        let r = engine().analyze_text(
            "The products were running smoothly and customers loved them.",
            AnalyzeOptions::default(),
        );
        assert_eq!(r.document_id, 0);
        assert_eq!(r.word_count, 9);
        let pre = r.preprocessing.expect("preprocessing requested");
        assert_eq!(
            pre.lemmatized,
            vec!["product", "run", "smoothly", "customer", "love"]
        );
        assert_eq!(r.preprocessed_word_count, 5);
        assert_eq!(r.unique_terms, 5);
        assert_eq!(r.term_density, 100.0);
    }

    #[test]
    fn options_control_optional_sections() {
        let opts = AnalyzeOptions {
            preprocessing: false,
            tfidf: false,
            sentiment: false,
            keywords: false,
        };
        let r = engine().analyze_text("Great service, friendly staff, fair prices.", opts);
        assert!(r.preprocessing.is_none());
        assert!(r.tfidf.is_none());
        // Sentiment is always attached.
        assert_eq!(r.sentiment.label, SentimentLabel::Positive);
        assert!(!r.highlighted_text.contains("doc-highlight"));
    }

    #[test]
    fn stopword_only_text_is_degenerate_not_an_error() {
        let r = engine().analyze_text("the a an of", AnalyzeOptions::default());
        assert!(r.tfidf.unwrap().keywords.is_empty());
        assert_eq!(r.term_density, 0.0);
        assert_eq!(r.unique_terms, 0);
        assert_eq!(r.word_count, 4);
    }

    #[test]
    fn previews_are_capped_but_counts_are_not() {
        let text = (0..40).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        let r = engine().analyze_text(&text, AnalyzeOptions::default());
        let pre = r.preprocessing.unwrap();
        assert_eq!(pre.tokenized.len(), PREVIEW_LIMIT);
        assert_eq!(pre.lemmatized.len(), PREVIEW_LIMIT);
        assert_eq!(r.word_count, 40);
        assert_eq!(r.preprocessed_word_count, 40);
    }

    #[test]
    fn highlighting_escapes_and_wraps_whole_words() {
        let out = highlight_keywords("<b>Rust</b> trusts rust", &["rust"]);
        assert_eq!(
            out,
            r#"&lt;b&gt;<span class="doc-highlight">Rust</span>&lt;/b&gt; trusts <span class="doc-highlight">rust</span>"#
        );
        assert_eq!(highlight_keywords("a & b", &[]), "a &amp; b");
    }

    #[test]
    fn highlighting_leaves_entities_intact() {
        assert_eq!(
            highlight_keywords("amp & amp", &["amp"]),
            r#"<span class="doc-highlight">amp</span> &amp; <span class="doc-highlight">amp</span>"#
        );
        assert_eq!(
            highlight_keywords("lt < gt > quot", &["lt", "gt", "quot"]),
            concat!(
                r#"<span class="doc-highlight">lt</span> &lt; "#,
                r#"<span class="doc-highlight">gt</span> &gt; "#,
                r#"<span class="doc-highlight">quot</span>"#
            )
        );

        let r = engine().analyze_text("Guitar amp & amp cable, amp stand.", AnalyzeOptions::default());
        assert!(r.highlighted_text.contains(" &amp; "), "{}", r.highlighted_text);
        assert!(!r.highlighted_text.contains("&<span"), "{}", r.highlighted_text);
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("some private text");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_hash("some private text"));
        assert_ne!(a, anon_hash("other text"));
    }

    #[test]
    fn analysis_highlights_top_keywords() {
        let r = engine().analyze_text(
            "The battery is terrible and the battery charger is terrible too.",
            AnalyzeOptions::default(),
        );
        assert!(r
            .highlighted_text
            .contains(r#"<span class="doc-highlight">terrible</span>"#));
    }
}
