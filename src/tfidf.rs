//! TF-IDF statistics over small, per-call corpora
//!
//! Nothing here keeps corpus state between calls: IDF is always computed
//! over the documents handed in, so the same term can score differently in
//! different batches.
//!
//! Two ranking modes exist:
//!
//! - [`extract_keywords`] treats one text as a single-document corpus. The
//!   IDF then degenerates to the constant `ln(1/2)`, so the ranking follows
//!   term frequency.
//! - [`batch_top_keywords`] computes IDF over a whole batch of documents but
//!   a single pooled TF over the concatenation of all their tokens. This is a
//!   deliberate "batch-TF" simplification for feed summaries, not a
//!   per-document ranking.

use crate::nlp::tokenizer::Tokenizer;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Default number of keywords returned by [`extract_keywords`]
pub const DEFAULT_TOP_K: usize = 10;

/// Per-term statistics for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    pub term: String,
    pub tf: f64,
    pub idf: f64,
    pub tfidf: f64,
}

/// A ranked keyword with its TF-IDF score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub term: String,
    pub score: f64,
}

/// Term frequency: occurrences divided by document length.
///
/// An empty document yields an empty map.
pub fn compute_tf<S: AsRef<str>>(tokens: &[S]) -> FxHashMap<String, f64> {
    if tokens.is_empty() {
        return FxHashMap::default();
    }

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }

    let total = tokens.len() as f64;
    counts
        .into_iter()
        .map(|(term, count)| (term.to_string(), count as f64 / total))
        .collect()
}

/// Inverse document frequency: `ln(N / (1 + df(t)))`.
///
/// `df` counts documents containing the term at least once. An empty corpus
/// yields an empty map; empty documents count towards `N` only.
pub fn compute_idf<S: AsRef<str>>(documents: &[Vec<S>]) -> FxHashMap<String, f64> {
    if documents.is_empty() {
        return FxHashMap::default();
    }

    let mut doc_freq: FxHashMap<&str, usize> = FxHashMap::default();
    for doc in documents {
        let unique: FxHashSet<&str> = doc.iter().map(|t| t.as_ref()).collect();
        for term in unique {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    let n = documents.len() as f64;
    doc_freq
        .into_iter()
        .map(|(term, df)| (term.to_string(), (n / (1.0 + df as f64)).ln()))
        .collect()
}

/// Elementwise product of TF and IDF. Terms without an IDF entry score 0.
pub fn compute_tfidf(
    tf: &FxHashMap<String, f64>,
    idf: &FxHashMap<String, f64>,
) -> FxHashMap<String, f64> {
    tf.iter()
        .map(|(term, tf)| {
            let idf = idf.get(term).copied().unwrap_or(0.0);
            (term.clone(), tf * idf)
        })
        .collect()
}

/// Full statistics for one document against a precomputed IDF, in
/// first-occurrence order
pub fn term_stats<S: AsRef<str>>(tokens: &[S], idf: &FxHashMap<String, f64>) -> Vec<TermStats> {
    let tf = compute_tf(tokens);
    first_occurrence_order(tokens)
        .into_iter()
        .map(|term| {
            let tf = tf.get(term).copied().unwrap_or(0.0);
            let idf = idf.get(term).copied().unwrap_or(0.0);
            TermStats {
                term: term.to_string(),
                tf,
                idf,
                tfidf: tf * idf,
            }
        })
        .collect()
}

/// Extract the top-k keywords of a single text.
///
/// The text is its own one-document corpus, so every term shares the IDF
/// `ln(1/2)`. Its magnitude is used as the weight: a uniform factor must not
/// flip the order, and the result ranks by frequency with ties in order of
/// first occurrence.
pub fn extract_keywords(tokenizer: &Tokenizer, text: &str, top_k: usize) -> Vec<String> {
    let tokens = tokenizer.tokenize(text);
    if tokens.is_empty() || top_k == 0 {
        return Vec::new();
    }

    let tf = compute_tf(&tokens);
    let idf: FxHashMap<String, f64> = compute_idf(std::slice::from_ref(&tokens))
        .into_iter()
        .map(|(term, idf)| (term, idf.abs()))
        .collect();
    let tfidf = compute_tfidf(&tf, &idf);

    rank_terms(&tokens, &tfidf, top_k)
        .into_iter()
        .map(|k| k.term)
        .collect()
}

/// Batch keyword ranking: corpus IDF times one pooled TF.
///
/// Returns at most `top_k` keywords, descending by score, ties in order of
/// first occurrence across the concatenated documents.
pub fn batch_top_keywords<S: AsRef<str>>(documents: &[Vec<S>], top_k: usize) -> Vec<KeywordScore> {
    let idf = compute_idf(documents);
    let pooled: Vec<&str> = documents
        .iter()
        .flat_map(|doc| doc.iter().map(|t| t.as_ref()))
        .collect();
    let tf = compute_tf(&pooled);
    let tfidf = compute_tfidf(&tf, &idf);

    rank_terms(&pooled, &tfidf, top_k)
}

/// Rank the distinct terms of `tokens` by score, descending, stable on
/// first occurrence
fn rank_terms<S: AsRef<str>>(
    tokens: &[S],
    scores: &FxHashMap<String, f64>,
    top_k: usize,
) -> Vec<KeywordScore> {
    let mut ranked: Vec<KeywordScore> = first_occurrence_order(tokens)
        .into_iter()
        .map(|term| KeywordScore {
            term: term.to_string(),
            score: scores.get(term).copied().unwrap_or(0.0),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_k);
    ranked
}

fn first_occurrence_order<S: AsRef<str>>(tokens: &[S]) -> Vec<&str> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    tokens
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| seen.insert(*t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_tf_sums_to_one() {
        let tf = compute_tf(&doc(&["rust", "rust", "cargo", "crate"]));
        assert!((tf["rust"] - 0.5).abs() < 1e-12);
        assert!((tf["cargo"] - 0.25).abs() < 1e-12);
        let sum: f64 = tf.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tf_empty_document() {
        let empty: Vec<String> = Vec::new();
        assert!(compute_tf(&empty).is_empty());
    }

    #[test]
    fn test_idf_formula() {
        let docs = vec![
            doc(&["rust", "cargo"]),
            doc(&["rust", "rust"]),
            doc(&["python"]),
            doc(&["golang"]),
        ];
        let idf = compute_idf(&docs);
        // rust appears in 2 of 4 documents (set membership, not frequency)
        assert!((idf["rust"] - (4.0_f64 / 3.0).ln()).abs() < 1e-12);
        assert!((idf["cargo"] - 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_idf_degenerate_corpora() {
        let none: Vec<Vec<String>> = Vec::new();
        assert!(compute_idf(&none).is_empty());

        let one_empty: Vec<Vec<String>> = vec![Vec::new()];
        assert!(compute_idf(&one_empty).is_empty());
    }

    #[test]
    fn test_tfidf_missing_idf_is_zero() {
        let tf = compute_tf(&doc(&["known", "unknown"]));
        let mut idf = FxHashMap::default();
        idf.insert("known".to_string(), 2.0);

        let tfidf = compute_tfidf(&tf, &idf);
        assert!((tfidf["known"] - 1.0).abs() < 1e-12);
        assert_eq!(tfidf["unknown"], 0.0);
        assert!(tfidf.values().all(|v| v.is_finite()));
    }

    #[test]
    fn test_term_stats_order() {
        let tokens = doc(&["beta", "alpha", "beta"]);
        let idf = compute_idf(&[tokens.clone(), doc(&["gamma"])]);
        let stats = term_stats(&tokens, &idf);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].term, "beta");
        assert!((stats[0].tf - 2.0 / 3.0).abs() < 1e-12);
        assert!((stats[0].tfidf - stats[0].tf * stats[0].idf).abs() < 1e-12);
    }

    #[test]
    fn test_extract_keywords_ranks_by_frequency() {
        let tokenizer = Tokenizer::default();
        let keywords = extract_keywords(&tokenizer, "the quick quick fox fox fox", 2);
        assert_eq!(keywords, vec!["fox", "quick"]);
    }

    #[test]
    fn test_extract_keywords_ties_keep_order() {
        let tokenizer = Tokenizer::default();
        let keywords = extract_keywords(&tokenizer, "zebra apple mango", DEFAULT_TOP_K);
        assert_eq!(keywords, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_extract_keywords_empty() {
        let tokenizer = Tokenizer::default();
        assert!(extract_keywords(&tokenizer, "", 5).is_empty());
        assert!(extract_keywords(&tokenizer, "rust", 0).is_empty());
    }

    #[test]
    fn test_batch_top_keywords() {
        let docs = vec![
            doc(&["rust", "tutorial"]),
            doc(&["rust", "compiler"]),
            doc(&["cooking", "pasta"]),
            doc(&["cooking", "rust"]),
            doc(&["garden"]),
        ];
        let top = batch_top_keywords(&docs, 3);

        assert_eq!(top.len(), 3);
        // Descending scores
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        // cooking: tf=2/9, idf=ln(5/3)
        assert_eq!(top[0].term, "cooking");
        assert!((top[0].score - (2.0 / 9.0) * (5.0_f64 / 3.0).ln()).abs() < 1e-12);
        // tutorial, compiler, pasta and garden tie at tf=1/9, idf=ln(5/2);
        // first occurrence wins
        assert_eq!(top[1].term, "tutorial");
        assert_eq!(top[2].term, "compiler");
        // rust is common to three documents and falls behind
        assert!(!top.iter().any(|k| k.term == "rust"));
    }

    #[test]
    fn test_batch_top_keywords_empty() {
        let none: Vec<Vec<String>> = Vec::new();
        assert!(batch_top_keywords(&none, 20).is_empty());
    }
}
