//! Relevance Scoring: pluggable, trait-based scorer that measures how close the
//! résumé text is to each job description.
//!
//! Default: `TfIdfScorer` (smoothed TF-IDF, L2-normalized vectors, cosine similarity).
//!
//! `AppState` holds an `Arc<dyn RelevanceScorer>`, built at startup from config.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use anyhow::{bail, Result};
use regex::Regex;

use crate::matching::stop_words;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The relevance scorer trait. Implement this to swap backends without touching
/// the ranker or the handlers.
pub trait RelevanceScorer: Send + Sync {
    /// Returns one relevance value in [0, 1] per description, in input order.
    fn score(&self, resume: &str, descriptions: &[&str]) -> Vec<f64>;

    /// Backend label reported alongside match results.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// Stop-word selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopWords {
    #[default]
    English,
    Spanish,
    None,
}

impl StopWords {
    fn words(self) -> &'static [&'static str] {
        match self {
            StopWords::English => stop_words::ENGLISH,
            StopWords::Spanish => stop_words::SPANISH,
            StopWords::None => &[],
        }
    }
}

impl FromStr for StopWords {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(StopWords::English),
            "spanish" | "es" => Ok(StopWords::Spanish),
            "none" | "" => Ok(StopWords::None),
            other => bail!("unknown stop-word list '{other}'"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TfIdfScorer
// ────────────────────────────────────────────────────────────────────────────

/// Tokens are runs of at least two Unicode word characters.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// TF-IDF + cosine similarity scorer.
///
/// The corpus for one call is `[resume] ++ descriptions`, so IDF weights are
/// fitted per request:
/// - tf = raw term count
/// - idf = ln((1 + n) / (1 + df)) + 1
/// - vectors L2-normalized, relevance = cosine(resume, description)
pub struct TfIdfScorer {
    token_re: Regex,
    stop_words: HashSet<&'static str>,
}

impl TfIdfScorer {
    pub fn new(stop_words: StopWords) -> Result<Self> {
        Ok(Self {
            token_re: Regex::new(TOKEN_PATTERN)?,
            stop_words: stop_words.words().iter().copied().collect(),
        })
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.token_re
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }
}

impl RelevanceScorer for TfIdfScorer {
    fn score(&self, resume: &str, descriptions: &[&str]) -> Vec<f64> {
        if descriptions.is_empty() {
            return Vec::new();
        }

        let term_counts: Vec<HashMap<String, usize>> = std::iter::once(resume)
            .chain(descriptions.iter().copied())
            .map(|doc| count_terms(self.tokenize(doc)))
            .collect();

        let idf = inverse_document_frequency(&term_counts);
        let vectors: Vec<HashMap<&str, f64>> = term_counts
            .iter()
            .map(|counts| tfidf_vector(counts, &idf))
            .collect();

        let Some((resume_vec, job_vecs)) = vectors.split_first() else {
            return vec![0.0; descriptions.len()];
        };
        job_vecs
            .iter()
            .map(|job_vec| cosine_similarity(resume_vec, job_vec).clamp(0.0, 1.0))
            .collect()
    }

    fn backend(&self) -> &'static str {
        "tfidf"
    }
}

fn count_terms(tokens: Vec<String>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn inverse_document_frequency(docs: &[HashMap<String, usize>]) -> HashMap<&str, f64> {
    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in docs {
        for term in doc.keys() {
            *df.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let n = docs.len() as f64;
    df.into_iter()
        .map(|(term, freq)| (term, ((1.0 + n) / (1.0 + freq as f64)).ln() + 1.0))
        .collect()
}

fn tfidf_vector<'a>(
    counts: &'a HashMap<String, usize>,
    idf: &HashMap<&str, f64>,
) -> HashMap<&'a str, f64> {
    let mut vector: HashMap<&str, f64> = counts
        .iter()
        .map(|(term, &tf)| {
            let weight = tf as f64 * idf.get(term.as_str()).copied().unwrap_or(1.0);
            (term.as_str(), weight)
        })
        .collect();

    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

/// Cosine similarity of two sparse vectors; 0 when either is all zeros.
pub fn cosine_similarity(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, wa)| large.get(*term).map(|wb| wa * wb))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> TfIdfScorer {
        TfIdfScorer::new(StopWords::English).unwrap()
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stop_words() {
        let tokens = scorer().tokenize("I built a Rust API with the team, in 2 weeks");
        assert_eq!(tokens, vec!["built", "rust", "api", "team", "weeks"]);
    }

    #[test]
    fn test_tokenize_keeps_accented_words() {
        let tokens = scorer().tokenize("Científico de datos, estadística");
        assert_eq!(tokens, vec!["científico", "datos", "estadística"]);
    }

    #[test]
    fn test_spanish_stop_words() {
        let scorer = TfIdfScorer::new(StopWords::Spanish).unwrap();
        let tokens = scorer.tokenize("Experiencia en Python y SQL para los datos");
        assert_eq!(tokens, vec!["experiencia", "python", "sql", "datos"]);
    }

    #[test]
    fn test_identical_text_scores_one() {
        let text = "python machine learning models";
        let scores = scorer().score(text, &[text]);
        assert!((scores[0] - 1.0).abs() < 1e-9, "got {}", scores[0]);
    }

    #[test]
    fn test_disjoint_text_scores_zero() {
        let scores = scorer().score("python sql", &["javascript react"]);
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_scores_are_positional_and_bounded() {
        let scores = scorer().score(
            "Experiencia en python y machine learning",
            &[
                "Buscamos científico de datos con experiencia en python y machine learning",
                "Desarrollador con conocimientos en javascript y react",
                "",
            ],
        );
        assert_eq!(scores.len(), 3);
        assert!(scores[0] > scores[1]);
        assert_eq!(scores[2], 0.0);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_resume_of_only_stop_words_scores_zero() {
        let scores = scorer().score("the and of", &["python developer"]);
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_no_descriptions_returns_empty() {
        assert!(scorer().score("python", &[]).is_empty());
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        // "python" appears in every job, "kubernetes" only in the second.
        let scores = scorer().score(
            "python kubernetes",
            &["python analyst", "python kubernetes engineer", "python tutor"],
        );
        assert!(scores[1] > scores[0]);
        assert!((scores[0] - scores[2]).abs() < 1e-9);
    }

    #[test]
    fn test_idf_smoothing() {
        let docs = vec![
            count_terms(vec!["rust".to_string()]),
            count_terms(vec!["rust".to_string(), "go".to_string()]),
        ];
        let idf = inverse_document_frequency(&docs);
        assert!((idf["rust"] - 1.0).abs() < 1e-12);
        assert!((idf["go"] - ((3.0_f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_stop_words_from_str() {
        assert_eq!("English".parse::<StopWords>().unwrap(), StopWords::English);
        assert_eq!("es".parse::<StopWords>().unwrap(), StopWords::Spanish);
        assert_eq!("none".parse::<StopWords>().unwrap(), StopWords::None);
        assert!("klingon".parse::<StopWords>().is_err());
    }

    #[test]
    fn test_backend_label_is_tfidf() {
        assert_eq!(scorer().backend(), "tfidf");
    }
}
