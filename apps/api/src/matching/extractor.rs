//! Skill Extractor: which known skills does a résumé mention?

use std::collections::BTreeSet;

use crate::matching::normalizer::{normalize_skill, normalize_text};

/// Returns the normalized form of every known skill found as a substring of the résumé.
///
/// A skill is reported iff `normalize_skill(skill)` occurs in `normalize_text(resume)`.
/// Paraphrases are not detected.
pub fn extract_skills<S: AsRef<str>>(resume: &str, known_skills: &[S]) -> BTreeSet<String> {
    let resume = normalize_text(resume);
    if resume.is_empty() {
        return BTreeSet::new();
    }

    known_skills
        .iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|skill| !skill.is_empty() && resume.contains(skill.as_str()))
        .collect()
}
