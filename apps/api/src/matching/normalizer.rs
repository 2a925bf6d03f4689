//! Skill Normalizer: maps a raw skill name (or any text fragment) to its canonical form.
//!
//! Ordered substring checks, first hit wins:
//! 1. statistics variants           → `estadística`
//! 2. team-work variants            → `trabajo en equipo`
//! 3. problem-solving variants      → `resolución de problemas`
//! 4. keyword stems (`KEYWORD_STEMS`, in order) → the stem itself
//! 5. otherwise the lowercased input, whitespace runs collapsed to one space

/// Tools and skills whose versioned or compound spellings collapse to the bare stem
/// ("Python 3.x" → "python", "SQL Avanzado" → "sql").
const KEYWORD_STEMS: &[&str] = &[
    "python",
    "sql",
    "excel",
    "javascript",
    "node.js",
    "google ads",
    "seo",
    "docker",
    "liderazgo",
];

const STATISTICS: &str = "estadística";
const TEAM_WORK: &str = "trabajo en equipo";
const PROBLEM_SOLVING: &str = "resolución de problemas";

/// Returns the canonical lowercase form of a skill.
pub fn normalize_skill(raw: &str) -> String {
    let skill = normalize_text(raw);

    if skill.contains("estadistica") || skill.contains(STATISTICS) {
        return STATISTICS.to_string();
    }
    if skill.contains(TEAM_WORK) || skill.contains("equipo") {
        return TEAM_WORK.to_string();
    }
    if (skill.contains("resolución") || skill.contains("resolucion")) && skill.contains("problemas")
    {
        return PROBLEM_SOLVING.to_string();
    }

    if let Some(stem) = KEYWORD_STEMS.iter().find(|stem| skill.contains(*stem)) {
        return stem.to_string();
    }

    skill
}

/// Normalizes free text (a résumé) for substring lookup: lowercase, single spaces, trimmed.
///
/// Unlike `normalize_skill` this never collapses the text to a synonym, so every
/// skill mentioned anywhere in the text stays visible to the extractor. Skills go
/// through the same whitespace handling, so a skill is always comparable to the text.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
