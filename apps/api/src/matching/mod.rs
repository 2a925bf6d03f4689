// Matching engine: skill normalization and extraction, TF-IDF relevance,
// score fusion and ranking, plus résumé intake for uploads.
// Everything below `handlers` is synchronous and free of I/O except `intake`.

pub mod extractor;
pub mod handlers;
pub mod intake;
pub mod normalizer;
pub mod ranker;
pub mod relevance;
pub mod stop_words;
