// Reference data: job postings and courses, loaded once and shared read-only.

pub mod handlers;
pub mod loader;
pub mod models;
