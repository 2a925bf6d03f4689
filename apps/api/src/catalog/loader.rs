//! Catalogue loader: reads job postings and courses from disk once at startup.
//!
//! Jobs come from a JSON array (`vacantes.json` layout) or a CSV export in the
//! "ofertas" layout. Courses always come from a JSON array. When either file is
//! missing the built-in sample catalogue is used instead.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::catalog::models::{Catalog, Course, JobPosting};

/// One row of the "ofertas" CSV export. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct OfertaRecord {
    #[serde(rename = "ID_Oferta", default)]
    id: u64,
    #[serde(rename = "Empresa", default)]
    company: String,
    #[serde(rename = "Puesto", default)]
    title: String,
    #[serde(rename = "Req_Hard_Skills", default)]
    hard_skills: String,
    #[serde(rename = "Req_Soft_Skills", default)]
    soft_skills: String,
    #[serde(rename = "Descripcion_Puesto", default)]
    description: String,
}

impl From<OfertaRecord> for JobPosting {
    fn from(record: OfertaRecord) -> Self {
        JobPosting {
            id: record.id,
            title: record.title,
            company: record.company,
            description: record.description,
            technical_skills: split_skill_list(&record.hard_skills),
            soft_skills: split_skill_list(&record.soft_skills),
        }
    }
}

/// Loads the catalogue from `jobs_path` and `courses_path`.
///
/// Missing files fall back to `Catalog::sample()`. Files that exist but cannot
/// be parsed are a startup error.
pub async fn load_catalog(jobs_path: &Path, courses_path: &Path) -> Result<Catalog> {
    let jobs_raw = read_optional(jobs_path).await?;
    let courses_raw = read_optional(courses_path).await?;

    let (jobs_raw, courses_raw) = match (jobs_raw, courses_raw) {
        (Some(jobs), Some(courses)) => (jobs, courses),
        _ => {
            warn!(
                "Catalog files '{}' or '{}' not found, using built-in sample catalog",
                jobs_path.display(),
                courses_path.display()
            );
            return Ok(Catalog::sample());
        }
    };

    let jobs = if is_csv(jobs_path) {
        parse_jobs_csv(&jobs_raw)
    } else {
        parse_jobs_json(&jobs_raw)
    }
    .with_context(|| format!("Failed to parse job postings from '{}'", jobs_path.display()))?;

    let courses = parse_courses_json(&courses_raw)
        .with_context(|| format!("Failed to parse courses from '{}'", courses_path.display()))?;

    info!(
        "Loaded {} job postings and {} courses",
        jobs.len(),
        courses.len()
    );
    Ok(Catalog::new(jobs, courses))
}

pub fn parse_jobs_json(raw: &str) -> Result<Vec<JobPosting>> {
    serde_json::from_str(raw).context("Job file must be a JSON array of postings")
}

pub fn parse_jobs_csv(raw: &str) -> Result<Vec<JobPosting>> {
    let mut reader = csv::Reader::from_reader(raw.as_bytes());
    let mut jobs = Vec::new();
    for (row, record) in reader.deserialize::<OfertaRecord>().enumerate() {
        let record = record.with_context(|| format!("Invalid CSV row {}", row + 1))?;
        jobs.push(JobPosting::from(record));
    }
    Ok(jobs)
}

pub fn parse_courses_json(raw: &str) -> Result<Vec<Course>> {
    serde_json::from_str(raw).context("Course file must be a JSON array of courses")
}

/// Splits a comma-separated skill column, dropping blanks.
fn split_skill_list(column: &str) -> Vec<String> {
    column
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read '{}'", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const OFERTAS_CSV: &str = "ID_Oferta,Empresa,Puesto,Min_Exp_Anios,Req_Hard_Skills,Req_Soft_Skills,Descripcion_Puesto\n\
501,TechCorp Analytics,Científico de Datos Jr.,1.0,\"Python, SQL Avanzado, Modelos de Series de Tiempo\",\"Trabajo en Equipo, Resolución de Problemas, Comunicación\",Buscamos un Científico de Datos Junior\n\
503,Gobierno Digital MX,Analista de Datos Público,0.0,\"R, Estadística, PowerBI, Excel\",\"Ética Profesional, , Comunicación\",Vacante para recién egresados\n";

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_split_skill_list_trims_and_drops_blanks() {
        assert_eq!(
            split_skill_list(" Python , SQL,, Excel "),
            vec!["Python", "SQL", "Excel"]
        );
        assert!(split_skill_list("").is_empty());
    }

    #[test]
    fn test_parse_jobs_csv_ofertas_layout() {
        let jobs = parse_jobs_csv(OFERTAS_CSV).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, 501);
        assert_eq!(jobs[0].title, "Científico de Datos Jr.");
        assert_eq!(jobs[0].company, "TechCorp Analytics");
        assert_eq!(
            jobs[0].technical_skills,
            vec!["Python", "SQL Avanzado", "Modelos de Series de Tiempo"]
        );
        assert_eq!(jobs[1].soft_skills, vec!["Ética Profesional", "Comunicación"]);
    }

    #[test]
    fn test_parse_jobs_json_rejects_non_array() {
        assert!(parse_jobs_json(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn test_is_csv_by_extension() {
        assert!(is_csv(Path::new("ofertas_data.CSV")));
        assert!(!is_csv(Path::new("vacantes.json")));
        assert!(!is_csv(Path::new("vacantes")));
    }

    #[tokio::test]
    async fn test_load_catalog_from_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = write_temp(
            &dir,
            "vacantes.json",
            r#"[{"id": 10, "titulo": "Dev", "requisitos_tecnicos": ["Docker"]}]"#,
        );
        let courses = write_temp(
            &dir,
            "cursos.json",
            r#"[{"habilidad": "Docker", "titulo_curso": "Docker 101", "proveedor": "edX"}]"#,
        );

        let catalog = load_catalog(&jobs, &courses).await.unwrap();
        assert_eq!(catalog.jobs.len(), 1);
        assert_eq!(catalog.jobs[0].technical_skills, vec!["Docker"]);
        assert_eq!(catalog.courses[0].title, "Docker 101");
    }

    #[tokio::test]
    async fn test_load_catalog_from_csv_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = write_temp(&dir, "ofertas_data.csv", OFERTAS_CSV);
        let courses = write_temp(&dir, "cursos.json", "[]");

        let catalog = load_catalog(&jobs, &courses).await.unwrap();
        assert_eq!(catalog.jobs.len(), 2);
        assert!(catalog.courses.is_empty());
    }

    #[tokio::test]
    async fn test_missing_files_fall_back_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_catalog(
            &dir.path().join("missing.json"),
            &dir.path().join("also-missing.json"),
        )
        .await
        .unwrap();
        assert_eq!(catalog.jobs.len(), 2);
        assert_eq!(catalog.courses.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_courses_file_falls_back_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = write_temp(
            &dir,
            "vacantes.json",
            r#"[{"id": 10, "titulo": "Dev", "requisitos_tecnicos": ["Docker"]}]"#,
        );

        let catalog = load_catalog(&jobs, &dir.path().join("cursos.json"))
            .await
            .unwrap();
        assert_eq!(catalog.jobs, Catalog::sample().jobs);
        assert_eq!(catalog.courses.len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = write_temp(&dir, "vacantes.json", "not json");
        let courses = write_temp(&dir, "cursos.json", "[]");

        let err = load_catalog(&jobs, &courses).await.unwrap_err();
        assert!(format!("{err:#}").contains("vacantes.json"));
    }
}
