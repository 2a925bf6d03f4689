use serde::{Deserialize, Deserializer, Serialize};

/// A job posting from the reference catalogue.
///
/// Field aliases accept the Spanish keys of the `vacantes.json` data files.
/// Absent or `null` fields deserialize as empty rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default", alias = "titulo")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default", alias = "empresa")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default", alias = "descripcion")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        alias = "requisitos_tecnicos"
    )]
    pub technical_skills: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        alias = "requisitos_blandos"
    )]
    pub soft_skills: Vec<String>,
}

/// A training course that closes a gap for one target skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default", alias = "habilidad")]
    pub skill: String,
    #[serde(default, deserialize_with = "null_as_default", alias = "titulo_curso")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default", alias = "proveedor")]
    pub provider: String,
}

/// Reads `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// In-memory reference data, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub jobs: Vec<JobPosting>,
    pub courses: Vec<Course>,
}

impl Catalog {
    pub fn new(jobs: Vec<JobPosting>, courses: Vec<Course>) -> Self {
        Self { jobs, courses }
    }

    /// Raw skill names referenced by any posting, technical and soft, in encounter order.
    pub fn all_skills(&self) -> Vec<&str> {
        let mut skills: Vec<&str> = Vec::new();
        for job in &self.jobs {
            for skill in job.technical_skills.iter().chain(job.soft_skills.iter()) {
                if !skills.contains(&skill.as_str()) {
                    skills.push(skill);
                }
            }
        }
        skills
    }

    pub fn find_job(&self, id: u64) -> Option<&JobPosting> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Catalogue shipped with the binary, used when no data files are present.
    pub fn sample() -> Self {
        let jobs = vec![
            JobPosting {
                id: 1,
                title: "Data Scientist".to_string(),
                company: "Tech Solutions".to_string(),
                description:
                    "Buscamos científico de datos con experiencia en Python y machine learning"
                        .to_string(),
                technical_skills: strings(&["Python", "SQL", "Machine Learning", "Estadística"]),
                soft_skills: strings(&["Trabajo en equipo", "Comunicación"]),
            },
            JobPosting {
                id: 2,
                title: "Desarrollador Full Stack".to_string(),
                company: "Digital Labs".to_string(),
                description: "Desarrollador con conocimientos en JavaScript, Node.js y React"
                    .to_string(),
                technical_skills: strings(&["JavaScript", "Node.js", "React", "SQL"]),
                soft_skills: strings(&["Creatividad", "Resolución de problemas"]),
            },
        ];
        let courses = vec![
            course("Python", "Curso intensivo de Python", "Coursera"),
            course("SQL", "Bases de Datos SQL", "edX"),
            course("Machine Learning", "ML Avanzado", "Udemy"),
        ];
        Self::new(jobs, courses)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn course(skill: &str, title: &str, provider: &str) -> Course {
    Course {
        id: None,
        skill: skill.to_string(),
        title: title.to_string(),
        provider: provider.to_string(),
    }
}
