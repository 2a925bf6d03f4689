//! Résumé intake: turns an uploaded file into plain résumé text.

use bytes::Bytes;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    PlainText,
    Pdf,
}

impl ResumeFormat {
    /// Detects the format from the file name first, then the declared content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Option<Self> {
        let extension = file_name
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => return Some(ResumeFormat::Pdf),
            Some("txt") | Some("text") | Some("md") => return Some(ResumeFormat::PlainText),
            _ => {}
        }

        match content_type.map(|c| c.to_ascii_lowercase()) {
            Some(ct) if ct.starts_with("application/pdf") => Some(ResumeFormat::Pdf),
            Some(ct) if ct.starts_with("text/") => Some(ResumeFormat::PlainText),
            // a bare form field carries no file name and no content type
            None if file_name.is_none() => Some(ResumeFormat::PlainText),
            _ => None,
        }
    }
}

/// Extracts résumé text from uploaded bytes.
///
/// PDF parsing is CPU-bound and runs on the blocking pool.
pub async fn extract_resume_text(format: ResumeFormat, data: Bytes) -> Result<String, AppError> {
    match format {
        ResumeFormat::PlainText => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Validation("Résumé text must be UTF-8".to_string())),
        ResumeFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data).map_err(|e| {
                AppError::UnprocessableEntity(format!("Failed to extract text from PDF: {e}"))
            })
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?,
    }
}
