//! CV upload → text extraction → three-bullet summary.

use bytes::Bytes;

use crate::errors::AppError;
use crate::llm_client::{CompletionParams, LlmClient, LlmError};

const SUMMARY_SYSTEM: &str =
    "You are a medical recruitment expert specializing in candidate assessment.";

const SUMMARY_PROMPT: &str = r#"Analyze this candidate CV and provide a professional summary in exactly 3 bullet points.
Focus on: specialization, key experience, and standout qualifications.
Keep each point concise and impactful.

CV Content:
{cv_text}"#;

const SUMMARY_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 300,
    temperature: 0.3,
};

/// Upper bound on CV text sent to the model.
const MAX_CV_CHARS: usize = 12_000;

pub async fn summarize_cv(llm: &LlmClient, cv_text: &str) -> Result<String, LlmError> {
    let truncated: String = cv_text.chars().take(MAX_CV_CHARS).collect();
    let prompt = SUMMARY_PROMPT.replace("{cv_text}", &truncated);
    llm.call_text(&prompt, SUMMARY_SYSTEM, SUMMARY_PARAMS).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvFormat {
    Pdf,
    PlainText,
}

/// Decides the format from the content type, then the file extension.
pub fn detect_format(file_name: Option<&str>, content_type: Option<&str>) -> Option<CvFormat> {
    match content_type.map(|c| c.to_ascii_lowercase()) {
        Some(c) if c.starts_with("application/pdf") => return Some(CvFormat::Pdf),
        Some(c) if c.starts_with("text/plain") => return Some(CvFormat::PlainText),
        _ => {}
    }
    let name = file_name?.to_ascii_lowercase();
    if name.ends_with(".pdf") {
        Some(CvFormat::Pdf)
    } else if name.ends_with(".txt") {
        Some(CvFormat::PlainText)
    } else {
        None
    }
}

/// Extracts plain text from an uploaded CV. PDF parsing runs on the blocking pool.
pub async fn extract_cv_text(format: CvFormat, data: Bytes) -> Result<String, AppError> {
    let text = match format {
        CvFormat::PlainText => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::UnprocessableEntity("CV text is not valid UTF-8".into()))?,
        CvFormat::Pdf => tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            // The parser can panic on malformed files; treat that as unreadable.
            .map_err(|_| AppError::UnprocessableEntity("Could not read PDF".into()))?
            .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?,
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity("CV contains no text".into()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(None, Some("application/pdf")), Some(CvFormat::Pdf));
        assert_eq!(
            detect_format(Some("cv.TXT"), Some("application/octet-stream")),
            Some(CvFormat::PlainText)
        );
        assert_eq!(detect_format(Some("cv.pdf"), None), Some(CvFormat::Pdf));
        assert_eq!(detect_format(Some("cv.docx"), None), None);
        assert_eq!(detect_format(None, None), None);
    }

    #[tokio::test]
    async fn test_plain_text_is_trimmed() {
        let text = extract_cv_text(CvFormat::PlainText, Bytes::from_static(b"  MRCP, 8 years \n"))
            .await
            .unwrap();
        assert_eq!(text, "MRCP, 8 years");
    }

    #[tokio::test]
    async fn test_blank_cv_is_unprocessable() {
        let err = extract_cv_text(CvFormat::PlainText, Bytes::from_static(b"   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_unprocessable() {
        let err = extract_cv_text(CvFormat::Pdf, Bytes::from_static(b"not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
