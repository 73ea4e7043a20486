use std::sync::OnceLock;

use regex::Regex;

use crate::errors::AppError;
use crate::models::rewrite::SectionType;

pub const ACCEPTED_RESUME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
];

/// Job descriptions must be longer than this after trimming.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

/// Checks the uploaded resume's declared type and size.
pub fn validate_resume(content_type: &str, size: usize, max_bytes: usize) -> Result<(), AppError> {
    // browsers may append parameters, e.g. "application/pdf; charset=binary"
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !ACCEPTED_RESUME_TYPES.contains(&mime.as_str()) {
        return Err(AppError::Validation(
            "Please upload a PDF or DOCX file".to_string(),
        ));
    }
    if size == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if size > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File size must be less than {}",
            format_file_size(max_bytes as u64)
        )));
    }
    Ok(())
}

/// Returns the trimmed job description if it is long enough to analyze.
pub fn validate_job_description(text: &str) -> Result<&str, AppError> {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MIN_JOB_DESCRIPTION_CHARS {
        return Err(AppError::Validation(format!(
            "Job description must be longer than {MIN_JOB_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// Text sent for a section rewrite must have at least this many characters.
pub const MIN_REWRITE_CHARS: usize = 10;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap())
}

/// Returns the trimmed recipient address if it looks like an e-mail address.
pub fn validate_email(email: &str) -> Result<&str, AppError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Please enter an email address".to_string(),
        ));
    }
    if !email_re().is_match(trimmed) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Checks a rewrite request: a known section and enough text to work with.
pub fn validate_rewrite<'a>(
    section_type: Option<&str>,
    current_text: &'a str,
) -> Result<(SectionType, &'a str), AppError> {
    let section = section_type.and_then(SectionType::parse).ok_or_else(|| {
        AppError::Validation(
            "Please select a section type (Summary, Experience, or Skills)".to_string(),
        )
    })?;
    let trimmed = current_text.trim();
    if trimmed.chars().count() < MIN_REWRITE_CHARS {
        return Err(AppError::Validation(format!(
            "Please enter at least {MIN_REWRITE_CHARS} characters of text to rewrite"
        )));
    }
    Ok((section, trimmed))
}

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    let mut exponent = 0;
    let mut threshold = 1024_u64;
    while exponent < UNITS.len() - 1 && bytes >= threshold {
        exponent += 1;
        threshold = threshold.saturating_mul(1024);
    }
    let scaled = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}
