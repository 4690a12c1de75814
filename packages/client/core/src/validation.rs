use crate::error::ValidationError;
use crate::types::FileCandidate;

const MB: u64 = 1024 * 1024;

/// Upload cap for the augmentation wizard.
pub const AUGMENTATION_UPLOAD_LIMIT_MB: u64 = 10;

/// Upload cap for the analysis chat.
pub const ANALYSIS_UPLOAD_LIMIT_MB: u64 = 50;

/// Accepts a file when its name ends in `.csv` or its MIME type says CSV, and
/// it is strictly smaller than `limit_mb` megabytes.
pub fn validate_csv(file: &FileCandidate, limit_mb: u64) -> Result<(), ValidationError> {
    let by_name = file.name.to_ascii_lowercase().ends_with(".csv");
    let by_mime = file.mime.as_deref() == Some("text/csv");
    if !by_name && !by_mime {
        return Err(ValidationError::NotCsv);
    }

    if file.size >= limit_mb * MB {
        return Err(ValidationError::TooLarge { limit_mb });
    }

    Ok(())
}

pub fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    require(email, "email")?;
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

pub fn validate_password_confirmation(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        Err(ValidationError::PasswordMismatch)
    } else {
        Ok(())
    }
}
