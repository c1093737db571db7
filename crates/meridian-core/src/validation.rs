//! Field checks shared by the `*Input` types.

use crate::MeridianError;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_LABEL_LEN: usize = 100;
pub const MAX_EXCERPT_LEN: usize = 500;
pub const MAX_EMAIL_LEN: usize = 254;

/// Fails when `value` is blank or longer than `max` characters.
pub fn require_text(context: &str, value: &str, max: usize) -> Result<(), MeridianError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MeridianError::validation_error(context, "must not be empty"));
    }
    check_length(context, trimmed, max)
}

/// Like [`require_text`] but `None` passes.
pub fn optional_text(context: &str, value: Option<&str>, max: usize) -> Result<(), MeridianError> {
    match value {
        Some(v) => check_length(context, v.trim(), max),
        None => Ok(()),
    }
}

fn check_length(context: &str, value: &str, max: usize) -> Result<(), MeridianError> {
    let len = value.chars().count();
    if len > max {
        return Err(MeridianError::validation_error(
            context,
            &format!("must be at most {} characters (got {})", max, len),
        ));
    }
    Ok(())
}

/// Accepts `local@domain.tld` shaped addresses.
pub fn require_email(context: &str, value: &str) -> Result<(), MeridianError> {
    require_text(context, value, MAX_EMAIL_LEN)?;
    let value = value.trim();
    let mut parts = value.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => {
            return Err(MeridianError::validation_error(
                context,
                "must contain exactly one '@'",
            ))
        }
    };
    let domain_ok = domain
        .split('.')
        .filter(|label| !label.is_empty())
        .count()
        >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok || value.chars().any(char::is_whitespace) {
        return Err(MeridianError::validation_error(
            context,
            "is not a valid email address",
        ));
    }
    Ok(())
}

/// Image references must point at our upload area or an absolute http(s) URL.
pub fn optional_image_url(context: &str, value: Option<&str>) -> Result<(), MeridianError> {
    let Some(url) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(());
    };
    if url.starts_with("/uploads/") || url.starts_with("http://") || url.starts_with("https://")
    {
        check_length(context, url, 1024)
    } else {
        Err(MeridianError::validation_error(
            context,
            "must start with /uploads/, http:// or https://",
        ))
    }
}

/// Trims and drops empty optional strings.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
