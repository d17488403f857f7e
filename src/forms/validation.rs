use thiserror::Error;
use url::Url;

/// Problems caught before anything is sent to the server.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title and system are required")]
    MissingRequired,
    #[error("log URL is not a valid URL")]
    InvalidLogUrl,
    #[error("date must look like YYYY-MM-DDTHH:MM")]
    InvalidDate,
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// An empty value is fine; anything else has to parse as an absolute URL.
pub fn is_valid_url(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || Url::parse(value).is_ok()
}

pub fn check_required(title: &str, system: &str) -> Result<(), ValidationError> {
    if is_blank(title) || is_blank(system) {
        return Err(ValidationError::MissingRequired);
    }
    Ok(())
}

pub fn check_log_url(value: &str) -> Result<(), ValidationError> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLogUrl)
    }
}
