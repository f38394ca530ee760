//! Conversions from external infrastructure errors into domain errors.

use messesinfo_domain::MessesError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MessesError);

impl From<InfraError> for MessesError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MessesError> for InfraError {
    fn from(value: MessesError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoMessesError {
    fn into_messes(self) -> MessesError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MessesError */
/* -------------------------------------------------------------------------- */

impl IntoMessesError for HttpError {
    fn into_messes(self) -> MessesError {
        if self.is_timeout() {
            return MessesError::Fetch("HTTP request timed out".into());
        }

        if self.is_connect() {
            return MessesError::Fetch("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return MessesError::Fetch(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        if self.is_decode() {
            return MessesError::Parse(format!("response body could not be decoded: {self}"));
        }

        if self.is_builder() {
            return MessesError::Internal(format!("invalid HTTP request: {self}"));
        }

        MessesError::Fetch(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_messes())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → MessesError */
/* -------------------------------------------------------------------------- */

impl IntoMessesError for JsonError {
    fn into_messes(self) -> MessesError {
        use serde_json::error::Category;

        match self.classify() {
            Category::Io => MessesError::Fetch(format!("failed to read JSON body: {self}")),
            Category::Syntax | Category::Eof => {
                MessesError::Parse(format!("malformed JSON at line {}: {self}", self.line()))
            }
            Category::Data => MessesError::Parse(format!("unexpected JSON shape: {self}")),
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_messes())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
