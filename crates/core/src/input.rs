//! Untrusted input handling

use serde_json::{Map, Value};

use crate::errors::ValidationError;

/// Policy for fields an input schema does not recognise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFields {
    /// Fail construction when extra fields are present.
    #[default]
    Reject,

    /// Drop extra fields silently (legacy behaviour).
    Ignore,
}

impl UnknownFields {
    pub(crate) fn check(self, extra: &Map<String, Value>) -> Result<(), ValidationError> {
        if self == Self::Ignore || extra.is_empty() {
            return Ok(());
        }

        Err(ValidationError::UnexpectedFields(extra.keys().cloned().collect()))
    }
}

pub(crate) fn non_empty_name(field: &'static str, name: String) -> Result<String, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName { field });
    }

    Ok(name)
}
