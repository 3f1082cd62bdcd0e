use std::borrow::Cow;

use thiserror::Error;

pub mod annotations;
pub mod conditions;
pub mod crd;
pub mod labels;
pub mod list;
pub mod validation;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Resource is missing required data ({})!", .0)]
    Required(Cow<'static, str>),
    #[error("Resource contains invalid data ({field}: {reason})!")]
    Invalid {
        field: Cow<'static, str>,
        reason: Cow<'static, str>,
    },
    #[error("Resource contains too many items ({field} must have at most {max})!")]
    TooMany { field: Cow<'static, str>, max: usize },
    #[error("Resource contains a duplicate value ({field}: '{value}')!")]
    Duplicate {
        field: Cow<'static, str>,
        value: String,
    },
    #[error("Resource tried to change an immutable field ({})!", .0)]
    Immutable(Cow<'static, str>),
}

impl ValidationError {
    pub fn required(field: impl Into<Cow<'static, str>>) -> Self {
        Self::Required(field.into())
    }

    pub fn invalid(
        field: impl Into<Cow<'static, str>>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required(field) => field,
            ValidationError::Invalid { field, .. } => field,
            ValidationError::TooMany { field, .. } => field,
            ValidationError::Duplicate { field, .. } => field,
            ValidationError::Immutable(field) => field,
        }
    }
}

/// Client-side checks of the constraints documented on the API fields.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;

    /// Checks `self` as a replacement of `old`.
    fn validate_update(&self, _old: &Self) -> Result<(), ValidationError> {
        self.validate()
    }
}
