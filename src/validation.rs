//! Field-level validation errors shared by the catalog factory and handlers.
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid fields: {}", field_names(.0))]
    InvalidFields(Vec<FieldError>),
    #[error("unknown menu type")]
    UnknownType,
}

impl ValidationError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            ValidationError::InvalidFields(fields) => fields,
            ValidationError::UnknownType => &[],
        }
    }
}

fn field_names(fields: &[FieldError]) -> String {
    fields.iter().map(|f| f.field).collect::<Vec<_>>().join(", ")
}

/// Collects field errors; `finish` is `Ok` only when nothing was recorded.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
        if !ok {
            self.0.push(FieldError::new(field, message));
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidFields(self.0))
        }
    }
}
