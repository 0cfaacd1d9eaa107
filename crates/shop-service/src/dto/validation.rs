//! Flattening of `validator` errors into a `{field: message}` map

use validator::{ValidationErrors, ValidationErrorsKind};

use crate::services::error::{FieldErrors, ServiceError};

/// Flatten validation errors, keeping the first message per field.
///
/// Nested structs are keyed as `parent.child`, list entries as `field[i]`.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect("", errors, &mut out);
    out
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let key = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(err) = list.first() {
                    let message = err
                        .message
                        .as_ref()
                        .map_or_else(|| format!("Invalid value ({})", err.code), ToString::to_string);
                    out.insert(key, message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(&key, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(&format!("{key}[{index}]"), inner, out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidFields(field_errors(&errors))
    }
}
