use crate::error::{FabricaError, FabricaResult};
use regex::Regex;
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> FabricaResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(FabricaError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match &error.code {
                std::borrow::Cow::Borrowed("length") => {
                    format!("Length validation failed for field '{}'", field)
                }
                std::borrow::Cow::Borrowed("range") => {
                    format!("Value out of range for field '{}'", field)
                }
                std::borrow::Cow::Borrowed("required") => {
                    format!("Field '{}' is required", field)
                }
                _ => format!("Validation failed for field '{}': {}", field, error.code),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}

/// Validates the shape of a part identifier before any file I/O happens.
///
/// Identifiers are catalog keys and structure-file names, so the accepted
/// alphabet is restricted to what a sane file name allows: alphanumerics,
/// dot, underscore, and dash, up to 100 characters, not starting with a
/// separator.
pub fn validate_identifier(identifier: &str) -> FabricaResult<()> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(FabricaError::validation(
            "identifier",
            "Identifier must not be empty",
        ));
    }

    let identifier_regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,99}$").unwrap();

    if !identifier_regex.is_match(trimmed) {
        return Err(FabricaError::validation(
            "identifier",
            "Identifier may only contain alphanumerics, '.', '_' and '-'",
        ));
    }

    Ok(())
}
