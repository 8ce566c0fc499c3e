//! Submission validation for letters.
//!
//! Provides clear, descriptive validation errors that are easy to understand
//! for both the form UI and API callers.

use std::fmt;

use crate::letter::models::{LetterPayload, Signatory};

/// Validation error with detailed, user-friendly messages.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message in Indonesian
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} tidak boleh kosong", label)).with_suggestion(format!(
            "Mohon isi {} dengan data yang valid",
            label.to_lowercase()
        ))
    }

    /// Create error for a letter without a usable signatory
    pub fn missing_signatory() -> Self {
        Self::new(
            "signatories",
            "Surat harus memiliki minimal satu penandatangan",
        )
        .with_suggestion("Isi nama dan jabatan untuk minimal satu penandatangan")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get formatted error message suitable for an error response body
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Validasi gagal: {} kesalahan ditemukan\n",
            self.errors.len()
        )];

        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }

        parts.push(String::new());
        parts.push("Mohon perbaiki data di atas dan coba lagi.".to_string());

        parts.join("\n")
    }

    /// Convert to Result - Ok if no errors, Err with formatted message if errors exist
    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate that at least one signatory carries both a name and a position
pub fn validate_signatories(signatories: &[Signatory], errors: &mut ValidationErrors) {
    if !signatories.iter().any(Signatory::is_valid) {
        errors.add(ValidationError::missing_signatory());
    }
}

/// Validate a ready-to-send payload. Used by the direct create/update
/// endpoints; the draft workflow runs the same rules through
/// `LetterDraft::validate`.
pub fn validate_payload(payload: &LetterPayload) -> Result<(), String> {
    let mut errors = ValidationErrors::new();

    validate_required(
        &payload.letter_number,
        "letter_number",
        "Nomor Surat",
        &mut errors,
    );
    validate_required(&payload.subject, "subject", "Perihal", &mut errors);
    validate_required(
        &payload.recipient_name,
        "recipient_name",
        "Nama Penerima",
        &mut errors,
    );
    validate_required(&payload.content, "content", "Isi Surat", &mut errors);
    validate_signatories(&payload.signatories, &mut errors);

    errors.into_result()
}
