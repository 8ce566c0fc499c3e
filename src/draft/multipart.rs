//! Multipart reader for signature image uploads.
//!
//! The limits are enforced while the payload streams in, so an oversized or
//! non-image upload is rejected before any request is made to the store.

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::StreamExt;
use thiserror::Error;

use crate::ErrorResponse;

/// Upload limit for signature images, matching the form's client-side rule.
pub const MAX_SIGNATURE_BYTES: usize = 2 * 1024 * 1024;

/// A fully buffered signature image ready to forward to the store.
#[derive(Debug)]
pub struct SignatureFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Error)]
pub enum SignatureUploadError {
    #[error("Multipart field error: {0}")]
    Field(String),
    #[error("No file field found in multipart payload")]
    MissingFile,
    #[error("Please upload an image file")]
    NotAnImage,
    #[error("File size must be less than 2MB")]
    TooLarge,
}

impl From<SignatureUploadError> for HttpResponse {
    fn from(error: SignatureUploadError) -> Self {
        match error {
            SignatureUploadError::MissingFile
            | SignatureUploadError::NotAnImage
            | SignatureUploadError::TooLarge => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&error.to_string()))
            }
            SignatureUploadError::Field(_) => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&error.to_string())),
        }
    }
}

/// Read the `file` field from a multipart payload, rejecting anything whose
/// declared type is not an image or whose size exceeds the limit.
pub async fn read_signature_file(
    mut payload: Multipart,
) -> Result<SignatureFile, SignatureUploadError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| SignatureUploadError::Field(e.to_string()))?;
        let content_disposition = field
            .content_disposition()
            .ok_or_else(|| SignatureUploadError::Field("Content disposition not found".to_string()))?;
        let name = content_disposition
            .get_name()
            .ok_or_else(|| SignatureUploadError::Field("Field name not found".to_string()))?;

        if name != "file" {
            continue;
        }

        let filename = content_disposition
            .get_filename()
            .unwrap_or("signature")
            .to_string();

        // The declared type decides; when the part carries none, fall back
        // to guessing from the filename extension.
        let content_type = match field.content_type() {
            Some(mime) => mime.clone(),
            None => mime_guess::from_path(&filename).first_or_octet_stream(),
        };
        if content_type.type_() != mime_guess::mime::IMAGE {
            return Err(SignatureUploadError::NotAnImage);
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| SignatureUploadError::Field(e.to_string()))?;
            if data.len() + chunk.len() > MAX_SIGNATURE_BYTES {
                return Err(SignatureUploadError::TooLarge);
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(SignatureFile {
            data,
            filename,
            content_type: content_type.to_string(),
        });
    }

    Err(SignatureUploadError::MissingFile)
}
