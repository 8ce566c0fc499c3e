//! Draft session endpoints: the editable form workflow.

use actix_multipart::Multipart;
use actix_web::web::{self, Json, Path};
use actix_web::{HttpResponse, Responder};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::draft::multipart::read_signature_file;
use crate::draft::session::{DraftOp, DraftSession};
use crate::state::AppState;
use crate::ErrorResponse;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateDraftRequest {
    /// When set, the draft is seeded from this stored letter (edit form);
    /// otherwise a blank creation form is opened.
    pub letter_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignatureUploadResponse {
    pub signature: String,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Draft Service",
    post,
    path = "/drafts",
    request_body = CreateDraftRequest,
    responses(
        (status = 201, description = "Draft session opened", body = DraftSession),
        (status = 404, description = "Letter to edit not found", body = ErrorResponse)
    )
)]
pub async fn create_draft(
    req: Json<CreateDraftRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let session = match req.letter_id {
        Some(letter_id) => {
            // The edit form cannot open without its letter; a failed fetch
            // aborts the whole action.
            match data.store.get_letter(letter_id).await {
                Ok(letter) => DraftSession::for_letter(letter),
                Err(e) => {
                    error!("Failed to open edit draft for letter {}: {}", letter_id, e);
                    return e.error_response("Letter not found");
                }
            }
        }
        None => DraftSession::new(),
    };

    info!(
        "Draft session {} opened (letter: {:?})",
        session.id, session.letter_id
    );
    let response = HttpResponse::Created().json(&session);
    data.drafts.write().insert(session.id, session);
    response
}

#[utoipa::path(
    context_path = "/api",
    tag = "Draft Service",
    get,
    path = "/drafts/{id}",
    responses(
        (status = 200, description = "Draft session state", body = DraftSession),
        (status = 404, description = "Draft session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Draft session ID")
    )
)]
pub async fn get_draft(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let sessions = data.drafts.read();
    match sessions.get(&id.into_inner()) {
        Some(session) => HttpResponse::Ok().json(session),
        None => HttpResponse::NotFound().json(ErrorResponse::not_found("Draft session not found")),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Draft Service",
    post,
    path = "/drafts/{id}/ops",
    request_body = DraftOp,
    responses(
        (status = 200, description = "Operation applied, new draft state", body = DraftSession),
        (status = 400, description = "Operation rejected", body = ErrorResponse),
        (status = 404, description = "Draft session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Draft session ID")
    )
)]
pub async fn apply_draft_op(
    id: Path<Uuid>,
    op: Json<DraftOp>,
    data: web::Data<AppState>,
) -> impl Responder {
    let mut sessions = data.drafts.write();
    let session = match sessions.get_mut(&id.into_inner()) {
        Some(session) => session,
        None => {
            return HttpResponse::NotFound()
                .json(ErrorResponse::not_found("Draft session not found"))
        }
    };

    match op.into_inner().apply(session.draft.clone()) {
        Ok(next) => {
            session.draft = next;
            HttpResponse::Ok().json(&*session)
        }
        Err(e) => {
            debug!("Draft op rejected for session {}: {}", session.id, e);
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Draft Service",
    post,
    path = "/drafts/{id}/signatories/{index}/signature",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Signature stored on the signatory", body = DraftSession),
        (status = 400, description = "File rejected before upload", body = ErrorResponse),
        (status = 404, description = "Draft session or signatory not found", body = ErrorResponse),
        (status = 409, description = "Another upload is still in flight", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Draft session ID"),
        ("index" = usize, Path, description = "Signatory row index")
    )
)]
pub async fn upload_draft_signature(
    path: Path<(Uuid, usize)>,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let (session_id, index) = path.into_inner();

    // Reserve the single-flight upload slot before touching the payload.
    {
        let mut sessions = data.drafts.write();
        let session = match sessions.get_mut(&session_id) {
            Some(session) => session,
            None => {
                return HttpResponse::NotFound()
                    .json(ErrorResponse::not_found("Draft session not found"))
            }
        };
        if session.uploading {
            return HttpResponse::Conflict().json(ErrorResponse::new(
                "UploadInProgress",
                "Another signature upload is still in progress",
            ));
        }
        if index >= session.draft.signatories.len() {
            return HttpResponse::NotFound()
                .json(ErrorResponse::not_found("Signatory not found"));
        }
        session.uploading = true;
    }

    let release = |data: &web::Data<AppState>| {
        if let Some(session) = data.drafts.write().get_mut(&session_id) {
            session.uploading = false;
        }
    };

    // Type and size limits are checked while the payload streams in; the
    // store is only contacted once the file passed them.
    let file = match read_signature_file(payload).await {
        Ok(file) => file,
        Err(e) => {
            warn!("Signature upload rejected for session {}: {}", session_id, e);
            release(&data);
            return e.into();
        }
    };

    let uploaded = data
        .store
        .upload_signature(file.data, file.filename, file.content_type)
        .await;

    let mut sessions = data.drafts.write();
    let session = match sessions.get_mut(&session_id) {
        Some(session) => session,
        None => {
            return HttpResponse::NotFound()
                .json(ErrorResponse::not_found("Draft session not found"))
        }
    };
    session.uploading = false;

    match uploaded {
        Ok(reference) => match session.draft.clone().set_signature_at(index, reference) {
            Ok(next) => {
                info!(
                    "Signature stored for session {} signatory {}",
                    session_id, index
                );
                session.draft = next;
                HttpResponse::Ok().json(&*session)
            }
            Err(e) => {
                HttpResponse::NotFound().json(ErrorResponse::not_found(&e.to_string()))
            }
        },
        Err(e) => {
            error!("Store rejected signature upload: {}", e);
            e.error_response("Upload target not found")
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Draft Service",
    post,
    path = "/drafts/{id}/submit",
    responses(
        (status = 200, description = "Existing letter replaced", body = crate::letter::models::Letter),
        (status = 201, description = "New letter created", body = crate::letter::models::Letter),
        (status = 400, description = "Validation failed, nothing sent", body = ErrorResponse),
        (status = 404, description = "Draft session not found", body = ErrorResponse),
        (status = 409, description = "Upload still in flight", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Draft session ID")
    )
)]
pub async fn submit_draft(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let session_id = id.into_inner();

    let (letter_id, draft) = {
        let sessions = data.drafts.read();
        let session = match sessions.get(&session_id) {
            Some(session) => session,
            None => {
                return HttpResponse::NotFound()
                    .json(ErrorResponse::not_found("Draft session not found"))
            }
        };
        if session.uploading {
            return HttpResponse::Conflict().json(ErrorResponse::new(
                "UploadInProgress",
                "Wait for the signature upload to finish before submitting",
            ));
        }
        (session.letter_id, session.draft.clone())
    };

    // Validation failures block the submission entirely; no request is sent.
    if let Err(message) = draft.validate() {
        debug!("Draft submission blocked by validation");
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    let payload = match draft.into_payload() {
        Ok(payload) => payload,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()))
        }
    };

    // Full replace on update, no version check: the last submission wins.
    let result = match letter_id {
        Some(letter_id) => data.store.update_letter(letter_id, &payload).await,
        None => data.store.create_letter(&payload).await,
    };

    match result {
        Ok(letter) => {
            data.drafts.write().remove(&session_id);
            info!("Draft session {} submitted as letter {}", session_id, letter.id);
            if letter_id.is_some() {
                HttpResponse::Ok().json(letter)
            } else {
                HttpResponse::Created().json(letter)
            }
        }
        Err(e) => {
            // The session stays as it was so the user can retry manually.
            error!("Store rejected draft submission: {}", e);
            e.error_response("Letter not found")
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Draft Service",
    delete,
    path = "/drafts/{id}",
    responses(
        (status = 204, description = "Draft session discarded"),
        (status = 404, description = "Draft session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Draft session ID")
    )
)]
pub async fn delete_draft(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    if data.drafts.write().remove(&id.into_inner()).is_some() {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(ErrorResponse::not_found("Draft session not found"))
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Draft Service",
    post,
    path = "/upload-signature",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Signature uploaded", body = SignatureUploadResponse),
        (status = 400, description = "File rejected before upload", body = ErrorResponse),
        (status = 502, description = "Store rejected the upload", body = ErrorResponse)
    )
)]
pub async fn upload_signature(payload: Multipart, data: web::Data<AppState>) -> impl Responder {
    let file = match read_signature_file(payload).await {
        Ok(file) => file,
        Err(e) => {
            warn!("Signature upload rejected: {}", e);
            return e.into();
        }
    };

    match data
        .store
        .upload_signature(file.data, file.filename, file.content_type)
        .await
    {
        Ok(signature) => HttpResponse::Ok().json(SignatureUploadResponse { signature }),
        Err(e) => {
            error!("Store rejected signature upload: {}", e);
            e.error_response("Upload target not found")
        }
    }
}
