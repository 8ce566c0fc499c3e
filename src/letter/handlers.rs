//! Letter and company endpoints for the list screen.
//!
//! These handlers are thin: they validate submissions before forwarding and
//! otherwise relay the store's answer. A store failure never leaves partial
//! state behind; the user retries explicitly.

use actix_web::http::header;
use actix_web::web::{self, Json, Path};
use actix_web::{HttpResponse, Responder};
use log::{debug, error, info};
use uuid::Uuid;

use crate::letter::models::{Company, Letter, LetterPayload};
use crate::letter::validation::validate_payload;
use crate::state::AppState;
use crate::ErrorResponse;

#[utoipa::path(
    context_path = "/api",
    tag = "Letter Service",
    get,
    path = "/letters",
    responses(
        (status = 200, description = "List of all letters", body = [Letter]),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn get_all_letters(data: web::Data<AppState>) -> impl Responder {
    match data.store.list_letters().await {
        Ok(letters) => HttpResponse::Ok().json(letters),
        Err(e) => {
            error!("Failed to fetch letters from store: {}", e);
            e.error_response("Letters not found")
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letter Service",
    get,
    path = "/letters/{id}",
    responses(
        (status = 200, description = "Letter found", body = Letter),
        (status = 404, description = "Letter not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the letter to retrieve")
    )
)]
pub async fn get_letter_by_id(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    match data.store.get_letter(id.into_inner()).await {
        Ok(letter) => HttpResponse::Ok().json(letter),
        Err(e) => e.error_response("Letter not found"),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letter Service",
    post,
    path = "/letters",
    request_body = LetterPayload,
    responses(
        (status = 201, description = "Letter created successfully", body = Letter),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 502, description = "Store rejected the write", body = ErrorResponse)
    )
)]
pub async fn create_letter(
    req: Json<LetterPayload>,
    data: web::Data<AppState>,
) -> impl Responder {
    let payload = req.into_inner().normalized();
    if let Err(message) = validate_payload(&payload) {
        debug!("Letter creation blocked by validation");
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    match data.store.create_letter(&payload).await {
        Ok(letter) => {
            info!("Letter {} created via store", letter.id);
            HttpResponse::Created().json(letter)
        }
        Err(e) => {
            error!("Store rejected letter creation: {}", e);
            e.error_response("Letter not found")
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letter Service",
    put,
    path = "/letters/{id}",
    request_body = LetterPayload,
    responses(
        (status = 200, description = "Letter replaced successfully", body = Letter),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Letter not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the letter to replace")
    )
)]
pub async fn update_letter(
    id: Path<Uuid>,
    req: Json<LetterPayload>,
    data: web::Data<AppState>,
) -> impl Responder {
    let letter_id = id.into_inner();
    let payload = req.into_inner().normalized();
    if let Err(message) = validate_payload(&payload) {
        debug!("Letter update blocked by validation");
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    // Full replace, last writer wins: the store holds no version counter.
    match data.store.update_letter(letter_id, &payload).await {
        Ok(letter) => {
            info!("Letter {} replaced via store", letter.id);
            HttpResponse::Ok().json(letter)
        }
        Err(e) => {
            error!("Store rejected letter update for {}: {}", letter_id, e);
            e.error_response("Letter not found")
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letter Service",
    delete,
    path = "/letters/{id}",
    responses(
        (status = 204, description = "Letter deleted successfully"),
        (status = 404, description = "Letter not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the letter to delete")
    )
)]
pub async fn delete_letter(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let letter_id = id.into_inner();
    match data.store.delete_letter(letter_id).await {
        Ok(()) => {
            info!("Letter {} deleted", letter_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("Failed to delete letter {}: {}", letter_id, e);
            e.error_response("Letter not found")
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letter Service",
    get,
    path = "/letters/{id}/pdf",
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 404, description = "Letter not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the letter to download")
    )
)]
pub async fn download_letter_pdf(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let letter_id = id.into_inner();

    // The letter record is fetched first for the official number that names
    // the downloaded file.
    let letter = match data.store.get_letter(letter_id).await {
        Ok(letter) => letter,
        Err(e) => return e.error_response("Letter not found"),
    };

    match data.store.download_pdf(letter_id).await {
        Ok(bytes) => {
            info!(
                "Serving PDF for letter {} ({} bytes)",
                letter_id,
                bytes.len()
            );
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", letter.pdf_filename()),
                ))
                .body(bytes)
        }
        Err(e) => {
            error!("Failed to download PDF for letter {}: {}", letter_id, e);
            e.error_response("Letter not found")
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Company Service",
    get,
    path = "/companies",
    responses(
        (status = 200, description = "List of all companies", body = [Company]),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn get_all_companies(data: web::Data<AppState>) -> impl Responder {
    match data.store.list_companies().await {
        Ok(companies) => HttpResponse::Ok().json(companies),
        Err(e) => {
            error!("Failed to fetch companies from store: {}", e);
            e.error_response("Companies not found")
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Company Service",
    get,
    path = "/companies/{id}",
    responses(
        (status = 200, description = "Company found", body = Company),
        (status = 404, description = "Company not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the company to retrieve")
    )
)]
pub async fn get_company_by_id(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    match data.store.get_company(id.into_inner()).await {
        Ok(company) => HttpResponse::Ok().json(company),
        Err(e) => e.error_response("Company not found"),
    }
}
