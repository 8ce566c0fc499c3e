//! Preview endpoints.
//!
//! A preview runs two sequential fetches: the letter, then its company.
//! Only the letter fetch can abort the preview; company problems degrade to
//! the fallback letterhead inside the assembler.

use actix_web::web::{self, Path};
use actix_web::{HttpResponse, Responder};
use log::error;
use uuid::Uuid;

use crate::preview::assembler::assemble;
use crate::preview::renderer::{render, LetterDocument};
use crate::state::AppState;
use crate::ErrorResponse;

#[utoipa::path(
    context_path = "/api",
    tag = "Preview Service",
    get,
    path = "/letters/{id}/preview",
    responses(
        (status = 200, description = "Rendered document structure", body = LetterDocument),
        (status = 404, description = "Letter not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the letter to preview")
    )
)]
pub async fn preview_letter(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let letter_id = id.into_inner();
    let letter = match data.store.get_letter(letter_id).await {
        Ok(letter) => letter,
        Err(e) => {
            error!("Failed to load letter {} for preview: {}", letter_id, e);
            return e.error_response("Letter not found");
        }
    };

    let view_model = assemble(letter, &data.companies).await;
    HttpResponse::Ok().json(render(&view_model))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Preview Service",
    get,
    path = "/letters/{id}/preview/html",
    responses(
        (status = 200, description = "Rendered document as HTML", content_type = "text/html"),
        (status = 404, description = "Letter not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the letter to preview")
    )
)]
pub async fn preview_letter_html(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    let letter_id = id.into_inner();
    let letter = match data.store.get_letter(letter_id).await {
        Ok(letter) => letter,
        Err(e) => {
            error!("Failed to load letter {} for preview: {}", letter_id, e);
            return e.error_response("Letter not found");
        }
    };

    let view_model = assemble(letter, &data.companies).await;
    let document = render(&view_model);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(document.to_html())
}
