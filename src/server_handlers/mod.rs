pub mod api;
pub mod docs;
pub mod relationships;
pub mod students;

pub use api::*;
pub use docs::*;
pub use relationships::*;
pub use students::*;

use std::collections::HashMap;
use std::sync::MutexGuard;

use actix_web::http::header;
use actix_web::{error, HttpResponse};
use serde_json::json;

use crate::algorithm::SelectionFilter;
use crate::server::{AppState, SharedState};

type Fields = HashMap<String, String>;

fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, actix_web::Error> {
    state
        .lock()
        .map_err(|_| error::ErrorInternalServerError("estado de la aplicación envenenado"))
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({"error": e.to_string()}))
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(body)
}

/// 303 de vuelta a la pantalla, con el filtro actual en la query.
fn see_other(screen: &str, filter: &SelectionFilter) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("{}{}", screen, filter.query_suffix())))
        .finish()
}
