//! Vista JSON de solo lectura de las mismas tablas que renderizan las pantallas.

use actix_web::{web, HttpResponse};
use serde_json::json;

use super::{bad_request, lock, Fields};
use crate::algorithm::SelectionFilter;
use crate::repository::Repository;
use crate::server::{AppState, SharedState};
use crate::views::LOAD_FAILED_MESSAGE;

fn unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(json!({"error": LOAD_FAILED_MESSAGE}))
}

fn with_repository<F>(app: &AppState, f: F) -> HttpResponse
where
    F: FnOnce(&Repository) -> HttpResponse,
{
    match app.repository() {
        Some(repo) => f(repo),
        None => unavailable(),
    }
}

pub async fn api_students_handler(
    state: SharedState,
    query: web::Query<Fields>,
) -> actix_web::Result<HttpResponse> {
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let app = lock(&state)?;
    Ok(with_repository(&app, |repo| {
        let students = repo.filtered_student_views(&filter);
        HttpResponse::Ok().json(json!({
            "filter": filter,
            "count": students.len(),
            "students": students,
        }))
    }))
}

pub async fn api_relationships_handler(
    state: SharedState,
    query: web::Query<Fields>,
) -> actix_web::Result<HttpResponse> {
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let app = lock(&state)?;
    Ok(with_repository(&app, |repo| {
        let rows = repo.relationship_views(&filter);
        HttpResponse::Ok().json(json!({
            "filter": filter,
            "count": rows.len(),
            "relationships": rows,
        }))
    }))
}

pub async fn api_chart_handler(state: SharedState) -> actix_web::Result<HttpResponse> {
    let app = lock(&state)?;
    Ok(with_repository(&app, |repo| {
        HttpResponse::Ok().json(json!({
            "revision": repo.revision(),
            "degrees": repo.degree_counts(),
        }))
    }))
}
