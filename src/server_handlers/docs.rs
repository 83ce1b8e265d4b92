use actix_web::http::header;
use actix_web::HttpResponse;
use serde_json::json;

use super::lock;
use crate::server::{Loaded, SharedState};

pub async fn root_handler() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/alunos"))
        .finish()
}

pub async fn health_handler(state: SharedState) -> actix_web::Result<HttpResponse> {
    let app = lock(&state)?;
    let (status, data) = match &app.data {
        Loaded::Ready(repo) => (
            "ok",
            json!({
                "students": repo.students().len(),
                "degrees": repo.degrees().len(),
                "classes": repo.classes().len(),
                "teachers": repo.teachers().len(),
                "matters": repo.matters().len(),
                "relationships": repo.relationships().len(),
                "revision": repo.revision(),
            }),
        ),
        Loaded::Failed(reason) => ("failed", json!({"error": reason})),
    };
    Ok(HttpResponse::Ok().json(json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "data": data,
    })))
}
