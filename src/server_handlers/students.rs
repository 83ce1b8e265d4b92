use actix_web::{error, web, HttpResponse};
use serde_json::json;
use tracing::{debug, warn};

use super::{bad_request, html, lock, see_other, Fields};
use crate::algorithm::filters::parse_optional_id;
use crate::algorithm::{SelectionFilter, GENERATED_BATCH};
use crate::error::FormError;
use crate::models::{StudentEdit, StudentId};
use crate::server::{Loaded, SharedState};
use crate::session::Screen;
use crate::views::html::render_students_page;
use crate::views::{StudentsPage, LOAD_FAILED_MESSAGE};

const SCREEN: &str = "/alunos";

/// Lee los campos del formulario de edición en línea.
fn parse_student_edit(fields: &Fields) -> Result<StudentEdit, FormError> {
    let ra = parse_optional_id(fields, "ra")?.ok_or(FormError::MissingField("RA"))?;
    let degree_id = parse_optional_id(fields, "degree")?.ok_or(FormError::MissingField("Série"))?;
    let class_id = parse_optional_id(fields, "class")?.ok_or(FormError::MissingField("Turma"))?;
    let name = fields.get("name").cloned().unwrap_or_default();
    Ok(StudentEdit { ra, name, degree_id, class_id })
}

pub async fn students_page_handler(
    state: SharedState,
    query: web::Query<Fields>,
) -> actix_web::Result<HttpResponse> {
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    let app = &mut *guard;
    let notice = app.session.take_notice(Screen::Students);
    let page = match &app.data {
        Loaded::Ready(repo) => StudentsPage::build(repo, &app.session.edit, filter, notice),
        Loaded::Failed(_) => StudentsPage::failed(LOAD_FAILED_MESSAGE),
    };
    let body = render_students_page(&page).map_err(error::ErrorInternalServerError)?;
    Ok(html(body))
}

pub async fn begin_edit_handler(
    state: SharedState,
    path: web::Path<StudentId>,
    query: web::Query<Fields>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    let app = &mut *guard;
    if let Loaded::Ready(repo) = &app.data {
        if repo.student(id).is_some() {
            if let Some(previous) = app.session.edit.begin(id) {
                debug!(student_id = id, discarded = previous, "edição anterior descartada");
            }
        } else {
            app.session.error(Screen::Students, format!("Aluno {} não encontrado.", id));
        }
    }
    Ok(see_other(SCREEN, &filter))
}

pub async fn save_edit_handler(
    state: SharedState,
    path: web::Path<StudentId>,
    query: web::Query<Fields>,
    form: web::Form<Fields>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    let app = &mut *guard;
    let Loaded::Ready(repo) = &mut app.data else {
        return Ok(see_other(SCREEN, &filter));
    };

    if !app.session.edit.is_editing(id) {
        app.session.error(Screen::Students, format!("O aluno {} não está em edição.", id));
        return Ok(see_other(SCREEN, &filter));
    }

    // En caso de error la fila sigue en edición.
    let outcome = parse_student_edit(&form)
        .map_err(|e| e.to_string())
        .and_then(|edit| repo.update_student(id, edit).map(|s| s.name.clone()).map_err(|e| e.to_string()));
    match outcome {
        Ok(name) => {
            app.session.edit.finish(id);
            app.session.success(Screen::Students, format!("Aluno {} atualizado.", name));
        }
        Err(msg) => {
            warn!(student_id = id, error = %msg, "edição rejeitada");
            app.session.error(Screen::Students, msg);
        }
    }
    Ok(see_other(SCREEN, &filter))
}

pub async fn cancel_edit_handler(
    state: SharedState,
    path: web::Path<StudentId>,
    query: web::Query<Fields>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    guard.session.edit.finish(id);
    Ok(see_other(SCREEN, &filter))
}

pub async fn generate_students_handler(
    state: SharedState,
    query: web::Query<Fields>,
) -> actix_web::Result<HttpResponse> {
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    let app = &mut *guard;
    if let Loaded::Ready(repo) = &mut app.data {
        match repo.generate_students(&mut app.rng, GENERATED_BATCH) {
            Ok(added) => app.session.success(Screen::Students, format!("{} alunos gerados.", added)),
            Err(e) => app.session.error(Screen::Students, e.to_string()),
        }
    }
    Ok(see_other(SCREEN, &filter))
}

pub async fn chart_svg_handler(state: SharedState) -> actix_web::Result<HttpResponse> {
    let mut guard = lock(&state)?;
    let app = &mut *guard;
    let Loaded::Ready(repo) = &app.data else {
        return Ok(HttpResponse::ServiceUnavailable().json(json!({"error": LOAD_FAILED_MESSAGE})));
    };
    let counts = repo.degree_counts();
    match app.chart.ensure(repo.revision(), &counts) {
        Ok(chart) => Ok(HttpResponse::Ok()
            .content_type("image/svg+xml")
            .body(chart.svg.clone())),
        Err(e) => Ok(HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))),
    }
}
