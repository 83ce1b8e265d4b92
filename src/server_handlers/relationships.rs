use actix_web::{error, web, HttpResponse};
use tracing::{debug, warn};

use super::{bad_request, html, lock, see_other, Fields};
use crate::algorithm::SelectionFilter;
use crate::models::RelationshipId;
use crate::server::{Loaded, SharedState};
use crate::session::Screen;
use crate::views::html::render_relationships_page;
use crate::views::{RelationshipsPage, LOAD_FAILED_MESSAGE};

const SCREEN: &str = "/relacionamentos";
pub const RELATIONSHIP_ADDED_MESSAGE: &str = "Novo relacionamento adicionado com sucesso!";

pub async fn relationships_page_handler(
    state: SharedState,
    query: web::Query<Fields>,
) -> actix_web::Result<HttpResponse> {
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    let app = &mut *guard;
    let notice = app.session.take_notice(Screen::Relationships);
    let page = match &app.data {
        Loaded::Ready(repo) => RelationshipsPage::build(
            repo,
            &app.session.expanded,
            &app.session.form,
            filter,
            notice,
        ),
        Loaded::Failed(_) => RelationshipsPage::failed(LOAD_FAILED_MESSAGE),
    };
    let body = render_relationships_page(&page).map_err(error::ErrorInternalServerError)?;
    Ok(html(body))
}

/// "Ver Alunos": abre o cierra el detalle de una fila.
pub async fn toggle_students_handler(
    state: SharedState,
    path: web::Path<RelationshipId>,
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
        if repo.relationship(id).is_some() {
            let open = app.session.expanded.toggle(id);
            debug!(relationship_id = id, open, "detalhe de alunos alternado");
        } else {
            app.session.error(Screen::Relationships, format!("Relacionamento {} não encontrado.", id));
        }
    }
    Ok(see_other(SCREEN, &filter))
}

pub async fn add_pair_handler(
    state: SharedState,
    query: web::Query<Fields>,
    form: web::Form<Fields>,
) -> actix_web::Result<HttpResponse> {
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    let session = &mut guard.session;
    match session.form.absorb(&form) {
        Ok(()) => session.form.add_pair(),
        Err(e) => session.error(Screen::Relationships, e.to_string()),
    }
    Ok(see_other(SCREEN, &filter))
}

pub async fn remove_pair_handler(
    state: SharedState,
    path: web::Path<usize>,
    query: web::Query<Fields>,
    form: web::Form<Fields>,
) -> actix_web::Result<HttpResponse> {
    let index = path.into_inner();
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    let session = &mut guard.session;
    let outcome = session.form.absorb(&form).and_then(|()| session.form.remove_pair(index));
    if let Err(e) = outcome {
        session.error(Screen::Relationships, e.to_string());
    }
    Ok(see_other(SCREEN, &filter))
}

/// Envío de "Adicionar Relacionamento". Si falla, el formulario conserva lo
/// seleccionado; si sale bien vuelve a un único par vacío.
pub async fn submit_relationship_handler(
    state: SharedState,
    query: web::Query<Fields>,
    form: web::Form<Fields>,
) -> actix_web::Result<HttpResponse> {
    let filter = match SelectionFilter::from_fields(&query) {
        Ok(f) => f,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut guard = lock(&state)?;
    let app = &mut *guard;
    let Loaded::Ready(repo) = &mut app.data else {
        return Ok(see_other(SCREEN, &filter));
    };
    let session = &mut app.session;

    let outcome = session
        .form
        .absorb(&form)
        .and_then(|()| session.form.build())
        .map_err(|e| e.to_string())
        .and_then(|new| repo.add_relationship(new).map(|rel| rel.id).map_err(|e| e.to_string()));

    match outcome {
        Ok(_) => {
            session.form.reset();
            session.success(Screen::Relationships, RELATIONSHIP_ADDED_MESSAGE);
        }
        Err(msg) => {
            warn!(error = %msg, "relacionamento rejeitado");
            session.error(Screen::Relationships, msg);
        }
    }
    Ok(see_other(SCREEN, &filter))
}
