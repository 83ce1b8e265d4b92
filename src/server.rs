use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::chart::{ChartCanvas, ChartOptions};
use crate::config::Config;
use crate::fixtures::load_fixtures;
use crate::repository::Repository;
use crate::server_handlers::*;
use crate::session::Session;

/// Resultado de la carga de fixtures. En `Failed` no hay datos parciales.
#[derive(Debug)]
pub enum Loaded {
    Ready(Repository),
    Failed(String),
}

/// Todo el estado del proceso. Vive detrás de un único `Mutex`; cada handler
/// lo toma, trabaja de forma sincrónica y lo suelta sin hacer `await`.
#[derive(Debug)]
pub struct AppState {
    pub data: Loaded,
    pub session: Session,
    pub chart: ChartCanvas,
    pub rng: StdRng,
}

pub type SharedState = web::Data<Mutex<AppState>>;

impl AppState {
    pub fn ready(repo: Repository, chart: ChartOptions, rng: StdRng) -> Self {
        AppState {
            data: Loaded::Ready(repo),
            session: Session::default(),
            chart: ChartCanvas::new(chart),
            rng,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        AppState {
            data: Loaded::Failed(reason.into()),
            session: Session::default(),
            chart: ChartCanvas::default(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn repository(&self) -> Option<&Repository> {
        match &self.data {
            Loaded::Ready(repo) => Some(repo),
            Loaded::Failed(_) => None,
        }
    }

    pub fn into_shared(self) -> SharedState {
        web::Data::new(Mutex::new(self))
    }
}

/// Carga los fixtures del directorio configurado. Un fallo se registra una vez
/// y deja el servidor en estado `Failed`.
pub async fn build_state(config: &Config) -> AppState {
    match load_fixtures(&config.data_dir).await {
        Ok(fixtures) => {
            let repo = Repository::from_fixtures(fixtures);
            info!(
                data_dir = %config.data_dir.display(),
                students = repo.students().len(),
                degrees = repo.degrees().len(),
                classes = repo.classes().len(),
                relationships = repo.relationships().len(),
                "fixtures cargados"
            );
            AppState::ready(repo, config.chart, StdRng::from_entropy())
        }
        Err(e) => {
            error!(data_dir = %config.data_dir.display(), error = format!("{:#}", e), "falha ao carregar fixtures");
            AppState::failed(format!("{:#}", e))
        }
    }
}

/// Rutas de las dos pantallas, sus acciones y la API JSON.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root_handler))
        .route("/health", web::get().to(health_handler))
        .route("/alunos", web::get().to(students_page_handler))
        .route("/alunos/gerar", web::post().to(generate_students_handler))
        .route("/alunos/grafico.svg", web::get().to(chart_svg_handler))
        .route("/alunos/{id}/editar", web::post().to(begin_edit_handler))
        .route("/alunos/{id}/salvar", web::post().to(save_edit_handler))
        .route("/alunos/{id}/cancelar", web::post().to(cancel_edit_handler))
        .route("/relacionamentos", web::get().to(relationships_page_handler))
        .route("/relacionamentos", web::post().to(submit_relationship_handler))
        .route("/relacionamentos/pares", web::post().to(add_pair_handler))
        .route("/relacionamentos/pares/{index}/remover", web::post().to(remove_pair_handler))
        .route("/relacionamentos/{id}/alunos", web::post().to(toggle_students_handler))
        .service(
            web::scope("/api")
                .wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
                .route("/students", web::get().to(api_students_handler))
                .route("/relationships", web::get().to(api_relationships_handler))
                .route("/chart", web::get().to(api_chart_handler)),
        );
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let state = build_state(&config).await.into_shared();
    info!(bind = %config.bind, "iniciando servidor");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
