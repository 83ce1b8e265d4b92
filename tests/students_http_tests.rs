mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use serde_json::Value;

use common::{body_text, scenario_fixtures, shared_state};
use secretaria::server::{configure, AppState};
use secretaria::views::LOAD_FAILED_MESSAGE;

#[actix_web::test]
async fn test_students_table_joins_names() {
    let state = shared_state(scenario_fixtures());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos").to_request()).await);
    assert!(page.contains("<tr data-student-id='1'><td>101</td><td>Ana</td><td>1st Grade</td><td>A</td>"));
    // série inexistente
    assert!(page.contains("<td>Caio</td><td>N/A</td><td>A</td>"));
    assert!(page.contains("src='/alunos/grafico.svg?v=0'"));

    let page = body_text(
        test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos?degree=2").to_request()).await,
    );
    assert!(page.contains("Nenhum aluno encontrado para os filtros selecionados."));
}

#[actix_web::test]
async fn test_inline_edit_save_and_cancel() {
    let state = shared_state(scenario_fixtures());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::post().uri("/alunos/1/editar?degree=1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/alunos?degree=1");

    let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos").to_request()).await);
    assert_eq!(page.matches("class='editing'").count(), 1);
    assert!(page.contains("<tr data-student-id='1' class='editing'>"));

    let req = test::TestRequest::post()
        .uri("/alunos/1/salvar")
        .set_form([("ra", "999"), ("name", "Ana Maria"), ("degree", "2"), ("class", "0")])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);

    let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos").to_request()).await);
    assert!(!page.contains("class='editing'"));
    assert!(page.contains("<td>999</td><td>Ana Maria</td><td>2nd Grade</td><td>A</td>"));
    assert!(page.contains("Aluno Ana Maria atualizado."));

    // cancelar deja los valores como estaban
    test::call_service(&app, test::TestRequest::post().uri("/alunos/2/editar").to_request()).await;
    test::call_service(&app, test::TestRequest::post().uri("/alunos/2/cancelar").to_request()).await;
    let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos").to_request()).await);
    assert!(!page.contains("class='editing'"));
    assert!(page.contains("<td>102</td><td>Bia</td><td>1st Grade</td>"));
}

#[actix_web::test]
async fn test_only_one_row_is_edited_at_a_time() {
    let state = shared_state(scenario_fixtures());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    test::call_service(&app, test::TestRequest::post().uri("/alunos/1/editar").to_request()).await;
    test::call_service(&app, test::TestRequest::post().uri("/alunos/2/editar").to_request()).await;
    let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos").to_request()).await);
    assert_eq!(page.matches("class='editing'").count(), 1);
    assert!(page.contains("<tr data-student-id='2' class='editing'>"));

    // la fila 1 ya no está en edición: guardar se rechaza
    let req = test::TestRequest::post()
        .uri("/alunos/1/salvar")
        .set_form([("ra", "1"), ("name", "Outra"), ("degree", "1"), ("class", "0")])
        .to_request();
    test::call_service(&app, req).await;
    let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos").to_request()).await);
    assert!(page.contains("não está em edição"));
    assert!(page.contains("<td>Ana</td>"));

    // nombre vacío: la fila sigue en edición
    let req = test::TestRequest::post()
        .uri("/alunos/2/salvar")
        .set_form([("ra", "5"), ("name", "  "), ("degree", "1"), ("class", "0")])
        .to_request();
    test::call_service(&app, req).await;
    let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos").to_request()).await);
    assert!(page.contains("O nome do aluno é obrigatório."));
    assert!(page.contains("<tr data-student-id='2' class='editing'>"));
}

#[actix_web::test]
async fn test_generate_adds_300_and_refreshes_chart() {
    let state = shared_state(scenario_fixtures());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::post().uri("/alunos/gerar").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let json: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/students").to_request()).await;
    assert_eq!(json["count"], 303);
    let students = json["students"].as_array().unwrap();
    assert_eq!(students[3]["id"], 4);
    assert_eq!(students[302]["id"], 303);
    assert_eq!(students[302]["name"], "Aluno 303");

    let chart: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/chart").to_request()).await;
    let total: u64 = chart["degrees"].as_array().unwrap().iter().map(|d| d["count"].as_u64().unwrap()).sum();
    // Caio no cuenta: su série no existe
    assert_eq!(total, 302);
    assert_eq!(chart["revision"], 1);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/alunos/grafico.svg").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/svg+xml");
    let svg = body_text(test::read_body(resp).await);
    assert!(svg.contains("<svg"));

    let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri("/alunos").to_request()).await);
    assert!(page.contains("300 alunos gerados."));
    assert!(page.contains("src='/alunos/grafico.svg?v=1'"));
}

#[actix_web::test]
async fn test_failed_load_shows_error_row() {
    let state = AppState::failed("failed to read data/students.json").into_shared();
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    for uri in ["/alunos", "/relacionamentos"] {
        let page = body_text(test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await);
        assert!(page.contains(&format!("<tr><td colspan='5'>{}</td></tr>", LOAD_FAILED_MESSAGE)));
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/students").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let health: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(health["status"], "failed");
}

#[actix_web::test]
async fn test_root_redirects_and_health_reports_counts() {
    let state = shared_state(scenario_fixtures());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/alunos");

    let health: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["data"]["students"], 3);
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_generate_near_id_limit_reports_error() {
    let mut fixtures = scenario_fixtures();
    fixtures.students[2].id = u32::MAX - 10;
    let state = shared_state(fixtures);
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::post().uri("/alunos/gerar").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/alunos").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_text(test::read_body(resp).await);
    assert!(page.contains("Não há mais identificadores disponíveis."));

    let json: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/students").to_request()).await;
    assert_eq!(json["count"], 3);
}
