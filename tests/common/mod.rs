#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use secretaria::chart::ChartOptions;
use secretaria::fixtures::Fixtures;
use secretaria::models::{
    Class, ClassRef, Degree, DegreeClasses, Matter, Relationship, Student, Teacher,
};
use secretaria::repository::Repository;
use secretaria::server::{AppState, SharedState};

/// Una série, una turma y un relacionamento; Caio tiene una série inexistente.
pub fn scenario_fixtures() -> Fixtures {
    Fixtures {
        students: vec![
            Student { id: 1, name: "Ana".into(), ra: 101, degree_id: 1, class_id: 0 },
            Student { id: 2, name: "Bia".into(), ra: 102, degree_id: 1, class_id: 0 },
            Student { id: 3, name: "Caio".into(), ra: 103, degree_id: 9, class_id: 0 },
        ],
        degrees: vec![
            Degree { id: 1, name: "1st Grade".into() },
            Degree { id: 2, name: "2nd Grade".into() },
        ],
        classes: vec![Class { id: 0, name: "A".into() }],
        teachers: vec![
            Teacher { id: 1, name: "Prof. Marina".into() },
            Teacher { id: 2, name: "Prof. Carlos".into() },
        ],
        matters: vec![
            Matter { id: 1, name: "Matemática".into() },
            Matter { id: 3, name: "História".into() },
        ],
        relationships: vec![Relationship {
            id: 1,
            teacher_id: 1,
            matter_id: 1,
            degrees: vec![DegreeClasses { degree_id: 1, classes: vec![ClassRef { class_id: 0 }] }],
        }],
    }
}

pub fn shared_state(fixtures: Fixtures) -> SharedState {
    AppState::ready(
        Repository::from_fixtures(fixtures),
        ChartOptions { width: 400, height: 300 },
        StdRng::seed_from_u64(42),
    )
    .into_shared()
}

pub fn body_text(bytes: actix_web::web::Bytes) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}
