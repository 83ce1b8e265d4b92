use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Degree, DegreeId, Student};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeCount {
    pub degree_id: DegreeId,
    pub degree_name: String,
    pub count: usize,
}

/// Cuenta alunos por série, en el mismo orden que la colección de séries.
/// Alunos con una série desconocida no se cuentan.
pub fn students_per_degree(students: &[Student], degrees: &[Degree]) -> Vec<DegreeCount> {
    let mut counts: HashMap<DegreeId, usize> = HashMap::new();
    for s in students {
        *counts.entry(s.degree_id).or_insert(0) += 1;
    }

    degrees
        .iter()
        .map(|d| DegreeCount {
            degree_id: d.id,
            degree_name: d.name.clone(),
            count: counts.get(&d.id).copied().unwrap_or(0),
        })
        .collect()
}
