//! Join de alunos con séries y turmas.
//!
//! Las funciones son puras: reciben las colecciones (o los índices ya
//! construidos) y devuelven registros listos para mostrar, sin tocar la vista.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Class, Degree, Lookup, Student};

/// Mapa id -> nombre usado para resolver claves foráneas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    names: HashMap<u32, String>,
}

impl NameIndex {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, &'a str)>,
    {
        let names = pairs
            .into_iter()
            .map(|(id, name)| (id, name.to_string()))
            .collect();
        NameIndex { names }
    }

    pub fn of_degrees(degrees: &[Degree]) -> Self {
        Self::from_pairs(degrees.iter().map(|d| (d.id, d.name.as_str())))
    }

    pub fn of_classes(classes: &[Class]) -> Self {
        Self::from_pairs(classes.iter().map(|c| (c.id, c.name.as_str())))
    }

    pub fn get(&self, id: u32) -> Lookup {
        match self.names.get(&id) {
            Some(name) => Lookup::Found(name.clone()),
            None => Lookup::Missing,
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.names.contains_key(&id)
    }
}

/// Aluno anotado con los nombres de su série y turma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    #[serde(flatten)]
    pub student: Student,
    pub degree_name: Lookup,
    pub class_name: Lookup,
}

/// Resuelve `degreeName`/`className` de cada aluno, conservando el orden.
pub fn denormalize_students(
    students: &[Student],
    degrees: &[Degree],
    classes: &[Class],
) -> Vec<StudentView> {
    let degree_names = NameIndex::of_degrees(degrees);
    let class_names = NameIndex::of_classes(classes);
    denormalize_with(students, &degree_names, &class_names)
}

/// Igual que `denormalize_students` pero con índices ya construidos.
pub fn denormalize_with(
    students: &[Student],
    degree_names: &NameIndex,
    class_names: &NameIndex,
) -> Vec<StudentView> {
    students
        .iter()
        .map(|student| StudentView {
            student: student.clone(),
            degree_name: degree_names.get(student.degree_id),
            class_name: class_names.get(student.class_id),
        })
        .collect()
}
