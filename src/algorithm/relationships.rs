//! Join de relacionamentos (profesor + materia + séries/turmas) y utilidades
//! del formulario de alta.

use std::collections::HashSet;

use serde::Serialize;

use crate::algorithm::denormalize::NameIndex;
use crate::error::RepositoryError;
use crate::models::{
    ClassId, ClassRef, DegreeClasses, DegreeId, Lookup, Relationship, RelationshipId, Student,
};

/// Índices de nombres para resolver un relacionamento.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipIndexes<'a> {
    pub teachers: &'a NameIndex,
    pub matters: &'a NameIndex,
    pub degrees: &'a NameIndex,
    pub classes: &'a NameIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeClassesView {
    pub degree_id: DegreeId,
    pub degree_name: Lookup,
    pub class_names: Vec<Lookup>,
}

impl DegreeClassesView {
    /// `"{série}: {turma}, {turma}"`
    pub fn summary(&self) -> String {
        let classes: Vec<&str> = self.class_names.iter().map(|c| c.display_name()).collect();
        format!("{}: {}", self.degree_name, classes.join(", "))
    }
}

/// Fila de la tabla de relacionamentos con todos los nombres resueltos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipView {
    pub id: RelationshipId,
    pub teacher_name: Lookup,
    pub matter_name: Lookup,
    pub degrees: Vec<DegreeClassesView>,
}

impl RelationshipView {
    pub fn degree_ids(&self) -> Vec<DegreeId> {
        self.degrees.iter().map(|d| d.degree_id).collect()
    }

    /// Nombres de las séries separados por coma.
    pub fn degree_names(&self) -> String {
        let names: Vec<&str> = self.degrees.iter().map(|d| d.degree_name.display_name()).collect();
        names.join(", ")
    }

    /// Una línea por série con sus turmas.
    pub fn class_lines(&self) -> Vec<String> {
        self.degrees.iter().map(DegreeClassesView::summary).collect()
    }
}

pub fn describe_relationship(rel: &Relationship, idx: &RelationshipIndexes<'_>) -> RelationshipView {
    RelationshipView {
        id: rel.id,
        teacher_name: idx.teachers.get(rel.teacher_id),
        matter_name: idx.matters.get(rel.matter_id),
        degrees: rel
            .degrees
            .iter()
            .map(|entry| DegreeClassesView {
                degree_id: entry.degree_id,
                degree_name: idx.degrees.get(entry.degree_id),
                class_names: entry.classes.iter().map(|c| idx.classes.get(c.class_id)).collect(),
            })
            .collect(),
    }
}

/// Alunos cuya série pertenece al conjunto de séries del relacionamento.
/// No se restringe por turma.
pub fn students_for_relationship<'a>(rel: &Relationship, students: &'a [Student]) -> Vec<&'a Student> {
    let ids: HashSet<DegreeId> = rel.degree_ids().into_iter().collect();
    students.iter().filter(|s| ids.contains(&s.degree_id)).collect()
}

/// Agrupa pares (série, turma) por série. Las séries quedan ordenadas por id;
/// las turmas de cada una, en orden de aparición y sin repetidos.
pub fn group_pairs(pairs: &[(DegreeId, ClassId)]) -> Vec<DegreeClasses> {
    let mut grouped: Vec<DegreeClasses> = Vec::new();
    for &(degree_id, class_id) in pairs {
        let pos = match grouped.iter().position(|g| g.degree_id == degree_id) {
            Some(pos) => pos,
            None => {
                grouped.push(DegreeClasses { degree_id, classes: Vec::new() });
                grouped.len() - 1
            }
        };
        let entry = &mut grouped[pos];
        if !entry.classes.iter().any(|c| c.class_id == class_id) {
            entry.classes.push(ClassRef { class_id });
        }
    }
    grouped.sort_by_key(|g| g.degree_id);
    grouped
}

/// Próximo id: máximo actual + 1 (1 si no hay ninguno).
pub fn next_relationship_id(relationships: &[Relationship]) -> Result<RelationshipId, RepositoryError> {
    match relationships.iter().map(|r| r.id).max() {
        Some(max) => max.checked_add(1).ok_or(RepositoryError::IdSpaceExhausted),
        None => Ok(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Vec<Student> {
        [(1, "Ana", 1), (2, "Bia", 2), (3, "Caio", 1), (4, "Duda", 3)]
            .iter()
            .map(|(id, name, degree)| Student {
                id: *id,
                name: name.to_string(),
                ra: 0,
                degree_id: *degree,
                class_id: 0,
            })
            .collect()
    }

    #[test]
    fn describes_with_names_and_placeholders() {
        let teachers = NameIndex::from_pairs([(1, "Prof. Silva")]);
        let matters = NameIndex::from_pairs([(1, "Matemática")]);
        let degrees = NameIndex::from_pairs([(1, "1st Grade"), (2, "2nd Grade")]);
        let classes = NameIndex::from_pairs([(0, "A"), (1, "B")]);
        let idx = RelationshipIndexes {
            teachers: &teachers,
            matters: &matters,
            degrees: &degrees,
            classes: &classes,
        };
        let rel = Relationship {
            id: 1,
            teacher_id: 1,
            matter_id: 5,
            degrees: group_pairs(&[(1, 0), (1, 1), (2, 7)]),
        };

        let view = describe_relationship(&rel, &idx);
        assert_eq!(view.teacher_name, Lookup::Found("Prof. Silva".into()));
        assert_eq!(view.matter_name, Lookup::Missing);
        assert_eq!(view.degree_names(), "1st Grade, 2nd Grade");
        assert_eq!(view.class_lines(), vec!["1st Grade: A, B", "2nd Grade: N/A"]);
        assert_eq!(view.degree_ids(), vec![1, 2]);
    }

    #[test]
    fn students_by_degree_membership() {
        let all = students();
        let rel = Relationship {
            id: 1,
            teacher_id: 1,
            matter_id: 1,
            degrees: group_pairs(&[(1, 0), (3, 2)]),
        };
        let names: Vec<&str> = students_for_relationship(&rel, &all)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ana", "Caio", "Duda"]);
    }

    #[test]
    fn grouping_dedups_and_sorts_degrees() {
        let grouped = group_pairs(&[(2, 1), (1, 0), (2, 1), (2, 0)]);
        assert_eq!(
            grouped,
            vec![
                DegreeClasses { degree_id: 1, classes: vec![ClassRef { class_id: 0 }] },
                DegreeClasses {
                    degree_id: 2,
                    classes: vec![ClassRef { class_id: 1 }, ClassRef { class_id: 0 }],
                },
            ]
        );
    }

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(next_relationship_id(&[]), Ok(1));
        let rels: Vec<Relationship> = [3, 9, 4]
            .iter()
            .map(|id| Relationship { id: *id, teacher_id: 1, matter_id: 1, degrees: Vec::new() })
            .collect();
        assert_eq!(next_relationship_id(&rels), Ok(10));
    }

    #[test]
    fn next_id_after_u32_max_is_an_error() {
        let rels = vec![Relationship { id: u32::MAX, teacher_id: 1, matter_id: 1, degrees: Vec::new() }];
        assert_eq!(next_relationship_id(&rels), Err(RepositoryError::IdSpaceExhausted));
    }
}
