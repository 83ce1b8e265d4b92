//! Módulo de filtros por série y turma.
//!
//! Un criterio vacío (`None`) no filtra ese eje. Los valores llegan de
//! formularios como texto y se convierten explícitamente con `from_fields`.

use std::collections::HashMap;

use serde::Serialize;

use crate::algorithm::denormalize::StudentView;
use crate::error::FormError;
use crate::models::{ClassId, DegreeId, Relationship, Student};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionFilter {
    pub degree: Option<DegreeId>,
    pub class: Option<ClassId>,
}

impl SelectionFilter {
    pub fn new(degree: Option<DegreeId>, class: Option<ClassId>) -> Self {
        SelectionFilter { degree, class }
    }

    /// Lee `degree` y `class` de un query string ya decodificado.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, FormError> {
        Ok(SelectionFilter {
            degree: parse_optional_id(fields, "degree")?,
            class: parse_optional_id(fields, "class")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.degree.is_none() && self.class.is_none()
    }

    pub fn matches_student(&self, student: &Student) -> bool {
        let degree_match = self.degree.is_none_or(|d| student.degree_id == d);
        let class_match = self.class.is_none_or(|c| student.class_id == c);
        degree_match && class_match
    }

    /// Un relacionamento coincide si alguna de sus séries (o alguna turma de
    /// cualquiera de sus séries) es la seleccionada.
    pub fn matches_relationship(&self, rel: &Relationship) -> bool {
        let degree_match = self
            .degree
            .is_none_or(|d| rel.degrees.iter().any(|entry| entry.degree_id == d));
        let class_match = self.class.is_none_or(|c| {
            rel.degrees
                .iter()
                .any(|entry| entry.classes.iter().any(|cls| cls.class_id == c))
        });
        degree_match && class_match
    }

    /// Sufijo `?degree=..&class=..` para conservar el filtro entre pantallas.
    pub fn query_suffix(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(d) = self.degree {
            parts.push(format!("degree={}", d));
        }
        if let Some(c) = self.class {
            parts.push(format!("class={}", c));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

/// Campo ausente o vacío -> `None`; número -> `Some`; cualquier otra cosa es error.
pub fn parse_optional_id(
    fields: &HashMap<String, String>,
    field: &str,
) -> Result<Option<u32>, FormError> {
    match fields.get(field).map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<u32>().map(Some).map_err(|_| FormError::Malformed {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

pub fn filter_students(views: &[StudentView], filter: &SelectionFilter) -> Vec<StudentView> {
    if filter.is_empty() {
        return views.to_vec();
    }
    views
        .iter()
        .filter(|v| filter.matches_student(&v.student))
        .cloned()
        .collect()
}

pub fn filter_relationships<'a>(
    relationships: &'a [Relationship],
    filter: &SelectionFilter,
) -> Vec<&'a Relationship> {
    relationships
        .iter()
        .filter(|rel| filter.matches_relationship(rel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::denormalize_students;
    use crate::models::{Class, ClassRef, Degree, DegreeClasses};

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rel(id: u32, degrees: Vec<(u32, Vec<u32>)>) -> Relationship {
        Relationship {
            id,
            teacher_id: 1,
            matter_id: 1,
            degrees: degrees
                .into_iter()
                .map(|(d, cs)| DegreeClasses {
                    degree_id: d,
                    classes: cs.into_iter().map(|c| ClassRef { class_id: c }).collect(),
                })
                .collect(),
        }
    }

    fn views() -> Vec<StudentView> {
        let students: Vec<Student> = [(1, 1, 0), (2, 1, 0), (3, 2, 0), (4, 1, 1), (5, 2, 1)]
            .iter()
            .map(|&(id, degree_id, class_id)| Student {
                id,
                name: format!("Aluno {}", id),
                ra: id * 10,
                degree_id,
                class_id,
            })
            .collect();
        let degrees = vec![
            Degree { id: 1, name: "1st Grade".into() },
            Degree { id: 2, name: "2nd Grade".into() },
        ];
        let classes = vec![Class { id: 0, name: "A".into() }, Class { id: 1, name: "B".into() }];
        denormalize_students(&students, &degrees, &classes)
    }

    fn ids(views: &[StudentView]) -> Vec<u32> {
        views.iter().map(|v| v.student.id).collect()
    }

    #[test]
    fn empty_filter_keeps_every_student_in_order() {
        let all = views();
        let filtered = filter_students(&all, &SelectionFilter::default());
        assert_eq!(filtered, all);
        assert_eq!(ids(&filtered), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn degree_filter_keeps_only_that_degree() {
        let filtered = filter_students(&views(), &SelectionFilter::new(Some(1), None));
        assert_eq!(ids(&filtered), vec![1, 2, 4]);
        assert!(filtered.iter().all(|v| v.student.degree_id == 1));

        let by_class = filter_students(&views(), &SelectionFilter::new(None, Some(1)));
        assert_eq!(ids(&by_class), vec![4, 5]);
    }

    #[test]
    fn degree_and_class_filter_is_the_intersection() {
        let filtered = filter_students(&views(), &SelectionFilter::new(Some(1), Some(0)));
        assert_eq!(ids(&filtered), vec![1, 2]);

        let filtered = filter_students(&views(), &SelectionFilter::new(Some(2), Some(1)));
        assert_eq!(ids(&filtered), vec![5]);

        assert!(filter_students(&views(), &SelectionFilter::new(Some(3), Some(0))).is_empty());
    }

    #[test]
    fn matches_student_checks_both_axes() {
        let student = Student { id: 1, name: "Ana".into(), ra: 1, degree_id: 2, class_id: 1 };
        assert!(SelectionFilter::default().matches_student(&student));
        assert!(SelectionFilter::new(Some(2), Some(1)).matches_student(&student));
        assert!(!SelectionFilter::new(Some(2), Some(0)).matches_student(&student));
        assert!(!SelectionFilter::new(Some(1), None).matches_student(&student));
    }

    #[test]
    fn empty_values_mean_match_all() {
        let f = SelectionFilter::from_fields(&fields(&[("degree", ""), ("class", " ")])).unwrap();
        assert!(f.is_empty());
        assert_eq!(f.query_suffix(), "");
    }

    #[test]
    fn numeric_values_are_coerced_explicitly() {
        let f = SelectionFilter::from_fields(&fields(&[("degree", "2"), ("class", "0")])).unwrap();
        assert_eq!(f, SelectionFilter::new(Some(2), Some(0)));
        assert_eq!(f.query_suffix(), "?degree=2&class=0");
    }

    #[test]
    fn malformed_value_is_rejected() {
        let err = SelectionFilter::from_fields(&fields(&[("degree", "dois")])).unwrap_err();
        assert_eq!(
            err,
            FormError::Malformed { field: "degree".into(), value: "dois".into() }
        );
    }

    #[test]
    fn relationship_degree_and_class_any_match() {
        let rels = vec![
            rel(1, vec![(1, vec![0]), (2, vec![1])]),
            rel(2, vec![(3, vec![1])]),
            rel(3, vec![(2, vec![2])]),
        ];

        let by_degree = filter_relationships(&rels, &SelectionFilter::new(Some(2), None));
        assert_eq!(by_degree.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);

        let by_class = filter_relationships(&rels, &SelectionFilter::new(None, Some(1)));
        assert_eq!(by_class.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);

        // la turma puede venir de otra série del mismo relacionamento
        let both = filter_relationships(&rels, &SelectionFilter::new(Some(1), Some(1)));
        assert_eq!(both.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }
}
