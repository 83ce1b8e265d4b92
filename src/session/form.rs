//! Estado del formulario "Adicionar Relacionamento".
//!
//! El formulario mantiene una lista dinámica de pares (série, turma). Siempre
//! hay al menos uno y el primero no se puede quitar. Los botones de agregar y
//! quitar envían el formulario entero, así que antes de cada acción se
//! absorben las selecciones actuales con `absorb`.

use std::collections::HashMap;

use crate::algorithm::filters::parse_optional_id;
use crate::algorithm::group_pairs;
use crate::error::FormError;
use crate::models::{ClassId, DegreeId, MatterId, NewRelationship, TeacherId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairSelection {
    pub degree: Option<DegreeId>,
    pub class: Option<ClassId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipForm {
    pub teacher: Option<TeacherId>,
    pub matter: Option<MatterId>,
    pairs: Vec<PairSelection>,
}

impl Default for RelationshipForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipForm {
    /// Formulario vacío con un único par.
    pub fn new() -> Self {
        RelationshipForm {
            teacher: None,
            matter: None,
            pairs: vec![PairSelection::default()],
        }
    }

    pub fn pairs(&self) -> &[PairSelection] {
        &self.pairs
    }

    pub fn add_pair(&mut self) {
        self.pairs.push(PairSelection::default());
    }

    pub fn remove_pair(&mut self, index: usize) -> Result<(), FormError> {
        if index == 0 {
            return Err(FormError::FirstPairRequired);
        }
        if index >= self.pairs.len() {
            return Err(FormError::UnknownPair(index));
        }
        self.pairs.remove(index);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Copia al estado los campos enviados: `teacher`, `matter`, y
    /// `degree_{i}`/`class_{i}` para cada par existente.
    pub fn absorb(&mut self, fields: &HashMap<String, String>) -> Result<(), FormError> {
        self.teacher = parse_optional_id(fields, "teacher")?;
        self.matter = parse_optional_id(fields, "matter")?;
        for (i, pair) in self.pairs.iter_mut().enumerate() {
            pair.degree = parse_optional_id(fields, &format!("degree_{}", i))?;
            pair.class = parse_optional_id(fields, &format!("class_{}", i))?;
        }
        Ok(())
    }

    /// Construye el relacionamento pedido. Cualquier selección vacía es error.
    pub fn build(&self) -> Result<NewRelationship, FormError> {
        let teacher_id = self.teacher.ok_or(FormError::MissingField("Professor"))?;
        let matter_id = self.matter.ok_or(FormError::MissingField("Matéria"))?;

        let mut selected: Vec<(DegreeId, ClassId)> = Vec::with_capacity(self.pairs.len());
        for (i, pair) in self.pairs.iter().enumerate() {
            match (pair.degree, pair.class) {
                (Some(d), Some(c)) => selected.push((d, c)),
                _ => return Err(FormError::MissingSelection { pair: i }),
            }
        }

        Ok(NewRelationship {
            teacher_id,
            matter_id,
            degrees: group_pairs(&selected),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassRef, DegreeClasses};

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn starts_with_one_pair_that_cannot_be_removed() {
        let mut form = RelationshipForm::new();
        assert_eq!(form.pairs().len(), 1);
        assert_eq!(form.remove_pair(0), Err(FormError::FirstPairRequired));
        form.add_pair();
        form.add_pair();
        assert_eq!(form.remove_pair(5), Err(FormError::UnknownPair(5)));
        assert_eq!(form.remove_pair(1), Ok(()));
        assert_eq!(form.pairs().len(), 2);
    }

    #[test]
    fn builds_grouped_relationship() {
        let mut form = RelationshipForm::new();
        form.add_pair();
        form.add_pair();
        form.absorb(&fields(&[
            ("teacher", "2"),
            ("matter", "3"),
            ("degree_0", "1"),
            ("class_0", "0"),
            ("degree_1", "1"),
            ("class_1", "0"),
            ("degree_2", "1"),
            ("class_2", "2"),
        ]))
        .unwrap();

        let new = form.build().unwrap();
        assert_eq!(new.teacher_id, 2);
        assert_eq!(new.matter_id, 3);
        assert_eq!(
            new.degrees,
            vec![DegreeClasses {
                degree_id: 1,
                classes: vec![ClassRef { class_id: 0 }, ClassRef { class_id: 2 }],
            }]
        );
    }

    #[test]
    fn empty_selection_is_caught() {
        let mut form = RelationshipForm::new();
        form.add_pair();
        form.absorb(&fields(&[
            ("teacher", "2"),
            ("matter", "3"),
            ("degree_0", "1"),
            ("class_0", "0"),
            ("degree_1", "1"),
            ("class_1", ""),
        ]))
        .unwrap();
        assert_eq!(form.build(), Err(FormError::MissingSelection { pair: 1 }));

        let mut no_teacher = RelationshipForm::new();
        no_teacher
            .absorb(&fields(&[("matter", "3"), ("degree_0", "1"), ("class_0", "0")]))
            .unwrap();
        assert_eq!(no_teacher.build(), Err(FormError::MissingField("Professor")));
    }

    #[test]
    fn reset_returns_to_single_empty_pair() {
        let mut form = RelationshipForm::new();
        form.add_pair();
        form.teacher = Some(1);
        form.reset();
        assert_eq!(form, RelationshipForm::new());
    }
}
