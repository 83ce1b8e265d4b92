//! Repositorio en memoria: dueño de las colecciones cargadas de los fixtures
//! y de las altas hechas durante la sesión. No escribe a disco.

use rand::Rng;
use tracing::{debug, info};

use crate::algorithm::{
    self, DegreeCount, NameIndex, RelationshipIndexes, RelationshipView, SelectionFilter,
    StudentView,
};
use crate::error::RepositoryError;
use crate::fixtures::Fixtures;
use crate::models::{
    Class, Degree, Matter, NewRelationship, Relationship, RelationshipId, Student, StudentEdit,
    StudentId, Teacher,
};

/// Índices id -> nombre. Séries, turmas, professores y matérias no cambian
/// después de la carga, así que se construyen una sola vez.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub degrees: NameIndex,
    pub classes: NameIndex,
    pub teachers: NameIndex,
    pub matters: NameIndex,
}

impl Lookups {
    fn build(fixtures: &Fixtures) -> Self {
        Lookups {
            degrees: NameIndex::of_degrees(&fixtures.degrees),
            classes: NameIndex::of_classes(&fixtures.classes),
            teachers: NameIndex::from_pairs(fixtures.teachers.iter().map(|t| (t.id, t.name.as_str()))),
            matters: NameIndex::from_pairs(fixtures.matters.iter().map(|m| (m.id, m.name.as_str()))),
        }
    }

    pub fn relationship_indexes(&self) -> RelationshipIndexes<'_> {
        RelationshipIndexes {
            teachers: &self.teachers,
            matters: &self.matters,
            degrees: &self.degrees,
            classes: &self.classes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Repository {
    students: Vec<Student>,
    degrees: Vec<Degree>,
    classes: Vec<Class>,
    teachers: Vec<Teacher>,
    matters: Vec<Matter>,
    relationships: Vec<Relationship>,
    lookups: Lookups,
    /// Se incrementa con cada mutación; el gráfico lo usa para saber si está viejo.
    revision: u64,
}

impl Repository {
    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        let lookups = Lookups::build(&fixtures);
        let Fixtures { students, degrees, classes, teachers, matters, relationships } = fixtures;
        Repository {
            students,
            degrees,
            classes,
            teachers,
            matters,
            relationships,
            lookups,
            revision: 0,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn degrees(&self) -> &[Degree] {
        &self.degrees
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn matters(&self) -> &[Matter] {
        &self.matters
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    pub fn max_student_id(&self) -> Option<StudentId> {
        self.students.iter().map(|s| s.id).max()
    }

    // --- consultas derivadas ---

    pub fn student_views(&self) -> Vec<StudentView> {
        algorithm::denormalize_with(&self.students, &self.lookups.degrees, &self.lookups.classes)
    }

    pub fn filtered_student_views(&self, filter: &SelectionFilter) -> Vec<StudentView> {
        algorithm::filter_students(&self.student_views(), filter)
    }

    pub fn relationship_views(&self, filter: &SelectionFilter) -> Vec<RelationshipView> {
        let idx = self.lookups.relationship_indexes();
        algorithm::filter_relationships(&self.relationships, filter)
            .into_iter()
            .map(|rel| algorithm::describe_relationship(rel, &idx))
            .collect()
    }

    pub fn students_for_relationship(&self, id: RelationshipId) -> Option<Vec<&Student>> {
        self.relationship(id)
            .map(|rel| algorithm::students_for_relationship(rel, &self.students))
    }

    pub fn degree_counts(&self) -> Vec<DegreeCount> {
        algorithm::students_per_degree(&self.students, &self.degrees)
    }

    // --- mutaciones ---

    /// Aplica la edición en línea a un único aluno.
    pub fn update_student(
        &mut self,
        id: StudentId,
        edit: StudentEdit,
    ) -> Result<&Student, RepositoryError> {
        let name = edit.name.trim();
        if name.is_empty() {
            return Err(RepositoryError::EmptyName);
        }
        if !self.lookups.degrees.contains(edit.degree_id) {
            return Err(RepositoryError::UnknownDegree(edit.degree_id));
        }
        if !self.lookups.classes.contains(edit.class_id) {
            return Err(RepositoryError::UnknownClass(edit.class_id));
        }
        let pos = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or(RepositoryError::UnknownStudent(id))?;

        let student = &mut self.students[pos];
        student.ra = edit.ra;
        student.name = name.to_string();
        student.degree_id = edit.degree_id;
        student.class_id = edit.class_id;
        self.revision += 1;
        debug!(student_id = id, revision = self.revision, "aluno atualizado");
        Ok(&self.students[pos])
    }

    /// Añade `count` alunos sintéticos y devuelve cuántos se agregaron.
    pub fn generate_students<R>(&mut self, rng: &mut R, count: usize) -> Result<usize, RepositoryError>
    where
        R: Rng + ?Sized,
    {
        let next_id = match self.max_student_id() {
            Some(max) => max.checked_add(1).ok_or(RepositoryError::IdSpaceExhausted)?,
            None => 1,
        };
        let batch = algorithm::synthesize_students(rng, next_id, count, &self.degrees, &self.classes)?;
        let added = batch.len();
        self.students.extend(batch);
        self.revision += 1;
        info!(added, total = self.students.len(), first_id = next_id, "alunos gerados");
        Ok(added)
    }

    /// Valida referencias, asigna id = máximo + 1 y agrega el relacionamento.
    pub fn add_relationship(
        &mut self,
        new: NewRelationship,
    ) -> Result<&Relationship, RepositoryError> {
        if !self.lookups.teachers.contains(new.teacher_id) {
            return Err(RepositoryError::UnknownTeacher(new.teacher_id));
        }
        if !self.lookups.matters.contains(new.matter_id) {
            return Err(RepositoryError::UnknownMatter(new.matter_id));
        }
        if new.degrees.iter().all(|d| d.classes.is_empty()) {
            return Err(RepositoryError::EmptyRelationship);
        }
        for entry in &new.degrees {
            if !self.lookups.degrees.contains(entry.degree_id) {
                return Err(RepositoryError::UnknownDegree(entry.degree_id));
            }
            if let Some(bad) = entry.classes.iter().find(|c| !self.lookups.classes.contains(c.class_id)) {
                return Err(RepositoryError::UnknownClass(bad.class_id));
            }
        }

        let id = algorithm::next_relationship_id(&self.relationships)?;
        self.relationships.push(Relationship {
            id,
            teacher_id: new.teacher_id,
            matter_id: new.matter_id,
            degrees: new.degrees,
        });
        self.revision += 1;
        info!(relationship_id = id, total = self.relationships.len(), "relacionamento adicionado");
        Ok(&self.relationships[self.relationships.len() - 1])
    }
}
