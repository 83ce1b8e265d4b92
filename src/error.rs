use std::fmt;

use crate::models::{ClassId, DegreeId, MatterId, StudentId, TeacherId};

/// Errores de mutación del repositorio en memoria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    UnknownStudent(StudentId),
    UnknownDegree(DegreeId),
    UnknownClass(ClassId),
    UnknownTeacher(TeacherId),
    UnknownMatter(MatterId),
    EmptyName,
    EmptyRelationship,
    NoDegrees,
    NoClasses,
    /// No quedan ids libres por encima del máximo actual.
    IdSpaceExhausted,
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::UnknownStudent(id) => write!(f, "Aluno {} não encontrado.", id),
            RepositoryError::UnknownDegree(id) => write!(f, "Série {} não encontrada.", id),
            RepositoryError::UnknownClass(id) => write!(f, "Turma {} não encontrada.", id),
            RepositoryError::UnknownTeacher(id) => write!(f, "Professor {} não encontrado.", id),
            RepositoryError::UnknownMatter(id) => write!(f, "Matéria {} não encontrada.", id),
            RepositoryError::EmptyName => f.write_str("O nome do aluno é obrigatório."),
            RepositoryError::EmptyRelationship => {
                f.write_str("O relacionamento precisa de ao menos uma série e turma.")
            }
            RepositoryError::NoDegrees => f.write_str("Não há séries cadastradas."),
            RepositoryError::NoClasses => f.write_str("Não há turmas cadastradas."),
            RepositoryError::IdSpaceExhausted => {
                f.write_str("Não há mais identificadores disponíveis.")
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Errores al interpretar valores de formularios y query strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Campo con texto que no es un número válido.
    Malformed { field: String, value: String },
    MissingField(&'static str),
    /// Par série/turma (índice base 0) con alguna selección vacía.
    MissingSelection { pair: usize },
    FirstPairRequired,
    UnknownPair(usize),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Malformed { field, value } => {
                write!(f, "Valor inválido para {}: {:?}.", field, value)
            }
            FormError::MissingField(field) => write!(f, "O campo {} é obrigatório.", field),
            FormError::MissingSelection { pair } => write!(
                f,
                "Por favor, preencha todos os campos de Série e Turma (par {}).",
                pair + 1
            ),
            FormError::FirstPairRequired => f.write_str("O primeiro par não pode ser removido."),
            FormError::UnknownPair(index) => write!(f, "Par {} inexistente.", index + 1),
        }
    }
}

impl std::error::Error for FormError {}

/// Fallo al dibujar el gráfico con plotters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartError(pub String);

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart rendering failed: {}", self.0)
    }
}

impl std::error::Error for ChartError {}
