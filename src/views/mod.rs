//! View-models de las dos pantallas.
//!
//! Se construyen a partir del repositorio y del estado de sesión; el módulo
//! `html` solo los recorre para producir el markup.

pub mod html;

use crate::algorithm::{RelationshipView, SelectionFilter, StudentView};
use crate::models::{Class, Degree, Matter, StudentId, Teacher};
use crate::repository::Repository;
use crate::session::{EditState, ExpandedRows, Notice, RelationshipForm};

pub const LOAD_FAILED_MESSAGE: &str = "Falha ao carregar dados. Verifique o log.";
pub const NO_STUDENTS_MESSAGE: &str = "Nenhum aluno encontrado para os filtros selecionados.";
pub const NO_RELATIONSHIPS_MESSAGE: &str = "Nenhum registro encontrado.";
pub const NO_DETAIL_STUDENTS_MESSAGE: &str = "Nenhum aluno encontrado para esta(s) série(s).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: u32,
    pub label: String,
    pub selected: bool,
}

fn options<'a, I>(items: I, selected: Option<u32>) -> Vec<SelectOption>
where
    I: IntoIterator<Item = (u32, &'a str)>,
{
    items
        .into_iter()
        .map(|(value, label)| SelectOption {
            value,
            label: label.to_string(),
            selected: selected == Some(value),
        })
        .collect()
}

fn degree_options(degrees: &[Degree], selected: Option<u32>) -> Vec<SelectOption> {
    options(degrees.iter().map(|d| (d.id, d.name.as_str())), selected)
}

fn class_options(classes: &[Class], selected: Option<u32>) -> Vec<SelectOption> {
    options(classes.iter().map(|c| (c.id, c.name.as_str())), selected)
}

fn teacher_options(teachers: &[Teacher], selected: Option<u32>) -> Vec<SelectOption> {
    options(teachers.iter().map(|t| (t.id, t.name.as_str())), selected)
}

fn matter_options(matters: &[Matter], selected: Option<u32>) -> Vec<SelectOption> {
    options(matters.iter().map(|m| (m.id, m.name.as_str())), selected)
}

/// Selects de filtro "Série" y "Turma".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    pub action: &'static str,
    pub degrees: Vec<SelectOption>,
    pub classes: Vec<SelectOption>,
}

impl FilterBar {
    fn build(action: &'static str, repo: &Repository, filter: &SelectionFilter) -> Self {
        FilterBar {
            action,
            degrees: degree_options(repo.degrees(), filter.degree),
            classes: class_options(repo.classes(), filter.class),
        }
    }
}

/// Cuerpo de una tabla: error de carga, sin resultados o filas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody<R> {
    Failed(String),
    Empty(&'static str),
    Rows(Vec<R>),
}

impl<R> TableBody<R> {
    fn from_rows(rows: Vec<R>, empty: &'static str) -> Self {
        if rows.is_empty() { TableBody::Empty(empty) } else { TableBody::Rows(rows) }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Pantalla de alunos

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentRow {
    Display(StudentView),
    Editing {
        view: StudentView,
        degrees: Vec<SelectOption>,
        classes: Vec<SelectOption>,
    },
}

impl StudentRow {
    pub fn id(&self) -> StudentId {
        match self {
            StudentRow::Display(view) | StudentRow::Editing { view, .. } => view.student.id,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, StudentRow::Editing { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentsPage {
    pub filter: SelectionFilter,
    pub filter_bar: Option<FilterBar>,
    pub body: TableBody<StudentRow>,
    pub notice: Option<Notice>,
    /// Revisión de datos para invalidar la imagen del gráfico; `None` si no hay datos.
    pub chart_revision: Option<u64>,
    pub total_students: usize,
}

impl StudentsPage {
    pub fn build(
        repo: &Repository,
        edit: &EditState,
        filter: SelectionFilter,
        notice: Option<Notice>,
    ) -> Self {
        let rows: Vec<StudentRow> = repo
            .filtered_student_views(&filter)
            .into_iter()
            .map(|view| {
                if edit.is_editing(view.student.id) {
                    StudentRow::Editing {
                        degrees: degree_options(repo.degrees(), Some(view.student.degree_id)),
                        classes: class_options(repo.classes(), Some(view.student.class_id)),
                        view,
                    }
                } else {
                    StudentRow::Display(view)
                }
            })
            .collect();

        StudentsPage {
            filter,
            filter_bar: Some(FilterBar::build("/alunos", repo, &filter)),
            body: TableBody::from_rows(rows, NO_STUDENTS_MESSAGE),
            notice,
            chart_revision: Some(repo.revision()),
            total_students: repo.students().len(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        StudentsPage {
            filter: SelectionFilter::default(),
            filter_bar: None,
            body: TableBody::Failed(message.into()),
            notice: None,
            chart_revision: None,
            total_students: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Pantalla de relacionamentos

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentsDetail {
    Names(Vec<String>),
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRow {
    pub view: RelationshipView,
    pub detail: Option<StudentsDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairView {
    pub index: usize,
    pub degrees: Vec<SelectOption>,
    pub classes: Vec<SelectOption>,
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub teachers: Vec<SelectOption>,
    pub matters: Vec<SelectOption>,
    pub pairs: Vec<PairView>,
}

impl FormView {
    fn build(repo: &Repository, form: &RelationshipForm) -> Self {
        FormView {
            teachers: teacher_options(repo.teachers(), form.teacher),
            matters: matter_options(repo.matters(), form.matter),
            pairs: form
                .pairs()
                .iter()
                .enumerate()
                .map(|(index, pair)| PairView {
                    index,
                    degrees: degree_options(repo.degrees(), pair.degree),
                    classes: class_options(repo.classes(), pair.class),
                    removable: index > 0,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipsPage {
    pub filter: SelectionFilter,
    pub filter_bar: Option<FilterBar>,
    pub body: TableBody<RelationshipRow>,
    pub form: Option<FormView>,
    pub notice: Option<Notice>,
}

impl RelationshipsPage {
    pub fn build(
        repo: &Repository,
        expanded: &ExpandedRows,
        form: &RelationshipForm,
        filter: SelectionFilter,
        notice: Option<Notice>,
    ) -> Self {
        let rows: Vec<RelationshipRow> = repo
            .relationship_views(&filter)
            .into_iter()
            .map(|view| {
                let detail = if expanded.is_expanded(view.id) {
                    repo.students_for_relationship(view.id).map(|students| {
                        if students.is_empty() {
                            StudentsDetail::Empty(NO_DETAIL_STUDENTS_MESSAGE)
                        } else {
                            StudentsDetail::Names(students.iter().map(|s| s.name.clone()).collect())
                        }
                    })
                } else {
                    None
                };
                RelationshipRow { view, detail }
            })
            .collect();

        RelationshipsPage {
            filter,
            filter_bar: Some(FilterBar::build("/relacionamentos", repo, &filter)),
            body: TableBody::from_rows(rows, NO_RELATIONSHIPS_MESSAGE),
            form: Some(FormView::build(repo, form)),
            notice,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        RelationshipsPage {
            filter: SelectionFilter::default(),
            filter_bar: None,
            body: TableBody::Failed(message.into()),
            form: None,
            notice: None,
        }
    }
}
