//! Lectura de los fixtures JSON del directorio de datos.
//!
//! Los seis documentos se leen en paralelo y se esperan juntos: cualquier
//! error (lectura o parseo) aborta la carga completa.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{Class, ClassId, Degree, Matter, Relationship, Student, Teacher};

pub const STUDENTS_FILE: &str = "students.json";
pub const DEGREES_FILE: &str = "degrees.json";
pub const CLASSES_FILE: &str = "classes.json";
pub const TEACHERS_FILE: &str = "teachers.json";
pub const MATTERS_FILE: &str = "matters.json";
pub const RELATIONSHIPS_FILE: &str = "relationships.json";

/// Colecciones tal como vienen de disco.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    pub students: Vec<Student>,
    pub degrees: Vec<Degree>,
    pub classes: Vec<Class>,
    pub teachers: Vec<Teacher>,
    pub matters: Vec<Matter>,
    pub relationships: Vec<Relationship>,
}

/// `classes.json` es un objeto con el arreglo dentro de `classes`.
#[derive(Debug, Deserialize)]
pub struct ClassesDocument {
    pub classes: Vec<ClassRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ClassRecord {
    #[serde(default)]
    pub id: Option<ClassId>,
    pub name: String,
}

impl ClassesDocument {
    /// Asigna a cada turma su id estable: el explícito si existe, si no su
    /// posición en el documento.
    pub fn into_classes(self) -> anyhow::Result<Vec<Class>> {
        let mut seen: HashSet<ClassId> = HashSet::new();
        let mut out = Vec::with_capacity(self.classes.len());
        for (position, record) in self.classes.into_iter().enumerate() {
            let id = match record.id {
                Some(id) => id,
                None => ClassId::try_from(position).context("too many classes")?,
            };
            if !seen.insert(id) {
                bail!("duplicate class id {} in {}", id, CLASSES_FILE);
            }
            out.push(Class { id, name: record.name });
        }
        Ok(out)
    }
}

pub async fn load_fixtures(dir: &Path) -> anyhow::Result<Fixtures> {
    let (students, degrees, classes, teachers, matters, relationships) = tokio::try_join!(
        read_json::<Vec<Student>>(dir, STUDENTS_FILE),
        read_json::<Vec<Degree>>(dir, DEGREES_FILE),
        read_json::<ClassesDocument>(dir, CLASSES_FILE),
        read_json::<Vec<Teacher>>(dir, TEACHERS_FILE),
        read_json::<Vec<Matter>>(dir, MATTERS_FILE),
        read_json::<Vec<Relationship>>(dir, RELATIONSHIPS_FILE),
    )?;

    Ok(Fixtures {
        students,
        degrees,
        classes: classes.into_classes()?,
        teachers,
        matters,
        relationships,
    })
}

async fn read_json<T: DeserializeOwned>(dir: &Path, name: &str) -> anyhow::Result<T> {
    let path = dir.join(name);
    let text = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
