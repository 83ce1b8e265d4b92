// Estructuras de datos principales

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub type StudentId = u32;
pub type DegreeId = u32;
pub type ClassId = u32;
pub type TeacherId = u32;
pub type MatterId = u32;
pub type RelationshipId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Registro acadêmico. Los fixtures lo traen como número o como texto numérico.
    #[serde(deserialize_with = "deserialize_ra")]
    pub ra: u32,
    pub degree_id: DegreeId,
    pub class_id: ClassId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    pub id: DegreeId,
    pub name: String,
}

/// Turma. El `id` es estable: se asigna al cargar (posición en el fixture si
/// el documento no trae uno) y nunca se vuelve a derivar del índice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matter {
    pub id: MatterId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRef {
    pub class_id: ClassId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeClasses {
    pub degree_id: DegreeId,
    pub classes: Vec<ClassRef>,
}

/// Asignación de un profesor + materia a un conjunto de pares (série, turma).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: RelationshipId,
    pub teacher_id: TeacherId,
    pub matter_id: MatterId,
    pub degrees: Vec<DegreeClasses>,
}

impl Relationship {
    pub fn degree_ids(&self) -> Vec<DegreeId> {
        self.degrees.iter().map(|d| d.degree_id).collect()
    }
}

/// Relacionamento aún sin id, tal como sale del formulario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelationship {
    pub teacher_id: TeacherId,
    pub matter_id: MatterId,
    pub degrees: Vec<DegreeClasses>,
}

/// Cambios aplicables a un aluno desde la edición en línea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentEdit {
    pub ra: u32,
    pub name: String,
    pub degree_id: DegreeId,
    pub class_id: ClassId,
}

/// Resultado de resolver un id contra un mapa de nombres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    Missing,
}

impl Lookup {
    pub const PLACEHOLDER: &'static str = "N/A";

    pub fn name(&self) -> Option<&str> {
        match self {
            Lookup::Found(name) => Some(name),
            Lookup::Missing => None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(Self::PLACEHOLDER)
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Lookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Lookup::Found(name) => serializer.serialize_str(name),
            Lookup::Missing => serializer.serialize_none(),
        }
    }
}

fn deserialize_ra<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRa {
        Number(u32),
        Text(String),
    }

    match RawRa::deserialize(deserializer)? {
        RawRa::Number(n) => Ok(n),
        RawRa::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| serde::de::Error::custom(format!("invalid ra: {:?}", s))),
    }
}
