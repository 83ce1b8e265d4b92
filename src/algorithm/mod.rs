// Transformaciones puras sobre las colecciones: join, filtros, agregados y
// generación. Nada aquí conoce HTML ni el servidor.
pub mod aggregate;
pub mod denormalize;
pub mod filters;
pub mod generate;
pub mod relationships;

pub use aggregate::{DegreeCount, students_per_degree};
pub use denormalize::{NameIndex, StudentView, denormalize_students, denormalize_with};
pub use filters::{SelectionFilter, filter_relationships, filter_students};
pub use generate::{GENERATED_BATCH, synthesize_students};
pub use relationships::{
    RelationshipIndexes, RelationshipView, describe_relationship, group_pairs,
    next_relationship_id, students_for_relationship,
};
