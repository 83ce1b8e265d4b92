//! Generación de alunos sintéticos para probar el render con más datos.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::RepositoryError;
use crate::models::{Class, Degree, Student, StudentId};

/// Alunos añadidos por cada click en "Gerar Alunos".
pub const GENERATED_BATCH: usize = 300;
/// El RA sintético queda en `[0, RA_UPPER_BOUND)`.
pub const RA_UPPER_BOUND: u32 = 1_000_000;

/// Crea `count` alunos con ids `next_id..next_id + count`, série y turma
/// elegidas uniformemente entre las existentes.
pub fn synthesize_students<R>(
    rng: &mut R,
    next_id: StudentId,
    count: usize,
    degrees: &[Degree],
    classes: &[Class],
) -> Result<Vec<Student>, RepositoryError>
where
    R: Rng + ?Sized,
{
    if degrees.is_empty() {
        return Err(RepositoryError::NoDegrees);
    }
    if classes.is_empty() {
        return Err(RepositoryError::NoClasses);
    }

    if count == 0 {
        return Ok(Vec::new());
    }
    let last_id = u32::try_from(count - 1)
        .ok()
        .and_then(|span| next_id.checked_add(span))
        .ok_or(RepositoryError::IdSpaceExhausted)?;

    let mut out = Vec::with_capacity(count);
    for id in next_id..=last_id {
        // choose() solo devuelve None con slices vacíos, ya descartados arriba
        let (Some(degree), Some(class)) = (degrees.choose(rng), classes.choose(rng)) else {
            break;
        };
        out.push(Student {
            id,
            name: format!("Aluno {}", id),
            ra: rng.gen_range(0..RA_UPPER_BOUND),
            degree_id: degree.id,
            class_id: class.id,
        });
    }
    Ok(out)
}
