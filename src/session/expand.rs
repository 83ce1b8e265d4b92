use std::collections::BTreeSet;

use crate::models::RelationshipId;

/// Filas de relacionamento con el detalle "Ver Alunos" abierto, por id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedRows {
    open: BTreeSet<RelationshipId>,
}

impl ExpandedRows {
    /// Abre o cierra el detalle; devuelve true si quedó abierto.
    pub fn toggle(&mut self, id: RelationshipId) -> bool {
        if self.open.remove(&id) {
            false
        } else {
            self.open.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: RelationshipId) -> bool {
        self.open.contains(&id)
    }
}
