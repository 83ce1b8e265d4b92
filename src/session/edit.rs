use crate::models::StudentId;

/// Estado de la tabla de alunos. Solo una fila puede estar en edición.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Display,
    Editing(StudentId),
}

impl EditState {
    /// Pone la fila en edición. Si otra fila estaba en edición vuelve a
    /// `Display` (sus cambios sin guardar se pierden) y se devuelve su id.
    pub fn begin(&mut self, id: StudentId) -> Option<StudentId> {
        let previous = match *self {
            EditState::Editing(prev) if prev != id => Some(prev),
            _ => None,
        };
        *self = EditState::Editing(id);
        previous
    }

    pub fn is_editing(&self, id: StudentId) -> bool {
        *self == EditState::Editing(id)
    }

    pub fn editing(&self) -> Option<StudentId> {
        match self {
            EditState::Editing(id) => Some(*id),
            EditState::Display => None,
        }
    }

    /// Sale de la edición de `id` (guardar o cancelar). Devuelve false si esa
    /// fila no era la que estaba en edición.
    pub fn finish(&mut self, id: StudentId) -> bool {
        if self.is_editing(id) {
            *self = EditState::Display;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_another_row_replaces_the_first() {
        let mut state = EditState::default();
        assert_eq!(state.begin(1), None);
        assert!(state.is_editing(1));
        assert_eq!(state.begin(2), Some(1));
        assert!(!state.is_editing(1));
        assert_eq!(state.editing(), Some(2));
        assert_eq!(state.begin(2), None);
    }

    #[test]
    fn finish_only_for_the_editing_row() {
        let mut state = EditState::default();
        state.begin(3);
        assert!(!state.finish(4));
        assert_eq!(state, EditState::Editing(3));
        assert!(state.finish(3));
        assert_eq!(state, EditState::Display);
    }
}
