// Estado de interfaz que en el navegador vivía en el DOM: fila en edición,
// detalles abiertos, pares del formulario y el aviso a mostrar.
use std::collections::HashMap;

pub mod edit;
pub mod expand;
pub mod form;

pub use edit::EditState;
pub use expand::ExpandedRows;
pub use form::{PairSelection, RelationshipForm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Pantalla dueña de un aviso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Students,
    Relationships,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub edit: EditState,
    pub expanded: ExpandedRows,
    pub form: RelationshipForm,
    notices: HashMap<Screen, Notice>,
}

impl Session {
    pub fn success(&mut self, screen: Screen, message: impl Into<String>) {
        self.notices.insert(screen, Notice::Success(message.into()));
    }

    pub fn error(&mut self, screen: Screen, message: impl Into<String>) {
        self.notices.insert(screen, Notice::Error(message.into()));
    }

    /// El aviso se muestra una sola vez y solo en su pantalla.
    pub fn take_notice(&mut self, screen: Screen) -> Option<Notice> {
        self.notices.remove(&screen)
    }
}
