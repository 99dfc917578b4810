use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Template Data ({0}) is empty!")]
    IncompleteTemplate(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(anyhow::Error),
}

impl NotificationError {
    /// Coarse severity class: 400 for input/lookup errors, 500 for
    /// internal-consistency and collaborator failures.
    pub fn severity(&self) -> u16 {
        match self {
            NotificationError::Validation(_) | NotificationError::NotFound(_) => 400,
            NotificationError::IncompleteTemplate(_) | NotificationError::Dispatch(_) => 500,
        }
    }
}

impl From<anyhow::Error> for NotificationError {
    fn from(source: anyhow::Error) -> Self {
        NotificationError::Dispatch(source)
    }
}
