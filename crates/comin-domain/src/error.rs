use thiserror::Error;

/// Errores del dominio de comisiones
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("El grupo del código {0} no tiene líneas")]
    EmptyGroup(String),
    #[error("El código {0} no tiene destinatarios registrados")]
    NoRecipients(String),
}
