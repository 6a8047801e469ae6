use async_trait::async_trait;
use std::path::PathBuf;

use crate::errors::DispatchError;

/// Mensaje a enviar: un correo con la planilla adjunta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachment: PathBuf,
    /// Nombre con el que se adjunta el archivo.
    pub attachment_name: String,
}

/// Transporte de correo. Un único intento por mensaje; los reintentos no son
/// responsabilidad del transporte.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DispatchError>;
}
