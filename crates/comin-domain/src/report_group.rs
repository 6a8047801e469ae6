// report_group.rs
use crate::{DomainError, LineItem};
use serde::{Deserialize, Serialize};

/// Agregado transitorio: las líneas ordenadas de un vendedor y sus
/// destinatarios ya resueltos.
///
/// Invariante: nunca está vacío ni sin destinatarios; el constructor lo
/// garantiza, así que quien tenga un `ReportGroup` puede generar el informe
/// sin más comprobaciones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportGroup {
    code: String,
    items: Vec<LineItem>,
    recipients: Vec<String>,
}

impl ReportGroup {
    /// # Errores
    /// - `DomainError::EmptyGroup` si `items` está vacío.
    /// - `DomainError::NoRecipients` si `recipients` está vacío.
    pub fn new(code: impl Into<String>, items: Vec<LineItem>, recipients: Vec<String>) -> Result<Self, DomainError> {
        let code = code.into();
        if items.is_empty() {
            return Err(DomainError::EmptyGroup(code));
        }
        if recipients.is_empty() {
            return Err(DomainError::NoRecipients(code));
        }
        Ok(Self { code, items, recipients })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Cabeceras derivadas de la primera línea (orden de sus columnas).
    pub fn headers(&self) -> Vec<String> {
        self.items
            .first()
            .map(|item| item.headers().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
