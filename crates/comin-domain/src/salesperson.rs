// salesperson.rs
use crate::{CellValue, DomainError, Row, CODE_COLUMN};
use serde::{Deserialize, Serialize};

pub const PRIMARY_COLUMN: &str = "PRINCIPAL";
pub const ALTERNATE_COLUMN: &str = "ALTERNATIVO";
pub const REGIONAL_COLUMN: &str = "REGIONAL";
pub const CONTROLLER_COLUMN: &str = "CONTROLADORIA";

/// Registro del directorio de vendedores: código y hasta cuatro correos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalespersonRecord {
    pub code: String,
    pub primary: Option<String>,
    pub alternate: Option<String>,
    pub regional: Option<String>,
    pub controller: Option<String>,
}

impl SalespersonRecord {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into().trim().to_string(),
               primary: None,
               alternate: None,
               regional: None,
               controller: None }
    }

    /// Lee el registro desde una fila de `consulta_comin`.
    ///
    /// # Errores
    /// `DomainError::Validation` si la fila no tiene `COD`.
    pub fn from_row(row: &Row) -> Result<Self, DomainError> {
        let code = row.get(CODE_COLUMN)
                      .and_then(CellValue::trimmed_text)
                      .ok_or_else(|| DomainError::Validation(format!("registro sin {CODE_COLUMN}")))?;
        let email = |column: &str| row.get(column).and_then(CellValue::trimmed_text);
        Ok(Self { code,
                  primary: email(PRIMARY_COLUMN),
                  alternate: email(ALTERNATE_COLUMN),
                  regional: email(REGIONAL_COLUMN),
                  controller: email(CONTROLLER_COLUMN) })
    }

    pub fn with_primary(mut self, email: impl Into<String>) -> Self {
        self.primary = Some(email.into());
        self
    }

    pub fn with_alternate(mut self, email: impl Into<String>) -> Self {
        self.alternate = Some(email.into());
        self
    }

    pub fn with_regional(mut self, email: impl Into<String>) -> Self {
        self.regional = Some(email.into());
        self
    }

    pub fn with_controller(mut self, email: impl Into<String>) -> Self {
        self.controller = Some(email.into());
        self
    }

    /// Lista de destinatarios: recortados, en minúsculas, sin vacíos ni
    /// duplicados, en el orden principal → alternativo → regional →
    /// controladoria.
    pub fn recipients(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(4);
        for email in [&self.primary, &self.alternate, &self.regional, &self.controller].into_iter().flatten() {
            let normalized = email.trim().to_lowercase();
            if !normalized.is_empty() && !out.contains(&normalized) {
                out.push(normalized);
            }
        }
        out
    }
}
