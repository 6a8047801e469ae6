// line_item.rs
use crate::{CellValue, DomainError, Row};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Columna que identifica al vendedor en ambas planillas.
pub const CODE_COLUMN: &str = "COD";
/// Columna descriptiva usada para ordenar las líneas de cada vendedor.
pub const DESCRIPTION_COLUMN: &str = "CL. DESC";

/// Una línea de comisión de la planilla subida. Inmutable una vez leída.
///
/// Las columnas se conservan tal cual (orden incluido) porque el conjunto de
/// columnas sólo se conoce en tiempo de ejecución; el código del vendedor se
/// extrae y normaliza aparte para usarlo como clave de partición.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    code: String,
    fields: Row,
}

impl LineItem {
    /// Construye la línea a partir de una fila leída.
    ///
    /// # Errores
    /// `DomainError::Validation` si la fila no trae un `COD` no vacío.
    pub fn from_row(fields: Row) -> Result<Self, DomainError> {
        let code = fields.get(CODE_COLUMN)
                         .and_then(CellValue::trimmed_text)
                         .ok_or_else(|| DomainError::Validation(format!("línea sin columna {CODE_COLUMN}")))?;
        Ok(Self { code, fields })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn fields(&self) -> &Row {
        &self.fields
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    /// Nombres de columna en el orden de la fila.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Texto de la columna descriptiva; cadena vacía si falta.
    pub fn description(&self) -> Cow<'_, str> {
        self.fields.get(DESCRIPTION_COLUMN)
                   .map(CellValue::as_text)
                   .unwrap_or(Cow::Borrowed(""))
    }
}
