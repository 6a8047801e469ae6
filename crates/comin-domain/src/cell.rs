// cell.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Fila genérica de una planilla: nombre de columna -> valor, en el orden en
/// que las columnas aparecen en la cabecera. No se asume un esquema fijo.
pub type Row = IndexMap<String, CellValue>;

/// Valor de una celda leída de una planilla.
///
/// Las celdas vacías se representan explícitamente (`Empty`) para que todas
/// las filas de una misma hoja compartan el mismo conjunto de columnas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Valor numérico si la celda es un número.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Negativo sólo aplica a celdas numéricas; un texto como "-5" no cuenta.
    pub fn is_negative(&self) -> bool {
        self.as_number().is_some_and(|n| n < 0.0)
    }

    /// Representación textual. Los números enteros se muestran sin parte
    /// decimal (`101.0` -> `"101"`), que es como aparecen los códigos en la
    /// planilla.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Cow::Owned(format!("{}", *n as i64)),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// Texto recortado o `None` si la celda está vacía.
    pub fn trimmed_text(&self) -> Option<String> {
        let text = self.as_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_decimals() {
        assert_eq!(CellValue::Number(101.0).as_text(), "101");
        assert_eq!(CellValue::Number(12.5).as_text(), "12.5");
    }

    #[test]
    fn blank_text_counts_as_empty() {
        assert!(CellValue::Text("   ".into()).is_empty());
        assert!(CellValue::Empty.is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
        assert_eq!(CellValue::Text("  7 ".into()).trimmed_text().as_deref(), Some("7"));
    }

    #[test]
    fn only_numbers_are_negative() {
        assert!(CellValue::Number(-0.01).is_negative());
        assert!(!CellValue::Text("-3".into()).is_negative());
        assert!(!CellValue::Empty.is_negative());
    }
}
