//! Layout neutral de un informe de comisión.
//!
//! Un `ReportLayout` describe por completo el contenido y el estilo de la
//! planilla de un vendedor (celdas, anchos, subtotal) sin depender de la
//! librería que la escribe. Es puro: mismo grupo => mismo layout, y por eso
//! su fingerprint sirve para comprobar que dos renders son idénticos.

use comin_domain::{CellValue, ReportGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::*;
use crate::hashing::hash_value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub bold: bool,
    pub fill: Option<u32>,
    pub font_color: Option<u32>,
    pub centered: bool,
    pub border: bool,
    pub number_format: Option<String>,
}

impl CellStyle {
    fn header() -> Self {
        Self { bold: true,
               fill: Some(HEADER_FILL),
               font_color: Some(HEADER_FONT),
               centered: true,
               border: true,
               number_format: None }
    }

    fn body(row_index: usize) -> Self {
        let fill = if row_index % 2 == 0 { ROW_FILL_EVEN } else { ROW_FILL_ODD };
        Self { fill: Some(fill),
               border: true,
               ..Self::default() }
    }

    fn subtotal() -> Self {
        Self { bold: true,
               fill: Some(SUBTOTAL_FILL),
               font_color: None,
               centered: true,
               border: true,
               number_format: Some(CURRENCY_FORMAT.to_string()) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Fórmula sin el `=` inicial.
    Formula(String),
}

impl From<&CellValue> for LayoutValue {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Empty => LayoutValue::Empty,
            CellValue::Bool(b) => LayoutValue::Bool(*b),
            CellValue::Number(n) => LayoutValue::Number(*n),
            CellValue::Text(s) => LayoutValue::Text(s.clone()),
        }
    }
}

/// Celda posicionada (fila y columna en base 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub row: u32,
    pub col: u16,
    pub value: LayoutValue,
    pub style: CellStyle,
}

/// Subtotal sensible a filtros sobre la columna monetaria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtotal {
    /// Cabecera de la columna agregada.
    pub column: String,
    pub column_letter: String,
    pub formula: String,
    pub label_col: u16,
    pub value_col: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLayout {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub cells: Vec<LayoutCell>,
    pub column_widths: BTreeMap<u16, f64>,
    pub subtotal: Option<Subtotal>,
}

pub fn is_monetary(header: &str) -> bool {
    let upper = header.to_uppercase();
    MONETARY_COLUMNS.iter().any(|m| *m == upper)
}

/// Letra de columna estilo planilla para un índice en base 0 (0 -> A, 26 -> AA).
pub fn column_letter(index: u16) -> String {
    let mut n = u32::from(index) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Columna sobre la que se calcula el subtotal: `COMISSÃO` si existe, si no
/// la última columna monetaria.
pub fn subtotal_column(headers: &[String]) -> Option<usize> {
    headers.iter()
           .position(|h| h.to_uppercase() == SUBTOTAL_PREFERRED_COLUMN)
           .or_else(|| headers.iter().rposition(|h| is_monetary(h)))
}

impl ReportLayout {
    /// Construye el layout de un grupo.
    pub fn for_group(group: &ReportGroup) -> Self {
        let headers = group.headers();
        let mut cells = Vec::with_capacity((group.items().len() + 1) * headers.len() + 2);
        let mut column_widths = BTreeMap::new();

        for (col, header) in headers.iter().enumerate() {
            let col = col as u16;
            cells.push(LayoutCell { row: 0,
                                    col,
                                    value: LayoutValue::Text(header.clone()),
                                    style: CellStyle::header() });
            let width = MIN_COLUMN_WIDTH.max(header.chars().count() as f64 + HEADER_WIDTH_PADDING);
            column_widths.insert(col, width);
        }

        for (row_index, item) in group.items().iter().enumerate() {
            let row = row_index as u32 + 1;
            for (col, header) in headers.iter().enumerate() {
                let value = item.get(header).cloned().unwrap_or_default();
                let mut style = CellStyle::body(row_index);
                if is_monetary(header) {
                    style.number_format = Some(CURRENCY_FORMAT.to_string());
                    style.bold = value.is_negative();
                }
                cells.push(LayoutCell { row,
                                        col: col as u16,
                                        value: LayoutValue::from(&value),
                                        style });
            }
        }

        for width in column_widths.values_mut() {
            *width += COLUMN_WIDTH_INCREMENT;
        }

        let subtotal = subtotal_column(&headers).map(|target| {
            let spacer_col = headers.len() as u16;
            let label_col = spacer_col + 1;
            let value_col = spacer_col + 2;
            let letter = column_letter(target as u16);
            let last_row = group.items().len() + 1;
            let formula = format!("SUBTOTAL(109,{letter}2:{letter}{last_row})");

            column_widths.insert(spacer_col, SPACER_COLUMN_WIDTH);
            column_widths.insert(label_col, TOTAL_LABEL_WIDTH);
            column_widths.insert(value_col, TOTAL_VALUE_WIDTH);
            cells.push(LayoutCell { row: 0,
                                    col: label_col,
                                    value: LayoutValue::Text(TOTAL_LABEL.to_string()),
                                    style: CellStyle::header() });
            cells.push(LayoutCell { row: 0,
                                    col: value_col,
                                    value: LayoutValue::Formula(formula.clone()),
                                    style: CellStyle::subtotal() });
            Subtotal { column: headers[target].clone(),
                       column_letter: letter,
                       formula,
                       label_col,
                       value_col }
        });

        Self { sheet_name: format!("Vendedor_{}", group.code()),
               headers,
               cells,
               column_widths,
               subtotal }
    }

    /// SHA-256 del JSON canónico del layout.
    pub fn fingerprint(&self) -> String {
        let value = serde_json::to_value(self).unwrap_or_default();
        hash_value(&value)
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&LayoutCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }
}
