//! Lectura de planillas con calamine.

use calamine::{open_workbook_auto, Data, Reader};
use comin_core::{DataSourceError, SheetSource};
use comin_domain::{CellValue, Row};
use std::path::Path;

/// `SheetSource` sobre archivos reales. La primera fila es la cabecera; las
/// columnas con cabecera vacía y las filas totalmente vacías se descartan.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalamineSheetSource;

impl CalamineSheetSource {
    pub fn new() -> Self {
        Self
    }
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        // serial de fecha de Excel, igual que lo entrega la planilla
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

impl SheetSource for CalamineSheetSource {
    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<Vec<Row>, DataSourceError> {
        if !path.is_file() {
            return Err(DataSourceError::FileNotFound(path.to_path_buf()));
        }
        let unreadable = |reason: String| DataSourceError::Unreadable { path: path.to_path_buf(),
                                                                       reason };
        let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(DataSourceError::MissingSheet { path: path.to_path_buf(),
                                                       sheet: sheet.to_string() });
        }
        let range = workbook.worksheet_range(sheet).map_err(|e| unreadable(e.to_string()))?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Vec::new());
        };
        let headers: Vec<Option<String>> = header_row.iter()
                                                     .map(|c| Some(c.to_string().trim().to_string()).filter(|h| !h.is_empty()))
                                                     .collect();

        let mut out = Vec::new();
        for cells in rows {
            let mut row = Row::new();
            for (idx, header) in headers.iter().enumerate() {
                let Some(header) = header else { continue };
                let value = cells.get(idx).map(to_cell).unwrap_or_default();
                row.insert(header.clone(), value);
            }
            if row.values().all(CellValue::is_empty) {
                continue;
            }
            out.push(row);
        }
        log::debug!("{} filas leídas de {}:{}", out.len(), path.display(), sheet);
        Ok(out)
    }
}
