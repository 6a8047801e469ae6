//! Carga de las dos fuentes de datos: la planilla subida (líneas de
//! comisión) y el directorio de vendedores.
//!
//! Las filas que no traen `COD` no pueden asignarse a ningún vendedor: se
//! descartan con un aviso en el log en lugar de abortar la ejecución.

use comin_domain::{LineItem, Row, SalespersonRecord, CODE_COLUMN};
use std::path::Path;

use crate::errors::DataSourceError;
use crate::runlog::{LogSink, Stage};
use crate::source::SheetSource;

/// Una hoja con datos pero sin la columna `COD` no es una planilla válida.
fn require_code_column(rows: &[Row], path: &Path, sheet: &str) -> Result<(), DataSourceError> {
    if rows.is_empty() || rows.iter().any(|r| r.contains_key(CODE_COLUMN)) {
        return Ok(());
    }
    Err(DataSourceError::MissingColumn { path: path.to_path_buf(),
                                         sheet: sheet.to_string(),
                                         column: CODE_COLUMN.to_string() })
}

/// Lee las líneas de la hoja `sheet` de la planilla subida.
pub fn load_line_items(source: &dyn SheetSource,
                       path: &Path,
                       sheet: &str,
                       sink: &mut dyn LogSink)
                       -> Result<Vec<LineItem>, DataSourceError> {
    let rows = source.read_sheet(path, sheet)?;
    require_code_column(&rows, path, sheet)?;
    let mut items = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        match LineItem::from_row(row) {
            Ok(item) => items.push(item),
            // +2: cabecera y base 1 de la planilla
            Err(e) => sink.warn(Stage::Warning, format!("Linha {} da aba {sheet} ignorada: {e}", idx + 2)),
        }
    }
    Ok(items)
}

/// Carga el directorio de vendedores en el orden de la hoja.
pub fn load_reference(source: &dyn SheetSource,
                      path: &Path,
                      sheet: &str,
                      sink: &mut dyn LogSink)
                      -> Result<Vec<SalespersonRecord>, DataSourceError> {
    let rows = source.read_sheet(path, sheet)?;
    require_code_column(&rows, path, sheet)?;
    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        match SalespersonRecord::from_row(row) {
            Ok(record) => records.push(record),
            Err(e) => sink.warn(Stage::Warning, format!("Cadastro na linha {} de {sheet} ignorado: {e}", idx + 2)),
        }
    }
    Ok(records)
}
