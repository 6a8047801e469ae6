//! Trait `SheetSource`: lectura de una hoja nombrada como filas ordenadas.
//!
//! El core no conoce el formato físico de las planillas; el adaptador real
//! (calamine) vive en `comin-adapters`. `InMemorySheetSource` sirve para
//! tests y para ejecuciones en seco.

use comin_domain::Row;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::DataSourceError;

pub trait SheetSource: Send + Sync {
    /// Lee la hoja `sheet` de `path`. La primera fila de la hoja es la
    /// cabecera; cada fila devuelta tiene todas las columnas de la cabecera
    /// (celdas faltantes como `CellValue::Empty`).
    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<Vec<Row>, DataSourceError>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemorySheetSource {
    pub inner: HashMap<PathBuf, HashMap<String, Vec<Row>>>,
}

impl InMemorySheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, path: impl Into<PathBuf>, sheet: impl Into<String>, rows: Vec<Row>) -> Self {
        self.inner.entry(path.into()).or_default().insert(sheet.into(), rows);
        self
    }
}

impl SheetSource for InMemorySheetSource {
    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<Vec<Row>, DataSourceError> {
        let sheets = self.inner
                         .get(path)
                         .ok_or_else(|| DataSourceError::FileNotFound(path.to_path_buf()))?;
        sheets.get(sheet)
              .cloned()
              .ok_or_else(|| DataSourceError::MissingSheet { path: path.to_path_buf(),
                                                             sheet: sheet.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_and_missing_sheet_are_distinct() {
        let src = InMemorySheetSource::new().with_sheet("up.xlsx", "apibase", vec![]);
        assert!(src.read_sheet(Path::new("up.xlsx"), "apibase").unwrap().is_empty());
        assert!(matches!(src.read_sheet(Path::new("up.xlsx"), "outra"),
                         Err(DataSourceError::MissingSheet { .. })));
        assert!(matches!(src.read_sheet(Path::new("nada.xlsx"), "apibase"),
                         Err(DataSourceError::FileNotFound(_))));
    }
}
