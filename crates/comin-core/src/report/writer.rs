use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::ReportLayout;
use crate::errors::ReportWriteError;

/// Persiste un `ReportLayout` en disco. Debe ser `Sync`: los informes de
/// distintos vendedores se escriben en paralelo.
pub trait WorkbookWriter: Send + Sync {
    fn write(&self, layout: &ReportLayout, path: &Path) -> Result<(), ReportWriteError>;
}

/// Writer que guarda los layouts en memoria, indexados por ruta.
#[derive(Debug, Default)]
pub struct InMemoryWorkbookWriter {
    pub inner: Mutex<HashMap<PathBuf, ReportLayout>>,
}

impl InMemoryWorkbookWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<ReportLayout> {
        self.inner.lock().ok().and_then(|m| m.get(path).cloned())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorkbookWriter for InMemoryWorkbookWriter {
    fn write(&self, layout: &ReportLayout, path: &Path) -> Result<(), ReportWriteError> {
        let mut inner = self.inner.lock().map_err(|e| ReportWriteError::Save { path: path.to_path_buf(),
                                                                              reason: e.to_string() })?;
        inner.insert(path.to_path_buf(), layout.clone());
        Ok(())
    }
}
