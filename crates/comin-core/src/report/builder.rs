//! `ReportBuilder`: layout + ruta + escritura de cada grupo.

use chrono::NaiveDate;
use comin_domain::ReportGroup;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ReportLayout, WorkbookWriter};
use crate::constants::REPORTS_DIR;
use crate::errors::ReportWriteError;
use crate::runlog::{LogSink, Stage};

/// Planilla generada para un grupo. No se modifica tras crearse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportArtifact {
    pub code: String,
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub subtotal_formula: Option<String>,
    pub fingerprint: String,
}

impl ReportArtifact {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.xlsx", self.code))
    }
}

pub struct ReportBuilder<'a> {
    base_dir: PathBuf,
    prefix: String,
    date: NaiveDate,
    writer: &'a dyn WorkbookWriter,
}

fn safe_code(code: &str) -> String {
    code.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

impl<'a> ReportBuilder<'a> {
    pub fn new(base_dir: impl Into<PathBuf>, prefix: impl Into<String>, date: NaiveDate, writer: &'a dyn WorkbookWriter) -> Self {
        Self { base_dir: base_dir.into(),
               prefix: prefix.into(),
               date,
               writer }
    }

    /// `<base>/reports/<año>/<mes>/<prefijo>_<código>_<fecha ISO>.xlsx`
    pub fn report_path(&self, code: &str) -> PathBuf {
        self.base_dir
            .join(REPORTS_DIR)
            .join(self.date.format("%Y").to_string())
            .join(self.date.format("%m").to_string())
            .join(format!("{}_{}_{}.xlsx", self.prefix, safe_code(code), self.date.format("%Y-%m-%d")))
    }

    /// Genera y persiste la planilla de un grupo.
    pub fn build(&self, group: &ReportGroup) -> Result<ReportArtifact, ReportWriteError> {
        let path = self.report_path(group.code());
        if let Some(dir) = path.parent() {
            ensure_dir(dir)?;
        }
        let layout = ReportLayout::for_group(group);
        self.writer.write(&layout, &path)?;
        Ok(ReportArtifact { code: group.code().to_string(),
                            path,
                            subtotal_formula: layout.subtotal.as_ref().map(|s| s.formula.clone()),
                            fingerprint: layout.fingerprint(),
                            headers: layout.headers })
    }

    /// Genera todos los grupos en paralelo. Las entradas de log se agregan
    /// después, en el orden de los grupos; un fallo sólo descarta su grupo.
    pub fn build_all<'g>(&self, groups: &'g [ReportGroup], sink: &mut dyn LogSink) -> Vec<(&'g ReportGroup, ReportArtifact)> {
        let results: Vec<Result<ReportArtifact, ReportWriteError>> = groups.par_iter().map(|g| self.build(g)).collect();
        let mut built = Vec::with_capacity(groups.len());
        for (group, result) in groups.iter().zip(results) {
            match result {
                Ok(artifact) => {
                    log::debug!("planilha {} fingerprint {}", artifact.code, artifact.fingerprint);
                    sink.info(Stage::Report, format!("Planilha {} criada.", group.code()));
                    built.push((group, artifact));
                }
                Err(e) => sink.error(Stage::Error, format!("Erro ao gerar a planilha do código {}: {e}", group.code())),
            }
        }
        built
    }
}

/// `create_dir_all` ya tolera que el directorio exista (o que otro hilo lo
/// cree a la vez).
fn ensure_dir(dir: &Path) -> Result<(), ReportWriteError> {
    fs::create_dir_all(dir).map_err(|source| ReportWriteError::Directory { path: dir.to_path_buf(),
                                                                            source })
}
