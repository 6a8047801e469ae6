//! Errores del pipeline de comisiones.
//!
//! Sólo `DataSourceError` aborta una ejecución. `ReportWriteError` y
//! `DispatchError` se capturan en su etapa, se registran en el log de la
//! ejecución y el pipeline continúa con el resto de vendedores.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("archivo no encontrado: {0}")]
    FileNotFound(PathBuf),
    #[error("no se pudo leer {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
    #[error("la hoja \"{sheet}\" no existe en {path}")]
    MissingSheet { path: PathBuf, sheet: String },
    #[error("la hoja \"{sheet}\" de {path} no tiene la columna {column}")]
    MissingColumn { path: PathBuf, sheet: String, column: String },
}

#[derive(Debug, Error)]
pub enum ReportWriteError {
    #[error("no se pudo crear el directorio {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error al construir la planilla del código {code}: {reason}")]
    Render { code: String, reason: String },
    #[error("no se pudo guardar {path}: {reason}")]
    Save { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dirección inválida {address}: {reason}")]
    Address { address: String, reason: String },
    #[error("error al construir el mensaje: {0}")]
    Build(String),
    #[error("no se pudo adjuntar {path}: {reason}")]
    Attachment { path: PathBuf, reason: String },
    #[error("error de transporte SMTP: {0}")]
    Transport(String),
    #[error("envío cancelado")]
    Cancelled,
}

/// Error terminal de una ejecución.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// La planilla subida no cumple el contrato de entrada (p. ej. falta la
    /// hoja `apibase`).
    #[error("entrada inválida: {0}")]
    InvalidInput(#[source] DataSourceError),
    #[error("fuente de datos: {0}")]
    DataSource(#[from] DataSourceError),
    #[error("no se pudo guardar el log de la ejecución: {0}")]
    LogFlush(#[from] std::io::Error),
}

impl PipelineError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PipelineError::InvalidInput(_))
    }
}
