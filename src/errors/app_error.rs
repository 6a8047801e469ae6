use comin_adapters::TemplateError;
use comin_core::{DispatchError, RunFailure};
use std::path::Path;
use thiserror::Error;

use super::config_error::ConfigError;

/// Errores de la aplicación (lo que el binario reporta al usuario).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Pipeline(#[from] RunFailure),
    #[error("Error en la plantilla: {0}")]
    Template(#[from] TemplateError),
    #[error("Error de correo: {0}")]
    Mail(#[from] DispatchError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Uso incorrecto: {0}")]
    Usage(String),
}

impl AppError {
    /// 2 para entradas inválidas (planilla sin `apibase`, argumentos), 1 para
    /// el resto.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Pipeline(f) if f.error.is_invalid_input() => 2,
            _ => 1,
        }
    }

    /// Log persistido de la ejecución abortada, si lo hubo.
    pub fn log_path(&self) -> Option<&Path> {
        match self {
            AppError::Pipeline(f) => f.log_path.as_deref(),
            _ => None,
        }
    }
}
