//! Tipos de entrada del log de ejecución.
//!
//! Rol en el flujo:
//! - Cada etapa del pipeline recibe un `LogSink` explícito y le agrega
//!   entradas; no existe estado global de logging.
//! - La línea renderizada (`[ETAPA] detalle`) es el contrato observable: es lo
//!   que termina, tal cual, en el archivo de log de la ejecución.
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Etapa que origina la línea. Determina la etiqueta entre corchetes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Upload,
    Subject,
    Message,
    Validation,
    Warning,
    Report,
    Send,
    Email,
    Error,
    Time,
    /// Línea separadora vacía (no lleva etiqueta).
    Spacer,
}

impl Stage {
    pub fn tag(self) -> &'static str {
        match self {
            Stage::Upload => "UPLOAD",
            Stage::Subject => "ASSUNTO",
            Stage::Message => "MENSAGEM",
            Stage::Validation => "VALIDAÇÃO",
            Stage::Warning => "AVISO",
            Stage::Report => "RELATÓRIO",
            Stage::Send => "ENVIO",
            Stage::Email => "EMAIL",
            Stage::Error => "ERRO",
            Stage::Time => "TEMPO",
            Stage::Spacer => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub seq: u64, // asignado por el sink (orden de llegada)
    pub level: LogLevel,
    pub stage: Stage,
    pub detail: String,
    pub ts: DateTime<Local>, // metadato (no se escribe en la línea)
}

impl LogEntry {
    /// Línea tal como se persiste.
    pub fn render(&self) -> String {
        match self.stage {
            Stage::Spacer => String::new(),
            stage => format!("[{}] {}", stage.tag(), self.detail),
        }
    }
}
