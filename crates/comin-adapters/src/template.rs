//! Plantilla de asunto/mensaje persistida en JSON.
//!
//! Formato del archivo: `{ "assunto": "...", "mensagem": "..." }`.
//! Marcadores reconocidos al renderizar:
//! - `<mes>`: nombre del mes actual
//! - `<pmes>`: nombre del mes anterior (enero -> Dezembro)
//! - `<ano>`: año actual

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MONTHS: [&str; 12] = ["Janeiro",
                            "Fevereiro",
                            "Março",
                            "Abril",
                            "Maio",
                            "Junho",
                            "Julho",
                            "Agosto",
                            "Setembro",
                            "Outubro",
                            "Novembro",
                            "Dezembro"];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("no se pudo leer la plantilla {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("plantilla inválida en {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no se pudo guardar la plantilla {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    #[serde(rename = "assunto")]
    pub subject: String,
    #[serde(rename = "mensagem")]
    pub body: String,
}

/// Nombre del mes (1..=12); fuera de rango devuelve cadena vacía.
pub fn month_name(month: u32) -> &'static str {
    month.checked_sub(1)
         .and_then(|i| MONTHS.get(i as usize))
         .copied()
         .unwrap_or("")
}

fn fill(text: &str, date: NaiveDate) -> String {
    let month = date.month();
    let previous = if month == 1 { 12 } else { month - 1 };
    text.replace("<pmes>", month_name(previous))
        .replace("<mes>", month_name(month))
        .replace("<ano>", &date.year().to_string())
}

impl MessageTemplate {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self { subject: subject.into(),
               body: body.into() }
    }

    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let raw = fs::read_to_string(path).map_err(|source| TemplateError::Read { path: path.to_path_buf(),
                                                                                   source })?;
        serde_json::from_str(&raw).map_err(|source| TemplateError::Parse { path: path.to_path_buf(),
                                                                            source })
    }

    /// Reemplaza el archivo completo.
    pub fn save(&self, path: &Path) -> Result<(), TemplateError> {
        let write_err = |source| TemplateError::Write { path: path.to_path_buf(),
                                                        source };
        let json = serde_json::to_string_pretty(self).map_err(|e| write_err(std::io::Error::other(e)))?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        fs::write(path, json).map_err(write_err)
    }

    /// Sustituye los marcadores para la fecha dada.
    pub fn render(&self, date: NaiveDate) -> Self {
        Self { subject: fill(&self.subject, date),
               body: fill(&self.body, date) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_use_portuguese_months() {
        let template = MessageTemplate::new("Comissão <pmes>/<ano>", "Referente a <pmes>, pago em <mes> de <ano>.");
        let rendered = template.render(NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
        assert_eq!(rendered.subject, "Comissão Maio/2025");
        assert_eq!(rendered.body, "Referente a Maio, pago em Junho de 2025.");
    }

    #[test]
    fn january_wraps_to_december() {
        let rendered = MessageTemplate::new("<pmes> <mes>", "").render(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        assert_eq!(rendered.subject, "Dezembro Janeiro");
    }

    #[test]
    fn json_uses_portuguese_keys() {
        let template: MessageTemplate = serde_json::from_str(r#"{"assunto":"A","mensagem":"M"}"#).unwrap();
        assert_eq!(template, MessageTemplate::new("A", "M"));
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(3), "Março");
    }
}
