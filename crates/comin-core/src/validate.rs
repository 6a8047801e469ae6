//! Validación cruzada entre el directorio de vendedores y la planilla subida.
//!
//! El resultado es sólo informativo: nunca detiene ni altera el pipeline.

use comin_domain::{LineItem, SalespersonRecord};
use std::collections::HashSet;

use crate::runlog::{LogSink, Stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Códigos del directorio ausentes en la planilla, en orden del directorio.
    pub missing: Vec<String>,
    pub all_present: bool,
}

pub fn validate_codes(reference: &[SalespersonRecord], items: &[LineItem], sink: &mut dyn LogSink) -> ValidationReport {
    let uploaded: HashSet<&str> = items.iter().map(LineItem::code).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut missing = Vec::new();
    for record in reference {
        let code = record.code.as_str();
        if !seen.insert(code) || uploaded.contains(code) {
            continue;
        }
        sink.warn(Stage::Validation,
                  format!("código {code} não encontrado na planilha enviada, verificar ocorrido!"));
        missing.push(code.to_string());
    }
    if missing.is_empty() {
        sink.info(Stage::Validation,
                  "Todos os códigos da base estão presentes na planilha enviada.".to_string());
    }
    ValidationReport { all_present: missing.is_empty(),
                       missing }
}
