//! Partición de las líneas por código de vendedor y resolución de grupos.

pub mod collation;

use comin_domain::{DomainError, LineItem, ReportGroup, SalespersonRecord};
use indexmap::IndexMap;
use std::collections::HashMap;

use crate::runlog::{LogSink, Stage};
pub use collation::{compare_pt_br, PtBrCollator};

/// Códigos únicos en orden de primera aparición.
pub fn unique_codes(items: &[LineItem]) -> Vec<String> {
    let mut seen: IndexMap<&str, ()> = IndexMap::new();
    for item in items {
        seen.entry(item.code()).or_insert(());
    }
    seen.into_keys().map(str::to_string).collect()
}

/// Agrupa por código (orden de `unique_codes`) y ordena cada grupo por la
/// columna descriptiva con comparación pt-BR. El orden es estable: líneas con
/// la misma descripción conservan su orden de entrada.
pub fn partition(items: &[LineItem]) -> IndexMap<String, Vec<LineItem>> {
    let collator = PtBrCollator::new();
    unique_codes(items).into_iter()
                       .map(|code| {
                           let mut lines: Vec<LineItem> = items.iter().filter(|i| i.code() == code).cloned().collect();
                           lines.sort_by(|a, b| collator.compare(&a.description(), &b.description()));
                           (code, lines)
                       })
                       .collect()
}

/// Cruza la partición con el directorio y produce los grupos que pueden
/// generar informe. Códigos sin registro o sin correos se omiten con aviso.
pub fn resolve_groups(items: &[LineItem], reference: &[SalespersonRecord], sink: &mut dyn LogSink) -> Vec<ReportGroup> {
    let mut directory: HashMap<&str, &SalespersonRecord> = HashMap::with_capacity(reference.len());
    for record in reference {
        // con códigos duplicados gana el primero
        directory.entry(record.code.as_str()).or_insert(record);
    }

    let mut groups = Vec::new();
    for (code, lines) in partition(items) {
        let Some(record) = directory.get(code.as_str()) else {
            sink.warn(Stage::Warning, format!("Código {code} encontrado mas não possui cadastro."));
            continue;
        };
        match ReportGroup::new(code.clone(), lines, record.recipients()) {
            Ok(group) => groups.push(group),
            Err(DomainError::NoRecipients(_)) => {
                sink.warn(Stage::Warning, format!("Nenhum e-mail registrado no código {code}."));
            }
            Err(e) => sink.warn(Stage::Warning, format!("Código {code} ignorado: {e}")),
        }
    }
    groups
}
