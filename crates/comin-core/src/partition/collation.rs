//! Comparación de textos pt-BR con el colador de ICU (datos CLDR
//! compilados, locale `pt`).
//!
//! Orden resultante: espacios < puntuación < símbolos < moneda < dígitos <
//! letras; dentro de las letras primero la base (`ç` cuenta como `c`), luego
//! acentos y por último caja, con minúsculas antes que mayúsculas.

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use std::cmp::Ordering;

/// Colador reutilizable. Si los datos de ICU no cargan, degrada a orden por
/// código de punto y lo avisa por el log.
pub struct PtBrCollator {
    inner: Option<Collator>,
}

impl Default for PtBrCollator {
    fn default() -> Self {
        Self::new()
    }
}

impl PtBrCollator {
    pub fn new() -> Self {
        match Collator::try_new(&locale!("pt").into(), CollatorOptions::new()) {
            Ok(collator) => Self { inner: Some(collator) },
            Err(e) => {
                log::warn!("colador pt-BR no disponible, se ordena por código de punto: {e}");
                Self { inner: None }
            }
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.inner {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

/// Orden pt-BR entre dos textos. Para ordenar muchos textos conviene
/// reutilizar un `PtBrCollator`.
pub fn compare_pt_br(a: &str, b: &str) -> Ordering {
    PtBrCollator::new().compare(a, b)
}
