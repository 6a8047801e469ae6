//! Constantes del pipeline de comisiones.
//!
//! Agrupa los nombres que forman parte del contrato con las planillas de
//! entrada, los archivos generados y el estilo de los informes. Cambiar un
//! estilo cambia el fingerprint de los layouts generados.

/// Hoja obligatoria de la planilla subida.
pub const UPLOAD_SHEET: &str = "apibase";
/// Hoja del directorio de vendedores.
pub const REFERENCE_SHEET: &str = "consulta_comin";

/// Prefijo de los archivos de informe (`comissao_<code>_<fecha>.xlsx`).
pub const REPORT_PREFIX: &str = "comissao";
/// Etiqueta final del nombre del archivo de log.
pub const LOG_TAG: &str = "COMIN";
pub const REPORTS_DIR: &str = "reports";
pub const LOG_DIR: &str = "log";

/// Columnas monetarias reconocidas (comparación sobre el nombre en mayúsculas).
pub const MONETARY_COLUMNS: [&str; 5] = ["TOTAL", "COMISSÃO", "VALOR", "REDUZIDA", "NORMAL"];
/// Columna preferida para el subtotal cuando existe.
pub const SUBTOTAL_PREFERRED_COLUMN: &str = "COMISSÃO";

/// Formato moneda BRL, negativos en rojo.
pub const CURRENCY_FORMAT: &str = "\"R$\" #,##0.00;[Red]-\"R$\" #,##0.00";

pub const HEADER_FILL: u32 = 0x4472C4;
pub const HEADER_FONT: u32 = 0xFFFFFF;
pub const ROW_FILL_EVEN: u32 = 0xFFFFFF;
pub const ROW_FILL_ODD: u32 = 0xD9E1F2;
pub const SUBTOTAL_FILL: u32 = 0xFFFF00;

pub const MIN_COLUMN_WIDTH: f64 = 15.0;
pub const HEADER_WIDTH_PADDING: f64 = 5.0;
/// Incremento aplicado a todas las columnas de datos tras escribir el cuerpo.
pub const COLUMN_WIDTH_INCREMENT: f64 = 2.0;
pub const SPACER_COLUMN_WIDTH: f64 = 2.0;
pub const TOTAL_LABEL_WIDTH: f64 = 10.0;
pub const TOTAL_VALUE_WIDTH: f64 = 14.0;
pub const TOTAL_LABEL: &str = "TOTAL";

/// Pausa obligatoria entre envíos (ms).
pub const SEND_DELAY_MS: u64 = 1000;

pub const DEFAULT_BODY: &str = "Segue a planilha com a comissão.";

/// Asunto por defecto cuando el llamador no indica uno.
pub fn default_subject(code: &str) -> String {
    format!("Comissão - Vendedor {code}")
}
