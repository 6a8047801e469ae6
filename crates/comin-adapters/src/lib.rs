//! comin-adapters: implementaciones reales de los puertos del core.
//!
//! - `CalamineSheetSource`: lee hojas xlsx/xls/ods con calamine.
//! - `XlsxWorkbookWriter`: materializa un `ReportLayout` con rust_xlsxwriter.
//! - `SmtpMailer`: envía los informes por SMTP (lettre, tokio + rustls).
//! - `MessageTemplate`: plantilla persistida de asunto/mensaje.
//!
//! El core no depende de ninguno de ellos; el binario los conecta.

pub mod calamine_source;
pub mod smtp;
pub mod template;
pub mod xlsx_writer;

pub use calamine_source::CalamineSheetSource;
pub use smtp::{SmtpMailer, SmtpSettings};
pub use template::{MessageTemplate, TemplateError};
pub use xlsx_writer::XlsxWorkbookWriter;
