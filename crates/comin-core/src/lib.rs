//! comin-core: pipeline de informes de comisión por vendedor.
//!
//! Carga la planilla subida y el directorio de vendedores, valida los
//! códigos, parte las líneas por vendedor, genera una planilla por vendedor y
//! la envía por correo de forma secuencial, registrando todo en el log de la
//! ejecución.
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod hashing;
pub mod loader;
pub mod runlog;
pub mod partition;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod validate;

pub use dispatch::{CancellationFlag, DispatchQueue, DispatchResult, DispatchTally, DispatchTask, Mailer, MessageOverride, OutgoingEmail};
pub use errors::{DataSourceError, DispatchError, PipelineError, ReportWriteError};
pub use runlog::{LogEntry, LogLevel, LogSink, RunLog, Stage};
pub use pipeline::{CommissionPipeline, PipelineSettings, RunFailure, RunRequest, RunSummary};
pub use report::{InMemoryWorkbookWriter, ReportArtifact, ReportBuilder, ReportLayout, WorkbookWriter};
pub use source::{InMemorySheetSource, SheetSource};
pub use validate::ValidationReport;
