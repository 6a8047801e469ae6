//! Generación de informes por vendedor.

mod builder;
pub mod layout;
mod writer;

pub use builder::{ReportArtifact, ReportBuilder};
pub use layout::{CellStyle, LayoutCell, LayoutValue, ReportLayout, Subtotal};
pub use writer::{InMemoryWorkbookWriter, WorkbookWriter};
