// comin-domain library entry point
pub mod cell;
pub mod error;
pub mod line_item;
pub mod report_group;
pub mod salesperson;
pub use cell::{CellValue, Row};
pub use error::DomainError;
pub use line_item::{LineItem, CODE_COLUMN, DESCRIPTION_COLUMN};
pub use report_group::ReportGroup;
pub use salesperson::SalespersonRecord;
