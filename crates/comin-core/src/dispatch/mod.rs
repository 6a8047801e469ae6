//! Envío secuencial y con pausa de los informes generados.

mod cancel;
mod mailer;
mod queue;

pub use cancel::CancellationFlag;
pub use mailer::{Mailer, OutgoingEmail};
pub use queue::{DispatchQueue, DispatchResult, DispatchTally, DispatchTask, MessageOverride};
