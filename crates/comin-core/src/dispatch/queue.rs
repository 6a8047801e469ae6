//! Cola de envíos consumida por un único worker.
//!
//! Invariantes:
//! - Los envíos son estrictamente secuenciales.
//! - Entre dos intentos consecutivos (exitosos o no) transcurre al menos
//!   `min_interval`.
//! - Un fallo se registra y se contabiliza; nunca detiene la cola.
//! - La cancelación se consulta antes de cada tarea; lo ya enviado queda.

use serde::Serialize;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use super::{CancellationFlag, Mailer, OutgoingEmail};
use crate::constants::{default_subject, DEFAULT_BODY};
use crate::errors::DispatchError;
use crate::runlog::{LogSink, Stage};
use crate::report::ReportArtifact;

/// Asunto/cuerpo indicados por el llamador. Un texto en blanco equivale a no
/// indicarlo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOverride {
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl MessageOverride {
    pub fn new(subject: Option<String>, body: Option<String>) -> Self {
        let keep = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        Self { subject: keep(subject),
               body: keep(body) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTask {
    pub code: String,
    pub recipients: Vec<String>,
    pub attachment: PathBuf,
    pub attachment_name: String,
    pub message: MessageOverride,
}

impl DispatchTask {
    pub fn new(artifact: &ReportArtifact, recipients: &[String], message: &MessageOverride) -> Self {
        Self { code: artifact.code.clone(),
               recipients: recipients.to_vec(),
               attachment: artifact.path.clone(),
               attachment_name: artifact.file_name(),
               message: message.clone() }
    }

    pub fn email(&self) -> OutgoingEmail {
        OutgoingEmail { to: self.recipients.clone(),
                        subject: self.message.subject.clone().unwrap_or_else(|| default_subject(&self.code)),
                        body: self.message.body.clone().unwrap_or_else(|| DEFAULT_BODY.to_string()),
                        attachment: self.attachment.clone(),
                        attachment_name: self.attachment_name.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub code: String,
    pub recipients: Vec<String>,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchTally {
    pub results: Vec<DispatchResult>,
    pub attempted: usize,
    pub succeeded: usize,
    /// Tareas no intentadas por cancelación.
    pub cancelled: usize,
}

#[derive(Debug)]
pub struct DispatchQueue {
    tasks: VecDeque<DispatchTask>,
    min_interval: Duration,
    cancel: CancellationFlag,
}

impl DispatchQueue {
    pub fn new(min_interval: Duration) -> Self {
        Self { tasks: VecDeque::new(),
               min_interval,
               cancel: CancellationFlag::new() }
    }

    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn push(&mut self, task: DispatchTask) {
        self.tasks.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Consume la cola enviando un correo por tarea.
    pub async fn run(mut self, mailer: &dyn Mailer, sink: &mut dyn LogSink) -> DispatchTally {
        let mut tally = DispatchTally::default();
        while let Some(task) = self.tasks.pop_front() {
            if self.cancel.is_cancelled() {
                let pending: Vec<DispatchTask> = std::iter::once(task).chain(self.tasks.drain(..)).collect();
                tally.cancelled = pending.len();
                sink.warn(Stage::Send,
                          format!("Envio cancelado; {} e-mail(s) não enviados.", tally.cancelled));
                tally.results.extend(pending.into_iter().map(|t| DispatchResult { code: t.code,
                                                                                  recipients: t.recipients,
                                                                                  success: false,
                                                                                  error: Some(DispatchError::Cancelled.to_string()) }));
                break;
            }

            tally.attempted += 1;
            let result = match mailer.send(&task.email()).await {
                Ok(()) => {
                    tally.succeeded += 1;
                    sink.info(Stage::Send,
                              format!("E-mail enviado para o vendedor {}: {}", task.code, task.recipients.join(", ")));
                    DispatchResult { code: task.code,
                                     recipients: task.recipients,
                                     success: true,
                                     error: None }
                }
                Err(e) => {
                    sink.error(Stage::Error, format!("Erro ao enviar e-mail para {}: {e}", task.code));
                    DispatchResult { code: task.code,
                                     recipients: task.recipients,
                                     success: false,
                                     error: Some(e.to_string()) }
                }
            };
            tally.results.push(result);

            if !self.tasks.is_empty() {
                tokio::time::sleep(self.min_interval).await;
            }
        }
        tally
    }
}
