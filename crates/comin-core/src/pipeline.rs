//! Orquestación de una ejecución completa.
//!
//! Etapas: carga de la planilla y del directorio → validación (sólo log) →
//! partición → informes → envíos → persistencia del log. Cada etapa recibe
//! el `RunLog` de la ejecución de forma explícita; el log se persiste una
//! única vez, tanto si la ejecución termina bien como si aborta.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::{Handle, RuntimeFlavor};
use uuid::Uuid;

use crate::constants::*;
use crate::dispatch::{CancellationFlag, DispatchQueue, DispatchTally, DispatchTask, Mailer, MessageOverride};
use crate::errors::{DataSourceError, PipelineError};
use crate::runlog::{LogSink, RunLog, Stage};
use crate::report::{ReportBuilder, WorkbookWriter};
use crate::source::SheetSource;
use crate::{loader, partition, validate};

/// Parámetros de una instalación (rutas, hojas, pausa entre envíos).
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub base_dir: PathBuf,
    pub reference_path: PathBuf,
    pub reference_sheet: String,
    pub upload_sheet: String,
    pub report_prefix: String,
    pub log_tag: String,
    pub send_delay: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { base_dir: PathBuf::from("."),
               reference_path: PathBuf::from("comin_data.xlsx"),
               reference_sheet: REFERENCE_SHEET.to_string(),
               upload_sheet: UPLOAD_SHEET.to_string(),
               report_prefix: REPORT_PREFIX.to_string(),
               log_tag: LOG_TAG.to_string(),
               send_delay: Duration::from_millis(SEND_DELAY_MS) }
    }
}

/// Una petición de ejecución: la planilla subida y el mensaje opcional.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub upload_path: PathBuf,
    pub message: MessageOverride,
}

impl RunRequest {
    pub fn new(upload_path: impl Into<PathBuf>) -> Self {
        Self { upload_path: upload_path.into(),
               message: MessageOverride::default() }
    }

    pub fn with_message(mut self, message: MessageOverride) -> Self {
        self.message = message;
        self
    }
}

/// Resultado de una ejecución que llegó al final. Los fallos por vendedor
/// (informe o envío) sólo quedan en el log.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub success: bool,
    pub message: String,
    pub log_path: PathBuf,
    pub run_id: Uuid,
    pub artifacts: Vec<PathBuf>,
    pub attempted: usize,
    pub succeeded: usize,
}

/// Ejecución abortada. `log_path` es `None` si ni siquiera pudo persistirse
/// el log.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RunFailure {
    #[source]
    pub error: PipelineError,
    pub log_path: Option<PathBuf>,
}

struct RunOutcome {
    artifacts: Vec<PathBuf>,
    tally: DispatchTally,
}

pub struct CommissionPipeline<'a> {
    settings: PipelineSettings,
    source: &'a dyn SheetSource,
    writer: &'a dyn WorkbookWriter,
    mailer: &'a dyn Mailer,
    cancel: CancellationFlag,
}

impl<'a> CommissionPipeline<'a> {
    pub fn new(settings: PipelineSettings,
               source: &'a dyn SheetSource,
               writer: &'a dyn WorkbookWriter,
               mailer: &'a dyn Mailer)
               -> Self {
        Self { settings,
               source,
               writer,
               mailer,
               cancel: CancellationFlag::new() }
    }

    /// Permite abortar los envíos pendientes desde fuera.
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Ejecuta el pipeline para una planilla subida.
    pub async fn run(&self, request: RunRequest) -> Result<RunSummary, RunFailure> {
        let mut log = RunLog::new();
        let run_id = log.run_id();
        match self.execute(&request, &mut log).await {
            Ok(outcome) => {
                let log_path = log.flush(&self.settings.base_dir, &self.settings.log_tag)
                                  .map_err(|e| RunFailure { error: PipelineError::LogFlush(e),
                                                            log_path: None })?;
                Ok(RunSummary { success: true,
                                message: "Planilhas geradas e e-mails enviados com sucesso.".to_string(),
                                log_path,
                                run_id,
                                artifacts: outcome.artifacts,
                                attempted: outcome.tally.attempted,
                                succeeded: outcome.tally.succeeded })
            }
            Err(error) => {
                log.error(Stage::Error, format!("Erro geral: {error}"));
                let log_path = match log.flush(&self.settings.base_dir, &self.settings.log_tag) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        log::error!("no se pudo guardar el log de la ejecución {run_id}: {e}");
                        None
                    }
                };
                Err(RunFailure { error, log_path })
            }
        }
    }

    async fn execute(&self, request: &RunRequest, log: &mut RunLog) -> Result<RunOutcome, PipelineError> {
        let started = log.start();
        let not_given = || "Não informado".to_string();
        log.spacer();
        log.info(Stage::Subject, request.message.subject.clone().unwrap_or_else(not_given));
        log.spacer();
        log.info(Stage::Message, request.message.body.clone().unwrap_or_else(not_given));
        log.spacer();

        log.info(Stage::Upload, "Upload da planilha feito.".to_string());

        let (tasks, artifacts) = run_blocking(|| self.prepare(request, started.date_naive(), log))?;
        log.info(Stage::Report,
                 "Todas as planilhas foram criadas. Iniciando envio dos e-mails...".to_string());

        let mut queue = DispatchQueue::new(self.settings.send_delay).with_cancellation(self.cancel.clone());
        for task in tasks {
            queue.push(task);
        }
        let tally = queue.run(self.mailer, log).await;

        let finished = Local::now();
        let elapsed = (finished - started).num_seconds().max(0);
        log.spacer();
        log.info(Stage::Send,
                 format!("Envio concluído: {} de {} e-mail(s) enviados.", tally.succeeded, tally.attempted));
        log.info(Stage::Email, format!("Total de e-mails enviados: {}", tally.succeeded));
        log.info(Stage::Time, format!("Finalizado em: {}", finished.format("%d/%m/%Y, %H:%M:%S")));
        log.info(Stage::Time,
                 format!("Duração do processo: {} minuto(s) e {} segundo(s)", elapsed / 60, elapsed % 60));
        log.spacer();

        Ok(RunOutcome { artifacts, tally })
    }

    /// Etapas síncronas: lectura de las hojas, validación, partición y
    /// generación de informes. Devuelve las tareas de envío y las rutas
    /// generadas.
    fn prepare(&self,
               request: &RunRequest,
               date: NaiveDate,
               log: &mut RunLog)
               -> Result<(Vec<DispatchTask>, Vec<PathBuf>), PipelineError> {
        let items = loader::load_line_items(self.source, &request.upload_path, &self.settings.upload_sheet, log)
            .map_err(|e| match e {
                DataSourceError::MissingSheet { .. }
                | DataSourceError::MissingColumn { .. }
                | DataSourceError::FileNotFound(_) => PipelineError::InvalidInput(e),
                other => PipelineError::DataSource(other),
            })?;

        let reference = loader::load_reference(self.source,
                                               &self.settings.reference_path,
                                               &self.settings.reference_sheet,
                                               log)?;

        // informativo: no condiciona el resto de la ejecución
        let _ = validate::validate_codes(&reference, &items, log);

        let groups = partition::resolve_groups(&items, &reference, log);

        let builder = ReportBuilder::new(&self.settings.base_dir, &self.settings.report_prefix, date, self.writer);
        let built = builder.build_all(&groups, log);
        let tasks = built.iter()
                         .map(|(group, artifact)| DispatchTask::new(artifact, group.recipients(), &request.message))
                         .collect();
        let artifacts = built.into_iter().map(|(_, artifact)| artifact.path).collect();
        Ok((tasks, artifacts))
    }
}

/// Ejecuta trabajo bloqueante (IO de planillas, render en rayon) sin acaparar
/// un worker de tokio. En runtimes `current_thread` no existe otro worker al
/// que ceder, así que se ejecuta en el lugar.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => tokio::task::block_in_place(f),
        _ => f(),
    }
}
