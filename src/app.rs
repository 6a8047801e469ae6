//! Casos de uso del binario: enviar una planilla y gestionar la plantilla
//! de mensaje. Devuelven valores serializables; `main` sólo imprime.
use chrono::NaiveDate;
use comin_adapters::{CalamineSheetSource, MessageTemplate, SmtpMailer, XlsxWorkbookWriter};
use comin_core::{CancellationFlag, CommissionPipeline, Mailer, MessageOverride, RunRequest, RunSummary};
use serde_json::{json, Value};
use std::path::Path;

use crate::cli::{Command, USAGE};
use crate::config::AppConfig;
use crate::errors::AppError;

/// Asunto y cuerpo efectivos: lo indicado explícitamente gana; con
/// `use_template` la plantilla renderizada completa lo que falte.
pub fn resolve_message(subject: Option<String>,
                       body: Option<String>,
                       use_template: bool,
                       template_path: &Path,
                       today: NaiveDate)
                       -> Result<MessageOverride, AppError> {
    let message = MessageOverride::new(subject, body);
    if !use_template {
        return Ok(message);
    }
    let template = MessageTemplate::load(template_path)?.render(today);
    Ok(MessageOverride::new(message.subject.or(Some(template.subject)),
                            message.body.or(Some(template.body))))
}

/// Ejecuta el pipeline con los adaptadores reales de lectura y escritura y
/// el `mailer` indicado.
pub async fn send_with(config: &AppConfig,
                       upload: &Path,
                       message: MessageOverride,
                       mailer: &dyn Mailer,
                       cancel: CancellationFlag)
                       -> Result<RunSummary, AppError> {
    let source = CalamineSheetSource::new();
    let writer = XlsxWorkbookWriter::new();
    let pipeline = CommissionPipeline::new(config.pipeline.clone(), &source, &writer, mailer).with_cancellation(cancel);
    let summary = pipeline.run(RunRequest::new(upload).with_message(message)).await?;
    Ok(summary)
}

pub async fn send(config: &AppConfig, upload: &Path, message: MessageOverride, cancel: CancellationFlag) -> Result<RunSummary, AppError> {
    let mailer = SmtpMailer::new(&config.smtp_settings()?)?;
    send_with(config, upload, message, &mailer, cancel).await
}

pub fn show_message(path: &Path, rendered: bool, today: NaiveDate) -> Result<MessageTemplate, AppError> {
    let template = MessageTemplate::load(path)?;
    Ok(if rendered { template.render(today) } else { template })
}

pub fn define_message(path: &Path, subject: String, body: String) -> Result<MessageTemplate, AppError> {
    let template = MessageTemplate::new(subject, body);
    template.save(path)?;
    log::info!("plantilla actualizada en {}", path.display());
    Ok(template)
}

/// Despacha un comando y devuelve la salida JSON.
pub async fn run(command: Command, config: &AppConfig, cancel: CancellationFlag, today: NaiveDate) -> Result<Value, AppError> {
    match command {
        Command::Send { upload,
                        subject,
                        body,
                        use_template, } => {
            let message = resolve_message(subject, body, use_template, &config.message_path, today)?;
            let summary = send(config, &upload, message, cancel).await?;
            serde_json::to_value(summary).map_err(|e| AppError::Io(e.into()))
        }
        Command::ShowMessage { rendered } => {
            let template = show_message(&config.message_path, rendered, today)?;
            serde_json::to_value(template).map_err(|e| AppError::Io(e.into()))
        }
        Command::DefineMessage { subject, body } => {
            define_message(&config.message_path, subject, body)?;
            Ok(json!({ "success": true, "message": "Mensagem padrão atualizada." }))
        }
        Command::Help => Ok(json!({ "usage": USAGE })),
    }
}

/// Salida JSON de un error: `{ "error": ..., "logPath": ... }`.
pub fn error_json(error: &AppError) -> Value {
    match error.log_path() {
        Some(path) => json!({ "error": error.to_string(), "logPath": path }),
        None => json!({ "error": error.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comin_core::{DataSourceError, PipelineError, RunFailure};

    #[test]
    fn explicit_text_wins_over_template() {
        let dir = std::env::temp_dir().join(format!("comin-app-{}", uuid::Uuid::new_v4()));
        let path = dir.join("message.json");
        MessageTemplate::new("Comissão <pmes>", "Pagamento de <ano>").save(&path).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let message = resolve_message(Some("Fixo".into()), None, true, &path, today).unwrap();
        assert_eq!(message.subject.as_deref(), Some("Fixo"));
        assert_eq!(message.body.as_deref(), Some("Pagamento de 2025"));

        let message = resolve_message(None, Some("  ".into()), false, &path, today).unwrap();
        assert_eq!(message, MessageOverride::default());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn error_output_carries_log_path() {
        let err = AppError::Pipeline(RunFailure { error: PipelineError::InvalidInput(DataSourceError::FileNotFound("up.xlsx".into())),
                                                  log_path: Some("log/2025/06/log.txt".into()) });
        let out = error_json(&err);
        assert_eq!(out["logPath"], "log/2025/06/log.txt");
        assert!(out["error"].as_str().unwrap().starts_with("entrada inválida"));
        assert!(error_json(&AppError::Usage("x".into())).get("logPath").is_none());
    }
}
