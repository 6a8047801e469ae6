//! CLI mínima:
//! - `comin enviar <arquivo.xlsx> [--assunto TXT] [--mensagem TXT] [--modelo]`
//! - `comin mensagem [--processada]`
//! - `comin mensagem --definir --assunto TXT --mensagem TXT`
use std::path::PathBuf;

use crate::errors::AppError;

pub const USAGE: &str = "uso:
  comin enviar <arquivo.xlsx> [--assunto TXT] [--mensagem TXT] [--modelo]
  comin mensagem [--processada]
  comin mensagem --definir --assunto TXT --mensagem TXT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send {
        upload: PathBuf,
        subject: Option<String>,
        body: Option<String>,
        /// Usa la plantilla renderizada para lo que no se indique explícitamente.
        use_template: bool,
    },
    ShowMessage { rendered: bool },
    DefineMessage { subject: String, body: String },
    Help,
}

fn value_of(args: &[String], i: &mut usize, flag: &str) -> Result<String, AppError> {
    *i += 1;
    args.get(*i).cloned().ok_or_else(|| AppError::Usage(format!("{flag} requiere un valor")))
}

/// Interpreta los argumentos (sin el nombre del programa).
pub fn parse_args(args: &[String]) -> Result<Command, AppError> {
    let Some(command) = args.first() else {
        return Ok(Command::Help);
    };
    let mut upload: Option<PathBuf> = None;
    let mut subject: Option<String> = None;
    let mut body: Option<String> = None;
    let mut use_template = false;
    let mut rendered = false;
    let mut define = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--assunto" => subject = Some(value_of(args, &mut i, "--assunto")?),
            "--mensagem" => body = Some(value_of(args, &mut i, "--mensagem")?),
            "--modelo" => use_template = true,
            "--processada" => rendered = true,
            "--definir" => define = true,
            other if other.starts_with("--") => return Err(AppError::Usage(format!("opción desconocida {other}"))),
            other => {
                if upload.is_some() {
                    return Err(AppError::Usage(format!("argumento inesperado {other}")));
                }
                upload = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    match command.as_str() {
        "enviar" => {
            let upload = upload.ok_or_else(|| AppError::Usage("falta la planilla a enviar".into()))?;
            Ok(Command::Send { upload,
                               subject,
                               body,
                               use_template })
        }
        "mensagem" if define => match (subject, body) {
            (Some(subject), Some(body)) => Ok(Command::DefineMessage { subject, body }),
            _ => Err(AppError::Usage("--definir requiere --assunto y --mensagem".into())),
        },
        "mensagem" => Ok(Command::ShowMessage { rendered }),
        "ajuda" | "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(AppError::Usage(format!("comando desconocido {other}"))),
    }
}
