#![allow(dead_code)]
//! Dobles de prueba compartidos por los tests de integración.

use async_trait::async_trait;
use comin_core::report::layout::ReportLayout;
use comin_core::{CancellationFlag, DispatchError, InMemoryWorkbookWriter, Mailer, OutgoingEmail, ReportWriteError, WorkbookWriter};
use comin_domain::{CellValue, Row};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::time::Instant;

pub fn row(pairs: &[(&str, CellValue)]) -> Row {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

/// Línea de la planilla subida con las columnas habituales.
pub fn upload_row(code: f64, desc: &str, valor: f64, comissao: f64) -> Row {
    row(&[("COD", CellValue::Number(code)),
          ("CL. DESC", CellValue::from(desc)),
          ("VALOR", CellValue::Number(valor)),
          ("COMISSÃO", CellValue::Number(comissao))])
}

pub fn reference_row(code: f64, primary: &str) -> Row {
    row(&[("COD", CellValue::Number(code)),
          ("PRINCIPAL", CellValue::from(primary)),
          ("ALTERNATIVO", CellValue::Empty),
          ("REGIONAL", CellValue::Empty),
          ("CONTROLADORIA", CellValue::Empty)])
}

pub fn temp_base() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("comin-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Mailer que registra cada envío y falla para los asuntos que contengan
/// alguno de los códigos indicados.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(Instant, OutgoingEmail)>>,
    pub fail_codes: HashSet<String>,
    pub cancel_after_first: Option<CancellationFlag>,
}

impl RecordingMailer {
    pub fn failing_for(codes: &[&str]) -> Self {
        Self { fail_codes: codes.iter().map(|c| c.to_string()).collect(),
               ..Self::default() }
    }

    pub fn emails(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().iter().map(|(_, e)| e.clone()).collect()
    }

    pub fn instants(&self) -> Vec<Instant> {
        self.sent.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DispatchError> {
        self.sent.lock().unwrap().push((Instant::now(), email.clone()));
        if let Some(flag) = &self.cancel_after_first {
            flag.cancel();
        }
        if self.fail_codes.iter().any(|c| email.attachment_name.contains(&format!("_{c}_"))) {
            return Err(DispatchError::Transport("550 mailbox unavailable".into()));
        }
        Ok(())
    }
}

/// Writer en memoria que falla para los archivos de ciertos códigos.
#[derive(Default)]
pub struct FlakyWriter {
    pub inner: InMemoryWorkbookWriter,
    pub fail_codes: HashSet<String>,
}

impl FlakyWriter {
    pub fn failing_for(codes: &[&str]) -> Self {
        Self { inner: InMemoryWorkbookWriter::new(),
               fail_codes: codes.iter().map(|c| c.to_string()).collect() }
    }
}

impl WorkbookWriter for FlakyWriter {
    fn write(&self, layout: &ReportLayout, path: &Path) -> Result<(), ReportWriteError> {
        if self.fail_codes.iter().any(|c| layout.sheet_name == format!("Vendedor_{c}")) {
            return Err(ReportWriteError::Save { path: path.to_path_buf(),
                                                reason: "disco cheio".into() });
        }
        self.inner.write(layout, path)
    }
}
