use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::{LogEntry, LogLevel, Stage};
use crate::constants::LOG_DIR;

/// Sumidero append-only de líneas de log de una ejecución.
pub trait LogSink: Send {
    /// Agrega una entrada y devuelve la entrada completa (con seq y ts).
    fn append(&mut self, level: LogLevel, stage: Stage, detail: String) -> LogEntry;
    /// Entradas en orden de llegada.
    fn entries(&self) -> &[LogEntry];

    fn info(&mut self, stage: Stage, detail: String) {
        self.append(LogLevel::Info, stage, detail);
    }

    fn warn(&mut self, stage: Stage, detail: String) {
        self.append(LogLevel::Warn, stage, detail);
    }

    fn error(&mut self, stage: Stage, detail: String) {
        self.append(LogLevel::Error, stage, detail);
    }

    fn spacer(&mut self) {
        self.append(LogLevel::Info, Stage::Spacer, String::new());
    }

    /// Líneas renderizadas en orden.
    fn lines(&self) -> Vec<String> {
        self.entries().iter().map(LogEntry::render).collect()
    }
}

/// Log exclusivo de una ejecución. Se crea al inicio de la ejecución y se
/// consume en `flush`, de modo que sólo puede persistirse una vez.
#[derive(Debug)]
pub struct RunLog {
    run_id: Uuid,
    started_at: DateTime<Local>,
    entries: Vec<LogEntry>,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::started_at(Local::now())
    }
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started_at(started_at: DateTime<Local>) -> Self {
        Self { run_id: Uuid::new_v4(),
               started_at,
               entries: Vec::new() }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn start(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Ruta `log/<año>/<mes>/log_<dd-mm-aaaa>_<HH-MM-SS>_<tag>.txt` según el
    /// inicio de la ejecución.
    pub fn log_path(&self, base_dir: &Path, tag: &str) -> PathBuf {
        let dir = base_dir.join(LOG_DIR)
                          .join(self.started_at.format("%Y").to_string())
                          .join(self.started_at.format("%m").to_string());
        let file = format!("log_{}_{}_{}.txt",
                           self.started_at.format("%d-%m-%Y"),
                           self.started_at.format("%H-%M-%S"),
                           tag);
        dir.join(file)
    }

    /// Escribe todas las líneas (unidas por `\n`) y consume el log.
    pub fn flush(self, base_dir: &Path, tag: &str) -> std::io::Result<PathBuf> {
        let path = self.log_path(base_dir, tag);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, self.lines().join("\n"))?;
        log::info!("Log salvo em: {}", path.display());
        Ok(path)
    }
}

impl LogSink for RunLog {
    fn append(&mut self, level: LogLevel, stage: Stage, detail: String) -> LogEntry {
        let entry = LogEntry { seq: self.entries.len() as u64,
                               level,
                               stage,
                               detail,
                               ts: Local::now() };
        let line = entry.render();
        match level {
            LogLevel::Info => log::info!("{line}"),
            LogLevel::Warn => log::warn!("{line}"),
            LogLevel::Error => log::error!("{line}"),
        }
        self.entries.push(entry.clone());
        entry
    }

    fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entries_keep_arrival_order() {
        let mut log = RunLog::new();
        log.info(Stage::Upload, "Upload da planilha feito.".into());
        log.spacer();
        log.warn(Stage::Warning, "código 9 sem cadastro".into());
        let seqs: Vec<u64> = log.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(log.lines(),
                   vec!["[UPLOAD] Upload da planilha feito.".to_string(),
                        String::new(),
                        "[AVISO] código 9 sem cadastro".to_string()]);
    }

    #[test]
    fn log_path_is_partitioned_by_year_and_month() {
        let start = Local.with_ymd_and_hms(2025, 6, 4, 9, 5, 7).unwrap();
        let log = RunLog::started_at(start);
        let path = log.log_path(Path::new("/base"), "COMIN");
        assert_eq!(path, PathBuf::from("/base/log/2025/06/log_04-06-2025_09-05-07_COMIN.txt"));
    }

    #[test]
    fn flush_writes_lines_verbatim() {
        let base = std::env::temp_dir().join(format!("comin-log-{}", Uuid::new_v4()));
        let mut log = RunLog::new();
        log.info(Stage::Report, "Planilha 101 criada.".into());
        log.error(Stage::Error, "falha".into());
        let path = log.flush(&base, "COMIN").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[RELATÓRIO] Planilha 101 criada.\n[ERRO] falha");
        let _ = fs::remove_dir_all(&base);
    }
}
