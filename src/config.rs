//! Configuración central de la aplicación.
//! Carga variables de entorno (.env una sola vez) y arma los parámetros del
//! pipeline, la ruta de la plantilla de mensaje y los datos SMTP.
use comin_adapters::SmtpSettings;
use comin_core::constants::{LOG_TAG, REFERENCE_SHEET, REPORT_PREFIX, SEND_DELAY_MS, UPLOAD_SHEET};
use comin_core::PipelineSettings;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ConfigError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Credenciales de correo. Sólo son obligatorias para enviar.
#[derive(Debug, Clone, Default)]
pub struct EmailConfig {
    pub host: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pipeline: PipelineSettings,
    pub message_path: PathBuf,
    pub email: EmailConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    /// Las rutas relativas se resuelven contra `COMIN_BASE_DIR`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        let base_dir = PathBuf::from(or("COMIN_BASE_DIR", "."));
        let send_delay_ms = match var("COMIN_SEND_DELAY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid { name: "COMIN_SEND_DELAY_MS".into(),
                                                                                      value: raw.clone() })?,
            None => SEND_DELAY_MS,
        };

        let pipeline = PipelineSettings { reference_path: base_dir.join(or("COMIN_REFERENCE_PATH", "comin_data.xlsx")),
                                          reference_sheet: or("COMIN_REFERENCE_SHEET", REFERENCE_SHEET),
                                          upload_sheet: or("COMIN_UPLOAD_SHEET", UPLOAD_SHEET),
                                          report_prefix: or("COMIN_REPORT_PREFIX", REPORT_PREFIX),
                                          log_tag: or("COMIN_LOG_TAG", LOG_TAG),
                                          send_delay: Duration::from_millis(send_delay_ms),
                                          base_dir: base_dir.clone() };
        Ok(Self { message_path: base_dir.join(or("COMIN_MESSAGE_PATH", "message.json")),
                  email: EmailConfig { host: or("EMAIL_SMTP_HOST", DEFAULT_SMTP_HOST),
                                       user: var("EMAIL_USER"),
                                       password: var("EMAIL_PASS") },
                  pipeline })
    }

    /// Datos SMTP para enviar; falla si faltan las credenciales.
    pub fn smtp_settings(&self) -> Result<SmtpSettings, ConfigError> {
        let user = self.email.user.clone().ok_or_else(|| ConfigError::Missing("EMAIL_USER".into()))?;
        let password = self.email.password.clone().ok_or_else(|| ConfigError::Missing("EMAIL_PASS".into()))?;
        Ok(SmtpSettings { host: self.email.host.clone(),
                          user,
                          password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.pipeline.base_dir, PathBuf::from("."));
        assert_eq!(config.pipeline.reference_path, PathBuf::from("./comin_data.xlsx"));
        assert_eq!(config.pipeline.upload_sheet, "apibase");
        assert_eq!(config.pipeline.send_delay, Duration::from_millis(1000));
        assert_eq!(config.message_path, PathBuf::from("./message.json"));
        assert_eq!(config.email.host, "smtp.gmail.com");
        assert_eq!(config.smtp_settings().unwrap_err(), ConfigError::Missing("EMAIL_USER".into()));
    }

    #[test]
    fn overrides_and_credentials() {
        let config = AppConfig::from_lookup(lookup(&[("COMIN_BASE_DIR", "/srv/comin"),
                                                     ("COMIN_REFERENCE_PATH", "/dados/ref.xlsx"),
                                                     ("COMIN_SEND_DELAY_MS", "250"),
                                                     ("EMAIL_USER", "envio@x.com"),
                                                     ("EMAIL_PASS", "segredo")])).unwrap();
        assert_eq!(config.pipeline.reference_path, PathBuf::from("/dados/ref.xlsx"));
        assert_eq!(config.message_path, PathBuf::from("/srv/comin/message.json"));
        assert_eq!(config.pipeline.send_delay, Duration::from_millis(250));
        let smtp = config.smtp_settings().unwrap();
        assert_eq!((smtp.user.as_str(), smtp.password.as_str()), ("envio@x.com", "segredo"));
    }

    #[test]
    fn invalid_delay_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("COMIN_SEND_DELAY_MS", "1s")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref name, .. } if name == "COMIN_SEND_DELAY_MS"));
        let config = AppConfig::from_lookup(lookup(&[("EMAIL_USER", "a@x.com")])).unwrap();
        assert_eq!(config.smtp_settings().unwrap_err(), ConfigError::Missing("EMAIL_PASS".into()));
    }
}
