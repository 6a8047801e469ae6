use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("variable de entorno {0} no definida")]
    Missing(String),
    #[error("valor inválido para {name}: {value}")]
    Invalid { name: String, value: String },
}
