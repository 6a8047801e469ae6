//! comin-mailer
//!
//! Aplicación que conecta el pipeline de comisiones con sus adaptadores:
//! - `config`: variables de entorno (.env) y parámetros de la instalación.
//! - `errors`: errores de configuración y de aplicación.
//! - `cli` / `app`: comandos del binario `comin`.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
