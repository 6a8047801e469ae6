use chrono::Local;
use comin_core::CancellationFlag;
use comin_mailer::app;
use comin_mailer::cli::parse_args;
use comin_mailer::config::AppConfig;
use comin_mailer::errors::AppError;
use std::process::ExitCode;

async fn execute(args: &[String]) -> Result<serde_json::Value, AppError> {
    let command = parse_args(args)?;
    let config = AppConfig::from_env()?;

    // Ctrl+C detiene los envíos pendientes; lo ya enviado queda.
    let cancel = CancellationFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupción recibida, cancelando envíos pendientes");
            on_signal.cancel();
        }
    });

    app::run(command, &config, cancel, Local::now().date_naive()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match execute(&args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            println!("{}", app::error_json(&e));
            ExitCode::from(e.exit_code())
        }
    }
}
