use std::env;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::catalog::OptionsCatalog;
use crate::form::ConvertForm;
use crate::server::Server;

mod catalog;
mod config;
mod dto;
mod error;
mod form;
mod parser;
mod server;

const DEFAULT_UPLOAD_LIMIT_MB: usize = 30;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("LOG_LEVEL"))
        .init();

    // A form that fails to render must never be served.
    let form = match ConvertForm::build(&OptionsCatalog::supported()) {
        Ok(form) => form,
        Err(err) => {
            error!("cannot render convert form: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8090".to_string());
    let upload_limit = env::var("MAX_UPLOAD_SIZE_MB")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .filter(|&val| val > 0)
        .unwrap_or(DEFAULT_UPLOAD_LIMIT_MB)
        * 1024
        * 1024;

    if let Err(err) = Server::new(form, upload_limit).serve(&addr).await {
        error!("cannot serve on {}: {}", addr, err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
