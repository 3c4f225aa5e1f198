use std::process::ExitCode;

use quickdraw::config::Config;
use quickdraw::metrics::register_metrics;
use quickdraw::startup::create_web_server;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    std_logger::Config::logfmt().init();
    register_metrics();

    let config = match Config::get() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Unable to get the Config. Error: '{error}'.");
            return ExitCode::FAILURE;
        }
    };

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(error) => {
            log::error!("Failed to bind address. Address: '{address}', Error: '{error}'.");
            return ExitCode::FAILURE;
        }
    };

    match create_web_server(config, listener).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("The server stopped with an error. Error: '{error}'.");
            ExitCode::FAILURE
        }
    }
}
