use clap::Parser;
use lifeboard::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifeboard=info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    if let Err(error) = config.validate() {
        eprintln!("lifeboard: {error}");
        return std::process::ExitCode::from(2);
    }

    tracing::info!(server = %config.server_url, "lifeboard starting");
    match lifeboard::app::run(config).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "lifeboard failed");
            eprintln!("lifeboard: {error}");
            std::process::ExitCode::FAILURE
        }
    }
}
