mod args;

use args::Args;
use axum::Router;
use clap::Parser;
use idrepo_config::Config;
use idrepo_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    idrepo_telemetry::init(Some(&config.telemetry), "info")?;

    // Identity routes are mounted by the embedding services; standalone the
    // shell serves health checks and translated faults only
    let server = Server::new(&config, Router::new());

    tracing::info!(
        config_path = %args.config.display(),
        listen_address = %server.listen_address(),
        "starting idrepo"
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });

    server.serve(shutdown).await?;

    tracing::info!("idrepo stopped");
    Ok(())
}

/// Resolve on `SIGINT` or `SIGTERM`
///
/// A signal that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
