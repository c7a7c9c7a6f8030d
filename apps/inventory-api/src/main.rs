//! Inventory API - gRPC server for the product catalog

use domain_products::{PgProductRepository, ProductService};
use rpc::inventory::inventory_service_server::InventoryServiceServer;
use sea_orm::{ConnectOptions, Database};
use std::net::SocketAddr;
use tonic::transport::Server as TonicServer;
use tracing::info;

mod config;
mod grpc;
mod telemetry;

use config::Config;
use grpc::InventoryGrpcService;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::install_color_eyre();

    let config = Config::from_env()?;
    telemetry::init_tracing(&config.environment);

    let mut options = ConnectOptions::new(&config.database_url);
    options
        .max_connections(config.db_max_connections)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("connected to postgres");

    let grpc_service = {
        let repository = PgProductRepository::new(db);
        let service = ProductService::new(repository);
        InventoryGrpcService::new(service)
    };

    let addr: SocketAddr = format!("0.0.0.0:{}", config.grpc_port).parse()?;
    info!("starting gRPC server on {}", addr);

    TonicServer::builder()
        .add_service(InventoryServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .map_err(|e| eyre::eyre!("gRPC server error: {}", e))?;

    info!("inventory API shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
