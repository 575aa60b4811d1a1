use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fleet_booking::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};
use fleet_booking::database::DatabaseConnection;
use fleet_booking::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚚 Fleet Booking API");
    info!("====================");

    let config = EnvironmentConfig::from_env()?;

    let app_state = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            info!("✅ PostgreSQL conectado");
            AppState::with_postgres(config.clone(), db_connection.pool().clone())
        }
        StoreBackend::Memory => {
            info!("🧪 Usando almacenamiento en memoria (los datos no persisten)");
            AppState::in_memory(config.clone())
        }
    };

    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("🚗 Vehículos:");
    info!("   POST   /vehicles - Registrar vehículo");
    info!("   GET    /vehicles/available - Vehículos disponibles");
    info!("📅 Reservas:");
    info!("   POST   /bookings - Reservar vehículo");
    info!("   GET    /bookings?customerId= - Reservas de un cliente");
    info!("   DELETE /bookings/:id - Cancelar reserva");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
