// property-backend/src/main.rs
use migration::{Migrator, MigratorTrait};
use property_backend::api::{build_router, AppState, Stores};
use property_backend::config::AppConfig;
use property_backend::db::create_db_pool;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Property Backend server...");

    // 設定を読み込む（署名鍵は以降不変）
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        host = %app_config.host,
        port = app_config.port,
        "Configuration loaded"
    );

    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    Migrator::up(&db_pool, None).await?;
    tracing::info!("Database migrations applied.");

    let app_state = AppState::new(Stores::from_db(db_pool), &app_config)?;
    let app_router = build_router(app_state);

    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
