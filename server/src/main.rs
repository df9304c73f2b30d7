use tokio::net::TcpListener;
use todo_server::{store, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        database = ?config.database,
        "configuration loaded"
    );

    let store = store::connect(&config).await?;
    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    todo_server::run(listener, store).await?;
    Ok(())
}
