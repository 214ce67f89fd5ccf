use std::error::Error;

use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_service::api::router;
use todo_service::config::{Config, DEFAULT_LOG_FILTER, Environment, StoreKind};
use todo_service::db::{MemoryTodoStore, SqliteTodoStore, TodoStore};
use todo_service::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // before the subscriber, so RUST_LOG may come from .env
    let environment = Environment::from_env();
    let dotenv = (!environment.is_production()).then(dotenvy::dotenv);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Some(Ok(path)) => info!("loaded environment from {}", path.display()),
        Some(Err(e)) if e.not_found() => debug!("no .env file found"),
        Some(Err(e)) => warn!("failed to load .env: {}", e),
        None => info!("running in production mode"),
    }

    let config = Config::from_env()?;

    match config.store {
        StoreKind::Sqlite => {
            let store = SqliteTodoStore::connect(&config.database_url).await?;
            info!("connected to {}", config.database_url);
            serve(&config, store).await
        }
        StoreKind::Memory => {
            info!("using in-memory store, todos will not survive a restart");
            serve(&config, MemoryTodoStore::new()).await
        }
    }
}

async fn serve<S: TodoStore>(config: &Config, store: S) -> Result<(), Box<dyn Error>> {
    let app = router(AppState::new(store));

    let addr = config.addr();
    info!("listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
