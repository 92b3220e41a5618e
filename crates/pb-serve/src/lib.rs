pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use pb_core::{PostbackError, Postbacks};
use pb_db::DbStore;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub postbacks: Arc<Postbacks<DbStore>>,
}

impl AppState {
    pub fn new(store: DbStore) -> Self {
        Self {
            postbacks: Arc::new(Postbacks::new(store)),
        }
    }

    /// Opens the database at `db_path`, creating the postbacks table.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, PostbackError> {
        Ok(Self::new(DbStore::open(db_path.as_ref())?))
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app(state)).await
}
