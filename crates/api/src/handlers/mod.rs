//! Request handlers and the state they share.

pub mod health;
pub mod users;

use db::DbPool;

/// State shared by every handler. Cheap to clone (the pool is an `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}
