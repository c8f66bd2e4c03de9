pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod query;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
