pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod session;
pub mod views;

pub use api::GameboxdApi;
pub use config::Config;
pub use errors::AppError;
pub use http::ApiClient;
pub use session::SessionStore;
