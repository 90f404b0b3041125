pub mod auth;
pub mod config;
pub mod handlers;
mod router;
pub mod state;

pub use auth::AuthenticatedUser;
pub use router::create_router;
pub use state::AppState;
