// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod history_client;
pub mod render_surface;
pub mod retry;
